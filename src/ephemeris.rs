//! # Ephemeris engine
//!
//! [`EphemerisEngine`] answers the two questions the scene asks of the solar system:
//!
//! * where is a body at a given simulation time ([`EphemerisEngine::position_of`]),
//! * what does its orbit look like ([`EphemerisEngine::orbit_path_of`]).
//!
//! ## Pipeline
//!
//! ```text
//! Unix ms ─► T (centuries) ─► osculating elements ─► E (Kepler) ─► scene (x, y, z)
//! ```
//!
//! Every call is stateless and deterministic: the engine owns only the element table, the
//! parameters and the solver, none of which change after construction. Time is always
//! passed explicitly; pair the engine with a [`SimulationClock`](crate::clock::SimulationClock)
//! to drive it from a render loop.
//!
//! ## Non-convergence
//!
//! A single frame must not be lost because the Kepler iteration hit its cap. When
//! [`KeplerSolver::solve`] reports [`OrreryError::ConvergenceFailure`], the engine logs a
//! warning and uses the last estimate. Every other error is propagated.
//!
//! ## Example
//!
//! ```rust
//! use orrery::{bodies::Body, ephemeris::EphemerisEngine};
//!
//! let engine = EphemerisEngine::new();
//!
//! // 2000-01-01T12:00:00 UTC
//! let earth = engine.position_of(Body::Earth, 946_728_000_000.0).unwrap();
//! assert!((earth.norm() - 983.3).abs() < 1.0);
//!
//! let path = engine.orbit_path_of(Body::Mars, 360, 946_728_000_000.0).unwrap();
//! assert_eq!(path.len(), 360);
//! ```

use std::collections::BTreeMap;

use itertools::Itertools;
use nalgebra::Vector3;
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    bodies::{Body, ElementTable},
    constants::{Radian, UnixMillis, DPI, GAUSS_GRAV},
    kepler::KeplerSolver,
    orbital_elements::OsculatingElements,
    orrery_errors::OrreryError,
    params::{EngineParams, PathClosure},
    time::{centuries_at, deg_to_rad},
};

/// Sampled orbit of one body: heliocentric points over one revolution of mean anomaly.
///
/// The elements are frozen at `constructed_at_ms`; the path is not updated as the
/// simulation advances. Serializes with each point as an `[x, y, z]` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitPath {
    body: Body,
    constructed_at_ms: UnixMillis,
    closure: PathClosure,
    mean_anomalies: Vec<Radian>,
    points: Vec<Vector3<f64>>,
}

impl OrbitPath {
    pub fn body(&self) -> Body {
        self.body
    }

    /// Simulation time at which the elements were evaluated.
    pub fn constructed_at(&self) -> UnixMillis {
        self.constructed_at_ms
    }

    pub fn closure(&self) -> PathClosure {
        self.closure
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Scene-frame points, in increasing mean anomaly.
    pub fn points(&self) -> &[Vector3<f64>] {
        &self.points
    }

    /// Mean anomaly of each point, radians.
    pub fn mean_anomalies(&self) -> &[Radian] {
        &self.mean_anomalies
    }

    pub fn iter(&self) -> impl Iterator<Item = (Radian, &Vector3<f64>)> {
        self.mean_anomalies.iter().copied().zip(self.points.iter())
    }

    /// Distance between the last and first points (0 for fewer than two points).
    ///
    /// For an open path this is the chord of the missing segment; for a closed path it is
    /// zero up to rounding.
    pub fn closing_gap(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (last - first).norm(),
            _ => 0.0,
        }
    }

    /// Length of the polyline through the points, in scene units.
    pub fn polyline_length(&self) -> f64 {
        self.points
            .iter()
            .tuple_windows()
            .map(|(a, b)| (b - a).norm())
            .sum()
    }
}

impl<'a> IntoIterator for &'a OrbitPath {
    type Item = &'a Vector3<f64>;
    type IntoIter = std::slice::Iter<'a, Vector3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Two-body ephemeris of the planets from mean elements with linear secular rates.
#[derive(Debug, Clone)]
pub struct EphemerisEngine {
    table: ElementTable,
    params: EngineParams,
    solver: KeplerSolver,
}

impl Default for EphemerisEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EphemerisEngine {
    /// Engine over the JPL table of all eight planets with default parameters.
    pub fn new() -> Self {
        let params = EngineParams::default();
        EphemerisEngine {
            table: ElementTable::default(),
            solver: params.kepler_solver(),
            params,
        }
    }

    /// Engine over the JPL table with custom parameters.
    pub fn with_params(params: EngineParams) -> Result<Self, OrreryError> {
        Self::with_table(ElementTable::default(), params)
    }

    /// Engine over a caller-provided element table.
    ///
    /// Arguments
    /// ---------
    /// * `table`: the bodies the engine will know about.
    /// * `params`: validated before use.
    ///
    /// Return
    /// ------
    /// * the engine, or [`OrreryError::InvalidParameter`] if `params` violates a constraint
    pub fn with_table(table: ElementTable, params: EngineParams) -> Result<Self, OrreryError> {
        params.validate()?;
        Ok(EphemerisEngine {
            table,
            solver: params.kepler_solver(),
            params,
        })
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    pub fn table(&self) -> &ElementTable {
        &self.table
    }

    pub fn solver(&self) -> &KeplerSolver {
        &self.solver
    }

    /// Osculating elements of `body` at a simulation time.
    ///
    /// Return
    /// ------
    /// * the elements, [`OrreryError::UnknownBody`] if `body` is not in the table, or
    ///   [`OrreryError::InvalidEccentricity`] outside the validity window of the rates
    pub fn elements_of(
        &self,
        body: Body,
        time_ms: UnixMillis,
    ) -> Result<OsculatingElements, OrreryError> {
        self.table
            .get(body)?
            .osculate(centuries_at(time_ms), self.params.au_scale)
    }

    /// Heliocentric scene-frame position of `body` at a simulation time.
    ///
    /// Arguments
    /// ---------
    /// * `body`: the planet to locate.
    /// * `time_ms`: simulation time, Unix milliseconds.
    ///
    /// Return
    /// ------
    /// * the position in scene units
    ///
    /// See also
    /// --------
    /// * [`EphemerisEngine::positions_at`] – Every body of the table at once.
    pub fn position_of(
        &self,
        body: Body,
        time_ms: UnixMillis,
    ) -> Result<Vector3<f64>, OrreryError> {
        let elements = self.elements_of(body, time_ms)?;
        let ecc_anom = self.eccentric_anomaly(body, elements.mean_anomaly, elements.eccentricity)?;
        Ok(elements.position_at_eccentric_anomaly(ecc_anom))
    }

    /// Same as [`EphemerisEngine::position_of`] with the body given by name.
    pub fn position_of_named(
        &self,
        name: &str,
        time_ms: UnixMillis,
    ) -> Result<Vector3<f64>, OrreryError> {
        self.position_of(name.parse()?, time_ms)
    }

    /// Positions of every body in the table at one simulation time.
    pub fn positions_at(
        &self,
        time_ms: UnixMillis,
    ) -> Result<BTreeMap<Body, Vector3<f64>>, OrreryError> {
        self.table
            .bodies()
            .map(|body| Ok::<_, OrreryError>((body, self.position_of(body, time_ms)?)))
            .collect()
    }

    /// Sample the orbit of `body` with elements frozen at `at_ms`.
    ///
    /// Points are taken at `M_i = 2π·i/N` for `i ∈ 0..N`. With
    /// [`PathClosure::Closed`] the point at `M = 2π` is appended, so the polyline returns
    /// to its start. `N = 0` yields an empty path.
    ///
    /// Arguments
    /// ---------
    /// * `body`: the planet whose orbit is sampled.
    /// * `sample_count`: `N`.
    /// * `at_ms`: simulation time at which the elements are evaluated.
    ///
    /// Return
    /// ------
    /// * the sampled [`OrbitPath`]
    pub fn orbit_path_of(
        &self,
        body: Body,
        sample_count: usize,
        at_ms: UnixMillis,
    ) -> Result<OrbitPath, OrreryError> {
        let elements = self.elements_of(body, at_ms)?;

        let mut mean_anomalies: Vec<Radian> = (0..sample_count)
            .map(|i| DPI * i as f64 / sample_count as f64)
            .collect();
        if self.params.path_closure == PathClosure::Closed && sample_count > 0 {
            mean_anomalies.push(DPI);
        }

        let points = mean_anomalies
            .iter()
            .map(|&m| {
                let ecc_anom = self.eccentric_anomaly(body, m, elements.eccentricity)?;
                Ok::<_, OrreryError>(elements.position_at_eccentric_anomaly(ecc_anom))
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "orbit path of {body}: {} points, T = {:.6}",
            points.len(),
            elements.centuries
        );

        Ok(OrbitPath {
            body,
            constructed_at_ms: at_ms,
            closure: self.params.path_closure,
            mean_anomalies,
            points,
        })
    }

    /// Orbit path of `body` with the configured default sample count.
    pub fn default_orbit_path_of(
        &self,
        body: Body,
        at_ms: UnixMillis,
    ) -> Result<OrbitPath, OrreryError> {
        self.orbit_path_of(body, self.params.orbit_path_samples, at_ms)
    }

    /// Orbit paths of every body in the table, computed in parallel.
    pub fn orbit_paths(
        &self,
        sample_count: usize,
        at_ms: UnixMillis,
    ) -> Result<BTreeMap<Body, OrbitPath>, OrreryError> {
        let bodies: Vec<Body> = self.table.bodies().collect();
        bodies
            .par_iter()
            .map(|&body| {
                let path = self.orbit_path_of(body, sample_count, at_ms)?;
                Ok::<_, OrreryError>((body, path))
            })
            .collect()
    }

    /// Sidereal orbital period of `body` in days, from Kepler's third law.
    ///
    /// Uses the unscaled semi-major axis (AU) at `time_ms` and the Gaussian gravitational
    /// constant: `P = 2π / (k·a^{-3/2})`.
    pub fn orbital_period_days(&self, body: Body, time_ms: UnixMillis) -> Result<f64, OrreryError> {
        let a_au = self.table.get(body)?.a.at(centuries_at(time_ms));
        if a_au.is_nan() || a_au <= 0.0 {
            return Err(OrreryError::InvalidParameter(format!(
                "semi-major axis of {body} must be > 0, got {a_au} AU"
            )));
        }
        Ok(DPI / (GAUSS_GRAV * a_au.powf(-1.5)))
    }

    /// Rotation phase of the surface of `body`, radians in `[0, 2π)`.
    ///
    /// See [`PhysicalProperties::spin_angle_at`](crate::bodies::PhysicalProperties::spin_angle_at)
    /// for the phase model.
    pub fn spin_angle(&self, body: Body, time_ms: UnixMillis) -> Result<Radian, OrreryError> {
        self.table.get(body)?;
        Ok(body.physical().spin_angle_at(time_ms))
    }

    /// Axial tilt and tilt direction of `body`, radians.
    pub fn axial_orientation(&self, body: Body) -> Result<(Radian, Radian), OrreryError> {
        self.table.get(body)?;
        let physical = body.physical();
        Ok((
            deg_to_rad(physical.axial_tilt_degrees),
            deg_to_rad(physical.axial_dir_degrees),
        ))
    }

    /// Eccentric anomaly for `M`, falling back on the last estimate if the cap is hit.
    fn eccentric_anomaly(
        &self,
        body: Body,
        mean_anomaly: Radian,
        eccentricity: f64,
    ) -> Result<Radian, OrreryError> {
        match self.solver.solve(mean_anomaly, eccentricity) {
            Err(OrreryError::ConvergenceFailure {
                last_estimate,
                residual,
                iterations,
            }) => {
                log::warn!(
                    "Kepler solver did not converge for {body} after {iterations} iterations \
                     (M = {mean_anomaly}, e = {eccentricity}, residual = {residual:e}); \
                     using last estimate E = {last_estimate}"
                );
                Ok(last_estimate)
            }
            other => other,
        }
    }
}

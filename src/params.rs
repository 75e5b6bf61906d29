//! # Engine configuration
//!
//! This module defines [`EngineParams`], the tunable parameters shared by the
//! [`EphemerisEngine`](crate::ephemeris::EphemerisEngine) and the
//! [`SimulationClock`](crate::clock::SimulationClock), together with a validating
//! fluent builder.
//!
//! ## Parameters
//!
//! | name                    | default   | constraint        |
//! |-------------------------|-----------|-------------------|
//! | `au_scale`              | 1000.0    | finite, > 0       |
//! | `kepler_tolerance`      | 1e-6      | finite, > 0       |
//! | `kepler_max_iterations` | 30        | ≥ 1               |
//! | `orbit_path_samples`    | 10 000    | ≥ 1               |
//! | `acceleration_factor`   | 10 000.0  | finite, ≥ 0       |
//! | `path_closure`          | `Open`    | –                 |
//!
//! ## Example
//!
//! ```rust
//! use orrery::params::{EngineParams, PathClosure};
//!
//! let params = EngineParams::builder()
//!     .au_scale(500.0)
//!     .orbit_path_samples(2048)
//!     .path_closure(PathClosure::Closed)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(params.orbit_path_samples, 2048);
//! ```
//!
//! [`EngineParams`] is serde (de)serializable so a host can keep it in its own
//! configuration file; missing fields take their default values.

use std::cmp::Ordering::{Equal, Greater};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        DEFAULT_ACCELERATION_FACTOR, DEFAULT_AU_SCALE, DEFAULT_ORBIT_SAMPLES,
        KEPLER_MAX_ITERATIONS, KEPLER_TOLERANCE,
    },
    kepler::KeplerSolver,
    orrery_errors::OrreryError,
};

/// Whether a sampled orbit path repeats its first point at `M = 2π`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathClosure {
    /// `N` samples at `M = 2π·i/N`, `i ∈ 0..N`; the polyline stops one step short of
    /// a full revolution.
    #[default]
    Open,
    /// The `N` open samples followed by the `M = 2π` point (`N + 1` points).
    Closed,
}

/// Tunable parameters of the ephemeris engine and simulation clock.
///
/// See the [module documentation](crate::params) for defaults and constraints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParams {
    /// Scene length units per astronomical unit.
    pub au_scale: f64,
    /// Convergence threshold of the Kepler solver (radians).
    pub kepler_tolerance: f64,
    /// Iteration cap of the Kepler solver.
    pub kepler_max_iterations: usize,
    /// Default sample count for orbit paths.
    pub orbit_path_samples: usize,
    /// Simulation milliseconds per real millisecond.
    pub acceleration_factor: f64,
    pub path_closure: PathClosure,
}

impl Default for EngineParams {
    fn default() -> Self {
        EngineParams {
            au_scale: DEFAULT_AU_SCALE,
            kepler_tolerance: KEPLER_TOLERANCE,
            kepler_max_iterations: KEPLER_MAX_ITERATIONS,
            orbit_path_samples: DEFAULT_ORBIT_SAMPLES,
            acceleration_factor: DEFAULT_ACCELERATION_FACTOR,
            path_closure: PathClosure::Open,
        }
    }
}

impl EngineParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineParamsBuilder {
        EngineParamsBuilder::new()
    }

    /// Kepler solver configured with this tolerance and iteration cap.
    pub fn kepler_solver(&self) -> KeplerSolver {
        KeplerSolver::new(self.kepler_tolerance, self.kepler_max_iterations)
    }

    /// Check every constraint; used by the builder and by deserialized parameters.
    pub fn validate(&self) -> Result<(), OrreryError> {
        if !gt0(self.au_scale) || !self.au_scale.is_finite() {
            return Err(OrreryError::InvalidParameter(
                "au_scale must be finite and > 0".into(),
            ));
        }
        if !gt0(self.kepler_tolerance) || !self.kepler_tolerance.is_finite() {
            return Err(OrreryError::InvalidParameter(
                "kepler_tolerance must be finite and > 0".into(),
            ));
        }
        if self.kepler_max_iterations == 0 {
            return Err(OrreryError::InvalidParameter(
                "kepler_max_iterations must be >= 1".into(),
            ));
        }
        if self.orbit_path_samples == 0 {
            return Err(OrreryError::InvalidParameter(
                "orbit_path_samples must be >= 1".into(),
            ));
        }
        validate_acceleration(self.acceleration_factor)
    }
}

/// Acceleration factors must be finite and non-negative.
pub(crate) fn validate_acceleration(factor: f64) -> Result<(), OrreryError> {
    if ge0(factor) && factor.is_finite() {
        Ok(())
    } else {
        Err(OrreryError::InvalidParameter(format!(
            "acceleration_factor must be finite and >= 0, got {factor}"
        )))
    }
}

/// Return true iff x > 0.0 and comparable (i.e., not NaN).
fn gt0(x: f64) -> bool {
    x.partial_cmp(&0.0) == Some(Greater)
}

/// Return true iff x >= 0.0 and comparable (i.e., not NaN).
fn ge0(x: f64) -> bool {
    matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal))
}

/// Builder for [`EngineParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct EngineParamsBuilder {
    params: EngineParams,
}

impl EngineParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: EngineParams::default(),
        }
    }

    pub fn au_scale(mut self, v: f64) -> Self {
        self.params.au_scale = v;
        self
    }
    pub fn kepler_tolerance(mut self, v: f64) -> Self {
        self.params.kepler_tolerance = v;
        self
    }
    pub fn kepler_max_iterations(mut self, v: usize) -> Self {
        self.params.kepler_max_iterations = v;
        self
    }
    pub fn orbit_path_samples(mut self, v: usize) -> Self {
        self.params.orbit_path_samples = v;
        self
    }
    pub fn acceleration_factor(mut self, v: f64) -> Self {
        self.params.acceleration_factor = v;
        self
    }
    pub fn path_closure(mut self, v: PathClosure) -> Self {
        self.params.path_closure = v;
        self
    }

    /// Finalize the builder.
    ///
    /// Return
    /// ----------
    /// * `Ok(EngineParams)` if every constraint holds.
    /// * [`OrreryError::InvalidParameter`] naming the first violated constraint.
    pub fn build(self) -> Result<EngineParams, OrreryError> {
        self.params.validate()?;
        Ok(self.params)
    }
}

impl fmt::Display for EngineParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Engine Parameters")?;
        writeln!(f, "-----------------")?;
        writeln!(f, "  au_scale              = {}", self.au_scale)?;
        writeln!(f, "  kepler_tolerance      = {:e}", self.kepler_tolerance)?;
        writeln!(f, "  kepler_max_iterations = {}", self.kepler_max_iterations)?;
        writeln!(f, "  orbit_path_samples    = {}", self.orbit_path_samples)?;
        writeln!(f, "  acceleration_factor   = {}", self.acceleration_factor)?;
        write!(f, "  path_closure          = {:?}", self.path_closure)
    }
}

#[cfg(test)]
mod params_test {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = EngineParams::builder().build().unwrap();
        assert_eq!(params, EngineParams::default());
        assert_eq!(params.au_scale, 1000.0);
        assert_eq!(params.kepler_tolerance, 1e-6);
        assert_eq!(params.kepler_max_iterations, 30);
        assert_eq!(params.orbit_path_samples, 10_000);
        assert_eq!(params.acceleration_factor, 10_000.0);
        assert_eq!(params.path_closure, PathClosure::Open);
    }

    #[test]
    fn test_builder_sets_fields() {
        let params = EngineParams::builder()
            .au_scale(42.0)
            .kepler_tolerance(1e-10)
            .kepler_max_iterations(50)
            .orbit_path_samples(360)
            .acceleration_factor(0.0)
            .path_closure(PathClosure::Closed)
            .build()
            .unwrap();

        assert_eq!(params.au_scale, 42.0);
        assert_eq!(params.kepler_solver(), KeplerSolver::new(1e-10, 50));
        assert_eq!(params.orbit_path_samples, 360);
        assert_eq!(params.acceleration_factor, 0.0);
        assert_eq!(params.path_closure, PathClosure::Closed);
    }

    #[test]
    fn test_builder_rejects_invalid_values() {
        let cases = [
            EngineParams::builder().au_scale(0.0),
            EngineParams::builder().au_scale(f64::INFINITY),
            EngineParams::builder().kepler_tolerance(-1e-6),
            EngineParams::builder().kepler_tolerance(f64::NAN),
            EngineParams::builder().kepler_max_iterations(0),
            EngineParams::builder().orbit_path_samples(0),
            EngineParams::builder().acceleration_factor(-1.0),
            EngineParams::builder().acceleration_factor(f64::NAN),
        ];
        for builder in cases {
            assert!(matches!(
                builder.build(),
                Err(OrreryError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_deserialize_partial_config() {
        let params: EngineParams =
            serde_json::from_str(r#"{ "au_scale": 250.0, "path_closure": "closed" }"#).unwrap();
        assert_eq!(params.au_scale, 250.0);
        assert_eq!(params.path_closure, PathClosure::Closed);
        assert_eq!(params.orbit_path_samples, DEFAULT_ORBIT_SAMPLES);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_display() {
        let text = EngineParams::default().to_string();
        assert!(text.contains("au_scale              = 1000"));
        assert!(text.contains("path_closure          = Open"));
    }
}

//! # Kepler's equation
//!
//! Solves `E − e·sin(E) = M` for the eccentric anomaly `E` of an elliptic orbit
//! (`0 ≤ e < 1`) with a checked Newton–Raphson iteration.
//!
//! The same [`KeplerSolver`] serves per-frame positions and orbit-path sampling, so a
//! rendered body always sits on its rendered orbit.
//!
//! ## Algorithm
//!
//! 1. `M` is reduced to `[−π, π]`; the removed multiple of 2π is added back to the result,
//!    so the returned `E` satisfies Kepler's equation for the caller's `M`.
//! 2. Starting point: `E₀ = M + e·sin M·(1 + e·cos M)`, or `π·sign(M)` when `e ≥ 0.9`.
//!    Below 0.9 the series start converges within a handful of steps over the whole
//!    reduced interval; above it, the Newton sequence from `±π` is monotone.
//! 3. `E ← E − (E − e·sin E − M) / (1 − e·cos E)` until `|ΔE| < tolerance`.
//!
//! Exceeding the iteration cap yields [`OrreryError::ConvergenceFailure`] carrying the
//! last estimate, which callers may use as a fallback.

use std::f64::consts::PI;

use crate::{
    constants::{Radian, DPI, KEPLER_MAX_ITERATIONS, KEPLER_TOLERANCE},
    orrery_errors::OrreryError,
};

/// Eccentricity above which the iteration starts from `±π`.
const HIGH_ECCENTRICITY: f64 = 0.9;

/// Principal value of an angle, in `[0, 2π)`.
pub fn principal_angle(a: f64) -> f64 {
    a.rem_euclid(DPI)
}

/// Reduce an angle to `[−π, π]`.
pub fn reduce_angle(a: f64) -> f64 {
    a - DPI * (a / DPI).round()
}

/// Residual `E − e·sin(E) − M` of Kepler's equation.
#[inline]
pub fn kepler_residual(eccentric_anomaly: Radian, eccentricity: f64, mean_anomaly: Radian) -> f64 {
    eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly
}

/// True anomaly `ν` from the eccentric anomaly, in `(−π, π]`.
pub fn true_anomaly_from_eccentric(eccentric_anomaly: Radian, eccentricity: f64) -> Radian {
    let (sin_e, cos_e) = eccentric_anomaly.sin_cos();
    ((1.0 - eccentricity * eccentricity).sqrt() * sin_e).atan2(cos_e - eccentricity)
}

/// Newton–Raphson solver for the elliptic Kepler equation.
///
/// Fields
/// -----------------
/// * `tolerance`: convergence threshold on `|E_{n+1} − E_n|` (radians).
/// * `max_iterations`: hard cap on Newton steps before reporting non-convergence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolver {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        KeplerSolver {
            tolerance: KEPLER_TOLERANCE,
            max_iterations: KEPLER_MAX_ITERATIONS,
        }
    }
}

impl KeplerSolver {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        KeplerSolver {
            tolerance,
            max_iterations,
        }
    }

    /// Solve Kepler's equation for the eccentric anomaly.
    ///
    /// Arguments
    /// -----------------
    /// * `mean_anomaly`: mean anomaly `M` in radians, any real value.
    /// * `eccentricity`: orbital eccentricity, must lie in `[0, 1)`.
    ///
    /// Return
    /// ----------
    /// * `Ok(E)` with `|E − e·sin E − M|` well below the tolerance.
    /// * [`OrreryError::InvalidEccentricity`] when `e ∉ [0, 1)`.
    /// * [`OrreryError::ConvergenceFailure`] when the iteration cap is hit.
    ///
    /// See also
    /// ------------
    /// * [`kepler_residual`] – Residual used in the failure report.
    pub fn solve(&self, mean_anomaly: Radian, eccentricity: f64) -> Result<Radian, OrreryError> {
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(OrreryError::InvalidEccentricity {
                eccentricity,
                centuries: None,
            });
        }
        if eccentricity == 0.0 {
            return Ok(mean_anomaly);
        }

        let m = reduce_angle(mean_anomaly);
        let offset = mean_anomaly - m;
        let e = eccentricity;

        let mut ecc_anom = if e < HIGH_ECCENTRICITY {
            m + e * m.sin() * (1.0 + e * m.cos())
        } else {
            PI.copysign(m)
        };

        for _ in 0..self.max_iterations {
            let delta = kepler_residual(ecc_anom, e, m) / (1.0 - e * ecc_anom.cos());
            ecc_anom -= delta;
            if delta.abs() < self.tolerance {
                return Ok(ecc_anom + offset);
            }
        }

        log::trace!(
            "Kepler iteration cap reached: M = {mean_anomaly}, e = {eccentricity}, E = {ecc_anom}"
        );
        Err(OrreryError::ConvergenceFailure {
            last_estimate: ecc_anom + offset,
            residual: kepler_residual(ecc_anom, e, m),
            iterations: self.max_iterations,
        })
    }
}

/// Solve Kepler's equation with the default tolerance and iteration cap.
pub fn solve_kepler(mean_anomaly: Radian, eccentricity: f64) -> Result<Radian, OrreryError> {
    KeplerSolver::default().solve(mean_anomaly, eccentricity)
}

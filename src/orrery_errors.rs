use hifitime::HifitimeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrreryError {
    #[error(
        "Kepler equation did not converge after {iterations} iterations \
         (last estimate E = {last_estimate}, residual = {residual:e})"
    )]
    ConvergenceFailure {
        last_estimate: f64,
        residual: f64,
        iterations: usize,
    },

    #[error(
        "Eccentricity {eccentricity} outside [0, 1){}",
        .centuries.map(|t| format!(" at T = {t} centuries from J2000")).unwrap_or_default()
    )]
    InvalidEccentricity {
        eccentricity: f64,
        centuries: Option<f64>,
    },

    #[error("Unknown body: {0}")]
    UnknownBody(String),

    #[error("Invalid engine parameter: {0}")]
    InvalidParameter(String),

    #[error("Unable to read the wall clock: {0}")]
    ClockError(#[from] HifitimeError),
}

impl PartialEq for OrreryError {
    fn eq(&self, other: &Self) -> bool {
        use OrreryError::*;
        match (self, other) {
            (
                ConvergenceFailure {
                    last_estimate: a,
                    residual: b,
                    iterations: c,
                },
                ConvergenceFailure {
                    last_estimate: x,
                    residual: y,
                    iterations: z,
                },
            ) => a == x && b == y && c == z,
            (
                InvalidEccentricity {
                    eccentricity: a,
                    centuries: b,
                },
                InvalidEccentricity {
                    eccentricity: x,
                    centuries: y,
                },
            ) => a == x && b == y,
            (UnknownBody(a), UnknownBody(b)) => a == b,
            (InvalidParameter(a), InvalidParameter(b)) => a == b,

            // hifitime errors are compared by variant only
            (ClockError(_), ClockError(_)) => true,

            _ => false,
        }
    }
}

//! # Constants and type definitions for Orrery
//!
//! This module centralizes the **epochs**, **conversion factors**, and **type aliases**
//! shared by the ephemeris engine and the simulation clock.
//!
//! ## Overview
//!
//! - Reference epochs (Unix epoch and J2000.0 as Julian Dates)
//! - Unit conversions (degrees ↔ radians, milliseconds ↔ days, days ↔ centuries)
//! - Engine defaults (AU scale, solver tolerance, clock acceleration)
//! - Type aliases documenting the unit carried by a plain `f64`

// -------------------------------------------------------------------------------------------------
// Epochs and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of milliseconds in a day
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Number of seconds in an hour
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Julian Date of the Unix epoch (1970-01-01 00:00:00 UTC)
pub const JD_UNIX_EPOCH: f64 = 2_440_587.5;

/// Julian Date of J2000.0 (2000-01-01 12:00:00 TT)
pub const JD_J2000: f64 = 2_451_545.0;

/// Number of days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Gaussian gravitational constant k, in rad/day for a = 1 AU
pub const GAUSS_GRAV: f64 = 0.01720209895;

// -------------------------------------------------------------------------------------------------
// Engine defaults
// -------------------------------------------------------------------------------------------------

/// Scene length units per astronomical unit, shared by every body
pub const DEFAULT_AU_SCALE: f64 = 1000.0;

/// Absolute convergence threshold on successive eccentric anomaly iterates (radians)
pub const KEPLER_TOLERANCE: f64 = 1e-6;

/// Newton–Raphson iteration cap for Kepler's equation
pub const KEPLER_MAX_ITERATIONS: usize = 30;

/// Number of points sampled along a full orbit path
pub const DEFAULT_ORBIT_SAMPLES: usize = 10_000;

/// Simulation milliseconds elapsed per real millisecond
pub const DEFAULT_ACCELERATION_FACTOR: f64 = 10_000.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Julian Date (days)
pub type JulianDate = f64;
/// Julian centuries elapsed since J2000.0
pub type Centuries = f64;
/// Milliseconds since the Unix epoch
pub type UnixMillis = f64;
/// Length in scene units (AU multiplied by the engine's AU scale)
pub type SceneUnit = f64;

#![allow(dead_code)]

use approx::assert_relative_eq;
use nalgebra::Vector3;
use orrery::{
    bodies::{Body, ElementTable},
    ephemeris::EphemerisEngine,
    orbital_elements::{OrbitalElementSet, SecularElement},
    params::EngineParams,
};

/// 2000-01-01T12:00:00 UTC in Unix milliseconds.
pub const J2000_MS: f64 = 946_728_000_000.0;

/// One Julian century in milliseconds.
pub const MS_PER_CENTURY: f64 = 36_525.0 * 86_400_000.0;

/// Element set with no secular drift except the mean longitude.
pub fn frozen_elements(a: f64, e: f64, l_rate: f64) -> OrbitalElementSet {
    OrbitalElementSet {
        a: SecularElement::new(a, 0.0),
        e: SecularElement::new(e, 0.0),
        i: SecularElement::new(4.2, 0.0),
        l: SecularElement::new(37.0, l_rate),
        long_peri: SecularElement::new(110.0, 0.0),
        long_node: SecularElement::new(60.0, 0.0),
    }
}

/// Engine knowing a single body, with default parameters.
pub fn engine_with(body: Body, set: OrbitalElementSet) -> EphemerisEngine {
    EphemerisEngine::with_table(ElementTable::empty().with(body, set), EngineParams::default())
        .unwrap()
}

pub fn assert_vectors_close(actual: &Vector3<f64>, expected: &Vector3<f64>, epsilon: f64) {
    assert_relative_eq!(actual.x, expected.x, epsilon = epsilon);
    assert_relative_eq!(actual.y, expected.y, epsilon = epsilon);
    assert_relative_eq!(actual.z, expected.z, epsilon = epsilon);
}

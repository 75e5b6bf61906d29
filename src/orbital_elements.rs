//! # Mean orbital elements and their secular drift
//!
//! This module defines the static per-body element data ([`OrbitalElementSet`]) and the
//! instantaneous element values derived from it at a given time ([`OsculatingElements`]).
//!
//! ## Element model
//!
//! Every element is a [`SecularElement`]: a value at J2000.0 plus a linear rate per Julian
//! century. The six elements follow the JPL *approximate positions of the planets* layout:
//!
//! | element      | unit          | meaning                        |
//! |--------------|---------------|--------------------------------|
//! | `a`          | AU            | semi-major axis                |
//! | `e`          | –             | eccentricity                   |
//! | `i`          | deg           | inclination to the ecliptic    |
//! | `l`          | deg           | mean longitude                 |
//! | `long_peri`  | deg           | longitude of perihelion (ϖ)    |
//! | `long_node`  | deg           | longitude of ascending node (Ω)|
//!
//! [`OrbitalElementSet::osculate`] evaluates each element at `T` centuries, converts the
//! angles to radians, scales `a` into scene units and derives
//!
//! * argument of perihelion `ω = ϖ − Ω`
//! * mean anomaly `M = L − ϖ`
//!
//! Neither derived angle is reduced: downstream trigonometry is periodic.
//!
//! ## Validity
//!
//! The rates are only meaningful over a bounded window around J2000. If the drifted
//! eccentricity leaves `[0, 1)` the evaluation fails with
//! [`OrreryError::InvalidEccentricity`](crate::orrery_errors::OrreryError::InvalidEccentricity)
//! rather than producing NaN coordinates.

use std::fmt;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{Centuries, Radian, SceneUnit},
    heliocentric::to_heliocentric,
    orrery_errors::OrreryError,
    time::{deg_to_rad, rad_to_deg},
};

/// A value at J2000.0 and its linear rate per Julian century.
///
/// Serialized as a `[base, rate]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct SecularElement {
    pub base: f64,
    pub rate: f64,
}

impl SecularElement {
    pub const fn new(base: f64, rate: f64) -> Self {
        SecularElement { base, rate }
    }

    /// Value of the element `T` centuries after J2000.0.
    #[inline]
    pub fn at(&self, centuries: Centuries) -> f64 {
        self.base + self.rate * centuries
    }
}

impl From<(f64, f64)> for SecularElement {
    fn from((base, rate): (f64, f64)) -> Self {
        SecularElement { base, rate }
    }
}

impl From<SecularElement> for (f64, f64) {
    fn from(elem: SecularElement) -> Self {
        (elem.base, elem.rate)
    }
}

/// Mean elements of one body at J2000.0 with their secular rates.
///
/// Units
/// -----
/// * `a`: AU, AU/century
/// * `e`: unitless, 1/century
/// * `i`, `l`, `long_peri`, `long_node`: degrees, degrees/century
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElementSet {
    pub a: SecularElement,
    pub e: SecularElement,
    pub i: SecularElement,
    pub l: SecularElement,
    pub long_peri: SecularElement,
    pub long_node: SecularElement,
}

impl OrbitalElementSet {
    /// Evaluate the osculating elements `T` centuries after J2000.0.
    ///
    /// Arguments
    /// -----------------
    /// * `centuries`: Julian centuries since J2000.0 (`T`).
    /// * `au_scale`: scene units per AU, applied to the semi-major axis.
    ///
    /// Return
    /// ----------
    /// * The [`OsculatingElements`] at `T`, angles in radians.
    /// * [`OrreryError::InvalidEccentricity`] if `e(T) ∉ [0, 1)`.
    pub fn osculate(
        &self,
        centuries: Centuries,
        au_scale: f64,
    ) -> Result<OsculatingElements, OrreryError> {
        let eccentricity = self.e.at(centuries);
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(OrreryError::InvalidEccentricity {
                eccentricity,
                centuries: Some(centuries),
            });
        }

        let mean_longitude = deg_to_rad(self.l.at(centuries));
        let longitude_of_perihelion = deg_to_rad(self.long_peri.at(centuries));
        let longitude_of_node = deg_to_rad(self.long_node.at(centuries));

        Ok(OsculatingElements {
            centuries,
            semi_major_axis: self.a.at(centuries) * au_scale,
            eccentricity,
            inclination: deg_to_rad(self.i.at(centuries)),
            mean_longitude,
            longitude_of_perihelion,
            longitude_of_node,
            argument_of_perihelion: longitude_of_perihelion - longitude_of_node,
            mean_anomaly: mean_longitude - longitude_of_perihelion,
        })
    }

    /// Sidereal period implied by the mean-longitude rate, in days.
    ///
    /// Returns `None` when the rate is zero (the body does not advance along its orbit).
    pub fn mean_motion_period_days(&self) -> Option<f64> {
        if self.l.rate == 0.0 {
            None
        } else {
            Some(360.0 / self.l.rate.abs() * crate::constants::DAYS_PER_CENTURY)
        }
    }
}

/// Orbital elements of a body evaluated at a specific time.
///
/// Units
/// -----
/// * `centuries`: Julian centuries since J2000.0 at which the elements were evaluated.
/// * `semi_major_axis`: scene units.
/// * `eccentricity`: unitless, in `[0, 1)`.
/// * all angles: radians, unreduced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OsculatingElements {
    pub centuries: Centuries,
    pub semi_major_axis: SceneUnit,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub mean_longitude: Radian,
    pub longitude_of_perihelion: Radian,
    pub longitude_of_node: Radian,
    pub argument_of_perihelion: Radian,
    pub mean_anomaly: Radian,
}

impl OsculatingElements {
    /// Heliocentric position for a given eccentric anomaly on this ellipse.
    pub fn position_at_eccentric_anomaly(&self, eccentric_anomaly: Radian) -> Vector3<f64> {
        to_heliocentric(
            self.semi_major_axis,
            self.eccentricity,
            self.inclination,
            self.argument_of_perihelion,
            self.longitude_of_node,
            eccentric_anomaly,
        )
    }

    /// Perihelion distance `a(1 − e)`, scene units.
    pub fn perihelion_distance(&self) -> SceneUnit {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Aphelion distance `a(1 + e)`, scene units.
    pub fn aphelion_distance(&self) -> SceneUnit {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }
}

impl fmt::Display for OsculatingElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Osculating Elements @ T = {:.8} centuries from J2000",
            self.centuries
        )?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)        = {:.6} scene units",
            self.semi_major_axis
        )?;
        writeln!(
            f,
            "  e   (eccentricity)           = {:.8}",
            self.eccentricity
        )?;
        let angles = [
            ("I   (inclination)          ", self.inclination),
            ("L   (mean longitude)       ", self.mean_longitude),
            ("ϖ   (long. of perihelion)  ", self.longitude_of_perihelion),
            ("Ω   (long. of node)        ", self.longitude_of_node),
            ("ω   (arg. of perihelion)   ", self.argument_of_perihelion),
        ];
        for (label, value) in angles {
            writeln!(
                f,
                "  {label} = {value:.6} rad ({:.6}°)",
                rad_to_deg(value)
            )?;
        }
        write!(
            f,
            "  M   (mean anomaly)           = {:.6} rad ({:.6}°)",
            self.mean_anomaly,
            rad_to_deg(self.mean_anomaly)
        )
    }
}

#[cfg(test)]
pub(crate) mod orbital_elements_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    pub(crate) fn earth_like() -> OrbitalElementSet {
        OrbitalElementSet {
            a: SecularElement::new(1.00000261, 0.00000562),
            e: SecularElement::new(0.01671123, -0.00004392),
            i: SecularElement::new(-0.00001531, -0.01294668),
            l: SecularElement::new(100.46457166, 35999.37244981),
            long_peri: SecularElement::new(102.93768193, 0.32327364),
            long_node: SecularElement::new(0.0, 0.0),
        }
    }

    #[test]
    fn test_secular_element() {
        let elem = SecularElement::new(10.0, -2.0);
        assert_eq!(elem.at(0.0), 10.0);
        assert_eq!(elem.at(1.5), 7.0);
        assert_eq!(elem.at(-1.0), 12.0);
    }

    #[test]
    fn test_osculate_at_j2000() {
        let osc = earth_like().osculate(0.0, 1000.0).unwrap();

        assert_eq!(osc.centuries, 0.0);
        assert_abs_diff_eq!(osc.semi_major_axis, 1000.00261, epsilon = 1e-9);
        assert_eq!(osc.eccentricity, 0.01671123);
        assert_abs_diff_eq!(
            rad_to_deg(osc.mean_anomaly),
            100.46457166 - 102.93768193,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            osc.argument_of_perihelion,
            osc.longitude_of_perihelion - osc.longitude_of_node,
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(
            osc.perihelion_distance(),
            1000.00261 * (1.0 - 0.01671123),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_osculate_applies_drift() {
        let osc = earth_like().osculate(0.25, 1.0).unwrap();
        assert_abs_diff_eq!(osc.eccentricity, 0.01671123 - 0.00004392 * 0.25, epsilon = 1e-15);
        assert_abs_diff_eq!(
            rad_to_deg(osc.mean_longitude),
            100.46457166 + 35999.37244981 * 0.25,
            epsilon = 1e-8
        );
        // mean anomaly is not reduced
        assert!(osc.mean_anomaly > crate::constants::DPI);
    }

    #[test]
    fn test_eccentricity_guard() {
        let mut set = earth_like();
        set.e = SecularElement::new(0.5, 0.25);

        assert!(set.osculate(1.9, 1.0).is_ok());
        assert_eq!(
            set.osculate(2.0, 1.0).unwrap_err(),
            OrreryError::InvalidEccentricity {
                eccentricity: 1.0,
                centuries: Some(2.0),
            }
        );
        assert!(matches!(
            set.osculate(-2.5, 1.0),
            Err(OrreryError::InvalidEccentricity { .. })
        ));
    }

    #[test]
    fn test_mean_motion_period() {
        let period = earth_like().mean_motion_period_days().unwrap();
        assert_abs_diff_eq!(period, 365.25, epsilon = 0.1);

        let mut frozen = earth_like();
        frozen.l.rate = 0.0;
        assert_eq!(frozen.mean_motion_period_days(), None);
    }

    #[test]
    fn test_display() {
        let osc = earth_like().osculate(0.0, 1.0).unwrap();
        let text = format!("{osc}");
        assert!(text.starts_with("Osculating Elements @ T = 0.00000000"));
        assert!(text.contains("e   (eccentricity)           = 0.01671123"));
        assert!(text.contains("M   (mean anomaly)"));
    }

    #[test]
    fn test_serde_pairs() {
        let json = serde_json::to_string(&earth_like()).unwrap();
        assert!(json.contains("\"a\":[1.00000261,"));
        let back: OrbitalElementSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, earth_like());
    }
}

//! # Solar-system bodies and the element table
//!
//! [`Body`] is the closed set of planets the engine knows about. Each body carries its
//! J2000.0 mean elements and secular rates ([`Body::j2000_elements`]) and a few physical
//! properties consumed by the rendering layer ([`Body::physical`]).
//!
//! ## Data source
//!
//! Mean elements and rates are the JPL *Keplerian elements for approximate positions of
//! the major planets*, table 1 (valid 1800 AD – 2050 AD), referred to the mean ecliptic
//! and equinox of J2000. The Earth entry is the Earth–Moon barycenter.
//!
//! ## Element table
//!
//! [`ElementTable`] maps bodies to element sets. The engine owns one; it defaults to the
//! JPL table but callers may build a reduced or modified table (e.g. for tests or what-if
//! scenarios). Looking up a body absent from the table yields
//! [`OrreryError::UnknownBody`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{Degree, Radian, UnixMillis, DPI, SECONDS_PER_HOUR},
    kepler::principal_angle,
    orbital_elements::{OrbitalElementSet, SecularElement},
    orrery_errors::OrreryError,
    time::seconds_since_utc_midnight,
};

/// Identifier of a planet.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

/// Rotation and spin-axis data used to orient a body's mesh.
///
/// Units
/// -----
/// * `rotation_period_hours`: sidereal rotation period, hours.
/// * `axial_tilt_degrees`: obliquity of the spin axis to the orbit, degrees (> 90° is retrograde).
/// * `axial_dir_degrees`: azimuth of the tilted axis in the scene, degrees.
/// * `hours_lapse`: offset of the rotation phase origin after UTC midnight, hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalProperties {
    pub rotation_period_hours: f64,
    pub axial_tilt_degrees: Degree,
    pub axial_dir_degrees: Degree,
    #[serde(default)]
    pub hours_lapse: f64,
}

impl PhysicalProperties {
    /// Rotation phase of the surface at a given time, radians in `[0, 2π)`.
    ///
    /// The phase is the fraction of a rotation period elapsed since the phase origin:
    ///
    /// ```text
    /// φ = 2π · (s − 3600·hours_lapse) / (3600·P)
    /// ```
    ///
    /// with `s` the seconds since the last UTC midnight and `P` the rotation period in hours.
    pub fn spin_angle_at(&self, epoch_ms: UnixMillis) -> Radian {
        let seconds = seconds_since_utc_midnight(epoch_ms) - SECONDS_PER_HOUR * self.hours_lapse;
        principal_angle(seconds / (self.rotation_period_hours * SECONDS_PER_HOUR) * DPI)
    }
}

impl Body {
    /// All planets, ordered by distance from the Sun.
    pub const ALL: [Body; 8] = [
        Body::Mercury,
        Body::Venus,
        Body::Earth,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Earth => "earth",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
        }
    }

    /// Mean elements at J2000.0 with their rates per Julian century.
    pub fn j2000_elements(&self) -> OrbitalElementSet {
        let set = |a: (f64, f64),
                   e: (f64, f64),
                   i: (f64, f64),
                   l: (f64, f64),
                   long_peri: (f64, f64),
                   long_node: (f64, f64)| OrbitalElementSet {
            a: SecularElement::from(a),
            e: SecularElement::from(e),
            i: SecularElement::from(i),
            l: SecularElement::from(l),
            long_peri: SecularElement::from(long_peri),
            long_node: SecularElement::from(long_node),
        };

        match self {
            Body::Mercury => set(
                (0.38709927, 0.00000037),
                (0.20563593, 0.00001906),
                (7.00497902, -0.00594749),
                (252.25032350, 149472.67411175),
                (77.45779628, 0.16047689),
                (48.33076593, -0.12534081),
            ),
            Body::Venus => set(
                (0.72333566, 0.00000390),
                (0.00677672, -0.00004107),
                (3.39467605, -0.00078890),
                (181.97909950, 58517.81538729),
                (131.60246718, 0.00268329),
                (76.67984255, -0.27769418),
            ),
            Body::Earth => set(
                (1.00000261, 0.00000562),
                (0.01671123, -0.00004392),
                (-0.00001531, -0.01294668),
                (100.46457166, 35999.37244981),
                (102.93768193, 0.32327364),
                (0.0, 0.0),
            ),
            Body::Mars => set(
                (1.52371034, 0.00001847),
                (0.09339410, 0.00007882),
                (1.84969142, -0.00813131),
                (-4.55343205, 19140.30268499),
                (-23.94362959, 0.44441088),
                (49.55953891, -0.29257343),
            ),
            Body::Jupiter => set(
                (5.20288700, -0.00011607),
                (0.04838624, -0.00013253),
                (1.30439695, -0.00183714),
                (34.39644051, 3034.74612775),
                (14.72847983, 0.21252668),
                (100.47390909, 0.20469106),
            ),
            Body::Saturn => set(
                (9.53667594, -0.00125060),
                (0.05386179, -0.00050991),
                (2.48599187, 0.00193609),
                (49.95424423, 1222.49362201),
                (92.59887831, -0.41897216),
                (113.66242448, -0.28867794),
            ),
            Body::Uranus => set(
                (19.18916464, -0.00196176),
                (0.04725744, -0.00004397),
                (0.77263783, -0.00242939),
                (313.23810451, 428.48202785),
                (170.95427630, 0.40805281),
                (74.01692503, 0.04240589),
            ),
            Body::Neptune => set(
                (30.06992276, 0.00026291),
                (0.00859048, 0.00005105),
                (1.77004347, 0.00035372),
                (-55.12002969, 218.45945325),
                (44.96476227, -0.32241464),
                (131.78422574, -0.00508664),
            ),
        }
    }

    /// Rotation period and spin-axis orientation (NASA planetary fact sheets).
    pub fn physical(&self) -> PhysicalProperties {
        let (rotation_period_hours, axial_tilt_degrees) = match self {
            Body::Mercury => (1407.6, 0.034),
            Body::Venus => (5832.5, 177.4),
            Body::Earth => (23.9345, 23.44),
            Body::Mars => (24.6229, 25.19),
            Body::Jupiter => (9.925, 3.13),
            Body::Saturn => (10.656, 26.73),
            Body::Uranus => (17.24, 97.77),
            Body::Neptune => (16.11, 28.32),
        };
        PhysicalProperties {
            rotation_period_hours,
            axial_tilt_degrees,
            axial_dir_degrees: 0.0,
            hours_lapse: 0.0,
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Body {
    type Err = OrreryError;

    /// Parse a body from its case-insensitive name (`"earth"`, `"Jupiter"`, …).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Body::ALL
            .into_iter()
            .find(|body| body.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| OrreryError::UnknownBody(s.to_string()))
    }
}

/// Mapping from [`Body`] to its [`OrbitalElementSet`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementTable {
    sets: BTreeMap<Body, OrbitalElementSet>,
}

impl Default for ElementTable {
    /// The JPL table for all eight planets.
    fn default() -> Self {
        Body::ALL
            .into_iter()
            .map(|body| (body, body.j2000_elements()))
            .collect()
    }
}

impl FromIterator<(Body, OrbitalElementSet)> for ElementTable {
    fn from_iter<I: IntoIterator<Item = (Body, OrbitalElementSet)>>(iter: I) -> Self {
        ElementTable {
            sets: iter.into_iter().collect(),
        }
    }
}

impl ElementTable {
    pub fn empty() -> Self {
        ElementTable {
            sets: BTreeMap::new(),
        }
    }

    /// Add or replace the element set of a body, builder style.
    pub fn with(mut self, body: Body, set: OrbitalElementSet) -> Self {
        self.sets.insert(body, set);
        self
    }

    pub fn get(&self, body: Body) -> Result<&OrbitalElementSet, OrreryError> {
        self.sets
            .get(&body)
            .ok_or_else(|| OrreryError::UnknownBody(body.name().to_string()))
    }

    pub fn bodies(&self) -> impl Iterator<Item = Body> + '_ {
        self.sets.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Body, &OrbitalElementSet)> {
        self.sets.iter().map(|(body, set)| (*body, set))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[cfg(test)]
mod bodies_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_body_from_str() {
        assert_eq!("earth".parse::<Body>().unwrap(), Body::Earth);
        assert_eq!(" Jupiter ".parse::<Body>().unwrap(), Body::Jupiter);
        assert_eq!("NEPTUNE".parse::<Body>().unwrap(), Body::Neptune);
        assert_eq!(
            "pluto".parse::<Body>().unwrap_err(),
            OrreryError::UnknownBody("pluto".into())
        );
    }

    #[test]
    fn test_names_round_trip() {
        for body in Body::ALL {
            assert_eq!(body.to_string().parse::<Body>().unwrap(), body);
        }
    }

    #[test]
    fn test_j2000_table_is_elliptic_and_ordered() {
        let mut previous_a = 0.0;
        for body in Body::ALL {
            let set = body.j2000_elements();
            assert!((0.0..1.0).contains(&set.e.base), "{body}");
            assert!(set.a.base > previous_a, "{body}");
            // every planet advances prograde
            assert!(set.l.rate > 0.0, "{body}");
            previous_a = set.a.base;
        }
    }

    #[test]
    fn test_default_table_and_lookup() {
        let table = ElementTable::default();
        assert_eq!(table.len(), 8);
        assert_eq!(table.bodies().collect::<Vec<_>>(), Body::ALL.to_vec());
        assert_eq!(*table.get(Body::Mars).unwrap(), Body::Mars.j2000_elements());

        let inner = ElementTable::empty().with(Body::Venus, Body::Venus.j2000_elements());
        assert_eq!(inner.len(), 1);
        assert_eq!(
            inner.get(Body::Saturn).unwrap_err(),
            OrreryError::UnknownBody("saturn".into())
        );
    }

    #[test]
    fn test_table_json_is_keyed_by_name() {
        let table = ElementTable::empty().with(Body::Earth, Body::Earth.j2000_elements());
        let json = serde_json::to_string(&table).unwrap();
        assert!(json.starts_with("{\"earth\":{\"a\":["));

        let back: ElementTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_spin_angle_hours_lapse() {
        // 2000-01-01T12:00:00 UTC
        let noon = 946_728_000_000.0;
        let mut props = PhysicalProperties {
            rotation_period_hours: 24.0,
            axial_tilt_degrees: 0.0,
            axial_dir_degrees: 0.0,
            hours_lapse: 0.0,
        };
        assert_abs_diff_eq!(props.spin_angle_at(noon), std::f64::consts::PI, epsilon = 1e-12);

        // a six hour lapse moves the phase origin to 06:00 UTC
        props.hours_lapse = 6.0;
        assert_abs_diff_eq!(
            props.spin_angle_at(noon),
            std::f64::consts::FRAC_PI_2,
            epsilon = 1e-12
        );

        // before the origin the phase wraps into [0, 2π)
        let angle = props.spin_angle_at(noon - 9.0 * 3_600_000.0);
        assert_abs_diff_eq!(angle, 1.75 * std::f64::consts::PI, epsilon = 1e-12);
    }

    #[test]
    fn test_physical_properties_json_defaults_lapse() {
        let props: PhysicalProperties = serde_json::from_str(
            r#"{ "rotation_period_hours": 10.0, "axial_tilt_degrees": 3.0, "axial_dir_degrees": 0.0 }"#,
        )
        .unwrap();
        assert_eq!(props.hours_lapse, 0.0);
    }

    #[test]
    fn test_physical_properties() {
        let earth = Body::Earth.physical();
        assert_eq!(earth.axial_tilt_degrees, 23.44);
        assert!(Body::ALL
            .iter()
            .all(|b| b.physical().rotation_period_hours > 0.0));
    }
}

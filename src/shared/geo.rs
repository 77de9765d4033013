use std::{
    cmp,
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul},
};

use serde::{Deserialize, Serialize};

/// Mean earth radius used by the great-circle computations.
pub const EARTH_RADIUS: Distance = Distance::from_kilometers(6371.0);

/// A length along the surface of the earth.
///
/// Stored in kilometers since every dataset and every output of the engine
/// talks in kilometers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distance(f64);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Add for Distance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul<f64> for Distance {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, distance| acc + distance)
    }
}

impl Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} km", self.0)
    }
}

impl Distance {
    pub const fn from_kilometers(distance: f64) -> Self {
        Self(distance)
    }

    pub const fn from_meters(distance: f64) -> Self {
        Self(distance / 1000.0)
    }

    pub const fn as_kilometers(&self) -> f64 {
        self.0
    }

    pub const fn as_meters(&self) -> f64 {
        self.0 * 1000.0
    }
}

/// A WGS84 position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Haversine distance between two positions.
    ///
    /// This is the fallback used whenever a connection carries no distance or
    /// travel-time statistic of its own.
    pub fn great_circle_distance(&self, coord: &Self) -> Distance {
        let phi_1 = self.latitude.to_radians();
        let phi_2 = coord.latitude.to_radians();
        let d_phi = (coord.latitude - self.latitude).to_radians();
        let d_lambda = (coord.longitude - self.longitude).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi_1.cos() * phi_2.cos() * (d_lambda / 2.0).sin().powi(2);
        let c = 2.0 * f64::atan2(a.sqrt(), (1.0 - a).sqrt());
        EARTH_RADIUS * c
    }
}

/// Rounds `value` to the given number of decimals.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[test]
fn great_circle_is_zero_on_same_point() {
    let lyon = Coordinate::new(45.760_6, 4.859_5);
    assert_eq!(lyon.great_circle_distance(&lyon), Distance::default());
}

#[test]
fn one_degree_of_longitude_at_equator() {
    let a = Coordinate::new(0.0, 0.0);
    let b = Coordinate::new(0.0, 1.0);
    let d = a.great_circle_distance(&b);
    assert!((d.as_kilometers() - 111.195).abs() < 0.01);
}

#[test]
fn distance_unit_conversion() {
    assert_eq!(Distance::from_meters(1500.0), Distance::from_kilometers(1.5));
    assert!(Distance::from_kilometers(2.0) > Distance::from_meters(1999.0));
}

#[test]
fn round_to_decimals() {
    assert_eq!(round_to(12.3456, 2), 12.35);
    assert_eq!(round_to(29.96, 1), 30.0);
}

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single position. `x` is longitude and `y` is latitude.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// Longitude.
    pub x: f64,
    /// Latitude.
    pub y: f64,
}

impl Point {
    /// Creates a point from `x` (longitude) and `y` (latitude).
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a point from latitude and longitude, in that order.
    pub const fn latlon(lat: f64, lon: f64) -> Self {
        Self { x: lon, y: lat }
    }

    /// Latitude of the point.
    pub fn lat(&self) -> f64 {
        self.y
    }

    /// Longitude of the point.
    pub fn lon(&self) -> f64 {
        self.x
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

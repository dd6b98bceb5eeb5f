//! Contours are sequences of points.
//!
//! * [`Contour`] is an open line, the OGC `LineString`.
//! * [`ClosedContour`] is a ring bounding a polygon area.
//!
//! Unlike some in-memory geometry libraries, a closed contour here follows the convention of the file formats it is
//! read from: the first point is repeated as the last one. A valid ring therefore has at least four points.

use std::ops::Deref;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::GeoTypesError;
use crate::point::Point;
use crate::rect::Rect;

/// Minimal number of points in a closed ring, including the repeated closing point.
pub const MIN_RING_POINTS: usize = 4;

/// Open sequence of at least two points.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Contour {
    points: Vec<Point>,
}

impl Contour {
    /// Creates a new line. Fails if less than two points are given.
    pub fn new(points: Vec<Point>) -> Result<Self, GeoTypesError> {
        if points.len() < 2 {
            return Err(GeoTypesError::InvalidLineString(format!(
                "line string must contain at least 2 points, found {}",
                points.len()
            )));
        }

        Ok(Self { points })
    }

    /// Points of the line.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Bounding rectangle of the line.
    pub fn bounding_rect(&self) -> Option<Rect> {
        Rect::from_points(self.points.iter())
    }

    /// Consumes the contour returning its points.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl Deref for Contour {
    type Target = [Point];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

/// Closed ring. The first and the last points are equal.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClosedContour {
    points: Vec<Point>,
}

impl ClosedContour {
    /// Creates a new ring from points where the last point repeats the first one.
    pub fn new(points: Vec<Point>) -> Result<Self, GeoTypesError> {
        if points.len() < MIN_RING_POINTS {
            return Err(GeoTypesError::InvalidRing(format!(
                "ring must contain at least {MIN_RING_POINTS} points, found {}",
                points.len()
            )));
        }

        if points.first() != points.last() {
            return Err(GeoTypesError::InvalidRing(
                "first and last points of the ring must be equal".into(),
            ));
        }

        Ok(Self { points })
    }

    /// Points of the ring, including the closing point.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consumes the ring returning its points.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Area of the ring computed with the shoelace formula. Positive for counter-clockwise rings.
    pub fn area_signed(&self) -> f64 {
        let aggr: f64 = self
            .points
            .windows(2)
            .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
            .sum();

        aggr / 2.0
    }

    /// Absolute area enclosed by the ring.
    pub fn area(&self) -> f64 {
        self.area_signed().abs()
    }

    /// Direction of the ring.
    pub fn winding(&self) -> Winding {
        if self.area_signed() <= 0.0 {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        }
    }

    /// Bounding rectangle of the ring.
    pub fn bounding_rect(&self) -> Option<Rect> {
        Rect::from_points(self.points.iter())
    }
}

impl Deref for ClosedContour {
    type Target = [Point];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

/// Direction in which ring points go around the enclosed area.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Winding {
    /// Clockwise.
    Clockwise,
    /// Counter-clockwise.
    CounterClockwise,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn ring(coords: &[(f64, f64)]) -> ClosedContour {
        ClosedContour::new(coords.iter().copied().map(Point::from).collect()).unwrap()
    }

    #[test]
    fn area() {
        let contour = ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (0.0, 0.0)]);
        assert_eq!(contour.area_signed(), -0.5);

        let contour = ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]);
        assert_eq!(contour.area_signed(), 0.5);
    }

    #[test]
    fn area_does_not_depend_on_winding() {
        let ccw = ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        let cw = ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)]);

        assert_eq!(ccw.area(), 100.0);
        assert_eq!(cw.area(), 100.0);
    }

    #[test]
    fn winding() {
        let contour = ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (0.0, 0.0)]);
        assert_eq!(contour.winding(), Winding::Clockwise);

        let contour = ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]);
        assert_eq!(contour.winding(), Winding::CounterClockwise);
    }

    #[test]
    fn ring_must_be_closed() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        assert_matches!(ClosedContour::new(points), Err(GeoTypesError::InvalidRing(_)));
    }

    #[test]
    fn ring_must_have_four_points() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 0.0),
        ];
        assert_matches!(ClosedContour::new(points), Err(GeoTypesError::InvalidRing(_)));
    }

    #[test]
    fn line_needs_two_points() {
        assert_matches!(
            Contour::new(vec![Point::new(0.0, 0.0)]),
            Err(GeoTypesError::InvalidLineString(_))
        );
        assert!(Contour::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).is_ok());
    }
}

//! Axis-aligned bounding rectangle (envelope).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Axis-aligned rectangle.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Minimum x (western edge).
    pub x_min: f64,
    /// Minimum y (southern edge).
    pub y_min: f64,
    /// Maximum x (eastern edge).
    pub x_max: f64,
    /// Maximum y (northern edge).
    pub y_max: f64,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Degenerate rectangle containing only the given point.
    pub fn from_point(p: &Point) -> Self {
        Self {
            x_min: p.x,
            x_max: p.x,
            y_min: p.y,
            y_max: p.y,
        }
    }

    /// Bounding rectangle of the points. Returns `None` if the iterator is empty.
    pub fn from_points<'a>(mut points: impl Iterator<Item = &'a Point>) -> Option<Self> {
        let first = points.next()?;
        Some(points.fold(Self::from_point(first), |rect, p| {
            rect.merge(Self::from_point(p))
        }))
    }

    /// Merges all the rectangles into one. Returns `None` if the iterator is empty.
    pub fn merge_all(rects: impl IntoIterator<Item = Rect>) -> Option<Self> {
        rects.into_iter().reduce(|a, b| a.merge(b))
    }

    /// Returns true if the point lies inside the rectangle or on its border.
    pub fn contains(&self, point: &Point) -> bool {
        self.x_min <= point.x
            && self.x_max >= point.x
            && self.y_min <= point.y
            && self.y_max >= point.y
    }

    /// Largest absolute difference between the corresponding edges of two rectangles.
    pub fn max_edge_distance(&self, other: &Self) -> f64 {
        [
            (self.x_min - other.x_min).abs(),
            (self.y_min - other.y_min).abs(),
            (self.x_max - other.x_max).abs(),
            (self.y_max - other.y_max).abs(),
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }
}

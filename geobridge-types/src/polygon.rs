#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::contour::ClosedContour;
use crate::rect::Rect;

/// Polygon consisting of one outer contour and zero or more inner contours (holes).
///
/// Holes are expected to lie inside the outer contour, but this is not checked. Area and union computations work on
/// a best-effort basis for invalid polygons.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    /// Outer contour.
    pub outer_contour: ClosedContour,
    /// Inner contours.
    pub inner_contours: Vec<ClosedContour>,
}

impl Polygon {
    /// Creates a new polygon.
    pub fn new(outer_contour: ClosedContour, inner_contours: Vec<ClosedContour>) -> Self {
        Self {
            outer_contour,
            inner_contours,
        }
    }

    /// Iterates over all contours of the polygon starting with the outer one.
    pub fn iter_contours(&self) -> impl Iterator<Item = &'_ ClosedContour> {
        std::iter::once(&self.outer_contour).chain(self.inner_contours.iter())
    }

    /// Area of the outer contour minus areas of the holes. Does not depend on the winding of the contours.
    pub fn area(&self) -> f64 {
        self.outer_contour.area() - self.inner_contours.iter().map(|c| c.area()).sum::<f64>()
    }

    /// Bounding rectangle of the polygon. Holes never extend it.
    pub fn bounding_rect(&self) -> Option<Rect> {
        self.outer_contour.bounding_rect()
    }
}

impl From<ClosedContour> for Polygon {
    fn from(value: ClosedContour) -> Self {
        Self {
            outer_contour: value,
            inner_contours: vec![],
        }
    }
}

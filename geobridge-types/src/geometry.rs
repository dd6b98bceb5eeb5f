//! See [`Geom`].

use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::contour::Contour;
use crate::point::Point;
use crate::polygon::Polygon;
use crate::rect::Rect;

/// Any geometry supported by the crate.
///
/// `Collection` represents both generic geometry collections and multi-polygons. Collections can be nested.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Geom {
    /// Single point.
    Point(Point),
    /// Open line.
    LineString(Contour),
    /// Polygon with holes.
    Polygon(Polygon),
    /// Ordered set of geometries.
    Collection(Vec<Geom>),
}

/// Type of a [`Geom`], used in messages and for dispatching.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// [`Geom::Point`]
    Point,
    /// [`Geom::LineString`]
    LineString,
    /// [`Geom::Polygon`]
    Polygon,
    /// [`Geom::Collection`] that contains only polygons.
    MultiPolygon,
    /// Any other [`Geom::Collection`].
    GeometryCollection,
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
        };
        f.write_str(name)
    }
}

impl Geom {
    /// Type of the geometry.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geom::Point(_) => GeometryKind::Point,
            Geom::LineString(_) => GeometryKind::LineString,
            Geom::Polygon(_) => GeometryKind::Polygon,
            Geom::Collection(members) => {
                if !members.is_empty() && members.iter().all(|g| matches!(g, Geom::Polygon(_))) {
                    GeometryKind::MultiPolygon
                } else {
                    GeometryKind::GeometryCollection
                }
            }
        }
    }

    /// Area of the geometry.
    ///
    /// Points and lines have zero area. Polygon area is computed with holes subtracted and does not depend on the
    /// contour winding. Collection area is the sum of the areas of its members, overlapping members are not
    /// dissolved.
    pub fn area(&self) -> f64 {
        self.iter_leaves()
            .map(|g| match g {
                Geom::Polygon(polygon) => polygon.area(),
                _ => 0.0,
            })
            .sum()
    }

    /// Axis-aligned bounding rectangle of all the coordinates of the geometry. Returns `None` for empty collections.
    pub fn bounding_rect(&self) -> Option<Rect> {
        Rect::merge_all(self.iter_leaves().filter_map(|g| match g {
            Geom::Point(p) => Some(Rect::from_point(p)),
            Geom::LineString(line) => line.bounding_rect(),
            Geom::Polygon(polygon) => polygon.bounding_rect(),
            Geom::Collection(_) => None,
        }))
    }

    /// Iterates over all non-collection geometries, descending into nested collections depth first. Order of the
    /// leaves is the order in which they appear in the collections.
    pub fn iter_leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }

    /// Consumes the geometry returning all the non-collection geometries it contains.
    pub fn into_leaves(self) -> Vec<Geom> {
        let mut leaves = vec![];
        let mut stack = vec![self];
        while let Some(geom) = stack.pop() {
            match geom {
                Geom::Collection(members) => stack.extend(members.into_iter().rev()),
                leaf => leaves.push(leaf),
            }
        }

        leaves
    }

    /// Returns true if the geometry is a polygon or a collection that consists of polygonal geometries only.
    pub fn is_polygonal(&self) -> bool {
        let mut leaves = self.iter_leaves().peekable();
        leaves.peek().is_some() && leaves.all(|g| matches!(g, Geom::Polygon(_)))
    }

    /// Wraps the geometries into a single one: a list of one geometry yields this geometry, other lists yield a
    /// collection.
    pub fn from_parts(mut parts: Vec<Geom>) -> Geom {
        if parts.len() == 1 {
            if let Some(geom) = parts.pop() {
                return geom;
            }
        }

        Geom::Collection(parts)
    }
}

/// Depth-first iterator over leaf geometries. See [`Geom::iter_leaves`].
#[derive(Debug, Clone)]
pub struct Leaves<'a> {
    stack: Vec<&'a Geom>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Geom;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(geom) = self.stack.pop() {
            match geom {
                Geom::Collection(members) => self.stack.extend(members.iter().rev()),
                leaf => return Some(leaf),
            }
        }

        None
    }
}

impl From<Point> for Geom {
    fn from(value: Point) -> Self {
        Self::Point(value)
    }
}

impl From<Contour> for Geom {
    fn from(value: Contour) -> Self {
        Self::LineString(value)
    }
}

impl From<Polygon> for Geom {
    fn from(value: Polygon) -> Self {
        Self::Polygon(value)
    }
}

impl From<Vec<Polygon>> for Geom {
    fn from(value: Vec<Polygon>) -> Self {
        Self::Collection(value.into_iter().map(Geom::Polygon).collect())
    }
}

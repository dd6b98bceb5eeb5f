//! Subset of the KML object model needed to exchange vector features.

use crate::vector::Vector;

/// Parsed KML document: contents of the root `<kml>` element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KmlDocument {
    /// Top level features.
    pub features: Vec<KmlFeature>,
}

/// Item of a KML feature tree.
#[derive(Debug, Clone, PartialEq)]
pub enum KmlFeature {
    /// `<Document>` or `<Folder>` containing other features.
    Container(Container),
    /// `<Placemark>`.
    Placemark(Placemark),
}

/// Kind of [`Container`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContainerKind {
    /// `<Document>`
    Document,
    /// `<Folder>`
    Folder,
}

impl ContainerKind {
    pub(crate) fn tag(&self) -> &'static str {
        match self {
            ContainerKind::Document => "Document",
            ContainerKind::Folder => "Folder",
        }
    }
}

/// Named group of features. Containers can nest arbitrarily deep.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    /// Element the container is represented with.
    pub kind: ContainerKind,
    /// Display name.
    pub name: Option<String>,
    /// Description text.
    pub description: Option<String>,
    /// Contained features.
    pub features: Vec<KmlFeature>,
}

/// Feature with a geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placemark {
    /// Display name.
    pub name: Option<String>,
    /// Description text.
    pub description: Option<String>,
    /// Geometry. Placemarks without geometry are allowed by KML.
    pub geometry: Option<KmlGeometry>,
    /// Name/value pairs of the `<ExtendedData>` element.
    pub extended_data: Vec<Data>,
}

/// Single `<Data>` entry of extended data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Data {
    /// Value of the `name` attribute.
    pub name: String,
    /// Content of the `<value>` element.
    pub value: String,
}

/// KML geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum KmlGeometry {
    /// `<Point>`
    Point(Vector),
    /// `<LineString>`
    LineString(Vec<Vector>),
    /// `<Polygon>`
    Polygon(KmlPolygon),
    /// `<MultiGeometry>`
    MultiGeometry(Vec<KmlGeometry>),
    /// Any other KML geometry element (`Model`, `LinearRing`, `gx:Track`...). Holds the element name.
    Unsupported(String),
}

/// Polygon with outer and inner boundaries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KmlPolygon {
    /// Coordinates of the `<outerBoundaryIs>` ring.
    pub outer_boundary: Vec<Vector>,
    /// Coordinates of each `<innerBoundaryIs>` ring.
    pub inner_boundaries: Vec<Vec<Vector>>,
}

impl KmlDocument {
    /// Iterates over all placemarks of the document, descending into nested containers. Placemarks are returned in
    /// document order.
    pub fn placemarks(&self) -> Placemarks<'_> {
        Placemarks {
            stack: self.features.iter().rev().collect(),
        }
    }
}

/// Depth-first iterator over the placemarks of a [`KmlDocument`].
#[derive(Debug, Clone)]
pub struct Placemarks<'a> {
    stack: Vec<&'a KmlFeature>,
}

impl<'a> Iterator for Placemarks<'a> {
    type Item = &'a Placemark;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(feature) = self.stack.pop() {
            match feature {
                KmlFeature::Container(container) => {
                    self.stack.extend(container.features.iter().rev())
                }
                KmlFeature::Placemark(placemark) => return Some(placemark),
            }
        }

        None
    }
}

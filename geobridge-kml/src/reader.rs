//! Reading KML documents.
//!
//! The XML is first loaded into a light element tree, which is then mapped onto the [`KmlDocument`] model. Elements
//! the model does not know about (styles, overlays, network links etc) are ignored.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::dom::{Container, ContainerKind, Data, KmlDocument, KmlFeature, KmlGeometry, KmlPolygon, Placemark};
use crate::error::KmlError;
use crate::vector::{parse_coordinates, Vector};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn from_start(start: &BytesStart) -> Result<Self, KmlError> {
        let mut attributes = vec![];
        for attr in start.attributes() {
            let attr = attr.map_err(|e| KmlError::Xml(e.to_string()))?;
            let value = attr
                .unescape_value()
                .map_err(|e| KmlError::Xml(e.to_string()))?;
            attributes.push((
                String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned(),
                value.into_owned(),
            ));
        }

        Ok(Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            attributes,
            ..Default::default()
        })
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).map(|c| c.text.trim().to_string())
    }
}

fn parse_tree(bytes: &[u8]) -> Result<Element, KmlError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut buf = vec![];
    let mut stack: Vec<Element> = vec![];
    let mut root = None;

    loop {
        let event = reader.read_event_into(&mut buf)?;
        match event {
            Event::Start(start) => stack.push(Element::from_start(&start)?),
            Event::Empty(start) => {
                let element = Element::from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| KmlError::Xml("unexpected closing tag".into()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    let text = text.unescape().map_err(|e| KmlError::Xml(e.to_string()))?;
                    current.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    if !stack.is_empty() {
        return Err(KmlError::Xml("unexpected end of document".into()));
    }

    root.ok_or_else(|| KmlError::Xml("document has no root element".into()))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), KmlError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(KmlError::Xml("document has more than one root element".into())),
    }

    Ok(())
}

impl KmlDocument {
    /// Parses a KML document.
    pub fn read(bytes: &[u8]) -> Result<Self, KmlError> {
        let root = parse_tree(bytes)?;
        if root.name != "kml" {
            return Err(KmlError::Format(format!(
                "expected <kml> root element, found <{}>",
                root.name
            )));
        }

        Ok(KmlDocument {
            features: read_features(&root)?,
        })
    }
}

fn read_features(parent: &Element) -> Result<Vec<KmlFeature>, KmlError> {
    let mut features = vec![];
    for child in &parent.children {
        let kind = match child.name.as_str() {
            "Document" => ContainerKind::Document,
            "Folder" => ContainerKind::Folder,
            "Placemark" => {
                features.push(KmlFeature::Placemark(read_placemark(child)?));
                continue;
            }
            _ => continue,
        };

        features.push(KmlFeature::Container(Container {
            kind,
            name: child.child_text("name"),
            description: child.child_text("description"),
            features: read_features(child)?,
        }));
    }

    Ok(features)
}

fn read_placemark(element: &Element) -> Result<Placemark, KmlError> {
    let geometry = element
        .children
        .iter()
        .find_map(|c| read_geometry(c).transpose())
        .transpose()?;

    Ok(Placemark {
        name: element.child_text("name"),
        description: element.child_text("description"),
        geometry,
        extended_data: element
            .child("ExtendedData")
            .map(read_extended_data)
            .unwrap_or_default(),
    })
}

fn read_extended_data(element: &Element) -> Vec<Data> {
    let mut entries = vec![];
    for data in element.children_named("Data") {
        let Some(name) = data.attribute("name") else {
            log::debug!("Skipping <Data> element without a name");
            continue;
        };
        entries.push(Data {
            name: name.to_string(),
            value: data.child_text("value").unwrap_or_default(),
        });
    }

    for simple in element
        .children_named("SchemaData")
        .flat_map(|s| s.children_named("SimpleData"))
    {
        if let Some(name) = simple.attribute("name") {
            entries.push(Data {
                name: name.to_string(),
                value: simple.text.trim().to_string(),
            });
        }
    }

    entries
}

/// Returns `Ok(None)` if the element is not a geometry at all.
fn read_geometry(element: &Element) -> Result<Option<KmlGeometry>, KmlError> {
    let geometry = match element.name.as_str() {
        "Point" => {
            let mut vectors = read_coordinates(element)?;
            if vectors.len() != 1 {
                return Err(KmlError::Format(format!(
                    "<Point> must have exactly one coordinate, found {}",
                    vectors.len()
                )));
            }
            KmlGeometry::Point(vectors.remove(0))
        }
        "LineString" => KmlGeometry::LineString(read_coordinates(element)?),
        "Polygon" => KmlGeometry::Polygon(read_polygon(element)?),
        "MultiGeometry" => KmlGeometry::MultiGeometry(
            element
                .children
                .iter()
                .filter_map(|c| read_geometry(c).transpose())
                .collect::<Result<Vec<_>, _>>()?,
        ),
        "LinearRing" | "Model" | "Track" | "MultiTrack" => {
            KmlGeometry::Unsupported(element.name.clone())
        }
        _ => return Ok(None),
    };

    Ok(Some(geometry))
}

fn read_coordinates(element: &Element) -> Result<Vec<Vector>, KmlError> {
    let coordinates = element.child("coordinates").ok_or_else(|| {
        KmlError::Format(format!("<{}> has no <coordinates> element", element.name))
    })?;
    parse_coordinates(&coordinates.text)
}

fn read_polygon(element: &Element) -> Result<KmlPolygon, KmlError> {
    let outer_ring = element
        .child("outerBoundaryIs")
        .and_then(|b| b.child("LinearRing"))
        .ok_or_else(|| KmlError::Format("<Polygon> has no outer boundary".into()))?;

    let inner_boundaries = element
        .children_named("innerBoundaryIs")
        .flat_map(|b| b.children_named("LinearRing"))
        .map(read_coordinates)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(KmlPolygon {
        outer_boundary: read_coordinates(outer_ring)?,
        inner_boundaries,
    })
}

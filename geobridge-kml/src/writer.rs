//! Writing KML documents.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::dom::{Container, KmlDocument, KmlFeature, KmlGeometry, KmlPolygon, Placemark};
use crate::error::KmlError;
use crate::vector::{format_coordinates, Vector};

/// Namespace of KML 2.2 documents.
pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

type XmlWriter = Writer<Vec<u8>>;

impl KmlDocument {
    /// Serializes the document into UTF-8 encoded KML.
    pub fn write(&self) -> Result<Vec<u8>, KmlError> {
        let mut writer = Writer::new_with_indent(vec![], b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(
            BytesStart::new("kml").with_attributes([("xmlns", KML_NAMESPACE)]),
        ))?;
        for feature in &self.features {
            write_feature(&mut writer, feature)?;
        }
        writer.write_event(Event::End(BytesEnd::new("kml")))?;

        Ok(writer.into_inner())
    }
}

fn start(writer: &mut XmlWriter, tag: &str) -> Result<(), KmlError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    Ok(())
}

fn end(writer: &mut XmlWriter, tag: &str) -> Result<(), KmlError> {
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn text_element(writer: &mut XmlWriter, tag: &str, text: &str) -> Result<(), KmlError> {
    start(writer, tag)?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    end(writer, tag)
}

fn optional_text_element(
    writer: &mut XmlWriter,
    tag: &str,
    text: &Option<String>,
) -> Result<(), KmlError> {
    match text {
        Some(text) => text_element(writer, tag, text),
        None => Ok(()),
    }
}

fn write_feature(writer: &mut XmlWriter, feature: &KmlFeature) -> Result<(), KmlError> {
    match feature {
        KmlFeature::Container(container) => write_container(writer, container),
        KmlFeature::Placemark(placemark) => write_placemark(writer, placemark),
    }
}

fn write_container(writer: &mut XmlWriter, container: &Container) -> Result<(), KmlError> {
    let tag = container.kind.tag();
    start(writer, tag)?;
    optional_text_element(writer, "name", &container.name)?;
    optional_text_element(writer, "description", &container.description)?;
    for feature in &container.features {
        write_feature(writer, feature)?;
    }
    end(writer, tag)
}

fn write_placemark(writer: &mut XmlWriter, placemark: &Placemark) -> Result<(), KmlError> {
    start(writer, "Placemark")?;
    optional_text_element(writer, "name", &placemark.name)?;
    optional_text_element(writer, "description", &placemark.description)?;

    if !placemark.extended_data.is_empty() {
        start(writer, "ExtendedData")?;
        for data in &placemark.extended_data {
            writer.write_event(Event::Start(
                BytesStart::new("Data").with_attributes([("name", data.name.as_str())]),
            ))?;
            text_element(writer, "value", &data.value)?;
            end(writer, "Data")?;
        }
        end(writer, "ExtendedData")?;
    }

    if let Some(geometry) = &placemark.geometry {
        write_geometry(writer, geometry)?;
    }

    end(writer, "Placemark")
}

fn write_geometry(writer: &mut XmlWriter, geometry: &KmlGeometry) -> Result<(), KmlError> {
    match geometry {
        KmlGeometry::Point(vector) => {
            start(writer, "Point")?;
            write_coordinates(writer, std::slice::from_ref(vector))?;
            end(writer, "Point")
        }
        KmlGeometry::LineString(vectors) => {
            start(writer, "LineString")?;
            write_coordinates(writer, vectors)?;
            end(writer, "LineString")
        }
        KmlGeometry::Polygon(polygon) => write_polygon(writer, polygon),
        KmlGeometry::MultiGeometry(parts) => {
            start(writer, "MultiGeometry")?;
            for part in parts {
                write_geometry(writer, part)?;
            }
            end(writer, "MultiGeometry")
        }
        KmlGeometry::Unsupported(name) => Err(KmlError::UnsupportedGeometry(name.clone())),
    }
}

fn write_polygon(writer: &mut XmlWriter, polygon: &KmlPolygon) -> Result<(), KmlError> {
    start(writer, "Polygon")?;
    write_boundary(writer, "outerBoundaryIs", &polygon.outer_boundary)?;
    for inner in &polygon.inner_boundaries {
        write_boundary(writer, "innerBoundaryIs", inner)?;
    }
    end(writer, "Polygon")
}

fn write_boundary(writer: &mut XmlWriter, tag: &str, ring: &[Vector]) -> Result<(), KmlError> {
    start(writer, tag)?;
    start(writer, "LinearRing")?;
    write_coordinates(writer, ring)?;
    end(writer, "LinearRing")?;
    end(writer, tag)
}

fn write_coordinates(writer: &mut XmlWriter, vectors: &[Vector]) -> Result<(), KmlError> {
    text_element(writer, "coordinates", &format_coordinates(vectors))
}

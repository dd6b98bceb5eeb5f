//! Coordinate tuples of the KML `<coordinates>` element.
//!
//! KML writes tuples as `longitude,latitude[,altitude]`, while [`Vector`] is constructed latitude first. Both orders
//! are handled here, and the rest of the crate only ever sees `(lon, lat)` [`Point`]s.

use std::fmt::{Display, Formatter};

use geobridge_types::Point;

use crate::error::KmlError;

/// Single KML coordinate tuple.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vector {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Optional altitude in meters.
    pub altitude: Option<f64>,
}

impl Vector {
    /// Creates a vector without altitude. Note the latitude-first argument order.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
        }
    }

    /// Parses a single `lon,lat[,alt]` tuple.
    pub fn parse(tuple: &str) -> Result<Self, KmlError> {
        let mut values = tuple.split(',').map(|v| -> Result<f64, KmlError> {
            let value = v
                .trim()
                .parse::<f64>()
                .map_err(|_| KmlError::Format(format!("invalid coordinate tuple '{tuple}'")))?;
            if value.is_finite() {
                Ok(value)
            } else {
                Err(KmlError::Format(format!("non-finite coordinate in tuple '{tuple}'")))
            }
        });

        let (Some(longitude), Some(latitude)) = (values.next(), values.next()) else {
            return Err(KmlError::Format(format!(
                "coordinate tuple '{tuple}' must contain longitude and latitude"
            )));
        };
        let altitude = values.next().transpose()?;
        if values.next().is_some() {
            return Err(KmlError::Format(format!(
                "coordinate tuple '{tuple}' has more than 3 values"
            )));
        }

        Ok(Self {
            latitude: latitude?,
            longitude: longitude?,
            altitude,
        })
    }
}

impl Display for Vector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.longitude, self.latitude)?;
        if let Some(altitude) = self.altitude {
            write!(f, ",{altitude}")?;
        }

        Ok(())
    }
}

impl From<Vector> for Point {
    fn from(value: Vector) -> Self {
        Point::new(value.longitude, value.latitude)
    }
}

impl From<Point> for Vector {
    fn from(value: Point) -> Self {
        Vector::new(value.y, value.x)
    }
}

/// Parses the text content of a `<coordinates>` element. Tuples are separated by any whitespace.
pub fn parse_coordinates(text: &str) -> Result<Vec<Vector>, KmlError> {
    text.split_whitespace().map(Vector::parse).collect()
}

/// Formats vectors as the text content of a `<coordinates>` element.
pub fn format_coordinates<'a>(vectors: impl IntoIterator<Item = &'a Vector>) -> String {
    vectors
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

//! Features are geometries with attached attributes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::Geom;

/// Attribute key holding the display name of a feature.
pub const NAME_KEY: &str = "name";

/// Geometry with a table of attributes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Feature {
    /// Geometry of the feature.
    pub geometry: Geom,
    /// Attributes of the feature.
    pub attributes: Attributes,
}

impl Feature {
    /// Creates a new feature.
    pub fn new(geometry: impl Into<Geom>, attributes: Attributes) -> Self {
        Self {
            geometry: geometry.into(),
            attributes,
        }
    }

    /// Value of the `name` attribute, if set.
    pub fn name(&self) -> Option<&str> {
        self.attributes.get(NAME_KEY)
    }
}

/// Ordered map of string attributes with unique keys.
///
/// Insertion order is preserved. Inserting a key that is already present replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of the attribute, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Builder style version of [`Attributes::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Value of the attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the attribute is set.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes the attribute returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut attributes = Attributes::new();
        for (k, v) in iter {
            attributes.insert(k, v);
        }

        attributes
    }
}

impl IntoIterator for Attributes {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    #[test]
    fn insert_keeps_order_and_replaces() {
        let mut attributes = Attributes::new();
        attributes.insert("b", "1");
        attributes.insert("a", "2");
        assert_eq!(attributes.insert("b", "3"), Some("1".to_string()));

        let pairs: Vec<_> = attributes.iter().collect();
        assert_eq!(pairs, vec![("b", "3"), ("a", "2")]);
        assert_eq!(attributes.len(), 2);
    }

    #[test]
    fn remove() {
        let mut attributes: Attributes = [("name", "x"), ("kind", "field")].into_iter().collect();
        assert_eq!(attributes.remove("name"), Some("x".to_string()));
        assert_eq!(attributes.remove("name"), None);
        assert!(!attributes.contains_key("name"));
        assert_eq!(attributes.get("kind"), Some("field"));
    }

    #[test]
    fn feature_name() {
        let feature = Feature::new(
            Point::new(1.0, 2.0),
            Attributes::new().with(NAME_KEY, "Well 7"),
        );
        assert_eq!(feature.name(), Some("Well 7"));

        let unnamed = Feature::new(Point::new(1.0, 2.0), Attributes::new());
        assert_eq!(unnamed.name(), None);
    }
}

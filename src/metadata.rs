//! Per-cue telemetry records.
//!
//! A DJI SRT file carries one subtitle cue per video frame (or per second on
//! older firmware), and each cue's text holds a set of telemetry fields. The
//! parser turns every cue into one [`MetadataRecord`]; the records of a file
//! form an ordered sequence in file order.
//!
//! # Example
//!
//! ```
//! use dji_geotag::MetadataRecord;
//!
//! let record: MetadataRecord = [("latitude", "45.5"), ("longitude", "7.1")]
//!     .into_iter()
//!     .collect();
//! assert_eq!(record.get("latitude"), Some("45.5"));
//! assert_eq!(record.keys().collect::<Vec<_>>(), ["latitude", "longitude"]);
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};

/// One cue's worth of telemetry: field name to raw string value.
///
/// Keys keep first-insertion order. Inserting a key that already exists
/// replaces its value in place, so a record never lists the same field twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct MetadataRecord {
    fields: Vec<(String, String)>,
}

impl MetadataRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Look up a field value by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` if the record has a field called `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MetadataRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = MetadataRecord::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for MetadataRecord {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl Display for MetadataRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut record = MetadataRecord::new();
        record.insert("latitude", "1");
        record.insert("longitude", "2");
        record.insert("latitude", "3");

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("latitude"), Some("3"));
        assert_eq!(record.keys().collect::<Vec<_>>(), ["latitude", "longitude"]);
    }

    #[test]
    fn display_lists_pairs() {
        let record: MetadataRecord = [("iso", "100"), ("ev", "0")].into_iter().collect();
        assert_eq!(record.to_string(), "iso=100, ev=0");
    }
}

//! Extraction options.
//!
//! [`GeotagOptions`] is a builder that controls how the first telemetry
//! record is validated before it is turned into a [`Geotag`](crate::Geotag):
//! which source fields hold the coordinates and what counts as "present".
//!
//! # Example
//!
//! ```
//! use dji_geotag::{FieldCheck, GeotagOptions};
//!
//! let options = GeotagOptions::new()
//!     .with_field_check(FieldCheck::NonZero)
//!     .with_required_fields("latitude", "longitude", "altitude");
//! assert_eq!(options.altitude_field(), "altitude");
//! ```

use crate::geotag::parse_leading_float;

/// Field names read from the first record by default.
pub const DEFAULT_LATITUDE_FIELD: &str = "latitude";
/// See [`DEFAULT_LATITUDE_FIELD`].
pub const DEFAULT_LONGITUDE_FIELD: &str = "longitude";
/// DJI's absolute (barometric or GNSS) altitude.
pub const DEFAULT_ALTITUDE_FIELD: &str = "abs_alt";

/// What it takes for a required field to count as present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldCheck {
    /// The key exists, whatever its value.
    KeyPresent,
    /// The key exists and its trimmed value is not empty. A literal `"0"`
    /// is accepted, so the equator and sea level remain valid. A
    /// whitespace-only value such as `" "` counts as missing, although a
    /// plain truthiness check would let it through to a failed number
    /// conversion. This is the default.
    #[default]
    NonEmpty,
    /// Like [`NonEmpty`](FieldCheck::NonEmpty), but a value that reads as the
    /// number zero is also rejected.
    NonZero,
}

impl FieldCheck {
    /// Returns `true` if `value` satisfies this check.
    pub fn accepts(self, value: Option<&str>) -> bool {
        match (self, value) {
            (_, None) => false,
            (FieldCheck::KeyPresent, Some(_)) => true,
            (FieldCheck::NonEmpty, Some(value)) => !value.trim().is_empty(),
            (FieldCheck::NonZero, Some(value)) => {
                !value.trim().is_empty() && parse_leading_float(value) != Some(0.0)
            }
        }
    }
}

/// Configuration for geotag extraction.
///
/// A default-constructed value reads `latitude`, `longitude` and `abs_alt`
/// and uses [`FieldCheck::NonEmpty`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeotagOptions {
    pub(crate) field_check: FieldCheck,
    pub(crate) latitude_field: String,
    pub(crate) longitude_field: String,
    pub(crate) altitude_field: String,
}

impl Default for GeotagOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl GeotagOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self {
            field_check: FieldCheck::default(),
            latitude_field: DEFAULT_LATITUDE_FIELD.to_string(),
            longitude_field: DEFAULT_LONGITUDE_FIELD.to_string(),
            altitude_field: DEFAULT_ALTITUDE_FIELD.to_string(),
        }
    }

    /// Set the field-presence policy.
    #[must_use]
    pub fn with_field_check(mut self, check: FieldCheck) -> Self {
        self.field_check = check;
        self
    }

    /// Read the coordinates from differently named fields.
    #[must_use]
    pub fn with_required_fields(
        mut self,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
        altitude: impl Into<String>,
    ) -> Self {
        self.latitude_field = latitude.into();
        self.longitude_field = longitude.into();
        self.altitude_field = altitude.into();
        self
    }

    /// The active field-presence policy.
    pub fn field_check(&self) -> FieldCheck {
        self.field_check
    }

    /// Name of the latitude source field.
    pub fn latitude_field(&self) -> &str {
        &self.latitude_field
    }

    /// Name of the longitude source field.
    pub fn longitude_field(&self) -> &str {
        &self.longitude_field
    }

    /// Name of the altitude source field.
    pub fn altitude_field(&self) -> &str {
        &self.altitude_field
    }

    /// The three source fields in check order.
    pub(crate) fn required_fields(&self) -> [&str; 3] {
        [
            self.latitude_field.as_str(),
            self.longitude_field.as_str(),
            self.altitude_field.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_accepts_zero() {
        assert!(FieldCheck::NonEmpty.accepts(Some("0")));
        assert!(!FieldCheck::NonEmpty.accepts(Some("  ")));
        assert!(!FieldCheck::NonEmpty.accepts(None));
    }

    #[test]
    fn non_zero_rejects_zero_values() {
        assert!(!FieldCheck::NonZero.accepts(Some("0")));
        assert!(!FieldCheck::NonZero.accepts(Some("0.000")));
        assert!(FieldCheck::NonZero.accepts(Some("0.001")));
        assert!(FieldCheck::NonZero.accepts(Some("n/a")));
    }

    #[test]
    fn key_present_accepts_empty() {
        assert!(FieldCheck::KeyPresent.accepts(Some("")));
        assert!(!FieldCheck::KeyPresent.accepts(None));
    }

    #[test]
    fn defaults() {
        let options = GeotagOptions::default();
        assert_eq!(options.field_check(), FieldCheck::NonEmpty);
        assert_eq!(options.required_fields(), ["latitude", "longitude", "abs_alt"]);
    }
}

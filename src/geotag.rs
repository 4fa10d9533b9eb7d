//! Geotag extraction.
//!
//! This module holds the fail-fast pipeline behind the command-line tool:
//! read the SRT file, parse it into records, validate the first record, and
//! convert its coordinates into a [`Geotag`].
//!
//! # Example
//!
//! ```no_run
//! use dji_geotag::{DjiSrtParser, GeotagOptions, extract_geotag};
//!
//! let geotag = extract_geotag("DJI_0042.SRT", &DjiSrtParser, &GeotagOptions::new())?;
//! println!("{}", geotag.to_json()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::GeotagError;
use crate::metadata::MetadataRecord;
use crate::options::GeotagOptions;
use crate::parser::{DjiSrtParser, MetadataParser};

/// The first position recorded in a telemetry file.
///
/// Serialises as `{"latitude":..,"longitude":..,"altitude":..}`, in that
/// key order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[must_use]
pub struct Geotag {
    /// Decimal degrees, north positive.
    pub latitude: f64,
    /// Decimal degrees, east positive.
    pub longitude: f64,
    /// Absolute altitude in metres.
    pub altitude: f64,
}

impl Geotag {
    /// Render as a single-line JSON object.
    ///
    /// # Errors
    ///
    /// Fails only if a coordinate is not finite, which
    /// [`geotag_from_record`] never produces.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Display for Geotag {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "GPS: {:.6}, {:.6}, Alt: {:.1} m",
            self.latitude, self.longitude, self.altitude
        )
    }
}

/// Read an SRT file as UTF-8 text.
///
/// # Errors
///
/// Returns [`GeotagError::FileRead`] for any I/O failure, including invalid
/// UTF-8.
pub fn read_srt_file<P: AsRef<Path>>(path: P) -> Result<String, GeotagError> {
    let path = path.as_ref();
    log::debug!("Reading SRT file: {}", path.display());
    fs::read_to_string(path).map_err(|source| GeotagError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Read, parse, and validate `path`, returning its first geotag.
///
/// # Errors
///
/// - [`GeotagError::FileRead`] if the file cannot be read.
/// - Whatever `parser` returns, typically [`GeotagError::Parse`].
/// - Plus any errors from [`first_geotag`].
pub fn extract_geotag<P, M>(
    path: P,
    parser: &M,
    options: &GeotagOptions,
) -> Result<Geotag, GeotagError>
where
    P: AsRef<Path>,
    M: MetadataParser + ?Sized,
{
    let path = path.as_ref();
    let content = read_srt_file(path)?;
    let records = parser.parse(&content, path)?;
    first_geotag(&records, options)
}

/// [`extract_geotag`] with the built-in [`DjiSrtParser`] and default options.
///
/// # Errors
///
/// See [`extract_geotag`].
pub fn extract_first_geotag<P: AsRef<Path>>(path: P) -> Result<Geotag, GeotagError> {
    extract_geotag(path, &DjiSrtParser, &GeotagOptions::new())
}

/// Build a geotag from the first record of a sequence.
///
/// Later records are never inspected, even when the first one is unusable.
///
/// # Errors
///
/// - [`GeotagError::NoMetadataEntries`] if `records` is empty.
/// - Plus any errors from [`geotag_from_record`].
pub fn first_geotag(
    records: &[MetadataRecord],
    options: &GeotagOptions,
) -> Result<Geotag, GeotagError> {
    let first = records.first().ok_or(GeotagError::NoMetadataEntries)?;
    log::debug!("Using first of {} metadata records", records.len());
    geotag_from_record(first, options)
}

/// Validate one record and convert its coordinates.
///
/// # Errors
///
/// - [`GeotagError::MissingFields`] if any required field fails the
///   configured [`FieldCheck`](crate::FieldCheck).
/// - [`GeotagError::InvalidNumber`] if a present value has no numeric prefix.
pub fn geotag_from_record(
    record: &MetadataRecord,
    options: &GeotagOptions,
) -> Result<Geotag, GeotagError> {
    let required = options.required_fields();
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|field| !options.field_check().accepts(record.get(field)))
        .collect();

    if !missing.is_empty() {
        log::debug!(
            "First record fails {:?} check for: {}",
            options.field_check(),
            missing.join(", ")
        );
        return Err(GeotagError::MissingFields {
            required: required.iter().map(|field| field.to_string()).collect(),
            available: record.keys().map(str::to_string).collect(),
        });
    }

    let number = |field: &str| -> Result<f64, GeotagError> {
        let value = record.get(field).unwrap_or_default();
        parse_leading_float(value).ok_or_else(|| GeotagError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        })
    };

    Ok(Geotag {
        latitude: number(options.latitude_field())?,
        longitude: number(options.longitude_field())?,
        altitude: number(options.altitude_field())?,
    })
}

/// Parse the longest leading decimal number of `value`.
///
/// Leading whitespace and trailing units are ignored, so `" 257.6m"` reads
/// as `257.6`. Returns `None` when no digits lead the value or the number is
/// not finite.
pub fn parse_leading_float(value: &str) -> Option<f64> {
    let text = value.trim_start();
    let bytes = text.as_bytes();
    let count_digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let integer_digits = count_digits(end);
    end += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = count_digits(end + 1);
        if fraction_digits > 0 || integer_digits > 0 {
            end += 1 + fraction_digits;
        }
    }
    if integer_digits + fraction_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut cursor = end + 1;
        if matches!(bytes.get(cursor), Some(b'+' | b'-')) {
            cursor += 1;
        }
        let exponent_digits = count_digits(cursor);
        if exponent_digits > 0 {
            end = cursor + exponent_digits;
        }
    }

    text[..end]
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

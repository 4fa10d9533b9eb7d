//! Metadata parsing.
//!
//! [`MetadataParser`] is the seam between reading an SRT file and
//! interpreting it: it turns raw file text into an ordered sequence of
//! [`MetadataRecord`]s, one per cue. [`DjiSrtParser`] is the built-in
//! implementation; any `Fn(&str, &Path) -> Result<Vec<MetadataRecord>, _>`
//! closure can stand in for it.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//!
//! use dji_geotag::{DjiSrtParser, MetadataParser};
//!
//! let content = "1\n00:00:00,000 --> 00:00:00,033\n\
//!                [latitude: 45.5] [longitude: 7.25] [rel_alt: 1.3 abs_alt: 257.6]\n";
//! let records = DjiSrtParser.parse(content, Path::new("DJI_0001.SRT"))?;
//! assert_eq!(records[0].get("abs_alt"), Some("257.6"));
//! # Ok::<(), dji_geotag::GeotagError>(())
//! ```

use std::path::Path;

use crate::error::GeotagError;
use crate::metadata::MetadataRecord;
use crate::srt::{SrtCue, format_srt_timestamp, parse_cues};
use crate::telemetry::scan_fields;

/// Turns SRT file text into per-cue metadata records.
pub trait MetadataParser {
    /// Parse `content`, read from `path`.
    ///
    /// `path` is only used for context in diagnostics.
    ///
    /// # Errors
    ///
    /// Implementations return [`GeotagError::Parse`] when the content cannot
    /// be interpreted at all. An empty result is not an error at this level.
    fn parse(&self, content: &str, path: &Path) -> Result<Vec<MetadataRecord>, GeotagError>;
}

impl<F> MetadataParser for F
where
    F: Fn(&str, &Path) -> Result<Vec<MetadataRecord>, GeotagError>,
{
    fn parse(&self, content: &str, path: &Path) -> Result<Vec<MetadataRecord>, GeotagError> {
        self(content, path)
    }
}

/// Parser for DJI drone telemetry sidecars.
///
/// Produces one record per cue, in file order. Every record starts with
/// `index` (the cue number) and `timecode` (the cue start, `HH:MM:SS,mmm`),
/// followed by the telemetry fields found in the cue text. A cue without
/// telemetry still yields a record.
#[derive(Debug, Clone, Copy, Default)]
pub struct DjiSrtParser;

impl MetadataParser for DjiSrtParser {
    fn parse(&self, content: &str, path: &Path) -> Result<Vec<MetadataRecord>, GeotagError> {
        let cues = parse_cues(content).map_err(|error| GeotagError::parse(path, error))?;
        let records: Vec<MetadataRecord> = cues.iter().map(cue_to_record).collect();
        log::debug!(
            "Parsed {} metadata records from {}",
            records.len(),
            path.display()
        );
        Ok(records)
    }
}

/// Build the metadata record for one cue.
pub fn cue_to_record(cue: &SrtCue) -> MetadataRecord {
    let mut record = MetadataRecord::new();
    record.insert("index", cue.index.to_string());
    record.insert("timecode", format_srt_timestamp(cue.start_time));
    record.extend(scan_fields(&cue.text));
    record
}

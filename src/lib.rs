//! # dji-geotag
//!
//! Extract the first geotag from a DJI drone telemetry (`.SRT`) sidecar.
//!
//! DJI drones record a subtitle track alongside every video, one cue per
//! frame, carrying camera settings and the aircraft position. `dji-geotag`
//! reads such a file, takes the first cue's `latitude`, `longitude` and
//! `abs_alt`, and hands back a [`Geotag`] ready to be written into the video
//! by another tool.
//!
//! ## Quick Start
//!
//! ### From a file
//!
//! ```no_run
//! use dji_geotag::extract_first_geotag;
//!
//! let geotag = extract_first_geotag("DJI_0042.SRT").unwrap();
//! println!("{}", geotag.to_json().unwrap());
//! ```
//!
//! ### With a custom parser
//!
//! Anything implementing [`MetadataParser`] can replace the built-in
//! [`DjiSrtParser`], including plain closures:
//!
//! ```
//! use std::path::Path;
//!
//! use dji_geotag::{GeotagError, GeotagOptions, MetadataRecord, first_geotag, MetadataParser};
//!
//! let parser = |_: &str, _: &Path| -> Result<Vec<MetadataRecord>, GeotagError> {
//!     Ok(vec![[("latitude", "12.34"), ("longitude", "56.78"), ("abs_alt", "100.5")]
//!         .into_iter()
//!         .collect()])
//! };
//! let records = parser.parse("", Path::new("fake.srt")).unwrap();
//! let geotag = first_geotag(&records, &GeotagOptions::new()).unwrap();
//! assert_eq!(
//!     geotag.to_json().unwrap(),
//!     r#"{"latitude":12.34,"longitude":56.78,"altitude":100.5}"#
//! );
//! ```
//!
//! ## Supported layouts
//!
//! - Mini, Mini 2, Air 2S, Mavic 3 bracketed fields (`[latitude: 45.1]`)
//! - Mavic Pro comma lists (`GPS (lon, lat, alt)`)
//! - Phantom 4 tuples (`GPS(lon,lat,alt) ISO:100`)

pub mod error;
pub mod geotag;
pub mod metadata;
pub mod options;
pub mod parser;
pub mod srt;
pub mod telemetry;

pub use error::GeotagError;
pub use geotag::{
    Geotag, extract_first_geotag, extract_geotag, first_geotag, geotag_from_record,
    parse_leading_float, read_srt_file,
};
pub use metadata::MetadataRecord;
pub use options::{FieldCheck, GeotagOptions};
pub use parser::{DjiSrtParser, MetadataParser};
pub use srt::SrtCue;

//! SubRip cue reading.
//!
//! DJI drones write their per-frame telemetry as an ordinary SubRip (`.srt`)
//! sidecar: numbered blocks with a timing line followed by one or more text
//! lines. This module splits such a file into [`SrtCue`] values and strips
//! the inline `<font>` markup DJI wraps around the text.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use dji_geotag::srt::parse_cues;
//!
//! let cues = parse_cues("1\n00:00:00,000 --> 00:00:00,033\n<font size=\"28\">FrameCnt: 1</font>\n")?;
//! assert_eq!(cues.len(), 1);
//! assert_eq!(cues[0].end_time, Duration::from_millis(33));
//! assert_eq!(cues[0].text, "FrameCnt: 1");
//! # Ok::<(), dji_geotag::srt::SrtError>(())
//! ```

use std::time::Duration;

use thiserror::Error;

/// A single subtitle cue with timing and plain text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrtCue {
    /// The cue number written in the file, or its one-based position when
    /// the number line is missing.
    pub index: usize,
    /// When this cue starts displaying.
    pub start_time: Duration,
    /// When this cue stops displaying.
    pub end_time: Duration,
    /// Text lines joined with `\n`, markup tags removed.
    pub text: String,
}

/// Errors produced while reading cues.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SrtError {
    /// A timing line contained a timestamp that is not `HH:MM:SS,mmm`.
    #[error("invalid timestamp {value:?} on line {line}")]
    InvalidTimestamp {
        /// One-based line number of the timing line.
        line: usize,
        /// The offending timestamp text.
        value: String,
    },
}

/// Split SRT text into cues, in file order.
///
/// Blocks are separated by blank lines. A block without a `-->` timing line
/// is skipped. Once a cue has been read, a later block with an unparsable
/// timing line (such as the partial last block of a recording cut short) is
/// skipped with a warning. A UTF-8 byte order mark and Windows or classic Mac
/// line endings are accepted.
///
/// # Errors
///
/// Returns [`SrtError::InvalidTimestamp`] if a timing line cannot be parsed
/// before any cue has been read.
pub fn parse_cues(content: &str) -> Result<Vec<SrtCue>, SrtError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");

    let mut cues = Vec::new();
    let mut block: Vec<(usize, &str)> = Vec::new();

    for (line_index, line) in normalized.lines().enumerate() {
        if line.trim().is_empty() {
            push_block(&block, &mut cues)?;
            block.clear();
        } else {
            block.push((line_index + 1, line));
        }
    }
    push_block(&block, &mut cues)?;

    log::debug!("Read {} SRT cues", cues.len());
    Ok(cues)
}

/// Parse `block` and append it to `cues`. A malformed block is only fatal
/// while `cues` is still empty.
fn push_block(block: &[(usize, &str)], cues: &mut Vec<SrtCue>) -> Result<(), SrtError> {
    match parse_block(block, cues.len() + 1) {
        Ok(Some(cue)) => cues.push(cue),
        Ok(None) => {}
        Err(error) if cues.is_empty() => return Err(error),
        Err(error) => log::warn!("Skipping SRT block after cue {}: {error}", cues.len()),
    }
    Ok(())
}

/// Parse one blank-line-delimited block.
fn parse_block(block: &[(usize, &str)], position: usize) -> Result<Option<SrtCue>, SrtError> {
    if block.is_empty() {
        return Ok(None);
    }

    let Some(timing_position) = block.iter().position(|(_, line)| line.contains("-->")) else {
        log::debug!(
            "Skipping SRT block without timing line at line {}",
            block[0].0
        );
        return Ok(None);
    };

    let index = block[..timing_position]
        .iter()
        .rev()
        .find_map(|(_, line)| line.trim().parse::<usize>().ok())
        .unwrap_or(position);

    let (line_number, timing_line) = block[timing_position];
    let (start_text, end_text) = timing_line.split_once("-->").unwrap_or((timing_line, ""));
    // Some writers append positional hints (`X1:... Y1:...`) after the end time.
    let end_text = end_text.split_whitespace().next().unwrap_or("");

    let start_time = parse_timestamp_on_line(start_text, line_number)?;
    let end_time = parse_timestamp_on_line(end_text, line_number)?;

    let text = block[timing_position + 1..]
        .iter()
        .map(|(_, line)| strip_markup_tags(line))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(Some(SrtCue {
        index,
        start_time,
        end_time,
        text,
    }))
}

fn parse_timestamp_on_line(value: &str, line: usize) -> Result<Duration, SrtError> {
    parse_srt_timestamp(value).ok_or_else(|| SrtError::InvalidTimestamp {
        line,
        value: value.trim().to_string(),
    })
}

/// Parse an SRT timestamp (`HH:MM:SS,mmm`).
///
/// A `.` is accepted in place of the `,`, and fewer than three fractional
/// digits are read as a decimal fraction (`00:00:01,5` is 1.5 s).
pub fn parse_srt_timestamp(value: &str) -> Option<Duration> {
    let mut parts = value.trim().split(':');
    let hours: u64 = parts.next()?.trim().parse().ok()?;
    let minutes: u64 = parts.next()?.parse().ok()?;
    let seconds_part = parts.next()?;
    if parts.next().is_some() || minutes >= 60 {
        return None;
    }

    let (seconds_text, fraction_text) = match seconds_part.split_once([',', '.']) {
        Some((seconds, fraction)) => (seconds, fraction),
        None => (seconds_part, ""),
    };
    let seconds: u64 = seconds_text.parse().ok()?;
    if seconds >= 60 || !fraction_text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let mut millis = 0u64;
    for (position, digit) in fraction_text.chars().take(3).enumerate() {
        let digit = u64::from(digit.to_digit(10)?);
        millis += digit * 10u64.pow(2 - position as u32);
    }

    let total_millis = hours
        .checked_mul(60)?
        .checked_add(minutes)?
        .checked_mul(60)?
        .checked_add(seconds)?
        .checked_mul(1000)?
        .checked_add(millis)?;
    Some(Duration::from_millis(total_millis))
}

/// Format a duration as SRT timestamp (HH:MM:SS,mmm).
pub fn format_srt_timestamp(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let millis = duration.subsec_millis();
    format!("{hours:02}:{minutes:02}:{seconds:02},{millis:03}")
}

/// Remove `<...>` markup such as `<font size="28">` and `</font>`.
///
/// An unterminated `<` is kept as literal text.
fn strip_markup_tags(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut pending_tag = String::new();
    let mut in_tag = false;

    for c in input.chars() {
        if c == '<' && !in_tag {
            in_tag = true;
            pending_tag.push(c);
        } else if c == '>' && in_tag {
            in_tag = false;
            pending_tag.clear();
        } else if in_tag {
            pending_tag.push(c);
        } else {
            result.push(c);
        }
    }
    result.push_str(&pending_tag);

    result.trim().to_string()
}

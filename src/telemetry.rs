//! DJI telemetry field scanning.
//!
//! DJI firmware has used several text layouts for the per-frame telemetry in
//! its SRT sidecars. [`scan_fields`] understands the ones seen in the wild:
//!
//! - Mini / Air 2 / Mavic 3 bracket groups:
//!   `[iso : 100] [shutter : 1/1000.0] [rel_alt: 1.300 abs_alt: 257.627]`
//! - Mavic Pro comma lists:
//!   `F/3.5, SS 1000, ISO 100, EV 0, GPS (-5.6789, 40.1234, 19), D 24.38m`
//! - Phantom 4 tuples and colon pairs:
//!   `HOME(149.0251,-20.2532) 2017.08.05 14:11:51` /
//!   `GPS(149.0251,-20.2533,16) ISO:100 Shutter:60 EV:0 Fnum:2.2`
//! - A free-standing date and time line: `2021-09-04 15:59:29.166`
//!
//! Keys are lowercased, with any character other than ASCII letters, digits
//! and `_` replaced by `_`. Values are returned as found, trimmed.
//!
//! # Example
//!
//! ```
//! use dji_geotag::telemetry::scan_fields;
//!
//! let fields = scan_fields("[latitude: 45.5] [longitude: 7.25] [rel_alt: 1.3 abs_alt: 257.6]");
//! assert_eq!(fields[0], ("latitude".to_string(), "45.5".to_string()));
//! assert_eq!(fields[3], ("abs_alt".to_string(), "257.6".to_string()));
//! ```

/// A field found on a line, with the byte offset where it starts.
type Located = (usize, String, String);

/// Scan cue text for telemetry fields, in order of appearance.
pub fn scan_fields(text: &str) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    for line in text.lines() {
        fields.extend(
            scan_line(line)
                .into_iter()
                .map(|(_, key, value)| (key, value)),
        );
    }
    fields
}

fn scan_line(line: &str) -> Vec<Located> {
    let mut found: Vec<Located> = Vec::new();
    // Consumed spans are blanked out with spaces so byte offsets stay valid.
    let mut masked = line.to_string();

    if let Some((start, end)) = find_datetime(line) {
        found.push((start, "datetime".to_string(), line[start..end].to_string()));
        mask(&mut masked, start, end);
    }

    for group in find_tuple_groups(&masked) {
        for (key, value) in group.fields() {
            found.push((group.start, key, value));
        }
        mask(&mut masked, group.start, group.end);
    }

    masked = masked.replace(['[', ']'], " ");
    let pairs = find_colon_pairs(&masked);
    if let (Some(first), Some(last)) = (pairs.first(), pairs.last()) {
        let (start, end) = (first.start, last.end);
        for pair in &pairs {
            found.push((pair.start, pair.key.clone(), pair.value.clone()));
        }
        mask(&mut masked, start, end);
    }

    let mut offset = 0;
    for segment in masked.split(',') {
        if let Some((key, value)) = spaced_pair(segment) {
            let leading = segment.len() - segment.trim_start().len();
            found.push((offset + leading, key, value));
        }
        offset += segment.len() + 1;
    }

    found.sort_by_key(|(position, _, _)| *position);
    found
}

fn mask(text: &mut String, start: usize, end: usize) {
    text.replace_range(start..end, &" ".repeat(end - start));
}

/// Lowercase a label and map anything outside `[a-z0-9_]` to `_`.
fn normalize_key(key: &str) -> String {
    let key: String = key
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    // Several Air 2 firmware releases misspell this one.
    if key == "longtitude" {
        "longitude".to_string()
    } else {
        key
    }
}

fn starts_numeric(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('-' | '+' | '.') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

fn is_label(token: &str) -> bool {
    token.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && token.chars().all(|c| c.is_ascii_alphabetic() || c == '.')
}

fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b',' | b';')
}

// ── Date and time ────────────────────────────────────────────────

struct Cursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl Cursor<'_> {
    fn digits(&mut self, min: usize, max: usize) -> Option<()> {
        let start = self.position;
        while self.position < self.bytes.len()
            && self.position - start < max
            && self.bytes[self.position].is_ascii_digit()
        {
            self.position += 1;
        }
        (self.position - start >= min).then_some(())
    }

    fn byte_in(&mut self, set: &[u8]) -> Option<u8> {
        let byte = *self.bytes.get(self.position)?;
        if set.contains(&byte) {
            self.position += 1;
            Some(byte)
        } else {
            None
        }
    }
}

/// Locate `YYYY-MM-DD HH:MM:SS[.fff]` (separators `-`, `.` or `/`).
fn find_datetime(line: &str) -> Option<(usize, usize)> {
    let bytes = line.as_bytes();
    (0..bytes.len())
        .filter(|&i| bytes[i].is_ascii_digit() && (i == 0 || !bytes[i - 1].is_ascii_digit()))
        .find_map(|start| match_datetime(bytes, start).map(|end| (start, end)))
}

fn match_datetime(bytes: &[u8], start: usize) -> Option<usize> {
    let mut cursor = Cursor {
        bytes,
        position: start,
    };
    cursor.digits(4, 4)?;
    let separator = cursor.byte_in(b"-./")?;
    cursor.digits(2, 2)?;
    cursor.byte_in(&[separator])?;
    cursor.digits(2, 2)?;
    cursor.byte_in(b" T")?;
    cursor.digits(1, 2)?;
    cursor.byte_in(b":")?;
    cursor.digits(2, 2)?;
    cursor.byte_in(b":")?;
    cursor.digits(2, 2)?;

    let before_fraction = cursor.position;
    if cursor.byte_in(b".,").is_some() && cursor.digits(1, usize::MAX).is_none() {
        cursor.position = before_fraction;
    }
    Some(cursor.position)
}

// ── NAME(a, b, c) tuples ────────────────────────────────────────

struct TupleGroup {
    start: usize,
    end: usize,
    name: String,
    values: Vec<String>,
}

impl TupleGroup {
    fn fields(&self) -> Vec<(String, String)> {
        let names: &[&str] = match self.name.as_str() {
            "gps" => &["longitude", "latitude", "abs_alt"],
            "home" => &["home_longitude", "home_latitude"],
            _ => &[],
        };

        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, value)| {
                let key = match names.get(i) {
                    // The third GPS slot is satellite count on some models.
                    Some(&"abs_alt") if !starts_numeric(value) => return None,
                    Some(name) => name.to_string(),
                    None => format!("{}_{i}", self.name),
                };
                Some((key, value.clone()))
            })
            .collect()
    }
}

fn find_tuple_groups(line: &str) -> Vec<TupleGroup> {
    let bytes = line.as_bytes();
    let mut groups = Vec::new();
    let mut search_from = 0;

    while let Some(relative) = line[search_from..].find('(') {
        let open = search_from + relative;
        search_from = open + 1;

        let mut name_end = open;
        while name_end > 0 && bytes[name_end - 1] == b' ' {
            name_end -= 1;
        }
        let mut name_start = name_end;
        while name_start > 0 && bytes[name_start - 1].is_ascii_alphabetic() {
            name_start -= 1;
        }
        if name_start == name_end || (name_start > 0 && !is_separator(bytes[name_start - 1])) {
            continue;
        }

        let Some(close) = line[open..].find(')').map(|i| open + i) else {
            break;
        };
        let values: Vec<String> = line[open + 1..close]
            .split(',')
            .map(|value| value.trim().to_string())
            .collect();
        if values.len() < 2 || !values[..2].iter().all(|value| starts_numeric(value)) {
            continue;
        }

        groups.push(TupleGroup {
            start: name_start,
            end: close + 1,
            name: normalize_key(&line[name_start..name_end]),
            values,
        });
        search_from = close + 1;
    }

    groups
}

// ── key: value pairs ─────────────────────────────────────────────

struct ColonPair {
    start: usize,
    end: usize,
    key: String,
    value: String,
}

/// Find `key: value` pairs. A value runs up to the next key or the end of
/// the line, so `rel_alt: 1.300 abs_alt: 257.627` yields two pairs.
fn find_colon_pairs(line: &str) -> Vec<ColonPair> {
    let bytes = line.as_bytes();
    let mut keys: Vec<(usize, usize, String)> = Vec::new();

    for (colon, &byte) in bytes.iter().enumerate() {
        if byte != b':' {
            continue;
        }
        let mut key_end = colon;
        while key_end > 0 && bytes[key_end - 1] == b' ' {
            key_end -= 1;
        }
        let mut key_start = key_end;
        while key_start > 0
            && (bytes[key_start - 1].is_ascii_alphanumeric() || bytes[key_start - 1] == b'_')
        {
            key_start -= 1;
        }
        if key_start == key_end
            || !bytes[key_start].is_ascii_alphabetic()
            || (key_start > 0 && !is_separator(bytes[key_start - 1]))
        {
            continue;
        }
        keys.push((key_start, colon, normalize_key(&line[key_start..key_end])));
    }

    keys.iter()
        .enumerate()
        .map(|(i, (start, colon, key))| {
            let end = keys.get(i + 1).map_or(line.len(), |next| next.0);
            let value = line[colon + 1..end]
                .trim()
                .trim_end_matches([',', ';'])
                .trim_end()
                .to_string();
            ColonPair {
                start: *start,
                end,
                key: key.clone(),
                value,
            }
        })
        .collect()
}

// ── KEY value pairs (Mavic Pro) ──────────────────────────────────

/// `SS 1000`, `H.S 2.80m/s` or `F/3.5`.
fn spaced_pair(segment: &str) -> Option<(String, String)> {
    let tokens: Vec<&str> = segment.split_whitespace().collect();
    match tokens.as_slice() {
        [key, value] if is_label(key) && starts_numeric(value) => {
            Some((normalize_key(key), (*value).to_string()))
        }
        [single] => {
            let (key, value) = single.split_once('/')?;
            (is_label(key) && starts_numeric(value))
                .then(|| (normalize_key(key), value.to_string()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field<'a>(fields: &'a [(String, String)], key: &str) -> Option<&'a str> {
        fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn bracket_groups() {
        let fields = scan_fields(
            "[iso : 100] [shutter : 1/1000.0] [fnum : 280] [ev : 0] [ct : 5500] \
             [color_md : default] [focal_len : 240] [latitude: 45.123456] \
             [longitude: 7.654321] [rel_alt: 1.300 abs_alt: 257.627]",
        );
        let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            [
                "iso", "shutter", "fnum", "ev", "ct", "color_md", "focal_len", "latitude",
                "longitude", "rel_alt", "abs_alt"
            ]
        );
        assert_eq!(field(&fields, "shutter"), Some("1/1000.0"));
        assert_eq!(field(&fields, "color_md"), Some("default"));
        assert_eq!(field(&fields, "abs_alt"), Some("257.627"));
    }

    #[test]
    fn frame_counter_line() {
        let fields = scan_fields("FrameCnt: 1, DiffTime: 33ms");
        assert_eq!(
            fields,
            [
                ("framecnt".to_string(), "1".to_string()),
                ("difftime".to_string(), "33ms".to_string())
            ]
        );
    }

    #[test]
    fn datetime_line() {
        let fields = scan_fields("2021-09-04 15:59:29.166");
        assert_eq!(
            fields,
            [("datetime".to_string(), "2021-09-04 15:59:29.166".to_string())]
        );
    }

    #[test]
    fn phantom_layout() {
        let fields = scan_fields(
            "HOME(149.0251,-20.2532) 2017.08.05 14:11:51\n\
             GPS(149.0251,-20.2533,16) ISO:100 Shutter:60 EV:0 Fnum:2.2\n\
             BAROMETER:1.9",
        );
        assert_eq!(field(&fields, "home_longitude"), Some("149.0251"));
        assert_eq!(field(&fields, "home_latitude"), Some("-20.2532"));
        assert_eq!(field(&fields, "datetime"), Some("2017.08.05 14:11:51"));
        assert_eq!(field(&fields, "longitude"), Some("149.0251"));
        assert_eq!(field(&fields, "latitude"), Some("-20.2533"));
        assert_eq!(field(&fields, "abs_alt"), Some("16"));
        assert_eq!(field(&fields, "iso"), Some("100"));
        assert_eq!(field(&fields, "fnum"), Some("2.2"));
        assert_eq!(field(&fields, "barometer"), Some("1.9"));
    }

    #[test]
    fn mavic_pro_layout() {
        let fields = scan_fields(
            "F/3.5, SS 1000, ISO 100, EV 0, GPS (-5.6789, 40.1234, 19), D 24.38m, \
             H 6.00m, H.S 2.80m/s, V.S 0.00m/s",
        );
        let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            [
                "f", "ss", "iso", "ev", "longitude", "latitude", "abs_alt", "d", "h", "h_s",
                "v_s"
            ]
        );
        assert_eq!(field(&fields, "f"), Some("3.5"));
        assert_eq!(field(&fields, "latitude"), Some("40.1234"));
        assert_eq!(field(&fields, "h_s"), Some("2.80m/s"));
    }

    #[test]
    fn misspelled_longitude_is_normalized() {
        let fields = scan_fields("[latitude : 45.1] [longtitude : 7.2]");
        assert_eq!(field(&fields, "longitude"), Some("7.2"));
    }

    #[test]
    fn empty_value_is_kept() {
        let fields = scan_fields("[latitude: ] [longitude: 7.2]");
        assert_eq!(field(&fields, "latitude"), Some(""));
    }

    #[test]
    fn plain_text_has_no_fields() {
        assert!(scan_fields("Hello there, general").is_empty());
        assert!(scan_fields("").is_empty());
    }

    #[test]
    fn gps_with_non_numeric_third_value() {
        let fields = scan_fields("GPS(8.1, 51.2, M)");
        assert_eq!(field(&fields, "abs_alt"), None);
        assert_eq!(field(&fields, "latitude"), Some("51.2"));
    }
}

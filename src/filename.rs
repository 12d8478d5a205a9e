//! On-disk filename grammar: `YYYY.MM.DD[-N]_TOKEN.EXT`.
//!
//! `N` is an optional positive sequence number (implicit 1), `TOKEN` a raw
//! timeframe token, `EXT` one of jpg|jpeg|png|gif|webp (case-insensitive).
//! A filename that does not match, or whose token does not normalize, is
//! simply skipped by callers.

use crate::timeframe::TimeframeCode;
use once_cell::sync::Lazy;
use regex::Regex;

static FILENAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d{4}\.\d{2}\.\d{2})(?:-(\d+))?_(.+?)\.(jpg|jpeg|png|gif|webp)$")
        .expect("filename grammar regex is valid")
});

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date regex is valid"));

/// Extension written by uploads regardless of the source image format.
pub const UPLOAD_EXT: &str = "png";

/// Result of parsing an on-disk filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Calendar date, normalized to `YYYY-MM-DD`.
    pub date: String,
    /// Per-(asset, date) sequence number, >= 1.
    pub sequence: u32,
    pub timeframe: TimeframeCode,
}

impl ParsedName {
    /// The `"{date}-{sequence}"` key identifying this file's date entry.
    pub fn date_key(&self) -> String {
        format!("{}-{}", self.date, self.sequence)
    }
}

/// Parse a filename against the grammar.
///
/// Returns `None` for any non-conforming name: wrong shape, zero or
/// overflowing sequence, or an unrecognized timeframe token.
pub fn parse(filename: &str) -> Option<ParsedName> {
    let caps = FILENAME_RE.captures(filename)?;

    let date = caps[1].replace('.', "-");
    let sequence: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok().filter(|s| *s >= 1)?,
        None => 1,
    };
    let timeframe = TimeframeCode::normalize(&caps[3])?;

    Some(ParsedName {
        date,
        sequence,
        timeframe,
    })
}

/// Build the canonical on-disk filename for a (date, sequence, timeframe).
///
/// `date` is `YYYY-MM-DD` and is written with dot separators; the sequence is
/// always explicit. Round-trips with [`parse`].
pub fn format(date: &str, sequence: u32, timeframe: TimeframeCode, ext: &str) -> String {
    format!(
        "{}-{}_{}.{}",
        date.replace('-', "."),
        sequence,
        timeframe.as_str(),
        ext
    )
}

/// Whether `date` is a well-formed `YYYY-MM-DD` value.
pub fn is_valid_date(date: &str) -> bool {
    DATE_RE.is_match(date)
}

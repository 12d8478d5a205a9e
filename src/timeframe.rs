//! Canonical chart timeframes and the raw-token normalizer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six canonical chart interval codes.
///
/// Declaration order is ascending interval length, so the derived `Ord`
/// matches display order in stats and image sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeframeCode {
    #[serde(rename = "1m")]
    M1,
    #[serde(rename = "3m")]
    M3,
    #[serde(rename = "5m")]
    M5,
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "1h")]
    H1,
    #[serde(rename = "4h")]
    H4,
}

impl TimeframeCode {
    /// All codes in canonical order.
    pub const ALL: [TimeframeCode; 6] = [
        TimeframeCode::M1,
        TimeframeCode::M3,
        TimeframeCode::M5,
        TimeframeCode::M15,
        TimeframeCode::H1,
        TimeframeCode::H4,
    ];

    /// Canonical token as it appears in filenames.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeframeCode::M1 => "1m",
            TimeframeCode::M3 => "3m",
            TimeframeCode::M5 => "5m",
            TimeframeCode::M15 => "15m",
            TimeframeCode::H1 => "1h",
            TimeframeCode::H4 => "4h",
        }
    }

    /// Map a raw filename token to its canonical code.
    ///
    /// Case-insensitive. Anything outside the fixed table yields `None`; the
    /// caller skips the file (expected filtering, not an error).
    pub fn normalize(raw: &str) -> Option<TimeframeCode> {
        match raw.to_ascii_lowercase().as_str() {
            "1m" | "1min" => Some(TimeframeCode::M1),
            "3m" | "3min" => Some(TimeframeCode::M3),
            "5m" | "5min" => Some(TimeframeCode::M5),
            "15m" | "15min" => Some(TimeframeCode::M15),
            "1h" => Some(TimeframeCode::H1),
            "4h" => Some(TimeframeCode::H4),
            _ => None,
        }
    }
}

impl fmt::Display for TimeframeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

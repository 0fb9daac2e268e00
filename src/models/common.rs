//! Common types shared across all models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a catalog record.
///
/// The catalog service hands out document ids as strings, while the local
/// song route uses integers. Both are accepted and compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SongId {
    /// Numeric identifier.
    Number(u64),
    /// Opaque string identifier.
    Text(String),
}

impl SongId {
    /// Whether the identifier is an empty string.
    pub fn is_empty(&self) -> bool {
        matches!(self, SongId::Text(s) if s.is_empty())
    }
}

impl Default for SongId {
    fn default() -> Self {
        SongId::Text(String::new())
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SongId::Number(n) => write!(f, "{}", n),
            SongId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for SongId {
    fn from(s: &str) -> Self {
        SongId::Text(s.to_string())
    }
}

impl From<String> for SongId {
    fn from(s: String) -> Self {
        SongId::Text(s)
    }
}

impl From<u64> for SongId {
    fn from(n: u64) -> Self {
        SongId::Number(n)
    }
}

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Release date structure.
///
/// The catalog sends ISO-ish strings ("2019-03-08" or a full timestamp);
/// only the calendar part is kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReleaseDate {
    /// Year of release.
    pub year: i32,

    /// Month of release (1-12), if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,

    /// Day of release (1-31), if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
}

impl ReleaseDate {
    /// Parse a date string in "YYYY-MM-DD" format, ignoring any time part.
    pub fn parse(date_str: &str) -> Self {
        let date_part = date_str.split(['T', ' ']).next().unwrap_or("");
        if date_part.is_empty() {
            return Self::default();
        }

        let parts: Vec<&str> = date_part.split('-').collect();

        Self {
            year: parts.first().and_then(|s| s.parse().ok()).unwrap_or(0),
            month: parts
                .get(1)
                .and_then(|s| s.parse().ok())
                .filter(|m| (1..=12).contains(m)),
            day: parts
                .get(2)
                .and_then(|s| s.parse().ok())
                .filter(|d| (1..=31).contains(d)),
        }
    }

    /// Whether no year could be read.
    pub fn is_unknown(&self) -> bool {
        self.year == 0
    }

    /// Long Spanish rendering, e.g. "8 de marzo de 2019".
    pub fn to_long_es(&self) -> String {
        let month = self
            .month
            .and_then(|m| MONTHS_ES.get((m as usize).wrapping_sub(1)));
        match (month, self.day) {
            (Some(m), Some(d)) => format!("{} de {} de {}", d, m, self.year),
            (Some(m), None) => format!("{} de {}", m, self.year),
            _ => format!("{}", self.year),
        }
    }
}

/// Format a playback position in seconds as `m:ss`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

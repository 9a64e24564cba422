//! File metadata as reported by the file service.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ============================================================================
// File Record
// ============================================================================

/// One listed file. `name` is the unique key on the service side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time as wall-clock time on the service.
    #[serde(with = "timestamp")]
    pub last_modified: NaiveDateTime,
    /// Lower-cased extension (e.g. `.pdf`) or `no-extension`.
    #[serde(rename = "type")]
    pub file_type: String,
}

impl FileRecord {
    pub fn new(
        name: impl Into<String>,
        size: u64,
        last_modified: NaiveDateTime,
        file_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            last_modified,
            file_type: file_type.into(),
        }
    }

    /// Returns a human-readable size string.
    pub fn size_display(&self) -> String {
        format_size(self.size)
    }
}

/// Formats a byte count with 1024-based units and one decimal.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_owned();
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{size:.1} {}", UNITS[unit])
}

/// Parses the timestamp forms the service emits.
///
/// Accepts RFC 3339 (the wall clock in the given offset is kept), naive
/// ISO-8601 date-times with optional fractional seconds, and bare dates
/// (read as midnight).
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize as _, Deserializer, Serializer, de::Error as _};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

// ============================================================================
// Upload payload
// ============================================================================

/// A local file about to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

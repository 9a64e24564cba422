//! Search, date-range and sort parameters, and the derivation that applies them.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::file::FileRecord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown sort field '{0}' (expected name, size, modified or type)")]
    SortBy(String),
    #[error("Unknown sort order '{0}' (expected asc or desc)")]
    SortOrder(String),
}

// ============================================================================
// Sort key and direction
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Name,
    Size,
    Modified,
    Type,
}

impl SortBy {
    pub const ALL: [Self; 4] = [Self::Name, Self::Size, Self::Modified, Self::Type];

    /// Wire name used by the `sort_by` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Size => "size",
            Self::Modified => "modified",
            Self::Type => "type",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::SortBy(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParseError::SortOrder(s.to_owned())),
        }
    }
}

// ============================================================================
// Filter state
// ============================================================================

/// What the user asked to see. Owned by the client for the whole session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl FilterState {
    pub fn is_default_sort(&self) -> bool {
        self.sort_by == SortBy::Name && self.sort_order == SortOrder::Asc
    }

    pub fn has_date_range(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// True when both bounds are set and the start lies after the end.
    ///
    /// Such a range matches nothing; it is left to the caller to refuse it.
    pub fn has_inverted_range(&self) -> bool {
        matches!((self.start_date, self.end_date), (Some(start), Some(end)) if start > end)
    }

    pub fn matches(&self, file: &FileRecord) -> bool {
        self.matches_search(file) && self.matches_date_range(file)
    }

    fn matches_search(&self, file: &FileRecord) -> bool {
        self.search_term.is_empty()
            || file
                .name
                .to_lowercase()
                .contains(&self.search_term.to_lowercase())
    }

    fn matches_date_range(&self, file: &FileRecord) -> bool {
        let ts = file.last_modified;
        self.start_date.is_none_or(|d| ts >= start_of_day(d))
            && self.end_date.is_none_or(|d| ts <= end_of_day(d))
    }

    /// Ordering of two records under the current sort key and direction.
    pub fn compare(&self, a: &FileRecord, b: &FileRecord) -> Ordering {
        let ordering = match self.sort_by {
            SortBy::Name => locale_cmp(&a.name, &b.name),
            SortBy::Size => a.size.cmp(&b.size),
            SortBy::Modified => a.last_modified.cmp(&b.last_modified),
            SortBy::Type => locale_cmp(&a.file_type, &b.file_type),
        };
        self.sort_order.apply(ordering)
    }

    /// Stable in-place sort.
    pub fn sort(&self, files: &mut [FileRecord]) {
        files.sort_by(|a, b| self.compare(a, b));
    }

    /// Filters then sorts into a new sequence; `files` is left untouched.
    pub fn apply(&self, files: &[FileRecord]) -> Vec<FileRecord> {
        let mut out: Vec<FileRecord> = files.iter().filter(|f| self.matches(f)).cloned().collect();
        self.sort(&mut out);
        out
    }
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last representable instant of `date`.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1) - Duration::nanoseconds(1)
}

/// Case-folded comparison; on a tie lowercase sorts before uppercase.
fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn file(name: &str, size: u64, modified: NaiveDateTime, file_type: &str) -> FileRecord {
        FileRecord::new(name, size, modified, file_type)
    }

    fn names(files: &[FileRecord]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_parse_sort_keys() {
        assert_eq!("size".parse::<SortBy>(), Ok(SortBy::Size));
        assert_eq!("Modified".parse::<SortBy>(), Ok(SortBy::Modified));
        assert_eq!(
            "owner".parse::<SortBy>(),
            Err(ParseError::SortBy("owner".to_owned()))
        );
        assert_eq!("DESC".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("down".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_day_bounds() {
        let d = date(2024, 2, 29);
        assert_eq!(start_of_day(d).to_string(), "2024-02-29 00:00:00");
        assert_eq!(end_of_day(d).to_string(), "2024-02-29 23:59:59.999999999");
    }

    #[test]
    fn test_locale_cmp() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zeta", "alpha"), Ordering::Greater);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let filter = FilterState {
            start_date: Some(date(2024, 5, 10)),
            end_date: Some(date(2024, 5, 1)),
            ..FilterState::default()
        };
        let noon = date(2024, 5, 5).and_hms_opt(12, 0, 0).expect("valid");

        assert!(filter.has_inverted_range());
        assert!(filter.apply(&[file("a", 1, noon, ".txt")]).is_empty());
    }

    #[test]
    fn test_end_bound_is_inclusive_through_end_of_day() {
        let filter = FilterState {
            end_date: Some(date(2024, 5, 1)),
            ..FilterState::default()
        };
        let late = date(2024, 5, 1).and_hms_opt(23, 59, 59).expect("valid");
        let next = date(2024, 5, 2).and_hms_opt(0, 0, 0).expect("valid");

        let out = filter.apply(&[file("late", 1, late, ".txt"), file("next", 1, next, ".txt")]);
        assert_eq!(names(&out), vec!["late"]);
    }

    #[test]
    fn test_sort_by_type_then_stable() {
        let t = date(2024, 1, 1).and_hms_opt(0, 0, 0).expect("valid");
        let files = vec![
            file("b", 1, t, ".txt"),
            file("a", 1, t, ".PDF"),
            file("c", 1, t, ".txt"),
        ];
        let filter = FilterState {
            sort_by: SortBy::Type,
            ..FilterState::default()
        };

        assert_eq!(names(&filter.apply(&files)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_by_modified_desc() {
        let files = vec![
            file("old", 1, date(2023, 1, 1).and_hms_opt(0, 0, 0).expect("valid"), ".txt"),
            file("new", 1, date(2024, 1, 1).and_hms_opt(0, 0, 0).expect("valid"), ".txt"),
        ];
        let filter = FilterState {
            sort_by: SortBy::Modified,
            sort_order: SortOrder::Desc,
            ..FilterState::default()
        };

        assert_eq!(names(&filter.apply(&files)), vec!["new", "old"]);
    }
}

//! Inclusive date range for the statistics views.

use chrono::{Duration, Local};
use serde::{Deserialize, Serialize};

/// `[start, end]`, both `yyyy-mm-dd`. The format is fixed-width and
/// zero-padded, so plain string comparison is date comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// The quick-filter ranges: today back `days` days.
    pub fn last_days(days: i64) -> Self {
        let today = Local::now().date_naive();
        Self {
            start: (today - Duration::days(days)).to_string(),
            end: today.to_string(),
        }
    }

    pub fn contains(&self, date: &str) -> bool {
        self.start.as_str() <= date && date <= self.end.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_on_both_ends() {
        let range = DateRange::new("2024-01-05", "2024-01-10");
        assert!(range.contains("2024-01-05"));
        assert!(range.contains("2024-01-07"));
        assert!(range.contains("2024-01-10"));
        assert!(!range.contains("2024-01-04"));
        assert!(!range.contains("2024-01-11"));
    }

    #[test]
    fn contains_crosses_month_and_year_boundaries() {
        let range = DateRange::new("2023-12-28", "2024-01-03");
        assert!(range.contains("2023-12-31"));
        assert!(range.contains("2024-01-01"));
        assert!(!range.contains("2024-02-01"));
    }

    #[test]
    fn last_days_spans_today() {
        let range = DateRange::last_days(30);
        let today = Local::now().date_naive().to_string();
        assert_eq!(range.end, today);
        assert!(range.start < range.end);
        assert!(range.contains(&today));
    }
}

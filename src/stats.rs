//! Aggregate statistics — level frequencies, indicator tallies and symptom
//! counts over a date-range snapshot.
//!
//! Pure projection: the caller filters the store by range and hands the
//! flattened records in. Counting is by level string, so archived custom
//! emotions keep counting under their name until the item is deleted.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::RatingCategory;
use crate::store::DatedRecord;

/// Two-way tally of a binary indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndicatorTally {
    pub yes: u32,
    pub no: u32,
}

/// Raw counts for a date range. Percentage math is a display concern; the
/// counts plus `total_records` are sufficient to derive it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RangeStats {
    /// Flattened record count over the range.
    pub total_records: u32,
    /// Category key → observed level → occurrences. Levels that never occur
    /// are absent (no zero-filling).
    pub levels: BTreeMap<String, BTreeMap<String, u32>>,
    /// Indicator key → explicit yes/no tally.
    pub indicators: BTreeMap<String, IndicatorTally>,
    /// Symptom tag → occurrences (one per record listing the tag).
    pub sintomas: BTreeMap<String, u32>,
}

/// Count level, indicator and symptom occurrences across the snapshot.
/// `None` when the snapshot is empty — "nothing to display", not an error.
pub fn compute_stats(records: &[DatedRecord]) -> Option<RangeStats> {
    if records.is_empty() {
        return None;
    }

    let mut stats = RangeStats {
        total_records: records.len() as u32,
        ..RangeStats::default()
    };
    for cat in RatingCategory::ALL {
        stats.levels.insert(cat.as_str().to_string(), BTreeMap::new());
    }

    for dated in records {
        let record = &dated.record;

        for cat in RatingCategory::ALL {
            if let Some(level) = record.level(cat) {
                let buckets = stats.levels.entry(cat.as_str().to_string()).or_default();
                *buckets.entry(level.to_string()).or_insert(0) += 1;
            }
        }

        for (key, value) in record.indicadores.as_pairs() {
            let tally = stats.indicators.entry(key.to_string()).or_default();
            if value {
                tally.yes += 1;
            } else {
                tally.no += 1;
            }
        }

        for tag in &record.sintomas {
            *stats.sintomas.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    Some(stats)
}

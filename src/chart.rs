//! Trend-chart projection — the range snapshot as an ordered numeric
//! time series, one point per record.
//!
//! Stateless: re-run on every change to the store, range or catalog.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{CategoryCatalog, RatingCategory};
use crate::store::DatedRecord;

/// One category's value at one point.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesValue {
    /// 1-based intensity ordinal. `None` is a gap — renderers break the
    /// line rather than drawing a low-end score.
    pub ordinal: Option<usize>,
    /// The human label behind the ordinal, for tooltips.
    pub level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: String,
    pub hora: String,
    /// `dd/mm`, suffixed with the time when the date has several records.
    pub label: String,
    /// Category key → value; every rating category is present.
    pub values: BTreeMap<String, SeriesValue>,
}

/// Project the snapshot into chart points ordered by date, then `hora`,
/// ties keeping input order. Empty input projects to an empty series.
pub fn compute_series(records: &[DatedRecord], catalog: &CategoryCatalog) -> Vec<ChartPoint> {
    let mut ordered: Vec<&DatedRecord> = records.iter().collect();
    // Stable sort: records sharing date+hora keep their input order
    ordered.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.record.hora.cmp(&b.record.hora))
    });

    let mut per_date: BTreeMap<&str, usize> = BTreeMap::new();
    for dated in &ordered {
        *per_date.entry(dated.date.as_str()).or_insert(0) += 1;
    }

    ordered
        .into_iter()
        .map(|dated| {
            let label = if per_date[dated.date.as_str()] > 1 {
                format!("{} {}", short_date(&dated.date), dated.record.hora)
            } else {
                short_date(&dated.date)
            };

            let mut values = BTreeMap::new();
            for cat in RatingCategory::ALL {
                let level = dated.record.level(cat).map(str::to_string);
                let ordinal = level.as_deref().and_then(|v| catalog.ordinal_of(cat, v));
                values.insert(cat.as_str().to_string(), SeriesValue { ordinal, level });
            }

            ChartPoint {
                date: dated.date.clone(),
                hora: dated.record.hora.clone(),
                label,
                values,
            }
        })
        .collect()
}

/// `yyyy-mm-dd` → `dd/mm`; anything malformed passes through unchanged.
fn short_date(date: &str) -> String {
    match (date.get(8..10), date.get(5..7)) {
        (Some(day), Some(month)) if date.len() == 10 => format!("{day}/{month}"),
        _ => date.to_string(),
    }
}

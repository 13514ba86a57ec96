//! Tracker — the boundary the form shell talks to.
//!
//! Validates submissions before anything reaches the store, owns the
//! gateway both persisted collections write through, and serves the view
//! queries (day detail, statistics, trend series, calendar overview).

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::catalog::CategoryCatalog;
use crate::chart::{self, ChartPoint};
use crate::config;
use crate::db::{Gateway, SqliteGateway, StorageError};
use crate::models::{DateRange, Record};
use crate::stats::{self, RangeStats};
use crate::store::{DatedRecord, EntryStore};

#[derive(Error, Debug)]
pub enum TrackerError {
    /// Submission left rating categories unselected. Nothing was persisted.
    #[error("Missing required categories: {}", missing.join(", "))]
    Incomplete { missing: Vec<String> },

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Invalid time (expected HH:MM): {0}")]
    InvalidTime(String),

    #[error("Emotion name is required")]
    EmptyEmotionName,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A filled form as submitted by the UI.
#[derive(Debug, Clone, Default)]
pub struct EntryForm {
    /// Target date, `yyyy-mm-dd`.
    pub date: String,
    /// Id of the record being edited; `None` submits a new record.
    pub editing_id: Option<String>,
    pub record: Record,
}

pub struct Tracker<G: Gateway> {
    gateway: G,
    entries: EntryStore,
    catalog: CategoryCatalog,
}

impl Tracker<SqliteGateway> {
    /// Open the journal at its default location under the app data dir.
    pub fn open_default() -> Result<Self, StorageError> {
        std::fs::create_dir_all(config::app_data_dir())?;
        Self::open(SqliteGateway::open(&config::journal_db_path())?)
    }
}

impl<G: Gateway> Tracker<G> {
    /// Load both collections from the gateway.
    pub fn open(gateway: G) -> Result<Self, StorageError> {
        let entries = EntryStore::load(&gateway)?;
        let catalog = CategoryCatalog::load(&gateway)?;
        Ok(Self {
            gateway,
            entries,
            catalog,
        })
    }

    // ───────────────────────────────────────
    // Submissions
    // ───────────────────────────────────────

    /// Validate and store a submission. Returns the record id. A new record
    /// is appended; an edit replaces the existing record by id, moving it
    /// to the new date's bucket when the date changed.
    pub fn submit(&mut self, form: EntryForm) -> Result<String, TrackerError> {
        if NaiveDate::parse_from_str(&form.date, "%Y-%m-%d").is_err() {
            return Err(TrackerError::InvalidDate(form.date));
        }
        let mut record = form.record;
        if NaiveTime::parse_from_str(&record.hora, "%H:%M").is_err() {
            return Err(TrackerError::InvalidTime(record.hora));
        }

        let missing = record.missing_categories();
        if !missing.is_empty() {
            return Err(TrackerError::Incomplete {
                missing: missing.iter().map(|c| c.as_str().to_string()).collect(),
            });
        }

        record.touch();
        let id = match form.editing_id.filter(|id| !id.is_empty()) {
            Some(id) => {
                record.id = id.clone();
                self.entries.upsert(&mut self.gateway, record, &form.date)?;
                id
            }
            None => self.entries.append_new(&mut self.gateway, record, &form.date)?,
        };
        tracing::debug!(date = %form.date, "Journal record saved");
        Ok(id)
    }

    /// Delete a record by id, wherever it lives.
    pub fn remove(&mut self, id: &str) -> Result<(), TrackerError> {
        self.entries.remove_by_id(&mut self.gateway, id)?;
        tracing::debug!(id, "Journal record deleted");
        Ok(())
    }

    // ───────────────────────────────────────
    // View queries
    // ───────────────────────────────────────

    /// The records of one date, ordered by time of day.
    pub fn records_for_date(&self, date: &str) -> Vec<Record> {
        self.entries.records_for_date(date)
    }

    /// Aggregate statistics over a range; `None` means nothing to display.
    pub fn stats(&self, range: &DateRange) -> Option<RangeStats> {
        stats::compute_stats(&self.entries.all_in_range(range))
    }

    /// Trend-chart series over a range.
    pub fn series(&self, range: &DateRange) -> Vec<ChartPoint> {
        chart::compute_series(&self.entries.all_in_range(range), &self.catalog)
    }

    /// The dates of a calendar month that carry records.
    pub fn month_overview(&self, year: i32, month: u32) -> Vec<String> {
        self.entries.dates_with_entries(year, month)
    }

    /// Every record, dates descending.
    pub fn all_records(&self) -> Vec<DatedRecord> {
        self.entries.all_records()
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn entries(&self) -> &EntryStore {
        &self.entries
    }

    // ───────────────────────────────────────
    // Emotion management
    // ───────────────────────────────────────

    /// Create or edit a custom emotion and persist the catalog.
    pub fn add_or_update_emotion(
        &mut self,
        name: &str,
        color: &str,
        edit_index: Option<usize>,
    ) -> Result<(), TrackerError> {
        if name.trim().is_empty() {
            return Err(TrackerError::EmptyEmotionName);
        }
        self.catalog.add_or_update(name.trim(), color, edit_index);
        self.save_catalog()
    }

    pub fn archive_emotion(&mut self, index: usize) -> Result<(), TrackerError> {
        self.catalog.archive(index);
        self.save_catalog()
    }

    pub fn unarchive_emotion(&mut self, index: usize) -> Result<(), TrackerError> {
        self.catalog.unarchive(index);
        self.save_catalog()
    }

    pub fn move_emotion(&mut self, index: usize, direction: isize) -> Result<(), TrackerError> {
        self.catalog.move_item(index, direction);
        self.save_catalog()
    }

    /// Permanent removal, distinct from archiving; the UI gates this behind
    /// an explicit confirmation.
    pub fn delete_emotion(&mut self, index: usize) -> Result<(), TrackerError> {
        self.catalog.delete(index);
        self.save_catalog()
    }

    fn save_catalog(&mut self) -> Result<(), TrackerError> {
        self.catalog.save(&mut self.gateway)?;
        Ok(())
    }
}

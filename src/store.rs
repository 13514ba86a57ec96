//! Entry store — the calendar-date to record-bucket mapping.
//!
//! Owns record identity and placement: upsert, append, delete and lookup
//! over per-date buckets, with a synchronous write-through to the gateway
//! after every mutation. Loading normalizes every persisted shape the app
//! has ever written into the current envelope: blobs without a version
//! marker are the legacy date-map (a bare record object, or a record
//! array, directly under each date key) and are migrated transparently.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::db::{Gateway, StorageError, ENTRIES_KEY};
use crate::models::{DateRange, Record};

/// Version marker of the persisted entry envelope.
const ENVELOPE_VERSION: u32 = 2;

#[derive(Deserialize)]
struct Envelope {
    #[allow(dead_code)]
    version: u32,
    days: BTreeMap<String, Vec<Record>>,
}

/// A record tagged with the date bucket it lives in.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedRecord {
    pub date: String,
    pub record: Record,
}

/// Generate a fresh record id. UUID v4, unique under arbitrarily rapid
/// successive calls.
pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryStore {
    days: BTreeMap<String, Vec<Record>>,
}

impl EntryStore {
    /// Load the entry collection from the gateway, migrating legacy shapes.
    pub fn load<G: Gateway>(gateway: &G) -> Result<Self, StorageError> {
        let days = match gateway.get(ENTRIES_KEY)? {
            Some(blob) => parse_blob(&blob)?,
            None => BTreeMap::new(),
        };
        Ok(Self { days })
    }

    /// Append a record under a fresh id. Returns the id.
    pub fn append_new<G: Gateway>(
        &mut self,
        gateway: &mut G,
        mut record: Record,
        date: &str,
    ) -> Result<String, StorageError> {
        record.id = generate_id();
        let id = record.id.clone();
        self.days.entry(date.to_string()).or_default().push(record);
        self.persist(gateway)?;
        Ok(id)
    }

    /// Place a record under `target_date`, wherever its id currently lives.
    /// Same-date edits replace in place; cross-date edits detach from the
    /// old bucket first (dropping it if emptied) and append.
    pub fn upsert<G: Gateway>(
        &mut self,
        gateway: &mut G,
        record: Record,
        target_date: &str,
    ) -> Result<(), StorageError> {
        if let Some(current_date) = self.date_of(&record.id) {
            if current_date != target_date {
                self.detach(&record.id);
            }
        }
        let bucket = self.days.entry(target_date.to_string()).or_default();
        match bucket.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => *slot = record,
            None => bucket.push(record),
        }
        self.persist(gateway)
    }

    /// Remove the record with this id; its bucket is dropped when emptied.
    pub fn remove_by_id<G: Gateway>(
        &mut self,
        gateway: &mut G,
        id: &str,
    ) -> Result<(), StorageError> {
        if !self.detach(id) {
            return Err(StorageError::RecordNotFound { id: id.to_string() });
        }
        self.persist(gateway)
    }

    /// The bucket for a date, ordered by `hora` (stable on ties), empty if
    /// the date has no records.
    pub fn records_for_date(&self, date: &str) -> Vec<Record> {
        let mut bucket = self.days.get(date).cloned().unwrap_or_default();
        bucket.sort_by(|a, b| a.hora.cmp(&b.hora));
        bucket
    }

    /// Every record whose date falls within the range, flattened.
    /// Cross-date order is unspecified; callers that need order re-sort.
    pub fn all_in_range(&self, range: &DateRange) -> Vec<DatedRecord> {
        let mut out = Vec::new();
        for (date, bucket) in &self.days {
            if range.contains(date) {
                for record in bucket {
                    out.push(DatedRecord {
                        date: date.clone(),
                        record: record.clone(),
                    });
                }
            }
        }
        out
    }

    /// Every record in the store, dates descending, `hora` ascending within
    /// a date.
    pub fn all_records(&self) -> Vec<DatedRecord> {
        let mut out = Vec::new();
        for date in self.days.keys().rev() {
            for record in self.records_for_date(date) {
                out.push(DatedRecord {
                    date: date.clone(),
                    record,
                });
            }
        }
        out
    }

    /// The dates within a calendar month that carry at least one record.
    pub fn dates_with_entries(&self, year: i32, month: u32) -> Vec<String> {
        let prefix = format!("{year:04}-{month:02}-");
        self.days
            .keys()
            .filter(|d| d.starts_with(&prefix))
            .cloned()
            .collect()
    }

    /// Date bucket currently holding this id, if any.
    pub fn date_of(&self, id: &str) -> Option<String> {
        self.days
            .iter()
            .find(|(_, bucket)| bucket.iter().any(|r| r.id == id))
            .map(|(date, _)| date.clone())
    }

    pub fn contains_date(&self, date: &str) -> bool {
        self.days.contains_key(date)
    }

    pub fn total_records(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    fn detach(&mut self, id: &str) -> bool {
        let Some(date) = self.date_of(id) else {
            return false;
        };
        if let Some(bucket) = self.days.get_mut(&date) {
            bucket.retain(|r| r.id != id);
            if bucket.is_empty() {
                self.days.remove(&date);
            }
        }
        true
    }

    /// Write-through. The in-memory state already reflects the mutation; a
    /// failed write is surfaced to the caller and not retried.
    fn persist<G: Gateway>(&self, gateway: &mut G) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&serde_json::json!({
            "version": ENVELOPE_VERSION,
            "days": &self.days,
        }))?;
        if let Err(e) = gateway.set(ENTRIES_KEY, &blob) {
            tracing::error!("Entry save failed: {e}");
            return Err(e);
        }
        Ok(())
    }
}

fn parse_blob(blob: &str) -> Result<BTreeMap<String, Vec<Record>>, StorageError> {
    let value: Value = serde_json::from_str(blob)?;
    let mut days = if value.get("version").and_then(Value::as_u64).is_some() {
        serde_json::from_value::<Envelope>(value)?.days
    } else {
        migrate_legacy(value)?
    };

    // No empty-bucket tombstones; every record carries an id.
    days.retain(|_, bucket| !bucket.is_empty());
    for bucket in days.values_mut() {
        for record in bucket.iter_mut() {
            if record.id.is_empty() {
                record.id = generate_id();
            }
        }
    }
    Ok(days)
}

/// Legacy date-map blob: each date key holds either a bare record object
/// (the original one-record-per-day shape) or a record array.
fn migrate_legacy(value: Value) -> Result<BTreeMap<String, Vec<Record>>, StorageError> {
    let Value::Object(map) = value else {
        return Err(serde_json::Error::custom("entry collection is not an object").into());
    };

    let mut days = BTreeMap::new();
    for (date, entry) in map {
        let bucket: Vec<Record> = match entry {
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<_, _>>()?,
            single @ Value::Object(_) => vec![serde_json::from_value(single)?],
            other => {
                return Err(serde_json::Error::custom(format!(
                    "unexpected entry shape under {date}: {other}"
                ))
                .into());
            }
        };
        if !bucket.is_empty() {
            days.insert(date, bucket);
        }
    }
    tracing::info!(dates = days.len(), "Migrated legacy entry collection");
    Ok(days)
}

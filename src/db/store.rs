use chrono::NaiveDate;
use serde::Serialize;

use super::KeyValueBackend;
use crate::dto::ExportResponse;
use crate::error::AppResult;
use crate::export::{self, DownloadSink};
use crate::models::check_in::CheckInRecord;

pub const DEFAULT_STORAGE_KEY: &str = "check-ins";

/// Durable CRUD over the whole check-in collection.
///
/// The collection lives under a single key as one JSON array. Every mutation
/// reads the full array, changes it in memory and writes the full array
/// back; nothing is ever written as a delta.
///
/// Backend failures never escape: reads degrade to an empty collection and
/// failed writes are logged and dropped, leaving the previous blob in place.
pub struct RecordStore<B> {
    backend: B,
    key: String,
}

/// Readiness report for the `status` command.
#[derive(Debug, Serialize)]
pub struct StoreStatus {
    pub backend: String,
    pub key: String,
    pub readable: bool,
    pub record_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<B: KeyValueBackend> RecordStore<B> {
    pub fn new(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn with_default_key(backend: B) -> Self {
        Self::new(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// All records in insertion order. Empty when nothing is stored yet or
    /// the stored blob cannot be read or parsed.
    pub fn list_all(&self) -> Vec<CheckInRecord> {
        match self.read() {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    backend = %self.backend.describe(),
                    key = %self.key,
                    "Error reading check-ins, treating collection as empty"
                );
                Vec::new()
            }
        }
    }

    /// Appends `record` and rewrites the collection. The caller assigns `id`
    /// and `timestamp`.
    pub fn create(&self, record: CheckInRecord) {
        let mut records = self.list_all();
        tracing::info!(id = %record.id, date = %record.date, "Saving check-in");
        records.push(record);
        self.persist(&records);
    }

    /// Replaces the stored record with the same `id`, keeping its position.
    ///
    /// Returns `false` without touching storage when no record matches.
    pub fn update(&self, record: CheckInRecord) -> bool {
        let mut records = self.list_all();
        let Some(slot) = records.iter_mut().find(|r| r.id == record.id) else {
            tracing::debug!(id = %record.id, "Update skipped, no check-in with this id");
            return false;
        };

        tracing::info!(id = %record.id, "Updating check-in");
        *slot = record;
        self.persist(&records);
        true
    }

    /// Removes the record with `id` if present. The collection is rewritten
    /// either way. Returns whether a record was removed.
    pub fn delete(&self, id: &str) -> bool {
        let mut records = self.list_all();
        let before = records.len();
        records.retain(|r| r.id != id);
        let removed = records.len() != before;

        tracing::info!(id = %id, removed, "Deleting check-in");
        self.persist(&records);
        removed
    }

    /// Writes `records` as CSV through `sink`. The snapshot is the caller's,
    /// not a fresh read, so the export matches what the caller displayed.
    pub fn export_csv(
        &self,
        records: &[CheckInRecord],
        sink: &impl DownloadSink,
        today: NaiveDate,
    ) -> AppResult<ExportResponse> {
        export::export_csv(records, sink, today)
    }

    pub fn status(&self) -> StoreStatus {
        let (readable, record_count, error) = match self.read() {
            Ok(records) => (true, records.len(), None),
            Err(e) => (false, 0, Some(e.to_string())),
        };
        StoreStatus {
            backend: self.backend.describe(),
            key: self.key.clone(),
            readable,
            record_count,
            error,
        }
    }

    fn read(&self) -> AppResult<Vec<CheckInRecord>> {
        match self.backend.get(&self.key)? {
            Some(blob) => Ok(serde_json::from_str(&blob)?),
            None => Ok(Vec::new()),
        }
    }

    fn persist(&self, records: &[CheckInRecord]) {
        let result = serde_json::to_string(records)
            .map_err(Into::into)
            .and_then(|blob| self.backend.set(&self.key, &blob));

        if let Err(e) = result {
            tracing::error!(
                error = %e,
                backend = %self.backend.describe(),
                key = %self.key,
                "Error saving check-ins, previous collection retained"
            );
        }
    }
}

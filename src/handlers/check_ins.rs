use validator::Validate;

use crate::db::{KeyValueBackend, RecordStore};
use crate::dto::{CheckInInput, CheckInPatch, DeleteResponse};
use crate::error::{AppError, AppResult};
use crate::models::check_in::CheckInRecord;
use crate::providers::{Clock, IdGenerator};

pub fn list<B: KeyValueBackend>(store: &RecordStore<B>) -> Vec<CheckInRecord> {
    store.list_all()
}

pub fn get<B: KeyValueBackend>(store: &RecordStore<B>, id: &str) -> AppResult<CheckInRecord> {
    store
        .list_all()
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Check-in {} not found", id)))
}

/// Validates the form, stamps a fresh id and creation time, and saves.
pub fn submit<B: KeyValueBackend>(
    store: &RecordStore<B>,
    input: CheckInInput,
    clock: &impl Clock,
    ids: &impl IdGenerator,
) -> AppResult<CheckInRecord> {
    let input = input.normalized();
    input.validate()?;

    let record = input.into_record(ids.next_id(), clock.now_millis());
    store.create(record.clone());
    Ok(record)
}

/// Applies `patch` over the stored record, re-validates the merged form and
/// replaces the record in place.
pub fn edit<B: KeyValueBackend>(
    store: &RecordStore<B>,
    id: &str,
    patch: CheckInPatch,
) -> AppResult<CheckInRecord> {
    let existing = get(store, id)?;

    let input = patch.over(CheckInInput::from(&existing)).normalized();
    input.validate()?;

    let updated = input.apply_to(&existing);
    if !store.update(updated.clone()) {
        // deleted between the read and the write
        return Err(AppError::NotFound(format!("Check-in {} not found", id)));
    }
    Ok(updated)
}

pub fn remove<B: KeyValueBackend>(store: &RecordStore<B>, id: &str) -> DeleteResponse {
    let deleted = store.delete(id);
    DeleteResponse {
        deleted,
        id: id.to_string(),
    }
}

//! Persistence backends for the check-in collection.
//!
//! The store only ever reads and writes one serialized blob per key, so a
//! backend is nothing more than get/set on strings. Every `set` replaces the
//! previous value for that key in full.

pub mod file;
pub mod memory;
pub mod store;

use crate::error::AppResult;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use store::{RecordStore, StoreStatus};

pub trait KeyValueBackend {
    /// Returns `Ok(None)` when nothing has been stored under `key` yet.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Human-readable location, used in logs and the status report.
    fn describe(&self) -> String;
}

//! Team check-ins: a local record store for periodic stress/morale check-ins
//! and the time-series aggregation behind the dashboard chart.

pub mod aggregate;
pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod export;
pub mod handlers;
pub mod models;
pub mod providers;

pub use aggregate::aggregate;
pub use db::{FileBackend, KeyValueBackend, MemoryBackend, RecordStore};
pub use error::{AppError, AppResult};
pub use models::check_in::{ChartPoint, CheckInRecord, Metric};

//! Clock and id sources used by the submission and export flows.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

pub trait Clock {
    fn now_millis(&self) -> i64;

    /// Current calendar date, used for the default form date and the export
    /// file name.
    fn today(&self) -> NaiveDate;
}

pub trait IdGenerator {
    fn next_id(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub millis: i64,
    pub date: NaiveDate,
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.millis
    }

    fn today(&self) -> NaiveDate {
        self.date
    }
}

//! # Team Check-ins — input and output shapes
//!
//! Conventions:
//! - `*Input` / `*Patch` → what the submission and edit flows accept
//! - `*Response` / `*Summary` → what the CLI prints with `--json`
//! - Input validation is expressed via `validator` derive macros; the record
//!   store trusts whatever reaches it

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::check_in::{parse_calendar_date, ChartPoint, CheckInRecord, Metric};

/// Rating at which a reason for the stress becomes mandatory.
pub const MAX_LEVEL: i32 = 5;

// ============================================================================
// Check-ins
// ============================================================================

/// Form payload for submitting or editing a check-in.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_stress_reason", skip_on_field_errors = false))]
pub struct CheckInInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    /// `YYYY-MM-DD`
    #[validate(length(min = 1, message = "Date is required"))]
    #[validate(custom = "validate_date")]
    pub date: String,

    #[validate(length(min = 1, message = "Activities since last check-in are required"))]
    pub activities_since: String,

    #[validate(length(min = 1, message = "Planned activities are required"))]
    pub activities_planned: String,

    #[serde(default)]
    pub blockers: String,

    #[validate(range(min = 1, max = 5, message = "Stress level must be 1-5"))]
    pub stress_level: i32,

    /// Only kept when `stress_level` is 5.
    #[serde(default)]
    pub why_stressed: Option<String>,

    #[validate(range(min = 1, max = 5, message = "Morale level must be 1-5"))]
    pub morale_level: i32,
}

impl CheckInInput {
    /// Trims text fields and drops a stress reason that does not apply.
    pub fn normalized(self) -> Self {
        let stress_level = self.stress_level;
        Self {
            name: self.name.trim().to_string(),
            date: self.date.trim().to_string(),
            activities_since: self.activities_since.trim().to_string(),
            activities_planned: self.activities_planned.trim().to_string(),
            blockers: self.blockers.trim().to_string(),
            stress_level,
            why_stressed: self
                .why_stressed
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty() && stress_level == MAX_LEVEL),
            morale_level: self.morale_level,
        }
    }

    pub fn into_record(self, id: String, timestamp: i64) -> CheckInRecord {
        CheckInRecord {
            id,
            name: self.name,
            date: self.date,
            activities_since: self.activities_since,
            activities_planned: self.activities_planned,
            blockers: self.blockers,
            stress_level: self.stress_level,
            why_stressed: self.why_stressed,
            morale_level: self.morale_level,
            timestamp,
        }
    }

    /// Replaces every editable field of `existing`; `id` and `timestamp`
    /// are carried over.
    pub fn apply_to(self, existing: &CheckInRecord) -> CheckInRecord {
        self.into_record(existing.id.clone(), existing.timestamp)
    }
}

impl From<&CheckInRecord> for CheckInInput {
    fn from(record: &CheckInRecord) -> Self {
        Self {
            name: record.name.clone(),
            date: record.date.clone(),
            activities_since: record.activities_since.clone(),
            activities_planned: record.activities_planned.clone(),
            blockers: record.blockers.clone(),
            stress_level: record.stress_level,
            why_stressed: record.why_stressed.clone(),
            morale_level: record.morale_level,
        }
    }
}

/// Partial edit: unset fields keep the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInPatch {
    pub name: Option<String>,
    pub date: Option<String>,
    pub activities_since: Option<String>,
    pub activities_planned: Option<String>,
    pub blockers: Option<String>,
    pub stress_level: Option<i32>,
    pub why_stressed: Option<String>,
    pub morale_level: Option<i32>,
}

impl CheckInPatch {
    pub fn over(self, mut base: CheckInInput) -> CheckInInput {
        if let Some(v) = self.name {
            base.name = v;
        }
        if let Some(v) = self.date {
            base.date = v;
        }
        if let Some(v) = self.activities_since {
            base.activities_since = v;
        }
        if let Some(v) = self.activities_planned {
            base.activities_planned = v;
        }
        if let Some(v) = self.blockers {
            base.blockers = v;
        }
        if let Some(v) = self.stress_level {
            base.stress_level = v;
        }
        if self.why_stressed.is_some() {
            base.why_stressed = self.why_stressed;
        }
        if let Some(v) = self.morale_level {
            base.morale_level = v;
        }
        base
    }
}

fn validate_date(date: &str) -> Result<(), ValidationError> {
    if date.is_empty() {
        // reported by the length rule
        return Ok(());
    }
    parse_calendar_date(date).map(|_| ()).map_err(|_| {
        let mut err = ValidationError::new("date");
        err.message = Some(Cow::from("Date must be a valid YYYY-MM-DD calendar date"));
        err
    })
}

fn validate_stress_reason(input: &CheckInInput) -> Result<(), ValidationError> {
    let has_reason = input
        .why_stressed
        .as_deref()
        .is_some_and(|s| !s.trim().is_empty());
    if input.stress_level == MAX_LEVEL && !has_reason {
        let mut err = ValidationError::new("why_stressed");
        err.message = Some(Cow::from(
            "Please explain why you're stressed when stress level is 5",
        ));
        return Err(err);
    }
    Ok(())
}

/// Confirmation printed after a delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: String,
}

/// Result of writing a CSV export.
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub path: String,
    pub rows: usize,
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn arrow(self) -> &'static str {
        match self {
            Trend::Up => "↗",
            Trend::Down => "↘",
            Trend::Stable => "→",
        }
    }
}

/// Stat cards plus the series behind the dashboard chart.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub metric: Metric,
    pub title: String,
    pub color: String,
    pub value_domain: (f64, f64),
    pub average: f64,
    pub latest: f64,
    pub trend: Trend,
    pub total_check_ins: usize,
    pub points: Vec<ChartPoint>,
}

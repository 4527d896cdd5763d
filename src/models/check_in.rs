use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// One submitted check-in, persisted as part of the stored collection.
///
/// Field names on the wire are camelCase; the stored JSON array uses exactly
/// these names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRecord {
    pub id: String,
    pub name: String,
    /// Calendar date as `YYYY-MM-DD`. Never carries a time or offset.
    pub date: String,
    pub activities_since: String,
    pub activities_planned: String,
    pub blockers: String,
    pub stress_level: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_stressed: Option<String>,
    pub morale_level: i32,
    /// Creation instant, milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl CheckInRecord {
    pub fn rating(&self, metric: Metric) -> i32 {
        match metric {
            Metric::Stress => self.stress_level,
            Metric::Morale => self.morale_level,
        }
    }
}

/// Rating dimension selected for charting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Stress,
    Morale,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::Stress => "Stress",
            Metric::Morale => "Morale",
        }
    }

    /// Line color handed to the chart renderer.
    pub fn color(self) -> &'static str {
        match self {
            Metric::Stress => "#ef4444",
            Metric::Morale => "#10b981",
        }
    }

    pub fn chart_title(self) -> String {
        format!("Average {} Level Over Time", self.label())
    }

    /// Display band for a single rating of this metric.
    pub fn band(self, level: i32) -> LevelBand {
        match self {
            Metric::Stress if level <= 2 => LevelBand::Good,
            Metric::Stress if level <= 3 => LevelBand::Warning,
            Metric::Stress => LevelBand::Alert,
            Metric::Morale if level >= 4 => LevelBand::Good,
            Metric::Morale if level >= 3 => LevelBand::Warning,
            Metric::Morale => LevelBand::Alert,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Stress => f.write_str("stress"),
            Metric::Morale => f.write_str("morale"),
        }
    }
}

impl FromStr for Metric {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stress" => Ok(Metric::Stress),
            "morale" => Ok(Metric::Morale),
            other => Err(AppError::Validation(format!(
                "Unknown metric '{}', expected 'stress' or 'morale'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelBand {
    Good,
    Warning,
    Alert,
}

/// Averaged rating for one calendar date. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: String,
    pub value: f64,
}

/// Parses `YYYY-MM-DD` by splitting it into year, month and day integers and
/// building the date from those components. The input is never handed to a
/// timestamp parser, so no offset can shift the day.
pub fn parse_calendar_date(s: &str) -> AppResult<NaiveDate> {
    let invalid = || AppError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date", s));

    let parts: Vec<&str> = s.trim().split('-').collect();
    let [y, m, d] = parts.as_slice() else {
        return Err(invalid());
    };

    let year: i32 = parse_component(y).ok_or_else(invalid)?;
    let month: u32 = parse_component(m).ok_or_else(invalid)?;
    let day: u32 = parse_component(d).ok_or_else(invalid)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

fn parse_component<T: FromStr>(part: &str) -> Option<T> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn sample() -> CheckInRecord {
        CheckInRecord {
            id: "1".into(),
            name: "Test User".into(),
            date: "2024-01-01".into(),
            activities_since: "Working on tests".into(),
            activities_planned: "More testing".into(),
            blockers: "None".into(),
            stress_level: 3,
            why_stressed: None,
            morale_level: 4,
            timestamp: 1_704_067_200_000,
        }
    }

    // ── parse_calendar_date ──────────────────────────────────────────────

    #[test]
    fn test_parse_calendar_date_components() {
        let date = parse_calendar_date("2025-05-29").unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 5);
        assert_eq!(date.day(), 29);
    }

    #[test]
    fn test_parse_calendar_date_edge_days() {
        for (input, y, m, d) in [
            ("2025-01-01", 2025, 1, 1),
            ("2025-12-31", 2025, 12, 31),
            ("2024-02-29", 2024, 2, 29),
        ] {
            let date = parse_calendar_date(input).unwrap();
            assert_eq!((date.year(), date.month(), date.day()), (y, m, d), "{}", input);
        }
    }

    #[test]
    fn test_parse_calendar_date_equals_component_date() {
        for (input, y, m, d) in [
            ("2025-05-29", 2025, 5, 29),
            ("2024-12-31", 2024, 12, 31),
            ("2025-01-01", 2025, 1, 1),
        ] {
            assert_eq!(
                parse_calendar_date(input).unwrap(),
                NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_parse_calendar_date_rejects_offset_timestamps() {
        // 23:30 at -05:00 is already the 30th in UTC.
        for input in ["2025-05-29T23:30:00-05:00", "2025-05-29T00:00:00+14:00"] {
            assert!(parse_calendar_date(input).is_err(), "{}", input);
        }
        assert_eq!(parse_calendar_date("2025-05-29").unwrap().day(), 29);
    }

    #[test]
    fn test_parse_calendar_date_orders_chronologically() {
        let a = parse_calendar_date("2025-05-28").unwrap();
        let b = parse_calendar_date("2025-05-29").unwrap();
        let c = parse_calendar_date("2025-05-30").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_parse_calendar_date_rejects_garbage() {
        for input in [
            "",
            "2025-02-30",
            "2023-02-29",
            "2025-13-01",
            "2025/05/29",
            "2025-05-29T00:00:00Z",
            "2025-05",
            "-2025-05-29",
            "2025-+5-29",
        ] {
            let err = parse_calendar_date(input).unwrap_err();
            assert!(matches!(err, AppError::InvalidDate(_)), "{}", input);
        }
    }

    // ── serde layout ─────────────────────────────────────────────────────

    #[test]
    fn test_record_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["activitiesSince"], "Working on tests");
        assert_eq!(json["activitiesPlanned"], "More testing");
        assert_eq!(json["stressLevel"], 3);
        assert_eq!(json["moraleLevel"], 4);
        assert!(json.get("whyStressed").is_none(), "absent reason must be omitted");
        assert!(json.get("activities_since").is_none());
    }

    #[test]
    fn test_record_deserializes_without_reason() {
        let json = r#"{"id":"7","name":"A","date":"2025-05-29","activitiesSince":"x",
            "activitiesPlanned":"y","blockers":"","stressLevel":2,"moraleLevel":5,
            "timestamp":1748476800000}"#;
        let record: CheckInRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "7");
        assert_eq!(record.why_stressed, None);
        assert_eq!(record.timestamp, 1_748_476_800_000);
    }

    // ── Metric ───────────────────────────────────────────────────────────

    #[test]
    fn test_metric_from_str() {
        assert_eq!("stress".parse::<Metric>().unwrap(), Metric::Stress);
        assert_eq!(" Morale ".parse::<Metric>().unwrap(), Metric::Morale);
        assert!("energy".parse::<Metric>().is_err());
    }

    #[test]
    fn test_metric_rating_selects_field() {
        let record = sample();
        assert_eq!(record.rating(Metric::Stress), 3);
        assert_eq!(record.rating(Metric::Morale), 4);
    }

    #[test]
    fn test_metric_bands() {
        assert_eq!(Metric::Stress.band(2), LevelBand::Good);
        assert_eq!(Metric::Stress.band(3), LevelBand::Warning);
        assert_eq!(Metric::Stress.band(4), LevelBand::Alert);
        assert_eq!(Metric::Morale.band(4), LevelBand::Good);
        assert_eq!(Metric::Morale.band(3), LevelBand::Warning);
        assert_eq!(Metric::Morale.band(2), LevelBand::Alert);
    }

    #[test]
    fn test_metric_chart_title() {
        assert_eq!(Metric::Stress.chart_title(), "Average Stress Level Over Time");
        assert_eq!(Metric::Morale.chart_title(), "Average Morale Level Over Time");
    }
}

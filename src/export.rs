//! CSV export of a check-in snapshot.
//!
//! Text columns are wrapped in double quotes but their contents are written
//! as-is: an embedded `"`, comma or newline is not escaped.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::dto::ExportResponse;
use crate::error::AppResult;
use crate::models::check_in::CheckInRecord;

pub const CSV_HEADERS: [&str; 10] = [
    "ID",
    "Name",
    "Date",
    "Activities Since",
    "Activities Planned",
    "Blockers",
    "Stress Level",
    "Why Stressed",
    "Morale Level",
    "Timestamp",
];

/// Receives a finished export, the way a browser receives a download.
pub trait DownloadSink {
    fn offer(&self, file_name: &str, contents: &str) -> AppResult<PathBuf>;
}

/// Drops downloads into a directory, overwriting a same-day export.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectorySink {
    fn offer(&self, file_name: &str, contents: &str) -> AppResult<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, contents)?;
        Ok(path)
    }
}

pub fn export_file_name(today: NaiveDate) -> String {
    format!("check-ins-{}.csv", today.format("%Y-%m-%d"))
}

/// Header plus one row per record, in the order given, joined by `\n`
/// without a trailing newline.
pub fn to_csv(records: &[CheckInRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADERS.join(","));
    lines.extend(records.iter().map(csv_row));
    lines.join("\n")
}

fn csv_row(r: &CheckInRecord) -> String {
    [
        r.id.clone(),
        quoted(&r.name),
        r.date.clone(),
        quoted(&r.activities_since),
        quoted(&r.activities_planned),
        quoted(&r.blockers),
        r.stress_level.to_string(),
        quoted(r.why_stressed.as_deref().unwrap_or("")),
        r.morale_level.to_string(),
        r.timestamp.to_string(),
    ]
    .join(",")
}

fn quoted(s: &str) -> String {
    format!("\"{}\"", s)
}

/// Serializes `records` and hands the file to `sink` as
/// `check-ins-<today>.csv`.
pub fn export_csv(
    records: &[CheckInRecord],
    sink: &impl DownloadSink,
    today: NaiveDate,
) -> AppResult<ExportResponse> {
    let file_name = export_file_name(today);
    let path = sink.offer(&file_name, &to_csv(records))?;

    tracing::info!(path = %path.display(), rows = records.len(), "Exported check-ins");
    Ok(ExportResponse {
        path: path.display().to_string(),
        rows: records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const HEADER: &str = "ID,Name,Date,Activities Since,Activities Planned,Blockers,Stress Level,Why Stressed,Morale Level,Timestamp";

    fn record() -> CheckInRecord {
        CheckInRecord {
            id: "abc".into(),
            name: "Test User".into(),
            date: "2025-05-29".into(),
            activities_since: "Working on tests".into(),
            activities_planned: "More testing".into(),
            blockers: "None".into(),
            stress_level: 5,
            why_stressed: Some("Deadline".into()),
            morale_level: 2,
            timestamp: 1_748_520_000_000,
        }
    }

    #[derive(Default)]
    struct CapturingSink(RefCell<Vec<(String, String)>>);

    impl DownloadSink for CapturingSink {
        fn offer(&self, file_name: &str, contents: &str) -> AppResult<PathBuf> {
            self.0
                .borrow_mut()
                .push((file_name.to_string(), contents.to_string()));
            Ok(PathBuf::from(file_name))
        }
    }

    #[test]
    fn test_to_csv_one_record() {
        let csv = to_csv(&[record()]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            r#"abc,"Test User",2025-05-29,"Working on tests","More testing","None",5,"Deadline",2,1748520000000"#
        );
    }

    #[test]
    fn test_to_csv_empty_reason_is_empty_quotes() {
        let mut r = record();
        r.stress_level = 2;
        r.why_stressed = None;
        let csv = to_csv(&[r]);
        assert!(csv.ends_with(r#","None",2,"",2,1748520000000"#));
    }

    #[test]
    fn test_to_csv_no_records_is_header_only() {
        assert_eq!(to_csv(&[]), HEADER);
    }

    #[test]
    fn test_to_csv_keeps_caller_order() {
        let mut second = record();
        second.id = "zzz".into();
        let mut first = record();
        first.id = "aaa".into();
        let csv = to_csv(&[second, first]);
        let ids: Vec<&str> = csv
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(ids, vec!["zzz", "aaa"]);
    }

    #[test]
    fn test_to_csv_does_not_escape_quotes() {
        let mut r = record();
        r.name = r#"Ana "AJ" Lee"#.into();
        assert!(to_csv(&[r]).contains(r#","Ana "AJ" Lee","#));
    }

    #[test]
    fn test_export_file_name() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(export_file_name(today), "check-ins-2025-01-05.csv");
    }

    #[test]
    fn test_export_csv_offers_file_to_sink() {
        let sink = CapturingSink::default();
        let today = NaiveDate::from_ymd_opt(2025, 5, 29).unwrap();
        let response = export_csv(&[record()], &sink, today).unwrap();
        assert_eq!(response.rows, 1);

        let offered = sink.0.borrow();
        assert_eq!(offered.len(), 1);
        assert_eq!(offered[0].0, "check-ins-2025-05-29.csv");
        assert!(offered[0].1.starts_with(HEADER));
    }

    #[test]
    fn test_directory_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("downloads"));
        let path = sink.offer("check-ins-2025-05-29.csv", "ID").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "ID");
    }
}

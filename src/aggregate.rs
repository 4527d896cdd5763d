//! Time-series transform feeding the dashboard chart.

use std::collections::HashMap;

use crate::models::check_in::{parse_calendar_date, ChartPoint, CheckInRecord, Metric};

/// Fixed value-axis domain handed to the chart renderer.
pub const CHART_VALUE_DOMAIN: (f64, f64) = (1.0, 5.0);

/// Groups `records` by their exact `date` string, averages the selected
/// rating per group and returns one point per date in ascending calendar
/// order.
///
/// Dates are ordered through [`parse_calendar_date`]. A date that does not
/// parse (only possible with hand-edited storage) sorts after every valid
/// date; ties fall back to the raw string so output stays deterministic.
pub fn aggregate(records: &[CheckInRecord], metric: Metric) -> Vec<ChartPoint> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, (i64, usize)> = HashMap::new();

    for record in records {
        let entry = groups.entry(record.date.as_str()).or_insert_with(|| {
            order.push(record.date.as_str());
            (0, 0)
        });
        entry.0 += i64::from(record.rating(metric));
        entry.1 += 1;
    }

    let mut points: Vec<ChartPoint> = order
        .into_iter()
        .map(|date| {
            let (sum, count) = groups[date];
            ChartPoint {
                date: date.to_string(),
                value: sum as f64 / count as f64,
            }
        })
        .collect();

    points.sort_by_cached_key(|p| {
        let parsed = parse_calendar_date(&p.date).ok();
        (parsed.is_none(), parsed, p.date.clone())
    });
    points
}

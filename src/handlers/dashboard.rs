use crate::aggregate::{aggregate, CHART_VALUE_DOMAIN};
use crate::dto::{DashboardSummary, Trend};
use crate::models::check_in::{ChartPoint, CheckInRecord, Metric};

/// Builds the dashboard stat cards and chart series for one metric.
pub fn summarize(records: &[CheckInRecord], metric: Metric) -> DashboardSummary {
    let points = aggregate(records, metric);

    DashboardSummary {
        metric,
        title: metric.chart_title(),
        color: metric.color().to_string(),
        value_domain: CHART_VALUE_DOMAIN,
        average: average_value(&points),
        latest: latest_value(&points),
        trend: trend(&points),
        total_check_ins: records.len(),
        points,
    }
}

/// Mean of the per-date averages, so every day weighs the same.
pub fn average_value(points: &[ChartPoint]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(|p| p.value).sum::<f64>() / points.len() as f64
}

pub fn latest_value(points: &[ChartPoint]) -> f64 {
    points.last().map(|p| p.value).unwrap_or(0.0)
}

pub fn trend(points: &[ChartPoint]) -> Trend {
    match points {
        [.., previous, latest] if latest.value > previous.value => Trend::Up,
        [.., previous, latest] if latest.value < previous.value => Trend::Down,
        _ => Trend::Stable,
    }
}

//! Chart series
//!
//! The renderer only ever sees `{ label, value }` pairs. Pages build these
//! from their in-memory collections and never read anything back.

use serde::{Deserialize, Serialize};

/// One labelled value in a bar, line, area or pie series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Sum of all values in a series
pub fn series_total(series: &[ChartPoint]) -> f64 {
    series.iter().map(|p| p.value).sum()
}

/// Mean of a series, `None` when empty
pub fn series_average(series: &[ChartPoint]) -> Option<f64> {
    if series.is_empty() {
        None
    } else {
        Some(series_total(series) / series.len() as f64)
    }
}

/// Render fractional hours as `3h 30m`
pub fn format_hours(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round().max(0.0) as u64;
    let (h, m) = (total_minutes / 60, total_minutes % 60);

    match (h, m) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

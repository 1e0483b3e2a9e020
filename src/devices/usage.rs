//! Today's app usage (mock)

use super::limits::LimitCategory;
use crate::chart::{series_total, ChartPoint};
use serde::Serialize;

/// Hours spent in one app today
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AppUsage {
    pub app: String,
    pub category: LimitCategory,
    pub hours: f64,
    /// Bar colour hint for the renderer
    pub color: String,
}

impl AppUsage {
    fn new(app: &str, category: LimitCategory, hours: f64, color: &str) -> Self {
        Self {
            app: app.to_string(),
            category,
            hours,
            color: color.to_string(),
        }
    }
}

/// Usage shown on the devices page
pub fn mock_usage() -> Vec<AppUsage> {
    vec![
        AppUsage::new("Roblox", LimitCategory::Gaming, 1.5, "#d946ef"),
        AppUsage::new("YouTube", LimitCategory::Social, 1.2, "#ef4444"),
        AppUsage::new("Minecraft", LimitCategory::Gaming, 0.8, "#22c55e"),
        AppUsage::new("TikTok", LimitCategory::Social, 0.5, "#000000"),
        AppUsage::new("Education", LimitCategory::Education, 1.0, "#3b82f6"),
    ]
}

/// One bar per app
pub fn usage_by_app(usage: &[AppUsage]) -> Vec<ChartPoint> {
    usage
        .iter()
        .map(|u| ChartPoint::new(u.app.clone(), u.hours))
        .collect()
}

/// Hours summed per category, categories with no usage omitted
pub fn usage_by_category(usage: &[AppUsage]) -> Vec<ChartPoint> {
    LimitCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let hours: f64 = usage
                .iter()
                .filter(|u| u.category == category)
                .map(|u| u.hours)
                .sum();
            (hours > 0.0).then(|| ChartPoint::new(category.label(), hours))
        })
        .collect()
}

pub fn total_hours(usage: &[AppUsage]) -> f64 {
    series_total(&usage_by_app(usage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_by_category_sums() {
        let series = usage_by_category(&mock_usage());
        let gaming = series.iter().find(|p| p.label == "Gaming Apps").unwrap();
        let social = series.iter().find(|p| p.label == "Social Media").unwrap();

        assert!((gaming.value - 2.3).abs() < 1e-9);
        assert!((social.value - 1.7).abs() < 1e-9);
        assert!(series.iter().all(|p| p.label != "Total Screen Time"));
    }

    #[test]
    fn test_usage_by_app_keeps_order() {
        let labels: Vec<String> = usage_by_app(&mock_usage())
            .into_iter()
            .map(|p| p.label)
            .collect();
        assert_eq!(labels, ["Roblox", "YouTube", "Minecraft", "TikTok", "Education"]);
    }

    #[test]
    fn test_total_hours() {
        assert!((total_hours(&mock_usage()) - 5.0).abs() < 1e-9);
    }
}

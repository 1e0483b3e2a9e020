//! Dashboard Overview
//!
//! Static summary cards and the weekly screen-time chart. Independent of the
//! other pages: nothing here reads the store.

use crate::chart::{format_hours, series_average, ChartPoint};
use serde::Serialize;

/// One summary card
#[derive(Debug, Clone, Serialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub detail: String,
    pub badge: String,
}

/// Everything the dashboard shows
#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    pub greeting: String,
    pub cards: Vec<StatCard>,
    pub weekly_screen_time: Vec<ChartPoint>,
}

/// Hours of screen time per weekday
pub fn weekly_screen_time() -> Vec<ChartPoint> {
    [
        ("Mon", 2.5),
        ("Tue", 3.8),
        ("Wed", 1.5),
        ("Thu", 4.2),
        ("Fri", 3.0),
        ("Sat", 5.5),
        ("Sun", 4.0),
    ]
    .into_iter()
    .map(|(day, hours)| ChartPoint::new(day, hours))
    .collect()
}

/// Change in screen time against the previous week, percent
const SCREEN_TIME_TREND_PCT: i32 = -12;
const FOCUS_STREAK_DAYS: u32 = 12;

impl DashboardOverview {
    pub fn build() -> Self {
        let weekly = weekly_screen_time();
        let average = series_average(&weekly).unwrap_or(0.0);

        let cards = vec![
            StatCard {
                title: "Focus Streak".to_string(),
                value: format!("{} days", FOCUS_STREAK_DAYS),
                detail: "Consistent Routine".to_string(),
                badge: "Best streak this month!".to_string(),
            },
            StatCard {
                title: "Next Medication".to_string(),
                value: "Ritalin 10mg".to_string(),
                detail: "Scheduled dose".to_string(),
                badge: "Upcoming in 45m".to_string(),
            },
            StatCard {
                title: "Screen Time".to_string(),
                value: format!("Avg {} / day", format_hours(average)),
                detail: "Across all devices".to_string(),
                badge: format!("{:+}% vs last week", SCREEN_TIME_TREND_PCT),
            },
            StatCard {
                title: "Recent Alert".to_string(),
                value: "Content Blocked".to_string(),
                detail: "Roblox chat filter triggered.".to_string(),
                badge: "10:23 AM Today".to_string(),
            },
        ];

        Self {
            greeting: "Welcome back, Sarah. Here's how Leo is doing today.".to_string(),
            cards,
            weekly_screen_time: weekly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekly_series_has_seven_days() {
        let series = weekly_screen_time();
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].label, "Mon");
        assert_eq!(series[6].label, "Sun");
    }

    #[test]
    fn test_screen_time_card_average() {
        let overview = DashboardOverview::build();
        let card = overview
            .cards
            .iter()
            .find(|c| c.title == "Screen Time")
            .unwrap();

        assert_eq!(card.value, "Avg 3h 30m / day");
        assert_eq!(card.badge, "-12% vs last week");
    }
}

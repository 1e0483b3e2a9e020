//! Activities Page
//!
//! Upcoming sports and local recommendations (mock).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Sport,
    Creative,
    Educational,
    Outdoor,
}

/// A scheduled activity
#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub id: u32,
    pub title: &'static str,
    pub time: &'static str,
    pub location: &'static str,
    pub kind: ActivityKind,
    pub attendees: u32,
}

/// Something nearby worth trying
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub kind: ActivityKind,
    pub distance: &'static str,
    pub rating: f32,
}

pub fn upcoming_activities() -> Vec<Activity> {
    vec![
        Activity {
            id: 1,
            title: "Soccer Practice",
            time: "Today, 4:00 PM",
            location: "Central Park Fields",
            kind: ActivityKind::Sport,
            attendees: 12,
        },
        Activity {
            id: 2,
            title: "Swimming Class",
            time: "Saturday, 10:00 AM",
            location: "City Aquatic Center",
            kind: ActivityKind::Sport,
            attendees: 6,
        },
    ]
}

/// Recommendations, best rated first
pub fn recommendations() -> Vec<Recommendation> {
    let mut recs = vec![
        Recommendation {
            id: 1,
            title: "Family Hiking Trail",
            description: "A moderate 2-mile trail perfect for kids. Great for burning energy!",
            kind: ActivityKind::Outdoor,
            distance: "2.5 miles away",
            rating: 4.8,
        },
        Recommendation {
            id: 2,
            title: "Science Museum Workshop",
            description: "Interactive robotics workshop for ages 8-12.",
            kind: ActivityKind::Educational,
            distance: "5 miles away",
            rating: 4.9,
        },
    ];
    recs.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    recs
}

//! Recent interventions feed (mock)

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterventionKind {
    Block,
    Suggestion,
    Alert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Something the assistant did or flagged on its own
#[derive(Debug, Clone, Serialize)]
pub struct Intervention {
    pub id: u32,
    pub kind: InterventionKind,
    pub title: &'static str,
    pub description: &'static str,
    pub time: &'static str,
    pub severity: Severity,
}

impl Intervention {
    /// Medium-severity items offer a "Discuss with Guardian" follow-up
    pub fn discussable(&self) -> bool {
        self.severity == Severity::Medium
    }
}

pub fn recent_interventions() -> Vec<Intervention> {
    vec![
        Intervention {
            id: 1,
            kind: InterventionKind::Block,
            title: "Content Filter Triggered",
            description: "Blocked a YouTube video with flagged keywords.",
            time: "10:23 AM",
            severity: Severity::Medium,
        },
        Intervention {
            id: 2,
            kind: InterventionKind::Suggestion,
            title: "Exercise Recommendation",
            description: "Suggesting \"Soccer in the park\" due to nice weather.",
            time: "Yesterday",
            severity: Severity::Low,
        },
        Intervention {
            id: 3,
            kind: InterventionKind::Alert,
            title: "Late Night Usage",
            description: "iPad was active at 11:30 PM. Screen locked automatically.",
            time: "Yesterday",
            severity: Severity::High,
        },
    ]
}

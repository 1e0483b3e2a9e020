//! Medication data types
//!
//! - `MedicationEntry`: one scheduled dose for today
//! - `DoseStatus`: the two-state toggle a dose moves through
//! - `NewMedication`: input for adding a dose to the schedule
//! - `SideEffectReport`: a parent's observation, kept for the session

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single scheduled dose
///
/// Serialized with camelCase names; the stored blob is a JSON array of these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicationEntry {
    pub id: u32,
    pub name: String,
    pub dosage: String,
    /// Scheduled time label, e.g. `8:00 AM`
    pub time: String,
    pub taken: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Time label recorded when the dose was marked taken
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taken_at: Option<String>,
}

/// Lifecycle of one dose for the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoseStatus {
    Pending,
    Taken,
}

impl MedicationEntry {
    /// A dose that has not been taken yet
    pub fn pending(
        id: u32,
        name: impl Into<String>,
        dosage: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            dosage: dosage.into(),
            time: time.into(),
            taken: false,
            notes: None,
            taken_at: None,
        }
    }

    /// Builder method: mark as taken at a time label
    pub fn taken_at(mut self, label: impl Into<String>) -> Self {
        self.taken = true;
        self.taken_at = Some(label.into());
        self
    }

    /// Builder method: attach a note
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes = Some(note.into());
        self
    }

    pub fn status(&self) -> DoseStatus {
        if self.taken {
            DoseStatus::Taken
        } else {
            DoseStatus::Pending
        }
    }

    /// Short status for list views, driven by the `taken` flag alone
    pub fn status_label(&self) -> String {
        match (self.status(), self.taken_at.as_deref()) {
            (DoseStatus::Taken, Some(at)) => format!("✓ {}", at),
            (DoseStatus::Taken, None) => "✓".to_string(),
            (DoseStatus::Pending, _) => "pending".to_string(),
        }
    }
}

/// Schedule shown on a fresh session
pub fn default_schedule() -> Vec<MedicationEntry> {
    vec![
        MedicationEntry::pending(1, "Ritalin", "10mg", "8:00 AM")
            .note("Taken with breakfast")
            .taken_at("8:05 AM"),
        MedicationEntry::pending(2, "Vitamin D", "1000IU", "8:00 AM").taken_at("8:05 AM"),
        MedicationEntry::pending(3, "Ritalin", "10mg", "12:00 PM").note("At school with the nurse"),
        MedicationEntry::pending(4, "Ritalin", "10mg", "4:00 PM"),
    ]
}

/// Input for "Add Medication"
#[derive(Debug, Clone, Deserialize)]
pub struct NewMedication {
    pub name: String,
    pub dosage: String,
    pub time: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A logged side-effect observation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SideEffectReport {
    pub id: u32,
    pub observation: String,
    pub reported_at: NaiveDateTime,
}

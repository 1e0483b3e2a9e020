//! Medication Tracker
//!
//! Today's schedule, the taken/pending toggle and side-effect reports.

use super::types::{default_schedule, MedicationEntry, NewMedication, SideEffectReport};
use super::CelebrationHook;
use crate::chart::ChartPoint;
use crate::error::{GuardianError, GuardianResult};
use crate::store::{PersistentStore, Persisted, MEDICATION_KEY};
use crate::timer::Clock;
use serde::Serialize;
use std::sync::Arc;

/// Taken vs scheduled doses for the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Adherence {
    pub taken: usize,
    pub total: usize,
}

impl Adherence {
    /// Fraction of doses taken, 0.0 when nothing is scheduled
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.taken as f64 / self.total as f64
        }
    }

    pub fn pending(&self) -> usize {
        self.total - self.taken
    }
}

/// The medication page
pub struct MedicationTracker {
    schedule: Persisted<Vec<MedicationEntry>>,
    clock: Arc<dyn Clock>,
    celebration: Arc<dyn CelebrationHook>,
    reports: Vec<SideEffectReport>,
}

impl MedicationTracker {
    /// Load the schedule from the store, or the built-in default
    pub fn load(
        store: Arc<dyn PersistentStore>,
        clock: Arc<dyn Clock>,
        celebration: Arc<dyn CelebrationHook>,
    ) -> Self {
        let schedule = Persisted::load(store, MEDICATION_KEY, default_schedule);

        Self {
            schedule,
            clock,
            celebration,
            reports: Vec::new(),
        }
    }

    /// All doses in insertion order
    pub fn entries(&self) -> &[MedicationEntry] {
        self.schedule.get()
    }

    pub fn get(&self, id: u32) -> Option<&MedicationEntry> {
        self.entries().iter().find(|e| e.id == id)
    }

    /// Doses still to take, in schedule order
    pub fn pending(&self) -> Vec<&MedicationEntry> {
        self.entries().iter().filter(|e| !e.taken).collect()
    }

    /// Doses already taken, in schedule order
    pub fn taken(&self) -> Vec<&MedicationEntry> {
        self.entries().iter().filter(|e| e.taken).collect()
    }

    /// Flip a dose between pending and taken.
    ///
    /// Marking taken stamps the current time label and fires the celebration
    /// hook; undoing clears the stamp.
    pub fn toggle(&mut self, id: u32) -> GuardianResult<MedicationEntry> {
        let index = self
            .entries()
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| GuardianError::NotFound(format!("medication {}", id)))?;

        let label = self.clock.time_label();

        let entry = self.schedule.update(|entries| {
            let entry = &mut entries[index];
            if entry.taken {
                entry.taken = false;
                entry.taken_at = None;
            } else {
                entry.taken = true;
                entry.taken_at = Some(label);
            }
            entry.clone()
        })?;

        if entry.taken {
            tracing::info!(id, name = %entry.name, at = ?entry.taken_at, "Dose marked taken");
            self.celebration.celebrate(&entry);
        } else {
            tracing::info!(id, name = %entry.name, "Dose marked pending");
        }

        Ok(entry)
    }

    /// Append a pending dose to the schedule
    pub fn add(&mut self, new: NewMedication) -> GuardianResult<MedicationEntry> {
        let name = required(&new.name, "Medication name")?;
        let dosage = required(&new.dosage, "Dosage")?;
        let time = required(&new.time, "Scheduled time")?;

        let id = self.entries().iter().map(|e| e.id).max().unwrap_or(0) + 1;

        let mut entry = MedicationEntry::pending(id, name, dosage, time);
        entry.notes = new
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let added = entry.clone();
        self.schedule.update(|entries| entries.push(entry))?;

        tracing::info!(id, name = %added.name, time = %added.time, "Medication added");
        Ok(added)
    }

    /// Record a side-effect observation for this session
    pub fn log_side_effect(&mut self, observation: &str) -> GuardianResult<SideEffectReport> {
        let observation = required(observation, "Observation")?;

        let report = SideEffectReport {
            id: self.reports.len() as u32 + 1,
            observation: observation.to_string(),
            reported_at: self.clock.now(),
        };

        tracing::info!(id = report.id, observation = %report.observation, "Side effect reported");
        self.reports.push(report.clone());
        Ok(report)
    }

    pub fn side_effect_reports(&self) -> &[SideEffectReport] {
        &self.reports
    }

    pub fn adherence(&self) -> Adherence {
        Adherence {
            taken: self.taken().len(),
            total: self.entries().len(),
        }
    }

    /// Taken vs pending, for a pie chart
    pub fn adherence_series(&self) -> Vec<ChartPoint> {
        let adherence = self.adherence();
        vec![
            ChartPoint::new("Taken", adherence.taken as f64),
            ChartPoint::new("Pending", adherence.pending() as f64),
        ]
    }
}

fn required<'a>(value: &'a str, field: &str) -> GuardianResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(GuardianError::Validation(format!("{} cannot be empty", field)))
    } else {
        Ok(trimmed)
    }
}

//! Medication Page
//!
//! Today's doses with a reversible taken/pending toggle:
//!
//! ```text
//!   Pending ──toggle──▶ Taken      (stamps takenAt, celebrates)
//!   Taken   ──toggle──▶ Pending    (clears takenAt)
//! ```
//!
//! Nothing moves a dose on its own; a dose whose time has passed stays
//! pending until someone toggles it.

pub mod tracker;
pub mod types;

pub use tracker::{Adherence, MedicationTracker};
pub use types::{default_schedule, DoseStatus, MedicationEntry, NewMedication, SideEffectReport};

/// Side effect fired when a dose is marked taken. Fire-and-forget.
pub trait CelebrationHook: Send + Sync {
    fn celebrate(&self, entry: &MedicationEntry);
}

/// Celebrates by writing a log line
#[derive(Debug, Default, Clone, Copy)]
pub struct LogCelebration;

impl CelebrationHook for LogCelebration {
    fn celebrate(&self, entry: &MedicationEntry) {
        tracing::info!(name = %entry.name, dosage = %entry.dosage, "🎉 Dose taken, nice work!");
    }
}

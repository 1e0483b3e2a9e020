//! # Guardian
//!
//! A local parental-monitoring dashboard: medication routine, screen-time
//! limits, activities and an assistant chat, all backed by a small on-device
//! key-value store.
//!
//! ## Features
//!
//! - **Local-only state**: onboarding flag, medication schedule and device
//!   limits are whole-value blobs in a file, SQLite or in-memory store
//! - **Reversible dose toggle**: pending ⇄ taken, with a `takenAt` stamp
//! - **Advisory limits**: bounded per-category sliders, never enforced
//! - **Cancellable callbacks**: delayed work dies with the view that owns it
//!
//! ## Modules
//!
//! - [`store`]: Persistence backends and the typed read-on-init cell
//! - [`medication`]: Medication page
//! - [`devices`]: Screen-time usage and limits
//! - [`assistant`]: AI Guardian chat and interventions
//! - [`api`]: Local JSON API with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use guardian::config::TimingConfig;
//! use guardian::devices::LimitCategory;
//! use guardian::shell::Shell;
//! use guardian::store::FileStore;
//! use guardian::timer::SystemClock;
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(FileStore::open("./guardian_data")?);
//!     let shell = Shell::new(store, Arc::new(SystemClock), TimingConfig::default());
//!
//!     let mut meds = shell.medication();
//!     meds.toggle(3)?;
//!
//!     let mut limits = shell.device_limits();
//!     limits.set_limit(LimitCategory::Gaming, 3.5)?;
//!
//!     println!("{} of {} doses taken", meds.adherence().taken, meds.adherence().total);
//!     Ok(())
//! }
//! ```

pub mod activities;
pub mod api;
pub mod assistant;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod devices;
pub mod error;
pub mod logging;
pub mod medication;
pub mod onboarding;
pub mod shell;
pub mod store;
pub mod timer;

// Re-export top-level types for convenience
pub use store::{
    FileStore, MemoryStore, PersistentStore, Persisted, SqliteStore, StoreError, StoreResult,
};

pub use error::{GuardianError, GuardianResult};

pub use medication::{DoseStatus, MedicationEntry, MedicationTracker};

pub use devices::{DeviceLimits, LimitCategory};

pub use assistant::{AssistantBackend, CannedAssistant, ChatSession};

pub use onboarding::Onboarding;

pub use shell::Shell;

pub use timer::{Clock, SystemClock, ViewScope};

pub use config::{Config, ConfigError, LoggingConfig, StoreBackend, TimingConfig};

pub use api::{build_router, serve, ApiError, AppState};

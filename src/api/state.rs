//! Application State
//!
//! One instance of every page, shared by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::assistant::ChatSession;
use crate::devices::DeviceLimits;
use crate::error::GuardianResult;
use crate::medication::MedicationTracker;
use crate::onboarding::Onboarding;
use crate::shell::Shell;
use std::time::Instant;
use tokio::sync::Mutex;

/// Shared application state for all handlers
pub struct AppState {
    /// Medication page
    pub medication: Mutex<MedicationTracker>,
    /// Device limits slider state
    pub limits: Mutex<DeviceLimits>,
    /// First-run dialog
    pub onboarding: Mutex<Onboarding>,
    /// AI Guardian conversation
    pub chat: ChatSession,
    /// How long the assistant takes to answer
    pub chat_reply_delay_ms: u64,
    /// Name of the store backend, for health output
    pub store_backend: &'static str,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Build every page from the shell.
    ///
    /// Fails outside a tokio runtime when the setup dialog still has to be
    /// scheduled.
    pub fn new(shell: &Shell) -> GuardianResult<Self> {
        Ok(Self {
            medication: Mutex::new(shell.medication()),
            limits: Mutex::new(shell.device_limits()),
            onboarding: Mutex::new(shell.onboarding()?),
            chat: shell.chat(),
            chat_reply_delay_ms: shell.timing().assistant_reply_delay_ms,
            store_backend: shell.store().backend_name(),
            start_time: Instant::now(),
        })
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Cancel pending callbacks of every page
    pub async fn close(&self) {
        self.chat.close();
        self.onboarding.lock().await.close();
    }
}

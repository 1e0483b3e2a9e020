//! Application Shell
//!
//! Owns the injected collaborators (store, clock, timings) and hands each
//! page its own state. Pages never talk to each other.

use crate::assistant::{CannedAssistant, ChatSession};
use crate::config::{Config, TimingConfig};
use crate::devices::DeviceLimits;
use crate::error::GuardianResult;
use crate::medication::{LogCelebration, MedicationTracker};
use crate::onboarding::Onboarding;
use crate::store::{open_store, PersistentStore, StoreResult};
use crate::timer::{Clock, SystemClock};
use serde::Serialize;
use std::sync::Arc;

/// Entry in the navigation sidebar
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem { label: "Dashboard", path: "/" },
    NavItem { label: "Medication", path: "/medication" },
    NavItem { label: "Devices", path: "/devices" },
    NavItem { label: "Activities", path: "/activities" },
    NavItem { label: "AI Guardian", path: "/guardian" },
];

/// Page factory over one local store
#[derive(Clone)]
pub struct Shell {
    store: Arc<dyn PersistentStore>,
    clock: Arc<dyn Clock>,
    timing: TimingConfig,
}

impl Shell {
    pub fn new(store: Arc<dyn PersistentStore>, clock: Arc<dyn Clock>, timing: TimingConfig) -> Self {
        Self {
            store,
            clock,
            timing,
        }
    }

    /// Open the configured store with the system clock
    pub fn from_config(config: &Config) -> StoreResult<Self> {
        let store = open_store(&config.store)?;
        Ok(Self::new(store, Arc::new(SystemClock), config.timing.clone()))
    }

    pub fn store(&self) -> &Arc<dyn PersistentStore> {
        &self.store
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    pub fn medication(&self) -> MedicationTracker {
        MedicationTracker::load(
            Arc::clone(&self.store),
            Arc::clone(&self.clock),
            Arc::new(LogCelebration),
        )
    }

    pub fn device_limits(&self) -> DeviceLimits {
        DeviceLimits::load(Arc::clone(&self.store))
    }

    /// Fresh chat with the canned assistant
    pub fn chat(&self) -> ChatSession {
        ChatSession::new(
            Arc::new(CannedAssistant::default()),
            self.timing.assistant_reply_delay(),
        )
    }

    /// Read the onboarding flag and schedule the dialog if needed
    pub fn onboarding(&self) -> GuardianResult<Onboarding> {
        Onboarding::start(Arc::clone(&self.store), self.timing.onboarding_reveal_delay())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::LimitCategory;
    use crate::store::MemoryStore;

    fn shell() -> Shell {
        Shell::new(
            Arc::new(MemoryStore::new()),
            Arc::new(SystemClock),
            TimingConfig::default(),
        )
    }

    #[test]
    fn test_pages_share_the_store() {
        let shell = shell();

        let mut limits = shell.device_limits();
        limits.set_limit(LimitCategory::Social, 1.5).unwrap();

        let reopened = shell.device_limits();
        assert_eq!(reopened.limit(LimitCategory::Social), Some(1.5));
    }

    #[test]
    fn test_nav_items() {
        let labels: Vec<&str> = NAV_ITEMS.iter().map(|n| n.label).collect();
        assert_eq!(
            labels,
            ["Dashboard", "Medication", "Devices", "Activities", "AI Guardian"]
        );
    }
}

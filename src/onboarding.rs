//! First-run setup dialog
//!
//! On shell start-up the stored flag decides whether the dialog is ever
//! shown. Any non-empty value under the key counts as done. When nothing is
//! stored the dialog appears after a short delay; once completed the flag is
//! written and the dialog never comes back.

use crate::error::GuardianResult;
use crate::store::{PersistentStore, StoreResult, ONBOARDING_KEY};
use crate::timer::ViewScope;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// The onboarding dialog's state for one shell session
pub struct Onboarding {
    store: Arc<dyn PersistentStore>,
    completed: bool,
    visible: Arc<watch::Sender<bool>>,
    scope: ViewScope,
}

/// Whether setup already happened on this device
fn read_flag(store: &dyn PersistentStore) -> bool {
    match store.get(ONBOARDING_KEY) {
        Ok(Some(blob)) => !blob.trim().is_empty(),
        Ok(None) => false,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read onboarding flag, treating setup as pending");
            false
        }
    }
}

impl Onboarding {
    /// Read the flag and, if setup never happened, schedule the reveal.
    ///
    /// Scheduling needs a tokio runtime; without one this fails unless setup
    /// is already complete.
    pub fn start(store: Arc<dyn PersistentStore>, reveal_delay: Duration) -> GuardianResult<Self> {
        let completed = read_flag(store.as_ref());
        let (tx, _rx) = watch::channel(false);
        let visible = Arc::new(tx);
        let scope = ViewScope::new("onboarding");

        if completed {
            tracing::debug!("Onboarding already completed");
        } else {
            tracing::info!(delay_ms = reveal_delay.as_millis() as u64, "Scheduling setup dialog");
            let tx = Arc::clone(&visible);
            // Handle not kept; closing the scope is how the reveal is cancelled
            drop(scope.schedule_after(reveal_delay, async move {
                tx.send_replace(true);
            })?);
        }

        Ok(Self {
            store,
            completed,
            visible,
            scope,
        })
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether the dialog is on screen right now
    pub fn is_visible(&self) -> bool {
        *self.visible.borrow()
    }

    /// Observe the dialog appearing and disappearing
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.visible.subscribe()
    }

    /// Dismiss the dialog and remember that setup is done.
    ///
    /// The session counts as completed even when the write fails.
    pub fn complete(&mut self) -> StoreResult<()> {
        self.scope.close();
        self.visible.send_replace(false);

        if !self.completed {
            self.completed = true;
            self.store.put(ONBOARDING_KEY, "true".to_string())?;
            tracing::info!("Onboarding completed");
        }
        Ok(())
    }

    /// Tear the shell down; a reveal still pending will not happen
    pub fn close(&self) {
        self.scope.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GuardianError;
    use crate::store::MemoryStore;

    const DELAY: Duration = Duration::from_millis(1000);

    #[tokio::test(start_paused = true)]
    async fn test_dialog_appears_after_delay_then_never_again() {
        let store: Arc<dyn PersistentStore> = Arc::new(MemoryStore::new());

        let mut onboarding = Onboarding::start(store.clone(), DELAY).unwrap();
        assert!(!onboarding.is_visible());

        let mut rx = onboarding.subscribe();
        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(!onboarding.is_visible());

        rx.changed().await.unwrap();
        assert!(onboarding.is_visible());

        onboarding.complete().unwrap();
        assert!(!onboarding.is_visible());
        assert_eq!(store.get(ONBOARDING_KEY).unwrap().as_deref(), Some("true"));

        let next_session = Onboarding::start(store, DELAY).unwrap();
        assert!(next_session.is_completed());
        tokio::time::sleep(DELAY * 3).await;
        assert!(!next_session.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_before_delay_cancels_reveal() {
        let store: Arc<dyn PersistentStore> = Arc::new(MemoryStore::new());
        let onboarding = Onboarding::start(store.clone(), DELAY).unwrap();

        onboarding.close();
        tokio::time::sleep(DELAY * 2).await;
        assert!(!onboarding.is_visible());
        assert!(store.get(ONBOARDING_KEY).unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_complete_before_reveal() {
        let store: Arc<dyn PersistentStore> = Arc::new(MemoryStore::new());
        let mut onboarding = Onboarding::start(store, DELAY).unwrap();

        onboarding.complete().unwrap();
        tokio::time::sleep(DELAY * 2).await;
        assert!(!onboarding.is_visible());
        assert!(onboarding.is_completed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_any_stored_value_counts_as_done() {
        for stored in ["true", "1", "yes", "\"2026-03-02\""] {
            let store: Arc<dyn PersistentStore> =
                Arc::new(MemoryStore::with_entries([(ONBOARDING_KEY, stored)]));
            let onboarding = Onboarding::start(store, DELAY).unwrap();

            assert!(onboarding.is_completed(), "stored {:?}", stored);
            tokio::time::sleep(DELAY * 2).await;
            assert!(!onboarding.is_visible(), "stored {:?}", stored);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_stored_value_is_not_done() {
        let store: Arc<dyn PersistentStore> =
            Arc::new(MemoryStore::with_entries([(ONBOARDING_KEY, "")]));
        let onboarding = Onboarding::start(store, DELAY).unwrap();

        assert!(!onboarding.is_completed());
        tokio::time::sleep(DELAY * 2).await;
        assert!(onboarding.is_visible());
    }

    #[test]
    fn test_start_without_runtime() {
        let fresh: Arc<dyn PersistentStore> = Arc::new(MemoryStore::new());
        let err = Onboarding::start(fresh, DELAY).err().unwrap();
        assert!(matches!(err, GuardianError::Runtime(_)));

        let done: Arc<dyn PersistentStore> =
            Arc::new(MemoryStore::with_entries([(ONBOARDING_KEY, "true")]));
        let onboarding = Onboarding::start(done, DELAY).unwrap();
        assert!(onboarding.is_completed());
    }
}

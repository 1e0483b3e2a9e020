//! Clock and view-scoped scheduling
//!
//! Pages that simulate slow backends (the assistant reply, the first-run
//! dialog) schedule their callbacks on a [`ViewScope`]. Closing or dropping
//! the scope cancels every callback that has not landed yet, so nothing
//! updates a page that is gone.

use crate::error::{GuardianError, GuardianResult};
use chrono::{Local, NaiveDateTime};
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Source of the current wall-clock time
pub trait Clock: Send + Sync {
    /// Current local date and time
    fn now(&self) -> NaiveDateTime;

    /// Human-readable time of day, e.g. `8:05 AM`
    fn time_label(&self) -> String {
        time_label(&self.now())
    }
}

/// Format a time of day the way schedules display it
pub fn time_label(at: &NaiveDateTime) -> String {
    at.format("%-I:%M %p").to_string()
}

/// The machine's local clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Lifetime of one page; owns the cancellation of its scheduled callbacks
#[derive(Debug)]
pub struct ViewScope {
    name: String,
    token: CancellationToken,
}

impl ViewScope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: CancellationToken::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Token observed by every callback scheduled on this scope
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Tear the view down; pending callbacks will never run
    pub fn close(&self) {
        if !self.token.is_cancelled() {
            tracing::debug!(scope = %self.name, "Closing view scope");
            self.token.cancel();
        }
    }

    /// Run `task` after `delay` unless the scope closes first.
    ///
    /// The handle resolves to `true` when the task ran to completion and
    /// `false` when it was cancelled. Fails when called outside a tokio
    /// runtime.
    pub fn schedule_after<F>(&self, delay: Duration, task: F) -> GuardianResult<JoinHandle<bool>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            GuardianError::Runtime(format!("cannot schedule on scope '{}': {}", self.name, e))
        })?;

        let token = self.token.clone();
        let scope = self.name.clone();

        Ok(runtime.spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!(scope = %scope, "Scheduled callback cancelled");
                    false
                }
                _ = async {
                    tokio::time::sleep(delay).await;
                    task.await;
                } => true,
            }
        }))
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_time_label() {
        assert_eq!(time_label(&at(8, 5)), "8:05 AM");
        assert_eq!(time_label(&at(12, 0)), "12:00 PM");
        assert_eq!(time_label(&at(16, 30)), "4:30 PM");
        assert_eq!(time_label(&at(0, 15)), "12:15 AM");
    }

    #[test]
    fn test_fixed_clock_advance() {
        let clock = FixedClock::new(at(7, 55));
        clock.advance(chrono::Duration::minutes(10));
        assert_eq!(clock.time_label(), "8:05 AM");

        clock.set(at(14, 0));
        assert_eq!(clock.now(), at(14, 0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_callback_runs_after_delay() {
        let scope = ViewScope::new("test");
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);

        let handle = scope
            .schedule_after(Duration::from_millis(1000), async move {
                flag.store(true, Ordering::SeqCst);
            })
            .unwrap();

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(!fired.load(Ordering::SeqCst));

        assert!(handle.await.unwrap());
        assert!(fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_cancels_pending_callback() {
        let scope = ViewScope::new("test");
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);

        let handle = scope
            .schedule_after(Duration::from_millis(1000), async move {
                flag.store(true, Ordering::SeqCst);
            })
            .unwrap();

        scope.close();
        assert!(scope.is_closed());
        assert!(!handle.await.unwrap());
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_callback() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);

        let handle = {
            let scope = ViewScope::new("dropped");
            scope
                .schedule_after(Duration::from_millis(500), async move {
                    flag.store(true, Ordering::SeqCst);
                })
                .unwrap()
        };

        assert!(!handle.await.unwrap());
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[test]
    fn test_schedule_outside_runtime_is_an_error() {
        let scope = ViewScope::new("sync-caller");
        let err = scope
            .schedule_after(Duration::from_millis(10), async {})
            .unwrap_err();
        assert!(matches!(err, GuardianError::Runtime(_)));
    }
}

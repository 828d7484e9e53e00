//! One-shot timer for proactive token refresh

use crate::runtime::{self, MaybeSend};
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Holds at most one pending timer
///
/// Arming replaces and cancels whatever was pending before.
#[derive(Debug, Default)]
pub struct RefreshScheduler {
    pending: Mutex<Option<CancellationToken>>,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay` unless cancelled or re-armed first
    pub fn arm<F>(&self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + MaybeSend + 'static,
    {
        let token = CancellationToken::new();
        if let Some(previous) = self.slot().replace(token.clone()) {
            previous.cancel();
        }

        debug!(delay_secs = delay.as_secs(), "Armed token refresh timer");

        runtime::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = runtime::sleep(delay) => task.await,
            }
        });
    }

    /// Cancel the pending timer, if any
    pub fn cancel(&self) {
        if let Some(token) = self.slot().take() {
            token.cancel();
            debug!("Cancelled token refresh timer");
        }
    }

    /// Whether a timer is waiting to fire
    pub fn is_armed(&self) -> bool {
        self.slot()
            .as_ref()
            .is_some_and(|token| !token.is_cancelled())
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter_task(counter: &Arc<AtomicUsize>, value: usize) -> impl Future<Output = ()> + use<> {
        let counter = counter.clone();
        async move {
            counter.fetch_add(value, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_latest_timer_fires() {
        let scheduler = RefreshScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        scheduler.arm(Duration::from_secs(10), counter_task(&fired, 1));
        scheduler.arm(Duration::from_secs(20), counter_task(&fired, 100));

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let scheduler = RefreshScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        scheduler.arm(Duration::from_secs(5), counter_task(&fired, 1));
        assert!(scheduler.is_armed());
        scheduler.cancel();
        assert!(!scheduler.is_armed());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_waits_for_delay() {
        let scheduler = RefreshScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        scheduler.arm(Duration::from_secs(60), counter_task(&fired, 1));

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}

//! GC Scheduler Module
//!
//! Periodically invokes a GC strategy's clean operation until cancelled.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::gc::GarbageCollector;

// == Run GC ==
/// Drives the GC strategy on a fixed period until the token fires.
///
/// The first clean runs one full period after startup. Cancellation is
/// observed promptly between ticks; a clean already in progress is not
/// preempted and finishes through the cancellation checks embedded in the
/// sweep itself.
pub async fn run_gc(token: CancellationToken, gc: Arc<dyn GarbageCollector>, period: Duration) {
    info!(period_ms = period.as_millis() as u64, "GC scheduler started");

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The interval's first tick completes immediately; consume it so the
    // first clean happens one period from now.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                info!("GC scheduler stopped");
                return;
            }
            _ = ticker.tick() => {
                debug!("GC tick");
                gc.clean(&token);
            }
        }
    }
}

// == Spawn GC Task ==
/// Spawns [`run_gc`] on a background tokio task.
///
/// Returns the task's JoinHandle; cancel the token (or abort the handle)
/// during shutdown.
pub fn spawn_gc_task(
    gc: Arc<dyn GarbageCollector>,
    period: Duration,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(run_gc(token, gc, period))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingGc {
        cleans: AtomicUsize,
    }

    impl CountingGc {
        fn new() -> Self {
            Self {
                cleans: AtomicUsize::new(0),
            }
        }

        fn cleans(&self) -> usize {
            self.cleans.load(Ordering::SeqCst)
        }
    }

    impl GarbageCollector for CountingGc {
        fn clean(&self, _token: &CancellationToken) {
            self.cleans.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_run_gc_invokes_clean_periodically() {
        let gc = Arc::new(CountingGc::new());
        let token = CancellationToken::new();

        let handle = spawn_gc_task(
            gc.clone() as Arc<dyn GarbageCollector>,
            Duration::from_millis(20),
            token.clone(),
        );

        tokio::time::sleep(Duration::from_millis(110)).await;
        token.cancel();
        handle.await.unwrap();

        let cleans = gc.cleans();
        assert!(cleans >= 2, "expected several cleans, got {}", cleans);
    }

    #[tokio::test]
    async fn test_run_gc_does_not_clean_before_first_period() {
        let gc = Arc::new(CountingGc::new());
        let token = CancellationToken::new();

        let handle = spawn_gc_task(
            gc.clone() as Arc<dyn GarbageCollector>,
            Duration::from_secs(60),
            token.clone(),
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
        handle.await.unwrap();

        assert_eq!(gc.cleans(), 0);
    }

    #[tokio::test]
    async fn test_run_gc_exits_promptly_on_cancel() {
        let gc = Arc::new(CountingGc::new());
        let token = CancellationToken::new();

        let handle = spawn_gc_task(
            gc.clone() as Arc<dyn GarbageCollector>,
            Duration::from_secs(60),
            token.clone(),
        );

        token.cancel();
        // Exits between ticks without waiting for the long period.
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("scheduler did not stop after cancellation")
            .unwrap();
    }
}

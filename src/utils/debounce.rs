//! Settle-window debounce
//!
//! Delays an action until input has settled for a fixed window. Scheduling a
//! new action cancels any previously scheduled one, so only the last call in
//! a burst fires. Used for lookups triggered by fast-changing input, e.g.
//! hover dictionary queries.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

pub struct Debounce {
    delay: Duration,
    scheduled: Option<JoinHandle<()>>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            scheduled: None,
        }
    }

    /// Schedule an action to run after the settle window, cancelling any
    /// previously scheduled action
    pub fn call<F, Fut>(&mut self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        self.cancel();
        let delay = self.delay;
        self.scheduled = Some(tokio::spawn(async move {
            sleep(delay).await;
            action().await;
        }));
    }

    /// Drop whatever is currently scheduled without running it
    pub fn cancel(&mut self) {
        if let Some(task) = self.scheduled.take() {
            task.abort();
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
            .as_ref()
            .map(|t| !t.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for Debounce {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_settle_window() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debounce = Debounce::new(Duration::from_millis(200));

        let counter = Arc::clone(&fired);
        debounce.call(move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        sleep(Duration::from_millis(300)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_fires_only_last() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debounce = Debounce::new(Duration::from_millis(200));

        for _ in 0..5 {
            let counter = Arc::clone(&fired);
            debounce.call(move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });
            sleep(Duration::from_millis(50)).await;
        }

        sleep(Duration::from_millis(300)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debounce = Debounce::new(Duration::from_millis(200));

        let counter = Arc::clone(&fired);
        debounce.call(move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        debounce.cancel();

        sleep(Duration::from_millis(500)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(!debounce.is_scheduled());
    }
}

// Background tasks with an explicit lifecycle
//
// Recurring timers (scroll keep-alive, status bar ticks, idle log generator)
// and one-shot delays (logout) are owned values: `stop()` or dropping the
// handle cancels the task.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::trace;

pub struct BackgroundTask {
    name: &'static str,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl BackgroundTask {
    /// Run `task` until it finishes or the handle is stopped.
    pub fn spawn<F, Fut>(name: &'static str, task: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let fut = task(token.clone());
        let cancelled = token.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                _ = fut => {}
            }
        });
        trace!(task = name, "Background task started");
        Self {
            name,
            token,
            handle,
        }
    }

    /// Call `tick` every `period`, starting immediately.
    pub fn every<F>(name: &'static str, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        Self::spawn(name, move |_| async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                tick();
            }
        })
    }

    /// Call `f` once after `delay`.
    pub fn after<F>(name: &'static str, delay: Duration, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::spawn(name, move |_| async move {
            tokio::time::sleep(delay).await;
            f();
        })
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn stop(&self) {
        if !self.token.is_cancelled() {
            trace!(task = self.name, "Background task stopped");
            self.token.cancel();
        }
    }
}

impl Drop for BackgroundTask {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_every_ticks_until_stopped() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let task = BackgroundTask::every("tick", Duration::from_millis(100), move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(350)).await;
        task.stop();
        let seen = count.load(Ordering::SeqCst);
        assert_eq!(seen, 4); // t = 0, 100, 200, 300

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(count.load(Ordering::SeqCst), seen);
        assert!(!task.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_after_fires_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let _task = BackgroundTask::after("once", Duration::from_secs(1), move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let task = BackgroundTask::after("dropped", Duration::from_secs(1), move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        drop(task);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}

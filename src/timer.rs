// Owned handle to a scheduled task.
// Dropping the handle aborts the task, so a timer can never outlive its owner.

use std::future::Future;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug)]
pub struct TimerHandle {
    name: &'static str,
    task: Option<JoinHandle<()>>,
}

impl TimerHandle {
    pub fn spawn<F>(runtime: &Handle, name: &'static str, task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        debug!(timer = name, "Scheduling timer");
        Self {
            name,
            task: Some(runtime.spawn(task)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    // Fired timers and cancelled timers both count as inactive
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                debug!(timer = self.name, "Cancelling timer");
            }
            task.abort();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);

        let timer = TimerHandle::spawn(&Handle::current(), "test", async move {
            sleep(Duration::from_millis(100)).await;
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(timer.is_active());

        sleep(Duration::from_millis(150)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!timer.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_and_drop_release_the_task() {
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        let mut cancelled = TimerHandle::spawn(&Handle::current(), "cancelled", async move {
            sleep(Duration::from_millis(100)).await;
            counter.fetch_add(1, Ordering::SeqCst);
        });
        cancelled.cancel();
        assert!(!cancelled.is_active());

        let counter = Arc::clone(&fired);
        let dropped = TimerHandle::spawn(&Handle::current(), "dropped", async move {
            sleep(Duration::from_millis(100)).await;
            counter.fetch_add(1, Ordering::SeqCst);
        });
        drop(dropped);

        sleep(Duration::from_millis(500)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}

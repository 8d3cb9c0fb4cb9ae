// Deals carousel: an index over N slides with timed autoplay.
// Autoplay only runs while the carousel is mounted.

use crate::timer::TimerHandle;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Position {
    index: usize,
    len: usize,
}

impl Position {
    fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    fn previous(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }
}

pub struct Carousel {
    position: Arc<Mutex<Position>>,
    autoplay: Mutex<Option<TimerHandle>>,
    interval: Duration,
    runtime: Handle,
}

impl Carousel {
    pub fn new(runtime: Handle, slide_count: usize, interval: Duration) -> Self {
        Self {
            position: Arc::new(Mutex::new(Position {
                index: 0,
                len: slide_count,
            })),
            autoplay: Mutex::new(None),
            interval,
            runtime,
        }
    }

    pub fn index(&self) -> usize {
        self.position.lock().index
    }

    pub fn len(&self) -> usize {
        self.position.lock().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn next(&self) -> usize {
        let mut position = self.position.lock();
        position.next();
        position.index
    }

    pub fn previous(&self) -> usize {
        let mut position = self.position.lock();
        position.previous();
        position.index
    }

    pub fn is_mounted(&self) -> bool {
        self.autoplay.lock().as_ref().is_some_and(TimerHandle::is_active)
    }

    /// Start autoplay. Mounting an already mounted carousel keeps the running timer.
    pub fn mount(&self) {
        let mut autoplay = self.autoplay.lock();
        if autoplay.as_ref().is_some_and(TimerHandle::is_active) {
            return;
        }

        let position = Arc::downgrade(&self.position);
        let period = self.interval;
        debug!(period_ms = period.as_millis() as u64, "Mounting carousel autoplay");
        *autoplay = Some(TimerHandle::spawn(&self.runtime, "carousel-autoplay", async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(position) = position.upgrade() else {
                    break;
                };
                position.lock().next();
            }
        }));
    }

    pub fn unmount(&self) {
        if let Some(mut timer) = self.autoplay.lock().take() {
            debug!("Unmounting carousel autoplay");
            timer.cancel();
        }
    }
}

// Single-slot toast notifications.
// A new toast replaces the visible one and restarts the dismiss timer; nothing is queued.

use crate::timer::TimerHandle;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::time::sleep;
use tracing::debug;

const EVENT_CAPACITY: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastEvent {
    Shown(String),
    Dismissed,
}

#[derive(Debug, Default)]
struct ToastSlot {
    message: Option<String>,
    // Bumped on every show so a late timer cannot clear a newer toast
    generation: u64,
}

pub struct ToastManager {
    slot: Arc<Mutex<ToastSlot>>,
    timer: Mutex<Option<TimerHandle>>,
    duration: Duration,
    runtime: Handle,
    events: broadcast::Sender<ToastEvent>,
}

impl ToastManager {
    pub fn new(runtime: Handle, duration: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            slot: Arc::new(Mutex::new(ToastSlot::default())),
            timer: Mutex::new(None),
            duration,
            runtime,
            events,
        }
    }

    pub fn show(&self, message: impl Into<String>) {
        let message = message.into();
        let mut timer = self.timer.lock();
        if let Some(mut pending) = timer.take() {
            pending.cancel();
        }

        let generation = {
            let mut slot = self.slot.lock();
            slot.generation += 1;
            slot.message = Some(message.clone());
            slot.generation
        };
        debug!(toast = %message, "Showing toast");
        let _ = self.events.send(ToastEvent::Shown(message));

        let slot = Arc::downgrade(&self.slot);
        let events = self.events.clone();
        let duration = self.duration;
        *timer = Some(TimerHandle::spawn(&self.runtime, "toast-dismiss", async move {
            sleep(duration).await;

            let Some(slot) = slot.upgrade() else {
                return;
            };
            let mut slot = slot.lock();
            if slot.generation == generation {
                slot.message = None;
                let _ = events.send(ToastEvent::Dismissed);
            }
        }));
    }

    pub fn current(&self) -> Option<String> {
        self.slot.lock().message.clone()
    }

    pub fn is_showing(&self) -> bool {
        self.slot.lock().message.is_some()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ToastEvent> {
        self.events.subscribe()
    }

    pub fn has_pending_timer(&self) -> bool {
        self.timer.lock().as_ref().is_some_and(TimerHandle::is_active)
    }

    // Releases the dismiss timer; called on session teardown
    pub fn shutdown(&self) {
        if let Some(mut pending) = self.timer.lock().take() {
            pending.cancel();
        }
    }
}

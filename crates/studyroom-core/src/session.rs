//! A countdown session: one engine plus the tick task that drives it.
//!
//! The session holds at most one [`TickHandle`]. It acquires one when the
//! countdown starts and releases it on pause, stop, complete, reset and drop,
//! so a tick task exists only while `is_running && remaining > 0`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::error::ValidationError;
use crate::events::Event;
use crate::timer::{CountdownTimer, SharedTimer, TickHandle};

const EVENT_CAPACITY: usize = 64;

pub struct TimerSession {
    timer: SharedTimer,
    ticker: Option<TickHandle>,
    events: broadcast::Sender<Event>,
}

impl TimerSession {
    /// # Errors
    /// Returns an error when `total_secs` is zero.
    pub fn new(total_secs: u64) -> Result<Self, ValidationError> {
        let engine = CountdownTimer::new(total_secs)?;
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            timer: Arc::new(Mutex::new(engine)),
            ticker: None,
            events,
        })
    }

    /// Receive every event this session publishes from now on, including
    /// per-tick snapshots.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Copy of the engine's current state.
    pub fn timer(&self) -> CountdownTimer {
        self.lock().clone()
    }

    pub fn snapshot(&self) -> Event {
        self.lock().snapshot()
    }

    /// True while a tick task is alive.
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start or resume the countdown and spawn its tick task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&mut self) -> Option<Event> {
        let event = self.lock().start()?;
        self.release_ticker();
        self.ticker = Some(TickHandle::spawn(
            Arc::clone(&self.timer),
            self.events.clone(),
        ));
        info!(kind = event.kind(), "countdown started");
        Some(self.publish(event))
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.release_ticker();
        let event = self.lock().pause()?;
        info!(kind = event.kind(), "countdown paused");
        Some(self.publish(event))
    }

    pub fn stop(&mut self) -> Option<Event> {
        self.release_ticker();
        let event = self.lock().stop()?;
        info!(kind = event.kind(), "countdown stopped");
        Some(self.publish(event))
    }

    pub fn complete(&mut self) -> Option<Event> {
        self.release_ticker();
        let event = self.lock().complete()?;
        info!(kind = event.kind(), "session marked complete");
        Some(self.publish(event))
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.release_ticker();
        let event = self.lock().reset()?;
        info!(kind = event.kind(), "session reset");
        Some(self.publish(event))
    }

    /// Send a presentation-only event to subscribers.
    pub(crate) fn publish(&self, event: Event) -> Event {
        let _ = self.events.send(event.clone());
        event
    }

    // ── Internal ─────────────────────────────────────────────────────

    // Every engine method leaves it consistent, so a poisoned lock still
    // holds a valid engine.
    fn lock(&self) -> MutexGuard<'_, CountdownTimer> {
        self.timer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
            debug!("tick task released");
        }
    }
}

impl Drop for TimerSession {
    fn drop(&mut self) {
        self.release_ticker();
    }
}

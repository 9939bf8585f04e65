//! The once-per-second tick task.
//!
//! A [`TickHandle`] owns the spawned Tokio task that drives
//! [`CountdownTimer::tick`]. The task exits on its own once the engine stops
//! running; `cancel()` (or dropping the handle) aborts it early.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info};

use super::engine::CountdownTimer;
use crate::events::Event;

/// Engine shared between a session and its tick task.
pub type SharedTimer = Arc<Mutex<CountdownTimer>>;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct TickHandle {
    task: JoinHandle<()>,
}

impl TickHandle {
    /// Spawn the tick task on the current Tokio runtime.
    ///
    /// The first tick fires one full period after spawning.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn spawn(timer: SharedTimer, events: broadcast::Sender<Event>) -> Self {
        let task = tokio::spawn(run(timer, events));
        Self { task }
    }

    /// Abort the task. A tick already in progress finishes first because the
    /// engine lock is never held across an await point.
    pub fn cancel(self) {
        self.task.abort();
    }

    /// True once the task has exited or was aborted.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(timer: SharedTimer, events: broadcast::Sender<Event>) {
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

    loop {
        interval.tick().await;

        let (completion, snapshot) = {
            let Ok(mut engine) = timer.lock() else {
                error!("timer lock poisoned, stopping tick task");
                return;
            };
            if !engine.is_running() {
                debug!("timer no longer running, tick task exiting");
                return;
            }
            let completion = engine.tick();
            debug!(remaining_secs = engine.remaining_secs(), "tick");
            (completion, engine.snapshot())
        };

        // No subscribers is fine; the engine remains the source of truth.
        let _ = events.send(snapshot);

        if let Some(done) = completion {
            info!("countdown reached zero");
            let _ = events.send(done);
            return;
        }
    }
}

//! Countdown timer engine.
//!
//! The engine is a plain state machine over whole seconds. It does not use
//! internal threads - the owner calls `tick()` once per elapsed second while
//! the countdown runs (see [`super::ticker::TickHandle`]).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> ... -> Completed
//! Running | Paused -> Idle          (stop)
//! Running -> Completed              (tick reaching 0, or complete())
//! Completed -> Idle                 (reset, "Start New Task")
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = CountdownTimer::new(7200)?;
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event::TimerCompleted) when the countdown runs out
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;

/// Coarse state derived from the engine's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Not running, full duration remaining.
    Idle,
    Running,
    /// Not running, part of the duration already elapsed.
    Paused,
    Completed,
}

/// Core countdown engine.
///
/// `remaining_secs` stays within `0..=total_secs`, and `running` and
/// `completed` are never both set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownTimer {
    total_secs: u64,
    remaining_secs: u64,
    running: bool,
    completed: bool,
}

impl CountdownTimer {
    /// Create an idle engine with `total_secs` remaining.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidValue`] when `total_secs` is zero.
    pub fn new(total_secs: u64) -> Result<Self, ValidationError> {
        if total_secs == 0 {
            return Err(ValidationError::invalid(
                "total_duration_secs",
                "session duration must be positive",
            ));
        }
        Ok(Self {
            total_secs,
            remaining_secs: total_secs,
            running: false,
            completed: false,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        if self.completed {
            TimerState::Completed
        } else if self.running {
            TimerState::Running
        } else if self.remaining_secs == self.total_secs {
            TimerState::Idle
        } else {
            TimerState::Paused
        }
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.total_secs - self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// 0.0 .. 100.0 share of the total duration already elapsed.
    pub fn progress_pct(&self) -> f64 {
        progress_pct(self.total_secs, self.remaining_secs)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state(),
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            progress_pct: self.progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.running || self.completed {
            return None;
        }
        self.running = true;
        Some(Event::TimerStarted {
            total_secs: self.total_secs,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Abandon the countdown and rewind to the full duration.
    /// A completed session is left alone; it only leaves via `reset()`.
    pub fn stop(&mut self) -> Option<Event> {
        if self.completed {
            return None;
        }
        self.running = false;
        self.remaining_secs = self.total_secs;
        Some(Event::TimerStopped {
            total_secs: self.total_secs,
            at: Utc::now(),
        })
    }

    /// Mark the session done right now, keeping whatever time was left.
    pub fn complete(&mut self) -> Option<Event> {
        if self.completed {
            return None;
        }
        self.completed = true;
        self.running = false;
        Some(Event::TimerCompleted {
            remaining_secs: self.remaining_secs,
            manual: true,
            at: Utc::now(),
        })
    }

    /// Return to the initial idle state with the full duration.
    pub fn reset(&mut self) -> Option<Event> {
        self.completed = false;
        self.running = false;
        self.remaining_secs = self.total_secs;
        Some(Event::TimerReset {
            total_secs: self.total_secs,
            at: Utc::now(),
        })
    }

    /// Apply one elapsed second. Returns `Some(Event::TimerCompleted)` when
    /// the countdown runs out.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running || self.remaining_secs == 0 {
            return None;
        }
        if self.remaining_secs <= 1 {
            self.remaining_secs = 0;
            self.running = false;
            self.completed = true;
            return Some(Event::TimerCompleted {
                remaining_secs: 0,
                manual: false,
                at: Utc::now(),
            });
        }
        self.remaining_secs -= 1;
        None
    }
}

/// `(total - remaining) / total * 100`, clamped to `0..=100`.
pub fn progress_pct(total_secs: u64, remaining_secs: u64) -> f64 {
    if total_secs == 0 {
        return 0.0;
    }
    let elapsed = total_secs.saturating_sub(remaining_secs) as f64;
    (elapsed / total_secs as f64 * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(total: u64) -> CountdownTimer {
        let mut engine = CountdownTimer::new(total).unwrap();
        engine.start();
        engine
    }

    #[test]
    fn new_session_is_idle_and_full() {
        let engine = CountdownTimer::new(7200).unwrap();
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.remaining_secs(), 7200);
        assert!(!engine.is_running());
        assert!(!engine.is_completed());
        assert_eq!(engine.progress_pct(), 0.0);
    }

    #[test]
    fn zero_duration_is_rejected() {
        assert!(CountdownTimer::new(0).is_err());
    }

    #[test]
    fn start_pause_start() {
        let mut engine = CountdownTimer::new(60).unwrap();
        assert!(engine.start().is_some());
        assert_eq!(engine.state(), TimerState::Running);
        assert!(engine.start().is_none(), "second start is a no-op");

        engine.tick();
        assert!(engine.pause().is_some());
        assert_eq!(engine.state(), TimerState::Paused);
        assert_eq!(engine.remaining_secs(), 59);

        assert!(engine.start().is_some());
        assert_eq!(engine.state(), TimerState::Running);
    }

    #[test]
    fn pause_is_idempotent() {
        let mut engine = running(100);
        engine.tick();
        engine.pause();
        let once = engine.clone();
        assert!(engine.pause().is_none());
        assert_eq!(engine, once);
    }

    #[test]
    fn natural_completion() {
        let mut engine = running(3);
        assert!(engine.tick().is_none());
        assert!(engine.tick().is_none());
        let done = engine.tick();
        assert!(matches!(
            done,
            Some(Event::TimerCompleted { manual: false, remaining_secs: 0, .. })
        ));
        assert_eq!(engine.remaining_secs(), 0);
        assert!(!engine.is_running());
        assert!(engine.is_completed());

        let before = engine.clone();
        assert!(engine.tick().is_none());
        assert_eq!(engine, before);
        assert_eq!(engine.progress_pct(), 100.0);
    }

    #[test]
    fn stop_rewinds_to_full_duration() {
        let mut engine = running(7200);
        for _ in 0..10 {
            engine.tick();
        }
        assert_eq!(engine.remaining_secs(), 7190);
        assert!(engine.stop().is_some());
        assert_eq!(engine.remaining_secs(), 7200);
        assert!(!engine.is_running());
        assert!(!engine.is_completed());
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn manual_complete_keeps_remaining_time() {
        let mut engine = running(7200);
        for _ in 0..2200 {
            engine.tick();
        }
        assert_eq!(engine.remaining_secs(), 5000);
        let event = engine.complete();
        assert!(matches!(
            event,
            Some(Event::TimerCompleted { manual: true, remaining_secs: 5000, .. })
        ));
        assert!(engine.is_completed());
        assert!(!engine.is_running());
        assert_eq!(engine.remaining_secs(), 5000);
    }

    #[test]
    fn start_after_completion_is_ignored() {
        let mut engine = running(10);
        engine.complete();
        assert!(engine.start().is_none());
        assert!(!engine.is_running());
    }

    #[test]
    fn stop_leaves_completed_session_alone() {
        let mut engine = running(1);
        engine.tick();
        assert!(engine.stop().is_none());
        assert!(engine.is_completed());
        assert_eq!(engine.remaining_secs(), 0);
    }

    #[test]
    fn reset_after_completion_matches_fresh_engine() {
        let mut engine = running(3);
        for _ in 0..3 {
            engine.tick();
        }
        assert!(engine.is_completed());
        engine.reset();
        assert_eq!(engine, CountdownTimer::new(3).unwrap());
    }

    #[test]
    fn tick_while_idle_does_nothing() {
        let mut engine = CountdownTimer::new(5).unwrap();
        assert!(engine.tick().is_none());
        assert_eq!(engine.remaining_secs(), 5);
    }

    #[test]
    fn progress_tracks_elapsed_share() {
        let mut engine = running(200);
        for _ in 0..50 {
            engine.tick();
        }
        assert_eq!(engine.progress_pct(), 25.0);
        assert_eq!(engine.elapsed_secs(), 50);
    }

    #[test]
    fn snapshot_returns_valid_event() {
        let engine = CountdownTimer::new(7200).unwrap();
        match engine.snapshot() {
            Event::StateSnapshot {
                state,
                remaining_secs,
                total_secs,
                progress_pct,
                ..
            } => {
                assert_eq!(state, TimerState::Idle);
                assert_eq!(remaining_secs, 7200);
                assert_eq!(total_secs, 7200);
                assert_eq!(progress_pct, 0.0);
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }

    #[test]
    fn progress_pct_is_clamped() {
        assert_eq!(progress_pct(0, 0), 0.0);
        assert_eq!(progress_pct(10, 20), 0.0);
        assert_eq!(progress_pct(10, 0), 100.0);
    }
}

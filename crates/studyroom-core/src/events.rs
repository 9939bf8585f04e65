use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::display::CountdownStyle;
use crate::timer::TimerState;

/// Every state change of a timer session produces an Event.
/// The host UI renders from them; the tick task publishes snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        total_secs: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Countdown abandoned and rewound to the full duration.
    TimerStopped {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    /// `manual` is false when the countdown ran out on its own.
    TimerCompleted {
        remaining_secs: u64,
        manual: bool,
        at: DateTime<Utc>,
    },
    TimerReset {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    /// Presentation only; never touches timer state.
    StyleChanged {
        style: CountdownStyle,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        remaining_secs: u64,
        total_secs: u64,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Short machine-readable name, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::TimerStarted { .. } => "timer_started",
            Event::TimerPaused { .. } => "timer_paused",
            Event::TimerStopped { .. } => "timer_stopped",
            Event::TimerCompleted { .. } => "timer_completed",
            Event::TimerReset { .. } => "timer_reset",
            Event::StyleChanged { .. } => "style_changed",
            Event::StateSnapshot { .. } => "state_snapshot",
        }
    }

    pub fn is_completion(&self) -> bool {
        matches!(self, Event::TimerCompleted { .. })
    }
}

mod engine;
mod format;
mod ticker;

pub use engine::{progress_pct, CountdownTimer, TimerState};
pub use format::{format_time, parse_duration};
pub use ticker::{SharedTimer, TickHandle, TICK_PERIOD};

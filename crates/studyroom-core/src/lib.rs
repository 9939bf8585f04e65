//! # Studyroom Core Library
//!
//! This library provides the core logic behind the Studyroom active-task
//! panel: a countdown for the task being worked on, the task board that
//! feeds it, and the user's configuration. The `studyroom-cli` binary is a
//! thin host over the same library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A whole-second countdown state machine; the owner
//!   applies `tick()` once per elapsed second
//! - **Session**: Pairs an engine with the Tokio task that ticks it and
//!   publishes events to subscribers
//! - **Display**: Pure renderers for the digital/circle/minimal/neon styles
//! - **Tasks**: In-memory task board with per-day and per-status views
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`CountdownTimer`]: Core timer state machine
//! - [`TimerSession`]: Engine plus its scheduled tick task
//! - [`ActiveTaskPanel`]: Session plus presentation state, driven by commands
//! - [`TaskBoard`]: Task lookup and grouping
//! - [`Config`]: Application configuration management

pub mod display;
pub mod error;
pub mod events;
pub mod panel;
pub mod session;
pub mod storage;
pub mod task;
pub mod timer;

pub use display::{CountdownStyle, ViewConfig};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use panel::{ActiveTaskPanel, PanelCommand};
pub use session::TimerSession;
pub use storage::Config;
pub use task::{DayCursor, NewTask, Task, TaskBoard, TaskStatus};
pub use timer::{format_time, parse_duration, CountdownTimer, TickHandle, TimerState};

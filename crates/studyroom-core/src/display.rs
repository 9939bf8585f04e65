//! Countdown presentation.
//!
//! Everything here is a pure function of a [`CountdownTimer`] copy and a
//! read-only [`ViewConfig`]. Choosing a style never feeds back into the
//! engine.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::timer::{format_time, CountdownTimer};

/// How the countdown is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownStyle {
    #[default]
    Digital,
    Circle,
    Minimal,
    Neon,
}

impl CountdownStyle {
    pub const ALL: [CountdownStyle; 4] = [
        CountdownStyle::Digital,
        CountdownStyle::Circle,
        CountdownStyle::Minimal,
        CountdownStyle::Neon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CountdownStyle::Digital => "digital",
            CountdownStyle::Circle => "circle",
            CountdownStyle::Minimal => "minimal",
            CountdownStyle::Neon => "neon",
        }
    }

    /// Menu label shown in the style picker.
    pub fn label(&self) -> &'static str {
        match self {
            CountdownStyle::Digital => "Digital Timer",
            CountdownStyle::Circle => "Circle Progress",
            CountdownStyle::Minimal => "Minimal Style",
            CountdownStyle::Neon => "Neon Effect",
        }
    }
}

impl fmt::Display for CountdownStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CountdownStyle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CountdownStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::invalid(
                    "style",
                    format!("unknown countdown style '{s}' (expected digital, circle, minimal or neon)"),
                )
            })
    }
}

/// Task metadata shown around the countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_title() -> String {
    "Mathematics Study Session".into()
}
fn default_description() -> String {
    "Algebra and Calculus Review".into()
}
fn default_color() -> String {
    "hsl(221, 83%, 53%)".into()
}
fn default_icon() -> String {
    "📚".into()
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            color: default_color(),
            icon: default_icon(),
        }
    }
}

/// Geometry of the circle-progress ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub size: u32,
    pub radius: f64,
    pub circumference: f64,
    /// Stroke dash offset; equals the circumference at 0% and 0 at 100%.
    pub dash_offset: f64,
}

impl RingGeometry {
    pub fn new(progress_pct: f64, fullscreen: bool) -> Self {
        let size = if fullscreen { 300 } else { 200 };
        let radius = f64::from(size) / 2.0 - 10.0;
        let circumference = 2.0 * PI * radius;
        let dash_offset = circumference - (progress_pct.clamp(0.0, 100.0) / 100.0) * circumference;
        Self {
            size,
            radius,
            circumference,
            dash_offset,
        }
    }
}

/// Text progress bar such as `[#####-----]`.
pub fn progress_bar(progress_pct: f64, width: usize) -> String {
    let filled = ((progress_pct.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Whole-number percentage as shown next to the countdown.
pub fn rounded_pct(progress_pct: f64) -> u64 {
    progress_pct.clamp(0.0, 100.0).round() as u64
}

/// Render the countdown block for `style`.
pub fn render_countdown(style: CountdownStyle, timer: &CountdownTimer, fullscreen: bool) -> String {
    let remaining = format_time(timer.remaining_secs());
    let total = format_time(timer.total_secs());
    let pct = timer.progress_pct();
    let bar_width = if fullscreen { 48 } else { 30 };

    match style {
        CountdownStyle::Digital => format!(
            "{remaining}\nTotal: {total}\n{}",
            progress_bar(pct, bar_width)
        ),
        CountdownStyle::Circle => {
            let ring = RingGeometry::new(pct, fullscreen);
            format!(
                "( {remaining} )\n{}% Complete\nring: size {} r {:.1} offset {:.1}/{:.1}\nTotal: {total}",
                rounded_pct(pct),
                ring.size,
                ring.radius,
                ring.dash_offset,
                ring.circumference
            )
        }
        CountdownStyle::Minimal => format!(
            "{remaining}\n{}\n{}% of {total}",
            progress_bar(pct, bar_width),
            rounded_pct(pct)
        ),
        CountdownStyle::Neon => format!(
            "✦ {remaining} ✦\n{}\n{total} session",
            progress_bar(pct, bar_width + 2)
        ),
    }
}

/// Render the whole active-task panel: header, countdown and controls, or
/// the celebration card once the session is completed.
pub fn render_panel(
    style: CountdownStyle,
    timer: &CountdownTimer,
    view: &ViewConfig,
    fullscreen: bool,
) -> String {
    if timer.is_completed() {
        return [
            "🎉 Task Completed!",
            "Great job! You've successfully completed your study session.",
            "",
            "  [new] Start New Task",
        ]
        .join("\n");
    }

    let toggle = if timer.is_running() { "[pause]" } else { "[start]" };
    format!(
        "Active Task\n{} {}\n{}\n\n{}\n\n  {toggle} [stop] [complete]",
        view.icon,
        view.title,
        view.description,
        render_countdown(style, timer, fullscreen)
    )
}

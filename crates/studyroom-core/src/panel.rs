//! The active-task panel: one [`TimerSession`] plus its presentation state.
//!
//! User commands arrive as [`PanelCommand`]s. Timer commands go to the
//! session; style and fullscreen changes stay here and never reach the
//! engine.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use tokio::sync::broadcast;

use crate::display::{render_panel, CountdownStyle, ViewConfig};
use crate::error::ValidationError;
use crate::events::Event;
use crate::session::TimerSession;
use crate::timer::CountdownTimer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    Start,
    Pause,
    Stop,
    Complete,
    /// Dismiss a completed session ("Start New Task").
    New,
    Style(CountdownStyle),
    ToggleFullscreen,
    Status,
    Quit,
}

impl FromStr for PanelCommand {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().unwrap_or_default().to_ascii_lowercase();
        let arg = words.next();

        let command = match (verb.as_str(), arg) {
            ("start" | "s" | "resume", None) => PanelCommand::Start,
            ("pause" | "p", None) => PanelCommand::Pause,
            ("stop", None) => PanelCommand::Stop,
            ("complete" | "done" | "c", None) => PanelCommand::Complete,
            ("new" | "reset", None) => PanelCommand::New,
            ("style", Some(name)) => PanelCommand::Style(name.parse()?),
            ("fullscreen" | "f", None) => PanelCommand::ToggleFullscreen,
            ("status" | "", None) => PanelCommand::Status,
            ("quit" | "q" | "exit", None) => PanelCommand::Quit,
            _ => return Err(ValidationError::invalid("command", format!("unrecognized command '{}'", s.trim()))),
        };
        Ok(command)
    }
}

impl fmt::Display for PanelCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelCommand::Start => f.write_str("start"),
            PanelCommand::Pause => f.write_str("pause"),
            PanelCommand::Stop => f.write_str("stop"),
            PanelCommand::Complete => f.write_str("complete"),
            PanelCommand::New => f.write_str("new"),
            PanelCommand::Style(style) => write!(f, "style {style}"),
            PanelCommand::ToggleFullscreen => f.write_str("fullscreen"),
            PanelCommand::Status => f.write_str("status"),
            PanelCommand::Quit => f.write_str("quit"),
        }
    }
}

pub struct ActiveTaskPanel {
    session: TimerSession,
    view: ViewConfig,
    style: CountdownStyle,
    fullscreen: bool,
}

impl ActiveTaskPanel {
    pub fn new(session: TimerSession, view: ViewConfig, style: CountdownStyle) -> Self {
        Self {
            session,
            view,
            style,
            fullscreen: false,
        }
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    pub fn session(&self) -> &TimerSession {
        &self.session
    }

    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    pub fn style(&self) -> CountdownStyle {
        self.style
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn timer(&self) -> CountdownTimer {
        self.session.timer()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.session.subscribe()
    }

    /// Apply one user command. Returns the resulting event, if any.
    ///
    /// Timer commands must run inside a Tokio runtime (see
    /// [`TimerSession::start`]).
    pub fn handle(&mut self, command: PanelCommand) -> Option<Event> {
        match command {
            PanelCommand::Start => self.session.start(),
            PanelCommand::Pause => self.session.pause(),
            PanelCommand::Stop => self.session.stop(),
            PanelCommand::Complete => self.session.complete(),
            PanelCommand::New => {
                if self.session.timer().is_completed() {
                    self.session.reset()
                } else {
                    None
                }
            }
            PanelCommand::Style(style) => self.set_style(style),
            PanelCommand::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                None
            }
            PanelCommand::Status => Some(self.session.snapshot()),
            PanelCommand::Quit => None,
        }
    }

    /// Switch the countdown style. Returns `None` when it is already active.
    pub fn set_style(&mut self, style: CountdownStyle) -> Option<Event> {
        if self.style == style {
            return None;
        }
        self.style = style;
        Some(self.session.publish(Event::StyleChanged {
            style,
            at: Utc::now(),
        }))
    }

    pub fn render(&self) -> String {
        render_panel(self.style, &self.session.timer(), &self.view, self.fullscreen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(total: u64) -> ActiveTaskPanel {
        ActiveTaskPanel::new(
            TimerSession::new(total).unwrap(),
            ViewConfig::default(),
            CountdownStyle::Digital,
        )
    }

    #[test]
    fn parses_commands() {
        assert_eq!("start".parse::<PanelCommand>(), Ok(PanelCommand::Start));
        assert_eq!(" P ".parse::<PanelCommand>(), Ok(PanelCommand::Pause));
        assert_eq!("style neon".parse::<PanelCommand>(), Ok(PanelCommand::Style(CountdownStyle::Neon)));
        assert_eq!("".parse::<PanelCommand>(), Ok(PanelCommand::Status));
        assert_eq!("q".parse::<PanelCommand>(), Ok(PanelCommand::Quit));
        assert!("style".parse::<PanelCommand>().is_err());
        assert!("style plaid".parse::<PanelCommand>().is_err());
        assert!("launch".parse::<PanelCommand>().is_err());
    }

    #[test]
    fn command_display_parses_back() {
        for command in [
            PanelCommand::Start,
            PanelCommand::Complete,
            PanelCommand::Style(CountdownStyle::Circle),
            PanelCommand::ToggleFullscreen,
        ] {
            assert_eq!(command.to_string().parse::<PanelCommand>(), Ok(command));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn style_change_leaves_timer_untouched() {
        let mut panel = panel(600);
        panel.handle(PanelCommand::Start);
        tokio::time::sleep(std::time::Duration::from_millis(2500)).await;

        let before = panel.timer();
        let event = panel.handle(PanelCommand::Style(CountdownStyle::Circle));
        assert!(matches!(event, Some(Event::StyleChanged { style: CountdownStyle::Circle, .. })));
        assert_eq!(panel.timer(), before);
        assert!(panel.timer().is_running());
        assert!(panel.session().is_ticking());

        assert!(panel.set_style(CountdownStyle::Circle).is_none());
    }

    #[test]
    fn new_only_applies_to_completed_sessions() {
        let mut panel = panel(60);
        assert!(panel.handle(PanelCommand::New).is_none());

        panel.handle(PanelCommand::Complete);
        assert!(panel.render().contains("Task Completed!"));
        assert!(matches!(panel.handle(PanelCommand::New), Some(Event::TimerReset { .. })));
        assert_eq!(panel.timer(), CountdownTimer::new(60).unwrap());
    }

    #[test]
    fn fullscreen_toggles() {
        let mut panel = panel(60).with_fullscreen(true);
        panel.handle(PanelCommand::ToggleFullscreen);
        assert!(!panel.is_fullscreen());
    }

    #[test]
    fn status_returns_snapshot() {
        let mut panel = panel(60);
        assert!(matches!(
            panel.handle(PanelCommand::Status),
            Some(Event::StateSnapshot { remaining_secs: 60, .. })
        ));
    }
}

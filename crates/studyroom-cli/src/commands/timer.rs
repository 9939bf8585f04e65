use clap::Subcommand;
use studyroom_core::{
    format_time, parse_duration, ActiveTaskPanel, Config, CountdownStyle, Event, PanelCommand,
    TaskBoard, TimerSession, ViewConfig,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use super::today;

const HELP: &str = "commands: start | pause | stop | complete | new | style <digital|circle|minimal|neon> | fullscreen | status | quit";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the active-task countdown panel, reading commands from stdin
    Run {
        #[command(flatten)]
        source: SessionSource,
        /// Countdown style (defaults to display.style)
        #[arg(long)]
        style: Option<CountdownStyle>,
        /// Start in fullscreen layout
        #[arg(long)]
        fullscreen: bool,
        /// Print events as JSON lines instead of drawing the panel
        #[arg(long)]
        json: bool,
    },
    /// Print the state of a freshly configured session
    Status {
        #[command(flatten)]
        source: SessionSource,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Format a number of seconds as HH:MM:SS
    Format {
        seconds: u64,
    },
}

/// Where the session length and task metadata come from.
#[derive(clap::Args)]
pub struct SessionSource {
    /// Session length as seconds, MM:SS or HH:MM:SS
    #[arg(long)]
    duration: Option<String>,
    /// Use the time window and metadata of this task from the board
    #[arg(long, conflicts_with = "duration")]
    task: Option<String>,
    /// Override the task title
    #[arg(long)]
    title: Option<String>,
}

impl SessionSource {
    fn resolve(&self, config: &Config) -> Result<(u64, ViewConfig), Box<dyn std::error::Error>> {
        let (total, mut view) = match (&self.duration, &self.task) {
            (_, Some(id)) => {
                let board = TaskBoard::sample(today());
                let task = board.get(id).ok_or_else(|| format!("no task with id '{id}'"))?;
                (task.duration_secs(), task.view_config())
            }
            (Some(raw), None) => (parse_duration(raw)?, config.view_config()),
            (None, None) => (config.timer.total_duration_secs, config.view_config()),
        };
        if let Some(title) = &self.title {
            view.title = title.clone();
        }
        Ok((total, view))
    }
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run {
            source,
            style,
            fullscreen,
            json,
        } => {
            let config = Config::load_or_default();
            let (total, view) = source.resolve(&config)?;
            let style = style.unwrap_or(config.display.style);
            let fullscreen = fullscreen || config.display.fullscreen;

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(async move {
                let panel = ActiveTaskPanel::new(TimerSession::new(total)?, view, style)
                    .with_fullscreen(fullscreen);
                run_panel(panel, json).await
            })?;
        }
        TimerAction::Status { source, json } => {
            let config = Config::load_or_default();
            let (total, view) = source.resolve(&config)?;
            let session = TimerSession::new(total)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
            } else {
                let timer = session.timer();
                println!("{} {}", view.icon, view.title);
                println!("state:     {:?}", timer.state());
                println!("remaining: {}", format_time(timer.remaining_secs()));
                println!("total:     {}", format_time(timer.total_secs()));
            }
        }
        TimerAction::Format { seconds } => {
            println!("{}", format_time(seconds));
        }
    }
    Ok(())
}

async fn run_panel(mut panel: ActiveTaskPanel, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut events = panel.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if json {
        print_json(&panel.session().snapshot())?;
    } else {
        draw(&panel, None);
    }

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("stdin closed");
                    break;
                };
                let command = match line.parse::<PanelCommand>() {
                    Ok(PanelCommand::Quit) => break,
                    Ok(command) => command,
                    Err(e) => {
                        eprintln!("{e}\n{HELP}");
                        continue;
                    }
                };
                let event = panel.handle(command);
                if event.is_none() {
                    warn!(%command, "command had no effect");
                }
                match (&event, json) {
                    (Some(event), true) => print_json(event)?,
                    (None, true) => {}
                    (_, false) => draw(&panel, event.is_none().then_some(command)),
                }
            }
            received = events.recv() => {
                // Only tick-task output; command events were shown when the command ran.
                let event = match received {
                    Ok(event @ Event::StateSnapshot { .. }) => event,
                    Ok(event @ Event::TimerCompleted { manual: false, .. }) => event,
                    Ok(_) => continue,
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "panel fell behind");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };
                if json {
                    print_json(&event)?;
                } else {
                    draw(&panel, None);
                }
            }
        }
    }
    Ok(())
}

fn draw(panel: &ActiveTaskPanel, ignored: Option<PanelCommand>) {
    // Clear screen, cursor home.
    print!("\x1B[2J\x1B[H");
    println!("{}", panel.render());
    println!();
    if let Some(command) = ignored {
        println!("('{command}' does nothing right now)");
    }
    println!("{HELP}");
}

fn print_json(event: &Event) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

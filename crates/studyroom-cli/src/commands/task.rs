use chrono::NaiveDate;
use clap::Subcommand;
use studyroom_core::{DayCursor, Task, TaskBoard, TaskStatus};

use super::today;

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks, optionally for one day or one status
    List {
        /// Only tasks on this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Only tasks with this status
        #[arg(long)]
        status: Option<TaskStatus>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single task
    Show {
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// All tasks grouped by status
    Board,
    /// Upcoming tasks for today, or N days away
    Day {
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset: i64,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let board = TaskBoard::sample(today());

    match action {
        TaskAction::List { date, status, json } => {
            let tasks: Vec<&Task> = match date {
                Some(date) => board.tasks_for_date(date),
                None => board.tasks().iter().collect(),
            }
            .into_iter()
            .filter(|t| status.map_or(true, |s| t.status == s))
            .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks found.");
            } else {
                for task in tasks {
                    print_task_line(task);
                }
            }
        }
        TaskAction::Show { id, json } => {
            let task = board.get(&id).ok_or_else(|| format!("no task with id '{id}'"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(task)?);
            } else {
                print_task_card(task);
            }
        }
        TaskAction::Board => {
            for (status, tasks) in board.grouped() {
                println!("{} ({})", status.heading(), tasks.len());
                for task in tasks {
                    print!("  ");
                    print_task_line(task);
                }
                println!();
            }
        }
        TaskAction::Day { offset } => {
            let cursor = DayCursor::with_offset(today(), offset);
            let (weekday, date) = cursor.heading();
            println!("Upcoming Tasks: {weekday}, {date}");
            println!();

            let tasks = board.tasks_for_date(cursor.selected());
            if tasks.is_empty() {
                println!("No tasks scheduled");
                println!("{}", cursor.empty_label());
            }
            for task in tasks {
                print_task_card(task);
                println!();
            }
        }
    }
    Ok(())
}

fn print_task_line(task: &Task) {
    println!(
        "{:>4}  {} {:<28} {}  [{}]",
        task.id,
        task.icon,
        task.title,
        task.time_range(),
        task.status
    );
}

fn print_task_card(task: &Task) {
    println!("{} {}  [{}]", task.icon, task.title, task.status);
    println!("   {}", task.description);
    println!("   {}  {}", task.date.format("%b %d, %Y"), task.time_range());
    println!("   progress {}%", task.progress);
}

//! Study tasks and the in-memory task board.
//!
//! Tasks are supplied by an external source; the board only answers the
//! questions the panels ask: what is on a given day, which task is active,
//! how tasks group by status. A task's time window also yields the
//! configuration for its countdown session.

mod day;

pub use day::DayCursor;

use chrono::{Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::display::ViewConfig;
use crate::error::ValidationError;
use crate::session::TimerSession;

/// Task status as shown on the task badges.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Active,
    Upcoming,
    Pending,
    Completed,
}

impl TaskStatus {
    /// Order of the status sections on the task-management list.
    pub const DISPLAY_ORDER: [TaskStatus; 4] = [
        TaskStatus::Active,
        TaskStatus::Upcoming,
        TaskStatus::Completed,
        TaskStatus::Pending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Active => "active",
            TaskStatus::Upcoming => "upcoming",
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }

    /// Section heading.
    pub fn heading(&self) -> &'static str {
        match self {
            TaskStatus::Active => "Active",
            TaskStatus::Upcoming => "Upcoming",
            TaskStatus::Pending => "Pending",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(TaskStatus::Active),
            "upcoming" => Ok(TaskStatus::Upcoming),
            "pending" => Ok(TaskStatus::Pending),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(ValidationError::invalid(
                "status",
                format!("unknown task status '{other}'"),
            )),
        }
    }
}

/// A scheduled study task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub color: String,
    pub icon: String,
    #[serde(default)]
    pub status: TaskStatus,
    /// 0..=100
    #[serde(default)]
    pub progress: u8,
}

impl Task {
    /// Length of the task's time window, used as its countdown duration.
    pub fn duration_secs(&self) -> u64 {
        (self.end_time - self.start_time).num_seconds().max(0) as u64
    }

    /// `"09:00 - 11:00"`
    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }

    pub fn view_config(&self) -> ViewConfig {
        ViewConfig {
            title: self.title.clone(),
            description: self.description.clone(),
            color: self.color.clone(),
            icon: self.icon.clone(),
        }
    }

    /// A fresh countdown session spanning this task's time window.
    ///
    /// # Errors
    /// Returns an error when the window is empty.
    pub fn session(&self) -> Result<TimerSession, ValidationError> {
        TimerSession::new(self.duration_secs())
    }
}

/// Input for [`TaskBoard::add`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub status: Option<TaskStatus>,
    pub progress: u8,
}

/// In-memory collection of tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Demo board: two tasks today, one finished yesterday, one tomorrow.
    pub fn sample(today: NaiveDate) -> Self {
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
        let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
        let task = |id: &str,
                    title: &str,
                    description: &str,
                    date: NaiveDate,
                    window: (u32, u32),
                    color: &str,
                    icon: &str,
                    status: TaskStatus,
                    progress: u8| Task {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            date,
            start_time: NaiveTime::from_hms_opt(window.0, 0, 0).unwrap_or_default(),
            end_time: NaiveTime::from_hms_opt(window.1, 0, 0).unwrap_or_default(),
            color: color.to_string(),
            icon: icon.to_string(),
            status,
            progress,
        };

        Self::new(vec![
            task(
                "1",
                "Mathematics Study Session",
                "Algebra and Calculus Review",
                today,
                (9, 11),
                "hsl(221, 83%, 53%)",
                "📚",
                TaskStatus::Active,
                45,
            ),
            task(
                "2",
                "Physics Assignment",
                "Complete chapter 5 problems",
                today,
                (14, 16),
                "hsl(142, 71%, 45%)",
                "⚡",
                TaskStatus::Upcoming,
                0,
            ),
            task(
                "3",
                "History Essay",
                "World War II research paper",
                yesterday,
                (10, 12),
                "hsl(262, 83%, 58%)",
                "📝",
                TaskStatus::Completed,
                100,
            ),
            task(
                "4",
                "Chemistry Lab Report",
                "Organic compounds analysis",
                tomorrow,
                (16, 18),
                "hsl(24, 70%, 50%)",
                "🧪",
                TaskStatus::Pending,
                25,
            ),
        ])
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Add a task with a generated id.
    ///
    /// Missing fields default to `default_date`, 09:00-10:00, the default
    /// color and icon, and `pending`.
    ///
    /// # Errors
    /// Rejects an empty title, a window whose end is not after its start,
    /// and progress above 100.
    pub fn add(&mut self, new: NewTask, default_date: NaiveDate) -> Result<&Task, ValidationError> {
        let title = new.title.trim();
        if title.is_empty() {
            return Err(ValidationError::Empty("title".into()));
        }
        let start = new
            .start_time
            .unwrap_or_else(|| NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default());
        let end = new
            .end_time
            .unwrap_or_else(|| start + chrono::Duration::hours(1));
        if end <= start {
            return Err(ValidationError::InvalidTimeRange { start, end });
        }
        if new.progress > 100 {
            return Err(ValidationError::invalid("progress", "must be between 0 and 100"));
        }

        let defaults = ViewConfig::default();
        self.tasks.push(Task {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: new.description,
            date: new.date.unwrap_or(default_date),
            start_time: start,
            end_time: end,
            color: new.color.unwrap_or(defaults.color),
            icon: new.icon.unwrap_or(defaults.icon),
            status: new.status.unwrap_or_default(),
            progress: new.progress,
        });
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Tasks on `date`, earliest first.
    pub fn tasks_for_date(&self, date: NaiveDate) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().filter(|t| t.date == date).collect();
        tasks.sort_by_key(|t| t.start_time);
        tasks
    }

    pub fn by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    /// Non-empty status sections in display order.
    pub fn grouped(&self) -> Vec<(TaskStatus, Vec<&Task>)> {
        TaskStatus::DISPLAY_ORDER
            .into_iter()
            .map(|status| (status, self.by_status(status)))
            .filter(|(_, tasks)| !tasks.is_empty())
            .collect()
    }

    /// The first task marked active, if any.
    pub fn active_task(&self) -> Option<&Task> {
        self.tasks.iter().find(|t| t.status == TaskStatus::Active)
    }
}

/// `HH:MM` serialization for task times.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

use chrono::{Days, NaiveDate};

/// Selected day of the upcoming-tasks panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCursor {
    selected: NaiveDate,
    today: NaiveDate,
}

impl DayCursor {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selected: today,
            today,
        }
    }

    /// Start `offset` days away from today (negative goes back).
    pub fn with_offset(today: NaiveDate, offset: i64) -> Self {
        let mut cursor = Self::new(today);
        cursor.shift(offset);
        cursor
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    pub fn is_today(&self) -> bool {
        self.selected == self.today
    }

    pub fn prev(&mut self) -> NaiveDate {
        self.shift(-1)
    }

    pub fn next(&mut self) -> NaiveDate {
        self.shift(1)
    }

    /// Out-of-range dates leave the selection unchanged.
    pub fn shift(&mut self, days: i64) -> NaiveDate {
        let step = Days::new(days.unsigned_abs());
        let moved = if days < 0 {
            self.selected.checked_sub_days(step)
        } else {
            self.selected.checked_add_days(step)
        };
        if let Some(date) = moved {
            self.selected = date;
        }
        self.selected
    }

    /// Weekday and full date, e.g. `("Monday", "Oct 19, 2026")`.
    pub fn heading(&self) -> (String, String) {
        (
            self.selected.format("%A").to_string(),
            self.selected.format("%b %d, %Y").to_string(),
        )
    }

    /// Second line of the "No tasks scheduled" placeholder.
    pub fn empty_label(&self) -> String {
        if self.is_today() {
            "for today".to_string()
        } else {
            format!("for {}", self.selected.format("%b %d"))
        }
    }
}

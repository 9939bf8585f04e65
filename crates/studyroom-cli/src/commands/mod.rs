pub mod config;
pub mod task;
pub mod timer;

use chrono::NaiveDate;

/// Local calendar day, the reference point for every day-based view.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

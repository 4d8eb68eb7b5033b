//! Command implementations for the pos-watch CLI

use chrono::{Duration, Local};

pub mod export_games;
pub mod export_innings;
pub mod notify;

/// Parallel fetch slots for per-game requests.
pub(crate) const FETCH_WORKERS: usize = 8;

/// Date format the schedule endpoint accepts.
pub const DATE_FMT: &str = "%m/%d/%Y";

/// Inclusive date window ending today, as (start, end).
pub(crate) fn date_window(days: i64) -> (String, String) {
    let now = Local::now();
    let start = now - Duration::days(days);
    (
        start.format(DATE_FMT).to_string(),
        now.format(DATE_FMT).to_string(),
    )
}

pub(crate) fn today() -> String {
    Local::now().format(DATE_FMT).to_string()
}

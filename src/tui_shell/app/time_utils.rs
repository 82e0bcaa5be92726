use time::OffsetDateTime;

use crate::format;

/// Relative age for recent moments, clock time for anything older than a day.
pub(in crate::tui_shell) fn fmt_since(then: OffsetDateTime, now: OffsetDateTime) -> String {
    let secs = (now - then).whole_seconds();

    // Clock skew; treat as now.
    if secs < 0 {
        return "just now".to_string();
    }

    let mins = secs / 60;
    let hours = mins / 60;
    if secs < 60 {
        "just now".to_string()
    } else if mins < 60 {
        format!("{}m ago", mins)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else {
        format!("at {}", format::time_of_day(then))
    }
}

pub(in crate::tui_shell) fn fmt_clock(at: OffsetDateTime) -> String {
    format::time_of_day(at)
}

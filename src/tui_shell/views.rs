pub(super) mod dashboard;
pub(super) mod detail;
pub(super) mod form;
pub(super) mod sync_panel;
pub(super) mod table;

pub(in crate::tui_shell) use dashboard::DashboardScreen;
pub(in crate::tui_shell) use detail::DetailScreen;
pub(in crate::tui_shell) use form::FormScreen;
pub(in crate::tui_shell) use table::TableScreen;

use ratatui::text::Line;

use super::style;

/// Renders a failed section as a single red line.
fn error_line(msg: &str) -> Line<'static> {
    Line::styled(msg.to_string(), style::error())
}

fn empty_line() -> Line<'static> {
    Line::styled("(no results)", style::label())
}

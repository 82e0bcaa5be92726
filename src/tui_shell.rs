use anyhow::Result;

mod app;
mod input;
mod modal;
mod style;
mod view;
mod views;

// Shared with the screen views via `super::super::...`.
use view::{RenderCtx, View, render_view_chrome};

pub(crate) fn run_with_options(opts: crate::tui::TuiRunOptions) -> Result<()> {
    app::run(opts)
}

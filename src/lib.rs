pub mod api;
pub mod config;
pub mod form;
pub mod format;
pub mod logging;
pub mod model;
pub mod nav;
pub mod screens;
pub mod sync;
pub mod tui;

mod tui_shell;

#[cfg(test)]
#[path = "tests/fake_backend.rs"]
pub(crate) mod tests_support;

//! Tracing subscriber setup shared by the client and the development server.
//!
//! Filter priority: `OPPDESK_LOG`, then `RUST_LOG`, then the verbosity flags.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub const LOG_ENV: &str = "OPPDESK_LOG";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    pub fn default_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
        }
    }
}

/// Logs to stderr. Used by CLI subcommands.
pub fn init_stderr(verbosity: Verbosity) {
    init_stderr_at(verbosity.default_level());
}

/// Logs to stderr with `default` as the fallback level when no filter env var is set.
pub fn init_stderr_at(default: Level) {
    let use_ansi = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(use_ansi)
        .with_target(true)
        .compact();
    // A second init is ignored.
    let _ = tracing_subscriber::registry()
        .with(env_filter_or(default, |k| std::env::var(k).ok()))
        .with(layer)
        .try_init();
}

/// Logs to an append-only file. The TUI owns stderr, so this is its only sink.
pub fn init_file(verbosity: Verbosity, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);
    let _ = tracing_subscriber::registry()
        .with(build_env_filter(verbosity, |k| std::env::var(k).ok()))
        .with(layer)
        .try_init();
    Ok(())
}

pub fn build_env_filter(verbosity: Verbosity, lookup: impl Fn(&str) -> Option<String>) -> EnvFilter {
    env_filter_or(verbosity.default_level(), lookup)
}

fn env_filter_or(default: Level, lookup: impl Fn(&str) -> Option<String>) -> EnvFilter {
    for key in [LOG_ENV, "RUST_LOG"] {
        if let Some(directives) = lookup(key)
            && let Ok(filter) = EnvFilter::try_new(&directives)
        {
            return filter;
        }
    }

    EnvFilter::new(default.to_string().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_wins_over_quiet() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn project_env_takes_priority() {
        let filter = build_env_filter(Verbosity::Normal, |k| match k {
            LOG_ENV => Some("oppdesk=trace".to_string()),
            "RUST_LOG" => Some("error".to_string()),
            _ => None,
        });
        assert_eq!(filter.to_string(), "oppdesk=trace");
    }

    #[test]
    fn falls_back_to_verbosity_level() {
        let filter = build_env_filter(Verbosity::Verbose, |_| None);
        assert_eq!(filter.to_string(), "debug");
    }
}

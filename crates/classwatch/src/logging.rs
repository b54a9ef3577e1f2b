//! Tracing setup for the `classwatch` binary.
//!
//! Two targets matter: `classwatch` (ingestion, login and store events) and
//! `tower_http` (one span per HTTP request). Both follow the same level unless
//! `RUST_LOG` says otherwise.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How much the server reports, chosen with `-q` / `-v` / `-vv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// One line per recorded incident and login attempt.
    #[default]
    Normal,
    /// Adds evictions and request spans.
    Verbose,
    /// Adds per-query filter results.
    Trace,
}

impl Verbosity {
    /// The most detailed level emitted at this verbosity.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    fn directives(self) -> String {
        let level = self.to_level_filter();
        format!("classwatch={level},tower_http={level}")
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG`, when set and valid, replaces the directives derived from
/// `verbosity`. Only the first call in a process has any effect.
///
/// ```no_run
/// use classwatch::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directives()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}

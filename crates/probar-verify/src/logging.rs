//! Log output for test runs.
//!
//! Skipped assertions log at `debug`, failed verifications at `warn`.
//! `RUST_LOG` takes precedence over the verbosity passed in.

use serde::{Deserialize, Serialize};

/// Log verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    /// Warnings and errors only
    Quiet,
    /// Informational output
    #[default]
    Normal,
    /// Dispatch decisions, including skipped assertions
    Verbose,
    /// Every channel call
    Debug,
}

impl Verbosity {
    /// Default filter directive for this level
    #[must_use]
    pub const fn directive(self) -> &'static str {
        match self {
            Self::Quiet => "warn",
            Self::Normal => "info",
            Self::Verbose => "debug",
            Self::Debug => "trace",
        }
    }
}

/// Install a global fmt subscriber.
///
/// Returns `false` if a global subscriber was already installed, which makes
/// repeated calls from several tests harmless.
pub fn init_tracing(verbosity: Verbosity) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(verbosity.directive())),
        )
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives() {
        assert_eq!(Verbosity::Quiet.directive(), "warn");
        assert_eq!(Verbosity::default().directive(), "info");
        assert_eq!(Verbosity::Debug.directive(), "trace");
    }

    #[test]
    fn test_init_is_idempotent() {
        let _ = init_tracing(Verbosity::Verbose);
        assert!(!init_tracing(Verbosity::Verbose));
    }
}

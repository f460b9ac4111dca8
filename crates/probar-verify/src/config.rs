//! Runtime configuration: numeric tolerance and the placeholder marker.
//!
//! The tolerance is read on every numeric assertion, so it is stored as the
//! bit pattern of an `f64` inside an `AtomicU64`. Readers on other threads see
//! either the old or the new value, never a torn one.

use crate::marker::{PlaceholderMarker, DEFAULT_NULL_MARKER};
use crate::result::{VerifyError, VerifyResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Environment variable overriding the numeric tolerance
pub const TOLERANCE_ENV: &str = "PROBAR_VERIFY_TOLERANCE";

/// Environment variable overriding the placeholder marker
pub const NULL_MARKER_ENV: &str = "PROBAR_VERIFY_NULL_MARKER";

/// Supplies the numeric tolerance for number comparisons.
pub trait ToleranceSource: Send + Sync {
    /// Tolerance currently in effect
    fn numeric_tolerance(&self) -> f64;
}

/// A tolerance that never changes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedTolerance(pub f64);

impl ToleranceSource for FixedTolerance {
    fn numeric_tolerance(&self) -> f64 {
        self.0
    }
}

/// Serializable form of the runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    /// Margin applied around numeric comparison boundaries
    pub numeric_tolerance: f64,
    /// Sentinel meaning "no value supplied"
    pub null_marker: String,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            numeric_tolerance: 0.0,
            null_marker: DEFAULT_NULL_MARKER.to_string(),
        }
    }
}

impl RuntimeSettings {
    /// Parse settings from YAML
    pub fn from_yaml(yaml: &str) -> VerifyResult<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| VerifyError::ParseError(e.to_string()))
    }

    /// Apply overrides from a variable lookup (normally the process environment)
    pub fn apply_overrides<F>(mut self, lookup: F) -> VerifyResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(TOLERANCE_ENV) {
            self.numeric_tolerance =
                raw.trim()
                    .parse::<f64>()
                    .map_err(|e| VerifyError::InvalidConfig {
                        message: format!("{TOLERANCE_ENV}={raw:?}: {e}"),
                    })?;
        }
        if let Some(marker) = lookup(NULL_MARKER_ENV) {
            self.null_marker = marker;
        }
        Ok(self)
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn check_tolerance(tolerance: f64) -> VerifyResult<()> {
    if tolerance.is_finite() && tolerance >= 0.0 {
        Ok(())
    } else {
        Err(VerifyError::InvalidConfig {
            message: format!("numeric tolerance must be finite and non-negative, got {tolerance}"),
        })
    }
}

/// Process-wide runtime configuration shared by all dispatchers.
///
/// # Example
///
/// ```
/// use probar_verify::{RuntimeConfig, ToleranceSource};
///
/// let config = RuntimeConfig::default();
/// config.set_numeric_tolerance(0.01).unwrap();
/// assert_eq!(config.numeric_tolerance(), 0.01);
/// ```
#[derive(Debug)]
pub struct RuntimeConfig {
    tolerance_bits: AtomicU64,
    null_marker: PlaceholderMarker,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tolerance_bits: AtomicU64::new(0.0_f64.to_bits()),
            null_marker: PlaceholderMarker::default(),
        }
    }
}

impl RuntimeConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from validated settings
    pub fn from_settings(settings: RuntimeSettings) -> VerifyResult<Self> {
        check_tolerance(settings.numeric_tolerance)?;
        Ok(Self {
            tolerance_bits: AtomicU64::new(settings.numeric_tolerance.to_bits()),
            null_marker: PlaceholderMarker::new(settings.null_marker),
        })
    }

    /// Load from a YAML file, then apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> VerifyResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let settings = RuntimeSettings::from_yaml(&text)?.apply_overrides(env_lookup)?;
        tracing::debug!(
            path = %path.display(),
            tolerance = settings.numeric_tolerance,
            null_marker = %settings.null_marker,
            "loaded runtime configuration"
        );
        Self::from_settings(settings)
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> VerifyResult<Self> {
        Self::from_lookup(env_lookup)
    }

    /// Defaults with overrides taken from `lookup`
    pub fn from_lookup<F>(lookup: F) -> VerifyResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_settings(RuntimeSettings::default().apply_overrides(lookup)?)
    }

    /// Set the placeholder marker
    #[must_use]
    pub fn with_null_marker(mut self, marker: impl Into<String>) -> Self {
        self.null_marker = PlaceholderMarker::new(marker);
        self
    }

    /// Change the tolerance; later numeric assertions observe the new value
    pub fn set_numeric_tolerance(&self, tolerance: f64) -> VerifyResult<()> {
        check_tolerance(tolerance)?;
        self.tolerance_bits
            .store(tolerance.to_bits(), Ordering::Release);
        tracing::debug!(tolerance, "numeric tolerance updated");
        Ok(())
    }

    /// The configured placeholder marker
    #[must_use]
    pub const fn null_marker(&self) -> &PlaceholderMarker {
        &self.null_marker
    }

    /// Current values as serializable settings
    #[must_use]
    pub fn snapshot(&self) -> RuntimeSettings {
        RuntimeSettings {
            numeric_tolerance: self.numeric_tolerance(),
            null_marker: self.null_marker.sentinel().to_string(),
        }
    }
}

impl ToleranceSource for RuntimeConfig {
    fn numeric_tolerance(&self) -> f64 {
        f64::from_bits(self.tolerance_bits.load(Ordering::Acquire))
    }
}

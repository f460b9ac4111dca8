//! Placeholder suppression for test data values.
//!
//! Test data uses a sentinel to say "no value for this run". An assertion whose
//! expected value is the sentinel, or absent altogether, is skipped rather than
//! checked against an empty string.

use serde::{Deserialize, Serialize};

/// Default sentinel for "no value supplied"
pub const DEFAULT_NULL_MARKER: &str = "<NULL>";

/// Recognizes the configured "no value supplied" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceholderMarker {
    sentinel: String,
}

impl Default for PlaceholderMarker {
    fn default() -> Self {
        Self::new(DEFAULT_NULL_MARKER)
    }
}

impl PlaceholderMarker {
    /// Use `sentinel` as the marker
    #[must_use]
    pub fn new(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
        }
    }

    /// The sentinel string
    #[must_use]
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Whether an expected value means "skip this check".
    ///
    /// Matches `None` and exact (untrimmed, case-sensitive) equality with the
    /// sentinel. The empty string is a real expectation.
    #[must_use]
    pub fn suppresses(&self, expected: Option<&str>) -> bool {
        expected.map_or(true, |value| value == self.sentinel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sentinel() {
        assert_eq!(PlaceholderMarker::default().sentinel(), "<NULL>");
    }

    #[test]
    fn test_sentinel_and_none_suppress() {
        let marker = PlaceholderMarker::default();
        assert!(marker.suppresses(None));
        assert!(marker.suppresses(Some("<NULL>")));
    }

    #[test]
    fn test_empty_string_is_not_placeholder() {
        assert!(!PlaceholderMarker::default().suppresses(Some("")));
    }

    #[test]
    fn test_match_is_exact() {
        let marker = PlaceholderMarker::default();
        assert!(!marker.suppresses(Some(" <NULL>")));
        assert!(!marker.suppresses(Some("<null>")));
    }

    #[test]
    fn test_custom_sentinel() {
        let marker = PlaceholderMarker::new("--");
        assert!(marker.suppresses(Some("--")));
        assert!(!marker.suppresses(Some("<NULL>")));
    }
}

//! Element references identifying a GUI element for the automation channel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a target element: element-type tag, logical name and locator.
///
/// Immutable once built; every channel call receives all three fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    element_type: String,
    element_name: String,
    locator: String,
}

impl ElementRef {
    /// Create a new element reference
    #[must_use]
    pub fn new(
        element_type: impl Into<String>,
        element_name: impl Into<String>,
        locator: impl Into<String>,
    ) -> Self {
        Self {
            element_type: element_type.into(),
            element_name: element_name.into(),
            locator: locator.into(),
        }
    }

    /// Element-type tag (e.g. "InputField")
    #[must_use]
    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    /// Logical element name used in reports
    #[must_use]
    pub fn element_name(&self) -> &str {
        &self.element_name
    }

    /// Locator expression understood by the automation channel
    #[must_use]
    pub fn locator(&self) -> &str {
        &self.locator
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' [{}]",
            self.element_type, self.element_name, self.locator
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let element = ElementRef::new("InputField", "username", "#user");
        assert_eq!(element.element_type(), "InputField");
        assert_eq!(element.element_name(), "username");
        assert_eq!(element.locator(), "#user");
    }

    #[test]
    fn test_display() {
        let element = ElementRef::new("Label", "greeting", "css=.greeting");
        assert_eq!(element.to_string(), "Label 'greeting' [css=.greeting]");
    }

    #[test]
    fn test_equality_covers_all_fields() {
        let a = ElementRef::new("Label", "x", "#a");
        let b = ElementRef::new("Label", "x", "#b");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}

//! Comparison strategies applied by the automation channel.
//!
//! A [`Validator`] checks one actual string read from a GUI element. The
//! standard strategies are the closed [`Comparison`] set bound to an expected
//! value through [`ExpectedValidator`]; anything else implements
//! [`Validator`] directly or wraps a closure in [`FnValidator`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Predicate over the actual text or value of an element.
pub trait Validator: Send + Sync {
    /// Returns `true` if `actual` satisfies the expectation
    fn validate(&self, actual: &str) -> bool;

    /// Human-readable expectation used in failure reports
    fn describe(&self) -> String {
        "matching a custom validator".to_string()
    }
}

/// The closed set of standard comparison strategies.
///
/// Numeric variants capture the tolerance in effect when they were built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Comparison {
    /// Exact, case-sensitive equality
    Equals,
    /// Exact, case-sensitive inequality
    NotEquals,
    /// Case-sensitive substring test
    Contains,
    /// Substring test on trimmed, lowercased operands
    ContainsIgnoreCaseTrimmed,
    /// Equality on trimmed, lowercased operands
    EqualsIgnoreCaseTrimmed,
    /// `actual > expected - tolerance`
    NumberGreaterThan {
        /// Allowed margin below the boundary
        tolerance: f64,
    },
    /// `actual < expected + tolerance`
    NumberLessThan {
        /// Allowed margin above the boundary
        tolerance: f64,
    },
}

impl Comparison {
    /// Compare an actual value against an expected value.
    ///
    /// Numeric variants return `false` when either operand does not parse
    /// as a finite decimal number.
    #[must_use]
    pub fn compare(&self, actual: &str, expected: &str) -> bool {
        match *self {
            Self::Equals => actual == expected,
            Self::NotEquals => actual != expected,
            Self::Contains => actual.contains(expected),
            Self::ContainsIgnoreCaseTrimmed => fold(actual).contains(&fold(expected)),
            Self::EqualsIgnoreCaseTrimmed => fold(actual) == fold(expected),
            Self::NumberGreaterThan { tolerance } => match parse_pair(actual, expected) {
                Some((a, e)) => a > e - tolerance,
                None => false,
            },
            Self::NumberLessThan { tolerance } => match parse_pair(actual, expected) {
                Some((a, e)) => a < e + tolerance,
                None => false,
            },
        }
    }

    /// Short name of the strategy
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::Contains => "contains",
            Self::ContainsIgnoreCaseTrimmed => "contains_ignore_case_trimmed",
            Self::EqualsIgnoreCaseTrimmed => "equals_ignore_case_trimmed",
            Self::NumberGreaterThan { .. } => "number_greater_than",
            Self::NumberLessThan { .. } => "number_less_than",
        }
    }

    /// Whether this strategy parses its operands as numbers
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::NumberGreaterThan { .. } | Self::NumberLessThan { .. }
        )
    }
}

fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Parse a decimal operand; non-finite results count as malformed.
fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_pair(actual: &str, expected: &str) -> Option<(f64, f64)> {
    Some((parse_number(actual)?, parse_number(expected)?))
}

/// A [`Comparison`] bound to an expected value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedValidator {
    comparison: Comparison,
    expected: String,
}

impl ExpectedValidator {
    /// Bind a comparison to an expected value
    #[must_use]
    pub fn new(comparison: Comparison, expected: impl Into<String>) -> Self {
        Self {
            comparison,
            expected: expected.into(),
        }
    }

    /// Exact equality
    #[must_use]
    pub fn equals(expected: impl Into<String>) -> Self {
        Self::new(Comparison::Equals, expected)
    }

    /// Exact inequality
    #[must_use]
    pub fn not_equals(expected: impl Into<String>) -> Self {
        Self::new(Comparison::NotEquals, expected)
    }

    /// Case-sensitive substring
    #[must_use]
    pub fn contains(expected: impl Into<String>) -> Self {
        Self::new(Comparison::Contains, expected)
    }

    /// Trimmed, case-insensitive substring
    #[must_use]
    pub fn contains_ignore_case_trimmed(expected: impl Into<String>) -> Self {
        Self::new(Comparison::ContainsIgnoreCaseTrimmed, expected)
    }

    /// Trimmed, case-insensitive equality
    #[must_use]
    pub fn equals_ignore_case_trimmed(expected: impl Into<String>) -> Self {
        Self::new(Comparison::EqualsIgnoreCaseTrimmed, expected)
    }

    /// Numeric lower bound widened by `tolerance`
    #[must_use]
    pub fn number_greater_than(expected: impl Into<String>, tolerance: f64) -> Self {
        Self::new(Comparison::NumberGreaterThan { tolerance }, expected)
    }

    /// Numeric upper bound widened by `tolerance`
    #[must_use]
    pub fn number_less_than(expected: impl Into<String>, tolerance: f64) -> Self {
        Self::new(Comparison::NumberLessThan { tolerance }, expected)
    }

    /// The bound comparison
    #[must_use]
    pub const fn comparison(&self) -> &Comparison {
        &self.comparison
    }

    /// The bound expected value
    #[must_use]
    pub fn expected(&self) -> &str {
        &self.expected
    }
}

impl Validator for ExpectedValidator {
    fn validate(&self, actual: &str) -> bool {
        self.comparison.compare(actual, &self.expected)
    }

    fn describe(&self) -> String {
        let expected = &self.expected;
        match self.comparison {
            Comparison::Equals => format!("equal to '{expected}'"),
            Comparison::NotEquals => format!("not equal to '{expected}'"),
            Comparison::Contains => format!("containing '{expected}'"),
            Comparison::ContainsIgnoreCaseTrimmed => {
                format!("containing '{expected}' (ignoring case and surrounding whitespace)")
            }
            Comparison::EqualsIgnoreCaseTrimmed => {
                format!("equal to '{expected}' (ignoring case and surrounding whitespace)")
            }
            Comparison::NumberGreaterThan { tolerance } => {
                format!("a number greater than {expected} (tolerance {tolerance})")
            }
            Comparison::NumberLessThan { tolerance } => {
                format!("a number less than {expected} (tolerance {tolerance})")
            }
        }
    }
}

impl fmt::Display for ExpectedValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Adapts a closure into a [`Validator`].
///
/// ```
/// use probar_verify::{FnValidator, Validator};
///
/// let even_length = FnValidator::new("an even number of characters", |s: &str| s.len() % 2 == 0);
/// assert!(even_length.validate("ab"));
/// ```
pub struct FnValidator<F> {
    description: String,
    predicate: F,
}

impl<F> FnValidator<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    /// Wrap `predicate`, described by `description` in reports
    #[must_use]
    pub fn new(description: impl Into<String>, predicate: F) -> Self {
        Self {
            description: description.into(),
            predicate,
        }
    }
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn validate(&self, actual: &str) -> bool {
        (self.predicate)(actual)
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}

impl<F> fmt::Debug for FnValidator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnValidator")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod text_comparison_tests {
        use super::*;

        #[test]
        fn test_equals_is_exact() {
            assert!(Comparison::Equals.compare("Foo", "Foo"));
            assert!(!Comparison::Equals.compare("Foo", "foo"));
            assert!(!Comparison::Equals.compare(" Foo", "Foo"));
        }

        #[test]
        fn test_not_equals_mirrors_equals() {
            for (a, b) in [("x", "x"), ("x", "y"), ("", ""), ("A", "a")] {
                assert_eq!(
                    Comparison::Equals.compare(a, b),
                    !Comparison::NotEquals.compare(a, b)
                );
            }
        }

        #[test]
        fn test_contains_case_sensitive_untrimmed() {
            assert!(!Comparison::Contains.compare("  Foo  ", "foo"));
            assert!(Comparison::Contains.compare("  Foo  ", "Foo"));
            assert!(Comparison::Contains.compare("anything", ""));
        }

        #[test]
        fn test_contains_ignore_case_trimmed() {
            assert!(Comparison::ContainsIgnoreCaseTrimmed.compare("  Foo  ", "foo"));
            assert!(Comparison::ContainsIgnoreCaseTrimmed.compare("Hello World", " WORLD "));
            assert!(!Comparison::ContainsIgnoreCaseTrimmed.compare("Hello", "world"));
        }

        #[test]
        fn test_equals_ignore_case_trimmed() {
            assert!(Comparison::EqualsIgnoreCaseTrimmed.compare("\tSubmit \n", "SUBMIT"));
            assert!(!Comparison::EqualsIgnoreCaseTrimmed.compare("Submit it", "submit"));
        }
    }

    mod numeric_comparison_tests {
        use super::*;

        #[test]
        fn test_greater_than_with_tolerance() {
            let cmp = Comparison::NumberGreaterThan { tolerance: 0.5 };
            assert!(cmp.compare("10", "10.4"));
            assert!(!cmp.compare("9", "10.4"));
        }

        #[test]
        fn test_less_than_with_tolerance() {
            let cmp = Comparison::NumberLessThan { tolerance: 0.5 };
            assert!(cmp.compare("10.8", "10.4"));
            assert!(!cmp.compare("11", "10.4"));
        }

        #[test]
        fn test_zero_tolerance_is_strict() {
            let gt = Comparison::NumberGreaterThan { tolerance: 0.0 };
            assert!(!gt.compare("5", "5"));
            assert!(gt.compare("5.01", "5"));
        }

        #[test]
        fn test_operands_are_trimmed() {
            let gt = Comparison::NumberGreaterThan { tolerance: 0.0 };
            assert!(gt.compare(" 12 ", "\t3"));
        }

        #[test]
        fn test_malformed_operands_fail() {
            let gt = Comparison::NumberGreaterThan { tolerance: 100.0 };
            let lt = Comparison::NumberLessThan { tolerance: 100.0 };
            for (a, e) in [("abc", "1"), ("1", "abc"), ("", "1"), ("NaN", "1"), ("1", "inf")] {
                assert!(!gt.compare(a, e), "gt({a:?}, {e:?})");
                assert!(!lt.compare(a, e), "lt({a:?}, {e:?})");
            }
        }

        #[test]
        fn test_is_numeric() {
            assert!(Comparison::NumberLessThan { tolerance: 0.1 }.is_numeric());
            assert!(!Comparison::Contains.is_numeric());
        }
    }

    mod expected_validator_tests {
        use super::*;

        #[test]
        fn test_validate_uses_bound_expected() {
            let v = ExpectedValidator::equals("OK");
            assert!(v.validate("OK"));
            assert!(!v.validate("ok"));
            assert_eq!(v.expected(), "OK");
            assert_eq!(v.comparison(), &Comparison::Equals);
        }

        #[test]
        fn test_reusable_across_comparisons() {
            let v = ExpectedValidator::number_less_than("100", 0.0);
            assert!(v.validate("1"));
            assert!(v.validate("99.9"));
            assert!(!v.validate("100"));
            assert!(v.validate("1"));
        }

        #[test]
        fn test_describe() {
            assert_eq!(ExpectedValidator::contains("ab").describe(), "containing 'ab'");
            assert_eq!(
                ExpectedValidator::number_greater_than("10.4", 0.5).to_string(),
                "a number greater than 10.4 (tolerance 0.5)"
            );
        }

        #[test]
        fn test_serde_roundtrip_keeps_tolerance() {
            let v = ExpectedValidator::number_greater_than("3", 0.25);
            let json = serde_json::to_string(&v).unwrap();
            assert!(json.contains("number_greater_than"));
            let back: ExpectedValidator = serde_json::from_str(&json).unwrap();
            assert_eq!(back, v);
        }
    }

    mod fn_validator_tests {
        use super::*;

        #[test]
        fn test_closure_validator() {
            let v = FnValidator::new("all digits", |s: &str| s.chars().all(|c| c.is_ascii_digit()));
            assert!(v.validate("0123"));
            assert!(!v.validate("12a"));
            assert_eq!(v.describe(), "all digits");
        }

        #[test]
        fn test_usable_as_trait_object() {
            let v: Box<dyn Validator> = Box::new(FnValidator::new("non-empty", |s: &str| !s.is_empty()));
            assert!(v.validate("x"));
        }
    }
}

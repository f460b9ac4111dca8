//! GUI automation channel abstraction.
//!
//! The automation service that actually talks to the UI sits behind
//! [`GuiChannel`]. It exposes one read and two verification paths: the
//! displayed text of an element and its underlying bound value. Pass/fail
//! reporting is the channel's job.
//!
//! [`RecordingChannel`] is an in-memory implementation that evaluates
//! validators against canned element state and keeps every verification, in
//! the spirit of soft assertions.

use crate::element::ElementRef;
use crate::result::{VerifyError, VerifyResult};
use crate::validator::Validator;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Which representation of an element a verification targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelMode {
    /// Underlying bound value (e.g. an input field's value)
    Value,
    /// Displayed text
    Text,
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Value => "value",
            Self::Text => "text",
        })
    }
}

/// The three-call surface of the GUI automation service.
pub trait GuiChannel: Send + Sync {
    /// Read the displayed text of an element
    fn get_text(&self, element: &ElementRef) -> String;

    /// Verify the displayed text with `validator`
    fn assert_text_matches(&self, element: &ElementRef, validator: &dyn Validator);

    /// Verify the underlying value with `validator`
    fn assert_value_matches(&self, element: &ElementRef, validator: &dyn Validator);
}

/// One verification performed by a [`RecordingChannel`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    /// Element that was checked
    pub element: ElementRef,
    /// Channel the check went through
    pub channel: ChannelMode,
    /// Description of the validator
    pub expectation: String,
    /// Actual text or value observed
    pub actual: String,
    /// Validator outcome
    pub passed: bool,
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "passed" } else { "FAILED" };
        write!(
            f,
            "{status}: {} of {} expected to be {}, was '{}'",
            self.channel, self.element, self.expectation, self.actual
        )
    }
}

/// Displayed text and bound value of a simulated element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementState {
    /// Displayed text
    pub text: String,
    /// Underlying value
    pub value: String,
}

#[derive(Debug, Default)]
struct Recorded {
    elements: HashMap<ElementRef, ElementState>,
    verifications: Vec<Verification>,
    reads: Vec<ElementRef>,
}

/// In-memory [`GuiChannel`] that records every call.
///
/// ## Example
///
/// ```
/// use probar_verify::{ElementRef, ExpectedValidator, GuiChannel, RecordingChannel};
///
/// let field = ElementRef::new("InputField", "amount", "#amount");
/// let channel = RecordingChannel::new().with_element(field.clone(), "12 EUR", "12");
/// channel.assert_value_matches(&field, &ExpectedValidator::equals("12"));
/// assert!(channel.verify().is_ok());
/// ```
#[derive(Debug, Default)]
pub struct RecordingChannel {
    recorded: Mutex<Recorded>,
}

impl RecordingChannel {
    /// Create an empty channel
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element with its displayed text and bound value
    #[must_use]
    pub fn with_element(
        self,
        element: ElementRef,
        text: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set_element(element, text, value);
        self
    }

    /// Register or replace an element's state
    pub fn set_element(&self, element: ElementRef, text: impl Into<String>, value: impl Into<String>) {
        let state = ElementState {
            text: text.into(),
            value: value.into(),
        };
        let _ = self.lock().elements.insert(element, state);
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, element: &ElementRef, channel: ChannelMode, validator: &dyn Validator) {
        let mut recorded = self.lock();
        let actual = recorded
            .elements
            .get(element)
            .map(|state| match channel {
                ChannelMode::Value => state.value.clone(),
                ChannelMode::Text => state.text.clone(),
            })
            .unwrap_or_default();
        let passed = validator.validate(&actual);
        let verification = Verification {
            element: element.clone(),
            channel,
            expectation: validator.describe(),
            actual,
            passed,
        };
        if passed {
            tracing::debug!(%verification, "verification passed");
        } else {
            tracing::warn!(%verification, "verification failed");
        }
        recorded.verifications.push(verification);
    }

    /// All verifications in call order
    #[must_use]
    pub fn verifications(&self) -> Vec<Verification> {
        self.lock().verifications.clone()
    }

    /// Failed verifications in call order
    #[must_use]
    pub fn failures(&self) -> Vec<Verification> {
        self.lock()
            .verifications
            .iter()
            .filter(|v| !v.passed)
            .cloned()
            .collect()
    }

    /// Number of verification calls received on either channel
    #[must_use]
    pub fn verification_count(&self) -> usize {
        self.lock().verifications.len()
    }

    /// Elements read through `get_text`, in call order
    #[must_use]
    pub fn reads(&self) -> Vec<ElementRef> {
        self.lock().reads.clone()
    }

    /// Drop all recorded calls, keeping element state
    pub fn clear(&self) {
        let mut recorded = self.lock();
        recorded.verifications.clear();
        recorded.reads.clear();
    }

    /// Fail with every recorded failure, or succeed if there were none
    pub fn verify(&self) -> VerifyResult<()> {
        let failures = self.failures();
        if failures.is_empty() {
            return Ok(());
        }
        let summary = failures
            .iter()
            .enumerate()
            .map(|(i, f)| format!("  {}. {f}", i + 1))
            .collect::<Vec<_>>()
            .join("\n");
        Err(VerifyError::VerificationFailed {
            count: failures.len(),
            summary,
        })
    }
}

impl GuiChannel for RecordingChannel {
    fn get_text(&self, element: &ElementRef) -> String {
        let mut recorded = self.lock();
        recorded.reads.push(element.clone());
        match recorded.elements.get(element) {
            Some(state) => state.text.clone(),
            None => {
                tracing::warn!(%element, "text requested for unknown element");
                String::new()
            }
        }
    }

    fn assert_text_matches(&self, element: &ElementRef, validator: &dyn Validator) {
        self.record(element, ChannelMode::Text, validator);
    }

    fn assert_value_matches(&self, element: &ElementRef, validator: &dyn Validator) {
        self.record(element, ChannelMode::Value, validator);
    }
}

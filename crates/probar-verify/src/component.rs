//! Component assertions routed to the value or text channel.
//!
//! [`ComponentAssertions`] owns everything an assertion needs: the element,
//! the fixed [`ChannelMode`], the automation channel, the tolerance source and
//! the placeholder marker. [`ValueComponent`] exposes the assertion API with
//! default methods that delegate to it, so a component only has to hand out
//! its `ComponentAssertions`.
//!
//! ```
//! use std::sync::Arc;
//! use probar_verify::{ComponentKind, Dispatch, RecordingChannel, RuntimeConfig,
//!     ValueComponent, VerifyContext};
//!
//! let channel = Arc::new(RecordingChannel::new());
//! let ctx = VerifyContext::new(channel.clone(), Arc::new(RuntimeConfig::default()));
//! let field = ctx.component(ComponentKind::InputField, "amount", "#amount");
//!
//! assert_eq!(field.assert_text_equals("<NULL>"), Dispatch::Skipped);
//! assert_eq!(channel.verification_count(), 0);
//! ```

use crate::channel::{ChannelMode, GuiChannel};
use crate::config::{RuntimeConfig, ToleranceSource};
use crate::element::ElementRef;
use crate::marker::PlaceholderMarker;
use crate::validator::{ExpectedValidator, Validator};
use std::fmt;
use std::sync::Arc;

/// What an assertion call did locally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Expected value was a placeholder; no channel call was made
    Skipped,
    /// The validator was handed to this channel
    Dispatched(ChannelMode),
}

impl Dispatch {
    /// Whether a channel call was made
    #[must_use]
    pub const fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched(_))
    }
}

/// Assertion dispatcher bound to one element.
#[derive(Clone)]
pub struct ComponentAssertions {
    element: ElementRef,
    mode: ChannelMode,
    channel: Arc<dyn GuiChannel>,
    tolerance: Arc<dyn ToleranceSource>,
    marker: PlaceholderMarker,
}

impl fmt::Debug for ComponentAssertions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentAssertions")
            .field("element", &self.element)
            .field("mode", &self.mode)
            .field("marker", &self.marker)
            .finish_non_exhaustive()
    }
}

impl ComponentAssertions {
    /// Create a dispatcher using the default placeholder marker
    #[must_use]
    pub fn new(
        element: ElementRef,
        mode: ChannelMode,
        channel: Arc<dyn GuiChannel>,
        tolerance: Arc<dyn ToleranceSource>,
    ) -> Self {
        Self {
            element,
            mode,
            channel,
            tolerance,
            marker: PlaceholderMarker::default(),
        }
    }

    /// Use a different placeholder marker
    #[must_use]
    pub fn with_marker(mut self, marker: PlaceholderMarker) -> Self {
        self.marker = marker;
        self
    }

    /// Target element
    #[must_use]
    pub const fn element(&self) -> &ElementRef {
        &self.element
    }

    /// Channel mode fixed at construction
    #[must_use]
    pub const fn mode(&self) -> ChannelMode {
        self.mode
    }

    /// Displayed text, always read through the text channel
    #[must_use]
    pub fn get_text(&self) -> String {
        self.channel.get_text(&self.element)
    }

    /// Exact equality
    pub fn assert_text_equals<'e>(&self, expected: impl Into<Option<&'e str>>) -> Dispatch {
        self.check("assert_text_equals", expected.into(), |e| {
            ExpectedValidator::equals(e)
        })
    }

    /// Exact inequality
    pub fn assert_text_not_equals<'e>(&self, expected: impl Into<Option<&'e str>>) -> Dispatch {
        self.check(
            "assert_text_not_equals",
            expected.into(),
            |e| ExpectedValidator::not_equals(e),
        )
    }

    /// Case-sensitive substring
    pub fn assert_text_contains<'e>(&self, expected: impl Into<Option<&'e str>>) -> Dispatch {
        self.check(
            "assert_text_contains",
            expected.into(),
            |e| ExpectedValidator::contains(e),
        )
    }

    /// Trimmed, case-insensitive substring
    pub fn assert_text_contains_ignore_case_trimmed<'e>(
        &self,
        expected: impl Into<Option<&'e str>>,
    ) -> Dispatch {
        self.check(
            "assert_text_contains_ignore_case_trimmed",
            expected.into(),
            |e| ExpectedValidator::contains_ignore_case_trimmed(e),
        )
    }

    /// Trimmed, case-insensitive equality
    pub fn assert_text_equals_ignore_case_trimmed<'e>(
        &self,
        expected: impl Into<Option<&'e str>>,
    ) -> Dispatch {
        self.check(
            "assert_text_equals_ignore_case_trimmed",
            expected.into(),
            |e| ExpectedValidator::equals_ignore_case_trimmed(e),
        )
    }

    /// Dispatch a caller-supplied validator as is.
    ///
    /// Placeholder suppression does not apply here.
    pub fn assert_text_matches(&self, validator: &dyn Validator) -> Dispatch {
        Dispatch::Dispatched(self.dispatch(validator))
    }

    /// Numeric lower bound using the tolerance in effect right now
    pub fn assert_value_greater_than<'e>(&self, expected: impl Into<Option<&'e str>>) -> Dispatch {
        self.check("assert_value_greater_than", expected.into(), |e| {
            ExpectedValidator::number_greater_than(e, self.tolerance.numeric_tolerance())
        })
    }

    /// Numeric upper bound using the tolerance in effect right now
    pub fn assert_value_less_than<'e>(&self, expected: impl Into<Option<&'e str>>) -> Dispatch {
        self.check("assert_value_less_than", expected.into(), |e| {
            ExpectedValidator::number_less_than(e, self.tolerance.numeric_tolerance())
        })
    }

    fn check<F>(&self, operation: &str, expected: Option<&str>, build: F) -> Dispatch
    where
        F: FnOnce(&str) -> ExpectedValidator,
    {
        match expected {
            Some(value) if !self.marker.suppresses(expected) => {
                let validator = build(value);
                Dispatch::Dispatched(self.dispatch(&validator))
            }
            _ => {
                tracing::debug!(
                    element = %self.element,
                    operation,
                    "no expected value supplied, assertion skipped"
                );
                Dispatch::Skipped
            }
        }
    }

    fn dispatch(&self, validator: &dyn Validator) -> ChannelMode {
        tracing::trace!(
            element = %self.element,
            channel = %self.mode,
            expectation = %validator.describe(),
            "dispatching verification"
        );
        match self.mode {
            ChannelMode::Value => self.channel.assert_value_matches(&self.element, validator),
            ChannelMode::Text => self.channel.assert_text_matches(&self.element, validator),
        }
        self.mode
    }
}

/// Assertion capability set of a GUI component.
///
/// Implementors provide [`ValueComponent::assertions`]; every other method
/// delegates to it.
pub trait ValueComponent {
    /// The dispatcher owned by this component
    fn assertions(&self) -> &ComponentAssertions;

    /// Displayed text of the component
    fn get_text(&self) -> String {
        self.assertions().get_text()
    }

    /// See [`ComponentAssertions::assert_text_equals`]
    fn assert_text_equals<'e>(&self, expected: impl Into<Option<&'e str>>) -> Dispatch {
        self.assertions().assert_text_equals(expected)
    }

    /// See [`ComponentAssertions::assert_text_not_equals`]
    fn assert_text_not_equals<'e>(&self, expected: impl Into<Option<&'e str>>) -> Dispatch {
        self.assertions().assert_text_not_equals(expected)
    }

    /// See [`ComponentAssertions::assert_text_contains`]
    fn assert_text_contains<'e>(&self, expected: impl Into<Option<&'e str>>) -> Dispatch {
        self.assertions().assert_text_contains(expected)
    }

    /// See [`ComponentAssertions::assert_text_contains_ignore_case_trimmed`]
    fn assert_text_contains_ignore_case_trimmed<'e>(
        &self,
        expected: impl Into<Option<&'e str>>,
    ) -> Dispatch {
        self.assertions()
            .assert_text_contains_ignore_case_trimmed(expected)
    }

    /// See [`ComponentAssertions::assert_text_equals_ignore_case_trimmed`]
    fn assert_text_equals_ignore_case_trimmed<'e>(
        &self,
        expected: impl Into<Option<&'e str>>,
    ) -> Dispatch {
        self.assertions()
            .assert_text_equals_ignore_case_trimmed(expected)
    }

    /// See [`ComponentAssertions::assert_text_matches`]
    fn assert_text_matches(&self, validator: &dyn Validator) -> Dispatch {
        self.assertions().assert_text_matches(validator)
    }

    /// See [`ComponentAssertions::assert_value_greater_than`]
    fn assert_value_greater_than<'e>(&self, expected: impl Into<Option<&'e str>>) -> Dispatch {
        self.assertions().assert_value_greater_than(expected)
    }

    /// See [`ComponentAssertions::assert_value_less_than`]
    fn assert_value_less_than<'e>(&self, expected: impl Into<Option<&'e str>>) -> Dispatch {
        self.assertions().assert_value_less_than(expected)
    }
}

/// Built-in component kinds and the channel their assertions use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Single-line input; asserts on its bound value
    InputField,
    /// Multi-line input; asserts on its bound value
    TextArea,
    /// Static text; asserts on displayed text
    Label,
    /// Button caption; asserts on displayed text
    Button,
    /// Drop-down; asserts on the displayed text of the selected entry
    ComboBox,
}

impl ComponentKind {
    /// Element-type tag passed to the channel
    #[must_use]
    pub const fn type_tag(self) -> &'static str {
        match self {
            Self::InputField => "InputField",
            Self::TextArea => "TextArea",
            Self::Label => "Label",
            Self::Button => "Button",
            Self::ComboBox => "ComboBox",
        }
    }

    /// Channel used by this kind's assertions
    #[must_use]
    pub const fn channel_mode(self) -> ChannelMode {
        match self {
            Self::InputField | Self::TextArea => ChannelMode::Value,
            Self::Label | Self::Button | Self::ComboBox => ChannelMode::Text,
        }
    }
}

/// A built-in GUI component
#[derive(Debug, Clone)]
pub struct GuiComponent {
    kind: ComponentKind,
    assertions: ComponentAssertions,
}

impl GuiComponent {
    /// Component kind
    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Target element
    #[must_use]
    pub const fn element(&self) -> &ElementRef {
        self.assertions.element()
    }
}

impl ValueComponent for GuiComponent {
    fn assertions(&self) -> &ComponentAssertions {
        &self.assertions
    }
}

/// Shared channel and configuration used to build components for one test.
#[derive(Clone)]
pub struct VerifyContext {
    channel: Arc<dyn GuiChannel>,
    config: Arc<RuntimeConfig>,
}

impl fmt::Debug for VerifyContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl VerifyContext {
    /// Create a context over `channel` and `config`
    #[must_use]
    pub fn new(channel: Arc<dyn GuiChannel>, config: Arc<RuntimeConfig>) -> Self {
        Self { channel, config }
    }

    /// Shared configuration
    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Dispatcher for an arbitrary element and mode
    #[must_use]
    pub fn assertions(&self, element: ElementRef, mode: ChannelMode) -> ComponentAssertions {
        let tolerance: Arc<dyn ToleranceSource> = self.config.clone();
        ComponentAssertions::new(element, mode, Arc::clone(&self.channel), tolerance)
            .with_marker(self.config.null_marker().clone())
    }

    /// Build a component of `kind`
    #[must_use]
    pub fn component(
        &self,
        kind: ComponentKind,
        name: impl Into<String>,
        locator: impl Into<String>,
    ) -> GuiComponent {
        let element = ElementRef::new(kind.type_tag(), name, locator);
        GuiComponent {
            kind,
            assertions: self.assertions(element, kind.channel_mode()),
        }
    }
}

//! probar-verify: data-driven GUI verification
//!
//! Two cores for data-driven GUI test suites:
//!
//! - **Test data**: an immutable document of named segments holding ordered
//!   rows of named field values, expanded into one invocation per row.
//! - **Component assertions**: a dispatcher that routes each assertion to the
//!   value channel or the text channel of a GUI automation service, skipping
//!   assertions whose expected value is the "no value" placeholder.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   row    ┌──────────────────────┐  validator  ┌────────────┐
//! │ TestData     │────────► │ ComponentAssertions  │───────────► │ GuiChannel │
//! │ Metadata     │  values  │ placeholder? → skip  │ value|text  │ (external) │
//! └──────────────┘          │ build strategy (tol) │             └────────────┘
//!                           └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use probar_verify::prelude::*;
//!
//! let doc = TestDataMetadata::from_yaml(
//!     "segments:\n  - name: totals\n    rows:\n      - values: { total: \"42\", label: ~ }\n",
//! )
//! .unwrap();
//!
//! let channel = Arc::new(
//!     RecordingChannel::new()
//!         .with_element(ElementRef::new("InputField", "total", "#total"), "42.00", "42"),
//! );
//! let ctx = VerifyContext::new(channel.clone(), Arc::new(RuntimeConfig::default()));
//! let total = ctx.component(ComponentKind::InputField, "total", "#total");
//! let label = ctx.component(ComponentKind::Label, "label", "#label");
//!
//! for invocation in doc.invocations("totals").unwrap() {
//!     total.assert_text_equals(invocation.value("total").unwrap());
//!     label.assert_text_equals(invocation.value("label").unwrap());
//! }
//! assert_eq!(channel.verification_count(), 1);
//! assert!(channel.verify().is_ok());
//! ```

#![warn(missing_docs)]

mod channel;
mod component;
mod config;
pub mod data;
mod element;
mod logging;
mod marker;
mod result;
mod validator;

pub use channel::{ChannelMode, ElementState, GuiChannel, RecordingChannel, Verification};
pub use component::{
    ComponentAssertions, ComponentKind, Dispatch, GuiComponent, ValueComponent, VerifyContext,
};
pub use config::{
    FixedTolerance, RuntimeConfig, RuntimeSettings, ToleranceSource, NULL_MARKER_ENV,
    TOLERANCE_ENV,
};
pub use data::{DataFormat, Invocation, TestDataMetadata, TestDataRow, TestDataSegment};
pub use element::ElementRef;
pub use logging::{init_tracing, Verbosity};
pub use marker::{PlaceholderMarker, DEFAULT_NULL_MARKER};
pub use result::{VerifyError, VerifyResult};
pub use validator::{Comparison, ExpectedValidator, FnValidator, Validator};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::{
        ChannelMode, Comparison, ComponentAssertions, ComponentKind, Dispatch, ElementRef,
        ExpectedValidator, FixedTolerance, FnValidator, GuiChannel, GuiComponent, Invocation,
        PlaceholderMarker, RecordingChannel, RuntimeConfig, TestDataMetadata, TestDataRow,
        TestDataSegment, ToleranceSource, Validator, ValueComponent, VerifyContext, VerifyError,
        VerifyResult,
    };
}

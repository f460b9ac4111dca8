//! Segmented test data for data-driven test invocations.
//!
//! - [`model`]: the immutable document shape and its queries
//! - [`loader`]: YAML/JSON parsing
//! - [`invocation`]: one invocation per segment row

pub mod invocation;
pub mod loader;
pub mod model;

pub use invocation::Invocation;
pub use loader::DataFormat;
pub use model::{TestDataMetadata, TestDataRow, TestDataSegment};

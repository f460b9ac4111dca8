//! Expansion of a segment into data-driven test invocations.

use super::model::{TestDataMetadata, TestDataRow, TestDataSegment};
use crate::result::{VerifyError, VerifyResult};
use std::fmt;

/// One execution of a data-driven test, bound to one row of one segment
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    segment: &'a TestDataSegment,
    index: usize,
    row: &'a TestDataRow,
}

impl<'a> Invocation<'a> {
    /// Name of the segment the row came from
    #[must_use]
    pub fn segment_name(&self) -> &'a str {
        self.segment.name()
    }

    /// Position of the row in its segment
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The bound row
    #[must_use]
    pub const fn row(&self) -> &'a TestDataRow {
        self.row
    }

    /// Whether the row is marked ignored
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        self.row.is_ignored()
    }

    /// Reason the row is ignored
    #[must_use]
    pub fn ignore_reason(&self) -> Option<&'a str> {
        self.row.ignore_reason()
    }

    /// Value of `field` in the bound row; `Ok(None)` for a null field
    pub fn value(&self, field: &str) -> VerifyResult<Option<&'a str>> {
        self.row.get(field).ok_or_else(|| VerifyError::FieldNotFound {
            segment: self.segment.name().to_string(),
            field: field.to_string(),
        })
    }
}

impl fmt::Display for Invocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.segment.name(), self.index)
    }
}

impl TestDataMetadata {
    /// One invocation per row of `segment`, in source order.
    ///
    /// Fails up front if the segment does not exist, so a misspelled segment
    /// name never turns into zero silent iterations. Ignored rows are kept
    /// and flagged.
    pub fn invocations(&self, segment: &str) -> VerifyResult<Vec<Invocation<'_>>> {
        let segment = self.segment(segment)?;
        let invocations: Vec<_> = segment
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| Invocation {
                segment,
                index,
                row,
            })
            .collect();
        tracing::debug!(
            segment = segment.name(),
            rows = invocations.len(),
            ignored = invocations.iter().filter(|i| i.is_ignored()).count(),
            "resolved data-driven invocations"
        );
        Ok(invocations)
    }
}

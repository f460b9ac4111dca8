//! In-memory shape of a test data document.
//!
//! A [`TestDataMetadata`] exclusively owns an ordered list of
//! [`TestDataSegment`]s, each an ordered list of [`TestDataRow`]s. Nothing is
//! mutable once a document is assembled; loading again produces a new,
//! independent instance.

use crate::result::{VerifyError, VerifyResult};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

/// Field values of one row, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FieldValues(Vec<(String, Option<String>)>);

impl Serialize for FieldValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FieldValuesVisitor)
    }
}

struct FieldValuesVisitor;

impl<'de> Visitor<'de> for FieldValuesVisitor {
    type Value = FieldValues;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of field names to scalar values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut values: Vec<(String, Option<String>)> =
            Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, Scalar(value))) = access.next_entry::<String, Scalar>()? {
            if values.iter().any(|(existing, _)| *existing == name) {
                return Err(de::Error::custom(format!("duplicate field '{name}'")));
            }
            values.push((name, value));
        }
        Ok(FieldValues(values))
    }
}

/// A scalar field value.
///
/// Only strings and null are accepted. Unquoted numbers and booleans reach
/// the visitor already parsed, so their source text (`10.50`, `1e3`, `yes`)
/// cannot be recovered and they are rejected.
struct Scalar(Option<String>);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarVisitor)
    }
}

fn unquoted<E: de::Error>(value: impl fmt::Display) -> E {
    E::custom(format!(
        "unquoted value {value}: quote field values so their exact text is kept"
    ))
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a quoted string or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Scalar(Some(v.to_string())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Scalar(Some(v)))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Err(unquoted(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Err(unquoted(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Err(unquoted(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Err(unquoted(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Scalar(None))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Scalar(None))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

/// One row of a segment: named field values in document order.
///
/// A value of `None` is a null field and suppresses any assertion it feeds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestDataRow {
    values: FieldValues,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ignored: Option<String>,
}

impl TestDataRow {
    /// Create an empty row
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field value; a repeated name replaces the earlier value in place
    #[must_use]
    pub fn with_value(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_field(name.into(), Some(value.into()))
    }

    /// Append a null field
    #[must_use]
    pub fn with_null(self, name: impl Into<String>) -> Self {
        self.with_field(name.into(), None)
    }

    fn with_field(mut self, name: String, value: Option<String>) -> Self {
        match self.values.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.values.0.push((name, value)),
        }
        self
    }

    /// Mark the row as ignored with a reason
    #[must_use]
    pub fn ignored(mut self, reason: impl Into<String>) -> Self {
        self.ignored = Some(reason.into());
        self
    }

    /// Value of `field`: `None` if the row has no such field, `Some(None)` if null
    #[must_use]
    pub fn get(&self, field: &str) -> Option<Option<&str>> {
        self.values
            .0
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_deref())
    }

    /// Field names and values in document order
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values
            .0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Field names in document order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.values.0.iter().map(|(name, _)| name.as_str())
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.0.len()
    }

    /// Whether the row has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.0.is_empty()
    }

    /// Whether the row should be reported as skipped
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        self.ignored.is_some()
    }

    /// Reason given for ignoring the row
    #[must_use]
    pub fn ignore_reason(&self) -> Option<&str> {
        self.ignored.as_deref()
    }
}

/// A named partition of a test data document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestDataSegment {
    name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    fields: Vec<String>,
    #[serde(default)]
    rows: Vec<TestDataRow>,
}

impl TestDataSegment {
    /// Create a segment from rows in order
    #[must_use]
    pub fn new(name: impl Into<String>, rows: Vec<TestDataRow>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            rows,
        }
    }

    /// Declare the fields rows may use
    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Segment name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields; empty when the segment does not declare any
    #[must_use]
    pub fn declared_fields(&self) -> &[String] {
        &self.fields
    }

    /// Rows in source order
    #[must_use]
    pub fn rows(&self) -> &[TestDataRow] {
        &self.rows
    }

    /// Row at `index`
    pub fn row(&self, index: usize) -> VerifyResult<&TestDataRow> {
        self.rows.get(index).ok_or_else(|| VerifyError::RowOutOfRange {
            segment: self.name.clone(),
            index,
            len: self.rows.len(),
        })
    }

    /// Value of `field` in the row at `index`
    pub fn value(&self, index: usize, field: &str) -> VerifyResult<Option<&str>> {
        let row = self.row(index)?;
        row.get(field).ok_or_else(|| VerifyError::FieldNotFound {
            segment: self.name.clone(),
            field: field.to_string(),
        })
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the segment has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check_declared_fields(&self) -> VerifyResult<()> {
        if self.fields.is_empty() {
            return Ok(());
        }
        for row in &self.rows {
            if let Some(field) = row.field_names().find(|f| !self.fields.iter().any(|d| d.as_str() == *f)) {
                return Err(VerifyError::UndeclaredField {
                    segment: self.name.clone(),
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMetadata {
    segments: Vec<TestDataSegment>,
}

impl TryFrom<RawMetadata> for TestDataMetadata {
    type Error = VerifyError;

    fn try_from(raw: RawMetadata) -> VerifyResult<Self> {
        Self::new(raw.segments)
    }
}

/// Top-level container of an external test data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMetadata")]
pub struct TestDataMetadata {
    segments: Vec<TestDataSegment>,
}

impl TestDataMetadata {
    /// Assemble a document, rejecting duplicate segment names and rows that
    /// use undeclared fields
    pub fn new(segments: Vec<TestDataSegment>) -> VerifyResult<Self> {
        let mut seen = HashSet::new();
        for segment in &segments {
            if !seen.insert(segment.name()) {
                return Err(VerifyError::DuplicateSegment {
                    segment: segment.name().to_string(),
                });
            }
            segment.check_declared_fields()?;
        }
        Ok(Self { segments })
    }

    /// Segments in source order
    #[must_use]
    pub fn segments(&self) -> &[TestDataSegment] {
        &self.segments
    }

    /// Segment names in source order
    pub fn segment_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(TestDataSegment::name)
    }

    /// Look up a segment by exact name
    pub fn segment(&self, name: &str) -> VerifyResult<&TestDataSegment> {
        self.segments
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| VerifyError::SegmentNotFound {
                segment: name.to_string(),
                available: self.segment_names().map(str::to_string).collect(),
            })
    }

    /// Whether a segment named `name` exists
    #[must_use]
    pub fn contains_segment(&self, name: &str) -> bool {
        self.segments.iter().any(|s| s.name() == name)
    }

    /// Number of segments
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the document has no segments
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

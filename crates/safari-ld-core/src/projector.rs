//! # Field Projector
//!
//! Maps an entity's fields into output attributes.
//!
//! - Required fields are copied verbatim; an absent one makes the whole
//!   projection fail with `MissingRequiredField`
//! - Optional fields appear only when present. Absent, blank, non-finite or
//!   empty values never leave a key behind
//! - Nested projections follow the same rule; a nested object that ends up
//!   empty, or misses one of its own required fields, is omitted from the
//!   parent

use crate::SchemaError;
use serde_json::{Map, Number, Value};

// =============================================================================
// FIELD VALUES
// =============================================================================

/// A source value that may or may not be present.
///
/// `into_field` returns `None` for anything that would otherwise be emitted
/// as a placeholder. `into_verbatim` applies the same absence rule but keeps
/// text exactly as given; required fields use it.
pub trait FieldValue: Sized {
    fn into_field(self) -> Option<Value>;

    fn into_verbatim(self) -> Option<Value> {
        self.into_field()
    }
}

impl FieldValue for String {
    fn into_field(self) -> Option<Value> {
        let trimmed = self.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == self.len() {
            Some(Value::String(self))
        } else {
            Some(Value::String(trimmed.to_string()))
        }
    }

    fn into_verbatim(self) -> Option<Value> {
        (!self.trim().is_empty()).then_some(Value::String(self))
    }
}

impl FieldValue for &str {
    fn into_field(self) -> Option<Value> {
        let trimmed = self.trim();
        (!trimmed.is_empty()).then(|| Value::String(trimmed.to_string()))
    }

    fn into_verbatim(self) -> Option<Value> {
        (!self.trim().is_empty()).then(|| Value::String(self.to_string()))
    }
}

impl FieldValue for &String {
    fn into_field(self) -> Option<Value> {
        self.as_str().into_field()
    }

    fn into_verbatim(self) -> Option<Value> {
        self.as_str().into_verbatim()
    }
}

impl FieldValue for f64 {
    fn into_field(self) -> Option<Value> {
        Number::from_f64(self).map(Value::Number)
    }
}

impl FieldValue for u32 {
    fn into_field(self) -> Option<Value> {
        Some(Value::from(self))
    }
}

impl FieldValue for usize {
    fn into_field(self) -> Option<Value> {
        Some(Value::from(self))
    }
}

impl FieldValue for &[String] {
    fn into_field(self) -> Option<Value> {
        let items: Vec<Value> = self.iter().filter_map(FieldValue::into_field).collect();
        (!items.is_empty()).then_some(Value::Array(items))
    }
}

impl FieldValue for &Vec<String> {
    fn into_field(self) -> Option<Value> {
        self.as_slice().into_field()
    }
}

impl FieldValue for Vec<String> {
    fn into_field(self) -> Option<Value> {
        self.as_slice().into_field()
    }
}

impl FieldValue for Value {
    fn into_field(self) -> Option<Value> {
        match self {
            Value::Null => None,
            Value::String(s) => s.into_field(),
            Value::Array(items) if items.is_empty() => None,
            Value::Object(map) if map.is_empty() => None,
            other => Some(other),
        }
    }

    fn into_verbatim(self) -> Option<Value> {
        match self {
            Value::String(s) => s.into_verbatim(),
            other => other.into_field(),
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn into_field(self) -> Option<Value> {
        self.and_then(FieldValue::into_field)
    }

    fn into_verbatim(self) -> Option<Value> {
        self.and_then(FieldValue::into_verbatim)
    }
}

/// A number for consumers that expect it as text: plain decimal notation,
/// no grouping separators, no exponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecimalText(pub f64);

impl FieldValue for DecimalText {
    fn into_field(self) -> Option<Value> {
        self.0
            .is_finite()
            .then(|| Value::String(format!("{}", self.0)))
    }
}

// =============================================================================
// PROJECTOR
// =============================================================================

/// Builder that projects one entity (or one nested object) into attributes.
#[derive(Debug, Clone)]
pub struct FieldProjector {
    entity: String,
    attributes: Map<String, Value>,
    has_content: bool,
    missing: Option<&'static str>,
}

impl FieldProjector {
    /// Start a projection. `entity` labels errors, e.g. `tour 'great-migration'`.
    #[must_use]
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            attributes: Map::new(),
            has_content: false,
            missing: None,
        }
    }

    /// Set a constant `@type` on a nested object. Does not count as content.
    #[must_use]
    pub fn typed(self, type_tag: &str) -> Self {
        self.fixed("@type", type_tag)
    }

    /// Set a constant attribute. Like `typed`, it does not count as content,
    /// so an object holding only constants is still omitted when nested.
    #[must_use]
    pub fn fixed(mut self, key: &str, value: &str) -> Self {
        self.attributes
            .insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// Copy a required field verbatim. The first absent one is remembered.
    #[must_use]
    pub fn required(mut self, key: &'static str, value: impl FieldValue) -> Self {
        match value.into_verbatim() {
            Some(v) => self.put(key, v),
            None => {
                self.missing.get_or_insert(key);
            }
        }
        self
    }

    /// Copy an optional field if present.
    #[must_use]
    pub fn optional(mut self, key: &'static str, value: impl FieldValue) -> Self {
        if let Some(v) = value.into_field() {
            self.put(key, v);
        }
        self
    }

    /// Project a nested object under `key`, omitted when it comes out empty
    /// or incomplete.
    #[must_use]
    pub fn nested(self, key: &'static str, nested: FieldProjector) -> Self {
        let value = nested.finish_nested();
        self.optional(key, value)
    }

    /// Project a list of nested objects; incomplete ones are dropped and an
    /// empty result leaves no key.
    #[must_use]
    pub fn nested_list(self, key: &'static str, items: Vec<FieldProjector>) -> Self {
        let values: Vec<Value> = items
            .into_iter()
            .filter_map(FieldProjector::finish_nested)
            .collect();
        self.optional(key, Value::Array(values))
    }

    /// Finish the projection.
    pub fn finish(self) -> Result<Map<String, Value>, SchemaError> {
        match self.missing {
            Some(field) => Err(SchemaError::MissingRequiredField {
                entity: self.entity,
                field: field.to_string(),
            }),
            None => Ok(self.attributes),
        }
    }

    /// Finish as a nested value: `None` when incomplete or without content.
    #[must_use]
    pub fn finish_nested(self) -> Option<Value> {
        if !self.has_content {
            return None;
        }
        self.finish().ok().map(Value::Object)
    }

    fn put(&mut self, key: &'static str, value: Value) {
        self.attributes.insert(key.to_string(), value);
        self.has_content = true;
    }
}

/// Project an entity from a required-field list and an optional-field list.
///
/// Entries are `(key, value)` pairs with `None` meaning absent; output keeps
/// required fields first, then optional ones, each in the given order.
pub fn project<R, O>(entity: &str, required: R, optional: O) -> Result<Map<String, Value>, SchemaError>
where
    R: IntoIterator<Item = (&'static str, Option<Value>)>,
    O: IntoIterator<Item = (&'static str, Option<Value>)>,
{
    let projector = required
        .into_iter()
        .fold(FieldProjector::new(entity), |p, (key, value)| p.required(key, value));
    optional
        .into_iter()
        .fold(projector, |p, (key, value)| p.optional(key, value))
        .finish()
}

// =============================================================================
// TESTS
// =============================================================================

//! Composite field mapping
//!
//! Walks a composite descriptor's field set against a mapping node,
//! resolving each field's wire path through the name variants and
//! coercing the located values. Absent fields are never errors: they
//! take the field kind's zero value.

use super::convert::{coerce, CoerceOptions};
use crate::descriptor::{CompositeDescriptor, CompositeValue, TypedValue};
use crate::error::{Error, Result};
use crate::name;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::trace;

/// Map a mapping node onto a composite descriptor.
///
/// A conversion failure on any located field fails the whole call; a
/// half-populated composite is never returned as success.
pub fn map_composite(
    node: &Value,
    target: &CompositeDescriptor,
    opts: &CoerceOptions,
) -> Result<TypedValue> {
    let Value::Object(data) = node else {
        return Err(Error::conversion(target.name.clone(), node.to_string()));
    };

    let mut fields = BTreeMap::new();
    for field in &target.fields {
        let value = match locate(data, &field.path_segments()) {
            Some(located) if !located.is_null() => coerce(located, &field.ty, opts)?,
            _ => {
                trace!(field = %field.name, composite = %target.name, "field absent, using zero value");
                field.ty.zero_value()
            }
        };
        fields.insert(field.name.clone(), value);
    }

    Ok(TypedValue::Composite(CompositeValue::new(
        target.name.clone(),
        fields,
    )))
}

/// Walk a dotted wire path against nested mappings.
///
/// Each segment resolves through the name variants; an unresolved
/// segment, or an interior segment landing on a non-mapping node,
/// abandons the walk.
fn locate<'a>(data: &'a Map<String, Value>, segments: &[&str]) -> Option<&'a Value> {
    let mut current = data;
    for (i, segment) in segments.iter().enumerate() {
        let key = name::resolve(segment, current.keys().map(String::as_str))?;
        let value = current.get(&key)?;
        if i == segments.len() - 1 {
            return Some(value);
        }
        current = value.as_object()?;
    }
    None
}

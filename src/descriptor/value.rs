//! Typed output value graph
//!
//! [`TypedValue`] is the result of a decode: a value graph whose shape
//! mirrors the target descriptor. Accessors return `Option` so callers
//! can pattern-match or drill in without panicking.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use url::Url;
use uuid::Uuid;

// ============================================================================
// Map Keys
// ============================================================================

/// Key of a decoded mapping, per the mapping's declared key kind
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum MapKey {
    /// Integer key parsed from the wire key
    Int(i64),
    /// String key kept verbatim
    Str(String),
}

impl std::fmt::Display for MapKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapKey::Int(n) => write!(f, "{n}"),
            MapKey::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for MapKey {
    fn from(key: &str) -> Self {
        MapKey::Str(key.to_string())
    }
}

impl From<String> for MapKey {
    fn from(key: String) -> Self {
        MapKey::Str(key)
    }
}

impl From<i64> for MapKey {
    fn from(key: i64) -> Self {
        MapKey::Int(key)
    }
}

// ============================================================================
// URI References
// ============================================================================

/// A URI reference, absolute or relative.
///
/// `url::Url` cannot represent a base-less relative reference, so
/// relative wire values are preserved as text instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriRef {
    /// Fully parsed absolute URL
    Absolute(Url),
    /// Relative reference, kept verbatim
    Relative(String),
}

impl UriRef {
    /// The reference as a string slice
    pub fn as_str(&self) -> &str {
        match self {
            UriRef::Absolute(url) => url.as_str(),
            UriRef::Relative(path) => path,
        }
    }

    /// Whether this is an absolute URL
    pub fn is_absolute(&self) -> bool {
        matches!(self, UriRef::Absolute(_))
    }
}

impl std::fmt::Display for UriRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Typed Values
// ============================================================================

/// A decoded, typed value
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// Absent or explicit null
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    /// Exact decimal number
    Decimal(Decimal),
    Uuid(Uuid),
    Uri(UriRef),
    /// Instant in UTC
    DateTime(DateTime<Utc>),
    /// Instant carrying a UTC offset
    DateTimeOffset(DateTime<FixedOffset>),
    Duration(Duration),
    /// Canonical member name of the target enum
    Enum(String),
    Sequence(Vec<TypedValue>),
    Mapping(BTreeMap<MapKey, TypedValue>),
    Composite(CompositeValue),
}

impl TypedValue {
    /// Human-readable kind name for error messages and diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            TypedValue::Null => "Null",
            TypedValue::Bool(_) => "Bool",
            TypedValue::Int(_) => "Int",
            TypedValue::UInt(_) => "UInt",
            TypedValue::Float(_) => "Float",
            TypedValue::String(_) => "String",
            TypedValue::Decimal(_) => "Decimal",
            TypedValue::Uuid(_) => "Uuid",
            TypedValue::Uri(_) => "Uri",
            TypedValue::DateTime(_) => "DateTime",
            TypedValue::DateTimeOffset(_) => "DateTimeOffset",
            TypedValue::Duration(_) => "Duration",
            TypedValue::Enum(_) => "Enum",
            TypedValue::Sequence(_) => "Sequence",
            TypedValue::Mapping(_) => "Mapping",
            TypedValue::Composite(_) => "Composite",
        }
    }

    /// Whether this value is null/absent
    pub fn is_null(&self) -> bool {
        matches!(self, TypedValue::Null)
    }

    /// Extract a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract a signed integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TypedValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract an unsigned integer
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            TypedValue::UInt(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract a float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract a string slice (string or enum member)
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) | TypedValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Extract the sequence elements
    pub fn as_sequence(&self) -> Option<&[TypedValue]> {
        match self {
            TypedValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Extract the mapping entries
    pub fn as_mapping(&self) -> Option<&BTreeMap<MapKey, TypedValue>> {
        match self {
            TypedValue::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Extract the composite value
    pub fn as_composite(&self) -> Option<&CompositeValue> {
        match self {
            TypedValue::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    /// Convenience: field of a composite value
    pub fn get(&self, field: &str) -> Option<&TypedValue> {
        self.as_composite().and_then(|c| c.get(field))
    }
}

// ============================================================================
// Composite Values
// ============================================================================

/// A decoded composite: named fields mapped to typed values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompositeValue {
    /// Name from the composite descriptor
    pub name: String,
    /// Field values keyed by field identifier
    pub fields: BTreeMap<String, TypedValue>,
}

impl CompositeValue {
    /// Create a composite value
    pub fn new(name: impl Into<String>, fields: BTreeMap<String, TypedValue>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Look up a field value by field identifier
    pub fn get(&self, field: &str) -> Option<&TypedValue> {
        self.fields.get(field)
    }
}

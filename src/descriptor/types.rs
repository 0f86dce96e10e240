//! Type descriptor definitions
//!
//! Descriptors drive the coercion and mapping layers. They are plain
//! values: cheap to clone, comparable, and free of any runtime type
//! inspection.

use super::value::TypedValue;
use rust_decimal::Decimal;
use uuid::Uuid;

// ============================================================================
// Type Descriptor
// ============================================================================

/// Description of a target value shape
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    /// Boolean primitive
    Bool,
    /// Signed 64-bit integer primitive
    Int,
    /// Unsigned 64-bit integer primitive
    UInt,
    /// 64-bit floating point primitive
    Float,
    /// UTF-8 string
    String,
    /// Exact decimal number
    Decimal,
    /// Unique identifier (UUID/GUID)
    Uuid,
    /// URI reference, relative or absolute
    Uri,
    /// Instant in time (UTC)
    DateTime,
    /// Instant in time carrying a UTC offset
    DateTimeOffset,
    /// Span of time
    Duration,
    /// Closed set of named members
    Enum(EnumDescriptor),
    /// Value that may be absent
    Optional(Box<TypeDescriptor>),
    /// Ordered sequence of one element kind
    Sequence(Box<TypeDescriptor>),
    /// Mapping from a declared key kind to one value kind
    Mapping(MappingDescriptor),
    /// Object with named, typed fields
    Composite(CompositeDescriptor),
    /// Untyped: the payload's own shape is preserved
    Dynamic,
}

impl TypeDescriptor {
    /// Shorthand for an optional of `inner`
    pub fn optional(inner: TypeDescriptor) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Shorthand for a sequence of `inner`
    pub fn sequence(inner: TypeDescriptor) -> Self {
        Self::Sequence(Box::new(inner))
    }

    /// Shorthand for a string-keyed mapping of `value`
    pub fn mapping(value: TypeDescriptor) -> Self {
        Self::Mapping(MappingDescriptor {
            key: KeyKind::String,
            value: Box::new(value),
        })
    }

    /// Shorthand for a mapping with an explicit key kind
    pub fn mapping_with_keys(key: KeyKind, value: TypeDescriptor) -> Self {
        Self::Mapping(MappingDescriptor {
            key,
            value: Box::new(value),
        })
    }

    /// Human-readable kind name used in error messages
    pub fn kind_name(&self) -> &str {
        match self {
            TypeDescriptor::Bool => "Bool",
            TypeDescriptor::Int => "Int",
            TypeDescriptor::UInt => "UInt",
            TypeDescriptor::Float => "Float",
            TypeDescriptor::String => "String",
            TypeDescriptor::Decimal => "Decimal",
            TypeDescriptor::Uuid => "Uuid",
            TypeDescriptor::Uri => "Uri",
            TypeDescriptor::DateTime => "DateTime",
            TypeDescriptor::DateTimeOffset => "DateTimeOffset",
            TypeDescriptor::Duration => "Duration",
            TypeDescriptor::Enum(desc) => &desc.name,
            TypeDescriptor::Optional(_) => "Optional",
            TypeDescriptor::Sequence(_) => "Sequence",
            TypeDescriptor::Mapping(_) => "Mapping",
            TypeDescriptor::Composite(desc) => &desc.name,
            TypeDescriptor::Dynamic => "Dynamic",
        }
    }

    /// The value an absent field takes for this kind.
    ///
    /// Primitives default to their natural zero; collections to empty;
    /// optional, enum, URI, temporal, composite, and dynamic kinds to
    /// `Null` (there is no zero instant or zero member to invent).
    pub fn zero_value(&self) -> TypedValue {
        match self {
            TypeDescriptor::Bool => TypedValue::Bool(false),
            TypeDescriptor::Int => TypedValue::Int(0),
            TypeDescriptor::UInt => TypedValue::UInt(0),
            TypeDescriptor::Float => TypedValue::Float(0.0),
            TypeDescriptor::String => TypedValue::String(String::new()),
            TypeDescriptor::Decimal => TypedValue::Decimal(Decimal::ZERO),
            TypeDescriptor::Uuid => TypedValue::Uuid(Uuid::nil()),
            TypeDescriptor::Duration => TypedValue::Duration(chrono::Duration::zero()),
            TypeDescriptor::Sequence(_) => TypedValue::Sequence(Vec::new()),
            TypeDescriptor::Mapping(_) => TypedValue::Mapping(std::collections::BTreeMap::new()),
            TypeDescriptor::Uri
            | TypeDescriptor::DateTime
            | TypeDescriptor::DateTimeOffset
            | TypeDescriptor::Enum(_)
            | TypeDescriptor::Optional(_)
            | TypeDescriptor::Composite(_)
            | TypeDescriptor::Dynamic => TypedValue::Null,
        }
    }
}

// ============================================================================
// Enum Descriptor
// ============================================================================

/// A closed set of named enum members
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDescriptor {
    /// Enum name, used in error messages
    pub name: String,
    /// Member names in declaration order
    pub members: Vec<String>,
}

impl EnumDescriptor {
    /// Create an enum descriptor from a name and member list
    pub fn new(
        name: impl Into<String>,
        members: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Mapping Descriptor
// ============================================================================

/// Kind of key a mapping target declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyKind {
    /// String keys, kept verbatim
    #[default]
    String,
    /// Integer keys, parsed from the wire's string keys
    Int,
}

/// A mapping from a declared key kind to one value kind
#[derive(Debug, Clone, PartialEq)]
pub struct MappingDescriptor {
    /// Declared key kind
    pub key: KeyKind,
    /// Value descriptor
    pub value: Box<TypeDescriptor>,
}

// ============================================================================
// Composite Descriptor
// ============================================================================

/// An object target with named, typed fields
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeDescriptor {
    /// Composite name, used in error messages and on decoded values
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<FieldDescriptor>,
}

impl CompositeDescriptor {
    /// Start building a composite descriptor
    pub fn builder(name: impl Into<String>) -> CompositeBuilder {
        CompositeBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Look up a field descriptor by field identifier
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// One named field of a composite target
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field identifier on the target
    pub name: String,
    /// Explicit wire-name override, when the payload key never matches
    /// any name variant of the identifier
    pub wire_name: Option<String>,
    /// Dotted path override for fields sourced from nested payloads
    pub wire_path: Option<String>,
    /// Descriptor of the field's value
    pub ty: TypeDescriptor,
}

impl FieldDescriptor {
    /// The wire path segments to walk for this field.
    ///
    /// A dotted-path override splits on `.`; otherwise the wire name (or
    /// the field identifier) is a single segment.
    pub fn path_segments(&self) -> Vec<&str> {
        match &self.wire_path {
            Some(path) => path.split('.').collect(),
            None => vec![self.wire_name.as_deref().unwrap_or(&self.name)],
        }
    }
}

/// Builder for [`CompositeDescriptor`]
#[derive(Debug, Clone)]
pub struct CompositeBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl CompositeBuilder {
    /// Add a field mapped from its own name variants
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            wire_name: None,
            wire_path: None,
            ty,
        });
        self
    }

    /// Add a field with an explicit wire-name override
    #[must_use]
    pub fn field_as(
        mut self,
        name: impl Into<String>,
        wire_name: impl Into<String>,
        ty: TypeDescriptor,
    ) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            wire_name: Some(wire_name.into()),
            wire_path: None,
            ty,
        });
        self
    }

    /// Add a field sourced from a dotted path into nested payload objects
    #[must_use]
    pub fn field_at(
        mut self,
        name: impl Into<String>,
        wire_path: impl Into<String>,
        ty: TypeDescriptor,
    ) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            wire_name: None,
            wire_path: Some(wire_path.into()),
            ty,
        });
        self
    }

    /// Finish building the descriptor
    pub fn build(self) -> CompositeDescriptor {
        CompositeDescriptor {
            name: self.name,
            fields: self.fields,
        }
    }
}

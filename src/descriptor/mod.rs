//! Target shape descriptors and the typed value graph
//!
//! A [`TypeDescriptor`] statically describes the shape a payload should
//! decode into: primitives, enums, optionals, sequences, mappings,
//! composites with named fields, and the temporal/decimal/identifier
//! kinds. Descriptors replace runtime reflection entirely: the calling
//! application declares each target shape once (by hand or via
//! [`CompositeDescriptor::builder`]) and reuses it across decode calls.
//!
//! Decoding produces a [`TypedValue`] graph mirroring the descriptor.

mod types;
mod value;

pub use types::{
    CompositeBuilder, CompositeDescriptor, EnumDescriptor, FieldDescriptor, KeyKind,
    MappingDescriptor, TypeDescriptor,
};
pub use value::{CompositeValue, MapKey, TypedValue, UriRef};

//! # wiremap
//!
//! A content-type-driven response decoding engine for HTTP API clients.
//! Given a wire payload, a content-type string, and a target shape
//! description, wiremap selects a decoder, parses the payload into an
//! untyped tree, and converts that tree into a typed value graph —
//! tolerating naming-convention mismatches between wire fields and
//! target field names.
//!
//! ## Features
//!
//! - **Content-Type Resolution**: exact MIME patterns, `*+suffix`
//!   wildcards, structured-syntax defaults, and user-supplied decoders
//! - **Name Bridging**: snake_case, camelCase, PascalCase, kebab-case,
//!   and legacy underscore-prefixed wire names all resolve
//! - **Typed Coercion**: primitives, enums, decimals, UUIDs, URIs,
//!   date/times (including `/Date(ms)/` epoch literals), durations,
//!   sequences, mappings, and nested composites
//! - **Explicit Descriptors**: target shapes are declared once, no
//!   runtime reflection
//!
//! ## Quick Start
//!
//! ```rust
//! use wiremap::{CompositeDescriptor, ResponseDecoder, TypeDescriptor, TypedValue};
//!
//! let person = TypeDescriptor::Composite(
//!     CompositeDescriptor::builder("Person")
//!         .field("name", TypeDescriptor::String)
//!         .field("age", TypeDescriptor::Int)
//!         .build(),
//! );
//!
//! let decoder = ResponseDecoder::new();
//! let value = decoder
//!     .decode(r#"{"Name":"Bob","Age":50}"#, "application/json", &person)
//!     .unwrap();
//!
//! assert_eq!(value.get("name").and_then(TypedValue::as_str), Some("Bob"));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       ResponseDecoder                           │
//! │   decode(body, content_type, target) → TypedValue               │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──────────┬──────────────────────┐
//! │   Registry   │        Decoders          │     Coercion         │
//! ├──────────────┼──────────────────────────┼──────────────────────┤
//! │ exact match  │ JSON                     │ name resolution      │
//! │ *+suffix     │ XML                      │ value coercion       │
//! │ defaults     │ user-supplied            │ composite mapping    │
//! └──────────────┴──────────────────────────┴──────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Wire-name variant generation and resolution
pub mod name;

/// Target shape descriptors and the typed value graph
pub mod descriptor;

/// Payload decoders and the content-type registry
pub mod decode;

/// Tree-to-typed-value conversion
pub mod coerce;

/// The decode front end
pub mod engine;

// ============================================================================
// Re-exports
// ============================================================================

pub use coerce::{coerce, CoerceOptions};
pub use decode::{DecoderFormat, DecoderRegistry, JsonDecoder, PayloadDecoder, XmlDecoder};
pub use descriptor::{
    CompositeBuilder, CompositeDescriptor, CompositeValue, EnumDescriptor, FieldDescriptor,
    KeyKind, MapKey, MappingDescriptor, TypeDescriptor, TypedValue, UriRef,
};
pub use engine::ResponseDecoder;
pub use error::{DecodeStage, Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Decode front end
//!
//! # Overview
//!
//! [`ResponseDecoder`] ties the pieces together: it owns the decoder
//! registry and the client-level configuration (root element, date
//! format), and exposes the single `decode` operation. One call
//! resolves a decoder for the response content type, parses the payload
//! into an untyped tree, optionally narrows to a configured root
//! element, and maps the tree onto the target descriptor.
//!
//! Decoding is synchronous and reentrant; a `ResponseDecoder` can be
//! shared across threads as long as registry mutation does not race a
//! decode (mutation requires `&mut self`).

use crate::coerce::{coerce, CoerceOptions};
use crate::decode::{DecoderRegistry, PayloadDecoder};
use crate::descriptor::{TypeDescriptor, TypedValue};
use crate::error::{DecodeStage, Error, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Content-type driven response decoder.
///
/// ```
/// use wiremap::{CompositeDescriptor, ResponseDecoder, TypeDescriptor, TypedValue};
///
/// let person = TypeDescriptor::Composite(
///     CompositeDescriptor::builder("Person")
///         .field("name", TypeDescriptor::String)
///         .field("age", TypeDescriptor::Int)
///         .build(),
/// );
///
/// let decoder = ResponseDecoder::new();
/// let value = decoder
///     .decode(r#"{"name":"Bob","age":50}"#, "application/json", &person)
///     .unwrap();
///
/// assert_eq!(value.get("name").and_then(TypedValue::as_str), Some("Bob"));
/// assert_eq!(value.get("age").and_then(TypedValue::as_i64), Some(50));
/// ```
#[derive(Debug, Default)]
pub struct ResponseDecoder {
    registry: DecoderRegistry,
    root_element: Option<String>,
    date_format: Option<String>,
}

impl ResponseDecoder {
    /// Decoder with the default registry (JSON/XML entries, JSON fallback)
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoder over a preconfigured registry
    pub fn with_registry(registry: DecoderRegistry) -> Self {
        Self {
            registry,
            root_element: None,
            date_format: None,
        }
    }

    /// Descend into this top-level payload key before mapping.
    ///
    /// Applied only when the parsed root is a mapping containing the
    /// key literally; otherwise the root is used as-is.
    #[must_use]
    pub fn root_element(mut self, name: impl Into<String>) -> Self {
        self.root_element = Some(name.into());
        self
    }

    /// Parse temporal values with this exact `chrono` format string
    /// instead of the built-in literal conventions.
    #[must_use]
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    /// Register a decoder for a content-type pattern on the owned registry
    pub fn register(&mut self, pattern: impl Into<String>, decoder: Arc<dyn PayloadDecoder>) {
        self.registry.register(pattern, decoder);
    }

    /// The owned registry
    pub fn registry(&self) -> &DecoderRegistry {
        &self.registry
    }

    /// Decode a response payload into a typed value.
    ///
    /// Failures carry the pipeline stage they occurred in:
    /// registry-resolution, payload-parse, or mapping.
    pub fn decode(
        &self,
        body: &str,
        content_type: &str,
        target: &TypeDescriptor,
    ) -> Result<TypedValue> {
        let decoder = self
            .registry
            .resolve(content_type)
            .map_err(|e| e.at_stage(DecodeStage::RegistryResolution))?;
        debug!(content_type, format = decoder.format(), "decoder resolved");

        let tree = decoder
            .parse(body)
            .map_err(|e| e.at_stage(DecodeStage::PayloadParse))?;

        let root = self.narrow_root(&tree);
        let opts = CoerceOptions {
            date_format: self.date_format.clone(),
        };

        coerce(root, target, &opts).map_err(|e| e.at_stage(DecodeStage::Mapping))
    }

    /// Decode a raw byte payload, validating UTF-8 first.
    pub fn decode_bytes(
        &self,
        body: &[u8],
        content_type: &str,
        target: &TypeDescriptor,
    ) -> Result<TypedValue> {
        let text = std::str::from_utf8(body).map_err(|e| {
            Error::payload_parse("utf-8", e.to_string()).at_stage(DecodeStage::PayloadParse)
        })?;
        self.decode(text, content_type, target)
    }

    fn narrow_root<'a>(&self, tree: &'a Value) -> &'a Value {
        if let (Some(root), Some(map)) = (&self.root_element, tree.as_object()) {
            if let Some(inner) = map.get(root) {
                debug!(root_element = %root, "narrowed to root element");
                return inner;
            }
        }
        tree
    }
}

#[cfg(test)]
mod tests;

//! Payload decoders and content-type resolution
//!
//! Supports: JSON, XML, and user-supplied decoders
//!
//! # Overview
//!
//! A [`PayloadDecoder`] parses raw response text into an untyped
//! `serde_json::Value` tree. The [`DecoderRegistry`] maps content-type
//! patterns (exact MIME strings, `*+suffix` wildcards, and built-in
//! structured-syntax defaults) to decoder instances and resolves a
//! response's content type to the decoder that should handle it.

mod decoders;
mod registry;
mod types;

pub use decoders::{JsonDecoder, XmlDecoder};
pub use registry::DecoderRegistry;
pub use types::{DecoderFormat, PayloadDecoder};

#[cfg(test)]
mod tests;

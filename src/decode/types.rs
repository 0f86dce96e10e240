//! Decoder types and traits
//!
//! Defines the core decoder abstractions.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Built-in wire formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecoderFormat {
    /// JSON format (default)
    #[default]
    Json,
    /// XML format
    Xml,
}

impl DecoderFormat {
    /// Format name used in diagnostics and error messages
    pub fn as_str(self) -> &'static str {
        match self {
            DecoderFormat::Json => "json",
            DecoderFormat::Xml => "xml",
        }
    }
}

impl std::fmt::Display for DecoderFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for parsing a raw payload into an untyped tree.
///
/// Implementations must be pure: no mutation of shared state during a
/// parse, so decoders can be shared across threads behind an `Arc`.
pub trait PayloadDecoder: Send + Sync + std::fmt::Debug {
    /// Format name used in diagnostics and parse errors
    fn format(&self) -> &str;

    /// Parse the payload text into an untyped tree
    fn parse(&self, body: &str) -> Result<Value>;
}

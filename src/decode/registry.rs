//! Content-type to decoder resolution
//!
//! The registry is an ordered collection of (pattern, decoder) entries
//! owned by the client instance. There is no process-wide state:
//! defaults are installed at construction and every mutation goes
//! through [`DecoderRegistry::register`].

use super::decoders::{JsonDecoder, XmlDecoder};
use super::types::{DecoderFormat, PayloadDecoder};
use crate::error::{Error, Result};
use std::sync::Arc;
use tracing::{debug, trace};

/// One registered (content-type pattern, decoder) pair
struct RegistryEntry {
    pattern: String,
    decoder: Arc<dyn PayloadDecoder>,
}

/// Maps content-type patterns to decoder instances.
///
/// Patterns are either exact MIME strings (`application/json`) or
/// wildcards over a structured-syntax suffix (`*+json`). Resolution
/// order: exact registration, wildcard registration, built-in suffix
/// default, client fallback decoder. Re-registering an identical
/// pattern replaces the earlier entry.
pub struct DecoderRegistry {
    entries: Vec<RegistryEntry>,
    /// Built-in `+json`/`+xml` defaults apply even without registration
    builtin_suffixes: bool,
    /// Decoder used when nothing else matches
    fallback: Option<Arc<dyn PayloadDecoder>>,
    json_default: Arc<dyn PayloadDecoder>,
    xml_default: Arc<dyn PayloadDecoder>,
}

impl std::fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let patterns: Vec<&str> = self.entries.iter().map(|e| e.pattern.as_str()).collect();
        f.debug_struct("DecoderRegistry")
            .field("patterns", &patterns)
            .field("builtin_suffixes", &self.builtin_suffixes)
            .field("has_fallback", &self.fallback.is_some())
            .finish()
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoderRegistry {
    /// Registry with the standard JSON/XML entries and a JSON fallback
    pub fn new() -> Self {
        let json: Arc<dyn PayloadDecoder> = Arc::new(JsonDecoder::new());
        let xml: Arc<dyn PayloadDecoder> = Arc::new(XmlDecoder::new());

        let mut registry = Self {
            entries: Vec::new(),
            builtin_suffixes: true,
            fallback: Some(json.clone()),
            json_default: json.clone(),
            xml_default: xml.clone(),
        };
        for pattern in ["application/json", "text/json", "text/x-json", "*+json"] {
            registry.register(pattern, json.clone());
        }
        for pattern in ["application/xml", "text/xml", "*+xml"] {
            registry.register(pattern, xml.clone());
        }
        registry
    }

    /// Registry with the standard entries and the given fallback format.
    ///
    /// The fallback decoder handles content types matching no pattern:
    /// JSON unless the client configures otherwise.
    pub fn with_default(format: DecoderFormat) -> Self {
        let mut registry = Self::new();
        registry.fallback = Some(match format {
            DecoderFormat::Json => registry.json_default.clone(),
            DecoderFormat::Xml => registry.xml_default.clone(),
        });
        registry
    }

    /// Registry with no entries, no suffix defaults, and no fallback.
    ///
    /// Every resolution against an empty registry fails with
    /// [`Error::NoDecoderAvailable`] until entries are registered.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            builtin_suffixes: false,
            fallback: None,
            json_default: Arc::new(JsonDecoder::new()),
            xml_default: Arc::new(XmlDecoder::new()),
        }
    }

    /// Register a decoder for a content-type pattern.
    ///
    /// An entry with an identical pattern string is replaced in place.
    pub fn register(&mut self, pattern: impl Into<String>, decoder: Arc<dyn PayloadDecoder>) {
        let pattern = pattern.into();
        debug!(pattern = %pattern, format = decoder.format(), "registering decoder");
        match self.entries.iter_mut().find(|e| e.pattern == pattern) {
            Some(entry) => entry.decoder = decoder,
            None => self.entries.push(RegistryEntry { pattern, decoder }),
        }
    }

    /// Replace the fallback decoder used when no pattern matches
    pub fn set_fallback(&mut self, decoder: Option<Arc<dyn PayloadDecoder>>) {
        self.fallback = decoder;
    }

    /// Registered pattern strings, in registration order
    pub fn patterns(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.pattern.as_str()).collect()
    }

    /// Resolve a response content type to a decoder.
    ///
    /// Media-type parameters (`; charset=...`) are ignored. Explicit
    /// registrations always precede built-in defaults, and an exact
    /// match precedes a `*+suffix` wildcard.
    pub fn resolve(&self, content_type: &str) -> Result<Arc<dyn PayloadDecoder>> {
        let media_type = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim();

        if let Some(decoder) = self.lookup(media_type) {
            trace!(content_type, "resolved via exact pattern");
            return Ok(decoder);
        }

        if let Some((_, suffix)) = media_type.rsplit_once('+') {
            if let Some(decoder) = self.lookup(&format!("*+{suffix}")) {
                trace!(content_type, suffix, "resolved via wildcard pattern");
                return Ok(decoder);
            }
            if self.builtin_suffixes {
                match suffix {
                    "json" => {
                        trace!(content_type, "resolved via built-in +json default");
                        return Ok(self.json_default.clone());
                    }
                    "xml" => {
                        trace!(content_type, "resolved via built-in +xml default");
                        return Ok(self.xml_default.clone());
                    }
                    _ => {}
                }
            }
        }

        if let Some(decoder) = &self.fallback {
            trace!(content_type, "resolved via client fallback decoder");
            return Ok(decoder.clone());
        }

        Err(Error::no_decoder(content_type))
    }

    fn lookup(&self, pattern: &str) -> Option<Arc<dyn PayloadDecoder>> {
        self.entries
            .iter()
            .find(|e| e.pattern == pattern)
            .map(|e| e.decoder.clone())
    }
}

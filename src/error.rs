//! Error types for wiremap
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// Stage of the decode pipeline at which a failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    /// Resolving a decoder for the response content type
    RegistryResolution,
    /// Parsing the raw payload into an untyped tree
    PayloadParse,
    /// Mapping the untyped tree onto the target descriptor
    Mapping,
}

impl std::fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DecodeStage::RegistryResolution => "registry-resolution",
            DecodeStage::PayloadParse => "payload-parse",
            DecodeStage::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

/// The main error type for wiremap
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Decoder Selection Errors
    // ============================================================================
    #[error("No decoder available for content type '{content_type}'")]
    NoDecoderAvailable { content_type: String },

    // ============================================================================
    // Payload Parse Errors
    // ============================================================================
    #[error("Failed to parse {format} payload: {message}")]
    PayloadParse { format: String, message: String },

    // ============================================================================
    // Coercion Errors
    // ============================================================================
    #[error("Cannot convert value '{value}' to {target}")]
    Conversion { target: String, value: String },

    #[error("'{value}' is not a member of enum {target}")]
    UnknownEnumMember { value: String, target: String },

    // ============================================================================
    // Stage Wrapper
    // ============================================================================
    #[error("Decode failed at {stage} stage: {source}")]
    Decode {
        stage: DecodeStage,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a no-decoder error
    pub fn no_decoder(content_type: impl Into<String>) -> Self {
        Self::NoDecoderAvailable {
            content_type: content_type.into(),
        }
    }

    /// Create a payload parse error
    pub fn payload_parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PayloadParse {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Create a conversion error
    pub fn conversion(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Conversion {
            target: target.into(),
            value: value.into(),
        }
    }

    /// Create an unknown-enum-member error
    pub fn unknown_enum_member(value: impl Into<String>, target: impl Into<String>) -> Self {
        Self::UnknownEnumMember {
            value: value.into(),
            target: target.into(),
        }
    }

    /// Wrap this error with the decode stage it occurred in.
    ///
    /// Already-staged errors pass through unchanged so the front end
    /// never double-wraps.
    pub fn at_stage(self, stage: DecodeStage) -> Self {
        match self {
            Error::Decode { .. } => self,
            other => Error::Decode {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// The stage recorded on a staged error, if any
    pub fn stage(&self) -> Option<DecodeStage> {
        match self {
            Error::Decode { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Result type alias for wiremap
pub type Result<T> = std::result::Result<T, Error>;

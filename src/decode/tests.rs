//! Tests for decoders and the registry

use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;

// ============================================================================
// JSON Decoder Tests
// ============================================================================

#[test]
fn test_json_decoder_object() {
    let decoder = JsonDecoder::new();
    let tree = decoder.parse(r#"{"name":"Bob","age":50}"#).unwrap();
    assert_eq!(tree, json!({"name": "Bob", "age": 50}));
}

#[test]
fn test_json_decoder_array() {
    let decoder = JsonDecoder::new();
    let tree = decoder.parse(r#"[1, 2, 3]"#).unwrap();
    assert_eq!(tree, json!([1, 2, 3]));
}

#[test]
fn test_json_decoder_scalar() {
    let decoder = JsonDecoder::new();
    assert_eq!(decoder.parse("42").unwrap(), json!(42));
    assert_eq!(decoder.parse("\"hi\"").unwrap(), json!("hi"));
}

#[test]
fn test_json_decoder_invalid() {
    let decoder = JsonDecoder::new();
    let err = decoder.parse("not valid json").unwrap_err();
    assert!(matches!(err, Error::PayloadParse { ref format, .. } if format == "json"));
}

// ============================================================================
// XML Decoder Tests
// ============================================================================

#[test]
fn test_xml_decoder_flat_element() {
    let decoder = XmlDecoder::new();
    let tree = decoder
        .parse("<Person><name>Bob</name><age>50</age></Person>")
        .unwrap();
    assert_eq!(tree, json!({"name": "Bob", "age": 50}));
}

#[test]
fn test_xml_decoder_nested() {
    let decoder = XmlDecoder::new();
    let tree = decoder
        .parse("<user><profile><name>Alice</name><age>30</age></profile></user>")
        .unwrap();
    assert_eq!(tree["profile"]["name"], "Alice");
    assert_eq!(tree["profile"]["age"], 30);
}

#[test]
fn test_xml_decoder_repeated_elements_become_array() {
    let decoder = XmlDecoder::new();
    let tree = decoder
        .parse("<root><items><item><id>1</id></item><item><id>2</id></item></items></root>")
        .unwrap();
    let items = tree["items"]["item"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["id"], 2);
}

#[test]
fn test_xml_decoder_nested_same_name() {
    let decoder = XmlDecoder::new();
    let tree = decoder
        .parse("<node><node><id>1</id></node></node>")
        .unwrap();
    assert_eq!(tree["node"]["id"], 1);
}

#[test]
fn test_xml_decoder_declaration_and_comments() {
    let decoder = XmlDecoder::new();
    let tree = decoder
        .parse("<?xml version=\"1.0\"?><!-- header --><r><a>1</a><!-- note --><b>2</b></r>")
        .unwrap();
    assert_eq!(tree, json!({"a": 1, "b": 2}));
}

#[test]
fn test_xml_decoder_attributes_skipped() {
    let decoder = XmlDecoder::new();
    let tree = decoder
        .parse(r#"<r><a id="7">x</a></r>"#)
        .unwrap();
    assert_eq!(tree, json!({"a": "x"}));
}

#[test]
fn test_xml_decoder_self_closing_and_empty() {
    let decoder = XmlDecoder::new();
    let tree = decoder.parse("<r><a/><b></b></r>").unwrap();
    assert_eq!(tree, json!({"a": Value::Null, "b": Value::Null}));
}

#[test]
fn test_xml_decoder_typed_scalars() {
    let decoder = XmlDecoder::new();
    let tree = decoder
        .parse("<r><n>42</n><f>1.5</f><t>true</t><s>hello</s></r>")
        .unwrap();
    assert_eq!(tree, json!({"n": 42, "f": 1.5, "t": true, "s": "hello"}));
}

#[test]
fn test_xml_decoder_entity_unescape() {
    let decoder = XmlDecoder::new();
    let tree = decoder.parse("<r><s>a &amp; b &lt;c&gt;</s></r>").unwrap();
    assert_eq!(tree["s"], "a & b <c>");
}

#[test]
fn test_xml_decoder_not_xml() {
    let decoder = XmlDecoder::new();
    let err = decoder.parse("{}").unwrap_err();
    assert!(matches!(err, Error::PayloadParse { ref format, .. } if format == "xml"));
}

#[test]
fn test_xml_decoder_unclosed_tag() {
    let decoder = XmlDecoder::new();
    assert!(decoder.parse("<r><a>1</a>").is_err());
}

// ============================================================================
// Registry Tests
// ============================================================================

#[test]
fn test_registry_default_json_types() {
    let registry = DecoderRegistry::new();
    for ct in ["application/json", "text/json", "text/x-json"] {
        assert_eq!(registry.resolve(ct).unwrap().format(), "json");
    }
}

#[test]
fn test_registry_default_xml_types() {
    let registry = DecoderRegistry::new();
    for ct in ["application/xml", "text/xml"] {
        assert_eq!(registry.resolve(ct).unwrap().format(), "xml");
    }
}

#[test]
fn test_registry_strips_parameters() {
    let registry = DecoderRegistry::new();
    let decoder = registry
        .resolve("application/json; charset=utf-8")
        .unwrap();
    assert_eq!(decoder.format(), "json");
}

#[test]
fn test_registry_structured_syntax_suffix() {
    let registry = DecoderRegistry::new();
    assert_eq!(
        registry
            .resolve("application/vnd.somebody.something+json")
            .unwrap()
            .format(),
        "json"
    );
    assert_eq!(
        registry
            .resolve("application/vnd.somebody.something+xml")
            .unwrap()
            .format(),
        "xml"
    );
}

#[test]
fn test_registry_wildcard_only_registration() {
    let mut registry = DecoderRegistry::empty();
    registry.register("*+json", Arc::new(JsonDecoder::new()));

    let decoder = registry.resolve("application/vnd.acme.widget+json").unwrap();
    assert_eq!(decoder.format(), "json");
    assert!(registry.resolve("application/vnd.acme.widget+xml").is_err());
}

#[test]
fn test_registry_exact_match_precedes_wildcard() {
    // In spite of the +xml suffix, treat this specific content type as JSON
    let mut registry = DecoderRegistry::new();
    registry.register(
        "application/vnd.acme.widget+xml",
        Arc::new(JsonDecoder::new()),
    );

    let decoder = registry.resolve("application/vnd.acme.widget+xml").unwrap();
    assert_eq!(decoder.format(), "json");

    // Other +xml types still go through the wildcard
    let decoder = registry.resolve("application/vnd.other+xml").unwrap();
    assert_eq!(decoder.format(), "xml");
}

#[test]
fn test_registry_wildcard_override() {
    // Handle ALL +xml suffixes as JSON
    let mut registry = DecoderRegistry::new();
    registry.register("*+xml", Arc::new(JsonDecoder::new()));

    let decoder = registry.resolve("application/vnd.somebody.something+xml").unwrap();
    assert_eq!(decoder.format(), "json");
}

#[test]
fn test_registry_reregister_replaces() {
    let mut registry = DecoderRegistry::new();
    let before = registry.patterns().len();

    registry.register("application/json", Arc::new(XmlDecoder::new()));

    assert_eq!(registry.patterns().len(), before);
    assert_eq!(registry.resolve("application/json").unwrap().format(), "xml");
}

#[test]
fn test_registry_fallback_for_unknown_type() {
    let registry = DecoderRegistry::new();
    let decoder = registry.resolve("application/octet-stream").unwrap();
    assert_eq!(decoder.format(), "json");
}

#[test]
fn test_registry_configured_default_format() {
    let registry = DecoderRegistry::with_default(DecoderFormat::Xml);
    let decoder = registry.resolve("application/octet-stream").unwrap();
    assert_eq!(decoder.format(), "xml");
}

#[test]
fn test_registry_empty_has_no_decoder() {
    let registry = DecoderRegistry::empty();
    let err = registry.resolve("application/json").unwrap_err();
    assert!(
        matches!(err, Error::NoDecoderAvailable { ref content_type } if content_type == "application/json")
    );
}

#[test]
fn test_registry_empty_has_no_suffix_default() {
    let registry = DecoderRegistry::empty();
    assert!(registry.resolve("application/vnd.x+json").is_err());
}

#[test]
fn test_registry_empty_accepts_registrations() {
    let mut registry = DecoderRegistry::empty();
    registry.register("application/vnd.x", Arc::new(JsonDecoder::new()));

    assert!(registry.resolve("application/vnd.x").is_ok());
    assert!(registry.resolve("application/vnd.y").is_err());
}

#[test]
fn test_registry_wildcard_registration_precedes_builtin_default() {
    let mut registry = DecoderRegistry::new();
    registry.register("*+json", Arc::new(XmlDecoder::new()));
    let decoder = registry.resolve("application/vnd.x+json").unwrap();
    assert_eq!(decoder.format(), "xml");
}

#[test]
fn test_decoder_format_serde() {
    let format: DecoderFormat = serde_json::from_str("\"xml\"").unwrap();
    assert_eq!(format, DecoderFormat::Xml);

    let text = serde_json::to_string(&DecoderFormat::Json).unwrap();
    assert_eq!(text, "\"json\"");
}

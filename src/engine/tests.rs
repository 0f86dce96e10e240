//! Tests for the decode front end

use super::*;
use crate::decode::{DecoderRegistry, JsonDecoder};
use crate::descriptor::{CompositeDescriptor, MapKey, TypeDescriptor, TypedValue};
use crate::error::{DecodeStage, Error};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn person() -> TypeDescriptor {
    TypeDescriptor::Composite(
        CompositeDescriptor::builder("Person")
            .field("name", TypeDescriptor::String)
            .field("age", TypeDescriptor::Int)
            .build(),
    )
}

// ============================================================================
// Basic Decoding
// ============================================================================

#[test]
fn test_decode_json_composite() {
    let decoder = ResponseDecoder::new();
    let value = decoder
        .decode(r#"{"name":"Bob","age":50}"#, "application/json", &person())
        .unwrap();

    assert_eq!(value.get("name").and_then(TypedValue::as_str), Some("Bob"));
    assert_eq!(value.get("age").and_then(TypedValue::as_i64), Some(50));
}

#[test]
fn test_decode_xml_composite() {
    let decoder = ResponseDecoder::new();
    let value = decoder
        .decode(
            "<Person><name>Bob</name><age>50</age></Person>",
            "text/xml",
            &person(),
        )
        .unwrap();

    assert_eq!(value.get("name").and_then(TypedValue::as_str), Some("Bob"));
    assert_eq!(value.get("age").and_then(TypedValue::as_i64), Some(50));
}

#[test]
fn test_decode_bytes() {
    let decoder = ResponseDecoder::new();
    let value = decoder
        .decode_bytes(br#"{"name":"Bob"}"#, "application/json", &person())
        .unwrap();
    assert_eq!(value.get("name").and_then(TypedValue::as_str), Some("Bob"));
}

#[test]
fn test_decode_bytes_invalid_utf8() {
    let decoder = ResponseDecoder::new();
    let err = decoder
        .decode_bytes(&[0xff, 0xfe], "application/json", &person())
        .unwrap_err();
    assert_eq!(err.stage(), Some(DecodeStage::PayloadParse));
}

// ============================================================================
// Root Narrowing
// ============================================================================

#[test]
fn test_decode_with_root_element() {
    let decoder = ResponseDecoder::new().root_element("person");
    let value = decoder
        .decode(
            r#"{"person": {"name": "Bob", "age": 50}, "meta": {}}"#,
            "application/json",
            &person(),
        )
        .unwrap();
    assert_eq!(value.get("name").and_then(TypedValue::as_str), Some("Bob"));
}

#[test]
fn test_decode_root_element_absent_uses_whole_tree() {
    let decoder = ResponseDecoder::new().root_element("person");
    let value = decoder
        .decode(r#"{"name": "Bob", "age": 50}"#, "application/json", &person())
        .unwrap();
    assert_eq!(value.get("name").and_then(TypedValue::as_str), Some("Bob"));
}

#[test]
fn test_decode_root_element_narrows_sequences() {
    let decoder = ResponseDecoder::new().root_element("items");
    let target = TypeDescriptor::sequence(TypeDescriptor::Int);
    let value = decoder
        .decode(r#"{"items": [1, 2, 3]}"#, "application/json", &target)
        .unwrap();
    assert_eq!(value.as_sequence().unwrap().len(), 3);
}

// ============================================================================
// Target Routing
// ============================================================================

#[test]
fn test_decode_sequence_target_from_array_root() {
    let decoder = ResponseDecoder::new();
    let target = TypeDescriptor::sequence(person());
    let value = decoder
        .decode(
            r#"[{"name":"A","age":1},{"name":"B","age":2}]"#,
            "application/json",
            &target,
        )
        .unwrap();

    let items = value.as_sequence().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].get("name").and_then(TypedValue::as_str), Some("B"));
}

#[test]
fn test_decode_sequence_target_from_scalar_root() {
    let decoder = ResponseDecoder::new();
    let target = TypeDescriptor::sequence(TypeDescriptor::Int);
    let value = decoder.decode("42", "application/json", &target).unwrap();
    assert_eq!(value, TypedValue::Sequence(vec![TypedValue::Int(42)]));
}

#[test]
fn test_decode_mapping_target() {
    let decoder = ResponseDecoder::new();
    let target = TypeDescriptor::mapping(TypeDescriptor::Int);
    let value = decoder
        .decode(r#"{"a": 1, "b": 2}"#, "application/json", &target)
        .unwrap();
    assert_eq!(
        value.as_mapping().unwrap().get(&MapKey::from("b")),
        Some(&TypedValue::Int(2))
    );
}

#[test]
fn test_decode_scalar_target() {
    let decoder = ResponseDecoder::new();
    let value = decoder
        .decode("\"hello\"", "application/json", &TypeDescriptor::String)
        .unwrap();
    assert_eq!(value, TypedValue::String("hello".into()));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_decode_with_date_format() {
    let target = TypeDescriptor::Composite(
        CompositeDescriptor::builder("Event")
            .field("when", TypeDescriptor::DateTime)
            .build(),
    );

    let decoder = ResponseDecoder::new().date_format("%d/%m/%Y %H:%M");
    let value = decoder
        .decode(
            r#"{"when": "30/06/2011 08:15"}"#,
            "application/json",
            &target,
        )
        .unwrap();
    assert!(matches!(value.get("when"), Some(TypedValue::DateTime(_))));
}

#[test]
fn test_decode_with_registered_override() {
    // Vendor +xml content handled by the JSON decoder
    let mut decoder = ResponseDecoder::new();
    decoder.register(
        "application/vnd.somebody.something+xml",
        Arc::new(JsonDecoder::new()),
    );

    let value = decoder
        .decode(
            r#"{"name":"Bob","age":50}"#,
            "application/vnd.somebody.something+xml",
            &person(),
        )
        .unwrap();
    assert_eq!(value.get("age").and_then(TypedValue::as_i64), Some(50));
}

// ============================================================================
// Error Stages
// ============================================================================

#[test]
fn test_decode_no_decoder_stage() {
    let decoder = ResponseDecoder::with_registry(DecoderRegistry::empty());
    let err = decoder
        .decode("{}", "application/octet-stream", &person())
        .unwrap_err();

    assert_eq!(err.stage(), Some(DecodeStage::RegistryResolution));
    assert!(matches!(
        err,
        Error::Decode { ref source, .. } if matches!(**source, Error::NoDecoderAvailable { .. })
    ));
}

#[test]
fn test_decode_parse_error_stage() {
    let decoder = ResponseDecoder::new();
    let err = decoder
        .decode("not json", "application/json", &person())
        .unwrap_err();
    assert_eq!(err.stage(), Some(DecodeStage::PayloadParse));
}

#[test]
fn test_decode_mapping_error_stage() {
    let decoder = ResponseDecoder::new();
    let err = decoder
        .decode(r#"{"name":"Bob","age":"old"}"#, "application/json", &person())
        .unwrap_err();
    assert_eq!(err.stage(), Some(DecodeStage::Mapping));
}

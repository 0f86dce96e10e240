//! Decoder implementations
//!
//! Each decoder parses one wire format into the untyped tree.

use super::types::PayloadDecoder;
use crate::error::{Error, Result};
use serde_json::{Map, Value};

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON payload decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self
    }
}

impl PayloadDecoder for JsonDecoder {
    fn format(&self) -> &str {
        "json"
    }

    fn parse(&self, body: &str) -> Result<Value> {
        serde_json::from_str(body).map_err(|e| Error::payload_parse("json", e.to_string()))
    }
}

// ============================================================================
// XML Decoder
// ============================================================================

/// XML payload decoder.
///
/// Parses an element tree into the same untyped representation the JSON
/// decoder produces: child elements become object keys, repeated child
/// names become arrays, and leaf text is typed as number/bool/string.
/// Attributes and mixed content are not modeled.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDecoder;

impl XmlDecoder {
    /// Create a new XML decoder
    pub fn new() -> Self {
        Self
    }
}

impl PayloadDecoder for XmlDecoder {
    fn format(&self) -> &str {
        "xml"
    }

    fn parse(&self, body: &str) -> Result<Value> {
        let input = skip_prolog(body.trim());
        if !input.starts_with('<') {
            return Err(Error::payload_parse(
                "xml",
                "input does not appear to be XML",
            ));
        }

        // The root tag name is dropped; its content is the tree.
        let (_, value, _) = read_element(input)?;
        Ok(value)
    }
}

/// Skip the XML declaration, comments, and leading whitespace.
fn skip_prolog(input: &str) -> &str {
    let mut rest = input.trim_start();
    loop {
        if let Some(after) = rest.strip_prefix("<?") {
            match after.find("?>") {
                Some(end) => rest = after[end + 2..].trim_start(),
                None => return rest,
            }
        } else if let Some(after) = rest.strip_prefix("<!--") {
            match after.find("-->") {
                Some(end) => rest = after[end + 3..].trim_start(),
                None => return rest,
            }
        } else {
            return rest;
        }
    }
}

/// Read one element starting at `<`.
///
/// Returns the tag name, the element's value, and the input remaining
/// after its close tag.
fn read_element(input: &str) -> Result<(String, Value, &str)> {
    let rest = input
        .strip_prefix('<')
        .ok_or_else(|| Error::payload_parse("xml", "expected opening tag"))?;

    let name_end = rest
        .find(|c: char| c == '>' || c == '/' || c.is_whitespace())
        .ok_or_else(|| Error::payload_parse("xml", "malformed tag"))?;
    let tag = &rest[..name_end];
    if tag.is_empty() {
        return Err(Error::payload_parse("xml", "empty tag name"));
    }

    // Attributes are skipped up to the end of the open tag.
    let after_name = &rest[name_end..];
    let open_end = after_name
        .find('>')
        .ok_or_else(|| Error::payload_parse("xml", format!("unterminated tag <{tag}>")))?;
    let mut remaining = &after_name[open_end + 1..];

    if after_name[..open_end].ends_with('/') {
        return Ok((tag.to_string(), Value::Null, remaining));
    }

    let close_tag = format!("</{tag}>");
    let mut children: Map<String, Value> = Map::new();
    let mut text = String::new();

    loop {
        if let Some(after) = remaining.strip_prefix(&close_tag) {
            remaining = after;
            break;
        }
        if let Some(after) = remaining.strip_prefix("<!--") {
            remaining = match after.find("-->") {
                Some(end) => &after[end + 3..],
                None => "",
            };
            continue;
        }
        if remaining.starts_with("</") {
            return Err(Error::payload_parse(
                "xml",
                format!("missing closing tag for <{tag}>"),
            ));
        }
        if remaining.starts_with('<') {
            let (child_tag, child_value, rest) = read_element(remaining)?;
            insert_child(&mut children, child_tag, child_value);
            remaining = rest;
            continue;
        }

        match remaining.find('<') {
            Some(pos) => {
                text.push_str(&remaining[..pos]);
                remaining = &remaining[pos..];
            }
            None => {
                return Err(Error::payload_parse(
                    "xml",
                    format!("missing closing tag for <{tag}>"),
                ));
            }
        }
    }

    // Child elements win over stray text in mixed content.
    let value = if !children.is_empty() {
        Value::Object(children)
    } else if text.trim().is_empty() {
        Value::Null
    } else {
        scalar_from_text(text.trim())
    };

    Ok((tag.to_string(), value, remaining))
}

/// Insert a child value, promoting repeated names to arrays.
fn insert_child(children: &mut Map<String, Value>, tag: String, value: Value) {
    match children.get_mut(&tag) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            children.insert(tag, value);
        }
    }
}

/// Type leaf text as number, boolean, or string.
fn scalar_from_text(text: &str) -> Value {
    let text = unescape(text);

    if let Ok(n) = text.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(n) = text.parse::<f64>() {
        if let Some(num) = serde_json::Number::from_f64(n) {
            return Value::Number(num);
        }
    }
    match text.as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    Value::String(text)
}

/// Resolve the predefined XML entities.
fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

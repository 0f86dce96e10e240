//! Untyped node to typed value coercion
//!
//! `coerce` converts one untyped payload node into one concretely-typed
//! value, driven by the target descriptor. Composite targets delegate to
//! the tree mapper, which calls back into `coerce` per field.

use super::mapper;
use crate::descriptor::{
    EnumDescriptor, KeyKind, MapKey, MappingDescriptor, TypeDescriptor, TypedValue, UriRef,
};
use crate::error::{Error, Result};
use chrono::{
    DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use regex::Regex;
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::LazyLock;
use url::Url;
use uuid::Uuid;

/// JSON epoch date literal: `/Date(1309421746929)/`, optionally with a
/// signed zone suffix and escaped slashes.
static EPOCH_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\\?/Date\((-?\d+)([+-]\d{1,4})?\)\\?/$").unwrap()
});

/// Options threaded through a coercion run
#[derive(Debug, Clone, Default)]
pub struct CoerceOptions {
    /// Exact `chrono` format string for temporal values; when unset,
    /// the epoch literal and general date/time literals are tried.
    pub date_format: Option<String>,
}

/// Convert an untyped node into a typed value per the target descriptor.
///
/// Fails with [`Error::Conversion`] (or [`Error::UnknownEnumMember`])
/// when the node cannot represent the target kind.
pub fn coerce(node: &Value, target: &TypeDescriptor, opts: &CoerceOptions) -> Result<TypedValue> {
    match target {
        TypeDescriptor::Optional(inner) => {
            let absent = match node {
                Value::Null => true,
                _ => scalar_string(node).is_some_and(|s| s.is_empty()),
            };
            if absent {
                Ok(TypedValue::Null)
            } else {
                coerce(node, inner, opts)
            }
        }
        TypeDescriptor::Bool => coerce_bool(node),
        TypeDescriptor::Int => coerce_int(node),
        TypeDescriptor::UInt => coerce_uint(node),
        TypeDescriptor::Float => coerce_float(node),
        TypeDescriptor::Enum(desc) => coerce_enum(node, desc),
        TypeDescriptor::Uri => coerce_uri(node),
        TypeDescriptor::String => {
            let text = require_scalar(node, "String")?;
            Ok(TypedValue::String(text))
        }
        TypeDescriptor::DateTime => parse_instant(node, opts).map(TypedValue::DateTime),
        TypeDescriptor::DateTimeOffset => {
            // The parsed instant is reinterpreted at UTC offset zero.
            let instant = parse_instant(node, opts)?;
            Ok(TypedValue::DateTimeOffset(instant.with_timezone(&Utc.fix())))
        }
        TypeDescriptor::Decimal => coerce_decimal(node),
        TypeDescriptor::Uuid => coerce_uuid(node),
        TypeDescriptor::Duration => coerce_duration(node),
        TypeDescriptor::Sequence(inner) => build_sequence(node, inner, opts),
        TypeDescriptor::Mapping(desc) => build_mapping(node, desc, opts),
        TypeDescriptor::Composite(desc) => mapper::map_composite(node, desc, opts),
        TypeDescriptor::Dynamic => Ok(dynamic_value(node)),
    }
}

// ============================================================================
// Primitives
// ============================================================================

fn coerce_bool(node: &Value) -> Result<TypedValue> {
    match node {
        Value::Bool(b) => Ok(TypedValue::Bool(*b)),
        Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Ok(TypedValue::Bool(true)),
        Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Ok(TypedValue::Bool(false)),
        other => Err(Error::conversion("Bool", other.to_string())),
    }
}

fn coerce_int(node: &Value) -> Result<TypedValue> {
    match node {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(TypedValue::Int(i));
            }
            if n.is_f64() {
                let f = n.as_f64().unwrap_or_default();
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                    return Ok(TypedValue::Int(f as i64));
                }
            }
            Err(Error::conversion("Int", n.to_string()))
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(TypedValue::Int)
            .map_err(|_| Error::conversion("Int", s.clone())),
        other => Err(Error::conversion("Int", other.to_string())),
    }
}

fn coerce_uint(node: &Value) -> Result<TypedValue> {
    match node {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return Ok(TypedValue::UInt(u));
            }
            if n.is_f64() {
                let f = n.as_f64().unwrap_or_default();
                if f.fract() == 0.0 && f >= 0.0 && f <= u64::MAX as f64 {
                    return Ok(TypedValue::UInt(f as u64));
                }
            }
            Err(Error::conversion("UInt", n.to_string()))
        }
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map(TypedValue::UInt)
            .map_err(|_| Error::conversion("UInt", s.clone())),
        other => Err(Error::conversion("UInt", other.to_string())),
    }
}

fn coerce_float(node: &Value) -> Result<TypedValue> {
    match node {
        Value::Number(n) => n
            .as_f64()
            .map(TypedValue::Float)
            .ok_or_else(|| Error::conversion("Float", n.to_string())),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(TypedValue::Float)
            .map_err(|_| Error::conversion("Float", s.clone())),
        other => Err(Error::conversion("Float", other.to_string())),
    }
}

// ============================================================================
// Enums, URIs, Identifiers
// ============================================================================

fn coerce_enum(node: &Value, desc: &EnumDescriptor) -> Result<TypedValue> {
    let raw = require_scalar(node, &desc.name)?;
    let text = raw.trim();
    desc.members
        .iter()
        .find(|member| member.eq_ignore_ascii_case(text))
        .map(|member| TypedValue::Enum(member.clone()))
        .ok_or_else(|| Error::unknown_enum_member(text, desc.name.as_str()))
}

fn coerce_uri(node: &Value) -> Result<TypedValue> {
    let text = require_scalar(node, "Uri")?;
    match Url::parse(&text) {
        Ok(url) => Ok(TypedValue::Uri(UriRef::Absolute(url))),
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(TypedValue::Uri(UriRef::Relative(text))),
        Err(_) => Err(Error::conversion("Uri", text)),
    }
}

fn coerce_uuid(node: &Value) -> Result<TypedValue> {
    let raw = require_scalar(node, "Uuid")?;
    let text = raw.trim();
    if text.is_empty() {
        return Ok(TypedValue::Uuid(Uuid::nil()));
    }
    Uuid::parse_str(text)
        .map(TypedValue::Uuid)
        .map_err(|_| Error::conversion("Uuid", text))
}

// ============================================================================
// Temporal
// ============================================================================

fn parse_instant(node: &Value, opts: &CoerceOptions) -> Result<DateTime<Utc>> {
    let raw = require_scalar(node, "DateTime")?;
    let text = remove_surrounding_quotes(raw.trim());

    if let Some(format) = &opts.date_format {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Ok(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
        }
        return Err(Error::conversion("DateTime", text));
    }

    if let Some(instant) = parse_epoch_literal(text) {
        return Ok(instant);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }

    Err(Error::conversion("DateTime", text))
}

/// Parse the `/Date(milliseconds±offset)/` wrapper. The instant is the
/// epoch millisecond count; the zone suffix carries no extra information
/// about it.
fn parse_epoch_literal(text: &str) -> Option<DateTime<Utc>> {
    let captures = EPOCH_DATE_REGEX.captures(text)?;
    let millis: i64 = captures[1].parse().ok()?;
    DateTime::from_timestamp_millis(millis)
}

fn remove_surrounding_quotes(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}

// ============================================================================
// Decimal
// ============================================================================

fn coerce_decimal(node: &Value) -> Result<TypedValue> {
    // A floating-point scalar converts directly, preserving its value.
    if let Value::Number(n) = node {
        if n.is_f64() {
            let f = n.as_f64().unwrap_or_default();
            return Decimal::from_f64_retain(f)
                .map(TypedValue::Decimal)
                .ok_or_else(|| Error::conversion("Decimal", n.to_string()));
        }
    }

    let raw = require_scalar(node, "Decimal")?;
    let text = raw.trim();
    let parsed = if text.contains(['e', 'E']) {
        Decimal::from_scientific(text).ok()
    } else {
        text.parse::<Decimal>().ok()
    };
    parsed
        .map(TypedValue::Decimal)
        .ok_or_else(|| Error::conversion("Decimal", text))
}

// ============================================================================
// Duration
// ============================================================================

fn coerce_duration(node: &Value) -> Result<TypedValue> {
    let raw = require_scalar(node, "Duration")?;
    let text = raw.trim();
    parse_clock_duration(text)
        .or_else(|| parse_iso_duration(text))
        .map(TypedValue::Duration)
        .ok_or_else(|| Error::conversion("Duration", text))
}

/// Clock-style duration literal: `[-][d.]hh:mm[:ss[.frac]]`.
fn parse_clock_duration(text: &str) -> Option<Duration> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if body.is_empty() || !body.chars().all(|c| c.is_ascii_digit() || c == ':' || c == '.') {
        return None;
    }

    let parts: Vec<&str> = body.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }

    let (days, hours_text) = match parts[0].split_once('.') {
        Some((d, h)) => (d.parse::<i64>().ok()?, h),
        None => (0, parts[0]),
    };
    let hours: i64 = hours_text.parse().ok()?;
    let minutes: i64 = parts[1].parse().ok()?;
    if minutes > 59 {
        return None;
    }

    let (seconds, millis) = if parts.len() == 3 {
        let (seconds_text, frac_text) = match parts[2].split_once('.') {
            Some((s, f)) => (s, Some(f)),
            None => (parts[2], None),
        };
        let seconds: i64 = seconds_text.parse().ok()?;
        if seconds > 59 {
            return None;
        }
        (seconds, frac_text.map_or(Some(0), parse_frac_millis)?)
    } else {
        (0, 0)
    };

    let total = Duration::days(days)
        + Duration::hours(hours)
        + Duration::minutes(minutes)
        + Duration::seconds(seconds)
        + Duration::milliseconds(millis);
    Some(if negative { -total } else { total })
}

/// Fractional-second digits to milliseconds, truncating past 3 digits.
fn parse_frac_millis(frac: &str) -> Option<i64> {
    if frac.is_empty() || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let digits: String = frac.chars().take(3).collect();
    let mut millis: i64 = digits.parse().ok()?;
    for _ in digits.len()..3 {
        millis *= 10;
    }
    Some(millis)
}

/// ISO-8601 duration: `PnYnMnWnDTnHnMnS`, with the XML-convention
/// approximations of a 365-day year and a 30-day month.
fn parse_iso_duration(text: &str) -> Option<Duration> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let body = body.strip_prefix('P')?;
    if body.is_empty() {
        return None;
    }

    let (date_part, time_part) = match body.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (body, None),
    };

    let mut total = Duration::zero();
    let mut number = String::new();

    for c in date_part.chars() {
        if c.is_ascii_digit() {
            number.push(c);
            continue;
        }
        let n: i64 = number.parse().ok()?;
        number.clear();
        total = total
            + match c {
                'Y' => Duration::days(n.checked_mul(365)?),
                'M' => Duration::days(n.checked_mul(30)?),
                'W' => Duration::weeks(n),
                'D' => Duration::days(n),
                _ => return None,
            };
    }
    if !number.is_empty() {
        return None;
    }

    if let Some(time_part) = time_part {
        if time_part.is_empty() {
            return None;
        }
        for c in time_part.chars() {
            if c.is_ascii_digit() || c == '.' {
                number.push(c);
                continue;
            }
            total = total
                + match c {
                    'H' => Duration::hours(number.parse().ok()?),
                    'M' => Duration::minutes(number.parse().ok()?),
                    'S' => {
                        let seconds: f64 = number.parse().ok()?;
                        Duration::milliseconds((seconds * 1000.0).round() as i64)
                    }
                    _ => return None,
                };
            number.clear();
        }
        if !number.is_empty() {
            return None;
        }
    }

    Some(if negative { -total } else { total })
}

// ============================================================================
// Collections
// ============================================================================

fn build_sequence(
    node: &Value,
    inner: &TypeDescriptor,
    opts: &CoerceOptions,
) -> Result<TypedValue> {
    match node {
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                // Null elements are preserved, never coerced.
                if item.is_null() {
                    out.push(TypedValue::Null);
                } else {
                    out.push(coerce(item, inner, opts)?);
                }
            }
            Ok(TypedValue::Sequence(out))
        }
        Value::Null => Ok(TypedValue::Sequence(Vec::new())),
        // A bare scalar (or single object) wraps into a one-element sequence.
        other => Ok(TypedValue::Sequence(vec![coerce(other, inner, opts)?])),
    }
}

fn build_mapping(
    node: &Value,
    desc: &MappingDescriptor,
    opts: &CoerceOptions,
) -> Result<TypedValue> {
    let Value::Object(entries) = node else {
        return Err(Error::conversion("Mapping", node.to_string()));
    };

    let mut out = std::collections::BTreeMap::new();
    for (key, value) in entries {
        let map_key = match desc.key {
            KeyKind::String => MapKey::Str(key.clone()),
            KeyKind::Int => MapKey::Int(
                key.parse::<i64>()
                    .map_err(|_| Error::conversion("Int key", key.clone()))?,
            ),
        };
        let item = if value.is_null() {
            TypedValue::Null
        } else {
            coerce(value, &desc.value, opts)?
        };
        out.insert(map_key, item);
    }
    Ok(TypedValue::Mapping(out))
}

/// Generic conversion for dynamic targets: the payload keeps its own shape.
fn dynamic_value(node: &Value) -> TypedValue {
    match node {
        Value::Null => TypedValue::Null,
        Value::Bool(b) => TypedValue::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                TypedValue::Int(i)
            } else if let Some(u) = n.as_u64() {
                TypedValue::UInt(u)
            } else {
                TypedValue::Float(n.as_f64().unwrap_or_default())
            }
        }
        Value::String(s) => TypedValue::String(s.clone()),
        Value::Array(items) => TypedValue::Sequence(items.iter().map(dynamic_value).collect()),
        Value::Object(entries) => TypedValue::Mapping(
            entries
                .iter()
                .map(|(k, v)| (MapKey::Str(k.clone()), dynamic_value(v)))
                .collect(),
        ),
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// String form of a scalar node; `None` for sequences and mappings.
fn scalar_string(node: &Value) -> Option<String> {
    match node {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn require_scalar(node: &Value, target: &str) -> Result<String> {
    scalar_string(node).ok_or_else(|| Error::conversion(target, node.to_string()))
}

//! Strict casts into `bool`, `i64`, `f64` and `String`.

use bigdecimal::ToPrimitive;
use tracing::trace;

use crate::error::{CastError, Result};
use crate::indirect::{indirect, indirect_to_renderable};
use crate::temporal::{format_duration, format_time};
use crate::value::Value;

pub fn try_to_bool<T: Into<Value>>(i: T) -> Result<bool> {
    let value = indirect(i.into());
    trace!(kind = value.type_name(), "casting to bool");

    match value {
        Value::Bool(b) => Ok(b),
        Value::Nil => Ok(false),
        Value::I8(n) => Ok(n != 0),
        Value::I16(n) => Ok(n != 0),
        Value::I32(n) => Ok(n != 0),
        Value::I64(n) => Ok(n != 0),
        Value::Str(ref s) => parse_bool(s).ok_or_else(|| CastError::unsupported(&value, "bool")),
        other => Err(CastError::unsupported(&other, "bool")),
    }
}

pub fn try_to_int<T: Into<Value>>(i: T) -> Result<i64> {
    let value = indirect(i.into());
    trace!(kind = value.type_name(), "casting to int");

    match value {
        Value::I8(n) => Ok(i64::from(n)),
        Value::I16(n) => Ok(i64::from(n)),
        Value::I32(n) => Ok(i64::from(n)),
        Value::I64(n) => Ok(n),
        Value::Str(ref s) => parse_int(s).ok_or_else(|| CastError::unsupported(&value, "i64")),
        // truncates toward zero, saturating at the bounds
        Value::F32(f) => Ok(f as i64),
        Value::F64(f) => Ok(f as i64),
        Value::Decimal(ref d) => d.to_i64().ok_or_else(|| CastError::unsupported(&value, "i64")),
        Value::Bool(b) => Ok(i64::from(b)),
        Value::Nil => Ok(0),
        other => Err(CastError::unsupported(&other, "i64")),
    }
}

pub fn try_to_float<T: Into<Value>>(i: T) -> Result<f64> {
    let value = indirect(i.into());
    trace!(kind = value.type_name(), "casting to float");

    match value {
        Value::F64(f) => Ok(f),
        Value::F32(f) => Ok(f64::from(f)),
        Value::I64(n) => Ok(n as f64),
        Value::I32(n) => Ok(f64::from(n)),
        Value::I16(n) => Ok(f64::from(n)),
        Value::I8(n) => Ok(f64::from(n)),
        Value::Decimal(ref d) => d.to_f64().ok_or_else(|| CastError::unsupported(&value, "f64")),
        Value::Str(ref s) => parse_float(s).ok_or_else(|| CastError::unsupported(&value, "f64")),
        other => Err(CastError::unsupported(&other, "f64")),
    }
}

/// Parses a float literal. Literals out of range of `f64` are rejected
/// rather than rounded to an infinity; `inf`, `infinity` and `nan` spelled
/// out are accepted.
pub fn parse_float(s: &str) -> Option<f64> {
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() {
        return Some(f);
    }
    let word = s.strip_prefix(['+', '-']).unwrap_or(s);
    ["inf", "infinity", "nan"]
        .iter()
        .any(|w| w.eq_ignore_ascii_case(word))
        .then_some(f)
}

pub fn try_to_string<T: Into<Value>>(i: T) -> Result<String> {
    let value = indirect_to_renderable(i.into());
    trace!(kind = value.type_name(), "casting to string");

    match value {
        Value::Str(s) => Ok(s),
        Value::F64(f) => Ok(format_float(f)),
        Value::F32(f) => Ok(format_float(f)),
        Value::I64(n) => Ok(n.to_string()),
        Value::I32(n) => Ok(n.to_string()),
        Value::I16(n) => Ok(n.to_string()),
        Value::I8(n) => Ok(n.to_string()),
        Value::Bytes(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Value::Html(html) => Ok(html.0),
        Value::Nil => Ok(String::new()),
        Value::Time(t) => Ok(format_time(&t)),
        Value::Duration(d) => Ok(format_duration(d)),
        Value::Decimal(d) => Ok(d.to_plain_string()),
        Value::Object(ref o) => {
            if let Some(text) = o.inner().as_text() {
                Ok(text.to_string())
            } else if let Some(error) = o.inner().as_error() {
                Ok(error.to_string())
            } else {
                Err(CastError::unsupported(&value, "String"))
            }
        }
        other => Err(CastError::unsupported(&other, "String")),
    }
}

/// Recognizes the boolean spellings `1 t T TRUE true True` and
/// `0 f F FALSE false False`; nothing else.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Parses an integer literal, picking the base from its prefix:
/// `0x` hexadecimal, `0o` or a bare leading `0` octal, `0b` binary,
/// decimal otherwise. Underscores may separate digits.
pub fn parse_int(s: &str) -> Option<i64> {
    let (negative, unsigned) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let lower = unsigned.get(..2).map(str::to_ascii_lowercase);
    let (radix, digits, prefixed) = match lower.as_deref() {
        Some("0x") => (16, &unsigned[2..], true),
        Some("0o") => (8, &unsigned[2..], true),
        Some("0b") => (2, &unsigned[2..], true),
        _ if unsigned.len() > 1 && unsigned.starts_with('0') => (8, &unsigned[1..], true),
        _ => (10, unsigned, false),
    };
    if !underscores_ok(digits, prefixed) {
        return None;
    }
    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() || cleaned.starts_with(['+', '-']) {
        return None;
    }
    let magnitude = u64::from_str_radix(&cleaned, radix).ok()?;
    if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    }
}

// an underscore must sit between two digits, or directly after a base prefix
fn underscores_ok(digits: &str, prefixed: bool) -> bool {
    let bytes = digits.as_bytes();
    bytes.iter().enumerate().all(|(at, b)| {
        if *b != b'_' {
            return true;
        }
        let before = if at == 0 { prefixed } else { bytes[at - 1] != b'_' };
        let after = bytes.get(at + 1).is_some_and(|next| *next != b'_');
        before && after
    })
}

/// Shortest decimal form that reads back to the same float, never in
/// exponent notation.
pub fn format_float<F: Into<f64> + std::fmt::Display + Copy>(f: F) -> String {
    let wide: f64 = f.into();
    if wide.is_infinite() {
        if wide > 0.0 { String::from("+Inf") } else { String::from("-Inf") }
    } else {
        // Display picks the shortest digits of the original width
        f.to_string()
    }
}

impl TryFrom<Value> for bool {
    type Error = CastError;
    fn try_from(value: Value) -> Result<bool> {
        try_to_bool(value)
    }
}
impl TryFrom<Value> for i64 {
    type Error = CastError;
    fn try_from(value: Value) -> Result<i64> {
        try_to_int(value)
    }
}
impl TryFrom<Value> for f64 {
    type Error = CastError;
    fn try_from(value: Value) -> Result<f64> {
        try_to_float(value)
    }
}
impl TryFrom<Value> for String {
    type Error = CastError;
    fn try_from(value: Value) -> Result<String> {
        try_to_string(value)
    }
}

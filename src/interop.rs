//! Conversions from the value types of configuration sources.
//!
//! Settings read with the `config` crate and JSON documents decoded with
//! `serde_json` arrive as their own dynamic value types. Converting them into
//! [`Value`] lets them go straight into the casts:
//!
//! ```
//! use typecast::{to_duration, Value};
//! let json: serde_json::Value = serde_json::from_str(r#"{"timeout": "1m30s"}"#).unwrap();
//! let settings = typecast::to_string_map(Value::from(json));
//! assert_eq!(to_duration(settings["timeout"].clone()).num_seconds(), 90);
//! ```

use std::str::FromStr;

use bigdecimal::BigDecimal;
use config::ValueKind;

use crate::value::Value;

// integers too wide for i64 keep their exact digits
fn wide_integer<N: ToString>(n: N) -> Value {
    let digits = n.to_string();
    match BigDecimal::from_str(&digits) {
        Ok(decimal) => Value::Decimal(decimal),
        Err(_) => Value::Str(digits),
    }
}

impl From<config::Value> for Value {
    fn from(v: config::Value) -> Value {
        match v.kind {
            ValueKind::Nil => Value::Nil,
            ValueKind::Boolean(b) => Value::Bool(b),
            ValueKind::I64(n) => Value::I64(n),
            ValueKind::I128(n) => i64::try_from(n).map_or_else(|_| wide_integer(n), Value::I64),
            ValueKind::U64(n) => i64::try_from(n).map_or_else(|_| wide_integer(n), Value::I64),
            ValueKind::U128(n) => i64::try_from(n).map_or_else(|_| wide_integer(n), Value::I64),
            ValueKind::Float(f) => Value::F64(f),
            ValueKind::String(s) => Value::Str(s),
            ValueKind::Table(table) => {
                Value::StringMap(table.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
            ValueKind::Array(items) => Value::Slice(items.into_iter().map(Value::from).collect()),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Value {
        match v {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::I64(i)
                } else if let Some(u) = n.as_u64() {
                    wide_integer(u)
                } else {
                    n.as_f64().map_or(Value::Nil, Value::F64)
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::Slice(items.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(fields) => {
                Value::StringMap(fields.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

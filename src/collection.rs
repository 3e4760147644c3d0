//! Strict casts into string keyed maps and into vectors.
//!
//! Map values are converted with the best-effort casts, so a value that does
//! not convert becomes the zero value of its type instead of failing the map.
//! Vectors of integers are the exception: a single element that does not
//! convert fails the whole cast.

use tracing::trace;

use crate::error::{CastError, Result};
use crate::indirect::indirect;
use crate::lenient;
use crate::scalar::try_to_int;
use crate::value::{StringMap, Value};

pub fn try_to_string_map_string<T: Into<Value>>(i: T) -> Result<StringMap<String>> {
    let value = indirect(i.into());
    trace!(kind = value.type_name(), "casting to map of strings");

    match value {
        Value::AnyMap(pairs) => Ok(pairs
            .into_iter()
            .map(|(k, v)| (lenient::to_string(k), lenient::to_string(v)))
            .collect()),
        Value::StringMap(m) => Ok(m.into_iter().map(|(k, v)| (k, lenient::to_string(v))).collect()),
        Value::StringMapString(m) => Ok(m),
        other => Err(CastError::shape(&other, "StringMap<String>")),
    }
}

pub fn try_to_string_map_bool<T: Into<Value>>(i: T) -> Result<StringMap<bool>> {
    let value = indirect(i.into());
    trace!(kind = value.type_name(), "casting to map of bools");

    match value {
        Value::AnyMap(pairs) => Ok(pairs
            .into_iter()
            .map(|(k, v)| (lenient::to_string(k), lenient::to_bool(v)))
            .collect()),
        Value::StringMap(m) => Ok(m.into_iter().map(|(k, v)| (k, lenient::to_bool(v))).collect()),
        Value::StringMapBool(m) => Ok(m),
        other => Err(CastError::shape(&other, "StringMap<bool>")),
    }
}

pub fn try_to_string_map<T: Into<Value>>(i: T) -> Result<StringMap<Value>> {
    let value = indirect(i.into());
    trace!(kind = value.type_name(), "casting to map of values");

    match value {
        Value::AnyMap(pairs) => Ok(pairs.into_iter().map(|(k, v)| (lenient::to_string(k), v)).collect()),
        Value::StringMap(m) => Ok(m),
        other => Err(CastError::shape(&other, "StringMap<Value>")),
    }
}

pub fn try_to_slice<T: Into<Value>>(i: T) -> Result<Vec<Value>> {
    let value = indirect(i.into());
    trace!(kind = value.type_name(), "casting to slice");

    match value {
        Value::Slice(items) => Ok(items),
        Value::MapSlice(maps) => Ok(maps.into_iter().map(Value::StringMap).collect()),
        other => Err(CastError::shape(&other, "Vec<Value>")),
    }
}

pub fn try_to_string_slice<T: Into<Value>>(i: T) -> Result<Vec<String>> {
    let value = indirect(i.into());
    trace!(kind = value.type_name(), "casting to slice of strings");

    match value {
        Value::Slice(items) => Ok(items.into_iter().map(lenient::to_string).collect()),
        Value::StringSlice(items) => Ok(items),
        Value::Str(s) => Ok(s.split_whitespace().map(String::from).collect()),
        other => Err(CastError::shape(&other, "Vec<String>")),
    }
}

pub fn try_to_int_slice<T: Into<Value>>(i: T) -> Result<Vec<i64>> {
    let value = i.into();
    if matches!(value, Value::Nil) {
        return Err(CastError::shape(&value, "Vec<i64>"));
    }
    let value = indirect(value);
    trace!(kind = value.type_name(), "casting to slice of ints");

    match value {
        Value::IntSlice(items) => Ok(items),
        other => match other.elements() {
            Some(items) => items
                .into_iter()
                .map(try_to_int)
                .collect::<Result<Vec<_>>>()
                .map_err(|_| CastError::shape(&other, "Vec<i64>")),
            None => Err(CastError::shape(&other, "Vec<i64>")),
        },
    }
}

impl TryFrom<Value> for Vec<String> {
    type Error = CastError;
    fn try_from(value: Value) -> Result<Vec<String>> {
        try_to_string_slice(value)
    }
}
impl TryFrom<Value> for Vec<i64> {
    type Error = CastError;
    fn try_from(value: Value) -> Result<Vec<i64>> {
        try_to_int_slice(value)
    }
}

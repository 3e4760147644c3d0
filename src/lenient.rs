//! Best-effort casts. Each function calls its strict `try_to_*` counterpart
//! and returns the zero value of the target type when that fails; the error
//! is discarded. Use the strict functions to find out why a cast failed.

use chrono::{DateTime, FixedOffset, TimeDelta};
use tracing::trace;

use crate::collection;
use crate::error::Result;
use crate::scalar;
use crate::temporal;
use crate::value::{StringMap, Value};

fn or_zero<V: Default>(result: Result<V>) -> V {
    result.unwrap_or_else(|e| {
        trace!(error = %e, "cast failed, using zero value");
        V::default()
    })
}

pub fn to_bool<T: Into<Value>>(i: T) -> bool {
    or_zero(scalar::try_to_bool(i))
}

pub fn to_int<T: Into<Value>>(i: T) -> i64 {
    or_zero(scalar::try_to_int(i))
}

pub fn to_float<T: Into<Value>>(i: T) -> f64 {
    or_zero(scalar::try_to_float(i))
}

pub fn to_string<T: Into<Value>>(i: T) -> String {
    or_zero(scalar::try_to_string(i))
}

/// Falls back to the Unix epoch.
pub fn to_time<T: Into<Value>>(i: T) -> DateTime<FixedOffset> {
    or_zero(temporal::try_to_time(i))
}

pub fn to_duration<T: Into<Value>>(i: T) -> TimeDelta {
    or_zero(temporal::try_to_duration(i))
}

pub fn to_string_map_string<T: Into<Value>>(i: T) -> StringMap<String> {
    or_zero(collection::try_to_string_map_string(i))
}

pub fn to_string_map_bool<T: Into<Value>>(i: T) -> StringMap<bool> {
    or_zero(collection::try_to_string_map_bool(i))
}

pub fn to_string_map<T: Into<Value>>(i: T) -> StringMap<Value> {
    or_zero(collection::try_to_string_map(i))
}

pub fn to_slice<T: Into<Value>>(i: T) -> Vec<Value> {
    or_zero(collection::try_to_slice(i))
}

pub fn to_string_slice<T: Into<Value>>(i: T) -> Vec<String> {
    or_zero(collection::try_to_string_slice(i))
}

pub fn to_int_slice<T: Into<Value>>(i: T) -> Vec<i64> {
    or_zero(collection::try_to_int_slice(i))
}

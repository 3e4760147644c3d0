use thiserror::Error;

use crate::value::Value;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CastError {
    #[error("unable to cast {value} to {target}")]
    Unsupported { value: String, target: &'static str },
    #[error("unable to cast {value} of type {shape} to {target}")]
    Shape { value: String, shape: &'static str, target: &'static str },
    #[error("unable to parse date: {input}")]
    Date { input: String },
    #[error("could not parse date/time format: {0}")]
    DateTime(Box<CastError>),
    #[error("unable to parse duration {input:?}: {reason}")]
    Duration { input: String, reason: String },
}

pub type Result<T> = std::result::Result<T, CastError>;

// Helper constructors
impl CastError {
    pub(crate) fn unsupported(value: &Value, target: &'static str) -> Self {
        Self::Unsupported { value: format!("{value:?}"), target }
    }
    pub(crate) fn shape(value: &Value, target: &'static str) -> Self {
        Self::Shape { value: format!("{value:?}"), shape: value.type_name(), target }
    }
    pub(crate) fn duration(input: &str, reason: impl Into<String>) -> Self {
        Self::Duration { input: input.to_string(), reason: reason.into() }
    }
}

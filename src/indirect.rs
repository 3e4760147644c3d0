use crate::value::Value;

/// Follows pointers until reaching a value that is not one, or a null pointer.
pub fn indirect(value: Value) -> Value {
    let mut value = value;
    loop {
        value = match value {
            Value::Ptr(Some(pointee)) => *pointee,
            Value::Object(ref o) => match o.inner().pointee() {
                Some(pointee) => pointee,
                None => return value,
            },
            other => return other,
        };
    }
}

/// Like [`indirect`], but stops at the first value able to render itself as
/// text or as an error message, even when that value points further.
pub fn indirect_to_renderable(value: Value) -> Value {
    let mut value = value;
    while !value.is_renderable() {
        value = match value {
            Value::Ptr(Some(pointee)) => *pointee,
            Value::Object(ref o) => match o.inner().pointee() {
                Some(pointee) => pointee,
                None => break,
            },
            other => return other,
        };
    }
    value
}

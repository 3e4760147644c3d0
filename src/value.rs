// used for the time and duration variants
use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
// used for decimal numbers of arbitrary size
use bigdecimal::BigDecimal;

// string keyed maps use the same fast hasher as the rest of the crate
use core::hash::BuildHasherDefault;
use seahash::SeaHasher;
use std::collections::HashMap;

// used to print out readable forms of a value
use std::fmt;
use std::sync::Arc;

pub type CastHasher = BuildHasherDefault<SeaHasher>;
pub type StringMap<V> = HashMap<String, V, CastHasher>;

/// A value of dynamic type, the input to every cast.
///
/// The variants mirror the shapes a loosely typed producer (a configuration
/// file, a decoded JSON document, a template engine) hands over: scalars of
/// various widths, text, temporal values, pointers and a handful of map and
/// sequence shapes. Anything else can be wrapped as an [`Object`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Decimal(BigDecimal),
    Str(String),
    Bytes(Vec<u8>),
    Html(Html),
    Time(DateTime<FixedOffset>),
    Duration(TimeDelta),
    /// An indirection; `None` is a null pointer.
    Ptr(Option<Box<Value>>),
    /// A map whose keys are of dynamic type as well.
    AnyMap(Vec<(Value, Value)>),
    StringMap(StringMap<Value>),
    StringMapString(StringMap<String>),
    StringMapBool(StringMap<bool>),
    Slice(Vec<Value>),
    MapSlice(Vec<StringMap<Value>>),
    StringSlice(Vec<String>),
    IntSlice(Vec<i64>),
    Object(Object),
}

impl Value {
    /// Wraps a value behind one level of indirection.
    pub fn pointer<T: Into<Value>>(v: T) -> Value {
        Value::Ptr(Some(Box::new(v.into())))
    }
    pub fn null() -> Value {
        Value::Ptr(None)
    }
    pub fn any_map<K, V, I>(pairs: I) -> Value
    where
        K: Into<Value>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::AnyMap(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
    pub fn slice<T: Into<Value>, I: IntoIterator<Item = T>>(items: I) -> Value {
        Value::Slice(items.into_iter().map(Into::into).collect())
    }
    pub fn object<T: Dynamic + 'static>(o: T) -> Value {
        Value::Object(Object(Arc::new(o)))
    }
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Decimal(_) => "Decimal",
            Value::Str(_) => "String",
            Value::Bytes(_) => "Vec<u8>",
            Value::Html(_) => "Html",
            Value::Time(_) => "DateTime<FixedOffset>",
            Value::Duration(_) => "TimeDelta",
            Value::Ptr(_) => "Ptr",
            Value::AnyMap(_) => "AnyMap",
            Value::StringMap(_) => "StringMap<Value>",
            Value::StringMapString(_) => "StringMap<String>",
            Value::StringMapBool(_) => "StringMap<bool>",
            Value::Slice(_) => "Vec<Value>",
            Value::MapSlice(_) => "Vec<StringMap<Value>>",
            Value::StringSlice(_) => "Vec<String>",
            Value::IntSlice(_) => "Vec<i64>",
            Value::Object(o) => o.0.type_name(),
        }
    }
    /// The elements of any indexable shape, in index order, or `None` when
    /// the value is not a sequence. Strings and maps are not sequences.
    /// Bytes are a sequence of small integers, each widened to `I64`, so
    /// they cast element-wise like any other vector of integers.
    pub fn elements(&self) -> Option<Vec<Value>> {
        match self {
            Value::Slice(items) => Some(items.clone()),
            Value::MapSlice(maps) => Some(maps.iter().cloned().map(Value::StringMap).collect()),
            Value::StringSlice(items) => Some(items.iter().cloned().map(Value::Str).collect()),
            Value::IntSlice(items) => Some(items.iter().copied().map(Value::I64).collect()),
            Value::Bytes(bytes) => Some(bytes.iter().map(|b| Value::I64(i64::from(*b))).collect()),
            Value::Object(o) => o.0.elements(),
            _ => None,
        }
    }
    /// Whether the value knows how to render itself as text or as an error message.
    pub fn is_renderable(&self) -> bool {
        match self {
            Value::Time(_) | Value::Duration(_) | Value::Decimal(_) => true,
            Value::Object(o) => o.0.as_text().is_some() || o.0.as_error().is_some(),
            _ => false,
        }
    }
}

/// Capabilities a caller supplied value may offer to the casts.
///
/// Only `type_name` is required. A value that can render itself should
/// return `Some` from [`Dynamic::as_text`] or [`Dynamic::as_error`]; a value
/// that merely refers to another one returns it from [`Dynamic::pointee`];
/// a sequence exposes its items through [`Dynamic::elements`].
pub trait Dynamic: fmt::Debug + Send + Sync {
    fn type_name(&self) -> &'static str;
    fn as_text(&self) -> Option<&dyn fmt::Display> {
        None
    }
    fn as_error(&self) -> Option<&dyn std::error::Error> {
        None
    }
    fn pointee(&self) -> Option<Value> {
        None
    }
    fn elements(&self) -> Option<Vec<Value>> {
        None
    }
}

/// A shared handle to a caller supplied [`Dynamic`] value.
/// Two objects are equal only when they are the same allocation.
#[derive(Clone)]
pub struct Object(pub Arc<dyn Dynamic>);

impl Object {
    pub fn inner(&self) -> &dyn Dynamic {
        self.0.as_ref()
    }
}
impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
impl PartialEq for Object {
    fn eq(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Text that has already been made safe for inclusion in markup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Html(pub String);

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl From<&str> for Html {
    fn from(s: &str) -> Html {
        Html(String::from(s))
    }
}

// ------------- Conversions from native types --------------
macro_rules! value_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Value {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    BigDecimal => Decimal,
    String => Str,
    Vec<u8> => Bytes,
    Html => Html,
    DateTime<FixedOffset> => Time,
    TimeDelta => Duration,
    StringMap<Value> => StringMap,
    StringMap<String> => StringMapString,
    StringMap<bool> => StringMapBool,
    Vec<Value> => Slice,
    Vec<StringMap<Value>> => MapSlice,
    Vec<String> => StringSlice,
    Vec<i64> => IntSlice,
    Object => Object,
}

impl From<isize> for Value {
    fn from(v: isize) -> Value {
        Value::I64(v as i64)
    }
}
impl From<&str> for Value {
    fn from(v: &str) -> Value {
        Value::Str(String::from(v))
    }
}
impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Value {
        Value::Bytes(v.to_vec())
    }
}
impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Value {
        Value::StringSlice(v.into_iter().map(String::from).collect())
    }
}
impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Value {
        Value::Time(v.fixed_offset())
    }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Value {
        v.map_or(Value::Nil, Into::into)
    }
}
impl<T: Into<Value>> From<Box<T>> for Value {
    fn from(v: Box<T>) -> Value {
        Value::pointer(*v)
    }
}
// maps built with the default hasher are re-keyed into a StringMap
impl From<HashMap<String, Value>> for Value {
    fn from(m: HashMap<String, Value>) -> Value {
        Value::StringMap(m.into_iter().collect())
    }
}
impl From<HashMap<String, String>> for Value {
    fn from(m: HashMap<String, String>) -> Value {
        Value::StringMapString(m.into_iter().collect())
    }
}
impl From<HashMap<String, bool>> for Value {
    fn from(m: HashMap<String, bool>) -> Value {
        Value::StringMapBool(m.into_iter().collect())
    }
}

//! Typecast – coerce values of dynamic type into exact Rust types.
//!
//! Configuration files, decoded documents and template engines hand over
//! values whose type is only known at runtime. Typecast takes such a
//! [`value::Value`] and attempts to turn it into a specific target type:
//! * `bool`, `i64`, `f64` and `String` – see the [`scalar`] module.
//! * `DateTime<FixedOffset>` and `TimeDelta` – see the [`temporal`] module.
//! * string keyed maps and vectors – see the [`collection`] module.
//!
//! ## Two layers
//! Every target has a *strict* cast, named `try_to_*`, returning a
//! [`Result`] whose error describes what could not be cast into what, and a
//! *best-effort* cast, named `to_*` (see [`lenient`]), which returns the zero
//! value of the target type instead of an error. Both share the same
//! conversion rules; the best-effort layer only discards the error.
//!
//! ## Indirection
//! A [`value::Value::Ptr`] is followed down to the value it points at before
//! casting (see [`indirect::indirect`]). When casting to a string, the walk
//! stops early at any value that knows how to render itself, so a custom
//! [`value::Dynamic`] that renders as text is honored even when it also
//! points somewhere else.
//!
//! ## Dates
//! Strings are turned into times by trying a fixed, ordered list of layouts
//! (RFC 3339, RFC 1123, RFC 822, ANSI C, Unix date, plain dates and a few
//! more, see [`temporal::LAYOUTS`]). The first layout that accepts the input
//! wins.
//!
//! ## Quick Start
//! ```
//! use typecast::{to_bool, to_int, to_string, try_to_int, to_string_slice};
//! assert!(to_bool("true"));
//! assert_eq!(to_int("0x1f"), 31);
//! assert_eq!(to_int(3.9), 3);
//! assert_eq!(to_string(8.31), "8.31");
//! assert_eq!(to_string_slice("  a  b "), vec!["a", "b"]);
//! assert!(try_to_int("eleven").is_err());
//! assert_eq!(to_int("eleven"), 0);
//! ```
//!
//! ## Concurrency
//! Every cast is a pure function of its input; nothing is cached and no
//! state is shared, so casts may run on any number of threads at once.
//!
//! ## License
//! Dual licensed under Apache-2.0 and MIT (see included `LICENSE.*` files).

pub mod collection;
pub mod error;
pub mod indirect;
pub mod interop;
pub mod lenient;
pub mod scalar;
pub mod temporal;
pub mod value;

pub use collection::{
    try_to_int_slice, try_to_slice, try_to_string_map, try_to_string_map_bool, try_to_string_map_string,
    try_to_string_slice,
};
pub use error::{CastError, Result};
pub use indirect::{indirect, indirect_to_renderable};
pub use lenient::{
    to_bool, to_duration, to_float, to_int, to_int_slice, to_slice, to_string, to_string_map, to_string_map_bool,
    to_string_map_string, to_string_slice, to_time,
};
pub use scalar::{try_to_bool, try_to_float, try_to_int, try_to_string};
pub use temporal::{format_duration, parse_duration, string_to_date, try_to_duration, try_to_time};
pub use value::{Dynamic, Html, Object, StringMap, Value};

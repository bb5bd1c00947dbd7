//! # Input Datums and the Custom Value Protocol
//!
//! A `Datum` is one input value for one row of one column. Native datums carry
//! their runtime shape in the variant; user-defined values enter as
//! `Datum::Custom` and describe themselves through the `CustomValue` trait.
//!
//! ## Custom Value Hooks
//!
//! Every hook is optional. The default implementation reports the hook as
//! absent (`None`); an implemented hook returns `Some(result)` and may still
//! fail, in which case the coercer moves on to the next conversion path.
//!
//! | Hook | Purpose |
//! |------|---------|
//! | `dtype_hint` | The dtype the value wants its column to have |
//! | `custom_repr` | Explicit numeric/string representation |
//! | `to_int` / `to_float` | Native numeric conversions |
//! | `to_bool` / `to_date` / `to_datetime` | Native conversions for the terminal dtypes |
//! | `repr` | Textual form, always available |
//!
//! ## Identity
//!
//! Custom values are shared through `Arc`. Cloning a `Datum::Custom` takes one
//! more share of ownership; equality on custom datums is pointer identity, so a
//! value read back from an object column compares equal only to the very
//! value that was stored.
//!
//! ## Usage
//!
//! ```ignore
//! use colinfer::types::{CustomValue, Datum, Dtype, Primitive};
//!
//! #[derive(Debug)]
//! struct Celsius(f64);
//!
//! impl CustomValue for Celsius {
//!     fn dtype_hint(&self) -> Option<Dtype> { Some(Dtype::Float) }
//!     fn custom_repr(&self) -> Option<eyre::Result<Primitive>> {
//!         Some(Ok(Primitive::Float(self.0)))
//!     }
//! }
//!
//! let value = Datum::object(Celsius(21.5));
//! ```

use crate::parsing::{days_from_ymd, parse_date, parse_datetime};
use eyre::Result;
use std::fmt;
use std::sync::Arc;

use super::Dtype;

/// Capability set a user-defined value may implement.
pub trait CustomValue: Send + Sync + 'static {
    fn dtype_hint(&self) -> Option<Dtype> {
        None
    }

    /// Representation used in preference to every native conversion when the
    /// column is numeric.
    fn custom_repr(&self) -> Option<Result<Primitive>> {
        None
    }

    fn to_int(&self) -> Option<Result<i64>> {
        None
    }

    fn to_float(&self) -> Option<Result<f64>> {
        None
    }

    fn to_bool(&self) -> Option<Result<bool>> {
        None
    }

    /// Days since 1970-01-01.
    fn to_date(&self) -> Option<Result<i32>> {
        None
    }

    /// Microseconds since 1970-01-01T00:00:00.
    fn to_datetime(&self) -> Option<Result<i64>> {
        None
    }

    /// Textual form. The default names the type and the value's address.
    fn repr(&self) -> String {
        format!("<{} object at {:p}>", std::any::type_name::<Self>(), self)
    }
}

/// Shared handle to a user-defined value.
pub type ObjectRef = Arc<dyn CustomValue>;

/// Result of a `custom_repr` hook.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// One input value for one row of one column.
#[derive(Clone)]
pub enum Datum {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(i32),
    Datetime(i64),
    Custom(ObjectRef),
}

impl Datum {
    /// Wraps a user-defined value, taking the first share of ownership.
    pub fn object<T: CustomValue>(value: T) -> Self {
        Datum::Custom(Arc::new(value))
    }

    pub fn date(year: i32, month: u32, day: u32) -> Result<Self> {
        Ok(Datum::Date(days_from_ymd(year, month, day)?))
    }

    pub fn parse_date(s: &str) -> Result<Self> {
        Ok(Datum::Date(parse_date(s)?))
    }

    pub fn parse_datetime(s: &str) -> Result<Self> {
        Ok(Datum::Datetime(parse_datetime(s)?))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Datum::Custom(obj) => Some(obj),
            _ => None,
        }
    }

    /// Returns true if both datums are the same shared custom value.
    pub fn same_object(&self, other: &Datum) -> bool {
        match (self, other) {
            (Datum::Custom(a), Datum::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq for Datum {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Datum::Null, Datum::Null) => true,
            (Datum::Bool(a), Datum::Bool(b)) => a == b,
            (Datum::Int(a), Datum::Int(b)) => a == b,
            (Datum::Float(a), Datum::Float(b)) => a == b,
            (Datum::Str(a), Datum::Str(b)) => a == b,
            (Datum::Date(a), Datum::Date(b)) => a == b,
            (Datum::Datetime(a), Datum::Datetime(b)) => a == b,
            (Datum::Custom(a), Datum::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Null => f.write_str("Null"),
            Datum::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Datum::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Datum::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Datum::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Datum::Date(d) => f.debug_tuple("Date").field(d).finish(),
            Datum::Datetime(t) => f.debug_tuple("Datetime").field(t).finish(),
            Datum::Custom(obj) => f.debug_tuple("Custom").field(&obj.repr()).finish(),
        }
    }
}

impl From<bool> for Datum {
    fn from(b: bool) -> Self {
        Datum::Bool(b)
    }
}

impl From<i64> for Datum {
    fn from(i: i64) -> Self {
        Datum::Int(i)
    }
}

impl From<i32> for Datum {
    fn from(i: i32) -> Self {
        Datum::Int(i as i64)
    }
}

impl From<f64> for Datum {
    fn from(f: f64) -> Self {
        Datum::Float(f)
    }
}

impl From<&str> for Datum {
    fn from(s: &str) -> Self {
        Datum::Str(s.to_string())
    }
}

impl From<String> for Datum {
    fn from(s: String) -> Self {
        Datum::Str(s)
    }
}

impl<T: CustomValue> From<Arc<T>> for Datum {
    fn from(obj: Arc<T>) -> Self {
        Datum::Custom(obj)
    }
}

impl<T: Into<Datum>> From<Option<T>> for Datum {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Datum::Null)
    }
}

//! # Stored Scalars
//!
//! A `Scalar` is one element of a column after coercion. Its variant always
//! matches the column's `Dtype`; null rows are stored as `None` next to it
//! rather than as a variant, so `Option<Scalar>` is the element type of every
//! column.
//!
//! ## Object Scalars
//!
//! `Scalar::Object` keeps the original `Datum`. For custom values this is a
//! clone of the `Arc`, i.e. one share of ownership per stored row, released
//! when the scalar is dropped.
//!
//! ## Text Rendering
//!
//! `to_text` is the rendering used when a column is promoted to string and
//! its already-stored numeric scalars are rewritten.

use crate::parsing::{format_date, format_datetime};

use super::{Datum, Dtype};

/// One stored element of a column.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(i32),
    Datetime(i64),
    Object(Datum),
}

impl Scalar {
    pub fn dtype(&self) -> Dtype {
        match self {
            Scalar::Bool(_) => Dtype::Bool,
            Scalar::Int(_) => Dtype::Int,
            Scalar::Float(_) => Dtype::Float,
            Scalar::Str(_) => Dtype::Str,
            Scalar::Date(_) => Dtype::Date,
            Scalar::Datetime(_) => Dtype::Datetime,
            Scalar::Object(_) => Dtype::Object,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Scalar::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Datum> {
        match self {
            Scalar::Object(d) => Some(d),
            _ => None,
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => format_float(*f),
            Scalar::Str(s) => s.clone(),
            Scalar::Date(d) => format_date(*d),
            Scalar::Datetime(t) => format_datetime(*t),
            Scalar::Object(d) => datum_text(d),
        }
    }
}

/// Renders a float so integral values keep a trailing `.0`.
pub fn format_float(f: f64) -> String {
    format!("{:?}", f)
}

/// Default textual form of any datum.
pub fn datum_text(value: &Datum) -> String {
    match value {
        Datum::Null => String::new(),
        Datum::Bool(b) => b.to_string(),
        Datum::Int(i) => i.to_string(),
        Datum::Float(f) => format_float(*f),
        Datum::Str(s) => s.clone(),
        Datum::Date(d) => format_date(*d),
        Datum::Datetime(t) => format_datetime(*t),
        Datum::Custom(obj) => obj.repr(),
    }
}

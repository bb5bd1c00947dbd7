//! # Column Storage Dtype
//!
//! This module provides the canonical `Dtype` enum: the resolved storage type
//! of a column. It is a closed, seven-way variant shared by the resolver, the
//! coercer, the column builder and schema reporting.
//!
//! ## Type Categories
//!
//! | Category | Dtypes | Promotable |
//! |----------|--------|------------|
//! | **Numeric** | Int, Float | yes, to Str |
//! | **Text** | Str | terminal |
//! | **Temporal** | Date, Datetime | terminal |
//! | **Boolean** | Bool | terminal |
//! | **Reference** | Object | terminal |
//!
//! ## Promotion Rank
//!
//! Numeric dtypes sit below every terminal dtype. A column's dtype only ever
//! moves from a numeric dtype to `Str`, so the sequence of dtypes observed on
//! one column is non-decreasing in `promotion_rank()`.
//!
//! ## Discriminant Values
//!
//! `#[repr(u8)]` keeps the discriminant in one byte; `TryFrom<u8>` is the
//! inverse used when a dtype crosses an API boundary as a tag.
//!
//! ## Usage
//!
//! ```ignore
//! use colinfer::types::Dtype;
//!
//! let dt: Dtype = "integer".parse()?;
//! assert!(dt.is_numeric());
//! assert_eq!(dt.promoted(), Some(Dtype::Str));
//! ```

use std::fmt;
use std::str::FromStr;

/// Resolved storage type of a column.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dtype {
    Bool = 0,
    Int = 1,
    Float = 2,
    Str = 3,
    Date = 4,
    Datetime = 5,
    Object = 6,
}

impl Dtype {
    pub const ALL: [Dtype; 7] = [
        Dtype::Bool,
        Dtype::Int,
        Dtype::Float,
        Dtype::Str,
        Dtype::Date,
        Dtype::Datetime,
        Dtype::Object,
    ];

    /// Returns the canonical name reported to callers.
    pub fn name(&self) -> &'static str {
        match self {
            Dtype::Bool => "boolean",
            Dtype::Int => "integer",
            Dtype::Float => "float",
            Dtype::Str => "string",
            Dtype::Date => "date",
            Dtype::Datetime => "datetime",
            Dtype::Object => "object",
        }
    }

    /// Returns true for integer and float.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Dtype::Int | Dtype::Float)
    }

    /// Returns true if a column of this dtype can never change dtype again.
    pub fn is_terminal(&self) -> bool {
        !self.is_numeric()
    }

    /// Returns the dtype a column is promoted to when a value fails to
    /// coerce, or None when the failure is fatal.
    pub fn promoted(&self) -> Option<Dtype> {
        if self.is_numeric() {
            Some(Dtype::Str)
        } else {
            None
        }
    }

    pub fn promotion_rank(&self) -> u8 {
        if self.is_numeric() {
            0
        } else {
            1
        }
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dtype {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bool" | "boolean" => Ok(Dtype::Bool),
            "int" | "integer" => Ok(Dtype::Int),
            "float" => Ok(Dtype::Float),
            "str" | "string" => Ok(Dtype::Str),
            "date" => Ok(Dtype::Date),
            "datetime" => Ok(Dtype::Datetime),
            "object" => Ok(Dtype::Object),
            _ => eyre::bail!("unknown dtype name: '{}'", s),
        }
    }
}

impl TryFrom<u8> for Dtype {
    type Error = eyre::Report;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Dtype::Bool),
            1 => Ok(Dtype::Int),
            2 => Ok(Dtype::Float),
            3 => Ok(Dtype::Str),
            4 => Ok(Dtype::Date),
            5 => Ok(Dtype::Datetime),
            6 => Ok(Dtype::Object),
            _ => eyre::bail!("invalid Dtype discriminant: {}", value),
        }
    }
}

//! # Type System for Column Ingestion
//!
//! This module provides the data model shared by every stage of ingestion.
//!
//! ## Module Structure
//!
//! - `dtype`: Canonical `Dtype` enum, the resolved storage type of a column
//! - `datum`: Input `Datum` and the `CustomValue` hook trait
//! - `scalar`: Stored `Scalar` and text rendering
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | `Dtype` | Seven-way storage type discriminant |
//! | `Datum` | One input value (native or custom) |
//! | `CustomValue` | Optional hooks a user-defined value implements |
//! | `Primitive` | Result of a `custom_repr` hook |
//! | `Scalar` | One stored column element |
//!
//! ## Usage
//!
//! ```ignore
//! use colinfer::types::{Datum, Dtype, Scalar};
//!
//! let value = Datum::Int(42);
//! let stored = Scalar::Int(42);
//! assert_eq!(stored.dtype(), Dtype::Int);
//! ```

mod datum;
mod dtype;
mod scalar;

pub use datum::{CustomValue, Datum, ObjectRef, Primitive};
pub use dtype::Dtype;
pub use scalar::{datum_text, format_float, Scalar};

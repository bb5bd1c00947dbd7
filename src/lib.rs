//! # colinfer - Column Type Inference for Heterogeneous Values
//!
//! colinfer ingests rows of arbitrary, loosely typed values into named columns
//! and decides one concrete dtype per column. Values may be native primitives,
//! dates, or user-defined objects that expose optional conversion hooks.
//!
//! - **Hint-driven**: a value may name the dtype it wants to be stored as
//! - **Custom representations**: a value may substitute a primitive for itself
//! - **Safe promotion**: numeric columns widen to string instead of failing
//! - **Atomic updates**: a rejected batch leaves every column untouched
//!
//! ## Quick Start
//!
//! ```ignore
//! use colinfer::{Datum, Dtype, Table};
//!
//! let mut table = Table::from_columns([
//!     ("id", vec![Datum::Int(1), Datum::Int(2)]),
//!     ("score", vec![Datum::Float(0.5), Datum::Int(3)]),
//! ])?;
//!
//! assert_eq!(table.schema()["id"], Dtype::Int);
//! assert_eq!(table.schema()["score"], Dtype::Float);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        Table / SharedTable           │
//! ├─────────────────────────────────────┤
//! │   Column (stage / commit / clear)    │
//! ├─────────────────────────────────────┤
//! │   Resolver (dtype, promotion)        │
//! ├─────────────────────────────────────┤
//! │   Coercer (priority conversions)     │
//! ├─────────────────────────────────────┤
//! │   Probe (hint, repr, native access)  │
//! ├─────────────────────────────────────┤
//! │   Types (Datum, Dtype, Scalar)       │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`types`]: input datums, custom value hooks, dtypes, stored scalars
//! - [`ingest`]: probing, coercion, batch resolution, column storage
//! - [`table`]: multi-column facade with atomic updates
//! - [`parsing`]: calendar arithmetic and ISO-8601 date/time text
//! - [`error`]: typed ingestion failures
//! - [`config`]: engine constants

pub mod config;
pub mod error;
pub mod ingest;
pub mod parsing;
pub mod table;
pub mod types;

pub use error::IngestError;
pub use ingest::Column;
pub use table::{Record, Schema, SharedTable, Table};
pub use types::{CustomValue, Datum, Dtype, ObjectRef, Primitive, Scalar};

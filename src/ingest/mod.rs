//! # Column Ingestion Engine
//!
//! Turns a batch of heterogeneous datums for one column into stored scalars of
//! one consistent dtype.
//!
//! ## Pipeline
//!
//! ```text
//! ┌───────┐   ┌───────────────┐   ┌─────────┐   ┌──────────┐   ┌────────┐
//! │ Datum │──>│ probe         │──>│ coerce  │──>│ resolve  │──>│ Column │
//! │       │   │ (Capabilities)│   │ (Scalar)│   │ (dtype)  │   │ commit │
//! └───────┘   └───────────────┘   └─────────┘   └──────────┘   └────────┘
//! ```
//!
//! - `probe`: exposes hint, custom representation and native conversions
//! - `coerce`: one value to one target dtype, in strict priority order
//! - `resolve`: dtype of a batch, with numeric-to-string promotion
//! - `column`: storage, staging and atomic commit
//!
//! ## Promotion Policy
//!
//! | Current dtype | Value fails to coerce |
//! |---------------|-----------------------|
//! | Int, Float | column promoted to Str, all rows rewritten |
//! | Str | cannot fail |
//! | Object | cannot fail |
//! | Bool, Date, Datetime | `IncompatibleValue`, batch rejected |

mod coerce;
mod column;
mod probe;
mod resolve;

pub use coerce::coerce;
pub use column::{Column, StagedColumn};
pub use probe::{probe, Capabilities};
pub use resolve::{resolve_batch, Resolution};

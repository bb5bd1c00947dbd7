//! # Ingestion Configuration Constants
//!
//! This module centralizes all configuration constants, grouping interdependent
//! values together and documenting their relationships.
//!
//! ## Dependency Graph
//!
//! ```text
//! MICROS_PER_SECOND (1,000,000)
//!       │
//!       └─> MICROS_PER_DAY (derived: SECONDS_PER_DAY * MICROS_PER_SECOND)
//!             Datetime scalars are microseconds since the epoch; Date
//!             scalars are days since the epoch. Widening a date to a
//!             datetime multiplies by this value.
//!
//! VALUE_PREVIEW_LEN (64 chars)
//!       │
//!       └─> Bounds the rendering of an offending value inside
//!           IncompatibleValue errors. Must stay above the ellipsis length.
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use colinfer::config::{MICROS_PER_DAY, UNRESOLVED_COLUMN_DTYPE};
//! ```

use crate::types::Dtype;

// ============================================================================
// TYPE RESOLUTION
// ============================================================================

/// Dtype reported for a column that has not seen a single non-null value.
///
/// An unresolved column stays open: the first non-null value appended still
/// decides the real dtype. Only schema reporting uses this fallback.
pub const UNRESOLVED_COLUMN_DTYPE: Dtype = Dtype::Str;

// ============================================================================
// ERROR REPORTING
// ============================================================================

/// Maximum number of characters of a value rendered into an error message.
pub const VALUE_PREVIEW_LEN: usize = 64;

/// Suffix appended to a truncated value preview.
pub const VALUE_PREVIEW_ELLIPSIS: &str = "...";

const _: () = assert!(
    VALUE_PREVIEW_LEN > VALUE_PREVIEW_ELLIPSIS.len(),
    "VALUE_PREVIEW_LEN must leave room for the ellipsis"
);

// ============================================================================
// TEMPORAL UNITS
// These constants are tightly coupled - changing one may require changing others
// ============================================================================

/// Microseconds in one second.
pub const MICROS_PER_SECOND: i64 = 1_000_000;

/// Seconds in one calendar day (no leap seconds).
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Microseconds in one calendar day.
pub const MICROS_PER_DAY: i64 = SECONDS_PER_DAY * MICROS_PER_SECOND;

const _: () = assert!(
    MICROS_PER_DAY == 86_400_000_000,
    "MICROS_PER_DAY derivation mismatch"
);

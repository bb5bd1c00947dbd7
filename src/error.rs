//! # Ingestion Errors
//!
//! Typed failures surfaced by the ingestion engine. Public operations return
//! `eyre::Result`; the `IngestError` inside the report can be recovered with
//! `downcast_ref` to branch on the failure kind:
//!
//! ```ignore
//! match table.update(&rows) {
//!     Err(e) if matches!(e.downcast_ref::<IngestError>(),
//!                        Some(IngestError::IncompatibleValue { .. })) => { /* reject batch */ }
//!     other => other?,
//! }
//! ```
//!
//! Numeric incompatibility never reaches this type: it promotes the column
//! to string instead.

use crate::config::{VALUE_PREVIEW_ELLIPSIS, VALUE_PREVIEW_LEN};
use crate::types::{datum_text, Datum, Dtype};

#[derive(Debug, Clone, PartialEq)]
pub enum IngestError {
    /// A value could not be coerced to a non-promotable dtype.
    IncompatibleValue {
        value: String,
        target: Dtype,
        reason: Option<String>,
    },
    /// Input records do not share the expected column set.
    SchemaMismatch { detail: String },
}

impl IngestError {
    pub fn incompatible(value: &Datum, target: Dtype, reason: Option<String>) -> Self {
        IngestError::IncompatibleValue {
            value: preview(&datum_text(value)),
            target,
            reason,
        }
    }

    pub fn schema_mismatch(detail: impl Into<String>) -> Self {
        IngestError::SchemaMismatch {
            detail: detail.into(),
        }
    }

    pub fn is_incompatible_value(&self) -> bool {
        matches!(self, IngestError::IncompatibleValue { .. })
    }

    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, IngestError::SchemaMismatch { .. })
    }
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::IncompatibleValue {
                value,
                target,
                reason,
            } => {
                write!(f, "incompatible value '{}' for {} column", value, target)?;
                if let Some(reason) = reason {
                    write!(f, ": {}", reason)?;
                }
                Ok(())
            }
            IngestError::SchemaMismatch { detail } => write!(f, "schema mismatch: {}", detail),
        }
    }
}

impl std::error::Error for IngestError {}

fn preview(text: &str) -> String {
    if text.chars().count() <= VALUE_PREVIEW_LEN {
        return text.to_string();
    }
    let keep = VALUE_PREVIEW_LEN - VALUE_PREVIEW_ELLIPSIS.len();
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(VALUE_PREVIEW_ELLIPSIS);
    out
}

//! # Column Builder and Appender
//!
//! `Column` owns the storage of one column and drives the resolver and the
//! coercer against it.
//!
//! ## Staging
//!
//! Every mutation is split in two steps:
//!
//! ```text
//! stage(&self, batch)  ──> StagedColumn   (pure, may fail)
//! commit(&mut self, staged)               (infallible swap)
//! ```
//!
//! A staged batch is either a plain append or, when the batch promoted a
//! numeric column to string, a full rebuild in which the committed scalars
//! are rewritten as text. Readers never observe a half-promoted column, and a
//! table can stage every column of an update before committing any of them.
//!
//! ## Object Ownership
//!
//! Object columns hold one `Arc` share per stored row. Shares are taken when a
//! batch is staged (the staged scalars own them) and released by `clear`, by a
//! discarded stage, or when the column is dropped.

use crate::config::UNRESOLVED_COLUMN_DTYPE;
use crate::error::IngestError;
use crate::types::{Datum, Dtype, Scalar};
use eyre::{Result, WrapErr};
use tracing::debug;

use super::resolve::resolve_batch;

/// One column: a dtype and its stored scalars in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: Option<Dtype>,
    data: Vec<Option<Scalar>>,
}

/// A resolved batch waiting to be committed into its column.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedColumn {
    dtype: Option<Dtype>,
    storage: StagedStorage,
}

#[derive(Debug, Clone, PartialEq)]
enum StagedStorage {
    Append(Vec<Option<Scalar>>),
    Rebuild(Vec<Option<Scalar>>),
}

impl StagedColumn {
    pub fn dtype(&self) -> Option<Dtype> {
        self.dtype
    }

    /// Returns true if committing rewrites the rows already in the column.
    pub fn is_rebuild(&self) -> bool {
        matches!(self.storage, StagedStorage::Rebuild(_))
    }
}

impl Column {
    /// Creates an empty column whose dtype is decided by its first value.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dtype: None,
            data: Vec::new(),
        }
    }

    /// Creates an empty column with a declared dtype.
    pub fn with_dtype(name: impl Into<String>, dtype: Dtype) -> Self {
        Self {
            name: name.into(),
            dtype: Some(dtype),
            data: Vec::new(),
        }
    }

    /// Creates a column from its initial batch, resolving the dtype over it.
    pub fn create(name: impl Into<String>, values: &[Datum]) -> Result<Self> {
        let mut column = Self::new(name);
        column.append(values)?;
        Ok(column)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the resolved dtype, or the unresolved fallback.
    pub fn dtype(&self) -> Dtype {
        self.dtype.unwrap_or(UNRESOLVED_COLUMN_DTYPE)
    }

    pub fn is_resolved(&self) -> bool {
        self.dtype.is_some()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&Scalar> {
        self.data.get(row).and_then(Option::as_ref)
    }

    pub fn scalars(&self) -> &[Option<Scalar>] {
        &self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&Scalar>> + '_ {
        self.data.iter().map(Option::as_ref)
    }

    /// Resolves `values` against this column without mutating it.
    pub fn stage(&self, values: &[Datum]) -> Result<StagedColumn, IngestError> {
        let resolution = resolve_batch(self.dtype, values)?;

        let rewrite = matches!(
            (self.dtype, resolution.dtype),
            (Some(before), Some(after)) if before != after
        );
        if !rewrite {
            return Ok(StagedColumn {
                dtype: resolution.dtype,
                storage: StagedStorage::Append(resolution.scalars),
            });
        }

        debug!(
            column = %self.name,
            from = ?resolution.promoted_from,
            rows = self.data.len(),
            "rewriting column as string"
        );
        let mut rebuilt = Vec::with_capacity(self.data.len() + resolution.scalars.len());
        rebuilt.extend(
            self.data
                .iter()
                .map(|s| s.as_ref().map(|s| Scalar::Str(s.to_text()))),
        );
        rebuilt.extend(resolution.scalars);

        Ok(StagedColumn {
            dtype: resolution.dtype,
            storage: StagedStorage::Rebuild(rebuilt),
        })
    }

    /// Swaps a staged batch into the column.
    pub fn commit(&mut self, staged: StagedColumn) {
        match staged.storage {
            StagedStorage::Append(batch) => self.data.extend(batch),
            StagedStorage::Rebuild(rebuilt) => self.data = rebuilt,
        }
        if staged.dtype.is_some() {
            self.dtype = staged.dtype;
        }
        debug_assert!(self.check_invariant());
    }

    /// Appends a batch, promoting the column when a numeric value fails.
    pub fn append(&mut self, values: &[Datum]) -> Result<()> {
        let staged = self
            .stage(values)
            .wrap_err_with(|| format!("failed to ingest column '{}'", self.name))?;
        self.commit(staged);
        Ok(())
    }

    /// Drops every stored scalar, releasing object shares. The dtype stays.
    pub fn clear(&mut self) {
        let released = match self.dtype {
            Some(Dtype::Object) => self.data.iter().flatten().count(),
            _ => 0,
        };
        self.data = Vec::new();
        debug!(column = %self.name, released, "cleared column");
    }

    fn check_invariant(&self) -> bool {
        match self.dtype {
            Some(dtype) => self.data.iter().flatten().all(|s| s.dtype() == dtype),
            None => self.data.iter().all(Option::is_none),
        }
    }
}

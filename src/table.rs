//! # In-Memory Table Facade
//!
//! `Table` groups named columns that grow together, one record per row. It is
//! the boundary through which callers feed the ingestion engine: records are
//! validated against the column set, split per column, resolved, and then
//! committed all at once.
//!
//! ## Atomic Updates
//!
//! ```text
//! update(records)
//!   1. key-set check     ──> SchemaMismatch, nothing touched
//!   2. stage every column ──> IncompatibleValue, nothing touched
//!   3. commit every column
//! ```
//!
//! ## Concurrency
//!
//! `Table` is mutated through `&mut self`. `SharedTable` is the shared handle:
//! a `parking_lot::RwLock` serializes writers and lets readers proceed
//! concurrently.
//!
//! ## Usage
//!
//! ```ignore
//! use colinfer::{Datum, Record, Table};
//!
//! let mut table = Table::from_columns([("a", vec![Datum::Int(1), Datum::Int(2)])])?;
//! let mut row = Record::new();
//! row.insert("a".to_string(), Datum::Int(3));
//! table.update(&[row])?;
//! assert_eq!(table.size(), 3);
//! ```

use crate::error::IngestError;
use crate::ingest::{Column, StagedColumn};
use crate::types::{Datum, Dtype, Scalar};
use eyre::{Result, WrapErr};
use hashbrown::HashMap;
use parking_lot::{RwLock, RwLockReadGuard};
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::debug;

/// One input row: column name to value.
pub type Record = HashMap<String, Datum>;

/// Column name to resolved dtype.
pub type Schema = HashMap<String, Dtype>;

#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
    size: usize,
}

impl Table {
    /// Builds a table from row-oriented input. Columns are ordered by name.
    pub fn from_records(records: &[Record]) -> Result<Self> {
        let mut names: Vec<String> = match records.first() {
            Some(first) => first.keys().cloned().collect(),
            None => return Ok(Self::default()),
        };
        names.sort_unstable();
        check_record_keys(&names, records)?;

        let mut table = Self::with_columns(names.iter().map(Column::new).collect())?;
        table.update(records)?;
        Ok(table)
    }

    /// Builds a table from column-oriented input, keeping the given order.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<Datum>)>,
        S: Into<String>,
    {
        let mut built = Vec::new();
        let mut size = None;
        for (name, values) in columns {
            let name = name.into();
            match size {
                None => size = Some(values.len()),
                Some(expected) if expected != values.len() => {
                    return Err(IngestError::schema_mismatch(format!(
                        "column '{}' has {} values, expected {}",
                        name,
                        values.len(),
                        expected
                    ))
                    .into());
                }
                Some(_) => {}
            }
            built.push(Column::create(name, &values)?);
        }

        let mut table = Self::with_columns(built)?;
        table.size = size.unwrap_or(0);
        Ok(table)
    }

    /// Builds an empty table with declared dtypes. Columns are ordered by name.
    pub fn from_schema(schema: &Schema) -> Self {
        let mut entries: Vec<(&String, &Dtype)> = schema.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let columns: Vec<Column> = entries
            .into_iter()
            .map(|(name, dtype)| Column::with_dtype(name.clone(), *dtype))
            .collect();
        let index = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name().to_string(), i))
            .collect();
        Self {
            columns,
            index,
            size: 0,
        }
    }

    fn with_columns(columns: Vec<Column>) -> Result<Self> {
        let mut index = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            if index.insert(column.name().to_string(), i).is_some() {
                return Err(IngestError::schema_mismatch(format!(
                    "duplicate column '{}'",
                    column.name()
                ))
                .into());
            }
        }
        Ok(Self {
            columns,
            index,
            size: 0,
        })
    }

    /// Appends records. Either every column accepts the batch or none changes.
    pub fn update(&mut self, records: &[Record]) -> Result<()> {
        let names: Vec<String> = self.columns.iter().map(|c| c.name().to_string()).collect();
        check_record_keys(&names, records)?;

        let mut staged: Vec<StagedColumn> = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            let values: Vec<Datum> = records
                .iter()
                .map(|r| r.get(column.name()).cloned().unwrap_or(Datum::Null))
                .collect();
            let stage = column
                .stage(&values)
                .wrap_err_with(|| format!("failed to ingest column '{}'", column.name()))?;
            staged.push(stage);
        }

        for (column, stage) in self.columns.iter_mut().zip(staged) {
            column.commit(stage);
        }
        self.size += records.len();
        debug!(
            rows = records.len(),
            columns = self.columns.len(),
            size = self.size,
            "table updated"
        );
        Ok(())
    }

    /// Empties every column. Column dtypes are kept.
    pub fn clear(&mut self) {
        for column in &mut self.columns {
            column.clear();
        }
        self.size = 0;
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn schema(&self) -> Schema {
        self.columns
            .iter()
            .map(|c| (c.name().to_string(), c.dtype()))
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Stored scalars of every column, in column order.
    pub fn to_columns(&self) -> Vec<(&str, &[Option<Scalar>])> {
        self.columns
            .iter()
            .map(|c| (c.name(), c.scalars()))
            .collect()
    }
}

fn check_record_keys(expected: &[String], records: &[Record]) -> Result<(), IngestError> {
    for (row, record) in records.iter().enumerate() {
        let matches = record.len() == expected.len()
            && expected.iter().all(|k| record.contains_key(k.as_str()));
        if matches {
            continue;
        }

        let missing: SmallVec<[&str; 4]> = expected
            .iter()
            .filter(|k| !record.contains_key(k.as_str()))
            .map(String::as_str)
            .collect();
        let mut unexpected: SmallVec<[&str; 4]> = record
            .keys()
            .filter(|k| !expected.contains(*k))
            .map(String::as_str)
            .collect();
        unexpected.sort_unstable();

        return Err(IngestError::schema_mismatch(format!(
            "row {}: missing columns {:?}, unexpected columns {:?}",
            row,
            missing.as_slice(),
            unexpected.as_slice()
        )));
    }
    Ok(())
}

/// Shared, lock-protected handle to a `Table`.
#[derive(Debug, Clone)]
pub struct SharedTable {
    inner: Arc<RwLock<Table>>,
}

impl SharedTable {
    pub fn new(table: Table) -> Self {
        Self {
            inner: Arc::new(RwLock::new(table)),
        }
    }

    pub fn update(&self, records: &[Record]) -> Result<()> {
        self.inner.write().update(records)
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn size(&self) -> usize {
        self.inner.read().size()
    }

    pub fn schema(&self) -> Schema {
        self.inner.read().schema()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Table> {
        self.inner.read()
    }
}

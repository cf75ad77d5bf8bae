// src/process/mod.rs
use anyhow::{anyhow, Context, Result};
use arrow::{
    array::{Array, ArrayRef, StringArray},
    datatypes::{Field, Schema},
    record_batch::RecordBatch,
};
use std::sync::Arc;
use tracing::debug;

use crate::error::TransformError;

pub mod date_parser;
pub mod normalize;
pub mod raw_table;
pub mod split;

pub use normalize::{normalize, FlagRule};
pub use raw_table::RawTable;
pub use split::{project_table, split_tables};

/// The unified record set: every input row, one nullable column per name.
///
/// Columns start out as raw strings; normalization swaps some of them for
/// integer flags and appends derived ones. Nulls are the missing marker.
#[derive(Debug, Clone)]
pub struct RecordSet {
    batch: RecordBatch,
}

impl RecordSet {
    /// Concatenate `tables` in order.
    ///
    /// The column set is the union of all headers in first-seen order; rows
    /// from a table that lacks a column get nulls there.
    pub fn from_tables(tables: &[RawTable]) -> Result<Self> {
        let mut names: Vec<&str> = Vec::new();
        for table in tables {
            for h in &table.headers {
                if !names.contains(&h.as_str()) {
                    names.push(h);
                }
            }
        }

        let total_rows: usize = tables.iter().map(|t| t.rows.len()).sum();
        let mut fields = Vec::with_capacity(names.len());
        let mut columns: Vec<ArrayRef> = Vec::with_capacity(names.len());

        for name in &names {
            let mut values: Vec<Option<&str>> = Vec::with_capacity(total_rows);
            for table in tables {
                match table.headers.iter().position(|h| h == name) {
                    Some(idx) => {
                        for (r, row) in table.rows.iter().enumerate() {
                            let cell = row.get(idx).ok_or_else(|| {
                                anyhow!("{}: row {} has no field for '{}'", table.source, r, name)
                            })?;
                            values.push(cell.as_deref());
                        }
                    }
                    None => {
                        debug!(
                            source = %table.source,
                            column = *name,
                            "column absent, filling with missing"
                        );
                        values.extend(std::iter::repeat(None).take(table.rows.len()));
                    }
                }
            }
            fields.push(Field::new(*name, arrow::datatypes::DataType::Utf8, true));
            columns.push(Arc::new(StringArray::from(values)) as ArrayRef);
        }

        let batch = if columns.is_empty() {
            RecordBatch::new_empty(Arc::new(Schema::empty()))
        } else {
            RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
                .context("assembling unified record set")?
        };
        Ok(Self { batch })
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.batch.schema().index_of(name).is_ok()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    /// The raw string column `name`, or `None` if the set has no such column.
    pub fn string_column(&self, name: &str) -> Result<Option<&StringArray>, TransformError> {
        let Some(col) = self.batch.column_by_name(name) else {
            return Ok(None);
        };
        col.as_any()
            .downcast_ref::<StringArray>()
            .map(Some)
            .ok_or_else(|| TransformError::NotUtf8Column(name.to_string()))
    }

    /// Swap in `values` for column `name`, or append it as a new column.
    pub fn set_column(&mut self, name: &str, values: ArrayRef) -> Result<()> {
        let schema = self.batch.schema();
        let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
        let mut columns: Vec<ArrayRef> = self.batch.columns().to_vec();
        let field = Field::new(name, values.data_type().clone(), true);

        match schema.index_of(name) {
            Ok(idx) => {
                fields[idx] = field;
                columns[idx] = values;
            }
            Err(_) => {
                fields.push(field);
                columns.push(values);
            }
        }

        self.batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
            .with_context(|| format!("replacing column '{}'", name))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Int64Array;

    fn table(source: &str, headers: &[&str], rows: &[&[Option<&str>]]) -> RawTable {
        RawTable {
            source: source.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.map(str::to_string)).collect())
                .collect(),
        }
    }

    #[test]
    fn union_of_columns_fills_missing() -> Result<()> {
        let a = table("a", &["client_id", "job"], &[&[Some("1"), Some("admin.")]]);
        let b = table(
            "b",
            &["client_id", "age"],
            &[&[Some("2"), Some("40")], &[Some("3"), None]],
        );
        let set = RecordSet::from_tables(&[a, b])?;

        assert_eq!(set.num_rows(), 3);
        assert_eq!(set.column_names(), vec!["client_id", "job", "age"]);

        let job = set.string_column("job")?.unwrap();
        assert_eq!(job.value(0), "admin.");
        assert!(job.is_null(1) && job.is_null(2));

        let age = set.string_column("age")?.unwrap();
        assert!(age.is_null(0));
        assert_eq!(age.value(1), "40");
        assert!(age.is_null(2));
        Ok(())
    }

    #[test]
    fn no_tables_is_empty_set() -> Result<()> {
        let set = RecordSet::from_tables(&[])?;
        assert_eq!(set.num_rows(), 0);
        assert!(set.column_names().is_empty());
        Ok(())
    }

    #[test]
    fn set_column_replaces_and_appends() -> Result<()> {
        let t = table("a", &["client_id", "mortgage"], &[&[Some("1"), Some("yes")]]);
        let mut set = RecordSet::from_tables(&[t])?;

        set.set_column("mortgage", Arc::new(Int64Array::from(vec![1])))?;
        set.set_column("extra", Arc::new(StringArray::from(vec![Some("x")])))?;

        assert_eq!(set.column_names(), vec!["client_id", "mortgage", "extra"]);
        assert!(matches!(
            set.string_column("mortgage"),
            Err(TransformError::NotUtf8Column(_))
        ));
        assert!(set.string_column("nope")?.is_none());
        Ok(())
    }
}

// src/process/split.rs
use arrow::record_batch::RecordBatch;
use tracing::{debug, instrument};

use super::RecordSet;
use crate::error::TransformError;
use crate::schema::{TableSpec, OUTPUT_TABLES};

/// Select `spec`'s columns, in `spec`'s order, out of the normalized set.
pub fn project_table(set: &RecordSet, spec: &TableSpec) -> Result<RecordBatch, TransformError> {
    let schema = set.batch().schema();
    let indices = spec
        .columns
        .iter()
        .map(|col| {
            schema
                .index_of(col)
                .map_err(|_| TransformError::MissingColumn {
                    table: spec.name.to_string(),
                    column: col.to_string(),
                })
        })
        .collect::<Result<Vec<usize>, _>>()?;

    let batch = set.batch().project(&indices)?;
    debug!(table = spec.name, rows = batch.num_rows(), "projected");
    Ok(batch)
}

/// Project every output table. Fails on the first missing column, before
/// anything is handed to a writer.
#[instrument(level = "info", skip(set), fields(rows = set.num_rows()))]
pub fn split_tables(set: &RecordSet) -> Result<Vec<(TableSpec, RecordBatch)>, TransformError> {
    OUTPUT_TABLES
        .iter()
        .map(|spec| project_table(set, spec).map(|batch| (*spec, batch)))
        .collect()
}

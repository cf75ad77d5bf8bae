// src/pipeline.rs
use anyhow::{Context, Result};
use arrow::record_batch::RecordBatch;
use std::{path::PathBuf, time::Instant};
use tracing::{info, instrument, warn};

use crate::{
    config::Config,
    error::TransformError,
    fetch::{discover_archives, load_campaign_zip},
    process::{normalize, split_tables, RawTable, RecordSet},
    schema::{resolve_headers, TableSpec},
    write::write_tables,
};

/// What a run did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub archives: usize,
    pub rows: usize,
    pub written: Vec<PathBuf>,
}

/// Clean the campaign archives under `files/input` into the three tables
/// under `files/output`.
pub fn clean_campaign_data() -> Result<()> {
    run(&Config::default()).map(|_| ())
}

/// Resolve aliases, unify, normalize and split already-loaded tables.
///
/// No I/O: this is the whole record transformation, so transforming
/// `a ++ b` gives the same rows as transforming `a` and `b` separately.
pub fn transform(
    mut tables: Vec<RawTable>,
    contact_year: i32,
) -> Result<Vec<(TableSpec, RecordBatch)>> {
    for table in &mut tables {
        resolve_headers(&table.source, &mut table.headers)?;
    }

    let mut set = RecordSet::from_tables(&tables)?;
    drop(tables);
    normalize(&mut set, contact_year)?;
    Ok(split_tables(&set)?)
}

/// Read every matching archive, transform, and write the output tables.
///
/// With no matching archives nothing is written, unless `require_input` is
/// set, in which case that is an error. All three tables are projected
/// before the first file is written.
#[instrument(
    level = "info",
    skip(config),
    fields(input = %config.input_dir.display(), output = %config.output_dir.display())
)]
pub fn run(config: &Config) -> Result<RunSummary> {
    let start = Instant::now();
    let pattern = config.archive_glob();

    let archives = discover_archives(&pattern)?;
    if archives.is_empty() {
        if config.require_input {
            return Err(TransformError::NoInput { pattern }.into());
        }
        warn!(%pattern, "no input archives; nothing written");
        return Ok(RunSummary::default());
    }
    info!(count = archives.len(), "found input archives");

    let tables = archives
        .iter()
        .map(|path| {
            load_campaign_zip(path).with_context(|| format!("loading {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    let rows: usize = tables.iter().map(|t| t.rows.len()).sum();

    let projected = transform(tables, config.contact_year)?;
    let written = write_tables(&config.output_dir, &projected)?;

    info!(rows, files = written.len(), elapsed = ?start.elapsed(), "all done");
    Ok(RunSummary {
        archives: archives.len(),
        rows,
        written,
    })
}

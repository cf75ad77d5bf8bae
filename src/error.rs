// src/error.rs

use std::path::PathBuf;

/// Domain failures of a campaign split run.
///
/// These travel inside `anyhow::Error`; callers that care about the kind use
/// `err.downcast_ref::<TransformError>()`.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// An output table needs a column the merged records don't carry.
    #[error("table `{table}` requires column `{column}`, which is absent from the merged records")]
    MissingColumn { table: String, column: String },

    /// An input carries both a known alias and its canonical column.
    #[error("input `{source_name}` has both `{alias}` and `{canonical}`")]
    AmbiguousColumn {
        source_name: String,
        alias: String,
        canonical: String,
    },

    /// No archive matched the input pattern and input was required.
    #[error("no input archives match {pattern:?}")]
    NoInput { pattern: String },

    /// A column expected to hold raw strings has another type.
    #[error("column `{0}` is not a string column")]
    NotUtf8Column(String),

    /// Building or reshaping an in-memory table failed.
    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// The archive opened fine but holds no CSV entry.
    #[error("archive {0:?} contains no .csv entry")]
    MalformedArchive(PathBuf),
}

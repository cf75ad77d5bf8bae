// src/write.rs
use anyhow::{Context, Result};
use arrow::{csv::WriterBuilder, record_batch::RecordBatch};
use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::{info, instrument};

use crate::schema::TableSpec;

/// Write `batch` as `<dir>/<table>.csv`: header row, comma separated,
/// missing values as empty fields.
///
/// The rows go to a temp file in `dir` that is renamed over the target once
/// complete. On any failure the temp file is removed and the target is left
/// as it was.
#[instrument(
    level = "info",
    skip(dir, batch),
    fields(table = spec.name, rows = batch.num_rows())
)]
pub fn write_table<P: AsRef<Path>>(
    dir: P,
    spec: &TableSpec,
    batch: &RecordBatch,
) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let file_name = spec.file_name();
    let path = dir.join(&file_name);

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    {
        let mut writer = WriterBuilder::new()
            .with_header(true)
            .build(BufWriter::new(tmp.as_file_mut()));
        writer
            .write(batch)
            .with_context(|| format!("writing {}", file_name))?;
        writer
            .into_inner()
            .flush()
            .with_context(|| format!("flushing {}", file_name))?;
    }

    tmp.persist(&path)
        .with_context(|| format!("moving {} into place", path.display()))?;

    info!(path = %path.display(), "wrote table");
    Ok(path)
}

/// Write every projected table into `dir`, creating it if needed.
pub fn write_tables<P: AsRef<Path>>(
    dir: P,
    tables: &[(TableSpec, RecordBatch)],
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    tables
        .iter()
        .map(|(spec, batch)| write_table(dir, spec, batch))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ECONOMICS;
    use arrow::{
        array::{ArrayRef, Int64Array, StringArray},
        datatypes::{DataType, Field, Schema},
    };
    use std::sync::Arc;
    use tempfile::tempdir;

    fn batch() -> RecordBatch {
        let schema = Schema::new(vec![
            Field::new("client_id", DataType::Utf8, true),
            Field::new("flag", DataType::Int64, true),
            Field::new("note", DataType::Utf8, true),
        ]);
        let cols: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec![Some("1"), Some("2")])),
            Arc::new(Int64Array::from(vec![1, 0])),
            Arc::new(StringArray::from(vec![None, Some("a,b")])),
        ];
        RecordBatch::try_new(Arc::new(schema), cols).unwrap()
    }

    #[test]
    fn writes_header_and_empty_missing() -> Result<()> {
        let dir = tempdir()?;
        let path = write_table(dir.path(), &ECONOMICS, &batch())?;

        assert_eq!(path, dir.path().join("economics.csv"));
        let text = fs::read_to_string(&path)?;
        assert_eq!(text, "client_id,flag,note\n1,1,\n2,0,\"a,b\"\n");
        assert_eq!(entries(dir.path())?, vec!["economics.csv"]);
        Ok(())
    }

    fn entries(dir: &Path) -> Result<Vec<String>> {
        let mut names = fs::read_dir(dir)?
            .map(|e| -> Result<String> { Ok(e?.file_name().to_string_lossy().to_string()) })
            .collect::<Result<Vec<_>>>()?;
        names.sort();
        Ok(names)
    }

    #[test]
    fn failed_write_leaves_no_temp_file() -> Result<()> {
        let dir = tempdir()?;
        // a non-empty directory where the table should go makes the final rename fail
        let blocker = dir.path().join("economics.csv");
        fs::create_dir(&blocker)?;
        fs::write(blocker.join("keep"), "x")?;

        assert!(write_table(dir.path(), &ECONOMICS, &batch()).is_err());
        assert_eq!(entries(dir.path())?, vec!["economics.csv"]);
        assert!(blocker.join("keep").exists());
        Ok(())
    }

    #[test]
    fn overwrites_existing_file() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("economics.csv"), "stale\n")?;
        let path = write_table(dir.path(), &ECONOMICS, &batch())?;
        assert!(fs::read_to_string(path)?.starts_with("client_id,flag,note\n"));
        Ok(())
    }

    #[test]
    fn creates_output_dir() -> Result<()> {
        let dir = tempdir()?;
        let out = dir.path().join("nested").join("output");
        let written = write_tables(&out, &[(ECONOMICS, batch())])?;
        assert_eq!(written, vec![out.join("economics.csv")]);
        Ok(())
    }
}

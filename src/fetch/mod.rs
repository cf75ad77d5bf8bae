// src/fetch/mod.rs
use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use glob::glob;
use std::{
    collections::HashSet,
    fs::File,
    io::{Cursor, Read},
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};
use zip::ZipArchive;

use crate::error::TransformError;
use crate::process::raw_table::RawTable;

/// Headers pandas-style exports give their row-index column.
const INDEX_HEADERS: &[&str] = &["", "Unnamed: 0"];

/// All files matching `pattern`, in lexicographic order.
pub fn discover_archives(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut paths = glob(pattern)
        .with_context(|| format!("invalid glob pattern '{}'", pattern))?
        .collect::<Result<Vec<PathBuf>, _>>()
        .with_context(|| format!("listing files for '{}'", pattern))?;
    paths.retain(|p| p.is_file());
    paths.sort();
    debug!(pattern, found = paths.len(), "discovered archives");
    Ok(paths)
}

/// Open `zip_path` and parse its first `.csv` entry into a [`RawTable`].
///
/// The archive is expected to hold exactly one CSV; any later entries are
/// ignored. An archive with no CSV entry at all is malformed.
#[tracing::instrument(level = "info", skip(zip_path), fields(path = %zip_path.as_ref().display()))]
pub fn load_campaign_zip<P: AsRef<Path>>(zip_path: P) -> Result<RawTable> {
    let zip_path = zip_path.as_ref();
    let file = File::open(zip_path)
        .with_context(|| format!("Failed to open ZIP file: {:?}", zip_path))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("Failed to read ZIP archive: {:?}", zip_path))?;

    let mut csv_entry: Option<(String, Vec<u8>)> = None;
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .with_context(|| format!("Failed to access ZIP entry #{} in {:?}", i, zip_path))?;
        let name = entry.name().to_string();

        if entry.is_file() && name.to_lowercase().ends_with(".csv") {
            let mut buf = Vec::with_capacity(entry.size() as usize);
            entry
                .read_to_end(&mut buf)
                .with_context(|| format!("Failed to read {} into memory", name))?;
            csv_entry = Some((name, buf));
            break;
        }
    }
    drop(archive);

    let (entry_name, data) =
        csv_entry.ok_or_else(|| TransformError::MalformedArchive(zip_path.to_path_buf()))?;
    let archive_name = zip_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let source = format!("{}:{}", archive_name, entry_name);

    let table = parse_csv(&source, Cursor::new(data))?;
    info!(
        source = %table.source,
        columns = table.headers.len(),
        rows = table.rows.len(),
        "loaded"
    );
    Ok(table)
}

/// Parse a header-led CSV. Empty fields become missing values; rows whose
/// width differs from the header are an error.
pub fn parse_csv<R: Read>(source: &str, reader: R) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("reading header of {}", source))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let drop_index = headers
        .first()
        .is_some_and(|h| INDEX_HEADERS.contains(&h.as_str()));
    if drop_index {
        warn!(source, column = %headers[0], "dropping unnamed index column");
        headers.remove(0);
    }

    let mut seen = HashSet::with_capacity(headers.len());
    for h in &headers {
        if !seen.insert(h.as_str()) {
            bail!("duplicate column '{}' in {}", h, source);
        }
    }

    let skip = usize::from(drop_index);
    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record =
            result.with_context(|| format!("CSV parse error in {} at record {}", source, idx))?;
        let row: Vec<Option<String>> = record
            .iter()
            .skip(skip)
            .map(|field| (!field.is_empty()).then(|| field.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(RawTable {
        source: source.to_string(),
        headers,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{init_test_logging, write_zip, HEADER};
    use anyhow::Result;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::FileOptions;

    #[test]
    fn test_load_campaign_zip() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let csv = format!(
            "{}\n\
             1,30,admin.,married,university.degree,no,yes,may,5,1,261,0,nonexistent,no,93.994,4.857\n\
             2,41,blue-collar,single,,unknown,no,jun,12,2,149,1,success,yes,94.465,4.961\n",
            HEADER
        );
        let path = write_zip(dir.path(), "bank-marketing-campaing-0.csv.zip", "bank.csv", &csv)?;

        let table = load_campaign_zip(&path)?;
        assert_eq!(table.source, "bank-marketing-campaing-0.csv.zip:bank.csv");
        assert_eq!(table.headers.len(), 16);
        assert_eq!(table.headers[2], "job");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][2].as_deref(), Some("admin."));
        // empty education field is missing, not ""
        assert_eq!(table.rows[1][4], None);
        assert_eq!(table.rows[1][14].as_deref(), Some("94.465"));
        Ok(())
    }

    #[test]
    fn drops_unnamed_index_column() -> Result<()> {
        let text = ",client_id,job\n0,7,admin.\n1,8,services\n";
        let table = parse_csv("inline", text.as_bytes())?;
        assert_eq!(table.headers, vec!["client_id", "job"]);
        assert_eq!(
            table.rows[1],
            vec![Some("8".to_string()), Some("services".to_string())]
        );

        let text = "Unnamed: 0,client_id\n0,7\n";
        let table = parse_csv("inline", text.as_bytes())?;
        assert_eq!(table.headers, vec!["client_id"]);
        Ok(())
    }

    #[test]
    fn ragged_rows_are_fatal() {
        let text = "client_id,job\n1,admin.,extra\n";
        assert!(parse_csv("inline", text.as_bytes()).is_err());
    }

    #[test]
    fn duplicate_headers_are_fatal() {
        let text = "client_id,job,job\n1,a,b\n";
        let err = parse_csv("inline", text.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("duplicate column 'job'"));
    }

    #[test]
    fn archive_without_csv_is_malformed() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.csv.zip");
        {
            let mut zip = zip::ZipWriter::new(File::create(&path)?);
            let options: FileOptions<'_, ()> = FileOptions::default();
            zip.start_file("readme.txt", options)?;
            zip.write_all(b"nothing here")?;
            zip.finish()?;
        }
        let err = load_campaign_zip(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TransformError>(),
            Some(TransformError::MalformedArchive(_))
        ));
        Ok(())
    }

    #[test]
    fn not_a_zip_is_fatal() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("broken.csv.zip");
        std::fs::write(&path, b"client_id\n1\n")?;
        assert!(load_campaign_zip(&path).is_err());
        Ok(())
    }

    #[test]
    fn discovery_is_sorted_and_filtered() -> Result<()> {
        let dir = tempdir()?;
        for name in [
            "bank-marketing-campaing-2.csv.zip",
            "bank-marketing-campaing-0.csv.zip",
            "bank-marketing-campaing-1.csv.zip",
            "other.csv.zip",
        ] {
            write_zip(dir.path(), name, "x.csv", "client_id\n1\n")?;
        }
        let pattern = dir
            .path()
            .join("bank-marketing-campaing-*.csv.zip")
            .to_string_lossy()
            .to_string();
        let found: Vec<String> = discover_archives(&pattern)?
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            found,
            vec![
                "bank-marketing-campaing-0.csv.zip",
                "bank-marketing-campaing-1.csv.zip",
                "bank-marketing-campaing-2.csv.zip",
            ]
        );
        Ok(())
    }

    #[test]
    fn discovery_of_missing_dir_is_empty() -> Result<()> {
        let dir = tempdir()?;
        let pattern = dir.path().join("nope").join("*.zip");
        assert!(discover_archives(&pattern.to_string_lossy())?.is_empty());
        Ok(())
    }
}

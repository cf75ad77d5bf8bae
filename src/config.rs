// src/config.rs

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_INPUT_DIR: &str = "files/input";
pub const DEFAULT_OUTPUT_DIR: &str = "files/output";
/// Archives are published with this (misspelled) prefix.
pub const DEFAULT_ARCHIVE_PATTERN: &str = "bank-marketing-campaing-*.csv.zip";
pub const DEFAULT_CONTACT_YEAR: i32 = 2022;

/// Where to read archives from, where to write tables to, and the few knobs
/// that change how records are cleaned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Glob matched against file names inside `input_dir`.
    pub archive_pattern: String,
    /// Year combined with `day`/`month` into `last_contact_date`.
    pub contact_year: i32,
    /// Treat an empty input directory as an error instead of a no-op.
    pub require_input: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            archive_pattern: DEFAULT_ARCHIVE_PATTERN.to_string(),
            contact_year: DEFAULT_CONTACT_YEAR,
            require_input: false,
        }
    }
}

impl Config {
    /// Load a YAML config file. Keys left out keep their defaults.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        // an empty document deserializes to `null`, not to an empty mapping
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).context("invalid YAML config")
    }

    /// Full glob for archive discovery: `input_dir`, taken literally, joined
    /// with the file-name pattern.
    pub fn archive_glob(&self) -> String {
        let dir = Pattern::escape(&self.input_dir.to_string_lossy());
        Path::new(&dir)
            .join(&self.archive_pattern)
            .to_string_lossy()
            .to_string()
    }
}

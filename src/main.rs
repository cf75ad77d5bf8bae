use anyhow::Result;
use campaign_split::{pipeline, Config};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Split zipped bank-marketing campaign records into client, campaign and
/// economics tables.
#[derive(Parser, Debug)]
#[command(name = "campaign-split")]
struct Args {
    /// YAML config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the zipped CSV inputs
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Directory the three CSV tables are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Archive file-name glob inside the input directory
    #[arg(long)]
    pattern: Option<String>,

    /// Year used for last_contact_date
    #[arg(long)]
    year: Option<i32>,

    /// Fail when no archive matches instead of doing nothing
    #[arg(long)]
    require_input: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::from_yaml_file(path)?,
            None => Config::default(),
        };
        if let Some(dir) = self.input_dir {
            cfg.input_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            cfg.output_dir = dir;
        }
        if let Some(pattern) = self.pattern {
            cfg.archive_pattern = pattern;
        }
        if let Some(year) = self.year {
            cfg.contact_year = year;
        }
        cfg.require_input |= self.require_input;
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let default_level = if args.verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) resolve config ───────────────────────────────────────────
    let cfg = args.into_config()?;
    info!(?cfg, "startup");

    // ─── 3) run ──────────────────────────────────────────────────────
    let summary = pipeline::run(&cfg)?;
    info!(
        archives = summary.archives,
        rows = summary.rows,
        files = summary.written.len(),
        "finished"
    );
    Ok(())
}

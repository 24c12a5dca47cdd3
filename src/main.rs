use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use naming_exif::config::Config;
use naming_exif::pipeline;
use naming_exif::plugin::{FileProcessorPlugin, NamingExifPlugin};

#[derive(Parser, Debug)]
#[command(
    name = "naming-exif",
    version,
    about = "Extracts date metadata from structured photo filenames and writes it to EXIF/XMP"
)]
struct Cli {
    /// Photo files or directories to process
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Preview changes without writing or moving any files
    #[arg(long)]
    dry_run: bool,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --init
    if cli.init {
        let config = Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    // Load config
    let mut config = Config::load(cli.config.as_deref())?;

    // Override dry_run from CLI flag
    if cli.dry_run {
        config.dry_run = true;
    }

    // Validate inputs
    if cli.paths.is_empty() {
        anyhow::bail!("No input files or directories specified. Use --help for usage.");
    }

    let mut plugin = NamingExifPlugin::new();
    if !plugin.initialize(&config) {
        anyhow::bail!("Plugin failed to initialize. Check the configuration.");
    }

    let files = pipeline::collect_files(&cli.paths);
    if files.is_empty() {
        anyhow::bail!("No files found in the specified paths.");
    }

    log::info!("Found {} file(s) to examine", files.len());
    if config.dry_run {
        log::info!("DRY RUN — no files will be modified");
    }

    let summary = pipeline::run(&plugin, &files, &config);

    // JSON output
    if cli.json {
        let json_summary = serde_json::json!({
            "processed": summary.processed,
            "skipped": summary.skipped,
            "failed": summary.failed,
        });
        println!("{}", serde_json::to_string_pretty(&json_summary)?);
    }

    // Summary
    log::info!(
        "Done: {} processed, {} skipped, {} failed out of {} files",
        summary.processed.len(),
        summary.skipped.len(),
        summary.failed.len(),
        files.len()
    );

    Ok(())
}

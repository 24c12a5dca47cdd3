use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::Config;
use crate::exif;
use crate::naming::{self, MetadataFields, ParsedFilename};

/// File extensions the plugin will process.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["tiff", "tif", "jpg", "jpeg"];

/// Contract between a file-processing host and its plugins.
///
/// `can_handle` must be a pure admission check: no side effects, cheap to
/// call on every candidate file. `process` does the actual work and reports
/// success; a `false` return means the host should leave the file alone and
/// carry on with the next one.
pub trait FileProcessorPlugin {
    /// Unique plugin name.
    fn name(&self) -> &str;
    /// Plugin version string.
    fn version(&self) -> &str;
    /// Whether this plugin can process the given file.
    fn can_handle(&self, path: &Path) -> bool;
    /// One-time setup; returns `false` if the plugin cannot run.
    fn initialize(&mut self, config: &Config) -> bool;
    /// Process a single file.
    fn process(&self, path: &Path, config: &Config) -> bool;
}

/// Plugin that extracts date metadata from structured photo filenames,
/// writes it to EXIF/XMP, and files the photo away under `processed/`.
#[derive(Debug, Default)]
pub struct NamingExifPlugin;

impl NamingExifPlugin {
    pub fn new() -> Self {
        Self
    }

    /// Parse and validate in one step, logging any violations.
    /// Returns the record only if it is fully valid.
    fn parse_and_validate(&self, filename: &str) -> Option<ParsedFilename> {
        let parsed = naming::parse(filename)?;
        let violations = naming::validate(&parsed);
        if violations.is_empty() {
            Some(parsed)
        } else {
            log::debug!(
                "Invalid filename {filename}:\n{}",
                violations
                    .iter()
                    .map(|v| format!("  - {v}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            );
            None
        }
    }
}

impl FileProcessorPlugin for NamingExifPlugin {
    fn name(&self) -> &str {
        "naming_exif"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn can_handle(&self, path: &Path) -> bool {
        // Never touch symlinks
        if path.is_symlink() {
            return false;
        }

        // Anything already filed under a `processed` directory is done.
        // Only the exact name counts; `preprocessed` and friends are fair game.
        if let Some(parent) = path.parent() {
            if parent
                .components()
                .any(|c| c.as_os_str() == "processed")
            {
                return false;
            }
        }

        let supported = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false);
        if !supported {
            return false;
        }

        let Some(filename) = path.file_name().and_then(|name| name.to_str()) else {
            return false;
        };
        self.parse_and_validate(filename).is_some()
    }

    fn initialize(&mut self, config: &Config) -> bool {
        if config.processed_dir.is_empty() {
            log::error!("processed_dir must not be empty");
            return false;
        }
        log::info!("NamingExifPlugin initialized successfully");
        true
    }

    fn process(&self, path: &Path, config: &Config) -> bool {
        log::info!("Processing file: {}", path.display());

        // can_handle already vetted the name, but parse again to get the data
        let Some(filename) = path.file_name().and_then(|name| name.to_str()) else {
            log::error!("File has no usable name: {}", path.display());
            return false;
        };
        let Some(parsed) = naming::parse(filename) else {
            log::error!("Failed to parse filename: {filename}");
            return false;
        };

        let violations = naming::validate(&parsed);
        if !violations.is_empty() {
            log::error!(
                "Invalid filename format: {filename}\n{}",
                violations
                    .iter()
                    .map(|v| format!("  - {v}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            );
            return false;
        }

        let fields = MetadataFields::from_parsed(&parsed);

        if config.dry_run {
            log::info!("  DRY RUN — would write to {filename}:");
            for (name, value) in fields.entries() {
                log::info!("    - {name}: {value}");
            }
            return true;
        }

        if let Err(e) = exif::write_metadata(path, &fields) {
            log::error!("Failed to write metadata to {}: {e:#}", path.display());
            return false;
        }

        log::info!("  Metadata written to {filename}:");
        for (name, value) in fields.entries() {
            log::info!("    - {name}: {value}");
        }

        match move_to_processed(path, &config.processed_dir) {
            Ok(dest) => {
                log::info!("  Moved to: {}", dest.display());
            }
            Err(e) => {
                log::error!("Failed to move {} to processed dir: {e:#}", path.display());
                return false;
            }
        }

        log::info!("Successfully processed: {filename}");
        true
    }
}

/// Move a file into the processed subdirectory next to it, creating the
/// directory on demand. Refuses to overwrite: if a same-named file already
/// sits there, the source is left in place and an error is returned.
pub(crate) fn move_to_processed(path: &Path, processed_dir: &str) -> Result<PathBuf> {
    let file_dir = path.parent().context("File has no parent directory")?;
    let dest_dir = file_dir.join(processed_dir);

    std::fs::create_dir_all(&dest_dir).context("Failed to create processed directory")?;

    let file_name = path.file_name().context("File has no name")?;
    let dest_path = dest_dir.join(file_name);

    if dest_path.exists() {
        anyhow::bail!(
            "Destination file already exists: {}. Leaving source file in place.",
            dest_path.display()
        );
    }

    std::fs::rename(path, &dest_path).context("Failed to move file")?;
    Ok(dest_path)
}

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::plugin::FileProcessorPlugin;

/// Outcome of a pipeline run over a batch of files.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Files successfully processed (metadata written, file relocated).
    pub processed: Vec<PathBuf>,
    /// Files the plugin declined to handle.
    pub skipped: Vec<PathBuf>,
    /// Files the plugin accepted but failed to process.
    pub failed: Vec<PathBuf>,
}

/// Collect candidate files from the given paths.
///
/// Accepts a mix of file paths and directory paths. Directories are walked
/// recursively; symlinks are never followed, and anything under a directory
/// named exactly `processed` is pruned, since those files are already done.
///
/// No filename or extension filtering happens here; that is the plugin's
/// admission check.
///
/// # Example
///
/// ```rust,no_run
/// use naming_exif::pipeline::collect_files;
/// use std::path::PathBuf;
///
/// let files = collect_files(&[
///     PathBuf::from("photo.jpg"),        // single file
///     PathBuf::from("./scans/"),         // entire directory
/// ]);
/// println!("Found {} candidate files", files.len());
/// ```
pub fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let walker = WalkDir::new(path)
                .follow_links(false)
                .into_iter()
                .filter_entry(|entry| !is_processed_dir(entry.path()));
            for entry in walker.filter_map(|e| e.ok()) {
                if entry.file_type().is_file() {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            log::warn!("Path does not exist: {}", path.display());
        }
    }

    files
}

/// True for directories named exactly `processed`.
fn is_processed_dir(path: &Path) -> bool {
    path.is_dir()
        && path
            .file_name()
            .map(|name| name == "processed")
            .unwrap_or(false)
}

/// Run the plugin over a batch of files: admission check first, then
/// processing, with per-file accounting. A failing file never aborts the
/// batch.
pub fn run(
    plugin: &dyn FileProcessorPlugin,
    files: &[PathBuf],
    config: &Config,
) -> RunSummary {
    let mut summary = RunSummary::default();
    let total = files.len();

    for (i, path) in files.iter().enumerate() {
        if !plugin.can_handle(path) {
            log::debug!("[{}/{}] Skipping: {}", i + 1, total, path.display());
            summary.skipped.push(path.clone());
            continue;
        }

        log::info!("[{}/{}] {}", i + 1, total, path.display());
        if plugin.process(path, config) {
            summary.processed.push(path.clone());
        } else {
            summary.failed.push(path.clone());
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::NamingExifPlugin;
    use std::fs;
    use tempfile::TempDir;

    // ── collect_files ────────────────────────────────────────────────

    #[test]
    fn collect_single_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("1950.06.15.12.00.00.E.FAM.POR.000001.jpg");
        fs::write(&file, b"fake").unwrap();

        let files = collect_files(&[file.clone()]);
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn collect_directory_recursive() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();

        fs::write(dir.path().join("a.jpg"), b"fake").unwrap();
        fs::write(sub.join("b.tiff"), b"fake").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()]);
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn collect_prunes_processed_directories() {
        let dir = TempDir::new().unwrap();
        let processed = dir.path().join("processed");
        let nested = dir.path().join("sub").join("processed");
        fs::create_dir_all(&processed).unwrap();
        fs::create_dir_all(&nested).unwrap();

        fs::write(dir.path().join("keep.jpg"), b"fake").unwrap();
        fs::write(processed.join("done.jpg"), b"fake").unwrap();
        fs::write(nested.join("done.tiff"), b"fake").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()]);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("keep.jpg"));
    }

    #[test]
    fn collect_keeps_similarly_named_directories() {
        let dir = TempDir::new().unwrap();
        let similar = dir.path().join("preprocessed");
        fs::create_dir(&similar).unwrap();
        fs::write(similar.join("a.jpg"), b"fake").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()]);
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn collect_nonexistent_path() {
        let files = collect_files(&[PathBuf::from("/nonexistent/path")]);
        assert!(files.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn collect_does_not_follow_directory_symlinks() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real");
        fs::create_dir(&real).unwrap();
        fs::write(real.join("a.jpg"), b"fake").unwrap();
        std::os::unix::fs::symlink(&real, dir.path().join("alias")).unwrap();

        let files = collect_files(&[dir.path().to_path_buf()]);
        assert_eq!(files.len(), 1);
    }

    // ── run ──────────────────────────────────────────────────────────

    #[test]
    fn run_accounts_per_file() {
        let dir = TempDir::new().unwrap();
        // Declined by the admission check
        let skipped = dir.path().join("notes.txt");
        fs::write(&skipped, b"hello").unwrap();
        // Accepted, but the garbage payload makes the metadata write fail
        let failed = dir.path().join("1950.06.15.12.30.45.E.FAM.POR.000001.jpg");
        fs::write(&failed, b"not a jpeg").unwrap();

        let plugin = NamingExifPlugin::new();
        let config = Config::default();
        let summary = run(&plugin, &[skipped.clone(), failed.clone()], &config);

        assert!(summary.processed.is_empty());
        assert_eq!(summary.skipped, vec![skipped]);
        assert_eq!(summary.failed, vec![failed]);
    }

    #[test]
    fn run_dry_run_counts_as_processed() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("1950.06.15.12.30.45.E.FAM.POR.000001.jpg");
        fs::write(&file, b"not a jpeg").unwrap();

        let plugin = NamingExifPlugin::new();
        let mut config = Config::default();
        config.dry_run = true;

        let summary = run(&plugin, &[file.clone()], &config);
        assert_eq!(summary.processed, vec![file.clone()]);
        assert!(file.exists());
    }
}

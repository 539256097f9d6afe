//! The file processor: discover → process → relocate.
//!
//! A [`FileProcessor`] owns three folders. Files dropped into the input folder
//! are handed to a caller-supplied [`FileHandler`]; accepted files move to the
//! done folder and rejected ones to the failed folder, keeping their path
//! relative to the input folder.

mod cleanup;
mod discovery;
mod handler;
mod log;
mod relocate;
mod types;

pub use discovery::{discover_candidates, matches_filter, normalize_filter};
pub use handler::{handler_fn, param_env_name, CommandHandler, FileHandler, HandlerParams};
pub use log::{NoopLog, ProcessorLog, TracingLog};
pub use types::{BatchSummary, CleanupResult, CleanupTargets};

use crate::config::{ConfigError, ProcessorConfig};
use crate::utils::{ensure_dir, is_contained_relative, now_iso, relative_parent};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Failed to create folder '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to list folder '{}': {source}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to move '{}' to '{}': {source}", .from.display(), .to.display())]
    Relocate {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to clean folder '{}': {source}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Handler failed for '{}': {source}", .filename.display())]
    Handler {
        filename: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Invalid filename '{}': must be a relative path inside the input folder", .0.display())]
    InvalidFilename(PathBuf),

    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),
}

/// Processes files from an input folder and routes them to done or failed
pub struct FileProcessor {
    input_folder: PathBuf,
    done_folder: PathBuf,
    failed_folder: PathBuf,
    suppress_move: bool,
    log: Box<dyn ProcessorLog>,
}

impl FileProcessor {
    /// Create a processor, provisioning all three folders.
    ///
    /// Existing folders are left untouched. Any other creation failure is
    /// returned.
    pub fn new(
        input_folder: impl Into<PathBuf>,
        done_folder: impl Into<PathBuf>,
        failed_folder: impl Into<PathBuf>,
    ) -> Result<Self, ProcessorError> {
        let processor = Self {
            input_folder: input_folder.into(),
            done_folder: done_folder.into(),
            failed_folder: failed_folder.into(),
            suppress_move: false,
            log: Box::new(TracingLog),
        };

        for folder in [
            &processor.input_folder,
            &processor.done_folder,
            &processor.failed_folder,
        ] {
            ensure_dir(folder).map_err(|source| ProcessorError::CreateDir {
                path: folder.clone(),
                source,
            })?;
        }

        Ok(processor)
    }

    /// Create a processor from a validated config
    pub fn from_config(config: &ProcessorConfig) -> Result<Self, ProcessorError> {
        config.validate()?;
        let mut processor = Self::new(
            &config.input_folder,
            &config.done_folder,
            &config.failed_folder,
        )?;
        processor.suppress_move = config.suppress_move;
        Ok(processor)
    }

    /// Replace the log sink
    pub fn with_log(mut self, log: Box<dyn ProcessorLog>) -> Self {
        self.log = log;
        self
    }

    pub fn input_folder(&self) -> &Path {
        &self.input_folder
    }

    pub fn done_folder(&self) -> &Path {
        &self.done_folder
    }

    pub fn failed_folder(&self) -> &Path {
        &self.failed_folder
    }

    pub fn suppress_move(&self) -> bool {
        self.suppress_move
    }

    /// When set, processed files stay in the input folder
    pub fn set_suppress_move(&mut self, suppress_move: bool) {
        self.suppress_move = suppress_move;
    }

    /// Process one file from the input folder.
    ///
    /// Returns `Ok(false)` without calling the handler when `filename` is not a
    /// regular file under the input folder (an empty name included). Otherwise the handler decides: the
    /// file moves to the done folder on `true`, to the failed folder on `false`,
    /// and that value is returned. Handler and relocation errors propagate.
    pub fn process<H>(
        &self,
        handler: &mut H,
        filename: impl AsRef<Path>,
        params: &HandlerParams,
    ) -> Result<bool, ProcessorError>
    where
        H: FileHandler + ?Sized,
    {
        let filename = filename.as_ref();
        if !is_contained_relative(filename) {
            return Err(ProcessorError::InvalidFilename(filename.to_path_buf()));
        }

        self.log.info(&format!("Processing file '{}'", filename.display()));

        if !self.input_folder.join(filename).is_file() {
            self.log.error(&format!(
                "Could not process file '{}'. File doesn't exist in '{}'",
                filename.display(),
                self.input_folder.display()
            ));
            return Ok(false);
        }

        let status = handler
            .handle(filename, params)
            .map_err(|source| ProcessorError::Handler {
                filename: filename.to_path_buf(),
                source: source.into(),
            })?;

        let destination = if status {
            &self.done_folder
        } else {
            &self.failed_folder
        };
        self.move_to_folder(filename, destination)?;

        Ok(status)
    }

    /// Process every matching candidate in the input folder.
    ///
    /// Returns true when every matched file succeeded, including when nothing
    /// matched. See [`process_all_with_summary`](Self::process_all_with_summary).
    pub fn process_all<H>(
        &self,
        handler: &mut H,
        extension_filter: Option<&str>,
        recurse_subfolders: bool,
        params: &HandlerParams,
    ) -> Result<bool, ProcessorError>
    where
        H: FileHandler + ?Sized,
    {
        self.process_all_with_summary(handler, extension_filter, recurse_subfolders, params)
            .map(|summary| summary.all_succeeded())
    }

    /// Process every matching candidate and report the counts.
    ///
    /// Without `recurse_subfolders` every entry directly inside the input folder
    /// is a candidate, so a subdirectory that passes the filter counts as a
    /// failed match. With it, every regular file at any depth is a candidate.
    /// `extension_filter` is a bare extension (`"txt"`) and applies in both modes.
    ///
    /// A file the handler rejects does not stop the batch. Discovery, relocation
    /// and handler errors do, and files already moved stay moved.
    pub fn process_all_with_summary<H>(
        &self,
        handler: &mut H,
        extension_filter: Option<&str>,
        recurse_subfolders: bool,
        params: &HandlerParams,
    ) -> Result<BatchSummary, ProcessorError>
    where
        H: FileHandler + ?Sized,
    {
        let started_at = now_iso();
        let extension_filter = normalize_filter(extension_filter);

        if recurse_subfolders {
            self.log.info(&format!(
                "Processing all files in '{}' and subfolders",
                self.input_folder.display()
            ));
        } else {
            self.log.info(&format!(
                "Processing all files in '{}'",
                self.input_folder.display()
            ));
        }

        let candidates =
            discover_candidates(&self.input_folder, recurse_subfolders).map_err(|source| {
                ProcessorError::Discovery {
                    path: self.input_folder.clone(),
                    source,
                }
            })?;

        let mut total_files = 0;
        let mut files_processed = 0;

        for candidate in candidates
            .iter()
            .filter(|c| matches_filter(c, extension_filter))
        {
            total_files += 1;
            if self.process(&mut *handler, candidate, params)? {
                files_processed += 1;
            }
        }

        self.log.info(&format!(
            "Summary: Matched {total_files} files. Processed {files_processed} files"
        ));

        Ok(BatchSummary {
            total_files,
            files_processed,
            started_at,
            finished_at: now_iso(),
        })
    }

    /// Move `filename` from the input folder to the same relative path under
    /// `destination_root`. A no-op reporting success when moves are suppressed.
    fn move_to_folder(
        &self,
        filename: &Path,
        destination_root: &Path,
    ) -> Result<bool, ProcessorError> {
        if self.suppress_move {
            return Ok(true);
        }

        let target_dir = destination_root.join(relative_parent(filename));
        ensure_dir(&target_dir).map_err(|source| ProcessorError::CreateDir {
            path: target_dir.clone(),
            source,
        })?;

        let from = self.input_folder.join(filename);
        let to = destination_root.join(filename);
        relocate::move_file(&from, &to).map_err(|source| ProcessorError::Relocate {
            from: from.clone(),
            to: to.clone(),
            source,
        })?;

        self.log.info(&format!(
            "File '{}' processed and moved to '{}' folder",
            filename.display(),
            destination_root.display()
        ));

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn processor(root: &Path) -> FileProcessor {
        FileProcessor::new(root.join("in"), root.join("done"), root.join("failed"))
            .unwrap()
            .with_log(Box::new(NoopLog))
    }

    #[test]
    fn test_new_creates_nested_folders() {
        let temp = tempfile::tempdir().unwrap();
        let input = temp.path().join("a/b/in");
        FileProcessor::new(&input, temp.path().join("done"), temp.path().join("failed")).unwrap();
        assert!(input.is_dir());
    }

    #[test]
    fn test_new_fails_when_file_blocks_folder() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("done"), "not a folder").unwrap();

        let result = FileProcessor::new(
            temp.path().join("in"),
            temp.path().join("done"),
            temp.path().join("failed"),
        );
        assert!(matches!(result, Err(ProcessorError::CreateDir { .. })));
    }

    #[test]
    fn test_from_config_applies_suppress_move() {
        let temp = tempfile::tempdir().unwrap();
        let mut config = ProcessorConfig::new(
            temp.path().join("in"),
            temp.path().join("done"),
            temp.path().join("failed"),
        );
        config.suppress_move = true;

        let processor = FileProcessor::from_config(&config).unwrap();
        assert!(processor.suppress_move());
    }

    #[test]
    fn test_from_config_rejects_empty_path() {
        let config = ProcessorConfig::new("", "done", "failed");
        assert!(matches!(
            FileProcessor::from_config(&config),
            Err(ProcessorError::ConfigError(ConfigError::EmptyPath("inputFolder")))
        ));
    }

    #[test]
    fn test_process_rejects_escaping_filename() {
        let temp = tempfile::tempdir().unwrap();
        let processor = processor(temp.path());
        let mut handler = handler_fn(|_, _| Ok(true));

        let result = processor.process(&mut handler, "../outside.txt", &HandlerParams::new());
        assert!(matches!(result, Err(ProcessorError::InvalidFilename(_))));
    }

    #[test]
    fn test_move_to_folder_suppressed() {
        let temp = tempfile::tempdir().unwrap();
        let mut processor = processor(temp.path());
        processor.set_suppress_move(true);
        fs::write(temp.path().join("in/a.txt"), "x").unwrap();

        let moved = processor
            .move_to_folder(Path::new("a.txt"), &temp.path().join("done"))
            .unwrap();

        assert!(moved);
        assert!(temp.path().join("in/a.txt").exists());
        assert!(!temp.path().join("done/a.txt").exists());
    }

    #[test]
    fn test_move_to_folder_missing_source_is_error() {
        let temp = tempfile::tempdir().unwrap();
        let processor = processor(temp.path());

        let result = processor.move_to_folder(Path::new("gone.txt"), &temp.path().join("done"));
        assert!(matches!(result, Err(ProcessorError::Relocate { .. })));
    }
}

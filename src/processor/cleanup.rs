use super::{CleanupResult, CleanupTargets, FileProcessor, ProcessorError};
use crate::utils::ensure_dir;
use std::fs;
use std::io;
use std::path::Path;

impl FileProcessor {
    /// Empty the selected folders.
    ///
    /// Every entry inside a selected folder is removed, subdirectories included;
    /// the folder itself is kept (and re-created if it went missing). Unselected
    /// folders are not touched.
    pub fn cleanup(&self, targets: CleanupTargets) -> Result<CleanupResult, ProcessorError> {
        let mut result = CleanupResult::default();

        if targets.input {
            result.input_removed = self.clean_folder(&self.input_folder)?;
        }
        if targets.done {
            result.done_removed = self.clean_folder(&self.done_folder)?;
        }
        if targets.failed {
            result.failed_removed = self.clean_folder(&self.failed_folder)?;
        }

        Ok(result)
    }

    fn clean_folder(&self, folder: &Path) -> Result<usize, ProcessorError> {
        let removed = clear_folder(folder).map_err(|source| ProcessorError::Cleanup {
            path: folder.to_path_buf(),
            source,
        })?;

        self.log.info(&format!(
            "Removed {removed} entries from '{}'",
            folder.display()
        ));

        Ok(removed)
    }
}

fn clear_folder(folder: &Path) -> io::Result<usize> {
    ensure_dir(folder)?;

    let mut removed = 0;
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        // Symlinks are removed, never followed
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
        removed += 1;
    }
    Ok(removed)
}

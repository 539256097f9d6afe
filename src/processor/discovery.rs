use crate::utils::has_extension;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List processing candidates as paths relative to `input_folder`.
///
/// Without `recurse` every entry directly inside the folder is returned,
/// subdirectories included. With `recurse` only regular files are returned, from
/// any depth. Results are sorted so batches run in a stable order.
pub fn discover_candidates(input_folder: &Path, recurse: bool) -> io::Result<Vec<PathBuf>> {
    let mut candidates = if recurse {
        walk_files(input_folder)?
    } else {
        list_entries(input_folder)?
    };
    candidates.sort();
    Ok(candidates)
}

fn list_entries(input_folder: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(input_folder)? {
        entries.push(PathBuf::from(entry?.file_name()));
    }
    Ok(entries)
}

fn walk_files(input_folder: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(input_folder).min_depth(1) {
        let entry = entry?;
        // Follows symlinks to files, matching the is-a-file check in `process`
        if !entry.path().is_file() {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(input_folder) {
            files.push(relative.to_path_buf());
        }
    }
    Ok(files)
}

/// Normalize a user-supplied extension filter.
///
/// An empty filter means "no filter". A single leading dot is tolerated.
pub fn normalize_filter(extension_filter: Option<&str>) -> Option<&str> {
    extension_filter
        .map(|ext| ext.strip_prefix('.').unwrap_or(ext))
        .filter(|ext| !ext.is_empty())
}

/// Check a candidate against an already normalized filter
pub fn matches_filter(candidate: &Path, extension_filter: Option<&str>) -> bool {
    match extension_filter {
        Some(ext) => has_extension(candidate, ext),
        None => true,
    }
}

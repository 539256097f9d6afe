use std::io;
use std::path::{Component, Path, PathBuf};

/// Environment variable prefix used for handler parameters passed to commands
pub const PARAM_ENV_PREFIX: &str = "FILE_RELAY_PARAM_";

/// Create a directory and all missing parents.
///
/// A directory that already exists is not an error. Anything else at that path
/// (a regular file, a dangling symlink) is.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    std::fs::create_dir_all(path)
}

/// Check that a filename stays inside whatever root it gets joined to.
///
/// Rejects absolute paths, prefixes and `..` components. `.` components and
/// the empty path (which names the root itself) are allowed.
pub fn is_contained_relative(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Directory prefix of a relative filename (empty for a bare leaf name)
pub fn relative_parent(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// Check whether a file name ends with `.{extension}`
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.to_string_lossy().ends_with(&format!(".{extension}"))
}

/// Get current timestamp in ISO 8601 format
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}

use std::fs;
use std::io;
use std::path::Path;

/// Move a file, overwriting any file already at `to`.
///
/// A rename is tried first. If it fails for any reason other than a missing
/// source (typically a cross-device move), the file is copied and the source
/// removed. The parent of `to` must already exist.
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(e),
        Err(_) => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
    }
}

//! Whole-file reads and writes for label files.

use std::path::Path;

use crate::error::Error;

/// Create `dir` and any missing parents.
///
/// # Errors
///
/// Returns `Error::FileAccess` if the directory cannot be created.
pub fn ensure_dir(dir: &Path) -> Result<(), Error> {
    return std::fs::create_dir_all(dir).map_err(|source| {
        return Error::FileAccess {
            action: "create directory",
            path: dir.to_path_buf(),
            source,
        };
    });
}

/// Read a label file, creating it empty when absent.
///
/// The empty file stays on disk even if the caller later rejects the edit.
///
/// # Errors
///
/// Returns `Error::FileAccess` if the file cannot be read or created.
pub fn read_or_create(path: &Path) -> Result<String, Error> {
    return match std::fs::read_to_string(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "label file missing, creating it empty");
            write(path, "")?;
            Ok(String::new())
        },
        Err(source) => Err(Error::FileAccess {
            action: "read",
            path: path.to_path_buf(),
            source,
        }),
        Ok(content) => Ok(content),
    };
}

/// Replace the file's content in full.
///
/// # Errors
///
/// Returns `Error::FileAccess` if the file cannot be written.
pub fn write(path: &Path, content: &str) -> Result<(), Error> {
    return std::fs::write(path, content).map_err(|source| {
        return Error::FileAccess {
            action: "write",
            path: path.to_path_buf(),
            source,
        };
    });
}

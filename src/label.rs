//! Label file path resolution and creation.

use std::path::{Path, PathBuf};

use crate::config::{DEFAULT_EXTENSION, EditOptions};
use crate::error::Error;
use crate::store;
use crate::types::Label;

/// Create an empty label file, creating its directory as needed.
///
/// An existing file is only truncated when `options.force` is set.
///
/// # Errors
///
/// Returns `Error::LabelExists` if the file exists without `force`,
/// or `Error::FileAccess` if the directory or file cannot be created.
pub fn create(label: &Label, options: &EditOptions) -> Result<PathBuf, Error> {
    store::ensure_dir(&options.directory)?;
    let path = resolve_path(label, &options.directory, &options.extension);

    let exists = path.try_exists().map_err(|source| {
        return Error::FileAccess {
            action: "check",
            path: path.clone(),
            source,
        };
    })?;
    if exists && !options.force {
        return Err(Error::LabelExists { path });
    }

    store::write(&path, "")?;
    tracing::debug!(path = %path.display(), truncated = exists, "label file created");
    return Ok(path);
}

/// Append the extension unless the label's last `.`-segment already is it.
fn file_name(label: &Label, extension: &str) -> String {
    let raw = label.as_str();
    let current = raw.rfind('.').and_then(|i| return raw.get(i..));
    if current == Some(extension) {
        return raw.to_string();
    }
    return format!("{raw}{extension}");
}

/// Give a bare extension its leading dot. Empty falls back to `.caddy`.
fn normalize_extension(extension: &str) -> String {
    if extension.is_empty() {
        return DEFAULT_EXTENSION.to_string();
    }
    if extension.starts_with('.') {
        return extension.to_string();
    }
    return format!(".{extension}");
}

/// Path of the file backing `label`: `<directory>/<label><extension>`.
pub fn resolve_path(label: &Label, directory: &Path, extension: &str) -> PathBuf {
    let extension = normalize_extension(extension);
    return directory.join(file_name(label, &extension));
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use super::*;

    fn label(raw: &str) -> Label {
        Label::parse(raw).unwrap()
    }

    fn options(dir: &Path, force: bool) -> EditOptions {
        EditOptions {
            directory: dir.to_path_buf(),
            extension: ".caddy".to_string(),
            force,
            quiet: true,
        }
    }

    #[test]
    fn resolves_with_default_extension() {
        let path = resolve_path(&label("prod"), Path::new("/srv/proxy/sites"), ".caddy");
        assert_eq!(path, PathBuf::from("/srv/proxy/sites/prod.caddy"));
    }

    #[test]
    fn extension_gains_leading_dot() {
        let path = resolve_path(&label("prod"), Path::new("/sites"), "conf");
        assert_eq!(path, PathBuf::from("/sites/prod.conf"));
    }

    #[test]
    fn empty_extension_falls_back_to_caddy() {
        let path = resolve_path(&label("prod"), Path::new("/sites"), "");
        assert_eq!(path, PathBuf::from("/sites/prod.caddy"));
    }

    #[test]
    fn extension_not_doubled() {
        let path = resolve_path(&label("prod.caddy"), Path::new("/sites"), ".caddy");
        assert_eq!(path, PathBuf::from("/sites/prod.caddy"));
    }

    #[test]
    fn only_last_segment_counts_as_extension() {
        let path = resolve_path(&label("prod.v2"), Path::new("/sites"), ".caddy");
        assert_eq!(path, PathBuf::from("/sites/prod.v2.caddy"));
    }

    #[test]
    fn create_makes_directories_and_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let path = create(&label("prod"), &options(&nested, false)).unwrap();
        assert_eq!(path, nested.join("prod.caddy"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn create_refuses_existing_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prod.caddy");
        std::fs::write(&path, "keep me\n").unwrap();

        let err = create(&label("prod"), &options(dir.path(), false)).unwrap_err();
        assert!(matches!(err, Error::LabelExists { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me\n");
    }

    #[test]
    fn create_truncates_with_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prod.caddy");
        std::fs::write(&path, "old\n").unwrap();

        create(&label("prod"), &options(dir.path(), true)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}

use std::path::{Path, PathBuf};

use crate::error::Error;

/// Settings file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = ".caddyctl.toml";

/// Extension used when none is configured or an empty one is given.
pub const DEFAULT_EXTENSION: &str = ".caddy";

/// Directory holding label files unless overridden.
const DEFAULT_SITES_DIR: &str = "/srv/proxy/sites";

/// Settings resolved from `.caddyctl.toml` and built-in defaults.
/// Command-line flags are layered on top by `edit_options` and `reload_options`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default label file extension.
    pub extension: String,
    /// Settings for the reload sequence.
    pub reload: ReloadSettings,
    /// Default directory for label files.
    pub sites_dir: PathBuf,
}

/// Options passed explicitly into label creation and entry upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOptions {
    /// Directory containing label files.
    pub directory: PathBuf,
    /// Label file extension, normalized at path resolution.
    pub extension: String,
    /// Overwrite an existing label file or replace an existing block.
    pub force: bool,
    /// Suppress success output.
    pub quiet: bool,
}

/// Where and how to run `caddy` for the reload sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadSettings {
    /// Caddyfile path inside the container.
    pub caddyfile: String,
    /// Container running Caddy.
    pub container: String,
    /// Program used to reach the container.
    pub docker: String,
    /// Suppress command echo and success output.
    pub quiet: bool,
    /// Pass `-t` to `docker exec`.
    pub tty: bool,
}

/// Raw TOML structure for `.caddyctl.toml`.
#[derive(serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct CaddyctlTomlConfig {
    #[serde(default)]
    extension: Option<String>,
    #[serde(default)]
    reload: ReloadTomlConfig,
    #[serde(default)]
    sites_dir: Option<PathBuf>,
}

/// Raw `[reload]` table.
#[derive(serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ReloadTomlConfig {
    #[serde(default)]
    caddyfile: Option<String>,
    #[serde(default)]
    container: Option<String>,
    #[serde(default)]
    docker: Option<String>,
    #[serde(default)]
    tty: Option<bool>,
}

impl Config {
    /// Build options for label and entry commands. Flags win over settings.
    pub fn edit_options(
        &self,
        directory: Option<PathBuf>,
        extension: Option<String>,
        force: bool,
        quiet: bool,
    ) -> EditOptions {
        return EditOptions {
            directory: directory.unwrap_or_else(|| return self.sites_dir.clone()),
            extension: extension.unwrap_or_else(|| return self.extension.clone()),
            force,
            quiet,
        };
    }

    /// Load settings.
    ///
    /// With `explicit` set, that file must exist. Otherwise `.caddyctl.toml`
    /// in `root` is used when present and defaults apply when it isn't.
    /// A malformed file is always an error, never a silent fallback.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigNotFound` if an explicit file is missing,
    /// `Error::FileAccess` if reading fails, or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, Error> {
        let path = explicit.map_or_else(|| return root.join(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if explicit.is_some() {
                    return Err(Error::ConfigNotFound { path });
                }
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::from_raw(CaddyctlTomlConfig::default()));
            },
            Err(source) => return Err(Error::FileAccess { action: "read", path, source }),
            Ok(c) => c,
        };

        let raw: CaddyctlTomlConfig = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        return Ok(Self::from_raw(raw));
    }

    /// Fill unset keys with built-in defaults.
    fn from_raw(raw: CaddyctlTomlConfig) -> Self {
        return Self {
            extension: raw.extension.unwrap_or_else(|| return DEFAULT_EXTENSION.to_string()),
            reload: ReloadSettings {
                caddyfile: raw.reload.caddyfile.unwrap_or_else(|| return "/etc/caddy/Caddyfile".to_string()),
                container: raw.reload.container.unwrap_or_else(|| return "caddy".to_string()),
                docker: raw.reload.docker.unwrap_or_else(|| return "docker".to_string()),
                quiet: false,
                tty: raw.reload.tty.unwrap_or(true),
            },
            sites_dir: raw.sites_dir.unwrap_or_else(|| return PathBuf::from(DEFAULT_SITES_DIR)),
        };
    }

    /// Build reload settings. Flags win over settings.
    pub fn reload_options(
        &self,
        container: Option<String>,
        caddyfile: Option<String>,
        no_tty: bool,
        quiet: bool,
    ) -> ReloadSettings {
        return ReloadSettings {
            caddyfile: caddyfile.unwrap_or_else(|| return self.reload.caddyfile.clone()),
            container: container.unwrap_or_else(|| return self.reload.container.clone()),
            docker: self.reload.docker.clone(),
            quiet,
            tty: self.reload.tty && !no_tty,
        };
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use super::*;

    #[test]
    fn missing_default_file_uses_builtin_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path(), None).unwrap();
        assert_eq!(config.sites_dir, PathBuf::from("/srv/proxy/sites"));
        assert_eq!(config.extension, ".caddy");
        assert_eq!(config.reload.container, "caddy");
        assert_eq!(config.reload.caddyfile, "/etc/caddy/Caddyfile");
        assert_eq!(config.reload.docker, "docker");
        assert!(config.reload.tty);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let result = Config::load(dir.path(), Some(&missing));
        assert!(matches!(result, Err(Error::ConfigNotFound { .. })));
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "sites_dir = \"/etc/caddy/sites\"\nextension = \"conf\"\n\n[reload]\ncontainer = \"edge\"\ntty = false\n",
        )
        .unwrap();

        let config = Config::load(dir.path(), None).unwrap();
        assert_eq!(config.sites_dir, PathBuf::from("/etc/caddy/sites"));
        assert_eq!(config.extension, "conf");
        assert_eq!(config.reload.container, "edge");
        assert!(!config.reload.tty);
        assert_eq!(config.reload.caddyfile, "/etc/caddy/Caddyfile");
    }

    #[test]
    fn malformed_file_is_not_silently_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "sites_dir = [").unwrap();
        assert!(matches!(Config::load(dir.path(), None), Err(Error::TomlDe(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "site_dir = \"/tmp\"\n").unwrap();
        assert!(matches!(Config::load(dir.path(), None), Err(Error::TomlDe(_))));
    }

    #[test]
    fn flags_override_settings() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path(), None).unwrap();

        let opts = config.edit_options(Some(PathBuf::from("/tmp/sites")), None, true, false);
        assert_eq!(opts.directory, PathBuf::from("/tmp/sites"));
        assert_eq!(opts.extension, ".caddy");
        assert!(opts.force);

        let reload = config.reload_options(Some("edge".to_string()), None, true, true);
        assert_eq!(reload.container, "edge");
        assert!(!reload.tty);
        assert!(reload.quiet);
    }
}

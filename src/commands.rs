//! CLI commands for caddyctl: entry, label, reload.

use std::path::PathBuf;

use crate::config::{Config, EditOptions};
use crate::editor::{self, Outcome};
use crate::error;
use crate::label;
use crate::reload::{self, SystemRunner};
use crate::types::{Host, Label, Upstream};

/// Flags shared by the commands that edit label files.
pub struct EditFlags {
    /// `--dir` override.
    pub directory: Option<PathBuf>,
    /// `--ext` override.
    pub extension: Option<String>,
    /// `--force`.
    pub force: bool,
}

impl EditFlags {
    /// Layer these flags over the loaded settings.
    fn into_options(self, config: &Config, quiet: bool) -> EditOptions {
        return config.edit_options(self.directory, self.extension, self.force, quiet);
    }
}

/// Add or replace the block for `host` in a label file.
///
/// # Errors
///
/// Returns validation errors for the label, host, or upstream, `Error::EntryExists`
/// when the host is already present without `--force`, or filesystem errors.
pub fn entry(
    config: &Config,
    flags: EditFlags,
    quiet: bool,
    label_name: &str,
    host: &str,
    upstream: &str,
) -> Result<(), error::Error> {
    let label = Label::parse(label_name)?;
    let host = Host::parse(host)?;
    let upstream = Upstream::parse(upstream)?;
    let options = flags.into_options(config, quiet);

    let report = editor::upsert_entry(&label, &host, &upstream, &options)?;
    if !options.quiet {
        let verb = match report.outcome {
            Outcome::Added => "added",
            Outcome::Replaced => "replaced",
        };
        println!("Entry {verb}: {host} -> {upstream} in {}", report.path.display());
    }
    return Ok(());
}

/// Create an empty label file.
///
/// # Errors
///
/// Returns `Error::InvalidLabel`, `Error::LabelExists` without `--force`, or filesystem errors.
pub fn label(config: &Config, flags: EditFlags, quiet: bool, name: &str) -> Result<(), error::Error> {
    let label = Label::parse(name)?;
    let options = flags.into_options(config, quiet);

    let path = label::create(&label, &options)?;
    if !options.quiet {
        println!("File created: {}", path.display());
    }
    return Ok(());
}

/// Format, validate, and reload the Caddyfile inside the container.
///
/// # Errors
///
/// Returns the first failing step's error.
pub fn reload(
    config: &Config,
    container: Option<String>,
    caddyfile: Option<String>,
    no_tty: bool,
    quiet: bool,
) -> Result<(), error::Error> {
    let settings = config.reload_options(container, caddyfile, no_tty, quiet);
    return reload::run(&settings, &mut SystemRunner);
}

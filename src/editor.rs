//! Entry upsert: decide append, replace, or conflict for one host in one label file.

use std::path::PathBuf;

use crate::block;
use crate::config::EditOptions;
use crate::error::Error;
use crate::label;
use crate::store;
use crate::types::{Host, Label, Upstream};

/// What happened to the label file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new block was appended.
    Added,
    /// An existing block for the host was overwritten.
    Replaced,
}

/// Result of a completed entry upsert.
#[derive(Debug)]
pub struct EntryReport {
    /// Whether the block was added or replaced.
    pub outcome: Outcome,
    /// Label file that was written.
    pub path: PathBuf,
}

/// Decision for one upsert over in-memory content.
#[derive(Debug, PartialEq, Eq)]
pub enum Upsert {
    /// A block for the host exists and replacing it wasn't allowed.
    Conflict,
    /// Content to write back.
    Write {
        /// Full new file content.
        content: String,
        /// Whether this appends or replaces.
        outcome: Outcome,
    },
}

/// Compute the new content for `host -> upstream`.
///
/// A matched block is swapped in place (only with `force`). Otherwise the
/// block is appended after exactly one blank line, or becomes the whole file
/// when the existing content is empty or only newlines.
///
/// # Errors
///
/// Returns `Error::Pattern` if the block locator fails to compile.
#[allow(clippy::indexing_slicing, reason = "span comes from a match over the same content")]
pub fn upsert(content: &str, host: &Host, upstream: &Upstream, force: bool) -> Result<Upsert, Error> {
    let desired = block::render(host, upstream);

    if let Some(span) = block::locate(content, host)? {
        if !force {
            return Ok(Upsert::Conflict);
        }
        let replaced = format!("{}{desired}{}", &content[..span.start], &content[span.end..]);
        return Ok(Upsert::Write {
            content: replaced,
            outcome: Outcome::Replaced,
        });
    }

    let trimmed = content.trim_end_matches('\n');
    let appended = if trimmed.is_empty() {
        desired
    } else {
        format!("{trimmed}\n\n{desired}")
    };
    return Ok(Upsert::Write {
        content: appended,
        outcome: Outcome::Added,
    });
}

/// Add or replace the block for `host` in the label's file.
///
/// The label file and its directory are created when missing; that empty
/// file is left in place even if the upsert then fails. A duplicate
/// upstream only prints a warning.
///
/// # Errors
///
/// Returns `Error::EntryExists` if the host already has a block and
/// `options.force` is unset, or `Error::FileAccess` on filesystem failures.
pub fn upsert_entry(
    label: &Label,
    host: &Host,
    upstream: &Upstream,
    options: &EditOptions,
) -> Result<EntryReport, Error> {
    store::ensure_dir(&options.directory)?;
    let path = label::resolve_path(label, &options.directory, &options.extension);
    let content = store::read_or_create(&path)?;

    if block::upstream_in_use(&content, upstream) {
        eprintln!(
            "warning: upstream {upstream} already used in this label file ({})",
            path.display()
        );
    }

    let (new_content, outcome) = match upsert(&content, host, upstream, options.force)? {
        Upsert::Conflict => {
            return Err(Error::EntryExists {
                host: host.to_string(),
                path,
            });
        },
        Upsert::Write { content, outcome } => (content, outcome),
    };

    store::write(&path, &new_content)?;
    tracing::debug!(path = %path.display(), %host, %upstream, ?outcome, "entry written");

    return Ok(EntryReport {
        outcome,
        path,
    });
}

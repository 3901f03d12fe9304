/// Crate-level error types for caddyctl diagnostics.
use std::path::PathBuf;

/// All errors in caddyctl carry enough context to produce a useful diagnostic
/// without a debugger. Each variant names the file, host, or step that failed.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The process for a reload step could not be started at all.
    #[error("failed to start `{program}`: {source}")]
    CommandSpawn {
        /// Program that was invoked.
        program: String,
        /// The underlying spawn error.
        source: std::io::Error,
    },

    /// A settings file named on the command line does not exist.
    #[error("config not found: {}", path.display())]
    ConfigNotFound {
        /// Path to the missing settings file.
        path: PathBuf,
    },

    /// A block for this host is already present and `--force` was not given.
    #[error("entry for host `{host}` already exists in {} (use --force to replace it)", path.display())]
    EntryExists {
        /// Host whose block was found.
        host: String,
        /// Label file containing the block.
        path: PathBuf,
    },

    /// A filesystem operation on a specific path failed.
    #[error("failed to {action} {}: {source}", path.display())]
    FileAccess {
        /// What was being attempted ("read", "write", "create directory").
        action: &'static str,
        /// Path the operation targeted.
        path: PathBuf,
        /// The wrapped I/O error.
        source: std::io::Error,
    },

    /// Host does not match `[a-z0-9.-]+`.
    #[error("invalid host `{host}` (allowed: a-z, 0-9, '.', '-')")]
    InvalidHost {
        /// The rejected host.
        host: String,
    },

    /// Label is not a single safe filename.
    #[error("invalid label `{label}` (forbidden: path separators or control chars)")]
    InvalidLabel {
        /// The rejected label.
        label: String,
    },

    /// Upstream is empty or would break the block layout.
    #[error("invalid upstream `{upstream}`: {reason}")]
    InvalidUpstream {
        /// Why the upstream was rejected.
        reason: &'static str,
        /// The rejected upstream.
        upstream: String,
    },

    /// Label file is already on disk and `--force` was not given.
    #[error("file already exists: {} (use --force to overwrite)", path.display())]
    LabelExists {
        /// Path of the existing label file.
        path: PathBuf,
    },

    /// The block locator pattern failed to compile.
    #[error("pattern: {0}")]
    Pattern(
        /// The wrapped regex error.
        #[from]
        regex::Error,
    ),

    /// One step of the reload sequence exited unsuccessfully.
    #[error("failed to run caddy {step}: {status}")]
    ReloadStepFailed {
        /// Exit status as reported by the OS.
        status: String,
        /// Caddy subcommand that failed (`fmt`, `validate`, `reload`).
        step: &'static str,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}

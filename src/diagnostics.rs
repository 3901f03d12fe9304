use std::path::Path;

use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where the operator
/// can do something about it, how to fix it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::CommandSpawn { program, source } => render_command_spawn(program, source),
        Error::ConfigNotFound { path } => render_config_not_found(path),
        Error::EntryExists { host, path } => render_entry_exists(host, path),
        Error::FileAccess { action, path, source } => render_file_access(action, path, source),
        Error::InvalidHost { host } => render_invalid_host(host),
        Error::InvalidLabel { label } => render_invalid_label(label),
        Error::InvalidUpstream { reason, upstream } => render_invalid_upstream(upstream, reason),
        Error::LabelExists { path } => render_label_exists(path),
        Error::ReloadStepFailed { status, step } => render_reload_step_failed(step, status),
        Error::TomlDe(e) => render_invalid_settings(e),
        _ => render_generic(e),
    };
}

fn render_command_spawn(program: &str, source: &std::io::Error) -> String {
    return format!("\
# Error: Command Not Started

Could not start `{program}`: {source}

## Fix

Make sure `{program}` is installed and on `PATH`, or set `docker` under
`[reload]` in `.caddyctl.toml`.
");
}

fn render_config_not_found(path: &Path) -> String {
    return format!("\
# Error: Config Not Found

`{}` does not exist.

## Fix

Check the `--config` path, or drop the flag to use `.caddyctl.toml` from the
current directory.
", path.display());
}

fn render_entry_exists(host: &str, path: &Path) -> String {
    return format!("\
# Error: Entry Exists

`{}` already has a block for `{host}`.

## Fix

Re-run the same command with `--force` to replace it.
", path.display());
}

fn render_file_access(action: &str, path: &Path, source: &std::io::Error) -> String {
    return format!("\
# Error: File Access

Could not {action} `{}`: {source}

## Fix

Check that the directory exists and is writable by this user, or point
`--dir` (or `sites_dir` in `.caddyctl.toml`) somewhere else.
", path.display());
}

fn render_generic(e: &Error) -> String {
    return format!("\
# Error

{e}
");
}

fn render_invalid_host(host: &str) -> String {
    return format!("\
# Error: Invalid Host

`{host}` is not a valid host.

## Fix

Use only lowercase letters, digits, `.` and `-`, e.g. `app.example.com`.
");
}

fn render_invalid_label(label: &str) -> String {
    return format!("\
# Error: Invalid Label

`{label}` is not a usable file name.

## Fix

Use a single name without `/`, `\\` or control characters, e.g. `prod`.
");
}

fn render_invalid_settings(e: &toml::de::Error) -> String {
    return format!("\
# Error: Invalid Settings

{e}

## Fix

Correct the TOML in `.caddyctl.toml` (or the file given with `--config`).
Known keys: `sites_dir`, `extension`, and `container`, `caddyfile`, `tty`,
`docker` under `[reload]`.
");
}

fn render_invalid_upstream(upstream: &str, reason: &str) -> String {
    return format!("\
# Error: Invalid Upstream

`{upstream}`: {reason}.

## Fix

Pass a single address such as `10.10.0.20` or `10.10.0.20:3002`.
");
}

fn render_label_exists(path: &Path) -> String {
    return format!("\
# Error: Label Exists

`{}` already exists.

## Fix

Overwrite it with an empty file:

    caddyctl label --force <name>
", path.display());
}

fn render_reload_step_failed(step: &str, status: &str) -> String {
    let mut out = format!("\
# Error: Reload Failed

`caddy {step}` failed ({status}). Later steps were not run.
");
    if step == "validate" {
        out.push_str("\
\n## Fix

The Caddyfile was formatted but not reloaded. Fix the reported problem in the
label files, then run `caddyctl reload` again.
");
    } else {
        out.push_str("\
\n## Fix

Check that the container is running and has `caddy` on its `PATH`:

    docker ps
");
    }
    return out;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_exists_suggests_force() {
        let md = render_error(&Error::EntryExists {
            host: "a.example.com".to_string(),
            path: "/srv/proxy/sites/prod.caddy".into(),
        });
        assert!(md.starts_with("# Error: Entry Exists"));
        assert!(md.contains("`a.example.com`"));
        assert!(md.contains("--force"));
    }

    #[test]
    fn validate_failure_explains_partial_state() {
        let md = render_error(&Error::ReloadStepFailed {
            status: "exit status: 1".to_string(),
            step: "validate",
        });
        assert!(md.contains("`caddy validate` failed (exit status: 1)"));
        assert!(md.contains("## Fix"));
    }

    #[test]
    fn invalid_label_has_fix_hint() {
        let md = render_error(&Error::InvalidLabel { label: "a/b".to_string() });
        assert!(md.starts_with("# Error: Invalid Label"));
        assert!(md.contains("`a/b`"));
        assert!(md.contains("## Fix"));
    }

    #[test]
    fn invalid_upstream_has_fix_hint() {
        let md = render_error(&Error::InvalidUpstream {
            reason: "must not contain whitespace or braces",
            upstream: "10.0.0.5 x".to_string(),
        });
        assert!(md.starts_with("# Error: Invalid Upstream"));
        assert!(md.contains("must not contain whitespace or braces"));
        assert!(md.contains("## Fix"));
    }

    #[test]
    fn file_access_names_path_and_has_fix_hint() {
        let md = render_error(&Error::FileAccess {
            action: "write",
            path: "/srv/proxy/sites/prod.caddy".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        });
        assert!(md.starts_with("# Error: File Access"));
        assert!(md.contains("Could not write `/srv/proxy/sites/prod.caddy`"));
        assert!(md.contains("## Fix"));
    }

    #[test]
    fn every_reload_step_failure_has_fix_hint() {
        for step in ["fmt", "validate", "reload"] {
            let md = render_error(&Error::ReloadStepFailed {
                status: "exit status: 1".to_string(),
                step,
            });
            assert!(md.contains("## Fix"), "no hint for {step}");
        }
    }

    #[test]
    fn malformed_settings_has_fix_hint() {
        let e = toml::from_str::<toml::Table>("sites_dir = [").unwrap_err();
        let md = render_error(&Error::TomlDe(e));
        assert!(md.starts_with("# Error: Invalid Settings"));
        assert!(md.contains("## Fix"));
    }

    #[test]
    fn other_errors_fall_back_to_message() {
        let generic = render_error(&Error::Pattern(regex::Regex::new("(").unwrap_err()));
        assert!(generic.starts_with("# Error\n"));
    }
}

mod block;
mod commands;
mod config;
mod diagnostics;
mod editor;
mod error;
mod label;
mod reload;
mod store;
mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::EditFlags;

#[derive(Parser)]
#[command(name = "caddyctl", version, about = "Manage Caddy reverse-proxy entries grouped in label files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Settings file (default: ./.caddyctl.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Only print errors and warnings
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Append or replace a reverse_proxy block for <host> inside a label file
    #[command(visible_alias = "newEntry")]
    Entry {
        // Positional order is <label> <host> <upstream>.
        /// Label file to edit; created if missing
        label: String,
        /// Host name the block is keyed by (a-z, 0-9, '.', '-')
        host: String,
        /// Backend address, e.g. 10.10.0.20 or 10.10.0.20:3002
        upstream: String,
        #[command(flatten)]
        edit: EditArgs,
    },
    /// Create an empty label file to group multiple entries
    Label {
        #[command(flatten)]
        edit: EditArgs,
        /// Label name, used as the file name
        name: String,
    },
    /// Format, validate and reload the Caddy config inside Docker
    Reload {
        /// Path to the Caddyfile inside the container [default: /etc/caddy/Caddyfile]
        #[arg(short = 'f', long)]
        caddyfile: Option<String>,
        /// Docker container running Caddy [default: caddy]
        #[arg(short, long)]
        container: Option<String>,
        /// Do not attach a TTY (-t) to docker exec
        #[arg(long)]
        no_tty: bool,
    },
}

/// Flags for commands that write label files.
#[derive(Args)]
struct EditArgs {
    /// Directory holding label files [default: /srv/proxy/sites]
    #[arg(short, long)]
    dir: Option<PathBuf>,
    /// Label file extension [default: .caddy]
    #[arg(long)]
    ext: Option<String>,
    /// Overwrite an existing label file or replace an existing entry
    #[arg(short, long)]
    force: bool,
}

impl From<EditArgs> for EditFlags {
    fn from(args: EditArgs) -> Self {
        return Self {
            directory: args.dir,
            extension: args.ext,
            force: args.force,
        };
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    return match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
    };
}

/// Logs go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| return EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load settings, then dispatch to the chosen command.
///
/// # Errors
///
/// Returns whatever the settings loader or the command returns.
fn run(cli: Cli) -> Result<(), error::Error> {
    let root = PathBuf::from(".");
    let config = config::Config::load(&root, cli.config.as_deref())?;

    return match cli.command {
        Commands::Entry { edit, host, label, upstream } => {
            commands::entry(&config, edit.into(), cli.quiet, &label, &host, &upstream)
        },
        Commands::Label { edit, name } => commands::label(&config, edit.into(), cli.quiet, &name),
        Commands::Reload { caddyfile, container, no_tty } => {
            commands::reload(&config, container, caddyfile, no_tty, cli.quiet)
        },
    };
}

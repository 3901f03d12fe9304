//! Reload sequence: `caddy fmt`, `caddy validate`, `caddy reload` inside a container.

use std::process::Command;

use crate::config::ReloadSettings;
use crate::error::Error;

/// Caddy subcommand and the flag that precedes the Caddyfile path, in run order.
const STEPS: [(&str, &str); 3] = [
    ("fmt", "--overwrite"),
    ("validate", "--config"),
    ("reload", "--config"),
];

/// Runs one external command to completion with inherited stdio.
pub trait CommandRunner {
    /// Run `invocation` and report how it exited.
    ///
    /// # Errors
    ///
    /// Returns the spawn error if the program could not be started.
    fn run(&mut self, invocation: &Invocation) -> std::io::Result<StepStatus>;
}

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Program to execute.
    pub program: String,
}

impl Invocation {
    /// Shell-like rendering used when echoing the command.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        return line;
    }
}

/// How a finished command exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// Non-zero exit or killed by a signal, described for the operator.
    Failed(String),
    /// Exit code zero.
    Success,
}

/// Spawns real processes whose output goes straight to the terminal.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> std::io::Result<StepStatus> {
        let status = Command::new(&invocation.program).args(&invocation.args).status()?;
        if status.success() {
            return Ok(StepStatus::Success);
        }
        return Ok(StepStatus::Failed(status.to_string()));
    }
}

/// Build the three `docker exec` invocations in the order they must run.
pub fn plan(settings: &ReloadSettings) -> Vec<(&'static str, Invocation)> {
    let mut prefix = vec!["exec".to_string(), "-i".to_string()];
    if settings.tty {
        prefix.push("-t".to_string());
    }
    prefix.push(settings.container.clone());

    return STEPS
        .iter()
        .map(|&(step, flag)| {
            let mut args = prefix.clone();
            args.extend(["caddy", step, flag, settings.caddyfile.as_str()].map(String::from));
            return (step, Invocation {
                args,
                program: settings.docker.clone(),
            });
        })
        .collect();
}

/// Format, validate, then reload. Stops at the first step that fails.
///
/// # Errors
///
/// Returns `Error::CommandSpawn` if a step's program cannot be started,
/// or `Error::ReloadStepFailed` if a step exits unsuccessfully. Later steps
/// are not attempted in either case.
pub fn run(settings: &ReloadSettings, runner: &mut impl CommandRunner) -> Result<(), Error> {
    for (step, invocation) in plan(settings) {
        if !settings.quiet {
            println!("-> {}", invocation.command_line());
        }
        tracing::debug!(step, program = %invocation.program, "running reload step");

        let status = runner.run(&invocation).map_err(|source| {
            return Error::CommandSpawn {
                program: invocation.program.clone(),
                source,
            };
        })?;

        if let StepStatus::Failed(status) = status {
            return Err(Error::ReloadStepFailed { status, step });
        }
    }

    if !settings.quiet {
        println!("Caddy configuration reloaded successfully.");
    }
    return Ok(());
}

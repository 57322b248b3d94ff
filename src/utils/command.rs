//! Utilities for running commands with proper error handling

use anyhow::{Context, Result};
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// Run a command, capturing its output
pub fn run_command(program: &str, args: &[&str]) -> Result<Output> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    debug!("Running command: {} {}", program, args.join(" "));

    let output = cmd
        .output()
        .context(format!("Failed to execute {}", program))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        // Failure can be an ordinary outcome for the caller, e.g. findmnt
        // probing an unmounted volume.
        debug!("Command failed: {} {}", program, args.join(" "));
        anyhow::bail!(
            "{} exited with code {:?}: {}",
            program,
            output.status.code(),
            stderr.trim()
        );
    }

    Ok(output)
}

/// Run a command and return stdout as string
pub fn run_command_stdout(program: &str, args: &[&str]) -> Result<String> {
    let output = run_command(program, args)?;
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

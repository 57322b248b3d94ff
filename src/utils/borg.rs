//! Borg subprocess utilities
//!
//! Builds and runs the two borg invocations of a run: `create` with its
//! output teed to console and log file, and `prune` with inherited stdio.
//! Borg's exit status is returned to the caller, never interpreted here.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Command, ExitStatus};
use tracing::debug;

/// Lets borg open the repository even though its recorded location differs
/// from the current mount path. Scoped to the child environment only.
const RELOCATED_REPO_ENV: &str = "BORG_RELOCATED_REPO_ACCESS_IS_OK";

/// Fixed compression profile for archive creation
pub const COMPRESSION: &str = "zstd,3";

/// Borg target for one archive: `<repository>::<archive>`
pub fn archive_target(repository: &Path, archive_name: &str) -> String {
    format!("{}::{}", repository.display(), archive_name)
}

fn borg_command() -> Command {
    let mut cmd = Command::new("borg");
    cmd.env(RELOCATED_REPO_ENV, "yes");
    cmd
}

/// Build the `borg create` command for one run
pub fn build_create_command(
    repository: &Path,
    archive_name: &str,
    source: &str,
    exclude_file: &Path,
) -> Command {
    let mut cmd = borg_command();
    cmd.arg("create")
        .arg("--stats")
        .arg("--compression")
        .arg(COMPRESSION)
        .arg(archive_target(repository, archive_name))
        .arg(source)
        .arg("--exclude-from")
        .arg(exclude_file);
    cmd
}

/// Build the `borg prune` command for one context prefix
pub fn build_prune_command(repository: &Path, prefix: &str, keep_archives: u32) -> Command {
    let mut cmd = borg_command();
    cmd.arg("prune")
        .arg("-v")
        .arg("--list")
        .arg(repository)
        .arg("--prefix")
        .arg(format!("{}-", prefix))
        .arg("--keep-last")
        .arg(keep_archives.to_string());
    cmd
}

/// Create one archive, streaming borg's combined stdout/stderr to both the
/// console and `log_file` line by line as it arrives.
pub fn create_archive(
    repository: &Path,
    archive_name: &str,
    source: &str,
    exclude_file: &Path,
    log_file: &Path,
) -> Result<ExitStatus> {
    let cmd = build_create_command(repository, archive_name, source, exclude_file);
    run_streamed(cmd, log_file)
}

/// Prune archives sharing the context prefix, keeping the most recent
/// `keep_archives`. Output goes straight to the console.
pub fn prune_archives(repository: &Path, prefix: &str, keep_archives: u32) -> Result<ExitStatus> {
    let mut cmd = build_prune_command(repository, prefix, keep_archives);
    debug!("Running: {:?}", cmd);
    let status = cmd.status().context("Failed to execute borg prune")?;
    Ok(status)
}

/// Run a command with stdout and stderr merged into one pipe, teeing each
/// line to the console and `log_file` before the child exits.
fn run_streamed(mut cmd: Command, log_file: &Path) -> Result<ExitStatus> {
    // Opened before spawn; a bad log path must not leave a running child
    // behind un-waited.
    let mut log = File::create(log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

    let (reader, writer) = os_pipe::pipe().context("Failed to create output pipe")?;
    let writer_clone = writer.try_clone().context("Failed to clone pipe writer")?;
    cmd.stdout(writer);
    cmd.stderr(writer_clone);

    debug!("Running: {:?}", cmd);
    let program = cmd.get_program().to_string_lossy().to_string();
    let mut child = cmd
        .spawn()
        .with_context(|| format!("Failed to execute {}", program))?;
    // The Command still owns both pipe writers; drop it so the reader sees
    // EOF once the child exits.
    drop(cmd);

    let stdout = io::stdout();
    let mut console = stdout.lock();

    for line in BufReader::new(reader).lines() {
        let line = line.context("Failed to read subprocess output")?;
        writeln!(console, "{}", line)?;
        console.flush()?;
        writeln!(log, "{}", line)?;
    }

    let status = child.wait().context("Failed to wait for subprocess")?;
    Ok(status)
}

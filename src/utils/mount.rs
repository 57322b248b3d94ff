//! Backup volume location via the mount table
//!
//! The volume is identified by filesystem UUID and resolved to its current
//! mount point with `findmnt`. Every failure mode (findmnt missing, non-zero
//! exit, UUID not mounted, empty output) collapses to "not found"; the
//! caller decides how to report it.

use super::command;
use std::path::PathBuf;

/// Resolve the mount point of the volume with the given filesystem UUID.
///
/// Returns `None` if the volume is not currently mounted or the mount table
/// cannot be queried.
pub fn find_mount_point(uuid: &str) -> Option<PathBuf> {
    let source = format!("UUID={}", uuid);
    let stdout =
        command::run_command_stdout("findmnt", &["-rn", "-S", &source, "-o", "TARGET"]).ok()?;
    parse_mount_target(&stdout)
}

/// Extract the mount path from findmnt's TARGET-only output.
///
/// A volume mounted more than once yields one line per mount instance; the
/// first line is taken deterministically.
pub fn parse_mount_target(output: &str) -> Option<PathBuf> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(PathBuf::from)
}

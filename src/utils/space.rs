//! Free-space guard for the backup volume
//!
//! When the volume is below the configured threshold the operator is asked
//! for an exact confirmation token. Anything else, including an empty line
//! or a lowercase variant, declines the run; declining is a clean abort,
//! not an error.

use anyhow::{Context, Result};
use fs2::available_space;
use std::io::{BufRead, Write};
use std::path::Path;

/// Exact token the operator must type to proceed below the threshold
pub const OVERRIDE_TOKEN: &str = "YES";

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Free space at `path` in gigabytes
pub fn free_space_gb(path: &Path) -> Result<f64> {
    let bytes = available_space(path)
        .with_context(|| format!("Failed to query free space at {}", path.display()))?;
    Ok(bytes as f64 / BYTES_PER_GB)
}

/// Check free space at the mount point against the threshold.
///
/// Returns `true` to proceed. Above the threshold no prompt is issued.
pub fn check_space<R: BufRead, W: Write>(
    mount: &Path,
    threshold_gb: f64,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    let free_gb = free_space_gb(mount)?;
    if free_gb >= threshold_gb {
        return Ok(true);
    }
    confirm_override(free_gb, threshold_gb, input, output)
}

fn confirm_override<R: BufRead, W: Write>(
    free_gb: f64,
    threshold_gb: f64,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    writeln!(output, "WARNING: low free space ({:.1} GB left).", free_gb)?;
    write!(
        output,
        "Threshold is {} GB. Type '{}' to force: ",
        threshold_gb, OVERRIDE_TOKEN
    )?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read input")?;

    // Strip only the line ending; surrounding whitespace does not count as
    // the exact token.
    let answer = line.strip_suffix('\n').unwrap_or(&line);
    let answer = answer.strip_suffix('\r').unwrap_or(answer);

    Ok(answer == OVERRIDE_TOKEN)
}

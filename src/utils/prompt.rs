//! Interactive context selection
//!
//! One malformed input is fatal to the run: there is no retry loop, and
//! every invalid input (non-numeric, negative, out of range) produces the
//! same diagnostic.

use crate::config::ContextConfig;
use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use std::io::{BufRead, Write};

/// Print the context menu and read the operator's choice.
pub fn select_context<'a, R: BufRead, W: Write>(
    contextes: &'a IndexMap<String, ContextConfig>,
    input: &mut R,
    output: &mut W,
) -> Result<(&'a String, &'a ContextConfig)> {
    writeln!(output)?;
    writeln!(output, "--- BORG BACKUP MANAGER ---")?;
    for (index, (name, context)) in contextes.iter().enumerate() {
        writeln!(output, "[{}] {} : {}", index, name, context.description)?;
    }
    writeln!(output)?;
    write!(output, "Choose a context: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read input")?;

    let choice: usize = line.trim().parse().map_err(|_| anyhow!("invalid choice"))?;
    contextes
        .get_index(choice)
        .ok_or_else(|| anyhow!("invalid choice"))
}

//! Terminal rendering for login results.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Width labels are right-aligned to, so field values line up.
const LABEL_WIDTH: usize = 6;

/// Print a confirmation line to stdout.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Print the rejection indicator to stderr.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg.red());
}

/// Print `label: value` with labels aligned.
pub fn field(label: &str, value: &str) {
    println!("{:>width$}: {}", label.dimmed(), value, width = LABEL_WIDTH);
}

/// Print a value as a single line of JSON, for scripts.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

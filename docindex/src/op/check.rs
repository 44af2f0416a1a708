use crate::{cli, codec, index};
use anyhow::{bail, Context, Result};
use docindex_tracing::{println_action_green, println_action_red, println_red_err};

/// Decodes the index at `command.index` and reports every broken invariant.
///
/// Fails when the index cannot be decoded or when any invariant is broken.
pub fn check(command: cli::Check) -> Result<()> {
    let path = &command.index.index;
    println_action_green("Checking", &path.display().to_string());
    let entries = codec::read_entries(path)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    let violations = index::validate(&entries);
    if violations.is_empty() {
        println_action_green("Finished", &format!("{} entries, no issues", entries.len()));
        return Ok(());
    }
    for violation in &violations {
        println_red_err(&violation.to_string());
    }
    println_action_red(
        "Failed",
        &format!("{} entries, {} issues", entries.len(), violations.len()),
    );
    bail!(
        "{} is not a valid search index ({} issues)",
        path.display(),
        violations.len()
    )
}

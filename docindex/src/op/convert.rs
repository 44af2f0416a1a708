use crate::{
    cli,
    codec::{self, Format},
};
use anyhow::{Context, Result};
use docindex_tracing::println_action_green;

/// Re-encodes `command.input` into `command.output`, replacing the output wholesale.
pub fn convert(command: cli::Convert) -> Result<()> {
    let cli::Convert { input, output, to } = command;
    let format = to
        .or_else(|| Format::from_path(&output))
        .with_context(|| {
            format!(
                "cannot infer the format of {}, pass `--to json` or `--to js`",
                output.display()
            )
        })?;
    let index = codec::read_index(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    codec::write_index(&output, &index, format)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println_action_green(
        "Converted",
        &format!(
            "{} entries from {} to {}",
            index.len(),
            input.display(),
            output.display()
        ),
    );
    Ok(())
}

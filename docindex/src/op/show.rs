use crate::cli;
use anyhow::Result;
use docindex_tracing::println_green;

/// Prints one entry, with the structure of its docstring when it has one.
pub fn show(command: cli::Show) -> Result<()> {
    let index = super::load(&command.index)?;
    let entry = index.lookup(&command.location)?;

    if command.json {
        println!("{}", serde_json::to_string_pretty(entry)?);
        return Ok(());
    }

    println_green(&entry.title);
    tracing::info!("location: {}", entry.location);
    tracing::info!("page:     {}", entry.page);
    tracing::info!("category: {}", entry.category);
    let anchor = entry.anchor();
    if let Some(symbol) = anchor.symbol() {
        tracing::info!("symbol:   {} in {}", symbol.name, symbol.module);
    } else if let Some(heading) = anchor.section_title() {
        tracing::debug!("heading:  {heading}");
    }

    let Some(docstring) = entry.docstring() else {
        if !entry.text.is_empty() {
            tracing::info!("\n{}", entry.text.trim_end());
        }
        return Ok(());
    };
    tracing::info!("\n{}", docstring.signature);
    for paragraph in docstring.prose() {
        tracing::info!("\n{paragraph}");
    }
    for example in &docstring.examples {
        tracing::info!("\njulia> {}", example.input);
        for line in &example.output {
            tracing::info!("{line}");
        }
    }
    for admonition in &docstring.admonitions {
        tracing::info!("\n{} ({})", admonition.title, admonition.kind);
        for line in &admonition.body {
            tracing::info!("    {line}");
        }
    }
    Ok(())
}

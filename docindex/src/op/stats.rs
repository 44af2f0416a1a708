use crate::cli;
use anyhow::Result;

/// Prints entry counts per category and per page.
pub fn stats(command: cli::Stats) -> Result<()> {
    let index = super::load(&command.index)?;
    let stats = index.stats();

    if command.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }
    tracing::info!("{} entries", stats.total);
    for (category, count) in &stats.by_category {
        tracing::info!("  {:<8} {count:>5}", category.as_str());
    }
    tracing::info!("{} pages", stats.by_page.len());
    for (page, count) in &stats.by_page {
        tracing::info!("  {page} {count:>5}");
    }
    Ok(())
}

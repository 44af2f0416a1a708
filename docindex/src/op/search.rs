use crate::{cli, search::Query};
use anyhow::Result;
use docindex_tracing::println_yellow_err;

/// Prints the entries matching `command.query`, best matches first.
pub fn search(command: cli::Search) -> Result<()> {
    let index = super::load(&command.index)?;
    let query = Query {
        text: command.query,
        categories: command.filter.categories,
        page: command.filter.page,
        case_sensitive: command.case_sensitive,
        limit: command.limit,
    };
    let hits = crate::search::search(&index, &query);

    if command.json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }
    if hits.is_empty() {
        println_yellow_err(&format!("No results found for \"{}\".", query.text));
        return Ok(());
    }
    for hit in &hits {
        tracing::info!("{}  {}", hit.entry.title, hit.entry.location);
        if let Some(snippet) = &hit.snippet {
            tracing::info!("    {snippet}");
        }
    }
    Ok(())
}

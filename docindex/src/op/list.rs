use crate::{cli, search::Query};
use anyhow::Result;

/// Prints `category  location  title` for every entry passing the filter.
pub fn list(command: cli::List) -> Result<()> {
    let index = super::load(&command.index)?;
    let query = Query {
        categories: command.filter.categories,
        page: command.filter.page,
        ..Default::default()
    };
    for hit in crate::search::search(&index, &query) {
        tracing::info!(
            "{:<8}  {}  {}",
            hit.entry.category.as_str(),
            hit.entry.location,
            hit.entry.title
        );
    }
    Ok(())
}

//! The command line interface for `docindex`.
use crate::{codec::Format, entry::Category};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "docindex",
    about = "Inspect, query and rewrite generated documentation search indexes",
    version
)]
pub struct Command {
    /// Use verbose output. Repeat for more detail.
    #[clap(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Silent mode. Don't output anything to the command line.
    #[clap(short, long, global = true)]
    pub silent: bool,
    #[clap(subcommand)]
    pub op: Op,
}

#[derive(Debug, Subcommand)]
pub enum Op {
    /// Decode an index and report every broken invariant.
    Check(Check),
    /// Find entries whose title or text contains a query.
    Search(Search),
    /// Print the entry at a location.
    Show(Show),
    /// List entries, optionally filtered by category or page.
    List(List),
    /// Re-encode an index as JSON or as a search script.
    Convert(Convert),
    /// Count entries per category and per page.
    Stats(Stats),
}

/// Where to read the index from.
#[derive(Debug, Clone, Args)]
pub struct IndexPath {
    /// Path to the index, either `search_index.js` or a `.json` file.
    #[clap(long, short, env = "DOCINDEX_PATH")]
    pub index: PathBuf,
}

/// Entry filters shared by listing commands.
#[derive(Debug, Clone, Default, Args)]
pub struct Filter {
    /// Only consider entries of this category. May be repeated.
    #[clap(long = "category", short = 'c')]
    pub categories: Vec<Category>,
    /// Only consider entries of this page.
    #[clap(long, short)]
    pub page: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct Check {
    #[clap(flatten)]
    pub index: IndexPath,
}

#[derive(Debug, Clone, Args)]
pub struct Search {
    #[clap(flatten)]
    pub index: IndexPath,
    /// Text to look for in entry titles and texts.
    pub query: String,
    #[clap(flatten)]
    pub filter: Filter,
    /// Match the query case sensitively.
    #[clap(long)]
    pub case_sensitive: bool,
    /// Print at most this many hits.
    #[clap(long, short = 'n')]
    pub limit: Option<usize>,
    /// Print the hits as JSON.
    #[clap(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct Show {
    #[clap(flatten)]
    pub index: IndexPath,
    /// Location of the entry, e.g. `index.html#InverseLaplace.talbot`.
    pub location: String,
    /// Print the entry as JSON.
    #[clap(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct List {
    #[clap(flatten)]
    pub index: IndexPath,
    #[clap(flatten)]
    pub filter: Filter,
}

#[derive(Debug, Clone, Args)]
pub struct Convert {
    /// The index to read.
    pub input: PathBuf,
    /// Where to write the converted index. An existing file is replaced.
    pub output: PathBuf,
    /// Output format. Inferred from the output extension when omitted.
    #[clap(long, value_enum)]
    pub to: Option<Format>,
}

#[derive(Debug, Clone, Args)]
pub struct Stats {
    #[clap(flatten)]
    pub index: IndexPath,
    /// Print the counts as JSON.
    #[clap(long)]
    pub json: bool,
}

mod check;
mod convert;
mod list;
mod search;
mod show;
mod stats;

pub use check::check;
pub use convert::convert;
pub use list::list;
pub use search::search;
pub use show::show;
pub use stats::stats;

use crate::{
    cli::{Command, IndexPath, Op},
    codec,
    index::SearchIndex,
};
use anyhow::{Context, Result};

/// Runs the operation selected on the command line.
pub fn run(command: Command) -> Result<()> {
    match command.op {
        Op::Check(command) => check(command),
        Op::Search(command) => search(command),
        Op::Show(command) => show(command),
        Op::List(command) => list(command),
        Op::Convert(command) => convert(command),
        Op::Stats(command) => stats(command),
    }
}

/// Reads and validates the index named on the command line.
pub(crate) fn load(path: &IndexPath) -> Result<SearchIndex> {
    codec::read_index(&path.index).with_context(|| {
        format!(
            "failed to load {}, run `docindex check` for every issue",
            path.index.display()
        )
    })
}

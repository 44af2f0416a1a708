//! Reading, validating, querying and rewriting generated documentation search indexes.
//!
//! A search index is a flat list of [DocEntry] records, each pointing a
//! documentation anchor at a title and a rendered text. [SearchIndex] keeps
//! them keyed by location and upholds the index invariants, [codec] moves them
//! to and from disk and [search] resolves queries to entries.
pub mod anchor;
pub mod cli;
pub mod codec;
pub mod docstring;
pub mod entry;
pub mod error;
pub mod index;
pub mod op;
pub mod search;

pub use anchor::Anchor;
pub use codec::{read_index, write_index, Format};
pub use docstring::Docstring;
pub use entry::{Category, DocEntry};
pub use error::{IndexError, Violation};
pub use index::{validate, SearchIndex};
pub use search::{Query, SearchHit};

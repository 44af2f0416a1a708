use crate::entry::Category;
use std::{fmt, path::PathBuf};
use thiserror::Error;

/// A broken index invariant. Reported by [crate::index::validate] and carried by
/// [IndexError::Invalid] when a [crate::SearchIndex] refuses to be built.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Violation {
    /// The entry at `position` has an empty `location`.
    EmptyLocation { position: usize },
    /// Two entries share a `location`; `first` and `second` are their positions.
    DuplicateLocation {
        location: String,
        first: usize,
        second: usize,
    },
    /// A `function` or `type` entry without a docstring.
    MissingText {
        location: String,
        category: Category,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EmptyLocation { position } => {
                write!(f, "entry #{position} has an empty location")
            }
            Violation::DuplicateLocation {
                location,
                first,
                second,
            } => write!(
                f,
                "location \"{location}\" is used by entries #{first} and #{second}"
            ),
            Violation::MissingText { location, category } => write!(
                f,
                "{category} entry \"{location}\" has no documentation text"
            ),
        }
    }
}

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("failed to access \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed index data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed search index script: {0}")]
    MalformedWrapper(String),
    #[error(
        "unknown category \"{0}\", expected one of: {}",
        Category::ALL.iter().map(|c| c.as_str()).collect::<Vec<_>>().join(", ")
    )]
    UnknownCategory(String),
    #[error("invalid search index: {0}")]
    Invalid(Violation),
    #[error("no entry at location \"{location}\"{}", did_you_mean(.suggestions))]
    UnknownLocation {
        location: String,
        suggestions: Vec<String>,
    },
}

impl IndexError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IndexError::Io {
            path: path.into(),
            source,
        }
    }
}

fn did_you_mean(suggestions: &[String]) -> String {
    match suggestions {
        [] => String::new(),
        [only] => format!(", did you mean \"{only}\"?"),
        many => format!(
            ", did you mean one of: {}?",
            many.iter()
                .map(|s| format!("\"{s}\""))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

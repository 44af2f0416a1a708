//! The documentation entry, the single record type of a search index.
use crate::{anchor::Anchor, docstring::Docstring, error::IndexError};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// What kind of documentation element an entry points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Category {
    Page,
    Section,
    Function,
    Type,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Page,
        Category::Section,
        Category::Function,
        Category::Type,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Page => "page",
            Category::Section => "section",
            Category::Function => "function",
            Category::Type => "type",
        }
    }

    /// Functions and types are documented symbols and must carry a docstring.
    pub fn is_symbol(&self) -> bool {
        matches!(self, Category::Function | Category::Type)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| IndexError::UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = IndexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for &'static str {
    fn from(value: Category) -> Self {
        value.as_str()
    }
}

/// A single addressable item of generated documentation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocEntry {
    /// Anchor path of the entry, unique within an index.
    pub location: String,
    /// Human readable name of the page the entry belongs to.
    pub page: String,
    pub title: String,
    pub category: Category,
    /// Rendered documentation body, empty for most headers.
    #[serde(default)]
    pub text: String,
}

impl DocEntry {
    pub fn new(
        location: impl Into<String>,
        page: impl Into<String>,
        title: impl Into<String>,
        category: Category,
        text: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            page: page.into(),
            title: title.into(),
            category,
            text: text.into(),
        }
    }

    pub fn anchor(&self) -> Anchor<'_> {
        Anchor::parse(&self.location)
    }

    /// The parsed docstring of a function or type entry.
    pub fn docstring(&self) -> Option<Docstring<'_>> {
        (self.category.is_symbol() && !self.text.trim().is_empty())
            .then(|| Docstring::parse(&self.text))
    }

    /// A one line description fit for a search result listing.
    pub fn preview(&self) -> Option<String> {
        match self.docstring() {
            Some(docstring) => docstring.summary().map(str::to_string),
            None => self
                .text
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn category_round_trips_through_strings() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!(matches!(
            "Function".parse::<Category>(),
            Err(IndexError::UnknownCategory(value)) if value == "Function"
        ));
    }

    #[test]
    fn unknown_category_is_rejected_when_decoding() {
        let err = serde_json::from_str::<DocEntry>(
            r#"{"location":"a#b","page":"A","title":"b","category":"macro","text":"x"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown category \"macro\""));
    }

    #[test]
    fn serializes_fields_in_generator_order() {
        let entry = DocEntry::new(
            "index.html#",
            "InverseLaplace",
            "InverseLaplace",
            Category::Page,
            "",
        );
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"location":"index.html#","page":"InverseLaplace","title":"InverseLaplace","category":"page","text":""}"#
        );
    }

    #[test]
    fn headers_have_no_docstring() {
        let section = DocEntry::new(
            "index.html#Index-1",
            "InverseLaplace",
            "Index",
            Category::Section,
            "ILtPair\nabserr",
        );
        assert!(section.docstring().is_none());
        assert_eq!(section.preview().as_deref(), Some("ILtPair"));
    }

    #[test]
    fn symbol_preview_is_the_docstring_summary() {
        let entry = DocEntry::new(
            "index.html#InverseLaplace.ILT",
            "InverseLaplace",
            "InverseLaplace.ILT",
            Category::Function,
            "ILT(function, Nterms=32)\n\nThis is an alias for the default Talbot() method.\n\n\n\n",
        );
        assert_eq!(
            entry.preview().as_deref(),
            Some("This is an alias for the default Talbot() method.")
        );
    }
}

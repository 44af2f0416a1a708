//! The search index collection and its invariants.
use crate::{
    entry::{Category, DocEntry},
    error::{IndexError, Violation},
};
use indexmap::IndexMap;
use itertools::Itertools;
use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// Maximum number of locations offered by [SearchIndex::suggest].
const MAX_SUGGESTIONS: usize = 3;

/// The on-disk shape of an index, before any invariant has been checked.
#[derive(Debug, Default, Deserialize, Serialize)]
pub(crate) struct RawIndex {
    pub(crate) docs: Vec<DocEntry>,
}

/// A validated collection of [DocEntry], keyed by location.
///
/// Generation order is kept for iteration and serialization, but equality
/// ignores it: two indexes are equal when they map the same locations to the
/// same entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawIndex")]
pub struct SearchIndex {
    entries: IndexMap<String, DocEntry>,
}

/// Entry counts of an index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Stats<'a> {
    pub total: usize,
    pub by_category: BTreeMap<Category, usize>,
    pub by_page: IndexMap<&'a str, usize>,
}

/// Reports every broken invariant among `entries`, in entry order.
pub fn validate(entries: &[DocEntry]) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        if entry.location.is_empty() {
            violations.push(Violation::EmptyLocation { position });
        } else if let Some(&first) = seen.get(entry.location.as_str()) {
            violations.push(Violation::DuplicateLocation {
                location: entry.location.clone(),
                first,
                second: position,
            });
        } else {
            seen.insert(&entry.location, position);
        }
        if entry.category.is_symbol() && entry.text.trim().is_empty() {
            violations.push(Violation::MissingText {
                location: entry.location.clone(),
                category: entry.category,
            });
        }
    }
    violations
}

impl SearchIndex {
    /// Builds an index, failing on the first broken invariant.
    pub fn from_entries(entries: Vec<DocEntry>) -> Result<Self, IndexError> {
        if let Some(violation) = validate(&entries).into_iter().next() {
            return Err(IndexError::Invalid(violation));
        }
        let entries: IndexMap<String, DocEntry> = entries
            .into_iter()
            .map(|entry| (entry.location.clone(), entry))
            .collect();
        tracing::debug!("indexed {} documentation entries", entries.len());
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, location: &str) -> Option<&DocEntry> {
        self.entries.get(location)
    }

    pub fn contains(&self, location: &str) -> bool {
        self.entries.contains_key(location)
    }

    /// Looks up `location`, offering close matches when it is unknown.
    pub fn lookup(&self, location: &str) -> Result<&DocEntry, IndexError> {
        self.get(location)
            .ok_or_else(|| IndexError::UnknownLocation {
                location: location.to_string(),
                suggestions: self.suggest(location),
            })
    }

    /// Entries in generation order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &DocEntry> + '_ {
        self.entries.values()
    }

    /// Position of an entry in generation order.
    pub fn position(&self, location: &str) -> Option<usize> {
        self.entries.get_index_of(location)
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &DocEntry> + '_ {
        self.iter().filter(move |entry| entry.category == category)
    }

    pub fn by_page<'a>(&'a self, page: &'a str) -> impl Iterator<Item = &'a DocEntry> + 'a {
        self.iter().filter(move |entry| entry.page == page)
    }

    /// Distinct page names, in the order they first appear.
    pub fn pages(&self) -> Vec<&str> {
        self.iter().map(|entry| entry.page.as_str()).unique().collect()
    }

    /// Known locations closest to `location` by edit distance, closest first.
    pub fn suggest(&self, location: &str) -> Vec<String> {
        let threshold = (location.chars().count() / 3).max(3);
        self.entries
            .keys()
            .map(|known| (strsim::levenshtein(location, known), known))
            .filter(|(distance, _)| *distance <= threshold)
            .sorted_by_key(|(distance, _)| *distance)
            .take(MAX_SUGGESTIONS)
            .map(|(_, known)| known.clone())
            .collect()
    }

    pub fn stats(&self) -> Stats<'_> {
        let mut stats = Stats {
            total: self.len(),
            ..Default::default()
        };
        for entry in self.iter() {
            *stats.by_category.entry(entry.category).or_default() += 1;
            *stats.by_page.entry(entry.page.as_str()).or_default() += 1;
        }
        stats
    }

    pub fn into_entries(self) -> Vec<DocEntry> {
        self.entries.into_values().collect()
    }
}

impl TryFrom<RawIndex> for SearchIndex {
    type Error = IndexError;

    fn try_from(raw: RawIndex) -> Result<Self, Self::Error> {
        SearchIndex::from_entries(raw.docs)
    }
}

impl Serialize for SearchIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Docs<'a>(&'a IndexMap<String, DocEntry>);
        impl Serialize for Docs<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_seq(self.0.values())
            }
        }
        let mut state = serializer.serialize_struct("SearchIndex", 1)?;
        state.serialize_field("docs", &Docs(&self.entries))?;
        state.end()
    }
}

impl<'a> IntoIterator for &'a SearchIndex {
    type Item = &'a DocEntry;
    type IntoIter = indexmap::map::Values<'a, String, DocEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

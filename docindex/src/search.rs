//! Substring search over entry titles and texts.
use crate::{
    entry::{Category, DocEntry},
    index::SearchIndex,
};
use itertools::Itertools;
use serde::Serialize;

/// Characters of context kept around a match in a text snippet.
const SNIPPET_WIDTH: usize = 80;
const ELLIPSIS: &str = "...";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    /// Only entries of these categories match. Empty means all of them.
    pub categories: Vec<Category>,
    pub page: Option<String>,
    pub case_sensitive: bool,
    pub limit: Option<usize>,
}

/// How well an entry matched, best first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Title,
    Symbol,
    TitleContains,
    Text,
    /// Empty query, every filtered entry is a hit.
    Any,
}

impl MatchKind {
    pub fn score(&self) -> u8 {
        match self {
            MatchKind::Title => 4,
            MatchKind::Symbol => 3,
            MatchKind::TitleContains => 2,
            MatchKind::Text => 1,
            MatchKind::Any => 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchHit<'a> {
    #[serde(flatten)]
    pub entry: &'a DocEntry,
    #[serde(rename = "match")]
    pub kind: MatchKind,
    pub score: u8,
    /// Position of the entry in the index.
    #[serde(skip)]
    pub position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    pub fn page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn accepts(&self, entry: &DocEntry) -> bool {
        (self.categories.is_empty() || self.categories.contains(&entry.category))
            && self.page.as_deref().map_or(true, |page| entry.page == page)
    }

    fn fold(&self, s: &str) -> String {
        self.fold_chars(s).map(|(_, c)| c).collect()
    }

    /// Folds `s` char by char, pairing every folded char with the index of the
    /// char of `s` it came from. Lowercasing may expand one char into several.
    fn fold_chars<'s>(&self, s: &'s str) -> impl Iterator<Item = (usize, char)> + 's {
        let case_sensitive = self.case_sensitive;
        s.chars().enumerate().flat_map(move |(idx, c)| {
            let folded: Vec<char> = if case_sensitive {
                vec![c]
            } else {
                c.to_lowercase().collect()
            };
            folded.into_iter().map(move |f| (idx, f))
        })
    }
}

/// Runs `query` against `index`.
///
/// Hits are ordered by score, ties keep index order.
pub fn search<'a>(index: &'a SearchIndex, query: &Query) -> Vec<SearchHit<'a>> {
    let needle = query.fold(query.text.trim());
    let hits = index
        .iter()
        .enumerate()
        .filter(|(_, entry)| query.accepts(entry))
        .filter_map(|(position, entry)| {
            let kind = match_kind(query, &needle, entry)?;
            let snippet = match kind {
                MatchKind::Text => text_snippet(query, &needle, &entry.text),
                _ => entry.preview(),
            };
            Some(SearchHit {
                entry,
                kind,
                score: kind.score(),
                position,
                snippet,
            })
        })
        .sorted_by_key(|hit| (hit.kind, hit.position));
    let hits: Vec<_> = match query.limit {
        Some(limit) => hits.take(limit).collect(),
        None => hits.collect(),
    };
    tracing::debug!("query {:?} matched {} entries", query.text, hits.len());
    hits
}

fn match_kind(query: &Query, needle: &str, entry: &DocEntry) -> Option<MatchKind> {
    if needle.is_empty() {
        return Some(MatchKind::Any);
    }
    let title = query.fold(&entry.title);
    if title == needle {
        return Some(MatchKind::Title);
    }
    let symbol = title.rsplit_once('.').map(|(_, name)| name);
    if symbol == Some(needle) {
        return Some(MatchKind::Symbol);
    }
    if title.contains(needle) {
        return Some(MatchKind::TitleContains);
    }
    query
        .fold(&entry.text)
        .contains(needle)
        .then_some(MatchKind::Text)
}

/// The line of `text` holding the first match, cut down around it.
fn text_snippet(query: &Query, needle: &str, text: &str) -> Option<String> {
    text.lines().map(str::trim).find_map(|line| {
        let (origin, folded): (Vec<usize>, String) = query.fold_chars(line).unzip();
        let byte_start = folded.find(needle)?;
        let folded_start = folded[..byte_start].chars().count();
        let folded_end = folded_start + needle.chars().count();
        // Back to positions in `line`, covering every char the match touches.
        let start = origin[folded_start];
        let end = origin[folded_end - 1] + 1;
        Some(window(line, start, end - start))
    })
}

fn window(line: &str, match_start: usize, match_len: usize) -> String {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() <= SNIPPET_WIDTH {
        return line.to_string();
    }
    let context = SNIPPET_WIDTH.saturating_sub(match_len) / 2;
    let start = match_start
        .saturating_sub(context)
        .min(chars.len() - SNIPPET_WIDTH);
    let end = start + SNIPPET_WIDTH;
    let mut snippet = String::new();
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.extend(&chars[start..end]);
    if end < chars.len() {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn index() -> SearchIndex {
        SearchIndex::from_entries(vec![
            DocEntry::new(
                "index.html#",
                "InverseLaplace",
                "InverseLaplace",
                Category::Page,
                "",
            ),
            DocEntry::new(
                "index.html#InverseLaplace.Weeks",
                "InverseLaplace",
                "InverseLaplace.Weeks",
                Category::Type,
                "Weeks(func)\n\nreturn w, which estimates the inverse Laplace transform of func with the Weeks algorithm.",
            ),
            DocEntry::new(
                "index.html#InverseLaplace.optimize",
                "InverseLaplace",
                "InverseLaplace.optimize",
                Category::Function,
                "optimize(w, t, Nterms)\n\noptimize the parameters of the Weeks transform w at the argument t.",
            ),
            DocEntry::new("api.html#", "API", "API", Category::Page, ""),
        ])
        .unwrap()
    }

    fn locations(hits: &[SearchHit<'_>]) -> Vec<String> {
        hits.iter().map(|hit| hit.entry.location.clone()).collect()
    }

    #[test]
    fn ranks_title_matches_above_text_matches() {
        let index = index();
        let hits = search(&index, &Query::new("weeks"));
        assert_eq!(
            locations(&hits),
            vec![
                "index.html#InverseLaplace.Weeks",
                "index.html#InverseLaplace.optimize",
            ]
        );
        assert_eq!(hits[0].kind, MatchKind::Symbol);
        assert_eq!(hits[1].kind, MatchKind::Text);
        assert_eq!(
            hits[1].snippet.as_deref(),
            Some("optimize the parameters of the Weeks transform w at the argument t.")
        );
    }

    #[test]
    fn exact_title_wins() {
        let index = index();
        let hits = search(&index, &Query::new("InverseLaplace"));
        assert_eq!(hits[0].kind, MatchKind::Title);
        assert_eq!(hits[0].entry.location, "index.html#");
        assert_eq!(hits[1].kind, MatchKind::TitleContains);
    }

    #[test]
    fn case_sensitivity() {
        let index = index();
        assert!(search(&index, &Query::new("WEEKS").case_sensitive(true)).is_empty());
        assert_eq!(search(&index, &Query::new("WEEKS")).len(), 2);
    }

    #[test]
    fn filters_limit_and_empty_query() {
        let index = index();
        let all = search(&index, &Query::new(""));
        assert_eq!(all.len(), 4);
        assert!(all.iter().all(|hit| hit.score == 0));

        let pages = search(&index, &Query::new("").category(Category::Page).page("API"));
        assert_eq!(locations(&pages), vec!["api.html#"]);

        let limited = search(&index, &Query::new("weeks").limit(1));
        assert_eq!(locations(&limited), vec!["index.html#InverseLaplace.Weeks"]);
    }

    #[test]
    fn long_lines_are_windowed_on_char_boundaries() {
        let line = format!("{}Talbot{}", "é".repeat(100), "ö".repeat(100));
        let snippet = window(&line, 100, 6);
        assert!(snippet.starts_with(ELLIPSIS));
        assert!(snippet.ends_with(ELLIPSIS));
        assert!(snippet.contains("Talbot"));
        assert_eq!(snippet.chars().count(), SNIPPET_WIDTH + 2 * ELLIPSIS.len());
    }

    #[test]
    fn snippet_keeps_the_match_when_lowercasing_expands_chars() {
        let text = format!("{}Weeks{}", "İ".repeat(100), "a".repeat(95));
        let query = Query::new("weeks");
        let snippet = text_snippet(&query, "weeks", &text).unwrap();
        assert!(snippet.contains("Weeks"), "{snippet}");
        assert_eq!(snippet.chars().count(), SNIPPET_WIDTH + 2 * ELLIPSIS.len());
    }

    #[test]
    fn snippet_drops_leading_indentation_of_long_lines() {
        let text = format!("optimize(w)\n\n        weeks {}", "x".repeat(100));
        let snippet = text_snippet(&Query::new("weeks"), "weeks", &text).unwrap();
        assert!(snippet.starts_with("weeks x"), "{snippet}");
        assert!(snippet.ends_with(ELLIPSIS));
    }

    #[test]
    fn hits_serialize_with_their_entry() {
        let index = index();
        let hits = search(&index, &Query::new("optimize"));
        let json = serde_json::to_value(&hits[0]).unwrap();
        assert_eq!(json["location"], "index.html#InverseLaplace.optimize");
        assert_eq!(json["match"], "symbol");
        assert_eq!(json["score"], 3);
    }
}

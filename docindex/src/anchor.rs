//! Parsing of entry locations such as `index.html#InverseLaplace.talbot`.
use std::fmt;

/// A borrowed view of a location split at its first `#`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor<'a> {
    /// The document part, e.g. `index.html`.
    pub path: &'a str,
    /// The fragment after `#`. `Some("")` for `index.html#`.
    pub fragment: Option<&'a str>,
}

/// The parts of a symbol fragment like `InverseLaplace.talbot`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Symbol<'a> {
    /// Everything before the last `.`, empty for unqualified names.
    pub module: &'a str,
    pub name: &'a str,
}

impl<'a> Anchor<'a> {
    pub fn parse(location: &'a str) -> Self {
        match location.split_once('#') {
            Some((path, fragment)) => Anchor {
                path,
                fragment: Some(fragment),
            },
            None => Anchor {
                path: location,
                fragment: None,
            },
        }
    }

    /// Whether this anchor addresses a whole page rather than a place within it.
    pub fn is_page_anchor(&self) -> bool {
        self.fragment.map_or(true, str::is_empty)
    }

    /// Recovers the heading of a generated section slug.
    ///
    /// Generators turn `Setting parameters` into `Setting-parameters-1`, where the
    /// trailing number disambiguates repeated headings.
    pub fn section_title(&self) -> Option<String> {
        let fragment = self.fragment.filter(|f| !f.is_empty())?;
        let slug = match fragment.rsplit_once('-') {
            Some((head, counter))
                if !head.is_empty() && counter.chars().all(|c| c.is_ascii_digit()) =>
            {
                head
            }
            _ => fragment,
        };
        Some(slug.replace('-', " "))
    }

    /// Splits a symbol fragment into module path and name.
    ///
    /// Fragments holding whitespace or `-` are section slugs, not symbols.
    pub fn symbol(&self) -> Option<Symbol<'a>> {
        let fragment = self.fragment.filter(|f| !f.is_empty())?;
        if fragment.contains(|c: char| c == '-' || c.is_whitespace()) {
            return None;
        }
        Some(match fragment.rsplit_once('.') {
            Some((module, name)) if !name.is_empty() => Symbol { module, name },
            _ => Symbol {
                module: "",
                name: fragment,
            },
        })
    }
}

impl fmt::Display for Anchor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fragment {
            Some(fragment) => write!(f, "{}#{}", self.path, fragment),
            None => f.write_str(self.path),
        }
    }
}

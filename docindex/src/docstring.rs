//! Read-only structure recovered from the rendered docstring of a symbol entry.
//!
//! Rendered docstrings arrive as plain text: a signature paragraph, prose,
//! REPL examples introduced by `julia> ` prompts and admonitions rendered as
//! `note: Note` followed by their body.

/// Prompt opening a REPL interaction inside a rendered docstring.
const REPL_PROMPT: &str = "julia>";

/// Admonition kinds emitted by the documentation generator.
const ADMONITION_KINDS: [&str; 7] = ["note", "warning", "tip", "info", "danger", "compat", "todo"];

/// Headings that introduce example blocks instead of describing the symbol.
const EXAMPLE_HEADINGS: [&str; 2] = ["Example", "Examples"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Docstring<'a> {
    pub signature: &'a str,
    /// Every paragraph after the signature, in order.
    pub paragraphs: Vec<&'a str>,
    pub examples: Vec<Example<'a>>,
    pub admonitions: Vec<Admonition<'a>>,
}

/// One REPL interaction: the input after the prompt and the printed result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Example<'a> {
    pub input: &'a str,
    pub output: Vec<&'a str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Admonition<'a> {
    pub kind: &'a str,
    pub title: &'a str,
    pub body: Vec<&'a str>,
}

impl<'a> Docstring<'a> {
    pub fn parse(text: &'a str) -> Self {
        let mut paragraphs = text
            .split("\n\n")
            .map(str::trim)
            .filter(|paragraph| !paragraph.is_empty());
        let signature = paragraphs.next().unwrap_or_default();
        Docstring {
            signature,
            paragraphs: paragraphs.collect(),
            examples: parse_examples(text),
            admonitions: parse_admonitions(text),
        }
    }

    /// The first sentence of the first prose paragraph.
    pub fn summary(&self) -> Option<&'a str> {
        let paragraph = self.paragraphs.iter().copied().find(|p| is_prose(p))?;
        let first_line = paragraph.lines().next().unwrap_or(paragraph);
        Some(first_sentence(first_line))
    }

    /// The prose paragraphs, without example headings, REPL blocks or admonitions.
    pub fn prose(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.paragraphs.iter().copied().filter(|p| is_prose(p))
    }
}

fn is_prose(paragraph: &str) -> bool {
    let first_line = paragraph.lines().next().unwrap_or_default().trim();
    !first_line.starts_with(REPL_PROMPT)
        && !EXAMPLE_HEADINGS.contains(&first_line)
        && admonition_header(first_line).is_none()
}

fn first_sentence(line: &str) -> &str {
    let mut chars = line.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if c == '.' && chars.peek().map_or(false, |(_, next)| next.is_whitespace()) {
            return &line[..=idx];
        }
    }
    line.trim_end()
}

fn admonition_header(line: &str) -> Option<(&str, &str)> {
    let (kind, title) = line.split_once(": ")?;
    (ADMONITION_KINDS.contains(&kind) && !title.trim().is_empty()).then(|| (kind, title.trim()))
}

fn parse_examples(text: &str) -> Vec<Example<'_>> {
    let mut examples: Vec<Example<'_>> = Vec::new();
    let mut lines = text.lines().peekable();
    while let Some(line) = lines.next() {
        let Some(input) = line.trim_start().strip_prefix(REPL_PROMPT) else {
            continue;
        };
        let input = input.trim();
        let mut output = Vec::new();
        // A result may be separated from its prompt by a single blank line, unless
        // the trailing `;` suppressed it.
        if !input.ends_with(';') && lines.peek().is_some_and(|next| next.trim().is_empty()) {
            let mut lookahead = lines.clone();
            lookahead.next();
            if lookahead
                .peek()
                .is_some_and(|next| !next.trim().is_empty() && !is_prompt(next))
            {
                lines.next();
            }
        }
        while let Some(next) = lines.next_if(|next| !next.trim().is_empty() && !is_prompt(next)) {
            output.push(next.trim_end());
        }
        examples.push(Example { input, output });
    }
    examples
}

fn is_prompt(line: &str) -> bool {
    line.trim_start().starts_with(REPL_PROMPT)
}

fn parse_admonitions(text: &str) -> Vec<Admonition<'_>> {
    let mut admonitions = Vec::new();
    let mut lines = text.lines().peekable();
    while let Some(line) = lines.next() {
        let Some((kind, title)) = admonition_header(line.trim()) else {
            continue;
        };
        let mut body = Vec::new();
        while let Some(next) = lines.next_if(|next| !next.trim().is_empty()) {
            body.push(next.trim());
        }
        admonitions.push(Admonition { kind, title, body });
    }
    admonitions
}

//! Reading and writing search index files.
//!
//! Two shapes exist on disk: plain JSON (`{"docs": [...]}`) and the script form
//! loaded by the search page, which assigns the same object to a global
//! variable and leaves a trailing comma after every entry.
use crate::{
    entry::DocEntry,
    error::IndexError,
    index::{RawIndex, SearchIndex},
};
use serde::Serialize;
use std::{
    fs,
    io::{self, Write},
    path::Path,
};

/// Global the search page reads the index from.
pub const JS_VARIABLE: &str = "documenterSearchIndex";

/// Mode of an index written where no file existed before.
#[cfg(unix)]
const NEW_INDEX_MODE: u32 = 0o644;

/// Declaration keywords accepted in front of the script form.
const DECLARATIONS: [&str; 3] = ["var ", "let ", "const "];

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// `{"docs": [...]}`
    Json,
    /// `var documenterSearchIndex = {"docs": [...]}`
    Js,
}

impl Format {
    /// Picks the format from the file extension, falling back to the contents.
    pub fn detect(path: &Path, contents: &str) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("js") => Format::Js,
            Some("json") => Format::Json,
            _ if contents.trim_start().starts_with('{') => Format::Json,
            _ => Format::Js,
        }
    }

    /// The format implied by a path's extension alone.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("js") => Some(Format::Js),
            Some("json") => Some(Format::Json),
            _ => None,
        }
    }
}

/// Decodes the entries without checking any index invariant.
pub fn decode_entries(contents: &str, format: Format) -> Result<Vec<DocEntry>, IndexError> {
    let raw: RawIndex = match format {
        Format::Json => serde_json::from_str(contents)?,
        Format::Js => {
            let object = strip_declaration(contents)?;
            serde_json::from_str(&strip_trailing_commas(object))?
        }
    };
    Ok(raw.docs)
}

pub fn decode(contents: &str, format: Format) -> Result<SearchIndex, IndexError> {
    SearchIndex::from_entries(decode_entries(contents, format)?)
}

pub fn encode(index: &SearchIndex, format: Format) -> Result<String, IndexError> {
    match format {
        Format::Json => {
            let mut out = serde_json::to_string_pretty(index)?;
            out.push('\n');
            Ok(out)
        }
        Format::Js => {
            let mut out = format!("var {JS_VARIABLE} = {{\"docs\": [\n\n");
            for entry in index.iter() {
                out.push_str(&to_pretty_string(entry)?);
                out.push_str(",\n\n");
            }
            out.push_str("]}\n");
            Ok(out)
        }
    }
}

/// Reads the entries of the index file at `path` without checking any index invariant.
pub fn read_entries(path: &Path) -> Result<Vec<DocEntry>, IndexError> {
    let contents = fs::read_to_string(path).map_err(|err| IndexError::io(path, err))?;
    let format = Format::detect(path, &contents);
    tracing::debug!("decoding {} as {:?}", path.display(), format);
    decode_entries(&contents, format)
}

pub fn read_index(path: &Path) -> Result<SearchIndex, IndexError> {
    SearchIndex::from_entries(read_entries(path)?)
}

/// Replaces the file at `path` with the encoded index.
///
/// The contents are written to a temporary file next to `path` and renamed over
/// it, so readers never observe a partially written index.
pub fn write_index(path: &Path, index: &SearchIndex, format: Format) -> Result<(), IndexError> {
    let contents = encode(index, format)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|err| IndexError::io(dir, err))?;
    file.write_all(contents.as_bytes())
        .map_err(|err| IndexError::io(file.path(), err))?;
    // Temporary files are created owner-only, the index keeps the target's mode.
    let permissions = match fs::metadata(path) {
        Ok(metadata) => metadata.permissions(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => default_permissions(&file)?,
        Err(err) => return Err(IndexError::io(path, err)),
    };
    file.as_file()
        .set_permissions(permissions)
        .map_err(|err| IndexError::io(file.path(), err))?;
    file.persist(path)
        .map_err(|err| IndexError::io(path, err.error))?;
    Ok(())
}

/// Permissions of a freshly written index: readable by everyone, writable by its owner.
#[cfg(unix)]
fn default_permissions(_file: &tempfile::NamedTempFile) -> Result<fs::Permissions, IndexError> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::Permissions::from_mode(NEW_INDEX_MODE))
}

#[cfg(not(unix))]
fn default_permissions(file: &tempfile::NamedTempFile) -> Result<fs::Permissions, IndexError> {
    file.as_file()
        .metadata()
        .map(|metadata| metadata.permissions())
        .map_err(|err| IndexError::io(file.path(), err))
}

fn to_pretty_string<T: Serialize>(value: &T) -> Result<String, IndexError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Returns the object literal assigned by the script.
fn strip_declaration(contents: &str) -> Result<&str, IndexError> {
    let trimmed = contents.trim();
    let Some(declaration) = DECLARATIONS
        .iter()
        .find_map(|keyword| trimmed.strip_prefix(keyword))
    else {
        return Err(IndexError::MalformedWrapper(
            "expected a `var` declaration".into(),
        ));
    };
    let Some((name, value)) = declaration.split_once('=') else {
        return Err(IndexError::MalformedWrapper(
            "the declaration assigns no value".into(),
        ));
    };
    let name = name.trim();
    if name != JS_VARIABLE {
        tracing::debug!("reading search index from unexpected global `{name}`");
    }
    let value = value.trim().trim_end_matches(';').trim_end();
    if !value.starts_with('{') {
        return Err(IndexError::MalformedWrapper(format!(
            "`{name}` is not assigned an object"
        )));
    }
    Ok(value)
}

/// Drops commas that directly precede `]` or `}`, leaving string literals untouched.
fn strip_trailing_commas(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = json.char_indices();
    while let Some((idx, c)) = chars.next() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            out.push(c);
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' if json[idx + 1..]
                .trim_start()
                .starts_with(|next: char| next == ']' || next == '}') => {}
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{Category, DocEntry};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn sample() -> SearchIndex {
        SearchIndex::from_entries(vec![
            DocEntry::new(
                "index.html#",
                "InverseLaplace",
                "InverseLaplace",
                Category::Page,
                "",
            ),
            DocEntry::new(
                "index.html#InverseLaplace.gwr",
                "InverseLaplace",
                "InverseLaplace.gwr",
                Category::Function,
                "gwr(func::Function, t::AbstractFloat, M::Integer=16)\n\nUses the \"Gaver-Wynn rho\" method, ],}.",
            ),
        ])
        .unwrap()
    }

    #[test]
    fn trailing_commas_outside_strings_are_dropped() {
        assert_eq!(
            strip_trailing_commas(r#"{"a": [1, 2, ], "b": "x, ]",}"#),
            r#"{"a": [1, 2 ], "b": "x, ]"}"#
        );
        assert_eq!(
            strip_trailing_commas(r#"{"a": "quote \", }"}"#),
            r#"{"a": "quote \", }"}"#
        );
    }

    #[test]
    fn script_form_round_trips() {
        let index = sample();
        let script = encode(&index, Format::Js).unwrap();
        assert!(script.starts_with("var documenterSearchIndex = {\"docs\": [\n\n{\n    \"location\""));
        assert!(script.ends_with("},\n\n]}\n"));
        assert_eq!(decode(&script, Format::Js).unwrap(), index);
    }

    #[test]
    fn json_form_round_trips() {
        let index = sample();
        let json = encode(&index, Format::Json).unwrap();
        assert_eq!(decode(&json, Format::Json).unwrap(), index);
    }

    #[test]
    fn declaration_variants() {
        let body = r#"{"docs": [{"location":"a#","page":"A","title":"A","category":"page","text":""},]}"#;
        for prefix in ["var documenterSearchIndex = ", "const searchIndex=", "let x = "] {
            let index = decode(&format!("{prefix}{body};\n"), Format::Js).unwrap();
            assert_eq!(index.len(), 1);
        }
    }

    #[test]
    fn malformed_wrappers() {
        assert!(matches!(
            decode(r#"{"docs": []}"#, Format::Js),
            Err(IndexError::MalformedWrapper(_))
        ));
        assert!(matches!(
            decode("var documenterSearchIndex;", Format::Js),
            Err(IndexError::MalformedWrapper(_))
        ));
        assert!(matches!(
            decode("var documenterSearchIndex = [];", Format::Js),
            Err(IndexError::MalformedWrapper(_))
        ));
    }

    #[test]
    fn entries_decode_without_validation() {
        let body = r#"{"docs": [
            {"location":"a#","page":"A","title":"A","category":"page","text":""},
            {"location":"a#","page":"A","title":"A","category":"page","text":""}
        ]}"#;
        assert_eq!(decode_entries(body, Format::Json).unwrap().len(), 2);
        assert!(matches!(
            decode(body, Format::Json),
            Err(IndexError::Invalid(_))
        ));
    }

    #[test]
    fn detects_format() {
        assert_eq!(Format::detect(&PathBuf::from("search_index.js"), "{"), Format::Js);
        assert_eq!(Format::detect(&PathBuf::from("index.json"), "var"), Format::Json);
        assert_eq!(Format::detect(&PathBuf::from("index"), "  {\"docs\""), Format::Json);
        assert_eq!(Format::detect(&PathBuf::from("index"), "var x = {}"), Format::Js);
        assert_eq!(Format::from_path(&PathBuf::from("index.txt")), None);
    }

    #[test]
    fn write_replaces_the_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search_index.js");
        std::fs::write(&path, "stale").unwrap();
        write_index(&path, &sample(), Format::Js).unwrap();
        assert_eq!(read_index(&path).unwrap(), sample());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn write_keeps_the_target_readable() {
        use std::os::unix::fs::PermissionsExt;
        let mode = |path: &Path| std::fs::metadata(path).unwrap().permissions().mode() & 0o777;
        let dir = tempfile::tempdir().unwrap();

        let fresh = dir.path().join("fresh.js");
        write_index(&fresh, &sample(), Format::Js).unwrap();
        assert_eq!(mode(&fresh), 0o644);

        let existing = dir.path().join("existing.json");
        std::fs::write(&existing, "stale").unwrap();
        std::fs::set_permissions(&existing, std::fs::Permissions::from_mode(0o640)).unwrap();
        write_index(&existing, &sample(), Format::Json).unwrap();
        assert_eq!(mode(&existing), 0o640);
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = read_index(Path::new("does/not/exist.js")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.js"));
    }
}

//! Verse content lookup.
//!
//! The content API itself lives outside this crate; [`VerseContentProvider`]
//! is the seam it plugs into. [`JsonLibrary`] serves content from a local
//! JSON file for the CLI and tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::bible::{parse, VerseReference};
use crate::content::VerseContent;
use crate::error::{Error, Result};

/// Trait for verse content providers.
///
/// Implementations may read from local files, a remote API or embedded data.
pub trait VerseContentProvider {
    /// Look up the rich content for a reference.
    fn content(&self, reference: &VerseReference) -> Result<VerseContent>;

    /// References this provider can serve, in display form.
    fn available(&self) -> Vec<String>;

    /// Check whether a reference can be served.
    fn has_reference(&self, reference: &VerseReference) -> bool {
        let wanted = reference.to_string();
        self.available().iter().any(|r| r.eq_ignore_ascii_case(&wanted))
    }
}

/// Verse content loaded from a JSON object of `"reference": content` pairs.
///
/// Content is either a node array or an HTML string.
#[derive(Debug, Default)]
pub struct JsonLibrary {
    path: Option<PathBuf>,
    entries: HashMap<String, (VerseReference, VerseContent)>,
}

fn library_key(reference: &VerseReference) -> String {
    reference.to_string().to_lowercase()
}

impl JsonLibrary {
    /// Load a library file. Entries with unparseable keys or content are
    /// skipped with a warning.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        let mut library = Self::from_json(&text)
            .map_err(|e| Error::library(e.to_string(), path.to_path_buf()))?;
        library.path = Some(path.to_path_buf());
        tracing::info!("Loaded {} verses from {}", library.entries.len(), path.display());
        Ok(library)
    }

    /// Build a library from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(text)
            .map_err(|e| Error::library(format!("expected an object of verses: {e}"), None))?;

        let mut library = Self::default();
        for (key, value) in raw {
            let reference = match parse(&key) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!("Skipping library entry {key:?}: {e}");
                    continue;
                }
            };
            match serde_json::from_value::<VerseContent>(value) {
                Ok(content) => library.insert(reference, content),
                Err(e) => tracing::warn!("Skipping library entry {key:?}: {e}"),
            }
        }
        Ok(library)
    }

    /// Add or replace one verse.
    pub fn insert(&mut self, reference: VerseReference, content: VerseContent) {
        self.entries.insert(library_key(&reference), (reference, content));
    }

    /// Number of verses held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the library holds no verses.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl VerseContentProvider for JsonLibrary {
    fn content(&self, reference: &VerseReference) -> Result<VerseContent> {
        self.entries
            .get(&library_key(reference))
            .map(|(_, content)| content.clone())
            .ok_or_else(|| Error::library(format!("no content for {reference}"), self.path.clone()))
    }

    fn available(&self) -> Vec<String> {
        let mut references: Vec<&VerseReference> = self.entries.values().map(|(r, _)| r).collect();
        references.sort_by(|a, b| crate::bible::compare_book_order(a, b));
        references.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use std::io::Write;

    use super::*;

    const LIBRARY: &str = r#"{
        "John 11:35": "<p class=\"p\"><span class=\"v\">35</span>Jesus wept.</p>",
        "Genesis 1:1": [{"name": "para", "type": "tag", "attrs": {"style": "p"}, "items": [
            {"text": "In the beginning, God created the heavens and the earth.", "type": "text", "attrs": {"verseId": "GEN.1.1"}}
        ]}],
        "not a reference": "<p>ignored</p>",
        "Romans 8:28": 42
    }"#;

    #[test]
    fn test_from_json_skips_bad_entries() {
        let library = JsonLibrary::from_json(LIBRARY).unwrap();
        assert_eq!(library.len(), 2);
        assert_eq!(library.available(), vec!["Genesis 1:1", "John 11:35"]);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let library = JsonLibrary::from_json(LIBRARY).unwrap();
        let reference = parse("john 11:35").unwrap();
        assert!(library.has_reference(&reference));
        let content = library.content(&reference).unwrap();
        assert_eq!(content.to_plain_text().unwrap(), "Jesus wept.");
    }

    #[test]
    fn test_missing_reference() {
        let library = JsonLibrary::from_json(LIBRARY).unwrap();
        let err = library.content(&parse("Jude 1:24").unwrap()).unwrap_err();
        assert!(err.to_string().contains("Jude 1:24"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LIBRARY.as_bytes()).unwrap();
        let library = JsonLibrary::load(file.path()).unwrap();
        assert!(!library.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = JsonLibrary::load(Path::new("/nonexistent/verses.json")).unwrap_err();
        assert!(matches!(err, Error::Io { path: Some(_), .. }));
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(JsonLibrary::from_json("[1, 2, 3]").is_err());
    }
}

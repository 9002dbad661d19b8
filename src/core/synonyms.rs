use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a synonym table
#[derive(Debug, Error)]
pub enum SynonymError {
    #[error("Failed to read synonym file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid synonym file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Built-in programming-fundamentals vocabulary
const BUILTIN_SYNONYMS: &[(&str, &[&str])] = &[
    ("function", &["func", "method", "procedure"]),
    ("async", &["asynchronous", "await"]),
    ("inheritance", &["extends", "subclass"]),
    ("decorator", &["wrapper", "annotation"]),
    ("variable", &["var", "identifier"]),
    ("array", &["list", "vector"]),
    ("object", &["instance", "entity"]),
    ("loop", &["iteration", "iterate"]),
    ("class", &["struct", "blueprint"]),
    ("database", &["db", "datastore"]),
    ("api", &["endpoint", "interface"]),
    ("recursion", &["recursive", "self-referential"]),
];

#[derive(Debug, Deserialize)]
struct SynonymFile {
    #[serde(default)]
    synonyms: BTreeMap<String, Vec<String>>,
}

/// Immutable mapping from canonical technical terms to informal synonyms
///
/// Lookups work in both directions: a canonical term yields its synonyms,
/// and a synonym yields every canonical term that lists it.
#[derive(Debug, Clone)]
pub struct SynonymTable {
    forward: BTreeMap<String, Vec<String>>,
    reverse: HashMap<String, Vec<String>>,
}

impl SynonymTable {
    /// Build a table from `(term, synonyms)` pairs
    ///
    /// Terms and synonyms are lowercased and trimmed; blank entries are dropped.
    pub fn new<I, K, V, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut forward: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (term, synonyms) in entries {
            let term = term.as_ref().trim().to_lowercase();
            if term.is_empty() {
                continue;
            }

            let list = forward.entry(term.clone()).or_default();
            for synonym in synonyms {
                let synonym = synonym.as_ref().trim().to_lowercase();
                if !synonym.is_empty() && synonym != term && !list.contains(&synonym) {
                    list.push(synonym);
                }
            }
        }

        let mut reverse: HashMap<String, Vec<String>> = HashMap::new();
        for (term, synonyms) in &forward {
            for synonym in synonyms {
                reverse
                    .entry(synonym.clone())
                    .or_default()
                    .push(term.clone());
            }
        }

        Self { forward, reverse }
    }

    /// The fixed vocabulary shipped with the service
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_SYNONYMS
                .iter()
                .map(|(term, synonyms)| (*term, synonyms.iter().copied())),
        )
    }

    /// Parse a table from TOML
    ///
    /// ```toml
    /// [synonyms]
    /// function = ["func", "method"]
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, SynonymError> {
        let file: SynonymFile = toml::from_str(source)?;
        Ok(Self::new(file.synonyms))
    }

    /// Load a table from a TOML file on disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SynonymError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let table = Self::from_toml_str(&source)?;
        tracing::debug!(
            "Loaded {} synonym entries from {}",
            table.len(),
            path.as_ref().display()
        );
        Ok(table)
    }

    /// Terms related to a normalized keyword, in either direction
    pub fn related_terms<'a>(&'a self, keyword: &str) -> impl Iterator<Item = &'a str> + 'a {
        let forward = self.forward.get(keyword).into_iter().flatten();
        let reverse = self.reverse.get(keyword).into_iter().flatten();
        forward.chain(reverse).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::builtin()
    }
}

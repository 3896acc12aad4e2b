//! Synonym dictionary mapping a normalized term to its ordered synonyms.
//!
//! Two JSON layouts are accepted:
//!
//! ```json
//! { "car": ["auto", "automobile"], "fast": ["quick"] }
//! ```
//!
//! where each key lists its own expansions, and
//!
//! ```json
//! [["car", "auto", "automobile"], ["fast", "quick"]]
//! ```
//!
//! where every member of a group expands to the other members, in group order.
//!
//! Keys are lowercased on load. When two keys collapse to the same lowercase
//! form, or a term shows up in several groups, the lists are concatenated as
//! they are encountered; nothing is deduplicated.

use std::collections::HashMap;
use std::path::Path;

use ahash::AHashMap;
use log::{debug, warn};
use serde::Deserialize;

use crate::error::{Result, SynsearchError};

#[derive(Deserialize)]
#[serde(untagged)]
enum SynonymSource {
    Mapping(HashMap<String, Vec<String>>),
    Groups(Vec<Vec<String>>),
}

/// Read-only term → synonyms lookup table.
#[derive(Debug, Clone, Default)]
pub struct SynonymDictionary {
    entries: AHashMap<String, Vec<String>>,
}

impl SynonymDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from explicit `term -> synonyms` pairs.
    pub fn from_mapping<I, K>(mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
        K: AsRef<str>,
    {
        let mut dictionary = Self::new();
        for (term, synonyms) in mapping {
            dictionary.insert(term.as_ref(), synonyms);
        }
        dictionary
    }

    /// Build a dictionary from synonym groups.
    ///
    /// Adding `["big", "large", "huge"]` produces:
    /// - "big" -> ["large", "huge"]
    /// - "large" -> ["big", "huge"]
    /// - "huge" -> ["big", "large"]
    pub fn from_synonym_groups(groups: Vec<Vec<String>>) -> Self {
        let mut dictionary = Self::new();
        for group in groups {
            for (i, term) in group.iter().enumerate() {
                let others = group
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, other)| other.clone())
                    .collect();
                dictionary.insert(term, others);
            }
        }
        dictionary
    }

    /// Parse a dictionary from JSON text in either accepted layout.
    pub fn parse(json: &str) -> Result<Self> {
        let source: SynonymSource = serde_json::from_str(json)
            .map_err(|e| SynsearchError::malformed_dictionary(e.to_string()))?;

        Ok(match source {
            SynonymSource::Mapping(mapping) => {
                // HashMap iteration order is arbitrary; sort so that merged
                // case variants concatenate deterministically.
                let mut pairs: Vec<_> = mapping.into_iter().collect();
                pairs.sort_by(|a, b| a.0.cmp(&b.0));
                Self::from_mapping(pairs)
            }
            SynonymSource::Groups(groups) => Self::from_synonym_groups(groups),
        })
    }

    /// Load a dictionary from a JSON file.
    ///
    /// A missing file is not an error: it is logged and an empty dictionary is
    /// returned. A file that exists but cannot be parsed fails with
    /// [`SynsearchError::MalformedDictionarySource`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(
                "Synonym source {} not found, continuing without synonyms",
                path.display()
            );
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)?;
        let dictionary = Self::parse(&content).map_err(|e| match e {
            SynsearchError::MalformedDictionarySource(msg) => {
                SynsearchError::malformed_dictionary(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;
        debug!(
            "Loaded {} synonym entries from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    /// Load a dictionary, falling back to an empty one on any failure.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(dictionary) => dictionary,
            Err(e) => {
                warn!("{e}; continuing without synonyms");
                Self::new()
            }
        }
    }

    /// Append synonyms for a term. The term is lowercased.
    pub fn insert(&mut self, term: &str, synonyms: Vec<String>) {
        self.entries
            .entry(term.to_lowercase())
            .or_default()
            .extend(synonyms);
    }

    /// Synonyms for an already-normalized term, or an empty slice.
    pub fn lookup(&self, term: &str) -> &[String] {
        self.entries.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of terms with an entry (including entries with no synonyms).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Search backend abstraction.
//!
//! The pager and the session only see the [`SearchEngine`] trait: parse a
//! query, run it with a bounded capacity, and fetch the stored fields of a
//! hit. [`TantivyEngine`] is the on-disk implementation; tests drive the pager
//! with scripted engines.

use std::collections::BTreeMap;

use crate::error::Result;

pub mod indexer;
pub mod tantivy_engine;

pub use indexer::{IndexReport, IndexedAnalysis, Indexer};
pub use tantivy_engine::TantivyEngine;

/// A searchable collection of stored documents.
pub trait SearchEngine {
    /// A parsed, executable query.
    type Query;

    /// Handle used to fetch a hit's stored fields.
    type DocId: Copy;

    /// Parse already-sanitized query text.
    ///
    /// Fails with [`crate::error::SynsearchError::QuerySyntax`] when the
    /// grammar rejects the text.
    fn parse_query(&self, text: &str) -> Result<Self::Query>;

    /// Run `query`, materializing at most `capacity` hits in score order.
    ///
    /// The returned [`HitSet::total_matches`] counts every matching document,
    /// not just the materialized ones.
    fn search(&self, query: &Self::Query, capacity: usize) -> Result<HitSet<Self::DocId>>;

    /// Fetch the stored fields of one hit.
    fn fetch_document(&self, doc: Self::DocId) -> Result<StoredDocument>;
}

/// One scored hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit<D> {
    pub doc: D,
    pub score: f32,
}

/// The outcome of one search call.
#[derive(Clone, Debug, PartialEq)]
pub struct HitSet<D> {
    /// Number of documents matching the query.
    pub total_matches: usize,
    /// Materialized hits, best first; never longer than the requested capacity.
    pub hits: Vec<Hit<D>>,
}

impl<D> HitSet<D> {
    pub fn new(total_matches: usize, hits: Vec<Hit<D>>) -> Self {
        HitSet {
            total_matches,
            hits,
        }
    }

    /// A result with no matches.
    pub fn empty() -> Self {
        HitSet {
            total_matches: 0,
            hits: Vec::new(),
        }
    }

    /// Whether every matching document has been materialized.
    pub fn is_complete(&self) -> bool {
        self.hits.len() >= self.total_matches
    }
}

/// Stored field values of a document, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoredDocument {
    fields: BTreeMap<String, String>,
}

impl StoredDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter.
    pub fn with_field<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        self.fields.insert(name.into(), value.into());
    }

    /// Value of a field, if stored.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// All stored fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

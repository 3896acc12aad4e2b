//! Configuration for index building and interactive search.
//!
//! Every struct has a `Default` matching the stock document layout, and the
//! whole tree can be read from a JSON file where any omitted key keeps its
//! default:
//!
//! ```
//! use synsearch::config::AppConfig;
//!
//! let config = AppConfig::from_json(r#"{"pager": {"page_size": 20}}"#).unwrap();
//! assert_eq!(config.pager.page_size, 20);
//! assert_eq!(config.pager.overfetch_factor, 5);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SynsearchError};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Result paging settings.
    pub pager: PagerConfig,
    /// Document fields and index writer settings.
    pub schema: SchemaConfig,
    /// Analysis pipeline settings.
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        self.pager.validate()?;
        self.schema.validate()
    }
}

/// What the pager does with navigation input it cannot parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidNavigationPolicy {
    /// Report the problem and ask again.
    #[default]
    Reprompt,
    /// End browsing of the current query.
    Quit,
}

/// Result paging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerConfig {
    /// Hits per page.
    pub page_size: usize,
    /// The first search asks for `page_size * overfetch_factor` hits.
    pub overfetch_factor: usize,
    /// Stored fields printed for each hit; the first one heads the line.
    pub display_fields: Vec<String>,
    /// Handling of unparsable navigation input.
    pub on_invalid_navigation: InvalidNavigationPolicy,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            overfetch_factor: 5,
            display_fields: vec!["title".to_string()],
            on_invalid_navigation: InvalidNavigationPolicy::Reprompt,
        }
    }
}

impl PagerConfig {
    /// Capacity requested by the first search of a query.
    pub fn initial_capacity(&self) -> usize {
        self.page_size.saturating_mul(self.overfetch_factor)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(SynsearchError::config("page_size must be at least 1"));
        }
        if self.overfetch_factor == 0 {
            return Err(SynsearchError::config("overfetch_factor must be at least 1"));
        }
        Ok(())
    }
}

/// How a field's text is indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Run through the synonym analyzer.
    Analyzed,
    /// Indexed verbatim as a single term.
    Raw,
}

/// One document field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default = "default_boost")]
    pub boost: f32,
    /// Whether free-text queries search this field.
    #[serde(default)]
    pub searchable: bool,
}

fn default_boost() -> f32 {
    1.0
}

impl FieldConfig {
    /// An analyzed field searched by free-text queries.
    pub fn analyzed<S: Into<String>>(name: S, boost: f32) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Analyzed,
            boost,
            searchable: true,
        }
    }

    /// A verbatim field that is stored but not searched by default.
    pub fn raw<S: Into<String>>(name: S, boost: f32) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Raw,
            boost,
            searchable: false,
        }
    }
}

/// Document fields and index writer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub fields: Vec<FieldConfig>,
    /// Memory budget handed to the index writer.
    pub writer_heap_bytes: usize,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            fields: vec![
                FieldConfig::analyzed("title", 2.0),
                FieldConfig::analyzed("headers", 1.0),
                FieldConfig::raw("signature", 0.9),
                FieldConfig::analyzed("description", 1.5),
                FieldConfig::raw("example", 1.0),
            ],
            writer_heap_bytes: 50_000_000,
        }
    }
}

impl SchemaConfig {
    /// Fields searched by free-text queries.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &FieldConfig> {
        self.fields.iter().filter(|field| field.searchable)
    }

    fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(SynsearchError::config("schema needs at least one field"));
        }
        if self.searchable_fields().next().is_none() {
            return Err(SynsearchError::config(
                "schema needs at least one searchable field",
            ));
        }
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|other| other.name == field.name) {
                return Err(SynsearchError::config(format!(
                    "duplicate field {:?}",
                    field.name
                )));
            }
        }
        Ok(())
    }
}

/// Analysis pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Synonym dictionary file; a missing file means no synonyms.
    pub synonyms: Option<PathBuf>,
    /// Apply English stemming after expansion.
    pub stem: bool,
    /// Also expand synonyms in queries, not just in indexed documents.
    pub expand_queries: bool,
    /// Regex whose matches become tokens, replacing Unicode word splitting.
    pub token_pattern: Option<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            synonyms: None,
            stem: true,
            expand_queries: false,
            token_pattern: None,
        }
    }
}

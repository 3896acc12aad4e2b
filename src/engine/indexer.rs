//! Builds an index from a JSON document dump.
//!
//! The source is a JSON array of objects. Each key that names a configured
//! field becomes that field's text: strings are taken as-is, arrays of strings
//! are joined with newlines, and any other value is stored as its JSON
//! rendering. Unknown keys and `null` values are skipped.
//!
//! The analysis settings that shape indexed terms are written next to the
//! index as [`ANALYSIS_FILE`], so a later search analyzes queries the same way.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tantivy::schema::{Field, Schema};
use tantivy::{Index, IndexWriter, TantivyDocument};

use crate::analysis::SynonymDictionary;
use crate::config::{AnalysisConfig, AppConfig};
use crate::engine::tantivy_engine::{
    AnalyzerTokenizer, SYNONYM_TOKENIZER, build_schema, index_analyzer,
};
use crate::error::{Result, SynsearchError};

/// Name of the file recording how an index's documents were analyzed.
pub const ANALYSIS_FILE: &str = "synsearch_analysis.json";

/// Index-time analysis settings that queries must match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedAnalysis {
    pub stem: bool,
    pub token_pattern: Option<String>,
}

impl IndexedAnalysis {
    pub fn from_config(analysis: &AnalysisConfig) -> Self {
        IndexedAnalysis {
            stem: analysis.stem,
            token_pattern: analysis.token_pattern.clone(),
        }
    }

    /// Write the settings into `index_dir`.
    pub fn save(&self, index_dir: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(index_dir.join(ANALYSIS_FILE), content)?;
        Ok(())
    }

    /// Read the settings recorded in `index_dir`, `None` if there are none.
    pub fn load(index_dir: &Path) -> Result<Option<Self>> {
        let path = index_dir.join(ANALYSIS_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Replace the index-time settings in `analysis` with the recorded ones.
    pub fn apply_to(&self, analysis: &mut AnalysisConfig) {
        if analysis.stem != self.stem {
            warn!(
                "Index was built with stemming {}; using that for queries",
                if self.stem { "on" } else { "off" }
            );
            analysis.stem = self.stem;
        }
        if analysis.token_pattern != self.token_pattern {
            warn!(
                "Index was built with token pattern {:?}; using that for queries",
                self.token_pattern
            );
            analysis.token_pattern = self.token_pattern.clone();
        }
    }
}

/// Summary of a finished indexing run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexReport {
    /// Documents written to the index.
    pub documents: usize,
    /// Source records that were not JSON objects.
    pub skipped: usize,
    pub index_dir: PathBuf,
}

/// Writes documents into a fresh index directory.
#[derive(Debug)]
pub struct Indexer {
    config: AppConfig,
    dictionary: Arc<SynonymDictionary>,
    force: bool,
}

impl Indexer {
    pub fn new(config: AppConfig, dictionary: Arc<SynonymDictionary>) -> Self {
        Indexer {
            config,
            dictionary,
            force: false,
        }
    }

    /// Replace an existing index instead of refusing to touch it.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Index every record of `source` into `index_dir`.
    pub fn build<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        source: P,
        index_dir: Q,
    ) -> Result<IndexReport> {
        let records = read_source(source.as_ref())?;
        self.build_from_records(records, index_dir)
    }

    /// Index already-parsed records into `index_dir`.
    pub fn build_from_records<Q: AsRef<Path>>(
        &self,
        records: Vec<Value>,
        index_dir: Q,
    ) -> Result<IndexReport> {
        let index_dir = index_dir.as_ref();
        let analyzer = index_analyzer(&self.config.analysis, Arc::clone(&self.dictionary))?;
        self.prepare_dir(index_dir)?;

        let schema = build_schema(&self.config.schema);
        let index = Index::create_in_dir(index_dir, schema.clone())?;
        index
            .tokenizers()
            .register(SYNONYM_TOKENIZER, AnalyzerTokenizer::text_analyzer(analyzer));

        let mut writer: IndexWriter = index.writer(self.config.schema.writer_heap_bytes)?;
        let fields = self.resolve_fields(&schema)?;

        let mut documents = 0;
        let mut skipped = 0;
        for (i, record) in records.into_iter().enumerate() {
            let Value::Object(object) = record else {
                warn!("Record {i} is not a JSON object, skipping");
                skipped += 1;
                continue;
            };
            let doc = to_document(&object, &fields);
            if let Some(title) = object.get("title").and_then(Value::as_str) {
                debug!("Indexing {title}");
            }
            writer.add_document(doc)?;
            documents += 1;
        }

        writer.commit()?;
        writer.wait_merging_threads()?;
        IndexedAnalysis::from_config(&self.config.analysis).save(index_dir)?;
        info!("Indexed {documents} documents into {}", index_dir.display());

        Ok(IndexReport {
            documents,
            skipped,
            index_dir: index_dir.to_path_buf(),
        })
    }

    fn resolve_fields(&self, schema: &Schema) -> Result<Vec<(String, Field)>> {
        self.config
            .schema
            .fields
            .iter()
            .map(|field| Ok((field.name.clone(), schema.get_field(&field.name)?)))
            .collect()
    }

    fn prepare_dir(&self, dir: &Path) -> Result<()> {
        if dir.join("meta.json").exists() {
            if !self.force {
                return Err(SynsearchError::config(format!(
                    "{} already contains an index; pass --force to replace it",
                    dir.display()
                )));
            }
            info!("Removing existing index at {}", dir.display());
            fs::remove_dir_all(dir)?;
        }
        fs::create_dir_all(dir).map_err(|e| {
            SynsearchError::Io(io::Error::new(
                e.kind(),
                format!("cannot create index directory {}: {e}", dir.display()),
            ))
        })
    }
}

/// Read the JSON array of records in `path`.
pub fn read_source(path: &Path) -> Result<Vec<Value>> {
    if !path.is_file() {
        return Err(SynsearchError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("source file {} not found", path.display()),
        )));
    }
    let content = fs::read_to_string(path)?;
    match serde_json::from_str(&content)? {
        Value::Array(records) => Ok(records),
        _ => Err(SynsearchError::config(format!(
            "{} must contain a JSON array of documents",
            path.display()
        ))),
    }
}

/// Text stored for one JSON value, `None` for `null`.
pub fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) if items.iter().all(Value::is_string) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        other => Some(other.to_string()),
    }
}

fn to_document(object: &Map<String, Value>, fields: &[(String, Field)]) -> TantivyDocument {
    let mut doc = TantivyDocument::default();
    for (name, field) in fields {
        if let Some(text) = object.get(name).and_then(field_text) {
            doc.add_text(*field, &text);
        }
    }
    doc
}

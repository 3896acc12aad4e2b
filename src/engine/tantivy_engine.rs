//! Tantivy-backed search engine.
//!
//! Analyzed fields are indexed through [`SynonymAnalyzer`], wrapped as a
//! tantivy tokenizer so stacked synonyms land on the same position as the word
//! they expand. Queries get their own tokenizer registry: by default the query
//! side runs the same pipeline minus expansion, since documents already carry
//! every synonym.

use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};
use tantivy::collector::{Count, TopDocs};
use tantivy::query::{Query, QueryParser};
use tantivy::schema::{
    Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, Value,
};
use tantivy::tokenizer::{
    TextAnalyzer, Token as EngineToken, TokenStream as EngineTokenStream,
    Tokenizer as EngineTokenizer, TokenizerManager,
};
use tantivy::{DocAddress, Index, IndexReader, ReloadPolicy, TantivyDocument};

use crate::analysis::token::absolute_positions;
use crate::analysis::tokenizer::RegexTokenizer;
use crate::analysis::{Analyzer, SynonymAnalyzer, SynonymDictionary};
use crate::config::{AnalysisConfig, AppConfig, FieldKind, SchemaConfig};
use crate::engine::{Hit, HitSet, IndexedAnalysis, SearchEngine, StoredDocument};
use crate::query::sanitizer::RESERVED_OPERATORS;
use crate::error::{Result, SynsearchError};

/// Name under which the synonym pipeline is registered with tantivy.
pub const SYNONYM_TOKENIZER: &str = "synsearch";

const RAW_TOKENIZER: &str = "raw";

/// Build the tantivy schema for the configured fields.
///
/// Every field is stored. Analyzed fields keep positions so stacked synonyms
/// and multi-word phrases can be matched.
pub fn build_schema(config: &SchemaConfig) -> Schema {
    let mut builder = Schema::builder();
    for field in &config.fields {
        let indexing = match field.kind {
            FieldKind::Analyzed => TextFieldIndexing::default()
                .set_tokenizer(SYNONYM_TOKENIZER)
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
            FieldKind::Raw => TextFieldIndexing::default()
                .set_tokenizer(RAW_TOKENIZER)
                .set_index_option(IndexRecordOption::Basic),
        };
        let options = TextOptions::default()
            .set_indexing_options(indexing)
            .set_stored();
        builder.add_text_field(&field.name, options);
    }
    builder.build()
}

/// The analyzer used when writing documents.
pub fn index_analyzer(
    analysis: &AnalysisConfig,
    dictionary: Arc<SynonymDictionary>,
) -> Result<SynonymAnalyzer> {
    let analyzer = SynonymAnalyzer::new(dictionary).with_stemming(analysis.stem);
    Ok(match &analysis.token_pattern {
        Some(pattern) => {
            analyzer.with_tokenizer(Arc::new(RegexTokenizer::with_pattern(pattern)?))
        }
        None => analyzer,
    })
}

/// Register the document-side synonym pipeline on `manager`.
pub fn register_index_analyzer(
    manager: &TokenizerManager,
    analysis: &AnalysisConfig,
    dictionary: Arc<SynonymDictionary>,
) -> Result<()> {
    let analyzer = index_analyzer(analysis, dictionary)?;
    manager.register(SYNONYM_TOKENIZER, AnalyzerTokenizer::text_analyzer(analyzer));
    Ok(())
}

/// Build the tokenizer registry used by the query parser.
pub fn query_tokenizers(
    analysis: &AnalysisConfig,
    dictionary: Arc<SynonymDictionary>,
) -> Result<TokenizerManager> {
    let manager = TokenizerManager::default();
    let analyzer = index_analyzer(analysis, dictionary)?;
    if analysis.expand_queries {
        manager.register(SYNONYM_TOKENIZER, AnalyzerTokenizer::text_analyzer(analyzer));
    } else {
        let query_side = analyzer.without_expansion();
        manager.register(SYNONYM_TOKENIZER, AnalyzerTokenizer::text_analyzer(query_side));
    }
    Ok(manager)
}

/// Adapts an [`Analyzer`] to tantivy's tokenizer interface.
#[derive(Clone)]
pub struct AnalyzerTokenizer {
    analyzer: Arc<dyn Analyzer>,
}

impl AnalyzerTokenizer {
    pub fn new<A: Analyzer + 'static>(analyzer: A) -> Self {
        AnalyzerTokenizer {
            analyzer: Arc::new(analyzer),
        }
    }

    /// Wrap `analyzer` as a ready-to-register tantivy analyzer.
    pub fn text_analyzer<A: Analyzer + 'static>(analyzer: A) -> TextAnalyzer {
        TextAnalyzer::builder(Self::new(analyzer)).build()
    }
}

impl EngineTokenizer for AnalyzerTokenizer {
    type TokenStream<'a> = AnalyzedTokens;

    fn token_stream<'a>(&'a mut self, text: &'a str) -> Self::TokenStream<'a> {
        let tokens: Vec<_> = match self.analyzer.analyze(text) {
            Ok(stream) => stream.collect(),
            Err(e) => {
                warn!("{} analyzer failed, field text skipped: {e}", self.analyzer.name());
                Vec::new()
            }
        };

        let positions = absolute_positions(&tokens);
        let converted: Vec<EngineToken> = tokens
            .into_iter()
            .zip(positions)
            .map(|(token, position)| EngineToken {
                offset_from: token.start_offset,
                offset_to: token.end_offset,
                position,
                text: token.text,
                position_length: 1,
            })
            .collect();

        AnalyzedTokens {
            pending: converted.into_iter(),
            current: EngineToken::default(),
        }
    }
}

/// Token stream handed to tantivy by [`AnalyzerTokenizer`].
pub struct AnalyzedTokens {
    pending: std::vec::IntoIter<EngineToken>,
    current: EngineToken,
}

impl EngineTokenStream for AnalyzedTokens {
    fn advance(&mut self) -> bool {
        match self.pending.next() {
            Some(token) => {
                self.current = token;
                true
            }
            None => false,
        }
    }

    fn token(&self) -> &EngineToken {
        &self.current
    }

    fn token_mut(&mut self) -> &mut EngineToken {
        &mut self.current
    }
}

/// Leading operators that keep their meaning for tantivy.
const KEPT_LEADING: &[&str] = &["-", "+"];

/// Rewrite sanitized text into something tantivy's grammar accepts.
///
/// Tantivy's grammar has no escapes outside quoted phrases. There an escaped
/// character becomes a space; the analyzer drops that punctuation anyway, so
/// `std\:\:vec` searches for `std` and `vec`. Inside quotes the marker is
/// removed unless it escapes a quote or another backslash.
///
/// The sanitizer leaves a leading operator alone. Only `-` and `+` work there;
/// any other leading operator is dropped (an opening bracket can never be
/// closed, since the sanitizer escaped every later one).
pub fn to_engine_syntax(sanitized: &str) -> String {
    let leading = RESERVED_OPERATORS
        .iter()
        .find(|operator| sanitized.starts_with(**operator))
        .filter(|operator| !KEPT_LEADING.contains(*operator));
    let rest = match leading {
        Some(operator) => &sanitized[operator.len()..],
        None => sanitized,
    };

    let mut output = String::with_capacity(rest.len());
    let mut in_quotes = false;
    let mut chars = rest.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' if in_quotes => match chars.next() {
                Some(escaped @ ('"' | '\\')) => {
                    output.push(c);
                    output.push(escaped);
                }
                Some(escaped) => output.push(escaped),
                None => {}
            },
            '\\' => {
                chars.next();
                output.push(' ');
            }
            '"' => {
                in_quotes = !in_quotes;
                output.push(c);
            }
            _ => output.push(c),
        }
    }
    output.trim().to_string()
}

/// A read-only view over an on-disk index.
pub struct TantivyEngine {
    index: Index,
    reader: IndexReader,
    parser: QueryParser,
    stored_fields: Vec<(String, Field)>,
}

impl std::fmt::Debug for TantivyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TantivyEngine")
            .field("stored_fields", &self.stored_fields)
            .finish()
    }
}

impl TantivyEngine {
    /// Open the index in `dir`.
    ///
    /// Every configured field must exist in the index schema. Stemming and the
    /// token pattern recorded at index time override the ones in `config`.
    pub fn open<P: AsRef<Path>>(
        dir: P,
        config: &AppConfig,
        dictionary: Arc<SynonymDictionary>,
    ) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(SynsearchError::config(format!(
                "index directory {} does not exist",
                dir.display()
            )));
        }
        let index = Index::open_in_dir(dir)?;
        debug!("Opened index at {}", dir.display());

        let mut config = config.clone();
        match IndexedAnalysis::load(dir)? {
            Some(indexed) => indexed.apply_to(&mut config.analysis),
            None => warn!(
                "{} records no analysis settings; queries use the current ones",
                dir.display()
            ),
        }
        Self::from_index(index, &config, dictionary)
    }

    /// Wrap an already-open index.
    pub fn from_index(
        index: Index,
        config: &AppConfig,
        dictionary: Arc<SynonymDictionary>,
    ) -> Result<Self> {
        register_index_analyzer(index.tokenizers(), &config.analysis, Arc::clone(&dictionary))?;

        let schema = index.schema();
        let mut stored_fields = Vec::with_capacity(config.schema.fields.len());
        let mut default_fields = Vec::new();
        let mut boosts = Vec::new();
        for field_config in &config.schema.fields {
            let field = schema.get_field(&field_config.name).map_err(|_| {
                SynsearchError::config(format!(
                    "field {:?} is not in the index schema",
                    field_config.name
                ))
            })?;
            stored_fields.push((field_config.name.clone(), field));
            if field_config.searchable {
                default_fields.push(field);
            }
            boosts.push((field, field_config.boost));
        }

        let mut parser = QueryParser::new(
            schema,
            default_fields,
            query_tokenizers(&config.analysis, dictionary)?,
        );
        for (field, boost) in boosts {
            parser.set_field_boost(field, boost);
        }

        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        Ok(TantivyEngine {
            index,
            reader,
            parser,
            stored_fields,
        })
    }

    /// Number of documents in the index.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// The underlying tantivy index.
    pub fn index(&self) -> &Index {
        &self.index
    }
}

impl SearchEngine for TantivyEngine {
    type Query = Box<dyn Query>;
    type DocId = DocAddress;

    fn parse_query(&self, text: &str) -> Result<Self::Query> {
        let rewritten = to_engine_syntax(text);
        let query = self
            .parser
            .parse_query(&rewritten)
            .map_err(|e| SynsearchError::query_syntax(format!("{text}: {e}")))?;
        debug!("Parsed {text:?} as {query:?}");
        Ok(query)
    }

    fn search(&self, query: &Self::Query, capacity: usize) -> Result<HitSet<DocAddress>> {
        if capacity == 0 {
            return Ok(HitSet::empty());
        }
        let searcher = self.reader.searcher();
        let (top_docs, total) = searcher
            .search(query.as_ref(), &(TopDocs::with_limit(capacity), Count))
            .map_err(|e| SynsearchError::search_engine(e.to_string()))?;

        let hits = top_docs
            .into_iter()
            .map(|(score, doc)| Hit { doc, score })
            .collect();
        Ok(HitSet::new(total, hits))
    }

    fn fetch_document(&self, doc: DocAddress) -> Result<StoredDocument> {
        let searcher = self.reader.searcher();
        let stored: TantivyDocument = searcher
            .doc(doc)
            .map_err(|e| SynsearchError::search_engine(e.to_string()))?;

        let mut document = StoredDocument::new();
        for (name, field) in &self.stored_fields {
            if let Some(value) = stored.get_first(*field).and_then(|v| v.as_str()) {
                document.insert(name.as_str(), value);
            }
        }
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QuerySanitizer;

    fn collect(analyzer: &mut TextAnalyzer, text: &str) -> Vec<(String, usize)> {
        let mut stream = analyzer.token_stream(text);
        let mut tokens = Vec::new();
        while stream.advance() {
            let token = stream.token();
            tokens.push((token.text.clone(), token.position));
        }
        tokens
    }

    fn dictionary() -> Arc<SynonymDictionary> {
        Arc::new(SynonymDictionary::from_mapping([(
            "car",
            vec!["auto".to_string()],
        )]))
    }

    #[test]
    fn test_adapter_stacks_synonyms() {
        let mut analyzer = AnalyzerTokenizer::text_analyzer(
            index_analyzer(&AnalysisConfig::default(), dictionary()).unwrap(),
        );
        let tokens = collect(&mut analyzer, "red car parked");
        assert_eq!(
            tokens,
            vec![
                ("red".to_string(), 0),
                ("car".to_string(), 1),
                ("auto".to_string(), 1),
                ("park".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_query_side_does_not_expand() {
        let manager = query_tokenizers(&AnalysisConfig::default(), dictionary()).unwrap();
        let mut analyzer = manager.get(SYNONYM_TOKENIZER).unwrap();
        let texts: Vec<String> = collect(&mut analyzer, "Car").into_iter().map(|t| t.0).collect();
        assert_eq!(texts, vec!["car"]);

        let expanding = AnalysisConfig {
            expand_queries: true,
            ..AnalysisConfig::default()
        };
        let manager = query_tokenizers(&expanding, dictionary()).unwrap();
        let mut analyzer = manager.get(SYNONYM_TOKENIZER).unwrap();
        assert_eq!(collect(&mut analyzer, "Car").len(), 2);
    }

    #[test]
    fn test_token_pattern() {
        let analysis = AnalysisConfig {
            token_pattern: Some(r"[a-z]+".to_string()),
            stem: false,
            ..AnalysisConfig::default()
        };
        let mut analyzer =
            AnalyzerTokenizer::text_analyzer(index_analyzer(&analysis, dictionary()).unwrap());
        let texts: Vec<String> = collect(&mut analyzer, "car2go").into_iter().map(|t| t.0).collect();
        assert_eq!(texts, vec!["car", "auto", "go"]);

        let broken = AnalysisConfig {
            token_pattern: Some("(".to_string()),
            ..AnalysisConfig::default()
        };
        assert!(index_analyzer(&broken, dictionary()).is_err());
    }

    #[test]
    fn test_engine_syntax_rewrite() {
        assert_eq!(to_engine_syntax(r"std\:\:vec"), "std  vec");
        assert_eq!(to_engine_syntax(r"title\:rust"), "title rust");
        assert_eq!(to_engine_syntax(r"foo\(bar\)"), "foo bar");
        assert_eq!(to_engine_syntax("::root"), "root");
        assert_eq!(to_engine_syntax(r"(a\)"), "a");
        assert_eq!(to_engine_syntax("-draft notes"), "-draft notes");
        assert_eq!(to_engine_syntax(r#""std\:\:vec" push"#), r#""std::vec" push"#);
        assert_eq!(to_engine_syntax(r#""say \"hi\"""#), r#""say \"hi\"""#);
        assert_eq!(to_engine_syntax("vector push"), "vector push");
    }

    #[test]
    fn test_sanitized_operators_parse() {
        let index = Index::create_in_ram(build_schema(&SchemaConfig::default()));
        let engine =
            TantivyEngine::from_index(index, &AppConfig::default(), dictionary()).unwrap();
        let sanitizer = QuerySanitizer::new();

        for raw in [
            "std::vec",
            "foo(bar)",
            "title:rust",
            "x[1]{2}",
            "a+b-c!d^e*f?g",
            "a && b || c",
            "::root",
            "(grouped)",
            "-draft notes",
            "\"std::vec\" push",
        ] {
            let sanitized = sanitizer.sanitize(raw).unwrap();
            assert!(
                engine.parse_query(&sanitized).is_ok(),
                "{raw:?} sanitized to {sanitized:?} did not parse"
            );
        }
    }

    #[test]
    fn test_schema_fields() {
        let schema = build_schema(&SchemaConfig::default());
        for name in ["title", "headers", "signature", "description", "example"] {
            let field = schema.get_field(name).unwrap();
            assert!(schema.get_field_entry(field).is_stored());
        }
    }
}

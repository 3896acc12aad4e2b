//! Analyzer preset used for document fields.
//!
//! # Pipeline
//!
//! 1. UnicodeWordTokenizer (or any other [`Tokenizer`])
//! 2. LowercaseFilter
//! 3. SynonymFilter (stacked synonyms, increment 0)
//! 4. StemFilter (English, optional)
//!
//! Stemming runs after expansion so that synonyms are normalized the same way
//! as the words a user types.

use std::fmt;
use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::synonym::SynonymDictionary;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{LowercaseFilter, StemFilter, SynonymFilter};
use crate::analysis::tokenizer::{Tokenizer, UnicodeWordTokenizer};
use crate::error::Result;

/// Word tokenizer + lowercase + synonym expansion (+ stemming).
#[derive(Clone)]
pub struct SynonymAnalyzer {
    inner: PipelineAnalyzer,
    tokenizer: Arc<dyn Tokenizer>,
    dictionary: Arc<SynonymDictionary>,
    stem: bool,
}

impl SynonymAnalyzer {
    /// Create the analyzer with the word tokenizer and stemming enabled.
    pub fn new(dictionary: Arc<SynonymDictionary>) -> Self {
        Self::build(Arc::new(UnicodeWordTokenizer::new()), dictionary, true)
    }

    /// Enable or disable the stemming stage.
    pub fn with_stemming(self, stem: bool) -> Self {
        Self::build(self.tokenizer, self.dictionary, stem)
    }

    /// Replace the tokenizer that feeds the filter chain.
    pub fn with_tokenizer(self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self::build(tokenizer, self.dictionary, self.stem)
    }

    /// The same pipeline minus the synonym stage.
    ///
    /// Used on the query side when expansion already happened at index time.
    pub fn without_expansion(&self) -> PipelineAnalyzer {
        Self::pipeline(Arc::clone(&self.tokenizer), None, self.stem).with_name("synonym_query")
    }

    /// Get the inner pipeline analyzer.
    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }

    /// The dictionary used for expansion.
    pub fn dictionary(&self) -> &Arc<SynonymDictionary> {
        &self.dictionary
    }

    fn build(tokenizer: Arc<dyn Tokenizer>, dictionary: Arc<SynonymDictionary>, stem: bool) -> Self {
        let inner =
            Self::pipeline(Arc::clone(&tokenizer), Some(&dictionary), stem).with_name("synonym");
        SynonymAnalyzer {
            inner,
            tokenizer,
            dictionary,
            stem,
        }
    }

    fn pipeline(
        tokenizer: Arc<dyn Tokenizer>,
        dictionary: Option<&Arc<SynonymDictionary>>,
        stem: bool,
    ) -> PipelineAnalyzer {
        let mut pipeline = PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(LowercaseFilter::new()));
        if let Some(dictionary) = dictionary {
            pipeline = pipeline.add_filter(Arc::new(SynonymFilter::new(Arc::clone(dictionary))));
        }
        if stem {
            pipeline = pipeline.add_filter(Arc::new(StemFilter::new()));
        }
        pipeline
    }
}

impl fmt::Debug for SynonymAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SynonymAnalyzer")
            .field("tokenizer", &self.tokenizer.name())
            .field("entries", &self.dictionary.len())
            .field("stem", &self.stem)
            .finish()
    }
}

impl Analyzer for SynonymAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "synonym"
    }
}

//! Text analysis: tokenization, filtering and synonym expansion.
//!
//! The same analyzers feed both the index builder and the query parser, so the
//! terms produced at indexing time line up with the terms a query asks for.

pub mod analyzer;
pub mod synonym;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, PipelineAnalyzer, SynonymAnalyzer};
pub use synonym::SynonymDictionary;
pub use token::{Token, TokenStream};
pub use token_filter::{Filter, SynonymFilter, SynonymTokenStream};
pub use tokenizer::Tokenizer;

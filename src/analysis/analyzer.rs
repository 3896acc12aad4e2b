//! Analyzers that combine a tokenizer with a chain of filters.
//!
//! ```text
//! Raw Text -> Analyzer -> Token Stream -> indexer / query parser
//!               |
//!           Tokenizer -> Filter 1 -> ... -> Filter N
//! ```
//!
//! # Available Implementations
//!
//! - [`PipelineAnalyzer`] - Custom tokenizer + filter chains
//! - [`SynonymAnalyzer`] - Word tokenizer, lowercasing, synonym expansion and
//!   optional stemming

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so one analyzer can serve every field of
/// an index writer.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod pipeline;
pub mod synonym;

pub use pipeline::PipelineAnalyzer;
pub use synonym::SynonymAnalyzer;

//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of an analysis pipeline: they break raw text
//! into a [`TokenStream`]. Filters and synonym expansion run on what they emit.
//!
//! # Available Tokenizers
//!
//! - [`UnicodeWordTokenizer`] - Uses Unicode word boundaries
//! - [`RegexTokenizer`] - Custom regex-based tokenization
//!
//! # Examples
//!
//! ```
//! use synsearch::analysis::tokenizer::Tokenizer;
//! use synsearch::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
//!
//! let tokenizer = UnicodeWordTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so that a pipeline can be shared by
/// reference between indexing threads.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod regex;
pub mod unicode_word;

pub use self::regex::RegexTokenizer;
pub use unicode_word::UnicodeWordTokenizer;

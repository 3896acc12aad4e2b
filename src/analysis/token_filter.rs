//! Token filter implementations for token transformation.
//!
//! Filters wrap a [`TokenStream`] and produce a new one. They run lazily: a
//! token is only pulled from upstream when the downstream consumer asks for
//! the next one.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`stem::StemFilter`] - Reduces words to their stem form
//! - [`synonym::SynonymFilter`] - Stacks dictionary synonyms after each term
//!
//! # Examples
//!
//! ```
//! use synsearch::analysis::token_filter::Filter;
//! use synsearch::analysis::token_filter::lowercase::LowercaseFilter;
//! use synsearch::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello"), Token::new("WORLD")];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod stem;
pub mod synonym;

pub use lowercase::LowercaseFilter;
pub use stem::StemFilter;
pub use synonym::{SynonymFilter, SynonymTokenStream};

//! Stemming token filter backed by the Snowball stemmers in `rust-stemmers`.

use std::fmt;
use std::sync::Arc;

use rust_stemmers::{Algorithm, Stemmer};

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Filter that reduces each token to its stem.
#[derive(Clone)]
pub struct StemFilter {
    stemmer: Arc<Stemmer>,
    algorithm: Algorithm,
}

impl StemFilter {
    /// Create a new stem filter with the English Snowball stemmer.
    pub fn new() -> Self {
        Self::with_algorithm(Algorithm::English)
    }

    /// Create a stem filter for another Snowball language.
    pub fn with_algorithm(algorithm: Algorithm) -> Self {
        StemFilter {
            stemmer: Arc::new(Stemmer::create(algorithm)),
            algorithm,
        }
    }
}

impl Default for StemFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StemFilter")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl Filter for StemFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stemmer = Arc::clone(&self.stemmer);
        Ok(Box::new(tokens.map(move |token| {
            let stemmed = stemmer.stem(&token.text).into_owned();
            token.with_text(stemmed)
        })))
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}

//! Synonym-expanding token stream.
//!
//! [`SynonymTokenStream`] wraps an upstream stream and passes every token
//! through unchanged. When a token's lowercased text has dictionary entries,
//! one extra token per synonym follows it immediately. The extra tokens copy
//! the original's offsets and carry `position_increment = 0`, so phrase and
//! proximity scoring see them as alternatives in the same slot rather than as
//! additional words.
//!
//! ```text
//! upstream:  fast(1, 0..4)  car(1, 5..8)
//! dictionary: car -> [auto, automobile]
//! output:    fast(1, 0..4)  car(1, 5..8)  auto(0, 5..8)  automobile(0, 5..8)
//! ```
//!
//! Synonyms equal to the original term, and repeated synonyms, are emitted
//! as they appear in the dictionary.

use std::iter::FusedIterator;
use std::sync::Arc;

use crate::analysis::synonym::SynonymDictionary;
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

enum ExpansionState {
    /// No pending synonyms; the next pull goes upstream.
    Idle,
    /// Emitting `synonyms[index..]` for the span of the last upstream token.
    Expanding {
        start_offset: usize,
        end_offset: usize,
        synonyms: Vec<String>,
        index: usize,
    },
    /// Upstream is exhausted.
    Finished,
}

/// Pull-based token stream that stacks synonyms after each matching token.
pub struct SynonymTokenStream {
    upstream: TokenStream,
    dictionary: Arc<SynonymDictionary>,
    state: ExpansionState,
}

impl SynonymTokenStream {
    /// Wrap `upstream`, consulting `dictionary` for every token.
    pub fn new(upstream: TokenStream, dictionary: Arc<SynonymDictionary>) -> Self {
        SynonymTokenStream {
            upstream,
            dictionary,
            state: ExpansionState::Idle,
        }
    }

    fn pull_upstream(&mut self) -> Option<Token> {
        let Some(token) = self.upstream.next() else {
            self.state = ExpansionState::Finished;
            return None;
        };

        let synonyms = self.dictionary.lookup(&token.text.to_lowercase());
        if !synonyms.is_empty() {
            self.state = ExpansionState::Expanding {
                start_offset: token.start_offset,
                end_offset: token.end_offset,
                synonyms: synonyms.to_vec(),
                index: 0,
            };
        }
        Some(token)
    }
}

impl Iterator for SynonymTokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match std::mem::replace(&mut self.state, ExpansionState::Idle) {
            ExpansionState::Finished => {
                self.state = ExpansionState::Finished;
                None
            }
            ExpansionState::Idle => self.pull_upstream(),
            ExpansionState::Expanding {
                start_offset,
                end_offset,
                mut synonyms,
                index,
            } => {
                let text = std::mem::take(&mut synonyms[index]);
                let token = Token::with_offsets(text, start_offset, end_offset)
                    .with_position_increment(0);

                if index + 1 < synonyms.len() {
                    self.state = ExpansionState::Expanding {
                        start_offset,
                        end_offset,
                        synonyms,
                        index: index + 1,
                    };
                }
                Some(token)
            }
        }
    }
}

impl FusedIterator for SynonymTokenStream {}

/// Filter adapter that installs a [`SynonymTokenStream`] in a pipeline.
#[derive(Clone, Debug)]
pub struct SynonymFilter {
    dictionary: Arc<SynonymDictionary>,
}

impl SynonymFilter {
    /// Create a synonym filter sharing the given dictionary.
    pub fn new(dictionary: Arc<SynonymDictionary>) -> Self {
        SynonymFilter { dictionary }
    }

    /// The dictionary consulted by this filter.
    pub fn dictionary(&self) -> &SynonymDictionary {
        &self.dictionary
    }
}

impl Filter for SynonymFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(SynonymTokenStream::new(
            tokens,
            Arc::clone(&self.dictionary),
        )))
    }

    fn name(&self) -> &'static str {
        "synonym"
    }
}

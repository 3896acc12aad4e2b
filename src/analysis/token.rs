//! Token types for text analysis.
//!
//! A [`Token`] is the unit that flows through the analysis pipeline. It carries
//! no absolute position: each token only records how far it advances from the
//! previous one (`position_increment`). Stacked alternatives such as synonyms
//! use an increment of `0` and occupy the same slot as the token before them.
//!
//! ```text
//! Input: "fast car"   Dictionary: car -> [auto]
//!
//!   "fast" (inc=1, 0..4)
//!   "car"  (inc=1, 5..8)
//!   "auto" (inc=0, 5..8)   <- same slot and span as "car"
//! ```
//!
//! # Examples
//!
//! ```
//! use synsearch::analysis::token::Token;
//!
//! let token = Token::with_offsets("world", 6, 11);
//! assert_eq!(token.text, "world");
//! assert_eq!(token.position_increment, 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single analyzed token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,

    /// Position increment from the previous token (default: 1).
    ///
    /// - 1: next position
    /// - 0: same position as the previous token (synonyms)
    /// - >1: skipped positions
    pub position_increment: usize,
}

impl Token {
    /// Create a token with empty offsets.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Token {
            text: text.into(),
            start_offset: 0,
            end_offset: 0,
            position_increment: 1,
        }
    }

    /// Create a token spanning `[start_offset, end_offset)` of the source text.
    pub fn with_offsets<S: Into<String>>(text: S, start_offset: usize, end_offset: usize) -> Self {
        debug_assert!(start_offset <= end_offset);
        Token {
            text: text.into(),
            start_offset,
            end_offset,
            position_increment: 1,
        }
    }

    /// Get the length of the token text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Clone this token with updated text.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        let mut token = self.clone();
        token.text = text.into();
        token
    }

    /// Set the position increment.
    pub fn with_position_increment(mut self, increment: usize) -> Self {
        self.position_increment = increment;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A lazy, finite, non-restartable sequence of tokens.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Resolve position increments into absolute positions.
///
/// The first token lands on `increment - 1` (so a leading increment of 1 is
/// position 0); every later token lands on the previous position plus its
/// increment.
pub fn absolute_positions(tokens: &[Token]) -> Vec<usize> {
    let mut positions = Vec::with_capacity(tokens.len());
    let mut previous: Option<usize> = None;
    for token in tokens {
        let position = match previous {
            None => token.position_increment.saturating_sub(1),
            Some(p) => p + token.position_increment,
        };
        positions.push(position);
        previous = Some(position);
    }
    positions
}

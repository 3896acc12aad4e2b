//! Escaping of raw user input before it reaches the query grammar.
//!
//! The grammar treats a handful of characters as operators. A user typing
//! `std::vec` or `foo(bar)` means the literal text, so every operator
//! occurrence is escaped with a backslash, except one that starts the input:
//! a leading operator cannot form an ambiguous binary expression, so `-draft`
//! still negates.
//!
//! Input that is nothing but an operator (or a lone backslash) is rejected.
//!
//! # Examples
//!
//! ```
//! use synsearch::query::QuerySanitizer;
//!
//! let sanitizer = QuerySanitizer::new();
//! assert_eq!(sanitizer.sanitize("  std::vec ").unwrap(), r"std\:\:vec");
//! assert_eq!(sanitizer.sanitize("-draft notes").unwrap(), "-draft notes");
//! assert!(sanitizer.sanitize(":").is_err());
//! ```

use crate::error::{Result, SynsearchError};

/// The escape marker understood by the query grammar.
pub const ESCAPE: char = '\\';

/// Reserved operators, multi-character ones first so they win over their
/// single-character constituents.
pub const RESERVED_OPERATORS: &[&str] = &[
    "&&", "||", "::", ":", "(", ")", "[", "]", "{", "}", "+", "-", "!", "^", "*", "?",
];

/// Makes raw input safe for the query grammar.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuerySanitizer;

impl QuerySanitizer {
    /// Create a new sanitizer.
    pub fn new() -> Self {
        QuerySanitizer
    }

    /// Escape reserved operators in `raw`.
    ///
    /// Fails with [`SynsearchError::InvalidQuery`] when the input is empty or
    /// consists of a single reserved operator or the bare escape marker.
    /// Characters that are already escaped are copied verbatim, which makes
    /// sanitizing a sanitized string a no-op.
    pub fn sanitize(&self, raw: &str) -> Result<String> {
        let input = raw.trim();
        let mut output = String::with_capacity(input.len() + 8);
        let mut rest = input;
        let mut at_start = true;

        while let Some(c) = rest.chars().next() {
            let consumed = if c == ESCAPE {
                let escaped_len = rest[c.len_utf8()..]
                    .chars()
                    .next()
                    .map_or(0, char::len_utf8);
                let len = c.len_utf8() + escaped_len;
                output.push_str(&rest[..len]);
                len
            } else if let Some(operator) = Self::operator_at(rest) {
                if at_start {
                    output.push_str(operator);
                } else {
                    for ch in operator.chars() {
                        output.push(ESCAPE);
                        output.push(ch);
                    }
                }
                operator.len()
            } else {
                output.push(c);
                c.len_utf8()
            };

            rest = &rest[consumed..];
            at_start = false;
        }

        if output.is_empty() {
            return Err(SynsearchError::invalid_query("empty query"));
        }
        if Self::is_degenerate(&output) {
            return Err(SynsearchError::invalid_query(output));
        }

        Ok(output.trim().to_string())
    }

    /// Whether `text` is exactly one reserved operator or the escape marker.
    pub fn is_degenerate(text: &str) -> bool {
        let mut chars = text.chars();
        let lone_escape = chars.next() == Some(ESCAPE) && chars.next().is_none();
        lone_escape || RESERVED_OPERATORS.iter().any(|operator| *operator == text)
    }

    fn operator_at(text: &str) -> Option<&'static str> {
        RESERVED_OPERATORS
            .iter()
            .copied()
            .find(|operator| text.starts_with(operator))
    }
}

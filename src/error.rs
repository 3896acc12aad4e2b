//! Error types for synsearch.
//!
//! Every fallible operation in the crate returns [`Result`], whose error side is
//! the [`SynsearchError`] enum. The first group of variants mirrors the failure
//! modes a user can run into during an interactive session; the rest carry
//! plumbing failures (I/O, JSON, the tantivy backend).
//!
//! # Examples
//!
//! ```
//! use synsearch::error::{Result, SynsearchError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SynsearchError::invalid_query(":"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for synsearch operations.
#[derive(Error, Debug)]
pub enum SynsearchError {
    /// The sanitizer rejected degenerate input (a bare operator or escape marker).
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The query parser rejected the sanitized text.
    #[error("Query syntax error: {0}")]
    QuerySyntax(String),

    /// The search backend failed while searching or fetching a document.
    #[error("Search engine failure: {0}")]
    SearchEngine(String),

    /// A synonym source exists but could not be parsed.
    #[error("Malformed synonym source: {0}")]
    MalformedDictionarySource(String),

    /// A page navigation token could not be understood.
    #[error("Invalid navigation input: {0}")]
    InvalidNavigationInput(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (file operations, terminal, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors raised by the tantivy backend
    #[error("Index error: {0}")]
    Tantivy(#[from] tantivy::TantivyError),
}

/// Result type alias for operations that may fail with SynsearchError.
pub type Result<T> = std::result::Result<T, SynsearchError>;

impl SynsearchError {
    /// Create a new invalid query error.
    pub fn invalid_query<S: Into<String>>(msg: S) -> Self {
        SynsearchError::InvalidQuery(msg.into())
    }

    /// Create a new query syntax error.
    pub fn query_syntax<S: Into<String>>(msg: S) -> Self {
        SynsearchError::QuerySyntax(msg.into())
    }

    /// Create a new search engine error.
    pub fn search_engine<S: Into<String>>(msg: S) -> Self {
        SynsearchError::SearchEngine(msg.into())
    }

    /// Create a new malformed dictionary error.
    pub fn malformed_dictionary<S: Into<String>>(msg: S) -> Self {
        SynsearchError::MalformedDictionarySource(msg.into())
    }

    /// Create a new navigation error.
    pub fn invalid_navigation<S: Into<String>>(msg: S) -> Self {
        SynsearchError::InvalidNavigationInput(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SynsearchError::Analysis(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SynsearchError::Config(msg.into())
    }

    /// Whether this error only invalidates the current query.
    ///
    /// The interactive session reports these and keeps accepting queries;
    /// anything else (terminal I/O, for instance) ends the session.
    pub fn is_query_scoped(&self) -> bool {
        matches!(
            self,
            SynsearchError::InvalidQuery(_)
                | SynsearchError::QuerySyntax(_)
                | SynsearchError::SearchEngine(_)
                | SynsearchError::Tantivy(_)
                | SynsearchError::InvalidNavigationInput(_)
        )
    }
}

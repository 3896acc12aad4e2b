//! # synsearch
//!
//! Synonym-aware full-text search over JSON document dumps.
//!
//! ## Features
//!
//! - Analysis pipeline that stacks dictionary synonyms on the position of the
//!   word they expand
//! - Query sanitizing that escapes reserved query operators
//! - Interactive, page-at-a-time browsing with progressive result collection
//! - Tantivy-backed index with per-field boosts

pub mod analysis;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod query;
pub mod session;

pub mod prelude {
    pub use crate::analysis::{Analyzer, SynonymAnalyzer, SynonymDictionary, Token, TokenStream};
    pub use crate::config::AppConfig;
    pub use crate::engine::{Hit, HitSet, SearchEngine, StoredDocument, TantivyEngine};
    pub use crate::error::{Result, SynsearchError};
    pub use crate::query::QuerySanitizer;
    pub use crate::session::{Console, LineConsole, ResultPager, SearchSession};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

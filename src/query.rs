//! Query-side helpers that run before and around the query grammar.

pub mod navigation;
pub mod sanitizer;

pub use navigation::{Navigation, PageNumber, parse_navigation, parse_page};
pub use sanitizer::QuerySanitizer;

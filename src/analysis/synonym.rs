//! Synonym dictionaries consulted by the synonym-expanding token stream.

pub mod dictionary;

pub use dictionary::SynonymDictionary;

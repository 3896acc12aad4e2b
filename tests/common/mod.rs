//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::Cursor;

use synsearch::engine::{Hit, HitSet, SearchEngine, StoredDocument};
use synsearch::error::{Result, SynsearchError};
use synsearch::session::LineConsole;

/// An in-memory engine whose every query matches `total` documents.
///
/// Document `i` is titled `Doc i`. The first search can be capped below the
/// requested capacity to simulate a collector that stops early.
pub struct ScriptedEngine {
    pub total: usize,
    pub first_cap: Option<usize>,
    pub searches: RefCell<Vec<usize>>,
    pub reject: Option<&'static str>,
    pub fail_fetch: bool,
}

impl ScriptedEngine {
    pub fn new(total: usize) -> Self {
        ScriptedEngine {
            total,
            first_cap: None,
            searches: RefCell::new(Vec::new()),
            reject: None,
            fail_fetch: false,
        }
    }

    pub fn with_first_cap(mut self, cap: usize) -> Self {
        self.first_cap = Some(cap);
        self
    }

    /// Queries containing `needle` fail to parse.
    pub fn rejecting(mut self, needle: &'static str) -> Self {
        self.reject = Some(needle);
        self
    }

    pub fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    pub fn capacities(&self) -> Vec<usize> {
        self.searches.borrow().clone()
    }
}

impl SearchEngine for ScriptedEngine {
    type Query = String;
    type DocId = usize;

    fn parse_query(&self, text: &str) -> Result<String> {
        match self.reject {
            Some(needle) if text.contains(needle) => {
                Err(SynsearchError::query_syntax(format!("cannot parse {text}")))
            }
            _ => Ok(text.to_string()),
        }
    }

    fn search(&self, _query: &String, capacity: usize) -> Result<HitSet<usize>> {
        let mut searches = self.searches.borrow_mut();
        let limit = match self.first_cap {
            Some(cap) if searches.is_empty() => cap,
            _ => usize::MAX,
        };
        searches.push(capacity);

        let count = capacity.min(self.total).min(limit);
        let hits = (0..count)
            .map(|doc| Hit {
                doc,
                score: 1.0 / (doc + 1) as f32,
            })
            .collect();
        Ok(HitSet::new(self.total, hits))
    }

    fn fetch_document(&self, doc: usize) -> Result<StoredDocument> {
        if self.fail_fetch {
            return Err(SynsearchError::search_engine("stored fields unavailable"));
        }
        Ok(StoredDocument::new()
            .with_field("title", format!("Doc {doc}"))
            .with_field("signature", format!("fn doc_{doc}()")))
    }
}

pub type ScriptedConsole = LineConsole<Cursor<String>, Vec<u8>>;

/// A console that replays `input` line by line and records everything printed.
pub fn console(input: &str) -> ScriptedConsole {
    LineConsole::new(Cursor::new(input.to_string()), Vec::new())
}

pub fn transcript(console: ScriptedConsole) -> String {
    String::from_utf8(console.into_output()).unwrap()
}

/// Ranks of the result lines (`N. Doc i`) in the order they were printed.
///
/// Prompts are not followed by a newline in the transcript, so a result line
/// may share a line with the preceding prompt.
pub fn result_ranks(transcript: &str) -> Vec<usize> {
    transcript
        .match_indices(". Doc ")
        .filter_map(|(pos, _)| {
            let prefix = &transcript[..pos];
            let digits_start = prefix
                .rfind(|c: char| !c.is_ascii_digit())
                .map_or(0, |i| i + 1);
            prefix[digits_start..].parse().ok()
        })
        .collect()
}

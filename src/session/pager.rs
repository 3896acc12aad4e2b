//! Page-at-a-time browsing of ranked results.
//!
//! The first search over-fetches `page_size * overfetch_factor` hits. When a
//! page needs hits beyond what was materialized, the user is asked whether to
//! collect the rest; declining ends browsing. After each page the user can
//! move to the previous or next page, jump to a page number or quit.
//!
//! ```text
//! Fetching -> Displaying -> AwaitingNavigation -> Displaying -> ...
//!                ^   \                 \
//!                |    `-> Done          `-> Done (quit / end of input)
//!      AwaitingMoreDecision (window beyond materialized hits)
//! ```

use log::debug;

use crate::config::{InvalidNavigationPolicy, PagerConfig};
use crate::engine::{Hit, HitSet, SearchEngine};
use crate::error::Result;
use crate::query::navigation::{Navigation, parse_navigation};
use crate::session::answered_no;
use crate::session::console::Console;

/// How browsing of one query ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowseOutcome {
    /// Every match fit on one page; no navigation was offered.
    SinglePage,
    /// The user quit from the navigation prompt.
    Quit,
    /// The user declined to collect more results.
    Declined,
    /// Input ended while a prompt was waiting.
    EndOfInput,
}

enum Step {
    Goto(usize),
    Stop(BrowseOutcome),
}

/// Drives the paging state machine for a single query.
pub struct ResultPager<'a, E: SearchEngine> {
    engine: &'a E,
    config: &'a PagerConfig,
}

impl<'a, E: SearchEngine> ResultPager<'a, E> {
    pub fn new(engine: &'a E, config: &'a PagerConfig) -> Self {
        ResultPager { engine, config }
    }

    /// Run `query` and let the user browse its results.
    ///
    /// Engine failures are returned to the caller; nothing is retried.
    pub fn browse<C: Console>(&self, query: &E::Query, console: &mut C) -> Result<BrowseOutcome> {
        let page_size = self.config.page_size;
        let capacity = self.config.initial_capacity();
        let mut hits = self.engine.search(query, capacity)?;
        let total = hits.total_matches;
        debug!(
            "Search with capacity {capacity} matched {total}, materialized {}",
            hits.hits.len()
        );
        console.print_line(&format!("{total} total matching documents"))?;

        let mut start: usize = 0;
        loop {
            let end = total.min(start.saturating_add(page_size));
            if end > hits.hits.len() {
                console.print_line(&format!(
                    "Only results 1 - {} of {total} total matching documents collected.",
                    hits.hits.len()
                ))?;
                match console.read_line("Collect more (y/n)? ")? {
                    None => return Ok(BrowseOutcome::EndOfInput),
                    Some(answer) if answered_no(&answer) => return Ok(BrowseOutcome::Declined),
                    Some(_) => {
                        hits = self.engine.search(query, total)?;
                        debug!("Re-fetched {} of {total} hits", hits.hits.len());
                    }
                }
            }

            self.display_window(&hits, start, end, console)?;

            if total <= page_size {
                return Ok(BrowseOutcome::SinglePage);
            }

            match self.navigate(start, total, console)? {
                Step::Goto(next_start) => start = next_start,
                Step::Stop(outcome) => return Ok(outcome),
            }
        }
    }

    fn display_window<C: Console>(
        &self,
        hits: &HitSet<E::DocId>,
        start: usize,
        end: usize,
        console: &mut C,
    ) -> Result<()> {
        let end = end.min(hits.hits.len());
        let window = hits.hits.get(start..end).unwrap_or(&[]);
        for (offset, hit) in window.iter().enumerate() {
            self.display_hit(start + offset, hit, console)?;
        }
        Ok(())
    }

    fn display_hit<C: Console>(&self, index: usize, hit: &Hit<E::DocId>, console: &mut C) -> Result<()> {
        let document = self.engine.fetch_document(hit.doc)?;
        let mut fields = self.config.display_fields.iter();

        let heading = fields
            .next()
            .and_then(|name| document.get(name))
            .unwrap_or_default();
        console.print_line(&format!("{}. {heading}", index + 1))?;

        for name in fields {
            if let Some(value) = document.get(name) {
                console.print_line(&format!("   {name}: {value}"))?;
            }
        }
        Ok(())
    }

    /// Prompt until the user picks a valid page or stops browsing.
    fn navigate<C: Console>(&self, start: usize, total: usize, console: &mut C) -> Result<Step> {
        let page_size = self.config.page_size;
        let has_previous = start >= page_size;
        let has_next = start + page_size < total;

        loop {
            let mut prompt = String::from("Press ");
            if has_previous {
                prompt.push_str("(p)revious page, ");
            }
            if has_next {
                prompt.push_str("(n)ext page, ");
            }
            prompt.push_str("(q)uit or enter number to jump to a page: ");

            let Some(answer) = console.read_line(&prompt)? else {
                return Ok(Step::Stop(BrowseOutcome::EndOfInput));
            };

            match parse_navigation(&answer) {
                Ok(Navigation::Quit) => return Ok(Step::Stop(BrowseOutcome::Quit)),
                Ok(Navigation::Previous) if has_previous => return Ok(Step::Goto(start - page_size)),
                Ok(Navigation::Next) if has_next => return Ok(Step::Goto(start + page_size)),
                Ok(Navigation::Previous) => console.print_line("Already on the first page")?,
                Ok(Navigation::Next) => console.print_line("Already on the last page")?,
                Ok(Navigation::Jump(page)) => match page.window_start(page_size) {
                    Some(window_start) if window_start < total => return Ok(Step::Goto(window_start)),
                    _ => console.print_line("No such page")?,
                },
                Err(e) => match self.config.on_invalid_navigation {
                    InvalidNavigationPolicy::Reprompt => console.print_line(&e.to_string())?,
                    InvalidNavigationPolicy::Quit => return Ok(Step::Stop(BrowseOutcome::Quit)),
                },
            }
        }
    }
}

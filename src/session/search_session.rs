//! The read-eval loop: prompt for a query, sanitize, parse, browse, repeat.

use log::{debug, info};

use crate::config::PagerConfig;
use crate::engine::SearchEngine;
use crate::error::{Result, SynsearchError};
use crate::query::QuerySanitizer;
use crate::session::answered_no;
use crate::session::console::Console;
use crate::session::pager::ResultPager;

/// Counters collected over one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Queries that reached the engine and were browsed.
    pub searches: usize,
    /// Inputs rejected by the sanitizer.
    pub rejected: usize,
    /// Queries abandoned because parsing or the engine failed.
    pub failed: usize,
}

/// An interactive search session over one engine.
///
/// The session ends when the user declines another query or input runs out.
/// Failures scoped to one query are printed and the loop goes on; anything
/// else (a broken terminal, for instance) is returned.
pub struct SearchSession<'a, E: SearchEngine, C: Console> {
    engine: &'a E,
    console: C,
    sanitizer: QuerySanitizer,
    pager: PagerConfig,
    stats: SessionStats,
}

impl<'a, E: SearchEngine, C: Console> SearchSession<'a, E, C> {
    pub fn new(engine: &'a E, console: C, pager: PagerConfig) -> Self {
        SearchSession {
            engine,
            console,
            sanitizer: QuerySanitizer::new(),
            pager,
            stats: SessionStats::default(),
        }
    }

    /// Run until the user is done.
    pub fn run(&mut self) -> Result<SessionStats> {
        loop {
            let Some(line) = self.console.read_line("Enter query: ")? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            match self.run_query(&line) {
                Ok(()) => self.stats.searches += 1,
                Err(e @ SynsearchError::InvalidQuery(_)) => {
                    self.stats.rejected += 1;
                    self.console.print_line(&e.to_string())?;
                    continue;
                }
                Err(e) if e.is_query_scoped() => {
                    self.stats.failed += 1;
                    self.console.print_line(&e.to_string())?;
                }
                Err(e) => return Err(e),
            }

            match self
                .console
                .read_line("Do you want to make another query? (y/n): ")?
            {
                Some(choice) if !answered_no(&choice) => {}
                _ => break,
            }
        }

        info!(
            "Session finished: {} searches, {} rejected, {} failed",
            self.stats.searches, self.stats.rejected, self.stats.failed
        );
        Ok(self.stats)
    }

    /// Sanitize, parse and browse one query.
    pub fn run_query(&mut self, raw: &str) -> Result<()> {
        let sanitized = self.sanitizer.sanitize(raw)?;
        debug!("Sanitized {raw:?} to {sanitized:?}");
        let query = self.engine.parse_query(&sanitized)?;
        let outcome = ResultPager::new(self.engine, &self.pager).browse(&query, &mut self.console)?;
        debug!("Browsing ended: {outcome:?}");
        Ok(())
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Consume the session, returning its console.
    pub fn into_console(self) -> C {
        self.console
    }
}

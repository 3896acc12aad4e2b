//! Interactive query loop and result paging.

pub mod console;
pub mod pager;
pub mod search_session;

pub use console::{Console, LineConsole};
pub use pager::{BrowseOutcome, ResultPager};
pub use search_session::{SearchSession, SessionStats};

/// Whether a yes/no answer starts with `n`.
pub(crate) fn answered_no(answer: &str) -> bool {
    answer
        .trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'n'))
}

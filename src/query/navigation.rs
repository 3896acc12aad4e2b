//! Parsing of the page-navigation prompt answers.
//!
//! The pager accepts `p` (previous), `n` (next), `q` (quit) or a 1-based page
//! number. Only the first character is significant for the letter commands,
//! so `next` and `quit` work too.

use std::fmt;
use std::num::NonZeroUsize;

use crate::error::{Result, SynsearchError};

/// A 1-based page number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(NonZeroUsize);

impl PageNumber {
    /// Create a page number; `None` for page 0.
    pub fn new(page: usize) -> Option<Self> {
        NonZeroUsize::new(page).map(PageNumber)
    }

    /// The page number as shown to the user.
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Index of the first hit on this page, `None` on overflow.
    pub fn window_start(self, page_size: usize) -> Option<usize> {
        (self.get() - 1).checked_mul(page_size)
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A navigation command entered at the page prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Previous,
    Next,
    Quit,
    Jump(PageNumber),
}

/// Parse a page-jump token into a page number.
pub fn parse_page(token: &str) -> Result<PageNumber> {
    let token = token.trim();
    token
        .parse::<usize>()
        .ok()
        .and_then(PageNumber::new)
        .ok_or_else(|| SynsearchError::invalid_navigation(format!("not a page number: {token:?}")))
}

/// Parse a navigation prompt answer.
pub fn parse_navigation(token: &str) -> Result<Navigation> {
    let token = token.trim();
    match token.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('p') => Ok(Navigation::Previous),
        Some('n') => Ok(Navigation::Next),
        Some('q') => Ok(Navigation::Quit),
        _ => parse_page(token).map(Navigation::Jump),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_commands() {
        assert_eq!(parse_navigation("p").unwrap(), Navigation::Previous);
        assert_eq!(parse_navigation(" next ").unwrap(), Navigation::Next);
        assert_eq!(parse_navigation("Q").unwrap(), Navigation::Quit);
    }

    #[test]
    fn test_page_numbers() {
        let page = PageNumber::new(3).unwrap();
        assert_eq!(parse_navigation("3").unwrap(), Navigation::Jump(page));
        assert_eq!(page.window_start(10), Some(20));
        assert_eq!(page.to_string(), "3");
    }

    #[test]
    fn test_invalid_tokens() {
        for token in ["", "0", "-1", "x", "2.5", "99999999999999999999999"] {
            let err = parse_navigation(token).unwrap_err();
            assert!(
                matches!(err, SynsearchError::InvalidNavigationInput(_)),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_window_start_overflow() {
        let page = PageNumber::new(usize::MAX).unwrap();
        assert_eq!(page.window_start(10), None);
    }
}

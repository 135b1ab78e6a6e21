//! Case-insensitive literal substring matching.
//!
//! The query typed into the search box is escaped before it is compiled, so
//! `a.b` only matches the text `a.b` and never `axb`.

use log::warn;
use regex::{Regex, RegexBuilder};

/// A compiled search query.
///
/// # Example
///
/// ```
/// use tokenize::LiteralPattern;
///
/// let pattern = LiteralPattern::new("a.b").unwrap();
/// assert!(pattern.is_match("A.B.C"));
/// assert!(!pattern.is_match("axb"));
/// assert!(LiteralPattern::new("  ").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct LiteralPattern {
    regex: Regex,
}

impl LiteralPattern {
    /// Compile a query. Returns `None` for a blank query.
    pub fn new(query: &str) -> Option<Self> {
        if query.trim().is_empty() {
            return None;
        }

        match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        {
            Ok(regex) => Some(Self { regex }),
            Err(err) => {
                // Escaped input always compiles unless it exceeds the size limit.
                warn!("Search pattern rejected: {}", err);
                None
            }
        }
    }

    /// Check whether a label contains the query.
    pub fn is_match(&self, label: &str) -> bool {
        self.regex.is_match(label)
    }
}

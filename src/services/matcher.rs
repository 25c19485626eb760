// src/services/matcher.rs

//! Literal phrase search over extracted page text.

use regex::{Regex, RegexBuilder};

use crate::error::Result;
use crate::models::MatchRecord;

/// Chars of context kept either side of a match.
const SNIPPET_RADIUS: usize = 120;

/// Case-insensitive literal search over the configured phrases.
///
/// Terms are regex-escaped before compilation, so `notice (no. 2)` matches
/// itself and nothing else.
pub struct TermMatcher {
    terms: Vec<(String, Regex)>,
}

impl TermMatcher {
    /// Compile the configured terms.
    pub fn new(terms: &[String]) -> Result<Self> {
        let mut compiled = Vec::with_capacity(terms.len());
        for term in terms {
            let pattern = RegexBuilder::new(&regex::escape(term))
                .case_insensitive(true)
                .build()?;
            compiled.push((term.clone(), pattern));
        }
        Ok(Self { terms: compiled })
    }

    /// Find every occurrence of every term.
    ///
    /// Output order is a contract the digest relies on: ascending page, then
    /// terms in configured order, then occurrences left to right. A term that
    /// is a substring of another is still reported independently.
    pub fn find_matches(&self, pages: &[String]) -> Vec<MatchRecord> {
        let mut records = Vec::new();
        for (index, text) in pages.iter().enumerate() {
            let page = index + 1;
            for (term, pattern) in &self.terms {
                for found in pattern.find_iter(text) {
                    records.push(MatchRecord {
                        term: term.clone(),
                        page,
                        snippet: snippet_around(text, found.start(), found.end()),
                    });
                }
            }
        }
        records
    }
}

/// Window of up to `SNIPPET_RADIUS` chars either side of `[start, end)`,
/// clamped to the text bounds, line breaks flattened to single spaces.
///
/// The window is measured in chars, not bytes, so it can never split a
/// multibyte sequence.
fn snippet_around(text: &str, start: usize, end: usize) -> String {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(SNIPPET_RADIUS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let to = text[end..]
        .char_indices()
        .nth(SNIPPET_RADIUS)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());

    text[from..to]
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

//! Match data structures.

use serde::{Deserialize, Serialize};

/// One occurrence of a search term inside a gazette document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchRecord {
    /// The configured phrase that matched
    pub term: String,

    /// 1-based page number the match was found on
    pub page: usize,

    /// Surrounding text, flattened to a single line
    pub snippet: String,
}

/// All matches found in one gazette document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    /// Source URL the document was downloaded from
    pub url: String,

    /// Local filename the document was stored under
    pub filename: String,

    /// Matches in page, then term, then occurrence order
    pub matches: Vec<MatchRecord>,
}

impl Finding {
    /// Total number of matches in this document.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

/// Phase definitions for the per-category scrape loop
///
/// Each selected category walks the same loop: fetch a listing page, parse
/// it, write the admitted rows, then either advance to the next page or
/// finish.
use std::fmt;

/// Represents the current phase of a category in the scrape loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryPhase {
    /// Category is selected but its first page has not been requested yet
    Pending,

    /// A listing page request is in flight
    Fetching,

    /// A fetched document is being parsed into raw quote tuples
    Parsing,

    /// Admitted records are being appended to the sinks
    Writing,

    /// Category finished: last page reached, page limit hit, or fetch failed
    Done,
}

impl CategoryPhase {
    /// Returns true if this is the terminal phase (no further pages fetched)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if the transition to `next` is part of the scrape loop
    ///
    /// The loop is `Pending -> Fetching -> Parsing -> Writing`, after which
    /// the category either loops back to `Fetching` or finishes. `Done` is
    /// additionally reachable straight from `Fetching` (failed request).
    pub fn can_transition(&self, next: CategoryPhase) -> bool {
        matches!(
            (*self, next),
            (Self::Pending, Self::Fetching)
                | (Self::Fetching, Self::Parsing)
                | (Self::Fetching, Self::Done)
                | (Self::Parsing, Self::Writing)
                | (Self::Writing, Self::Fetching)
                | (Self::Writing, Self::Done)
        )
    }

    /// Short lowercase label used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Parsing => "parsing",
            Self::Writing => "writing",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CategoryPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

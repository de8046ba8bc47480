//! Stages of a single analysis run
//!
//! The orchestrator walks these in order and checks every step, so a run can
//! never skip from validation straight to scoring.

use std::fmt;

/// Current stage of one analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisStage {
    // ===== Active Stages =====
    /// Nothing has happened yet
    Idle,

    /// The target URL is being checked and normalized
    Validating,

    /// Looking for a fresh cached result
    CacheCheck,

    /// The page is being fetched
    Fetching,

    /// The body is being parsed into a document
    Parsing,

    /// The envelope is being built and the scorers run
    Scoring,

    /// The result is being written to the cache
    Caching,

    // ===== Terminal Stages =====
    /// A result was returned (fresh or cached)
    Done,

    /// The run failed with an error
    Errored,
}

impl AnalysisStage {
    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Errored)
    }

    /// Returns true if the run ended with a result
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if moving from `self` to `next` is a legal step
    ///
    /// `Errored` is reachable from `Validating` and `Fetching` only; a fresh
    /// cache hit goes straight from `CacheCheck` to `Done`.
    pub fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Validating)
                | (Self::Validating, Self::CacheCheck)
                | (Self::Validating, Self::Errored)
                | (Self::CacheCheck, Self::Fetching)
                | (Self::CacheCheck, Self::Done)
                | (Self::Fetching, Self::Parsing)
                | (Self::Fetching, Self::Errored)
                | (Self::Parsing, Self::Scoring)
                | (Self::Scoring, Self::Caching)
                | (Self::Caching, Self::Done)
        )
    }

    /// Lowercase name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::CacheCheck => "cache_check",
            Self::Fetching => "fetching",
            Self::Parsing => "parsing",
            Self::Scoring => "scoring",
            Self::Caching => "caching",
            Self::Done => "done",
            Self::Errored => "errored",
        }
    }
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

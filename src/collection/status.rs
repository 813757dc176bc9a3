use serde::Serialize;
use std::fmt;

/// Fetch status of a collection. Exactly one value is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    /// Not evaluated yet.
    #[default]
    Uninitialized,
    Fetching,
    Complete,
    FetchFailed,
    TokenRequired,
    ContextRequired,
}

/// Orchestrator events driving `FetchStatus::transition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    /// Inputs were (re)evaluated; any cached collection is invalid.
    Evaluate,
    /// The next page was requested on top of a complete collection.
    PageRequested,
    Succeeded,
    Failed,
    CredentialMissing,
    ScopeMissing,
}

impl FetchStatus {
    /// Next status for `event`. Events that don't apply leave it unchanged.
    pub fn transition(self, event: StatusEvent) -> FetchStatus {
        use FetchStatus::*;
        use StatusEvent::*;

        match (self, event) {
            (_, Evaluate) => Fetching,
            (Complete, PageRequested) => Fetching,
            (Fetching, Succeeded) => Complete,
            (Fetching, Failed) => FetchFailed,
            (Fetching, CredentialMissing) => TokenRequired,
            (Fetching, ScopeMissing) => ContextRequired,
            (status, _) => status,
        }
    }

    /// True while a request may still change the collection.
    pub fn is_pending(self) -> bool {
        self == FetchStatus::Fetching
    }
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FetchStatus::Uninitialized => "uninitialized",
            FetchStatus::Fetching => "fetching",
            FetchStatus::Complete => "complete",
            FetchStatus::FetchFailed => "fetch failed",
            FetchStatus::TokenRequired => "token required",
            FetchStatus::ContextRequired => "context required",
        };
        f.write_str(label)
    }
}

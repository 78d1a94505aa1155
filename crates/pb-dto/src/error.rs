use serde::Deserialize;
use serde::Serialize;

/// Structured errors surfaced to callers. Never aborts the process; an
/// operation that errors has not mutated session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", content = "detail", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiError {
    /// Malformed request: unparseable field, out-of-range bankroll.
    BadInput(String),
    /// Syntactically shaped like a card but not one.
    BadCard(String),
    /// Rules or tables failed validation at load.
    BadRules(String),
    /// Operation not available in this session's mode.
    WrongMode(String),
    /// Operation invalid in the current orchestrator state.
    WrongState(String),
    /// Action not legal for the current hand. Does not consume a turn.
    IllegalAction(String),
    /// Draw or observation past the end of the shoe. Recover with shuffle.
    ShoeExhausted,
    /// Referenced session does not exist.
    SessionGone,
    /// Concurrent operation denied.
    SessionBusy,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadInput(s) => write!(f, "bad input: {}", s),
            Self::BadCard(s) => write!(f, "bad card: {}", s),
            Self::BadRules(s) => write!(f, "bad rules: {}", s),
            Self::WrongMode(s) => write!(f, "wrong mode: {}", s),
            Self::WrongState(s) => write!(f, "wrong state: {}", s),
            Self::IllegalAction(s) => write!(f, "illegal action: {}", s),
            Self::ShoeExhausted => write!(f, "shoe exhausted"),
            Self::SessionGone => write!(f, "no such session"),
            Self::SessionBusy => write!(f, "session busy"),
        }
    }
}

impl std::error::Error for ApiError {}

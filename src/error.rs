/// Errors raised by the analysis core.
///
/// Parsers never fail; only orchestration does (missing repository,
/// invalid time range, unknown mode, bad configuration, a failing log
/// source). Each variant renders its own user-facing message.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Not a git repository. Please run this command in a git repository.")]
    NotARepository,

    #[error(transparent)]
    InvalidTimeRange(#[from] TimeRangeError),

    #[error("Unknown analysis mode: {0} (expected one of: aggregate, periodic, ownership)")]
    UnknownMode(String),

    #[error("Unknown period unit: {0} (expected one of: daily, weekly, monthly)")]
    UnknownPeriodUnit(String),

    #[error("invalid exclude pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("git log failed: {0}")]
    LogSource(#[from] LogSourceError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Time range validation failures, detected before any log is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TimeRangeError {
    #[error("--since date must be before --until date")]
    SinceAfterUntil,
    #[error("--since date cannot be in the future")]
    SinceInFuture,
    #[error("--until date cannot be in the future")]
    UntilInFuture,
}

/// Failure reported by a log source. Only the message is significant:
/// the orchestrator inspects it to recognise an empty history.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LogSourceError {
    pub message: String,
}

/// Marker git uses when a branch has no commits yet.
pub const NO_COMMITS_MARKER: &str = "does not have any commits";

impl LogSourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn is_no_commits(&self) -> bool {
        self.message.contains(NO_COMMITS_MARKER)
    }
}

impl From<git2::Error> for LogSourceError {
    fn from(err: git2::Error) -> Self {
        Self::new(err.message())
    }
}

/// Failure of the "is this path ignored" oracle. Never surfaced: the
/// pattern filter logs it and treats every path as not ignored.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("gitignore: {0}")]
    Ignore(#[from] ignore::Error),
    #[error("git index: {0}")]
    Git(#[from] git2::Error),
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

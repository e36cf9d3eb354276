//! Failure modes of a goals generation attempt.
//!
//! None of these are fatal: every variant sends the wizard to the
//! offline questionnaire.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// No Claude API key in the environment or config file.
    #[error("ANTHROPIC_API_KEY not set")]
    CredentialMissing,

    /// Transport, HTTP or response parsing failure.
    #[error("Claude API error: {0}")]
    Service(String),

    #[error("Claude did not answer within {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("conversation reached {0} replies without producing GOALS.md")]
    TurnLimit(usize),

    /// The reply announced the document but carried no fenced markdown block.
    #[error("Claude announced GOALS.md but sent no ```markdown block")]
    MalformedDocument,

    #[error("conversation ended by user")]
    OperatorAbort,

    /// Reading from the terminal failed.
    #[error("input error: {0}")]
    Console(String),
}

impl GenerationError {
    /// Whether this was a deliberate choice rather than a failure.
    #[must_use]
    pub const fn is_intentional(&self) -> bool {
        matches!(self, Self::CredentialMissing | Self::OperatorAbort)
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        Self::Service(e.to_string())
    }
}

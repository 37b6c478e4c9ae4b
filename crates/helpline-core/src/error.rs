use thiserror::Error;

/// A convenience `Result` alias using [`HelplineError`].
pub type HelplineResult<T> = Result<T, HelplineError>;

/// Top-level error type for the Helpline orchestrator.
///
/// The variants follow the failure taxonomy of the system: configuration
/// errors are the only fatal kind and may abort startup; everything else is
/// absorbed at the event-handling boundary and must never take down the
/// dispatch loop or another user's session.
#[derive(Debug, Error)]
pub enum HelplineError {
    /// Missing or invalid mandatory configuration at startup. Fatal.
    #[error("Config error: {0}")]
    Config(String),

    /// An outbound send to a user or chat was rejected by the platform.
    /// Logged and skipped, never retried.
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// The translation provider failed. Callers fall back to the original
    /// text or the default language.
    #[error("Translation error: {0}")]
    Translation(String),

    /// Malformed user input (e.g. a bad wallet address). Triggers a reprompt
    /// of the same dialogue stage.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The caller lacks the privilege required for a command.
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// An error from the messaging-platform transport.
    #[error("Channel error: {0}")]
    Channel(String),

    /// An error related to session lookup or mutation.
    #[error("Session error: {0}")]
    Session(String),

    /// An error from an outbound HTTP request (e.g. the explorer lookup).
    #[error("HTTP error: {0}")]
    Http(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

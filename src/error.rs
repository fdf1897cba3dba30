use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the planner
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Validation error: {0}")]
    #[diagnostic(code(planner::validation))]
    Validation(String),

    #[error("Schedule generation failed: {0}")]
    #[diagnostic(code(planner::generation))]
    Generation(String),

    #[error("A schedule is already being generated")]
    #[diagnostic(code(planner::busy))]
    Busy,

    #[error("Editing error: {0}")]
    #[diagnostic(code(planner::editing))]
    Editing(String),

    #[error("Storage error: {0}")]
    #[diagnostic(code(planner::storage))]
    Storage(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(planner::config))]
    Config(String),

    #[error("HTTP error: {0}")]
    #[diagnostic(code(planner::http))]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    #[diagnostic(code(planner::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(planner::serialization))]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl Error {
    /// Message shown to the user, without the variant prefix
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(message)
            | Error::Generation(message)
            | Error::Editing(message)
            | Error::Config(message) => message.clone(),
            Error::Busy => t!("generation_busy").to_string(),
            other => other.to_string(),
        }
    }
}

/// Type alias for Result with our Error type
pub type PlannerResult<T> = Result<T, Error>;

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create validation errors
pub fn validation_error(message: &str) -> Error {
    Error::Validation(message.to_string())
}

/// Helper to create generation errors
pub fn generation_error(message: &str) -> Error {
    Error::Generation(message.to_string())
}

/// Helper to create editing errors
pub fn editing_error(message: &str) -> Error {
    Error::Editing(message.to_string())
}

/// Helper to create storage errors
pub fn storage_error(message: &str) -> Error {
    Error::Storage(message.to_string())
}

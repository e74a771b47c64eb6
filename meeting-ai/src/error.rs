//! Error types for meeting analysis operations.

use std::fmt;

/// Universal error type that abstracts provider-specific and parsing errors into common variants.
///
/// Provider implementations map their native failures onto the first group of variants.
/// The extraction and schema variants are produced by [`crate::extract`] and
/// [`crate::types::analysis`] while turning raw model text into an
/// [`crate::types::analysis::AnalysisResult`].
#[derive(Debug, PartialEq)]
pub enum Error {
    /// No API credential is configured for the completion provider.
    MissingCredential,

    /// The provider rejected the configured credential.
    Authentication(String),

    /// Network connectivity issues, DNS failures, or connection timeouts.
    Network(String),

    /// The provider answered with a non-success status.
    Provider(String),

    /// The provider response body could not be decoded.
    Deserialization(String),

    /// The model returned no text, or only whitespace.
    EmptyResponse,

    /// The model text does not contain a `{` character.
    NoJsonFound,

    /// A `{` was found but the brace depth never returned to zero.
    UnbalancedBraces,

    /// The located span is not a valid JSON object. Carries the parser message.
    MalformedJson(String),

    /// One or more of the required top-level keys are absent.
    MissingRequiredFields(Vec<String>),

    /// The `tasks` key holds something other than an array.
    TasksNotASequence,

    /// A task entry has no description once trimmed.
    EmptyTaskDescription,

    /// A task entry carries a priority outside of High, Medium and Low.
    InvalidPriority(String),

    /// A task entry field has a JSON type that cannot be coerced.
    InvalidField(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingCredential => write!(f, "model API credential is not configured"),
            Error::Authentication(msg) => write!(f, "Authentication failed: {}", msg),
            Error::Network(msg) => write!(f, "Network error: {}", msg),
            Error::Provider(msg) => write!(f, "Provider error: {}", msg),
            Error::Deserialization(msg) => write!(f, "Deserialization error: {}", msg),
            Error::EmptyResponse => write!(f, "Empty response from model"),
            Error::NoJsonFound => write!(f, "No JSON object found in response"),
            Error::UnbalancedBraces => write!(f, "Unbalanced braces in response"),
            Error::MalformedJson(msg) => write!(f, "Malformed JSON in response: {}", msg),
            Error::MissingRequiredFields(fields) => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
            Error::TasksNotASequence => write!(f, "Field 'tasks' must be a list"),
            Error::EmptyTaskDescription => write!(f, "Task description cannot be empty"),
            Error::InvalidPriority(value) => {
                write!(f, "Invalid priority {value}: expected High, Medium or Low")
            }
            Error::InvalidField(field) => write!(f, "Invalid value for task field '{}'", field),
        }
    }
}

impl std::error::Error for Error {}

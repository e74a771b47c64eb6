//! Error types for the `domain` layer.
use meeting_ai::Error as MeetingAiError;
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. `web` depends on `domain` but never on `meeting-ai` errors directly;
/// it only inspects the `error_kind` tree to pick a status code and message.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    /// The caller supplied an unusable transcript or request body.
    InvalidInput(String),
    /// No model API credential is configured.
    MissingCredential,
    /// The model answered but its output could not be extracted or validated.
    Analysis(String),
    Other(String),
}

/// Enum representing the various kinds of external errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Network(String),
    /// The model provider rejected or failed the request.
    Upstream(String),
}

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::InvalidInput(message.into())),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `meeting-ai` layer to the `domain` layer.
impl From<MeetingAiError> for Error {
    fn from(err: MeetingAiError) -> Self {
        let message = err.to_string();
        let error_kind = match &err {
            MeetingAiError::MissingCredential => {
                DomainErrorKind::Internal(InternalErrorKind::MissingCredential)
            }
            MeetingAiError::Network(_) => {
                DomainErrorKind::External(ExternalErrorKind::Network(message))
            }
            MeetingAiError::Authentication(_)
            | MeetingAiError::Provider(_)
            | MeetingAiError::Deserialization(_) => {
                DomainErrorKind::External(ExternalErrorKind::Upstream(message))
            }
            MeetingAiError::EmptyResponse
            | MeetingAiError::NoJsonFound
            | MeetingAiError::UnbalancedBraces
            | MeetingAiError::MalformedJson(_)
            | MeetingAiError::MissingRequiredFields(_)
            | MeetingAiError::TasksNotASequence
            | MeetingAiError::EmptyTaskDescription
            | MeetingAiError::InvalidPriority(_)
            | MeetingAiError::InvalidField(_) => {
                DomainErrorKind::Internal(InternalErrorKind::Analysis(message))
            }
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Errors that result from issues building the reqwest::Client instance. This
        // type of error will occur prior to any network calls being made.
        if err.is_builder() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to build reqwest client".to_string(),
                )),
            }
        // Errors that result from issues with the network call itself.
        } else {
            let message = err.to_string();
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network(message)),
            }
        }
    }
}

use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use domain::error::{
    DomainErrorKind, Error as DomainError, ExternalErrorKind, InternalErrorKind,
};

use log::*;

pub type Result<T> = core::result::Result<T, Error>;

/// Prefix of the `detail` message for classified analysis failures.
const ANALYSIS_ERROR_PREFIX: &str = "Invalid transcript or API error";

/// `detail` message for unclassified failures. Internal details are only logged.
const INTERNAL_ERROR_DETAIL: &str = "Error analyzing transcript";

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl Error {
    /// Status code and client-facing `detail` for this error.
    fn status_and_detail(&self) -> (StatusCode, String) {
        match &self.0.error_kind {
            DomainErrorKind::Internal(internal_error_kind) => match internal_error_kind {
                InternalErrorKind::InvalidInput(message) => {
                    (StatusCode::BAD_REQUEST, message.clone())
                }
                InternalErrorKind::MissingCredential => (
                    StatusCode::BAD_REQUEST,
                    format!("{ANALYSIS_ERROR_PREFIX}: model API credential is not configured"),
                ),
                InternalErrorKind::Analysis(message) => (
                    StatusCode::BAD_REQUEST,
                    format!("{ANALYSIS_ERROR_PREFIX}: {message}"),
                ),
                InternalErrorKind::Other(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_DETAIL.to_string(),
                ),
            },
            DomainErrorKind::External(
                ExternalErrorKind::Network(message) | ExternalErrorKind::Upstream(message),
            ) => (
                StatusCode::BAD_REQUEST,
                format!("{ANALYSIS_ERROR_PREFIX}: {message}"),
            ),
        }
    }
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        if status.is_server_error() {
            error!("Unhandled error while analyzing transcript: {:?}", self.0);
        } else {
            warn!("Analysis request rejected ({status}): {detail}");
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

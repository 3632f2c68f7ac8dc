//! Runtime error taxonomy.
//!
//! Three families live here:
//!
//! - [`HandlerError`] - what a service implementation returns when a call fails
//! - [`DispatchError`] - what the adapter turns into an error response
//! - [`ClientError`] - what a generated client returns to its caller
//!
//! On the wire every error response carries a JSON body of the form
//! `{"error":{"message":"..."}}`, see [`ErrorBody`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message sent in place of the details of an internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Boxed error type carried by [`HandlerError::Internal`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failure reported by a service implementation.
///
/// ## Examples
///
/// ```
/// use conduit::HandlerError;
///
/// let err = HandlerError::not_found("Todo not found");
/// assert_eq!(err.status_code(), 404);
/// assert_eq!(err.to_string(), "Todo not found");
/// ```
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A domain failure with an explicit status; forwarded to the caller verbatim.
    #[error("{message}")]
    Status {
        /// HTTP status code (4xx or 5xx).
        status: u16,
        /// Message shown to the caller.
        message: String,
    },

    /// Any other failure. The caller only sees a generic 500.
    #[error("internal error: {0}")]
    Internal(#[source] BoxError),
}

impl HandlerError {
    /// Creates an error with an explicit status.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates a 404 error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::status(404, message)
    }

    /// Creates a 400 error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::status(400, message)
    }

    /// Wraps any error as an internal failure.
    pub fn internal(err: impl Into<BoxError>) -> Self {
        Self::Internal(err.into())
    }

    /// Returns the status code this error is answered with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Status { status, .. } => *status,
            Self::Internal(_) => 500,
        }
    }
}

/// A failure while dispatching one request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Parameters or payload failed to decode; the handler was not invoked.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The handler returned an error.
    #[error(transparent)]
    Handler(#[from] HandlerError),

    /// The handler succeeded but its output could not be serialized.
    #[error("Failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),
}

impl DispatchError {
    /// Returns the response status code.
    pub fn status(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Handler(err) => err.status_code(),
            Self::Encode(_) => 500,
        }
    }

    /// Returns the message written to the caller.
    ///
    /// Internal failures are reduced to [`INTERNAL_ERROR_MESSAGE`].
    pub fn public_message(&self) -> String {
        match self {
            Self::BadRequest(reason) => reason.clone(),
            Self::Handler(HandlerError::Status { message, .. }) => message.clone(),
            Self::Handler(HandlerError::Internal(_)) | Self::Encode(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }

    /// Returns the JSON error body for this failure.
    pub fn body(&self) -> ErrorBody {
        ErrorBody::new(self.public_message())
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
            },
        }
    }
}

/// Errors returned by generated clients.
///
/// A non-2xx status and an undecodable payload are reported as distinct
/// variants so callers can tell a server-reported failure from a contract
/// mismatch.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status outside 200-299.
    #[error("HTTP {status} for URL: {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// The response payload does not match the declared response type.
    #[error("Failed to decode response from URL: {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request payload could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A path segment would be resolved away as `.` or `..`.
    #[error("Path '{path}' contains a dot segment")]
    DotSegment { path: String },

    /// The base URL or the joined request URL is invalid.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ClientError {
    /// Returns the HTTP status for [`ClientError::Status`] errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the server's error message if the body is an [`ErrorBody`].
    pub fn server_message(&self) -> Option<String> {
        match self {
            Self::Status { body, .. } => serde_json::from_str::<ErrorBody>(body)
                .ok()
                .map(|b| b.error.message),
            _ => None,
        }
    }
}

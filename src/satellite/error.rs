//! Error taxonomy for Satellite API calls
//!
//! Every operation either fails locally before anything is sent
//! ([`ApiError::Argument`]), fails to get a request onto the wire
//! ([`ApiError::Transport`]), or gets an answer that signals failure
//! ([`ApiError::Response`]). Only the last one carries a [`Response`].

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use thiserror::Error;

/// Result of an operation that decodes a body: the value plus the response it came from
pub type ApiResult<T> = Result<(T, Response), ApiError>;

/// Metadata of an HTTP response, kept around so callers can inspect raw status
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Raw response body, possibly empty
    pub body: String,
}

impl Response {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or invalid; nothing was sent
    #[error("invalid argument {field}: {reason}")]
    Argument {
        field: &'static str,
        reason: &'static str,
    },

    /// The request could not be built or sent
    #[error("request failed: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A response arrived but signals failure (error status or undecodable body)
    #[error("API request failed with {}: {message}", .response.status)]
    Response { response: Response, message: String },
}

impl ApiError {
    pub fn argument(field: &'static str, reason: &'static str) -> Self {
        Self::Argument { field, reason }
    }

    pub fn transport<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The response descriptor, present only for [`ApiError::Response`]
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::Response { response, .. } => Some(response),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|r| r.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_argument(&self) -> bool {
        matches!(self, Self::Argument { .. })
    }
}

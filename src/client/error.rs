//! Transport error taxonomy for the catalog API.

use reqwest::{Method, StatusCode};
use thiserror::Error;

use super::types::ErrorBody;

/// Failure of a single catalog API request.
///
/// The three variants mirror the three ways a request goes wrong: the
/// request never got a response, the response carried an error status, or
/// the response body did not match the expected shape. Variants carry plain
/// data so tests can construct them without a live socket.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// No response received (connection refused, DNS failure, timeout).
    #[error("request failed: {message}")]
    Transport {
        method: Method,
        url: String,
        message: String,
    },

    /// Response received with status >= 400.
    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: Method,
        url: String,
        status: StatusCode,
        /// Parsed error payload, if the body matched the documented shape.
        body: Option<ErrorBody>,
    },

    /// Response received but the body does not parse as the expected type.
    #[error("invalid response body: {message}")]
    Decode {
        method: Method,
        url: String,
        message: String,
    },
}

impl ApiError {
    /// Classify a `reqwest` failure for the given request.
    ///
    /// Body-decode failures surface as [`ApiError::Decode`]; everything
    /// else (connect, timeout, redirect loops) is transport-level.
    pub fn from_reqwest(method: Method, url: &str, err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode {
                method,
                url: url.to_string(),
                message: err.to_string(),
            }
        } else {
            ApiError::Transport {
                method,
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Status code, when a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

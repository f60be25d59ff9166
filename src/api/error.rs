//! Error handling for the REST API client

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http {
        status: u16,
        message: String,
        /// The `error` field of the JSON body, when the server sent one.
        server_error: Option<String>,
    },

    /// Failed to decode a JSON body from the server
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A success status arrived with no body where a record was expected.
    #[error("No data received from server")]
    EmptyResponse,

    /// The request task stopped before producing a result.
    #[error("Request was interrupted")]
    Interrupted,

    /// A local file that was meant to be uploaded could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl ApiError {
    pub async fn from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        Self::from_body(status, message)
    }

    /// Builds an HTTP error from a status and raw body, picking out `{"error": "..."}`.
    pub fn from_body(status: u16, body: String) -> ApiError {
        let server_error = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .filter(|e| !e.trim().is_empty());

        ApiError::Http {
            status,
            message: body,
            server_error,
        }
    }

    /// The server-provided error text, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { server_error, .. } => server_error.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Text to show the user: the server's `error` verbatim, else the operation's fallback.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            ApiError::EmptyResponse => self.to_string(),
            _ => self
                .server_message()
                .map(str::to_owned)
                .unwrap_or_else(|| fallback.to_owned()),
        }
    }
}

//! Error types

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for ipamctl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for every client and command operation
#[derive(Error, Debug)]
pub enum Error {
    /// Required command input missing, raised before any request is sent
    #[error("{0}")]
    Validation(String),

    /// Connection, timeout or body transfer failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request URL could not be built
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Structured error returned by the service
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Non-2xx response without a recognizable error payload
    #[error("http {method} {path}: {status}\nbody: {body}")]
    Http {
        method: String,
        path: String,
        status: u16,
        body: String,
    },

    /// 2xx response whose body does not match the expected shape
    #[error("decode {method} {path}: {source}\nbody: {body}")]
    Decode {
        method: String,
        path: String,
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// Invalid local configuration
    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A named step of a multi-call workflow failed
    #[error("{step}: {source}")]
    Step {
        step: &'static str,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap this error with the name of the workflow step that produced it
    pub fn in_step(self, step: &'static str) -> Self {
        Error::Step {
            step,
            source: Box::new(self),
        }
    }

    /// Returns true for failures that happened before a response was received
    pub fn is_transport(&self) -> bool {
        match self {
            Error::Transport(_) | Error::InvalidUrl(_) => true,
            Error::Step { source, .. } => source.is_transport(),
            _ => false,
        }
    }

    /// HTTP status of the failed response, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(e) => Some(e.status),
            Error::Http { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            Error::Step { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Returns true if the service reported the resource as missing (404)
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns true if the service reported a conflict (409)
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}

/// Structured error payload returned by the IPAM service
///
/// ```json
/// {"error": "conflict", "message": "prefix overlaps", "details": {"cidr": "10.0.0.0/24"}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiError {
    /// Short error symbol, e.g. `conflict` or `not_found`
    #[serde(rename = "error")]
    pub code: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
    /// HTTP status of the response; not part of the payload
    #[serde(skip)]
    pub status: u16,
}

impl ApiError {
    /// A payload counts as structured only when it names a code or a message
    pub fn is_structured(&self) -> bool {
        !self.code.is_empty() || !self.message.is_empty()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.code)
        } else {
            f.write_str(&self.message)
        }
    }
}

impl std::error::Error for ApiError {}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use reqwest::StatusCode;
use thiserror::Error;

use crate::models::ApiError;

/// Failure of a single backend call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection refused, DNS, timeout and other transport failures.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response carrying the backend error envelope.
    #[error("{}", .envelope.message().unwrap_or("Request rejected by server"))]
    Api { status: StatusCode, envelope: ApiError },

    /// Non-2xx response without a usable envelope.
    #[error("HTTP {}: {}", .status.as_u16(), .status.canonical_reason().unwrap_or("Unknown status"))]
    Status { status: StatusCode },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid API URL '{0}'")]
    InvalidUrl(String),
}

impl ClientError {
    /// Builds the error for a non-2xx response from its raw body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ApiError>(body) {
            Ok(envelope) if envelope.message().is_some() => ClientError::Api { status, envelope },
            _ => ClientError::Status { status },
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } | ClientError::Status { status } => Some(*status),
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn envelope(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api { envelope, .. } => Some(envelope),
            _ => None,
        }
    }
}

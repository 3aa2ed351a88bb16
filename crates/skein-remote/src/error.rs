// SPDX-License-Identifier: PMPL-1.0-or-later
//
// SkeinDB remote - Error types
//
// Covers the failure modes of uploading a backup to a remote object
// store: transport errors, rejecting servers, unreadable credentials,
// and an unavailable backend.

use thiserror::Error;

/// Errors that can occur when uploading to a remote object store.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP transport or connection error.
    #[error("remote transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote server rejected the upload with a non-success status.
    #[error("remote rejected upload (HTTP {status}): {body}")]
    Status {
        /// The HTTP status code returned by the server.
        status: u16,
        /// The response body, for diagnostics.
        body: String,
    },

    /// The credentials file could not be read or was empty.
    #[error("credentials error: {0}")]
    Credentials(String),

    /// The object store backend is not available or not configured.
    #[error("object store unavailable: {0}")]
    Unavailable(String),
}

/// Convenience type alias for remote results.
pub type RemoteResult<T> = Result<T, RemoteError>;

// SPDX-License-Identifier: PMPL-1.0-or-later
//
// HTTP object store for SkeinDB.
//
// Wraps `reqwest::blocking::Client` and uploads each object with a single
// `PUT {endpoint}/{bucket}/{name}` request. All I/O is blocking so the
// store can call it directly without an async runtime. There is no retry
// and no backoff; the only time bound is the client timeout.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::error::{RemoteError, RemoteResult};
use crate::object_store::ObjectStore;

/// Configuration for an HTTP object store.
///
/// Everything the original kept ambient (credential file path, fixed
/// destination bucket) is an explicit field here.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the object store API (e.g. `https://objects.example.com`),
    /// without a trailing slash.
    pub endpoint: String,

    /// Destination container identifier (bucket) all objects are
    /// uploaded into.
    pub bucket: String,

    /// Path to a file containing a bearer token for the service account.
    /// When absent, requests are sent unauthenticated.
    pub credentials_path: Option<PathBuf>,

    /// Timeout applied to each upload request.
    pub timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9000".to_string(),
            bucket: "skeindb-backups".to_string(),
            credentials_path: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// An [`ObjectStore`] backed by an HTTP object storage service.
pub struct HttpObjectStore {
    /// Base URL with any trailing slash removed.
    endpoint: String,
    /// Destination bucket for all uploads.
    bucket: String,
    /// Bearer token read from the credentials file, if configured.
    token: Option<String>,
    /// Underlying HTTP client (connection-pooled).
    http: Client,
}

impl HttpObjectStore {
    /// Create a new HTTP object store from the given configuration.
    ///
    /// The credentials file, when configured, is read once here; an
    /// unreadable or empty file is an error at construction time rather
    /// than at the first upload.
    pub fn new(config: RemoteConfig) -> RemoteResult<Self> {
        let token = match &config.credentials_path {
            Some(path) => {
                let raw = fs::read_to_string(path).map_err(|err| {
                    RemoteError::Credentials(format!(
                        "cannot read credentials file {}: {err}",
                        path.display()
                    ))
                })?;
                let token = raw.trim().to_string();
                if token.is_empty() {
                    return Err(RemoteError::Credentials(format!(
                        "credentials file {} is empty",
                        path.display()
                    )));
                }
                Some(token)
            }
            None => None,
        };

        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            bucket: config.bucket,
            token,
            http,
        })
    }

    /// Build the full upload URL for an object name.
    fn object_url(&self, name: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, name)
    }
}

impl ObjectStore for HttpObjectStore {
    fn upload(&self, name: &str, bytes: &[u8]) -> RemoteResult<()> {
        let url = self.object_url(name);
        debug!(url = %url, bytes = bytes.len(), "Uploading object");

        let mut request = self.http.put(&url).body(bytes.to_vec());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        info!(object = name, bucket = %self.bucket, "Uploaded backup object");
        Ok(())
    }

    fn name(&self) -> &str {
        "http"
    }
}

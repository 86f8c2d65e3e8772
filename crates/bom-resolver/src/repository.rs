//! Repository endpoints and remote POM fetch.

use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// What kind of repository an endpoint is. Only artifact-style
/// repositories can serve model lookups; other kinds present in the
/// hosting build configuration are skipped by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepositoryKind {
    #[default]
    Maven,
    Ivy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// One remote repository, in caller-supplied priority order.
#[derive(Debug, Clone)]
pub struct RepositoryEndpoint {
    pub base_url: String,
    pub kind: RepositoryKind,
    pub credentials: Option<Credentials>,
}

impl RepositoryEndpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            kind: RepositoryKind::Maven,
            credentials: None,
        }
    }

    pub fn ivy(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            kind: RepositoryKind::Ivy,
            credentials: None,
        }
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }
}

/// Fetch failure against one repository. Expected and non-fatal: the
/// resolver records it and moves on to the next endpoint.
#[derive(Error, Debug)]
#[error("{repository}: {message}")]
pub struct FetchError {
    pub repository: String,
    pub message: String,
}

/// Relative repository path of a POM artifact: group segments joined by
/// `/`, then `artifact/version/artifact-version.pom`. The layout is the
/// repository wire convention and must be reproduced exactly.
pub fn pom_path(group_id: &str, artifact_id: &str, version: &str) -> String {
    let mut path = String::new();
    for part in group_id.split('.') {
        path.push_str(part);
        path.push('/');
    }
    format!("{path}{artifact_id}/{version}/{artifact_id}-{version}.pom")
}

/// Fetches POM bytes from a single repository endpoint.
#[derive(Clone)]
pub struct RepositoryLocator {
    client: reqwest::Client,
}

impl RepositoryLocator {
    pub fn new() -> reqwest::Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// A locator whose individual fetches time out after `timeout`.
    pub fn with_timeout(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Fetches the POM for the coordinate from one endpoint, attaching
    /// Basic credentials when the endpoint declares a non-empty username.
    /// Any transport failure or non-success status is a `FetchError`.
    pub async fn fetch(
        &self,
        group_id: &str,
        artifact_id: &str,
        version: &str,
        endpoint: &RepositoryEndpoint,
    ) -> std::result::Result<Bytes, FetchError> {
        let path = pom_path(group_id, artifact_id, version);
        let url = format!("{}/{}", endpoint.base_url.trim_end_matches('/'), path);
        tracing::debug!("fetching {url}");

        let mut request = self.client.get(&url);
        if let Some(ref credentials) = endpoint.credentials
            && !credentials.username.is_empty()
        {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FetchError {
                repository: endpoint.base_url.clone(),
                message: e.to_string(),
            })?;

        response.bytes().await.map_err(|e| FetchError {
            repository: endpoint.base_url.clone(),
            message: e.to_string(),
        })
    }
}

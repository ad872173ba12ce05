// Client for a GitHub-style "contents" endpoint: one file, read and written
// whole, with the blob sha acting as the version token.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::LeaderboardConfig;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("the file changed since it was read")]
    Conflict,

    #[error("invalid file content: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub content: String,
    pub version: String,
}

/// A single remotely hosted text file with optimistic concurrency.
#[async_trait]
pub trait FileHost: Send + Sync {
    /// `None` when the file doesn't exist yet.
    async fn fetch(&self) -> Result<Option<RemoteFile>, HostError>;

    /// Replaces the whole file. `version` must be the token of the content
    /// this write is based on, or `None` to create the file.
    async fn store(&self, content: &str, version: Option<&str>, message: &str) -> Result<(), HostError>;
}

#[derive(Deserialize)]
struct ContentsFile {
    content: String,
    encoding: String,
    sha: String,
}

impl ContentsFile {
    /// Files over 1 MB come back with `"encoding": "none"` and an empty
    /// `content`; treating that as an empty log would overwrite it.
    fn into_remote(self) -> Result<RemoteFile, HostError> {
        if self.encoding != "base64" {
            return Err(HostError::Decode(format!("unsupported encoding `{}`", self.encoding)));
        }
        Ok(RemoteFile {
            content: decode_content(&self.content)?,
            version: self.sha,
        })
    }
}

#[derive(Serialize)]
struct StoreRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

pub struct ContentsApi {
    client: reqwest::Client,
    url: String,
    branch: String,
    token: String,
}

impl ContentsApi {
    pub fn new(config: &LeaderboardConfig) -> Result<Self, HostError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            url: file_url(&config.api_url, &config.repo, &config.path),
            branch: config.branch.clone(),
            token: config.token.clone(),
        })
    }
}

fn file_url(api_url: &str, repo: &str, path: &str) -> String {
    format!(
        "{}/repos/{}/contents/{}",
        api_url.trim_end_matches('/'),
        repo.trim_matches('/'),
        path.trim_start_matches('/')
    )
}

/// The API wraps base64 at 60 columns.
fn decode_content(encoded: &str) -> Result<String, HostError> {
    let compact = encoded
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<String>();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|error| HostError::Decode(error.to_string()))?;
    String::from_utf8(bytes).map_err(|error| HostError::Decode(error.to_string()))
}

async fn unexpected(response: reqwest::Response) -> HostError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    HostError::Status { status, body }
}

#[async_trait]
impl FileHost for ContentsApi {
    async fn fetch(&self) -> Result<Option<RemoteFile>, HostError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("ref", &self.branch)])
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let file: ContentsFile = response.json().await?;
                file.into_remote().map(Some)
            }
            _ => Err(unexpected(response).await),
        }
    }

    async fn store(&self, content: &str, version: Option<&str>, message: &str) -> Result<(), HostError> {
        let request = StoreRequest {
            message,
            content: STANDARD.encode(content),
            branch: &self.branch,
            sha: version,
        };
        let response = self
            .client
            .put(&self.url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/vnd.github+json")
            .json(&request)
            .send()
            .await?;
        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::CONFLICT => Err(HostError::Conflict),
            // someone created the file after we saw it missing
            StatusCode::UNPROCESSABLE_ENTITY if version.is_none() => Err(HostError::Conflict),
            _ => Err(unexpected(response).await),
        }
    }
}

//! Siege API client.
//!
//! # Responsibilities
//! - Build upstream URLs with percent-encoded path segments
//! - Send every call with the configured identity headers
//! - Map non-success statuses and undecodable bodies to `UpstreamError`
//!
//! # Design Decisions
//! - One pooled `reqwest::Client` shared by all requests (cheap to clone)
//! - Only connection establishment is bounded; response time is not
//! - Bodies are read fully, then decoded as opaque JSON

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use crate::config::UpstreamConfig;
use crate::upstream::error::UpstreamError;

const API_PREFIX: [&str; 2] = ["api", "public-beta"];

/// Source of per-project detail payloads.
///
/// Implemented by [`SiegeClient`]; the aggregator only needs this much.
pub trait ProjectLookup: Send + Sync {
    /// Fetch the full detail object for one project.
    fn project(&self, id: &str) -> impl Future<Output = Result<Value, UpstreamError>> + Send;
}

/// HTTP client for the Siege public API.
#[derive(Clone)]
pub struct SiegeClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SiegeClient {
    /// Create a client from upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| UpstreamError::InvalidConfig(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidConfig(config.base_url.clone()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let accept_language = HeaderValue::from_str(&config.accept_language).map_err(|e| {
            UpstreamError::InvalidConfig(format!("accept-language '{}': {}", config.accept_language, e))
        })?;
        headers.insert(ACCEPT_LANGUAGE, accept_language);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.as_str())
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout_secs))
            .build()?;

        tracing::debug!(base_url = %base_url, "Siege client initialized");

        Ok(Self { http, base_url })
    }

    /// `GET /api/public-beta/user/{id}`
    pub async fn user(&self, id: &str) -> Result<Value, UpstreamError> {
        self.get_json(self.endpoint(&["user", id])?).await
    }

    /// `GET /api/public-beta/project/{id}`
    pub async fn project(&self, id: &str) -> Result<Value, UpstreamError> {
        self.get_json(self.endpoint(&["project", id])?).await
    }

    /// `GET /api/public-beta/leaderboard/`
    ///
    /// The JSON body is returned with its status whatever that status is;
    /// only a non-JSON body is an error.
    pub async fn leaderboard(&self) -> Result<(StatusCode, Value), UpstreamError> {
        let url = self.endpoint(&["leaderboard", ""])?;
        tracing::debug!(url = %url, "Upstream GET");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        match serde_json::from_slice(&body) {
            Ok(value) => Ok((status, value)),
            Err(_) if !status.is_success() => Err(UpstreamError::Status(status)),
            Err(e) => Err(e.into()),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        // `url` drops dot segments instead of encoding them.
        if let Some(dots) = segments.iter().find(|s| **s == "." || **s == "..") {
            return Err(UpstreamError::InvalidId((*dots).to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| UpstreamError::InvalidConfig(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(API_PREFIX.iter().chain(segments.iter()));
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value, UpstreamError> {
        tracing::debug!(url = %url, "Upstream GET");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl ProjectLookup for SiegeClient {
    fn project(&self, id: &str) -> impl Future<Output = Result<Value, UpstreamError>> + Send {
        SiegeClient::project(self, id)
    }
}

impl std::fmt::Debug for SiegeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiegeClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

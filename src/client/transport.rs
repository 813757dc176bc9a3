//! Transport abstraction over the iTwin platform REST API.
//!
//! Controllers, the favorites store and the thumbnail loader only talk to
//! the network through `Transport`, so tests can swap in a mock.

use async_trait::async_trait;
use serde_json::Value;

use super::credential::AccessToken;
use super::error::ClientResult;

#[cfg(test)]
use mockall::automock;

pub const ACCEPT_ITWIN_V1: &str = "application/vnd.bentley.itwin-platform.v1+json";
pub const ACCEPT_ITWIN_V2: &str = "application/vnd.bentley.itwin-platform.v2+json";
pub const ACCEPT_PNG: &str = "image/png";

/// One authenticated request against the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Path relative to the API base URL (e.g. `imodels`).
    pub path: String,
    pub query: Vec<(String, String)>,
    pub token: AccessToken,
    /// Representation selected through the `Accept` header.
    pub accept: &'static str,
}

impl ApiRequest {
    pub fn new(path: impl Into<String>, token: AccessToken) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
            token,
            accept: ACCEPT_ITWIN_V2,
        }
    }

    pub fn with_accept(mut self, accept: &'static str) -> Self {
        self.accept = accept;
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// First query value for `key`, if any.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Trait for platform requests. Can be mocked in tests.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET a JSON document.
    async fn get_json(&self, request: ApiRequest) -> ClientResult<Value>;

    /// GET a binary body (thumbnails).
    async fn get_bytes(&self, request: ApiRequest) -> ClientResult<Vec<u8>>;

    /// POST without a request body; only the status matters.
    async fn post(&self, request: ApiRequest) -> ClientResult<()>;

    /// DELETE; only the status matters.
    async fn delete(&self, request: ApiRequest) -> ClientResult<()>;
}

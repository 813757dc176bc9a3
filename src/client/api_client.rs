use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::env;
use tracing::{debug, instrument};

use super::error::{ClientError, ClientResult};
use super::transport::{ApiRequest, Transport};

pub const DEFAULT_API_URL: &str = "https://api.bentley.com";
pub const API_URL_ENV: &str = "ITB_API_URL";

/// API client for the iTwin platform REST API
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// Priority for base URL:
    /// 1. Explicit `api_url` parameter
    /// 2. ITB_API_URL environment variable
    /// 3. Default: https://api.bentley.com
    pub fn new(api_url: Option<String>) -> Self {
        // reqwest is built without a bundled crypto provider
        let _ = rustls::crypto::ring::default_provider().install_default();

        let base_url = api_url
            .or_else(|| env::var(API_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build a request carrying the credential and representation headers
    fn request(&self, method: Method, request: &ApiRequest) -> RequestBuilder {
        self.client
            .request(method, self.url(&request.path))
            .query(&request.query)
            .header(AUTHORIZATION, request.token.authorization())
            .header(ACCEPT, request.accept)
            .header("Prefer", "return=representation")
    }

    /// Handle API response with standardized error handling
    ///
    /// Returns the deserialized response body on success,
    /// or a ClientError::Api on non-success status codes.
    pub async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse {
                message: e.to_string(),
            })
    }

    async fn check_status(response: Response) -> ClientResult<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ClientError::Api {
                status,
                message: error_text,
            })
        }
    }
}

#[async_trait]
impl Transport for ApiClient {
    #[instrument(skip(self, request), fields(path = %request.path))]
    async fn get_json(&self, request: ApiRequest) -> ClientResult<Value> {
        let response = self.request(Method::GET, &request).send().await?;
        debug!(status = response.status().as_u16(), "received response");
        Self::handle_response(response).await
    }

    #[instrument(skip(self, request), fields(path = %request.path))]
    async fn get_bytes(&self, request: ApiRequest) -> ClientResult<Vec<u8>> {
        let response = self.request(Method::GET, &request).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    #[instrument(skip(self, request), fields(path = %request.path))]
    async fn post(&self, request: ApiRequest) -> ClientResult<()> {
        let response = self.request(Method::POST, &request).send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    #[instrument(skip(self, request), fields(path = %request.path))]
    async fn delete(&self, request: ApiRequest) -> ClientResult<()> {
        let response = self.request(Method::DELETE, &request).send().await?;
        Self::check_status(response).await.map(|_| ())
    }
}

//! Runtime configuration.
//!
//! Precedence: builder (CLI flag) > environment variable > default.

use std::env;
use std::time::Duration;

use crate::client::{API_URL_ENV, AccessToken, Credential, DEFAULT_API_URL};
use crate::collection::DEFAULT_PAGE_SIZE;
use crate::thumbnails::{DEFAULT_THUMBNAIL_CAPACITY, DEFAULT_THUMBNAIL_TTL, ThumbnailCache};

pub const ACCESS_TOKEN_ENV: &str = "ITB_ACCESS_TOKEN";
pub const PAGE_SIZE_ENV: &str = "ITB_PAGE_SIZE";
pub const THUMBNAIL_CACHE_SIZE_ENV: &str = "ITB_THUMBNAIL_CACHE_SIZE";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub access_token: Option<AccessToken>,
    pub page_size: usize,
    pub thumbnail_cache_size: usize,
    pub thumbnail_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            access_token: None,
            page_size: DEFAULT_PAGE_SIZE,
            thumbnail_cache_size: DEFAULT_THUMBNAIL_CAPACITY,
            thumbnail_ttl: DEFAULT_THUMBNAIL_TTL,
        }
    }
}

impl Config {
    /// Defaults overridden by `ITB_*` environment variables.
    pub fn new() -> Self {
        let defaults = Self::default();
        Self {
            api_url: env::var(API_URL_ENV)
                .ok()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.api_url),
            access_token: env::var(ACCESS_TOKEN_ENV)
                .ok()
                .filter(|token| !token.trim().is_empty())
                .map(AccessToken::new),
            page_size: positive_from_env(PAGE_SIZE_ENV).unwrap_or(defaults.page_size),
            thumbnail_cache_size: positive_from_env(THUMBNAIL_CACHE_SIZE_ENV)
                .unwrap_or(defaults.thumbnail_cache_size),
            thumbnail_ttl: defaults.thumbnail_ttl,
        }
    }

    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        self
    }

    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.access_token = Some(AccessToken::new(token));
        }
        self
    }

    pub fn with_page_size(mut self, page_size: Option<usize>) -> Self {
        if let Some(size) = page_size.filter(|s| *s > 0) {
            self.page_size = size;
        }
        self
    }

    pub fn credential(&self) -> Option<Credential> {
        self.access_token.clone().map(Credential::Token)
    }

    pub fn thumbnail_cache(&self) -> ThumbnailCache {
        ThumbnailCache::new(self.thumbnail_cache_size, self.thumbnail_ttl)
    }
}

fn positive_from_env(key: &str) -> Option<usize> {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

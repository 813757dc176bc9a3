//! Favorite marks for platform entities.
//!
//! Mutations are optimistic: the local set changes first and the request is
//! sent afterwards. A failed request is logged and the local change stays.

use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, warn};
use urlencoding::encode;

use crate::client::{AccessToken, ApiRequest, ClientError, ClientResult, Transport};

#[derive(Deserialize)]
struct FavoriteEntry {
    id: String,
}

pub struct FavoritesStore {
    transport: Arc<dyn Transport>,
    collection: &'static str,
    response_field: &'static str,
    query: Vec<(String, String)>,
    ids: HashSet<String>,
}

impl FavoritesStore {
    /// Store for `{collection}/favorites`, reading ids from `response_field`.
    pub fn new(
        transport: Arc<dyn Transport>,
        collection: &'static str,
        response_field: &'static str,
    ) -> Self {
        Self {
            transport,
            collection,
            response_field,
            query: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Favorite project iTwins.
    pub fn itwins(transport: Arc<dyn Transport>) -> Self {
        Self::new(transport, "itwins", "iTwins").with_query("subClass", "Project")
    }

    /// Extra query parameters for `load`.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &HashSet<String> {
        &self.ids
    }

    /// Replace the local set with the server's. On failure the current set
    /// is kept and 0 is returned.
    pub async fn load(&mut self, token: &AccessToken) -> usize {
        match self.try_load(token).await {
            Ok(count) => count,
            Err(e) => {
                error!(collection = self.collection, error = %e, "failed to load favorites");
                0
            }
        }
    }

    /// Like `load`, but reports the failure. The current set is kept.
    pub async fn try_load(&mut self, token: &AccessToken) -> ClientResult<usize> {
        self.ids = self.fetch_ids(token).await?;
        debug!(
            collection = self.collection,
            count = self.ids.len(),
            "loaded favorites"
        );
        Ok(self.ids.len())
    }

    async fn fetch_ids(&self, token: &AccessToken) -> ClientResult<HashSet<String>> {
        let mut request = ApiRequest::new(format!("{}/favorites", self.collection), token.clone());
        for (key, value) in &self.query {
            request = request.with_query(key.as_str(), value.as_str());
        }
        let mut body = self.transport.get_json(request).await?;
        let entries = body
            .get_mut(self.response_field)
            .map(serde_json::Value::take)
            .ok_or_else(|| ClientError::MissingField {
                field: self.response_field.to_string(),
            })?;
        let entries: Vec<FavoriteEntry> = serde_json::from_value(entries)?;
        Ok(entries.into_iter().map(|e| e.id).collect())
    }

    /// Mark `id` as favorite. Returns `false` if it already was.
    pub async fn add(&mut self, id: &str, token: &AccessToken) -> bool {
        match self.try_add(id, token).await {
            Ok(changed) => changed,
            Err(e) => {
                warn!(collection = self.collection, id, error = %e, "failed to add favorite");
                true
            }
        }
    }

    /// Like `add`, but reports a rejected request. The local mark stays
    /// either way.
    pub async fn try_add(&mut self, id: &str, token: &AccessToken) -> ClientResult<bool> {
        if !self.ids.insert(id.to_string()) {
            return Ok(false);
        }
        let request = self.favorite_request(id, token);
        self.transport.post(request).await?;
        Ok(true)
    }

    /// Unmark `id`. Returns `false` if it was not a favorite.
    pub async fn remove(&mut self, id: &str, token: &AccessToken) -> bool {
        match self.try_remove(id, token).await {
            Ok(changed) => changed,
            Err(e) => {
                warn!(collection = self.collection, id, error = %e, "failed to remove favorite");
                true
            }
        }
    }

    /// Like `remove`, but reports a rejected request. The local unmark stays
    /// either way.
    pub async fn try_remove(&mut self, id: &str, token: &AccessToken) -> ClientResult<bool> {
        if !self.ids.remove(id) {
            return Ok(false);
        }
        let request = self.favorite_request(id, token);
        self.transport.delete(request).await?;
        Ok(true)
    }

    /// Flip the mark and return the new state.
    pub async fn toggle(&mut self, id: &str, token: &AccessToken) -> bool {
        if self.is_favorite(id) {
            self.remove(id, token).await;
            false
        } else {
            self.add(id, token).await;
            true
        }
    }

    fn favorite_request(&self, id: &str, token: &AccessToken) -> ApiRequest {
        ApiRequest::new(
            format!("{}/favorites/{}", self.collection, encode(id)),
            token.clone(),
        )
    }
}

#[cfg(test)]
#[path = "favorites_test.rs"]
mod favorites_test;

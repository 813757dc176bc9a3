use serde::de::DeserializeOwned;

use super::item::CollectionItem;
use crate::client::ACCEPT_ITWIN_V2;

/// Where a text search runs for a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPolicy {
    /// Sent as `$search`; changing the text refetches from page 0.
    Server,
    /// Applied locally over the accumulated items; no refetch.
    Client,
}

/// Path and fixed query parameters of a collection endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Endpoint {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Adapter describing one remote collection.
pub trait Collection: Send + Sync + 'static {
    type Item: CollectionItem + DeserializeOwned;

    /// Name used in logs and messages.
    const NAME: &'static str;

    /// Field of the response body holding the page's items.
    const RESPONSE_FIELD: &'static str;

    /// Whether requests need a scope id (iTwin id, iModel id).
    const SCOPE_REQUIRED: bool;

    const SEARCH: SearchPolicy;

    const ACCEPT: &'static str = ACCEPT_ITWIN_V2;

    /// Endpoint for the given scope. Only called with `Some` when
    /// `SCOPE_REQUIRED` is set.
    fn endpoint(scope: Option<&str>) -> Endpoint;
}

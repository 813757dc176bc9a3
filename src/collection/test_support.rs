//! Item fixture shared by the collection tests.

use serde::Deserialize;
use std::sync::Arc;

use super::endpoint::{Collection, Endpoint, SearchPolicy};
use super::item::{CollectionItem, SortValue};
use crate::client::ACCEPT_ITWIN_V1;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: Option<String>,
    pub note: Option<String>,
    pub pinned: Option<bool>,
    pub size: Option<f64>,
    pub created: Option<String>,
}

impl Asset {
    pub fn named(id: &str, name: &str, note: &str) -> Self {
        Self {
            id: id.to_string(),
            name: Some(name.to_string()),
            note: Some(note.to_string()),
            pinned: None,
            size: None,
            created: None,
        }
    }

    pub fn bare(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: None,
            note: None,
            pinned: None,
            size: None,
            created: None,
        }
    }
}

impl CollectionItem for Asset {
    const SORT_KEYS: &'static [&'static str] = &["name", "note", "pinned", "size", "created"];

    fn id(&self) -> &str {
        &self.id
    }

    fn filter_fields(&self) -> Vec<Option<&str>> {
        vec![self.name.as_deref(), self.note.as_deref()]
    }

    fn sort_value(&self, key: &str) -> SortValue<'_> {
        match key {
            "name" => SortValue::text(self.name.as_deref()),
            "note" => SortValue::text(self.note.as_deref()),
            "pinned" => self.pinned.map(SortValue::Bool).unwrap_or(SortValue::Empty),
            "size" => SortValue::number(self.size),
            "created" => SortValue::date(self.created.as_deref()),
            _ => SortValue::Empty,
        }
    }
}

/// Display names `d a e b c` with secondary notes `e d c b a`, ids 1..=5.
pub fn lettered() -> Arc<[Asset]> {
    let names = ["d", "a", "e", "b", "c"];
    let notes = ["e", "d", "c", "b", "a"];
    names
        .iter()
        .zip(notes.iter())
        .enumerate()
        .map(|(i, (name, note))| Asset::named(&(i + 1).to_string(), name, note))
        .collect()
}

pub fn ids(items: &[Asset]) -> Vec<&str> {
    items.iter().map(|a| a.id.as_str()).collect()
}

/// Scoped, server-searched collection of `Asset`s.
pub struct ScopedAssets;

impl Collection for ScopedAssets {
    type Item = Asset;
    const NAME: &'static str = "assets";
    const RESPONSE_FIELD: &'static str = "assets";
    const SCOPE_REQUIRED: bool = true;
    const SEARCH: SearchPolicy = SearchPolicy::Server;

    fn endpoint(scope: Option<&str>) -> Endpoint {
        Endpoint::new("assets").with_query("groupId", scope.unwrap_or_default())
    }
}

/// Unscoped, client-searched collection of `Asset`s.
pub struct LocalAssets;

impl Collection for LocalAssets {
    type Item = Asset;
    const NAME: &'static str = "local assets";
    const RESPONSE_FIELD: &'static str = "assets";
    const SCOPE_REQUIRED: bool = false;
    const SEARCH: SearchPolicy = SearchPolicy::Client;
    const ACCEPT: &'static str = ACCEPT_ITWIN_V1;

    fn endpoint(_scope: Option<&str>) -> Endpoint {
        Endpoint::new("local/assets")
    }
}

/// Response body holding `count` assets numbered from `first`.
pub fn asset_page(first: usize, count: usize) -> serde_json::Value {
    let assets: Vec<serde_json::Value> = (first..first + count)
        .map(|n| serde_json::json!({ "id": n.to_string(), "name": format!("asset {}", n) }))
        .collect();
    serde_json::json!({ "assets": assets })
}

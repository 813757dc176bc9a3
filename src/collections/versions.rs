//! Version history of one iModel. The iModel id is the scope and goes into
//! the path.

use serde::{Deserialize, Serialize};
use urlencoding::encode;

use crate::collection::{Collection, CollectionItem, Endpoint, SearchPolicy, SortValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedVersion {
    pub id: String,
    pub display_name: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub changeset_id: Option<String>,
    pub changeset_index: Option<u64>,
    pub state: Option<String>,
    pub created_date_time: Option<String>,
}

impl CollectionItem for NamedVersion {
    const SORT_KEYS: &'static [&'static str] = &[
        "displayName",
        "name",
        "description",
        "changesetIndex",
        "createdDateTime",
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn filter_fields(&self) -> Vec<Option<&str>> {
        vec![self.display_name.as_deref(), self.description.as_deref()]
    }

    fn sort_value(&self, key: &str) -> SortValue<'_> {
        match key {
            "displayName" => SortValue::text(self.display_name.as_deref()),
            "name" => SortValue::text(self.name.as_deref()),
            "description" => SortValue::text(self.description.as_deref()),
            "changesetIndex" => SortValue::number(self.changeset_index.map(|i| i as f64)),
            "createdDateTime" => SortValue::date(self.created_date_time.as_deref()),
            _ => SortValue::Empty,
        }
    }
}

pub struct NamedVersions;

impl Collection for NamedVersions {
    type Item = NamedVersion;
    const NAME: &'static str = "named versions";
    const RESPONSE_FIELD: &'static str = "namedVersions";
    const SCOPE_REQUIRED: bool = true;
    const SEARCH: SearchPolicy = SearchPolicy::Client;

    fn endpoint(scope: Option<&str>) -> Endpoint {
        Endpoint::new(format!(
            "imodels/{}/namedversions",
            encode(scope.unwrap_or_default())
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Changeset {
    pub id: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub index: Option<u64>,
    pub briefcase_id: Option<u64>,
    pub push_date_time: Option<String>,
}

impl CollectionItem for Changeset {
    const SORT_KEYS: &'static [&'static str] = &["index", "displayName", "description", "pushDateTime"];

    fn id(&self) -> &str {
        &self.id
    }

    fn filter_fields(&self) -> Vec<Option<&str>> {
        vec![self.display_name.as_deref(), self.description.as_deref()]
    }

    fn sort_value(&self, key: &str) -> SortValue<'_> {
        match key {
            "index" => SortValue::number(self.index.map(|i| i as f64)),
            "displayName" => SortValue::text(self.display_name.as_deref()),
            "description" => SortValue::text(self.description.as_deref()),
            "pushDateTime" => SortValue::date(self.push_date_time.as_deref()),
            _ => SortValue::Empty,
        }
    }
}

pub struct Changesets;

impl Collection for Changesets {
    type Item = Changeset;
    const NAME: &'static str = "changesets";
    const RESPONSE_FIELD: &'static str = "changesets";
    const SCOPE_REQUIRED: bool = true;
    const SEARCH: SearchPolicy = SearchPolicy::Client;

    fn endpoint(scope: Option<&str>) -> Endpoint {
        Endpoint::new(format!(
            "imodels/{}/changesets",
            encode(scope.unwrap_or_default())
        ))
    }
}

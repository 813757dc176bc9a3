use serde::{Deserialize, Serialize};

use crate::collection::{Collection, CollectionItem, Endpoint, SearchPolicy, SortValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ITwin {
    pub id: String,
    pub display_name: Option<String>,
    pub number: Option<String>,
    pub class: Option<String>,
    pub sub_class: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub status: Option<String>,
    pub data_center_location: Option<String>,
    pub created_date_time: Option<String>,
}

impl CollectionItem for ITwin {
    const SORT_KEYS: &'static [&'static str] = &[
        "displayName",
        "number",
        "class",
        "subClass",
        "type",
        "status",
        "dataCenterLocation",
        "createdDateTime",
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn filter_fields(&self) -> Vec<Option<&str>> {
        vec![self.display_name.as_deref(), self.number.as_deref()]
    }

    fn sort_value(&self, key: &str) -> SortValue<'_> {
        match key {
            "displayName" => SortValue::text(self.display_name.as_deref()),
            "number" => SortValue::text(self.number.as_deref()),
            "class" => SortValue::text(self.class.as_deref()),
            "subClass" => SortValue::text(self.sub_class.as_deref()),
            "type" => SortValue::text(self.type_.as_deref()),
            "status" => SortValue::text(self.status.as_deref()),
            "dataCenterLocation" => SortValue::text(self.data_center_location.as_deref()),
            "createdDateTime" => SortValue::date(self.created_date_time.as_deref()),
            _ => SortValue::Empty,
        }
    }
}

/// Project iTwins the caller is a member of.
pub struct ITwins;

impl Collection for ITwins {
    type Item = ITwin;
    const NAME: &'static str = "itwins";
    const RESPONSE_FIELD: &'static str = "iTwins";
    const SCOPE_REQUIRED: bool = false;
    const SEARCH: SearchPolicy = SearchPolicy::Server;

    fn endpoint(_scope: Option<&str>) -> Endpoint {
        Endpoint::new("itwins").with_query("subClass", "Project")
    }
}

pub struct FavoriteITwins;

impl Collection for FavoriteITwins {
    type Item = ITwin;
    const NAME: &'static str = "favorite itwins";
    const RESPONSE_FIELD: &'static str = "iTwins";
    const SCOPE_REQUIRED: bool = false;
    const SEARCH: SearchPolicy = SearchPolicy::Client;

    fn endpoint(_scope: Option<&str>) -> Endpoint {
        Endpoint::new("itwins/favorites").with_query("subClass", "Project")
    }
}

pub struct RecentITwins;

impl Collection for RecentITwins {
    type Item = ITwin;
    const NAME: &'static str = "recent itwins";
    const RESPONSE_FIELD: &'static str = "iTwins";
    const SCOPE_REQUIRED: bool = false;
    const SEARCH: SearchPolicy = SearchPolicy::Client;

    fn endpoint(_scope: Option<&str>) -> Endpoint {
        Endpoint::new("itwins/recents").with_query("subClass", "Project")
    }
}

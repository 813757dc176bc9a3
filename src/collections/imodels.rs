use serde::{Deserialize, Serialize};

use crate::collection::{Collection, CollectionItem, Endpoint, SearchPolicy, SortValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IModel {
    pub id: String,
    pub display_name: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub state: Option<String>,
    pub created_date_time: Option<String>,
    #[serde(rename = "iTwinId")]
    pub itwin_id: Option<String>,
}

impl CollectionItem for IModel {
    const SORT_KEYS: &'static [&'static str] = &[
        "displayName",
        "name",
        "description",
        "state",
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
            "state" => SortValue::text(self.state.as_deref()),
            "createdDateTime" => SortValue::date(self.created_date_time.as_deref()),
            _ => SortValue::Empty,
        }
    }
}

/// iModels of one iTwin: `GET /imodels?iTwinId={scope}`.
pub struct IModels;

impl Collection for IModels {
    type Item = IModel;
    const NAME: &'static str = "imodels";
    const RESPONSE_FIELD: &'static str = "iModels";
    const SCOPE_REQUIRED: bool = true;
    const SEARCH: SearchPolicy = SearchPolicy::Server;

    fn endpoint(scope: Option<&str>) -> Endpoint {
        Endpoint::new("imodels").with_query("iTwinId", scope.unwrap_or_default())
    }
}

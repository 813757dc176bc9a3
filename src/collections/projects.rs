use serde::{Deserialize, Serialize};

use crate::client::ACCEPT_ITWIN_V1;
use crate::collection::{Collection, CollectionItem, Endpoint, SearchPolicy, SortValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub display_name: Option<String>,
    pub project_number: Option<String>,
    pub registration_date_time: Option<String>,
    pub industry: Option<String>,
    pub project_type: Option<String>,
    pub geographic_location: Option<String>,
    pub status: Option<String>,
}

impl CollectionItem for Project {
    const SORT_KEYS: &'static [&'static str] = &[
        "displayName",
        "projectNumber",
        "registrationDateTime",
        "industry",
        "projectType",
        "geographicLocation",
        "status",
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn filter_fields(&self) -> Vec<Option<&str>> {
        vec![self.display_name.as_deref(), self.project_number.as_deref()]
    }

    fn sort_value(&self, key: &str) -> SortValue<'_> {
        match key {
            "displayName" => SortValue::text(self.display_name.as_deref()),
            "projectNumber" => SortValue::text(self.project_number.as_deref()),
            "registrationDateTime" => SortValue::date(self.registration_date_time.as_deref()),
            "industry" => SortValue::text(self.industry.as_deref()),
            "projectType" => SortValue::text(self.project_type.as_deref()),
            "geographicLocation" => SortValue::text(self.geographic_location.as_deref()),
            "status" => SortValue::text(self.status.as_deref()),
            _ => SortValue::Empty,
        }
    }
}

/// Legacy projects API. Served as v1 and searched locally.
pub struct Projects;

impl Collection for Projects {
    type Item = Project;
    const NAME: &'static str = "projects";
    const RESPONSE_FIELD: &'static str = "projects";
    const SCOPE_REQUIRED: bool = false;
    const SEARCH: SearchPolicy = SearchPolicy::Client;
    const ACCEPT: &'static str = ACCEPT_ITWIN_V1;

    fn endpoint(_scope: Option<&str>) -> Endpoint {
        Endpoint::new("projects")
    }
}

use tabled::Tabled;

use crate::cli::commands::{CommandContext, ListParams, fetch_collection, render};
use crate::cli::error::CliResult;
use crate::cli::utils::{format_date, or_dash, truncate_with_ellipsis};
use crate::collections::{Changeset, Changesets, NamedVersion, NamedVersions};

#[derive(Tabled)]
struct NamedVersionDisplay {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Changeset")]
    changeset: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&NamedVersion> for NamedVersionDisplay {
    fn from(version: &NamedVersion) -> Self {
        Self {
            id: version.id.clone(),
            name: truncate_with_ellipsis(&or_dash(version.display_name.as_deref()), 40),
            changeset: version
                .changeset_index
                .map(|i| format!("#{}", i))
                .unwrap_or_else(|| "-".to_string()),
            created: format_date(version.created_date_time.as_deref()),
        }
    }
}

#[derive(Tabled)]
struct ChangesetDisplay {
    #[tabled(rename = "#")]
    index: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Pushed")]
    pushed: String,
}

impl From<&Changeset> for ChangesetDisplay {
    fn from(changeset: &Changeset) -> Self {
        Self {
            index: changeset
                .index
                .map(|i| i.to_string())
                .unwrap_or_else(|| "-".to_string()),
            id: changeset.id.clone(),
            description: truncate_with_ellipsis(&or_dash(changeset.description.as_deref()), 50),
            pushed: format_date(changeset.push_date_time.as_deref()),
        }
    }
}

/// List the named versions of an iModel
pub async fn list_named_versions(
    ctx: &CommandContext,
    imodel_id: &str,
    params: ListParams<'_>,
    format: &str,
) -> CliResult<String> {
    let versions =
        fetch_collection::<NamedVersions>(ctx, Some(imodel_id), "--imodel", &params).await?;
    render::<NamedVersion, NamedVersionDisplay>(&versions, format, "No named versions found.")
}

/// List the changesets of an iModel
pub async fn list_changesets(
    ctx: &CommandContext,
    imodel_id: &str,
    params: ListParams<'_>,
    format: &str,
) -> CliResult<String> {
    let changesets =
        fetch_collection::<Changesets>(ctx, Some(imodel_id), "--imodel", &params).await?;
    render::<Changeset, ChangesetDisplay>(&changesets, format, "No changesets found.")
}

use std::path::Path;
use tabled::Tabled;

use crate::cli::commands::{CommandContext, ListParams, fetch_collection, render};
use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{format_date, or_dash, truncate_with_ellipsis};
use crate::collections::{IModel, IModels};
use crate::thumbnails::ThumbnailLoader;

#[derive(Tabled)]
struct IModelDisplay {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&IModel> for IModelDisplay {
    fn from(imodel: &IModel) -> Self {
        Self {
            id: imodel.id.clone(),
            name: truncate_with_ellipsis(&or_dash(imodel.display_name.as_deref()), 40),
            state: or_dash(imodel.state.as_deref()),
            created: format_date(imodel.created_date_time.as_deref()),
            description: imodel
                .description
                .as_ref()
                .map(|d| truncate_with_ellipsis(d, 50))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// List the iModels of an iTwin
pub async fn list_imodels(
    ctx: &CommandContext,
    itwin_id: &str,
    params: ListParams<'_>,
    format: &str,
) -> CliResult<String> {
    let imodels = fetch_collection::<IModels>(ctx, Some(itwin_id), "--itwin", &params).await?;
    render::<IModel, IModelDisplay>(&imodels, format, "No iModels found.")
}

/// Fetch an iModel thumbnail and write it to `out`, or print it as a
/// `data:` URL when no file is given
pub async fn thumbnail(ctx: &CommandContext, imodel_id: &str, out: Option<&Path>) -> CliResult<String> {
    let token = ctx.token()?;
    let loader = ThumbnailLoader::new(ctx.transport.clone(), ctx.config.thumbnail_cache());

    let thumbnail = loader
        .load(imodel_id, token)
        .await
        .ok_or_else(|| CliError::ThumbnailUnavailable {
            id: imodel_id.to_string(),
        })?;

    match out {
        Some(path) => {
            tokio::fs::write(path, thumbnail.bytes()).await?;
            Ok(format!(
                "✓ Saved thumbnail of {} to {} ({} bytes)",
                imodel_id,
                path.display(),
                thumbnail.bytes().len()
            ))
        }
        None => Ok(thumbnail.data_url()),
    }
}

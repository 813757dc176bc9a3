use std::collections::HashSet;
use tabled::{Table, Tabled};

use crate::cli::commands::{CommandContext, ListParams, fetch_collection, render};
use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, or_dash, truncate_with_ellipsis};
use crate::collections::{ITwin, ITwins, RecentITwins};
use crate::favorites::FavoritesStore;

/// Which iTwin listing to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ITwinSource {
    #[default]
    All,
    Recent,
}

#[derive(Tabled)]
pub(crate) struct ITwinDisplay {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Number")]
    number: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "★")]
    favorite: String,
}

impl From<&ITwin> for ITwinDisplay {
    fn from(itwin: &ITwin) -> Self {
        Self::marked(itwin, false)
    }
}

impl ITwinDisplay {
    fn marked(itwin: &ITwin, favorite: bool) -> Self {
        Self {
            id: itwin.id.clone(),
            name: truncate_with_ellipsis(&or_dash(itwin.display_name.as_deref()), 40),
            number: or_dash(itwin.number.as_deref()),
            status: or_dash(itwin.status.as_deref()),
            favorite: if favorite { "★".to_string() } else { String::new() },
        }
    }
}

/// List project iTwins, marking favorites in table output
pub async fn list_itwins(
    ctx: &CommandContext,
    source: ITwinSource,
    params: ListParams<'_>,
    format: &str,
) -> CliResult<String> {
    let itwins = match source {
        ITwinSource::All => fetch_collection::<ITwins>(ctx, None, "", &params).await?,
        ITwinSource::Recent => fetch_collection::<RecentITwins>(ctx, None, "", &params).await?,
    };

    if format == "json" || itwins.is_empty() {
        return render::<ITwin, ITwinDisplay>(&itwins, format, "No iTwins found.");
    }

    let favorites = load_favorites(ctx).await;
    let rows: Vec<ITwinDisplay> = itwins
        .iter()
        .map(|itwin| ITwinDisplay::marked(itwin, favorites.contains(&itwin.id)))
        .collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    Ok(table.to_string())
}

async fn load_favorites(ctx: &CommandContext) -> HashSet<String> {
    let Ok(token) = ctx.token() else {
        return HashSet::new();
    };
    let mut store = FavoritesStore::itwins(ctx.transport.clone());
    store.load(token).await;
    store.ids().clone()
}

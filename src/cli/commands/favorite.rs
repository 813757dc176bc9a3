use crate::cli::commands::itwin::ITwinDisplay;
use crate::cli::commands::{CommandContext, ListParams, fetch_collection, render};
use crate::cli::error::CliResult;
use crate::collections::{FavoriteITwins, ITwin};
use crate::favorites::FavoritesStore;

/// List favorite iTwins
pub async fn list_favorites(
    ctx: &CommandContext,
    params: ListParams<'_>,
    format: &str,
) -> CliResult<String> {
    let itwins = fetch_collection::<FavoriteITwins>(ctx, None, "", &params).await?;
    render::<ITwin, ITwinDisplay>(&itwins, format, "No favorite iTwins.")
}

/// Mark an iTwin as favorite
pub async fn add_favorite(ctx: &CommandContext, id: &str) -> CliResult<String> {
    let token = ctx.token()?;
    let mut store = FavoritesStore::itwins(ctx.transport.clone());
    store.try_load(token).await?;

    if store.try_add(id, token).await? {
        Ok(format!("✓ Added iTwin {} to favorites", id))
    } else {
        Ok(format!("iTwin {} is already a favorite", id))
    }
}

/// Unmark a favorite iTwin
pub async fn remove_favorite(ctx: &CommandContext, id: &str) -> CliResult<String> {
    let token = ctx.token()?;
    let mut store = FavoritesStore::itwins(ctx.transport.clone());
    store.try_load(token).await?;

    if store.try_remove(id, token).await? {
        Ok(format!("✓ Removed iTwin {} from favorites", id))
    } else {
        Ok(format!("iTwin {} is not a favorite", id))
    }
}

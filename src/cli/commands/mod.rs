pub mod favorite;
pub mod imodel;
pub mod itwin;
pub mod project;
pub mod version;

use serde::Serialize;
use std::sync::Arc;
use tabled::{Table, Tabled};
use tracing::debug;

use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::apply_table_style;
use crate::client::{AccessToken, ApiClient, Transport};
use crate::collection::{Collection, CollectionController, CollectionItem, FetchStatus, SortSpec};
use crate::config::Config;

/// What every command needs: the transport and the resolved configuration.
pub struct CommandContext {
    pub transport: Arc<dyn Transport>,
    pub config: Config,
}

impl CommandContext {
    pub fn new(config: Config) -> Self {
        let transport = Arc::new(ApiClient::new(Some(config.api_url.clone())));
        Self::with_transport(config, transport)
    }

    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self { transport, config }
    }

    pub fn token(&self) -> CliResult<&AccessToken> {
        self.config.access_token.as_ref().ok_or(CliError::MissingToken)
    }
}

/// Common search, sort and paging parameters for all list commands
#[derive(Debug, Default)]
pub struct ListParams<'a> {
    pub search: Option<&'a str>,
    pub sort: Option<&'a str>,
    pub descending: bool,
    /// Page until the collection is exhausted instead of stopping after the
    /// first page.
    pub all: bool,
}

/// Drive a controller for `C` until it settles and return the filtered,
/// sorted view.
pub async fn fetch_collection<C: Collection>(
    ctx: &CommandContext,
    scope: Option<&str>,
    scope_flag: &'static str,
    params: &ListParams<'_>,
) -> CliResult<Arc<[C::Item]>> {
    let sort = sort_spec::<C::Item>(params)?;

    let mut controller = CollectionController::<C>::new(Arc::clone(&ctx.transport))
        .with_page_size(ctx.config.page_size)
        .with_credential(ctx.config.credential())
        .with_scope(scope.map(str::to_string))
        .with_search(params.search.map(str::to_string));
    controller.start();

    let state = if params.all {
        controller.fetch_all().await
    } else {
        controller.settled().await
    };
    debug!(
        collection = C::NAME,
        status = %state.status,
        count = state.items.len(),
        has_more = state.has_more,
        "collection settled"
    );

    match state.status {
        FetchStatus::Complete => {}
        FetchStatus::TokenRequired => return Err(CliError::MissingToken),
        FetchStatus::ContextRequired => {
            return Err(CliError::MissingScope {
                collection: C::NAME,
                flag: scope_flag,
            });
        }
        _ => return Err(CliError::FetchFailed { collection: C::NAME }),
    }

    let filter = controller.search_filter();
    Ok(controller.view(filter.as_ref(), sort.as_ref()))
}

fn sort_spec<T: CollectionItem>(params: &ListParams<'_>) -> CliResult<Option<SortSpec<T>>> {
    match params.sort {
        None => Ok(None),
        Some(key) if T::SORT_KEYS.iter().any(|k| *k == key) => {
            Ok(Some(SortSpec::by_key(key, params.descending)))
        }
        Some(key) => Err(CliError::UnsupportedSortKey {
            key: key.to_string(),
            supported: T::SORT_KEYS.join(", "),
        }),
    }
}

/// Render items as pretty JSON or a rounded table.
pub fn render<T, D>(items: &[T], format: &str, empty: &str) -> CliResult<String>
where
    T: Serialize,
    D: Tabled + for<'a> From<&'a T>,
{
    match format {
        "json" => Ok(serde_json::to_string_pretty(items)?),
        _ => {
            if items.is_empty() {
                return Ok(empty.to_string());
            }
            let rows: Vec<D> = items.iter().map(D::from).collect();
            let mut table = Table::new(rows);
            apply_table_style(&mut table);
            Ok(table.to_string())
        }
    }
}

#[cfg(test)]
pub(crate) mod test_server;

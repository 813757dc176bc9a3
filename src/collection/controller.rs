//! Fetch orchestration for one remote collection.
//!
//! The controller owns the inputs (credential, scope, search text, static
//! override) and is the only writer of the collection state. Every input
//! change starts a new fetch episode: the in-flight request is cancelled,
//! the accumulated items are dropped and page 0 is requested again. Each
//! page request runs in its own task racing the transport against the
//! episode's `CancellationToken`; results of a cancelled or superseded
//! episode are discarded, so a stale response can never overwrite newer
//! state.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info_span, warn};

use super::endpoint::{Collection, SearchPolicy};
use super::filter::{FilterSpec, filter_items};
use super::item::CollectionItem;
use super::page::PageRequest;
use super::sort::{SortSpec, sort_items};
use super::status::{FetchStatus, StatusEvent};
use crate::client::{AccessToken, ApiRequest, ClientError, ClientResult, Credential, Transport};

pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Snapshot of a collection published to readers.
#[derive(Debug, Clone)]
pub struct CollectionState<T> {
    pub items: Arc<[T]>,
    pub status: FetchStatus,
    /// Whether another page may exist; `fetch_more` is a no-op otherwise.
    pub has_more: bool,
    page: usize,
    episode: u64,
}

impl<T> CollectionState<T> {
    fn initial() -> Self {
        Self {
            items: Arc::from(Vec::new()),
            status: FetchStatus::Uninitialized,
            has_more: false,
            page: 0,
            episode: 0,
        }
    }

    /// Index of the last page applied.
    pub fn page(&self) -> usize {
        self.page
    }

    /// No request is pending.
    pub fn is_settled(&self) -> bool {
        !self.status.is_pending()
    }
}

/// How an evaluation resolves before any request is made.
enum Resolution<T> {
    Override(Arc<[T]>),
    MissingCredential,
    MissingScope,
    Fetch(AccessToken),
}

/// Paginated, filterable, sortable view of a remote collection.
///
/// Inputs can be preset with the `with_*` builders; `start` runs the first
/// evaluation. After that every `set_*` call that actually changes an input
/// re-evaluates. Dropping the controller cancels any outstanding request.
///
/// Page requests are spawned on the current tokio runtime. Without one,
/// an evaluation that needs the network ends in `FetchFailed`.
pub struct CollectionController<C: Collection> {
    transport: Arc<dyn Transport>,
    page_size: usize,
    credential: Option<Credential>,
    scope: Option<String>,
    search: Option<String>,
    static_override: Option<Arc<[C::Item]>>,
    state: Arc<watch::Sender<CollectionState<C::Item>>>,
    in_flight: Option<CancellationToken>,
}

impl<C: Collection> CollectionController<C> {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let (state, _) = watch::channel(CollectionState::initial());
        Self {
            transport,
            page_size: DEFAULT_PAGE_SIZE,
            credential: None,
            scope: None,
            search: None,
            static_override: None,
            state: Arc::new(state),
            in_flight: None,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_credential(mut self, credential: Option<Credential>) -> Self {
        self.credential = credential;
        self
    }

    pub fn with_scope(mut self, scope: Option<String>) -> Self {
        self.scope = normalize(scope);
        self
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = normalize(search);
        self
    }

    pub fn with_static_override(mut self, items: Option<Arc<[C::Item]>>) -> Self {
        self.static_override = items;
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Run the first evaluation. Later calls are no-ops; use `refresh`.
    ///
    /// Must be called inside a tokio runtime for the fetch to run.
    pub fn start(&mut self) {
        if self.state.borrow().status == FetchStatus::Uninitialized {
            self.evaluate();
        }
    }

    /// Drop everything and fetch again from page 0.
    pub fn refresh(&mut self) {
        self.evaluate();
    }

    pub fn set_credential(&mut self, credential: Option<Credential>) {
        if self.credential != credential {
            self.credential = credential;
            self.invalidate();
        }
    }

    pub fn set_scope(&mut self, scope: Option<String>) {
        let scope = normalize(scope);
        if self.scope != scope {
            self.scope = scope;
            self.invalidate();
        }
    }

    /// Change the search text.
    ///
    /// Server-search collections refetch; client-search collections keep
    /// their items and only the next `view` changes.
    pub fn set_search(&mut self, search: Option<String>) {
        let search = normalize(search);
        if self.search != search {
            self.search = search;
            if C::SEARCH == SearchPolicy::Server {
                self.invalidate();
            }
        }
    }

    /// Replace network data with caller-supplied items. Compared by identity.
    pub fn set_static_override(&mut self, items: Option<Arc<[C::Item]>>) {
        let unchanged = match (&self.static_override, &items) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        if !unchanged {
            self.static_override = items;
            self.invalidate();
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> CollectionState<C::Item> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CollectionState<C::Item>> {
        self.state.subscribe()
    }

    /// Wait until no request is pending and return that snapshot.
    pub async fn settled(&self) -> CollectionState<C::Item> {
        let mut rx = self.subscribe();
        match rx.wait_for(CollectionState::is_settled).await {
            Ok(state) => state.clone(),
            // The sender lives in `self`, so this only happens mid-teardown.
            Err(_) => self.state(),
        }
    }

    /// Request the next page, appending it to the accumulated items.
    ///
    /// Returns `false` when no further page may exist, the collection is not
    /// complete (still loading, failed, or served from an override) or the
    /// credential has gone away.
    pub fn fetch_more(&mut self) -> bool {
        let (episode, next_page) = {
            let state = self.state.borrow();
            if state.status != FetchStatus::Complete
                || !state.has_more
                || self.static_override.is_some()
            {
                return false;
            }
            (state.episode, state.page + 1)
        };

        self.abort_in_flight();
        let token = self.credential.as_ref().and_then(Credential::resolve);
        self.state.send_modify(|state| {
            state.status = state.status.transition(StatusEvent::PageRequested);
            if token.is_none() {
                state.items = Arc::from(Vec::new());
                state.has_more = false;
                state.status = state.status.transition(StatusEvent::CredentialMissing);
            }
        });

        match token {
            Some(token) => self.spawn_page(episode, next_page, token),
            None => {
                warn!(collection = C::NAME, "credential unavailable for next page");
                false
            }
        }
    }

    /// Page until the collection is exhausted or stops being complete.
    pub async fn fetch_all(&mut self) -> CollectionState<C::Item> {
        loop {
            let state = self.settled().await;
            if state.status != FetchStatus::Complete || !self.fetch_more() {
                return self.state();
            }
        }
    }

    /// Filter then sort the current snapshot.
    pub fn view(
        &self,
        filter: Option<&FilterSpec<C::Item>>,
        sort: Option<&SortSpec<C::Item>>,
    ) -> Arc<[C::Item]> {
        let items = Arc::clone(&self.state.borrow().items);
        let filtered = filter_items(&items, filter);
        sort_items(&filtered, sort)
    }

    /// Text filter to apply locally for the current search text.
    ///
    /// `None` for server-search collections, whose pages already match.
    pub fn search_filter(&self) -> Option<FilterSpec<C::Item>> {
        match C::SEARCH {
            SearchPolicy::Client => self.search.clone().map(FilterSpec::Text),
            SearchPolicy::Server => None,
        }
    }

    fn invalidate(&mut self) {
        if self.state.borrow().status != FetchStatus::Uninitialized {
            self.evaluate();
        }
    }

    fn resolve(&self) -> Resolution<C::Item> {
        if let Some(items) = &self.static_override {
            return Resolution::Override(Arc::clone(items));
        }
        let Some(token) = self.credential.as_ref().and_then(Credential::resolve) else {
            return Resolution::MissingCredential;
        };
        if C::SCOPE_REQUIRED && self.scope.is_none() {
            return Resolution::MissingScope;
        }
        Resolution::Fetch(token)
    }

    fn evaluate(&mut self) {
        self.abort_in_flight();
        let resolution = self.resolve();

        let mut episode = 0;
        self.state.send_modify(|state| {
            state.episode += 1;
            episode = state.episode;
            state.items = Arc::from(Vec::new());
            state.page = 0;
            state.has_more = false;
            state.status = state.status.transition(StatusEvent::Evaluate);

            match &resolution {
                Resolution::Override(items) => {
                    state.items = Arc::clone(items);
                    state.status = state.status.transition(StatusEvent::Succeeded);
                }
                Resolution::MissingCredential => {
                    state.status = state.status.transition(StatusEvent::CredentialMissing);
                }
                Resolution::MissingScope => {
                    state.status = state.status.transition(StatusEvent::ScopeMissing);
                }
                Resolution::Fetch(_) => {}
            }
        });

        debug!(collection = C::NAME, episode, "evaluated collection inputs");

        if let Resolution::Fetch(token) = resolution {
            self.spawn_page(episode, 0, token);
        }
    }

    /// Returns `false` when there was no runtime to run the request on.
    fn spawn_page(&mut self, episode: u64, page: usize, token: AccessToken) -> bool {
        let cancel = CancellationToken::new();
        self.in_flight = Some(cancel.clone());

        let window = PageRequest::for_page(page, self.page_size);
        let request = page_request::<C>(
            self.scope.as_deref(),
            self.search.as_deref(),
            window,
            token,
        );
        let task = PageTask {
            transport: Arc::clone(&self.transport),
            state: Arc::clone(&self.state),
            cancel,
            episode,
            page,
            window,
        };

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!(collection = C::NAME, error = %e, "no tokio runtime for page request");
                self.in_flight = None;
                task.mark_failed();
                return false;
            }
        };

        let span = info_span!("collection_page", collection = C::NAME, episode, page);
        runtime.spawn(task.run::<C>(request).instrument(span));
        true
    }

    fn abort_in_flight(&mut self) {
        if let Some(cancel) = self.in_flight.take() {
            cancel.cancel();
        }
    }
}

impl<C: Collection> Drop for CollectionController<C> {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}

/// One page request of one episode.
struct PageTask<T> {
    transport: Arc<dyn Transport>,
    state: Arc<watch::Sender<CollectionState<T>>>,
    cancel: CancellationToken,
    episode: u64,
    page: usize,
    window: PageRequest,
}

impl<T: CollectionItem + DeserializeOwned> PageTask<T> {
    async fn run<C: Collection<Item = T>>(self, request: ApiRequest) {
        let result = tokio::select! {
            _ = self.cancel.cancelled() => {
                debug!("page request aborted");
                return;
            }
            result = self.transport.get_json(request) => result,
        };

        match result.and_then(|body| extract_items::<T>(body, C::RESPONSE_FIELD)) {
            Ok(items) => self.apply(items),
            Err(e) => self.fail(e),
        }
    }

    /// True when a newer episode or an abort has made this result stale.
    fn is_stale(&self, state: &CollectionState<T>) -> bool {
        state.episode != self.episode || self.cancel.is_cancelled()
    }

    fn apply(&self, items: Vec<T>) {
        let received = items.len();
        let last = self.window.is_last(received);
        let page = self.page;

        let applied = self.state.send_if_modified(|state| {
            if self.is_stale(state) {
                return false;
            }
            state.items = if page == 0 {
                Arc::from(items)
            } else {
                state.items.iter().cloned().chain(items).collect()
            };
            state.page = page;
            state.has_more = !last;
            state.status = state.status.transition(StatusEvent::Succeeded);
            true
        });

        if applied {
            debug!(received, has_more = !last, "applied page");
        } else {
            debug!("discarded stale page");
        }
    }

    fn fail(&self, e: ClientError) {
        if self.mark_failed() {
            error!(error = %e, "failed to fetch collection page");
        }
    }

    /// Clear the items and move to `FetchFailed` unless the episode is stale.
    fn mark_failed(&self) -> bool {
        self.state.send_if_modified(|state| {
            if self.is_stale(state) {
                return false;
            }
            state.items = Arc::from(Vec::new());
            state.has_more = false;
            state.status = state.status.transition(StatusEvent::Failed);
            true
        })
    }
}

fn page_request<C: Collection>(
    scope: Option<&str>,
    search: Option<&str>,
    window: PageRequest,
    token: AccessToken,
) -> ApiRequest {
    let endpoint = C::endpoint(scope);
    let mut request = ApiRequest::new(endpoint.path, token).with_accept(C::ACCEPT);
    for (key, value) in endpoint.query {
        request = request.with_query(key, value);
    }
    request = request
        .with_query("$skip", window.skip.to_string())
        .with_query("$top", window.top.to_string());
    if C::SEARCH == SearchPolicy::Server
        && let Some(search) = search
    {
        request = request.with_query("$search", search);
    }
    request
}

fn extract_items<T: DeserializeOwned>(mut body: Value, field: &str) -> ClientResult<Vec<T>> {
    let items = body
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| ClientError::MissingField {
            field: field.to_string(),
        })?;
    Ok(serde_json::from_value(items)?)
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

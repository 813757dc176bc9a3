//! Generic remote collection controller.
//!
//! One controller serves every paged platform collection (iModels, iTwins,
//! projects, versions). Collection-specific behaviour lives in a small
//! `Collection` adapter: endpoint, response field, scope requirement and
//! search policy. The controller resolves items from a static override or
//! the network, tracks a `FetchStatus`, and hands out immutable snapshots
//! that are filtered and sorted client-side.
//!
//! # Architecture
//!
//! - `item`: what filter and sort need to know about an item
//! - `endpoint`: the `Collection` adapter trait
//! - `page`: `$skip`/`$top` arithmetic
//! - `status`: the fetch status machine
//! - `filter` / `sort`: pure client-side passes over snapshots
//! - `controller`: fetch orchestration and cancellation

mod controller;
mod endpoint;
mod filter;
mod item;
mod page;
mod sort;
mod status;

#[cfg(test)]
pub(crate) mod test_support;

pub use controller::{CollectionController, CollectionState, DEFAULT_PAGE_SIZE};
pub use endpoint::{Collection, Endpoint, SearchPolicy};
pub use filter::{FilterSpec, filter_items};
pub use item::{CollectionItem, SortValue};
pub use page::PageRequest;
pub use sort::{SortSpec, compare_values, locale_compare, sort_items};
pub use status::{FetchStatus, StatusEvent};

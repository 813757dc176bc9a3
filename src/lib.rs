//! Paginated, filterable, sortable views of iTwin platform collections.
//!
//! [`collection::CollectionController`] drives one remote collection through
//! a [`client::Transport`]; [`collections`] holds the iModel, iTwin, project
//! and version adapters. Favorites and thumbnails sit beside it and share the
//! same transport.

pub mod client;
pub mod collection;
pub mod collections;
pub mod config;
pub mod favorites;
pub mod thumbnails;

#[cfg(feature = "cli")]
pub mod cli;

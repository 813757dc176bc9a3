//! Collection adapters for the iTwin platform endpoints.
//!
//! Each adapter pairs an item type with the `Collection` description the
//! generic controller needs. Items keep the API's camelCase field names on
//! the wire and expose the same names as sort keys.

mod imodels;
mod itwins;
mod projects;
mod versions;


pub use imodels::{IModel, IModels};
pub use itwins::{FavoriteITwins, ITwin, ITwins, RecentITwins};
pub use projects::{Project, Projects};
pub use versions::{Changeset, Changesets, NamedVersion, NamedVersions};

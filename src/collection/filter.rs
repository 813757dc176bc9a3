use std::fmt;
use std::sync::Arc;

use super::item::CollectionItem;

type Predicate<T> = dyn Fn(&T) -> bool + Send + Sync;

/// Client-side filter over a collection snapshot.
pub enum FilterSpec<T> {
    /// Case-insensitive substring match against the item's filter fields.
    Text(String),
    Predicate(Arc<Predicate<T>>),
}

impl<T> FilterSpec<T> {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(predicate))
    }
}

impl<T> Clone for FilterSpec<T> {
    fn clone(&self) -> Self {
        match self {
            FilterSpec::Text(text) => FilterSpec::Text(text.clone()),
            FilterSpec::Predicate(p) => FilterSpec::Predicate(Arc::clone(p)),
        }
    }
}

impl<T> fmt::Debug for FilterSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterSpec::Text(text) => f.debug_tuple("Text").field(text).finish(),
            FilterSpec::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Filter a snapshot.
///
/// No spec, or an empty text, returns the input `Arc` itself so callers can
/// detect "nothing changed" with `Arc::ptr_eq`. Otherwise a new sequence is
/// built in the original relative order; the input is never touched.
pub fn filter_items<T: CollectionItem>(items: &Arc<[T]>, spec: Option<&FilterSpec<T>>) -> Arc<[T]> {
    match spec {
        None => Arc::clone(items),
        Some(FilterSpec::Text(text)) if text.is_empty() => Arc::clone(items),
        Some(FilterSpec::Text(text)) => {
            let needle = text.to_lowercase();
            items
                .iter()
                .filter(|item| matches_text(*item, &needle))
                .cloned()
                .collect()
        }
        Some(FilterSpec::Predicate(predicate)) => {
            items.iter().filter(|item| predicate(*item)).cloned().collect()
        }
    }
}

fn matches_text<T: CollectionItem>(item: &T, needle: &str) -> bool {
    item.filter_fields()
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

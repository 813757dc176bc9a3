use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::item::{CollectionItem, SortValue};

type Comparator<T> = dyn Fn(&T, &T) -> Ordering + Send + Sync;

/// Client-side sort over a collection snapshot.
pub enum SortSpec<T> {
    /// Sort by one of `CollectionItem::SORT_KEYS`.
    Key { key: String, descending: bool },
    Comparator(Arc<Comparator<T>>),
}

impl<T> SortSpec<T> {
    pub fn by_key(key: impl Into<String>, descending: bool) -> Self {
        Self::Key {
            key: key.into(),
            descending,
        }
    }

    pub fn comparator<F>(comparator: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self::Comparator(Arc::new(comparator))
    }
}

impl<T> Clone for SortSpec<T> {
    fn clone(&self) -> Self {
        match self {
            SortSpec::Key { key, descending } => SortSpec::Key {
                key: key.clone(),
                descending: *descending,
            },
            SortSpec::Comparator(c) => SortSpec::Comparator(Arc::clone(c)),
        }
    }
}

impl<T> fmt::Debug for SortSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortSpec::Key { key, descending } => f
                .debug_struct("Key")
                .field("key", key)
                .field("descending", descending)
                .finish(),
            SortSpec::Comparator(_) => f.write_str("Comparator(..)"),
        }
    }
}

/// Sort a snapshot.
///
/// No spec, or a key outside `T::SORT_KEYS`, returns the input `Arc` itself.
/// Descending order is the reversed ascending result, so items that compare
/// equal also swap places.
pub fn sort_items<T: CollectionItem>(items: &Arc<[T]>, spec: Option<&SortSpec<T>>) -> Arc<[T]> {
    match spec {
        None => Arc::clone(items),
        Some(SortSpec::Comparator(comparator)) => {
            let mut sorted = items.to_vec();
            sorted.sort_by(|a, b| comparator(a, b));
            sorted.into()
        }
        Some(SortSpec::Key { key, descending }) => {
            if !T::SORT_KEYS.contains(&key.as_str()) {
                return Arc::clone(items);
            }
            let mut sorted = items.to_vec();
            sorted.sort_by(|a, b| compare_values(&a.sort_value(key), &b.sort_value(key)));
            if *descending {
                sorted.reverse();
            }
            sorted.into()
        }
    }
}

/// Ascending comparison of two field values.
///
/// Booleans put `true` first, empty values go last, dates compare by
/// instant, numbers numerically and text by `locale_compare`.
pub fn compare_values(a: &SortValue<'_>, b: &SortValue<'_>) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    match (a, b) {
        (SortValue::Bool(a), SortValue::Bool(_)) => {
            if *a {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        (SortValue::Empty, _) => Ordering::Greater,
        (_, SortValue::Empty) => Ordering::Less,
        (SortValue::Date(a), SortValue::Date(b)) => compare_dates(a, b),
        (SortValue::Number(a), SortValue::Number(b)) => {
            a.partial_cmp(b).unwrap_or(Ordering::Equal)
        }
        (SortValue::Text(a), SortValue::Text(b)) => locale_compare(a, b),
        _ => locale_compare(&a.display(), &b.display()),
    }
}

/// Case-insensitive collation; on a tie lowercase sorts before uppercase.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

fn compare_dates(a: &str, b: &str) -> Ordering {
    match (parse_instant(a), parse_instant(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => locale_compare(a, b),
    }
}

/// Milliseconds since the epoch for RFC 3339, naive date-time or plain date.
fn parse_instant(value: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc().timestamp_millis());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

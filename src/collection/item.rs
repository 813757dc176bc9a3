use std::borrow::Cow;
use std::fmt::Debug;

/// Value of an item field as seen by the keyed sort.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    /// Absent, null, empty string or zero.
    Empty,
    Bool(bool),
    Number(f64),
    /// ISO 8601 timestamp, compared by instant.
    Date(&'a str),
    Text(&'a str),
}

impl<'a> SortValue<'a> {
    pub fn text(value: Option<&'a str>) -> Self {
        match value {
            Some(s) if !s.is_empty() => SortValue::Text(s),
            _ => SortValue::Empty,
        }
    }

    pub fn date(value: Option<&'a str>) -> Self {
        match value {
            Some(s) if !s.is_empty() => SortValue::Date(s),
            _ => SortValue::Empty,
        }
    }

    pub fn number(value: Option<f64>) -> Self {
        match value {
            Some(n) if n != 0.0 && !n.is_nan() => SortValue::Number(n),
            _ => SortValue::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SortValue::Empty)
    }

    /// Text form used when two values of different kinds meet.
    pub fn display(&self) -> Cow<'a, str> {
        match *self {
            SortValue::Empty => Cow::Borrowed(""),
            SortValue::Bool(b) => Cow::Owned(b.to_string()),
            SortValue::Number(n) => Cow::Owned(n.to_string()),
            SortValue::Date(s) | SortValue::Text(s) => Cow::Borrowed(s),
        }
    }
}

/// A record in a remote collection.
pub trait CollectionItem: Clone + Debug + Send + Sync + 'static {
    /// Keys accepted by `SortSpec::Key`. Other keys leave the order untouched.
    const SORT_KEYS: &'static [&'static str];

    fn id(&self) -> &str;

    /// Fields searched by a text filter.
    fn filter_fields(&self) -> Vec<Option<&str>>;

    /// Value of a sortable field. Unknown keys yield `SortValue::Empty`.
    fn sort_value(&self, key: &str) -> SortValue<'_>;
}

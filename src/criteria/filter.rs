//! Filter operators and values
//!
//! Filters form a closed set of tagged variants. Each one can be rendered to
//! SQL (see [`super::sql`]) or evaluated against an in-memory record through
//! [`Searchable`].

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::SearchField;

/// A typed scalar a filter compares against.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Uuid(Uuid),
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    Null,
}

impl FilterValue {
    /// Compare two values of the same kind. Mixed kinds and `Null` are unordered,
    /// except that `Null == Null`.
    pub fn compare(&self, other: &FilterValue) -> Option<Ordering> {
        use FilterValue::*;
        match (self, other) {
            (Uuid(a), Uuid(b)) => Some(a.cmp(b)),
            (Text(a), Text(b)) => Some(a.cmp(b)),
            (Integer(a), Integer(b)) => Some(a.cmp(b)),
            (Decimal(a), Decimal(b)) => Some(a.cmp(b)),
            (Bool(a), Bool(b)) => Some(a.cmp(b)),
            (Timestamp(a), Timestamp(b)) => Some(a.cmp(b)),
            (Null, Null) => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl From<Uuid> for FilterValue {
    fn from(v: Uuid) -> Self {
        FilterValue::Uuid(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Text(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Integer(v)
    }
}

impl From<Decimal> for FilterValue {
    fn from(v: Decimal) -> Self {
        FilterValue::Decimal(v)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Bool(v)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(v: DateTime<Utc>) -> Self {
        FilterValue::Timestamp(v)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(FilterValue::Null)
    }
}

/// Range bounds; any combination may be set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeBounds {
    pub gt: Option<FilterValue>,
    pub gte: Option<FilterValue>,
    pub lt: Option<FilterValue>,
    pub lte: Option<FilterValue>,
}

impl RangeBounds {
    pub fn is_empty(&self) -> bool {
        self.gt.is_none() && self.gte.is_none() && self.lt.is_none() && self.lte.is_none()
    }

    fn contains(&self, value: &FilterValue) -> bool {
        let check = |bound: &Option<FilterValue>, ok: fn(Ordering) -> bool| match bound {
            None => true,
            Some(b) => value.compare(b).is_some_and(ok),
        };
        check(&self.gt, Ordering::is_gt)
            && check(&self.gte, Ordering::is_ge)
            && check(&self.lt, Ordering::is_lt)
            && check(&self.lte, Ordering::is_le)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter<F: SearchField> {
    /// `field = value` (`IS NULL` for [`FilterValue::Null`])
    Equals { field: F, value: FilterValue },
    /// `field IN (values)`; an empty list matches nothing
    EqualsAny { field: F, values: Vec<FilterValue> },
    Range { field: F, bounds: RangeBounds },
    /// Case-insensitive substring match on text fields
    Contains { field: F, value: String },
}

impl<F: SearchField> Filter<F> {
    pub fn equals(field: F, value: impl Into<FilterValue>) -> Self {
        Filter::Equals {
            field,
            value: value.into(),
        }
    }

    pub fn equals_any<V: Into<FilterValue>>(field: F, values: impl IntoIterator<Item = V>) -> Self {
        Filter::EqualsAny {
            field,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn range(field: F, bounds: RangeBounds) -> Self {
        Filter::Range { field, bounds }
    }

    pub fn contains(field: F, value: impl Into<String>) -> Self {
        Filter::Contains {
            field,
            value: value.into(),
        }
    }

    pub fn field(&self) -> F {
        match self {
            Filter::Equals { field, .. }
            | Filter::EqualsAny { field, .. }
            | Filter::Range { field, .. }
            | Filter::Contains { field, .. } => *field,
        }
    }

    /// Evaluate this filter against a record.
    pub fn matches<R: Searchable<F>>(&self, record: &R) -> bool {
        let actual = record.field_value(self.field());
        match self {
            Filter::Equals { value, .. } => actual.compare(value) == Some(Ordering::Equal),
            Filter::EqualsAny { values, .. } => values
                .iter()
                .any(|v| actual.compare(v) == Some(Ordering::Equal)),
            Filter::Range { bounds, .. } => {
                !matches!(actual, FilterValue::Null) && bounds.contains(&actual)
            }
            Filter::Contains { value, .. } => match actual {
                FilterValue::Text(text) => text.to_lowercase().contains(&value.to_lowercase()),
                _ => false,
            },
        }
    }
}

/// A record whose fields can be read by a [`SearchField`].
pub trait Searchable<F: SearchField> {
    fn field_value(&self, field: F) -> FilterValue;
}

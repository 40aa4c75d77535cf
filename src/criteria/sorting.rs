use std::cmp::Ordering;

use super::SearchField;
use super::filter::Searchable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSorting<F: SearchField> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: SearchField> FieldSorting<F> {
    pub fn ascending(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }

    /// Compare two records on this sorting. Unordered values (nulls, mixed
    /// kinds) sort last regardless of direction.
    pub fn compare<R: Searchable<F>>(&self, a: &R, b: &R) -> Ordering {
        let va = a.field_value(self.field);
        let vb = b.field_value(self.field);
        match va.compare(&vb) {
            Some(ord) => match self.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            },
            None => {
                use super::FilterValue::Null;
                match (va == Null, vb == Null) {
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    _ => Ordering::Equal,
                }
            }
        }
    }
}

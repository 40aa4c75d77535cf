//! Typed query descriptors
//!
//! A [`Criteria`] describes a filtered, sorted, paginated read of one entity
//! type. It is an immutable value: the chaining methods consume and return
//! it, nothing mutates a shared descriptor. The set of fields an entity can
//! be searched by is a closed enum implementing [`SearchField`], so a
//! descriptor can only name columns that exist.
//!
//! Descriptors are executed by a repository, either rendered to SQL
//! ([`sql`]) or evaluated in memory ([`Criteria::apply`]).

pub mod filter;
pub mod pagination;
pub mod sorting;
pub mod sql;

use std::fmt;

pub use filter::{Filter, FilterValue, RangeBounds, Searchable};
pub use pagination::{PageRequest, Pagination, PaginationError};
pub use sorting::{FieldSorting, SortDirection};

/// Number of pages beyond the current one that `NextPages` looks ahead.
pub const NEXT_PAGES_LOOKAHEAD: u64 = 5;

/// A searchable field of one entity.
pub trait SearchField: Copy + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Dotted entity path, e.g. `order.orderCustomer.customerId`
    fn path(self) -> &'static str;

    /// Storage column backing this field
    fn column(self) -> &'static str;

    /// Field used to break ties so pagination is stable
    fn primary_key() -> Self;
}

/// How the total number of matches is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TotalCountMode {
    /// No total is computed
    #[default]
    None,
    /// Exact `COUNT(*)` over all matches
    Exact,
    /// Counts just far enough to tell whether the next pages exist
    NextPages,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Criteria<F: SearchField> {
    filters: Vec<Filter<F>>,
    sorting: Vec<FieldSorting<F>>,
    pagination: Pagination,
    total_count_mode: TotalCountMode,
}

impl<F: SearchField> Criteria<F> {
    pub fn new(pagination: Pagination) -> Self {
        Self {
            filters: Vec::new(),
            sorting: Vec::new(),
            pagination,
            total_count_mode: TotalCountMode::None,
        }
    }

    pub fn with_filter(mut self, filter: Filter<F>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_sorting(mut self, sorting: FieldSorting<F>) -> Self {
        self.sorting.push(sorting);
        self
    }

    pub fn with_total_count_mode(mut self, mode: TotalCountMode) -> Self {
        self.total_count_mode = mode;
        self
    }

    pub fn filters(&self) -> &[Filter<F>] {
        &self.filters
    }

    pub fn sorting(&self) -> &[FieldSorting<F>] {
        &self.sorting
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn limit(&self) -> u32 {
        self.pagination.limit()
    }

    pub fn offset(&self) -> u64 {
        self.pagination.offset()
    }

    pub fn total_count_mode(&self) -> TotalCountMode {
        self.total_count_mode
    }

    /// How many rows the id phase of a search has to fetch.
    pub fn fetch_size(&self) -> u64 {
        let limit = self.limit() as u64;
        match self.total_count_mode {
            TotalCountMode::NextPages => limit * (NEXT_PAGES_LOOKAHEAD + 1) + 1,
            _ => limit,
        }
    }

    /// Evaluate the descriptor over in-memory records.
    pub fn apply<R: Searchable<F> + Clone>(&self, records: &[R]) -> SearchResult<R> {
        let mut matched: Vec<&R> = records
            .iter()
            .filter(|r| self.filters.iter().all(|f| f.matches(*r)))
            .collect();

        let tie_breaker = FieldSorting::ascending(F::primary_key());
        matched.sort_by(|a, b| {
            self.sorting
                .iter()
                .chain(std::iter::once(&tie_breaker))
                .map(|s| s.compare(*a, *b))
                .find(|o| o.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let total_matches = matched.len() as u64;
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let window: Vec<&R> = matched
            .into_iter()
            .skip(offset)
            .take(usize::try_from(self.fetch_size()).unwrap_or(usize::MAX))
            .collect();

        let total = match self.total_count_mode {
            TotalCountMode::None => None,
            TotalCountMode::Exact => Some(total_matches),
            TotalCountMode::NextPages if window.is_empty() => Some(total_matches),
            TotalCountMode::NextPages => Some(self.offset() + window.len() as u64),
        };

        SearchResult {
            elements: window
                .into_iter()
                .take(self.limit() as usize)
                .cloned()
                .collect(),
            total,
        }
    }
}

/// Outcome of executing a [`Criteria`]: at most `limit` records in
/// descriptor order, plus the total according to the count mode.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<T> {
    pub elements: Vec<T>,
    pub total: Option<u64>,
}

impl<T> SearchResult<T> {
    pub fn empty() -> Self {
        Self {
            elements: Vec::new(),
            total: None,
        }
    }

    pub fn into_elements(self) -> Vec<T> {
        self.elements
    }
}

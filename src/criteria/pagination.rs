//! Page/limit pagination with validated bounds

use std::num::NonZeroU32;

use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    #[error("page must be >= 1, got {0}")]
    InvalidPage(u32),
    #[error("limit must be >= 1, got {0}")]
    InvalidLimit(u32),
}

/// Raw pagination as sent by the caller (`?page=&limit=`).
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageRequest {
    /// 1-based page number (default: 1)
    pub page: Option<u32>,
    /// Records per page (default: 10)
    pub limit: Option<u32>,
}

/// Validated pagination. `page >= 1` and `limit >= 1` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: NonZeroU32,
    limit: NonZeroU32,
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Result<Self, PaginationError> {
        let page = NonZeroU32::new(page).ok_or(PaginationError::InvalidPage(page))?;
        let limit = NonZeroU32::new(limit).ok_or(PaginationError::InvalidLimit(limit))?;
        Ok(Self { page, limit })
    }

    /// Apply defaults for missing values, then validate.
    pub fn from_request(req: PageRequest, default_limit: u32) -> Result<Self, PaginationError> {
        Self::new(
            req.page.unwrap_or(DEFAULT_PAGE),
            req.limit.unwrap_or(default_limit),
        )
    }

    pub fn page(&self) -> u32 {
        self.page.get()
    }

    pub fn limit(&self) -> u32 {
        self.limit.get()
    }

    /// `(page - 1) * limit`, computed in u64 so it cannot overflow.
    pub fn offset(&self) -> u64 {
        (self.page.get() as u64 - 1) * self.limit.get() as u64
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: NonZeroU32::MIN,
            limit: NonZeroU32::new(DEFAULT_LIMIT).unwrap_or(NonZeroU32::MIN),
        }
    }
}

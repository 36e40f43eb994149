use super::PaginationError;

/// Page used when the query string omits `page`.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the query string omits `limit`.
pub const DEFAULT_LIMIT: u32 = 10;

/// Upper bound applied to `limit` unless configured otherwise.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// A 1-based page window over an id-ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pagination {
    page: u32,
    limit: u32,
}

impl Pagination {
    /// Creates a page window. Rejects zero values and clamps `limit` to `max_limit`.
    pub fn new(page: u32, limit: u32, max_limit: u32) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::ZeroPage);
        }
        if limit == 0 {
            return Err(PaginationError::ZeroLimit);
        }
        Ok(Self {
            page,
            limit: limit.min(max_limit.max(1)),
        })
    }

    /// Builds a window from optional query values, filling in the defaults.
    pub fn from_query(
        page: Option<u32>,
        limit: Option<u32>,
        max_limit: u32,
    ) -> Result<Self, PaginationError> {
        Self::new(
            page.unwrap_or(DEFAULT_PAGE),
            limit.unwrap_or(DEFAULT_LIMIT),
            max_limit,
        )
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records skipped before this page.
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let pagination = Pagination::from_query(None, None, MAX_PAGE_LIMIT).unwrap();
        assert_eq!(pagination, Pagination::default());
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.limit(), 10);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn test_offset() {
        let pagination = Pagination::new(3, 5, MAX_PAGE_LIMIT).unwrap();
        assert_eq!(pagination.offset(), 10);
    }

    #[test]
    fn test_rejects_zero_page() {
        assert_eq!(
            Pagination::new(0, 10, MAX_PAGE_LIMIT),
            Err(PaginationError::ZeroPage)
        );
    }

    #[test]
    fn test_rejects_zero_limit() {
        assert_eq!(
            Pagination::new(1, 0, MAX_PAGE_LIMIT),
            Err(PaginationError::ZeroLimit)
        );
    }

    #[test]
    fn test_clamps_limit() {
        let pagination = Pagination::new(2, 5_000, MAX_PAGE_LIMIT).unwrap();
        assert_eq!(pagination.limit(), MAX_PAGE_LIMIT);
        assert_eq!(pagination.offset(), MAX_PAGE_LIMIT as u64);
    }

    #[test]
    fn test_offset_does_not_overflow_for_large_pages() {
        let pagination = Pagination::new(u32::MAX, MAX_PAGE_LIMIT, MAX_PAGE_LIMIT).unwrap();
        assert_eq!(
            pagination.offset(),
            (u32::MAX as u64 - 1) * MAX_PAGE_LIMIT as u64
        );
    }
}

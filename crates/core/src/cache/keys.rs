use crate::storage::Pagination;

/// Operation name prefixed to book list keys.
pub const BOOK_LIST_OPERATION: &str = "getAllBooks";

/// Tag carried by every cached book list page. Any write to the book
/// collection invalidates it.
pub const BOOK_LIST_TAG: &str = "getAllBooksCache";

/// Returns the cache key for a page of an operation's results.
///
/// # Examples
///
/// ```
/// use bookshelf_core::cache::paginated_key;
///
/// assert_eq!(paginated_key("getAllBooks", 2, 5), "getAllBooks-2-5");
/// ```
pub fn paginated_key(operation: &str, page: u32, limit: u32) -> String {
    format!("{operation}-{page}-{limit}")
}

/// Returns the cache key for a page of the book list.
///
/// Built from the already clamped pagination, so `?limit=500` and
/// `?limit=100` share an entry when the cap is 100.
pub fn book_list_key(pagination: &Pagination) -> String {
    paginated_key(BOOK_LIST_OPERATION, pagination.page(), pagination.limit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MAX_PAGE_LIMIT;

    #[test]
    fn test_book_list_key_for_defaults() {
        assert_eq!(book_list_key(&Pagination::default()), "getAllBooks-1-10");
    }

    #[test]
    fn test_distinct_pages_get_distinct_keys() {
        let first = Pagination::new(1, 5, MAX_PAGE_LIMIT).unwrap();
        let second = Pagination::new(2, 5, MAX_PAGE_LIMIT).unwrap();
        assert_ne!(book_list_key(&first), book_list_key(&second));
    }

    #[test]
    fn test_clamped_limits_share_a_key() {
        let capped = Pagination::new(1, 500, MAX_PAGE_LIMIT).unwrap();
        let at_cap = Pagination::new(1, MAX_PAGE_LIMIT, MAX_PAGE_LIMIT).unwrap();
        assert_eq!(book_list_key(&capped), book_list_key(&at_cap));
        assert_eq!(book_list_key(&capped), "getAllBooks-1-100");
    }
}

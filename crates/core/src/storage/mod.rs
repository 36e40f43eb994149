mod error;
mod http_mapping;
mod traits;
mod types;

pub use error::{PaginationError, RepositoryError, Result};
pub use http_mapping::repository_error_to_status_code;
pub use traits::{AuthorRepository, BookRepository, UserRepository};
pub use types::{Pagination, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_PAGE_LIMIT};

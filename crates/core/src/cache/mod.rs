mod error;
mod keys;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{book_list_key, paginated_key, BOOK_LIST_OPERATION, BOOK_LIST_TAG};
pub use traits::{CacheStats, CachedValue, PopulateFuture, TagAwareCache};

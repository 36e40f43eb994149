//! Session storage and request authentication.

mod extractors;
mod sessions;

pub use extractors::CurrentUser;
pub use sessions::SessionStore;

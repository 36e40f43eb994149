mod error;
mod projections;
mod version;

pub use error::ViewError;
pub use projections::{
    deserialize_book_payload, serialize, AuthorWithBooks, ViewGroup, Viewable,
};
pub use version::{field_since, includes_field, version_from_accept, ApiVersion, EntityKind};

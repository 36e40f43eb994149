mod requests;
mod types;
mod validation;

pub use requests::BookPayload;
pub use types::{Author, Book, NewBook, Role, User};
pub use validation::{
    validate_book, ValidationErrors, Violation, MAX_COVER_TEXT_LENGTH, MAX_TITLE_LENGTH,
};

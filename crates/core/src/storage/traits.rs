use async_trait::async_trait;

use crate::catalog::{Author, Book, NewBook, User};

use super::{Pagination, Result};

/// Repository for author operations.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Gets an author by ID.
    async fn get_author(&self, id: i64) -> Result<Option<Author>>;

    /// Gets every author, ordered by ascending ID.
    async fn list_authors(&self) -> Result<Vec<Author>>;

    /// Creates an author and returns it with its assigned ID.
    async fn create_author(&self, first_name: &str, last_name: &str) -> Result<Author>;

    /// Deletes an author. Books that referenced it are kept with no author.
    async fn delete_author(&self, id: i64) -> Result<()>;
}

/// Repository for book operations.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Gets a book by ID, with its author resolved.
    async fn get_book(&self, id: i64) -> Result<Option<Book>>;

    /// Gets one page of books ordered by ascending ID.
    async fn find_all_with_pagination(&self, pagination: Pagination) -> Result<Vec<Book>>;

    /// Gets every book written by the given author, ordered by ascending ID.
    async fn list_books_by_author(&self, author_id: i64) -> Result<Vec<Book>>;

    /// Persists a new book and returns it with its assigned ID.
    async fn create_book(&self, book: &NewBook) -> Result<Book>;

    /// Replaces a stored book. Fails with `NotFound` if it does not exist.
    async fn update_book(&self, book: &Book) -> Result<()>;

    /// Deletes a book by ID. Fails with `NotFound` if it does not exist.
    async fn delete_book(&self, id: i64) -> Result<()>;
}

/// Repository for user lookups. Users are provisioned by fixtures.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets a user by ID.
    async fn get_user(&self, id: i64) -> Result<Option<User>>;

    /// Gets a user by login handle.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Creates a user. Fails with `AlreadyExists` on a duplicate email.
    async fn create_user(&self, user: &User) -> Result<()>;
}

//! SQLite repository implementation.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use bookshelf_core::catalog::{Author, Book, NewBook, User};
use bookshelf_core::storage::{
    AuthorRepository, BookRepository, Pagination, RepositoryError, Result, UserRepository,
};

use super::conversions::{roles_to_string, row_to_author, row_to_book, row_to_user};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository for authors, books and users.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (or creates) a file-based database and applies the schema.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a repository backed by an in-memory database.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// AuthorRepository implementation
// ============================================================================

#[async_trait]
impl AuthorRepository for SqliteRepository {
    async fn get_author(&self, id: i64) -> Result<Option<Author>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_AUTHOR_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([id], row_to_author) {
                    Ok(author) => Ok(Some(author)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Author", id.to_string()))
    }

    async fn list_authors(&self) -> Result<Vec<Author>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_AUTHORS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_author).map_err(wrap_err)?;

                let mut authors = Vec::new();
                for row_result in rows {
                    authors.push(row_result.map_err(wrap_err)?);
                }
                Ok(authors)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Author", "unknown"))
    }

    async fn create_author(&self, first_name: &str, last_name: &str) -> Result<Author> {
        let first_name = first_name.to_string();
        let last_name = last_name.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(schema::INSERT_AUTHOR, [&first_name, &last_name])
                    .map_err(wrap_err)?;
                Ok(Author {
                    id: conn.last_insert_rowid(),
                    first_name,
                    last_name,
                })
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Author", "unknown"))
    }

    async fn delete_author(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                tx.execute(schema::ORPHAN_BOOKS_OF_AUTHOR, [id])
                    .map_err(wrap_err)?;
                let rows = tx.execute(schema::DELETE_AUTHOR, [id]).map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                tx.commit().map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Author", id.to_string()))
    }
}

// ============================================================================
// BookRepository implementation
// ============================================================================

#[async_trait]
impl BookRepository for SqliteRepository {
    async fn get_book(&self, id: i64) -> Result<Option<Book>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(&schema::select_book_by_id())
                    .map_err(wrap_err)?;
                match stmt.query_row([id], row_to_book) {
                    Ok(book) => Ok(Some(book)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Book", id.to_string()))
    }

    async fn find_all_with_pagination(&self, pagination: Pagination) -> Result<Vec<Book>> {
        let limit = i64::from(pagination.limit());
        let offset = i64::try_from(pagination.offset()).unwrap_or(i64::MAX);

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(&schema::select_books_page())
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([limit, offset], row_to_book)
                    .map_err(wrap_err)?;

                let mut books = Vec::new();
                for row_result in rows {
                    books.push(row_result.map_err(wrap_err)?);
                }
                Ok(books)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Book", "unknown"))
    }

    async fn list_books_by_author(&self, author_id: i64) -> Result<Vec<Book>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(&schema::select_books_by_author())
                    .map_err(wrap_err)?;
                let rows = stmt.query_map([author_id], row_to_book).map_err(wrap_err)?;

                let mut books = Vec::new();
                for row_result in rows {
                    books.push(row_result.map_err(wrap_err)?);
                }
                Ok(books)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Book", "unknown"))
    }

    async fn create_book(&self, book: &NewBook) -> Result<Book> {
        let book = book.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_BOOK,
                    rusqlite::params![book.title, book.cover_text, book.comment, book.author_id],
                )
                .map_err(wrap_err)?;
                let id = conn.last_insert_rowid();
                conn.query_row(&schema::select_book_by_id(), [id], row_to_book)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Book", "unknown"))
    }

    async fn update_book(&self, book: &Book) -> Result<()> {
        let id = book.id;
        let title = book.title.clone();
        let cover_text = book.cover_text.clone();
        let comment = book.comment.clone();
        let author_id = book.author_id();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_BOOK,
                        rusqlite::params![id, title, cover_text, comment, author_id],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Book", id.to_string()))
    }

    async fn delete_book(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn.execute(schema::DELETE_BOOK, [id]).map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Book", id.to_string()))
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_USER_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([id], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", id.to_string()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_string();
        let user_email = email.clone();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_USER_BY_EMAIL)
                    .map_err(wrap_err)?;
                match stmt.query_row([&email], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", user_email))
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let id = user.id;
        let email = user.email.clone();
        let roles = roles_to_string(user);
        let password_hash = user.password_hash.clone();
        let user_email = user.email.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_USER,
                    rusqlite::params![id, email, roles, password_hash],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", user_email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_core::catalog::Role;
    use bookshelf_core::storage::MAX_PAGE_LIMIT;

    async fn repo_with_author() -> (SqliteRepository, Author) {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let author = repo.create_author("Octavia", "Butler").await.unwrap();
        (repo, author)
    }

    #[tokio::test]
    async fn test_book_create_and_get() {
        let (repo, author) = repo_with_author().await;

        let created = repo
            .create_book(
                &NewBook::new("Kindred")
                    .with_cover_text("Time travel")
                    .with_comment("Shelf A")
                    .with_author_id(author.id),
            )
            .await
            .unwrap();

        assert_eq!(created.title, "Kindred");
        assert_eq!(created.author, Some(author));
        assert_eq!(repo.get_book(created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_book_with_unknown_author_is_stored_without_one() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let created = repo
            .create_book(&NewBook::new("Orphan").with_author_id(999))
            .await
            .unwrap();
        assert_eq!(created.author, None);
    }

    #[tokio::test]
    async fn test_pagination_in_id_order() {
        let (repo, author) = repo_with_author().await;
        for i in 1..=7 {
            repo.create_book(&NewBook::new(format!("Title-{i}")).with_author_id(author.id))
                .await
                .unwrap();
        }

        let page = Pagination::new(2, 3, MAX_PAGE_LIMIT).unwrap();
        let titles: Vec<String> = repo
            .find_all_with_pagination(page)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();

        assert_eq!(titles, vec!["Title-4", "Title-5", "Title-6"]);
    }

    #[tokio::test]
    async fn test_book_update_and_delete() {
        let (repo, author) = repo_with_author().await;
        let mut book = repo
            .create_book(&NewBook::new("Draft").with_author_id(author.id))
            .await
            .unwrap();

        book.title = "Final".to_string();
        book.author = None;
        repo.update_book(&book).await.unwrap();
        assert_eq!(repo.get_book(book.id).await.unwrap(), Some(book.clone()));

        repo.delete_book(book.id).await.unwrap();
        assert!(repo.get_book(book.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete_book(book.id).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_nonexistent_book() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let book = Book {
            id: 5,
            title: "Ghost".to_string(),
            cover_text: None,
            comment: None,
            author: None,
        };
        assert!(matches!(
            repo.update_book(&book).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_author_orphans_books() {
        let (repo, author) = repo_with_author().await;
        let book = repo
            .create_book(&NewBook::new("Kindred").with_author_id(author.id))
            .await
            .unwrap();

        repo.delete_author(author.id).await.unwrap();

        assert!(repo.get_author(author.id).await.unwrap().is_none());
        assert_eq!(repo.get_book(book.id).await.unwrap().unwrap().author, None);
    }

    #[tokio::test]
    async fn test_users() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let admin = User::new(1, "admin@bookshelf.local", [Role::Admin], "hash");
        repo.create_user(&admin).await.unwrap();

        let loaded = repo
            .get_user_by_email("admin@bookshelf.local")
            .await
            .unwrap()
            .unwrap();
        assert!(loaded.is_admin());
        assert_eq!(loaded.password_hash, "hash");

        let duplicate = User::new(2, "admin@bookshelf.local", [], "hash");
        assert!(matches!(
            repo.create_user(&duplicate).await,
            Err(RepositoryError::AlreadyExists { .. })
        ));
    }
}

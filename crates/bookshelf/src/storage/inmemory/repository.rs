//! In-memory repository implementation.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use bookshelf_core::catalog::{Author, Book, NewBook, User};
use bookshelf_core::storage::{
    AuthorRepository, BookRepository, Pagination, RepositoryError, Result, UserRepository,
};

/// A book as stored: the author is a reference, resolved on read.
#[derive(Debug, Clone)]
struct BookRecord {
    id: i64,
    title: String,
    cover_text: Option<String>,
    comment: Option<String>,
    author_id: Option<i64>,
}

impl BookRecord {
    fn resolve(&self, authors: &BTreeMap<i64, Author>) -> Book {
        Book {
            id: self.id,
            title: self.title.clone(),
            cover_text: self.cover_text.clone(),
            comment: self.comment.clone(),
            author: self.author_id.and_then(|id| authors.get(&id).cloned()),
        }
    }
}

#[derive(Debug, Default)]
struct Catalog {
    authors: BTreeMap<i64, Author>,
    books: BTreeMap<i64, BookRecord>,
    next_author_id: i64,
    next_book_id: i64,
}

impl Catalog {
    fn allocate_author_id(&mut self) -> i64 {
        self.next_author_id += 1;
        self.next_author_id
    }

    fn allocate_book_id(&mut self) -> i64 {
        self.next_book_id += 1;
        self.next_book_id
    }
}

/// In-memory storage backend.
///
/// Authors and books share one lock so that author deletion and book reads
/// see a consistent relation. IDs are assigned from 1 and never reused.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    catalog: Arc<RwLock<Catalog>>,
    users: Arc<RwLock<HashMap<i64, User>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthorRepository for InMemoryRepository {
    async fn get_author(&self, id: i64) -> Result<Option<Author>> {
        let catalog = self.catalog.read().await;
        Ok(catalog.authors.get(&id).cloned())
    }

    async fn list_authors(&self) -> Result<Vec<Author>> {
        let catalog = self.catalog.read().await;
        Ok(catalog.authors.values().cloned().collect())
    }

    async fn create_author(&self, first_name: &str, last_name: &str) -> Result<Author> {
        let mut catalog = self.catalog.write().await;
        let author = Author::new(catalog.allocate_author_id(), first_name, last_name);
        catalog.authors.insert(author.id, author.clone());
        Ok(author)
    }

    async fn delete_author(&self, id: i64) -> Result<()> {
        let mut catalog = self.catalog.write().await;
        if catalog.authors.remove(&id).is_none() {
            return Err(RepositoryError::not_found("Author", id));
        }
        for book in catalog.books.values_mut() {
            if book.author_id == Some(id) {
                book.author_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl BookRepository for InMemoryRepository {
    async fn get_book(&self, id: i64) -> Result<Option<Book>> {
        let catalog = self.catalog.read().await;
        Ok(catalog.books.get(&id).map(|b| b.resolve(&catalog.authors)))
    }

    async fn find_all_with_pagination(&self, pagination: Pagination) -> Result<Vec<Book>> {
        let catalog = self.catalog.read().await;
        let offset = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        Ok(catalog
            .books
            .values()
            .skip(offset)
            .take(pagination.limit() as usize)
            .map(|b| b.resolve(&catalog.authors))
            .collect())
    }

    async fn list_books_by_author(&self, author_id: i64) -> Result<Vec<Book>> {
        let catalog = self.catalog.read().await;
        Ok(catalog
            .books
            .values()
            .filter(|b| b.author_id == Some(author_id))
            .map(|b| b.resolve(&catalog.authors))
            .collect())
    }

    async fn create_book(&self, book: &NewBook) -> Result<Book> {
        let mut catalog = self.catalog.write().await;
        let record = BookRecord {
            id: catalog.allocate_book_id(),
            title: book.title.clone(),
            cover_text: book.cover_text.clone(),
            comment: book.comment.clone(),
            author_id: book
                .author_id
                .filter(|id| catalog.authors.contains_key(id)),
        };
        let created = record.resolve(&catalog.authors);
        catalog.books.insert(record.id, record);
        Ok(created)
    }

    async fn update_book(&self, book: &Book) -> Result<()> {
        let mut catalog = self.catalog.write().await;
        let author_id = book
            .author_id()
            .filter(|id| catalog.authors.contains_key(id));
        let Some(record) = catalog.books.get_mut(&book.id) else {
            return Err(RepositoryError::not_found("Book", book.id));
        };
        record.title = book.title.clone();
        record.cover_text = book.cover_text.clone();
        record.comment = book.comment.clone();
        record.author_id = author_id;
        Ok(())
    }

    async fn delete_book(&self, id: i64) -> Result<()> {
        let mut catalog = self.catalog.write().await;
        if catalog.books.remove(&id).is_none() {
            return Err(RepositoryError::not_found("Book", id));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) || users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.email.clone(),
            });
        }
        users.insert(user.id, user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_core::catalog::Role;
    use bookshelf_core::storage::MAX_PAGE_LIMIT;

    async fn seeded(books: usize) -> (InMemoryRepository, Author) {
        let repo = InMemoryRepository::new();
        let author = repo.create_author("Ursula", "Le Guin").await.unwrap();
        for i in 1..=books {
            repo.create_book(&NewBook::new(format!("Title-{i}")).with_author_id(author.id))
                .await
                .unwrap();
        }
        (repo, author)
    }

    fn page(page: u32, limit: u32) -> Pagination {
        Pagination::new(page, limit, MAX_PAGE_LIMIT).unwrap()
    }

    // ==================== Author Tests ====================

    #[tokio::test]
    async fn test_author_ids_are_sequential() {
        let repo = InMemoryRepository::new();
        let first = repo.create_author("A", "One").await.unwrap();
        let second = repo.create_author("B", "Two").await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.list_authors().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_delete_author_orphans_books() {
        let (repo, author) = seeded(2).await;

        repo.delete_author(author.id).await.unwrap();

        assert!(repo.get_author(author.id).await.unwrap().is_none());
        let book = repo.get_book(1).await.unwrap().unwrap();
        assert_eq!(book.author, None);
        assert!(repo
            .list_books_by_author(author.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_delete_author_nonexistent() {
        let repo = InMemoryRepository::new();
        let result = repo.delete_author(42).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    // ==================== Book Tests ====================

    #[tokio::test]
    async fn test_book_create_resolves_author() {
        let (repo, author) = seeded(0).await;
        let created = repo
            .create_book(
                &NewBook::new("Dune")
                    .with_cover_text("Spice")
                    .with_author_id(author.id),
            )
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.author, Some(author));
        assert_eq!(repo.get_book(1).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_book_create_with_unknown_author() {
        let repo = InMemoryRepository::new();
        let created = repo
            .create_book(&NewBook::new("Dune").with_author_id(999))
            .await
            .unwrap();
        assert_eq!(created.author, None);
    }

    #[tokio::test]
    async fn test_book_update() {
        let (repo, _) = seeded(1).await;
        let mut book = repo.get_book(1).await.unwrap().unwrap();
        book.title = "Updated".to_string();
        book.author = None;

        repo.update_book(&book).await.unwrap();

        assert_eq!(repo.get_book(1).await.unwrap(), Some(book));
    }

    #[tokio::test]
    async fn test_book_update_nonexistent() {
        let repo = InMemoryRepository::new();
        let book = Book {
            id: 7,
            title: "Ghost".to_string(),
            cover_text: None,
            comment: None,
            author: None,
        };
        let result = repo.update_book(&book).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_book_delete() {
        let (repo, _) = seeded(1).await;
        repo.delete_book(1).await.unwrap();
        assert!(repo.get_book(1).await.unwrap().is_none());

        let result = repo.delete_book(1).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_book_ids_not_reused_after_delete() {
        let (repo, _) = seeded(2).await;
        repo.delete_book(2).await.unwrap();
        let created = repo.create_book(&NewBook::new("Next")).await.unwrap();
        assert_eq!(created.id, 3);
    }

    // ==================== Pagination Tests ====================

    #[tokio::test]
    async fn test_pagination_slices_in_id_order() {
        let (repo, _) = seeded(12).await;

        let ids = |books: Vec<Book>| books.into_iter().map(|b| b.id).collect::<Vec<_>>();

        assert_eq!(
            ids(repo.find_all_with_pagination(page(1, 5)).await.unwrap()),
            vec![1, 2, 3, 4, 5]
        );
        assert_eq!(
            ids(repo.find_all_with_pagination(page(3, 5)).await.unwrap()),
            vec![11, 12]
        );
        assert!(repo
            .find_all_with_pagination(page(4, 5))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_pagination_is_deterministic() {
        let (repo, _) = seeded(20).await;
        let first = repo.find_all_with_pagination(page(2, 7)).await.unwrap();
        let second = repo.find_all_with_pagination(page(2, 7)).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_pagination_far_past_the_end() {
        let (repo, _) = seeded(3).await;
        let books = repo
            .find_all_with_pagination(page(u32::MAX, MAX_PAGE_LIMIT))
            .await
            .unwrap();
        assert!(books.is_empty());
    }

    // ==================== User Tests ====================

    #[tokio::test]
    async fn test_user_lookup_by_email() {
        let repo = InMemoryRepository::new();
        let user = User::new(1, "admin@bookshelf.local", [Role::Admin], "hash");
        repo.create_user(&user).await.unwrap();

        assert_eq!(
            repo.get_user_by_email("admin@bookshelf.local").await.unwrap(),
            Some(user.clone())
        );
        assert_eq!(repo.get_user(1).await.unwrap(), Some(user));
        assert!(repo
            .get_user_by_email("nobody@bookshelf.local")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_user_email_rejected() {
        let repo = InMemoryRepository::new();
        repo.create_user(&User::new(1, "a@bookshelf.local", [], "hash"))
            .await
            .unwrap();
        let result = repo
            .create_user(&User::new(2, "a@bookshelf.local", [], "hash"))
            .await;
        assert!(matches!(result, Err(RepositoryError::AlreadyExists { .. })));
    }
}

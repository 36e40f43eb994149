//! Demo data loaded at startup.
//!
//! Two accounts share the password `password`: `user@bookshelf.local`
//! (reader) and `admin@bookshelf.local` (admin).

use rand::Rng;

use bookshelf_core::auth::hash_password;
use bookshelf_core::catalog::{Author, NewBook, Role, User};

use crate::state::AppState;

const FIXTURE_PASSWORD: &str = "password";
const AUTHOR_COUNT: usize = 10;
const BOOK_COUNT: usize = 20;

/// Seeds users, authors and books. Skips storage that already holds the
/// fixture accounts.
pub async fn seed(state: &AppState) -> anyhow::Result<()> {
    if state
        .users
        .get_user_by_email("admin@bookshelf.local")
        .await?
        .is_some()
    {
        tracing::info!("Fixtures already present, skipping");
        return Ok(());
    }

    let hash = tokio::task::spawn_blocking(|| hash_password(FIXTURE_PASSWORD)).await??;

    state
        .users
        .create_user(&User::new(1, "user@bookshelf.local", [Role::User], hash.clone()))
        .await?;
    state
        .users
        .create_user(&User::new(2, "admin@bookshelf.local", [Role::Admin], hash))
        .await?;

    let mut authors = Vec::with_capacity(AUTHOR_COUNT);
    for i in 1..=AUTHOR_COUNT {
        let author = state
            .authors
            .create_author(&format!("First-{i}"), &format!("Last-{i}"))
            .await?;
        authors.push(author);
    }

    for book in random_books(&authors_ids(&authors)) {
        state.books.create_book(&book).await?;
    }

    tracing::info!(
        users = 2,
        authors = AUTHOR_COUNT,
        books = BOOK_COUNT,
        "Fixtures loaded"
    );
    Ok(())
}

fn authors_ids(authors: &[Author]) -> Vec<i64> {
    authors.iter().map(|a| a.id).collect()
}

/// Builds the book drafts, each assigned to a random author.
fn random_books(author_ids: &[i64]) -> Vec<NewBook> {
    let mut rng = rand::rng();
    (1..=BOOK_COUNT)
        .map(|i| {
            let mut book = NewBook::new(format!("Title-{i}"))
                .with_cover_text(format!("Back cover #{i}"))
                .with_comment(format!("Librarian comment {i}"));
            if !author_ids.is_empty() {
                book = book.with_author_id(author_ids[rng.random_range(0..author_ids.len())]);
            }
            book
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_core::storage::Pagination;

    #[test]
    fn test_random_books_reference_known_authors() {
        let ids = vec![3, 5, 8];
        let books = random_books(&ids);

        assert_eq!(books.len(), BOOK_COUNT);
        assert_eq!(books[0].title, "Title-1");
        assert_eq!(books[0].comment.as_deref(), Some("Librarian comment 1"));
        assert!(books
            .iter()
            .all(|b| b.author_id.is_some_and(|id| ids.contains(&id))));
    }

    #[test]
    fn test_random_books_without_authors() {
        assert!(random_books(&[]).iter().all(|b| b.author_id.is_none()));
    }

    #[tokio::test]
    async fn test_seed_populates_catalog() {
        let state = AppState::default();
        seed(&state).await.unwrap();

        assert_eq!(state.authors.list_authors().await.unwrap().len(), AUTHOR_COUNT);
        let page = Pagination::new(1, 100, 100).unwrap();
        let books = state.books.find_all_with_pagination(page).await.unwrap();
        assert_eq!(books.len(), BOOK_COUNT);
        assert!(books.iter().all(|b| b.author.is_some()));

        let admin = state
            .users
            .get_user_by_email("admin@bookshelf.local")
            .await
            .unwrap()
            .unwrap();
        assert!(admin.is_admin());
        assert!(bookshelf_core::auth::verify_password("password", &admin.password_hash));
    }

    #[tokio::test]
    async fn test_seed_twice_is_a_no_op() {
        let state = AppState::default();
        seed(&state).await.unwrap();
        seed(&state).await.unwrap();

        assert_eq!(state.authors.list_authors().await.unwrap().len(), AUTHOR_COUNT);
    }
}

//! SQLite row conversion functions.

use bookshelf_core::catalog::{Author, Book, Role, User};
use rusqlite::Row;

/// Convert a SQLite row to an Author.
///
/// Expected columns: id, first_name, last_name
pub fn row_to_author(row: &Row) -> rusqlite::Result<Author> {
    Ok(Author {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
    })
}

/// Convert a joined SQLite row to a Book.
///
/// Expected columns: id, title, cover_text, comment, author id, first_name, last_name.
/// The author columns are NULL when the book has no author.
pub fn row_to_book(row: &Row) -> rusqlite::Result<Book> {
    let author_id: Option<i64> = row.get(4)?;
    let author = match author_id {
        Some(id) => Some(Author {
            id,
            first_name: row.get(5)?,
            last_name: row.get(6)?,
        }),
        None => None,
    };

    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        cover_text: row.get(2)?,
        comment: row.get(3)?,
        author,
    })
}

/// Convert a SQLite row to a User.
///
/// Expected columns: id, email, roles, password_hash
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let id: i64 = row.get(0)?;
    let email: String = row.get(1)?;
    let roles: String = row.get(2)?;
    let password_hash: String = row.get(3)?;

    Ok(User::new(id, email, parse_roles(&roles)?, password_hash))
}

/// Join roles into the stored comma-separated form.
pub fn roles_to_string(user: &User) -> String {
    user.roles()
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_roles(s: &str) -> rusqlite::Result<Vec<Role>> {
    s.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(|r| {
            r.parse::<Role>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    2,
                    rusqlite::types::Type::Text,
                    e.into(),
                )
            })
        })
        .collect()
}

//! SQLite schema definitions and SQL query constants.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS authors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL
);

-- Deleting an author keeps its books with no author.
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    cover_text TEXT,
    comment TEXT,
    author_id INTEGER REFERENCES authors(id) ON DELETE SET NULL
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    roles TEXT NOT NULL,
    password_hash TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_books_author_id ON books(author_id);
"#;

// Author queries
pub const INSERT_AUTHOR: &str = r#"
INSERT INTO authors (first_name, last_name)
VALUES (?1, ?2)
"#;

pub const SELECT_AUTHOR_BY_ID: &str = r#"
SELECT id, first_name, last_name
FROM authors
WHERE id = ?1
"#;

pub const SELECT_AUTHORS: &str = r#"
SELECT id, first_name, last_name
FROM authors
ORDER BY id ASC
"#;

pub const ORPHAN_BOOKS_OF_AUTHOR: &str = r#"
UPDATE books
SET author_id = NULL
WHERE author_id = ?1
"#;

pub const DELETE_AUTHOR: &str = r#"
DELETE FROM authors
WHERE id = ?1
"#;

// Book queries. The author reference is stored only if it resolves.
pub const INSERT_BOOK: &str = r#"
INSERT INTO books (title, cover_text, comment, author_id)
VALUES (?1, ?2, ?3, (SELECT id FROM authors WHERE id = ?4))
"#;

const SELECT_BOOK_COLUMNS: &str = r#"
SELECT b.id, b.title, b.cover_text, b.comment, a.id, a.first_name, a.last_name
FROM books b
LEFT JOIN authors a ON a.id = b.author_id
"#;

pub fn select_book_by_id() -> String {
    format!("{SELECT_BOOK_COLUMNS} WHERE b.id = ?1")
}

pub fn select_books_page() -> String {
    format!("{SELECT_BOOK_COLUMNS} ORDER BY b.id ASC LIMIT ?1 OFFSET ?2")
}

pub fn select_books_by_author() -> String {
    format!("{SELECT_BOOK_COLUMNS} WHERE b.author_id = ?1 ORDER BY b.id ASC")
}

pub const UPDATE_BOOK: &str = r#"
UPDATE books
SET title = ?2, cover_text = ?3, comment = ?4, author_id = (SELECT id FROM authors WHERE id = ?5)
WHERE id = ?1
"#;

pub const DELETE_BOOK: &str = r#"
DELETE FROM books
WHERE id = ?1
"#;

// User queries
pub const INSERT_USER: &str = r#"
INSERT INTO users (id, email, roles, password_hash)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, email, roles, password_hash
FROM users
WHERE id = ?1
"#;

pub const SELECT_USER_BY_EMAIL: &str = r#"
SELECT id, email, roles, password_hash
FROM users
WHERE email = ?1
"#;

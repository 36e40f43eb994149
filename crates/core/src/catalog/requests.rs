//! API request types for book mutations.
//!
//! Pure data types with no I/O. The handler resolves the author reference
//! before calling [`BookPayload::into_new_book`] or [`BookPayload::apply_to`].

use serde::{Deserialize, Serialize};

use super::types::{Author, Book, NewBook};

/// Request body for `POST /api/books` and `PUT /api/books/{id}`.
///
/// `idAuthor` is a reference, not an embedded object. A reference that does
/// not resolve leaves the book without an author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_author: Option<i64>,
}

impl BookPayload {
    /// Create a payload with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Set the cover text.
    pub fn with_cover_text(mut self, cover_text: impl Into<String>) -> Self {
        self.cover_text = Some(cover_text.into());
        self
    }

    /// Set the librarian comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Set the author reference.
    pub fn with_author(mut self, id_author: i64) -> Self {
        self.id_author = Some(id_author);
        self
    }

    /// Build a new record from this payload and the resolved author.
    ///
    /// Call after validation: a missing title becomes an empty string here.
    pub fn into_new_book(self, author: Option<&Author>) -> NewBook {
        NewBook {
            title: self.title.unwrap_or_default(),
            cover_text: self.cover_text,
            comment: self.comment,
            author_id: author.map(|a| a.id),
        }
    }

    /// Merge this payload onto an existing book in place.
    ///
    /// Replaces `title` and `cover_text`, sets the author to the resolved
    /// reference (or clears it), and leaves `comment` untouched.
    pub fn apply_to(self, book: &mut Book, author: Option<Author>) {
        book.title = self.title.unwrap_or_default();
        book.cover_text = self.cover_text;
        book.author = author;
    }
}

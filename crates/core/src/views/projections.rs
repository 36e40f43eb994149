//! Serialization groups and the projections they select.

use serde::Serialize;
use serde_json::Value;

use crate::catalog::{Author, Book, BookPayload, ValidationErrors};

use super::version::{includes_field, ApiVersion, EntityKind};
use super::ViewError;

/// Named field subsets. The same entity renders differently per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewGroup {
    /// Books with their author; authors without their books.
    GetBooks,
    /// Authors with their books; books without their author.
    GetAuthors,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthorSummary<'a> {
    id: i64,
    first_name: &'a str,
    last_name: &'a str,
}

impl<'a> From<&'a Author> for AuthorSummary<'a> {
    fn from(author: &'a Author) -> Self {
        Self {
            id: author.id,
            first_name: &author.first_name,
            last_name: &author.last_name,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookSummary<'a> {
    id: i64,
    title: &'a str,
    cover_text: Option<&'a str>,
}

impl<'a> From<&'a Book> for BookSummary<'a> {
    fn from(book: &'a Book) -> Self {
        Self {
            id: book.id,
            title: &book.title,
            cover_text: book.cover_text.as_deref(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookDetail<'a> {
    id: i64,
    title: &'a str,
    cover_text: Option<&'a str>,
    /// Outer `None` drops the key; `Some(None)` renders `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<Option<&'a str>>,
    author: Option<AuthorSummary<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthorDetail<'a> {
    id: i64,
    first_name: &'a str,
    last_name: &'a str,
    books: Vec<BookSummary<'a>>,
}

/// An author together with the books they wrote.
#[derive(Debug, Clone, Copy)]
pub struct AuthorWithBooks<'a> {
    pub author: &'a Author,
    pub books: &'a [Book],
}

/// Something that can be projected through a view group.
pub trait Viewable {
    fn render(&self, group: ViewGroup, version: Option<ApiVersion>) -> Result<Value, ViewError>;
}

impl Viewable for Book {
    fn render(&self, group: ViewGroup, version: Option<ApiVersion>) -> Result<Value, ViewError> {
        let value = match group {
            ViewGroup::GetBooks => {
                let comment = includes_field(EntityKind::Book, "comment", version)
                    .then(|| self.comment.as_deref());
                serde_json::to_value(BookDetail {
                    id: self.id,
                    title: &self.title,
                    cover_text: self.cover_text.as_deref(),
                    comment,
                    author: self.author.as_ref().map(AuthorSummary::from),
                })?
            }
            ViewGroup::GetAuthors => serde_json::to_value(BookSummary::from(self))?,
        };
        Ok(value)
    }
}

impl Viewable for Author {
    fn render(&self, group: ViewGroup, version: Option<ApiVersion>) -> Result<Value, ViewError> {
        AuthorWithBooks {
            author: self,
            books: &[],
        }
        .render(group, version)
    }
}

impl Viewable for AuthorWithBooks<'_> {
    fn render(&self, group: ViewGroup, _version: Option<ApiVersion>) -> Result<Value, ViewError> {
        let value = match group {
            ViewGroup::GetBooks => serde_json::to_value(AuthorSummary::from(self.author))?,
            ViewGroup::GetAuthors => serde_json::to_value(AuthorDetail {
                id: self.author.id,
                first_name: &self.author.first_name,
                last_name: &self.author.last_name,
                books: self.books.iter().map(BookSummary::from).collect(),
            })?,
        };
        Ok(value)
    }
}

impl<T: Viewable> Viewable for [T] {
    fn render(&self, group: ViewGroup, version: Option<ApiVersion>) -> Result<Value, ViewError> {
        self.iter()
            .map(|item| item.render(group, version))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}

impl<T: Viewable> Viewable for Vec<T> {
    fn render(&self, group: ViewGroup, version: Option<ApiVersion>) -> Result<Value, ViewError> {
        self.as_slice().render(group, version)
    }
}

/// Renders an entity or list to JSON bytes through a view group.
pub fn serialize<T: Viewable + ?Sized>(
    value: &T,
    group: ViewGroup,
    version: Option<ApiVersion>,
) -> Result<Vec<u8>, ViewError> {
    let rendered = value.render(group, version)?;
    Ok(serde_json::to_vec(&rendered)?)
}

/// Parses a book request body. Malformed JSON is reported as a violation.
pub fn deserialize_book_payload(bytes: &[u8]) -> Result<BookPayload, ValidationErrors> {
    serde_json::from_slice(bytes).map_err(|err| {
        ValidationErrors::single("body", format!("Malformed JSON body: {err}"))
    })
}

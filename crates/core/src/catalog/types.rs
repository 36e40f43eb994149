use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A book author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    /// Creates an author with the given ID and names.
    pub fn new(id: i64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// A book in the catalog.
///
/// `author` is the resolved relation. A book whose author reference did not
/// match any record carries `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub cover_text: Option<String>,
    /// Free-text librarian comment.
    pub comment: Option<String>,
    pub author: Option<Author>,
}

impl Book {
    /// Returns the ID of the resolved author, if any.
    pub fn author_id(&self) -> Option<i64> {
        self.author.as_ref().map(|a| a.id)
    }
}

/// A book that has not been persisted yet. The repository assigns the ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub cover_text: Option<String>,
    pub comment: Option<String>,
    pub author_id: Option<i64>,
}

impl NewBook {
    /// Creates a new book draft with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            cover_text: None,
            comment: None,
            author_id: None,
        }
    }

    /// Sets the cover text.
    pub fn with_cover_text(mut self, cover_text: impl Into<String>) -> Self {
        self.cover_text = Some(cover_text.into());
        self
    }

    /// Sets the librarian comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the author reference.
    pub fn with_author_id(mut self, author_id: i64) -> Self {
        self.author_id = Some(author_id);
        self
    }
}

/// Security roles carried by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    /// Returns the role tag as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Admin => "ROLE_ADMIN",
        }
    }

    /// Returns true if this role may mutate the catalog.
    pub fn can_administer(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROLE_USER" | "USER" => Ok(Role::User),
            "ROLE_ADMIN" | "ADMIN" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A user account. Users are provisioned by fixtures only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    /// Login handle.
    pub email: String,
    roles: BTreeSet<Role>,
    /// Argon2 PHC string.
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    /// Creates a user with the given roles.
    pub fn new(
        id: i64,
        email: impl Into<String>,
        roles: impl IntoIterator<Item = Role>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            roles: roles.into_iter().collect(),
            password_hash: password_hash.into(),
        }
    }

    /// Returns the granted roles. Every user implicitly holds `ROLE_USER`.
    pub fn roles(&self) -> BTreeSet<Role> {
        let mut roles = self.roles.clone();
        roles.insert(Role::User);
        roles
    }

    /// Returns true if the user holds an admin-equivalent role.
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(Role::can_administer)
    }
}

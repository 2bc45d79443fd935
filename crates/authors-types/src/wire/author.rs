use serde::{Deserialize, Serialize};

use crate::domain::author::Author;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthorView {
    pub id: i64,
    pub name: String,
    pub specialisation: String,
}

impl From<Author> for AuthorView {
    fn from(a: Author) -> Self {
        Self {
            id: a.id,
            name: a.name,
            specialisation: a.specialisation,
        }
    }
}

/// Body of `GET /authors`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthorsResponse {
    pub authors: Vec<AuthorView>,
}

impl From<Vec<Author>> for AuthorsResponse {
    fn from(list: Vec<Author>) -> Self {
        Self {
            authors: list.into_iter().map(AuthorView::from).collect(),
        }
    }
}

/// Body of a successful `POST /authors`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthorResponse {
    pub author: AuthorView,
}

impl From<Author> for AuthorResponse {
    fn from(a: Author) -> Self {
        Self { author: a.into() }
    }
}

/// Request body for `POST /authors`, as sent by clients.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateAuthorRequest {
    pub name: String,
    pub specialisation: String,
}

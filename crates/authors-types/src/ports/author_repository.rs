use async_trait::async_trait;

use crate::domain::author::{Author, NewAuthor};

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("db error: {0}")]
    DbError(String),
}

#[async_trait]
pub trait AuthorRepository: Send + Sync + 'static {
    /// Creates the backing table if it is missing. Safe to call repeatedly.
    async fn ensure_schema(&self) -> Result<(), RepoError>;
    /// Inserts one row and returns it with its generated id.
    async fn create(&self, author: NewAuthor) -> Result<Author, RepoError>;
    /// All rows, ascending by id.
    async fn list(&self) -> Result<Vec<Author>, RepoError>;
}

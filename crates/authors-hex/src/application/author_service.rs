use crate::errors::AppError;
use authors_types::domain::author::{Author, NewAuthor};
use authors_types::ports::author_repository::AuthorRepository;

pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn create_author(&self, author: NewAuthor) -> Result<Author, AppError> {
        let created = self.repo.create(author).await?;
        tracing::info!(id = created.id, name = %created.name, "author created");
        Ok(created)
    }

    pub async fn list_authors(&self) -> Result<Vec<Author>, AppError> {
        Ok(self.repo.list().await?)
    }
}

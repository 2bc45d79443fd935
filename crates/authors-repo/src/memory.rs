use async_trait::async_trait;
use authors_types::domain::author::{Author, NewAuthor};
use authors_types::ports::author_repository::{AuthorRepository, RepoError};
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

#[derive(Clone)]
pub struct InMemoryRepo {
    pub map: Arc<DashMap<i64, Author>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthorRepository for InMemoryRepo {
    async fn ensure_schema(&self) -> Result<(), RepoError> {
        Ok(())
    }

    async fn create(&self, author: NewAuthor) -> Result<Author, RepoError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let author = author.into_author(id);
        self.map.insert(id, author.clone());
        Ok(author)
    }

    async fn list(&self) -> Result<Vec<Author>, RepoError> {
        let mut all: Vec<Author> = self.map.iter().map(|kv| kv.value().clone()).collect();
        all.sort_by_key(|a| a.id);
        Ok(all)
    }
}

use async_trait::async_trait;
use authors_types::domain::author::{Author, NewAuthor};
use authors_types::ports::author_repository::{AuthorRepository, RepoError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;

pub struct SqliteRepo {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct DbAuthor {
    id: i64,
    name: String,
    specialisation: String,
}

impl From<DbAuthor> for Author {
    fn from(row: DbAuthor) -> Self {
        Self {
            id: row.id,
            name: row.name,
            specialisation: row.specialisation,
        }
    }
}

impl SqliteRepo {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        let in_memory = database_url.contains(":memory:");
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            if !in_memory {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = pool_options(in_memory).connect_with(options).await?;

        Ok(Self { pool })
    }
}

// A `:memory:` database lives only as long as some connection to it is open,
// so one connection is kept forever instead of being reaped or recycled.
fn pool_options(in_memory: bool) -> SqlitePoolOptions {
    let opts = SqlitePoolOptions::new();
    if !in_memory {
        return opts;
    }
    opts.max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
}

#[async_trait]
impl AuthorRepository for SqliteRepo {
    async fn ensure_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/sqlite/0001_create_authors.sql");
        sqlx::query(ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::DbError(e.to_string()))?;
        Ok(())
    }

    async fn create(&self, author: NewAuthor) -> Result<Author, RepoError> {
        let res = sqlx::query("INSERT INTO authors (name, specialisation) VALUES (?, ?)")
            .bind(author.name())
            .bind(author.specialisation())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::DbError(e.to_string()))?;
        Ok(author.into_author(res.last_insert_rowid()))
    }

    async fn list(&self) -> Result<Vec<Author>, RepoError> {
        let rows: Vec<DbAuthor> =
            sqlx::query_as("SELECT id, name, specialisation FROM authors ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::DbError(e.to_string()))?;

        Ok(rows.into_iter().map(Author::from).collect())
    }
}

use async_trait::async_trait;
use authors_types::domain::author::{Author, NewAuthor};
use authors_types::ports::author_repository::{AuthorRepository, RepoError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

const MAX_CONNECTIONS: u32 = 5;

pub struct PgRepo {
    pool: PgPool,
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

impl PgRepo {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let options = PgConnectOptions::from_str(database_url)?;
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl AuthorRepository for PgRepo {
    async fn ensure_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/postgres/0001_create_authors.sql");
        sqlx::query(ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::DbError(e.to_string()))?;
        Ok(())
    }

    async fn create(&self, author: NewAuthor) -> Result<Author, RepoError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO authors (name, specialisation) VALUES ($1, $2) RETURNING id",
        )
        .bind(author.name())
        .bind(author.specialisation())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::DbError(e.to_string()))?;
        Ok(author.into_author(id))
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

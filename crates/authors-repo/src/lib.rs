#[cfg(not(any(feature = "memory", feature = "sqlite", feature = "postgres")))]
compile_error!("Enable a repo feature: `memory`, `sqlite` or `postgres`.");

use authors_types::domain::author::{Author, NewAuthor};
use authors_types::ports::author_repository::{AuthorRepository, RepoError};

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(all(feature = "sqlite", not(feature = "memory")))]
const DEFAULT_SQLITE_URL: &str = "sqlite://authors.db";

/// The adapter picked at startup from the database URL.
pub enum Repo {
    #[cfg(feature = "memory")]
    Memory(memory::InMemoryRepo),
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite::SqliteRepo),
    #[cfg(feature = "postgres")]
    Postgres(postgres::PgRepo),
}

pub async fn build_repo(url: Option<&str>) -> anyhow::Result<Repo> {
    Repo::build_repo(url).await
}

impl Repo {
    /// Selects the adapter by URL scheme (`memory:`, `sqlite:`, `postgres:`).
    /// Without a URL, falls back to memory, then to a local SQLite file.
    pub async fn build_repo(database_url: Option<&str>) -> anyhow::Result<Self> {
        let Some(url) = database_url else {
            return Self::fallback().await;
        };
        let scheme = url.split_once(':').map_or(url, |(s, _)| s);
        match scheme {
            #[cfg(feature = "memory")]
            "memory" => Ok(Self::Memory(memory::InMemoryRepo::new())),
            #[cfg(feature = "sqlite")]
            "sqlite" => {
                tracing::debug!("connecting sqlite repository");
                Ok(Self::Sqlite(sqlite::SqliteRepo::new(url).await?))
            }
            #[cfg(feature = "postgres")]
            "postgres" | "postgresql" => {
                tracing::debug!("connecting postgres repository");
                Ok(Self::Postgres(postgres::PgRepo::new(url).await?))
            }
            other => anyhow::bail!(
                "unsupported database url scheme `{other}` (is the matching repo feature enabled?)"
            ),
        }
    }

    #[cfg(feature = "memory")]
    async fn fallback() -> anyhow::Result<Self> {
        tracing::debug!("no database url, using in-memory repository");
        Ok(Self::Memory(memory::InMemoryRepo::new()))
    }

    #[cfg(all(feature = "sqlite", not(feature = "memory")))]
    async fn fallback() -> anyhow::Result<Self> {
        tracing::debug!(url = DEFAULT_SQLITE_URL, "no database url, using default sqlite file");
        Ok(Self::Sqlite(
            sqlite::SqliteRepo::new(DEFAULT_SQLITE_URL).await?,
        ))
    }

    #[cfg(not(any(feature = "memory", feature = "sqlite")))]
    async fn fallback() -> anyhow::Result<Self> {
        anyhow::bail!("no database configured: set DATABASE_URL or the DB_* variables")
    }

    pub fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "memory")]
            Self::Memory(_) => "memory",
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        }
    }
}

#[async_trait::async_trait]
impl AuthorRepository for Repo {
    async fn ensure_schema(&self) -> Result<(), RepoError> {
        match self {
            #[cfg(feature = "memory")]
            Self::Memory(r) => r.ensure_schema().await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(r) => r.ensure_schema().await,
            #[cfg(feature = "postgres")]
            Self::Postgres(r) => r.ensure_schema().await,
        }
    }

    async fn create(&self, author: NewAuthor) -> Result<Author, RepoError> {
        match self {
            #[cfg(feature = "memory")]
            Self::Memory(r) => r.create(author).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(r) => r.create(author).await,
            #[cfg(feature = "postgres")]
            Self::Postgres(r) => r.create(author).await,
        }
    }

    async fn list(&self) -> Result<Vec<Author>, RepoError> {
        match self {
            #[cfg(feature = "memory")]
            Self::Memory(r) => r.list().await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(r) => r.list().await,
            #[cfg(feature = "postgres")]
            Self::Postgres(r) => r.list().await,
        }
    }
}

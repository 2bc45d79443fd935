use authors_hex::application::author_service::AuthorService;
use authors_hex::config::Config;
use authors_hex::inbound::http::{HttpServer, HttpServerConfig};
use authors_repo::{build_repo, Repo};
use authors_types::ports::author_repository::AuthorRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for DATABASE_URL / DB_* / SERVER_PORT when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string()))
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        database = config.redacted_database_url().as_deref().unwrap_or("<default>"),
        "loaded configuration"
    );

    let repo: Repo = build_repo(config.database_url.as_deref()).await?;
    repo.ensure_schema().await?;
    tracing::info!(backend = repo.kind(), "authors table ready");

    let service = AuthorService::new(repo);
    let server_cfg = HttpServerConfig {
        port: config.server_port.clone(),
    };

    let http = HttpServer::new(service, server_cfg).await?;
    http.run().await
}

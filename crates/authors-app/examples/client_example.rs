///  To run :
///  cargo r --example client_example
use authors_client::{ApiError, AuthorsClient, CreateAuthorRequest};
use authors_hex::application::author_service::AuthorService;
use authors_hex::inbound::http::{HttpServer, HttpServerConfig};
use authors_repo::build_repo;
use authors_types::ports::author_repository::AuthorRepository;
use reqwest::StatusCode;
use tempfile::tempdir;

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let port = find_free_port();
    let addr = format!("http://127.0.0.1:{port}/");

    // Use a temp file-backed SQLite DB so multiple connections see the same data.
    let tmp = tempdir()?;
    let db_path = tmp.path().join("authors.db");
    let db_url = format!("sqlite://{}", db_path.display());

    let repo = build_repo(Some(&db_url)).await?;
    repo.ensure_schema().await?;
    let service = AuthorService::new(repo);
    let server = HttpServer::new(
        service,
        HttpServerConfig {
            port: port.to_string(),
        },
    )
    .await?;

    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let client = AuthorsClient::new(&addr)?;
    println!("{}", client.greeting().await?);

    let created = client
        .create_author(CreateAuthorRequest {
            name: "Ada".into(),
            specialisation: "Math".into(),
        })
        .await?;
    println!("Created author id={}", created.id);

    // Missing specialisation is rejected with field detail.
    let rejected = client
        .create_author(CreateAuthorRequest {
            name: "Alan".into(),
            specialisation: "".into(),
        })
        .await;
    match rejected {
        Err(err) => {
            let api = err.downcast_ref::<ApiError>();
            assert_eq!(
                api.map(|e| e.status),
                Some(StatusCode::UNPROCESSABLE_ENTITY)
            );
            println!("Rejected: {:?}", api.map(|e| &e.fields));
        }
        Ok(author) => anyhow::bail!("unexpectedly created {author:?}"),
    }

    let authors = client.list_authors().await?;
    println!("{} author(s) stored", authors.len());
    assert_eq!(authors.len(), 1);

    handle.abort();
    Ok(())
}

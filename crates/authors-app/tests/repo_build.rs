#![cfg(feature = "sqlite")]

use authors_repo::{build_repo, Repo};
use authors_types::domain::author::NewAuthor;
use authors_types::ports::author_repository::AuthorRepository;

#[tokio::test]
async fn builds_sqlite_repo_and_provisions_schema() {
    // Use a temp DB path for isolation.
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("authors-test.db");
    let url = format!("sqlite://{}", db_path.display());

    let repo: Repo = build_repo(Some(&url)).await.expect("build repo");
    assert_eq!(repo.kind(), "sqlite");
    repo.ensure_schema().await.expect("schema");
    // basic sanity: list should succeed and be empty
    let list = repo.list().await.expect("list");
    assert!(list.is_empty());

    repo.create(NewAuthor::new("Ada".into(), "Math".into()).unwrap())
        .await
        .expect("insert");
    repo.ensure_schema().await.expect("schema again");
    assert_eq!(repo.list().await.expect("list").len(), 1);
}

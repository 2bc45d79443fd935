use axum::{
    extract::{rejection::JsonRejection, State},
    http::{StatusCode, Uri},
    routing::get,
    serve, Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use super::schema::parse_create_author;
use crate::application::author_service::AuthorService;
use crate::errors::AppError;
use authors_types::ports::author_repository::AuthorRepository;
use authors_types::wire::author::{AuthorResponse, AuthorsResponse};

pub const GREETING: &str = "Hello, From Flask!";

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
}

#[derive(Clone)]
pub struct HttpServer<R>
where
    R: AuthorRepository,
{
    pub service: Arc<AuthorService<R>>,
    pub config: HttpServerConfig,
}

impl<R> HttpServer<R>
where
    R: AuthorRepository + Send + Sync + 'static,
{
    pub async fn new(service: AuthorService<R>, config: HttpServerConfig) -> anyhow::Result<Self> {
        Ok(Self {
            service: Arc::new(service),
            config,
        })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let app = router(self.service.clone());

        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        tracing::info!("starting server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

/// Routes plus request tracing, with the service injected as state.
pub fn router<R>(service: Arc<AuthorService<R>>) -> Router
where
    R: AuthorRepository + Send + Sync + 'static,
{
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &axum::extract::Request<_>| {
            let uri = request.uri().to_string();
            let request_id = Uuid::new_v4();
            tracing::info_span!(
                "http_request",
                %request_id,
                method = %request.method(),
                uri
            )
        })
        .on_request(
            |request: &axum::extract::Request<_>, span: &tracing::Span| {
                tracing::info!(
                    parent: span,
                    method = %request.method(),
                    uri = %request.uri(),
                    "request"
                );
            },
        )
        .on_response(
            |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                tracing::info!(
                    parent: span,
                    status = %response.status(),
                    latency_ms = %latency.as_millis(),
                    "response"
                );
            },
        );

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/authors", get(list_authors::<R>).post(create_author::<R>))
        .fallback(not_found)
        .layer(trace_layer)
        .with_state(service)
}

async fn index() -> &'static str {
    GREETING
}

async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {uri}"))
}

async fn list_authors<R>(
    State(service): State<Arc<AuthorService<R>>>,
) -> Result<Json<AuthorsResponse>, AppError>
where
    R: AuthorRepository + Send + Sync + 'static,
{
    let list = service.list_authors().await?;
    Ok(Json(list.into()))
}

async fn create_author<R>(
    State(service): State<Arc<AuthorService<R>>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthorResponse>), AppError>
where
    R: AuthorRepository + Send + Sync + 'static,
{
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let new_author = parse_create_author(&body)?;
    let author = service.create_author(new_author).await?;
    Ok((StatusCode::CREATED, Json(author.into())))
}

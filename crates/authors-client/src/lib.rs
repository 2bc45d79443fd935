use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use anyhow::Context;
use authors_types::wire::author::{AuthorResponse, AuthorView, AuthorsResponse};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::Deserialize;

pub use authors_types::wire::author::CreateAuthorRequest;

#[derive(Clone)]
pub struct AuthorsClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

#[derive(Clone)]
pub struct AuthorsClient {
    base: Url,
    client: reqwest::Client,
}

/// A non-2xx answer from the service. Returned inside `anyhow::Error`;
/// callers can `downcast_ref::<ApiError>()`.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    /// Per-field messages for validation failures.
    pub fields: BTreeMap<String, Vec<String>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    fields: BTreeMap<String, Vec<String>>,
}

impl AuthorsClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<AuthorsClientBuilder> {
        let base = Url::parse(base_url).context("invalid base url")?;
        Ok(AuthorsClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: None,
            client: None,
        })
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base.join(path).context("failed to join url")
    }

    pub async fn greeting(&self) -> anyhow::Result<String> {
        let res = self.client.get(self.url("")?).send().await?;
        Ok(check(res).await?.text().await?)
    }

    pub async fn list_authors(&self) -> anyhow::Result<Vec<AuthorView>> {
        let res = self.client.get(self.url("authors")?).send().await?;
        let body: AuthorsResponse = check(res).await?.json().await?;
        Ok(body.authors)
    }

    pub async fn create_author(&self, req: CreateAuthorRequest) -> anyhow::Result<AuthorView> {
        let res = self
            .client
            .post(self.url("authors")?)
            .json(&req)
            .send()
            .await?;
        let body: AuthorResponse = check(res).await?.json().await?;
        tracing::debug!(id = body.author.id, "author created");
        Ok(body.author)
    }
}

async fn check(res: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let (message, fields) = match res.json::<ErrorBody>().await {
        Ok(body) => (body.error, body.fields),
        Err(_) => (
            status.canonical_reason().unwrap_or("request failed").to_string(),
            BTreeMap::new(),
        ),
    };
    Err(ApiError {
        status,
        message,
        fields,
    }
    .into())
}

impl AuthorsClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<AuthorsClient> {
        if let Some(client) = self.client {
            return Ok(AuthorsClient {
                base: self.base,
                client,
            });
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(AuthorsClient {
            base: self.base,
            client,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn sample_author() -> AuthorView {
        AuthorView {
            id: 1,
            name: "Ada".into(),
            specialisation: "Math".into(),
        }
    }

    #[tokio::test]
    async fn create_and_list_authors() {
        let server = MockServer::start();
        let author = sample_author();

        let create_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/authors")
                .json_body_obj(&CreateAuthorRequest {
                    name: author.name.clone(),
                    specialisation: author.specialisation.clone(),
                });
            then.status(201).json_body_obj(&AuthorResponse {
                author: author.clone(),
            });
        });

        let list_mock = server.mock(|when, then| {
            when.method(GET).path("/authors");
            then.status(200).json_body_obj(&AuthorsResponse {
                authors: vec![author.clone()],
            });
        });

        let client = AuthorsClient::new(&server.base_url()).unwrap();
        let created = client
            .create_author(CreateAuthorRequest {
                name: "Ada".into(),
                specialisation: "Math".into(),
            })
            .await
            .unwrap();
        assert_eq!(created, author);

        let listed = client.list_authors().await.unwrap();
        assert_eq!(listed, vec![author]);

        create_mock.assert();
        list_mock.assert();
    }

    #[tokio::test]
    async fn greeting_text() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).body("Hello, From Flask!");
        });

        let client = AuthorsClient::new(&server.base_url()).unwrap();
        assert_eq!(client.greeting().await.unwrap(), "Hello, From Flask!");
        mock.assert();
    }

    #[tokio::test]
    async fn validation_failure_is_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/authors");
            then.status(422).json_body(serde_json::json!({
                "error": "validation failed",
                "fields": { "name": ["Missing data for required field."] }
            }));
        });

        let client = AuthorsClient::builder(&server.base_url())
            .unwrap()
            .with_header("x-request-source", "test")
            .unwrap()
            .with_timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let err = client
            .create_author(CreateAuthorRequest {
                name: "".into(),
                specialisation: "Math".into(),
            })
            .await
            .unwrap_err();
        let api = err.downcast_ref::<ApiError>().expect("api error");
        assert_eq!(api.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api.message, "validation failed");
        assert_eq!(
            api.fields["name"],
            vec!["Missing data for required field.".to_string()]
        );
    }

    #[tokio::test]
    async fn server_error_without_json_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/authors");
            then.status(500).body("boom");
        });

        let client = AuthorsClient::new(&server.base_url()).unwrap();
        let err = client.list_authors().await.unwrap_err();
        let api = err.downcast_ref::<ApiError>().expect("api error");
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(api.fields.is_empty());
    }
}

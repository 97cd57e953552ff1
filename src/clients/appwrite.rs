//! Appwrite Databases REST client.
//!
//! Only the document endpoints are used. Every request carries the project
//! header; the API key header is sent when one is configured.

use crate::config::{AppwriteConfig, ConfigError};
use crate::store::{Document, DocumentList, DocumentStore, Fields, Query, StoreError};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;
use url::Url;

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppwriteClient {
    client: Client,
    endpoint: Url,
    project_id: String,
    api_key: Option<String>,
    database_id: String,
}

impl AppwriteClient {
    pub fn new(config: &AppwriteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(concat!("Popcorn/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self::with_client(client, config)?)
    }

    /// Fails when the endpoint is not a URL that path segments can be
    /// appended to.
    pub fn with_client(client: Client, config: &AppwriteConfig) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| ConfigError::InvalidEndpoint(format!("{}: {e}", config.endpoint)))?;
        if endpoint.cannot_be_a_base() {
            return Err(ConfigError::InvalidEndpoint(config.endpoint.clone()));
        }

        Ok(Self {
            client,
            endpoint,
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
            database_id: config.database_id.clone(),
        })
    }

    /// Ids are percent-encoded as single path segments.
    fn url_with(&self, segments: &[&str]) -> Url {
        let mut url = self.endpoint.clone();
        // Never fails: base URLs are checked in `with_client`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn documents_url(&self, collection: &str) -> Url {
        self.url_with(&[
            "databases",
            &self.database_id,
            "collections",
            collection,
            "documents",
        ])
    }

    fn document_url(&self, collection: &str, document_id: &str) -> Url {
        self.url_with(&[
            "databases",
            &self.database_id,
            "collections",
            collection,
            "documents",
            document_id,
        ])
    }

    fn request(&self, method: Method, url: impl reqwest::IntoUrl) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(PROJECT_HEADER, &self.project_id);

        match &self.api_key {
            Some(key) => builder.header(KEY_HEADER, key),
            None => builder,
        }
    }

    /// Sends the request and turns transport failures and non-2xx answers into
    /// `StoreError`. A 404 on an id-addressed call maps to `NotFound`.
    async fn send(
        builder: RequestBuilder,
        target: Option<(&str, &str)>,
    ) -> Result<Response, StoreError> {
        let response = builder
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            if let Some((collection, document_id)) = target {
                return Err(StoreError::NotFound {
                    collection: collection.to_string(),
                    document_id: document_id.to_string(),
                });
            }
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(err) => match err.kind {
                Some(kind) => format!("{} [{kind}]", err.message),
                None => err.message,
            },
            Err(_) => body,
        };

        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| {
            debug!(error = %e, "Failed to parse Appwrite response");
            StoreError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl DocumentStore for AppwriteClient {
    async fn list(&self, collection: &str, queries: &[Query]) -> Result<DocumentList, StoreError> {
        let mut url = self.documents_url(collection);

        {
            let mut pairs = url.query_pairs_mut();
            for query in queries {
                pairs.append_pair("queries[]", &query.to_wire()?);
            }
        }

        debug!(collection, queries = queries.len(), "Listing documents");
        let response = Self::send(self.request(Method::GET, url), None).await?;
        Self::decode(response).await
    }

    async fn create(
        &self,
        collection: &str,
        document_id: &str,
        data: Fields,
    ) -> Result<Document, StoreError> {
        let body = json!({ "documentId": document_id, "data": data });
        let builder = self
            .request(Method::POST, self.documents_url(collection))
            .json(&body);

        let response = Self::send(builder, None).await?;
        Self::decode(response).await
    }

    async fn update(
        &self,
        collection: &str,
        document_id: &str,
        data: Fields,
    ) -> Result<Document, StoreError> {
        let body = json!({ "data": data });
        let builder = self
            .request(Method::PATCH, self.document_url(collection, document_id))
            .json(&body);

        let response = Self::send(builder, Some((collection, document_id))).await?;
        Self::decode(response).await
    }

    async fn delete(&self, collection: &str, document_id: &str) -> Result<(), StoreError> {
        let builder = self.request(Method::DELETE, self.document_url(collection, document_id));
        Self::send(builder, Some((collection, document_id))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppwriteConfig {
        AppwriteConfig {
            endpoint: "https://cloud.appwrite.io/v1/".to_string(),
            project_id: "proj".to_string(),
            database_id: "db".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn urls_are_scoped_to_the_database() {
        let client = AppwriteClient::new(&config()).unwrap();
        assert_eq!(
            client.documents_url("saved").as_str(),
            "https://cloud.appwrite.io/v1/databases/db/collections/saved/documents"
        );
        assert_eq!(
            client.document_url("saved", "abc").as_str(),
            "https://cloud.appwrite.io/v1/databases/db/collections/saved/documents/abc"
        );
    }

    #[test]
    fn ids_are_encoded_as_single_segments() {
        let client = AppwriteClient::new(&config()).unwrap();
        assert_eq!(
            client.document_url("saved movies", "a/b?c").as_str(),
            "https://cloud.appwrite.io/v1/databases/db/collections/saved%20movies/documents/a%2Fb%3Fc"
        );
    }

    #[test]
    fn endpoint_must_accept_path_segments() {
        let mut config = config();
        config.endpoint = "mailto:admin@example.com".to_string();
        assert!(matches!(
            AppwriteClient::with_client(Client::new(), &config),
            Err(ConfigError::InvalidEndpoint(_))
        ));

        config.endpoint = "not a url".to_string();
        assert!(AppwriteClient::new(&config).is_err());
    }
}

//! HTTP client wrapper for the mediator catalog.

use crate::catalog::types::{
    CaptionTrack, CatalogError, CatalogSession, CategoryBody, CategoryNode, CategoryResponse,
    MediaItem,
};
use crate::config::get_config;
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;

/// Read side of the catalog as the pipeline consumes it.
///
/// The production implementation is [`CatalogClient`]; tests substitute fakes
/// so pipeline control flow is exercised without network access.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Obtain the bearer credential attached to every subsequent request.
    async fn authenticate(&self) -> Result<CatalogSession, CatalogError>;

    /// Resolve one catalog node and return its children's keys in source order.
    async fn list_subcategories(
        &self,
        category_key: &str,
        session: &CatalogSession,
    ) -> Result<Vec<CategoryNode>, CatalogError>;

    /// Resolve a leaf node's media list in source order.
    async fn list_media(
        &self,
        subcategory_key: &str,
        session: &CatalogSession,
    ) -> Result<Vec<MediaItem>, CatalogError>;

    /// Fetch the raw text of one caption resource.
    async fn fetch_caption(
        &self,
        track: &CaptionTrack,
        session: &CatalogSession,
    ) -> Result<String, CatalogError>;
}

/// Lightweight HTTP client for catalog operations.
///
/// Each operation is a single round trip; there is no retry or caching layer.
pub struct CatalogClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) token_url: String,
    pub(crate) language: String,
}

impl CatalogClient {
    /// Construct a new client using configuration derived from the environment.
    ///
    /// `language_override` replaces the configured language code for this run.
    pub fn new(language_override: Option<String>) -> Result<Self, CatalogError> {
        let config = get_config();
        let client = Client::builder()
            .user_agent("captionflow/0.1")
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        let base_url =
            normalize_base_url(&config.catalog_base_url).map_err(CatalogError::InvalidUrl)?;
        let language = language_override.unwrap_or_else(|| config.catalog_language.clone());
        tracing::debug!(url = %base_url, language = %language, "Initialized catalog HTTP client");

        Ok(Self {
            client,
            base_url,
            token_url: config.catalog_token_url.clone(),
            language,
        })
    }

    async fn fetch_category(
        &self,
        key: &str,
        media_limit: Option<u32>,
        session: &CatalogSession,
    ) -> Result<CategoryBody, CatalogError> {
        let url = format!("{}/categories/{}/{}", self.base_url, self.language, key);
        let mut request = self
            .client
            .request(Method::GET, url)
            .header(reqwest::header::AUTHORIZATION, session.bearer())
            .query(&[("detailed", "1"), ("clientType", "www")]);
        if let Some(limit) = media_limit {
            request = request.query(&[("mediaLimit", limit)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = CatalogError::UnexpectedStatus { status, body };
            tracing::error!(key, error = %error, "Catalog node fetch failed");
            return Err(error);
        }

        let payload: CategoryResponse = response.json().await?;
        Ok(payload.category)
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn authenticate(&self) -> Result<CatalogSession, CatalogError> {
        let response = self.client.get(&self.token_url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::UnexpectedStatus { status, body });
        }
        let token = response.text().await?;
        tracing::debug!("Acquired catalog bearer token");
        Ok(CatalogSession::new(token.trim()))
    }

    async fn list_subcategories(
        &self,
        category_key: &str,
        session: &CatalogSession,
    ) -> Result<Vec<CategoryNode>, CatalogError> {
        let body = self.fetch_category(category_key, Some(0), session).await?;
        let subcategories = body.subcategories.ok_or_else(|| {
            CatalogError::Malformed(format!("node '{category_key}' has no subcategories field"))
        })?;
        Ok(subcategories
            .into_iter()
            .map(|entry| CategoryNode { key: entry.key })
            .collect())
    }

    async fn list_media(
        &self,
        subcategory_key: &str,
        session: &CatalogSession,
    ) -> Result<Vec<MediaItem>, CatalogError> {
        let body = self.fetch_category(subcategory_key, None, session).await?;
        let media = body.media.ok_or_else(|| {
            CatalogError::Malformed(format!("node '{subcategory_key}' has no media field"))
        })?;
        Ok(media.into_iter().map(|entry| entry.into_media_item()).collect())
    }

    async fn fetch_caption(
        &self,
        track: &CaptionTrack,
        session: &CatalogSession,
    ) -> Result<String, CatalogError> {
        let response = self
            .client
            .get(&track.url)
            .header(reqwest::header::AUTHORIZATION, session.bearer())
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::UnexpectedStatus { status, body });
        }
        Ok(response.text().await?)
    }
}

fn normalize_base_url(url: &str) -> Result<String, String> {
    let parsed = reqwest::Url::parse(url).map_err(|err| err.to_string())?;
    Ok(parsed.to_string().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::GET, MockServer};
    use serde_json::json;

    fn test_client(server: &MockServer) -> CatalogClient {
        CatalogClient {
            client: Client::builder()
                .user_agent("captionflow-test")
                .build()
                .expect("client"),
            base_url: server.base_url(),
            token_url: format!("{}/tokens/site.jwt", server.base_url()),
            language: "E".into(),
        }
    }

    #[tokio::test]
    async fn authenticate_returns_trimmed_token_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/tokens/site.jwt");
                then.status(200).body("jwt-abc\n");
            })
            .await;

        let session = test_client(&server)
            .authenticate()
            .await
            .expect("token request");

        mock.assert();
        assert_eq!(session.bearer(), "Bearer jwt-abc");
    }

    #[tokio::test]
    async fn list_subcategories_preserves_source_order_and_sends_bearer() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/categories/E/VideoOnDemand")
                    .query_param("detailed", "1")
                    .query_param("clientType", "www")
                    .query_param("mediaLimit", "0")
                    .header("authorization", "Bearer jwt-abc");
                then.status(200).json_body(json!({
                    "category": {
                        "subcategories": [
                            { "key": "VODStudio", "name": "Studio" },
                            { "key": "VODPrograms", "name": "Programs" }
                        ]
                    }
                }));
            })
            .await;

        let session = CatalogSession::new("jwt-abc");
        let nodes = test_client(&server)
            .list_subcategories("VideoOnDemand", &session)
            .await
            .expect("subcategory request");

        mock.assert();
        let keys: Vec<&str> = nodes.iter().map(|node| node.key.as_str()).collect();
        assert_eq!(keys, vec!["VODStudio", "VODPrograms"]);
    }

    #[tokio::test]
    async fn list_subcategories_flags_missing_field() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/categories/E/Broken");
                then.status(200).json_body(json!({ "category": {} }));
            })
            .await;

        let session = CatalogSession::new("jwt-abc");
        let error = test_client(&server)
            .list_subcategories("Broken", &session)
            .await
            .expect_err("missing subcategories");
        assert!(matches!(error, CatalogError::Malformed(_)));
    }

    #[tokio::test]
    async fn list_media_keeps_items_without_captions() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/categories/E/VODTalks")
                    .query_param("detailed", "1")
                    .query_param("clientType", "www");
                then.status(200).json_body(json!({
                    "category": {
                        "media": [
                            {
                                "title": "With captions",
                                "firstPublished": "2024-04-01T10:00:00Z",
                                "files": [
                                    { "subtitles": { "url": "https://cdn.example/a.vtt" } }
                                ]
                            },
                            {
                                "title": "Без captions",
                                "firstPublished": "2024-04-02T10:00:00Z",
                                "files": [{}]
                            }
                        ]
                    }
                }));
            })
            .await;

        let session = CatalogSession::new("jwt-abc");
        let media = test_client(&server)
            .list_media("VODTalks", &session)
            .await
            .expect("media request");

        assert_eq!(media.len(), 2);
        assert!(media[0].caption.is_some());
        assert!(media[1].caption.is_none());
        assert_eq!(media[1].published_date(), "2024-04-02");
    }

    #[tokio::test]
    async fn list_media_surfaces_upstream_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/categories/E/VODTalks");
                then.status(502).body("bad gateway");
            })
            .await;

        let session = CatalogSession::new("jwt-abc");
        let error = test_client(&server)
            .list_media("VODTalks", &session)
            .await
            .expect_err("upstream failure");
        assert!(matches!(
            error,
            CatalogError::UnexpectedStatus { status, .. } if status.as_u16() == 502
        ));
    }

    #[tokio::test]
    async fn fetch_caption_returns_plain_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/vtt/a.vtt")
                    .header("authorization", "Bearer jwt-abc");
                then.status(200)
                    .body("WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHello");
            })
            .await;

        let session = CatalogSession::new("jwt-abc");
        let track = CaptionTrack {
            url: format!("{}/vtt/a.vtt", server.base_url()),
        };
        let raw = test_client(&server)
            .fetch_caption(&track, &session)
            .await
            .expect("caption request");
        assert!(raw.starts_with("WEBVTT"));
        assert!(raw.contains("Hello"));
    }
}

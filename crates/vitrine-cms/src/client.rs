//! HTTP client for the headless content source.
//!
//! Wraps `reqwest` with vitrine-specific error handling and envelope
//! unwrapping. Records are returned as raw `serde_json::Value`s; shape
//! normalization is the assembler's job, not the client's.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::CmsError;
use crate::types::extract_data_array;

/// Client for the content source's collection endpoints.
///
/// Holds the HTTP client and the normalized base URL. Point `base_url` at a
/// mock server in tests.
pub struct CmsClient {
    client: Client,
    base_url: Url,
    /// Base URL with no trailing slash, handed to the media resolver for
    /// relative-path joining.
    base_prefix: String,
}

impl CmsClient {
    /// Creates a client for the given content-source base URL.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`CmsError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CmsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_prefix = base_url.trim_end_matches('/').to_string();
        // Keep exactly one trailing slash so Url::join appends path segments
        // instead of replacing the last one.
        let parsed = Url::parse(&format!("{base_prefix}/")).map_err(|e| CmsError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: parsed,
            base_prefix,
        })
    }

    /// The base URL without a trailing slash, for media-URL construction.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_prefix
    }

    /// Fetches the full product collection with all relations populated.
    ///
    /// # Errors
    ///
    /// See [`CmsClient::fetch_collection`].
    pub async fn fetch_products(&self) -> Result<Vec<Value>, CmsError> {
        self.fetch_collection("api/products", &[("populate", "*")])
            .await
    }

    /// Fetches the category collection with its image relation populated.
    ///
    /// # Errors
    ///
    /// See [`CmsClient::fetch_collection`].
    pub async fn fetch_categories(&self) -> Result<Vec<Value>, CmsError> {
        self.fetch_collection("api/categories", &[("populate", "image")])
            .await
    }

    /// Fetches active promotional banners in display order.
    ///
    /// # Errors
    ///
    /// See [`CmsClient::fetch_collection`].
    pub async fn fetch_banners(&self) -> Result<Vec<Value>, CmsError> {
        self.fetch_collection(
            "api/banners",
            &[
                ("populate", "*"),
                ("filters[isActive][$eq]", "true"),
                ("sort", "order:asc"),
            ],
        )
        .await
    }

    /// Sends a GET request for one collection endpoint and returns the raw
    /// records of its `data` array.
    ///
    /// # Errors
    ///
    /// - [`CmsError::Http`] on network failure.
    /// - [`CmsError::UnexpectedStatus`] on a non-2xx status.
    /// - [`CmsError::Deserialize`] if the body is not valid JSON.
    async fn fetch_collection(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<Value>, CmsError> {
        let url = self.build_url(path, params)?;
        tracing::debug!(url = %url, "fetching content-source collection");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: Value = serde_json::from_str(&body).map_err(|e| CmsError::Deserialize {
            context: url.to_string(),
            source: e,
        })?;

        Ok(extract_data_array(parsed))
    }

    /// Builds the request URL with percent-encoded query parameters.
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, CmsError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| CmsError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> CmsClient {
        CmsClient::new(base_url, 30, "vitrine-test/0.1")
            .expect("client construction should not fail")
    }

    #[test]
    fn base_url_strips_trailing_slash() {
        let client = test_client("http://localhost:1337/");
        assert_eq!(client.base_url(), "http://localhost:1337");
    }

    #[test]
    fn build_url_appends_path_and_params() {
        let client = test_client("http://localhost:1337");
        let url = client
            .build_url("api/products", &[("populate", "*")])
            .unwrap();
        assert_eq!(url.path(), "/api/products");
        assert!(url.query().is_some_and(|q| q.contains("populate")));
    }

    #[test]
    fn new_rejects_unparseable_base_url() {
        let result = CmsClient::new("not a url", 30, "vitrine-test/0.1");
        assert!(matches!(result, Err(CmsError::InvalidBaseUrl { .. })));
    }
}

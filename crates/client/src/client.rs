//! HTTP client for the monitored application's REST API.

use crate::error::{truncate_body, ClientError, ClientResult};
use crate::query::QueryParams;
use arrgauge_core::AppDescriptor;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Longest body excerpt kept in a status error.
pub const MAX_ERROR_BODY: usize = 256;

/// Issues authenticated GET requests for one application instance.
///
/// Built fresh for every collect; holds no state between scrapes.
#[derive(Debug, Clone)]
pub struct ArrClient {
    client: Client,
    base_url: String,
    api_prefix: String,
    app: Arc<AppDescriptor>,
}

impl ArrClient {
    /// Build a client from a resolved descriptor.
    pub fn new(app: Arc<AppDescriptor>) -> ClientResult<Self> {
        let parsed = Url::parse(app.base_url.trim())
            .map_err(|e| ClientError::Construction(format!("invalid base URL {:?}: {}", app.base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Construction(format!(
                "unsupported URL scheme {:?} in {:?}",
                parsed.scheme(),
                app.base_url
            )));
        }

        let mut headers = header::HeaderMap::new();
        let mut key = header::HeaderValue::from_str(app.api_key.expose())
            .map_err(|_| ClientError::Construction("invalid API key format".to_string()))?;
        key.set_sensitive(true);
        headers.insert(header::HeaderName::from_static(API_KEY_HEADER), key);

        let client = Client::builder()
            .timeout(app.timeout)
            .default_headers(headers)
            .danger_accept_invalid_certs(!app.tls_verify)
            .build()
            .map_err(|e| ClientError::Construction(e.to_string()))?;

        Ok(Self {
            client,
            base_url: app.base_url.trim().trim_end_matches('/').to_string(),
            api_prefix: app.api_prefix(),
            app,
        })
    }

    pub fn app(&self) -> &AppDescriptor {
        &self.app
    }

    /// Build the full URL for a resource path.
    pub fn build_url(&self, resource: &str, params: &QueryParams) -> ClientResult<Url> {
        let raw = format!(
            "{}{}/{}",
            self.base_url,
            self.api_prefix,
            resource.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|e| ClientError::Construction(format!("invalid URL {raw:?}: {e}")))?;

        if !params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in params.iter() {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Fetch `resource` and decode its JSON body.
    ///
    /// Exactly one GET is issued; there is no retry.
    pub async fn do_request<T: DeserializeOwned>(&self, resource: &str, params: &QueryParams) -> ClientResult<T> {
        let url = self.build_url(resource, params)?;
        let url_str = url.to_string();
        debug!(url = %url, "GET request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url_str.clone(),
                source,
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|source| ClientError::Transport {
            url: url_str.clone(),
            source,
        })?;

        if !status.is_success() {
            debug!(url = %url_str, status = status.as_u16(), "request returned error status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url_str,
                body: truncate_body(&String::from_utf8_lossy(&body), MAX_ERROR_BODY),
            });
        }

        serde_json::from_slice(&body).map_err(|source| ClientError::Decode { url: url_str, source })
    }
}

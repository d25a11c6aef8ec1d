use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::UpstreamConfig;
use crate::errors::UpstreamError;
use crate::services::Credentials;

/// Pooled client bound to one upstream base URL.
#[derive(Debug, Clone)]
pub struct UpstreamHttp {
    service: &'static str,
    base_url: Url,
    client: Client,
}

impl UpstreamHttp {
    pub fn new(service: &'static str, config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let base_url = config
            .base_url()
            .map_err(|e| UpstreamError::InvalidUrl {
                service,
                reason: format!("{:#}", e),
            })?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|source| UpstreamError::Transport { service, source })?;

        Ok(Self {
            service,
            base_url,
            client,
        })
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    pub fn url(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl {
                service: self.service,
                reason: format!("'{}' cannot be a base", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn request(
        &self,
        method: Method,
        segments: &[&str],
        credentials: &Credentials,
    ) -> Result<RequestBuilder, UpstreamError> {
        let url = self.url(segments)?;
        debug!("{} {} {}", self.service, method, url);

        let builder = self.client.request(method, url);
        Ok(match &credentials.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, UpstreamError> {
        let response = builder
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                service: self.service,
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("{} responded with {}: {}", self.service, status, body);
        Err(UpstreamError::Status {
            service: self.service,
            status,
            body,
        })
    }

    pub async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, UpstreamError> {
        let response = self.send(builder).await?;
        let body = response
            .text()
            .await
            .map_err(|source| UpstreamError::Transport {
                service: self.service,
                source,
            })?;

        serde_json::from_str(&body).map_err(|e| UpstreamError::Decode {
            service: self.service,
            reason: e.to_string(),
        })
    }

    /// Sends the request and discards any response body.
    pub async fn send_empty(&self, builder: RequestBuilder) -> Result<(), UpstreamError> {
        self.send(builder).await.map(|_| ())
    }
}

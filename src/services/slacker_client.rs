use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::config::UpstreamConfig;
use crate::errors::{CoreResult, UpstreamError};
use crate::services::http::UpstreamHttp;
use crate::services::{Credentials, SlackerService};

/// Client for the Slack integration service.
#[derive(Debug, Clone)]
pub struct SlackerClient {
    http: UpstreamHttp,
}

#[derive(Deserialize)]
struct InstallPathResponse {
    url: String,
}

impl SlackerClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        Ok(Self {
            http: UpstreamHttp::new("slacker", config)?,
        })
    }
}

#[async_trait]
impl SlackerService for SlackerClient {
    async fn get_install_path(&self, credentials: &Credentials) -> CoreResult<String> {
        let request = self
            .http
            .request(Method::GET, &["install_path"], credentials)?;
        let response: InstallPathResponse = self.http.send_json(request).await?;
        Ok(response.url)
    }

    async fn connect_slack_user(&self, credentials: &Credentials, secret: &str) -> CoreResult<()> {
        info!("Connecting Slack user");
        let request = self
            .http
            .request(Method::POST, &["connect_slack_user"], credentials)?
            .json(&json!({ "secret": secret }));

        Ok(self.http.send_empty(request).await?)
    }
}

use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

use crate::config::UpstreamConfig;
use crate::domain::{DataSource, DataSourceRequestParams, UpdateDataSourceParams};
use crate::errors::{CoreResult, UpstreamError};
use crate::services::http::UpstreamHttp;
use crate::services::{Credentials, RestService};

/// Client for the REST API that owns cloud accounts.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: UpstreamHttp,
}

impl RestClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        Ok(Self {
            http: UpstreamHttp::new("rest", config)?,
        })
    }
}

#[async_trait]
impl RestService for RestClient {
    async fn get_data_source(
        &self,
        credentials: &Credentials,
        data_source_id: &str,
        params: &DataSourceRequestParams,
    ) -> CoreResult<DataSource> {
        let mut request =
            self.http
                .request(Method::GET, &["cloud_accounts", data_source_id], credentials)?;
        if let Some(details) = params.details {
            request = request.query(&[("details", details)]);
        }

        Ok(self.http.send_json(request).await?)
    }

    async fn update_data_source(
        &self,
        credentials: &Credentials,
        data_source_id: &str,
        params: &UpdateDataSourceParams,
    ) -> CoreResult<DataSource> {
        info!("Updating data source {}", data_source_id);
        let request = self
            .http
            .request(Method::PATCH, &["cloud_accounts", data_source_id], credentials)?
            .json(params);

        Ok(self.http.send_json(request).await?)
    }
}

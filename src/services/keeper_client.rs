use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;

use crate::config::UpstreamConfig;
use crate::domain::{Event, EventsRequestParams};
use crate::errors::{CoreResult, UpstreamError};
use crate::services::http::UpstreamHttp;
use crate::services::{Credentials, KeeperService};

/// Client for the audit/event keeper.
#[derive(Debug, Clone)]
pub struct KeeperClient {
    http: UpstreamHttp,
}

#[derive(Deserialize)]
struct EventsResponse {
    #[serde(default)]
    events: Vec<Event>,
}

impl KeeperClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        Ok(Self {
            http: UpstreamHttp::new("keeper", config)?,
        })
    }
}

#[async_trait]
impl KeeperService for KeeperClient {
    async fn get_events(
        &self,
        credentials: &Credentials,
        organization_id: &str,
        params: &EventsRequestParams,
    ) -> CoreResult<Vec<Event>> {
        let request = self
            .http
            .request(
                Method::GET,
                &["organizations", organization_id, "events"],
                credentials,
            )?
            .query(&params.to_query());

        let response: EventsResponse = self.http.send_json(request).await?;
        Ok(response.events)
    }
}

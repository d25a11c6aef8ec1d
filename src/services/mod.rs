//! Collaborators the GraphQL resolvers and REST handlers delegate to.
//!
//! Each collaborator is a trait so the schema can run against the HTTP
//! clients in production and against in-memory fixtures in demo mode and
//! tests.

pub mod demo;
pub mod http;
pub mod keeper_client;
pub mod rest_client;
pub mod slacker_client;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::config::{AppConfig, Backend};
use crate::domain::{
    DataSource, DataSourceRequestParams, Event, EventsRequestParams, Executor, Run, Runset,
    RunsetTemplate, UpdateDataSourceParams,
};
use crate::errors::CoreResult;
use crate::ml::ModelInfo;

pub use demo::{DemoKeeperService, DemoMlService, DemoRestService, DemoSlackerService};
pub use keeper_client::KeeperClient;
pub use rest_client::RestClient;
pub use slacker_client::SlackerClient;

/// Caller identity forwarded to upstream services.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: Option<String>,
}

impl Credentials {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Parses an `Authorization` header value. Anything but a non-empty
    /// bearer token yields anonymous credentials.
    pub fn from_authorization_header(value: &str) -> Self {
        let mut parts = value.trim().splitn(2, ' ');
        match (parts.next(), parts.next()) {
            (Some(scheme), Some(token))
                if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() =>
            {
                Self::bearer(token.trim())
            }
            _ => Self::anonymous(),
        }
    }
}

#[async_trait]
pub trait RestService: Send + Sync {
    async fn get_data_source(
        &self,
        credentials: &Credentials,
        data_source_id: &str,
        params: &DataSourceRequestParams,
    ) -> CoreResult<DataSource>;

    async fn update_data_source(
        &self,
        credentials: &Credentials,
        data_source_id: &str,
        params: &UpdateDataSourceParams,
    ) -> CoreResult<DataSource>;
}

#[async_trait]
pub trait KeeperService: Send + Sync {
    async fn get_events(
        &self,
        credentials: &Credentials,
        organization_id: &str,
        params: &EventsRequestParams,
    ) -> CoreResult<Vec<Event>>;
}

#[async_trait]
pub trait SlackerService: Send + Sync {
    /// URL that starts the Slack app installation.
    async fn get_install_path(&self, credentials: &Credentials) -> CoreResult<String>;

    async fn connect_slack_user(&self, credentials: &Credentials, secret: &str) -> CoreResult<()>;
}

/// Experiment tracking backend behind the ML REST endpoints.
#[async_trait]
pub trait MlService: Send + Sync {
    async fn list_models(&self) -> CoreResult<Vec<ModelInfo>>;

    async fn get_model(&self, model_id: &str) -> CoreResult<ModelInfo>;

    /// Runs of a model, newest first, with runset back-references.
    async fn get_model_runs(&self, model_id: &str) -> CoreResult<Vec<Run>>;

    async fn list_runsets(&self) -> CoreResult<Vec<Runset>>;

    async fn get_runset(&self, runset_id: &str) -> CoreResult<Runset>;

    async fn get_runset_template(&self, template_id: &str) -> CoreResult<RunsetTemplate>;

    async fn list_executors(&self) -> CoreResult<Vec<Executor>>;
}

/// Collaborators shared by the schema and the REST handlers.
#[derive(Clone)]
pub struct Services {
    pub backend: Backend,
    pub rest: Arc<dyn RestService>,
    pub keeper: Arc<dyn KeeperService>,
    pub slacker: Arc<dyn SlackerService>,
    pub ml: Arc<dyn MlService>,
}

impl Services {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        match config.backend {
            Backend::Demo => {
                info!("Using in-memory demo collaborators");
                Ok(Self::demo())
            }
            Backend::Live => {
                let upstreams = &config.upstreams;
                info!(
                    "Using upstreams rest={} keeper={} slacker={}",
                    upstreams.rest.url, upstreams.keeper.url, upstreams.slacker.url
                );
                Ok(Self {
                    backend: Backend::Live,
                    rest: Arc::new(RestClient::new(&upstreams.rest)?),
                    keeper: Arc::new(KeeperClient::new(&upstreams.keeper)?),
                    slacker: Arc::new(SlackerClient::new(&upstreams.slacker)?),
                    // experiment tracking has no upstream; always fixtures
                    ml: Arc::new(DemoMlService::builtin()),
                })
            }
        }
    }

    pub fn demo() -> Self {
        Self {
            backend: Backend::Demo,
            rest: Arc::new(DemoRestService::builtin()),
            keeper: Arc::new(DemoKeeperService::builtin()),
            slacker: Arc::new(DemoSlackerService::default()),
            ml: Arc::new(DemoMlService::builtin()),
        }
    }
}

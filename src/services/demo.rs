//! In-memory collaborators used by `backend: demo` and by tests.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::{
    DataSource, DataSourceDetails, DataSourceRequestParams, DataSourceType, Event, EventLevel,
    EventsRequestParams, Executor, Run, Runset, RunsetTemplate, UpdateDataSourceParams,
};
use crate::errors::{CoreError, CoreResult};
use crate::ml::{attach_runset_refs, derive_runset, model_info, DemoDataset, ModelInfo};
use crate::services::{Credentials, KeeperService, MlService, RestService, SlackerService};

const DEMO_TIME: i64 = 1_717_200_000;
pub const DEMO_ORGANIZATION_ID: &str = "org-demo";

/// Data source the demo store reports with a type no client knows.
pub const UNSUPPORTED_DATA_SOURCE_ID: &str = "ds-legacy";

fn provider_config(kind: DataSourceType) -> Value {
    match kind {
        DataSourceType::AwsCnr => json!({
            "access_key_id": "AKIADEMO0000000000",
            "linked": false,
            "use_edp_discount": false,
            "cur_version": 2,
            "bucket_name": "demo-billing-reports",
            "bucket_prefix": "reports",
            "config_scheme": "create_report",
            "region_name": "us-east-1",
            "report_name": "costdeck-demo",
        }),
        DataSourceType::AzureTenant => json!({
            "client_id": "7d9a3c1e-demo",
            "tenant": "f2b1c0de-demo",
        }),
        DataSourceType::AzureCnr => json!({
            "client_id": "7d9a3c1e-demo",
            "tenant": "f2b1c0de-demo",
            "subscription_id": "a1b2c3d4-demo",
            "expense_import_scheme": "usage",
        }),
        DataSourceType::GcpCnr => json!({
            "billing_data": {
                "dataset_name": "billing",
                "table_name": "gcp_billing_export_v1",
                "project_id": "costdeck-demo",
            }
        }),
        DataSourceType::AlibabaCnr => json!({ "access_key_id": "LTAIdemo" }),
        DataSourceType::Nebius => json!({
            "cloud_name": "demo-cloud",
            "service_account_id": "ajedemo",
            "key_id": "ajekey",
            "access_key_id": "YCAJdemo",
            "bucket_name": "nebius-billing",
            "bucket_prefix": "exports",
        }),
        DataSourceType::Databricks => json!({
            "account_id": "dbx-account-demo",
            "client_id": "dbx-client-demo",
        }),
        DataSourceType::KubernetesCnr => json!({
            "url": "https://k8s.demo.internal",
            "port": 4433,
            "user": "costdeck",
            "cost_model": { "cpu_hourly_cost": 0.002, "memory_hourly_cost": 0.001 },
        }),
        DataSourceType::Environment => json!({}),
    }
}

fn demo_data_source(kind: DataSourceType, index: usize) -> DataSource {
    let cost = 120.5 * (index as f64 + 1.0);
    DataSource {
        id: format!("ds-{}", kind.as_str().trim_end_matches("_cnr")),
        name: format!("Demo {}", kind.as_str()),
        kind: kind.as_str().to_string(),
        parent_id: None,
        account_id: Some("acc-demo".to_string()),
        last_import_at: DEMO_TIME,
        last_import_modified_at: DEMO_TIME,
        last_import_attempt_at: DEMO_TIME,
        last_import_attempt_error: None,
        last_getting_metrics_at: DEMO_TIME,
        last_getting_metric_attempt_at: DEMO_TIME,
        last_getting_metric_attempt_error: None,
        config: provider_config(kind),
        details: Some(DataSourceDetails {
            cost,
            forecast: cost * 1.4,
            resources: 10 * (index as i64 + 1),
            last_month_cost: Some(cost * 0.9),
            discovery_infos: Vec::new(),
        }),
    }
}

/// Cloud accounts keyed by id: one per provider type, plus one record with a
/// type outside the known set.
pub struct DemoRestService {
    data_sources: RwLock<IndexMap<String, DataSource>>,
}

impl DemoRestService {
    pub fn new(data_sources: impl IntoIterator<Item = DataSource>) -> Self {
        Self {
            data_sources: RwLock::new(
                data_sources
                    .into_iter()
                    .map(|ds| (ds.id.clone(), ds))
                    .collect(),
            ),
        }
    }

    pub fn builtin() -> Self {
        let mut records: Vec<DataSource> = DataSourceType::ALL
            .into_iter()
            .enumerate()
            .map(|(index, kind)| demo_data_source(kind, index))
            .collect();

        let mut legacy = demo_data_source(DataSourceType::Environment, records.len());
        legacy.id = UNSUPPORTED_DATA_SOURCE_ID.to_string();
        legacy.name = "Legacy VMware".to_string();
        legacy.kind = "vmware_cnr".to_string();
        records.push(legacy);

        Self::new(records)
    }
}

#[async_trait]
impl RestService for DemoRestService {
    async fn get_data_source(
        &self,
        _credentials: &Credentials,
        data_source_id: &str,
        params: &DataSourceRequestParams,
    ) -> CoreResult<DataSource> {
        let data_sources = self.data_sources.read().await;
        let mut record = data_sources
            .get(data_source_id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("DataSource", data_source_id))?;

        if params.details != Some(true) {
            record.details = None;
        }
        Ok(record)
    }

    async fn update_data_source(
        &self,
        _credentials: &Credentials,
        data_source_id: &str,
        params: &UpdateDataSourceParams,
    ) -> CoreResult<DataSource> {
        let mut data_sources = self.data_sources.write().await;
        let record = data_sources
            .get_mut(data_source_id)
            .ok_or_else(|| CoreError::not_found("DataSource", data_source_id))?;

        if let Some(name) = &params.name {
            if name.trim().is_empty() {
                return Err(CoreError::validation("Data source name cannot be empty")
                    .with_field("field", "name"));
            }
            record.name = name.clone();
        }
        if let Some(value) = params.last_import_at {
            record.last_import_at = value;
        }
        if let Some(value) = params.last_import_modified_at {
            record.last_import_modified_at = value;
        }
        if let Some(value) = params.last_import_attempt_at {
            record.last_import_attempt_at = value;
        }
        if let Some(value) = &params.last_import_attempt_error {
            record.last_import_attempt_error = Some(value.clone());
        }
        if let Some(value) = params.last_getting_metrics_at {
            record.last_getting_metrics_at = value;
        }
        if let Some(value) = params.last_getting_metric_attempt_at {
            record.last_getting_metric_attempt_at = value;
        }
        if let Some(value) = &params.last_getting_metric_attempt_error {
            record.last_getting_metric_attempt_error = Some(value.clone());
        }
        if let Some(config) = &params.config {
            merge_config(&mut record.config, config);
        }

        info!("Demo data source {} updated", data_source_id);
        let mut updated = record.clone();
        updated.details = None;
        Ok(updated)
    }
}

/// Shallow merge of the submitted keys; the store keeps no secrets, so
/// secret-looking keys are dropped.
fn merge_config(target: &mut Value, update: &Value) {
    let (Some(target), Some(update)) = (target.as_object_mut(), update.as_object()) else {
        return;
    };
    for (key, value) in update {
        if is_secret_key(key) {
            continue;
        }
        target.insert(key.clone(), value.clone());
    }
}

fn is_secret_key(key: &str) -> bool {
    key.contains("secret") || key == "credentials" || key == "password"
}

pub struct DemoKeeperService {
    events: Vec<Event>,
}

impl DemoKeeperService {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn builtin() -> Self {
        let event = |id: &str, offset: i64, level: EventLevel, description: &str, read: bool| Event {
            id: id.to_string(),
            time: DEMO_TIME - offset,
            level,
            evt_class: Some("CLOUD_ACCOUNT".to_string()),
            object_id: Some("ds-aws".to_string()),
            object_type: Some("cloud_account".to_string()),
            object_name: Some("Demo aws_cnr".to_string()),
            organization_id: DEMO_ORGANIZATION_ID.to_string(),
            description: Some(description.to_string()),
            ack: false,
            read,
            acknowledged_user: None,
            localized: None,
        };

        Self::new(vec![
            event("evt-4", 60, EventLevel::Error, "Billing import failed for Demo aws_cnr", false),
            event("evt-3", 3_600, EventLevel::Warning, "Expenses exceeded the pool limit", false),
            event("evt-2", 7_200, EventLevel::Info, "Data source Demo gcp_cnr connected", true),
            event("evt-1", 86_400, EventLevel::Debug, "Scheduled discovery finished", true),
        ])
    }

    fn matches(event: &Event, params: &EventsRequestParams) -> bool {
        if !params.levels.is_empty() && !params.levels.contains(&event.level) {
            return false;
        }
        if params.include_read != Some(true) && event.read {
            return false;
        }
        if params.time_start.is_some_and(|start| event.time < start) {
            return false;
        }
        if params.time_end.is_some_and(|end| event.time > end) {
            return false;
        }
        if let Some(pattern) = &params.description_like {
            let description = event.description.as_deref().unwrap_or_default();
            if !description.to_lowercase().contains(&pattern.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl KeeperService for DemoKeeperService {
    async fn get_events(
        &self,
        _credentials: &Credentials,
        organization_id: &str,
        params: &EventsRequestParams,
    ) -> CoreResult<Vec<Event>> {
        // events are stored newest first; `last_id` pages past that event
        let start = match &params.last_id {
            Some(last_id) => match self.events.iter().position(|event| &event.id == last_id) {
                Some(index) => index + 1,
                None => {
                    debug!("Demo keeper has no event {last_id}, returning an empty page");
                    return Ok(Vec::new());
                }
            },
            None => 0,
        };
        let limit = match params.limit {
            Some(limit) => usize::try_from(limit).map_err(|_| {
                CoreError::validation("Limit must not be negative").with_field("field", "limit")
            })?,
            None => usize::MAX,
        };

        let events: Vec<Event> = self.events[start..]
            .iter()
            .filter(|event| event.organization_id == organization_id)
            .filter(|event| Self::matches(event, params))
            .take(limit)
            .cloned()
            .collect();
        debug!("Demo keeper returning {} events", events.len());
        Ok(events)
    }
}

#[derive(Debug, Default)]
pub struct DemoSlackerService;

#[async_trait]
impl SlackerService for DemoSlackerService {
    async fn get_install_path(&self, _credentials: &Credentials) -> CoreResult<String> {
        Ok("https://slack.com/oauth/v2/authorize?client_id=costdeck-demo&scope=chat:write".to_string())
    }

    async fn connect_slack_user(&self, _credentials: &Credentials, secret: &str) -> CoreResult<()> {
        if secret.trim().is_empty() {
            return Err(CoreError::validation("Secret is required").with_field("field", "secret"));
        }
        Ok(())
    }
}

/// Experiment tracking backed by a fixed dataset.
pub struct DemoMlService {
    data: DemoDataset,
}

impl DemoMlService {
    pub fn new(data: DemoDataset) -> Self {
        Self { data }
    }

    pub fn builtin() -> Self {
        Self::new(DemoDataset::builtin())
    }

    fn model_runs(&self, model_id: &str) -> Vec<Run> {
        let runs = self
            .data
            .runs
            .iter()
            .filter(|run| run.model_id == model_id)
            .cloned()
            .collect();
        attach_runset_refs(runs, &self.data.runsets, &self.data.runset_templates)
    }
}

#[async_trait]
impl MlService for DemoMlService {
    async fn list_models(&self) -> CoreResult<Vec<ModelInfo>> {
        Ok(self
            .data
            .models
            .iter()
            .map(|model| model_info(model, &self.model_runs(&model.id)))
            .collect())
    }

    async fn get_model(&self, model_id: &str) -> CoreResult<ModelInfo> {
        let model = self
            .data
            .models
            .iter()
            .find(|model| model.id == model_id)
            .ok_or_else(|| CoreError::not_found("Model", model_id))?;
        Ok(model_info(model, &self.model_runs(model_id)))
    }

    async fn get_model_runs(&self, model_id: &str) -> CoreResult<Vec<Run>> {
        if !self.data.models.iter().any(|model| model.id == model_id) {
            return Err(CoreError::not_found("Model", model_id));
        }
        Ok(self.model_runs(model_id))
    }

    async fn list_runsets(&self) -> CoreResult<Vec<Runset>> {
        Ok(self
            .data
            .runsets
            .iter()
            .map(|runset| derive_runset(runset, &self.data.runs, &self.data.runset_templates))
            .collect())
    }

    async fn get_runset(&self, runset_id: &str) -> CoreResult<Runset> {
        self.data
            .runsets
            .iter()
            .find(|runset| runset.id == runset_id)
            .map(|runset| derive_runset(runset, &self.data.runs, &self.data.runset_templates))
            .ok_or_else(|| CoreError::not_found("Runset", runset_id))
    }

    async fn get_runset_template(&self, template_id: &str) -> CoreResult<RunsetTemplate> {
        self.data
            .runset_templates
            .iter()
            .find(|template| template.id == template_id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("RunsetTemplate", template_id))
    }

    async fn list_executors(&self) -> CoreResult<Vec<Executor>> {
        Ok(self.data.executors.clone())
    }
}

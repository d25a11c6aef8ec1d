use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "graphql")]
use async_graphql::{Enum, SimpleObject};

/// Provider type of a connected data source, as reported in the `type` field.
#[cfg_attr(feature = "graphql", derive(Enum))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSourceType {
    #[cfg_attr(feature = "graphql", graphql(name = "alibaba_cnr"))]
    AlibabaCnr,
    #[cfg_attr(feature = "graphql", graphql(name = "aws_cnr"))]
    AwsCnr,
    #[cfg_attr(feature = "graphql", graphql(name = "azure_cnr"))]
    AzureCnr,
    #[cfg_attr(feature = "graphql", graphql(name = "azure_tenant"))]
    AzureTenant,
    #[cfg_attr(feature = "graphql", graphql(name = "databricks"))]
    Databricks,
    #[cfg_attr(feature = "graphql", graphql(name = "environment"))]
    Environment,
    #[cfg_attr(feature = "graphql", graphql(name = "gcp_cnr"))]
    GcpCnr,
    #[cfg_attr(feature = "graphql", graphql(name = "kubernetes_cnr"))]
    KubernetesCnr,
    #[cfg_attr(feature = "graphql", graphql(name = "nebius"))]
    Nebius,
}

impl DataSourceType {
    pub const ALL: [DataSourceType; 9] = [
        DataSourceType::AlibabaCnr,
        DataSourceType::AwsCnr,
        DataSourceType::AzureCnr,
        DataSourceType::AzureTenant,
        DataSourceType::Databricks,
        DataSourceType::Environment,
        DataSourceType::GcpCnr,
        DataSourceType::KubernetesCnr,
        DataSourceType::Nebius,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataSourceType::AlibabaCnr => "alibaba_cnr",
            DataSourceType::AwsCnr => "aws_cnr",
            DataSourceType::AzureCnr => "azure_cnr",
            DataSourceType::AzureTenant => "azure_tenant",
            DataSourceType::Databricks => "databricks",
            DataSourceType::Environment => "environment",
            DataSourceType::GcpCnr => "gcp_cnr",
            DataSourceType::KubernetesCnr => "kubernetes_cnr",
            DataSourceType::Nebius => "nebius",
        }
    }

    /// Name of the concrete GraphQL object implementing `DataSourceInterface`.
    pub fn graphql_type_name(&self) -> &'static str {
        match self {
            DataSourceType::AwsCnr => "AwsDataSource",
            DataSourceType::AzureTenant => "AzureTenantDataSource",
            DataSourceType::AzureCnr => "AzureSubscriptionDataSource",
            DataSourceType::GcpCnr => "GcpDataSource",
            DataSourceType::AlibabaCnr => "AlibabaDataSource",
            DataSourceType::Nebius => "NebiusDataSource",
            DataSourceType::Databricks => "DatabricksDataSource",
            DataSourceType::KubernetesCnr => "K8sDataSource",
            DataSourceType::Environment => "EnvironmentDataSource",
        }
    }
}

impl fmt::Display for DataSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDataSourceType(pub String);

impl fmt::Display for UnknownDataSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown data source type '{}'", self.0)
    }
}

impl std::error::Error for UnknownDataSourceType {}

impl FromStr for DataSourceType {
    type Err = UnknownDataSourceType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        DataSourceType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| UnknownDataSourceType(value.to_string()))
    }
}

/// Maps a raw `type` discriminator onto the concrete GraphQL type name.
/// Returns `None` for anything outside the nine known provider types.
pub fn resolve_type_name(discriminator: &str) -> Option<&'static str> {
    discriminator
        .parse::<DataSourceType>()
        .ok()
        .map(|kind| kind.graphql_type_name())
}

/// Data source record as returned by the REST service.
///
/// `kind` stays a raw string so a value the gateway does not know survives
/// deserialization and is rejected only at type resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataSource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub last_import_at: i64,
    #[serde(default)]
    pub last_import_modified_at: i64,
    #[serde(default)]
    pub last_import_attempt_at: i64,
    #[serde(default)]
    pub last_import_attempt_error: Option<String>,
    #[serde(default)]
    pub last_getting_metrics_at: i64,
    #[serde(default)]
    pub last_getting_metric_attempt_at: i64,
    #[serde(default)]
    pub last_getting_metric_attempt_error: Option<String>,
    #[serde(default)]
    pub config: serde_json::Value,
    #[serde(default)]
    pub details: Option<DataSourceDetails>,
}

impl DataSource {
    pub fn data_source_type(&self) -> Result<DataSourceType, UnknownDataSourceType> {
        self.kind.parse()
    }
}

#[cfg_attr(feature = "graphql", derive(SimpleObject))]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DataSourceDetails {
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub forecast: f64,
    #[serde(default)]
    pub resources: i64,
    #[serde(default)]
    pub last_month_cost: Option<f64>,
    #[serde(default)]
    pub discovery_infos: Vec<DataSourceDiscoveryInfo>,
}

#[cfg_attr(feature = "graphql", derive(SimpleObject))]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DataSourceDiscoveryInfo {
    pub id: String,
    #[serde(default)]
    pub cloud_account_id: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub last_discovery_at: i64,
    #[serde(default)]
    pub last_error_at: i64,
    #[serde(default)]
    pub last_error: Option<String>,
    #[serde(default)]
    pub observe_time: i64,
}

/// Query parameters accepted when fetching a single data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceRequestParams {
    pub details: Option<bool>,
}

/// Update payload forwarded to the REST service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateDataSourceParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_import_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_import_modified_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_import_attempt_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_import_attempt_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_getting_metrics_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_getting_metric_attempt_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_getting_metric_attempt_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

// Provider configs as exposed to clients. Secrets never appear here; the
// write side lives in the GraphQL input types.

#[cfg_attr(feature = "graphql", derive(SimpleObject))]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AwsConfig {
    pub access_key_id: Option<String>,
    pub linked: Option<bool>,
    pub use_edp_discount: Option<bool>,
    pub cur_version: Option<i32>,
    pub bucket_name: Option<String>,
    pub bucket_prefix: Option<String>,
    pub config_scheme: Option<String>,
    pub region_name: Option<String>,
    pub report_name: Option<String>,
}

#[cfg_attr(feature = "graphql", derive(SimpleObject))]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AzureTenantConfig {
    pub client_id: Option<String>,
    pub tenant: Option<String>,
}

#[cfg_attr(feature = "graphql", derive(SimpleObject))]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AzureSubscriptionConfig {
    pub client_id: Option<String>,
    pub tenant: Option<String>,
    pub subscription_id: Option<String>,
    pub expense_import_scheme: Option<String>,
    pub export_name: Option<String>,
    pub container: Option<String>,
    pub directory: Option<String>,
}

#[cfg_attr(feature = "graphql", derive(SimpleObject))]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GcpBillingData {
    pub dataset_name: Option<String>,
    pub table_name: Option<String>,
    pub project_id: Option<String>,
}

#[cfg_attr(feature = "graphql", derive(SimpleObject))]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GcpConfig {
    pub billing_data: Option<GcpBillingData>,
}

#[cfg_attr(feature = "graphql", derive(SimpleObject))]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlibabaConfig {
    pub access_key_id: Option<String>,
}

#[cfg_attr(feature = "graphql", derive(SimpleObject))]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NebiusConfig {
    pub cloud_name: Option<String>,
    pub service_account_id: Option<String>,
    pub key_id: Option<String>,
    pub access_key_id: Option<String>,
    pub bucket_name: Option<String>,
    pub bucket_prefix: Option<String>,
}

#[cfg_attr(feature = "graphql", derive(SimpleObject))]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabricksConfig {
    pub account_id: Option<String>,
    pub client_id: Option<String>,
}

#[cfg_attr(feature = "graphql", derive(SimpleObject))]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
#[cfg_attr(feature = "graphql", graphql(name = "K8sCostModel"))]
pub struct K8sCostModel {
    pub cpu_hourly_cost: Option<f64>,
    pub memory_hourly_cost: Option<f64>,
}

#[cfg_attr(feature = "graphql", derive(SimpleObject))]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
#[cfg_attr(feature = "graphql", graphql(name = "K8sConfig"))]
pub struct K8sConfig {
    pub url: Option<String>,
    pub port: Option<i32>,
    pub user: Option<String>,
    pub cost_model: Option<K8sCostModel>,
}

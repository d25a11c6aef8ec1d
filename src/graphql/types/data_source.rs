use async_graphql::*;
use serde::de::DeserializeOwned;

use crate::domain::{
    AlibabaConfig, AwsConfig, AzureSubscriptionConfig, AzureTenantConfig, DataSource,
    DataSourceDetails, DataSourceType, DatabricksConfig, GcpConfig, K8sConfig, NebiusConfig,
};
use crate::errors::{CoreError, CoreResult};

pub const DATA_SOURCE_INTERFACE: &str = "DataSourceInterface";

// Every implementor shares the record fields; only the typed `config`
// differs between providers.
macro_rules! data_source_object {
    ($(#[$meta:meta])* $name:ident $(, $config:ident: $config_ty:ty)?) => {
        #[derive(SimpleObject, Clone, Debug)]
        $(#[$meta])*
        pub struct $name {
            pub id: ID,
            pub name: String,
            #[graphql(name = "type")]
            pub kind: DataSourceType,
            pub parent_id: Option<String>,
            pub account_id: Option<String>,
            pub last_import_at: i64,
            pub last_import_modified_at: i64,
            pub last_import_attempt_at: i64,
            pub last_import_attempt_error: Option<String>,
            pub last_getting_metrics_at: i64,
            pub last_getting_metric_attempt_at: i64,
            pub last_getting_metric_attempt_error: Option<String>,
            pub details: Option<DataSourceDetails>,
            $(pub $config: $config_ty,)?
        }

        impl $name {
            fn new(record: DataSource, kind: DataSourceType $(, $config: $config_ty)?) -> Self {
                Self {
                    id: ID(record.id),
                    name: record.name,
                    kind,
                    parent_id: record.parent_id,
                    account_id: record.account_id,
                    last_import_at: record.last_import_at,
                    last_import_modified_at: record.last_import_modified_at,
                    last_import_attempt_at: record.last_import_attempt_at,
                    last_import_attempt_error: record.last_import_attempt_error,
                    last_getting_metrics_at: record.last_getting_metrics_at,
                    last_getting_metric_attempt_at: record.last_getting_metric_attempt_at,
                    last_getting_metric_attempt_error: record.last_getting_metric_attempt_error,
                    details: record.details,
                    $($config,)?
                }
            }
        }
    };
}

data_source_object!(
    /// Amazon Web Services account
    AwsDataSource, config: AwsConfig
);
data_source_object!(
    /// Azure tenant grouping subscriptions
    AzureTenantDataSource, config: AzureTenantConfig
);
data_source_object!(
    /// Azure subscription
    AzureSubscriptionDataSource, config: AzureSubscriptionConfig
);
data_source_object!(
    /// Google Cloud billing account
    GcpDataSource, config: GcpConfig
);
data_source_object!(AlibabaDataSource, config: AlibabaConfig);
data_source_object!(NebiusDataSource, config: NebiusConfig);
data_source_object!(DatabricksDataSource, config: DatabricksConfig);
data_source_object!(
    /// Kubernetes cluster reporting through the cost model
    #[graphql(name = "K8sDataSource")]
    K8sDataSource, config: K8sConfig
);
data_source_object!(
    /// Environment (shared resource pool) with no provider config
    EnvironmentDataSource
);

#[derive(Interface, Clone, Debug)]
#[graphql(
    name = "DataSourceInterface",
    field(name = "id", ty = "&ID"),
    field(name = "name", ty = "&String"),
    field(name = "type", method = "kind", ty = "&DataSourceType"),
    field(name = "parent_id", ty = "&Option<String>"),
    field(name = "account_id", ty = "&Option<String>"),
    field(name = "last_import_at", ty = "&i64"),
    field(name = "last_import_modified_at", ty = "&i64"),
    field(name = "last_import_attempt_at", ty = "&i64"),
    field(name = "last_import_attempt_error", ty = "&Option<String>"),
    field(name = "last_getting_metrics_at", ty = "&i64"),
    field(name = "last_getting_metric_attempt_at", ty = "&i64"),
    field(name = "last_getting_metric_attempt_error", ty = "&Option<String>"),
    field(name = "details", ty = "&Option<DataSourceDetails>")
)]
pub enum DataSourceInterface {
    Aws(AwsDataSource),
    AzureTenant(AzureTenantDataSource),
    AzureSubscription(AzureSubscriptionDataSource),
    Gcp(GcpDataSource),
    Alibaba(AlibabaDataSource),
    Nebius(NebiusDataSource),
    Databricks(DatabricksDataSource),
    K8s(K8sDataSource),
    Environment(EnvironmentDataSource),
}

/// Provider config from the raw record. A missing config reads as empty.
fn typed_config<T>(record: &DataSource, kind: DataSourceType) -> CoreResult<T>
where
    T: DeserializeOwned + Default,
{
    if record.config.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(record.config.clone()).map_err(|e| {
        CoreError::internal(format!("Invalid {} config: {}", kind, e))
            .with_field("dataSourceId", record.id.clone())
    })
}

impl TryFrom<DataSource> for DataSourceInterface {
    type Error = CoreError;

    /// Picks the concrete type from the record's `type` discriminator.
    fn try_from(record: DataSource) -> CoreResult<Self> {
        let kind = record
            .data_source_type()
            .map_err(|unknown| CoreError::unresolved_type(DATA_SOURCE_INTERFACE, unknown.0))?;

        Ok(match kind {
            DataSourceType::AwsCnr => {
                let config = typed_config(&record, kind)?;
                Self::Aws(AwsDataSource::new(record, kind, config))
            }
            DataSourceType::AzureTenant => {
                let config = typed_config(&record, kind)?;
                Self::AzureTenant(AzureTenantDataSource::new(record, kind, config))
            }
            DataSourceType::AzureCnr => {
                let config = typed_config(&record, kind)?;
                Self::AzureSubscription(AzureSubscriptionDataSource::new(record, kind, config))
            }
            DataSourceType::GcpCnr => {
                let config = typed_config(&record, kind)?;
                Self::Gcp(GcpDataSource::new(record, kind, config))
            }
            DataSourceType::AlibabaCnr => {
                let config = typed_config(&record, kind)?;
                Self::Alibaba(AlibabaDataSource::new(record, kind, config))
            }
            DataSourceType::Nebius => {
                let config = typed_config(&record, kind)?;
                Self::Nebius(NebiusDataSource::new(record, kind, config))
            }
            DataSourceType::Databricks => {
                let config = typed_config(&record, kind)?;
                Self::Databricks(DatabricksDataSource::new(record, kind, config))
            }
            DataSourceType::KubernetesCnr => {
                let config = typed_config(&record, kind)?;
                Self::K8s(K8sDataSource::new(record, kind, config))
            }
            DataSourceType::Environment => {
                Self::Environment(EnvironmentDataSource::new(record, kind))
            }
        })
    }
}

impl DataSourceInterface {
    /// GraphQL name of the concrete type behind this value.
    pub fn concrete_type_name(&self) -> &'static str {
        match self {
            Self::Aws(_) => "AwsDataSource",
            Self::AzureTenant(_) => "AzureTenantDataSource",
            Self::AzureSubscription(_) => "AzureSubscriptionDataSource",
            Self::Gcp(_) => "GcpDataSource",
            Self::Alibaba(_) => "AlibabaDataSource",
            Self::Nebius(_) => "NebiusDataSource",
            Self::Databricks(_) => "DatabricksDataSource",
            Self::K8s(_) => "K8sDataSource",
            Self::Environment(_) => "EnvironmentDataSource",
        }
    }
}

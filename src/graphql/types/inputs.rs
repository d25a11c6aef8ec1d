use async_graphql::*;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::domain::{
    DataSourceRequestParams, EventLevel, EventsRequestParams, UpdateDataSourceParams,
};
use crate::graphql::errors::StructuredError;

#[derive(InputObject, Clone, Debug, Default)]
#[graphql(name = "DataSourceRequestParams")]
pub struct DataSourceRequestParamsInput {
    pub details: Option<bool>,
}

impl From<DataSourceRequestParamsInput> for DataSourceRequestParams {
    fn from(input: DataSourceRequestParamsInput) -> Self {
        Self {
            details: input.details,
        }
    }
}

#[derive(InputObject, Clone, Debug, Default)]
#[graphql(name = "EventsRequestParams")]
pub struct EventsRequestParamsInput {
    pub limit: Option<i32>,
    pub time_start: Option<i64>,
    pub time_end: Option<i64>,
    pub last_id: Option<String>,
    pub include_read: Option<bool>,
    pub read_on_get: Option<bool>,
    pub description_like: Option<String>,
    pub level: Option<Vec<EventLevel>>,
}

impl From<EventsRequestParamsInput> for EventsRequestParams {
    fn from(input: EventsRequestParamsInput) -> Self {
        Self {
            limit: input.limit,
            time_start: input.time_start,
            time_end: input.time_end,
            last_id: input.last_id,
            include_read: input.include_read,
            read_on_get: input.read_on_get,
            description_like: input.description_like,
            levels: input.level.unwrap_or_default(),
        }
    }
}

// Write-side provider configs. Unlike the output configs these carry the
// credentials the REST service needs to connect the account.

#[derive(InputObject, Serialize, Clone, Debug, Default)]
pub struct AwsConfigInput {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub linked: Option<bool>,
    pub use_edp_discount: Option<bool>,
    pub cur_version: Option<i32>,
    pub bucket_name: Option<String>,
    pub bucket_prefix: Option<String>,
    pub config_scheme: Option<String>,
    pub region_name: Option<String>,
    pub report_name: Option<String>,
}

#[derive(InputObject, Serialize, Clone, Debug, Default)]
pub struct AzureTenantConfigInput {
    pub client_id: Option<String>,
    pub secret: Option<String>,
    pub tenant: Option<String>,
}

#[derive(InputObject, Serialize, Clone, Debug, Default)]
pub struct AzureSubscriptionConfigInput {
    pub client_id: Option<String>,
    pub secret: Option<String>,
    pub tenant: Option<String>,
    pub subscription_id: Option<String>,
    pub expense_import_scheme: Option<String>,
    pub export_name: Option<String>,
    pub container: Option<String>,
    pub directory: Option<String>,
    pub sas_token: Option<String>,
    pub storage_account_connection_string: Option<String>,
}

#[derive(InputObject, Serialize, Clone, Debug, Default)]
pub struct GcpBillingDataInput {
    pub dataset_name: Option<String>,
    pub table_name: Option<String>,
    pub project_id: Option<String>,
}

#[derive(InputObject, Serialize, Clone, Debug, Default)]
pub struct GcpConfigInput {
    /// Service account key, as the JSON document downloaded from the console
    pub credentials: Option<String>,
    pub billing_data: Option<GcpBillingDataInput>,
}

#[derive(InputObject, Serialize, Clone, Debug, Default)]
pub struct AlibabaConfigInput {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

#[derive(InputObject, Serialize, Clone, Debug, Default)]
pub struct NebiusConfigInput {
    pub cloud_name: Option<String>,
    pub service_account_id: Option<String>,
    pub key_id: Option<String>,
    pub private_key: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub bucket_name: Option<String>,
    pub bucket_prefix: Option<String>,
}

#[derive(InputObject, Serialize, Clone, Debug, Default)]
pub struct DatabricksConfigInput {
    pub account_id: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

#[derive(InputObject, Serialize, Clone, Debug, Default)]
#[graphql(name = "K8sCostModelInput")]
pub struct K8sCostModelInput {
    pub cpu_hourly_cost: Option<f64>,
    pub memory_hourly_cost: Option<f64>,
}

#[derive(InputObject, Serialize, Clone, Debug, Default)]
#[graphql(name = "K8sConfigInput")]
pub struct K8sConfigInput {
    pub user: Option<String>,
    pub password: Option<String>,
    pub cost_model: Option<K8sCostModelInput>,
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct UpdateDataSourceInput {
    pub name: Option<String>,
    pub last_import_at: Option<i64>,
    pub last_import_modified_at: Option<i64>,
    pub last_import_attempt_at: Option<i64>,
    pub last_import_attempt_error: Option<String>,
    pub last_getting_metrics_at: Option<i64>,
    pub last_getting_metric_attempt_at: Option<i64>,
    pub last_getting_metric_attempt_error: Option<String>,
    pub aws_config: Option<AwsConfigInput>,
    pub azure_tenant_config: Option<AzureTenantConfigInput>,
    pub azure_subscription_config: Option<AzureSubscriptionConfigInput>,
    pub gcp_config: Option<GcpConfigInput>,
    pub alibaba_config: Option<AlibabaConfigInput>,
    pub nebius_config: Option<NebiusConfigInput>,
    pub databricks_config: Option<DatabricksConfigInput>,
    pub k8s_config: Option<K8sConfigInput>,
}

/// Serializes a config input, leaving out fields the client did not send.
fn config_value<T: Serialize>(input: &T) -> Option<JsonValue> {
    match serde_json::to_value(input) {
        Ok(value) => Some(without_nulls(value)),
        Err(e) => {
            warn!("Dropping unserializable config input: {}", e);
            None
        }
    }
}

fn without_nulls(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => JsonValue::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, without_nulls(v)))
                .collect(),
        ),
        other => other,
    }
}

impl UpdateDataSourceInput {
    /// Provider configs present in the input, in declaration order.
    fn provider_configs(&self) -> Vec<(&'static str, Option<JsonValue>)> {
        [
            ("awsConfig", self.aws_config.as_ref().map(config_value)),
            ("azureTenantConfig", self.azure_tenant_config.as_ref().map(config_value)),
            (
                "azureSubscriptionConfig",
                self.azure_subscription_config.as_ref().map(config_value),
            ),
            ("gcpConfig", self.gcp_config.as_ref().map(config_value)),
            ("alibabaConfig", self.alibaba_config.as_ref().map(config_value)),
            ("nebiusConfig", self.nebius_config.as_ref().map(config_value)),
            ("databricksConfig", self.databricks_config.as_ref().map(config_value)),
            ("k8sConfig", self.k8s_config.as_ref().map(config_value)),
        ]
        .into_iter()
        .filter_map(|(name, config)| config.map(|value| (name, value)))
        .collect()
    }
}

impl TryFrom<UpdateDataSourceInput> for UpdateDataSourceParams {
    type Error = Error;

    /// The REST payload carries a single `config`, so at most one provider
    /// config may be set.
    fn try_from(input: UpdateDataSourceInput) -> Result<Self> {
        let mut configs = input.provider_configs();
        if configs.len() > 1 {
            let names: Vec<&str> = configs.iter().map(|(name, _)| *name).collect();
            return Err(StructuredError::validation(
                "params",
                format!("only one provider config may be set, got {}", names.join(", ")),
            ));
        }
        let config = configs.pop().and_then(|(_, value)| value);

        Ok(Self {
            name: input.name,
            last_import_at: input.last_import_at,
            last_import_modified_at: input.last_import_modified_at,
            last_import_attempt_at: input.last_import_attempt_at,
            last_import_attempt_error: input.last_import_attempt_error,
            last_getting_metrics_at: input.last_getting_metrics_at,
            last_getting_metric_attempt_at: input.last_getting_metric_attempt_at,
            last_getting_metric_attempt_error: input.last_getting_metric_attempt_error,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn forwards_only_sent_config_fields() {
        let input = UpdateDataSourceInput {
            name: Some("Prod".to_string()),
            aws_config: Some(AwsConfigInput {
                access_key_id: Some("AKIA".to_string()),
                secret_access_key: Some("secret".to_string()),
                linked: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };

        let params = UpdateDataSourceParams::try_from(input).unwrap();
        assert_eq!(params.name.as_deref(), Some("Prod"));
        assert_eq!(
            params.config,
            Some(json!({ "access_key_id": "AKIA", "secret_access_key": "secret", "linked": true }))
        );
    }

    #[test]
    fn nested_nulls_are_dropped() {
        let input = UpdateDataSourceInput {
            k8s_config: Some(K8sConfigInput {
                user: Some("admin".to_string()),
                cost_model: Some(K8sCostModelInput {
                    cpu_hourly_cost: Some(0.01),
                    memory_hourly_cost: None,
                }),
                ..Default::default()
            }),
            ..Default::default()
        };

        let params = UpdateDataSourceParams::try_from(input).unwrap();
        assert_eq!(
            params.config,
            Some(json!({ "user": "admin", "cost_model": { "cpu_hourly_cost": 0.01 } }))
        );
    }

    #[test]
    fn several_provider_configs_are_rejected() {
        let input = UpdateDataSourceInput {
            alibaba_config: Some(AlibabaConfigInput {
                access_key_id: Some("LTAI".to_string()),
                ..Default::default()
            }),
            databricks_config: Some(DatabricksConfigInput {
                account_id: Some("acc".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let err = UpdateDataSourceParams::try_from(input).unwrap_err();
        assert!(err.message.contains("alibabaConfig, databricksConfig"));
        assert_eq!(
            err.extensions.as_ref().and_then(|ext| ext.get("code")),
            Some(&Value::from("VALIDATION_FAILED"))
        );
        assert_eq!(
            err.extensions.as_ref().and_then(|ext| ext.get("field")),
            Some(&Value::from("params"))
        );
    }

    #[test]
    fn no_config_means_none() {
        let params = UpdateDataSourceParams::try_from(UpdateDataSourceInput {
            last_import_at: Some(10),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(params.config, None);
        assert_eq!(params.last_import_at, Some(10));
    }

    #[test]
    fn events_levels_default_to_empty() {
        let params = EventsRequestParams::from(EventsRequestParamsInput {
            limit: Some(5),
            ..Default::default()
        });
        assert!(params.levels.is_empty());
        assert_eq!(params.limit, Some(5));
    }
}

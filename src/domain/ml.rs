//! Experiment-tracking entities: models, runs, runsets, runset templates and
//! the executors runs are scheduled on.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Direction in which a metric improves.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tendency {
    More,
    Less,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub key: String,
    pub name: String,
    pub tendency: Tendency,
    pub target_value: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
    Stopped,
}

/// `{id, name}` back-reference attached to derived records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Model {
    pub id: String,
    pub name: String,
    pub key: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: IndexMap<String, String>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Run {
    pub id: String,
    pub name: String,
    pub number: u32,
    pub model_id: String,
    #[serde(default)]
    pub runset_id: Option<String>,
    pub status: RunStatus,
    pub started_at: i64,
    #[serde(default)]
    pub finished_at: Option<i64>,
    pub duration: i64,
    pub cost: f64,
    /// Last reported value per metric key
    #[serde(default)]
    pub data: IndexMap<String, f64>,
    #[serde(default)]
    pub executor_ids: Vec<String>,
    #[serde(default)]
    pub hyperparameters: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runset: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runset_template: Option<EntityRef>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunsetState {
    Created,
    Running,
    Stopped,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Runset {
    pub id: String,
    pub name: String,
    pub number: u32,
    pub template_id: String,
    pub state: RunsetState,
    pub cost: f64,
    #[serde(default)]
    pub run_ids: Vec<String>,
    pub started_at: i64,
    #[serde(default)]
    pub destroyed_at: Option<i64>,
    #[serde(default)]
    pub succeeded_runs: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunsetTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub model_ids: Vec<String>,
    pub budget: f64,
    #[serde(default)]
    pub goals: Vec<Goal>,
    /// Hyperparameter name to the environment variable it is passed through
    #[serde(default)]
    pub hyperparameters: IndexMap<String, String>,
    #[serde(default)]
    pub cloud_account_ids: Vec<String>,
    #[serde(default)]
    pub region_ids: Vec<String>,
    #[serde(default)]
    pub instance_types: Vec<String>,
    #[serde(default)]
    pub tags: IndexMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Executor {
    pub id: String,
    pub instance_id: String,
    pub name: String,
    pub instance_type: String,
    pub platform_type: String,
    pub region: String,
    #[serde(default)]
    pub ip_addr: Option<String>,
    pub last_used: i64,
    pub total_runs: u32,
}

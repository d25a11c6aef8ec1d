//! Built-in experiment-tracking dataset served in demo mode.

use indexmap::IndexMap;

use crate::domain::{
    Executor, Goal, Model, Run, RunStatus, Runset, RunsetState, RunsetTemplate, Tendency,
};

const BASE_TIME: i64 = 1_717_200_000;
const HOUR: i64 = 3_600;

#[derive(Debug, Clone, Default)]
pub struct DemoDataset {
    pub models: Vec<Model>,
    pub runs: Vec<Run>,
    pub runsets: Vec<Runset>,
    pub runset_templates: Vec<RunsetTemplate>,
    pub executors: Vec<Executor>,
}

impl DemoDataset {
    pub fn builtin() -> Self {
        Self {
            models: models(),
            runs: runs(),
            runsets: runsets(),
            runset_templates: runset_templates(),
            executors: executors(),
        }
    }
}

fn goal(key: &str, name: &str, tendency: Tendency, target_value: f64) -> Goal {
    Goal {
        key: key.to_string(),
        name: name.to_string(),
        tendency,
        target_value,
    }
}

fn tags(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn models() -> Vec<Model> {
    vec![
        Model {
            id: "model-iris".to_string(),
            name: "Iris classifier".to_string(),
            key: "iris_classifier".to_string(),
            description: Some("Multiclass classifier trained on the iris dataset".to_string()),
            tags: tags(&[("team", "research"), ("framework", "sklearn")]),
            goals: vec![
                goal("accuracy", "Accuracy", Tendency::More, 0.9),
                goal("loss", "Loss", Tendency::Less, 0.2),
            ],
            created_at: BASE_TIME - 30 * 24 * HOUR,
        },
        Model {
            id: "model-sales".to_string(),
            name: "Sales forecast".to_string(),
            key: "sales_forecast".to_string(),
            description: Some("Weekly revenue forecast per region".to_string()),
            tags: tags(&[("team", "analytics")]),
            goals: vec![goal("mape", "MAPE", Tendency::Less, 0.12)],
            created_at: BASE_TIME - 14 * 24 * HOUR,
        },
        Model {
            id: "model-churn".to_string(),
            name: "Churn detector".to_string(),
            key: "churn_detector".to_string(),
            description: None,
            tags: IndexMap::new(),
            goals: vec![goal("recall", "Recall", Tendency::More, 0.75)],
            created_at: BASE_TIME - 2 * 24 * HOUR,
        },
    ]
}

struct RunSpec<'a> {
    id: &'a str,
    number: u32,
    model_id: &'a str,
    runset_id: Option<&'a str>,
    status: RunStatus,
    hours_ago: i64,
    duration: i64,
    cost: f64,
    data: &'a [(&'a str, f64)],
    executor_id: &'a str,
}

impl RunSpec<'_> {
    fn build(&self) -> Run {
        let started_at = BASE_TIME - self.hours_ago * HOUR;
        let finished_at = match self.status {
            RunStatus::Running => None,
            _ => Some(started_at + self.duration),
        };

        Run {
            id: self.id.to_string(),
            name: format!("{} #{}", self.model_id, self.number),
            number: self.number,
            model_id: self.model_id.to_string(),
            runset_id: self.runset_id.map(str::to_string),
            status: self.status,
            started_at,
            finished_at,
            duration: self.duration,
            cost: self.cost,
            data: self
                .data
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            executor_ids: vec![self.executor_id.to_string()],
            hyperparameters: tags(&[("EPOCHS", "20"), ("LEARNING_RATE", "0.01")]),
            runset: None,
            runset_template: None,
        }
    }
}

// Newest first within each model.
fn runs() -> Vec<Run> {
    [
        RunSpec {
            id: "run-iris-5",
            number: 5,
            model_id: "model-iris",
            runset_id: Some("runset-iris-sweep"),
            status: RunStatus::Running,
            hours_ago: 1,
            duration: 1_800,
            cost: 0.42,
            data: &[("accuracy", 0.88), ("loss", 0.27)],
            executor_id: "executor-gpu-1",
        },
        RunSpec {
            id: "run-iris-4",
            number: 4,
            model_id: "model-iris",
            runset_id: Some("runset-iris-sweep"),
            status: RunStatus::Completed,
            hours_ago: 5,
            duration: 2_400,
            cost: 0.61,
            data: &[("accuracy", 0.94), ("loss", 0.12)],
            executor_id: "executor-gpu-1",
        },
        RunSpec {
            id: "run-iris-3",
            number: 3,
            model_id: "model-iris",
            runset_id: Some("runset-iris-sweep"),
            status: RunStatus::Completed,
            hours_ago: 8,
            duration: 2_100,
            cost: 0.55,
            data: &[("accuracy", 0.91), ("loss", 0.18)],
            executor_id: "executor-gpu-2",
        },
        RunSpec {
            id: "run-iris-2",
            number: 2,
            model_id: "model-iris",
            runset_id: None,
            status: RunStatus::Failed,
            hours_ago: 30,
            duration: 300,
            cost: 0.07,
            data: &[("accuracy", 0.41)],
            executor_id: "executor-gpu-2",
        },
        RunSpec {
            id: "run-iris-1",
            number: 1,
            model_id: "model-iris",
            runset_id: None,
            status: RunStatus::Completed,
            hours_ago: 48,
            duration: 2_000,
            cost: 0.5,
            data: &[("accuracy", 0.86), ("loss", 0.24)],
            executor_id: "executor-gpu-1",
        },
        RunSpec {
            id: "run-sales-2",
            number: 2,
            model_id: "model-sales",
            runset_id: None,
            status: RunStatus::Completed,
            hours_ago: 12,
            duration: 5_400,
            cost: 1.3,
            data: &[("mape", 0.1)],
            executor_id: "executor-cpu-1",
        },
        RunSpec {
            id: "run-sales-1",
            number: 1,
            model_id: "model-sales",
            runset_id: None,
            status: RunStatus::Stopped,
            hours_ago: 72,
            duration: 900,
            cost: 0.2,
            data: &[("mape", 0.19)],
            executor_id: "executor-cpu-1",
        },
    ]
    .iter()
    .map(RunSpec::build)
    .collect()
}

fn runset_templates() -> Vec<RunsetTemplate> {
    vec![RunsetTemplate {
        id: "template-iris".to_string(),
        name: "Iris hyperparameter sweep".to_string(),
        model_ids: vec!["model-iris".to_string()],
        budget: 25.0,
        goals: vec![
            goal("accuracy", "Accuracy", Tendency::More, 0.9),
            goal("loss", "Loss", Tendency::Less, 0.2),
        ],
        hyperparameters: tags(&[("Epochs", "EPOCHS"), ("Learning rate", "LEARNING_RATE")]),
        cloud_account_ids: vec!["aws-main".to_string()],
        region_ids: vec!["us-east-1".to_string()],
        instance_types: vec!["p3.2xlarge".to_string(), "g4dn.xlarge".to_string()],
        tags: tags(&[("purpose", "sweep")]),
    }]
}

fn runsets() -> Vec<Runset> {
    vec![Runset {
        id: "runset-iris-sweep".to_string(),
        name: "iris sweep".to_string(),
        number: 1,
        template_id: "template-iris".to_string(),
        state: RunsetState::Running,
        cost: 1.58,
        run_ids: vec![
            "run-iris-5".to_string(),
            "run-iris-4".to_string(),
            "run-iris-3".to_string(),
        ],
        started_at: BASE_TIME - 9 * HOUR,
        destroyed_at: None,
        succeeded_runs: 0,
    }]
}

fn executors() -> Vec<Executor> {
    vec![
        Executor {
            id: "executor-gpu-1".to_string(),
            instance_id: "i-0a1b2c3d4e5f60718".to_string(),
            name: "sweep-worker-1".to_string(),
            instance_type: "p3.2xlarge".to_string(),
            platform_type: "aws".to_string(),
            region: "us-east-1".to_string(),
            ip_addr: Some("10.0.12.4".to_string()),
            last_used: BASE_TIME - HOUR,
            total_runs: 3,
        },
        Executor {
            id: "executor-gpu-2".to_string(),
            instance_id: "i-0f9e8d7c6b5a40312".to_string(),
            name: "sweep-worker-2".to_string(),
            instance_type: "g4dn.xlarge".to_string(),
            platform_type: "aws".to_string(),
            region: "us-east-1".to_string(),
            ip_addr: Some("10.0.12.9".to_string()),
            last_used: BASE_TIME - 8 * HOUR,
            total_runs: 2,
        },
        Executor {
            id: "executor-cpu-1".to_string(),
            instance_id: "analytics-vm-01".to_string(),
            name: "analytics-vm-01".to_string(),
            instance_type: "Standard_D4s_v5".to_string(),
            platform_type: "azure".to_string(),
            region: "westeurope".to_string(),
            ip_addr: None,
            last_used: BASE_TIME - 12 * HOUR,
            total_runs: 2,
        },
    ]
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::{Model, Run, RunStatus};
use crate::ml::goals::{evaluate_goals, GoalEvaluation};

/// Factor applied to the summed run cost to approximate a 30-day total.
pub const TOTAL_COST_EXTRAPOLATION: f64 = 2.5;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ModelStatus {
    Created,
    Running,
    Completed,
    Failed,
    Stopped,
}

impl From<RunStatus> for ModelStatus {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Running => ModelStatus::Running,
            RunStatus::Completed => ModelStatus::Completed,
            RunStatus::Failed => ModelStatus::Failed,
            RunStatus::Stopped => ModelStatus::Stopped,
        }
    }
}

/// Model enriched with figures derived from its runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelInfo {
    #[serde(flatten)]
    pub model: Model,
    pub status: ModelStatus,
    pub last_run: Option<Run>,
    pub last_successful_run: Option<Run>,
    pub last_run_duration: i64,
    pub last_run_cost: f64,
    pub last_30_days_cost: f64,
    pub total_cost: f64,
    pub runs_count: usize,
    pub reached_goals: IndexMap<String, GoalEvaluation>,
}

/// Aggregates `runs`, which are expected newest first; the first run is the
/// last one launched.
pub fn model_info(model: &Model, runs: &[Run]) -> ModelInfo {
    let Some(last_run) = runs.first() else {
        return ModelInfo {
            model: model.clone(),
            status: ModelStatus::Created,
            last_run: None,
            last_successful_run: None,
            last_run_duration: 0,
            last_run_cost: 0.0,
            last_30_days_cost: 0.0,
            total_cost: 0.0,
            runs_count: 0,
            reached_goals: IndexMap::new(),
        };
    };

    let last_successful_run = runs
        .iter()
        .find(|run| run.status == RunStatus::Completed)
        .cloned();
    let last_30_days_cost: f64 = runs.iter().map(|run| run.cost).sum();

    ModelInfo {
        model: model.clone(),
        status: last_run.status.into(),
        last_run: Some(last_run.clone()),
        last_successful_run,
        last_run_duration: last_run.duration,
        last_run_cost: last_run.cost,
        last_30_days_cost,
        total_cost: last_30_days_cost * TOTAL_COST_EXTRAPOLATION,
        runs_count: runs.len(),
        reached_goals: evaluate_goals(&model.goals, &last_run.data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Goal, Tendency};

    fn model() -> Model {
        Model {
            id: "m-1".to_string(),
            name: "Classifier".to_string(),
            key: "classifier".to_string(),
            description: None,
            tags: IndexMap::new(),
            goals: vec![Goal {
                key: "accuracy".to_string(),
                name: "Accuracy".to_string(),
                tendency: Tendency::More,
                target_value: 0.9,
            }],
            created_at: 1_700_000_000,
        }
    }

    fn run(id: &str, status: RunStatus, cost: f64, accuracy: f64) -> Run {
        Run {
            id: id.to_string(),
            name: format!("run {}", id),
            number: 1,
            model_id: "m-1".to_string(),
            runset_id: None,
            status,
            started_at: 1_700_000_000,
            finished_at: None,
            duration: 120,
            cost,
            data: [("accuracy".to_string(), accuracy)].into_iter().collect(),
            executor_ids: vec![],
            hyperparameters: IndexMap::new(),
            runset: None,
            runset_template: None,
        }
    }

    #[test]
    fn model_without_runs_gets_created_defaults() {
        let info = model_info(&model(), &[]);

        assert_eq!(info.status, ModelStatus::Created);
        assert_eq!(info.runs_count, 0);
        assert_eq!(info.last_run, None);
        assert_eq!(info.last_successful_run, None);
        assert_eq!(info.last_run_duration, 0);
        assert_eq!(info.last_30_days_cost, 0.0);
        assert_eq!(info.total_cost, 0.0);
        assert!(info.reached_goals.is_empty());
    }

    #[test]
    fn aggregates_runs_in_traversal_order() {
        let runs = vec![
            run("r-3", RunStatus::Failed, 4.0, 0.5),
            run("r-2", RunStatus::Completed, 2.0, 0.92),
            run("r-1", RunStatus::Completed, 1.0, 0.8),
        ];
        let info = model_info(&model(), &runs);

        assert_eq!(info.last_run.as_ref().map(|r| r.id.as_str()), Some("r-3"));
        assert_eq!(
            info.last_successful_run.as_ref().map(|r| r.id.as_str()),
            Some("r-2")
        );
        assert_eq!(info.status, ModelStatus::Failed);
        assert_eq!(info.runs_count, 3);
        assert_eq!(info.last_30_days_cost, 7.0);
        assert_eq!(info.total_cost, info.last_30_days_cost * 2.5);
        assert!(!info.reached_goals["accuracy"].reached);
    }

    #[test]
    fn reached_goals_follow_last_run() {
        let runs = vec![run("r-2", RunStatus::Completed, 1.0, 0.95)];
        let info = model_info(&model(), &runs);

        let accuracy = &info.reached_goals["accuracy"];
        assert_eq!(accuracy.value, Some(0.95));
        assert!(accuracy.reached);
    }
}

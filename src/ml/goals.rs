use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::{Goal, Tendency};

/// Whether an observed value satisfies a target given the goal's tendency.
pub fn is_parameter_reached(value: f64, target_value: f64, tendency: Tendency) -> bool {
    match tendency {
        Tendency::More => value >= target_value,
        Tendency::Less => value <= target_value,
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalSetStatus {
    Met,
    NotMet,
}

/// One goal compared against the value a run reported for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalEvaluation {
    pub key: String,
    pub name: String,
    pub value: Option<f64>,
    pub target_value: f64,
    pub tendency: Tendency,
    pub reached: bool,
}

impl GoalEvaluation {
    pub fn evaluate(goal: &Goal, data: &IndexMap<String, f64>) -> Self {
        let value = data.get(&goal.key).copied();
        let reached = value
            .map(|v| is_parameter_reached(v, goal.target_value, goal.tendency))
            .unwrap_or(false);

        Self {
            key: goal.key.clone(),
            name: goal.name.clone(),
            value,
            target_value: goal.target_value,
            tendency: goal.tendency,
            reached,
        }
    }
}

/// Evaluates every goal, keyed and ordered by goal key as declared.
pub fn evaluate_goals(goals: &[Goal], data: &IndexMap<String, f64>) -> IndexMap<String, GoalEvaluation> {
    goals
        .iter()
        .map(|goal| (goal.key.clone(), GoalEvaluation::evaluate(goal, data)))
        .collect()
}

/// `Met` only when there is at least one goal and every goal is reached.
/// A missing metric value counts as not reached.
pub fn goal_set_status(goals: &[Goal], data: &IndexMap<String, f64>) -> GoalSetStatus {
    if goals.is_empty() {
        return GoalSetStatus::NotMet;
    }

    let all_reached = goals
        .iter()
        .all(|goal| GoalEvaluation::evaluate(goal, data).reached);

    if all_reached {
        GoalSetStatus::Met
    } else {
        GoalSetStatus::NotMet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(key: &str, tendency: Tendency, target_value: f64) -> Goal {
        Goal {
            key: key.to_string(),
            name: key.to_uppercase(),
            tendency,
            target_value,
        }
    }

    fn data(pairs: &[(&str, f64)]) -> IndexMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn tendency_decides_direction() {
        assert!(is_parameter_reached(0.95, 0.9, Tendency::More));
        assert!(is_parameter_reached(0.9, 0.9, Tendency::More));
        assert!(!is_parameter_reached(0.85, 0.9, Tendency::More));

        assert!(is_parameter_reached(0.1, 0.2, Tendency::Less));
        assert!(is_parameter_reached(0.2, 0.2, Tendency::Less));
        assert!(!is_parameter_reached(0.3, 0.2, Tendency::Less));
    }

    #[test]
    fn goal_set_met_only_when_all_reached() {
        let goals = vec![goal("accuracy", Tendency::More, 0.9), goal("loss", Tendency::Less, 0.2)];

        assert_eq!(
            goal_set_status(&goals, &data(&[("accuracy", 0.93), ("loss", 0.15)])),
            GoalSetStatus::Met
        );
        assert_eq!(
            goal_set_status(&goals, &data(&[("accuracy", 0.93), ("loss", 0.25)])),
            GoalSetStatus::NotMet
        );
    }

    #[test]
    fn missing_metric_is_not_reached() {
        let goals = vec![goal("accuracy", Tendency::More, 0.9), goal("loss", Tendency::Less, 0.2)];
        let evaluations = evaluate_goals(&goals, &data(&[("accuracy", 0.91)]));

        assert!(evaluations["accuracy"].reached);
        assert_eq!(evaluations["loss"].value, None);
        assert!(!evaluations["loss"].reached);
        assert_eq!(
            goal_set_status(&goals, &data(&[("accuracy", 0.91)])),
            GoalSetStatus::NotMet
        );
    }

    #[test]
    fn no_goals_is_not_met() {
        assert_eq!(goal_set_status(&[], &data(&[("accuracy", 1.0)])), GoalSetStatus::NotMet);
    }
}

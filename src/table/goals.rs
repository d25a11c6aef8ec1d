use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::domain::{Goal, Run};
use crate::ml::GoalEvaluation;
use crate::table::column::{compare_f64, compare_optional, CellContent, CellStrategy, ColumnDescriptor};

/// Rows that report metric values by key.
pub trait HasMetrics {
    fn metric(&self, key: &str) -> Option<f64>;
}

impl HasMetrics for Run {
    fn metric(&self, key: &str) -> Option<f64> {
        self.data.get(key).copied()
    }
}

/// Comparator behind the goals column: a row without a value for the sort
/// key ranks before any row that has one. NaN counts as no value.
pub fn compare_metric_values(a: Option<f64>, b: Option<f64>) -> Ordering {
    let reported = |value: Option<f64>| value.filter(|v| !v.is_nan());
    compare_optional(reported(a), reported(b), compare_f64)
}

#[derive(Debug, Clone)]
pub struct GoalsColumnOptions {
    pub id: String,
    pub header: String,
    pub goals: Vec<Goal>,
    /// Metric the column sorts by; `None` picks the first goal.
    pub sort_key: Option<String>,
}

impl GoalsColumnOptions {
    pub fn new(goals: Vec<Goal>) -> Self {
        Self {
            id: "goals".to_string(),
            header: "Goals".to_string(),
            goals,
            sort_key: None,
        }
    }

    pub fn metrics(goals: Vec<Goal>) -> Self {
        Self {
            id: "metrics".to_string(),
            header: "Metrics".to_string(),
            ..Self::new(goals)
        }
    }

    /// Selection made from the column's sort settings.
    pub fn with_sort_key(mut self, key: impl Into<String>) -> Self {
        self.sort_key = Some(key.into());
        self
    }

    /// Keys offered by the sort settings, with their display names.
    pub fn sort_key_options(&self) -> Vec<(String, String)> {
        self.goals
            .iter()
            .map(|goal| (goal.key.clone(), goal.name.clone()))
            .collect()
    }

    pub fn effective_sort_key(&self) -> Option<&str> {
        self.sort_key
            .as_deref()
            .or_else(|| self.goals.first().map(|goal| goal.key.as_str()))
    }
}

struct GoalsCell {
    goals: Vec<Goal>,
    sort_key: Option<String>,
}

impl<T: HasMetrics> CellStrategy<T> for GoalsCell {
    fn render(&self, row: &T) -> CellContent {
        if self.goals.is_empty() {
            return CellContent::Empty;
        }

        let evaluations = self
            .goals
            .iter()
            .map(|goal| {
                let data: IndexMap<String, f64> = row
                    .metric(&goal.key)
                    .map(|value| (goal.key.clone(), value))
                    .into_iter()
                    .collect();
                GoalEvaluation::evaluate(goal, &data)
            })
            .collect();
        CellContent::Goals(evaluations)
    }

    fn sort(&self, a: &T, b: &T) -> Option<Ordering> {
        let key = self.sort_key.as_deref()?;
        Some(compare_metric_values(a.metric(key), b.metric(key)))
    }
}

pub fn goals_column<T: HasMetrics>(options: GoalsColumnOptions) -> ColumnDescriptor<T> {
    let sort_key = options.effective_sort_key().map(str::to_string);
    ColumnDescriptor::new(
        options.id,
        options.header,
        GoalsCell {
            goals: options.goals,
            sort_key,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tendency;
    use std::collections::HashMap;

    struct Row(HashMap<&'static str, f64>);

    impl HasMetrics for Row {
        fn metric(&self, key: &str) -> Option<f64> {
            self.0.get(key).copied()
        }
    }

    fn row(pairs: &[(&'static str, f64)]) -> Row {
        Row(pairs.iter().copied().collect())
    }

    fn goals() -> Vec<Goal> {
        vec![
            Goal {
                key: "accuracy".to_string(),
                name: "Accuracy".to_string(),
                tendency: Tendency::More,
                target_value: 0.9,
            },
            Goal {
                key: "loss".to_string(),
                name: "Loss".to_string(),
                tendency: Tendency::Less,
                target_value: 0.2,
            },
        ]
    }

    #[test]
    fn comparator_ranks_missing_first() {
        assert_eq!(compare_metric_values(None, Some(0.5)), Ordering::Less);
        assert_eq!(compare_metric_values(Some(0.5), None), Ordering::Greater);
        assert_eq!(compare_metric_values(None, None), Ordering::Equal);
        assert_eq!(compare_metric_values(Some(0.2), Some(0.7)), Ordering::Less);
        assert_eq!(compare_metric_values(Some(0.7), Some(0.2)), Ordering::Greater);
    }

    #[test]
    fn nan_ranks_with_missing_values() {
        assert_eq!(compare_metric_values(Some(f64::NAN), Some(0.1)), Ordering::Less);
        assert_eq!(compare_metric_values(Some(f64::NAN), None), Ordering::Equal);
        assert_eq!(compare_metric_values(Some(0.1), Some(f64::NAN)), Ordering::Greater);
    }

    #[test]
    fn sorts_by_first_goal_by_default() {
        let column = goals_column::<Row>(GoalsColumnOptions::new(goals()));
        let a = row(&[("accuracy", 0.8), ("loss", 0.1)]);
        let b = row(&[("accuracy", 0.95), ("loss", 0.3)]);

        assert_eq!(column.compare(&a, &b), Some(Ordering::Less));
    }

    #[test]
    fn selected_sort_key_changes_order() {
        let column = goals_column::<Row>(GoalsColumnOptions::new(goals()).with_sort_key("loss"));
        let a = row(&[("accuracy", 0.8), ("loss", 0.1)]);
        let b = row(&[("accuracy", 0.95), ("loss", 0.3)]);
        let missing = row(&[("accuracy", 0.99)]);

        assert_eq!(column.compare(&b, &a), Some(Ordering::Greater));
        assert_eq!(column.compare(&missing, &a), Some(Ordering::Less));
    }

    #[test]
    fn no_goals_means_no_sorting() {
        let column = goals_column::<Row>(GoalsColumnOptions::metrics(vec![]));
        assert_eq!(column.id, "metrics");
        assert_eq!(column.compare(&row(&[]), &row(&[])), None);
        assert_eq!(column.render(&row(&[])), CellContent::Empty);
    }

    #[test]
    fn renders_reached_flags() {
        let column = goals_column::<Row>(GoalsColumnOptions::new(goals()));
        let CellContent::Goals(cells) = column.render(&row(&[("accuracy", 0.93)])) else {
            panic!("expected goals cell");
        };

        assert!(cells[0].reached);
        assert_eq!(cells[1].value, None);
        assert!(!cells[1].reached);
    }

    #[test]
    fn sort_key_options_list_goals() {
        let options = GoalsColumnOptions::new(goals());
        assert_eq!(
            options.sort_key_options(),
            vec![
                ("accuracy".to_string(), "Accuracy".to_string()),
                ("loss".to_string(), "Loss".to_string())
            ]
        );
    }
}

//! Derivations over experiment-tracking records: goal comparison, model
//! summaries and runset statistics, plus the built-in demo dataset.

pub mod demo_data;
pub mod goals;
pub mod model_info;
pub mod runsets;

pub use demo_data::DemoDataset;
pub use goals::{evaluate_goals, goal_set_status, is_parameter_reached, GoalEvaluation, GoalSetStatus};
pub use model_info::{model_info, ModelInfo, ModelStatus, TOTAL_COST_EXTRAPOLATION};
pub use runsets::{attach_runset_refs, count_succeeded_runs, derive_runset};

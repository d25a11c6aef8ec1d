use crate::domain::{EntityRef, Run, Runset, RunsetTemplate};
use crate::ml::goals::{goal_set_status, GoalSetStatus};

/// Attaches `runset` and `runset_template` back-references to runs that
/// belong to a known runset. Other runs pass through untouched.
pub fn attach_runset_refs(
    runs: Vec<Run>,
    runsets: &[Runset],
    templates: &[RunsetTemplate],
) -> Vec<Run> {
    runs.into_iter()
        .map(|mut run| {
            let runset = run
                .runset_id
                .as_deref()
                .and_then(|id| runsets.iter().find(|runset| runset.id == id));

            if let Some(runset) = runset {
                run.runset = Some(EntityRef {
                    id: runset.id.clone(),
                    name: runset.name.clone(),
                });
                run.runset_template = templates
                    .iter()
                    .find(|template| template.id == runset.template_id)
                    .map(|template| EntityRef {
                        id: template.id.clone(),
                        name: template.name.clone(),
                    });
            }
            run
        })
        .collect()
}

/// Counts the runset's runs whose metrics meet every goal of the template.
pub fn count_succeeded_runs(runset: &Runset, runs: &[Run], template: Option<&RunsetTemplate>) -> usize {
    let Some(template) = template else {
        return 0;
    };

    runs.iter()
        .filter(|run| runset.run_ids.contains(&run.id))
        .filter(|run| goal_set_status(&template.goals, &run.data) == GoalSetStatus::Met)
        .count()
}

/// Copy of the runset with `succeeded_runs` filled in.
pub fn derive_runset(runset: &Runset, runs: &[Run], templates: &[RunsetTemplate]) -> Runset {
    let template = templates.iter().find(|t| t.id == runset.template_id);
    Runset {
        succeeded_runs: count_succeeded_runs(runset, runs, template),
        ..runset.clone()
    }
}

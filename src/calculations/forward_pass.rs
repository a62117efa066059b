use crate::activity::Activity;
use crate::error::ScheduleResult;
use crate::graph::ActivityDag;
use tracing::debug;

pub struct ForwardPass<'a> {
    dag: &'a ActivityDag,
    order: &'a [usize],
}

impl<'a> ForwardPass<'a> {
    pub fn new(dag: &'a ActivityDag, order: &'a [usize]) -> Self {
        Self { dag, order }
    }

    /// Sets early start/finish on every activity and returns the project
    /// duration, the largest early finish. `order` must be topological.
    pub fn execute(&self, activities: &mut [Activity]) -> ScheduleResult<f64> {
        let mut project_duration = 0.0_f64;

        for &position in self.order {
            // Early start is the max of all predecessor finishes
            let max_pred_finish = self
                .dag
                .predecessors(position)
                .into_iter()
                .map(|pred| activities[pred].early_finish)
                .fold(0.0, f64::max);

            let activity = &mut activities[position];
            activity.compute_early(max_pred_finish)?;
            project_duration = project_duration.max(activity.early_finish);

            debug!(
                activity = %activity.id,
                early_start = activity.early_start,
                early_finish = activity.early_finish,
                "forward pass"
            );
        }

        Ok(project_duration)
    }
}

use crate::activity::Activity;
use crate::graph::ActivityDag;
use tracing::debug;

pub struct BackwardPass<'a> {
    dag: &'a ActivityDag,
    order: &'a [usize],
    precision: u32,
}

impl<'a> BackwardPass<'a> {
    pub fn new(dag: &'a ActivityDag, order: &'a [usize], precision: u32) -> Self {
        Self {
            dag,
            order,
            precision,
        }
    }

    /// Walks `order` in reverse, setting late start/finish and criticality.
    /// Returns the number of critical activities.
    pub fn execute(&self, activities: &mut [Activity], project_duration: f64) -> usize {
        let mut critical_count = 0;

        for &position in self.order.iter().rev() {
            // Determine allowed late finish from successors' late starts
            let min_succ_start = self
                .dag
                .successors(position)
                .into_iter()
                .map(|succ| activities[succ].late_start)
                .fold(f64::INFINITY, f64::min);

            let activity = &mut activities[position];
            activity.compute_late(min_succ_start, project_duration);
            let slack = activity.compute_slack(self.precision);
            if activity.is_critical {
                critical_count += 1;
            }

            debug!(
                activity = %activity.id,
                late_start = activity.late_start,
                late_finish = activity.late_finish,
                slack,
                "backward pass"
            );
        }

        critical_count
    }
}

use crate::activity::{Activity, ActivityId};
use crate::error::{ScheduleError, ScheduleResult};
use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use tracing::trace;

/// Precedence graph over a slice of activities.
///
/// Node weights are positions in the activity slice, edges run from a
/// predecessor to its dependent. References to ids that are not part of the
/// slice are dropped while building.
#[derive(Debug)]
pub struct ActivityDag {
    graph: DiGraph<usize, ()>,
}

impl ActivityDag {
    pub fn build(activities: &[Activity]) -> Self {
        let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(activities.len(), 0);
        let mut id_to_index: HashMap<ActivityId, NodeIndex> = HashMap::new();

        // Add nodes first
        for (position, activity) in activities.iter().enumerate() {
            let node_ix = graph.add_node(position);
            id_to_index.insert(activity.id.clone(), node_ix);
        }

        // Add edges: pred -> activity
        for activity in activities {
            let Some(&v) = id_to_index.get(&activity.id) else {
                continue;
            };
            for pred_id in &activity.predecessors {
                match id_to_index.get(pred_id) {
                    Some(&u) => {
                        graph.update_edge(u, v, ());
                    }
                    None => trace!(
                        activity = %activity.id,
                        predecessor = %pred_id,
                        "ignoring unknown predecessor"
                    ),
                }
            }
        }

        Self { graph }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Positions of the direct successors of the activity at `position`,
    /// in insertion order.
    pub fn successors(&self, position: usize) -> Vec<usize> {
        self.neighbors(position, Direction::Outgoing)
    }

    /// Positions of the known predecessors of the activity at `position`,
    /// in insertion order.
    pub fn predecessors(&self, position: usize) -> Vec<usize> {
        self.neighbors(position, Direction::Incoming)
    }

    fn neighbors(&self, position: usize, direction: Direction) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .graph
            .neighbors_directed(NodeIndex::new(position), direction)
            .map(|ix| self.graph[ix])
            .collect();
        out.sort_unstable();
        out
    }

    /// Activity positions ordered so every predecessor precedes its
    /// dependents.
    pub fn topological_order(&self, activities: &[Activity]) -> ScheduleResult<Vec<usize>> {
        let order = toposort(&self.graph, None).map_err(|cycle| {
            let position = self.graph[cycle.node_id()];
            ScheduleError::CycleDetected {
                id: activities[position].id.clone(),
            }
        })?;
        Ok(order.into_iter().map(|ix| self.graph[ix]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Vec<Activity> {
        vec![
            Activity::new("A", "A", 1.0),
            Activity::new("B", "B", 1.0).with_predecessors(["A"]),
            Activity::new("C", "C", 1.0).with_predecessors(["A", "B"]),
        ]
    }

    #[test]
    fn neighbours_follow_insertion_order() {
        let activities = chain();
        let dag = ActivityDag::build(&activities);
        assert_eq!(dag.successors(0), vec![1, 2]);
        assert_eq!(dag.predecessors(2), vec![0, 1]);
        assert!(dag.predecessors(0).is_empty());
    }

    #[test]
    fn repeated_predecessor_yields_single_edge() {
        let activities = vec![
            Activity::new("A", "A", 1.0),
            Activity::new("B", "B", 1.0).with_predecessors(["A", "A"]),
        ];
        let dag = ActivityDag::build(&activities);
        assert_eq!(dag.edge_count(), 1);
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let activities = vec![Activity::new("L", "Loop", 1.0).with_predecessors(["L"])];
        let dag = ActivityDag::build(&activities);
        let err = dag.topological_order(&activities).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::CycleDetected {
                id: ActivityId::from("L")
            }
        );
    }

    #[test]
    fn unknown_predecessor_adds_no_node_or_edge() {
        let activities = vec![
            Activity::new("A", "A", 1.0),
            Activity::new("B", "B", 1.0).with_predecessors(["A", "ghost"]),
        ];
        let dag = ActivityDag::build(&activities);
        assert_eq!(dag.node_count(), 2);
        assert_eq!(dag.edge_count(), 1);
        assert_eq!(dag.predecessors(1), vec![0]);
    }
}

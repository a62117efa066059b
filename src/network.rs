use crate::activity::{Activity, ActivityId, rounds_to_zero};
use crate::calculations::{BackwardPass, ForwardPass};
use crate::config::SchedulerConfig;
use crate::error::{ScheduleError, ScheduleResult};
use crate::graph::ActivityDag;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkState {
    Empty,
    Populated,
    Linked,
    Scheduled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub activity_count: usize,
    pub critical_count: usize,
    pub project_duration: f64,
    pub critical_path: Vec<ActivityId>,
}

impl ScheduleSummary {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("activities={}", self.activity_count));
        parts.push(format!("critical={}", self.critical_count));
        parts.push(format!("duration={}", self.project_duration));
        if !self.critical_path.is_empty() {
            let chain = self
                .critical_path
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("->");
            parts.push(format!("crit_path={}", chain));
        }
        parts.join(", ")
    }
}

/// Id-keyed, insertion-ordered collection of activities and the CPM
/// scheduler that runs over it.
#[derive(Debug)]
pub struct Network {
    activities: Vec<Activity>,
    index: HashMap<ActivityId, usize>,
    dag: Option<ActivityDag>,
    config: SchedulerConfig,
    state: NetworkState,
    project_duration: Option<f64>,
    critical_count: usize,
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl Network {
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            activities: Vec::new(),
            index: HashMap::new(),
            dag: None,
            config,
            state: NetworkState::Empty,
            project_duration: None,
            critical_count: 0,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn state(&self) -> NetworkState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Activities in the order they were first added.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn get(&self, id: &ActivityId) -> Option<&Activity> {
        self.index.get(id).map(|&position| &self.activities[position])
    }

    pub fn contains(&self, id: &ActivityId) -> bool {
        self.index.contains_key(id)
    }

    /// Largest early finish, available once the network is scheduled.
    pub fn project_duration(&self) -> Option<f64> {
        self.project_duration
    }

    /// Inserts `activity`, replacing any activity with the same id in place.
    /// Links and results from earlier runs are discarded.
    pub fn add_activity(&mut self, activity: Activity) {
        match self.index.get(&activity.id) {
            Some(&position) => self.activities[position] = activity,
            None => {
                self.index.insert(activity.id.clone(), self.activities.len());
                self.activities.push(activity);
            }
        }
        self.dag = None;
        self.project_duration = None;
        self.critical_count = 0;
        self.state = NetworkState::Populated;
    }

    /// Rebuilds successor lists from the declared predecessors.
    ///
    /// Adjacency is derived from scratch on every call, so linking an
    /// already linked network leaves successors unchanged.
    pub fn link_successors(&mut self) {
        let dag = ActivityDag::build(&self.activities);
        let successors: Vec<Vec<ActivityId>> = (0..self.activities.len())
            .map(|position| {
                dag.successors(position)
                    .into_iter()
                    .map(|succ| self.activities[succ].id.clone())
                    .collect()
            })
            .collect();
        for (activity, succs) in self.activities.iter_mut().zip(successors) {
            activity.successors = succs;
        }

        self.dag = Some(dag);
        self.project_duration = None;
        self.critical_count = 0;
        if !self.activities.is_empty() {
            self.state = NetworkState::Linked;
        }
    }

    /// Runs the forward and backward passes over the whole network.
    ///
    /// Activities may be listed in any order; they are processed in
    /// dependency order. Unknown predecessor ids are ignored.
    pub fn compute_schedule(&mut self) -> ScheduleResult<ScheduleSummary> {
        if self.activities.is_empty() {
            return Err(ScheduleError::EmptyNetwork);
        }
        if self.dag.is_none() {
            self.link_successors();
        }
        let Some(dag) = self.dag.as_ref() else {
            return Err(ScheduleError::EmptyNetwork);
        };

        let order = dag.topological_order(&self.activities)?;
        for activity in &mut self.activities {
            activity.reset_timing();
        }

        let project_duration = ForwardPass::new(dag, &order).execute(&mut self.activities)?;
        let critical_count = BackwardPass::new(dag, &order, self.config.critical_precision)
            .execute(&mut self.activities, project_duration);

        self.project_duration = Some(project_duration);
        self.critical_count = critical_count;
        self.state = NetworkState::Scheduled;

        let summary = self.build_summary(project_duration);
        info!(
            activities = summary.activity_count,
            critical = summary.critical_count,
            project_duration,
            "schedule computed"
        );
        Ok(summary)
    }

    /// Summary of the last computation, if the network is scheduled.
    pub fn summary(&self) -> Option<ScheduleSummary> {
        match (self.state, self.project_duration) {
            (NetworkState::Scheduled, Some(duration)) => Some(self.build_summary(duration)),
            _ => None,
        }
    }

    fn build_summary(&self, project_duration: f64) -> ScheduleSummary {
        ScheduleSummary {
            activity_count: self.activities.len(),
            critical_count: self.critical_count,
            project_duration,
            critical_path: self.critical_path(),
        }
    }

    /// One chain of critical activities running from an activity without
    /// predecessors to one without successors, spanning the full project
    /// duration. Ties are broken by insertion order. Empty until scheduled.
    pub fn critical_path(&self) -> Vec<ActivityId> {
        let (Some(dag), Some(duration)) = (self.dag.as_ref(), self.project_duration) else {
            return Vec::new();
        };
        let precision = self.config.critical_precision;

        let mut dead_ends: HashSet<usize> = HashSet::new();
        for start in 0..self.activities.len() {
            let activity = &self.activities[start];
            if !activity.is_critical
                || !dag.predecessors(start).is_empty()
                || !rounds_to_zero(activity.early_start, precision)
            {
                continue;
            }
            let mut chain = Vec::new();
            if self.extend_critical_chain(dag, start, duration, &mut chain, &mut dead_ends) {
                return chain
                    .into_iter()
                    .map(|position| self.activities[position].id.clone())
                    .collect();
            }
        }
        Vec::new()
    }

    fn extend_critical_chain(
        &self,
        dag: &ActivityDag,
        position: usize,
        duration: f64,
        chain: &mut Vec<usize>,
        dead_ends: &mut HashSet<usize>,
    ) -> bool {
        if dead_ends.contains(&position) {
            return false;
        }
        let precision = self.config.critical_precision;
        let current = &self.activities[position];
        chain.push(position);

        let successors = dag.successors(position);
        if successors.is_empty() {
            if rounds_to_zero(current.early_finish - duration, precision) {
                return true;
            }
        } else {
            for succ in successors {
                let next = &self.activities[succ];
                if next.is_critical
                    && rounds_to_zero(next.early_start - current.early_finish, precision)
                    && self.extend_critical_chain(dag, succ, duration, chain, dead_ends)
                {
                    return true;
                }
            }
        }

        chain.pop();
        dead_ends.insert(position);
        false
    }
}

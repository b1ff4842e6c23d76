//! Graph construction, cycle detection and blocking degree.

use crate::task::Task;
use std::collections::HashMap;
use tracing::{trace, warn};

/// DFS visitation state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitState {
    /// Not reached yet.
    Unvisited,

    /// On the current DFS path. Reaching such a node again is a back-edge.
    InProgress,

    /// Fully explored; no cycle passes through it from here.
    Finished,
}

/// Directed dependency graph over one task batch.
///
/// Nodes are the batch's distinct effective ids (explicit `id`, else the
/// stringified position). Each dependency reference that resolves to a
/// node adds an edge `dependency -> dependent`; references to ids outside
/// the batch are dropped.
///
/// Tasks sharing an effective id collapse onto a single node, so they
/// share that node's edges and blocking degree.
///
/// # Examples
///
/// ```
/// use u_taskrank::graph::DependencyGraph;
/// use u_taskrank::task::Task;
///
/// let tasks = vec![
///     Task::new("A").with_id("a"),
///     Task::new("B").with_id("b").with_dependencies(["a"]),
///     Task::new("C").with_id("c").with_dependencies(["b"]),
/// ];
/// let graph = DependencyGraph::build(&tasks);
///
/// assert!(!graph.has_cycle());
/// assert_eq!(graph.blocking_degree()["a"], 1);
/// assert_eq!(graph.blocking_degree()["c"], 0);
/// ```
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Node id table in first-occurrence order.
    ids: Vec<String>,
    /// Id to node index.
    index: HashMap<String, usize>,
    /// Outgoing edges (dependents) per node.
    adjacency: Vec<Vec<usize>>,
    /// Node of each task, by batch position.
    task_nodes: Vec<usize>,
    /// Effective ids shared by more than one task.
    duplicates: Vec<String>,
}

impl DependencyGraph {
    /// Builds the graph for a batch.
    pub fn build(tasks: &[Task]) -> Self {
        let mut ids = Vec::with_capacity(tasks.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(tasks.len());
        let mut task_nodes = Vec::with_capacity(tasks.len());
        let mut duplicates = Vec::new();
        // whether a node has already been reported as shared
        let mut shared: Vec<bool> = Vec::with_capacity(tasks.len());

        for (i, task) in tasks.iter().enumerate() {
            let id = task.effective_id(i);
            match index.get(&id) {
                Some(&node) => {
                    if !shared[node] {
                        shared[node] = true;
                        duplicates.push(id);
                    }
                    task_nodes.push(node);
                }
                None => {
                    let node = ids.len();
                    index.insert(id.clone(), node);
                    ids.push(id);
                    shared.push(false);
                    task_nodes.push(node);
                }
            }
        }

        let mut adjacency = vec![Vec::new(); ids.len()];
        let mut dropped = 0usize;
        for (i, task) in tasks.iter().enumerate() {
            let dependent = task_nodes[i];
            for dep in &task.dependencies {
                match index.get(dep.as_str()) {
                    Some(&dependency) => adjacency[dependency].push(dependent),
                    None => dropped += 1,
                }
            }
        }

        if !duplicates.is_empty() {
            warn!(ids = ?duplicates, "task ids collide; colliding tasks share one graph node");
        }
        trace!(
            nodes = ids.len(),
            edges = adjacency.iter().map(Vec::len).sum::<usize>(),
            dropped,
            "dependency graph built"
        );

        Self {
            ids,
            index,
            adjacency,
            task_nodes,
            duplicates,
        }
    }

    /// Number of distinct nodes.
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of resolved dependency references.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Effective ids claimed by more than one task, in first-seen order.
    pub fn duplicate_ids(&self) -> &[String] {
        &self.duplicates
    }

    /// Ids of the tasks that depend on `id`, in batch order.
    ///
    /// Returns an empty list for ids outside the batch.
    pub fn dependents(&self, id: &str) -> Vec<&str> {
        self.index
            .get(id)
            .map(|&node| {
                self.adjacency[node]
                    .iter()
                    .map(|&d| self.ids[d].as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns `true` if the graph contains a directed cycle.
    ///
    /// A task listing itself as a dependency is a one-node cycle. Uses an
    /// explicit stack so very deep chains cannot exhaust the call stack.
    pub fn has_cycle(&self) -> bool {
        let mut state = vec![VisitState::Unvisited; self.ids.len()];
        // (node, next edge to follow)
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for root in 0..self.ids.len() {
            if state[root] != VisitState::Unvisited {
                continue;
            }
            state[root] = VisitState::InProgress;
            stack.push((root, 0));

            while let Some(frame) = stack.last_mut() {
                let node = frame.0;
                match self.adjacency[node].get(frame.1) {
                    Some(&next) => {
                        frame.1 += 1;
                        match state[next] {
                            VisitState::InProgress => return true,
                            VisitState::Unvisited => {
                                state[next] = VisitState::InProgress;
                                stack.push((next, 0));
                            }
                            VisitState::Finished => {}
                        }
                    }
                    None => {
                        state[node] = VisitState::Finished;
                        stack.pop();
                    }
                }
            }
        }

        false
    }

    /// How many dependency references point at each id in the batch.
    ///
    /// Every id in the batch is present, including those that block nothing.
    pub fn blocking_degree(&self) -> HashMap<String, usize> {
        self.ids
            .iter()
            .zip(&self.adjacency)
            .map(|(id, out)| (id.clone(), out.len()))
            .collect()
    }

    /// Blocking degree of the task at `position` in the batch.
    ///
    /// Returns 0 for positions outside the batch.
    pub fn blocking_count(&self, position: usize) -> usize {
        self.task_nodes
            .get(position)
            .map(|&node| self.adjacency[node].len())
            .unwrap_or(0)
    }
}

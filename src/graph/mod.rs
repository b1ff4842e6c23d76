//! Dependency graph analysis.
//!
//! Builds a directed graph over a task batch where an edge points from a
//! dependency to its dependent ("A blocks B"). The graph is an id table
//! plus per-node edge lists, so cyclic user data is just data.
//!
//! Provides:
//!
//! - **Cycle detection**: iterative three-state depth-first search over
//!   every node, covering disconnected components.
//! - **Blocking degree**: how many dependency references point at each
//!   task, i.e. how many tasks it blocks.
//!
//! # References
//!
//! Cormen et al. (2009), "Introduction to Algorithms", §22.3 (DFS edge
//! classification)

mod analyzer;

pub use analyzer::{DependencyGraph, VisitState};

//! Depth-first branch enumerator
//!
//! Produces every simple path from a start node to a node without outgoing
//! edges. Expansion uses an explicit frame stack and a single output vector,
//! so deep graphs cannot overflow the call stack and no intermediate branch
//! lists are concatenated.
//!
//! Per node, edges are visited in snapshot order:
//! - a target that matches no node is skipped (dangling reference)
//! - a target already on the current path is skipped (cycle guard)
//! - anything else is expanded with the path extended by that target
//!
//! Nothing is memoized: a sub-path reachable from several ancestors is
//! re-enumerated for each of them.

use rustc_hash::FxHashSet;
use std::time::Instant;
use tracing::{debug, trace, warn};

use crate::config::EnumerationConfig;
use crate::features::branch_enumeration::domain::{EnumerationOutcome, HeapGraph, Truncation};
use crate::shared::models::{Branch, BranchStep, HeapNode, NodeIndex};

/// Deadline checks happen once every this many expansion steps
const CLOCK_CHECK_INTERVAL: u32 = 1024;

#[derive(Debug)]
struct Frame {
    /// Position of the node in the graph's node table
    pos: usize,
    /// Next outgoing edge to examine
    next_edge: usize,
    /// Whether any edge of this node was followed
    followed: bool,
}

/// Caps shared by every start node of one request
#[derive(Debug)]
struct Budget {
    max_branches: Option<usize>,
    max_depth: Option<usize>,
    deadline: Option<Instant>,
    ticks: u32,
}

impl Budget {
    fn new(config: &EnumerationConfig) -> Self {
        Self {
            max_branches: config.max_branches,
            max_depth: config.max_depth,
            deadline: config.time_budget().map(|budget| Instant::now() + budget),
            ticks: 0,
        }
    }

    fn branches_exhausted(&self, emitted: usize) -> bool {
        self.max_branches.is_some_and(|max| emitted >= max)
    }

    fn depth_reached(&self, path_len: usize) -> bool {
        self.max_depth.is_some_and(|max| path_len >= max)
    }

    fn out_of_time(&mut self) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        self.ticks = self.ticks.wrapping_add(1);
        self.ticks % CLOCK_CHECK_INTERVAL == 0 && Instant::now() >= deadline
    }
}

/// Branch enumerator over a [`HeapGraph`]
#[derive(Debug, Clone, Default)]
pub struct BranchEnumerator {
    config: EnumerationConfig,
}

impl BranchEnumerator {
    pub fn new(config: EnumerationConfig) -> Self {
        Self { config }
    }

    /// Enumerator without any cap (exhaustive, like the unbounded presets)
    pub fn unbounded() -> Self {
        Self::new(EnumerationConfig::unbounded())
    }

    pub fn config(&self) -> &EnumerationConfig {
        &self.config
    }

    /// Branches starting at `start`, with the path initialized to that node
    pub fn enumerate_from(&self, graph: &HeapGraph, start: &HeapNode) -> EnumerationOutcome {
        self.enumerate_from_path(graph, &[BranchStep::from(start)])
    }

    /// Branches extending an already-accumulated path.
    ///
    /// Expansion starts at the last step of `prefix`; every step of `prefix`
    /// counts as visited. Returns an empty outcome when `prefix` is empty or
    /// its last step matches no node.
    pub fn enumerate_from_path(
        &self,
        graph: &HeapGraph,
        prefix: &[BranchStep],
    ) -> EnumerationOutcome {
        let mut outcome = EnumerationOutcome::default();
        let mut budget = Budget::new(&self.config);

        match prefix.last().and_then(|last| graph.position(last.index)) {
            Some(pos) => {
                self.expand(graph, prefix.to_vec(), pos, &mut budget, &mut outcome);
            }
            None => {
                if let Some(last) = prefix.last() {
                    outcome.skipped_starts.push(last.index);
                }
            }
        }

        self.finish("path", &outcome);
        outcome
    }

    /// Global enumeration: every node of the graph is a start node
    pub fn enumerate_all(&self, graph: &HeapGraph) -> EnumerationOutcome {
        let mut outcome = EnumerationOutcome::default();
        let mut budget = Budget::new(&self.config);

        for pos in 0..graph.len() {
            let start = BranchStep::from(graph.at(pos));
            if !self.expand(graph, vec![start], pos, &mut budget, &mut outcome) {
                break;
            }
        }

        self.finish("global", &outcome);
        outcome
    }

    /// Subset enumeration: only `starts` are start nodes, edges still resolve
    /// against the whole graph. Unknown start indexes are skipped.
    pub fn enumerate_subset(&self, graph: &HeapGraph, starts: &[NodeIndex]) -> EnumerationOutcome {
        let mut outcome = EnumerationOutcome::default();
        let mut budget = Budget::new(&self.config);

        for &index in starts {
            let Some(pos) = graph.position(index) else {
                warn!(index, "Start node not found in graph; skipping");
                outcome.skipped_starts.push(index);
                continue;
            };
            let start = BranchStep::from(graph.at(pos));
            if !self.expand(graph, vec![start], pos, &mut budget, &mut outcome) {
                break;
            }
        }

        self.finish("subset", &outcome);
        outcome
    }

    /// Depth-first expansion from `root_pos` with `path` already holding the
    /// root step. Returns `false` when a hard cap stopped the enumeration.
    fn expand(
        &self,
        graph: &HeapGraph,
        mut path: Vec<BranchStep>,
        root_pos: usize,
        budget: &mut Budget,
        outcome: &mut EnumerationOutcome,
    ) -> bool {
        let mut on_path: FxHashSet<NodeIndex> = path.iter().map(|s| s.index).collect();
        let mut stack = vec![Frame {
            pos: root_pos,
            next_edge: 0,
            followed: false,
        }];

        while let Some(frame) = stack.last_mut() {
            if budget.out_of_time() {
                outcome.mark(Truncation::TimeBudget);
                return false;
            }

            let node = graph.at(frame.pos);

            let terminal = if node.edges.is_empty() {
                true
            } else if frame.next_edge == 0 && budget.depth_reached(path.len()) {
                outcome.mark(Truncation::DepthLimit);
                true
            } else {
                false
            };

            if terminal {
                if !emit(&path, budget, outcome) {
                    return false;
                }
                pop_frame(&mut stack, &mut path, &mut on_path);
                continue;
            }

            if frame.next_edge < node.edges.len() {
                let edge = &node.edges[frame.next_edge];
                frame.next_edge += 1;

                let Some(target_pos) = graph.position(edge.to_node) else {
                    trace!(from = node.index, to = edge.to_node, "Skipping dangling edge");
                    continue;
                };
                let target = graph.at(target_pos);
                if on_path.contains(&target.index) {
                    continue;
                }

                frame.followed = true;
                path.push(BranchStep::from(target));
                on_path.insert(target.index);
                stack.push(Frame {
                    pos: target_pos,
                    next_edge: 0,
                    followed: false,
                });
                continue;
            }

            // every edge examined
            if !frame.followed && self.config.emit_dead_ends && !emit(&path, budget, outcome) {
                return false;
            }
            pop_frame(&mut stack, &mut path, &mut on_path);
        }

        true
    }

    fn finish(&self, mode: &str, outcome: &EnumerationOutcome) {
        match outcome.truncation {
            Some(truncation) => warn!(
                mode,
                branches = outcome.branches.len(),
                ?truncation,
                "Branch enumeration truncated"
            ),
            None => debug!(mode, branches = outcome.branches.len(), "Branch enumeration complete"),
        }
    }
}

/// Push a copy of the current path; `false` when the branch cap is hit
fn emit(path: &[BranchStep], budget: &Budget, outcome: &mut EnumerationOutcome) -> bool {
    if budget.branches_exhausted(outcome.branches.len()) {
        outcome.mark(Truncation::BranchLimit);
        return false;
    }
    if let Some(branch) = Branch::from_steps(path.to_vec()) {
        outcome.branches.push(branch);
    }
    true
}

/// Leave the top frame; the root frame's step belongs to the caller's prefix
fn pop_frame(stack: &mut Vec<Frame>, path: &mut Vec<BranchStep>, on_path: &mut FxHashSet<NodeIndex>) {
    stack.pop();
    if !stack.is_empty() {
        if let Some(step) = path.pop() {
            on_path.remove(&step.index);
        }
    }
}

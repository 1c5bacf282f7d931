use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::{NodeId, RoadMap};

/// Input coordinates are percentages of the map extent.
const COORD_MIN: f64 = 0.0;
const COORD_MAX: f64 = 100.0;

/// Rescale factor from percentage input into internal map space.
const COORD_SCALE: f64 = 0.01;

/// Lifecycle of one search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchState {
    Idle,
    Searching,
    Found,
    Failed,
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    /// Ordered node sequence; first entry is the start node, last the goal.
    pub steps: Vec<NodeId>,
    /// Total traversed distance in meters.
    pub distance_m: f64,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Per-search bookkeeping, kept in a side table indexed by [`NodeId`] so the
/// shared map carries no mutable search state between runs.
#[derive(Debug, Clone, Copy)]
struct Scratch {
    visited: bool,
    g_value: f64,
    h_value: f64,
    parent: Option<NodeId>,
}

impl Default for Scratch {
    fn default() -> Self {
        Self {
            visited: false,
            g_value: 0.0,
            h_value: 0.0,
            parent: None,
        }
    }
}

/// A* search engine over a [`RoadMap`].
///
/// One planner runs exactly one search session. Construction resolves the
/// requested start and end coordinates to their nearest road nodes; a second
/// call to [`search`](Self::search) after a terminal state is rejected rather
/// than reusing stale bookkeeping.
///
/// The planner borrows the map mutably for its whole lifetime, so two
/// searches can never race over one map's state.
#[derive(Debug)]
pub struct RoutePlanner<'a> {
    map: &'a mut RoadMap,
    start: NodeId,
    end: NodeId,
    frontier: Vec<NodeId>,
    scratch: Vec<Scratch>,
    state: SearchState,
}

impl<'a> RoutePlanner<'a> {
    /// Create a planner for a route between two coordinate pairs.
    ///
    /// Coordinates are percentages of the map extent and must lie in
    /// `[0, 100]`; each is rescaled into internal space and resolved to the
    /// nearest road node.
    pub fn new(
        map: &'a mut RoadMap,
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
    ) -> Result<Self> {
        let start_x = check_coordinate("start_x", start_x)? * COORD_SCALE;
        let start_y = check_coordinate("start_y", start_y)? * COORD_SCALE;
        let end_x = check_coordinate("end_x", end_x)? * COORD_SCALE;
        let end_y = check_coordinate("end_y", end_y)? * COORD_SCALE;

        let start = map
            .find_closest_node(start_x, start_y)
            .ok_or(Error::UnresolvedNode)?;
        let end = map
            .find_closest_node(end_x, end_y)
            .ok_or(Error::UnresolvedNode)?;
        debug!(start, end, "resolved route endpoints");

        let scratch = vec![Scratch::default(); map.len()];
        Ok(Self {
            map,
            start,
            end,
            frontier: Vec::new(),
            scratch,
            state: SearchState::Idle,
        })
    }

    /// Resolved start node.
    pub fn start_node(&self) -> NodeId {
        self.start
    }

    /// Resolved end node.
    pub fn end_node(&self) -> NodeId {
        self.end
    }

    /// Current lifecycle state of this session.
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Straight-line distance from `node` to the goal, in internal units.
    ///
    /// Admissible as long as every edge is at least as long as the
    /// straight-line distance between its endpoints, which holds for the
    /// Euclidean edge metric used by [`RoadMap`].
    fn calculate_h_value(&self, node: NodeId) -> f64 {
        self.map.distance(node, self.end)
    }

    fn f_value(&self, node: NodeId) -> f64 {
        let entry = &self.scratch[node];
        entry.g_value + entry.h_value
    }

    /// Expand `current`, discovering every not-yet-visited neighbour.
    ///
    /// Discovery fixes a neighbour's parent, g and h once and for all: an
    /// already-visited neighbour is skipped unconditionally, so a node enters
    /// the frontier at most once per search. Valid because edge costs are
    /// non-negative and the heuristic is consistent.
    fn add_neighbors(&mut self, current: NodeId) {
        let current_g = self.scratch[current].g_value;
        for &next in self.map.neighbors(current) {
            if self.scratch[next].visited {
                continue;
            }
            let h_value = self.calculate_h_value(next);
            let g_value = current_g + self.map.distance(current, next);
            self.scratch[next] = Scratch {
                visited: true,
                g_value,
                h_value,
                parent: Some(current),
            };
            self.frontier.push(next);
        }
    }

    /// Remove and return the frontier entry with the lowest `f = g + h`.
    ///
    /// Ties resolve to the lower h value, then to the earlier-inserted
    /// entry. Returns `None` when the frontier is exhausted, which the main
    /// loop reads as "no path exists".
    fn next_node(&mut self) -> Option<NodeId> {
        let mut best: Option<usize> = None;
        for (index, &candidate) in self.frontier.iter().enumerate() {
            let better = match best {
                None => true,
                Some(current) => {
                    let chosen = self.frontier[current];
                    let candidate_f = self.f_value(candidate);
                    let chosen_f = self.f_value(chosen);
                    candidate_f < chosen_f
                        || (candidate_f == chosen_f
                            && self.scratch[candidate].h_value < self.scratch[chosen].h_value)
                }
            };
            if better {
                best = Some(index);
            }
        }
        // Vec::remove keeps the remaining entries in insertion order, which
        // the tie-break rule depends on.
        best.map(|index| self.frontier.remove(index))
    }

    /// Walk parent links back from `goal`, producing the start-to-goal
    /// sequence and the traversed distance in meters.
    ///
    /// The distance sums true edge lengths rather than g values, so rounding
    /// introduced during expansion never compounds into the reported total.
    fn construct_final_path(&self, goal: NodeId) -> RoutePlan {
        let mut steps = Vec::new();
        let mut distance = 0.0;
        let mut current = goal;
        while let Some(parent) = self.scratch[current].parent {
            steps.push(current);
            distance += self.map.distance(current, parent);
            current = parent;
        }
        steps.push(current);
        steps.reverse();

        RoutePlan {
            steps,
            distance_m: distance * self.map.metric_scale(),
        }
    }

    /// Run the A* search to completion.
    ///
    /// On success the ordered node sequence is also deposited into the map's
    /// `path` slot for downstream consumers. An unreachable goal yields
    /// [`Error::NoRouteFound`]; a planner that already finished yields
    /// [`Error::SearchExhausted`].
    pub fn search(&mut self) -> Result<RoutePlan> {
        if self.state != SearchState::Idle {
            warn!(state = ?self.state, "refusing to reuse a completed search session");
            return Err(Error::SearchExhausted);
        }
        self.state = SearchState::Searching;

        self.scratch[self.start] = Scratch {
            visited: true,
            g_value: 0.0,
            h_value: self.calculate_h_value(self.start),
            parent: None,
        };
        self.frontier.push(self.start);

        while let Some(current) = self.next_node() {
            if current == self.end {
                let plan = self.construct_final_path(current);
                self.map.set_path(plan.steps.clone());
                self.state = SearchState::Found;
                debug!(
                    distance_m = plan.distance_m,
                    hops = plan.hop_count(),
                    "route found"
                );
                return Ok(plan);
            }
            self.add_neighbors(current);
        }

        self.state = SearchState::Failed;
        debug!("frontier exhausted before reaching the goal");
        Err(Error::NoRouteFound)
    }
}

fn check_coordinate(name: &'static str, value: f64) -> Result<f64> {
    if !(COORD_MIN..=COORD_MAX).contains(&value) {
        warn!(name, value, "rejecting out-of-range coordinate");
        return Err(Error::CoordinateOutOfRange { name, value });
    }
    Ok(value)
}

//! Roadroute library entry points.
//!
//! This crate models a road network as an arena-backed graph and plans
//! point-to-point routes over it with A* search guided by a straight-line
//! heuristic. Callers supply the graph (nodes, undirected edges, and a metric
//! scale), ask for a route between two percentage coordinate pairs, and get
//! back the ordered node sequence together with the traversed distance in
//! meters.
//!

#![deny(warnings)]

pub mod error;
pub mod graph;
pub mod planner;

pub use error::{Error, Result};
pub use graph::{Node, NodeId, Position, RoadMap};
pub use planner::{RoutePlan, RoutePlanner, SearchState};

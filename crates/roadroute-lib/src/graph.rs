use serde::Serialize;
use tracing::warn;

/// Stable index of a node within the road map's arena.
pub type NodeId = usize;

/// 2D coordinate in the map's internal, normalized space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A single road node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub position: Position,
}

/// Arena-backed road network used by the route planner.
///
/// Nodes live in a single owned collection and refer to each other by
/// [`NodeId`] index, so adjacency and parent links carry no lifetimes. The
/// `path` slot holds the most recently planned route for downstream consumers
/// (e.g. a renderer) that expect to read it off the shared map.
#[derive(Debug, Clone)]
pub struct RoadMap {
    nodes: Vec<Node>,
    adjacency: Vec<Vec<NodeId>>,
    metric_scale: f64,
    path: Option<Vec<NodeId>>,
}

impl RoadMap {
    /// Create an empty map with the given metric scale (internal units to
    /// meters).
    pub fn new(metric_scale: f64) -> Self {
        Self {
            nodes: Vec::new(),
            adjacency: Vec::new(),
            metric_scale,
            path: None,
        }
    }

    /// Number of nodes in the map.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the map holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Multiplicative factor converting internal distances to meters.
    pub fn metric_scale(&self) -> f64 {
        self.metric_scale
    }

    /// Append a node at the given internal coordinates and return its id.
    pub fn add_node(&mut self, x: f64, y: f64) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            id,
            position: Position { x, y },
        });
        self.adjacency.push(Vec::new());
        id
    }

    /// Connect two nodes with an undirected edge.
    ///
    /// Self-loops and ids outside the arena are ignored.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) {
        if a == b || a >= self.nodes.len() || b >= self.nodes.len() {
            warn!(a, b, "ignoring invalid edge");
            return;
        }
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Return the neighbours for a given node id.
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Euclidean distance between two nodes in internal units.
    ///
    /// # Panics
    ///
    /// Panics if either id is outside the arena.
    pub fn distance(&self, a: NodeId, b: NodeId) -> f64 {
        self.nodes[a].position.distance_to(&self.nodes[b].position)
    }

    /// Find the node closest to the given internal coordinates.
    ///
    /// Deterministic for a fixed map: equidistant candidates resolve to the
    /// lowest id. Returns `None` only when the map is empty.
    pub fn find_closest_node(&self, x: f64, y: f64) -> Option<NodeId> {
        let target = Position { x, y };
        let mut closest: Option<(NodeId, f64)> = None;
        for node in &self.nodes {
            let distance = node.position.distance_to(&target);
            match closest {
                Some((_, best)) if distance >= best => {}
                _ => closest = Some((node.id, distance)),
            }
        }
        closest.map(|(id, _)| id)
    }

    /// Deposit a planned route for downstream consumers.
    pub fn set_path(&mut self, path: Vec<NodeId>) {
        self.path = Some(path);
    }

    /// The most recently planned route, if any.
    pub fn path(&self) -> Option<&[NodeId]> {
        self.path.as_deref()
    }

    /// Take ownership of the most recently planned route.
    pub fn take_path(&mut self) -> Option<Vec<NodeId>> {
        self.path.take()
    }
}

impl Default for RoadMap {
    fn default() -> Self {
        Self::new(1.0)
    }
}

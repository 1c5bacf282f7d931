use thiserror::Error;

/// Convenient result alias for the roadroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an input coordinate falls outside the accepted percentage range.
    #[error("coordinate {name} out of range: {value} (expected 0 to 100)")]
    CoordinateOutOfRange { name: &'static str, value: f64 },

    /// Raised when an endpoint could not be resolved to a road node.
    #[error("could not resolve a road node for the requested endpoint")]
    UnresolvedNode,

    /// Raised when the search exhausted the frontier without reaching the goal.
    /// This is the expected outcome for an unreachable goal, not an internal fault.
    #[error("no route found between the requested endpoints")]
    NoRouteFound,

    /// Raised when a planner is asked to search again after reaching a terminal state.
    #[error("search session already completed; construct a new planner to search again")]
    SearchExhausted,
}

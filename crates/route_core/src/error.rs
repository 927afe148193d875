use thiserror::Error;

/// Convenient result alias for route queries.
pub type Result<T> = std::result::Result<T, RouteError>;

/// Everything that can go wrong while answering a single route query.
///
/// Malformed edges are not part of this taxonomy: they are dropped while the
/// graph is built (see [`Graph::add_edge`](crate::graph::Graph::add_edge)).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The origin is not a city of the map.
    #[error("unknown origin {origin:?}, make sure the city exists in the map")]
    UnknownOrigin { origin: String },

    /// The destination is not covered by the predecessor table.
    #[error(
        "there is no route to {destination:?}, make sure origin and destination exist in the map"
    )]
    UnknownDestination { destination: String },

    /// Both cities exist but are not connected.
    #[error("there is no route from {origin:?} to {destination:?}")]
    NoPath { origin: String, destination: String },

    /// Walking the predecessor chain revisited a node or left the table.
    #[error("corrupt predecessor table at node {node:?}")]
    CorruptTable { node: String },
}

//! Re-exports of the most commonly used items in `route_core`.
pub use crate::error::RouteError;
pub use crate::graph::{build_graph, EdgeRecord, Graph, Node, NodeRecord};
pub use crate::search::shortest_path::ShortestPath;
pub use crate::search::table::{PredecessorTable, TableEntry};
pub use crate::search::{
    find_route, render_path, shortest_paths, EngineKind, ShortestPathEngine,
};
pub use crate::snapshot::SharedGraph;

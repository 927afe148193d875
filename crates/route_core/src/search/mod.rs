use log::{debug, error};
use rustc_hash::FxHashSet;

use crate::{
    error::{Result, RouteError},
    graph::Graph,
    statistics::SearchStats,
};

use self::{
    dijkstra::Dijkstra,
    heap_dijkstra::HeapDijkstra,
    shortest_path::ShortestPath,
    table::{PredecessorTable, TableEntry},
};

pub mod dijkstra;
pub mod heap_dijkstra;
pub mod shortest_path;
pub mod table;

/// Single-source search over an immutable graph.
pub trait ShortestPathEngine {
    /// Computes the predecessor/distance table of every node for `origin`.
    fn shortest_paths(&mut self, origin: &str) -> Result<PredecessorTable>;

    /// Statistics of the last search.
    fn stats(&self) -> &SearchStats;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum EngineKind {
    /// Linear scan for the closest node
    #[default]
    Linear,
    /// Binary heap
    Heap,
}

impl EngineKind {
    pub fn engine<'a>(self, g: &'a Graph) -> Box<dyn ShortestPathEngine + 'a> {
        match self {
            EngineKind::Linear => Box::new(Dijkstra::new(g)),
            EngineKind::Heap => Box::new(HeapDijkstra::new(g)),
        }
    }
}

/// Runs the reference engine from `origin`.
pub fn shortest_paths(g: &Graph, origin: &str) -> Result<PredecessorTable> {
    Dijkstra::new(g).shortest_paths(origin)
}

/// Walks the table backwards from `destination` to its origin.
pub fn render_path(table: &PredecessorTable, destination: &str) -> Result<ShortestPath> {
    let entry = table
        .get(destination)
        .ok_or_else(|| RouteError::UnknownDestination {
            destination: destination.to_owned(),
        })?;

    let (mut predecessor, distance) = match entry {
        TableEntry::Discovered {
            predecessor,
            distance,
        } => (predecessor.as_deref(), *distance),
        TableEntry::Undiscovered => {
            return Err(RouteError::NoPath {
                origin: table.origin().to_owned(),
                destination: destination.to_owned(),
            })
        }
    };

    let mut path = vec![destination];
    let mut seen = FxHashSet::default();
    seen.insert(destination);

    while let Some(current) = predecessor {
        if !seen.insert(current) {
            return Err(corrupt_table(current));
        }
        path.push(current);

        predecessor = match table.get(current) {
            Some(TableEntry::Discovered { predecessor, .. }) => predecessor.as_deref(),
            _ => return Err(corrupt_table(current)),
        };
    }

    // The only node without predecessor must be the origin
    if let Some(start) = path.last().filter(|start| **start != table.origin()) {
        return Err(corrupt_table(start));
    }

    path.reverse();
    let sp = ShortestPath::new(path.into_iter().map(str::to_owned).collect(), distance);
    debug!("Path found: {:?}", sp);
    Ok(sp)
}

/// Searches from `origin` and renders the route to `destination`.
pub fn find_route(g: &Graph, origin: &str, destination: &str) -> Result<ShortestPath> {
    render_path(&shortest_paths(g, origin)?, destination)
}

fn corrupt_table(node: &str) -> RouteError {
    error!("Predecessor chain is broken at {}", node);
    RouteError::CorruptTable {
        node: node.to_owned(),
    }
}

#[cfg(test)]
pub(crate) fn assert_no_path(path: Result<ShortestPath>) {
    assert!(
        matches!(path, Err(RouteError::NoPath { .. })),
        "expected no path, got {:?}",
        path
    );
}

#[cfg(test)]
pub(crate) fn assert_path(
    expected_path: Vec<&str>,
    expected_weight: crate::constants::Weight,
    path: Result<ShortestPath>,
) {
    let path = path.expect("expected a path");
    assert_eq!(path.nodes, expected_path);
    approx::assert_abs_diff_eq!(path.weight, expected_weight, epsilon = 1e-9);
}

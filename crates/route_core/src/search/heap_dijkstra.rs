//! Dijkstra's algorithm on a binary heap.
use std::collections::BinaryHeap;

use log::info;

use crate::{
    constants::Weight,
    error::{Result, RouteError},
    graph::Graph,
    statistics::SearchStats,
};

use super::{
    table::{IndexedNodes, Label, PredecessorTable},
    ShortestPathEngine,
};

#[derive(Debug)]
struct Candidate {
    node: usize,
    weight: Weight,
}

impl Candidate {
    fn new(node: usize, weight: Weight) -> Self {
        Self { node, weight }
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    // Reversed, the smallest weight (then the smallest index) is popped first
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .weight
            .partial_cmp(&self.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Same relaxation and tie-breaking as [`Dijkstra`](super::dijkstra::Dijkstra)
/// but the closest node is taken from a heap instead of scanning all nodes.
/// Outdated heap entries are skipped when popped.
pub struct HeapDijkstra<'a> {
    pub stats: SearchStats,
    g: &'a Graph,
}

impl<'a> HeapDijkstra<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        HeapDijkstra {
            g: graph,
            stats: SearchStats::default(),
        }
    }
}

impl ShortestPathEngine for HeapDijkstra<'_> {
    fn shortest_paths(&mut self, origin: &str) -> Result<PredecessorTable> {
        self.stats.init();

        let nodes = IndexedNodes::new(self.g);
        let Some(source) = nodes.index_of(origin) else {
            self.stats.finish();
            info!("Unknown origin {:?}", origin);
            return Err(RouteError::UnknownOrigin {
                origin: origin.to_owned(),
            });
        };

        let mut labels: Vec<Option<Label>> = vec![None; nodes.len()];
        let mut visited = vec![false; nodes.len()];
        let mut queue = BinaryHeap::new();

        labels[source] = Some(Label {
            predecessor: None,
            distance: 0.0,
        });
        queue.push(Candidate::new(source, 0.0));

        while let Some(Candidate { node, weight }) = queue.pop() {
            if visited[node] || labels[node].map_or(true, |label| weight > label.distance) {
                continue;
            }

            visited[node] = true;
            self.stats.nodes_settled += 1;
            nodes.relax(&mut labels, &visited, node, |neighbor, distance| {
                queue.push(Candidate::new(neighbor, distance))
            });
        }

        self.stats.finish();

        let table = nodes.to_table(source, &labels);
        info!(
            "Search from {} reached {}/{} nodes. {}",
            origin,
            table.reachable(),
            nodes.len(),
            self.stats
        );

        Ok(table)
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

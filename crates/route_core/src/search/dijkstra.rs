//! Dijkstra's algorithm with a linear scan for the closest unvisited node.
use log::{debug, info};

use crate::{
    error::{Result, RouteError},
    graph::Graph,
    statistics::SearchStats,
};

use super::{
    table::{IndexedNodes, Label, PredecessorTable},
    ShortestPathEngine,
};

/// Reference engine. Every step scans all nodes in ascending id order and
/// settles the discovered node with the strictly smallest distance, so ties
/// go to the lowest id. Meant for small maps.
pub struct Dijkstra<'a> {
    pub stats: SearchStats,
    g: &'a Graph,
}

impl<'a> Dijkstra<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Dijkstra {
            g: graph,
            stats: SearchStats::default(),
        }
    }
}

impl ShortestPathEngine for Dijkstra<'_> {
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

        labels[source] = Some(Label {
            predecessor: None,
            distance: 0.0,
        });
        visited[source] = true;
        self.stats.nodes_settled += 1;
        nodes.relax(&mut labels, &visited, source, |_, _| {});

        // Every iteration settles one node, so the origin plus `len - 1`
        // iterations cover the whole graph
        for _ in 1..nodes.len() {
            let Some(current) = closest_unvisited(&labels, &visited) else {
                break;
            };

            visited[current] = true;
            self.stats.nodes_settled += 1;
            nodes.relax(&mut labels, &visited, current, |_, _| {});
        }

        self.stats.finish();

        let table = nodes.to_table(source, &labels);
        debug!("Table for {}: {:?}", origin, table);
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

/// First discovered, unvisited node with the strictly smallest distance.
fn closest_unvisited(labels: &[Option<Label>], visited: &[bool]) -> Option<usize> {
    let mut closest: Option<(usize, f64)> = None;

    for (idx, label) in labels.iter().enumerate() {
        if visited[idx] {
            continue;
        }
        if let Some(Label { distance, .. }) = label {
            if closest.map_or(true, |(_, min)| *distance < min) {
                closest = Some((idx, *distance));
            }
        }
    }

    closest.map(|(idx, _)| idx)
}

use crate::constants::{NodeId, Weight};
use crate::util::math::euclidean;
use anyhow::Context;
use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{fmt, io, path::Path};

/// A city of the map.
///
/// The coordinates only serve to derive edge weights, they are never used as
/// path costs directly. The adjacency can only be changed through [`Graph`],
/// which keeps it symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    adjacency: FxHashMap<NodeId, Weight>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, x: f64, y: f64) -> Self {
        Node {
            id: id.into(),
            x,
            y,
            adjacency: FxHashMap::default(),
        }
    }

    /// Returns an iterator over all neighbors and the weight of the connecting edge
    pub fn neighbors(&self) -> impl Iterator<Item = (&str, Weight)> + '_ {
        self.adjacency
            .iter()
            .map(|(id, weight)| (id.as_str(), *weight))
    }

    /// Weight of the edge to `neighbor`, if there is one.
    pub fn weight_to(&self, neighbor: &str) -> Option<Weight> {
        self.adjacency.get(neighbor).copied()
    }

    pub fn degree(&self) -> usize {
        self.adjacency.len()
    }

    /// A node needs an id and finite coordinates to be part of a graph.
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && self.x.is_finite() && self.y.is_finite()
    }
}

/// One row of the city source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

/// One row of the road source. Missing ids are allowed, such rows are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: Option<NodeId>,
    pub target: Option<NodeId>,
}

impl EdgeRecord {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        EdgeRecord {
            source: Some(source.into()),
            target: Some(target.into()),
        }
    }
}

/// Undirected map of cities. Edge weights are the euclidean distance between
/// the two endpoints, computed once when the edge is inserted.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: FxHashMap<NodeId, Node>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes: FxHashMap::default(),
        }
    }

    pub fn with_capacity(num_nodes: usize) -> Self {
        Self {
            nodes: FxHashMap::with_capacity_and_hasher(num_nodes, Default::default()),
        }
    }

    /// Adds a node to the graph, replacing any node with the same id.
    ///
    /// The adjacency of the new node starts empty. When a node is replaced all
    /// edges of the old node are removed on both sides, because its
    /// coordinates (and with them the weights) may have changed.
    ///
    /// Nodes with an empty id or non-finite coordinates are ignored, see
    /// [`Node::is_valid`]. Returns the replaced node, so `None` is returned
    /// both for a fresh insert and for an ignored node.
    pub fn add_node(&mut self, mut node: Node) -> Option<Node> {
        if !node.is_valid() {
            debug!("Ignoring node {:?} at ({}, {})", node.id, node.x, node.y);
            return None;
        }

        node.adjacency.clear();
        let replaced = self.remove_node(&node.id);
        if replaced.is_some() {
            debug!("Replaced node {}", node.id);
        }

        self.nodes.insert(node.id.clone(), node);
        replaced
    }

    /// Connects `a` and `b` in both directions.
    ///
    /// This is a no-op if one of the ids is empty or unknown, if both ids are
    /// equal or if the distance overflows to infinity. Malformed rows of the data source must not abort building
    /// the graph, so callers that need strictness should validate beforehand.
    ///
    /// Returns the weight of the inserted edge.
    pub fn add_edge(&mut self, a: &str, b: &str) -> Option<Weight> {
        if a.is_empty() || b.is_empty() || a == b {
            debug!("Dropping edge {:?} <=> {:?}", a, b);
            return None;
        }

        let weight = match (self.nodes.get(a), self.nodes.get(b)) {
            (Some(node_a), Some(node_b)) => euclidean(node_a, node_b),
            _ => {
                debug!("Dropping edge {} <=> {}: unknown endpoint", a, b);
                return None;
            }
        };
        if !weight.is_finite() {
            debug!("Dropping edge {} <=> {}: weight {}", a, b, weight);
            return None;
        }

        self.nodes.get_mut(a)?.adjacency.insert(b.to_owned(), weight);
        self.nodes.get_mut(b)?.adjacency.insert(a.to_owned(), weight);

        Some(weight)
    }

    /// Removes the edge between `a` and `b`. Returns its weight.
    pub fn remove_edge(&mut self, a: &str, b: &str) -> Option<Weight> {
        let weight = self.nodes.get_mut(a)?.adjacency.remove(b)?;
        if let Some(node_b) = self.nodes.get_mut(b) {
            node_b.adjacency.remove(a);
        }
        Some(weight)
    }

    /// Removes a node and every edge that references it.
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let node = self.nodes.remove(id)?;
        for neighbor in node.adjacency.keys() {
            if let Some(neighbor) = self.nodes.get_mut(neighbor) {
                neighbor.adjacency.remove(id);
            }
        }
        Some(node)
    }

    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(Node::degree).sum::<usize>() / 2
    }

    /// Returns an iterator over all nodes of the graph
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// The backing map of the graph.
    pub fn all_nodes(&self) -> &FxHashMap<NodeId, Node> {
        &self.nodes
    }

    /// All ids in ascending order. This is the enumeration order of the search.
    pub fn node_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Reads cities (`id,x,y`) and roads (`source,target`) from csv sources.
    pub fn from_readers<N: io::Read, E: io::Read>(nodes: N, edges: E) -> anyhow::Result<Self> {
        let nodes: Vec<NodeRecord> = read_records(reader_builder().from_reader(nodes), "city")?;
        let edges: Vec<EdgeRecord> = read_records(reader_builder().from_reader(edges), "road")?;

        Ok(build_graph(nodes, edges))
    }

    pub fn from_csv(path_to_nodes: &Path, path_to_edges: &Path) -> anyhow::Result<Self> {
        info!("Reading map from {:?} and {:?}", path_to_nodes, path_to_edges);

        let nodes = reader_builder()
            .from_path(path_to_nodes)
            .with_context(|| format!("Could not open {}", path_to_nodes.display()))?;
        let edges = reader_builder()
            .from_path(path_to_edges)
            .with_context(|| format!("Could not open {}", path_to_edges.display()))?;

        let nodes: Vec<NodeRecord> = read_records(nodes, "city")?;
        let edges: Vec<EdgeRecord> = read_records(edges, "road")?;

        Ok(build_graph(nodes, edges))
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Map:\t#Cities: {}, #Roads: {}",
            self.node_count(),
            self.edge_count()
        )
    }
}

/// Builds a graph from two record streams. Cities without id or with
/// non-finite coordinates are dropped, as are roads that reference unknown or
/// missing cities.
pub fn build_graph(
    nodes: impl IntoIterator<Item = NodeRecord>,
    edges: impl IntoIterator<Item = EdgeRecord>,
) -> Graph {
    let mut g = Graph::new();
    let mut dropped_cities = 0;
    for NodeRecord { id, x, y } in nodes {
        let node = Node::new(id, x, y);
        if node.is_valid() {
            g.add_node(node);
        } else {
            debug!("Dropping city {:?} at ({}, {})", node.id, node.x, node.y);
            dropped_cities += 1;
        }
    }

    let mut dropped = 0;
    for EdgeRecord { source, target } in edges {
        let inserted = match (source.as_deref(), target.as_deref()) {
            (Some(source), Some(target)) => g.add_edge(source, target).is_some(),
            _ => false,
        };
        if !inserted {
            dropped += 1;
        }
    }

    info!(
        "{}, dropped {} malformed cities and {} malformed roads",
        g, dropped_cities, dropped
    );
    g
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.trim(csv::Trim::All);
    builder
}

fn read_records<T: DeserializeOwned, R: io::Read>(
    reader: csv::Reader<R>,
    what: &str,
) -> anyhow::Result<Vec<T>> {
    reader
        .into_deserialize()
        .enumerate()
        .map(|(i, record)| record.with_context(|| format!("Failed to parse {} in row {}", what, i + 1)))
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{
        search::{assert_path, render_path, EngineKind},
        util::test_graphs::generate_triangle,
    };

    use super::*;

    #[test]
    fn read_from_csv() {
        let graph = Graph::from_csv(
            &Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data/nodes.csv"),
            &Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data/edges.csv"),
        )
        .unwrap();

        assert_eq!(graph.node_count(), 5);
        // Rows with an unknown or a missing city are dropped
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.get_node("C").unwrap().weight_to("D"), Some(5.0));
        assert_eq!(graph.get_node("E").unwrap().degree(), 0);
    }

    #[test]
    fn read_from_readers_with_missing_fields() {
        let nodes = "id,x,y\nA,0,0\nB,3,4\n";
        let edges = "source,target\nA,B\n,B\nA,\n";

        let graph = Graph::from_readers(nodes.as_bytes(), edges.as_bytes()).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.get_node("B").unwrap().weight_to("A"), Some(5.0));
    }

    #[test]
    fn invalid_coordinates_are_reported() {
        let nodes = "id,x,y\nA,zero,0\n";
        let edges = "source,target\n";

        let err = Graph::from_readers(nodes.as_bytes(), edges.as_bytes()).unwrap_err();

        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn edges_are_symmetric() {
        let g = generate_triangle();

        assert_eq!(g.get_node("A").unwrap().weight_to("B"), Some(3.0));
        assert_eq!(g.get_node("B").unwrap().weight_to("A"), Some(3.0));
        assert_eq!(g.get_node("B").unwrap().weight_to("C"), Some(4.0));
        assert_eq!(g.get_node("C").unwrap().weight_to("B"), Some(4.0));
        assert_eq!(g.get_node("A").unwrap().weight_to("C"), Some(5.0));
        assert_eq!(g.get_node("C").unwrap().weight_to("A"), Some(5.0));
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn malformed_edges_are_ignored() {
        let mut g = generate_triangle();

        assert_eq!(g.add_edge("A", "Z"), None);
        assert_eq!(g.add_edge("Z", "A"), None);
        assert_eq!(g.add_edge("", "A"), None);
        assert_eq!(g.add_edge("A", "A"), None);

        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.get_node("A").unwrap().weight_to("A"), None);
    }

    #[test]
    fn readding_edge_keeps_weight() {
        let mut g = generate_triangle();

        assert_eq!(g.add_edge("B", "A"), Some(3.0));
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn remove_edge() {
        let mut g = generate_triangle();

        assert_eq!(g.remove_edge("C", "A"), Some(5.0));
        assert_eq!(g.remove_edge("A", "C"), None);
        assert_eq!(g.get_node("A").unwrap().weight_to("C"), None);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn remove_node_strips_adjacency() {
        let mut g = generate_triangle();

        let removed = g.remove_node("B").unwrap();

        assert_eq!(removed.degree(), 2);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.get_node("A").unwrap().weight_to("B"), None);
        assert_eq!(g.get_node("C").unwrap().weight_to("B"), None);
        assert_eq!(g.edge_count(), 1);
        assert!(g.remove_node("B").is_none());
    }

    #[test]
    fn replace_node_drops_its_edges() {
        let mut g = generate_triangle();

        let replaced = g.add_node(Node::new("C", 0.0, 6.0)).unwrap();

        assert_eq!(replaced.x, 4.0);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.get_node("C").unwrap().degree(), 0);
        assert_eq!(g.get_node("A").unwrap().weight_to("C"), None);
        assert_eq!(g.get_node("B").unwrap().weight_to("C"), None);

        // New coordinates are used for new edges
        assert_eq!(g.add_edge("A", "C"), Some(6.0));
    }

    #[test]
    fn empty_id_is_ignored() {
        let mut g = Graph::new();

        assert!(g.add_node(Node::new("", 0.0, 0.0)).is_none());
        assert_eq!(g.node_count(), 0);
    }

    #[test]
    fn non_finite_coordinates_are_dropped() {
        let nodes = "id,x,y\nA,0,0\nB,NaN,0\nD,1,0\nE,2,0\nF,inf,1\nG,3,-inf\n";
        let edges = "source,target\nA,B\nB,E\nA,D\nD,E\nE,F\nE,G\n";

        let g = Graph::from_readers(nodes.as_bytes(), edges.as_bytes()).unwrap();

        assert_eq!(g.node_ids(), vec!["A", "D", "E"]);
        assert_eq!(g.edge_count(), 2);
        assert!(g.nodes().all(|node| node.neighbors().all(|(_, w)| w.is_finite())));

        for kind in [EngineKind::Linear, EngineKind::Heap] {
            let table = kind.engine(&g).shortest_paths("A").unwrap();
            assert_path(vec!["A", "D", "E"], 2.0, render_path(&table, "E"));
        }
    }

    #[test]
    fn add_node_ignores_non_finite_coordinates() {
        let mut g = generate_triangle();

        assert!(g.add_node(Node::new("B", f64::NAN, 0.0)).is_none());
        assert!(g.add_node(Node::new("X", 0.0, f64::NEG_INFINITY)).is_none());

        // The existing B is kept with its edges
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.get_node("A").unwrap().weight_to("B"), Some(3.0));
        assert!(!g.contains("X"));
    }

    #[test]
    fn overflowing_weight_is_dropped() {
        let mut g = Graph::new();
        g.add_node(Node::new("A", -1e308, 0.0));
        g.add_node(Node::new("B", 1e308, 0.0));

        assert_eq!(g.add_edge("A", "B"), None);
        assert_eq!(g.edge_count(), 0);
    }

    proptest! {
        #[test]
        fn weights_stay_finite(coords in prop::collection::vec((any::<f64>(), any::<f64>()), 1..8)) {
            let mut g = Graph::new();
            for (i, (x, y)) in coords.iter().enumerate() {
                g.add_node(Node::new(i.to_string(), *x, *y));
            }
            for a in 0..coords.len() {
                for b in 0..coords.len() {
                    g.add_edge(&a.to_string(), &b.to_string());
                }
            }

            for node in g.nodes() {
                prop_assert!(node.is_valid());
                for (_, weight) in node.neighbors() {
                    prop_assert!(weight.is_finite() && weight >= 0.0);
                }
            }
        }
    }

    #[test]
    fn build_from_records() {
        let g = build_graph(
            ["b", "c", "a"].map(|id| NodeRecord {
                id: id.to_string(),
                x: 0.0,
                y: 0.0,
            }),
            vec![
                EdgeRecord::new("a", "b"),
                EdgeRecord {
                    source: None,
                    target: Some("c".to_string()),
                },
            ],
        );

        assert_eq!(g.node_ids(), vec!["a", "b", "c"]);
        assert_eq!(g.edge_count(), 1);
        assert!(g.contains("c"));
        assert!(!g.contains("d"));
        assert_eq!(g.all_nodes().len(), 3);
    }
}

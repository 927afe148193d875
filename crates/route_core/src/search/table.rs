//! Predecessor/distance table produced by a single-source search.
use rustc_hash::FxHashMap;

use crate::{
    constants::{NodeId, Weight},
    graph::Graph,
};

/// State of one node after a search.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEntry {
    /// The search never reached this node.
    Undiscovered,
    /// Best known previous hop and cumulative distance from the origin. Only
    /// the origin itself has no predecessor.
    Discovered {
        predecessor: Option<NodeId>,
        distance: Weight,
    },
}

/// Result of a single-source search, scoped to its origin. Covers every node
/// of the graph at the time of the search.
#[derive(Debug, Clone, PartialEq)]
pub struct PredecessorTable {
    origin: NodeId,
    entries: FxHashMap<NodeId, TableEntry>,
}

impl PredecessorTable {
    pub fn new(origin: impl Into<NodeId>, entries: FxHashMap<NodeId, TableEntry>) -> Self {
        PredecessorTable {
            origin: origin.into(),
            entries,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn get(&self, id: &str) -> Option<&TableEntry> {
        self.entries.get(id)
    }

    /// Distance from the origin, `None` if `id` was not discovered.
    pub fn distance(&self, id: &str) -> Option<Weight> {
        match self.entries.get(id)? {
            TableEntry::Discovered { distance, .. } => Some(*distance),
            TableEntry::Undiscovered => None,
        }
    }

    pub fn predecessor(&self, id: &str) -> Option<&str> {
        match self.entries.get(id)? {
            TableEntry::Discovered { predecessor, .. } => predecessor.as_deref(),
            TableEntry::Undiscovered => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TableEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    /// Number of nodes reachable from the origin, the origin included.
    pub fn reachable(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| matches!(entry, TableEntry::Discovered { .. }))
            .count()
    }
}

/// Tentative label of a node during a search.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Label {
    pub(crate) predecessor: Option<usize>,
    pub(crate) distance: Weight,
}

/// Dense view of a graph for the duration of one search. Indices follow the
/// ascending id order, which makes tie-breaking deterministic.
pub(crate) struct IndexedNodes<'a> {
    graph: &'a Graph,
    ids: Vec<&'a str>,
    index: FxHashMap<&'a str, usize>,
}

impl<'a> IndexedNodes<'a> {
    pub(crate) fn new(graph: &'a Graph) -> Self {
        let ids = graph.node_ids();
        let index = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        IndexedNodes { graph, ids, index }
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn neighbors(&self, idx: usize) -> impl Iterator<Item = (usize, Weight)> + '_ {
        self.graph
            .get_node(self.ids[idx])
            .into_iter()
            .flat_map(|node| node.neighbors())
            .filter_map(|(id, weight)| Some((self.index_of(id)?, weight)))
    }

    /// Relaxes all unvisited neighbors of `current`. `improved` is called for
    /// every neighbor that received a new label.
    pub(crate) fn relax(
        &self,
        labels: &mut [Option<Label>],
        visited: &[bool],
        current: usize,
        mut improved: impl FnMut(usize, Weight),
    ) {
        let Some(Label { distance, .. }) = labels[current] else {
            return;
        };

        for (neighbor, weight) in self.neighbors(current) {
            if visited[neighbor] {
                continue;
            }

            let candidate = distance + weight;
            let adopt = match labels[neighbor] {
                None => true,
                Some(label) => candidate < label.distance,
            };

            if adopt {
                labels[neighbor] = Some(Label {
                    predecessor: Some(current),
                    distance: candidate,
                });
                improved(neighbor, candidate);
            }
        }
    }

    pub(crate) fn to_table(&self, origin: usize, labels: &[Option<Label>]) -> PredecessorTable {
        let entries = self
            .ids
            .iter()
            .zip(labels)
            .map(|(id, label)| {
                let entry = match label {
                    None => TableEntry::Undiscovered,
                    Some(Label {
                        predecessor,
                        distance,
                    }) => TableEntry::Discovered {
                        predecessor: predecessor.map(|p| self.ids[p].to_owned()),
                        distance: *distance,
                    },
                };
                ((*id).to_owned(), entry)
            })
            .collect();

        PredecessorTable::new(self.ids[origin], entries)
    }
}

#[cfg(test)]
mod tests {
    use crate::util::test_graphs::generate_triangle;

    use super::*;

    #[test]
    fn indices_follow_id_order() {
        let g = generate_triangle();
        let nodes = IndexedNodes::new(&g);

        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes.index_of("A"), Some(0));
        assert_eq!(nodes.index_of("C"), Some(2));
        assert_eq!(nodes.index_of("Z"), None);

        let mut neighbors: Vec<_> = nodes.neighbors(0).collect();
        neighbors.sort_by_key(|(idx, _)| *idx);
        assert_eq!(neighbors, vec![(1, 3.0), (2, 5.0)]);
    }

    #[test]
    fn accessors() {
        let mut entries = FxHashMap::default();
        entries.insert(
            "A".to_string(),
            TableEntry::Discovered {
                predecessor: None,
                distance: 0.0,
            },
        );
        entries.insert(
            "B".to_string(),
            TableEntry::Discovered {
                predecessor: Some("A".to_string()),
                distance: 2.5,
            },
        );
        entries.insert("C".to_string(), TableEntry::Undiscovered);
        let table = PredecessorTable::new("A", entries);

        assert_eq!(table.origin(), "A");
        assert_eq!(table.len(), 3);
        assert_eq!(table.reachable(), 2);
        assert_eq!(table.distance("B"), Some(2.5));
        assert_eq!(table.predecessor("B"), Some("A"));
        assert_eq!(table.predecessor("A"), None);
        assert_eq!(table.distance("C"), None);
        assert_eq!(table.distance("Z"), None);
    }
}

use std::fmt;

use crate::constants::{NodeId, Weight};

/// Route from an origin to a destination, both included.
#[derive(Debug, PartialEq, Clone)]
pub struct ShortestPath {
    pub nodes: Vec<NodeId>,
    pub weight: Weight,
}

impl ShortestPath {
    pub fn new(nodes: Vec<NodeId>, weight: Weight) -> Self {
        ShortestPath { nodes, weight }
    }

    pub fn origin(&self) -> Option<&str> {
        self.nodes.first().map(String::as_str)
    }

    pub fn destination(&self) -> Option<&str> {
        self.nodes.last().map(String::as_str)
    }
}

/// `A > B > C ( 7 km )`
impl fmt::Display for ShortestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ( {} km )", self.nodes.join(" > "), self.weight)
    }
}

use crate::{constants::Weight, graph::Node};

/// Straight line distance between two nodes in the plane of the map.
pub fn euclidean(src: &Node, dst: &Node) -> Weight {
    (src.x - dst.x).hypot(src.y - dst.y)
}

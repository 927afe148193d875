use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::graph::{Graph, Node};

/// Builds a graph from `(id, x, y)` cities and `(a, b)` roads.
pub fn graph_from(nodes: &[(&str, f64, f64)], edges: &[(&str, &str)]) -> Graph {
    let mut g = Graph::with_capacity(nodes.len());
    for (id, x, y) in nodes {
        g.add_node(Node::new(*id, *x, *y));
    }
    for (a, b) in edges {
        g.add_edge(a, b);
    }
    g
}

pub fn generate_triangle() -> Graph {
    // B -4- C
    // |   /
    // 3  5
    // | /
    // A
    graph_from(
        &[("A", 0.0, 0.0), ("B", 0.0, 3.0), ("C", 4.0, 3.0)],
        &[("A", "B"), ("B", "C"), ("A", "C")],
    )
}

pub fn generate_complex_graph() -> Graph {
    graph_from(
        &[
            ("A", 6.0, 2.0),
            ("B", 3.0, 3.0),
            ("C", 4.0, 6.0),
            ("D", 2.0, 7.0),
            ("E", 3.0, 10.0),
            ("F", 2.0, 13.0),
            ("G", 7.0, 15.0),
            ("H", 5.0, 12.0),
            ("I", 7.0, 11.0),
            ("J", 5.0, 9.0),
            ("K", 7.0, 7.0),
        ],
        &[
            ("A", "B"),
            ("A", "C"),
            ("A", "K"),
            ("B", "D"),
            ("B", "C"),
            ("C", "D"),
            ("C", "J"),
            ("D", "J"),
            ("D", "E"),
            ("E", "J"),
            ("E", "F"),
            ("F", "H"),
            ("F", "G"),
            ("G", "H"),
            ("G", "I"),
            ("H", "I"),
            ("H", "J"),
            ("I", "J"),
            ("I", "K"),
            ("J", "K"),
        ],
    )
}

pub fn generate_disconnected_graph() -> Graph {
    // A - B - C     D - E     F
    graph_from(
        &[
            ("A", 0.0, 0.0),
            ("B", 1.0, 0.0),
            ("C", 2.0, 0.0),
            ("D", 0.0, 5.0),
            ("E", 3.0, 9.0),
            ("F", 9.0, 9.0),
        ],
        &[("A", "B"), ("B", "C"), ("D", "E")],
    )
}

/// Grid of `width * height` cities with slightly jittered coordinates.
/// Every road between horizontal or vertical neighbors exists with
/// probability `density`.
pub fn generate_raster_graph(width: usize, height: usize, density: f64, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = Graph::with_capacity(width * height);
    let id = |col: usize, row: usize| format!("{}_{}", col, row);

    for row in 0..height {
        for col in 0..width {
            g.add_node(Node::new(
                id(col, row),
                col as f64 + rng.gen_range(-0.25..0.25),
                row as f64 + rng.gen_range(-0.25..0.25),
            ));
        }
    }

    for row in 0..height {
        for col in 0..width {
            if col + 1 < width && rng.gen_bool(density) {
                g.add_edge(&id(col, row), &id(col + 1, row));
            }
            if row + 1 < height && rng.gen_bool(density) {
                g.add_edge(&id(col, row), &id(col, row + 1));
            }
        }
    }

    g
}

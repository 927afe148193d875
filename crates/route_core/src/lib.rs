//! Shortest routes between the cities of an undirected map.
//!
//! # Basic usage
//! ```
//! use route_core::prelude::*;
//!
//! let mut g = Graph::new();
//! g.add_node(Node::new("A", 0.0, 0.0));
//! g.add_node(Node::new("B", 0.0, 3.0));
//! g.add_node(Node::new("C", 4.0, 3.0));
//! g.add_edge("A", "B");
//! g.add_edge("B", "C");
//! g.add_edge("A", "C");
//!
//! // Predecessor/distance table of every city for the origin "A"
//! let table = shortest_paths(&g, "A").unwrap();
//!
//! let route = render_path(&table, "C").unwrap();
//! assert_eq!(route.to_string(), "A > C ( 5 km )");
//!```
pub mod constants;
pub mod error;
pub mod graph;
pub mod prelude;
pub mod search;
pub mod snapshot;
pub mod statistics;
pub mod util;

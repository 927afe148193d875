//! Sharing one map between concurrent queries.
//!
//! A [`Graph`] is never mutated once it is published. Queries work on an
//! [`Arc`] snapshot and a rebuilt map replaces the published instance as a
//! whole, so in-flight queries keep the map they started with.
use std::sync::{Arc, PoisonError, RwLock};

use log::info;

use crate::graph::Graph;

#[derive(Debug, Default)]
pub struct SharedGraph {
    current: RwLock<Arc<Graph>>,
}

impl SharedGraph {
    pub fn new(graph: Graph) -> Self {
        SharedGraph {
            current: RwLock::new(Arc::new(graph)),
        }
    }

    /// The currently published map.
    pub fn snapshot(&self) -> Arc<Graph> {
        // A poisoned lock still holds a complete map, swapping is a single store
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current)
    }

    /// Publishes `graph` and returns the previous map.
    pub fn replace(&self, graph: Graph) -> Arc<Graph> {
        info!("Publishing rebuilt map. {}", graph);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, Arc::new(graph))
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use crate::{
        search::find_route,
        util::test_graphs::{generate_disconnected_graph, generate_triangle},
    };

    use super::*;

    #[test]
    fn snapshot_survives_replace() {
        let shared = SharedGraph::new(generate_triangle());

        let before = shared.snapshot();
        let previous = shared.replace(generate_disconnected_graph());

        assert!(Arc::ptr_eq(&before, &previous));
        assert_eq!(before.node_count(), 3);
        assert_eq!(shared.snapshot().node_count(), 6);
    }

    #[test]
    fn concurrent_queries() {
        let shared = Arc::new(SharedGraph::new(generate_triangle()));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    let g = shared.snapshot();
                    find_route(&g, "A", "C").map(|sp| sp.weight)
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(5.0));
        }
    }
}

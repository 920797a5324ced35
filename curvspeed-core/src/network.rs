//! Undirected rail network keyed by node coordinates.
//!
//! Routed corridors reference network edges only through the coordinates of
//! their endpoints, in whatever direction the route happened to traverse
//! them. The lookup here hides that direction.

use geo::{Coord, LineString};
use hashbrown::HashMap;
use petgraph::graph::{NodeIndex, UnGraph};

/// Attributes of one network edge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkEdge {
    pub geometry: Option<LineString<f64>>,
    /// Edge length in miles
    pub length: Option<f64>,
    /// Declared line speed
    pub speed: Option<f64>,
    pub edge_type: Option<String>,
}

/// Exact bit pattern of a coordinate, with both zeros folded together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CoordKey(u64, u64);

impl From<Coord<f64>> for CoordKey {
    fn from(coord: Coord<f64>) -> Self {
        // -0.0 == 0.0 but their bits differ
        let bits = |v: f64| if v == 0.0 { 0.0_f64.to_bits() } else { v.to_bits() };
        CoordKey(bits(coord.x), bits(coord.y))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RailNetwork {
    graph: UnGraph<Coord<f64>, NetworkEdge>,
    nodes: HashMap<CoordKey, NodeIndex>,
}

impl RailNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn node(&mut self, coord: Coord<f64>) -> NodeIndex {
        *self
            .nodes
            .entry(CoordKey::from(coord))
            .or_insert_with(|| self.graph.add_node(coord))
    }

    /// Inserts the edge between `a` and `b`, replacing any edge already
    /// joining them in either direction.
    pub fn add_edge(&mut self, a: Coord<f64>, b: Coord<f64>, edge: NetworkEdge) {
        let a = self.node(a);
        let b = self.node(b);
        self.graph.update_edge(a, b, edge);
    }

    /// Edge joining `a` and `b`; `lookup(a, b)` and `lookup(b, a)` agree.
    pub fn lookup(&self, a: Coord<f64>, b: Coord<f64>) -> Option<&NetworkEdge> {
        let a = self.nodes.get(&CoordKey::from(a))?;
        let b = self.nodes.get(&CoordKey::from(b))?;
        let edge = self.graph.find_edge(*a, *b)?;
        self.graph.edge_weight(edge)
    }
}

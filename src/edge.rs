use std::fmt::{Debug, Display};

use crate::Node;

/// Edge weights (and distances/costs derived from them).
///
/// `Weight::INFINITY` is used throughout the crate to encode a missing edge
/// or an unreached node.
pub type Weight = f64;

/// An edge is defined by two nodes/endpoints.
/// Is is up to the graph whether an Edge is directed or not.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub Node, pub Node);

/// An edge together with its weight.
#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct WeightedEdge(pub Node, pub Node, pub Weight);

/// We limit the number of edges to `2^32 - 1`.
pub type NumEdges = u32;

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Display for WeightedEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{};{})", self.0, self.1, self.2)
    }
}

impl Debug for WeightedEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Normalizes the edge such that the endpoint with smaller value comes first
    pub fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    /// Returns true if the endpoint with smaller index comes first
    pub fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Reverses the edge by switching the endpoints
    pub fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }

    /// Attaches a weight to the edge
    pub fn with_weight(&self, weight: Weight) -> WeightedEdge {
        WeightedEdge(self.0, self.1, weight)
    }
}

impl WeightedEdge {
    /// Drops the weight
    pub fn edge(&self) -> Edge {
        Edge(self.0, self.1)
    }

    /// Returns the weight of the edge
    pub fn weight(&self) -> Weight {
        self.2
    }

    /// Reverses the edge by switching the endpoints, keeping the weight
    pub fn reverse(&self) -> Self {
        WeightedEdge(self.1, self.0, self.2)
    }
}

impl From<(Node, Node)> for Edge {
    fn from(value: (Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&(Node, Node)> for Edge {
    fn from(value: &(Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&Edge> for Edge {
    fn from(value: &Edge) -> Self {
        *value
    }
}

/// Unweighted edges get the unit weight, as in `link(u, v)` without an explicit weight.
impl From<Edge> for WeightedEdge {
    fn from(value: Edge) -> Self {
        value.with_weight(1.0)
    }
}

impl From<(Node, Node)> for WeightedEdge {
    fn from(value: (Node, Node)) -> Self {
        WeightedEdge(value.0, value.1, 1.0)
    }
}

impl From<(Node, Node, Weight)> for WeightedEdge {
    fn from(value: (Node, Node, Weight)) -> Self {
        WeightedEdge(value.0, value.1, value.2)
    }
}

impl From<&(Node, Node, Weight)> for WeightedEdge {
    fn from(value: &(Node, Node, Weight)) -> Self {
        WeightedEdge(value.0, value.1, value.2)
    }
}

impl From<&WeightedEdge> for WeightedEdge {
    fn from(value: &WeightedEdge) -> Self {
        *value
    }
}

/*!
# Graph Operations

The traits in this module form the graph interface every algorithm of this crate consumes:

| operation         | trait method                                  |
|-------------------|-----------------------------------------------|
| nodes             | [`GraphNodeOrder::vertices`]                  |
| neighbours        | [`AdjacencyList::neighbors_of`]               |
| weight            | [`WeightedAdjacency::weight`]                 |
| number of nodes   | [`GraphNodeOrder::number_of_nodes`]           |
| directed?         | [`GraphType::is_directed`]                    |
| link              | [`GraphEdgeEditing::link`]                    |

Algorithms only ever take `&G`: a graph is never mutated while an algorithm runs.
*/

use std::ops::Range;

use itertools::Itertools;

use crate::*;

/// Marker trait for the direction of a graph
pub trait GraphDir {
    /// *true* if edges are one-directional
    const DIRECTED: bool;
}

/// Marker for directed graphs
#[derive(Debug, Copy, Clone, Default)]
pub struct Directed;

/// Marker for undirected graphs
#[derive(Debug, Copy, Clone, Default)]
pub struct Undirected;

impl GraphDir for Directed {
    const DIRECTED: bool = true;
}

impl GraphDir for Undirected {
    const DIRECTED: bool = false;
}

/// Associates a graph with its direction
pub trait GraphType {
    type Dir: GraphDir;

    /// Returns *true* if the graph treats edges as one-directional
    fn is_directed() -> bool {
        Self::Dir::DIRECTED
    }

    /// Returns *true* if `(u, v)` and `(v, u)` denote the same edge
    fn is_undirected() -> bool {
        !Self::is_directed()
    }
}

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> impl Iterator<Item = Node> + '_ {
        self.vertices_range()
    }

    /// Returns the range `0..n`.
    /// In contrast to self.vertices(), the range does not borrow self.
    fn vertices_range(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns *true* if `u` is a node of the graph
    fn contains_node(&self, u: Node) -> bool {
        u < self.number_of_nodes()
    }

    /// Returns empty bitset with one entry per node
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.number_of_nodes())
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph.
    /// An undirected edge `{u, v}` is counted once.
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn is_edgeless(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Traits pertaining getters for neighborhoods & edges
pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Returns an iterator over the (open) neighborhood of a given vertex.
    /// For directed graphs these are the out-neighbors.
    /// ** Panics if `u >= n` **
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_;

    /// Returns the number of (outgoing) neighbors of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns an iterator over outgoing edges of a given vertex.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    /// ** Panics if `u >= n` **
    fn edges_of(&self, u: Node, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.neighbors_of(u)
            .map(move |v| Edge(u, v))
            .filter(move |e| !only_normalized || e.is_normalized())
    }

    /// Returns an iterator over all edges in the graph.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.vertices_range()
            .flat_map(move |u| self.edges_of(u, only_normalized))
    }

    /// Returns all edges in the graph in sorted order.
    fn ordered_edges(&self, only_normalized: bool) -> Vec<Edge> {
        self.edges(only_normalized).sorted().collect()
    }
}

/// Weighted access to the adjacency of a graph
pub trait WeightedAdjacency: AdjacencyList {
    /// Returns an iterator over `(neighbor, weight)` pairs of a given vertex.
    /// ** Panics if `u >= n` **
    fn weighted_neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, Weight)> + '_;

    /// Returns the weight of the edge `(u, v)`.
    ///
    /// By convention, `weight(u, u) = 0` and the weight of a missing edge is `Weight::INFINITY`.
    /// ** Panics if `u >= n` **
    fn weight(&self, u: Node, v: Node) -> Weight {
        if u == v {
            return 0.0;
        }

        self.weighted_neighbors_of(u)
            .find_map(|(x, w)| (x == v).then_some(w))
            .unwrap_or(Weight::INFINITY)
    }

    /// Returns an iterator over all outgoing weighted edges of a given vertex.
    fn weighted_edges_of(
        &self,
        u: Node,
        only_normalized: bool,
    ) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.weighted_neighbors_of(u)
            .filter(move |&(v, _)| !only_normalized || u <= v)
            .map(move |(v, w)| WeightedEdge(u, v, w))
    }

    /// Returns an iterator over all weighted edges in the graph.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn weighted_edges(&self, only_normalized: bool) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.vertices_range()
            .flat_map(move |u| self.weighted_edges_of(u, only_normalized))
    }
}

/// Trait to test existence of edges in a graph.
pub trait AdjacencyTest: GraphNodeOrder {
    /// Returns *true* if the egde (u,v) exists in the graph.
    /// ** Panics if `u >= n || v >= n` **
    fn has_edge(&self, u: Node, v: Node) -> bool;
}

/// Trait for creating a new empty graph
pub trait GraphNew {
    /// Creates an empty graph with n singleton nodes
    fn new(n: NumNodes) -> Self;
}

/// Provides functions to insert/delete weighted edges
pub trait GraphEdgeEditing: GraphNew {
    /// Links `u` to `v` with weight `weight` and returns *true* if the edge was present before
    /// (in which case only its weight is updated).
    ///
    /// Self-loops are ignored, and linking with an infinite weight removes the edge instead.
    /// ** Panics if `u >= n || v >= n` **
    fn try_link(&mut self, u: Node, v: Node, weight: Weight) -> bool;

    /// Links `u` to `v` with weight `weight`, see [`GraphEdgeEditing::try_link`].
    /// ** Panics if `u >= n || v >= n` **
    fn link(&mut self, u: Node, v: Node, weight: Weight) {
        self.try_link(u, v, weight);
    }

    /// Adds the edge *(u,v)* with unit weight.
    /// ** Panics if `u >= n || v >= n` **
    fn add_edge(&mut self, u: Node, v: Node) {
        self.link(u, v, 1.0);
    }

    /// Adds all edges in the collection
    fn add_edges(&mut self, edges: impl IntoIterator<Item = impl Into<WeightedEdge>>) {
        for WeightedEdge(u, v, w) in edges.into_iter().map(|e| e.into()) {
            self.link(u, v, w);
        }
    }

    /// Removes the edge *(u,v)* and returns *true* if it was present.
    /// ** Panics if `u >= n || v >= n` **
    fn try_unlink(&mut self, u: Node, v: Node) -> bool;
}

/// A super trait for creating a graph from scratch from a set of edges and a number of nodes
pub trait GraphFromScratch {
    /// Create a graph from a number of nodes and an iterator over (weighted) edges.
    /// Plain `Edge`s and `(u, v)` tuples get unit weight.
    fn from_edges(n: NumNodes, edges: impl IntoIterator<Item = impl Into<WeightedEdge>>) -> Self;
}

impl<G: GraphNew + GraphEdgeEditing> GraphFromScratch for G {
    fn from_edges(n: NumNodes, edges: impl IntoIterator<Item = impl Into<WeightedEdge>>) -> Self {
        let mut graph = Self::new(n);
        graph.add_edges(edges);
        graph
    }
}

/// Bundle of everything an algorithm in this crate needs from a graph
pub trait WeightedGraph:
    GraphType + GraphNodeOrder + GraphEdgeOrder + WeightedAdjacency + AdjacencyTest
{
}

impl<G> WeightedGraph for G where
    G: GraphType + GraphNodeOrder + GraphEdgeOrder + WeightedAdjacency + AdjacencyTest
{
}

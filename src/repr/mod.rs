/*!
# Graph Representations

Weighted adjacency-array graphs, generic over the storage of a single node's neighborhood:

- [`ArrNeighborhood`]: a plain `Vec<(Node, Weight)>`,
- [`SparseNeighborhood`]: a `SmallVec` that keeps small neighborhoods inline.

Both [`DirectedGraph`] and [`UndirectedGraph`] store at most one edge per ordered pair of nodes
and ignore self-loops, so that `weight(u, u) = 0` holds for every node.
*/

use crate::{ops::*, *};

mod directed;
mod neighborhood;
mod undirected;

pub mod digest;

pub use directed::*;
pub use neighborhood::*;
pub use undirected::*;

/// Trait for methods on the weighted Neighborhood of a specified Node
pub trait Neighborhood: Clone + Default {
    /// Returns the number of neighbors in the Neighborhood
    fn num_of_neighbors(&self) -> NumNodes;

    /// Returns an iterator over all `(neighbor, weight)` pairs in the Neighborhood
    fn weighted_neighbors(&self) -> impl Iterator<Item = (Node, Weight)> + '_;

    /// Returns an iterator over all neighbors in the Neighborhood
    fn neighbors(&self) -> impl Iterator<Item = Node> + '_ {
        self.weighted_neighbors().map(|(v, _)| v)
    }

    /// Returns the weight towards `v` if `v` is in the Neighborhood
    fn weight_of(&self, v: Node) -> Option<Weight> {
        self.weighted_neighbors()
            .find_map(|(u, w)| (u == v).then_some(w))
    }

    /// Returns *true* if `v` is in the Neighborhood
    fn has_neighbor(&self, v: Node) -> bool {
        self.neighbors().any(|u| u == v)
    }

    /// Adds `v` with weight `weight` or updates its weight if already present.
    /// Returns *true* if the node was in the Neighborhood before.
    fn try_set_neighbor(&mut self, v: Node, weight: Weight) -> bool;

    /// Tries to remove a neighbor from the Neighborhood.
    /// Returns *true* if the node was in the Neighborhood before.
    fn try_remove_neighbor(&mut self, v: Node) -> bool;

    /// Removes all neighbors in the Neighborhood
    fn clear(&mut self);
}

pub(crate) mod macros {
    macro_rules! impl_common_graph_ops {
        ($struct:ident<$generic:ident> => $nbs:ident, $directed:ident) => {
            impl<$generic: Neighborhood> GraphType for $struct<$generic> {
                type Dir = $directed;
            }

            impl<$generic: Neighborhood> GraphNodeOrder for $struct<$generic> {
                fn number_of_nodes(&self) -> NumNodes {
                    self.$nbs.len() as NumNodes
                }
            }

            impl<$generic: Neighborhood> GraphEdgeOrder for $struct<$generic> {
                fn number_of_edges(&self) -> NumEdges {
                    self.num_edges
                }
            }

            impl<$generic: Neighborhood> AdjacencyList for $struct<$generic> {
                fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
                    self.$nbs[u as usize].neighbors()
                }

                fn degree_of(&self, u: Node) -> NumNodes {
                    self.$nbs[u as usize].num_of_neighbors()
                }
            }

            impl<$generic: Neighborhood> WeightedAdjacency for $struct<$generic> {
                fn weighted_neighbors_of(
                    &self,
                    u: Node,
                ) -> impl Iterator<Item = (Node, Weight)> + '_ {
                    self.$nbs[u as usize].weighted_neighbors()
                }

                fn weight(&self, u: Node, v: Node) -> Weight {
                    if u == v {
                        return 0.0;
                    }
                    self.$nbs[u as usize]
                        .weight_of(v)
                        .unwrap_or(Weight::INFINITY)
                }
            }

            impl<$generic: Neighborhood> AdjacencyTest for $struct<$generic> {
                fn has_edge(&self, u: Node, v: Node) -> bool {
                    self.$nbs[u as usize].has_neighbor(v)
                }
            }

            impl<$generic: Neighborhood> GraphNew for $struct<$generic> {
                fn new(n: NumNodes) -> Self {
                    Self {
                        num_edges: 0,
                        $nbs: vec![$generic::default(); n as usize],
                    }
                }
            }
        };
    }

    pub(crate) use impl_common_graph_ops;
}

use crate::repr::macros::impl_common_graph_ops;

use super::*;

/// An undirected graph representation.
///
/// Every edge `{u, v}` is stored in the neighborhoods of both endpoints with the same weight.
#[derive(Clone, Debug)]
pub struct UndirectedGraph<Nbs: Neighborhood> {
    nbs: Vec<Nbs>,
    num_edges: NumEdges,
}

/// Representation using an Adjacency-Array
pub type AdjArrayUndir = UndirectedGraph<ArrNeighborhood>;

/// Representation using a sparse Adjacency-Array
pub type SparseAdjArrayUndir = UndirectedGraph<SparseNeighborhood>;

impl_common_graph_ops!(UndirectedGraph<Nbs> => nbs, Undirected);

impl<Nbs: Neighborhood> GraphEdgeEditing for UndirectedGraph<Nbs> {
    fn try_link(&mut self, u: Node, v: Node, weight: Weight) -> bool {
        if weight.is_infinite() && weight > 0.0 {
            return self.try_unlink(u, v);
        }

        if u == v {
            assert!(self.contains_node(u));
            return false;
        }

        let existed = self.nbs[u as usize].try_set_neighbor(v, weight);
        assert_eq!(existed, self.nbs[v as usize].try_set_neighbor(u, weight));
        if !existed {
            self.num_edges += 1;
        }
        existed
    }

    fn try_unlink(&mut self, u: Node, v: Node) -> bool {
        if self.nbs[u as usize].try_remove_neighbor(v) {
            assert!(self.nbs[v as usize].try_remove_neighbor(u));
            self.num_edges -= 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undirected_edges() {
        let mut graph = AdjArrayUndir::from_edges(4, [(0, 1, 1.0), (1, 2, 2.0), (2, 0, 3.0)]);

        assert!(AdjArrayUndir::is_undirected());
        assert_eq!(graph.number_of_edges(), 3);
        assert_eq!(graph.degree_of(0), 2);
        assert!(graph.has_edge(1, 0) && graph.has_edge(0, 1));
        assert_eq!(
            graph.ordered_edges(true),
            vec![Edge(0, 1), Edge(0, 2), Edge(1, 2)]
        );
        assert_eq!(graph.edges(false).count(), 6);

        // updating an edge from either side updates both directions
        assert!(graph.try_link(2, 1, 7.0));
        assert_eq!(graph.weight(1, 2), 7.0);
        assert_eq!(graph.number_of_edges(), 3);

        assert!(graph.try_unlink(1, 0));
        assert!(!graph.has_edge(0, 1));
        assert_eq!(graph.number_of_edges(), 2);
    }
}

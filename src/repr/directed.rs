/*!
# Directed Graph Representations

[`DirectedGraph`] stores the outgoing weighted neighborhood of every node.
Incoming neighborhoods are not stored; algorithms that need them (e.g. Kosaraju)
collect them themselves while traversing.
*/

use crate::repr::macros::impl_common_graph_ops;

use super::*;

/// A directed graph storing only **outgoing neighborhoods**.
#[derive(Clone, Debug)]
pub struct DirectedGraph<OutNbs>
where
    OutNbs: Neighborhood,
{
    out_nbs: Vec<OutNbs>,
    num_edges: NumEdges,
}

/// Directed graph using adjacency arrays (`Vec<(Node, Weight)>`).
pub type AdjArray = DirectedGraph<ArrNeighborhood>;

/// Directed graph using sparse adjacency arrays (`SmallVec<[(Node, Weight); 8]>`).
pub type SparseAdjArray = DirectedGraph<SparseNeighborhood>;

impl_common_graph_ops!(DirectedGraph<OutNbs> => out_nbs, Directed);

impl<OutNbs> GraphEdgeEditing for DirectedGraph<OutNbs>
where
    OutNbs: Neighborhood,
{
    fn try_link(&mut self, u: Node, v: Node, weight: Weight) -> bool {
        if weight.is_infinite() && weight > 0.0 {
            return self.try_unlink(u, v);
        }

        if u == v {
            assert!(self.contains_node(u));
            return false;
        }

        let existed = self.out_nbs[u as usize].try_set_neighbor(v, weight);
        if !existed {
            assert!(self.contains_node(v));
            self.num_edges += 1;
        }
        existed
    }

    fn try_unlink(&mut self, u: Node, v: Node) -> bool {
        if self.out_nbs[u as usize].try_remove_neighbor(v) {
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
    fn directed_edges() {
        let graph = AdjArray::from_edges(4, [(0, 1, 1.0), (1, 2, 2.0), (2, 0, 3.0), (0, 3, 0.5)]);

        assert!(AdjArray::is_directed());
        assert_eq!(graph.number_of_nodes(), 4);
        assert_eq!(graph.number_of_edges(), 4);
        assert_eq!(graph.degree_of(0), 2);
        assert_eq!(graph.degree_of(3), 0);
        assert!(graph.has_edge(2, 0));
        assert!(!graph.has_edge(0, 2));
        assert_eq!(
            graph.ordered_edges(false),
            vec![Edge(0, 1), Edge(0, 3), Edge(1, 2), Edge(2, 0)]
        );
    }

    #[test]
    fn neighbors_keep_link_order() {
        let mut graph = SparseAdjArray::new(5);
        graph.add_edges([(0, 4), (0, 2), (0, 3), (0, 1)]);
        assert!(graph.try_unlink(0, 2));
        assert!(!graph.try_unlink(0, 2));
        assert_eq!(graph.neighbors_of(0).collect::<Vec<_>>(), vec![4, 3, 1]);
        assert_eq!(graph.number_of_edges(), 3);
    }
}

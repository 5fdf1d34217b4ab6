/*!
# Node Orderings

DFS-based orderings of directed graphs:
- [`NodeOrdering::topological_sort`] returns the reverse post-order of a DFS forest, which is a
  topological order if the graph is acyclic.
- [`NodeOrdering::strongly_connected_components`] runs [`Kosaraju`]'s two-pass algorithm.

Both use explicit work stacks and therefore handle deep graphs without recursion.
*/

use super::*;

/// Explicit-stack DFS over all nodes that reports every node once all its successors are finished.
///
/// Calls `on_edge(u, v)` for every edge examined and `on_finish(u)` in post-order.
fn dfs_post_order<G, E, F>(graph: &G, mut on_edge: E, mut on_finish: F)
where
    G: AdjacencyList,
    E: FnMut(Node, Node),
    F: FnMut(Node),
{
    let mut visited = graph.vertex_bitset_unset();
    let mut stack = Vec::new();

    for root in graph.vertices() {
        if visited.set_bit(root) {
            continue;
        }
        stack.push((root, graph.neighbors_of(root)));

        while let Some((u, successors)) = stack.last_mut() {
            let u = *u;
            let next = successors.find(|&v| {
                on_edge(u, v);
                !visited.get_bit(v)
            });

            match next {
                Some(v) => {
                    visited.set_bit(v);
                    stack.push((v, graph.neighbors_of(v)));
                }
                None => {
                    stack.pop();
                    on_finish(u);
                }
            }
        }
    }
}

/// Strongly connected components of a directed graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StronglyConnectedComponents {
    components: Vec<Vec<Node>>,
    component_of: Vec<NumNodes>,
}

impl StronglyConnectedComponents {
    /// Returns all components; each node appears in exactly one of them
    pub fn components(&self) -> &[Vec<Node>] {
        &self.components
    }

    /// Returns the index of the component containing `u`
    pub fn component_of(&self, u: Node) -> NumNodes {
        self.component_of[u as usize]
    }

    /// Returns the number of components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns *true* if there are no components, i.e. the graph is empty
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns *true* if `u` and `v` belong to the same component
    pub fn are_connected(&self, u: Node, v: Node) -> bool {
        self.component_of(u) == self.component_of(v)
    }

    /// Consumes the result and returns the components
    pub fn into_components(self) -> Vec<Vec<Node>> {
        self.components
    }
}

/// Kosaraju's algorithm in `O(n + m)`.
///
/// The first pass runs a DFS forest recording the finishing order and the reverse adjacency of
/// every edge it examines. The second pass takes nodes in reverse finishing order and assigns
/// everything reachable over unused reverse edges to the component of that node.
pub struct Kosaraju<'a, G> {
    graph: &'a G,
    finished: Vec<Node>,
    reverse: Vec<Vec<Node>>,
}

impl<'a, G> Kosaraju<'a, G>
where
    G: AdjacencyList,
{
    /// Creates a new solver for `graph`
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            finished: Vec::with_capacity(graph.len()),
            reverse: vec![Vec::new(); graph.len()],
        }
    }

    fn record_finishing_order(&mut self) {
        let reverse = &mut self.reverse;
        let finished = &mut self.finished;
        dfs_post_order(
            self.graph,
            |u, v| reverse[v as usize].push(u),
            |u| finished.push(u),
        );
    }

    /// Computes the strongly connected components
    pub fn run(mut self) -> StronglyConnectedComponents {
        let n = self.graph.number_of_nodes();
        debug!(n, "running kosaraju");
        self.record_finishing_order();

        let mut component_of = vec![INVALID_NODE; n as usize];
        let mut components = Vec::new();
        let mut stack = Vec::new();

        while let Some(root) = self.finished.pop() {
            if component_of[root as usize] != INVALID_NODE {
                continue;
            }

            let id = components.len() as NumNodes;
            let mut component = vec![root];
            component_of[root as usize] = id;
            stack.push(root);

            while let Some(u) = stack.pop() {
                for v in self.reverse[u as usize].drain(..) {
                    if component_of[v as usize] == INVALID_NODE {
                        component_of[v as usize] = id;
                        component.push(v);
                        stack.push(v);
                    }
                }
            }

            trace!(id, size = component.len(), "found component");
            components.push(component);
        }

        debug!(components = components.len(), "kosaraju finished");
        StronglyConnectedComponents {
            components,
            component_of,
        }
    }
}

/// Orderings of directed graphs as methods on the graph itself
pub trait NodeOrdering: AdjacencyList + GraphType<Dir = Directed> + Sized {
    /// Returns all nodes in reverse DFS post-order.
    /// If the graph is acyclic, `u` precedes `v` for every edge `(u, v)`.
    /// On cyclic graphs the order is unspecified; use [`NodeOrdering::is_acyclic`] to check.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjArray::from_edges(4, [(2, 1), (1, 0), (3, 1)]);
    /// assert_eq!(g.topological_sort(), vec![3, 2, 1, 0]);
    /// ```
    fn topological_sort(&self) -> Vec<Node> {
        let mut order = Vec::with_capacity(self.len());
        dfs_post_order(self, |_, _| {}, |u| order.push(u));
        order.reverse();
        order
    }

    /// Returns *true* if the graph has no directed cycle, i.e. if the reverse post-order of
    /// [`NodeOrdering::topological_sort`] puts the tail of every edge before its head.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let mut g = AdjArray::from_edges(3, [(0, 1), (1, 2)]);
    /// assert!(g.is_acyclic());
    ///
    /// g.add_edge(2, 0);
    /// assert!(!g.is_acyclic());
    /// ```
    fn is_acyclic(&self) -> bool {
        let mut rank = vec![0; self.len()];
        for (i, u) in self.topological_sort().into_iter().enumerate() {
            rank[u as usize] = i;
        }
        self.edges(false).all(|Edge(u, v)| rank[u as usize] < rank[v as usize])
    }

    /// Partitions the nodes into strongly connected components using [`Kosaraju`].
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjArray::from_edges(4, [(0, 1), (1, 0), (1, 2), (2, 3), (3, 2)]);
    /// let sccs = g.strongly_connected_components();
    ///
    /// assert_eq!(sccs.len(), 2);
    /// assert!(sccs.are_connected(2, 3));
    /// assert!(!sccs.are_connected(1, 2));
    /// ```
    fn strongly_connected_components(&self) -> StronglyConnectedComponents {
        Kosaraju::new(self).run()
    }
}

impl<G> NodeOrdering for G where G: AdjacencyList + GraphType<Dir = Directed> + Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{gens::RandomGraph, testing::*};
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn topological_sort_of_random_dags() {
        let rng = &mut Pcg64Mcg::seed_from_u64(5);

        for _ in 0..50 {
            let n = rng.random_range(1..40);
            let graph = AdjArray::random_dag(rng, n, 0.2, 1.0, 9.0);
            let order = assert_read_only(&graph, |g| g.topological_sort());

            assert_eq!(
                order.iter().copied().sorted().collect_vec(),
                graph.vertices().collect_vec()
            );
            let mut rank = vec![0; n as usize];
            for (i, &u) in order.iter().enumerate() {
                rank[u as usize] = i;
            }
            for Edge(u, v) in graph.edges(false) {
                assert!(rank[u as usize] < rank[v as usize]);
            }
        }
    }

    #[test]
    fn topological_sort_terminates_on_cycles() {
        let graph = negative_cycle_scenario();
        assert_eq!(graph.topological_sort().len(), 3);
        assert!(!graph.is_acyclic());
    }

    #[test]
    fn acyclicity() {
        let mut graph = AdjArray::from_edges(7, [(2, 0), (1, 0), (0, 3), (0, 4), (0, 5), (3, 6)]);
        assert!(graph.is_acyclic());
        graph.add_edge(6, 2);
        assert!(!graph.is_acyclic());

        assert!(AdjArray::new(0).is_acyclic());
        let rng = &mut Pcg64Mcg::seed_from_u64(6);
        for _ in 0..20 {
            let n = rng.random_range(1..30);
            assert!(AdjArray::random_dag(rng, n, 0.3, 1.0, 9.0).is_acyclic());
        }
    }

    #[test]
    fn fixed_components() {
        // 0 -> 1 -> 2 -> 0, 2 -> 3, 3 <-> 4, 5 alone
        let graph = AdjArray::from_edges(6, [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 3)]);
        let sccs = graph.strongly_connected_components();

        let mut components = sccs
            .components()
            .iter()
            .map(|c| c.iter().copied().sorted().collect_vec())
            .collect_vec();
        components.sort();
        assert_eq!(components, vec![vec![0, 1, 2], vec![3, 4], vec![5]]);

        for (id, component) in sccs.components().iter().enumerate() {
            assert!(component.iter().all(|&u| sccs.component_of(u) == id as NumNodes));
        }
    }

    #[test]
    fn components_match_mutual_reachability() {
        for graph in random_weighted_graphs::<AdjArray>(11, 30, 25, 1.0, 1.0) {
            let sccs = assert_read_only(&graph, |g| g.strongly_connected_components());

            let total: usize = sccs.components().iter().map(|c| c.len()).sum();
            assert_eq!(total, graph.len());
            assert!(sccs.components().iter().all(|c| !c.is_empty()));

            let reachable = graph
                .vertices()
                .map(|u| {
                    let mut set = graph.vertex_bitset_unset();
                    for v in graph.bfs(u) {
                        set.set_bit(v);
                    }
                    set
                })
                .collect_vec();

            for u in graph.vertices() {
                for v in graph.vertices() {
                    let mutual =
                        reachable[u as usize].get_bit(v) && reachable[v as usize].get_bit(u);
                    assert_eq!(sccs.are_connected(u, v), mutual);
                }
            }
        }
    }

    #[test]
    fn empty_graph() {
        let graph = AdjArray::new(0);
        assert!(graph.topological_sort().is_empty());
        assert!(graph.strongly_connected_components().is_empty());
    }
}

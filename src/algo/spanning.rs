/*!
# Minimum Spanning Forests

[`MinSpanningForest`] computes a minimum spanning forest with Prim's algorithm driven by a
[`NodePriorityQueue`]. Every connected component gets its own minimum spanning tree, unless the
search is restricted to the tree of the start node with [`MinSpanningForest::single_tree`].

The algorithm is meant for undirected graphs. On directed graphs only out-edges are followed,
which does not in general yield a minimum arborescence.
*/

use super::*;

/// Tree edges, parents and roots of a spanning forest
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningForest {
    parents: Vec<Option<Node>>,
    edges: Vec<WeightedEdge>,
    roots: Vec<Node>,
    total_weight: Weight,
}

impl SpanningForest {
    fn new(n: NumNodes) -> Self {
        Self {
            parents: vec![None; n as usize],
            edges: Vec::new(),
            roots: Vec::new(),
            total_weight: 0.0,
        }
    }

    /// Returns the parent of `u`; roots and unreached nodes have none
    pub fn parent(&self, u: Node) -> Option<Node> {
        self.parents[u as usize]
    }

    /// Returns the parents of all nodes
    pub fn parents(&self) -> &[Option<Node>] {
        &self.parents
    }

    /// Returns the tree edges `(parent, child, weight)` in the order they were added
    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    /// Returns the root of every tree, in the order the trees were grown
    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    /// Returns the number of trees in the forest
    pub fn number_of_trees(&self) -> NumNodes {
        self.roots.len() as NumNodes
    }

    /// Returns the sum of all tree edge weights
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    /// Returns *true* if `u` is part of some tree of the forest
    pub fn is_reached(&self, u: Node) -> bool {
        self.parents[u as usize].is_some() || self.roots.contains(&u)
    }
}

/// Prim's algorithm for minimum spanning forests in `O((n + m) log n)`.
///
/// Nodes are dequeued in order of the cheapest edge connecting them to the current tree.
/// A dequeued node that was never reached starts a new tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinSpanningForest {
    start: Node,
    single_tree: bool,
}

impl MinSpanningForest {
    /// Creates a new solver growing the first tree from node `0`
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the node the first tree is grown from
    pub fn set_start(&mut self, start: Node) {
        self.start = start;
    }

    /// Sets the node the first tree is grown from
    pub fn start(mut self, start: Node) -> Self {
        self.set_start(start);
        self
    }

    /// If set, only the tree containing the start node is computed;
    /// all other nodes remain unreached
    pub fn set_single_tree(&mut self, single_tree: bool) {
        self.single_tree = single_tree;
    }

    /// If set, only the tree containing the start node is computed;
    /// all other nodes remain unreached
    pub fn single_tree(mut self, single_tree: bool) -> Self {
        self.set_single_tree(single_tree);
        self
    }

    /// Computes the spanning forest of `graph`
    pub fn run<G: WeightedAdjacency>(&self, graph: &G) -> Result<SpanningForest> {
        let n = graph.number_of_nodes();
        check_node(self.start, n)?;
        debug!(start = self.start, n, single_tree = self.single_tree, "running prim");

        let mut forest = SpanningForest::new(n);
        let mut queue = NodePriorityQueue::new(n);
        queue.enqueue(self.start, 0.0);
        for u in graph.vertices().filter(|&u| u != self.start) {
            queue.enqueue(u, Weight::INFINITY);
        }

        while let Some((u, priority)) = queue.dequeue() {
            match forest.parent(u) {
                Some(p) => {
                    forest.edges.push(WeightedEdge(p, u, priority));
                    forest.total_weight += priority;
                }
                None => {
                    if priority == Weight::INFINITY && self.single_tree {
                        break;
                    }
                    trace!(root = u, "growing new tree");
                    forest.roots.push(u);
                }
            }

            for (v, w) in graph.weighted_neighbors_of(u) {
                if queue.priority(v).is_some_and(|p| w < p) {
                    forest.parents[v as usize] = Some(u);
                    queue.update(v, w);
                }
            }
        }

        debug!(
            trees = forest.number_of_trees(),
            edges = forest.edges.len(),
            total_weight = forest.total_weight,
            "prim finished"
        );
        Ok(forest)
    }
}

/// Spanning forest algorithms as methods on the graph itself
pub trait SpanningTrees: WeightedAdjacency + Sized {
    /// Computes the minimum spanning tree of the component of `start`.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let graph = AdjArrayUndir::from_edges(
    ///     5,
    ///     [(0, 1, 4.0), (1, 2, 1.0), (0, 2, 2.0), (3, 4, 7.0)],
    /// );
    ///
    /// let tree = graph.prim(0).unwrap();
    /// assert_eq!(tree.total_weight(), 3.0);
    /// assert_eq!(tree.parent(1), Some(2));
    /// assert!(!tree.is_reached(3));
    /// ```
    fn prim(&self, start: Node) -> Result<SpanningForest> {
        MinSpanningForest::new()
            .start(start)
            .single_tree(true)
            .run(self)
    }

    /// Computes a minimum spanning forest with one tree per connected component.
    fn min_spanning_forest(&self) -> SpanningForest {
        if self.is_empty() {
            return SpanningForest::new(0);
        }

        match MinSpanningForest::new().run(self) {
            Ok(forest) => forest,
            Err(_) => unreachable!("node 0 exists in a non-empty graph"),
        }
    }
}

impl<G> SpanningTrees for G where G: WeightedAdjacency + Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{gens::RandomGraph, testing::*};
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    /// Kruskal's algorithm with a plain union-find, returns the forest weight
    fn kruskal_weight<G: WeightedAdjacency>(graph: &G) -> Weight {
        let mut parent: Vec<Node> = graph.vertices_range().collect();
        fn find(parent: &mut [Node], mut u: Node) -> Node {
            while parent[u as usize] != u {
                parent[u as usize] = parent[parent[u as usize] as usize];
                u = parent[u as usize];
            }
            u
        }

        graph
            .weighted_edges(true)
            .sorted_by(|a, b| a.weight().total_cmp(&b.weight()))
            .filter(|&WeightedEdge(u, v, _)| {
                let (ru, rv) = (find(&mut parent, u), find(&mut parent, v));
                parent[ru as usize] = rv;
                ru != rv
            })
            .map(|e| e.weight())
            .sum()
    }

    fn number_of_components<G: AdjacencyList>(graph: &G) -> NumNodes {
        let mut bfs = graph.bfs(0);
        let mut components = 1;
        loop {
            bfs.by_ref().for_each(|_| {});
            if !bfs.try_restart_at_unvisited() {
                break components;
            }
            components += 1;
        }
    }

    #[test]
    fn single_tree_ignores_other_components() {
        let graph = AdjArrayUndir::from_edges(
            6,
            [(0, 1, 3.0), (1, 2, 1.0), (0, 2, 1.0), (3, 4, 2.0), (4, 5, 2.0)],
        );

        let tree = graph.prim(0).unwrap();
        assert_eq!(tree.roots(), &[0]);
        assert_eq!(tree.total_weight(), 2.0);
        assert_eq!(tree.parents(), &[None, Some(2), Some(0), None, None, None]);

        let forest = graph.min_spanning_forest();
        assert_eq!(forest.roots(), &[0, 3]);
        assert_eq!(forest.total_weight(), 6.0);
        assert_eq!(forest.edges().len(), 4);
        assert!(graph.vertices().all(|u| forest.is_reached(u)));
    }

    #[test]
    fn matches_kruskal() {
        for graph in random_weighted_graphs::<AdjArrayUndir>(7, 40, 30, -5.0, 20.0) {
            let forest = assert_read_only(&graph, |g| g.min_spanning_forest());

            assert_eq!(forest.total_weight(), kruskal_weight(&graph));
            assert_eq!(forest.number_of_trees(), number_of_components(&graph));
            assert_eq!(
                forest.edges().len() as NumNodes,
                graph.number_of_nodes() - forest.number_of_trees()
            );

            for &WeightedEdge(p, u, w) in forest.edges() {
                assert_eq!(graph.weight(p, u), w);
                assert_eq!(forest.parent(u), Some(p));
            }
            assert!(forest.edges().iter().map(|e| e.1).all_unique());
        }
    }

    #[test]
    fn trees_are_their_own_spanning_tree() {
        let rng = &mut Pcg64Mcg::seed_from_u64(19);

        for _ in 0..30 {
            let n = rng.random_range(1..40);
            let graph = AdjArrayUndir::random_tree(rng, n, 1.0, 9.0);
            let start = rng.random_range(0..n);
            let tree = graph.prim(start).unwrap();

            assert_eq!(tree.roots(), &[start]);
            assert_eq!(
                tree.edges().iter().map(|e| e.edge().normalized()).sorted().collect_vec(),
                graph.ordered_edges(true)
            );
            assert_eq!(
                tree.total_weight(),
                graph.weighted_edges(true).map(|e| e.weight()).sum::<Weight>()
            );
        }
    }

    #[test]
    fn start_node() {
        let graph = AdjArrayUndir::from_edges(3, [(0, 1, 1.0), (1, 2, 5.0)]);
        let tree = MinSpanningForest::new().start(2).run(&graph).unwrap();
        assert_eq!(tree.roots(), &[2]);
        assert_eq!(tree.parent(1), Some(2));
        assert_eq!(tree.parent(0), Some(1));

        assert_eq!(
            MinSpanningForest::new().start(3).run(&graph),
            Err(GraphError::NodeOutOfRange { node: 3, n: 3 })
        );
        assert!(AdjArrayUndir::new(0).min_spanning_forest().roots().is_empty());
    }
}

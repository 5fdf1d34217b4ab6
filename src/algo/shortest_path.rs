/*!
# Shortest Paths

Single-source shortest paths via [`BellmanFord`] (arbitrary weights, negative cycle detection)
and [`Dijkstra`] (non-negative weights), both producing a [`ShortestPathTree`], and all-pairs
shortest paths via [`FloydWarshall`].

```
use wgraphs::{prelude::*, algo::*};

let graph = AdjArray::from_edges(3, [(0, 1, 4.0), (1, 2, -2.0), (0, 2, 3.0)]);

let tree = graph.bellman_ford(0).unwrap();
assert_eq!(tree.distances(), &[0.0, 4.0, 2.0]);
assert_eq!(tree.path_to(2), Some(vec![0, 1, 2]));

let all_pairs = graph.floyd_warshall();
assert_eq!(all_pairs.distance(0, 2), 2.0);
assert_eq!(all_pairs.distance(2, 0), Weight::INFINITY);
```
*/

use super::{traversal::path_from_parents, *};

/// Distances and predecessors of all nodes w.r.t. a single source.
///
/// Every node has an entry: unreachable nodes have distance `Weight::INFINITY` and no predecessor.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathTree {
    source: Node,
    distances: Vec<Weight>,
    predecessors: Vec<Option<Node>>,
}

impl ShortestPathTree {
    fn new(n: NumNodes, source: Node) -> Self {
        let mut distances = vec![Weight::INFINITY; n as usize];
        distances[source as usize] = 0.0;
        Self {
            source,
            distances,
            predecessors: vec![None; n as usize],
        }
    }

    /// Sets `dist(v) = dist` via predecessor `u`
    fn relax(&mut self, u: Node, v: Node, dist: Weight) {
        self.distances[v as usize] = dist;
        self.predecessors[v as usize] = Some(u);
    }

    /// Returns the source node
    pub fn source(&self) -> Node {
        self.source
    }

    /// Returns the length of a shortest path from the source to `u`
    /// (`Weight::INFINITY` if `u` is unreachable)
    pub fn distance(&self, u: Node) -> Weight {
        self.distances[u as usize]
    }

    /// Returns the distances of all nodes
    pub fn distances(&self) -> &[Weight] {
        &self.distances
    }

    /// Returns the predecessor of `u` on a shortest path from the source
    pub fn predecessor(&self, u: Node) -> Option<Node> {
        self.predecessors[u as usize]
    }

    /// Returns the predecessors of all nodes
    pub fn predecessors(&self) -> &[Option<Node>] {
        &self.predecessors
    }

    /// Returns *true* if `u` is reachable from the source
    pub fn is_reachable(&self, u: Node) -> bool {
        self.distances[u as usize] < Weight::INFINITY
    }

    /// Returns a shortest path `source -> .. -> u` (both included),
    /// or `None` if `u` is unreachable
    pub fn path_to(&self, u: Node) -> Option<Vec<Node>> {
        if !self.is_reachable(u) {
            return None;
        }
        path_from_parents(&self.predecessors, self.source, u)
    }

    /// Returns `(node, path, distance)` for every node of the graph, in node order
    pub fn routes(&self) -> impl Iterator<Item = (Node, Option<Vec<Node>>, Weight)> + '_ {
        (0..self.distances.len() as Node).map(|u| (u, self.path_to(u), self.distance(u)))
    }
}

/// Bellman-Ford single-source shortest paths.
///
/// Works with negative edge weights. If a negative cycle is reachable from the source,
/// [`GraphError::NegativeCycle`] is returned and no distances at all.
/// Runs in `O(n * m)`.
#[derive(Debug, Clone, Copy)]
pub struct BellmanFord {
    source: Node,
}

impl BellmanFord {
    /// Creates a new solver for paths starting at `source`
    pub fn new(source: Node) -> Self {
        Self { source }
    }

    /// Sets the source node
    pub fn set_source(&mut self, source: Node) {
        self.source = source;
    }

    /// Sets the source node
    pub fn source(mut self, source: Node) -> Self {
        self.set_source(source);
        self
    }

    /// Computes the shortest paths from the source in `graph`
    pub fn run<G: WeightedAdjacency>(&self, graph: &G) -> Result<ShortestPathTree> {
        check_node(self.source, graph.number_of_nodes())?;
        debug!(
            source = self.source,
            n = graph.number_of_nodes(),
            "running bellman-ford"
        );

        let mut tree = ShortestPathTree::new(graph.number_of_nodes(), self.source);

        for pass in 1..graph.number_of_nodes() {
            let mut relaxed = false;
            for WeightedEdge(u, v, w) in graph.weighted_edges(false) {
                let alt = tree.distance(u) + w;
                if alt < tree.distance(v) {
                    tree.relax(u, v, alt);
                    relaxed = true;
                }
            }

            trace!(pass, relaxed, "bellman-ford pass");
            if !relaxed {
                break;
            }
        }

        if let Some(WeightedEdge(from, to, _)) = graph
            .weighted_edges(false)
            .find(|e| tree.distance(e.0) + e.2 < tree.distance(e.1))
        {
            warn!(from, to, "negative cycle reachable from source {}", self.source);
            return Err(GraphError::NegativeCycle { from, to });
        }

        Ok(tree)
    }
}

/// Dijkstra single-source shortest paths using a [`NodePriorityQueue`].
///
/// Requires non-negative edge weights; this is not checked. With negative weights the
/// algorithm still terminates (every node is closed exactly once) but distances may be wrong.
/// Runs in `O((n + m) log n)`.
#[derive(Debug, Clone, Copy)]
pub struct Dijkstra {
    source: Node,
}

impl Dijkstra {
    /// Creates a new solver for paths starting at `source`
    pub fn new(source: Node) -> Self {
        Self { source }
    }

    /// Sets the source node
    pub fn set_source(&mut self, source: Node) {
        self.source = source;
    }

    /// Sets the source node
    pub fn source(mut self, source: Node) -> Self {
        self.set_source(source);
        self
    }

    /// Computes the shortest paths from the source in `graph`
    pub fn run<G: WeightedAdjacency>(&self, graph: &G) -> Result<ShortestPathTree> {
        let n = graph.number_of_nodes();
        check_node(self.source, n)?;
        debug!(source = self.source, n, "running dijkstra");

        let mut tree = ShortestPathTree::new(n, self.source);
        let mut queue = NodePriorityQueue::new(n);
        for u in graph.vertices() {
            queue.enqueue(u, tree.distance(u));
        }

        let mut closed: NumNodes = 0;
        while let Some((u, dist_u)) = queue.dequeue() {
            if dist_u == Weight::INFINITY {
                // all remaining nodes are unreachable
                break;
            }
            closed += 1;

            for (v, w) in graph.weighted_neighbors_of(u) {
                if !queue.contains(v) {
                    continue;
                }

                let alt = dist_u + w;
                if alt < tree.distance(v) {
                    tree.relax(u, v, alt);
                    queue.update(v, alt);
                }
            }
        }

        debug!(closed, "dijkstra finished");
        Ok(tree)
    }
}

/// Distances and next hops between all pairs of nodes, computed by [`FloydWarshall`]
#[derive(Debug, Clone, PartialEq)]
pub struct AllPairsShortestPaths {
    n: NumNodes,
    distances: Vec<Weight>,
    next_hops: Vec<Node>,
}

impl AllPairsShortestPaths {
    fn index(&self, u: Node, v: Node) -> usize {
        u as usize * self.n as usize + v as usize
    }

    /// Returns the number of nodes
    pub fn number_of_nodes(&self) -> NumNodes {
        self.n
    }

    /// Returns the length of a shortest path from `u` to `v` (`Weight::INFINITY` if there is none)
    pub fn distance(&self, u: Node, v: Node) -> Weight {
        self.distances[self.index(u, v)]
    }

    /// Returns the distances from `u` to all nodes
    pub fn distances_from(&self, u: Node) -> &[Weight] {
        let start = self.index(u, 0);
        &self.distances[start..start + self.n as usize]
    }

    /// Returns *true* if some node lies on a cycle of negative weight
    pub fn has_negative_cycle(&self) -> bool {
        (0..self.n).any(|u| self.distance(u, u) < 0.0)
    }

    /// Returns a shortest path `u -> .. -> v` (both included),
    /// or `None` if `v` is unreachable from `u`.
    ///
    /// If the graph contains a negative cycle, paths through it are not well-defined
    /// and `None` is returned for them as well.
    pub fn path(&self, u: Node, v: Node) -> Option<Vec<Node>> {
        if self.distance(u, v) == Weight::INFINITY {
            return None;
        }

        let mut path = vec![u];
        let mut x = u;
        while x != v {
            x = self.next_hops[self.index(x, v)];
            if x == INVALID_NODE || path.len() > self.n as usize {
                return None;
            }
            path.push(x);
        }
        Some(path)
    }
}

/// Floyd-Warshall all-pairs shortest paths in `O(n^3)` time and `O(n^2)` memory.
///
/// Negative edge weights are allowed. Negative cycles are not reported as an error but
/// can be queried with [`AllPairsShortestPaths::has_negative_cycle`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FloydWarshall;

impl FloydWarshall {
    /// Creates a new solver
    pub fn new() -> Self {
        Self
    }

    /// Computes shortest paths between all pairs of nodes in `graph`
    pub fn run<G: WeightedAdjacency>(&self, graph: &G) -> AllPairsShortestPaths {
        let n = graph.number_of_nodes();
        debug!(n, "running floyd-warshall");

        let mut apsp = AllPairsShortestPaths {
            n,
            distances: vec![Weight::INFINITY; n as usize * n as usize],
            next_hops: vec![INVALID_NODE; n as usize * n as usize],
        };

        for u in graph.vertices() {
            let idx = apsp.index(u, u);
            apsp.distances[idx] = 0.0;
            apsp.next_hops[idx] = u;
        }
        for WeightedEdge(u, v, w) in graph.weighted_edges(false) {
            let idx = apsp.index(u, v);
            apsp.distances[idx] = w;
            apsp.next_hops[idx] = v;
        }

        for k in 0..n {
            for i in 0..n {
                let dist_ik = apsp.distance(i, k);
                if dist_ik == Weight::INFINITY {
                    continue;
                }
                let hop_ik = apsp.next_hops[apsp.index(i, k)];

                for j in 0..n {
                    let alt = dist_ik + apsp.distance(k, j);
                    let idx = apsp.index(i, j);
                    if alt < apsp.distances[idx] {
                        apsp.distances[idx] = alt;
                        apsp.next_hops[idx] = hop_ik;
                    }
                }
            }
            trace!(k, "floyd-warshall round");
        }

        if apsp.has_negative_cycle() {
            debug!("floyd-warshall found a negative cycle");
        }
        apsp
    }
}

/// Shortest path algorithms as methods on the graph itself
pub trait ShortestPaths: WeightedAdjacency + Sized {
    /// Runs [`BellmanFord`] from `source`.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*, error::GraphError};
    ///
    /// let graph = AdjArray::from_edges(3, [(0, 1, 1.0), (1, 2, -1.0), (2, 0, -1.0)]);
    /// assert!(matches!(graph.bellman_ford(0), Err(GraphError::NegativeCycle { .. })));
    /// ```
    fn bellman_ford(&self, source: Node) -> Result<ShortestPathTree> {
        BellmanFord::new(source).run(self)
    }

    /// Runs [`Dijkstra`] from `source`; requires non-negative weights.
    fn dijkstra(&self, source: Node) -> Result<ShortestPathTree> {
        Dijkstra::new(source).run(self)
    }

    /// Runs [`FloydWarshall`] on the whole graph.
    fn floyd_warshall(&self) -> AllPairsShortestPaths {
        FloydWarshall::new().run(self)
    }
}

impl<G> ShortestPaths for G where G: WeightedAdjacency + Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{gens::RandomGraph, testing::*};
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};

    fn path_cost<G: WeightedAdjacency>(graph: &G, path: &[Node]) -> Weight {
        path.iter()
            .tuple_windows()
            .map(|(&u, &v)| graph.weight(u, v))
            .sum()
    }

    #[test]
    fn dijkstra_scenario_distances() {
        let graph = dijkstra_scenario();
        let tree = graph.dijkstra(0).unwrap();

        assert_eq!(tree.distances(), &[0.0, 4.0, 3.0, 7.0]);
        assert_eq!(tree.predecessors(), &[None, Some(2), Some(0), Some(2)]);
        assert_eq!(tree.path_to(1), Some(vec![0, 2, 1]));
        assert_eq!(tree.path_to(3), Some(vec![0, 2, 3]));
        assert_eq!(tree.path_to(0), Some(vec![0]));

        assert_eq!(graph.bellman_ford(0).unwrap(), tree);
    }

    #[test]
    fn negative_cycle_is_an_error() {
        let graph = negative_cycle_scenario();
        for source in graph.vertices() {
            assert!(matches!(
                graph.bellman_ford(source),
                Err(GraphError::NegativeCycle { .. })
            ));
        }
        assert!(graph.floyd_warshall().has_negative_cycle());

        // still terminates
        assert_eq!(graph.dijkstra(0).unwrap().distance(0), 0.0);
    }

    #[test]
    fn unreachable_nodes_have_no_path() {
        let graph = AdjArray::from_edges(4, [(0, 1, 2.0), (2, 3, 1.0)]);

        for tree in [graph.dijkstra(0).unwrap(), graph.bellman_ford(0).unwrap()] {
            assert_eq!(tree.distance(2), Weight::INFINITY);
            assert_eq!(tree.predecessor(2), None);
            assert!(!tree.is_reachable(3));
            assert_eq!(tree.path_to(3), None);

            let routes = tree.routes().collect_vec();
            assert_eq!(routes.len(), 4);
            assert_eq!(routes[1], (1, Some(vec![0, 1]), 2.0));
            assert_eq!(routes[3], (3, None, Weight::INFINITY));
        }

        let apsp = graph.floyd_warshall();
        assert_eq!(apsp.path(0, 3), None);
        assert_eq!(apsp.path(2, 3), Some(vec![2, 3]));
        assert_eq!(apsp.path(1, 1), Some(vec![1]));
    }

    #[test]
    fn source_out_of_range() {
        let graph = AdjArray::new(3);
        assert_eq!(
            graph.dijkstra(3),
            Err(GraphError::NodeOutOfRange { node: 3, n: 3 })
        );
        assert!(graph.bellman_ford(7).is_err());
    }

    #[test]
    fn bellman_ford_agrees_with_dijkstra() {
        for graph in random_weighted_graphs::<AdjArray>(1, 50, 40, 0.0, 20.0) {
            check_single_source_agreement(&graph);
        }
        for graph in random_weighted_graphs::<AdjArrayUndir>(2, 50, 40, 0.0, 20.0) {
            check_single_source_agreement(&graph);
        }
    }

    fn check_single_source_agreement<G: WeightedGraph>(graph: &G) {
        for source in graph.vertices().take(5) {
            let dijkstra = assert_read_only(graph, |g| g.dijkstra(source).unwrap());
            let bellman_ford = assert_read_only(graph, |g| g.bellman_ford(source).unwrap());

            assert_eq!(dijkstra.distances(), bellman_ford.distances());

            for u in graph.vertices() {
                match (dijkstra.path_to(u), bellman_ford.path_to(u)) {
                    (Some(p1), Some(p2)) => {
                        assert_eq!(path_cost(graph, &p1), dijkstra.distance(u));
                        assert_eq!(path_cost(graph, &p2), dijkstra.distance(u));
                        assert_eq!(p1.first(), Some(&source));
                        assert_eq!(p1.last(), Some(&u));
                    }
                    (None, None) => assert_eq!(dijkstra.distance(u), Weight::INFINITY),
                    _ => panic!("reachability of {u} differs"),
                }
            }
        }
    }

    #[test]
    fn floyd_warshall_agrees_with_single_source() {
        for graph in random_weighted_graphs::<AdjArray>(3, 30, 25, 0.0, 20.0) {
            check_all_pairs_agreement(&graph);
        }
        for graph in random_weighted_graphs::<AdjArrayUndir>(8, 30, 25, 0.0, 20.0) {
            check_all_pairs_agreement(&graph);

            let apsp = graph.floyd_warshall();
            for (u, v) in graph.vertices().cartesian_product(graph.vertices_range()) {
                assert_eq!(apsp.distance(u, v), apsp.distance(v, u));
            }
        }
    }

    fn check_all_pairs_agreement<G: WeightedGraph>(graph: &G) {
        let apsp = assert_read_only(graph, |g| g.floyd_warshall());
        assert!(!apsp.has_negative_cycle());

        for u in graph.vertices() {
            let tree = graph.dijkstra(u).unwrap();
            assert_eq!(apsp.distances_from(u), tree.distances());

            for v in graph.vertices() {
                if let Some(path) = apsp.path(u, v) {
                    assert_eq!(path_cost(graph, &path), apsp.distance(u, v));
                } else {
                    assert_eq!(apsp.distance(u, v), Weight::INFINITY);
                }
            }
        }
    }

    #[test]
    fn negative_weights_without_cycles() {
        let rng = &mut rand_pcg::Pcg64Mcg::seed_from_u64(4);

        for _ in 0..30 {
            let n = rng.random_range(1..30);
            let graph = AdjArray::random_dag(rng, n, 0.3, -10.0, 10.0);
            let apsp = graph.floyd_warshall();
            assert!(!apsp.has_negative_cycle());

            for u in graph.vertices() {
                let tree = graph.bellman_ford(u).unwrap();
                assert_eq!(apsp.distances_from(u), tree.distances());
            }
        }
    }
}

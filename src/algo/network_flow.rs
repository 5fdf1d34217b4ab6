/*!
# Maximum Flow

This module computes **maximum `s`-`t` flows** where edge weights are interpreted as capacities.

- [`ResidualNetwork`] stores capacities and the current (skew-symmetric) flow and exposes the
  residual arcs through [`AdjacencyList`], so that the traversal iterators of this crate can
  search it directly.
- [`EdmondsKarp`] repeatedly searches a shortest augmenting path with BFS and augments along it.
  It is an iterator over the augmenting paths and their bottleneck capacities.
- [`MaxFlow`] is the final result: flow value, flow on every edge of the graph and a minimum cut.

Undirected edges are treated as two opposite arcs of the same capacity. Negative capacities are
treated as `0`.

```
use wgraphs::{prelude::*, algo::*};

let graph = AdjArray::from_edges(
    4,
    [(0, 1, 3.0), (0, 2, 2.0), (1, 3, 2.0), (2, 3, 3.0), (1, 2, 1.0)],
);

let flow = graph.max_flow(0, 3).unwrap();
assert_eq!(flow.value(), 5.0);
assert_eq!(flow.cut_capacity(), 5.0);
assert_eq!(flow.source_side(), &[0]);
```
*/

use fxhash::FxHashMap;
use itertools::Itertools;

use super::*;

/// Capacities and flow of a network.
///
/// The flow is stored skew-symmetric, i.e. `flow(u, v) = -flow(v, u)`, so the residual capacity
/// of `(u, v)` is `capacity(u, v) - flow(u, v)` for graph arcs and reverse arcs alike.
#[derive(Debug, Clone)]
pub struct ResidualNetwork {
    capacities: FxHashMap<Edge, Weight>,
    flows: FxHashMap<Edge, Weight>,
    arcs: Vec<Vec<Node>>,
}

impl ResidualNetwork {
    /// Creates a network with zero flow whose capacities are the edge weights of `graph`
    pub fn new<G: WeightedAdjacency>(graph: &G) -> Self {
        let mut capacities = FxHashMap::default();
        let mut arcs = vec![Vec::new(); graph.len()];

        for WeightedEdge(u, v, w) in graph.weighted_edges(false) {
            capacities.insert(Edge(u, v), w.max(0.0));
            arcs[u as usize].push(v);
            arcs[v as usize].push(u);
        }

        for nbs in &mut arcs {
            nbs.sort_unstable();
            nbs.dedup();
        }

        Self {
            capacities,
            flows: FxHashMap::default(),
            arcs,
        }
    }

    /// Returns the capacity of `(u, v)` (`0` if there is no such edge)
    pub fn capacity(&self, u: Node, v: Node) -> Weight {
        self.capacities.get(&Edge(u, v)).copied().unwrap_or(0.0)
    }

    /// Returns the net flow from `u` to `v`
    pub fn flow(&self, u: Node, v: Node) -> Weight {
        self.flows.get(&Edge(u, v)).copied().unwrap_or(0.0)
    }

    /// Returns the remaining capacity of `(u, v)`
    pub fn residual(&self, u: Node, v: Node) -> Weight {
        self.capacity(u, v) - self.flow(u, v)
    }

    /// Pushes `amount` additional units from `u` to `v`
    fn push(&mut self, u: Node, v: Node, amount: Weight) {
        *self.flows.entry(Edge(u, v)).or_insert(0.0) += amount;
        *self.flows.entry(Edge(v, u)).or_insert(0.0) -= amount;
    }

    /// Returns the net flow leaving `u`
    pub fn excess(&self, u: Node) -> Weight {
        self.arcs[u as usize].iter().map(|&v| self.flow(u, v)).sum()
    }
}

impl GraphNodeOrder for ResidualNetwork {
    fn number_of_nodes(&self) -> NumNodes {
        self.arcs.len() as NumNodes
    }
}

impl AdjacencyList for ResidualNetwork {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.arcs[u as usize]
            .iter()
            .copied()
            .filter(move |&v| self.residual(u, v) > 0.0)
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.neighbors_of(u).count() as NumNodes
    }
}

/// Edmonds-Karp maximum flow in `O(n * m^2)`.
///
/// Every call to [`Iterator::next`] searches a shortest augmenting path in the residual network
/// and pushes its bottleneck capacity along the path (and only along the path). The path
/// `source -> .. -> sink` and the bottleneck are returned. Once no augmenting path is left,
/// the flow is maximum.
pub struct EdmondsKarp {
    network: ResidualNetwork,
    predecessor: Vec<Node>,
    source: Node,
    sink: Node,
    value: Weight,
}

impl EdmondsKarp {
    /// Creates a new solver for `source`-`sink` flows in `graph`
    pub fn new<G: WeightedAdjacency>(graph: &G, source: Node, sink: Node) -> Result<Self> {
        check_node(source, graph.number_of_nodes())?;
        check_node(sink, graph.number_of_nodes())?;
        debug!(source, sink, n = graph.number_of_nodes(), "running edmonds-karp");

        Ok(Self {
            network: ResidualNetwork::new(graph),
            predecessor: graph.vertices_range().collect(),
            source,
            sink,
            value: 0.0,
        })
    }

    /// Returns the value of the flow pushed so far
    pub fn value(&self) -> Weight {
        self.value
    }

    /// Returns the current residual network
    pub fn network(&self) -> &ResidualNetwork {
        &self.network
    }

    /// Searches an augmenting path and stores the BFS tree in `self.predecessor`.
    /// Returns *true* if the sink was reached.
    fn bfs(&mut self) -> bool {
        let mut bfs = self.network.bfs_with_predecessor(self.source);
        bfs.set_stop_at(self.sink);
        bfs.parent_array_into(self.predecessor.as_mut_slice());
        bfs.did_visit_node(self.sink)
    }

    /// Runs the algorithm to completion and returns the maximum flow
    pub fn into_max_flow(mut self) -> MaxFlow {
        let paths = self.by_ref().count();

        let mut source_side = self.network.bfs(self.source).collect_vec();
        source_side.sort_unstable();

        let mut is_source_side = self.network.vertex_bitset_unset();
        for &u in &source_side {
            is_source_side.set_bit(u);
        }

        let cut_capacity = self
            .network
            .capacities
            .iter()
            .filter(|(e, _)| is_source_side.get_bit(e.0) && !is_source_side.get_bit(e.1))
            .map(|(_, &c)| c)
            .sum();

        let flows = self
            .network
            .capacities
            .keys()
            .map(|&e| (e, self.network.flow(e.0, e.1).max(0.0)))
            .collect();

        debug!(value = self.value, paths, "edmonds-karp finished");
        MaxFlow {
            source: self.source,
            sink: self.sink,
            value: self.value,
            flows,
            source_side,
            cut_capacity,
        }
    }
}

impl Iterator for EdmondsKarp {
    type Item = (Vec<Node>, Weight);

    fn next(&mut self) -> Option<Self::Item> {
        if self.source == self.sink || !self.bfs() {
            return None;
        }

        let mut path = vec![self.sink];
        let mut u = self.sink;
        while u != self.source {
            u = self.predecessor[u as usize];
            path.push(u);
        }
        path.reverse();

        let bottleneck = path
            .iter()
            .tuple_windows()
            .map(|(&u, &v)| self.network.residual(u, v))
            .fold(Weight::INFINITY, Weight::min);

        for (&u, &v) in path.iter().tuple_windows() {
            self.network.push(u, v, bottleneck);
        }
        self.value += bottleneck;

        trace!(len = path.len(), bottleneck, value = self.value, "augmented flow");
        Some((path, bottleneck))
    }
}

/// A maximum flow together with a minimum cut
#[derive(Debug, Clone, PartialEq)]
pub struct MaxFlow {
    source: Node,
    sink: Node,
    value: Weight,
    flows: FxHashMap<Edge, Weight>,
    source_side: Vec<Node>,
    cut_capacity: Weight,
}

impl MaxFlow {
    /// Returns the source of the flow
    pub fn source(&self) -> Node {
        self.source
    }

    /// Returns the sink of the flow
    pub fn sink(&self) -> Node {
        self.sink
    }

    /// Returns the total amount of flow from source to sink
    pub fn value(&self) -> Weight {
        self.value
    }

    /// Returns the flow on edge `(u, v)` of the graph (`0` if it is not an edge)
    pub fn flow(&self, u: Node, v: Node) -> Weight {
        self.flows.get(&Edge(u, v)).copied().unwrap_or(0.0)
    }

    /// Returns the flow of every edge of the graph.
    /// For undirected graphs both directions of an edge are present.
    pub fn flows(&self) -> &FxHashMap<Edge, Weight> {
        &self.flows
    }

    /// Returns the sorted nodes reachable from the source in the final residual network.
    /// The edges leaving this set form a minimum cut.
    pub fn source_side(&self) -> &[Node] {
        &self.source_side
    }

    /// Returns the total capacity of all edges leaving [`MaxFlow::source_side`]
    pub fn cut_capacity(&self) -> Weight {
        self.cut_capacity
    }
}

/// Flow algorithms as methods on the graph itself
pub trait NetworkFlow: WeightedAdjacency + Sized {
    /// Computes a maximum `source`-`sink` flow with [`EdmondsKarp`]
    fn max_flow(&self, source: Node, sink: Node) -> Result<MaxFlow> {
        Ok(EdmondsKarp::new(self, source, sink)?.into_max_flow())
    }

    /// Returns an [`EdmondsKarp`] iterator over the augmenting paths.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let graph = AdjArray::from_edges(3, [(0, 1, 2.0), (1, 2, 1.0)]);
    /// let paths: Vec<_> = graph.augmenting_paths(0, 2).unwrap().collect();
    /// assert_eq!(paths, vec![(vec![0, 1, 2], 1.0)]);
    /// ```
    fn augmenting_paths(&self, source: Node, sink: Node) -> Result<EdmondsKarp> {
        EdmondsKarp::new(self, source, sink)
    }
}

impl<G> NetworkFlow for G where G: WeightedAdjacency + Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    fn assert_valid_flow<G: WeightedAdjacency>(graph: &G, flow: &MaxFlow) {
        for WeightedEdge(u, v, c) in graph.weighted_edges(false) {
            let f = flow.flow(u, v);
            assert!(f >= 0.0);
            assert!(f <= c.max(0.0));
        }

        for u in graph.vertices() {
            let out: Weight = graph.neighbors_of(u).map(|v| flow.flow(u, v)).sum();
            let into: Weight = graph
                .vertices()
                .filter(|&v| graph.weight(v, u) < Weight::INFINITY && v != u)
                .map(|v| flow.flow(v, u))
                .sum();

            if u == flow.source() {
                assert_eq!(out - into, flow.value());
            } else if u == flow.sink() {
                assert_eq!(into - out, flow.value());
            } else {
                assert_eq!(out, into);
            }
        }
    }

    #[test]
    fn flow_scenario_value() {
        let graph = flow_scenario();
        let flow = assert_read_only(&graph, |g| g.max_flow(0, 5)).unwrap();

        assert_eq!(flow.value(), 23.0);
        assert_eq!(flow.cut_capacity(), 23.0);
        assert_eq!(flow.flows().len(), graph.number_of_edges() as usize);
        assert!(flow.source_side().contains(&0));
        assert!(!flow.source_side().contains(&5));
        assert_valid_flow(&graph, &flow);
    }

    #[test]
    fn augmenting_paths_sum_up() {
        let graph = flow_scenario();
        let mut ek = graph.augmenting_paths(0, 5).unwrap();

        let mut total = 0.0;
        let mut last_len = 0;
        for (path, bottleneck) in ek.by_ref() {
            assert_eq!(path.first(), Some(&0));
            assert_eq!(path.last(), Some(&5));
            assert!(bottleneck > 0.0);
            assert!(path.len() >= last_len);
            last_len = path.len();
            total += bottleneck;
        }

        assert_eq!(total, 23.0);
        assert_eq!(ek.value(), 23.0);
        assert_eq!(ek.network().excess(0), 23.0);
        assert_eq!(ek.network().excess(5), -23.0);
    }

    #[test]
    fn only_path_edges_carry_flow() {
        // 0 -> 1 -> 3 is the only s-t path; 0 -> 2 and 3 -> 0 are never on an augmenting path
        let graph = AdjArray::from_edges(
            4,
            [(0, 1, 4.0), (1, 3, 2.0), (0, 2, 9.0), (3, 0, 5.0)],
        );
        let flow = graph.max_flow(0, 3).unwrap();

        assert_eq!(flow.value(), 2.0);
        assert_eq!(flow.flow(0, 1), 2.0);
        assert_eq!(flow.flow(1, 3), 2.0);
        assert_eq!(flow.flow(0, 2), 0.0);
        assert_eq!(flow.flow(3, 0), 0.0);
        assert_eq!(flow.flows().len(), 4);
        assert_eq!(flow.source_side(), &[0, 1, 2]);
    }

    #[test]
    fn random_flows_are_valid() {
        for graph in random_weighted_graphs::<AdjArray>(19, 40, 20, 0.0, 10.0) {
            let n = graph.number_of_nodes();
            let (s, t) = (0, n - 1);
            let flow = assert_read_only(&graph, |g| g.max_flow(s, t)).unwrap();

            if s == t {
                assert_eq!(flow.value(), 0.0);
                continue;
            }

            assert_valid_flow(&graph, &flow);
            assert_eq!(flow.value(), flow.cut_capacity());
        }
    }

    #[test]
    fn undirected_network() {
        // a square with a diagonal, every edge usable in both directions
        let graph = AdjArrayUndir::from_edges(
            4,
            [(0, 1, 3.0), (1, 3, 2.0), (0, 2, 1.0), (2, 3, 4.0), (1, 2, 5.0)],
        );
        let flow = graph.max_flow(0, 3).unwrap();

        assert_eq!(flow.value(), 4.0);
        assert_eq!(flow.cut_capacity(), 4.0);
        assert_eq!(flow.flows().len(), 10);
        for WeightedEdge(u, v, c) in graph.weighted_edges(true) {
            let net = flow.flow(u, v) - flow.flow(v, u);
            assert!(net.abs() <= c);
            assert!(flow.flow(u, v) == 0.0 || flow.flow(v, u) == 0.0);
        }
    }

    #[test]
    fn invalid_terminals() {
        let graph = flow_scenario();
        assert_eq!(
            graph.max_flow(0, 6),
            Err(GraphError::NodeOutOfRange { node: 6, n: 6 })
        );
        assert_eq!(graph.max_flow(2, 2).unwrap().value(), 0.0);
    }
}

/*!
# Eulerian and Hamiltonian Cycles

- [`EulerianWalk`] finds a closed walk using every edge exactly once (Hierholzer's algorithm).
- [`HeldKarp`] finds a Hamiltonian circuit of minimum total weight by dynamic programming over
  subsets. This takes `O(2^n * n^2)` time and `O(2^n * n)` memory, which is inherent to the
  problem. Graphs with more than [`MAX_HELD_KARP_NODES`] nodes are rejected.

```
use wgraphs::{prelude::*, algo::*};

let graph = AdjArrayUndir::from_edges(
    4,
    [(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0), (0, 2, 5.0), (1, 3, 5.0)],
);

let circuit = graph.hamiltonian_circuit(0).unwrap().unwrap();
assert_eq!(circuit.cost(), 4.0);
assert_eq!(circuit.nodes().len(), 5);

// nodes 0 and 2 have odd degree
assert_eq!(graph.eulerian_cycle(), None);
```
*/

use fxhash::FxHashSet;
use itertools::Itertools;

use super::*;

/// Hierholzer's algorithm for Eulerian cycles in `O(n + m)`.
///
/// Sub-walks are spliced in place by an explicit stack: nodes are pushed while untraversed edges
/// remain and moved to the cycle once they are exhausted. For undirected graphs each edge is
/// traversed in one direction only.
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerianWalk {
    start: Option<Node>,
}

impl EulerianWalk {
    /// Creates a new solver starting at the first node with an incident edge
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the node the cycle starts and ends at
    pub fn set_start(&mut self, start: Node) {
        self.start = Some(start);
    }

    /// Fixes the node the cycle starts and ends at
    pub fn start(mut self, start: Node) -> Self {
        self.set_start(start);
        self
    }

    /// Returns *true* if every node has as many incoming as outgoing edges (directed)
    /// or an even degree (undirected)
    fn degrees_are_balanced<G>(graph: &G) -> bool
    where
        G: AdjacencyList + GraphType,
    {
        if G::is_undirected() {
            return graph.vertices().all(|u| graph.degree_of(u) % 2 == 0);
        }

        let mut balance = vec![0i64; graph.len()];
        for Edge(u, v) in graph.edges(false) {
            balance[u as usize] += 1;
            balance[v as usize] -= 1;
        }
        balance.into_iter().all(|b| b == 0)
    }

    /// Computes an Eulerian cycle of `graph` as a closed node sequence, or `Ok(None)` if there
    /// is none. A graph without edges has no Eulerian cycle.
    ///
    /// Fails with [`GraphError::NodeOutOfRange`] if a fixed start node is not a node of `graph`.
    pub fn run<G>(&self, graph: &G) -> Result<Option<Vec<Node>>>
    where
        G: AdjacencyList + GraphEdgeOrder + GraphType,
    {
        let m = graph.number_of_edges() as usize;
        let start = match self.start {
            Some(start) => {
                check_node(start, graph.number_of_nodes())?;
                start
            }
            None => match graph.vertices().find(|&u| graph.degree_of(u) > 0) {
                Some(start) => start,
                None => return Ok(None),
            },
        };
        debug!(start, m, "running hierholzer");

        if m == 0 || graph.degree_of(start) == 0 || !Self::degrees_are_balanced(graph) {
            debug!("no eulerian cycle: unbalanced degrees or isolated start");
            return Ok(None);
        }

        let successors = graph
            .vertices()
            .map(|u| graph.neighbors_of(u).collect_vec())
            .collect_vec();
        let mut next_successor = vec![0usize; graph.len()];
        let mut traversed: FxHashSet<Edge> = FxHashSet::default();

        let mut cycle = Vec::with_capacity(m + 1);
        let mut stack = vec![start];

        while let Some(&u) = stack.last() {
            let nbs = &successors[u as usize];
            let cursor = &mut next_successor[u as usize];

            let mut next = None;
            while *cursor < nbs.len() {
                let v = nbs[*cursor];
                *cursor += 1;
                if G::is_directed() || traversed.insert(Edge(u, v).normalized()) {
                    next = Some(v);
                    break;
                }
            }

            match next {
                Some(v) => stack.push(v),
                None => {
                    stack.pop();
                    cycle.push(u);
                }
            }
        }

        if cycle.len() != m + 1 {
            debug!(
                traversed = cycle.len().saturating_sub(1),
                m, "no eulerian cycle: graph is not connected"
            );
            return Ok(None);
        }

        cycle.reverse();
        Ok(Some(cycle))
    }
}

/// Largest number of nodes accepted by [`HeldKarp`]; its table then takes about 80 MB
pub const MAX_HELD_KARP_NODES: NumNodes = 20;

/// A closed walk visiting every node exactly once, together with its total weight
#[derive(Debug, Clone, PartialEq)]
pub struct HamiltonianCircuit {
    nodes: Vec<Node>,
    cost: Weight,
}

impl HamiltonianCircuit {
    /// Returns the circuit as node sequence; the first and last node are the start node
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the sum of all edge weights along the circuit
    pub fn cost(&self) -> Weight {
        self.cost
    }

    /// Consumes the circuit and returns its node sequence
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}

/// Held-Karp dynamic program for minimum Hamiltonian circuits.
///
/// Let `S` be a set of non-start nodes and `e` in `S`. `cost(S, e)` is the cheapest path
/// starting at the start node, visiting exactly `S` and ending in `e`. Subsets are processed
/// by increasing size, so all values needed for `cost(S, e)` are known when it is computed.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeldKarp {
    start: Node,
}

impl HeldKarp {
    /// Creates a new solver for circuits through node `0`
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the node the circuit starts and ends at
    pub fn set_start(&mut self, start: Node) {
        self.start = start;
    }

    /// Sets the node the circuit starts and ends at
    pub fn start(mut self, start: Node) -> Self {
        self.set_start(start);
        self
    }

    /// Computes a minimum Hamiltonian circuit of `graph`, or `Ok(None)` if there is none
    pub fn run<G: WeightedAdjacency>(&self, graph: &G) -> Result<Option<HamiltonianCircuit>> {
        let n = graph.number_of_nodes();
        check_node(self.start, n)?;
        if n > MAX_HELD_KARP_NODES {
            warn!(n, "refusing to run held-karp");
            return Err(GraphError::TooManyNodes {
                nodes: n,
                max: MAX_HELD_KARP_NODES,
            });
        }
        debug!(start = self.start, n, "running held-karp");

        let start = self.start;
        if n == 1 {
            return Ok(Some(HamiltonianCircuit {
                nodes: vec![start, start],
                cost: 0.0,
            }));
        }

        let others = graph.vertices().filter(|&u| u != start).collect_vec();
        let k = others.len();
        let weights = graph
            .vertices_range()
            .flat_map(|u| graph.vertices_range().map(move |v| (u, v)))
            .map(|(u, v)| graph.weight(u, v))
            .collect_vec();
        let weight = |u: Node, v: Node| weights[u as usize * n as usize + v as usize];

        // cost(S, e) is stored at `S * k + e` with `S` a bitmask over indices into `others`
        let table_size = (1usize << k) * k;
        let mut cost = Vec::new();
        if cost.try_reserve_exact(table_size).is_err() {
            warn!(n, table_size, "cannot allocate held-karp table");
            return Err(GraphError::TooManyNodes {
                nodes: n,
                max: MAX_HELD_KARP_NODES,
            });
        }
        cost.resize(table_size, Weight::INFINITY);
        for (e, &v) in others.iter().enumerate() {
            cost[(1 << e) * k + e] = weight(start, v);
        }

        for size in 2..=k {
            for subset in (0..k).combinations(size) {
                let set = subset.iter().fold(0usize, |set, &i| set | (1 << i));
                for &e in &subset {
                    let prev = set ^ (1 << e);
                    let best = subset
                        .iter()
                        .filter(|&&m| m != e)
                        .map(|&m| cost[prev * k + m] + weight(others[m], others[e]))
                        .fold(Weight::INFINITY, Weight::min);
                    cost[set * k + e] = best;
                }
            }
            trace!(size, "held-karp layer done");
        }

        let full = (1usize << k) - 1;
        let Some((mut end, total)) = (0..k)
            .map(|e| (e, cost[full * k + e] + weight(others[e], start)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .filter(|&(_, total)| total < Weight::INFINITY)
        else {
            debug!("no hamiltonian circuit");
            return Ok(None);
        };

        let mut nodes = Vec::with_capacity(n as usize + 1);
        nodes.push(start);
        let mut set = full;
        loop {
            nodes.push(others[end]);
            let prev = set ^ (1 << end);
            if prev == 0 {
                break;
            }

            let target = cost[set * k + end];
            end = (0..k)
                .filter(|&m| prev & (1 << m) != 0)
                .find(|&m| cost[prev * k + m] + weight(others[m], others[end]) == target)
                .unwrap_or_else(|| unreachable!("every finite dp entry has a predecessor"));
            set = prev;
        }
        nodes.push(start);
        nodes.reverse();

        debug!(cost = total, "held-karp finished");
        Ok(Some(HamiltonianCircuit { nodes, cost: total }))
    }
}

/// Cycle finding algorithms as methods on the graph itself
pub trait Circuits: WeightedAdjacency + GraphEdgeOrder + GraphType + Sized {
    /// Computes an Eulerian cycle starting at the first node with an incident edge
    /// (see [`EulerianWalk`]).
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjArray::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
    /// assert_eq!(g.eulerian_cycle(), Some(vec![0, 1, 2, 0]));
    /// ```
    fn eulerian_cycle(&self) -> Option<Vec<Node>> {
        EulerianWalk::new()
            .run(self)
            .unwrap_or_else(|_| unreachable!("no start node is fixed"))
    }

    /// Computes a minimum Hamiltonian circuit through `start` (see [`HeldKarp`]).
    fn hamiltonian_circuit(&self, start: Node) -> Result<Option<HamiltonianCircuit>> {
        HeldKarp::new().start(start).run(self)
    }
}

impl<G> Circuits for G where G: WeightedAdjacency + GraphEdgeOrder + GraphType + Sized {}

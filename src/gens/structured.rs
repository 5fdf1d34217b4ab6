use rand::seq::SliceRandom;

use super::*;

/// Generator for random weighted directed acyclic graphs.
///
/// Nodes are put into a random order and every pair `u` before `v` becomes the edge `(u, v)`
/// with probability `p`; hence the hidden order is a topological order of the result.
#[derive(Debug, Copy, Clone, Default)]
pub struct RandomDag {
    n: NumNodes,
    p: f64,
    weights: WeightRange,
}

impl RandomDag {
    /// Creates a new DAG generator with `n = 0` and `p = 0`
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the probability of each forward edge
    pub fn set_prob(&mut self, prob: f64) {
        assert!(prob.is_valid_probility());
        self.p = prob;
    }

    /// Sets the probability of each forward edge
    pub fn prob(mut self, prob: f64) -> Self {
        self.set_prob(prob);
        self
    }
}

impl NumNodesGen for RandomDag {
    fn set_nodes(&mut self, n: NumNodes) {
        self.n = n;
    }
}

impl_edge_weight_gen!(RandomDag);

impl GraphGenerator for RandomDag {
    fn stream<R: Rng>(&self, rng: &mut R) -> impl Iterator<Item = WeightedEdge> {
        let mut order: Vec<Node> = (0..self.n).collect();
        order.shuffle(rng);

        let weights = self.weights.sampler();
        let mut edges = Vec::new();
        for (i, &u) in order.iter().enumerate() {
            for &v in &order[i + 1..] {
                if rng.random_bool(self.p) {
                    edges.push(WeightedEdge(u, v, weights.sample(rng)));
                }
            }
        }

        edges.into_iter()
    }
}

/// Generator for random bipartite graphs with partitions `X = 0..left` and `Y = left..left+right`.
///
/// Every pair `(x, y)` with `x` in `X` and `y` in `Y` becomes an edge with probability `p`.
#[derive(Debug, Copy, Clone, Default)]
pub struct RandomBipartite {
    left: NumNodes,
    right: NumNodes,
    p: f64,
    weights: WeightRange,
}

impl RandomBipartite {
    /// Creates a new generator with empty partitions and `p = 0`
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sizes of both partitions
    pub fn set_sides(&mut self, left: NumNodes, right: NumNodes) {
        self.left = left;
        self.right = right;
    }

    /// Sets the sizes of both partitions
    pub fn sides(mut self, left: NumNodes, right: NumNodes) -> Self {
        self.set_sides(left, right);
        self
    }

    /// Sets the probability of each edge
    pub fn set_prob(&mut self, prob: f64) {
        assert!(prob.is_valid_probility());
        self.p = prob;
    }

    /// Sets the probability of each edge
    pub fn prob(mut self, prob: f64) -> Self {
        self.set_prob(prob);
        self
    }

    /// Returns the nodes of the left partition
    pub fn left_nodes(&self) -> std::ops::Range<Node> {
        0..self.left
    }

    /// Returns the nodes of the right partition
    pub fn right_nodes(&self) -> std::ops::Range<Node> {
        self.left..self.left + self.right
    }

    /// Returns the total number of nodes
    pub fn number_of_nodes(&self) -> NumNodes {
        self.left + self.right
    }
}

impl_edge_weight_gen!(RandomBipartite);

impl GraphGenerator for RandomBipartite {
    fn stream<R: Rng>(&self, rng: &mut R) -> impl Iterator<Item = WeightedEdge> {
        let p = self.p;
        let right = self.right_nodes();
        let weights = self.weights.sampler();

        self.left_nodes()
            .flat_map(move |x| right.clone().map(move |y| (x, y)))
            .filter_map(move |(x, y)| {
                if !rng.random_bool(p) {
                    return None;
                }
                Some(WeightedEdge(x, y, weights.sample(rng)))
            })
    }
}

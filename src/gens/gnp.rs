use super::*;

/// `G(n,p)` graphs generate every possible edge `(u, v)` with `u != v` in a graph with `n` nodes
/// with probability `p` independent from each other, and attach a random weight to it.
///
/// Both `(u, v)` and `(v, u)` are candidates. For undirected graphs, filtering the normalized
/// edges is up to the caller (as done by [`RandomGraph::weighted_gnp`]).
#[derive(Debug, Copy, Clone, Default)]
pub struct Gnp {
    n: NumNodes,
    p: Option<f64>,
    weights: WeightRange,
}

impl Gnp {
    /// Creates a new empty `G(n,p)` generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates `p` directly
    pub fn set_prob(&mut self, prob: f64) {
        assert!(prob.is_valid_probility());
        self.p = Some(prob);
    }

    /// Updates `p` directly
    pub fn prob(mut self, prob: f64) -> Self {
        self.set_prob(prob);
        self
    }
}

impl NumNodesGen for Gnp {
    fn set_nodes(&mut self, n: NumNodes) {
        self.n = n;
    }
}

impl_edge_weight_gen!(Gnp);

impl GraphGenerator for Gnp {
    fn stream<R: Rng>(&self, rng: &mut R) -> impl Iterator<Item = WeightedEdge> {
        let Some(p) = self.p else {
            panic!("Probility of Gnp was not set!");
        };
        let n = self.n;
        let weights = self.weights.sampler();

        (0..n)
            .flat_map(move |u| (0..n).map(move |v| (u, v)))
            .filter(|&(u, v)| u != v)
            .filter_map(move |(u, v)| {
                if !rng.random_bool(p) {
                    return None;
                }
                Some(WeightedEdge(u, v, weights.sample(rng)))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn extreme_probabilities() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        assert!(Gnp::new().nodes(10).prob(0.0).generate(rng).is_empty());

        let edges = Gnp::new().nodes(10).prob(1.0).weights(2.0, 2.0).generate(rng);
        assert_eq!(edges.len(), 90);
        assert!(edges.iter().all(|e| !e.edge().is_loop() && e.weight() == 2.0));
    }

    #[test]
    fn integral_weights_in_range() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);
        let edges = Gnp::new()
            .nodes(30)
            .prob(0.5)
            .weights(-3.0, 7.0)
            .integral(true)
            .generate(rng);

        assert!(!edges.is_empty());
        for e in edges {
            assert!((-3.0..=7.0).contains(&e.weight()));
            assert_eq!(e.weight(), e.weight().round());
        }
    }

    #[test]
    #[should_panic]
    fn invalid_probability() {
        let _ = Gnp::new().prob(1.5);
    }
}

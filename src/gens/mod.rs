/*!
# Graph Generators

Random generators for weighted graphs, mainly used to exercise the algorithms on many
reproducible instances (seed the `Rng`, e.g. with `rand_pcg::Pcg64Mcg::seed_from_u64`).

Generators follow a builder pattern:

1. Create a generator instance (e.g., `Gnp::new()`).
2. Set parameters using trait methods (e.g., `.nodes(n).prob(p).weights(1.0, 10.0)`).
3. Generate edges via `generate()` or `stream()`.

Edge weights are drawn uniformly from the configured (inclusive) range, optionally rounded
to integers so that sums of weights are exact.

The [`RandomGraph`] trait wraps the generators into constructors for every graph type
implementing [`GraphFromScratch`] and [`GraphType`].

```
use wgraphs::{prelude::*, gens::*};
use rand::SeedableRng;

let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(1);
let graph = AdjArrayUndir::weighted_gnp(&mut rng, 20, 0.3, 1.0, 9.0);

assert_eq!(graph.number_of_nodes(), 20);
assert!(graph.weighted_edges(false).all(|e| (1.0..=9.0).contains(&e.weight())));
```
*/

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::{prelude::*, utils::Probability};

mod gnp;
mod structured;
mod tree;

pub use gnp::*;
pub use structured::*;
pub use tree::*;

/// Trait for generators that allow setting the number of nodes.
pub trait NumNodesGen: Sized {
    /// Sets the number of nodes in the graph generator.
    fn set_nodes(&mut self, n: NumNodes);

    /// Sets the number of nodes in the graph generator.
    fn nodes(mut self, n: NumNodes) -> Self {
        self.set_nodes(n);
        self
    }
}

/// Trait for generators that attach random weights to their edges.
pub trait EdgeWeightGen: Sized {
    /// Sets the inclusive range `[lo, hi]` weights are drawn from.
    /// ** Panics if the range is empty or not finite **
    fn set_weights(&mut self, lo: Weight, hi: Weight);

    /// If *true*, sampled weights are rounded to the nearest integer
    fn set_integral(&mut self, integral: bool);

    /// Sets the inclusive range `[lo, hi]` weights are drawn from.
    fn weights(mut self, lo: Weight, hi: Weight) -> Self {
        self.set_weights(lo, hi);
        self
    }

    /// Rounds sampled weights to the nearest integer
    fn integral(mut self, integral: bool) -> Self {
        self.set_integral(integral);
        self
    }
}

/// General trait for a configurable random edge generator.
pub trait GraphGenerator {
    /// Generates a list of random weighted edges.
    fn generate<R>(&self, rng: &mut R) -> Vec<WeightedEdge>
    where
        R: Rng,
    {
        self.stream(rng).collect()
    }

    /// Creates a lazy iterator (stream) over generated weighted edges.
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = WeightedEdge>
    where
        R: Rng;
}

/// Weight configuration shared by all generators; defaults to unit weights.
#[derive(Debug, Copy, Clone)]
pub struct WeightRange {
    lo: Weight,
    hi: Weight,
    integral: bool,
}

impl Default for WeightRange {
    fn default() -> Self {
        Self {
            lo: 1.0,
            hi: 1.0,
            integral: false,
        }
    }
}

impl WeightRange {
    /// Creates the range `[lo, hi]`
    /// ** Panics if the range is empty or not finite **
    pub fn new(lo: Weight, hi: Weight) -> Self {
        assert!(
            lo.is_finite() && hi.is_finite() && lo <= hi,
            "invalid weight range [{lo}, {hi}]"
        );
        Self {
            lo,
            hi,
            integral: false,
        }
    }

    /// Returns the sampler for this range
    pub fn sampler(&self) -> WeightSampler {
        WeightSampler {
            // the range was validated on construction
            uniform: Uniform::new_inclusive(self.lo, self.hi).unwrap(),
            integral: self.integral,
        }
    }
}

/// Distribution over edge weights created by [`WeightRange::sampler`]
#[derive(Debug, Clone)]
pub struct WeightSampler {
    uniform: Uniform<Weight>,
    integral: bool,
}

impl Distribution<Weight> for WeightSampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Weight {
        let w = self.uniform.sample(rng);
        if self.integral { w.round() } else { w }
    }
}

macro_rules! impl_edge_weight_gen {
    ($gen:ident) => {
        impl EdgeWeightGen for $gen {
            fn set_weights(&mut self, lo: Weight, hi: Weight) {
                let integral = self.weights.integral;
                self.weights = WeightRange::new(lo, hi);
                self.weights.integral = integral;
            }

            fn set_integral(&mut self, integral: bool) {
                self.weights.integral = integral;
            }
        }
    };
}

pub(crate) use impl_edge_weight_gen;

/// Trait for building full graph instances from random models.
pub trait RandomGraph: Sized {
    /// Creates a random `G(n,p)` graph with integral weights drawn from `[lo, hi]`.
    fn weighted_gnp<R>(rng: &mut R, n: NumNodes, p: f64, lo: Weight, hi: Weight) -> Self
    where
        R: Rng;

    /// Creates a random tree spanning all `n` nodes with integral weights drawn from `[lo, hi]`.
    /// In directed graphs, edges point away from a random root.
    fn random_tree<R>(rng: &mut R, n: NumNodes, lo: Weight, hi: Weight) -> Self
    where
        R: Rng;

    /// Creates a random directed acyclic graph with integral weights drawn from `[lo, hi]`.
    fn random_dag<R>(rng: &mut R, n: NumNodes, p: f64, lo: Weight, hi: Weight) -> Self
    where
        R: Rng;
}

impl<G> RandomGraph for G
where
    G: GraphFromScratch + GraphType,
{
    fn weighted_gnp<R>(rng: &mut R, n: NumNodes, p: f64, lo: Weight, hi: Weight) -> Self
    where
        R: Rng,
    {
        Self::from_edges(
            n,
            Gnp::new()
                .nodes(n)
                .prob(p)
                .weights(lo, hi)
                .integral(true)
                .stream(rng)
                .filter(|e| Self::is_directed() || e.edge().is_normalized()),
        )
    }

    fn random_tree<R>(rng: &mut R, n: NumNodes, lo: Weight, hi: Weight) -> Self
    where
        R: Rng,
    {
        Self::from_edges(
            n,
            RandomTree::new()
                .nodes(n)
                .weights(lo, hi)
                .integral(true)
                .generate(rng),
        )
    }

    fn random_dag<R>(rng: &mut R, n: NumNodes, p: f64, lo: Weight, hi: Weight) -> Self
    where
        R: Rng,
    {
        Self::from_edges(
            n,
            RandomDag::new()
                .nodes(n)
                .prob(p)
                .weights(lo, hi)
                .integral(true)
                .generate(rng),
        )
    }
}

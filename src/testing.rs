//! Fixtures shared by the unit tests of the algorithm modules

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use crate::{gens::*, prelude::*, repr::digest::GraphDigest};

/// `S->A(5), S->B(3), B->A(1), A->C(6), B->C(4)` with `S=0, A=1, B=2, C=3`
pub(crate) fn dijkstra_scenario() -> AdjArray {
    AdjArray::from_edges(
        4,
        [
            (0, 1, 5.0),
            (0, 2, 3.0),
            (2, 1, 1.0),
            (1, 3, 6.0),
            (2, 3, 4.0),
        ],
    )
}

/// `S->A(1), A->B(-1), B->S(-1)` with `S=0, A=1, B=2`; the cycle has total weight `-1`
pub(crate) fn negative_cycle_scenario() -> AdjArray {
    AdjArray::from_edges(3, [(0, 1, 1.0), (1, 2, -1.0), (2, 0, -1.0)])
}

/// `X = {a, b, c} = {0, 1, 2}`, `Y = {d, e, f} = {3, 4, 5}` with edges
/// `(a,d), (a,e), (b,f), (c,d)`
pub(crate) fn matching_scenario() -> AdjArrayUndir {
    AdjArrayUndir::from_edges(6, [(0, 3), (0, 4), (1, 5), (2, 3)])
}

/// Flow network with source `0`, sink `5` and maximum flow `23`
pub(crate) fn flow_scenario() -> AdjArray {
    AdjArray::from_edges(
        6,
        [
            (0, 1, 16.0),
            (0, 2, 13.0),
            (1, 2, 10.0),
            (2, 1, 4.0),
            (1, 3, 12.0),
            (3, 2, 9.0),
            (2, 4, 14.0),
            (4, 3, 7.0),
            (3, 5, 20.0),
            (4, 5, 4.0),
        ],
    )
}

/// Creates `count` random graphs with integral weights in `[lo, hi]` and at most `max_n` nodes
pub(crate) fn random_weighted_graphs<G>(
    seed: u64,
    count: usize,
    max_n: NumNodes,
    lo: Weight,
    hi: Weight,
) -> Vec<G>
where
    G: GraphFromScratch + GraphType,
{
    let rng = &mut Pcg64Mcg::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let n = rng.random_range(1..=max_n);
            let p = rng.random_range(0.05..0.5);
            G::weighted_gnp(rng, n, p, lo, hi)
        })
        .collect()
}

/// Runs `algo` on `graph` and asserts that the graph was not modified
pub(crate) fn assert_read_only<G, T>(graph: &G, algo: impl FnOnce(&G) -> T) -> T
where
    G: WeightedAdjacency,
{
    let before = graph.digest_sha256();
    let result = algo(graph);
    assert_eq!(before, graph.digest_sha256());
    result
}

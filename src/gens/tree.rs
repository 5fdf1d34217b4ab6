/*!
# Random Spanning Trees

[`RandomTree`] creates a random weighted tree over all `n` nodes, so that graphs built
from it (possibly with additional random edges) are guaranteed to be connected.

Nodes are attached in random order, each to a uniformly chosen node already in the tree.
All edges are oriented away from the first node of that order (the root).
*/

use rand::seq::SliceRandom;

use super::*;

/// Generator for a random weighted tree
#[derive(Debug, Copy, Clone, Default)]
pub struct RandomTree {
    n: NumNodes,
    root: Option<Node>,
    weights: WeightRange,
}

impl RandomTree {
    /// Creates a new tree generator with `n = 0`
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the root of the tree instead of choosing it at random.
    /// ** Panics if `root >= n` when used in generation **
    pub fn set_root(&mut self, root: Node) {
        self.root = Some(root);
    }

    /// Fixes the root of the tree instead of choosing it at random.
    pub fn root(mut self, root: Node) -> Self {
        self.set_root(root);
        self
    }
}

impl NumNodesGen for RandomTree {
    fn set_nodes(&mut self, n: NumNodes) {
        self.n = n;
    }
}

impl_edge_weight_gen!(RandomTree);

impl GraphGenerator for RandomTree {
    fn stream<R: Rng>(&self, rng: &mut R) -> impl Iterator<Item = WeightedEdge> {
        let mut order: Vec<Node> = (0..self.n).collect();
        order.shuffle(rng);

        if let Some(root) = self.root {
            assert!(root < self.n);
            let pos = order.iter().position(|&u| u == root).unwrap_or(0);
            order.swap(0, pos);
        }

        let weights = self.weights.sampler();
        let edges: Vec<WeightedEdge> = (1..order.len())
            .map(|i| {
                let parent = order[rng.random_range(0..i)];
                WeightedEdge(parent, order[i], weights.sample(rng))
            })
            .collect();

        edges.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn spans_all_nodes() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for n in 1..30 {
            let edges = RandomTree::new().nodes(n).root(0).generate(rng);
            assert_eq!(edges.len() as NumNodes, n - 1);

            let graph = AdjArray::from_edges(n, edges);
            assert_eq!(graph.bfs(0).count() as NumNodes, n);
        }
    }

    #[test]
    fn undirected_trees_are_connected() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for n in 1..30 {
            let graph = AdjArrayUndir::random_tree(rng, n, 1.0, 5.0);
            assert_eq!(graph.number_of_edges(), n - 1);
            assert_eq!(graph.bfs(n - 1).count() as NumNodes, n);
        }
    }
}

/*!
# Bipartite Matching

This module computes **maximum matchings** in bipartite graphs with the Hopcroft-Karp algorithm.

A *matching* is a set of edges without shared endpoints; a *maximum matching* is a largest one.
The bipartition is given explicitly by the caller as two disjoint node sets. Edges that do not
connect the two sides are ignored.
*/

use std::collections::VecDeque;

use itertools::Itertools;

use super::*;

const UNREACHED: NumNodes = NumNodes::MAX;

/// Hopcroft-Karp maximum bipartite matching in `O(m * sqrt(n))`.
///
/// Each phase first computes BFS layers of alternating paths from all free left nodes and stops
/// once a free right node is reachable. It then searches vertex-disjoint shortest augmenting
/// paths along these layers with an explicit-stack DFS and flips them.
#[derive(Debug, Clone)]
pub struct HopcroftKarp {
    left: Vec<Node>,
    adjacency: Vec<Vec<Node>>,
    mate: Vec<Node>,
    layer: Vec<NumNodes>,
    cursor: Vec<usize>,
}

impl HopcroftKarp {
    /// Prepares a matching between the nodes of `left` and `right` in `graph`.
    /// A node listed in both sides is treated as a left node.
    pub fn new<G, L, R>(graph: &G, left: L, right: R) -> Result<Self>
    where
        G: AdjacencyList,
        L: IntoIterator<Item = Node>,
        R: IntoIterator<Item = Node>,
    {
        let n = graph.number_of_nodes();
        let mut is_left = graph.vertex_bitset_unset();
        let mut is_right = graph.vertex_bitset_unset();

        for u in left {
            check_node(u, n)?;
            is_left.set_bit(u);
        }
        for v in right {
            check_node(v, n)?;
            is_right.set_bit(v);
        }

        let left = graph.vertices().filter(|&u| is_left.get_bit(u)).collect_vec();
        let mut adjacency = vec![Vec::new(); n as usize];
        for &u in &left {
            adjacency[u as usize] = graph
                .neighbors_of(u)
                .filter(|&v| is_right.get_bit(v) && !is_left.get_bit(v))
                .collect();
        }

        Ok(Self {
            left,
            adjacency,
            mate: vec![INVALID_NODE; n as usize],
            layer: vec![UNREACHED; n as usize],
            cursor: vec![0; n as usize],
        })
    }

    fn is_free(&self, u: Node) -> bool {
        self.mate[u as usize] == INVALID_NODE
    }

    /// Assigns BFS layers to left nodes and returns *true* if a free right node is reachable
    fn compute_layers(&mut self) -> bool {
        let mut queue = VecDeque::new();
        for &u in &self.left {
            if self.is_free(u) {
                self.layer[u as usize] = 0;
                queue.push_back(u);
            } else {
                self.layer[u as usize] = UNREACHED;
            }
        }

        let mut found = false;
        while let Some(u) = queue.pop_front() {
            for &v in &self.adjacency[u as usize] {
                let w = self.mate[v as usize];
                if w == INVALID_NODE {
                    found = true;
                } else if !found && self.layer[w as usize] == UNREACHED {
                    self.layer[w as usize] = self.layer[u as usize] + 1;
                    queue.push_back(w);
                }
            }
        }

        found
    }

    /// Searches a layered augmenting path from the free left node `root` and flips it
    fn augment_from(&mut self, root: Node) -> bool {
        let mut path = vec![root];
        let mut via: Vec<Node> = Vec::new();

        while let Some(&u) = path.last() {
            let idx = u as usize;
            if self.cursor[idx] == self.adjacency[idx].len() {
                // dead end for the rest of this phase
                self.layer[idx] = UNREACHED;
                path.pop();
                via.pop();
                continue;
            }

            let v = self.adjacency[idx][self.cursor[idx]];
            self.cursor[idx] += 1;

            let w = self.mate[v as usize];
            if w == INVALID_NODE {
                via.push(v);
                for (&l, &r) in path.iter().zip(&via) {
                    self.mate[l as usize] = r;
                    self.mate[r as usize] = l;
                }
                return true;
            }

            if self.layer[w as usize] == self.layer[idx] + 1 {
                path.push(w);
                via.push(v);
            }
        }

        false
    }

    /// Computes a maximum matching as sorted `(left, right)` pairs
    pub fn run(mut self) -> Vec<(Node, Node)> {
        debug!(left = self.left.len(), "running hopcroft-karp");

        let mut phases = 0;
        while self.compute_layers() {
            phases += 1;
            self.cursor.iter_mut().for_each(|c| *c = 0);

            let mut augmented = 0;
            for i in 0..self.left.len() {
                let u = self.left[i];
                if self.is_free(u) && self.augment_from(u) {
                    augmented += 1;
                }
            }
            trace!(phase = phases, augmented, "hopcroft-karp phase");
        }

        let matching = self
            .left
            .iter()
            .filter(|&&u| !self.is_free(u))
            .map(|&u| (u, self.mate[u as usize]))
            .collect_vec();

        debug!(size = matching.len(), phases, "hopcroft-karp finished");
        matching
    }
}

/// Matching algorithms as methods on the graph itself
pub trait Matching: AdjacencyList + Sized {
    /// Computes a **maximum matching** between the disjoint node sets `left` and `right`
    /// using [`HopcroftKarp`].
    ///
    /// Returns pairs `(l, r)` with `l` in `left` and `r` in `right`, sorted by `l`.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// // 0 <=> 1 <=> 2 <=> 3
    /// let graph = AdjArrayUndir::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
    /// let matching = graph.maximum_bipartite_matching([0, 2], [1, 3]).unwrap();
    /// assert_eq!(matching, vec![(0, 1), (2, 3)]);
    /// ```
    fn maximum_bipartite_matching<L, R>(&self, left: L, right: R) -> Result<Vec<(Node, Node)>>
    where
        L: IntoIterator<Item = Node>,
        R: IntoIterator<Item = Node>,
    {
        Ok(HopcroftKarp::new(self, left, right)?.run())
    }
}

impl<G> Matching for G where G: AdjacencyList + Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{gens::*, testing::*};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    /// Size of a maximum matching by simple augmenting paths
    fn augmenting_path_size<G: AdjacencyList>(
        graph: &G,
        left: &[Node],
        is_right: &NodeBitSet,
    ) -> usize {
        fn try_augment<G: AdjacencyList>(
            graph: &G,
            u: Node,
            is_right: &NodeBitSet,
            visited: &mut NodeBitSet,
            mate: &mut [Option<Node>],
        ) -> bool {
            for v in graph.neighbors_of(u) {
                if !is_right.get_bit(v) || visited.set_bit(v) {
                    continue;
                }
                let augments = match mate[v as usize] {
                    None => true,
                    Some(w) => try_augment(graph, w, is_right, visited, mate),
                };
                if augments {
                    mate[v as usize] = Some(u);
                    return true;
                }
            }
            false
        }

        let mut mate = vec![None; graph.len()];
        left.iter()
            .filter(|&&u| {
                let mut visited = graph.vertex_bitset_unset();
                try_augment(graph, u, is_right, &mut visited, &mut mate)
            })
            .count()
    }

    fn assert_valid_matching<G: AdjacencyTest>(
        graph: &G,
        matching: &[(Node, Node)],
        left: &[Node],
        right: &[Node],
    ) {
        assert!(matching.iter().all(|&(l, r)| graph.has_edge(l, r)));
        assert!(matching.iter().all(|(l, r)| left.contains(l) && right.contains(r)));
        assert!(matching.iter().flat_map(|&(l, r)| [l, r]).all_unique());
        assert!(matching.iter().map(|&(l, _)| l).tuple_windows().all(|(a, b)| a < b));
    }

    #[test]
    fn matching_scenario_size() {
        let graph = matching_scenario();
        let matching = assert_read_only(&graph, |g| {
            g.maximum_bipartite_matching([0, 1, 2], [3, 4, 5])
        })
        .unwrap();

        assert_eq!(matching, vec![(0, 4), (1, 5), (2, 3)]);
    }

    #[test]
    fn edges_within_a_side_are_ignored() {
        let mut graph = matching_scenario();
        graph.add_edge(0, 1);
        graph.add_edge(3, 4);

        let matching = graph
            .maximum_bipartite_matching([0, 1, 2], [3, 4, 5])
            .unwrap();
        assert_eq!(matching.len(), 3);
        assert_valid_matching(&graph, &matching, &[0, 1, 2], &[3, 4, 5]);

        // only a part of the graph
        let matching = graph.maximum_bipartite_matching([0, 2], [3]).unwrap();
        assert_eq!(matching.len(), 1);
    }

    #[test]
    fn random_bipartite_graphs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(23);

        for _ in 0..100 {
            let generator = RandomBipartite::new()
                .sides(rng.random_range(1..20), rng.random_range(1..20))
                .prob(rng.random_range(0.02..0.4));
            let graph =
                AdjArrayUndir::from_edges(generator.number_of_nodes(), generator.generate(rng));

            let left = generator.left_nodes().collect_vec();
            let right = generator.right_nodes().collect_vec();
            let matching = graph
                .maximum_bipartite_matching(left.iter().copied(), right.iter().copied())
                .unwrap();

            assert_valid_matching(&graph, &matching, &left, &right);

            let is_right =
                NodeBitSet::new_with_bits_set(graph.number_of_nodes(), right.iter().copied());
            assert_eq!(matching.len(), augmenting_path_size(&graph, &left, &is_right));

            // swapping the sides yields a matching of the same size
            let swapped = graph
                .maximum_bipartite_matching(right.iter().copied(), left.iter().copied())
                .unwrap();
            assert_eq!(swapped.len(), matching.len());
        }
    }

    #[test]
    fn empty_sides_and_errors() {
        let graph = matching_scenario();
        assert!(graph.maximum_bipartite_matching([], [3, 4]).unwrap().is_empty());
        assert!(graph.maximum_bipartite_matching([0, 1], []).unwrap().is_empty());
        assert_eq!(
            graph.maximum_bipartite_matching([0, 7], [3]),
            Err(GraphError::NodeOutOfRange { node: 7, n: 6 })
        );
    }
}

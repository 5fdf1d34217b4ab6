use itertools::Itertools;
use smallvec::{Array, SmallVec};

use super::*;

/// Basic Neighborhood-Impl. using `Vec<(Node, Weight)>`
#[derive(Default, Clone, Debug)]
pub struct ArrNeighborhood(pub Vec<(Node, Weight)>);

impl Neighborhood for ArrNeighborhood {
    fn num_of_neighbors(&self) -> NumNodes {
        self.0.len() as NumNodes
    }

    fn weighted_neighbors(&self) -> impl Iterator<Item = (Node, Weight)> + '_ {
        self.0.iter().copied()
    }

    fn try_set_neighbor(&mut self, v: Node, weight: Weight) -> bool {
        if let Some(entry) = self.0.iter_mut().find(|(u, _)| *u == v) {
            entry.1 = weight;
            true
        } else {
            self.0.push((v, weight));
            false
        }
    }

    fn try_remove_neighbor(&mut self, v: Node) -> bool {
        if let Some((pos, _)) = self.0.iter().find_position(|(u, _)| *u == v) {
            // keep insertion order: traversal order follows the order edges were linked in
            self.0.remove(pos);
            true
        } else {
            false
        }
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

/// Like [`ArrNeighborhood`] but uses `SmallVec<[(Node, Weight); N]>` instead.
/// Prefer this if the graph is known to be sparse.
#[derive(Default, Clone, Debug)]
pub struct SparseNeighborhood<const N: usize = 8>(pub SmallVec<[(Node, Weight); N]>)
where
    [(Node, Weight); N]: Array<Item = (Node, Weight)>;

impl<const N: usize> Neighborhood for SparseNeighborhood<N>
where
    [(Node, Weight); N]: Array<Item = (Node, Weight)>,
{
    fn num_of_neighbors(&self) -> NumNodes {
        self.0.len() as NumNodes
    }

    fn weighted_neighbors(&self) -> impl Iterator<Item = (Node, Weight)> + '_ {
        self.0.iter().copied()
    }

    fn try_set_neighbor(&mut self, v: Node, weight: Weight) -> bool {
        if let Some(entry) = self.0.iter_mut().find(|(u, _)| *u == v) {
            entry.1 = weight;
            true
        } else {
            self.0.push((v, weight));
            false
        }
    }

    fn try_remove_neighbor(&mut self, v: Node) -> bool {
        if let Some((pos, _)) = self.0.iter().find_position(|(u, _)| *u == v) {
            self.0.remove(pos);
            true
        } else {
            false
        }
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

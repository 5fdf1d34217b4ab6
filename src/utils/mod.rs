/*!
# Utilities

Helper structures used by the algorithms and generators:
- [`NodePriorityQueue`]: the decrease-key min-heap used by Dijkstra and Prim,
- [`NodeLabels`] / [`LabeledEdges`]: build graphs from hashable labels instead of dense nodes,
- [`Probability`]: validity check for probabilities passed to generators.
*/

use num::{One, Zero};

pub mod labels;
pub mod priority_queue;

pub use labels::{LabeledEdges, NodeLabels};
pub use priority_queue::NodePriorityQueue;

/// Helper trait for probalities
pub trait Probability {
    /// Returns *true* if the probality is valid (ie. between `0` and `1`)
    fn is_valid_probility(&self) -> bool;
}

impl<P> Probability for P
where
    P: Zero + One + PartialOrd,
{
    fn is_valid_probility(&self) -> bool {
        Self::zero().le(self) && Self::one().ge(self)
    }
}

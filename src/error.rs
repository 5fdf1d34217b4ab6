/*!
# Errors

Failures that an algorithm cannot express as a regular result.
Missing results (no Eulerian cycle, no Hamiltonian circuit, unreached nodes) are *not* errors
and are returned as `None` / `Weight::INFINITY` instead.
*/

use thiserror::Error;

use crate::{Node, NumNodes};

/// Errors raised by the algorithms of this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A negative cycle is reachable from the source; the edge `(from, to)` could still be relaxed
    #[error("negative cycle detected: edge ({from},{to}) can still be relaxed")]
    NegativeCycle { from: Node, to: Node },

    /// The input is too large for an exponential-space algorithm
    #[error("graph has {nodes} nodes, but at most {max} are supported")]
    TooManyNodes { nodes: NumNodes, max: NumNodes },

    /// A node passed to an algorithm does not belong to the graph
    #[error("node {node} is not in a graph with {n} nodes")]
    NodeOutOfRange { node: Node, n: NumNodes },
}

/// Result type used by all fallible algorithms
pub type Result<T> = std::result::Result<T, GraphError>;

/// Returns [`GraphError::NodeOutOfRange`] if `node >= n`
pub(crate) fn check_node(node: Node, n: NumNodes) -> Result<()> {
    if node < n {
        Ok(())
    } else {
        Err(GraphError::NodeOutOfRange { node, n })
    }
}

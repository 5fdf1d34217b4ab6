/*!
# Graph Algorithms

This module provides the **weighted graph algorithms** built on top of the graph representations in this crate.
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use wgraphs::algo::*;
```
and gain access to traversal, shortest paths, spanning forests, orderings, cycle finding, flow and matching.

Every algorithm is available as a configurable struct (builder/setter pattern) and, for the common
cases, as an extension trait implemented on every graph (e.g. `graph.dijkstra(source)`).
Algorithms only borrow the graph immutably.
*/

mod cycle;
mod matching;
mod network_flow;
mod ordering;
mod shortest_path;
mod spanning;
pub mod traversal;

use crate::{error::*, prelude::*, utils::*};
use tracing::{debug, trace, warn};

pub use cycle::*;
pub use matching::*;
pub use network_flow::*;
pub use ordering::*;
pub use shortest_path::*;
pub use spanning::*;
pub use traversal::{
    BFS, BFSWithPredecessor, BfsTree, DFS, DFSWithPredecessor, DfsTree, Traversal,
    TraversalSearch, TraversalTree,
};

/// Gives access to the graph an algorithm or iterator operates on
pub trait WithGraphRef<G> {
    /// Returns the graph
    fn graph_ref(&self) -> &G;
}

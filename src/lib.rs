/*!
`wgraphs` is a library of classical algorithms on **weighted** graphs, directed or undirected.

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of nodes in the graph.
For **edges**, we use a simple tuple-struct `Edge(Node, Node)`, and `WeightedEdge(Node, Node, Weight)`
if the weight is attached. Weights are `f64`, where `Weight::INFINITY` stands for a missing edge or
an unreached node. By convention `weight(u, u) = 0`.

Labelled nodes (e.g. strings) are mapped onto `0..n` with [`NodeLabels`](crate::utils::NodeLabels).

### Directed vs Undirected

- In an **undirected** graph, `Edge(u, v)` is treated as equivalent to `Edge(v, u)` and both directions carry the same weight.
- In a **directed** graph, the edge has orientation, so `Edge(u, v)` and `Edge(v, u)` are considered distinct.

### Available Representations

See the [`repr`] module:

- [`AdjArray`](crate::repr::AdjArray) / [`AdjArrayUndir`](crate::repr::AdjArrayUndir)
- [`SparseAdjArray`](crate::repr::SparseAdjArray) / [`SparseAdjArrayUndir`](crate::repr::SparseAdjArrayUndir)

Algorithms are written against the traits in [`ops`], so any other representation implementing them works as well.

# Design

All algorithms are provided as configurable structs that one can alter to their needs using either the *Builder* / *Setter* pattern before calling the configured algorithm on a provided graph.
The most commonly used functionality is also implemented via traits on the graph itself, making it usable without configuring the algorithm beforehand.

```
use wgraphs::{prelude::*, algo::*};

let graph = AdjArray::from_edges(4, [(0, 1, 5.0), (0, 2, 3.0), (2, 1, 1.0), (1, 3, 6.0), (2, 3, 4.0)]);
let tree = graph.dijkstra(0).unwrap();

assert_eq!(tree.distances(), &[0.0, 4.0, 3.0, 7.0]);
assert_eq!(tree.path_to(3), Some(vec![0, 2, 3]));
```

# Usage

- [`prelude`] includes definitions for nodes, edges, basic graph operations, and all graph representations,
- [`algo`] includes the algorithms: traversals, shortest paths, spanning forests, orderings, Eulerian/Hamiltonian cycles, max-flow and bipartite matching,
- [`gens`] includes seeded random generators for weighted graphs,
- [`utils`] includes the priority queue used by Dijkstra/Prim and the label mapping,
- [`error`] includes the error type of fallible algorithms.

[`repr::digest`] enables computing a `Sha256`-hash for a given graph.

The library does not install a `tracing` subscriber; algorithms log their progress at `debug`/`trace` level.

In most use-cases, `use wgraphs::{prelude::*, algo::*};` suffices for your needs.
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod gens;
pub mod node;
pub mod ops;
pub mod repr;
#[cfg(test)]
pub(crate) mod testing;
pub mod utils;

pub use edge::*;
pub use node::*;

/// `wgraphs::prelude` includes definitions for nodes and edges, all basic graph operation traits as well as all implemented representations.
pub mod prelude {
    pub use super::{edge::*, node::*, ops::*, repr::*};
}

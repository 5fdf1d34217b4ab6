/*!
# Graph Hash Digests

[`GraphDigest`] computes a hash of a weighted graph that is independent of its storage.
The digest encodes the number of nodes followed by the sorted list of weighted edges
(endpoints as little-endian `u32`, weights as the little-endian bits of the `f64`).

## Example
```
use wgraphs::{prelude::*, repr::digest::GraphDigest};

let mut graph = AdjArray::new(10);
graph.link(4, 3, 2.0);
graph.link(1, 2, 0.5);

// Computes a SHA-256 digest (hex string of length 64).
assert_eq!(graph.digest_sha256().len(), 64);
```
*/

use std::fmt::LowerHex;

use super::*;
use ::digest::{Digest, Output};
use itertools::Itertools;

/// Trait for computing a **canonical hash digest** of a weighted graph.
///
/// Two graphs with the same nodes, edges and weights yield the same digest,
/// regardless of the order in which edges were linked or the neighborhood type used.
pub trait GraphDigest {
    /// Computes a digest of the graph using the provided hash function `D`
    /// and returns it as a **hexadecimal string**.
    fn digest<D>(&self) -> String
    where
        Output<D>: LowerHex,
        D: Digest;

    /// Computes a **SHA-256 digest** of the graph.
    fn digest_sha256(&self) -> String {
        self.digest::<sha2::Sha256>()
    }
}

impl<G> GraphDigest for G
where
    G: WeightedAdjacency,
{
    fn digest<D>(&self) -> String
    where
        Output<D>: LowerHex,
        D: Digest,
    {
        let mut hasher = D::new();

        hasher.update(self.number_of_nodes().to_le_bytes());

        let mut buffer = [0u8; 16];
        for WeightedEdge(u, v, w) in self
            .weighted_edges(false)
            .sorted_by_key(|e| (e.0, e.1))
        {
            buffer[0..4].copy_from_slice(&u.to_le_bytes());
            buffer[4..8].copy_from_slice(&v.to_le_bytes());
            buffer[8..].copy_from_slice(&w.to_bits().to_le_bytes());
            hasher.update(buffer);
        }

        format!("{:x}", hasher.finalize())
    }
}

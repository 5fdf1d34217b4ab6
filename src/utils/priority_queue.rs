/*!
# Node Priority Queue

[`NodePriorityQueue`] is an indexed binary min-heap over the nodes `0..n` supporting
decrease-key. Every node has at most one entry; its position in the heap is tracked so that
[`NodePriorityQueue::update`] can sift the entry in place.

Entries with equal priority are dequeued in the order they were enqueued.

```
use wgraphs::utils::NodePriorityQueue;

let mut pq = NodePriorityQueue::new(4);
pq.enqueue(0, 5.0);
pq.enqueue(1, 3.0);
pq.enqueue(2, 3.0);

assert_eq!(pq.update(0, 1.0), Some(5.0));
assert_eq!(pq.dequeue(), Some((0, 1.0)));
assert_eq!(pq.dequeue(), Some((1, 3.0)));
assert!(pq.contains(2));
```
*/

use crate::*;

#[derive(Debug, Clone, Copy)]
struct HeapEntry<P> {
    node: Node,
    priority: P,
    seq: u64,
}

impl<P: PartialOrd> HeapEntry<P> {
    /// Strictly smaller priority, ties broken by insertion order
    fn precedes(&self, other: &Self) -> bool {
        if self.priority < other.priority {
            true
        } else if other.priority < self.priority {
            false
        } else {
            self.seq < other.seq
        }
    }
}

/// Min-priority queue over nodes with decrease-key
#[derive(Debug, Clone)]
pub struct NodePriorityQueue<P> {
    heap: Vec<HeapEntry<P>>,
    positions: Vec<Node>,
    next_seq: u64,
}

impl<P: PartialOrd + Copy> NodePriorityQueue<P> {
    /// Creates an empty queue that can hold the nodes `0..n`
    pub fn new(n: NumNodes) -> Self {
        Self {
            heap: Vec::with_capacity(n as usize),
            positions: vec![INVALID_NODE; n as usize],
            next_seq: 0,
        }
    }

    /// Returns the number of queued nodes
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns *true* if no node is queued
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns *true* if `node` is currently queued
    pub fn contains(&self, node: Node) -> bool {
        self.positions
            .get(node as usize)
            .is_some_and(|&pos| pos != INVALID_NODE)
    }

    /// Returns the current priority of `node` if it is queued
    pub fn priority(&self, node: Node) -> Option<P> {
        self.contains(node)
            .then(|| self.heap[self.positions[node as usize] as usize].priority)
    }

    /// Returns the entry with minimum priority without removing it
    pub fn peek(&self) -> Option<(Node, P)> {
        self.heap.first().map(|e| (e.node, e.priority))
    }

    /// Inserts `node` with `priority`. If `node` is already queued, its priority is overwritten
    /// (see [`NodePriorityQueue::update`]).
    /// ** Panics if `node >= n` **
    pub fn enqueue(&mut self, node: Node, priority: P) {
        if self.contains(node) {
            self.update(node, priority);
            return;
        }

        let idx = self.heap.len();
        self.heap.push(HeapEntry {
            node,
            priority,
            seq: self.next_seq,
        });
        self.next_seq += 1;
        self.positions[node as usize] = idx as Node;
        self.sift_up(idx);
    }

    /// Removes and returns the entry with minimum priority
    pub fn dequeue(&mut self) -> Option<(Node, P)> {
        if self.heap.is_empty() {
            return None;
        }

        let last = self.heap.len() - 1;
        self.swap_entries(0, last);

        let entry = self.heap.pop()?;
        self.positions[entry.node as usize] = INVALID_NODE;

        if !self.heap.is_empty() {
            self.sift_down(0);
        }

        Some((entry.node, entry.priority))
    }

    /// Changes the priority of a queued `node` and returns its previous priority.
    /// Returns `None` (and does nothing) if `node` is not queued.
    ///
    /// Both decreasing and increasing the priority are supported.
    pub fn update(&mut self, node: Node, priority: P) -> Option<P> {
        let idx = *self.positions.get(node as usize)?;
        if idx == INVALID_NODE {
            return None;
        }
        let idx = idx as usize;

        let old = std::mem::replace(&mut self.heap[idx].priority, priority);
        if priority < old {
            self.sift_up(idx);
        } else {
            self.sift_down(idx);
        }
        Some(old)
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if !self.heap[idx].precedes(&self.heap[parent]) {
                break;
            }
            self.swap_entries(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut smallest = idx;

            if left < len && self.heap[left].precedes(&self.heap[smallest]) {
                smallest = left;
            }
            if right < len && self.heap[right].precedes(&self.heap[smallest]) {
                smallest = right;
            }
            if smallest == idx {
                break;
            }

            self.swap_entries(idx, smallest);
            idx = smallest;
        }
    }

    fn swap_entries(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a].node as usize] = a as Node;
        self.positions[self.heap[b].node as usize] = b as Node;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn fifo_on_ties() {
        let mut pq = NodePriorityQueue::new(6);
        for u in [4, 1, 5, 0, 3, 2] {
            pq.enqueue(u, Weight::INFINITY);
        }
        pq.update(3, 0.0);

        assert_eq!(pq.dequeue(), Some((3, 0.0)));
        let order: Vec<Node> = std::iter::from_fn(|| pq.dequeue().map(|(u, _)| u)).collect();
        assert_eq!(order, vec![4, 1, 5, 0, 2]);
    }

    #[test]
    fn update_and_contains() {
        let mut pq = NodePriorityQueue::new(3);
        assert_eq!(pq.update(0, 1.0), None);

        pq.enqueue(0, 2.0);
        pq.enqueue(1, 1.0);
        assert_eq!(pq.peek(), Some((1, 1.0)));
        assert_eq!(pq.priority(0), Some(2.0));
        assert_eq!(pq.priority(2), None);

        // increasing a priority sifts down
        assert_eq!(pq.update(1, 3.0), Some(1.0));
        assert_eq!(pq.dequeue(), Some((0, 2.0)));
        assert!(!pq.contains(0));
        assert!(pq.contains(1));
        assert_eq!(pq.len(), 1);
        assert_eq!(pq.dequeue(), Some((1, 3.0)));
        assert!(pq.is_empty());
        assert_eq!(pq.dequeue(), None);
    }

    #[test]
    fn random_operations_sort() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for _ in 0..50 {
            let n = rng.random_range(1..100);
            let mut pq = NodePriorityQueue::new(n);
            let mut prios = vec![0u32; n as usize];

            for u in 0..n {
                prios[u as usize] = rng.random_range(0..1000);
                pq.enqueue(u, prios[u as usize]);
            }
            for _ in 0..n {
                let u = rng.random_range(0..n);
                let p = rng.random_range(0..1000);
                assert_eq!(pq.update(u, p), Some(prios[u as usize]));
                prios[u as usize] = p;
            }

            let mut last = 0;
            while let Some((u, p)) = pq.dequeue() {
                assert_eq!(p, prios[u as usize]);
                assert!(last <= p);
                last = p;
            }
        }
    }
}

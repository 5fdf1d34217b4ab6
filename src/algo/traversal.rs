/*!
# Traversals

Lazy BFS/DFS iterators over the nodes reachable from a root, optionally yielding the
predecessor of every node, and the materialized results [`BfsTree`] (hop counts) and
[`DfsTree`] (discovery times). Everything is reachable as a method on the graph through
[`Traversal`].

Traversals only look at the adjacency of a graph and ignore edge weights.
*/

use super::*;
use std::{collections::VecDeque, marker::PhantomData};

/// Item yielded by a traversal: the visited node and, if tracked, the node it was reached from
pub trait SequencedItem: Clone + Copy {
    fn new_with_predecessor(predecessor: Node, item: Node) -> Self;

    fn new_without_predecessor(item: Node) -> Self;

    /// Returns the visited node
    fn item(&self) -> Node;

    /// Returns the node `item` was discovered from; `None` for roots or if untracked
    fn predecessor(&self) -> Option<Node>;

    /// Returns a pair `(predecessor, item)`
    fn predecessor_with_item(&self) -> (Option<Node>, Node) {
        (self.predecessor(), self.item())
    }
}

impl SequencedItem for Node {
    fn new_with_predecessor(_: Node, item: Node) -> Self {
        item
    }
    fn new_without_predecessor(item: Node) -> Self {
        item
    }
    fn item(&self) -> Node {
        *self
    }
    fn predecessor(&self) -> Option<Node> {
        None
    }
}

/// `(predecessor, node)`; a root is stored as `(root, root)`
pub type PredecessorOfNode = (Node, Node);

impl SequencedItem for PredecessorOfNode {
    fn new_with_predecessor(predecessor: Node, item: Node) -> Self {
        (predecessor, item)
    }
    fn new_without_predecessor(item: Node) -> Self {
        (item, item)
    }
    fn item(&self) -> Node {
        self.1
    }
    fn predecessor(&self) -> Option<Node> {
        if self.0 == self.1 { None } else { Some(self.0) }
    }
}

/// Frontier of a traversal: a queue ([`VecDeque`]) gives BFS, a stack ([`Vec`]) gives DFS
pub trait NodeSequencer<T> {
    fn init(u: T) -> Self;

    fn push(&mut self, item: T);

    fn pop(&mut self) -> Option<T>;

    fn cardinality(&self) -> usize;
}

impl<T> NodeSequencer<T> for VecDeque<T> {
    fn init(u: T) -> Self {
        Self::from(vec![u])
    }
    fn push(&mut self, u: T) {
        self.push_back(u)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

impl<T> NodeSequencer<T> for Vec<T> {
    fn init(u: T) -> Self {
        vec![u]
    }
    fn push(&mut self, u: T) {
        self.push(u)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

/// Traversal iterator, generic over the frontier `S` and the yielded item `I`.
///
/// Nodes are marked when pushed onto the frontier, so every reachable node is yielded exactly
/// once and its predecessor is the first node that discovered it (also for DFS).
pub struct TraversalSearch<'a, G, S, I>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
{
    graph: &'a G,
    visited: NodeBitSet,
    sequencer: S,
    stop_at: Option<Node>,
    _item: PhantomData<I>,
}

/// Breadth-first traversal yielding nodes
pub type BFS<'a, G> = TraversalSearch<'a, G, VecDeque<Node>, Node>;

/// Depth-first traversal yielding nodes
pub type DFS<'a, G> = TraversalSearch<'a, G, Vec<Node>, Node>;

/// Breadth-first traversal yielding `(predecessor, node)`
pub type BFSWithPredecessor<'a, G> =
    TraversalSearch<'a, G, VecDeque<PredecessorOfNode>, PredecessorOfNode>;

/// Depth-first traversal yielding `(predecessor, node)`
pub type DFSWithPredecessor<'a, G> =
    TraversalSearch<'a, G, Vec<PredecessorOfNode>, PredecessorOfNode>;

impl<G, S, I> WithGraphRef<G> for TraversalSearch<'_, G, S, I>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
{
    fn graph_ref(&self) -> &G {
        self.graph
    }
}

impl<G, S, I> Iterator for TraversalSearch<'_, G, S, I>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
{
    type Item = I;

    fn next(&mut self) -> Option<Self::Item> {
        let popped = self.sequencer.pop()?;
        let u = popped.item();

        if self.stop_at == Some(u) {
            // the stopper ends the search
            while self.sequencer.pop().is_some() {}
        } else {
            for v in self.graph.neighbors_of(u) {
                if !self.visited.set_bit(v) {
                    self.sequencer.push(I::new_with_predecessor(u, v));
                }
            }
        }

        Some(popped)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (
            self.sequencer.cardinality(),
            Some(
                self.graph.len() - self.visited.cardinality() as usize
                    + self.sequencer.cardinality(),
            ),
        )
    }
}

impl<'a, G, S, I> TraversalSearch<'a, G, S, I>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
{
    /// Starts a traversal at `start`.
    /// ** Panics if `start >= n` **
    pub fn new(graph: &'a G, start: Node) -> Self {
        let mut visited = graph.vertex_bitset_unset();
        visited.set_bit(start);
        Self {
            graph,
            visited,
            sequencer: S::init(I::new_without_predecessor(start)),
            stop_at: None,
            _item: PhantomData,
        }
    }

    /// Returns *true* if `u` was pushed onto the frontier at some point
    pub fn did_visit_node(&self, u: Node) -> bool {
        self.visited.get_bit(u)
    }

    /// Restarts an exhausted search at the smallest undiscovered node.
    /// Returns *false* if every node was discovered already.
    /// ** Panics if the frontier is not empty **
    pub fn try_restart_at_unvisited(&mut self) -> bool {
        assert_eq!(self.sequencer.cardinality(), 0);
        match self.graph.vertices().find(|&u| !self.visited.get_bit(u)) {
            None => false,
            Some(x) => {
                self.visited.set_bit(x);
                self.sequencer.push(I::new_without_predecessor(x));
                true
            }
        }
    }

    /// Ends the traversal right after `stopper` has been yielded
    pub fn set_stop_at(&mut self, stopper: Node) {
        self.stop_at = Some(stopper);
    }

    /// Ends the traversal right after `stopper` has been yielded
    pub fn stop_at(mut self, stopper: Node) -> Self {
        self.set_stop_at(stopper);
        self
    }
}

/// Turns a traversal with predecessors into the parent array of its search tree
pub trait TraversalTree<'a, G>:
    WithGraphRef<G> + Iterator<Item = PredecessorOfNode> + Sized
where
    G: 'a + AdjacencyList,
{
    /// Runs the traversal to its end and writes the parent of every discovered node into `tree`.
    /// Entries of roots and undiscovered nodes are left untouched.
    fn parent_array_into(&mut self, tree: &mut [Node]) {
        for pred_with_item in self.by_ref() {
            if let Some(p) = pred_with_item.predecessor() {
                tree[pred_with_item.item() as usize] = p;
            }
        }
    }

    /// Like [`TraversalTree::parent_array_into`], on an array where every node is its own parent.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2)]);
    ///
    /// let parents = g.bfs_with_predecessor(0).parent_array();
    /// assert_eq!(parents, vec![0, 0, 1]);
    /// ```
    fn parent_array(&mut self) -> Vec<Node> {
        let mut tree: Vec<_> = self.graph_ref().vertices_range().collect();
        self.parent_array_into(&mut tree);
        tree
    }
}

impl<'a, G, S> TraversalTree<'a, G> for TraversalSearch<'a, G, S, PredecessorOfNode>
where
    G: AdjacencyList,
    S: NodeSequencer<PredecessorOfNode>,
{
}

/// Reconstructs the path `root -> .. -> target` by following `parents` from `target`
pub(crate) fn path_from_parents(
    parents: &[Option<Node>],
    root: Node,
    target: Node,
) -> Option<Vec<Node>> {
    let mut path = vec![target];
    let mut u = target;
    while u != root {
        u = parents[u as usize]?;
        path.push(u);
        debug_assert!(path.len() <= parents.len());
    }
    path.reverse();
    Some(path)
}

/// Result of a breadth-first search from a single root.
///
/// Every node of the graph has an entry: nodes not reachable from the root have no hop count
/// and no parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BfsTree {
    root: Node,
    order: Vec<Node>,
    hops: Vec<Option<NumNodes>>,
    parents: Vec<Option<Node>>,
}

impl BfsTree {
    /// Runs a BFS from `root`
    pub fn new<G: AdjacencyList>(graph: &G, root: Node) -> Self {
        let mut hops = vec![None; graph.len()];
        let mut parents = vec![None; graph.len()];
        let mut order = Vec::new();

        for item in graph.bfs_with_predecessor(root) {
            let (pred, u) = item.predecessor_with_item();
            hops[u as usize] = Some(pred.map_or(0, |p| hops[p as usize].unwrap_or(0) + 1));
            parents[u as usize] = pred;
            order.push(u);
        }

        debug!(root, reached = order.len(), "breadth-first search finished");
        Self {
            root,
            order,
            hops,
            parents,
        }
    }

    /// Returns the root of the search
    pub fn root(&self) -> Node {
        self.root
    }

    /// Returns the reached nodes in the order they were visited
    pub fn order(&self) -> &[Node] {
        &self.order
    }

    /// Returns the number of edges on a shortest unweighted path from the root to `u`,
    /// or `None` if `u` is unreachable
    pub fn hops(&self, u: Node) -> Option<NumNodes> {
        self.hops[u as usize]
    }

    /// Returns the hop counts of all nodes
    pub fn hop_counts(&self) -> &[Option<NumNodes>] {
        &self.hops
    }

    /// Returns the BFS-tree parent of `u` (`None` for the root and unreached nodes)
    pub fn parent(&self, u: Node) -> Option<Node> {
        self.parents[u as usize]
    }

    /// Returns the parents of all nodes
    pub fn parents(&self) -> &[Option<Node>] {
        &self.parents
    }

    /// Returns *true* if `u` is reachable from the root
    pub fn is_reached(&self, u: Node) -> bool {
        self.hops[u as usize].is_some()
    }

    /// Returns a path with the fewest edges from the root to `u`
    pub fn path_to(&self, u: Node) -> Option<Vec<Node>> {
        path_from_parents(&self.parents, self.root, u)
    }
}

/// Result of a depth-first search from a single root.
///
/// `time(u)` is the discovery timestamp of `u`: the root has time `0` and the timestamp
/// increases by one for every node taken from the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfsTree {
    root: Node,
    order: Vec<Node>,
    times: Vec<Option<NumNodes>>,
    parents: Vec<Option<Node>>,
}

impl DfsTree {
    /// Runs a DFS from `root`
    pub fn new<G: AdjacencyList>(graph: &G, root: Node) -> Self {
        let mut times = vec![None; graph.len()];
        let mut parents = vec![None; graph.len()];
        let mut order = Vec::new();

        for (time, item) in graph.dfs_with_predecessor(root).enumerate() {
            let (pred, u) = item.predecessor_with_item();
            times[u as usize] = Some(time as NumNodes);
            parents[u as usize] = pred;
            order.push(u);
        }

        debug!(root, reached = order.len(), "depth-first search finished");
        Self {
            root,
            order,
            times,
            parents,
        }
    }

    /// Returns the root of the search
    pub fn root(&self) -> Node {
        self.root
    }

    /// Returns the reached nodes in the order they were visited
    pub fn order(&self) -> &[Node] {
        &self.order
    }

    /// Returns the discovery time of `u`, or `None` if `u` is unreachable
    pub fn time(&self, u: Node) -> Option<NumNodes> {
        self.times[u as usize]
    }

    /// Returns the discovery times of all nodes
    pub fn times(&self) -> &[Option<NumNodes>] {
        &self.times
    }

    /// Returns the DFS-tree parent of `u` (`None` for the root and unreached nodes)
    pub fn parent(&self, u: Node) -> Option<Node> {
        self.parents[u as usize]
    }

    /// Returns the parents of all nodes
    pub fn parents(&self) -> &[Option<Node>] {
        &self.parents
    }

    /// Returns *true* if `u` is reachable from the root
    pub fn is_reached(&self, u: Node) -> bool {
        self.times[u as usize].is_some()
    }

    /// Returns the depth of every node in the DFS-tree
    pub fn depths(&self) -> Vec<Option<NumNodes>> {
        let mut depths = vec![None; self.times.len()];
        // parents are always discovered before their children
        for &u in &self.order {
            depths[u as usize] = Some(
                self.parents[u as usize]
                    .and_then(|p| depths[p as usize])
                    .map_or(0, |d| d + 1),
            );
        }
        depths
    }

    /// Returns the tree path from the root to `u`
    pub fn path_to(&self, u: Node) -> Option<Vec<Node>> {
        path_from_parents(&self.parents, self.root, u)
    }
}

/// Traversals as methods on the graph itself
pub trait Traversal: AdjacencyList + Sized {
    /// Returns an iterator that traverses nodes reachable from `start`
    /// in **breadth-first search (BFS) order**.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjArrayUndir::from_edges(2, [(0, 1)]);
    ///
    /// let order: Vec<_> = g.bfs(0).collect();
    /// assert_eq!(order, vec![0, 1]);
    /// ```
    fn bfs(&self, start: Node) -> BFS<'_, Self> {
        BFS::new(self, start)
    }

    /// Lazily yields the nodes reachable from `start` in depth-first order
    fn dfs(&self, start: Node) -> DFS<'_, Self> {
        DFS::new(self, start)
    }

    /// Like [`Traversal::bfs`], but yields `(predecessor, node)` for every node.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::{*, traversal::SequencedItem}};
    ///
    /// let g = AdjArrayUndir::from_edges(2, [(0, 1)]);
    ///
    /// let mut it = g.bfs_with_predecessor(0);
    /// assert_eq!(it.next().unwrap().item(), 0);
    /// assert_eq!(it.next().unwrap().predecessor(), Some(0));
    /// ```
    fn bfs_with_predecessor(&self, start: Node) -> BFSWithPredecessor<'_, Self> {
        BFSWithPredecessor::new(self, start)
    }

    /// Like [`Traversal::dfs`], but yields `(predecessor, node)` for every node.
    fn dfs_with_predecessor(&self, start: Node) -> DFSWithPredecessor<'_, Self> {
        DFSWithPredecessor::new(self, start)
    }

    /// Computes hop counts and BFS-tree parents for every node.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjArray::from_edges(4, [(0, 1), (1, 2), (0, 2)]);
    /// let tree = g.breadth_first(0);
    ///
    /// assert_eq!(tree.hops(2), Some(1));
    /// assert_eq!(tree.hops(3), None);
    /// assert_eq!(tree.parent(1), Some(0));
    /// ```
    fn breadth_first(&self, root: Node) -> BfsTree {
        BfsTree::new(self, root)
    }

    /// Computes discovery times and DFS-tree parents for every node.
    fn depth_first(&self, root: Node) -> DfsTree {
        DfsTree::new(self, root)
    }

    /// Computes a path with the fewest edges from `start` to `end` (both included).
    /// Returns `None` if `end` is unreachable.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjArrayUndir::from_edges(4, [(0, 1), (1, 2), (2, 3), (0, 3)]);
    /// assert_eq!(g.shortest_hop_path(1, 3), Some(vec![1, 0, 3]));
    /// assert_eq!(g.shortest_hop_path(2, 2), Some(vec![2]));
    /// ```
    fn shortest_hop_path(&self, start: Node, end: Node) -> Option<Vec<Node>> {
        let mut parents = vec![None; self.len()];
        for item in self.bfs_with_predecessor(start).stop_at(end) {
            let (pred, u) = item.predecessor_with_item();
            parents[u as usize] = pred;
            if u == end {
                return path_from_parents(&parents, start, end);
            }
        }
        None
    }
}

impl<G> Traversal for G where G: AdjacencyList + Sized {}

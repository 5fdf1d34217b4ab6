/*!
# Node Labels

Graphs in this crate are defined over dense nodes `0..n`. [`NodeLabels`] maps arbitrary hashable
labels (e.g. `&str`) onto such nodes in order of first appearance, and [`LabeledEdges`] collects
labelled weighted edges to build a graph from them.

```
use wgraphs::{prelude::*, utils::LabeledEdges};

let mut edges = LabeledEdges::new();
edges.link("S", "A", 5.0);
edges.link("A", "C", 6.0);

let (graph, labels): (AdjArray, _) = edges.build();
assert_eq!(graph.number_of_nodes(), 3);
assert_eq!(graph.weight(labels["S"], labels["A"]), 5.0);
assert_eq!(labels.label_of(2), Some(&"C"));
```
*/

use std::{hash::Hash, ops::Index};

use fxhash::FxHashMap;

use crate::{ops::*, *};

/// Bijection between labels and the nodes `0..n`
#[derive(Debug, Clone)]
pub struct NodeLabels<L> {
    nodes: FxHashMap<L, Node>,
    labels: Vec<L>,
}

impl<L> Default for NodeLabels<L> {
    fn default() -> Self {
        Self {
            nodes: FxHashMap::default(),
            labels: Vec::new(),
        }
    }
}

impl<L: Hash + Eq + Clone> NodeLabels<L> {
    /// Creates an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of mapped labels
    pub fn len(&self) -> NumNodes {
        self.labels.len() as NumNodes
    }

    /// Returns *true* if no label is mapped
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the node of `label`, assigning the next free node if it is new
    pub fn get_or_insert(&mut self, label: L) -> Node {
        if let Some(&u) = self.nodes.get(&label) {
            return u;
        }

        let u = self.labels.len() as Node;
        self.nodes.insert(label.clone(), u);
        self.labels.push(label);
        u
    }

    /// Returns the node of `label` if it is mapped
    pub fn node_of(&self, label: &L) -> Option<Node> {
        self.nodes.get(label).copied()
    }

    /// Returns the label of node `u` if it is mapped
    pub fn label_of(&self, u: Node) -> Option<&L> {
        self.labels.get(u as usize)
    }

    /// Translates a sequence of nodes (e.g. a path) into their labels
    pub fn labels_of<'a>(&'a self, nodes: &'a [Node]) -> impl Iterator<Item = &'a L> + 'a {
        nodes.iter().filter_map(|&u| self.label_of(u))
    }

    /// Returns all labels ordered by their node
    pub fn labels(&self) -> &[L] {
        &self.labels
    }
}

impl<L: Hash + Eq + Clone> Index<L> for NodeLabels<L> {
    type Output = Node;

    /// ** Panics if `label` is not mapped **
    fn index(&self, label: L) -> &Self::Output {
        &self.nodes[&label]
    }
}

/// Collection of labelled weighted edges
#[derive(Debug, Clone)]
pub struct LabeledEdges<L> {
    labels: NodeLabels<L>,
    edges: Vec<WeightedEdge>,
}

impl<L> Default for LabeledEdges<L> {
    fn default() -> Self {
        Self {
            labels: NodeLabels::default(),
            edges: Vec::new(),
        }
    }
}

impl<L: Hash + Eq + Clone> LabeledEdges<L> {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `label` as a node even if no edge is incident to it
    pub fn add_node(&mut self, label: L) -> Node {
        self.labels.get_or_insert(label)
    }

    /// Adds the edge `(u, v)` with weight `weight`
    pub fn link(&mut self, u: L, v: L, weight: Weight) {
        let u = self.labels.get_or_insert(u);
        let v = self.labels.get_or_insert(v);
        self.edges.push(WeightedEdge(u, v, weight));
    }

    /// Adds the edge `(u, v)` with unit weight
    pub fn add_edge(&mut self, u: L, v: L) {
        self.link(u, v, 1.0);
    }

    /// Returns the current label mapping
    pub fn labels(&self) -> &NodeLabels<L> {
        &self.labels
    }

    /// Builds a graph with one node per label and returns it together with the mapping.
    /// Later links of the same pair overwrite earlier ones.
    pub fn build<G: GraphFromScratch>(self) -> (G, NodeLabels<L>) {
        let graph = G::from_edges(self.labels.len(), self.edges);
        (graph, self.labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::*;

    #[test]
    fn labels_in_order_of_appearance() {
        let mut labels = NodeLabels::new();
        assert_eq!(labels.get_or_insert("x"), 0);
        assert_eq!(labels.get_or_insert("y"), 1);
        assert_eq!(labels.get_or_insert("x"), 0);

        assert_eq!(labels.len(), 2);
        assert_eq!(labels.node_of(&"y"), Some(1));
        assert_eq!(labels.node_of(&"z"), None);
        assert_eq!(labels.label_of(5), None);
        assert_eq!(
            labels.labels_of(&[1, 0, 1]).copied().collect::<Vec<_>>(),
            vec!["y", "x", "y"]
        );
    }

    #[test]
    fn build_undirected() {
        let mut edges = LabeledEdges::new();
        edges.add_node(String::from("lonely"));
        edges.link(String::from("a"), String::from("b"), 2.0);
        edges.add_edge(String::from("b"), String::from("c"));

        let (graph, labels): (AdjArrayUndir, _) = edges.build();
        assert_eq!(graph.number_of_nodes(), 4);
        assert_eq!(graph.number_of_edges(), 2);
        assert_eq!(labels[String::from("lonely")], 0);
        assert_eq!(graph.weight(labels[String::from("b")], labels[String::from("a")]), 2.0);
        assert_eq!(graph.degree_of(0), 0);
    }
}

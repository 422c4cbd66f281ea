/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! An immutable weighted edge-list graph and the associated node labels.
//!
//! The graph is built once, before the worker group starts, and is never
//! mutated afterwards: every worker holds (a shared reference to) an identical
//! copy. Undirected inputs are expanded at construction time into two directed
//! arcs per edge.

/// The weight of an arc.
///
/// Weights may be negative; see the [solver
/// documentation](crate::solver::BellmanFord) for the consequences of
/// negative cycles.
pub type Weight = i64;

/// A directed weighted arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arc {
    pub src: usize,
    pub dst: usize,
    pub weight: Weight,
}

/// An immutable graph with `num_nodes` nodes, indexed from zero, and a
/// sequence of directed weighted arcs.
///
/// # Examples
///
/// ```
/// use bellman_rounds::graph::Graph;
///
/// // Two undirected edges become four arcs.
/// let g = Graph::from_undirected(3, [(0, 1, 2), (1, 2, 3)]);
/// assert_eq!(g.num_nodes(), 3);
/// assert_eq!(g.num_arcs(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    num_nodes: usize,
    arcs: Vec<Arc>,
}

impl Graph {
    /// Creates a graph with the given number of nodes and no arcs.
    pub fn empty(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            arcs: Vec::new(),
        }
    }

    /// Creates a graph from a sequence of directed `(src, dst, weight)`
    /// triples.
    pub fn from_arcs(
        num_nodes: usize,
        arcs: impl IntoIterator<Item = (usize, usize, Weight)>,
    ) -> Self {
        let mut graph = Self::empty(num_nodes);
        for (src, dst, weight) in arcs {
            graph.add_arc(src, dst, weight);
        }
        graph
    }

    /// Creates a graph from a sequence of undirected `(u, v, weight)` edges,
    /// expanding each edge into the two arcs `(u, v, weight)` and
    /// `(v, u, weight)`.
    pub fn from_undirected(
        num_nodes: usize,
        edges: impl IntoIterator<Item = (usize, usize, Weight)>,
    ) -> Self {
        let mut graph = Self::empty(num_nodes);
        for (u, v, weight) in edges {
            graph.add_arc(u, v, weight);
            graph.add_arc(v, u, weight);
        }
        graph
    }

    /// Adds a single directed arc.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is out of range.
    pub fn add_arc(&mut self, src: usize, dst: usize, weight: Weight) {
        assert!(
            src < self.num_nodes && dst < self.num_nodes,
            "Arc ({src}, {dst}) out of range for a graph with {} nodes",
            self.num_nodes
        );
        self.arcs.push(Arc { src, dst, weight });
    }

    /// Returns the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns the number of (directed) arcs.
    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    /// Returns the arcs, in insertion order.
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }
}

/// A mapping from node indices to display names.
///
/// Like [`Graph`], the table is built once and replicated unchanged on every
/// worker. Nodes without a name map to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    names: Vec<String>,
}

impl LabelTable {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Returns the name of the given node, or `None` if the node has no
    /// entry.
    pub fn get(&self, node: usize) -> Option<&str> {
        self.names.get(node).map(String::as_str)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<String> for LabelTable {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

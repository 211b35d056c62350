use std::ops::Range;

use itertools::Itertools;

use crate::{edge::*, node::*};

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns the range `0..n` of all nodes.
    /// In contrast to iterators borrowing the graph, the range may be used where additional
    /// mutable references of the graph are needed.
    fn vertices_range(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> impl Iterator<Item = Node> + '_ {
        self.vertices_range()
    }

    /// Returns empty bitset with one entry per node
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.number_of_nodes())
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of (undirected) edges of the graph
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn is_singleton_graph(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Traits pertaining getters for neighborhoods & edges
pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Returns an iterator over the (open) neighborhood of a given vertex.
    /// The order of neighbors is unspecified.
    /// ** Panics if `u >= n` **
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_;

    /// Returns the number of neighbors of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns an iterator over the degrees of all nodes
    fn degrees(&self) -> impl Iterator<Item = NumNodes> + '_ {
        self.vertices().map(|u| self.degree_of(u))
    }

    /// Returns the maximum degree in the graph
    fn max_degree(&self) -> NumNodes {
        self.degrees().max().unwrap_or(0)
    }

    /// Returns an iterator to all vertices without any neighbor
    fn isolated_vertices(&self) -> impl Iterator<Item = Node> + '_ {
        self.vertices().filter(|&u| self.degree_of(u) == 0)
    }

    /// Returns an iterator over edges of a given vertex.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    /// ** Panics if `u >= n` **
    fn edges_of(&self, u: Node, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.neighbors_of(u)
            .map(move |v| Edge(u, v))
            .filter(move |e| !only_normalized || e.is_normalized())
    }

    /// Returns an iterator over edges of a given vertex in sorted order.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    /// ** Panics if `u >= n` **
    fn ordered_edges_of(&self, u: Node, only_normalized: bool) -> impl Iterator<Item = Edge> {
        let mut edges = self.edges_of(u, only_normalized).collect_vec();
        edges.sort();
        edges.into_iter()
    }

    /// Returns an iterator over all edges in the graph.
    /// If `only_normalized`, then every undirected edge is reported exactly once.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.vertices_range()
            .flat_map(move |u| self.edges_of(u, only_normalized))
    }

    /// Returns an iterator over all edges in the graph in sorted order.
    /// If `only_normalized`, then every undirected edge is reported exactly once.
    fn ordered_edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.vertices_range()
            .flat_map(move |u| self.ordered_edges_of(u, only_normalized))
    }
}

/// Trait to test existence of certain structures in a graph.
pub trait AdjacencyTest: GraphNodeOrder {
    /// Returns *true* if the egde {u,v} exists in the graph.
    /// ** Panics if `u >= n || v >= n` **
    fn has_edge(&self, u: Node, v: Node) -> bool;
}

/// Provides functions to insert/delete edges between existing nodes
pub trait GraphEdgeEditing {
    /// Adds the edge {u,v} to the graph.
    /// ** Panics if `u >= n || v >= n` or the edge was already present **
    fn add_edge(&mut self, u: Node, v: Node) {
        assert!(!self.try_add_edge(u, v))
    }

    /// Adds the edge {u,v} to the graph.
    /// Returns *true* if the edge was present before (the graph is left unchanged).
    /// ** Panics if `u >= n || v >= n` **
    fn try_add_edge(&mut self, u: Node, v: Node) -> bool;

    /// Adds all edges in the collection, ignoring those already present
    fn add_edges(&mut self, edges: impl IntoIterator<Item = impl Into<Edge>>) {
        for Edge(u, v) in edges.into_iter().map(|d| d.into()) {
            self.try_add_edge(u, v);
        }
    }

    /// Removes the edge {u,v} from the graph.
    /// If the edge was removed, returns *true* and *false* otherwise.
    /// ** Panics if u, v >= n **
    fn try_remove_edge(&mut self, u: Node, v: Node) -> bool;
}

/// Trait extending the methods of the GraphEdgeEditing trait by node-local operations.
pub trait GraphLocalEdgeEditing: GraphEdgeEditing {
    /// Removes all edges adjacent to node u in the graph.
    /// ** Panics if `u >= n` **
    fn remove_edges_at_node(&mut self, u: Node);

    /// Removes all edges adjacent to any node u in an iterator in the graph.
    /// ** Panics if any node in `nodes` is `>= n` **
    fn remove_edges_at_nodes<I: Iterator<Item = Node>>(&mut self, nodes: I) {
        for node in nodes {
            self.remove_edges_at_node(node);
        }
    }
}

/// Bidirectional translation between user names and dense node ids.
pub trait UserDirectory: GraphNodeOrder {
    /// Returns the id of a user if it exists
    fn id_of(&self, name: &str) -> Option<Node>;

    /// Returns the name of a node.
    /// ** Panics if `u >= n` **
    fn name_of(&self, u: Node) -> &str;

    /// Returns all names in id order
    fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.vertices_range().map(move |u| self.name_of(u))
    }
}

/// Neighborhood queries that depend on user names.
///
/// Every traversal in this crate expands neighbors in ascending order of their *names* (not ids)
/// which makes results independent of insertion order.
pub trait NamedAdjacency: AdjacencyList + UserDirectory {
    /// Returns the neighbors of `u` sorted ascending by name.
    /// ** Panics if `u >= n` **
    fn neighbors_by_name(&self, u: Node) -> Vec<Node> {
        let mut nbs = self.neighbors_of(u).collect_vec();
        nbs.sort_unstable_by(|&a, &b| self.name_of(a).cmp(self.name_of(b)));
        nbs
    }

    /// Returns the names of all neighbors of `u` in ascending order.
    /// ** Panics if `u >= n` **
    fn neighbor_names_of(&self, u: Node) -> Vec<&str> {
        self.neighbors_of(u)
            .map(|v| self.name_of(v))
            .sorted_unstable()
            .collect()
    }
}

impl<G> NamedAdjacency for G where G: AdjacencyList + UserDirectory {}

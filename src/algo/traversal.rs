/*!
Graph traversal iterators shared by the search algorithms.

This module provides:
- [`TraversalSearch`]: a lazy breadth-first iterator, with or without predecessor tracking,
  that can stop once a given node has been dequeued,
- [`PreOrderDfs`]: a lazy iterative depth-first iterator producing the same pre-order as a
  recursive DFS,
- the [`Traversal`] trait exposing both directly as methods on graphs.

All iterators expand neighbors in ascending order of their names, which makes every traversal
deterministic and independent of insertion order.
*/

use super::*;
use std::{collections::VecDeque, marker::PhantomData};

/// Abstraction for items yielded by a traversal iterator.
///
/// A `SequencedItem` encodes both the **node currently visited**
/// and an **optional predecessor** that represents its parent
/// in the traversal tree.
///
/// Two implementations are provided:
/// - [`Node`]: stores only the node (no predecessor information).
/// - [`PredecessorOfNode`]: stores `(predecessor, node)` pairs.
pub trait SequencedItem: Clone + Copy {
    /// Constructs a new item with a predecessor.
    fn new_with_predecessor(predecessor: Node, item: Node) -> Self;

    /// Constructs a new item without a predecessor (the root of a traversal).
    fn new_without_predecessor(item: Node) -> Self;

    /// Returns the node represented by this item.
    fn item(&self) -> Node;

    /// Returns the predecessor of this node, if any.
    fn predecessor(&self) -> Option<Node>;

    /// Returns a pair `(predecessor, item)` where the predecessor
    /// may be `None` if not tracked.
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

/// Compact representation of `(predecessor, node)` used for
/// traversals with parent tracking.
///
/// Internally, the absence of a predecessor is encoded by
/// setting both tuple entries to the same node value.
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

/// Breadth-first traversal iterator.
///
/// Nodes are marked as visited when they are *discovered* (enqueued) and yielded when they are
/// dequeued. Parameterized by the type of items yielded (either `Node` or `PredecessorOfNode`).
pub struct TraversalSearch<'a, G, I>
where
    G: NamedAdjacency,
    I: SequencedItem,
{
    graph: &'a G,
    visited: NodeBitSet,
    queue: VecDeque<I>,
    stop_at: Option<Node>,
    stopped: bool,
    _item: PhantomData<I>,
}

/// A BFS traversal iterator over the graph, visiting nodes in
/// breadth-first order from a given starting node.
pub type BFS<'a, G> = TraversalSearch<'a, G, Node>;

/// A BFS traversal iterator that records predecessor information,
/// producing a spanning tree of the search.
pub type BFSWithPredecessor<'a, G> = TraversalSearch<'a, G, PredecessorOfNode>;

impl<'a, G, I> TraversalSearch<'a, G, I>
where
    G: NamedAdjacency,
    I: SequencedItem,
{
    /// Creates a new traversal iterator starting from `start`.
    /// ** Panics if `start >= n` **
    pub fn new(graph: &'a G, start: Node) -> Self {
        let mut visited = graph.vertex_bitset_unset();
        visited.set_bit(start);
        Self {
            graph,
            visited,
            queue: VecDeque::from(vec![I::new_without_predecessor(start)]),
            stop_at: None,
            stopped: false,
            _item: PhantomData,
        }
    }

    /// Sets a stopper node. If this node is dequeued, the iterator returns it and afterwards
    /// only None. Nodes discovered before that remain available via [`TraversalSearch::frontier`].
    pub fn set_stop_at(&mut self, stopper: Node) {
        self.stop_at = Some(stopper);
    }

    /// Builder variant of [`TraversalSearch::set_stop_at`]
    pub fn stop_at(mut self, stopper: Node) -> Self {
        self.set_stop_at(stopper);
        self
    }

    /// Returns the items that were discovered but not yet yielded, in queue order
    pub fn frontier(&self) -> impl Iterator<Item = I> + '_ {
        self.queue.iter().copied()
    }

    /// Returns *true* if `u` was discovered so far
    pub fn did_visit_node(&self, u: Node) -> bool {
        self.visited.get_bit(u)
    }

    /// Tries to restart the search at a yet unvisited node and returns
    /// true iff successful. Requires that search came to a hold earlier,
    /// i.e. self.next() returned None
    pub fn try_restart_at_unvisited(&mut self) -> bool {
        assert!(self.queue.is_empty() || self.stopped);
        self.queue.clear();
        self.stopped = false;

        match self.graph.vertices().find(|&u| !self.visited.get_bit(u)) {
            None => false,
            Some(x) => {
                self.visited.set_bit(x);
                self.queue.push_back(I::new_without_predecessor(x));
                true
            }
        }
    }
}

impl<G, I> Iterator for TraversalSearch<'_, G, I>
where
    G: NamedAdjacency,
    I: SequencedItem,
{
    type Item = I;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stopped {
            return None;
        }

        let popped = self.queue.pop_front()?;
        let u = popped.item();

        if self.stop_at == Some(u) {
            self.stopped = true;
        } else {
            for v in self.graph.neighbors_by_name(u) {
                if !self.visited.set_bit(v) {
                    self.queue.push_back(I::new_with_predecessor(u, v));
                }
            }
        }

        Some(popped)
    }
}

/// Iterative depth-first traversal producing nodes in pre-order.
///
/// Uses an explicit stack. A node is only marked as visited when it is popped, and neighbors are
/// pushed in *descending* name order, so the sequence equals that of a recursive DFS that visits
/// neighbors in ascending name order. Nodes may be pushed multiple times.
pub struct PreOrderDfs<'a, G>
where
    G: NamedAdjacency,
{
    graph: &'a G,
    visited: NodeBitSet,
    stack: Vec<Node>,
}

impl<'a, G> PreOrderDfs<'a, G>
where
    G: NamedAdjacency,
{
    /// Creates a new pre-order iterator starting from `start`.
    /// ** Panics if `start >= n` **
    pub fn new(graph: &'a G, start: Node) -> Self {
        assert!(start < graph.number_of_nodes());
        Self {
            graph,
            visited: graph.vertex_bitset_unset(),
            stack: vec![start],
        }
    }
}

impl<G> Iterator for PreOrderDfs<'_, G>
where
    G: NamedAdjacency,
{
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let u = self.stack.pop()?;
            if self.visited.set_bit(u) {
                continue;
            }

            let nbs = self.graph.neighbors_by_name(u);
            self.stack
                .extend(nbs.into_iter().rev().filter(|&v| !self.visited.get_bit(v)));

            return Some(u);
        }
    }
}

/// Provides convenient traversal methods (BFS, pre-order DFS) on named graphs
pub trait Traversal: NamedAdjacency + Sized {
    /// Returns an iterator that traverses nodes reachable from `start`
    /// in **breadth-first search (BFS) order**.
    ///
    /// # Examples
    /// ```
    /// use socialgraph::{prelude::*, algo::*};
    ///
    /// let g = SocialGraph::from_friendships([("a", "c"), ("a", "b")]);
    ///
    /// let order: Vec<_> = g.bfs(0).collect();
    /// assert_eq!(order, vec![0, 2, 1]);
    /// ```
    fn bfs(&self, start: Node) -> BFS<'_, Self> {
        BFS::new(self, start)
    }

    /// Returns a BFS iterator starting from `start` that additionally
    /// yields the predecessor relation (edges traversed).
    fn bfs_with_predecessor(&self, start: Node) -> BFSWithPredecessor<'_, Self> {
        BFSWithPredecessor::new(self, start)
    }

    /// Returns an iterator over all nodes reachable from `start` in DFS pre-order
    fn dfs_pre_order(&self, start: Node) -> PreOrderDfs<'_, Self> {
        PreOrderDfs::new(self, start)
    }

    /// Computes the hop distance from `start` to every node.
    /// Unreachable nodes are assigned `INVALID_NODE`.
    fn bfs_distances(&self, start: Node) -> Vec<NumNodes> {
        let mut distances = vec![INVALID_NODE; self.len()];
        for (p, u) in self.bfs_with_predecessor(start) {
            distances[u as usize] = if p == u {
                0
            } else {
                distances[p as usize] + 1
            };
        }
        distances
    }
}

impl<G> Traversal for G where G: NamedAdjacency + Sized {}

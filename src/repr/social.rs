use std::{collections::BTreeMap, fmt::Debug};

use fxhash::FxHashMap;
use log::{debug, trace};

use super::*;
use crate::error::{GraphError, Result};

/// An undirected social graph of named users, generic over its [`Neighborhood`] storage.
/// Use the aliases [`SocialGraph`] (default) or [`AdjArraySocial`].
///
/// Every user owns a dense id in `0..n` assigned in insertion order; id `i` always refers to the
/// `i`-th entry of [`SocialGraph::users_in_order`]. Friendships are symmetric, never self-loops
/// and never duplicated.
///
/// The graph is only mutated through its own methods. Algorithms borrow it immutably, so a
/// running search can never observe a mutation.
///
/// # Examples
/// ```
/// use socialgraph::prelude::*;
///
/// let mut graph = SocialGraph::new();
/// graph.add_friendship("Alice", "Bob");
/// graph.add_friendship("Bob", "Carol");
///
/// assert!(graph.are_friends("Bob", "Alice"));
/// assert_eq!(graph.get_friends("Bob"), vec!["Alice", "Carol"]);
/// assert_eq!(graph.get_user_id("Carol").unwrap(), 2);
/// ```
#[derive(Clone, Default)]
pub struct NamedGraph<Nbs: Neighborhood> {
    names: Vec<String>,
    ids: FxHashMap<String, Node>,
    nbs: Vec<Nbs>,
    num_edges: NumEdges,
}

/// Default representation using `SmallVec`-backed neighborhoods
pub type SocialGraph = NamedGraph<SparseNeighborhood>;

/// Representation using an Adjacency-Array
pub type AdjArraySocial = NamedGraph<ArrNeighborhood>;

impl<Nbs: NeighborhoodSliceMut> NamedGraph<Nbs> {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph from a list of friendships; endpoints are created on the fly
    pub fn from_friendships<'a, I>(friendships: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut graph = Self::new();
        for (u, v) in friendships {
            graph.add_friendship(u, v);
        }
        graph
    }

    /// Adds a user and returns *true* if it was newly created.
    ///
    /// The name is trimmed; empty names and already known users are ignored.
    pub fn add_user(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.ids.contains_key(name) {
            trace!("add_user({name:?}) ignored");
            return false;
        }

        let id = self.names.len() as Node;
        debug_assert!(id != INVALID_NODE);

        self.ids.insert(name.to_string(), id);
        self.names.push(name.to_string());
        self.nbs.push(Nbs::default());

        debug!("added user {name:?} as {id}");
        true
    }

    /// Returns *true* if a user with exactly this name exists
    pub fn has_user(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Returns all user names (in id order)
    pub fn get_all_users(&self) -> Vec<&str> {
        self.names.iter().map(String::as_str).collect()
    }

    /// Returns the ordered user list: position `i` holds the user with id `i`
    pub fn users_in_order(&self) -> &[String] {
        &self.names
    }

    /// Makes `u` and `v` friends and returns *true* if the friendship is new.
    ///
    /// Missing endpoints are created. Names are trimmed; befriending oneself or using an empty
    /// name leaves the graph unchanged.
    pub fn add_friendship(&mut self, u: &str, v: &str) -> bool {
        let (u, v) = (u.trim(), v.trim());
        if u == v || u.is_empty() || v.is_empty() {
            trace!("add_friendship({u:?}, {v:?}) ignored");
            return false;
        }

        self.add_user(u);
        self.add_user(v);

        let (uid, vid) = (self.ids[u], self.ids[v]);
        let is_new = !self.try_add_edge(uid, vid);
        if is_new {
            debug!("added friendship {u:?} -- {v:?}");
        }
        is_new
    }

    /// Returns the names of all friends of `name` in ascending order.
    /// Unknown users have no friends.
    pub fn get_friends(&self, name: &str) -> Vec<&str> {
        self.id_of(name)
            .map_or_else(Vec::new, |u| self.neighbor_names_of(u))
    }

    /// Returns *true* if both users exist and are friends
    pub fn are_friends(&self, u: &str, v: &str) -> bool {
        match (self.id_of(u), self.id_of(v)) {
            (Some(u), Some(v)) => self.has_edge(u, v),
            _ => false,
        }
    }

    /// Ends the friendship between `u` and `v` and returns *true* if there was one
    pub fn remove_friendship(&mut self, u: &str, v: &str) -> bool {
        let (Some(uid), Some(vid)) = (self.id_of(u), self.id_of(v)) else {
            return false;
        };

        let removed = self.try_remove_edge(uid, vid);
        if removed {
            debug!("removed friendship {u:?} -- {v:?}");
        }
        removed
    }

    /// Deletes a user together with all its friendships and returns *true* if it existed.
    ///
    /// Every id greater than the deleted id is shifted down by one so that ids remain the dense
    /// range `0..n`. This rewrites all neighborhoods and takes `O(n + m)` time.
    pub fn delete_user(&mut self, name: &str) -> bool {
        let Some(uid) = self.ids.remove(name) else {
            trace!("delete_user({name:?}) ignored");
            return false;
        };

        self.remove_edges_at_node(uid);
        self.nbs.remove(uid as usize);
        self.names.remove(uid as usize);

        for (new_id, name) in self.names.iter().enumerate().skip(uid as usize) {
            if let Some(id) = self.ids.get_mut(name.as_str()) {
                *id = new_id as Node;
            }
        }

        for nbs in &mut self.nbs {
            nbs.relabel_neighbors(|v| if v > uid { v - 1 } else { v });
        }

        debug!("deleted user {name:?} (was {uid}), {} users left", self.names.len());
        true
    }

    /// Returns the id of a user.
    ///
    /// # Errors
    /// Fails with [`GraphError::UnknownUser`] if no such user exists.
    pub fn get_user_id(&self, name: &str) -> Result<Node> {
        self.id_of(name)
            .ok_or_else(|| GraphError::UnknownUser(name.to_string()))
    }

    /// Returns the name of the user with id `u`.
    ///
    /// # Errors
    /// Fails with [`GraphError::UnknownId`] if `u >= n`.
    pub fn get_user_name(&self, u: Node) -> Result<&str> {
        self.names
            .get(u as usize)
            .map(String::as_str)
            .ok_or(GraphError::UnknownId(u))
    }

    /// Returns the ids of all neighbors of `u` (unordered).
    ///
    /// # Errors
    /// Fails with [`GraphError::UnknownId`] if `u >= n`.
    pub fn get_neighbors(&self, u: Node) -> Result<Vec<Node>> {
        self.nbs
            .get(u as usize)
            .map(|nbs| nbs.neighbors().collect())
            .ok_or(GraphError::UnknownId(u))
    }

    /// Maps every user to the sorted names of its friends
    pub fn adjacency_list(&self) -> BTreeMap<String, Vec<String>> {
        self.vertices()
            .map(|u| {
                (
                    self.name_of(u).to_string(),
                    self.neighbor_names_of(u)
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                )
            })
            .collect()
    }

    /// Returns the symmetric `n x n` 0/1-matrix in id order
    pub fn adjacency_matrix(&self) -> Vec<Vec<u8>> {
        let mut matrix = vec![vec![0u8; self.len()]; self.len()];
        for Edge(u, v) in self.edges(true) {
            matrix[u as usize][v as usize] = 1;
            matrix[v as usize][u as usize] = 1;
        }
        matrix
    }

    /// Returns the number of friendships
    pub fn number_of_friendships(&self) -> NumEdges {
        self.num_edges
    }

    /// Returns every friendship exactly once as a pair of names (smaller id first)
    pub fn friendships(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.ordered_edges(true)
            .map(|Edge(u, v)| (self.name_of(u), self.name_of(v)))
    }
}

impl<Nbs: Neighborhood> GraphNodeOrder for NamedGraph<Nbs> {
    fn number_of_nodes(&self) -> NumNodes {
        self.nbs.len() as NumNodes
    }
}

impl<Nbs: Neighborhood> GraphEdgeOrder for NamedGraph<Nbs> {
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl<Nbs: Neighborhood> AdjacencyList for NamedGraph<Nbs> {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.nbs[u as usize].neighbors()
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.nbs[u as usize].num_of_neighbors()
    }
}

impl<Nbs: Neighborhood> AdjacencyTest for NamedGraph<Nbs> {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        // Scan the smaller of both neighborhoods
        if self.degree_of(u) <= self.degree_of(v) {
            self.nbs[u as usize].has_neighbor(v)
        } else {
            self.nbs[v as usize].has_neighbor(u)
        }
    }
}

impl<Nbs: Neighborhood> GraphEdgeEditing for NamedGraph<Nbs> {
    /// Self-loops are never stored: `try_add_edge(u, u)` leaves the graph unchanged and
    /// returns *true*.
    fn try_add_edge(&mut self, u: Node, v: Node) -> bool {
        if u == v {
            return true;
        }

        if self.nbs[u as usize].try_add_neighbor(v) {
            true
        } else {
            assert!(!self.nbs[v as usize].try_add_neighbor(u));
            self.num_edges += 1;
            false
        }
    }

    fn try_remove_edge(&mut self, u: Node, v: Node) -> bool {
        if self.nbs[u as usize].try_remove_neighbor(v) {
            assert!(self.nbs[v as usize].try_remove_neighbor(u));
            self.num_edges -= 1;
            true
        } else {
            false
        }
    }
}

impl<Nbs: Neighborhood> GraphLocalEdgeEditing for NamedGraph<Nbs> {
    fn remove_edges_at_node(&mut self, u: Node) {
        let nbs = std::mem::take(&mut self.nbs[u as usize]);
        for v in nbs.neighbors() {
            self.nbs[v as usize].try_remove_neighbor(u);
        }
        self.num_edges -= nbs.num_of_neighbors() as NumEdges;
    }
}

impl<Nbs: Neighborhood> UserDirectory for NamedGraph<Nbs> {
    fn id_of(&self, name: &str) -> Option<Node> {
        self.ids.get(name).copied()
    }

    fn name_of(&self, u: Node) -> &str {
        &self.names[u as usize]
    }
}

impl<Nbs: NeighborhoodSliceMut> Debug for NamedGraph<Nbs> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.adjacency_list()).finish()
    }
}

impl<Nbs: NeighborhoodSliceMut> PartialEq for NamedGraph<Nbs> {
    /// Two graphs are equal if they assign the same ids to the same names and contain the same
    /// friendships
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
            && self.num_edges == other.num_edges
            && self
                .ordered_edges(true)
                .eq(other.ordered_edges(true))
    }
}

//! # Json
//!
//! Persistence of social graphs as a JSON snapshot
//! ```json
//! {
//!     "users": ["Alice", "Bob", "Carol"],
//!     "adj": [[1], [0, 2], [1]]
//! }
//! ```
//! where `adj[i]` holds the ids of all friends of `users[i]`. Ids are only meaningful relative to
//! the `users` list of the same snapshot. The key `adjacency` is accepted as an alias of `adj`.
use std::{
    io::{BufRead, ErrorKind, Write},
    path::{Path, PathBuf},
};

use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use super::*;
use crate::error::GraphError;

/// Default location of the persisted graph
pub const DEFAULT_GRAPH_FILE: &str = "graph_data.json";

/// Serializable image of a [`NamedGraph`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// All user names in id order
    pub users: Vec<String>,
    /// Friend ids per user, ascending
    #[serde(rename = "adj", alias = "adjacency")]
    pub adj: Vec<Vec<Node>>,
}

impl<Nbs> From<&NamedGraph<Nbs>> for GraphSnapshot
where
    Nbs: NeighborhoodSliceMut,
{
    fn from(graph: &NamedGraph<Nbs>) -> Self {
        Self {
            users: graph.users_in_order().to_vec(),
            adj: graph
                .vertices()
                .map(|u| graph.neighbors_of(u).sorted_unstable().collect())
                .collect(),
        }
    }
}

impl<Nbs> TryFrom<GraphSnapshot> for NamedGraph<Nbs>
where
    Nbs: NeighborhoodSliceMut,
{
    type Error = GraphError;

    /// Rebuilds the graph with exactly the ids of the snapshot.
    ///
    /// # Errors
    /// Fails with [`GraphError::InvalidSnapshot`] if `adj` and `users` differ in length, if a
    /// name is empty, padded by whitespace or duplicated, or if a friend id is out of range.
    /// Self-loops are dropped with a warning; one-sided entries are completed.
    fn try_from(snapshot: GraphSnapshot) -> Result<Self> {
        let GraphSnapshot { users, adj } = snapshot;

        if users.len() != adj.len() {
            return Err(GraphError::InvalidSnapshot(format!(
                "{} users but {} neighborhoods",
                users.len(),
                adj.len()
            )));
        }

        let mut graph = Self::new();
        for name in &users {
            if name.trim() != name || !graph.add_user(name) {
                return Err(GraphError::InvalidSnapshot(format!(
                    "invalid or duplicate user name {name:?}"
                )));
            }
        }

        let n = graph.number_of_nodes();
        for (u, nbs) in (0..n).zip(adj) {
            for v in nbs {
                if v >= n {
                    return Err(GraphError::InvalidSnapshot(format!(
                        "friend id {v} of {:?} is out of range",
                        graph.name_of(u)
                    )));
                }
                if u == v {
                    warn!("dropping self-friendship of {:?}", graph.name_of(u));
                    continue;
                }
                graph.try_add_edge(u, v);
            }
        }

        Ok(graph)
    }
}

/// Reads and writes [`GraphSnapshot`]s as JSON.
///
/// # Examples
/// ```no_run
/// use socialgraph::{prelude::*, io::*};
///
/// let store = JsonStore::new().path("friends.json");
///
/// let mut graph: SocialGraph = store.load()?;
/// graph.add_friendship("Alice", "Bob");
/// store.save(&graph)?;
/// # Ok::<(), socialgraph::error::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
    pretty: bool,
}

impl Default for JsonStore {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_GRAPH_FILE),
            pretty: true,
        }
    }
}

impl JsonStore {
    /// Store at [`DEFAULT_GRAPH_FILE`] writing indented JSON
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the location of the persisted graph
    pub fn path<P>(mut self, path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.path = path.into();
        self
    }

    /// If *true* (default), output is indented by four spaces; otherwise it is compact
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Returns the location of the persisted graph
    pub fn file(&self) -> &Path {
        &self.path
    }

    /// Writes the full graph to the store, replacing previous content
    pub fn save<Nbs>(&self, graph: &NamedGraph<Nbs>) -> Result<()>
    where
        Nbs: NeighborhoodSliceMut,
    {
        self.try_write_graph_file(graph, &self.path)?;
        debug!(
            "saved {} users and {} friendships to {}",
            graph.number_of_nodes(),
            graph.number_of_friendships(),
            self.path.display()
        );
        Ok(())
    }

    /// Reads the graph from the store. A missing file yields an empty graph.
    pub fn load<Nbs>(&self) -> Result<NamedGraph<Nbs>>
    where
        Nbs: NeighborhoodSliceMut,
    {
        let graph: NamedGraph<Nbs> = match self.try_read_graph_file(&self.path) {
            Err(GraphError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist, starting empty", self.path.display());
                return Ok(NamedGraph::new());
            }
            res => res?,
        };

        debug!(
            "loaded {} users and {} friendships from {}",
            graph.number_of_nodes(),
            graph.number_of_friendships(),
            self.path.display()
        );
        Ok(graph)
    }
}

impl<Nbs> GraphReader<NamedGraph<Nbs>> for JsonStore
where
    Nbs: NeighborhoodSliceMut,
{
    fn try_read_graph<R>(&self, reader: R) -> Result<NamedGraph<Nbs>>
    where
        R: BufRead,
    {
        let snapshot: GraphSnapshot = serde_json::from_reader(reader)?;
        snapshot.try_into()
    }
}

impl<Nbs> GraphWriter<NamedGraph<Nbs>> for JsonStore
where
    Nbs: NeighborhoodSliceMut,
{
    fn try_write_graph<W>(&self, graph: &NamedGraph<Nbs>, mut writer: W) -> Result<()>
    where
        W: Write,
    {
        let snapshot = GraphSnapshot::from(graph);

        if self.pretty {
            let mut ser = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
            snapshot.serialize(&mut ser)?;
        } else {
            serde_json::to_writer(&mut writer, &snapshot)?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl<Nbs> NamedGraph<Nbs>
where
    Nbs: NeighborhoodSliceMut,
{
    /// Saves the graph to [`DEFAULT_GRAPH_FILE`]
    pub fn save(&self) -> Result<()> {
        JsonStore::new().save(self)
    }

    /// Loads a graph from [`DEFAULT_GRAPH_FILE`], or an empty graph if the file does not exist
    pub fn load() -> Result<Self> {
        JsonStore::new().load()
    }
}

/*!
# IO

Utilities for persisting social graphs and rendering them for humans.

## Formats

- **Json**: the persisted snapshot `{"users": [...], "adj": [[...], ...]}` where `users` lists all
  names in id order and `adj[i]` the friend ids of user `i`. This is the only format that can be
  read back.
- **AdjacencyList**: one line `"{user}: {friends}"` per user, sorted by name.
- **AdjacencyMatrix**: the `0/1`-matrix in id order with row/column indices.

## Traits

To generalize over reading/writing:
- [`GraphReader`] and [`GraphWriter`] are implemented by readers and writers for a specific format.
- [`GraphRead`] and [`GraphWrite`] abstract over reading/writing using a given [`FileFormat`].
*/

pub mod json;
pub mod text;

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, ErrorKind, Write},
    path::Path,
    str::FromStr,
};

use crate::{error::Result, prelude::*};

pub use json::*;
pub use text::*;

/// Identifier for a graph file format.
///
/// Used in [`GraphRead`] and [`GraphWrite`] to determine the
/// correct parser or writer to use.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Persisted JSON snapshot
    Json,
    /// Human-readable friend lists
    AdjacencyList,
    /// Human-readable adjacency matrix
    AdjacencyMatrix,
}

impl FromStr for FileFormat {
    type Err = std::io::Error;

    fn from_str(s: &str) -> std::io::Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(FileFormat::Json),
            "list" | "adjlist" => Ok(FileFormat::AdjacencyList),
            "matrix" | "adjmatrix" => Ok(FileFormat::AdjacencyMatrix),
            _ => Err(io_error!(
                ErrorKind::InvalidInput,
                format!("Unknown FileFormat: {s}")
            )),
        }
    }
}

/// Trait for types that can read graphs in a specific format.
///
/// This trait provides both a low-level method to read from any
/// [`BufRead`] instance and a convenience wrapper to read directly
/// from files.
pub trait GraphReader<G> {
    /// Reads a graph from the given reader according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the input is not a valid representation
    /// of a graph in the expected format.
    fn try_read_graph<R>(&self, reader: R) -> Result<G>
    where
        R: BufRead;

    /// Reads a graph from a file according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or if its contents
    /// are not a valid representation of a graph in the expected format.
    fn try_read_graph_file<P>(&self, path: P) -> Result<G>
    where
        P: AsRef<Path>,
    {
        self.try_read_graph(BufReader::new(File::open(path)?))
    }
}

/// Trait for types that can write graphs in a specific format.
///
/// This trait provides both a low-level method to write to any
/// [`Write`] instance and a convenience wrapper to write directly
/// to files.
pub trait GraphWriter<G> {
    /// Writes the given graph to the provided writer according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if writing fails (e.g., IO errors).
    fn try_write_graph<W>(&self, graph: &G, writer: W) -> Result<()>
    where
        W: Write;

    /// Writes the given graph to a file according to the settings in `self`.
    ///
    /// Internally wraps the file in a buffered writer.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or if writing fails.
    fn try_write_graph_file<P>(&self, graph: &G, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        self.try_write_graph(graph, BufWriter::new(File::create(path)?))
    }
}

/// Trait for reading graphs when only a [`FileFormat`] is known.
pub trait GraphRead: Sized {
    /// Reads a graph from the given reader according to the specified [`FileFormat`].
    ///
    /// # Errors
    /// Returns an error if the format is unsupported for reading
    /// or if the input does not match the expected format.
    fn try_from_reader<R>(reader: R, format: FileFormat) -> Result<Self>
    where
        R: BufRead;

    /// Reads a graph from the given file according to the specified [`FileFormat`].
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or if the input
    /// is invalid for the chosen format.
    fn try_from_file<P>(path: P, format: FileFormat) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::try_from_reader(BufReader::new(File::open(path)?), format)
    }
}

impl<Nbs> GraphRead for NamedGraph<Nbs>
where
    Nbs: NeighborhoodSliceMut,
{
    fn try_from_reader<R>(reader: R, format: FileFormat) -> Result<Self>
    where
        R: BufRead,
    {
        match format {
            FileFormat::Json => JsonStore::new().try_read_graph(reader),
            _ => Err(io_error!(
                ErrorKind::InvalidInput,
                format!("{format:?} does not support GraphRead")
            )
            .into()),
        }
    }
}

/// Trait for writing graphs when only a [`FileFormat`] is known.
pub trait GraphWrite {
    /// Writes the graph to the given writer according to the specified [`FileFormat`].
    ///
    /// # Errors
    /// Returns an error if writing fails (e.g., IO errors).
    fn try_write_to_writer<W>(&self, writer: W, format: FileFormat) -> Result<()>
    where
        W: Write;

    /// Writes the graph to the given file according to the specified [`FileFormat`].
    ///
    /// Internally wraps the file in a buffered writer.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or if writing fails.
    fn try_write_to_file<P>(&self, path: P, format: FileFormat) -> Result<()>
    where
        P: AsRef<Path>,
    {
        self.try_write_to_writer(BufWriter::new(File::create(path)?), format)
    }
}

impl<Nbs> GraphWrite for NamedGraph<Nbs>
where
    Nbs: NeighborhoodSliceMut,
{
    fn try_write_to_writer<W>(&self, writer: W, format: FileFormat) -> Result<()>
    where
        W: Write,
    {
        match format {
            FileFormat::Json => JsonStore::new().try_write_graph(self, writer),
            FileFormat::AdjacencyList => AdjacencyListWriter.try_write_graph(self, writer),
            FileFormat::AdjacencyMatrix => AdjacencyMatrixWriter.try_write_graph(self, writer),
        }
    }
}

/// Shorthand for creating a new IO-error
macro_rules! io_error {
    ($kind: expr, $info: expr) => {
        std::io::Error::new($kind, $info)
    };
}

use io_error;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_format_from_str() {
        assert_eq!("JSON".parse::<FileFormat>().unwrap(), FileFormat::Json);
        assert_eq!("list".parse::<FileFormat>().unwrap(), FileFormat::AdjacencyList);
        assert_eq!("AdjMatrix".parse::<FileFormat>().unwrap(), FileFormat::AdjacencyMatrix);
        assert!("metis".parse::<FileFormat>().is_err());
    }

    #[test]
    fn only_json_is_readable() {
        let graph = SocialGraph::from_friendships([("A", "B"), ("B", "C")]);

        let mut buffer = Vec::new();
        graph.try_write_to_writer(&mut buffer, FileFormat::Json).unwrap();
        let read = SocialGraph::try_from_reader(buffer.as_slice(), FileFormat::Json).unwrap();
        assert_eq!(read, graph);

        let mut buffer = Vec::new();
        graph
            .try_write_to_writer(&mut buffer, FileFormat::AdjacencyList)
            .unwrap();
        assert!(SocialGraph::try_from_reader(buffer.as_slice(), FileFormat::AdjacencyList).is_err());
    }

    #[test]
    fn file_round_trip_by_format() {
        let dir = tempfile::tempdir().unwrap();
        let mut graph = SocialGraph::from_friendships([("Bob", "Alice"), ("Bob", "Carol")]);
        graph.add_user("Dave");

        let json = dir.path().join("friends.json");
        graph.try_write_to_file(&json, FileFormat::Json).unwrap();
        let read = AdjArraySocial::try_from_file(&json, FileFormat::Json).unwrap();
        assert_eq!(read.users_in_order(), graph.users_in_order());
        assert_eq!(read.adjacency_list(), graph.adjacency_list());

        let list = dir.path().join("friends.txt");
        graph.try_write_to_file(&list, FileFormat::AdjacencyList).unwrap();
        assert_eq!(
            std::fs::read_to_string(&list).unwrap(),
            graph.print_adjacency_list()
        );
        assert!(SocialGraph::try_from_file(&list, FileFormat::AdjacencyList).is_err());

        assert!(SocialGraph::try_from_file(dir.path().join("missing.json"), FileFormat::Json).is_err());
    }
}

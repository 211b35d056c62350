//! # Text
//!
//! Human-readable renderings of a social graph. For the friendships `Bob -- Alice` and
//! `Bob -- Carol` (inserted in this order) with an additional user `Dave`:
//!
//! ```text
//! Alice: Bob
//! Bob: Alice, Carol
//! Carol: Bob
//! Dave: No friends
//! ```
//!
//! ```text
//!      0   1   2   3
//!
//!  0 | 0  1  1  0   (Bob)
//!  1 | 1  0  0  0   (Alice)
//!  2 | 1  0  0  0   (Carol)
//!  3 | 0  0  0  0   (Dave)
//! ```
use std::io::Write;

use itertools::Itertools;

use super::*;

/// Writes one line per user (sorted by name) listing all friends (sorted by name)
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjacencyListWriter;

/// Writes the adjacency matrix in id order; every row is annotated with the user's name
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjacencyMatrixWriter;

impl<Nbs> GraphWriter<NamedGraph<Nbs>> for AdjacencyListWriter
where
    Nbs: NeighborhoodSliceMut,
{
    fn try_write_graph<W>(&self, graph: &NamedGraph<Nbs>, mut writer: W) -> Result<()>
    where
        W: Write,
    {
        writer.write_all(graph.print_adjacency_list().as_bytes())?;
        Ok(())
    }
}

impl<Nbs> GraphWriter<NamedGraph<Nbs>> for AdjacencyMatrixWriter
where
    Nbs: NeighborhoodSliceMut,
{
    fn try_write_graph<W>(&self, graph: &NamedGraph<Nbs>, mut writer: W) -> Result<()>
    where
        W: Write,
    {
        writer.write_all(graph.print_adjacency_matrix().as_bytes())?;
        Ok(())
    }
}

impl<Nbs> NamedGraph<Nbs>
where
    Nbs: NeighborhoodSliceMut,
{
    /// Renders `"{user}: {friends}"` per user, sorted by name.
    /// Users without friends are rendered as `"{user}: No friends"`.
    /// Lines are separated by `'\n'` without a trailing newline.
    pub fn print_adjacency_list(&self) -> String {
        self.adjacency_list()
            .into_iter()
            .map(|(user, friends)| {
                if friends.is_empty() {
                    format!("{user}: No friends")
                } else {
                    format!("{user}: {}", friends.join(", "))
                }
            })
            .join("\n")
    }

    /// Renders the adjacency matrix in id order: a header of column indices, an empty line and
    /// one row `"{i:2} | {cells}   ({name})"` per user.
    /// Lines are separated by `'\n'` without a trailing newline.
    pub fn print_adjacency_matrix(&self) -> String {
        let mut out = String::from("    ");
        out.push_str(&self.vertices().map(|i| format!("{i:2}")).join("  "));
        out.push('\n');

        for (i, row) in self.adjacency_matrix().into_iter().enumerate() {
            out.push_str(&format!(
                "\n{i:2} | {}   ({})",
                row.iter().join("  "),
                self.name_of(i as Node)
            ));
        }

        out
    }
}

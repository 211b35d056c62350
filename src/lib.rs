/*!
`socialgraph` is a small library for exploring undirected social graphs: users are connected by
symmetric friendships, and the library answers questions such as *how are two users connected*,
*which communities exist* and *whom should a user befriend next*.

# Representation

Users are identified by unique, whitespace-trimmed **names**. Internally every user owns a dense
**node** id `u32` in the range `0..n`, assigned in insertion order. Deleting a user shifts all
larger ids down by one, so ids always form the range `0..n`.
For **friendships**, we use a simple tuple-struct `Edge(Node, Node)`; friendships never form
self-loops and are never duplicated.

See the [`repr`] module for the storage backends:

- [`SocialGraph`](crate::repr::SocialGraph) (`SmallVec`-backed neighborhoods, default)
- [`AdjArraySocial`](crate::repr::AdjArraySocial) (`Vec`-backed neighborhoods)

# Design

All algorithms are provided via traits on the graph itself and only borrow it immutably, so
results always describe the graph at the time of the call.
Every traversal expands neighbors in ascending order of their *names*, making all results
deterministic and independent of insertion order.
Configurable functionality (recommendations, persistence, generators) is provided as structs that
one can alter using the *Builder* pattern.

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, edges, basic graph operations, and the graph representations,
- [`algo`] includes BFS shortest paths, DFS traversals, communities and friend recommendations,
- [`io`] includes JSON persistence and human-readable renderings,
- [`gens`] includes random social graph generators.

```
use socialgraph::{prelude::*, algo::*};

let graph = SocialGraph::from_friendships([("A", "B"), ("A", "C"), ("B", "D"), ("C", "D"), ("C", "E")]);

assert_eq!(graph.bfs_shortest_path("A", "D").path, vec!["A", "B", "D"]);
assert_eq!(graph.dfs_iterative("A"), vec!["A", "B", "D", "C", "E"]);
assert_eq!(graph.communities().len(), 1);
assert_eq!(graph.recommend_friends("A", 5)[0], ("D".to_string(), 2));
```

The library logs through the [`log`](https://crates.io/crates/log) facade and never installs a
logger itself.
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod gens;
pub mod io;
pub mod node;
pub mod ops;
pub mod repr;
pub(crate) mod testing;
pub mod utils;

/// `socialgraph::prelude` includes definitions for nodes and edges, all basic graph operation traits as well as all implemented representations.
pub mod prelude {
    pub use super::{edge::*, error::GraphError, node::*, ops::*, repr::*};
}

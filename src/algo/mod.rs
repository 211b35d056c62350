/*!
# Graph Algorithms

This module provides the algorithms of this crate, built on top of the graph representations in
[`repr`](crate::repr).
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use socialgraph::algo::*;
```
and gain access to traversals, shortest paths, communities and recommendations.

Algorithms are provided as traits implemented on every graph with named users, so they are called
directly on the graph (`graph.bfs_shortest_path("A", "D")`). They only borrow the graph
immutably and recompute their result from the current state on every call.
Where results are consumed lazily, algorithms are provided as **iterators**.
*/

use std::time::Duration;

use serde::Serializer;

use crate::prelude::*;

mod bfs;
mod connectivity;
mod dfs;
mod recommend;
mod traversal;
mod union_find;

pub use bfs::*;
pub use connectivity::*;
pub use dfs::*;
pub use recommend::*;
pub use traversal::*;
pub use union_find::*;

/// Serializes a [`Duration`] as fractional milliseconds
fn serialize_millis<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}

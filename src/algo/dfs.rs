use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
    vec,
};

use log::trace;
use serde::Serialize;

use super::*;

/// Outcome of [`DepthFirstSearch::dfs_traversal`], keyed by user names.
///
/// Entry (`tin`) and exit (`tout`) events share a single counter starting at `1`, so for every
/// pair of reached users the intervals `[tin, tout]` are either nested or disjoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DfsResult {
    /// Users in pre-order
    pub order: Vec<String>,
    /// Parent in the DFS tree; `None` for the start
    pub parent: BTreeMap<String, Option<String>>,
    /// Depth in the DFS tree; `0` for the start
    pub depth: BTreeMap<String, NumNodes>,
    /// Timestamp at which a user is first entered
    pub tin: BTreeMap<String, NumNodes>,
    /// Timestamp at which a user's subtree is finished
    pub tout: BTreeMap<String, NumNodes>,
    /// Wall-clock duration of the search
    #[serde(rename = "time_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

/// Outcome of [`DepthFirstSearch::dfs_shortest_path`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DfsPathResult {
    /// Shortest of all enumerated simple paths; empty if there is none
    pub path: Vec<String>,
    /// The users to highlight when replaying the search; equal to `path`
    pub visited_order: Vec<String>,
    /// Number of simple paths from start to target
    pub paths_found: u64,
}

/// A simulated call of the recursive DFS: the node and its not yet inspected neighbors
struct Frame {
    node: Node,
    neighbors: vec::IntoIter<Node>,
}

impl Frame {
    fn new<G: NamedAdjacency>(graph: &G, node: Node) -> Self {
        Self {
            node,
            neighbors: graph.neighbors_by_name(node).into_iter(),
        }
    }
}

/// Depth-first searches on named graphs. Neighbors are always visited in ascending name order.
pub trait DepthFirstSearch: NamedAdjacency + Sized {
    /// Computes the DFS tree rooted at `start` with entry/exit timestamps.
    ///
    /// The recursion is simulated on an explicit stack, so arbitrarily deep graphs are fine.
    /// Users not reachable from `start` are absent; an unknown `start` yields an empty result.
    ///
    /// # Examples
    /// ```
    /// use socialgraph::{prelude::*, algo::*};
    ///
    /// let graph = SocialGraph::from_friendships([("A", "B"), ("A", "C"), ("B", "D")]);
    /// let result = graph.dfs_traversal("A");
    ///
    /// assert_eq!(result.order, vec!["A", "B", "D", "C"]);
    /// assert_eq!(result.tin["D"], 3);
    /// assert_eq!(result.tout["D"], 4);
    /// assert_eq!(result.tout["A"], 8);
    /// ```
    fn dfs_traversal(&self, start: &str) -> DfsResult {
        let timer = Instant::now();

        let Some(s) = self.id_of(start) else {
            trace!("dfs_traversal({start:?}): unknown user");
            return DfsResult {
                elapsed: timer.elapsed(),
                ..Default::default()
            };
        };

        let mut visited = self.vertex_bitset_unset();
        let mut parent: Vec<Option<OptionalNode>> = vec![None; self.len()];
        let mut depth = vec![0; self.len()];
        let mut tin = vec![0; self.len()];
        let mut tout = vec![0; self.len()];
        let mut order = Vec::new();
        let mut clock: NumNodes = 1;

        visited.set_bit(s);
        tin[s as usize] = clock;
        clock += 1;
        order.push(s);

        let mut stack = vec![Frame::new(self, s)];
        while let Some(frame) = stack.last_mut() {
            let u = frame.node;

            if let Some(v) = frame.neighbors.find(|&v| !visited.get_bit(v)) {
                visited.set_bit(v);
                parent[v as usize] = OptionalNode::new(u);
                depth[v as usize] = depth[u as usize] + 1;
                tin[v as usize] = clock;
                clock += 1;
                order.push(v);

                stack.push(Frame::new(self, v));
            } else {
                tout[u as usize] = clock;
                clock += 1;
                stack.pop();
            }
        }

        let name = |u: Node| self.name_of(u).to_string();
        let result = DfsResult {
            order: order.iter().map(|&u| name(u)).collect(),
            parent: order
                .iter()
                .map(|&u| (name(u), parent[u as usize].map(|p| name(p.get()))))
                .collect(),
            depth: order.iter().map(|&u| (name(u), depth[u as usize])).collect(),
            tin: order.iter().map(|&u| (name(u), tin[u as usize])).collect(),
            tout: order.iter().map(|&u| (name(u), tout[u as usize])).collect(),
            elapsed: timer.elapsed(),
        };

        trace!(
            "dfs_traversal({start:?}): reached {} users in {:?}",
            result.order.len(),
            result.elapsed
        );

        result
    }

    /// Enumerates **every** simple path from `start` to `target` by backtracking and returns the
    /// one with the fewest users (the first one found among equally short paths).
    ///
    /// This takes exponential time in the worst case; use
    /// [`BreadthFirstSearch::bfs_shortest_path`] for anything but small graphs.
    /// Unknown users or an unreachable target yield an empty result.
    fn dfs_shortest_path(&self, start: &str, target: &str) -> DfsPathResult {
        let (Some(s), Some(t)) = (self.id_of(start), self.id_of(target)) else {
            trace!("dfs_shortest_path({start:?}, {target:?}): unknown endpoint");
            return DfsPathResult::default();
        };

        let mut on_path = self.vertex_bitset_unset();
        let mut path = Vec::new();
        let mut best: Option<Vec<Node>> = None;
        let mut paths_found = 0u64;

        on_path.set_bit(s);
        path.push(s);
        let mut stack = vec![Frame::new(self, s)];

        while let Some(frame) = stack.last_mut() {
            let u = frame.node;

            let next = if u == t {
                None
            } else {
                frame.neighbors.find(|&v| !on_path.get_bit(v))
            };

            match next {
                Some(v) => {
                    on_path.set_bit(v);
                    path.push(v);
                    stack.push(Frame::new(self, v));

                    if v == t {
                        paths_found += 1;
                        if best.as_ref().is_none_or(|b| path.len() < b.len()) {
                            best = Some(path.clone());
                        }
                    }
                }
                None => {
                    on_path.clear_bit(u);
                    path.pop();
                    stack.pop();
                }
            }
        }

        if s == t {
            paths_found = 1;
            best = Some(vec![s]);
        }

        trace!("dfs_shortest_path({start:?}, {target:?}): enumerated {paths_found} paths");

        let path: Vec<String> = best
            .unwrap_or_default()
            .into_iter()
            .map(|u| self.name_of(u).to_string())
            .collect();

        DfsPathResult {
            visited_order: path.clone(),
            path,
            paths_found,
        }
    }

    /// Returns the users reachable from `start` in DFS pre-order, computed with an explicit stack.
    /// The order equals [`DfsResult::order`] of [`DepthFirstSearch::dfs_traversal`].
    /// An unknown `start` yields an empty list.
    fn dfs_iterative(&self, start: &str) -> Vec<String> {
        let Some(s) = self.id_of(start) else {
            return Vec::new();
        };

        self.dfs_pre_order(s)
            .map(|u| self.name_of(u).to_string())
            .collect()
    }
}

impl<G> DepthFirstSearch for G where G: NamedAdjacency + Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gens::*;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn abcde() -> SocialGraph {
        SocialGraph::from_friendships([("A", "B"), ("A", "C"), ("B", "D"), ("C", "D"), ("C", "E")])
    }

    #[test]
    fn traversal_scenario() {
        let result = abcde().dfs_traversal("A");

        assert_eq!(result.order, vec!["A", "B", "D", "C", "E"]);
        assert_eq!(result.parent["A"], None);
        assert_eq!(result.parent["C"].as_deref(), Some("D"));
        assert_eq!(result.parent["E"].as_deref(), Some("C"));
        assert_eq!(result.depth["E"], 4);

        let stamps = |name: &str| (result.tin[name], result.tout[name]);
        assert_eq!(stamps("A"), (1, 10));
        assert_eq!(stamps("B"), (2, 9));
        assert_eq!(stamps("D"), (3, 8));
        assert_eq!(stamps("C"), (4, 7));
        assert_eq!(stamps("E"), (5, 6));
    }

    #[test]
    fn traversal_unknown_and_isolated() {
        let mut graph = abcde();
        assert!(graph.dfs_traversal("Z").order.is_empty());

        graph.add_user("F");
        let result = graph.dfs_traversal("F");
        assert_eq!(result.order, vec!["F"]);
        assert_eq!(result.tin["F"], 1);
        assert_eq!(result.tout["F"], 2);

        assert!(!graph.dfs_traversal("A").tin.contains_key("F"));
    }

    #[test]
    fn deep_chain() {
        let n = 100_000;
        let names = (0..n).map(|i| format!("{i:06}")).collect_vec();
        let graph = SocialGraph::from_friendships(
            names.iter().tuple_windows().map(|(u, v)| (u.as_str(), v.as_str())),
        );

        let result = graph.dfs_traversal("000000");
        assert_eq!(result.order.len(), n);
        assert_eq!(result.depth[names.last().unwrap()], n as NumNodes - 1);
        assert_eq!(result.tout["000000"], 2 * n as NumNodes);
    }

    #[test]
    fn intervals_nest() {
        let rng = &mut Pcg64Mcg::seed_from_u64(21);

        for n in [5 as NumNodes, 20, 60] {
            for p in [0.05, 0.1, 0.3] {
                let graph = SocialGraph::gnp(rng, n, p);
                let start = graph.name_of(0).to_string();
                let result = graph.dfs_traversal(&start);

                let k = result.order.len() as NumNodes;
                let mut stamps = result.tin.values().chain(result.tout.values()).copied().collect_vec();
                stamps.sort_unstable();
                assert_eq!(stamps, (1..=2 * k).collect_vec());

                for (u, v) in result.order.iter().tuple_combinations() {
                    let (a, b) = ((result.tin[u], result.tout[u]), (result.tin[v], result.tout[v]));
                    let nested = (a.0 < b.0 && b.1 < a.1) || (b.0 < a.0 && a.1 < b.1);
                    let disjoint = a.1 < b.0 || b.1 < a.0;
                    assert!(nested ^ disjoint);
                }

                for (u, p) in &result.parent {
                    let Some(p) = p else {
                        assert_eq!(u, &start);
                        continue;
                    };
                    assert!(graph.are_friends(u, p));
                    assert_eq!(result.depth[u], result.depth[p] + 1);
                    assert!(result.tin[p] < result.tin[u] && result.tout[u] < result.tout[p]);
                }
            }
        }
    }

    #[test]
    fn iterative_matches_traversal() {
        let rng = &mut Pcg64Mcg::seed_from_u64(22);

        for n in [1 as NumNodes, 10, 50, 200] {
            for p in [0.01, 0.05, 0.2] {
                let graph = SocialGraph::gnp(rng, n, p);
                for u in graph.names() {
                    assert_eq!(graph.dfs_iterative(u), graph.dfs_traversal(u).order);
                }
            }
        }

        assert!(abcde().dfs_iterative("Z").is_empty());
    }

    #[test]
    fn path_scenario() {
        let graph = abcde();

        let result = graph.dfs_shortest_path("A", "D");
        assert_eq!(result.path, vec!["A", "B", "D"]);
        assert_eq!(result.visited_order, result.path);
        assert_eq!(result.paths_found, 2);

        let result = graph.dfs_shortest_path("E", "B");
        assert_eq!(result.path, vec!["E", "C", "A", "B"]);
        assert_eq!(result.paths_found, 2);

        let result = graph.dfs_shortest_path("C", "C");
        assert_eq!(result.path, vec!["C"]);
        assert_eq!(result.paths_found, 1);

        assert_eq!(graph.dfs_shortest_path("A", "Z"), DfsPathResult::default());
    }

    #[test]
    fn path_unreachable() {
        let graph = SocialGraph::from_friendships([("A", "B"), ("C", "D")]);
        let result = graph.dfs_shortest_path("A", "D");
        assert!(result.path.is_empty());
        assert_eq!(result.paths_found, 0);
    }

    #[test]
    fn path_agrees_with_bfs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(23);

        for n in [2 as NumNodes, 6, 10] {
            for p in [0.2, 0.4] {
                let graph = SocialGraph::gnp(rng, n, p);
                let names = graph.names().collect_vec();
                for (&s, &t) in names.iter().cartesian_product(names.iter()) {
                    let bfs = graph.bfs_shortest_path(s, t);
                    let dfs = graph.dfs_shortest_path(s, t);

                    assert_eq!(bfs.reachable, !dfs.path.is_empty());
                    assert_eq!(bfs.reachable, dfs.paths_found > 0);
                    if bfs.reachable {
                        assert_eq!(dfs.path.len() as NumNodes, bfs.distances[t] + 1);
                        for (u, v) in dfs.path.iter().tuple_windows() {
                            assert!(graph.are_friends(u, v));
                        }
                        assert_eq!(dfs.path.iter().unique().count(), dfs.path.len());
                    }
                }
            }
        }
    }
}

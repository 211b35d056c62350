use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

use log::trace;
use serde::Serialize;

use super::*;

/// Outcome of [`BreadthFirstSearch::bfs_shortest_path`].
///
/// All fields are expressed in user names. `distances` and `exploration_tree` cover every node
/// *discovered* by the search, including nodes still queued when the target was dequeued.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BfsResult {
    /// Users on a shortest path from start to target (both inclusive); empty if unreachable
    pub path: Vec<String>,
    /// Users in the order they were dequeued
    pub visited_order: Vec<String>,
    /// Hop distance from the start for every discovered user
    pub distances: BTreeMap<String, NumNodes>,
    /// Parent of every discovered user in the BFS tree; `None` for the start
    pub exploration_tree: BTreeMap<String, Option<String>>,
    /// *true* iff the target was reached
    pub reachable: bool,
    /// Wall-clock duration of the search
    #[serde(rename = "time_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

/// Shortest paths by breadth-first search
pub trait BreadthFirstSearch: NamedAdjacency + Sized {
    /// Runs a BFS from `start` that stops as soon as `target` is dequeued.
    ///
    /// Neighbors are expanded in ascending name order and the first discovery of a node fixes its
    /// parent, so the returned path is the lexicographically smallest among all shortest paths
    /// with respect to the BFS tree. If either user is unknown, the result is empty and not
    /// reachable. If `target` cannot be reached, the result describes the full component of
    /// `start`.
    ///
    /// # Examples
    /// ```
    /// use socialgraph::{prelude::*, algo::*};
    ///
    /// let graph = SocialGraph::from_friendships([("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);
    /// let result = graph.bfs_shortest_path("A", "D");
    ///
    /// assert!(result.reachable);
    /// assert_eq!(result.path, vec!["A", "B", "D"]);
    /// assert_eq!(result.distances["D"], 2);
    /// ```
    fn bfs_shortest_path(&self, start: &str, target: &str) -> BfsResult {
        let timer = Instant::now();

        let (Some(s), Some(t)) = (self.id_of(start), self.id_of(target)) else {
            trace!("bfs_shortest_path({start:?}, {target:?}): unknown endpoint");
            return BfsResult {
                elapsed: timer.elapsed(),
                ..Default::default()
            };
        };

        let mut distances = vec![INVALID_NODE; self.len()];
        let mut parents: Vec<Option<OptionalNode>> = vec![None; self.len()];
        let mut visited_order = Vec::new();
        let mut discovered = Vec::new();

        let mut record = |(p, u): PredecessorOfNode| {
            if p != u {
                distances[u as usize] = distances[p as usize] + 1;
                parents[u as usize] = OptionalNode::new(p);
            } else {
                distances[u as usize] = 0;
            }
            discovered.push(u);
        };

        let mut bfs = self.bfs_with_predecessor(s).stop_at(t);
        for item in bfs.by_ref() {
            record(item);
            visited_order.push(item.item());
        }
        for item in bfs.frontier() {
            record(item);
        }

        let reachable = distances[t as usize] != INVALID_NODE;

        let mut path = Vec::new();
        if reachable {
            let mut u = t;
            path.push(u);
            while let Some(p) = parents[u as usize].map(|p| p.get()) {
                path.push(p);
                u = p;
            }
            path.reverse();
        }

        let name = |u: Node| self.name_of(u).to_string();
        let result = BfsResult {
            path: path.into_iter().map(name).collect(),
            visited_order: visited_order.into_iter().map(name).collect(),
            distances: discovered
                .iter()
                .map(|&u| (name(u), distances[u as usize]))
                .collect(),
            exploration_tree: discovered
                .iter()
                .map(|&u| (name(u), parents[u as usize].map(|p| name(p.get()))))
                .collect(),
            reachable,
            elapsed: timer.elapsed(),
        };

        trace!(
            "bfs_shortest_path({start:?}, {target:?}): visited {} of {} discovered users in {:?}",
            result.visited_order.len(),
            result.distances.len(),
            result.elapsed
        );

        result
    }
}

impl<G> BreadthFirstSearch for G where G: NamedAdjacency + Sized {}

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
    fn shortest_path_scenario() {
        let result = abcde().bfs_shortest_path("A", "D");

        assert!(result.reachable);
        assert_eq!(result.path, vec!["A", "B", "D"]);
        assert_eq!(result.visited_order, vec!["A", "B", "C", "D"]);
        assert_eq!(result.distances["D"], 2);

        // E was discovered by C before D was dequeued
        assert_eq!(result.distances["E"], 2);
        assert_eq!(result.exploration_tree["E"].as_deref(), Some("C"));
        assert_eq!(result.exploration_tree["D"].as_deref(), Some("B"));
        assert_eq!(result.exploration_tree["A"], None);
        assert_eq!(result.distances.len(), 5);
    }

    #[test]
    fn start_is_target() {
        let result = abcde().bfs_shortest_path("C", "C");

        assert!(result.reachable);
        assert_eq!(result.path, vec!["C"]);
        assert_eq!(result.visited_order, vec!["C"]);
        assert_eq!(result.distances.into_iter().collect_vec(), vec![("C".to_string(), 0)]);
        assert_eq!(
            result.exploration_tree.into_iter().collect_vec(),
            vec![("C".to_string(), None)]
        );
    }

    #[test]
    fn unreachable() {
        let graph = SocialGraph::from_friendships([("A", "B"), ("C", "D")]);
        let result = graph.bfs_shortest_path("A", "C");

        assert!(!result.reachable);
        assert!(result.path.is_empty());
        assert_eq!(result.visited_order, vec!["A", "B"]);
        assert_eq!(result.distances.keys().collect_vec(), vec!["A", "B"]);
    }

    #[test]
    fn unknown_endpoints() {
        let graph = abcde();
        for (s, t) in [("A", "Z"), ("Z", "A"), ("Z", "Z")] {
            let result = graph.bfs_shortest_path(s, t);
            assert!(!result.reachable);
            assert!(result.path.is_empty());
            assert!(result.visited_order.is_empty());
            assert!(result.distances.is_empty());
            assert!(result.exploration_tree.is_empty());
        }
    }

    #[test]
    fn serializes_time_in_ms() {
        let result = abcde().bfs_shortest_path("A", "E");
        let json = serde_json::to_value(&result).unwrap();

        assert!(json["time_ms"].is_f64());
        assert_eq!(json["path"], serde_json::json!(["A", "C", "E"]));
        assert_eq!(json["exploration_tree"]["A"], serde_json::Value::Null);
    }

    /// All-pairs hop distances by repeated relaxation
    fn floyd_warshall(graph: &SocialGraph) -> Vec<Vec<NumNodes>> {
        let n = graph.len();
        let mut dist = vec![vec![INVALID_NODE; n]; n];
        for u in 0..n {
            dist[u][u] = 0;
        }
        for Edge(u, v) in graph.edges(false) {
            dist[u as usize][v as usize] = 1;
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if dist[i][k] != INVALID_NODE && dist[k][j] != INVALID_NODE {
                        dist[i][j] = dist[i][j].min(dist[i][k] + dist[k][j]);
                    }
                }
            }
        }
        dist
    }

    #[test]
    fn optimal_on_random_graphs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);

        for n in [2 as NumNodes, 10, 30] {
            for p in [0.05, 0.1, 0.3] {
                for _ in 0..5 {
                    let graph = SocialGraph::gnp(rng, n, p);
                    let dist = floyd_warshall(&graph);

                    for (s, t) in graph.vertices_range().cartesian_product(graph.vertices_range()) {
                        let result =
                            graph.bfs_shortest_path(graph.name_of(s), graph.name_of(t));
                        let expected = dist[s as usize][t as usize];

                        assert_eq!(result.reachable, expected != INVALID_NODE);
                        if !result.reachable {
                            assert!(result.path.is_empty());
                            continue;
                        }

                        assert_eq!(result.distances[graph.name_of(t)], expected);
                        assert_eq!(result.path.len() as NumNodes, expected + 1);
                        assert_eq!(result.path.first().unwrap(), graph.name_of(s));
                        assert_eq!(result.path.last().unwrap(), graph.name_of(t));
                        for (u, v) in result.path.iter().tuple_windows() {
                            assert!(graph.are_friends(u, v));
                        }

                        // every discovered distance is exact
                        for (name, &d) in &result.distances {
                            let u = graph.id_of(name).unwrap();
                            assert_eq!(d, dist[s as usize][u as usize]);
                        }
                    }
                }
            }
        }
    }
}

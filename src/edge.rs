use std::fmt::{Debug, Display};

use crate::node::Node;

/// A friendship is defined by two nodes/endpoints.
/// Friendships are undirected: `Edge(u, v)` and `Edge(v, u)` describe the same friendship and
/// the graph hands them out normalized (smaller endpoint first).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub Node, pub Node);

/// We limit the number of friendships to `2^32 - 1`.
pub type NumEdges = u32;

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Normalizes the edge such that the endpoint with smaller value comes first
    pub fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    /// Returns true if the endpoint with smaller index comes first
    pub fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Reverses the edge by switching the endpoints
    pub fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }

    /// Simple bijection from `0..(n choose 2)` to all normalized loop-free edges of `n` nodes.
    ///
    /// Index `x` enumerates the upper triangle of the adjacency matrix row by row. Row `u` holds
    /// `n - 1 - u` edges, so it starts at `u * (2n - u - 1) / 2`; the row is obtained by solving
    /// that quadratic and correcting the floating-point estimate by at most a few steps.
    pub fn from_u64_undir(x: u64, n: u64) -> Self {
        debug_assert!(n >= 2 && x < n * (n - 1) / 2);

        let row_start = |u: u64| u * (2 * n - u - 1) / 2;

        let b = (2 * n - 1) as f64;
        let estimate = (b - (b * b - 8.0 * x as f64).max(0.0).sqrt()) / 2.0;
        let mut u = (estimate as u64).min(n - 2);
        while u > 0 && row_start(u) > x {
            u -= 1;
        }
        while u + 2 < n && row_start(u + 1) <= x {
            u += 1;
        }

        Edge(u as Node, (u + 1 + x - row_start(u)) as Node)
    }
}

impl From<(Node, Node)> for Edge {
    fn from(value: (Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&(Node, Node)> for Edge {
    fn from(value: &(Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&Edge> for Edge {
    fn from(value: &Edge) -> Self {
        *value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn normalize() {
        assert_eq!(Edge(3, 1).normalized(), Edge(1, 3));
        assert!(Edge(1, 3).is_normalized());
        assert!(!Edge(3, 1).is_normalized());
        assert!(Edge(2, 2).is_loop());
        assert_eq!(Edge(3, 1).reverse(), Edge(1, 3));
    }

    #[test]
    fn undirected_bijection() {
        for n in 2..12u64 {
            let edges = (0..n * (n - 1) / 2)
                .map(|x| Edge::from_u64_undir(x, n))
                .collect_vec();

            assert!(edges.iter().all(|e| e.is_normalized() && !e.is_loop()));
            assert!(edges.iter().all(|e| (e.1 as u64) < n));
            assert_eq!(edges.iter().unique().count(), edges.len());

            let rows = (0..n as Node)
                .flat_map(|u| (u + 1..n as Node).map(move |v| Edge(u, v)))
                .collect_vec();
            assert_eq!(edges, rows);
        }
    }

    #[test]
    fn undirected_bijection_large() {
        let n = 100_000u64;
        let m = n * (n - 1) / 2;

        assert_eq!(Edge::from_u64_undir(0, n), Edge(0, 1));
        assert_eq!(Edge::from_u64_undir(n - 2, n), Edge(0, n as Node - 1));
        assert_eq!(Edge::from_u64_undir(n - 1, n), Edge(1, 2));
        assert_eq!(Edge::from_u64_undir(m - 1, n), Edge(n as Node - 2, n as Node - 1));

        for u in [1u64, 17, 4_999, 50_000, 99_997] {
            let start = u * (2 * n - u - 1) / 2;
            assert_eq!(Edge::from_u64_undir(start, n), Edge(u as Node, u as Node + 1));
            assert_eq!(Edge::from_u64_undir(start - 1, n), Edge(u as Node - 1, n as Node - 1));
        }
    }
}

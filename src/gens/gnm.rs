use fxhash::FxHashMap;

use super::*;

/// Configuration type used by [`Gnm`] to determine how the graph should be parameterized.
#[derive(Debug, Copy, Clone, Default)]
enum GnmType {
    /// No value has been set yet; using this will panic at runtime.
    #[default]
    NotSet,
    /// Fixed number of edges `m`.
    Edges(NumEdges),
    /// Average degree `d`, to be converted to `m = d*n/2`.
    AvgDeg(f64),
    /// Density `d`, to be converted to `m = d*n*(n-1)/2`.
    Density(f64),
}

/// Generator for uniform `G(n,m)` random social graphs with `n` users and `m` friendships.
///
/// The generator can be parameterized via:
/// - `.nodes(n)`: total number of users
/// - `.edges(m)`, `.avg_deg(d)` or `.density(d)`: total number of friendships, average degree
///   or share of all user pairs
///
/// # Panics
/// Generation panics if `m` exceeds the `n choose 2` possible friendships.
#[derive(Debug, Copy, Clone, Default)]
pub struct Gnm {
    n: NumNodes,
    m: GnmType,
}

impl Gnm {
    /// Creates a new empty `G(n,m)` generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives `m` from a density, i.e. the expected share of all `n * n` ordered user pairs.
    /// Pairs that are loops or duplicates do not count, hence the result is an approximation
    /// of sampling `density * n * n` pairs with replacement.
    ///
    /// `m` is only computed on generation, so `nodes` may be set before or after.
    pub fn density(mut self, density: f64) -> Self {
        assert!(density.is_valid_probility());
        self.m = GnmType::Density(density);
        self
    }
}

impl NumNodesGen for Gnm {
    fn set_nodes(&mut self, n: NumNodes) {
        self.n = n;
    }
}

impl NumEdgesGen for Gnm {
    fn set_edges(&mut self, m: NumEdges) {
        self.m = GnmType::Edges(m);
    }
}

impl AverageDegreeGen for Gnm {
    /// Sets the average degree `d` in the graph.
    ///
    /// Internally converted to an edge count: `m = d*n/2`.
    fn set_avg_deg(&mut self, deg: f64) {
        self.m = GnmType::AvgDeg(deg);
    }
}

impl GraphGenerator for Gnm {
    fn number_of_nodes(&self) -> NumNodes {
        self.n
    }

    /// Returns a streaming iterator over a random `G(n,m)` edge set.
    ///
    /// # Panics
    /// - If none of `edges(m)`, `avg_deg(d)` or `density(d)` was set
    /// - If `m > n * (n - 1) / 2`
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = Edge>
    where
        R: Rng,
    {
        let m = match self.m {
            GnmType::NotSet => panic!("Number of edges of Gnm was not set!"),
            GnmType::Edges(m) => m,
            GnmType::AvgDeg(d) => (self.n as f64 * d / 2.0) as NumEdges,
            GnmType::Density(d) => {
                let n = self.n as f64;
                (d * n * (n - 1.0) / 2.0) as NumEdges
            }
        };

        GnmGenerator::new(rng, self.n as u64, m as u64)
    }
}

/// Given `n` nodes and the `n choose 2` possible undirected edges, this iterator produces exactly
/// `m` uniformly random and distinct edges without replacement.
///
/// The algorithm used is based on:
/// > *V. Batagelj and U. Brandes. Efficient Generation of Large Random Networks.
/// > Physical Review E 71.3 (2005): 036113.*
///
/// A sparse map emulates a Fisher-Yates shuffle of the edge indices, so only `O(m)` memory is
/// used.
pub struct GnmGenerator<'a, R>
where
    R: Rng,
{
    n: u64,
    rem: u64,
    cur: u64,
    end: u64,
    map: FxHashMap<u64, u64>,
    rng: &'a mut R,
}

impl<'a, R> GnmGenerator<'a, R>
where
    R: Rng,
{
    /// Creates a new `GnmGenerator`.
    ///
    /// # Panics
    /// Panics if `m > n * (n - 1) / 2`, which would violate sampling without replacement.
    pub fn new(rng: &'a mut R, n: u64, m: u64) -> Self {
        let end = n * n.saturating_sub(1) / 2;
        assert!(m <= end, "Cannot place {m} friendships among {n} users!");

        Self {
            n,
            rem: m,
            cur: 0,
            end,
            map: FxHashMap::with_capacity_and_hasher(m as usize, Default::default()),
            rng,
        }
    }

    /// Selects the next unique edge index by swapping a random remaining index to position `cur`
    fn next_step(&mut self) -> Option<u64> {
        if self.rem == 0 {
            return None;
        }

        let drawn = self.rng.random_range(self.cur..self.end);
        let value = self.map.get(&drawn).copied().unwrap_or(drawn);

        let replacement = self.map.get(&self.cur).copied().unwrap_or(self.cur);
        self.map.insert(drawn, replacement);

        self.cur += 1;
        self.rem -= 1;

        Some(value)
    }
}

impl<R> Iterator for GnmGenerator<'_, R>
where
    R: Rng,
{
    type Item = Edge;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_step().map(|x| Edge::from_u64_undir(x, self.n))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rem as usize, Some(self.rem as usize))
    }
}

impl<R> ExactSizeIterator for GnmGenerator<'_, R> where R: Rng {}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn distinct_edges() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1);

        for n in [2 as NumNodes, 5, 30, 100] {
            let max_m = n * (n - 1) / 2;
            for m in [0, 1, max_m / 2, max_m] {
                let edges = Gnm::new().nodes(n).edges(m).generate(rng);
                assert_eq!(edges.len(), m as usize);
                assert!(edges.iter().all(|e| e.is_normalized() && !e.is_loop() && e.1 < n));
                assert_eq!(edges.iter().unique().count(), m as usize);
            }
        }
    }

    #[test]
    fn density() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2);
        let graph: SocialGraph = Gnm::new().nodes(100).density(0.1).social_graph(rng);
        assert_eq!(graph.number_of_friendships(), 495);

        let graph: SocialGraph = Gnm::new().density(0.1).nodes(100).social_graph(rng);
        assert_eq!(graph.number_of_nodes(), 100);
        assert_eq!(graph.number_of_friendships(), 495);

        let graph: SocialGraph = Gnm::new().nodes(20).density(1.0).social_graph(rng);
        assert_eq!(graph.number_of_friendships(), 190);
    }

    #[test]
    #[should_panic]
    fn too_many_edges() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);
        let _ = Gnm::new().nodes(4).edges(7).generate(rng);
    }
}

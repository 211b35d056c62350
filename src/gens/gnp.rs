use super::*;

/// A G(n, p) graph can be defined by either a probability or the average degree which is more
/// common in practice
#[derive(Debug, Copy, Clone, Default)]
enum GnpType {
    /// No value has been set yet
    #[default]
    NotSet,
    /// Direct probability value
    Prob(f64),
    /// Average degree of a node
    AvgDeg(f64),
}

/// `G(n,p)` graphs contain every possible friendship between `n` users with probability `p`
/// independent from each other.
#[derive(Debug, Copy, Clone, Default)]
pub struct Gnp {
    n: NumNodes,
    p: GnpType,
}

impl Gnp {
    /// Creates a new empty `G(n,p)` generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates `p` directly
    pub fn prob(mut self, prob: f64) -> Self {
        assert!(prob.is_valid_probility());
        self.p = GnpType::Prob(prob);
        self
    }

    /// Resolves the configured edge probability
    fn probability(&self) -> f64 {
        match self.p {
            GnpType::NotSet => panic!("Probility of Gnp was not set!"),
            GnpType::Prob(p) => p,
            GnpType::AvgDeg(_) if self.n < 2 => 0.0,
            GnpType::AvgDeg(d) => {
                let p = d / (self.n - 1) as f64;
                assert!(
                    p.is_valid_probility(),
                    "The average degree is invalid for the given n!"
                );
                p
            }
        }
    }
}

impl NumNodesGen for Gnp {
    fn set_nodes(&mut self, n: NumNodes) {
        self.n = n;
    }
}

impl AverageDegreeGen for Gnp {
    /// Updates `p` such that `p = d/(n - 1)`.
    /// Note that this conversion will only be done when calling `stream/generate`.
    fn set_avg_deg(&mut self, deg: f64) {
        self.p = GnpType::AvgDeg(deg);
    }
}

impl GraphGenerator for Gnp {
    fn number_of_nodes(&self) -> NumNodes {
        self.n
    }

    /// Creates a streaming generator over random `G(n,p)` edges in lexicographic order
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = Edge>
    where
        R: Rng,
    {
        let p = self.probability();
        let n = self.n;

        (0..n)
            .flat_map(move |u| (u + 1..n).map(move |v| Edge(u, v)))
            .filter(move |_| rng.random_bool(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn extreme_probabilities() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2);

        assert!(Gnp::new().nodes(30).prob(0.0).generate(rng).is_empty());

        let complete = Gnp::new().nodes(30).prob(1.0).generate(rng);
        assert_eq!(complete.len(), 30 * 29 / 2);
        assert!(complete.iter().all(|e| e.is_normalized() && !e.is_loop()));
    }

    #[test]
    fn average_degree() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);
        let n = 1000;
        let edges = Gnp::new().nodes(n).avg_deg(10.0).generate(rng);

        // expected: n * d / 2 = 5000
        assert!((4500..5500).contains(&edges.len()));
    }

    #[test]
    fn tiny_graphs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(4);
        assert!(Gnp::new().nodes(0).avg_deg(3.0).generate(rng).is_empty());
        assert!(Gnp::new().nodes(1).avg_deg(3.0).generate(rng).is_empty());
    }
}

/*!
# Graph Generators

Random social graphs for tests and benchmarks.

Generators are configured using the builder pattern and produce friendships as [`Edge`]s between
the ids `0..n`:

1. Create a generator instance (e.g., `Gnm::new()`).
2. Set parameters using trait methods (e.g., `.nodes(n).edges(m)`).
3. Generate edges via `generate()` or `stream()`, or a whole graph via `social_graph()`.

Generated graphs name their users `User_0, User_1, ...` so that user `User_{i}` has id `i`.

Supported models include:
- G(n,p): every friendship exists independently with probability `p`
- G(n,m): exactly `m` distinct friendships chosen uniformly at random
*/

use rand::Rng;

use crate::{prelude::*, utils::*};

mod gnm;
mod gnp;

pub use gnm::*;
pub use gnp::*;

/// Trait for generators that allow setting the number of nodes.
pub trait NumNodesGen: Sized {
    /// Sets the number of nodes (inplace)
    fn set_nodes(&mut self, n: NumNodes);

    /// Sets the number of nodes
    fn nodes(mut self, n: NumNodes) -> Self {
        self.set_nodes(n);
        self
    }
}

/// Trait for generators that allow setting the number of edges.
pub trait NumEdgesGen: Sized {
    /// Sets the number of edges (inplace)
    fn set_edges(&mut self, m: NumEdges);

    /// Sets the number of edges
    fn edges(mut self, m: NumEdges) -> Self {
        self.set_edges(m);
        self
    }
}

/// Trait for generators that allow setting the average degree.
pub trait AverageDegreeGen: Sized {
    /// Sets the average degree (inplace)
    fn set_avg_deg(&mut self, deg: f64);

    /// Sets the average degree
    fn avg_deg(mut self, deg: f64) -> Self {
        self.set_avg_deg(deg);
        self
    }
}

/// Name of the `i`-th user of a generated graph
pub fn generated_user_name(i: Node) -> String {
    format!("User_{i}")
}

/// General trait for a configurable random friendship generator.
///
/// Every generated edge is normalized, loop-free and unique.
pub trait GraphGenerator {
    /// Returns the number of users the generator was configured for
    fn number_of_nodes(&self) -> NumNodes;

    /// Creates a lazy iterator over generated edges
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = Edge>
    where
        R: Rng;

    /// Generates a list of random edges
    fn generate<R>(&self, rng: &mut R) -> Vec<Edge>
    where
        R: Rng,
    {
        self.stream(rng).collect()
    }

    /// Generates a social graph with users `User_0..User_{n-1}` and random friendships
    fn social_graph<R, Nbs>(&self, rng: &mut R) -> NamedGraph<Nbs>
    where
        R: Rng,
        Nbs: NeighborhoodSliceMut,
    {
        let mut graph = NamedGraph::new();
        for i in 0..self.number_of_nodes() {
            graph.add_user(&generated_user_name(i));
        }
        graph.add_edges(self.stream(rng));
        graph
    }
}

/// Trait for building random social graphs from common random models.
pub trait RandomGraph: Sized {
    /// Creates a random `G(n,p)` graph using friendship probability `p`.
    fn gnp<R>(rng: &mut R, n: NumNodes, p: f64) -> Self
    where
        R: Rng;

    /// Creates a random `G(n,m)` graph with exactly `m` friendships.
    fn gnm<R>(rng: &mut R, n: NumNodes, m: NumEdges) -> Self
    where
        R: Rng;
}

impl<Nbs> RandomGraph for NamedGraph<Nbs>
where
    Nbs: NeighborhoodSliceMut,
{
    fn gnp<R>(rng: &mut R, n: NumNodes, p: f64) -> Self
    where
        R: Rng,
    {
        Gnp::new().nodes(n).prob(p).social_graph(rng)
    }

    fn gnm<R>(rng: &mut R, n: NumNodes, m: NumEdges) -> Self
    where
        R: Rng,
    {
        Gnm::new().nodes(n).edges(m).social_graph(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn user_names() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1);
        let graph = SocialGraph::gnm(rng, 20, 30);

        assert_eq!(graph.number_of_nodes(), 20);
        assert_eq!(graph.number_of_friendships(), 30);
        for i in 0..20 {
            assert_eq!(graph.get_user_id(&format!("User_{i}")).unwrap(), i);
        }
    }

    #[test]
    fn deterministic_for_seed() {
        let a = SocialGraph::gnp(&mut Pcg64Mcg::seed_from_u64(5), 50, 0.1);
        let b = SocialGraph::gnp(&mut Pcg64Mcg::seed_from_u64(5), 50, 0.1);
        assert_eq!(a, b);
    }
}

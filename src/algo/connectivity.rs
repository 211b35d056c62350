use itertools::Itertools;
use log::trace;

use super::*;

/// Community detection on social graphs.
///
/// A community is a connected component. Two methods are offered: [`Communities::communities`]
/// merges the endpoints of every friendship in a [`UnionFind`], whereas
/// [`Communities::connected_components`] lazily emits components by restarting a BFS.
pub trait Communities: NamedAdjacency + Sized {
    /// Returns all communities as lists of user names.
    ///
    /// Every user appears in exactly one community (isolated users form singletons).
    /// Communities are sorted by decreasing size, ties by their smallest member name;
    /// members of a community are sorted by name.
    ///
    /// # Examples
    /// ```
    /// use socialgraph::{prelude::*, algo::*};
    ///
    /// let mut graph = SocialGraph::from_friendships([("A", "B"), ("C", "D"), ("D", "E")]);
    /// graph.add_user("F");
    ///
    /// assert_eq!(
    ///     graph.communities(),
    ///     vec![vec!["C", "D", "E"], vec!["A", "B"], vec!["F"]]
    /// );
    /// ```
    fn communities(&self) -> Vec<Vec<String>> {
        let mut uf = self.union_find();

        let mut groups = self
            .vertices()
            .map(|u| (uf.find(u), self.name_of(u)))
            .into_group_map()
            .into_values()
            .map(|mut members| {
                members.sort_unstable();
                members
            })
            .collect_vec();

        groups.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a[0].cmp(b[0])));

        trace!("found {} communities", groups.len());

        groups
            .into_iter()
            .map(|members| members.into_iter().map(str::to_string).collect())
            .collect()
    }

    /// Returns the number of communities (connected components)
    fn number_of_communities(&self) -> NumNodes {
        self.union_find().number_of_sets()
    }

    /// Returns a [`UnionFind`] in which the endpoints of every friendship are merged
    fn union_find(&self) -> UnionFind {
        let mut uf = UnionFind::new(self.number_of_nodes());
        for Edge(u, v) in self.edges(true) {
            uf.union(u, v);
        }
        uf
    }

    /// Returns an iterator over the connected components as node ids in BFS order
    fn connected_components(&self) -> ConnectedComponents<'_, Self> {
        ConnectedComponents::new(self)
    }
}

impl<G> Communities for G where G: NamedAdjacency + Sized {}

/// Iterator over the connected components of a graph, one `Vec<Node>` per component.
/// Components are started at the smallest unvisited id.
pub struct ConnectedComponents<'a, G>
where
    G: NamedAdjacency,
{
    bfs: Option<BFS<'a, G>>,
}

impl<'a, G> ConnectedComponents<'a, G>
where
    G: NamedAdjacency,
{
    /// Creates an iterator over all components of `graph`; empty graphs yield nothing
    pub fn new(graph: &'a G) -> Self {
        Self {
            bfs: (!graph.is_empty()).then(|| graph.bfs(0)),
        }
    }
}

impl<G> Iterator for ConnectedComponents<'_, G>
where
    G: NamedAdjacency,
{
    type Item = Vec<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        let bfs = self.bfs.as_mut()?;
        loop {
            let cc = bfs.by_ref().collect_vec();
            if !cc.is_empty() {
                return Some(cc);
            }

            if !bfs.try_restart_at_unvisited() {
                self.bfs = None;
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gens::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn two_communities() {
        let graph = SocialGraph::from_friendships([("A", "B"), ("C", "D")]);
        assert_eq!(graph.communities(), vec![vec!["A", "B"], vec!["C", "D"]]);
        assert_eq!(graph.number_of_communities(), 2);
    }

    #[test]
    fn empty_graph() {
        let graph = SocialGraph::new();
        assert!(graph.communities().is_empty());
        assert_eq!(graph.number_of_communities(), 0);
        assert_eq!(graph.connected_components().count(), 0);
    }

    #[test]
    fn members_sorted_by_name() {
        let mut graph = SocialGraph::from_friendships([("zoe", "bob"), ("bob", "amy")]);
        graph.add_user("carl");
        assert_eq!(graph.communities(), vec![vec!["amy", "bob", "zoe"], vec!["carl"]]);
    }

    #[test]
    fn union_find_agrees_with_bfs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);

        for n in [1 as NumNodes, 10, 50, 200] {
            for avg_deg in [0.5, 1.0, 2.0, 4.0] {
                let graph: SocialGraph = Gnp::new().nodes(n).avg_deg(avg_deg).social_graph(rng);

                let components = graph.connected_components().collect_vec();
                assert_eq!(components.len() as NumNodes, graph.number_of_communities());

                let communities = graph.communities();
                assert_eq!(communities.len(), components.len());
                assert_eq!(
                    communities.iter().map(Vec::len).sum::<usize>(),
                    graph.len()
                );

                let mut sizes = components.iter().map(Vec::len).collect_vec();
                sizes.sort_unstable_by(|a, b| b.cmp(a));
                assert_eq!(communities.iter().map(Vec::len).collect_vec(), sizes);

                // every component is closed under adjacency
                for cc in &components {
                    for &u in cc {
                        assert!(graph.neighbors_of(u).all(|v| cc.contains(&v)));
                    }
                }
            }
        }
    }
}

use fxhash::FxHashMap;
use itertools::Itertools;
use log::trace;
use serde::Serialize;

use super::*;

/// How candidates are scored by a [`Recommender`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Strategy {
    /// Friends of friends, scored by their number of mutual friends
    #[default]
    MutualFriends,
    /// Every non-friend, scored by a weighted sum of mutual friends and closeness
    Blended,
}

/// A single friend suggestion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub user: String,
    pub score: f64,
    /// Number of friends shared with the subject
    pub mutual_count: NumNodes,
    /// Hop distance from the subject; `None` if unreachable
    pub distance: Option<NumNodes>,
}

/// Configurable friend recommendation.
///
/// Candidates are never the subject itself nor one of its current friends. Results are ranked by
/// decreasing score, ties broken by ascending name.
///
/// # Examples
/// ```
/// use socialgraph::{prelude::*, algo::*};
///
/// let graph = SocialGraph::from_friendships([("A", "B"), ("A", "C"), ("B", "D"), ("C", "D"), ("C", "E")]);
/// let recs = Recommender::new().strategy(Strategy::Blended).recommend(&graph, "A");
///
/// assert_eq!(recs[0].user, "D");
/// assert_eq!(recs[0].mutual_count, 2);
/// assert_eq!(recs[0].distance, Some(2));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Recommender {
    strategy: Strategy,
    max_results: Option<usize>,
    mutual_weight: f64,
    distance_weight: f64,
}

impl Default for Recommender {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            max_results: None,
            mutual_weight: 0.7,
            distance_weight: 0.3,
        }
    }
}

impl Recommender {
    /// Default number of results for [`Strategy::MutualFriends`]
    pub const DEFAULT_MAX_RESULTS: usize = 5;

    /// Creates a recommender using mutual friends and the default weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scoring strategy
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Limits the number of returned recommendations.
    /// Without a limit, [`Strategy::MutualFriends`] returns [`Recommender::DEFAULT_MAX_RESULTS`]
    /// and [`Strategy::Blended`] returns all candidates.
    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Sets the weight of the number of mutual friends in blended scores
    pub fn mutual_weight(mut self, weight: f64) -> Self {
        self.mutual_weight = weight;
        self
    }

    /// Sets the weight of the closeness `1 / (1 + distance)` in blended scores
    pub fn distance_weight(mut self, weight: f64) -> Self {
        self.distance_weight = weight;
        self
    }

    /// Computes recommendations for `user` on the current state of `graph`.
    /// Unknown users receive no recommendations.
    pub fn recommend<G>(&self, graph: &G, user: &str) -> Vec<Recommendation>
    where
        G: NamedAdjacency,
    {
        let Some(u) = graph.id_of(user) else {
            trace!("recommend({user:?}): unknown user");
            return Vec::new();
        };

        let mut recs = match self.strategy {
            Strategy::MutualFriends => mutual_friend_counts(graph, u)
                .into_iter()
                .map(|(c, count)| Recommendation {
                    user: graph.name_of(c).to_string(),
                    score: count as f64,
                    mutual_count: count,
                    distance: Some(2),
                })
                .collect_vec(),
            Strategy::Blended => self.blended(graph, u),
        };

        recs.sort_unstable_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.user.cmp(&b.user)));

        let limit = match (self.max_results, self.strategy) {
            (Some(k), _) => k,
            (None, Strategy::MutualFriends) => Self::DEFAULT_MAX_RESULTS,
            (None, Strategy::Blended) => usize::MAX,
        };
        recs.truncate(limit);

        trace!("recommend({user:?}): {} suggestions", recs.len());
        recs
    }

    fn blended<G>(&self, graph: &G, u: Node) -> Vec<Recommendation>
    where
        G: NamedAdjacency,
    {
        let mutual = mutual_friend_counts(graph, u);
        let distances = graph.bfs_distances(u);

        graph
            .vertices()
            .filter(|&c| c != u && distances[c as usize] > 1)
            .map(|c| {
                let mutual_count = mutual.get(&c).copied().unwrap_or(0);
                let distance = (distances[c as usize] != INVALID_NODE).then_some(distances[c as usize]);
                let closeness = distance.map_or(0.0, |d| 1.0 / (1.0 + d as f64));

                Recommendation {
                    user: graph.name_of(c).to_string(),
                    score: self.mutual_weight * mutual_count as f64 + self.distance_weight * closeness,
                    mutual_count,
                    distance,
                }
            })
            .collect()
    }
}

/// Counts for every friend of a friend of `u` (that is neither `u` nor a friend of `u`) the
/// number of friends it shares with `u`
fn mutual_friend_counts<G>(graph: &G, u: Node) -> FxHashMap<Node, NumNodes>
where
    G: NamedAdjacency,
{
    let mut is_friend = graph.vertex_bitset_unset();
    for f in graph.neighbors_of(u) {
        is_friend.set_bit(f);
    }

    let mut counts = FxHashMap::default();
    for f in graph.neighbors_of(u) {
        for c in graph.neighbors_of(f) {
            if c != u && !is_friend.get_bit(c) {
                *counts.entry(c).or_insert(0) += 1;
            }
        }
    }
    counts
}

/// Friend recommendations directly on the graph
pub trait Recommend: NamedAdjacency + Sized {
    /// Returns up to `max_results` friends of friends of `user` together with their number of
    /// mutual friends, ranked by that number (descending) and name (ascending).
    ///
    /// # Examples
    /// ```
    /// use socialgraph::{prelude::*, algo::*};
    ///
    /// let graph = SocialGraph::from_friendships([("A", "B"), ("A", "C"), ("B", "D"), ("C", "D"), ("C", "E")]);
    /// assert_eq!(
    ///     graph.recommend_friends("A", 5),
    ///     vec![("D".to_string(), 2), ("E".to_string(), 1)]
    /// );
    /// ```
    fn recommend_friends(&self, user: &str, max_results: usize) -> Vec<(String, NumNodes)> {
        Recommender::new()
            .max_results(max_results)
            .recommend(self, user)
            .into_iter()
            .map(|r| (r.user, r.mutual_count))
            .collect()
    }

    /// Scores every user that is not yet a friend of `user` by
    /// `0.7 * mutual_friends + 0.3 / (1 + distance)`; users in other communities score `0`.
    fn recommend_blended(&self, user: &str) -> Vec<Recommendation> {
        Recommender::new()
            .strategy(Strategy::Blended)
            .recommend(self, user)
    }
}

impl<G> Recommend for G where G: NamedAdjacency + Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gens::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn abcde() -> SocialGraph {
        SocialGraph::from_friendships([("A", "B"), ("A", "C"), ("B", "D"), ("C", "D"), ("C", "E")])
    }

    #[test]
    fn mutual_friends_scenario() {
        let graph = abcde();
        assert_eq!(
            graph.recommend_friends("A", 5),
            vec![("D".to_string(), 2), ("E".to_string(), 1)]
        );
        assert_eq!(graph.recommend_friends("A", 1), vec![("D".to_string(), 2)]);
        assert!(graph.recommend_friends("A", 0).is_empty());
        assert!(graph.recommend_friends("Z", 5).is_empty());

        // C is friends with everyone but B
        assert_eq!(graph.recommend_friends("C", 5), vec![("B".to_string(), 2)]);
    }

    #[test]
    fn ties_by_name() {
        let graph = SocialGraph::from_friendships([("me", "f"), ("f", "zed"), ("f", "amy"), ("f", "bob")]);
        let names = graph
            .recommend_friends("me", 5)
            .into_iter()
            .map(|(name, _)| name)
            .collect_vec();
        assert_eq!(names, vec!["amy", "bob", "zed"]);
    }

    #[test]
    fn default_limit() {
        let mut graph = SocialGraph::new();
        graph.add_friendship("me", "hub");
        for i in 0..10 {
            graph.add_friendship("hub", &format!("c{i}"));
        }

        let recs = Recommender::new().recommend(&graph, "me");
        assert_eq!(recs.len(), Recommender::DEFAULT_MAX_RESULTS);

        let recs = Recommender::new().max_results(8).recommend(&graph, "me");
        assert_eq!(recs.len(), 8);
    }

    #[test]
    fn blended_scenario() {
        let mut graph = abcde();
        graph.add_user("F");

        let recs = graph.recommend_blended("A");
        assert_eq!(recs.iter().map(|r| r.user.as_str()).collect_vec(), vec!["D", "E", "F"]);

        assert!((recs[0].score - 1.5).abs() < 1e-9);
        assert!((recs[1].score - 0.8).abs() < 1e-9);
        assert_eq!(recs[1].distance, Some(2));
        assert_eq!(recs[2].score, 0.0);
        assert_eq!(recs[2].distance, None);
        assert_eq!(recs[2].mutual_count, 0);

        let recs = Recommender::new()
            .strategy(Strategy::Blended)
            .mutual_weight(0.0)
            .distance_weight(1.0)
            .max_results(2)
            .recommend(&graph, "A");
        assert_eq!(recs.len(), 2);
        assert!((recs[0].score - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(recs[0].user, "D");
    }

    #[test]
    fn never_recommends_friends() {
        let rng = &mut Pcg64Mcg::seed_from_u64(31);

        for _ in 0..10 {
            let graph = SocialGraph::gnp(rng, 40, 0.1);
            for u in graph.names() {
                let friends = graph.get_friends(u);

                let recs = graph.recommend_blended(u);
                assert_eq!(recs.len(), graph.len() - 1 - friends.len());
                for r in &recs {
                    assert_ne!(r.user, u);
                    assert!(!friends.contains(&r.user.as_str()));
                    let mutual = graph
                        .get_friends(&r.user)
                        .into_iter()
                        .filter(|f| friends.contains(f))
                        .count();
                    assert_eq!(r.mutual_count as usize, mutual);
                }

                for (name, count) in graph.recommend_friends(u, usize::MAX) {
                    assert!(count > 0);
                    assert!(recs.iter().any(|r| r.user == name && r.mutual_count == count));
                }
            }
        }
    }
}

/// Runs the same store tests against every neighborhood representation
macro_rules! test_graph_ops {
    ($env:ident, $graph:ident, ($($trait:ident),*)) => {
        #[cfg(test)]
        mod $env {
            use crate::{edge::*, node::*, ops::*, repr::*, testing::test_graph_ops};
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;
            use itertools::Itertools;

            /// Creates a list of at most `m_ub` random normalized loop-free edges for nodes `0..n`
            fn random_edges<R: Rng>(rng: &mut R, n: NumNodes, m_ub: NumEdges) -> Vec<Edge> {
                let mut edges: Vec<Edge> = (0..m_ub).filter_map(|_| {
                    let u = rng.random_range(0..n);
                    let v = rng.random_range(0..n);
                    (u != v).then(|| Edge(u, v).normalized())
                }).collect_vec();
                edges.sort_unstable();
                edges.dedup();

                edges
            }

            /// Creates a graph with users `u0, ..., u{n-1}` and no friendships
            fn users(n: NumNodes) -> $graph {
                let mut graph = <$graph>::new();
                for i in 0..n {
                    assert!(graph.add_user(&format!("u{i}")));
                }
                graph
            }

            $(
                test_graph_ops!($graph: $trait);
            )*
        }
    };
    ($graph:ident: GraphNew) => {
        #[test]
        fn graph_new() {
            let graph = <$graph>::new();
            assert!(graph.is_empty());
            assert!(graph.is_singleton_graph());

            for n in 1..50 {
                let graph = users(n);

                assert_eq!(graph.number_of_edges(), 0);
                assert_eq!(graph.number_of_nodes(), n);
                assert_eq!(graph.vertices().collect_vec(), (0..n).collect_vec());
                assert_eq!(graph.isolated_vertices().count(), n as usize);
                assert_eq!(graph.id_of(&format!("u{}", n - 1)), Some(n - 1));
            }
        }
    };
    ($graph:ident: AdjacencyList) => {
        #[test]
        fn test_adjacency_list() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [10 as NumNodes, 20, 50] {
                for m_ub in [n * 2, n * 5, n * 10] {
                    for _ in 0..10 {
                        let edges = random_edges(rng, n, m_ub as NumEdges);

                        let mut adj_matrix = vec![vec![false; n as usize]; n as usize];
                        let mut graph = users(n);
                        for &Edge(u, v) in &edges {
                            adj_matrix[u as usize][v as usize] = true;
                            adj_matrix[v as usize][u as usize] = true;
                            graph.add_edge(u, v);
                        }

                        assert_eq!(graph.number_of_nodes(), n);
                        assert_eq!(graph.number_of_edges(), edges.len() as NumEdges);
                        assert_eq!(edges, graph.ordered_edges(true).collect_vec());

                        for u in 0..n {
                            let expected = (0..n).filter(|&v| adj_matrix[u as usize][v as usize]).collect_vec();
                            assert_eq!(graph.neighbors_of(u).sorted().collect_vec(), expected);
                            assert_eq!(graph.degree_of(u), expected.len() as NumNodes);
                            for v in 0..n {
                                assert_eq!(graph.has_edge(u, v), adj_matrix[u as usize][v as usize]);
                            }
                        }

                        let matrix = graph.adjacency_matrix();
                        for u in 0..n as usize {
                            for v in 0..n as usize {
                                assert_eq!(matrix[u][v] == 1, adj_matrix[u][v]);
                            }
                        }
                    }
                }
            }
        }
    };
    ($graph:ident: GraphEdgeEditing) => {
        #[test]
        fn test_graph_edge_editing() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [10 as NumNodes, 20, 50] {
                for m_ub in [n * 2, n * 5, n * 10] {
                    for _ in 0..10 {
                        let edges = random_edges(rng, n, m_ub as NumEdges);

                        let mut graph = users(n);
                        let mut adj_matrix = vec![vec![false; n as usize]; n as usize];

                        for &Edge(u, v) in &edges {
                            assert!(!graph.try_add_edge(u, v));
                            assert!(graph.try_add_edge(v, u));
                            adj_matrix[u as usize][v as usize] = true;
                            adj_matrix[v as usize][u as usize] = true;
                        }

                        assert!(graph.try_add_edge(0, 0));
                        assert!(!graph.has_edge(0, 0));

                        let rng = &mut Pcg64Mcg::seed_from_u64(4);

                        let mut m = graph.number_of_edges();
                        for _ in 0..(m / 2) {
                            let u = rng.random_range(0..n);
                            let v = rng.random_range(0..n);

                            if adj_matrix[u as usize][v as usize] {
                                adj_matrix[u as usize][v as usize] = false;
                                adj_matrix[v as usize][u as usize] = false;
                                assert!(graph.try_remove_edge(u, v));
                                m -= 1;
                            } else {
                                assert!(!graph.try_remove_edge(u, v));
                            }

                            assert_eq!(m, graph.number_of_edges());
                        }

                        graph.remove_edges_at_nodes(0..n);
                        assert!(graph.is_singleton_graph());
                        assert_eq!(graph.max_degree(), 0);
                    }
                }
            }
        }
    };
    ($graph:ident: DeleteUser) => {
        #[test]
        fn test_delete_user() {
            let rng = &mut Pcg64Mcg::seed_from_u64(5);

            for n in [5 as NumNodes, 20, 50] {
                for _ in 0..10 {
                    let edges = random_edges(rng, n, n * 3);
                    let mut graph = users(n);
                    graph.add_edges(edges.iter());

                    let mut alive = (0..n).map(|i| format!("u{i}")).collect_vec();
                    let mut friendships = edges
                        .iter()
                        .map(|&Edge(u, v)| (format!("u{u}"), format!("u{v}")))
                        .collect_vec();

                    while !alive.is_empty() {
                        let victim = alive.remove(rng.random_range(0..alive.len()));
                        friendships.retain(|(u, v)| *u != victim && *v != victim);

                        assert!(graph.delete_user(&victim));
                        assert!(!graph.delete_user(&victim));

                        // ids stay dense and follow the surviving insertion order
                        assert_eq!(graph.number_of_nodes() as usize, alive.len());
                        assert_eq!(graph.get_all_users(), alive.iter().map(String::as_str).collect_vec());
                        for (i, name) in alive.iter().enumerate() {
                            assert_eq!(graph.get_user_id(name).unwrap(), i as Node);
                        }

                        // all surviving friendships are preserved exactly
                        assert_eq!(graph.number_of_friendships() as usize, friendships.len());
                        for (u, v) in &friendships {
                            assert!(graph.are_friends(u, v));
                            assert!(graph.are_friends(v, u));
                        }
                        for u in graph.vertices() {
                            assert!(graph.neighbors_of(u).all(|v| v < graph.number_of_nodes() && v != u));
                        }
                    }

                    assert!(graph.is_empty());
                }
            }
        }
    };
}

pub(crate) use test_graph_ops;

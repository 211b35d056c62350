use super::*;

/// Disjoint-set forest over the nodes `0..n` with union by rank and path compression.
///
/// # Examples
/// ```
/// use socialgraph::algo::UnionFind;
///
/// let mut uf = UnionFind::new(4);
/// assert!(uf.union(0, 1));
/// assert!(uf.union(2, 3));
/// assert!(!uf.union(1, 0));
/// assert_eq!(uf.number_of_sets(), 2);
/// assert!(uf.same_set(0, 1));
/// assert!(!uf.same_set(1, 2));
/// ```
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<Node>,
    rank: Vec<u8>,
    num_sets: NumNodes,
}

impl UnionFind {
    /// Creates `n` singleton sets
    pub fn new(n: NumNodes) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n as usize],
            num_sets: n,
        }
    }

    /// Returns the number of elements
    pub fn len(&self) -> NumNodes {
        self.parent.len() as NumNodes
    }

    /// Returns *true* if there are no elements
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the representative of the set containing `u`.
    /// Every node on the path to the root is linked directly to the root afterwards.
    /// ** Panics if `u >= n` **
    pub fn find(&mut self, u: Node) -> Node {
        let mut root = u;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut u = u;
        while u != root {
            let next = self.parent[u as usize];
            self.parent[u as usize] = root;
            u = next;
        }

        root
    }

    /// Merges the sets containing `u` and `v`.
    /// Returns *true* if they were in different sets before.
    /// ** Panics if `u >= n || v >= n` **
    pub fn union(&mut self, u: Node, v: Node) -> bool {
        let (ru, rv) = (self.find(u), self.find(v));
        if ru == rv {
            return false;
        }

        let (ru, rv) = (ru as usize, rv as usize);
        match self.rank[ru].cmp(&self.rank[rv]) {
            std::cmp::Ordering::Less => self.parent[ru] = rv as Node,
            std::cmp::Ordering::Greater => self.parent[rv] = ru as Node,
            std::cmp::Ordering::Equal => {
                self.parent[rv] = ru as Node;
                self.rank[ru] += 1;
            }
        }

        self.num_sets -= 1;
        true
    }

    /// Returns *true* if `u` and `v` are in the same set
    pub fn same_set(&mut self, u: Node, v: Node) -> bool {
        self.find(u) == self.find(v)
    }

    /// Returns the current number of disjoint sets
    pub fn number_of_sets(&self) -> NumNodes {
        self.num_sets
    }
}

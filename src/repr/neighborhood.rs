use std::{iter::Copied, slice::Iter};

use itertools::Itertools;
use smallvec::{Array, SmallVec};

use super::*;

/// Trait for methods on the Neighborhood (friend set) of a specified Node.
///
/// A Neighborhood behaves like a set: [`Neighborhood::try_add_neighbor`] never creates
/// duplicates. The order of neighbors is unspecified.
pub trait Neighborhood: Clone + Default {
    /// Returns the number of neighbors in the Neighborhood
    fn num_of_neighbors(&self) -> NumNodes;

    type NeighborhoodIter<'a>: Iterator<Item = Node> + 'a
    where
        Self: 'a;

    /// Returns an iterator over all neighbors in the Neighborhood
    fn neighbors(&self) -> Self::NeighborhoodIter<'_>;

    /// Returns *true* if `v` is in the Neighborhood
    fn has_neighbor(&self, v: Node) -> bool {
        self.neighbors().any(|u| u == v)
    }

    /// Tries to add a neighbor to the Neighborhood.
    /// Returns *true* if the node was in the Neighborhood before.
    fn try_add_neighbor(&mut self, u: Node) -> bool {
        if self.has_neighbor(u) {
            true
        } else {
            self.add_neighbor(u);
            false
        }
    }

    /// Adds a neighbor to the Neighborhood without checking if this neighbor exists beforehand.
    fn add_neighbor(&mut self, u: Node);

    /// Tries to remove a neighbor from the Neighborhood.
    /// Returns *true* if the node was in the Neighborhood before.
    fn try_remove_neighbor(&mut self, u: Node) -> bool;

    /// Removes all neighbors that fit a given predicate and returns the number of removed neighbors
    fn remove_neighbors_if<F: FnMut(Node) -> bool>(&mut self, predicate: F) -> NumNodes;

    /// Removes all neighbors in the Neighborhood
    fn clear(&mut self);
}

/// Trait for accessing the neighborhood of nodes as slices
pub trait NeighborhoodSlice: Neighborhood {
    /// Returns a slice-reference of the neighborhood
    fn as_slice(&self) -> &[Node];
}

/// Trait for mutably accessing the neighborhood of nodes as slices
pub trait NeighborhoodSliceMut: NeighborhoodSlice {
    /// Returns a mutable slice-reference of the neighborhood
    fn as_slice_mut(&mut self) -> &mut [Node];

    /// Applies `map` to every neighbor in place.
    /// `map` must be injective on the current neighbors to keep set semantics.
    fn relabel_neighbors<F: FnMut(Node) -> Node>(&mut self, mut map: F) {
        for v in self.as_slice_mut() {
            *v = map(*v);
        }
    }
}

macro_rules! impl_vec_like_neighborhood {
    ($struct:ty $(, $const:ident)?) => {
        impl$(<const $const: usize>)? Neighborhood for $struct
        $(where [Node; $const]: Array<Item = Node>)?
        {
            fn num_of_neighbors(&self) -> NumNodes {
                self.0.len() as NumNodes
            }

            type NeighborhoodIter<'a>
                = Copied<Iter<'a, Node>>
            where
                Self: 'a;

            fn neighbors(&self) -> Self::NeighborhoodIter<'_> {
                self.0.iter().copied()
            }

            fn add_neighbor(&mut self, u: Node) {
                self.0.push(u);
            }

            fn try_remove_neighbor(&mut self, u: Node) -> bool {
                if let Some((pos, _)) = self.0.iter().find_position(|&&x| x == u) {
                    self.0.swap_remove(pos);
                    true
                } else {
                    false
                }
            }

            fn remove_neighbors_if<F>(&mut self, mut predicate: F) -> NumNodes
            where
                F: FnMut(Node) -> bool,
            {
                let size_before = self.0.len();
                self.0.retain(|x| !predicate(*x));
                (size_before - self.0.len()) as NumNodes
            }

            fn clear(&mut self) {
                self.0.clear();
            }
        }

        impl$(<const $const: usize>)? NeighborhoodSlice for $struct
        $(where [Node; $const]: Array<Item = Node>)?
        {
            fn as_slice(&self) -> &[Node] {
                &self.0
            }
        }

        impl$(<const $const: usize>)? NeighborhoodSliceMut for $struct
        $(where [Node; $const]: Array<Item = Node>)?
        {
            fn as_slice_mut(&mut self) -> &mut [Node] {
                &mut self.0
            }
        }
    };
}

/// Basic Neighborhood-Impl. using `Vec<Node>`
#[derive(Default, Clone, Debug)]
pub struct ArrNeighborhood(pub Vec<Node>);

/// Like [`ArrNeighborhood`] but uses `SmallVec<[Node; N]>` instead.
/// Friend lists in social graphs are short, so this is the default representation.
#[derive(Default, Clone, Debug)]
pub struct SparseNeighborhood<const N: usize = 8>(pub SmallVec<[Node; N]>)
where
    [Node; N]: Array<Item = Node>;

impl_vec_like_neighborhood!(ArrNeighborhood);
impl_vec_like_neighborhood!(SparseNeighborhood<N>, N);

#[cfg(test)]
mod tests {
    use super::*;

    fn set_semantics<Nbs: NeighborhoodSliceMut>() {
        let mut nbs = Nbs::default();
        assert!(!nbs.try_add_neighbor(3));
        assert!(!nbs.try_add_neighbor(5));
        assert!(nbs.try_add_neighbor(3));
        assert_eq!(nbs.num_of_neighbors(), 2);

        assert!(nbs.try_remove_neighbor(3));
        assert!(!nbs.try_remove_neighbor(3));
        assert_eq!(nbs.neighbors().collect_vec(), vec![5]);

        nbs.add_neighbor(7);
        nbs.add_neighbor(9);
        assert_eq!(nbs.remove_neighbors_if(|v| v == 7), 1);

        nbs.relabel_neighbors(|v| v - 1);
        assert_eq!(nbs.neighbors().sorted().collect_vec(), vec![4, 8]);

        nbs.clear();
        assert_eq!(nbs.num_of_neighbors(), 0);
    }

    #[test]
    fn arr_neighborhood() {
        set_semantics::<ArrNeighborhood>();
    }

    #[test]
    fn sparse_neighborhood() {
        set_semantics::<SparseNeighborhood>();
        set_semantics::<SparseNeighborhood<2>>();
    }
}

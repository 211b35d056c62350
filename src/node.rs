/*!
# Node Representation

Every user of a [`SocialGraph`](crate::repr::SocialGraph) is identified internally by a dense
`Node = u32` in the range `0..n`, assigned in insertion order.
Social graphs handled by this crate stay far below `2^32` users, so `u32` saves space compared to
`usize` while still allowing nodes to be used directly as indices.
*/

use std::num::NonZero;
use stream_bitset::bitset::BitSetImpl;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` users in a graph!
pub type NumNodes = Node;

/// BitSet for Nodes
pub type NodeBitSet = BitSetImpl<Node>;

/// As `Option<Node>` uses additional bytes for padding, it can be inefficient
/// since traversals keep a `Vec<Option<Node>>` of parents. This instead uses the
/// `NonZero`-Wrapper to reserve the constant `N` as the `None`-Value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct OptionalNodeImpl<const N: Node>(NonZero<Node>);

/// `INVALID_NODE` is never assigned to a user and thus safe to pick as the `None`-Value
pub type OptionalNode = OptionalNodeImpl<INVALID_NODE>;

impl<const N: Node> OptionalNodeImpl<N> {
    /// Returns `Some(OptionalNodeImpl)` if `n != N` and `None` otherwise
    pub const fn new(n: Node) -> Option<Self> {
        match NonZero::new(n ^ N) {
            Some(inner) => Some(OptionalNodeImpl(inner)),
            None => None,
        }
    }

    /// Gets the underlying Node-Value
    pub const fn get(&self) -> Node {
        self.0.get() ^ N
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_node() {
        assert!(OptionalNode::new(INVALID_NODE).is_none());
        assert_eq!(OptionalNode::new(0).map(|x| x.get()), Some(0));
        assert_eq!(OptionalNode::new(17).map(|x| x.get()), Some(17));
        assert_eq!(
            std::mem::size_of::<Option<OptionalNode>>(),
            std::mem::size_of::<Node>()
        );
    }
}

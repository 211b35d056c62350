/*!
# Representations

The store behind every algorithm of this crate is the [`SocialGraph`]: an undirected, simple
graph whose nodes carry unique user names.
Neighborhoods are pluggable via the [`Neighborhood`] trait:

- [`SparseNeighborhood`] (default): `SmallVec`-backed, friend lists are short in practice,
- [`ArrNeighborhood`]: plain `Vec`-backed.
*/

use crate::{edge::*, node::*, ops::*};

mod neighborhood;
mod social;

pub use neighborhood::*;
pub use social::*;

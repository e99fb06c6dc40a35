//! Step-by-step path searches over a grid snapshot.
//!
//! Each strategy is a lazy, finite iterator of [`Step`]s: one
//! [`Step::Visit`] per settled coordinate, then a single [`Step::Result`]
//! carrying the reconstructed path. Consumers animate the steps as they
//! arrive or drain them with [`Search::run_to_end`].
//!
//! - **BFS** ([`Bfs`]): FIFO frontier, shortest path in edge count
//! - **DFS** ([`Dfs`]): LIFO frontier, any path
//! - **Dijkstra** ([`Dijkstra`]): cost-ordered frontier with relaxation
//! - **A\*** ([`Astar`]): Dijkstra ordered by cost plus Manhattan estimate
//!
//! Neighbors are always enumerated East, South, West, North, and equal
//! priorities pop in insertion order, so visitation sequences are
//! reproducible.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, DFS |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra |
//! | [`AstarPather`] : [`WeightedPather`] | A*, [`Search`] |
//!
//! [`Snapshot`](gridwalk_core::Snapshot) implements all three with unit
//! costs.

mod astar;
mod bfs;
mod dfs;
mod dijkstra;
mod distance;
mod frontier;
mod search;
mod space;
mod step;
mod traits;

pub use astar::Astar;
pub use bfs::Bfs;
pub use dfs::Dfs;
pub use dijkstra::{Dijkstra, UNREACHABLE};
pub use distance::manhattan;
pub use search::{AlgorithmKind, Search, Trace};
pub use step::{Outcome, Step};
pub use traits::{AstarPather, Pather, WeightedPather};

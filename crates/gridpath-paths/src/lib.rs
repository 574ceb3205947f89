//! Graph search over occupancy grids.
//!
//! A [`Graph`] is derived from a [`Grid`](gridpath_core::Grid) by linking
//! every free cell to its free orthogonal neighbours. Three searches run
//! over it:
//!
//! - **BFS** fewest-hops path ([`bfs`], [`Bfs`])
//! - **DFS** first path found depth-first ([`dfs`], [`Dfs`])
//! - **Dijkstra** cheapest weighted path ([`dijkstra`], [`Dijkstra`])
//!
//! Each search is an explorer that yields [`Event`]s lazily as it
//! discovers and finalizes cells, so a presentation layer can replay the
//! exploration at its own pace. Calling `finish` drives it to completion
//! and returns the [`SearchResult`].
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, DFS, reachability |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra |

mod bfs;
mod dfs;
mod dijkstra;
mod graph;
mod search;
mod traits;

pub use bfs::{Bfs, bfs};
pub use dfs::{Dfs, dfs};
pub use dijkstra::{Dijkstra, dijkstra};
pub use graph::{Graph, UNREACHABLE};
pub use search::{
    Algorithm, Event, Explorer, ParseAlgorithmError, Role, SearchResult, connected, find_path,
    search,
};
pub use traits::{Pather, WeightedPather};

//! Graph representation and algorithms module

pub mod compressed;
pub mod builder;
pub mod algorithms;

pub use compressed::{Adjacency, UndirectedGraph, WeightedGraph};
pub use builder::{build_from_adjacency, GraphBuilder};
pub use algorithms::{shortest_path_tree, ShortestPathTree};

//! Input loading and preprocessing

pub mod json;
pub mod preprocessing;

pub use json::{load_graph, load_network_data, parse_network_data, NetworkRecord};
pub use preprocessing::{summarize_weights, WeightSummary};

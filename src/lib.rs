//! Core library for influence and community analysis of weighted social graphs

pub mod config;
pub mod error;
pub mod data;
pub mod graph;
pub mod centrality;
pub mod cluster;
pub mod viral;
pub mod storage;

pub use anyhow::{Result, anyhow};
pub use error::{ConvergenceError, EngineError, MalformedGraphError};

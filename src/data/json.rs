//! JSON input handling for the congressional network record

use std::fs::File;
use std::path::Path;
use anyhow::{anyhow, Context, Result};
use memmap2::Mmap;
use serde::{Serialize, Deserialize};
use crate::graph::{build_from_adjacency, WeightedGraph};

/// Parallel per-node arrays describing the network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRecord {
    pub username_list: Vec<String>,
    pub out_list: Vec<Vec<usize>>,
    pub out_weight: Vec<Vec<f64>>,

    /// Reverse view; redundant with `out_list`
    #[serde(default)]
    pub in_list: Option<Vec<Vec<usize>>>,
    #[serde(default)]
    pub in_weight: Option<Vec<Vec<f64>>>,
}

impl NetworkRecord {
    /// Build the graph from the outgoing view
    pub fn to_graph(&self) -> Result<WeightedGraph> {
        let graph = build_from_adjacency(&self.username_list, &self.out_list, &self.out_weight)?;
        self.check_incoming(&graph);
        Ok(graph)
    }

    /// Every edge weight as stored in the record
    pub fn all_weights(&self) -> Vec<f64> {
        self.out_weight.iter().flatten().copied().collect()
    }

    /// Warn when the supplied incoming view disagrees with the built graph
    fn check_incoming(&self, graph: &WeightedGraph) {
        if let Some(in_list) = &self.in_list {
            let in_edges: usize = in_list.iter().map(|row| row.len()).sum();
            if in_list.len() != graph.node_count || in_edges != graph.edge_count() {
                log::warn!(
                    "inList describes {} edges over {} nodes, outList describes {} edges over {} nodes",
                    in_edges,
                    in_list.len(),
                    graph.edge_count(),
                    graph.node_count
                );
            }
        }
        if let (Some(in_list), Some(in_weight)) = (&self.in_list, &self.in_weight) {
            let mismatched = in_list
                .iter()
                .zip(in_weight)
                .filter(|(targets, weights)| targets.len() != weights.len())
                .count();
            if mismatched > 0 || in_list.len() != in_weight.len() {
                log::warn!("inList and inWeight disagree on {} rows", mismatched);
            }
        }
    }
}

/// The record may come wrapped in a one-element array
#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Many(Vec<NetworkRecord>),
    One(NetworkRecord),
}

/// Parse a network record from JSON bytes
pub fn parse_network_data(bytes: &[u8]) -> Result<NetworkRecord> {
    let document: Document = serde_json::from_slice(bytes).context("Invalid network JSON")?;

    match document {
        Document::One(record) => Ok(record),
        Document::Many(records) => records
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Network JSON array is empty")),
    }
}

/// Load the network record from a JSON file
pub fn load_network_data(path: &str) -> Result<NetworkRecord> {
    log::info!("Reading network data: {}", path);

    // Check if the file exists
    if !Path::new(path).exists() {
        return Err(anyhow!("File not found: {}", path));
    }

    let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;
    if file.metadata()?.len() == 0 {
        return Err(anyhow!("File is empty: {}", path));
    }

    // SAFETY: the map is read-only and dropped before this function returns
    let mmap = unsafe { Mmap::map(&file)? };
    let record = parse_network_data(&mmap)?;

    log::info!("Loaded {} members", record.username_list.len());

    Ok(record)
}

/// Load the network and build its graph
pub fn load_graph(path: &str) -> Result<(NetworkRecord, WeightedGraph)> {
    let record = load_network_data(path)?;
    let graph = record.to_graph()?;

    log::info!(
        "Loaded graph with {} nodes and {} edges",
        graph.node_count,
        graph.edge_count()
    );

    Ok((record, graph))
}

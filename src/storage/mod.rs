//! Results persistence module

use anyhow::Result;
use crate::centrality::{CentralityReport, ScoreVector};
use crate::cluster::{Community, CommunityDetection};
use crate::data::WeightSummary;
use crate::graph::WeightedGraph;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use serde_json::{json, to_string_pretty, Value};

fn write_json(path: &Path, value: &Value) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(value)?.as_bytes())?;
    Ok(())
}

/// Ranked `(rank, label, score)` entries for the top of a score vector
fn ranked_entries(graph: &WeightedGraph, scores: &ScoreVector, top_n: usize) -> Value {
    Value::Array(
        scores
            .top(top_n)
            .into_iter()
            .enumerate()
            .map(|(rank, (node, score))| {
                json!({
                    "rank": rank + 1,
                    "node": node,
                    "username": graph.label(node),
                    "score": score,
                })
            })
            .collect(),
    )
}

/// Save graph and weight statistics
pub fn save_summary(
    graph: &WeightedGraph,
    weights: Option<&WeightSummary>,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving summary information");
    fs::create_dir_all(output_dir)?;

    let node_count = graph.node_count;
    let avg_out_degree = if node_count == 0 {
        0.0
    } else {
        graph.edge_count() as f64 / node_count as f64
    };

    let summary = json!({
        "graph_stats": {
            "node_count": node_count,
            "edge_count": graph.edge_count(),
            "total_weight": graph.total_weight(),
            "avg_out_degree": avg_out_degree,
            "memory_bytes": graph.memory_usage(),
        },
        "weight_stats": weights,
    });

    write_json(&Path::new(output_dir).join("summary.json"), &summary)
}

/// Save the top members under each centrality measure and the combined ranking
pub fn save_centrality(
    graph: &WeightedGraph,
    report: &CentralityReport,
    top_n: usize,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving centrality rankings");
    fs::create_dir_all(output_dir)?;

    let measures: serde_json::Map<String, Value> = report
        .measures()
        .iter()
        .map(|(name, scores)| (name.to_string(), ranked_entries(graph, scores, top_n)))
        .collect();

    let centrality = json!({
        "measures": measures,
        "combined": ranked_entries(graph, &report.combined, top_n),
    });

    write_json(&Path::new(output_dir).join("centrality.json"), &centrality)
}

/// Save community assignment, modularity and per-community summaries
pub fn save_communities(
    graph: &WeightedGraph,
    detection: &CommunityDetection,
    communities: &[Community],
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving {} communities to {}", communities.len(), output_dir);
    fs::create_dir_all(output_dir)?;

    let label = |node: &usize| graph.label(*node).to_string();

    let summaries: Vec<Value> = communities
        .iter()
        .map(|c| {
            json!({
                "id": c.id,
                "size": c.size,
                "density": c.density,
                "average_degree": c.average_degree,
                "central_members": c.central_members.iter().map(label).collect::<Vec<_>>(),
                "members": c.members.iter().map(label).collect::<Vec<_>>(),
            })
        })
        .collect();

    let output = json!({
        "community_count": detection.partition.community_count(),
        "modularity": detection.modularity,
        "levels": detection.levels,
        "assignment": detection.partition.assignment(),
        "communities": summaries,
    });

    write_json(&Path::new(output_dir).join("communities.json"), &output)
}

/// Save viral centrality scores
pub fn save_viral(
    graph: &WeightedGraph,
    scores: &ScoreVector,
    top_n: usize,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving viral centrality scores");
    fs::create_dir_all(output_dir)?;

    let output = json!({
        "top": ranked_entries(graph, scores, top_n),
        "scores": scores,
    });

    write_json(&Path::new(output_dir).join("viral.json"), &output)
}

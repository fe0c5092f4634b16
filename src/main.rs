use anyhow::Result;
use clap::Parser;

use congress_influence_analyzer::centrality::CentralityReport;
use congress_influence_analyzer::cluster::{louvain, summarize_communities};
use congress_influence_analyzer::config::Config;
use congress_influence_analyzer::{data, storage, viral};

#[derive(Parser, Debug)]
#[clap(
    name = "congress-influence-analyzer",
    about = "Influence ranking and community detection for congressional interaction networks"
)]
struct Cli {
    /// Path to the network JSON file
    #[clap(long)]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "influence_results")]
    output_dir: String,

    /// Number of top members kept per ranking
    #[clap(long, default_value = "10")]
    top_n: usize,

    /// PageRank damping factor
    #[clap(long, default_value = "0.85")]
    damping: f64,

    /// Convergence tolerance for eigenvector centrality and PageRank
    #[clap(long, default_value = "1e-6")]
    tolerance: f64,

    /// Transmission probability scaling factor for viral spread
    #[clap(long, default_value = "1.0")]
    beta: f64,

    /// Convergence tolerance for viral spread
    #[clap(long, default_value = "0.001")]
    viral_tolerance: f64,

    /// Round cap for viral spread (-1 = run to convergence)
    #[clap(long, default_value = "-1", allow_hyphen_values = true)]
    viral_rounds: i64,

    /// Skip the viral centrality stage
    #[clap(long)]
    skip_viral: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        // If threads = 0, use all available cores
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = Config {
        damping: args.damping,
        tolerance: args.tolerance,
        viral_beta: args.beta,
        viral_tolerance: args.viral_tolerance,
        top_n: args.top_n,
        ..Config::default()
    }
    .with_viral_round_cap(args.viral_rounds);

    log::info!("Starting influence analysis");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    std::fs::create_dir_all(&args.output_dir)?;

    // 1. Load data
    let (record, graph) = data::load_graph(&args.input)?;
    let weights = data::summarize_weights(&record.all_weights());
    if let Some(ref summary) = weights {
        log::info!(
            "Edge weights: mean {:.4}, median {:.4}, range [{:.4}, {:.4}]",
            summary.mean,
            summary.median,
            summary.min,
            summary.max
        );
    }
    storage::save_summary(&graph, weights.as_ref(), &args.output_dir)?;

    // 2. Centrality measures
    let report = CentralityReport::compute(&graph, &config)?;
    for (node, score) in report.combined.top(config.top_n) {
        log::info!("Combined influence: @{} {:.4}", graph.label(node), score);
    }
    storage::save_centrality(&graph, &report, config.top_n, &args.output_dir)?;

    // 3. Communities
    let detection = louvain(&graph.undirected_projection());
    let communities = summarize_communities(&graph, &detection.partition, config.community_top_k);
    storage::save_communities(&graph, &detection, &communities, &args.output_dir)?;

    // 4. Viral centrality
    if !args.skip_viral {
        let scores = viral::viral_centrality(&graph, &config.spread_params())?;
        storage::save_viral(&graph, &scores, config.top_n, &args.output_dir)?;
    }

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}

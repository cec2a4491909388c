use anyhow::Result;
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;

use mst_cluster::config::{DEFAULT_SCAN_STEPS, DEFAULT_SPREAD};
use mst_cluster::data::json::load_records;
use mst_cluster::{
    build_cluster_at_threshold, cluster, ClusterResult, Config, Euclidean, GraphMode,
    ValidityIndex,
};

#[derive(Parser, Debug)]
#[clap(
    name = "mst-cluster",
    about = "Spanning-tree clustering of 2D points with automatic threshold selection"
)]
struct Cli {
    /// JSON files, each an array of {"x": .., "y": .., ...} records
    #[clap(required = true)]
    inputs: Vec<String>,

    /// Validity index used to pick the threshold
    #[clap(long, value_enum, default_value = "sd")]
    index: ValidityIndex,

    /// Candidate edge construction
    #[clap(long, value_enum, default_value = "full-matrix")]
    graph_mode: GraphMode,

    /// Drop non-hub candidate edges longer than this
    #[clap(long)]
    edge_threshold: Option<f64>,

    /// Intervals in the threshold scan
    #[clap(long, default_value_t = DEFAULT_SCAN_STEPS)]
    steps: usize,

    /// Standard deviations around the median weight that bound the scan
    #[clap(long, default_value_t = DEFAULT_SPREAD)]
    spread: f64,

    /// Cut at this threshold instead of searching
    #[clap(long)]
    threshold: Option<f64>,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    input: &'a str,
    result: ClusterResult,
}

fn run_one(path: &str, config: &Config, threshold: Option<f64>) -> Result<ClusterResult> {
    let records = load_records(path)?;

    let result = match threshold {
        Some(t) => {
            let clusters = build_cluster_at_threshold(&records, &Euclidean, t, config)?;
            let score = config.index.score(&records, &clusters);
            ClusterResult {
                clusters,
                threshold: t,
                index: config.index,
                score,
            }
        }
        None => cluster(&records, &Euclidean, config)?,
    };

    log::info!(
        "{}: {} points in {} clusters at threshold {:.4}",
        path,
        records.len(),
        result.cluster_count(),
        result.threshold
    );

    Ok(result)
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

    // Each input is an independent call; the pool only spreads files
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = Config::new(
        args.index,
        args.graph_mode,
        args.edge_threshold,
        args.steps,
        args.spread,
    );
    config.validate()?;

    log::info!("Clustering {} input(s) with {:?}", args.inputs.len(), config);

    let results: Vec<ClusterResult> = args
        .inputs
        .par_iter()
        .map(|path| run_one(path, &config, args.threshold))
        .collect::<Result<_>>()?;

    let outputs: Vec<Output> = args
        .inputs
        .iter()
        .zip(results)
        .map(|(input, result)| Output { input, result })
        .collect();

    println!("{}", serde_json::to_string_pretty(&outputs)?);

    Ok(())
}

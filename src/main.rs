use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use fastwarp_dtw::{
    BuiltinMetric, Dtw, FastDtw, FullWindow, ScalarSeries, TimeSeries, display_window, downsample,
    project_window,
};
use fastwarp_io::{SeriesReader, SeriesSet};

#[derive(Parser)]
#[command(name = "fastwarp")]
#[command(about = "Exact and FastDTW alignment of numeric time series")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel computation (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Two series picked by id from one CSV file.
#[derive(Args, Debug, Clone)]
struct PairArgs {
    /// Path to the input CSV file
    #[arg(long)]
    data: PathBuf,

    /// Id of the first series (grid columns)
    #[arg(long)]
    first: String,

    /// Id of the second series (grid rows)
    #[arg(long)]
    second: String,

    /// Per-sample distance: "euclidean" or "manhattan"
    #[arg(long, default_value = "euclidean")]
    metric: String,
}

#[derive(Subcommand)]
enum Command {
    /// Align two series and report the warp path and its cost
    Align {
        #[command(flatten)]
        pair: PairArgs,

        /// FastDTW search radius
        #[arg(long, default_value_t = 1)]
        radius: usize,

        /// Solve exactly over the full grid instead of using FastDTW
        #[arg(long, default_value_t = false)]
        exact: bool,

        /// Include the path in the JSON output and draw it on stderr
        #[arg(long, default_value_t = false)]
        show_path: bool,

        /// Draw the full-resolution search window on stderr
        #[arg(long, default_value_t = false)]
        show_window: bool,
    },

    /// Compute the exact alignment cost of two series in linear memory
    Distance {
        #[command(flatten)]
        pair: PairArgs,
    },

    /// Compute FastDTW costs between every pair of series in a file
    Matrix {
        /// Path to the input CSV file
        #[arg(long)]
        data: PathBuf,

        /// FastDTW search radius
        #[arg(long, default_value_t = 1)]
        radius: usize,

        /// Per-sample distance: "euclidean" or "manhattan"
        #[arg(long, default_value = "euclidean")]
        metric: String,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct AlignOutput {
    first: String,
    second: String,
    method: &'static str,
    radius: Option<usize>,
    cost: f64,
    path_len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Vec<[usize; 2]>>,
}

#[derive(Serialize)]
struct DistanceOutput {
    first: String,
    second: String,
    cost: f64,
}

#[derive(Serialize)]
struct MatrixOutput {
    radius: usize,
    ids: Vec<String>,
    costs: Vec<Vec<f64>>,
}

fn parse_metric(s: &str) -> Result<BuiltinMetric> {
    match s {
        "euclidean" => Ok(BuiltinMetric::Euclidean),
        "manhattan" => Ok(BuiltinMetric::Manhattan),
        other => anyhow::bail!("unknown metric: {other} (expected euclidean or manhattan)"),
    }
}

fn read_series(data: &Path) -> Result<SeriesSet> {
    let set = SeriesReader::new(data)
        .read()
        .context("failed to read input CSV")?;
    info!(n_series = set.len(), "dataset loaded");
    Ok(set)
}

fn lookup<'a>(set: &'a SeriesSet, id: &str) -> Result<&'a ScalarSeries> {
    set.get(id)
        .with_context(|| format!("series \"{id}\" not found in input CSV"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Align {
            pair,
            radius,
            exact,
            show_path,
            show_window,
        } => {
            let metric = parse_metric(&pair.metric)?;
            let set = read_series(&pair.data)?;
            let a = lookup(&set, &pair.first)?;
            let b = lookup(&set, &pair.second)?;

            let fast = FastDtw::new(radius).with_metric(metric);
            let alignment = if exact {
                Dtw::new().with_metric(metric).align(a, b)
            } else {
                fast.align(a, b)
            }
            .context("alignment failed")?;
            info!(cost = %alignment.cost, path_len = alignment.path.len(), "alignment complete");

            if show_window {
                let min_size = radius + 2;
                if exact || a.len() <= min_size || b.len() <= min_size {
                    let window = FullWindow::new(a.len(), b.len())?;
                    eprint!("{}", display_window(&window));
                } else {
                    let coarse = fast
                        .align(&downsample(a, 2)?, &downsample(b, 2)?)
                        .context("coarse alignment failed")?;
                    let window = project_window(&coarse.path, a.len(), b.len(), 2, radius)?;
                    eprint!("{}", display_window(&window));
                }
            }
            if show_path {
                eprint!("{}", alignment.path);
            }

            let output = AlignOutput {
                first: pair.first,
                second: pair.second,
                method: if exact { "exact" } else { "fastdtw" },
                radius: (!exact).then_some(radius),
                cost: alignment.cost.value(),
                path_len: alignment.path.len(),
                path: show_path.then(|| {
                    alignment
                        .path
                        .points()
                        .iter()
                        .map(|p| [p.x, p.y])
                        .collect()
                }),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Distance { pair } => {
            let metric = parse_metric(&pair.metric)?;
            let set = read_series(&pair.data)?;
            let a = lookup(&set, &pair.first)?;
            let b = lookup(&set, &pair.second)?;

            let cost = Dtw::new()
                .with_metric(metric)
                .warp_distance(a, b)
                .context("distance computation failed")?;

            let output = DistanceOutput {
                first: pair.first,
                second: pair.second,
                cost: cost.value(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Matrix {
            data,
            radius,
            metric,
        } => {
            let metric = parse_metric(&metric)?;
            let set = read_series(&data)?;

            let costs = FastDtw::new(radius)
                .with_metric(metric)
                .pairwise(set.series())
                .context("pairwise computation failed")?;
            info!(n_pairs = costs.iter().count(), "pairwise costs computed");

            let n = costs.len();
            let output = MatrixOutput {
                radius,
                ids: set.ids().iter().map(|id| id.as_str().to_string()).collect(),
                costs: (0..n)
                    .map(|i| (0..n).map(|j| costs.get(i, j).value()).collect())
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

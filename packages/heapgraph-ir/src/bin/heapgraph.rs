//! Heapgraph CLI
//!
//! # Usage
//!
//! ```bash
//! # Node/edge counts and a type histogram
//! heapgraph summary app.heapsnapshot
//!
//! # Retained sizes of every node, largest first
//! heapgraph retained app.heapsnapshot --preset fast --top 20
//!
//! # Only selected start nodes, summing every reached node
//! heapgraph retained app.heapsnapshot --node 0 --node 42 --strategy path-self-size
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use clap::{Parser, Subcommand};
use heapgraph_ir::config::{HeapGraphConfig, Preset};
use heapgraph_ir::{AggregationStrategy, HeapGraphService, NodeIndex, RawSnapshot};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "heapgraph")]
#[command(about = "Heap snapshot branch enumeration and retained-size analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a snapshot and print its shape
    Summary {
        /// Heap snapshot file (JSON)
        snapshot: PathBuf,
    },

    /// Print retained sizes as JSON
    Retained {
        /// Heap snapshot file (JSON)
        snapshot: PathBuf,

        /// Start node index (repeatable); every node when omitted
        #[arg(short, long = "node")]
        nodes: Vec<NodeIndex>,

        /// leaf-self-size, path-self-size or literal
        #[arg(short, long)]
        strategy: Option<AggregationStrategy>,

        /// fast, balanced, thorough or custom
        #[arg(short, long)]
        preset: Option<Preset>,

        /// YAML configuration file (v1)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the branch cap
        #[arg(long)]
        max_branches: Option<usize>,

        /// Override the depth cap
        #[arg(long)]
        max_depth: Option<usize>,

        /// Only print the N largest entries
        #[arg(long)]
        top: Option<usize>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { snapshot } => {
            let service = HeapGraphService::new(HeapGraphConfig::default())?;
            let summary = service.summarize(&read_snapshot(&snapshot)?)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Retained {
            snapshot,
            nodes,
            strategy,
            preset,
            config,
            max_branches,
            max_depth,
            top,
        } => {
            let mut config = match (config, preset) {
                (Some(path), _) => HeapGraphConfig::from_yaml(path)?,
                (None, Some(preset)) => HeapGraphConfig::preset(preset),
                (None, None) => HeapGraphConfig::default(),
            };
            if let Some(strategy) = strategy {
                config = config.retained_size(|c| c.strategy(strategy));
            }
            if max_branches.is_some() {
                config = config.enumeration(|c| c.max_branches(max_branches));
            }
            if max_depth.is_some() {
                config = config.enumeration(|c| c.max_depth(max_depth));
            }

            let service = HeapGraphService::new(config)?;
            let raw = read_snapshot(&snapshot)?;
            let mut report = if nodes.is_empty() {
                service.analyze_all(&raw)?
            } else {
                service.analyze_nodes(&raw, &nodes)?
            };

            report.sort_descending();
            if let Some(n) = top {
                report.truncate(n);
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn read_snapshot(path: &Path) -> Result<RawSnapshot, Box<dyn std::error::Error>> {
    let file = File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(RawSnapshot::from_reader(BufReader::new(file))?)
}

//! Command-line entrypoint: prints render-ready graph or cluster JSON for a dataset.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use std::path::PathBuf;

use care_graph::components::network_graph::StatusFilter;
use care_graph::{
	Dataset, ExplorerConfig, ExplorerState, FilterCriteria, Theme, cluster, init_logging,
};
use clap::{Args, Parser, Subcommand};
use log::warn;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "care-graph", version, about = "Care referral network graph engine")]
struct Cli {
	/// Explorer config file (TOML)
	#[arg(long, global = true)]
	config: Option<PathBuf>,

	/// Pretty-print JSON output
	#[arg(long, global = true)]
	pretty: bool,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Build, filter and annotate the relationship graph
	Graph(GraphArgs),
	/// Cluster the dataset's point entities for map display
	Clusters {
		/// Dataset JSON file
		dataset: PathBuf,

		/// Clustering radius in degrees (overrides config)
		#[arg(long)]
		threshold: Option<f64>,
	},
}

#[derive(Args)]
struct GraphArgs {
	/// Dataset JSON file
	dataset: PathBuf,

	/// Case-insensitive search text
	#[arg(long, default_value = "")]
	search: String,

	/// Case status to show, or "all"
	#[arg(long, default_value = "all")]
	status: String,

	/// Hide organizations with fewer connections
	#[arg(long, default_value_t = 0)]
	min_connections: usize,

	#[arg(long)]
	hide_cases: bool,

	#[arg(long)]
	hide_edges: bool,

	/// Node id to focus on
	#[arg(long)]
	focus: Option<String>,

	/// Node id under the pointer
	#[arg(long)]
	hover: Option<String>,

	/// Node id to select
	#[arg(long)]
	select: Option<String>,

	/// Emit one node per case
	#[arg(long)]
	individual: bool,

	/// Built-in theme name
	#[arg(long, default_value = "clinical")]
	theme: String,
}

fn main() {
	init_logging();
	let cli = Cli::parse();

	if let Err(e) = run(cli) {
		eprintln!("Error: {e}");
		std::process::exit(1);
	}
}

fn run(cli: Cli) -> care_graph::Result<()> {
	let mut config = match &cli.config {
		Some(path) => ExplorerConfig::from_path(path)?,
		None => ExplorerConfig::default(),
	};

	match cli.command {
		Commands::Graph(args) => {
			config.graph.individual_mode |= args.individual;
			let dataset = Dataset::from_path(&args.dataset)?;
			let theme = Theme::by_name(&args.theme).unwrap_or_else(|| {
				warn!("care-graph: unknown theme {}, using default", args.theme);
				Theme::default()
			});

			let mut explorer = ExplorerState::new_with_theme(&dataset, config, theme);
			explorer.set_criteria(FilterCriteria {
				search: args.search,
				status: StatusFilter::parse(&args.status),
				min_connections: args.min_connections,
				show_cases: !args.hide_cases,
				show_edges: !args.hide_edges,
			});
			if let Some(id) = &args.focus {
				explorer.toggle_focus(id);
			}
			explorer.set_hover(args.hover.as_deref());
			if let Some(id) = &args.select {
				explorer.select(id);
			}
			print_json(&explorer.view(), cli.pretty)
		}
		Commands::Clusters { dataset, threshold } => {
			if let Some(t) = threshold {
				config.geo.cluster_threshold_degrees = t;
				config.validate()?;
			}
			let dataset = Dataset::from_path(&dataset)?;
			let clusters = cluster(&dataset.points, config.geo.cluster_threshold_degrees);
			print_json(&clusters, cli.pretty)
		}
	}
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> care_graph::Result<()> {
	let json = if pretty {
		serde_json::to_string_pretty(value)?
	} else {
		serde_json::to_string(value)?
	};
	println!("{json}");
	Ok(())
}

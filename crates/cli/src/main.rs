//! commap - render the community map marker set from source dumps
//!
//! Loads the four source collections from JSON files, applies layer
//! visibility, clustering and search, and writes the render set, the
//! statistics, or the CSV export.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use commap_core::export::{export_filename, to_rows, write_csv};
use commap_core::model::{LayerKind, parse_records};
use commap_core::params::{ClusterParams, ClusterStrategy, DEFAULT_CLUSTER_THRESHOLD};
use commap_core::pipeline::{MapSources, MapState, render};
use commap_core::{Aggregate, LayerStore};
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const EXPORT_PREFIX: &str = "community-map";

/// What to write.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum OutputType {
    /// Render set and statistics as JSON (default)
    #[default]
    Json,
    /// Flattened rows as CSV
    Csv,
    /// Statistics only, as JSON
    Stats,
}

impl OutputType {
    const fn extension(self) -> &'static str {
        match self {
            OutputType::Json | OutputType::Stats => "json",
            OutputType::Csv => "csv",
        }
    }
}

/// Fuse group, event, home and recommendation dumps into one clustered,
/// filtered marker set.
#[derive(Parser, Debug)]
#[command(name = "commap")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON array of city groups
    #[arg(long)]
    groups: Option<PathBuf>,

    /// JSON array of events
    #[arg(long)]
    events: Option<PathBuf>,

    /// JSON array of host homes
    #[arg(long)]
    homes: Option<PathBuf>,

    /// JSON array of recommendations
    #[arg(long)]
    recommendations: Option<PathBuf>,

    /// Hide a layer (repeatable)
    #[arg(long = "hide", value_name = "LAYER")]
    hide: Vec<LayerKind>,

    /// Disable clustering of nearby markers
    #[arg(long = "no-clusters", action = ArgAction::SetTrue)]
    no_clusters: bool,

    /// Keep only markers whose title or city contains this text
    #[arg(short = 'q', long, default_value = "")]
    search: String,

    /// Cluster distance in degrees
    #[arg(long, default_value_t = DEFAULT_CLUSTER_THRESHOLD)]
    threshold: f64,

    /// Neighbour lookup strategy: exhaustive, grid or rtree
    #[arg(long, default_value = "grid")]
    strategy: ClusterStrategy,

    /// Type of output to generate
    #[arg(short = 't', long = "output-type", value_enum, default_value = "json")]
    output_type: OutputType,

    /// Output file, a directory for a date-stamped file, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

/// `-d` forces debug output; otherwise `RUST_LOG` decides, falling back to info.
fn log_filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

fn init_tracing(debug: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(debug))
        .with_writer(io::stderr)
        .init();
}

/// Load one source. A missing file means the source has not arrived yet.
fn load_source<R: DeserializeOwned>(
    path: Option<&Path>,
    layer: LayerKind,
) -> Result<Option<Vec<R>>> {
    let Some(path) = path else {
        return Ok(None);
    };
    if !path.exists() {
        warn!(
            %layer,
            path = %path.display(),
            "source file not found, treating layer as not loaded"
        );
        return Ok(None);
    }
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let records = parse_records(&json).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(records))
}

fn build_layers(args: &Args) -> LayerStore {
    let mut layers = LayerStore::default();
    for &layer in &args.hide {
        layers.set_visible(layer, false);
    }
    layers.set_clusters_enabled(!args.no_clusters);
    layers
}

/// Resolve where output goes; `None` is stdout.
fn resolve_output(outfile: &str, output_type: OutputType) -> Option<PathBuf> {
    if outfile == "-" {
        return None;
    }
    let path = PathBuf::from(outfile);
    if path.is_dir() {
        let today = chrono::Local::now().date_naive();
        let name = export_filename(EXPORT_PREFIX, today, output_type.extension());
        return Some(path.join(name));
    }
    Some(path)
}

fn write_output<W: Write>(
    mut writer: W,
    result: &Aggregate,
    output_type: OutputType,
) -> Result<()> {
    match output_type {
        OutputType::Json => serde_json::to_writer_pretty(&mut writer, result)?,
        OutputType::Stats => serde_json::to_writer_pretty(&mut writer, &result.stats)?,
        OutputType::Csv => {
            write_csv(&to_rows(&result.items), &mut writer)?;
            return Ok(());
        }
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    let params = ClusterParams::new(args.threshold, args.strategy)?;
    let sources = MapSources {
        groups: load_source(args.groups.as_deref(), LayerKind::Group)?,
        events: load_source(args.events.as_deref(), LayerKind::Event)?,
        homes: load_source(args.homes.as_deref(), LayerKind::Home)?,
        recommendations: load_source(args.recommendations.as_deref(), LayerKind::Recommendation)?,
    };
    let layers = build_layers(&args);

    let result = render(&MapState {
        sources: &sources,
        layers: &layers,
        search: &args.search,
        params: &params,
    });
    info!(
        total = result.stats.total,
        visible = result.stats.visible,
        clusters = result.stats.clusters,
        "map rendered"
    );

    match resolve_output(&args.outfile, args.output_type) {
        None => write_output(io::stdout().lock(), &result, args.output_type),
        Some(path) => {
            let file =
                File::create(&path).with_context(|| format!("creating {}", path.display()))?;
            write_output(BufWriter::new(file), &result, args.output_type)?;
            info!(path = %path.display(), "wrote output");
            Ok(())
        }
    }
}

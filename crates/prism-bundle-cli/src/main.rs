//! PRISM Bundle CLI entry point.
//!
//! Builds a total coloring of the path bundle `P_m × F` from a fiber graph
//! and a total coloring of that fiber.

mod config;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use config::BundleConfig;
use prism_bundle::dimacs::{parse_coloring_file, parse_dimacs_file};
use prism_bundle::{
    audit, check_fiber_coloring, total_coloring_path_bundle, AuditReport, BundleColoring,
    BundleEntry, BundleSummary, CyclicShift, Element, FiberColoring, FiberGraph,
};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "prism-bundle")]
#[command(version = VERSION)]
#[command(about = "PRISM: total coloring of path bundles P_m x F", long_about = None)]
struct Args {
    /// TOML configuration file
    ///
    /// Example: --config configs/bundle.toml
    #[arg(short, long)]
    config: Option<String>,

    /// Number of fibers along the base path (overrides config)
    #[arg(short = 'm', long)]
    fibers: Option<usize>,

    /// Fiber graph in DIMACS .col format (overrides config)
    ///
    /// Without a graph the built-in P_3 x P_2 demo runs.
    #[arg(short, long)]
    graph: Option<String>,

    /// Total coloring of the fiber: 'v U C' and 'e U V C' lines (overrides config)
    #[arg(long)]
    coloring: Option<String>,

    /// Write the bundle coloring as JSON to this path (overrides config)
    #[arg(short, long)]
    output: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Audit the constructed bundle for conflicts
    #[arg(long)]
    verify: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// JSON document written by `--output`.
#[derive(Serialize)]
struct OutputDocument<'a> {
    summary: &'a BundleSummary,
    coloring: &'a BundleColoring,
    #[serde(skip_serializing_if = "Option::is_none")]
    audit: Option<AuditReport>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logger
    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("PRISM Bundle {} - Starting", VERSION);

    let config = resolve_config(&args)?;
    config.validate()?;

    let (graph, phi) = load_fiber(&config)?;
    log::info!(
        "Fiber: {} vertices, {} edges, Δ(F) = {}, {} colored elements",
        graph.num_vertices(),
        graph.num_edges(),
        graph.max_degree(),
        phi.len()
    );

    let input_report = check_fiber_coloring(&graph, &phi);
    if !input_report.is_proper() {
        log::warn!(
            "Input coloring is not a proper total coloring of the fiber ({} conflicts, {} uncolored, {} extraneous); continuing",
            input_report.fiber,
            input_report.uncolored,
            input_report.extraneous
        );
    }

    let fiber_colors = phi.color_set();
    if !CyclicShift::new(&fiber_colors).is_derangement() {
        log::warn!(
            "Fiber color set {:?} has fewer than two colors; every derived fiber repeats Fiber_0",
            fiber_colors
        );
    }

    let m = config.bundle.fibers;
    let bundle = total_coloring_path_bundle(m, &graph, &phi)
        .map_err(|e| anyhow!(e.user_message()))
        .with_context(|| format!("Failed to color P_{} x F", m))?;

    let summary = bundle.summary();
    log::info!(
        "Colored P_{} x F: Δ(G) = {}, palette {{1..{}}}, fiber colors {:?}",
        summary.fibers,
        summary.bundle_max_degree,
        summary.palette_size,
        summary.fiber_colors
    );

    let report = if config.verify.enabled {
        let report = audit(&graph, &bundle);
        log::info!(
            "Audit: fiber={} join={} seam={} uncolored={} extraneous={}",
            report.fiber,
            report.join,
            report.seam,
            report.uncolored,
            report.extraneous
        );
        if !report.local_properness_holds() {
            log::warn!("Fiber or join conflicts, or elements outside the fiber graph, detected");
        }
        if report.seam > 0 {
            log::warn!("{} conflicts between fibers and joins", report.seam);
        }
        Some(report)
    } else {
        None
    };

    print_bundle(&bundle)?;

    if let Some(path) = &config.output.path {
        let document = OutputDocument {
            summary,
            coloring: &bundle,
            audit: report,
        };
        write_document(Path::new(path), &document, config.output.pretty)?;
        log::info!("Wrote bundle coloring to {}", path);
    }

    Ok(())
}

/// Loads the config file (if any) and applies command-line overrides.
fn resolve_config(args: &Args) -> Result<BundleConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            BundleConfig::from_file(path)?
        }
        None => BundleConfig::default(),
    };

    if let Some(fibers) = args.fibers {
        config.bundle.fibers = fibers;
    }
    if args.graph.is_some() {
        config.input.graph = args.graph.clone();
    }
    if args.coloring.is_some() {
        config.input.coloring = args.coloring.clone();
    }
    if args.output.is_some() {
        config.output.path = args.output.clone();
    }
    config.output.pretty |= args.pretty;
    config.verify.enabled |= args.verify;

    log::debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

fn load_fiber(config: &BundleConfig) -> Result<(FiberGraph, FiberColoring)> {
    match (&config.input.graph, &config.input.coloring) {
        (Some(graph_path), Some(coloring_path)) => {
            let graph = parse_dimacs_file(graph_path)
                .with_context(|| format!("Failed to load fiber graph '{}'", graph_path))?;
            let phi = parse_coloring_file(coloring_path, Some(&graph))
                .with_context(|| format!("Failed to load coloring '{}'", coloring_path))?;
            Ok((graph, phi))
        }
        (None, None) => {
            log::info!("No fiber graph given; running the P_2 demo fiber");
            Ok(demo_fiber())
        }
        _ => bail!("Fiber graph and coloring must be given together"),
    }
}

/// P_2 with the total coloring {0: 1, 1: 2, (0, 1): 3}.
fn demo_fiber() -> (FiberGraph, FiberColoring) {
    let phi = [
        (Element::Vertex(0), 1),
        (Element::Vertex(1), 2),
        (Element::edge(0, 1), 3),
    ]
    .into_iter()
    .collect();
    (FiberGraph::path(2), phi)
}

fn print_bundle(bundle: &BundleColoring) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let summary = bundle.summary();
    writeln!(
        out,
        "--- Total Coloring for Path Bundle P{} x F (n = {}) ---",
        summary.fibers, summary.fiber_vertices
    )?;
    writeln!(out)?;

    for (key, entry) in bundle.entries() {
        let items: Vec<String> = match entry {
            BundleEntry::Fiber(fiber) => fiber
                .iter()
                .map(|(element, color)| format!("{}: {}", element, color))
                .collect(),
            BundleEntry::Join(join) => join
                .iter()
                .map(|(edge, color)| format!("{}: {}", edge, color))
                .collect(),
        };
        writeln!(out, "{}:", key)?;
        writeln!(out, "  {{{}}}", items.join(", "))?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_document(path: &Path, document: &OutputDocument<'_>, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write output '{}'", path.display()))?;
    Ok(())
}

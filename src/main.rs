//! Builds the double-torus shell and writes it as a Gmsh `.geo` script.
//!
//! ```text
//! toroshell                                   # defaults, writes torus.geo
//! toroshell --segments 12 --output ring.geo
//! RUST_LOG=toroshell=debug toroshell          # or --verbose
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use toroshell::export::write_geo;
use toroshell::{BuildDoubleTorus, GeoModel, Session, TorusParams};

#[derive(Debug, Parser)]
#[command(name = "toroshell", version, about = "Build a double-torus shell BRep model")]
struct Cli {
    /// Angular segments per torus (at least 3)
    #[arg(long, default_value_t = TorusParams::default().segments)]
    segments: u32,

    /// Radius of the shared sweep circle
    #[arg(long, default_value_t = TorusParams::default().major_radius)]
    major_radius: f64,

    /// Tube radius of the outer torus
    #[arg(long, default_value_t = TorusParams::default().outer_minor_radius)]
    outer_radius: f64,

    /// Tube radius of the inner torus
    #[arg(long, default_value_t = TorusParams::default().inner_minor_radius)]
    inner_radius: f64,

    /// Target mesh size attached to every point
    #[arg(long, default_value_t = TorusParams::default().mesh_size)]
    mesh_size: f64,

    /// Model name
    #[arg(long, default_value = "torus")]
    name: String,

    /// Output `.geo` script
    #[arg(short, long, default_value = "torus.geo")]
    output: PathBuf,

    /// Log every construction step
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn params(&self) -> TorusParams {
        TorusParams {
            segments: self.segments,
            major_radius: self.major_radius,
            outer_minor_radius: self.outer_radius,
            inner_minor_radius: self.inner_radius,
            mesh_size: self.mesh_size,
        }
    }
}

/// WARN for everything, INFO for toroshell.
const DEFAULT_LOG_FILTER: &str = "warn,toroshell=info";

/// Builds the log filter from `RUST_LOG`, falling back to
/// [`DEFAULT_LOG_FILTER`]. `--verbose` raises toroshell to DEBUG on top.
fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    let base = rust_log
        .filter(|directives| !directives.trim().is_empty())
        .unwrap_or(DEFAULT_LOG_FILTER);
    if verbose {
        EnvFilter::new(format!("{base},toroshell=debug"))
    } else {
        EnvFilter::new(base)
    }
}

fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = log_filter(rust_log.as_deref(), verbose);
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let params = cli.params();
    params.validate().context("invalid parameters")?;

    let mut session = Session::open(cli.name.as_str(), GeoModel::new());
    let summary = BuildDoubleTorus::new(params)
        .execute(&mut session)
        .context("building the double torus")?;
    session.synchronize().context("synchronizing the model")?;

    let file = File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    write_geo(session.backend(), session.name(), BufWriter::new(file))
        .with_context(|| format!("writing {}", cli.output.display()))?;
    info!(
        output = %cli.output.display(),
        surfaces = summary.counts.surfaces,
        "model written"
    );
    Ok(())
}

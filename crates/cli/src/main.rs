//! Orchestration runner: read measurement tables, run the statistics, write
//! numeric artifacts (plus provenance sidecars). Rendering stays elsewhere.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

use stereostat::dataset::{Dataset, OrientationKind};
use stereostat::density::{estimate, Bandwidth, CountingMethod};
use stereostat::ingest::{collect_line_rows, collect_plane_rows, PlaneConvention};
use stereostat::options::StereonetOptions;
use stereostat::sample::{draw_lines, FisherCfg, ReplayToken};

mod provenance;
mod table;

#[derive(Parser)]
#[command(name = "stereostat")]
#[command(about = "Directional statistics runner for stereonet datasets")]
struct Cmd {
    /// Optional options document (JSON; unknown keys are rejected)
    #[arg(long)]
    options: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Eigen summary: mean orientation, best-fit plane, girdle axis
    Eigen {
        #[arg(long)]
        input: String,
        #[arg(long, value_enum)]
        kind: KindArg,
        /// Write JSON here instead of stdout
        #[arg(long)]
        out: Option<String>,
    },
    /// Density field over the equal-area grid, for contouring
    Contour {
        #[arg(long)]
        input: String,
        #[arg(long, value_enum)]
        kind: KindArg,
        #[arg(long, value_enum)]
        method: Option<MethodArg>,
        /// Fixed concentration; omit for auto-k
        #[arg(long)]
        k: Option<f64>,
        #[arg(long)]
        rings: Option<usize>,
        #[arg(long)]
        out: String,
    },
    /// Write a synthetic Fisher-distributed dataset as CSV
    Sample {
        #[arg(long, default_value_t = 100)]
        n: usize,
        #[arg(long, default_value_t = 0.0)]
        trend: f64,
        #[arg(long, default_value_t = 90.0)]
        plunge: f64,
        #[arg(long, default_value_t = 50.0)]
        kappa: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Line,
    Plane,
}

impl From<KindArg> for OrientationKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Line => OrientationKind::Line,
            KindArg::Plane => OrientationKind::Plane,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MethodArg {
    Fisher,
    Kamb,
}

impl From<MethodArg> for CountingMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Fisher => CountingMethod::Fisher,
            MethodArg::Kamb => CountingMethod::Kamb,
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let opts = load_options(cmd.options.as_deref())?;
    match cmd.action {
        Action::Eigen { input, kind, out } => {
            run_eigen(&opts, &input, kind.into(), out.as_deref())
        }
        Action::Contour {
            input,
            kind,
            method,
            k,
            rings,
            out,
        } => run_contour(&opts, &input, kind.into(), method, k, rings, &out),
        Action::Sample {
            n,
            trend,
            plunge,
            kappa,
            seed,
            out,
        } => run_sample(n, trend, plunge, kappa, seed, &out),
    }
}

fn load_options(path: Option<&str>) -> Result<StereonetOptions> {
    let opts: StereonetOptions = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p).with_context(|| format!("reading {p}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {p}"))?
        }
        None => StereonetOptions::default(),
    };
    opts.validate().map_err(|err| anyhow!(err))?;
    Ok(opts)
}

fn kind_name(kind: OrientationKind) -> &'static str {
    match kind {
        OrientationKind::Line => "line",
        OrientationKind::Plane => "plane",
    }
}

fn method_name(method: CountingMethod) -> &'static str {
    match method {
        CountingMethod::Fisher => "fisher",
        CountingMethod::Kamb => "kamb",
    }
}

/// Read the bound columns for `kind` and assemble a dataset, skipping rows
/// with missing required fields.
fn read_dataset(
    opts: &StereonetOptions,
    input: &str,
    kind: OrientationKind,
) -> Result<Dataset> {
    let attribute = opts.attribute_field.as_deref();
    let (first, second) = match (kind, opts.plane_convention) {
        (OrientationKind::Line, _) => (opts.trend_field.as_str(), opts.plunge_field.as_str()),
        (OrientationKind::Plane, PlaneConvention::StrikeDip) => {
            (opts.strike_field.as_str(), opts.dip_field.as_str())
        }
        (OrientationKind::Plane, PlaneConvention::DipDirection) => {
            (opts.dip_direction_field.as_str(), opts.dip_field.as_str())
        }
    };
    let rows = table::read_rows(input, first, second, attribute)?;
    let collected = match kind {
        OrientationKind::Line => collect_line_rows(&rows)?,
        OrientationKind::Plane => collect_plane_rows(&rows, opts.plane_convention)?,
    };
    tracing::info!(
        total = rows.len(),
        kept = collected.pairs.len(),
        skipped = collected.skipped,
        "ingested"
    );
    let label = Path::new(input)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    let dataset = match (&collected.attributes, attribute) {
        (Some(attrs), Some(name)) => {
            Dataset::load_with_attribute(kind, &collected.pairs, label, attrs, name)?
        }
        _ => Dataset::load(kind, &collected.pairs, label)?,
    };
    Ok(dataset)
}

fn run_eigen(
    opts: &StereonetOptions,
    input: &str,
    kind: OrientationKind,
    out: Option<&str>,
) -> Result<()> {
    tracing::info!(input, kind = kind_name(kind), "eigen");
    let dataset = read_dataset(opts, input, kind)?;
    let analysis = dataset.eigen()?;
    if analysis.low_concentration() {
        tracing::warn!("near-uniform eigenvalue spectrum; reported axes are arbitrary");
    }
    let (trend, plunge) = analysis.principal_line()?;
    let (axis_trend, axis_plunge) = analysis.girdle_axis()?;
    let mut doc = json!({
        "label": dataset.label(),
        "kind": kind_name(kind),
        "count": dataset.len(),
        "eigenvalues": analysis.eigenvalues().to_vec(),
        "principal": { "trend": trend, "plunge": plunge },
        "girdle_axis": { "trend": axis_trend, "plunge": axis_plunge },
        "low_concentration": analysis.low_concentration(),
    });
    if kind == OrientationKind::Plane && opts.plot_mean_plane {
        let (strike, dip) = analysis.mean_plane()?;
        doc["mean_plane"] = json!({ "strike": strike, "dip": dip });
    }
    let text = serde_json::to_string_pretty(&doc)?;
    match out {
        Some(out) => write_artifact(
            out,
            &text,
            json!({ "command": "eigen", "input": input, "kind": kind_name(kind) }),
        ),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

fn run_contour(
    opts: &StereonetOptions,
    input: &str,
    kind: OrientationKind,
    method: Option<MethodArg>,
    k: Option<f64>,
    rings: Option<usize>,
    out: &str,
) -> Result<()> {
    tracing::info!(input, kind = kind_name(kind), "contour");
    let dataset = read_dataset(opts, input, kind)?;
    let mut cfg = opts.density_cfg();
    if let Some(method) = method {
        cfg.method = method.into();
    }
    if let Some(k) = k {
        cfg.bandwidth = Bandwidth::Fixed(k);
    }
    if let Some(rings) = rings {
        cfg.grid_rings = rings;
    }
    let field = estimate(&dataset, &cfg)?;
    let nodes: Vec<serde_json::Value> = field
        .node_lines()?
        .into_iter()
        .map(|(trend, plunge)| json!([trend, plunge]))
        .collect();
    let doc = json!({
        "label": dataset.label(),
        "count": dataset.len(),
        "method": method_name(field.method()),
        "k": field.k(),
        "nodes": nodes,
        "values": field.values(),
    });
    write_artifact(
        out,
        &serde_json::to_string_pretty(&doc)?,
        json!({
            "command": "contour",
            "input": input,
            "kind": kind_name(kind),
            "method": method_name(field.method()),
            "k": field.k(),
            "rings": cfg.grid_rings,
        }),
    )
}

fn run_sample(n: usize, trend: f64, plunge: f64, kappa: f64, seed: u64, out: &str) -> Result<()> {
    tracing::info!(n, trend, plunge, kappa, seed, "sample");
    let cfg = FisherCfg {
        mean_trend: trend,
        mean_plunge: plunge,
        kappa,
    };
    let pairs = draw_lines(&cfg, ReplayToken { seed, index: 0 }, n)?;
    let mut text = String::from("Trend,Plunge\n");
    for (t, p) in &pairs {
        text.push_str(&format!("{t:.6},{p:.6}\n"));
    }
    write_artifact(
        out,
        &text,
        json!({
            "command": "sample",
            "n": n,
            "trend": trend,
            "plunge": plunge,
            "kappa": kappa,
            "seed": seed,
        }),
    )
}

fn write_artifact(out: &str, text: &str, params: serde_json::Value) -> Result<()> {
    let out_path = Path::new(out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out_path, text)?;
    provenance::write_sidecar(out_path, provenance::Payload::new(params))?;
    tracing::info!(out, "artifact written");
    Ok(())
}

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use polyslice::api::{
    fingerprint, slice, wire_decode, wire_encode, GeomCfg, Kernel, Selection, SliceOpts,
    TriangleBuffer, WirePolygon, ZPlan,
};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "polyslice")]
#[command(about = "Slice triangle meshes into nested polygons")]
struct Cmd {
    /// JSON file with tolerance overrides; missing fields keep their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    Over,
    Under,
    Both,
}

impl From<Side> for Selection {
    fn from(side: Side) -> Self {
        match side {
            Side::Over => Selection::Over,
            Side::Under => Selection::Under,
            Side::Both => Selection::Both,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Slice a flat JSON triangle buffer and write wire polygons per layer
    Slice {
        /// JSON array of numbers, nine per triangle
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Layer height from the bottom of the mesh
        #[arg(long, conflicts_with_all = ["z", "unique"])]
        step: Option<f64>,
        /// Explicit heights; repeat for several
        #[arg(long, conflicts_with = "unique")]
        z: Vec<f64>,
        /// Slice at every distinct vertex height at least this far apart
        #[arg(long)]
        unique: Option<f64>,
        #[arg(long, value_enum, default_value_t = Side::Over)]
        select: Side,
        #[arg(long)]
        union: bool,
        #[arg(long)]
        xor: bool,
    },
    /// Print fingerprints of a wire polygon file
    Fingerprint {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print version, code revision and effective tolerances
    Report,
}

#[derive(Serialize)]
struct Layer {
    z: f64,
    tops: Vec<WirePolygon>,
    open: Vec<WirePolygon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    changes: Option<i64>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let cfg = load_config(cmd.config.as_deref())?;
    match cmd.action {
        Action::Slice {
            input,
            out,
            step,
            z,
            unique,
            select,
            union,
            xor,
        } => {
            let plan = plan(step, z, unique)?;
            let opts = SliceOpts {
                select: select.into(),
                union,
                xor,
                dirty: false,
            };
            run_slice(&input, &out, &plan, &opts, cfg)
        }
        Action::Fingerprint { input } => print_fingerprint(&input),
        Action::Report => report(cfg),
    }
}

fn load_config(path: Option<&Path>) -> Result<GeomCfg> {
    let cfg = match path {
        Some(p) => {
            let raw = std::fs::read(p).with_context(|| format!("reading config {}", p.display()))?;
            serde_json::from_slice(&raw).with_context(|| format!("parsing config {}", p.display()))?
        }
        None => GeomCfg::default(),
    };
    cfg.validate()?;
    Ok(cfg)
}

fn plan(step: Option<f64>, z: Vec<f64>, unique: Option<f64>) -> Result<ZPlan> {
    Ok(match (step, unique) {
        (Some(step), _) => ZPlan::Step { step },
        (None, Some(min_step)) => ZPlan::Unique { min_step },
        (None, None) if !z.is_empty() => ZPlan::Explicit(z),
        (None, None) => bail!("one of --step, --z or --unique is required"),
    })
}

fn read_buffer(input: &Path) -> Result<TriangleBuffer> {
    let raw = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let coords: Vec<f64> =
        serde_json::from_slice(&raw).with_context(|| format!("parsing {}", input.display()))?;
    Ok(TriangleBuffer::new(coords)?)
}

fn run_slice(input: &Path, out: &Path, plan: &ZPlan, opts: &SliceOpts, cfg: GeomCfg) -> Result<()> {
    let buf = read_buffer(input)?;
    tracing::info!(input = %input.display(), triangles = buf.len(), "slice");
    let k = Kernel::new(cfg);
    let set = slice(&buf, plan, opts, &k)?;
    let layers: Vec<Layer> = set
        .slices
        .iter()
        .map(|s| Layer {
            z: s.z,
            tops: wire_encode(&s.tops),
            open: wire_encode(&s.open),
            changes: s.changes,
        })
        .collect();
    let open: usize = layers.iter().map(|l| l.open.len()).sum();
    tracing::info!(layers = layers.len(), open, "sliced");

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out, serde_json::to_vec(&layers)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let payload = provenance::Payload::new(json!({
        "input": input.to_string_lossy(),
        "plan": plan,
        "opts": opts,
        "cfg": cfg,
        "z_min": set.z_min,
        "z_max": set.z_max,
    }));
    provenance::write_sidecar(out, payload)?;
    Ok(())
}

fn print_fingerprint(input: &Path) -> Result<()> {
    let raw = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let wire: Vec<WirePolygon> =
        serde_json::from_slice(&raw).with_context(|| format!("parsing {}", input.display()))?;
    let polys = wire_decode(&wire)?;
    println!("{}", serde_json::to_string_pretty(&fingerprint(&polys))?);
    Ok(())
}

fn report(cfg: GeomCfg) -> Result<()> {
    let obj = json!({
        "version": polyslice::VERSION,
        "code_rev": provenance::current_git_rev(),
        "cfg": cfg,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "eyeframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a design in a material and publish the PNG preview.
    Render(RenderArgs),
    /// Fit a point curve with cubic Bezier segments and print them as JSON.
    Fit(FitArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Design record JSON.
    #[arg(long)]
    design: PathBuf,

    /// Material record JSON.
    #[arg(long)]
    material: PathBuf,

    /// Render config JSON. Defaults apply to missing fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory. Defaults to `$EYEFRAME_STATIC_FILES` or `./static-files/`.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// URL prefix of published previews.
    #[arg(long)]
    base_url: Option<String>,

    /// Output density; overrides the config file and `$EYEFRAME_PIXELS_PER_MM`.
    #[arg(long)]
    pixels_per_mm: Option<f64>,

    /// Directory texture locators are resolved against. Defaults to the material file's directory.
    #[arg(long)]
    texture_root: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FitArgs {
    /// JSON array of `[x, y]` points.
    #[arg(long)]
    curve: PathBuf,

    /// Connect the last point back to the first.
    #[arg(long)]
    closed: bool,

    /// Leave and enter the end points horizontally (open curves only).
    #[arg(long)]
    force_horizontal: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Fit(args) => cmd_fit(args),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {what} JSON '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let design: eyeframe::DesignRecord = read_json(&args.design, "design")?;
    let material: eyeframe::MaterialRecord = read_json(&args.material, "material")?;

    let mut config = match &args.config {
        Some(path) => eyeframe::RenderConfig::from_json_path(path)?,
        None => eyeframe::RenderConfig::default(),
    }
    .with_env_overrides();
    if let Some(ppm) = args.pixels_per_mm {
        config.pixels_per_mm = ppm;
    }

    let mut store_cfg = eyeframe::StoreConfig::from_env();
    if let Some(dir) = args.out_dir {
        store_cfg.static_dir = dir;
    }
    if let Some(url) = args.base_url {
        store_cfg.base_url = url;
    }
    let store = eyeframe::RenderStore::from_config(&store_cfg);

    let texture_root = args.texture_root.unwrap_or_else(|| {
        args.material
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    });
    let loader = eyeframe::FsTextureLoader::new(texture_root);

    let meta = eyeframe::render_and_publish(
        &design,
        &material,
        &config,
        &loader,
        &store,
        &eyeframe::CancelToken::new(),
    )?;

    println!("{}", serde_json::to_string_pretty(&meta)?);
    Ok(())
}

#[derive(serde::Serialize)]
struct SegmentJson {
    p0: [f64; 2],
    p1: [f64; 2],
    p2: [f64; 2],
    p3: [f64; 2],
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let points: Vec<[f64; 2]> = read_json(&args.curve, "curve")?;
    let curve: eyeframe::Curve = points
        .into_iter()
        .map(|[x, y]| eyeframe::Point::new(x, y))
        .collect();

    let opts = eyeframe::FitOptions {
        closed: args.closed,
        force_horizontal_ends: args.force_horizontal,
    };
    let segs = eyeframe::fit_beziers(&curve, opts)?;

    let pt = |p: eyeframe::Point| [p.x, p.y];
    let out: Vec<SegmentJson> = segs
        .into_iter()
        .map(|s| SegmentJson {
            p0: pt(s.p0),
            p1: pt(s.p1),
            p2: pt(s.p2),
            p3: pt(s.p3),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

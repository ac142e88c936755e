use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use hydrofield::{
    AnimationConfig, GridSize, GridSpec, IdwParams, LegendSpec, PipelineOpts, PngDirSink,
    RenderConfig, RenderSession, StationSample, write_png,
};

#[derive(Parser, Debug)]
#[command(name = "hydrofield", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one heatmap PNG per timestamp, plus the shared legend.
    Render(RenderArgs),
    /// Render an experimental animation as a PNG frame sequence.
    Animate(AnimateArgs),
}

#[derive(Parser, Debug)]
struct CommonArgs {
    /// Input samples JSON (array of {latitude, longitude, parameter, timestamp, value}).
    #[arg(long)]
    samples: PathBuf,

    /// Optional boundary GeoJSON; omit to clip to the station extent.
    #[arg(long)]
    boundary: Option<PathBuf>,

    /// Parameter to render.
    #[arg(long)]
    parameter: String,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Gaussian smoothing sigma in grid cells (0 disables).
    #[arg(long, default_value_t = 4.5)]
    bandwidth: f64,

    /// Raster opacity in [0, 1].
    #[arg(long, default_value_t = 1.0)]
    opacity: f64,

    /// IDW distance exponent.
    #[arg(long, default_value_t = 2.0)]
    power: f64,

    /// Grid rows.
    #[arg(long, default_value_t = 400)]
    rows: u32,

    /// Grid columns.
    #[arg(long, default_value_t = 400)]
    cols: u32,

    /// Colormap name (turbo or viridis).
    #[arg(long, default_value = "turbo")]
    colormap: String,

    /// Compute timestamp fields in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Start timestamp label.
    #[arg(long)]
    start: String,

    /// End timestamp label.
    #[arg(long)]
    end: String,

    /// Number of synthetic frames between the endpoints.
    #[arg(long, default_value_t = 8)]
    steps: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Animate(args) => cmd_animate(args),
    }
}

fn load_session(common: &CommonArgs) -> anyhow::Result<RenderSession> {
    let raw = std::fs::read_to_string(&common.samples)
        .with_context(|| format!("read samples '{}'", common.samples.display()))?;
    let samples: Vec<StationSample> =
        serde_json::from_str(&raw).context("parse samples JSON")?;

    let mut session = RenderSession::new();
    if let Some(path) = &common.boundary {
        let geojson = std::fs::read_to_string(path)
            .with_context(|| format!("read boundary '{}'", path.display()))?;
        session.set_boundary_geojson(&geojson)?;
    }

    let report = session.load_samples(samples);
    eprintln!(
        "loaded {} samples ({} replaced, {} skipped)",
        report.accepted,
        report.replaced,
        report.skipped.len()
    );
    for skip in &report.skipped {
        eprintln!("  skipped row {}: {}", skip.index, skip.error);
    }
    Ok(session)
}

fn render_config(common: &CommonArgs) -> anyhow::Result<RenderConfig> {
    Ok(RenderConfig {
        bandwidth: common.bandwidth,
        opacity: common.opacity,
        idw: IdwParams {
            power: common.power,
        },
        grid: GridSpec {
            size: GridSize::new(common.rows, common.cols)?,
            margin: 0.02,
        },
        colormap: hydrofield::render::colormap::by_name(&common.colormap)?,
        legend: LegendSpec::default(),
    })
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let common = &args.common;
    let mut session = load_session(common)?;
    let config = render_config(common)?;
    let opts = PipelineOpts {
        parallel: common.parallel,
        threads: common.threads,
    };

    session.compute_fields(&common.parameter, &config, &opts)?;
    let result = session.render_frames(&common.parameter)?;

    std::fs::create_dir_all(&common.out)
        .with_context(|| format!("create output dir '{}'", common.out.display()))?;

    let mut image_paths = serde_json::Map::new();
    for (ts, frame) in &result.frames {
        let path = common.out.join(format!("{}.png", sanitize(ts)));
        write_png(&frame.raster, &path)?;
        image_paths.insert(ts.clone(), path.display().to_string().into());
    }

    let legend_path = common.out.join("legend.png");
    if let Some(frame) = result.frames.values().next() {
        write_png(&frame.legend.image, &legend_path)?;
    }

    let summary = serde_json::json!({
        "parameter": result.parameter,
        "global_min": result.range.min,
        "global_max": result.range.max,
        "degenerate": result.degenerate,
        "images": image_paths,
        "legend": legend_path.display().to_string(),
        "issues": result.issues,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let common = &args.common;
    let mut session = load_session(common)?;
    let config = render_config(common)?;
    let opts = PipelineOpts {
        parallel: common.parallel,
        threads: common.threads,
    };

    session.compute_fields(&common.parameter, &config, &opts)?;
    session.request_animation(
        &common.parameter,
        &AnimationConfig {
            start: args.start.clone(),
            end: args.end.clone(),
            intermediate: args.steps,
        },
    )?;
    let sequence = session.await_animation()?;

    eprintln!(
        "experimental output: {} frames are temporally interpolated, not measured",
        sequence.len().saturating_sub(2)
    );
    for skip in &sequence.skipped {
        eprintln!("  skipped step {}: {}", skip.step, skip.error);
    }

    let mut sink = PngDirSink::new(&common.out, sanitize(&common.parameter));
    sequence.stream_into(&mut sink)?;
    eprintln!("wrote {} frames to {}", sequence.len(), common.out.display());
    Ok(())
}

fn sanitize(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

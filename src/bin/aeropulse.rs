use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use aeropulse::{
    EngineOpts, FlagLoader, FrameResult, ImageOffer, PhaseKind, Show, SwarmEngine, twinkle_scale,
};

#[derive(Parser, Debug)]
#[command(name = "aeropulse", version)]
struct Cli {
    /// Log engine diagnostics (phase transitions, subject changes) to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate up to a point in time and render a front-view PNG of the swarm.
    Frame(FrameArgs),
    /// Simulate up to a point in time and write the frame as JSON.
    Dump(DumpArgs),
    /// Print the validated phase list of a show.
    Timeline(ShowArgs),
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Show JSON path, or a preset name (`flag-wave`, `monkey-king`).
    #[arg(long)]
    show: String,

    /// Drone count for presets (ignored for JSON shows).
    #[arg(long, default_value_t = aeropulse::DEFAULT_DRONES)]
    drones: usize,
}

#[derive(Args, Debug)]
struct SimArgs {
    #[command(flatten)]
    show: ShowArgs,

    /// Subject image (PNG, JPEG, ...) sampled for per-drone colors.
    #[arg(long)]
    flag: Option<PathBuf>,

    /// Simulated time in seconds.
    #[arg(long, default_value_t = 6.0)]
    time: f64,

    /// Simulation steps per second.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Update drones on a rayon pool.
    #[arg(long)]
    parallel: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    sim: SimArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Output width in pixels.
    #[arg(long, default_value_t = 960)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 540)]
    height: u32,
}

#[derive(Args, Debug)]
struct DumpArgs {
    #[command(flatten)]
    sim: SimArgs,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Dump(args) => cmd_dump(args),
        Command::Timeline(args) => cmd_timeline(args),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "aeropulse=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_show(args: &ShowArgs) -> anyhow::Result<Show> {
    let show = match Show::preset(&args.show, args.drones) {
        Some(show) => show,
        None => Show::from_path(&args.show)
            .with_context(|| format!("load show '{}' (not a preset name either)", args.show))?,
    };
    show.validate()?;
    Ok(show)
}

fn build_engine(sim: &SimArgs) -> anyhow::Result<SwarmEngine> {
    if !sim.fps.is_finite() || sim.fps <= 0.0 {
        anyhow::bail!("--fps must be > 0");
    }
    if !sim.time.is_finite() || sim.time < 0.0 {
        anyhow::bail!("--time must be >= 0");
    }

    let show = load_show(&sim.show)?;
    let opts = EngineOpts {
        max_delta: EngineOpts::default().max_delta.max(1.0 / sim.fps),
        parallel: sim.parallel,
        ..EngineOpts::default()
    };
    let mut engine = SwarmEngine::new(&show, opts)?;

    if let Some(path) = &sim.flag {
        let loader = FlagLoader::new();
        loader.load_path(engine.subject(), path);
        match loader.recv_into(&mut engine, Duration::from_secs(30)) {
            Some(ImageOffer::Applied) => {}
            other => anyhow::bail!("flag image '{}' was not applied ({other:?})", path.display()),
        }
    }
    Ok(engine)
}

fn simulate<'a>(engine: &'a mut SwarmEngine, sim: &SimArgs) -> FrameResult<'a> {
    let steps = (sim.time * sim.fps).round() as u64;
    let dt = 1.0 / sim.fps;
    for _ in 1..steps {
        engine.update(dt);
    }
    engine.update(if steps == 0 { 0.0 } else { dt })
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if args.width == 0 || args.height == 0 {
        anyhow::bail!("--width and --height must be >= 1");
    }
    let mut engine = build_engine(&args.sim)?;
    let frame = simulate(&mut engine, &args.sim);
    let rgba = rasterize(&frame, args.width, args.height);

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &rgba,
        args.width,
        args.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} (phase '{}', progress {:.3})",
        args.out.display(),
        frame.phase,
        frame.progress
    );
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let mut engine = build_engine(&args.sim)?;
    let snapshot = simulate(&mut engine, &args.sim).snapshot();

    match &args.out {
        Some(path) => {
            let f = create_file(path)?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, &snapshot)
                .with_context(|| format!("write frame JSON '{}'", path.display()))?;
            w.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer_pretty(&mut w, &snapshot).context("write frame JSON")?;
            writeln!(w)?;
        }
    }
    Ok(())
}

fn cmd_timeline(args: ShowArgs) -> anyhow::Result<()> {
    let show = load_show(&args)?;
    println!("drones: {}", show.drone_count);
    let mut start = 0.0;
    for (i, phase) in show.phases.iter().enumerate() {
        let what = match &phase.kind {
            PhaseKind::Hold { formation } => format!("hold {formation}"),
            PhaseKind::Morph { from, to, ease } => format!("morph {from} -> {to} ({ease:?})"),
            PhaseKind::Wave { formation } => format!("wave {formation}"),
        };
        let secs = phase.duration.seconds();
        let len = if secs.is_finite() {
            format!("{secs:.2}s")
        } else {
            "indefinite".to_owned()
        };
        println!("[{i}] {start:>7.2}s  {:<12} {what}, {len}", phase.name);
        start += secs;
    }
    println!("end: {:?}", show.end);
    Ok(())
}

fn create_file(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    File::create(path).with_context(|| format!("create '{}'", path.display()))
}

/// Orthographic front view (x right, y up) fitted to the canvas.
fn rasterize(frame: &FrameResult<'_>, width: u32, height: u32) -> Vec<u8> {
    const BACKGROUND: [u8; 4] = [6, 8, 18, 255];

    let mut buf = BACKGROUND.repeat(width as usize * height as usize);
    let Some((min, max)) = bounds_xy(frame) else {
        return buf;
    };

    let (w, h) = (f64::from(width), f64::from(height));
    let span_x = (max[0] - min[0]).max(1e-6);
    let span_y = (max[1] - min[1]).max(1e-6);
    let scale = (w * 0.9 / span_x).min(h * 0.9 / span_y);
    let cx = (min[0] + max[0]) * 0.5;
    let cy = (min[1] + max[1]) * 0.5;
    let base_radius = (w.min(h) / 400.0).max(1.0);

    for (i, p) in frame.positions.iter().enumerate() {
        let px = w * 0.5 + (p.x - cx) * scale;
        let py = h * 0.5 - (p.y - cy) * scale;
        let r = base_radius * twinkle_scale(i, frame.elapsed);
        let rgba = frame.color_of(i).to_rgba8();
        splat(&mut buf, width, height, px, py, r, rgba);
    }
    buf
}

fn bounds_xy(frame: &FrameResult<'_>) -> Option<([f64; 2], [f64; 2])> {
    let mut it = frame.positions.iter().filter(|p| p.is_finite());
    let first = it.next()?;
    let mut min = [first.x, first.y];
    let mut max = min;
    for p in it {
        min = [min[0].min(p.x), min[1].min(p.y)];
        max = [max[0].max(p.x), max[1].max(p.y)];
    }
    Some((min, max))
}

fn splat(buf: &mut [u8], width: u32, height: u32, px: f64, py: f64, r: f64, rgba: [u8; 4]) {
    let x0 = (px - r).floor().max(0.0) as i64;
    let y0 = (py - r).floor().max(0.0) as i64;
    let x1 = ((px + r).ceil() as i64).min(i64::from(width) - 1);
    let y1 = ((py + r).ceil() as i64).min(i64::from(height) - 1);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f64 + 0.5 - px;
            let dy = y as f64 + 0.5 - py;
            if dx * dx + dy * dy <= r * r {
                let i = (y as usize * width as usize + x as usize) * 4;
                buf[i..i + 4].copy_from_slice(&rgba);
            }
        }
    }
}

use std::{
    fmt::Write as _,
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use telestrator::{
    AnalysisSnapshot, Clock, DrawSurface, EngineConfig, JsonFileStore, ManualClock, MediaController,
    PathGeometry, PlaybackEngine, RenderDescriptor, RoundGeometry, SimulatedPlayer, Size,
    SystemClock, TelestratorError, TelestratorResult, TextGeometry,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "telestrator", version)]
struct Cli {
    /// Log engine transitions (pause scenes, rescale resets) to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play an analysis against a simulated player and print every frame.
    Simulate(SimulateArgs),
    /// List pause scenes.
    Scenes(ScenesArgs),
    /// Delete an annotation and save the analysis.
    Delete(DeleteArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input analysis JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Media time to start at, in seconds.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Media time to stop at, in seconds.
    #[arg(long)]
    to: f64,

    /// Frames per second of the simulated host.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Container size, e.g. `1280x720`.
    #[arg(long, value_parser = parse_size)]
    container: Option<Size>,

    /// Natural video size, e.g. `1920x1080`.
    #[arg(long, value_parser = parse_size)]
    video: Option<Size>,

    /// Engine config JSON (partial configs keep defaults).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct ScenesArgs {
    /// Input analysis JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct DeleteArgs {
    /// Input analysis JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Annotation id to delete.
    #[arg(long)]
    id: String,

    /// Where to save; defaults to overwriting the input.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// One JSON object per frame.
    Json,
    /// One human-readable line per drawn annotation.
    Text,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Scenes(args) => cmd_scenes(args),
        Command::Delete(args) => cmd_delete(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "telestrator=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("width: {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("height: {e}"))?;
    Ok(Size::new(w, h))
}

fn load_snapshot(path: &Path) -> anyhow::Result<AnalysisSnapshot> {
    let doc = JsonFileStore::new(path)
        .load()
        .with_context(|| format!("load analysis '{}'", path.display()))?;
    AnalysisSnapshot::new(doc)
        .with_context(|| format!("normalize analysis '{}'", path.display()))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    EngineConfig::from_json(&text).with_context(|| format!("parse config '{}'", path.display()))
}

#[derive(serde::Serialize)]
struct FrameLine<'a> {
    time: f64,
    paused: bool,
    countdown: Option<u32>,
    descriptors: &'a [RenderDescriptor],
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be > 0");
    }
    if !(args.to.is_finite() && args.from.is_finite() && args.to >= args.from) {
        anyhow::bail!("--to must be >= --from");
    }

    let snapshot = load_snapshot(&args.in_path)?;
    let config = load_config(args.config.as_deref())?;
    let clock = ManualClock::new();
    let mut engine = PlaybackEngine::create(
        snapshot,
        config,
        SimulatedPlayer::with_duration(args.to),
        clock.clone(),
    )?;

    if let Some(container) = args.container {
        engine.on_resize(container);
    }
    if let Some(video) = args.video {
        engine.on_metadata(video);
    }
    engine.set_duration(args.to);
    engine.seek(args.from);
    engine.media_mut().play();
    engine.on_play();

    let dt = 1.0 / args.fps;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut surface = TextSurface::default();
    let mut seen = 0;
    let mut descriptors = engine.tick(engine.media().time());

    loop {
        log_new_directives(&engine, &mut seen);
        let time = engine.current_time();
        match args.format {
            OutputFormat::Json => {
                let line = FrameLine {
                    time,
                    paused: engine.active_pause_scene().is_some(),
                    countdown: engine.countdown_remaining(),
                    descriptors: &descriptors,
                };
                serde_json::to_writer(&mut out, &line).context("encode frame")?;
                writeln!(out).context("write frame")?;
            }
            OutputFormat::Text => {
                surface.begin(time, engine.countdown_remaining());
                telestrator::paint(&mut surface, &descriptors)?;
                out.write_all(surface.buf.as_bytes())
                    .context("write frame")?;
            }
        }

        if engine.active_pause_scene().is_none() && !engine.media().is_playing() {
            break;
        }

        clock.advance_secs(dt);
        engine.poll_countdown();
        let t = engine.media_mut().advance(dt);
        descriptors = engine.tick(t);
        if !engine.media().is_playing() && engine.active_pause_scene().is_none() {
            engine.on_pause();
        }
    }

    engine.dispose();
    Ok(())
}

fn log_new_directives<C: Clock>(engine: &PlaybackEngine<SimulatedPlayer, C>, seen: &mut usize) {
    let history = engine.media().history();
    for directive in &history[*seen..] {
        tracing::info!(?directive, time = engine.current_time(), "playback directive");
    }
    *seen = history.len();
}

/// Plain-text [`DrawSurface`] used by `simulate --format text`.
#[derive(Default)]
struct TextSurface {
    buf: String,
}

impl TextSurface {
    fn begin(&mut self, time: f64, countdown: Option<u32>) {
        self.buf.clear();
        match countdown {
            Some(c) => {
                let _ = writeln!(self.buf, "t={time:.3} paused ({c}s)");
            }
            None => {
                let _ = writeln!(self.buf, "t={time:.3}");
            }
        }
    }

    fn row(
        &mut self,
        d: &RenderDescriptor,
        detail: std::fmt::Arguments<'_>,
    ) -> TelestratorResult<()> {
        writeln!(
            self.buf,
            "  {:<9} {:<12} at ({:.1}, {:.1}) opacity {:.2} rot {:.1} {detail}",
            format!("{:?}", d.kind()).to_lowercase(),
            d.id,
            d.position.x,
            d.position.y,
            d.opacity,
            d.rotation,
        )
        .map_err(|e| TelestratorError::Other(e.into()))
    }
}

impl DrawSurface for TextSurface {
    fn text(&mut self, d: &RenderDescriptor, g: &TextGeometry) -> TelestratorResult<()> {
        self.row(d, format_args!("{:?} size {:.1}", g.text, g.font_size))
    }

    fn circle(&mut self, d: &RenderDescriptor, g: &RoundGeometry) -> TelestratorResult<()> {
        self.row(d, format_args!("r {:.1}", g.radius))
    }

    fn spotlight(&mut self, d: &RenderDescriptor, g: &RoundGeometry) -> TelestratorResult<()> {
        self.row(
            d,
            format_args!("r {:.1} blur {:.1}", g.radius, g.shadow_blur.unwrap_or(0.0)),
        )
    }

    fn line(&mut self, d: &RenderDescriptor, g: &PathGeometry) -> TelestratorResult<()> {
        self.row(d, format_args!("{} pts", g.points.len() / 2))
    }

    fn arrow(&mut self, d: &RenderDescriptor, g: &PathGeometry) -> TelestratorResult<()> {
        self.row(d, format_args!("{} pts", g.points.len() / 2))
    }

    fn polygon(&mut self, d: &RenderDescriptor, g: &PathGeometry) -> TelestratorResult<()> {
        self.row(d, format_args!("{} pts", g.points.len() / 2))
    }
}

fn cmd_scenes(args: ScenesArgs) -> anyhow::Result<()> {
    let snapshot = load_snapshot(&args.in_path)?;
    let scenes = snapshot.pause_scenes();
    if scenes.is_empty() {
        eprintln!("no pause scenes");
        return Ok(());
    }
    println!("id\tstart\tend\tcountdown\tclip");
    for ann in scenes {
        let clip = snapshot.clip_for(ann).map_or("-", |c| c.name.as_str());
        println!(
            "{}\t{:.2}\t{:.2}\t{}s\t{}",
            ann.id,
            ann.start_time,
            ann.end_time,
            ann.pause_countdown_secs(),
            clip
        );
    }
    Ok(())
}

fn cmd_delete(args: DeleteArgs) -> anyhow::Result<()> {
    let snapshot = load_snapshot(&args.in_path)?;
    let out_path = args.out.unwrap_or_else(|| args.in_path.clone());
    let mut store = JsonFileStore::new(&out_path);
    let mut engine = PlaybackEngine::create(
        snapshot,
        EngineConfig::default(),
        SimulatedPlayer::new(),
        SystemClock::new(),
    )?;
    engine
        .delete_annotation(&args.id, &mut store)
        .with_context(|| format!("delete annotation '{}'", args.id))?;
    engine.dispose();
    eprintln!("deleted {}; wrote {}", args.id, out_path.display());
    Ok(())
}

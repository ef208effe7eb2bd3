use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dsviz", version, about = "Render data-structure animations")]
struct Cli {
    /// Log more (repeat for trace output).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one frame of a frame script as a PNG.
    Frame(FrameArgs),
    /// Render a whole script to MP4 (requires `ffmpeg` on PATH) or to a PNG sequence.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input frame script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Script frame index (0-based).
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Render config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output MP4 path.
    #[arg(long, required_unless_present = "frames_dir")]
    out: Option<PathBuf>,

    /// Write `frame_0000.png`, ... into this directory instead of encoding a video.
    #[arg(long)]
    frames_dir: Option<PathBuf>,

    /// Treat the input as a command script instead of a frame script.
    #[arg(long)]
    commands: bool,

    /// Render config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<dsviz::RenderConfig> {
    let cfg = match path {
        Some(p) => dsviz::RenderConfig::from_path(p)?,
        None => dsviz::RenderConfig::default(),
    };
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let script = dsviz::FrameScript::from_path(&args.in_path)?;
    let frame = script.frames.get(args.index).with_context(|| {
        format!(
            "frame index {} out of range for {} frame(s)",
            args.index,
            script.frames.len()
        )
    })?;

    let code = script.code.as_deref().map(dsviz::CodeListing::from_source);
    let overlay = dsviz::Overlay {
        code: code.as_ref(),
        line: frame.line,
        caption: frame.text.as_deref(),
    };
    let scene = dsviz::Compositor::new(&cfg).compose_frame(frame, &overlay)?;
    let mut raster = dsviz::CpuRasterizer::new(&cfg)?;
    let pixels = raster.render(&scene)?;
    dsviz::write_png(&args.out, &pixels, cfg.colors.background)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let background = cfg.colors.background;

    let (sink, target): (Box<dyn dsviz::FrameSink>, &Path) = match (&args.frames_dir, &args.out) {
        (Some(dir), _) => (
            Box::new(dsviz::PngSequenceSink::new(dir).with_background(background)),
            dir.as_path(),
        ),
        (None, Some(out)) => {
            if !dsviz::is_ffmpeg_on_path() {
                anyhow::bail!("ffmpeg not found on PATH; use --frames-dir to write PNGs instead");
            }
            let opts = dsviz::FfmpegSinkOpts::new(out).with_background(background);
            (Box::new(dsviz::FfmpegSink::new(opts)), out.as_path())
        }
        (None, None) => anyhow::bail!("either --out or --frames-dir is required"),
    };

    let mut seq = dsviz::AnimationSequencer::new(&cfg, sink)?;
    if args.commands {
        let script = dsviz::CommandScript::from_path(&args.in_path)?;
        seq.play_commands(&script)?;
    } else {
        let script = dsviz::FrameScript::from_path(&args.in_path)?;
        seq.set_code(script.code.as_deref());
        seq.play_frames(&script.frames)?;
    }
    let (stats, _) = seq
        .finish()
        .with_context(|| format!("finalize '{}'", target.display()))?;

    eprintln!(
        "wrote {} ({} frames, {} rasterized)",
        target.display(),
        stats.frames_total,
        stats.frames_rasterized
    );
    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use futures::executor::block_on;
use inkline::{
    BufferBackend, Framing, FsFetcher, PanelConfig, StrokePanel, Viewport, load_segments,
};

#[derive(Parser, Debug)]
#[command(name = "inkline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Flatten an SVG's paths and print segment statistics.
    Inspect(InspectArgs),
    /// Simulate a stroke-reveal run against the buffer backend.
    Animate(AnimateArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input SVG file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Normalized geometry scale.
    #[arg(long, default_value_t = 1.5)]
    scale: f64,

    /// Dump the flattened segments as JSON instead of a summary.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Input SVG file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Framing policy to lay the segments out with.
    #[arg(long, value_enum, default_value_t = FramingChoice::Preview)]
    framing: FramingChoice,

    /// Normalized geometry scale.
    #[arg(long, default_value_t = 1.5)]
    scale: f64,

    /// Camera field of view in degrees.
    #[arg(long, default_value_t = 75.0)]
    fov: f64,

    /// Viewport aspect ratio (width / height).
    #[arg(long, default_value_t = 16.0 / 9.0)]
    aspect: f64,

    /// Camera distance from the drawing plane.
    #[arg(long, default_value_t = 4.0)]
    distance: f64,

    /// Print a progress line every N frames.
    #[arg(long, default_value_t = 30)]
    every: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FramingChoice {
    Portrait,
    Title,
    Preview,
}

impl FramingChoice {
    fn to_framing(self) -> Framing {
        match self {
            Self::Portrait => Framing::Portrait,
            Self::Title => Framing::title_band(),
            Self::Preview => Framing::preview_box(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => inspect(args),
        Command::Animate(args) => animate(args),
    }
}

fn split_input(in_path: &Path) -> anyhow::Result<(FsFetcher, String)> {
    let dir = in_path.parent().map(PathBuf::from).unwrap_or_default();
    let name = in_path
        .file_name()
        .context("input path has no file name")?
        .to_string_lossy()
        .into_owned();
    Ok((FsFetcher::new(dir), name))
}

fn inspect(args: InspectArgs) -> anyhow::Result<()> {
    let (fetcher, name) = split_input(&args.in_path)?;
    let set = block_on(load_segments(&fetcher, &name, args.scale));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&set)?);
        return Ok(());
    }

    println!(
        "{}: {} segments, {} points",
        args.in_path.display(),
        set.len(),
        set.total_points()
    );
    for (i, seg) in set.segments.iter().enumerate() {
        println!("  segment {i}: {} points", seg.len());
    }
    Ok(())
}

fn animate(args: AnimateArgs) -> anyhow::Result<()> {
    let (fetcher, name) = split_input(&args.in_path)?;
    let viewport = Viewport::new(args.fov, args.aspect, args.distance)?;

    let mut config = PanelConfig::preview(name);
    config.framing = args.framing.to_framing();
    config.scale = args.scale;

    let panel = block_on(StrokePanel::load(
        &fetcher,
        config,
        viewport,
        BufferBackend::new(),
    ))?;
    let Some(mut panel) = panel else {
        println!("{}: nothing to animate", args.in_path.display());
        return Ok(());
    };

    let total_frames = panel.config().timing.total_frames();
    let every = args.every.max(1);
    println!(
        "{}: {} points over {} frames",
        args.in_path.display(),
        panel.total_points(),
        total_frames
    );

    panel.start();
    let mut frame = 0u64;
    while panel.tick()? {
        frame += 1;
        if frame % every == 0 {
            println!(
                "  frame {frame:>4}: {}/{} points",
                panel.revealed_points(),
                panel.total_points()
            );
        }
    }
    println!(
        "done: {}/{} points revealed, {} frames rendered",
        panel.revealed_points(),
        panel.total_points(),
        panel.backend().frames_rendered()
    );
    Ok(())
}

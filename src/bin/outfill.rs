use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "outfill", version)]
struct Cli {
    /// Log debug diagnostics to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill transparent pixels with the color of their nearest opaque pixel.
    Fill(FillArgs),
    /// Render an outpaint mask (white = generate, transparent = keep).
    Mask(MaskArgs),
    /// Write the fill layer and mask for an image in one go.
    Prepare(PrepareArgs),
}

#[derive(Parser, Debug)]
struct FillArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Pixels with alpha above this value are sources.
    #[arg(long, default_value_t = 0)]
    threshold: u8,

    /// Alpha written into filled pixels.
    #[arg(long, value_enum, default_value_t = AlphaChoice::Opaque)]
    alpha: AlphaChoice,
}

#[derive(Parser, Debug)]
struct MaskArgs {
    /// Canvas width in pixels.
    #[arg(long)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long)]
    height: u32,

    /// Image placement as x,y,w,h or x,y,w,h,scale_x,scale_y (repeatable).
    #[arg(long = "placement")]
    placements: Vec<outfill::Placement>,

    /// Fraction of each image's size to hand over to generation.
    #[arg(long, default_value_t = 0.1)]
    expand: f32,

    /// Mask edge feather strength in [0, 1].
    #[arg(long, default_value_t = 0.1)]
    blur: f32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PrepareArgs {
    /// Input image (the flattened canvas).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory receiving `fill.png` and `mask.png`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Outpaint settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Image placement (repeatable); defaults to the whole input image.
    #[arg(long = "placement")]
    placements: Vec<outfill::Placement>,

    /// Override `expand` from the settings file.
    #[arg(long)]
    expand: Option<f32>,

    /// Override `blur` from the settings file.
    #[arg(long)]
    blur: Option<f32>,

    /// Skip the fill layer.
    #[arg(long)]
    no_fill: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlphaChoice {
    Opaque,
    Propagate,
}

impl From<AlphaChoice> for outfill::FillAlpha {
    fn from(choice: AlphaChoice) -> Self {
        match choice {
            AlphaChoice::Opaque => outfill::FillAlpha::Opaque,
            AlphaChoice::Propagate => outfill::FillAlpha::Propagate,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Fill(args) => cmd_fill(args),
        Command::Mask(args) => cmd_mask(args),
        Command::Prepare(args) => cmd_prepare(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_fill(args: FillArgs) -> anyhow::Result<()> {
    let mut frame = outfill::Frame::load(&args.in_path)?;
    let stats = frame.fill_transparent(args.threshold, args.alpha.into());
    tracing::debug!(
        sources = stats.sources,
        filled = stats.filled,
        "fill finished"
    );
    frame.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_mask(args: MaskArgs) -> anyhow::Result<()> {
    let mask = outfill::build_mask(
        args.width,
        args.height,
        &args.placements,
        args.expand,
        args.blur,
    )?;
    mask.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_prepare(args: PrepareArgs) -> anyhow::Result<()> {
    let mut settings = match &args.settings {
        Some(path) => outfill::OutpaintSettings::from_path(path)?,
        None => outfill::OutpaintSettings::default(),
    };
    if let Some(expand) = args.expand {
        settings.expand = expand;
    }
    if let Some(blur) = args.blur {
        settings.blur = blur;
    }
    if args.no_fill {
        settings.fill = false;
    }

    let canvas = outfill::Frame::load(&args.in_path)?;
    let placements = if args.placements.is_empty() {
        vec![outfill::Placement::covering(canvas.width(), canvas.height())]
    } else {
        args.placements
    };

    let plan = outfill::prepare_outpaint(&canvas, &placements, &settings)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    if let Some(fill) = &plan.fill {
        let path = args.out_dir.join("fill.png");
        fill.save_png(&path)?;
        eprintln!("wrote {}", path.display());
    }
    let path = args.out_dir.join("mask.png");
    plan.mask.save_png(&path)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

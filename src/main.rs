use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use pixelmol::orchestrator::{ExportOptions, Orchestrator};
use pixelmol::pipeline::{
    choose_cell_size, pixelate, run_pipeline, upscale, PixelationOptions,
};
use pixelmol::render::{FrameSource, RotationAxis};
use pixelmol::sources::{sequence_colorfunc, ImageDirSource, TestCardOptions, TestCardSource};
use pixelmol::{Color, Frame};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::CliOpts::parse();
    init_logging(args.verbose, args.quiet);

    match args.command {
        cli::Command::Pixelate(opts) => run_pixelate(&opts),
        cli::Command::Still(opts) => run_still(&opts).await,
        cli::Command::Animate(opts) => run_animate(&opts).await,
        cli::Command::Palettes(opts) => run_palettes(&opts),
        cli::Command::Swatch(opts) => run_swatch(&opts),
        #[cfg(feature = "windowing")]
        cli::Command::Preview(opts) => run_preview(&opts).await,
    }
}

fn init_logging(verbose: u8, quiet: u8) {
    const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
    let level = (2 + i16::from(verbose) - i16::from(quiet)).clamp(0, 4);
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::builder().parse_lossy(LEVELS[level as usize]))
        .init();
}

/// Construct the frame source selected on the command line
fn build_source(opts: &cli::SourceOpts) -> anyhow::Result<Box<dyn FrameSource + Send>> {
    if let Some(dir) = &opts.frames {
        return Ok(Box::new(ImageDirSource::from_dir(dir)?));
    }
    if opts.test_card {
        let card_opts = TestCardOptions::default();
        let mut card = TestCardSource::new(card_opts);
        card.register_colorfunc(sequence_colorfunc(
            opts.palette.0,
            card_opts.subject_extent,
        ));
        return Ok(Box::new(card));
    }
    bail!("either --frames or --test-card must be given as frame source")
}

fn run_pixelate(opts: &cli::PixelateOpts) -> anyhow::Result<()> {
    let image = image::open(&opts.input)
        .with_context(|| format!("Could not open input image {}", opts.input.display()))?
        .to_rgba8();
    let source = Frame::from_rgba_bytes(
        image.width() as usize,
        image.height() as usize,
        image.as_raw(),
    )?;

    let (target_width, target_height) = match opts.size {
        Some(size) => (size, size),
        None => source.get_size(),
    };
    let cell_size = opts.pixelation.cell_size_override().unwrap_or_else(|| {
        choose_cell_size(target_width.max(target_height), opts.residue_count)
    });

    let pixelation = PixelationOptions {
        cell_size,
        transparent_background: opts.transparent,
        background: opts.pixelation.background.classifier(),
    };
    let bitmap = run_pipeline(&source, &pixelation, target_width, target_height)?;
    pixelmol::sinks::png::write_png(&bitmap, &opts.output)?;
    Ok(())
}

async fn run_still(opts: &cli::StillOpts) -> anyhow::Result<()> {
    let source = build_source(&opts.source)?;
    let mut orchestrator = Orchestrator::new(source);
    let still = orchestrator
        .capture_still(opts.size, opts.background.classifier())
        .await?;
    pixelmol::sinks::png::write_png(&still, &opts.output)?;
    Ok(())
}

async fn run_animate(opts: &cli::AnimateOpts) -> anyhow::Result<()> {
    let source = build_source(&opts.source)?;
    let mut orchestrator = Orchestrator::new(source);

    let export_opts = ExportOptions {
        frame_count: opts.frame_count,
        rotation_step_degrees: opts.rotation_step,
        // in-plane rotation so that the flat test card visibly spins as well
        rotation_axis: RotationAxis::Z,
        frame_delay_ms: opts.frame_delay_ms,
        export_size: opts.size,
        background: opts.background.classifier(),
    };
    let sequence = orchestrator.export_animation(&export_opts).await?;
    pixelmol::sinks::gif::write_gif(&sequence, &opts.output)?;
    tracing::info!(
        "wrote {} frame animation to {}",
        sequence.len(),
        opts.output.display()
    );
    Ok(())
}

fn run_palettes(opts: &cli::PalettesOpts) -> anyhow::Result<()> {
    use pixelmol::palette::PaletteKind;

    for kind in [
        PaletteKind::Sequential,
        PaletteKind::Diverging,
        PaletteKind::Qualitative,
    ] {
        if let Some(filter) = opts.kind {
            if filter.0 != kind {
                continue;
            }
        }
        println!("{kind:?}:");
        for palette in pixelmol::palette::registry().iter().filter(|p| p.kind() == kind) {
            let anchors = palette
                .anchors()
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            println!("  {:<10} {:<10} {anchors}", palette.id(), palette.name());
        }
    }
    Ok(())
}

fn run_swatch(opts: &cli::SwatchOpts) -> anyhow::Result<()> {
    if opts.width == 0 || opts.height == 0 {
        bail!("swatch dimensions must both be greater than 0");
    }

    let palette = opts.palette.0;
    let mut strip = Frame::new(opts.width, opts.height, Color::TRANSPARENT)?;
    let span = (opts.width - 1).max(1) as f64;
    for x in 0..opts.width {
        let color = palette.sample(x as f64 / span);
        for y in 0..opts.height {
            strip.set_pixel(x, y, color)?;
        }
    }

    // pixelate the ramp for the retro look; a swatch has no scene background so the
    // outline pass is skipped
    let pixelation = PixelationOptions {
        cell_size: opts.pixel_size,
        transparent_background: false,
        background: Default::default(),
    };
    let coarse = pixelate(&strip, &pixelation)?;
    let bitmap = upscale(&coarse, opts.width, opts.height)?;
    pixelmol::sinks::png::write_png(&bitmap, &opts.output)?;
    Ok(())
}

#[cfg(feature = "windowing")]
async fn run_preview(opts: &cli::PreviewCmdOpts) -> anyhow::Result<()> {
    use pixelmol::orchestrator::PreviewOptions;
    use pixelmol::sinks::window::PreviewWindow;
    use std::sync::atomic::AtomicBool;

    let source = build_source(&opts.source)?;
    let mut orchestrator = Orchestrator::new(source);
    let mut window = PreviewWindow::new("pixelmol", opts.size, opts.size)?;

    let preview_opts = PreviewOptions {
        display_size: opts.size,
        framerate: opts.framerate,
        rotation_step_degrees: opts.rotation_step,
        rotation_axis: RotationAxis::Z,
        residue_count: opts.source.residue_count,
        cell_size_override: opts.pixelation.cell_size_override(),
        background: opts.pixelation.background.classifier(),
    };

    // the window handle is not Send, so the loop runs directly on this task and stops
    // once the window is closed
    let alive = AtomicBool::new(true);
    orchestrator
        .run_preview(&preview_opts, &mut window, &alive)
        .await
}

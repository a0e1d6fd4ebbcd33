use clap::{ArgAction, Args, Parser, Subcommand};
use pixelmol::palette::{Palette, PaletteKind, UnknownPaletteError};
use pixelmol::pipeline::background::BackgroundClassifier;
use pixelmol::Color;
use std::path::PathBuf;
use std::str::FromStr;

/// Command-Line arguments as a well formatted struct, parsed using clap.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub(crate) struct CliOpts {
    #[command(subcommand)]
    pub command: Command,

    /// Increase program verbosity
    ///
    /// The default verbosity level is INFO.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, default_value = "0")]
    pub verbose: u8,

    /// Decrease program verbosity
    ///
    /// The default verbosity level is INFO.
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, default_value = "0")]
    pub quiet: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Command {
    /// Pixelate a single image file into a pixel-art still
    Pixelate(PixelateOpts),
    /// Capture a transparent pixel-art still from a frame source
    Still(StillOpts),
    /// Capture a looping pixel-art animation from a frame source
    Animate(AnimateOpts),
    /// List the registered color palettes
    Palettes(PalettesOpts),
    /// Render a palette ramp into a pixelated swatch strip
    Swatch(SwatchOpts),
    /// Show a live preview window of the pixelated frame source
    #[cfg(feature = "windowing")]
    Preview(PreviewCmdOpts),
}

/// Where the full-resolution renderer frames come from
#[derive(Args, Debug, Clone)]
pub(crate) struct SourceOpts {
    /// Directory containing captured renderer frames, replayed in file-name order
    ///
    /// Each file holds one frame; successive files are treated as successive rotation
    /// steps of the captured scene.
    #[arg(long = "frames")]
    pub frames: Option<PathBuf>,

    /// Use the built-in procedural test card instead of captured frames
    #[arg(long = "test-card")]
    pub test_card: bool,

    /// The palette used to color the test card subject by sequence position
    #[arg(long = "palette", default_value = pixelmol::orchestrator::DEFAULT_PALETTE)]
    pub palette: PaletteId,

    /// Residue count of the rendered structure, used by automatic cell sizing
    #[arg(long = "residues")]
    pub residue_count: Option<usize>,
}

/// Options controlling background classification
#[derive(Args, Debug, Clone)]
pub(crate) struct BackgroundOpts {
    /// The scene clear color which counts as background, as rgb hex (e.g. 0d1117)
    #[arg(long = "background", default_value = "0d1117")]
    pub background: HexColor,

    /// Per-channel difference under which a pixel still counts as background
    #[arg(long = "tolerance", default_value = "20")]
    pub tolerance: u8,
}

impl BackgroundOpts {
    pub fn classifier(&self) -> BackgroundClassifier {
        BackgroundClassifier::new(self.background.0, self.tolerance)
    }
}

/// Options controlling the pixelation pipeline
#[derive(Args, Debug, Clone)]
pub(crate) struct PixelationCliOpts {
    /// Cell size in source pixels (0 = choose automatically from the display size)
    #[arg(long = "pixel-size", default_value = "0")]
    pub pixel_size: usize,

    #[command(flatten)]
    pub background: BackgroundOpts,
}

impl PixelationCliOpts {
    /// The explicit cell size, if one was requested
    pub fn cell_size_override(&self) -> Option<usize> {
        (self.pixel_size > 0).then_some(self.pixel_size)
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct PixelateOpts {
    /// Path of the image that should be pixelated
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Path of the resulting png file
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Edge length of the square output bitmap (defaults to the input dimensions)
    #[arg(long = "size")]
    pub size: Option<usize>,

    /// Clear the background to transparency instead of keeping it
    #[arg(long = "transparent")]
    pub transparent: bool,

    /// Residue count of the depicted structure, used by automatic cell sizing
    #[arg(long = "residues")]
    pub residue_count: Option<usize>,

    #[command(flatten)]
    pub pixelation: PixelationCliOpts,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct StillOpts {
    #[command(flatten)]
    pub source: SourceOpts,

    /// Path of the resulting png file
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Edge length of the exported bitmap
    #[arg(long = "size", default_value = "512")]
    pub size: usize,

    #[command(flatten)]
    pub background: BackgroundOpts,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct AnimateOpts {
    #[command(flatten)]
    pub source: SourceOpts,

    /// Path of the resulting gif file
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Edge length of the exported bitmaps
    #[arg(long = "size", default_value = "256")]
    pub size: usize,

    /// How many frames are captured for one loop
    #[arg(long = "frame-count", default_value = "36")]
    pub frame_count: usize,

    /// Scene rotation between successive frames in degrees
    #[arg(long = "rotation-step", default_value = "10")]
    pub rotation_step: f64,

    /// Display duration of every frame in milliseconds
    #[arg(long = "frame-delay", default_value = "50")]
    pub frame_delay_ms: u32,

    #[command(flatten)]
    pub background: BackgroundOpts,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct PalettesOpts {
    /// Only list palettes of this kind
    ///
    /// Possible values: ["sequential", "diverging", "qualitative"]
    #[arg(long = "kind")]
    pub kind: Option<KindFilter>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct SwatchOpts {
    /// The palette to render
    #[arg(short = 'p', long = "palette", default_value = pixelmol::orchestrator::DEFAULT_PALETTE)]
    pub palette: PaletteId,

    /// Path of the resulting png file
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Width of the swatch strip
    #[arg(long = "width", default_value = "512")]
    pub width: usize,

    /// Height of the swatch strip
    #[arg(long = "height", default_value = "64")]
    pub height: usize,

    /// Cell size of the pixelation applied to the strip
    #[arg(long = "pixel-size", default_value = "8")]
    pub pixel_size: usize,
}

#[cfg(feature = "windowing")]
#[derive(Args, Debug, Clone)]
pub(crate) struct PreviewCmdOpts {
    #[command(flatten)]
    pub source: SourceOpts,

    /// Edge length of the preview window
    #[arg(long = "size", default_value = "300")]
    pub size: usize,

    /// The target framerate of the preview loop
    #[arg(long = "framerate", default_value = "30")]
    pub framerate: usize,

    /// Scene rotation applied before every tick in degrees (0 disables rotation)
    #[arg(long = "rotation-step", default_value = "0.5")]
    pub rotation_step: f64,

    #[command(flatten)]
    pub pixelation: PixelationCliOpts,
}

/// A palette identifier that is validated against the registry while parsing
#[derive(Debug, Clone)]
pub(crate) struct PaletteId(pub &'static Palette);

impl FromStr for PaletteId {
    type Err = UnknownPaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        pixelmol::palette::lookup(s).map(PaletteId)
    }
}

/// A color parsed from six hex digits
#[derive(Debug, Clone, Copy)]
pub(crate) struct HexColor(pub Color);

impl FromStr for HexColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return Err(format!("expected exactly six hex digits, got {:?}", s));
        }
        let value = u32::from_str_radix(digits, 16).map_err(|e| e.to_string())?;
        let bytes = value.to_be_bytes();
        Ok(Self(Color::rgb(bytes[1], bytes[2], bytes[3])))
    }
}

/// A palette kind parsed from its lowercase name
#[derive(Debug, Clone, Copy)]
pub(crate) struct KindFilter(pub PaletteKind);

impl FromStr for KindFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self(PaletteKind::Sequential)),
            "diverging" => Ok(Self(PaletteKind::Diverging)),
            "qualitative" => Ok(Self(PaletteKind::Qualitative)),
            other => Err(format!("unknown palette kind {:?}", other)),
        }
    }
}

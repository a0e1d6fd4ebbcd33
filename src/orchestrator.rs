//!
//! Driving of the render → pixelate → display/export sequence
//!
//! An [`Orchestrator`] owns one [`FrameSource`] and moves through the states
//! `Idle → Previewing → Exporting → Idle`, plus the terminal `Failed`. The pipeline
//! itself is synchronous; concurrency exists only here, as a single-threaded cooperative
//! loop that yields between frames (at the renderer await point and at preview tick
//! boundaries). Since every operation takes `&mut self`, no two pipeline invocations can
//! ever run against the same buffers.
//!

use crate::frame::Frame;
use crate::pipeline::background::BackgroundClassifier;
use crate::pipeline::{choose_cell_size, run_pipeline, PixelationOptions};
use crate::render::{FrameSource, RotationAxis};
use crate::DaemonHandle;
use anyhow::{anyhow, bail, Context};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

/// How many frames one animated export captures (a full revolution)
pub const EXPORT_FRAME_COUNT: usize = 36;

/// Scene rotation between successive export frames in degrees
pub const EXPORT_ROTATION_STEP_DEGREES: f64 = 10.0;

/// Display duration of every export frame in milliseconds
pub const EXPORT_FRAME_DELAY_MS: u32 = 50;

/// Edge length of animated export bitmaps
pub const ANIMATED_EXPORT_SIZE: usize = 256;

/// Edge length of still export bitmaps
pub const STILL_EXPORT_SIZE: usize = 512;

/// Cell size used for all exports, independent of the live display size, so that
/// exports of the same structure always look the same
pub const EXPORT_CELL_SIZE: usize = 8;

/// The palette that is used when the caller does not pick one
pub const DEFAULT_PALETTE: &str = "bupu";

/// One frame of an export sequence together with its display duration
#[derive(Debug, Clone)]
pub struct ExportFrame {
    /// The final upscaled bitmap
    pub bitmap: Frame,
    /// How long the frame is displayed, in milliseconds
    pub delay_ms: u32,
}

/// The ordered set of bitmaps an animated export is encoded from
pub type ExportSequence = Vec<ExportFrame>;

/// The states an orchestrator moves through
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OrchestratorState {
    /// Nothing is running
    Idle,
    /// The continuous preview loop is running
    Previewing,
    /// An export sequence is being captured
    Exporting,
    /// A renderer or pipeline failure aborted an export; terminal
    Failed,
}

/// Something the live preview can draw final bitmaps onto
pub trait DisplaySink {
    /// Draw one final bitmap onto the display surface
    fn draw(&mut self, frame: &Frame) -> anyhow::Result<()>;

    /// Whether the owning view still exists.
    ///
    /// The preview loop checks this at every tick boundary and stops once it turns false.
    fn is_alive(&self) -> bool {
        true
    }
}

/// Configuration options of the continuous preview loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewOptions {
    /// Edge length of the square display surface
    pub display_size: usize,
    /// How many preview frames per second should be targeted
    pub framerate: usize,
    /// Scene rotation applied before every tick (0 disables rotation)
    pub rotation_step_degrees: f64,
    /// Axis of the per-tick rotation
    pub rotation_axis: RotationAxis,
    /// Residue count of the displayed structure, used by automatic cell sizing
    pub residue_count: Option<usize>,
    /// Explicit cell size, bypassing the automatic policy
    pub cell_size_override: Option<usize>,
    /// How cells are classified as background
    pub background: BackgroundClassifier,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            display_size: 300,
            framerate: 30,
            rotation_step_degrees: 0.5,
            rotation_axis: RotationAxis::Y,
            residue_count: None,
            cell_size_override: None,
            background: BackgroundClassifier::default(),
        }
    }
}

/// Configuration options of an animated export
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    /// How many frames are captured
    pub frame_count: usize,
    /// Scene rotation between successive frames in degrees
    pub rotation_step_degrees: f64,
    /// Axis of the per-frame rotation
    pub rotation_axis: RotationAxis,
    /// Display duration of every frame in milliseconds
    pub frame_delay_ms: u32,
    /// Edge length of the square export bitmaps
    pub export_size: usize,
    /// How cells are classified as background
    pub background: BackgroundClassifier,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            frame_count: EXPORT_FRAME_COUNT,
            rotation_step_degrees: EXPORT_ROTATION_STEP_DEGREES,
            rotation_axis: RotationAxis::Y,
            frame_delay_ms: EXPORT_FRAME_DELAY_MS,
            export_size: ANIMATED_EXPORT_SIZE,
            background: BackgroundClassifier::default(),
        }
    }
}

/// Drives one frame source through the pixelation pipeline, either continuously onto a
/// display surface or into an export sequence
#[derive(Debug)]
pub struct Orchestrator<S> {
    source: S,
    state: OrchestratorState,
}

impl<S: FrameSource> Orchestrator<S> {
    /// Create a new orchestrator owning the given frame source
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: OrchestratorState::Idle,
        }
    }

    /// The current state of this orchestrator
    pub fn state(&self) -> OrchestratorState {
        self.state
    }

    /// Access the owned frame source, e.g. to register a colorfunc after structure load
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Run the continuous preview loop until the owning view goes away.
    ///
    /// Every tick renders one frame, runs the pipeline with an opaque background and
    /// draws the result onto `display`. A renderer failure only skips the tick; the
    /// next tick retries. The loop stops at the next tick boundary once `alive` is
    /// cleared or the display reports that its view was torn down.
    pub async fn run_preview<D: DisplaySink>(
        &mut self,
        opts: &PreviewOptions,
        display: &mut D,
        alive: &AtomicBool,
    ) -> anyhow::Result<()> {
        if self.state == OrchestratorState::Failed {
            bail!("orchestrator has failed and cannot preview anymore");
        }
        self.state = OrchestratorState::Previewing;

        let pixelation = PixelationOptions {
            cell_size: opts
                .cell_size_override
                .unwrap_or_else(|| choose_cell_size(opts.display_size, opts.residue_count)),
            transparent_background: false,
            background: opts.background,
        };

        let mut ticker = interval(Duration::from_secs_f64(1.0 / opts.framerate as f64));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while alive.load(Ordering::Relaxed) && display.is_alive() {
            if opts.rotation_step_degrees != 0.0 {
                self.source.rotate(opts.rotation_step_degrees, opts.rotation_axis);
            }

            match self.source.render().await {
                Err(e) => {
                    // recoverable during preview, the next tick simply retries
                    tracing::warn!("skipping preview tick: {e}");
                }
                Ok(raw) => {
                    let bitmap = match run_pipeline(
                        &raw,
                        &pixelation,
                        opts.display_size,
                        opts.display_size,
                    ) {
                        Ok(bitmap) => bitmap,
                        Err(e) => {
                            self.state = OrchestratorState::Failed;
                            return Err(e).context("preview pipeline rejected its configuration");
                        }
                    };
                    if let Err(e) = display.draw(&bitmap) {
                        self.state = OrchestratorState::Failed;
                        return Err(e).context("could not draw preview frame");
                    }
                }
            }

            ticker.tick().await;
        }

        self.state = OrchestratorState::Idle;
        Ok(())
    }

    /// Capture an export sequence by rotating the scene frame by frame.
    ///
    /// Exports always use [`EXPORT_CELL_SIZE`] and a transparent background. Awaiting
    /// the renderer between frames is the cooperative suspension point. A renderer
    /// failure mid-sequence aborts the whole export: the partial sequence is discarded,
    /// the orchestrator enters its terminal `Failed` state and the error is surfaced.
    pub async fn export_animation(&mut self, opts: &ExportOptions) -> anyhow::Result<ExportSequence> {
        if self.state == OrchestratorState::Failed {
            bail!("orchestrator has failed and cannot export anymore");
        }
        self.state = OrchestratorState::Exporting;
        tracing::info!(
            "capturing {} export frames at {1}x{1}",
            opts.frame_count,
            opts.export_size
        );

        let pixelation = PixelationOptions {
            cell_size: EXPORT_CELL_SIZE,
            transparent_background: true,
            background: opts.background,
        };

        let mut sequence = Vec::with_capacity(opts.frame_count);
        for i in 0..opts.frame_count {
            self.source.rotate(opts.rotation_step_degrees, opts.rotation_axis);
            let raw = match self.source.render().await {
                Ok(frame) => frame,
                Err(e) => {
                    // dropping `sequence` here discards all partially captured frames
                    self.state = OrchestratorState::Failed;
                    return Err(e).with_context(|| format!("export aborted after {i} frames"));
                }
            };
            let bitmap = match run_pipeline(&raw, &pixelation, opts.export_size, opts.export_size) {
                Ok(bitmap) => bitmap,
                Err(e) => {
                    self.state = OrchestratorState::Failed;
                    return Err(e).context("export pipeline rejected its configuration");
                }
            };
            sequence.push(ExportFrame {
                bitmap,
                delay_ms: opts.frame_delay_ms,
            });
            tracing::debug!("captured export frame {}/{}", i + 1, opts.frame_count);
        }

        self.state = OrchestratorState::Idle;
        Ok(sequence)
    }

    /// Capture a single still frame, the degenerate one-frame case of an export.
    ///
    /// The scene is not rotated; the result has a transparent background.
    pub async fn capture_still(
        &mut self,
        export_size: usize,
        background: BackgroundClassifier,
    ) -> anyhow::Result<Frame> {
        let opts = ExportOptions {
            frame_count: 1,
            rotation_step_degrees: 0.0,
            frame_delay_ms: 0,
            export_size,
            background,
            ..ExportOptions::default()
        };
        let mut sequence = self.export_animation(&opts).await?;
        sequence
            .pop()
            .map(|frame| frame.bitmap)
            .ok_or_else(|| anyhow!("export produced no frame"))
    }
}

impl<S: FrameSource + Send + 'static> Orchestrator<S> {
    /// Start the preview loop as a background task.
    ///
    /// Clearing `alive` stops the loop at the next tick boundary; [`DaemonHandle::stop`]
    /// aborts it immediately.
    pub fn start_preview<D>(
        mut self,
        opts: PreviewOptions,
        mut display: D,
        alive: Arc<AtomicBool>,
    ) -> DaemonHandle
    where
        D: DisplaySink + Send + 'static,
    {
        let handle =
            tokio::spawn(async move { self.run_preview(&opts, &mut display, &alive).await });
        DaemonHandle::new(handle)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::color::Color;
    use crate::pipeline::background::DEFAULT_BACKGROUND;
    use crate::render::RendererUnavailableError;
    use crate::sources::{TestCardOptions, TestCardSource};
    use async_trait::async_trait;

    fn small_card() -> TestCardSource {
        TestCardSource::new(TestCardOptions {
            size: 120,
            subject_extent: 40,
            ..TestCardOptions::default()
        })
    }

    /// A frame source that fails after a fixed number of successful renders
    struct FlakySource {
        inner: TestCardSource,
        renders_left: usize,
    }

    #[async_trait]
    impl FrameSource for FlakySource {
        async fn render(&mut self) -> Result<Frame, RendererUnavailableError> {
            if self.renders_left == 0 {
                return Err(RendererUnavailableError::new("context lost"));
            }
            self.renders_left -= 1;
            self.inner.render().await
        }

        fn rotate(&mut self, degrees: f64, axis: RotationAxis) {
            self.inner.rotate(degrees, axis);
        }
    }

    /// A display sink that records drawn frames and tears itself down after a while
    struct CollectingSink {
        frames: Vec<Frame>,
        remaining: usize,
    }

    impl DisplaySink for CollectingSink {
        fn draw(&mut self, frame: &Frame) -> anyhow::Result<()> {
            self.frames.push(frame.clone());
            self.remaining -= 1;
            Ok(())
        }

        fn is_alive(&self) -> bool {
            self.remaining > 0
        }
    }

    #[tokio::test]
    async fn test_static_scene_exports_identical_frames() {
        let mut orchestrator = Orchestrator::new(small_card());
        let opts = ExportOptions {
            rotation_step_degrees: 0.0,
            export_size: 64,
            ..ExportOptions::default()
        };
        let sequence = orchestrator.export_animation(&opts).await.unwrap();

        assert_eq!(sequence.len(), EXPORT_FRAME_COUNT);
        assert!(sequence.iter().all(|f| f.delay_ms == EXPORT_FRAME_DELAY_MS));
        assert!(sequence.iter().all(|f| f.bitmap == sequence[0].bitmap));
        assert_eq!(orchestrator.state(), OrchestratorState::Idle);
    }

    #[tokio::test]
    async fn test_export_background_is_transparent() {
        let mut orchestrator = Orchestrator::new(small_card());
        let opts = ExportOptions {
            frame_count: 1,
            export_size: 64,
            ..ExportOptions::default()
        };
        let sequence = orchestrator.export_animation(&opts).await.unwrap();
        let bitmap = &sequence[0].bitmap;
        assert_eq!(bitmap.get_pixel(0, 0).unwrap(), Color::TRANSPARENT);
        // the subject survives opaquely
        assert!(!bitmap.get_pixel(32, 32).unwrap().is_transparent());
    }

    #[tokio::test]
    async fn test_failed_export_discards_and_poisons() {
        let source = FlakySource {
            inner: small_card(),
            renders_left: 3,
        };
        let mut orchestrator = Orchestrator::new(source);
        let opts = ExportOptions {
            export_size: 64,
            ..ExportOptions::default()
        };

        assert!(orchestrator.export_animation(&opts).await.is_err());
        assert_eq!(orchestrator.state(), OrchestratorState::Failed);

        // the orchestrator is terminally failed, further exports are refused
        assert!(orchestrator.export_animation(&opts).await.is_err());
    }

    #[tokio::test]
    async fn test_capture_still_returns_to_idle() {
        let mut orchestrator = Orchestrator::new(small_card());
        let still = orchestrator
            .capture_still(STILL_EXPORT_SIZE, BackgroundClassifier::default())
            .await
            .unwrap();
        assert_eq!(still.get_size(), (STILL_EXPORT_SIZE, STILL_EXPORT_SIZE));
        assert_eq!(orchestrator.state(), OrchestratorState::Idle);
    }

    #[tokio::test]
    async fn test_preview_stops_when_view_dies() {
        let mut orchestrator = Orchestrator::new(small_card());
        let mut sink = CollectingSink {
            frames: Vec::new(),
            remaining: 3,
        };
        let alive = AtomicBool::new(true);
        let opts = PreviewOptions {
            display_size: 60,
            framerate: 1000,
            ..PreviewOptions::default()
        };

        orchestrator
            .run_preview(&opts, &mut sink, &alive)
            .await
            .unwrap();

        assert_eq!(sink.frames.len(), 3);
        assert_eq!(orchestrator.state(), OrchestratorState::Idle);
        // preview keeps the background opaque
        assert_eq!(sink.frames[0].get_pixel(0, 0).unwrap(), DEFAULT_BACKGROUND);
    }

    #[tokio::test]
    async fn test_start_preview_runs_in_background() {
        let orchestrator = Orchestrator::new(small_card());
        let sink = CollectingSink {
            frames: Vec::new(),
            remaining: 2,
        };
        let alive = Arc::new(AtomicBool::new(true));
        let opts = PreviewOptions {
            display_size: 60,
            framerate: 1000,
            ..PreviewOptions::default()
        };

        let handle = orchestrator.start_preview(opts, sink, alive);
        // the loop ends on its own once the sink's view goes away
        handle.join().await.unwrap();
    }

    #[tokio::test]
    async fn test_preview_skips_failed_ticks() {
        let source = FlakySource {
            inner: small_card(),
            renders_left: 0,
        };
        let mut orchestrator = Orchestrator::new(source);
        let mut sink = CollectingSink {
            frames: Vec::new(),
            remaining: 5,
        };
        let alive = AtomicBool::new(true);
        let opts = PreviewOptions {
            display_size: 60,
            framerate: 1000,
            ..PreviewOptions::default()
        };

        // stop the loop externally after a few ticks
        alive.store(true, Ordering::Relaxed);
        let deadline = tokio::time::timeout(Duration::from_millis(100), async {
            orchestrator.run_preview(&opts, &mut sink, &alive).await
        })
        .await;

        // the loop never drew anything but also never failed
        assert!(deadline.is_err(), "loop should still be running");
        assert!(sink.frames.is_empty());
    }
}

//! A sink for displaying pipeline output in an X or Wayland window

use crate::frame::Frame;
use crate::orchestrator::DisplaySink;
use anyhow::Context;
use minifb::{Window, WindowOptions};

/// A live preview window that pipeline output can be drawn onto.
///
/// Note that handles to X/Wayland windows are not `Send`, so a preview driven through
/// this sink must stay on the thread that created the window; run it by awaiting
/// [`crate::orchestrator::Orchestrator::run_preview`] directly instead of spawning it.
pub struct PreviewWindow {
    window: Window,
}

impl std::fmt::Debug for PreviewWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewWindow")
            .field("is_open", &self.window.is_open())
            .finish()
    }
}

impl PreviewWindow {
    /// Open a new preview window of the given inner size
    pub fn new(title: &str, width: usize, height: usize) -> anyhow::Result<Self> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .context("Could not create window")?;

        // Limit to max ~60 fps update rate
        window.limit_update_rate(Some(std::time::Duration::from_micros(16600)));

        Ok(Self { window })
    }
}

impl DisplaySink for PreviewWindow {
    fn draw(&mut self, frame: &Frame) -> anyhow::Result<()> {
        // minifb expects 0RGB u32 pixels; the preview runs with an opaque background
        // so the alpha channel can simply be dropped
        let buffer: Vec<u32> = frame
            .pixels()
            .iter()
            .map(|c| (u32::from(c.0) << 16) | (u32::from(c.1) << 8) | u32::from(c.2))
            .collect();
        self.window
            .update_with_buffer(&buffer, frame.width(), frame.height())
            .context("Could not update window data")?;
        Ok(())
    }

    fn is_alive(&self) -> bool {
        self.window.is_open()
    }
}

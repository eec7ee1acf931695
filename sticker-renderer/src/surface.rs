//! Rendering surfaces the exporter paints onto.
//!
//! A surface shows one scene at a time. [`RenderSurface::present`] queues a
//! scene, and it only becomes visible once the next frame has been drawn
//! ([`RenderSurface::wait_for_frame`]). Captures always read the visible
//! frame, so a capture that skips the frame wait sees stale content.

use std::sync::Arc;

use sticker_core::Scene;

use crate::export::{rasterize_svg, ExportConfig};
use crate::svg::{render_scene_svg, SvgOptions};
use crate::{RenderError, RenderResult};

/// Trait for surfaces that can display and capture a scene.
pub trait RenderSurface {
    /// Queue a scene (including its selection) for the next frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be accepted.
    fn present(&mut self, scene: &Scene) -> RenderResult<()>;

    /// Block until the queued scene has been drawn.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame fails to draw.
    fn wait_for_frame(&mut self) -> RenderResult<()>;

    /// Capture the visible frame as PNG bytes.
    ///
    /// `pixel_ratio` is output pixels per canvas unit.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is visible or encoding fails.
    fn capture(&self, pixel_ratio: f32) -> RenderResult<Vec<u8>>;
}

/// Offscreen surface rendering through SVG and resvg.
pub struct SvgSurface {
    background: [u8; 4],
    fontdb: Arc<usvg::fontdb::Database>,
    pending: Option<Scene>,
    displayed: Option<Scene>,
    frames: u64,
}

impl SvgSurface {
    /// Create a surface using the exporter's background and font settings.
    #[must_use]
    pub fn from_config(config: &ExportConfig) -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        if config.load_system_fonts {
            fontdb.load_system_fonts();
            tracing::debug!(faces = fontdb.len(), "Loaded system fonts");
        }
        Self {
            background: config.background,
            fontdb: Arc::new(fontdb),
            pending: None,
            displayed: None,
            frames: 0,
        }
    }

    /// Number of frames drawn so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// SVG markup of the visible frame at 1:1 scale.
    #[must_use]
    pub fn displayed_svg(&self) -> Option<String> {
        self.displayed.as_ref().map(|scene| {
            render_scene_svg(
                scene,
                &SvgOptions {
                    background: self.background,
                    ..SvgOptions::default()
                },
            )
        })
    }
}

impl RenderSurface for SvgSurface {
    fn present(&mut self, scene: &Scene) -> RenderResult<()> {
        self.pending = Some(scene.clone());
        Ok(())
    }

    fn wait_for_frame(&mut self) -> RenderResult<()> {
        if let Some(scene) = self.pending.take() {
            self.displayed = Some(scene);
        }
        self.frames += 1;
        tracing::trace!(frame = self.frames, "Frame drawn");
        Ok(())
    }

    fn capture(&self, pixel_ratio: f32) -> RenderResult<Vec<u8>> {
        let scene = self
            .displayed
            .as_ref()
            .ok_or_else(|| RenderError::Surface("No frame has been drawn".to_string()))?;
        let svg = render_scene_svg(
            scene,
            &SvgOptions {
                scale: pixel_ratio,
                background: self.background,
                show_selection: true,
            },
        );
        let pixmap = rasterize_svg(&svg, &self.fontdb)?;
        pixmap
            .encode_png()
            .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))
    }
}

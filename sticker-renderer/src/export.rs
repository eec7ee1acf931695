//! Sticker export to PNG and SVG.
//!
//! Rasterization goes through a mounted [`RenderSurface`]; with no surface
//! mounted there is nothing to export and the exporter returns `None`.

use std::sync::Arc;

use sticker_core::constants::{DOWNLOAD_PREFIX, EXPORT_SCALE};
use sticker_core::{ReferenceCode, SaveStickerRequest, Scene, SceneEditor};

use crate::error::{RenderError, RenderResult};
use crate::image::data_uri;
use crate::surface::{RenderSurface, SvgSurface};
use crate::svg::{render_scene_svg, SvgOptions};

/// Configuration for sticker export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output pixels per canvas unit (default: 2.0, giving 800x800).
    pub scale: f32,
    /// Background color as RGBA bytes.
    pub background: [u8; 4],
    /// Prefix of downloaded file names.
    pub file_prefix: String,
    /// Load system fonts so text is rasterized.
    pub load_system_fonts: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: EXPORT_SCALE,
            background: [255, 255, 255, 255],
            file_prefix: DOWNLOAD_PREFIX.to_string(),
            load_system_fonts: true,
        }
    }
}

/// Exports the editor's scene through a rendering surface.
pub struct StickerExporter {
    config: ExportConfig,
    surface: Option<Box<dyn RenderSurface>>,
}

impl StickerExporter {
    /// Create a new exporter with the given configuration and no surface.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            surface: None,
        }
    }

    /// Create an exporter with an offscreen [`SvgSurface`] already mounted.
    #[must_use]
    pub fn offscreen(config: ExportConfig) -> Self {
        let surface = SvgSurface::from_config(&config);
        let mut exporter = Self::new(config);
        exporter.mount(Box::new(surface));
        exporter
    }

    /// Get the export configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Attach a surface, replacing any previous one.
    pub fn mount(&mut self, surface: Box<dyn RenderSurface>) {
        self.surface = Some(surface);
    }

    /// Detach the surface.
    pub fn unmount(&mut self) -> Option<Box<dyn RenderSurface>> {
        self.surface.take()
    }

    /// Whether a surface is attached.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// Render the editor's scene to PNG bytes.
    ///
    /// The selection is cleared first and the capture happens only after the
    /// surface has drawn a frame without it, so no transform handles appear
    /// in the output. Returns `Ok(None)` when no surface is mounted.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface fails to draw or capture.
    pub fn rasterize(&mut self, editor: &mut SceneEditor) -> RenderResult<Option<Vec<u8>>> {
        let Some(surface) = self.surface.as_mut() else {
            tracing::warn!("Export requested with no surface mounted");
            return Ok(None);
        };
        editor.select(None);
        surface.present(editor.scene())?;
        surface.wait_for_frame()?;
        let png = surface.capture(self.config.scale)?;
        tracing::info!(
            bytes = png.len(),
            elements = editor.elements().len(),
            "Rasterized sticker"
        );
        Ok(Some(png))
    }

    /// Render the editor's scene to a PNG `data:` URI.
    ///
    /// # Errors
    ///
    /// Returns an error if rasterization fails.
    pub fn rasterize_data_uri(&mut self, editor: &mut SceneEditor) -> RenderResult<Option<String>> {
        Ok(self.rasterize(editor)?.map(|png| data_uri(&png)))
    }

    /// Build the save payload: document, rendered preview and language.
    ///
    /// # Errors
    ///
    /// Returns an error if rasterization fails.
    pub fn save_request(
        &mut self,
        editor: &mut SceneEditor,
        language: &str,
    ) -> RenderResult<Option<SaveStickerRequest>> {
        let Some(image_data) = self.rasterize_data_uri(editor)? else {
            return Ok(None);
        };
        Ok(Some(SaveStickerRequest::new(
            editor.to_document(),
            image_data,
            language,
        )))
    }

    /// Render a scene to SVG at the export scale, without selection.
    #[must_use]
    pub fn render_svg(&self, scene: &Scene) -> String {
        render_scene_svg(
            scene,
            &SvgOptions {
                scale: self.config.scale,
                background: self.config.background,
                show_selection: false,
            },
        )
    }

    /// Download file name for the exported PNG.
    #[must_use]
    pub fn file_name(&self, reference: Option<&ReferenceCode>) -> String {
        if self.config.file_prefix == DOWNLOAD_PREFIX {
            return sticker_core::download_file_name(reference);
        }
        match reference {
            Some(code) => format!("{}-{code}.png", self.config.file_prefix),
            None => format!(
                "{}-{}.png",
                self.config.file_prefix,
                sticker_core::clock::now_ms()
            ),
        }
    }
}

/// Rasterize an SVG string to a tiny-skia Pixmap.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn rasterize_svg(
    svg_string: &str,
    fontdb: &Arc<usvg::fontdb::Database>,
) -> RenderResult<tiny_skia::Pixmap> {
    let opt = usvg::Options {
        fontdb: Arc::clone(fontdb),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg_string, &opt)
        .map_err(|e| RenderError::Export(format!("SVG parsing failed: {e}")))?;

    let px_w = tree.size().width().round() as u32;
    let px_h = tree.size().height().round() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(px_w.max(1), px_h.max(1))
        .ok_or_else(|| RenderError::Export("Failed to create pixmap".to_string()))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    Ok(pixmap)
}

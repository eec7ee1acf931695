//! Image decoding and encoding for uploads and exports.
//!
//! Uploaded files become [`RasterImage`]s plus an inline `data:` URI that
//! travels with saved documents.

use base64::Engine;
use image::ImageEncoder;
use sticker_core::{
    CanvasResult, DecodedUpload, ElementKind, ImageSource, RasterHandle, RasterImage, SceneEditor,
};

use crate::error::{RenderError, RenderResult};

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// PNG with alpha support.
    Png,
    /// JPEG (no alpha).
    Jpeg,
    /// WebP (alpha support).
    WebP,
    /// GIF (first frame only).
    Gif,
    /// Unknown/other format.
    Unknown,
}

impl ImageFormat {
    /// Detect format from magic bytes.
    #[must_use]
    pub fn from_magic_bytes(data: &[u8]) -> Self {
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            Self::Png
        } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Self::Jpeg
        } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            Self::WebP
        } else if data.starts_with(b"GIF8") {
            Self::Gif
        } else {
            Self::Unknown
        }
    }

    /// MIME type used in data URIs.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
            Self::Gif => "image/gif",
            Self::Unknown => "application/octet-stream",
        }
    }
}

/// Decode raw image bytes into RGBA pixels.
///
/// # Errors
///
/// Returns an error if the image cannot be decoded.
pub fn decode_image_bytes(data: &[u8]) -> RenderResult<RasterImage> {
    let img = image::load_from_memory(data)
        .map_err(|e| RenderError::Resource(format!("Failed to decode image: {e}")))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(RasterImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Extract the payload bytes of a base64 `data:` URI.
///
/// # Errors
///
/// Returns an error if the URI is malformed or not base64 encoded.
pub fn data_uri_bytes(uri: &str) -> RenderResult<Vec<u8>> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| RenderError::Resource("Not a data URI".to_string()))?;
    let (metadata, encoded) = rest
        .split_once(',')
        .ok_or_else(|| RenderError::Resource("Invalid data URI: missing comma".to_string()))?;
    if !metadata.ends_with(";base64") {
        return Err(RenderError::Resource(
            "Only base64 data URIs are supported".to_string(),
        ));
    }
    base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| RenderError::Resource(format!("Failed to decode base64: {e}")))
}

/// Decode an image from a base64 `data:` URI.
///
/// # Errors
///
/// Returns an error if the URI is malformed or the image cannot be decoded.
pub fn decode_data_uri(uri: &str) -> RenderResult<RasterImage> {
    decode_image_bytes(&data_uri_bytes(uri)?)
}

/// Build a base64 `data:` URI for encoded image bytes.
#[must_use]
pub fn data_uri(bytes: &[u8]) -> String {
    let mime = ImageFormat::from_magic_bytes(bytes).mime();
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{encoded}")
}

/// Encode RGBA pixels as PNG.
///
/// # Errors
///
/// Returns an error if the pixel buffer does not match the dimensions.
pub fn encode_png(raster: &RasterImage) -> RenderResult<Vec<u8>> {
    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(
            &raster.pixels,
            raster.width,
            raster.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))?;
    Ok(buf)
}

/// Decode an uploaded file into pixels and its durable source descriptor.
///
/// # Errors
///
/// Returns [`sticker_core::CanvasError::ResourceDecode`] if the bytes are
/// not a decodable image.
pub fn decode_upload(bytes: &[u8]) -> CanvasResult<DecodedUpload> {
    let raster = decode_image_bytes(bytes).inspect_err(|e| {
        tracing::warn!(error = %e, len = bytes.len(), "Rejected image upload");
    })?;
    tracing::debug!(
        width = raster.width,
        height = raster.height,
        "Decoded image upload"
    );
    Ok(DecodedUpload {
        raster: RasterHandle::new(raster),
        source: ImageSource::new(data_uri(bytes)),
    })
}

/// [`decode_upload`] on the blocking thread pool.
///
/// # Errors
///
/// Returns [`sticker_core::CanvasError::ResourceDecode`] if decoding fails
/// or the blocking task is cancelled.
pub async fn decode_upload_async(bytes: Vec<u8>) -> CanvasResult<DecodedUpload> {
    tokio::task::spawn_blocking(move || decode_upload(&bytes))
        .await
        .map_err(|e| RenderError::Task(e.to_string()))?
}

/// Decode the inline sources of every image element that has no pixels yet.
///
/// Elements whose source cannot be decoded are left without pixels and are
/// skipped by the renderer. Returns the number of rasters attached.
pub fn restore_rasters(editor: &mut SceneEditor) -> usize {
    let pending: Vec<_> = editor
        .elements()
        .iter()
        .filter(|e| e.raster().is_none())
        .filter_map(|e| match &e.kind {
            ElementKind::Image { image_src, .. } if image_src.is_data_uri() => {
                Some((e.id.clone(), image_src.as_str().to_string()))
            }
            _ => None,
        })
        .collect();

    let mut attached = 0;
    for (id, src) in pending {
        match decode_data_uri(&src) {
            Ok(raster) => {
                if editor.attach_raster(&id, RasterHandle::new(raster)) {
                    attached += 1;
                }
            }
            Err(e) => tracing::warn!(id = %id, error = %e, "Could not restore image"),
        }
    }
    attached
}

//! # Sticker Renderer
//!
//! Turns sticker scenes into SVG and PNG, and decodes uploaded images.
//!
//! ## Export Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              StickerExporter                │
//! │  clear selection → present → frame → capture│
//! ├─────────────────────────────────────────────┤
//! │            RenderSurface Trait              │
//! ├──────────────────────┬──────────────────────┤
//! │ SvgSurface           │ Browser stage        │
//! │ (SVG → resvg → PNG)  │ (host supplied)      │
//! └──────────────────────┴──────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;
pub mod image;
pub mod surface;
pub mod svg;

pub use error::{RenderError, RenderResult};
pub use export::{ExportConfig, StickerExporter};
pub use image::{
    data_uri, decode_data_uri, decode_image_bytes, decode_upload, decode_upload_async, encode_png,
    restore_rasters, ImageFormat,
};
pub use surface::{RenderSurface, SvgSurface};
pub use svg::{render_scene_svg, SvgOptions};

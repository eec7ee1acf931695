//! # Sticker Core
//!
//! Editor state machine for the sticker designer.
//! Compiles to WASM for the browser editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              sticker-core.wasm              │
//! ├─────────────────────────────────────────────┤
//! │  Element Model   │  Interaction Adapter     │
//! │  - Factories     │  - Drag / transform      │
//! │  - Templates     │  - Keyboard shortcuts    │
//! ├─────────────────────────────────────────────┤
//! │  Scene Editor    │  History Log             │
//! │  - Mutations     │  - Bounded snapshots     │
//! │  - Uploads       │  - Undo / redo cursor    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Rendering lives in `sticker-renderer`; this crate only produces and
//! consumes scene descriptions.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod clock;
pub mod constants;
pub mod document;
pub mod editor;
pub mod element;
pub mod error;
pub mod factory;
pub mod history;
pub mod interaction;
pub mod language;
pub mod scene;
pub mod template;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use document::{
    download_file_name, ReferenceCode, RetrieveStickerResponse, SaveStickerRequest,
    SaveStickerResponse, StickerDocument, StickerStatus,
};
pub use editor::{DecodedUpload, LayerDirection, SceneEditor, UploadTicket};
pub use element::{
    BorderStyle, Bounds, Element, ElementId, ElementKind, ElementPatch, FrameStyle, ImageSource,
    RasterHandle, RasterImage, ShapeKind,
};
pub use error::{CanvasError, CanvasResult};
pub use history::{HistoryLog, HistorySnapshot};
pub use interaction::{
    InteractionAdapter, KeyEvent, KeyModifiers, NodeGeometry, ShortcutAction, ShortcutOutcome,
    TextFocus,
};
pub use language::{LanguageOption, LANGUAGES};
pub use scene::Scene;
pub use template::{DefaultTemplate, DEFAULT_TEMPLATES};

/// Sticker core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

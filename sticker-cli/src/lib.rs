//! # Sticker CLI
//!
//! Command-line front end for the sticker editor.
//!
//! ## Usage
//!
//! ```bash
//! sticker templates
//! sticker palette
//! sticker export --template emergency-basic --out-dir out/
//! sticker import-image photo.jpg --document out/design.json
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `commands` - One function per subcommand, driving `SceneEditor` and
//!   `StickerExporter` exactly as the browser editor does

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line arguments for sticker.
#[derive(Debug, Clone, Parser)]
#[command(name = "sticker")]
#[command(about = "Design and export emergency stickers")]
#[command(version)]
pub struct CliArgs {
    /// Directory that exported files are written to
    #[arg(long, env = "STICKER_OUT_DIR", default_value = ".", global = true)]
    pub out_dir: PathBuf,

    /// Language tag stored with exported designs
    #[arg(long, env = "STICKER_LANGUAGE", default_value = "en", global = true)]
    pub language: String,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the built-in templates
    Templates,

    /// List the supported languages
    Languages,

    /// List the color swatches, fonts and print size
    Palette,

    /// Render a template or saved document to PNG
    Export {
        /// Template id to start from
        #[arg(long, conflicts_with = "document", required_unless_present = "document")]
        template: Option<String>,

        /// Saved document JSON to render
        #[arg(long)]
        document: Option<PathBuf>,
    },

    /// Place an image on a design and export it
    ImportImage {
        /// Image file (PNG, JPEG, WebP or GIF)
        image: PathBuf,

        /// Saved document JSON to add the image to
        #[arg(long)]
        document: Option<PathBuf>,
    },
}

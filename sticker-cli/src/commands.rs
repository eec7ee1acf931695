//! Subcommand implementations.
//!
//! Every export writes two files named after a fresh reference code: the
//! 800x800 PNG and the JSON save payload (elements, preview, language and
//! template). The payload JSON can be fed back through `--document`.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use sticker_core::constants::{COLORS, EXPORT_SIZE, FONT_FAMILIES, PHYSICAL_SIZE_CM};
use sticker_core::language::find_language;
use sticker_core::{
    LanguageOption, ReferenceCode, SaveStickerRequest, SceneEditor, StickerDocument,
    DEFAULT_TEMPLATES, LANGUAGES,
};
use sticker_renderer::{
    data_uri, decode_upload_async, restore_rasters, ExportConfig, StickerExporter,
};

use crate::{CliArgs, Command};

/// Files written by an export.
#[derive(Debug, Clone)]
pub struct ExportedFiles {
    /// Reference code the files are named after.
    pub reference: ReferenceCode,
    /// Rendered PNG.
    pub png: PathBuf,
    /// JSON save payload.
    pub payload: PathBuf,
}

/// Run the parsed command line.
///
/// # Errors
///
/// Returns an error if the command fails.
pub async fn run(args: CliArgs) -> anyhow::Result<()> {
    let config = ExportConfig::default();
    match args.command {
        Command::Templates => print!("{}", list_templates()),
        Command::Languages => print!("{}", list_languages()),
        Command::Palette => print!("{}", list_palette()),
        Command::Export { template, document } => {
            let files = match (template, document) {
                (Some(id), _) => export_template(&config, &id, &args.out_dir, &args.language)?,
                (None, Some(path)) => {
                    export_document(&config, &path, &args.out_dir, &args.language)?
                }
                (None, None) => anyhow::bail!("Either --template or --document is required"),
            };
            report(&files)?;
        }
        Command::ImportImage { image, document } => {
            let files = import_image(
                &config,
                &image,
                document.as_deref(),
                &args.out_dir,
                &args.language,
            )
            .await?;
            report(&files)?;
        }
    }
    Ok(())
}

/// One line per built-in template.
#[must_use]
pub fn list_templates() -> String {
    let mut out = String::new();
    for template in DEFAULT_TEMPLATES {
        let _ = writeln!(
            out,
            "{:<20} {} {} ({} elements)",
            template.id,
            template.emoji,
            template.name,
            template.elements.len()
        );
    }
    out
}

/// One line per supported language.
#[must_use]
pub fn list_languages() -> String {
    let mut out = String::new();
    for language in LANGUAGES {
        let _ = writeln!(
            out,
            "{:<6} {} ({})",
            language.code, language.name, language.native_name
        );
    }
    out
}

/// Color swatches, font families and the printed sticker size.
#[must_use]
pub fn list_palette() -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Print size: {PHYSICAL_SIZE_CM}cm x {PHYSICAL_SIZE_CM}cm ({EXPORT_SIZE}x{EXPORT_SIZE}px)"
    );
    let _ = writeln!(out, "Colors: {}", COLORS.join(" "));
    let _ = writeln!(out, "Fonts:");
    for (label, css) in FONT_FAMILIES {
        let _ = writeln!(out, "  {label:<12} {css}");
    }
    out
}

/// Look up a language tag.
///
/// # Errors
///
/// Returns an error if the tag is not supported.
pub fn resolve_language(code: &str) -> anyhow::Result<&'static LanguageOption> {
    find_language(code).ok_or_else(|| {
        let known: Vec<_> = LANGUAGES.iter().map(|l| l.code).collect();
        anyhow::anyhow!("Unsupported language '{code}' (expected one of: {})", known.join(", "))
    })
}

/// Read a saved document or save payload from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read_document(path: &Path) -> anyhow::Result<StickerDocument> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    StickerDocument::from_json(&json).with_context(|| format!("Invalid document {}", path.display()))
}

/// Export a built-in template.
///
/// # Errors
///
/// Returns an error if the template or language is unknown, or writing fails.
pub fn export_template(
    config: &ExportConfig,
    template_id: &str,
    out_dir: &Path,
    language: &str,
) -> anyhow::Result<ExportedFiles> {
    let language = resolve_language(language)?;
    let mut editor = SceneEditor::new();
    editor.load_template_by_id(template_id)?;
    write_outputs(config, &mut editor, out_dir, language)
}

/// Export a saved document.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded, the language is
/// unknown, or writing fails.
pub fn export_document(
    config: &ExportConfig,
    path: &Path,
    out_dir: &Path,
    language: &str,
) -> anyhow::Result<ExportedFiles> {
    let language = resolve_language(language)?;
    let mut editor = open_document(path)?;
    write_outputs(config, &mut editor, out_dir, language)
}

/// Add an image to a new or saved design and export the result.
///
/// # Errors
///
/// Returns an error if the image cannot be read or decoded, the document
/// cannot be loaded, the language is unknown, or writing fails.
pub async fn import_image(
    config: &ExportConfig,
    image: &Path,
    document: Option<&Path>,
    out_dir: &Path,
    language: &str,
) -> anyhow::Result<ExportedFiles> {
    let language = resolve_language(language)?;
    let mut editor = match document {
        Some(path) => open_document(path)?,
        None => SceneEditor::new(),
    };

    let bytes = tokio::fs::read(image)
        .await
        .with_context(|| format!("Failed to read {}", image.display()))?;
    let ticket = editor.begin_image_upload();
    let decoded = decode_upload_async(bytes).await;
    let id = editor
        .complete_image_upload(ticket, decoded)
        .with_context(|| format!("Failed to import {}", image.display()))?
        .context("Image upload was superseded")?;
    tracing::info!(id = %id, image = %image.display(), "Imported image");

    write_outputs(config, &mut editor, out_dir, language)
}

fn open_document(path: &Path) -> anyhow::Result<SceneEditor> {
    let document = read_document(path)?;
    let mut editor = SceneEditor::new();
    editor.load_document(&document);
    let restored = restore_rasters(&mut editor);
    tracing::debug!(
        path = %path.display(),
        elements = editor.elements().len(),
        restored,
        "Loaded document"
    );
    Ok(editor)
}

fn write_outputs(
    config: &ExportConfig,
    editor: &mut SceneEditor,
    out_dir: &Path,
    language: &LanguageOption,
) -> anyhow::Result<ExportedFiles> {
    let mut exporter = StickerExporter::offscreen(config.clone());
    let png = exporter
        .rasterize(editor)?
        .context("No rendering surface mounted")?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let reference = ReferenceCode::generate();
    let png_path = out_dir.join(exporter.file_name(Some(&reference)));
    let payload_path = png_path.with_extension("json");

    let request = SaveStickerRequest::new(editor.to_document(), data_uri(&png), language.code);
    std::fs::write(&png_path, &png)
        .with_context(|| format!("Failed to write {}", png_path.display()))?;
    std::fs::write(&payload_path, serde_json::to_string_pretty(&request)?)
        .with_context(|| format!("Failed to write {}", payload_path.display()))?;
    editor.mark_saved();

    tracing::info!(
        reference = %reference,
        png = %png_path.display(),
        language = language.code,
        "Exported sticker"
    );
    Ok(ExportedFiles {
        reference,
        png: png_path,
        payload: payload_path,
    })
}

fn report(files: &ExportedFiles) -> anyhow::Result<()> {
    let summary = serde_json::json!({
        "referenceCode": files.reference.as_str(),
        "png": files.png,
        "payload": files.payload,
        "printSizeCm": PHYSICAL_SIZE_CM,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

//! Fixed editor parameters.
//!
//! These values must match the browser editor and the print pipeline exactly;
//! stored documents are laid out against them.

/// Edge length of the square editing canvas, in canvas units.
pub const CANVAS_SIZE: f32 = 400.0;

/// Edge length of the exported raster, in pixels.
pub const EXPORT_SIZE: u32 = 800;

/// Ratio between export pixels and canvas units.
#[allow(clippy::cast_precision_loss)]
pub const EXPORT_SCALE: f32 = EXPORT_SIZE as f32 / CANVAS_SIZE;

/// Physical edge length of the printed sticker, in centimetres.
pub const PHYSICAL_SIZE_CM: f32 = 8.0;

/// Maximum number of snapshots retained by the history log.
pub const MAX_HISTORY: usize = 50;

/// Offset applied on both axes to a duplicated element.
pub const DUPLICATE_OFFSET: f32 = 20.0;

/// Smallest bounding box edge a transform gesture may produce.
pub const MIN_TRANSFORM_SIZE: f32 = 10.0;

/// Longer side of a freshly placed image.
pub const IMAGE_MAX_SIZE: f32 = 150.0;

/// Total inset of a border frame from the canvas edges.
pub const BORDER_MARGIN: f32 = 40.0;

/// Default stroke width applied to new shapes and template elements.
pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;

/// Font size of icon glyphs.
pub const ICON_FONT_SIZE: f32 = 48.0;

/// Font family of icon glyphs.
pub const ICON_FONT_FAMILY: &str = "Arial";

/// Glyph used for icon tokens missing from [`ICON_MAP`].
pub const ICON_PLACEHOLDER: &str = "●";

/// Fill used by borders and images.
pub const TRANSPARENT: &str = "transparent";

/// Prefix of downloaded sticker files.
pub const DOWNLOAD_PREFIX: &str = "scanfleet-sticker";

/// Symbolic icon tokens and the glyphs they render as.
pub const ICON_MAP: &[(&str, &str)] = &[
    ("car", "🚗"),
    ("bike", "🏍️"),
    ("phone", "📞"),
    ("sos", "🆘"),
    ("medical", "⚕️"),
    ("helmet", "⛑️"),
    ("heart", "❤️"),
    ("warning", "⚠️"),
    ("shield", "🛡️"),
];

/// Swatches offered by the color picker.
pub const COLORS: &[&str] = &[
    "#ffffff", "#000000", "#ef4444", "#f97316", "#eab308", "#22c55e", "#06b6d4", "#3b82f6",
    "#8b5cf6", "#ec4899", "#64748b", "#1e293b", "#0f172a", "#fbbf24", "#10b981",
];

/// Font families offered by the text tool as `(label, css value)`.
pub const FONT_FAMILIES: &[(&str, &str)] = &[
    ("Raleway", "Raleway, sans-serif"),
    (
        "Noto Sans",
        "'Noto Sans Devanagari', 'Noto Sans Bengali', sans-serif",
    ),
    ("Arial", "Arial, sans-serif"),
    ("Georgia", "Georgia, serif"),
    ("Impact", "Impact, sans-serif"),
];

/// Look up the glyph for an icon token.
#[must_use]
pub fn icon_glyph(token: &str) -> Option<&'static str> {
    ICON_MAP
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, glyph)| *glyph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_scale_is_two() {
        assert!((EXPORT_SCALE - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_export_prints_at_one_hundred_pixels_per_cm() {
        #[allow(clippy::cast_precision_loss)]
        let px_per_cm = EXPORT_SIZE as f32 / PHYSICAL_SIZE_CM;
        assert!((px_per_cm - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_palette_is_hex_and_unique() {
        for color in COLORS {
            assert_eq!(color.len(), 7, "{color}");
            assert!(color.starts_with('#'));
            assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()), "{color}");
        }
        let mut sorted = COLORS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), COLORS.len());
    }

    #[test]
    fn test_font_families_include_icon_font() {
        assert!(FONT_FAMILIES.iter().any(|(label, _)| *label == ICON_FONT_FAMILY));
        assert!(FONT_FAMILIES.iter().all(|(_, css)| css.ends_with("serif")));
    }

    #[test]
    fn test_icon_lookup() {
        assert_eq!(icon_glyph("sos"), Some("🆘"));
        assert_eq!(icon_glyph("phone"), Some("📞"));
        assert_eq!(icon_glyph("unicorn"), None);
    }
}

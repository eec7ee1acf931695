//! Scene to SVG conversion.
//!
//! Every element is emitted as a group translated to its position, then
//! rotated and scaled about that origin. Rectangles and images are drawn
//! centered on the origin; text hangs from its top-left corner.

use std::f32::consts::PI;
use std::fmt::Write;

use sticker_core::constants::CANVAS_SIZE;
use sticker_core::element::{clamp_star_points, ARROW_POINTER_LENGTH};
use sticker_core::{Element, ElementKind, Scene};

use crate::image::{data_uri, encode_png};

/// Stroke color of the selection frame and its anchors.
const SELECTION_COLOR: &str = "#00a1ff";

/// Edge length of a transform anchor.
const ANCHOR_SIZE: f32 = 10.0;

/// Options for [`render_scene_svg`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgOptions {
    /// Output pixels per canvas unit.
    pub scale: f32,
    /// Background color as RGBA bytes.
    pub background: [u8; 4],
    /// Draw the selection frame around the selected element.
    pub show_selection: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: [255, 255, 255, 255],
            show_selection: true,
        }
    }
}

/// Render a scene to an SVG document.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn render_scene_svg(scene: &Scene, options: &SvgOptions) -> String {
    let out = (CANVAS_SIZE * options.scale).round().max(1.0) as u32;

    let mut svg = String::with_capacity(4096);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out}\" height=\"{out}\" viewBox=\"0 0 {CANVAS_SIZE} {CANVAS_SIZE}\">",
    );

    let bg = &options.background;
    let _ = write!(
        svg,
        "<rect width=\"100%\" height=\"100%\" fill=\"rgb({},{},{})\" fill-opacity=\"{}\"/>",
        bg[0],
        bg[1],
        bg[2],
        f32::from(bg[3]) / 255.0,
    );

    for element in &scene.elements {
        render_element_svg(&mut svg, element);
    }

    if options.show_selection {
        if let Some(element) = scene.selected_element() {
            render_selection_svg(&mut svg, element);
        }
    }

    svg.push_str("</svg>");
    svg
}

fn open_group(svg: &mut String, element: &Element) {
    let _ = write!(
        svg,
        "<g transform=\"translate({} {}) rotate({}) scale({} {})\">",
        element.x, element.y, element.rotation, element.scale_x, element.scale_y,
    );
}

/// `fill`/`stroke` attributes for an element.
fn paint_attrs(element: &Element) -> String {
    let mut attrs = format!(" fill=\"{}\"", paint(&element.fill));
    if let Some(stroke) = &element.stroke {
        let width = element.stroke_width.unwrap_or(1.0);
        let _ = write!(
            attrs,
            " stroke=\"{}\" stroke-width=\"{width}\"",
            paint(stroke)
        );
    }
    attrs
}

fn paint(color: &str) -> String {
    if color.eq_ignore_ascii_case("transparent") || color.is_empty() {
        "none".to_string()
    } else {
        escape_xml(color)
    }
}

/// Render a single element to SVG.
fn render_element_svg(svg: &mut String, element: &Element) {
    match &element.kind {
        ElementKind::Rectangle {
            width,
            height,
            border_style,
        } => {
            open_group(svg, element);
            let mut extra = String::new();
            if let Some(style) = border_style {
                let radius = style.corner_radius();
                if radius > 0.0 {
                    let _ = write!(extra, " rx=\"{radius}\" ry=\"{radius}\"");
                }
                if let Some((dash, gap)) = style.dash_pattern() {
                    let _ = write!(extra, " stroke-dasharray=\"{dash} {gap}\"");
                }
            }
            let _ = write!(
                svg,
                "<rect x=\"{}\" y=\"{}\" width=\"{width}\" height=\"{height}\"{}{extra}/></g>",
                -width / 2.0,
                -height / 2.0,
                paint_attrs(element),
            );
        }

        ElementKind::Circle { radius } => {
            open_group(svg, element);
            let _ = write!(
                svg,
                "<circle cx=\"0\" cy=\"0\" r=\"{radius}\"{}/></g>",
                paint_attrs(element),
            );
        }

        ElementKind::Star {
            num_points,
            inner_radius,
            outer_radius,
        } => {
            let points = star_points(*num_points, *inner_radius, *outer_radius);
            open_group(svg, element);
            let _ = write!(
                svg,
                "<polygon points=\"{}\"{}/></g>",
                format_points(&points),
                paint_attrs(element),
            );
        }

        ElementKind::Triangle { radius } => {
            let points = regular_polygon(3, *radius);
            open_group(svg, element);
            let _ = write!(
                svg,
                "<polygon points=\"{}\"{}/></g>",
                format_points(&points),
                paint_attrs(element),
            );
        }

        ElementKind::Arrow { points } => {
            let coords: Vec<(f32, f32)> = points.chunks_exact(2).map(|p| (p[0], p[1])).collect();
            if coords.len() < 2 {
                return;
            }
            open_group(svg, element);
            let stroke = element.stroke.as_deref().unwrap_or(&element.fill);
            let width = element.stroke_width.unwrap_or(1.0);
            let _ = write!(
                svg,
                "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{width}\"/>",
                format_points(&coords),
                paint(stroke),
            );
            let head = arrow_head(coords[coords.len() - 2], coords[coords.len() - 1]);
            let _ = write!(
                svg,
                "<polygon points=\"{}\"{}/></g>",
                format_points(&head),
                paint_attrs(element),
            );
        }

        ElementKind::Text {
            text,
            font_size,
            font_family,
            font_style,
            ..
        } => {
            open_group(svg, element);
            let weight = match font_style.as_deref() {
                Some(style) if style.contains("bold") => " font-weight=\"bold\"",
                _ => "",
            };
            let italic = match font_style.as_deref() {
                Some(style) if style.contains("italic") => " font-style=\"italic\"",
                _ => "",
            };
            let _ = write!(
                svg,
                "<text x=\"0\" y=\"{}\" font-size=\"{font_size}\" font-family=\"{}\"{weight}{italic}{}>{}</text></g>",
                font_size * 0.8,
                escape_xml(font_family),
                paint_attrs(element),
                escape_xml(text),
            );
        }

        ElementKind::Image {
            width,
            height,
            image_src,
            image,
        } => {
            let href = match image {
                Some(handle) => match encode_png(handle.image()) {
                    Ok(png) => data_uri(&png),
                    Err(e) => {
                        tracing::warn!(id = %element.id, error = %e, "Skipping unencodable image");
                        return;
                    }
                },
                None if image_src.is_data_uri() => image_src.as_str().to_string(),
                None => {
                    tracing::debug!(id = %element.id, "Image has no pixels, skipping");
                    return;
                }
            };
            open_group(svg, element);
            let _ = write!(
                svg,
                "<image x=\"{}\" y=\"{}\" width=\"{width}\" height=\"{height}\" preserveAspectRatio=\"none\" href=\"{}\"/></g>",
                -width / 2.0,
                -height / 2.0,
                escape_xml(&href),
            );
        }
    }
}

/// Selection frame with eight resize anchors around an element's box.
fn render_selection_svg(svg: &mut String, element: &Element) {
    let b = element.bounds();
    let _ = write!(
        svg,
        "<g class=\"selection\"><rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{SELECTION_COLOR}\" stroke-width=\"1\"/>",
        b.x, b.y, b.width, b.height,
    );
    let xs = [b.x, b.x + b.width / 2.0, b.x + b.width];
    let ys = [b.y, b.y + b.height / 2.0, b.y + b.height];
    for (i, &x) in xs.iter().enumerate() {
        for (j, &y) in ys.iter().enumerate() {
            if i == 1 && j == 1 {
                continue;
            }
            let _ = write!(
                svg,
                "<rect x=\"{}\" y=\"{}\" width=\"{ANCHOR_SIZE}\" height=\"{ANCHOR_SIZE}\" fill=\"#ffffff\" stroke=\"{SELECTION_COLOR}\" stroke-width=\"1\"/>",
                x - ANCHOR_SIZE / 2.0,
                y - ANCHOR_SIZE / 2.0,
            );
        }
    }
    svg.push_str("</g>");
}

/// Vertices of a star, first outer point straight up.
#[allow(clippy::cast_precision_loss)]
fn star_points(num_points: u32, inner: f32, outer: f32) -> Vec<(f32, f32)> {
    let n = clamp_star_points(num_points);
    (0..n.saturating_mul(2))
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let angle = i as f32 * PI / n as f32;
            (radius * angle.sin(), -radius * angle.cos())
        })
        .collect()
}

/// Vertices of a regular polygon, first vertex straight up.
#[allow(clippy::cast_precision_loss)]
fn regular_polygon(sides: u32, radius: f32) -> Vec<(f32, f32)> {
    (0..sides)
        .map(|i| {
            let angle = i as f32 * 2.0 * PI / sides as f32;
            (radius * angle.sin(), -radius * angle.cos())
        })
        .collect()
}

/// Triangle with its tip on `to`, pointing away from `from`.
fn arrow_head(from: (f32, f32), to: (f32, f32)) -> [(f32, f32); 3] {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = dx.hypot(dy);
    let (ux, uy) = if len > f32::EPSILON {
        (dx / len, dy / len)
    } else {
        (1.0, 0.0)
    };
    let half = ARROW_POINTER_LENGTH / 2.0;
    let base = (
        to.0 - ux * ARROW_POINTER_LENGTH,
        to.1 - uy * ARROW_POINTER_LENGTH,
    );
    [
        to,
        (base.0 - uy * half, base.1 + ux * half),
        (base.0 + uy * half, base.1 - ux * half),
    ]
}

fn format_points(points: &[(f32, f32)]) -> String {
    let mut out = String::with_capacity(points.len() * 12);
    for (i, (x, y)) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{x},{y}");
    }
    out
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

//! Constructors for every element the editor tools can place.
//!
//! All factories position the new element at the canvas center and give it
//! identity transforms (rotation 0, scale 1).

use crate::constants::{
    icon_glyph, BORDER_MARGIN, CANVAS_SIZE, DEFAULT_STROKE_WIDTH, ICON_FONT_FAMILY,
    ICON_FONT_SIZE, ICON_PLACEHOLDER, IMAGE_MAX_SIZE, TRANSPARENT,
};
use crate::element::{
    BorderStyle, Element, ElementId, ElementKind, FrameStyle, ImageSource, RasterHandle, ShapeKind,
};

/// Generate a fresh element id.
#[must_use]
pub fn generate_id() -> ElementId {
    ElementId::new()
}

/// Create a shape with its default geometry.
#[must_use]
pub fn create_shape(kind: ShapeKind, fill: &str, stroke: &str) -> Element {
    let payload = match kind {
        ShapeKind::Rect => ElementKind::Rectangle {
            width: 80.0,
            height: 60.0,
            border_style: None,
        },
        ShapeKind::Circle => ElementKind::Circle { radius: 40.0 },
        ShapeKind::Star => ElementKind::Star {
            num_points: 5,
            inner_radius: 20.0,
            outer_radius: 40.0,
        },
        ShapeKind::Triangle => ElementKind::Triangle { radius: 40.0 },
        ShapeKind::Arrow => ElementKind::Arrow {
            points: vec![0.0, 0.0, 60.0, 0.0],
        },
    };
    Element::new(payload)
        .with_fill(fill)
        .with_stroke(stroke, DEFAULT_STROKE_WIDTH)
}

/// Create a text run.
#[must_use]
pub fn create_text(text: &str, fill: &str, font_size: f32, font_family: &str) -> Element {
    Element::new(ElementKind::Text {
        text: text.to_string(),
        font_size,
        font_family: font_family.to_string(),
        font_style: None,
        icon_type: None,
    })
    .with_fill(fill)
}

/// Create an icon glyph from its symbolic token.
///
/// Unknown tokens render as a placeholder dot instead of failing.
#[must_use]
pub fn create_icon(icon_token: &str, fill: &str) -> Element {
    let glyph = icon_glyph(icon_token).unwrap_or(ICON_PLACEHOLDER);
    Element::new(ElementKind::Text {
        text: glyph.to_string(),
        font_size: ICON_FONT_SIZE,
        font_family: ICON_FONT_FAMILY.to_string(),
        font_style: None,
        icon_type: Some(icon_token.to_string()),
    })
    .with_fill(fill)
}

/// Create a frame that spans the canvas minus a margin.
#[must_use]
pub fn create_border(style: FrameStyle, stroke: &str) -> Element {
    let border_style = BorderStyle::from(style);
    let stroke_width = if border_style == BorderStyle::Double {
        6.0
    } else {
        3.0
    };
    Element::new(ElementKind::Rectangle {
        width: CANVAS_SIZE - BORDER_MARGIN,
        height: CANVAS_SIZE - BORDER_MARGIN,
        border_style: Some(border_style),
    })
    .with_fill(TRANSPARENT)
    .with_stroke(stroke, stroke_width)
}

/// Create an image element sized to fit a 150-unit box.
#[must_use]
pub fn create_image(raster: RasterHandle, source: ImageSource) -> Element {
    let (width, height) = fit_image(raster.width(), raster.height());
    Element::new(ElementKind::Image {
        width,
        height,
        image_src: source,
        image: Some(raster),
    })
    .with_fill(TRANSPARENT)
}

/// Scale pixel dimensions so the longer side equals [`IMAGE_MAX_SIZE`].
#[allow(clippy::cast_precision_loss)]
fn fit_image(width: u32, height: u32) -> (f32, f32) {
    if width == 0 || height == 0 {
        return (IMAGE_MAX_SIZE, IMAGE_MAX_SIZE);
    }
    let aspect = width as f32 / height as f32;
    if aspect > 1.0 {
        (IMAGE_MAX_SIZE, IMAGE_MAX_SIZE / aspect)
    } else {
        (IMAGE_MAX_SIZE * aspect, IMAGE_MAX_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::RasterImage;

    fn raster(width: u32, height: u32) -> RasterHandle {
        RasterHandle::new(RasterImage {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        })
    }

    #[test]
    fn test_rect_defaults() {
        let element = create_shape(ShapeKind::Rect, "#3b82f6", "#000000");
        assert_eq!(
            element.kind,
            ElementKind::Rectangle {
                width: 80.0,
                height: 60.0,
                border_style: None
            }
        );
        assert!(element.rotation.abs() < f32::EPSILON);
        assert!((element.scale_x - 1.0).abs() < f32::EPSILON);
        assert!((element.scale_y - 1.0).abs() < f32::EPSILON);
        assert_eq!(element.fill, "#3b82f6");
        assert_eq!(element.stroke.as_deref(), Some("#000000"));
        assert!((element.x - 200.0).abs() < f32::EPSILON);
        assert!((element.y - 200.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_shape_geometry_defaults() {
        let circle = create_shape(ShapeKind::Circle, "#fff", "#000");
        assert_eq!(circle.kind, ElementKind::Circle { radius: 40.0 });

        let star = create_shape(ShapeKind::Star, "#fff", "#000");
        assert_eq!(
            star.kind,
            ElementKind::Star {
                num_points: 5,
                inner_radius: 20.0,
                outer_radius: 40.0
            }
        );

        let triangle = create_shape(ShapeKind::Triangle, "#fff", "#000");
        assert_eq!(triangle.kind, ElementKind::Triangle { radius: 40.0 });

        let arrow = create_shape(ShapeKind::Arrow, "#fff", "#000");
        assert_eq!(
            arrow.kind,
            ElementKind::Arrow {
                points: vec![0.0, 0.0, 60.0, 0.0]
            }
        );
    }

    #[test]
    fn test_text_defaults() {
        let element = create_text("SCAN ME", "#000000", 24.0, "Arial, sans-serif");
        assert!(element.rotation.abs() < f32::EPSILON);
        assert!((element.scale_x - 1.0).abs() < f32::EPSILON);
        match element.kind {
            ElementKind::Text {
                text, font_size, ..
            } => {
                assert_eq!(text, "SCAN ME");
                assert!((font_size - 24.0).abs() < f32::EPSILON);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_icon_lookup_and_placeholder() {
        let sos = create_icon("sos", "#ef4444");
        let unknown = create_icon("dragon", "#ef4444");
        match (&sos.kind, &unknown.kind) {
            (
                ElementKind::Text {
                    text: a,
                    icon_type: ta,
                    font_size,
                    ..
                },
                ElementKind::Text {
                    text: b,
                    icon_type: tb,
                    ..
                },
            ) => {
                assert_eq!(a, "🆘");
                assert_eq!(ta.as_deref(), Some("sos"));
                assert!((font_size - 48.0).abs() < f32::EPSILON);
                assert_eq!(b, "●");
                assert_eq!(tb.as_deref(), Some("dragon"));
            }
            other => panic!("expected text icons, got {other:?}"),
        }
    }

    #[test]
    fn test_border_styles() {
        let double = create_border(FrameStyle::Double, "#ef4444");
        assert_eq!(double.stroke_width, Some(6.0));
        assert_eq!(double.fill, "transparent");

        let rounded = create_border(FrameStyle::Rounded, "#ef4444");
        assert_eq!(rounded.stroke_width, Some(3.0));
        assert_eq!(
            rounded.kind,
            ElementKind::Rectangle {
                width: 360.0,
                height: 360.0,
                border_style: Some(BorderStyle::Solid)
            }
        );
    }

    #[test]
    fn test_image_preserves_aspect_ratio() {
        let wide = create_image(raster(300, 100), ImageSource::new("data:a"));
        match wide.kind {
            ElementKind::Image { width, height, .. } => {
                assert!((width - 150.0).abs() < f32::EPSILON);
                assert!((height - 50.0).abs() < 1e-4);
            }
            other => panic!("expected image, got {other:?}"),
        }

        let tall = create_image(raster(100, 200), ImageSource::new("data:b"));
        match tall.kind {
            ElementKind::Image { width, height, .. } => {
                assert!((width - 75.0).abs() < 1e-4);
                assert!((height - 150.0).abs() < f32::EPSILON);
            }
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn test_square_image_fills_box() {
        let square = create_image(raster(10, 10), ImageSource::new("data:c"));
        assert!(square.raster().is_some());
        let (w, h) = square.natural_size();
        assert!((w - 150.0).abs() < f32::EPSILON);
        assert!((h - 150.0).abs() < f32::EPSILON);
    }
}

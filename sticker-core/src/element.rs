//! Canvas elements - the building blocks of a sticker.
//!
//! An [`Element`] carries the attributes every object on the canvas shares
//! (position, rotation, scale, fill, stroke) plus an [`ElementKind`] payload
//! holding the attributes that only make sense for one kind of object.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::now_ms;
use crate::constants::CANVAS_SIZE;
use crate::error::CanvasError;

/// Approximate advance of one glyph relative to the font size.
const GLYPH_WIDTH_RATIO: f32 = 0.6;

/// Length of the arrow head drawn at the end of an arrow.
pub const ARROW_POINTER_LENGTH: f32 = 10.0;

/// Fewest points a star can have.
pub const MIN_STAR_POINTS: u32 = 2;

/// Most points a star can have.
pub const MAX_STAR_POINTS: u32 = 100;

/// Clamp a star point count into `MIN_STAR_POINTS..=MAX_STAR_POINTS`.
#[must_use]
pub const fn clamp_star_points(n: u32) -> u32 {
    if n < MIN_STAR_POINTS {
        MIN_STAR_POINTS
    } else if n > MAX_STAR_POINTS {
        MAX_STAR_POINTS
    } else {
        n
    }
}

fn deserialize_star_points<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    u32::deserialize(deserializer).map(clamp_star_points)
}

/// Unique identifier for an element.
///
/// Ids are opaque strings of the form `el_<millis>_<suffix>` so they stay
/// compatible with documents created by the browser editor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("el_{}_{}", now_ms(), &suffix[..9]))
    }

    /// Wrap an existing id string.
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Dash pattern of a rectangle used as a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// Continuous line with rounded corners.
    Solid,
    /// Long dashes.
    Dashed,
    /// Short dots.
    Dotted,
    /// Heavy double-weight line.
    Double,
}

impl BorderStyle {
    /// Dash pattern as `(dash, gap)` lengths, if the style is dashed.
    #[must_use]
    pub const fn dash_pattern(self) -> Option<(f32, f32)> {
        match self {
            Self::Dashed => Some((10.0, 5.0)),
            Self::Dotted => Some((2.0, 3.0)),
            Self::Solid | Self::Double => None,
        }
    }

    /// Corner radius applied when painting the frame.
    #[must_use]
    pub const fn corner_radius(self) -> f32 {
        match self {
            Self::Solid => 8.0,
            Self::Dashed | Self::Dotted | Self::Double => 0.0,
        }
    }
}

/// Frame styles offered by the border tool.
///
/// `Rounded` is not a dash pattern of its own: it is stored as
/// [`BorderStyle::Solid`], whose corners are rounded at paint time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameStyle {
    /// Plain frame.
    Solid,
    /// Dashed frame.
    Dashed,
    /// Dotted frame.
    Dotted,
    /// Rounded frame.
    Rounded,
    /// Double-weight frame.
    Double,
}

impl From<FrameStyle> for BorderStyle {
    fn from(style: FrameStyle) -> Self {
        match style {
            FrameStyle::Solid | FrameStyle::Rounded => Self::Solid,
            FrameStyle::Dashed => Self::Dashed,
            FrameStyle::Dotted => Self::Dotted,
            FrameStyle::Double => Self::Double,
        }
    }
}

impl FromStr for FrameStyle {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            "rounded" => Ok(Self::Rounded),
            "double" => Ok(Self::Double),
            _ => Err(CanvasError::UnknownBorderStyle(s.to_string())),
        }
    }
}

/// Shapes offered by the shape tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle.
    Rect,
    /// Circle.
    Circle,
    /// Multi-pointed star.
    Star,
    /// Equilateral triangle.
    Triangle,
    /// Straight arrow.
    Arrow,
}

impl FromStr for ShapeKind {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rect" | "rectangle" => Ok(Self::Rect),
            "circle" => Ok(Self::Circle),
            "star" => Ok(Self::Star),
            "triangle" => Ok(Self::Triangle),
            "arrow" => Ok(Self::Arrow),
            _ => Err(CanvasError::UnknownShape(s.to_string())),
        }
    }
}

/// Decoded RGBA8 pixels of an uploaded image.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA pixel data (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// Shared, in-memory handle to a decoded image.
///
/// Handles live only in the running editor. They are never serialized and
/// compare by identity, not by pixel content.
#[derive(Debug, Clone)]
pub struct RasterHandle(Arc<RasterImage>);

impl RasterHandle {
    /// Wrap decoded pixels in a handle.
    #[must_use]
    pub fn new(image: RasterImage) -> Self {
        Self(Arc::new(image))
    }

    /// Width of the decoded image in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.0.width
    }

    /// Height of the decoded image in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.0.height
    }

    /// Borrow the decoded image.
    #[must_use]
    pub fn image(&self) -> &RasterImage {
        &self.0
    }
}

impl PartialEq for RasterHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Durable description of where an image came from, usually a `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageSource(String);

impl ImageSource {
    /// Wrap a source descriptor.
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self(src.into())
    }

    /// Borrow the descriptor.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the descriptor embeds its data inline.
    #[must_use]
    pub fn is_data_uri(&self) -> bool {
        self.0.starts_with("data:")
    }
}

/// The kind-specific payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ElementKind {
    /// A rectangle, optionally acting as a frame.
    #[serde(rename = "rect")]
    Rectangle {
        /// Width in canvas units.
        width: f32,
        /// Height in canvas units.
        height: f32,
        /// Frame dash pattern, set only on borders.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        border_style: Option<BorderStyle>,
    },

    /// A circle centered on the element position.
    Circle {
        /// Radius in canvas units.
        radius: f32,
    },

    /// A star centered on the element position.
    Star {
        /// Number of outer points.
        #[serde(deserialize_with = "deserialize_star_points")]
        num_points: u32,
        /// Radius of the inner vertices.
        inner_radius: f32,
        /// Radius of the outer vertices.
        outer_radius: f32,
    },

    /// An equilateral triangle centered on the element position.
    Triangle {
        /// Circumradius in canvas units.
        radius: f32,
    },

    /// An arrow along a polyline relative to the element position.
    Arrow {
        /// Flat `[x0, y0, x1, y1, ...]` coordinate list.
        points: Vec<f32>,
    },

    /// A text run; icons are text runs holding a single glyph.
    Text {
        /// Text content.
        text: String,
        /// Font size in canvas units.
        font_size: f32,
        /// CSS font family list.
        font_family: String,
        /// CSS font style, e.g. `bold`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font_style: Option<String>,
        /// Icon token this glyph was created from.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon_type: Option<String>,
    },

    /// A raster image.
    Image {
        /// Width in canvas units.
        width: f32,
        /// Height in canvas units.
        height: f32,
        /// Durable source descriptor.
        image_src: ImageSource,
        /// Decoded pixels, present only in the live scene.
        #[serde(skip)]
        image: Option<RasterHandle>,
    },
}

impl ElementKind {
    /// Wire name of the kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rectangle { .. } => "rect",
            Self::Circle { .. } => "circle",
            Self::Star { .. } => "star",
            Self::Triangle { .. } => "triangle",
            Self::Arrow { .. } => "arrow",
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
        }
    }
}

/// Axis-aligned bounding box in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Bounds {
    /// Check whether a point lies inside the box (edges inclusive).
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

const fn default_scale() -> f32 {
    1.0
}

/// A canvas element with shared attributes and a kind payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// X position in canvas units.
    pub x: f32,
    /// Y position in canvas units.
    pub y: f32,
    /// Rotation in degrees, applied about the element's own center.
    #[serde(default)]
    pub rotation: f32,
    /// Horizontal scale factor.
    #[serde(default = "default_scale")]
    pub scale_x: f32,
    /// Vertical scale factor.
    #[serde(default = "default_scale")]
    pub scale_y: f32,
    /// Fill color (CSS color string).
    pub fill: String,
    /// Stroke color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Stroke width in canvas units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f32>,
    /// Kind-specific attributes.
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    /// Create a new element with the given kind, centered on the canvas.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            x: CANVAS_SIZE / 2.0,
            y: CANVAS_SIZE / 2.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            fill: "#000000".to_string(),
            stroke: None,
            stroke_width: None,
            kind,
        }
    }

    /// Set the position.
    #[must_use]
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the fill color.
    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Set the stroke color and width.
    #[must_use]
    pub fn with_stroke(mut self, stroke: impl Into<String>, width: f32) -> Self {
        self.stroke = Some(stroke.into());
        self.stroke_width = Some(width);
        self
    }

    /// Replace the identifier.
    #[must_use]
    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }

    /// The decoded raster bound to an image element, if any.
    #[must_use]
    pub fn raster(&self) -> Option<&RasterHandle> {
        match &self.kind {
            ElementKind::Image { image, .. } => image.as_ref(),
            _ => None,
        }
    }

    /// Bind decoded pixels to an image element.
    ///
    /// Returns `false` (and drops the handle) for every other kind.
    pub fn attach_raster(&mut self, handle: RasterHandle) -> bool {
        match &mut self.kind {
            ElementKind::Image { image, .. } => {
                *image = Some(handle);
                true
            }
            _ => false,
        }
    }

    /// A copy of this element without any in-memory raster handle.
    #[must_use]
    pub fn detached(&self) -> Self {
        let mut copy = self.clone();
        if let ElementKind::Image { image, .. } = &mut copy.kind {
            *image = None;
        }
        copy
    }

    /// Compare every attribute except the identifier and raster handle.
    #[must_use]
    pub fn same_attributes(&self, other: &Self) -> bool {
        let mut mine = self.detached();
        mine.id = other.id.clone();
        mine == other.detached()
    }

    /// Unscaled size of the element's box.
    #[must_use]
    pub fn natural_size(&self) -> (f32, f32) {
        match &self.kind {
            ElementKind::Rectangle { width, height, .. } | ElementKind::Image { width, height, .. } => {
                (*width, *height)
            }
            ElementKind::Circle { radius } | ElementKind::Triangle { radius } => {
                (radius * 2.0, radius * 2.0)
            }
            ElementKind::Star { outer_radius, .. } => (outer_radius * 2.0, outer_radius * 2.0),
            ElementKind::Arrow { points } => {
                let (min_x, min_y, max_x, max_y) = point_extent(points);
                (
                    max_x - min_x + ARROW_POINTER_LENGTH,
                    (max_y - min_y).max(ARROW_POINTER_LENGTH),
                )
            }
            ElementKind::Text {
                text, font_size, ..
            } => {
                #[allow(clippy::cast_precision_loss)]
                let chars = text.chars().count() as f32;
                (chars * font_size * GLYPH_WIDTH_RATIO, *font_size)
            }
        }
    }

    /// Scaled bounding box in canvas coordinates, ignoring rotation.
    ///
    /// Rectangles, images and the polygon shapes are anchored at their center;
    /// text is anchored at its top-left corner and arrows at their first point.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let (w, h) = self.natural_size();
        let sx = self.scale_x.abs();
        let sy = self.scale_y.abs();
        match &self.kind {
            ElementKind::Text { .. } => Bounds {
                x: self.x,
                y: self.y,
                width: w * sx,
                height: h * sy,
            },
            ElementKind::Arrow { points } => {
                let (min_x, min_y, _, _) = point_extent(points);
                Bounds {
                    x: self.x + min_x * sx,
                    y: self.y + min_y * sy - ARROW_POINTER_LENGTH / 2.0 * sy,
                    width: w * sx,
                    height: h * sy,
                }
            }
            _ => Bounds {
                x: self.x - w * sx / 2.0,
                y: self.y - h * sy / 2.0,
                width: w * sx,
                height: h * sy,
            },
        }
    }

    /// Check if a point (in canvas coordinates) is within this element.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        self.bounds().contains(x, y)
    }

    /// Merge a partial attribute set into this element.
    ///
    /// Kind-specific fields that this element's kind does not carry are
    /// ignored.
    pub fn apply_patch(&mut self, patch: &ElementPatch) {
        assign(&mut self.x, patch.x);
        assign(&mut self.y, patch.y);
        assign(&mut self.rotation, patch.rotation);
        assign(&mut self.scale_x, patch.scale_x);
        assign(&mut self.scale_y, patch.scale_y);
        if let Some(fill) = &patch.fill {
            self.fill.clone_from(fill);
        }
        if let Some(stroke) = &patch.stroke {
            self.stroke = Some(stroke.clone());
        }
        if let Some(width) = patch.stroke_width {
            self.stroke_width = Some(width);
        }

        match &mut self.kind {
            ElementKind::Rectangle {
                width,
                height,
                border_style,
            } => {
                assign(width, patch.width);
                assign(height, patch.height);
                if let Some(style) = patch.border_style {
                    *border_style = Some(style);
                }
            }
            ElementKind::Image { width, height, .. } => {
                assign(width, patch.width);
                assign(height, patch.height);
            }
            ElementKind::Circle { radius } | ElementKind::Triangle { radius } => {
                assign(radius, patch.radius);
            }
            ElementKind::Star {
                num_points,
                inner_radius,
                outer_radius,
            } => {
                if let Some(n) = patch.num_points {
                    *num_points = clamp_star_points(n);
                }
                assign(inner_radius, patch.inner_radius);
                assign(outer_radius, patch.outer_radius);
            }
            ElementKind::Arrow { points } => {
                if let Some(new_points) = &patch.points {
                    points.clone_from(new_points);
                }
            }
            ElementKind::Text {
                text,
                font_size,
                font_family,
                font_style,
                ..
            } => {
                if let Some(new_text) = &patch.text {
                    text.clone_from(new_text);
                }
                assign(font_size, patch.font_size);
                if let Some(family) = &patch.font_family {
                    font_family.clone_from(family);
                }
                if let Some(style) = &patch.font_style {
                    *font_style = Some(style.clone());
                }
            }
        }
    }
}

fn assign(slot: &mut f32, value: Option<f32>) {
    if let Some(v) = value {
        *slot = v;
    }
}

/// `(min_x, min_y, max_x, max_y)` over a flat coordinate list.
fn point_extent(points: &[f32]) -> (f32, f32, f32, f32) {
    if points.len() < 2 {
        return (0.0, 0.0, 0.0, 0.0);
    }
    points.chunks_exact(2).fold(
        (f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        |(min_x, min_y, max_x, max_y), p| {
            (min_x.min(p[0]), min_y.min(p[1]), max_x.max(p[0]), max_y.max(p[1]))
        },
    )
}

/// A partial set of element attributes, as produced by property panels and
/// interaction gestures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ElementPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub rotation: Option<f32>,
    pub scale_x: Option<f32>,
    pub scale_y: Option<f32>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub radius: Option<f32>,
    pub num_points: Option<u32>,
    pub inner_radius: Option<f32>,
    pub outer_radius: Option<f32>,
    pub points: Option<Vec<f32>>,
    pub text: Option<String>,
    pub font_size: Option<f32>,
    pub font_family: Option<String>,
    pub font_style: Option<String>,
    pub border_style: Option<BorderStyle>,
}

impl ElementPatch {
    /// Patch that moves an element.
    #[must_use]
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Patch carrying the full result of a resize/rotate gesture.
    #[must_use]
    pub fn transform(x: f32, y: f32, rotation: f32, scale_x: f32, scale_y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            rotation: Some(rotation),
            scale_x: Some(scale_x),
            scale_y: Some(scale_y),
            ..Self::default()
        }
    }

    /// Patch that recolors the fill.
    #[must_use]
    pub fn fill(fill: impl Into<String>) -> Self {
        Self {
            fill: Some(fill.into()),
            ..Self::default()
        }
    }

    /// Patch that recolors the stroke.
    #[must_use]
    pub fn stroke(stroke: impl Into<String>) -> Self {
        Self {
            stroke: Some(stroke.into()),
            ..Self::default()
        }
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Element {
        Element::new(ElementKind::Rectangle {
            width: 80.0,
            height: 60.0,
            border_style: None,
        })
    }

    #[test]
    fn test_ids_are_unique_and_prefixed() {
        let a = ElementId::new();
        let b = ElementId::new();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("el_"));
        let suffix = a.as_str().rsplit('_').next().expect("suffix");
        assert_eq!(suffix.len(), 9);
    }

    #[test]
    fn test_rectangle_serializes_with_type_tag() {
        let element = rect().with_fill("#3b82f6").with_stroke("#000000", 2.0);
        let json = serde_json::to_value(&element).expect("serialize");
        assert_eq!(json["type"], "rect");
        assert_eq!(json["width"], 80.0);
        assert_eq!(json["scaleX"], 1.0);
        assert_eq!(json["strokeWidth"], 2.0);
        assert!(json.get("borderStyle").is_none());
    }

    #[test]
    fn test_deserialize_browser_document_element() {
        let json = r##"{"id":"el_1_abc","type":"star","x":10,"y":20,"fill":"#fff","numPoints":5,"innerRadius":20,"outerRadius":40}"##;
        let element: Element = serde_json::from_str(json).expect("deserialize");
        assert_eq!(element.id.as_str(), "el_1_abc");
        assert!((element.scale_x - 1.0).abs() < f32::EPSILON);
        assert!(matches!(
            element.kind,
            ElementKind::Star { num_points: 5, .. }
        ));
    }

    #[test]
    fn test_star_point_count_is_clamped() {
        let json = r##"{"id":"el_1_abc","type":"star","x":0,"y":0,"fill":"#fff","numPoints":4294967295,"innerRadius":20,"outerRadius":40}"##;
        let mut element: Element = serde_json::from_str(json).expect("deserialize");
        assert!(matches!(
            element.kind,
            ElementKind::Star {
                num_points: MAX_STAR_POINTS,
                ..
            }
        ));

        element.apply_patch(&ElementPatch {
            num_points: Some(0),
            ..ElementPatch::default()
        });
        assert!(matches!(
            element.kind,
            ElementKind::Star {
                num_points: MIN_STAR_POINTS,
                ..
            }
        ));
    }

    #[test]
    fn test_image_handle_is_not_serialized() {
        let mut element = Element::new(ElementKind::Image {
            width: 150.0,
            height: 100.0,
            image_src: ImageSource::new("data:image/png;base64,AAAA"),
            image: None,
        });
        element.attach_raster(RasterHandle::new(RasterImage {
            width: 3,
            height: 2,
            pixels: vec![0; 24],
        }));
        assert!(element.raster().is_some());

        let json = serde_json::to_string(&element).expect("serialize");
        assert!(json.contains("imageSrc"));
        let back: Element = serde_json::from_str(&json).expect("deserialize");
        assert!(back.raster().is_none());
        assert!(back.same_attributes(&element));
    }

    #[test]
    fn test_attach_raster_rejects_non_images() {
        let mut element = rect();
        let handle = RasterHandle::new(RasterImage {
            width: 1,
            height: 1,
            pixels: vec![0; 4],
        });
        assert!(!element.attach_raster(handle));
        assert!(element.raster().is_none());
    }

    #[test]
    fn test_patch_merges_only_given_fields() {
        let mut element = rect().with_fill("#ff0000");
        element.apply_patch(&ElementPatch::position(10.0, 15.0));
        assert!((element.x - 10.0).abs() < f32::EPSILON);
        assert!((element.y - 15.0).abs() < f32::EPSILON);
        assert_eq!(element.fill, "#ff0000");
        assert!((element.rotation).abs() < f32::EPSILON);
    }

    #[test]
    fn test_patch_ignores_fields_of_other_kinds() {
        let mut element = rect();
        let patch = ElementPatch {
            radius: Some(99.0),
            text: Some("nope".to_string()),
            width: Some(120.0),
            ..ElementPatch::default()
        };
        element.apply_patch(&patch);
        assert_eq!(
            element.kind,
            ElementKind::Rectangle {
                width: 120.0,
                height: 60.0,
                border_style: None
            }
        );
    }

    #[test]
    fn test_bounds_centered_and_scaled() {
        let mut element = rect().at(100.0, 100.0);
        element.scale_x = 2.0;
        let bounds = element.bounds();
        assert!((bounds.x - 20.0).abs() < f32::EPSILON);
        assert!((bounds.y - 70.0).abs() < f32::EPSILON);
        assert!((bounds.width - 160.0).abs() < f32::EPSILON);
        assert!(element.contains_point(100.0, 100.0));
        assert!(!element.contains_point(10.0, 100.0));
    }

    #[test]
    fn test_text_bounds_anchor_top_left() {
        let element = Element::new(ElementKind::Text {
            text: "ABCD".to_string(),
            font_size: 10.0,
            font_family: "Arial".to_string(),
            font_style: None,
            icon_type: None,
        })
        .at(50.0, 50.0);
        let bounds = element.bounds();
        assert!((bounds.x - 50.0).abs() < f32::EPSILON);
        assert!((bounds.width - 24.0).abs() < 1e-4);
    }

    #[test]
    fn test_shape_and_frame_parsing() {
        assert_eq!("rect".parse::<ShapeKind>().expect("rect"), ShapeKind::Rect);
        assert_eq!(
            "Triangle".parse::<ShapeKind>().expect("triangle"),
            ShapeKind::Triangle
        );
        assert!(matches!(
            "hexagon".parse::<ShapeKind>(),
            Err(CanvasError::UnknownShape(_))
        ));
        let rounded: FrameStyle = "rounded".parse().expect("rounded");
        assert_eq!(BorderStyle::from(rounded), BorderStyle::Solid);
    }
}

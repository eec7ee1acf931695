//! Built-in sticker templates.
//!
//! Templates are stored as partial element specs; [`DefaultTemplate::materialize`]
//! fills in the missing attributes and assigns fresh ids.

use crate::constants::{CANVAS_SIZE, DEFAULT_STROKE_WIDTH};
use crate::element::{Element, ElementKind};

/// Fill used when a template element does not name one.
const TEMPLATE_FILL: &str = "#ffffff";

/// Font family used when a template text does not name one.
const TEMPLATE_FONT_FAMILY: &str = "Arial, sans-serif";

/// Font size used when a template text does not name one.
const TEMPLATE_FONT_SIZE: f32 = 24.0;

/// Element kinds used by templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateShape {
    /// Rectangle.
    Rect,
    /// Circle.
    Circle,
    /// Text run.
    Text,
}

/// Partial description of one template element.
#[derive(Debug, Clone, Copy)]
#[allow(missing_docs)]
pub struct TemplateElement {
    pub shape: TemplateShape,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub radius: Option<f32>,
    pub fill: Option<&'static str>,
    pub stroke: Option<&'static str>,
    pub stroke_width: Option<f32>,
    pub text: Option<&'static str>,
    pub font_size: Option<f32>,
    pub font_family: Option<&'static str>,
    pub font_style: Option<&'static str>,
}

impl TemplateElement {
    const fn base(shape: TemplateShape) -> Self {
        Self {
            shape,
            x: None,
            y: None,
            width: None,
            height: None,
            radius: None,
            fill: None,
            stroke: None,
            stroke_width: None,
            text: None,
            font_size: None,
            font_family: None,
            font_style: None,
        }
    }

    const fn frame(fill: &'static str, stroke: &'static str, stroke_width: f32) -> Self {
        Self {
            x: Some(200.0),
            y: Some(200.0),
            width: Some(360.0),
            height: Some(360.0),
            fill: Some(fill),
            stroke: Some(stroke),
            stroke_width: Some(stroke_width),
            ..Self::base(TemplateShape::Rect)
        }
    }

    const fn label(y: f32, text: &'static str, font_size: f32, fill: &'static str) -> Self {
        Self {
            x: Some(200.0),
            y: Some(y),
            text: Some(text),
            font_size: Some(font_size),
            fill: Some(fill),
            ..Self::base(TemplateShape::Text)
        }
    }

    const fn bold(mut self) -> Self {
        self.font_style = Some("bold");
        self
    }

    /// Build a full element from this partial spec.
    #[must_use]
    pub fn materialize(&self) -> Element {
        let kind = match self.shape {
            TemplateShape::Rect => ElementKind::Rectangle {
                width: self.width.unwrap_or(80.0),
                height: self.height.unwrap_or(60.0),
                border_style: None,
            },
            TemplateShape::Circle => ElementKind::Circle {
                radius: self.radius.unwrap_or(40.0),
            },
            TemplateShape::Text => ElementKind::Text {
                text: self.text.unwrap_or_default().to_string(),
                font_size: self.font_size.unwrap_or(TEMPLATE_FONT_SIZE),
                font_family: self
                    .font_family
                    .unwrap_or(TEMPLATE_FONT_FAMILY)
                    .to_string(),
                font_style: self.font_style.map(str::to_string),
                icon_type: None,
            },
        };
        let mut element = Element::new(kind)
            .at(
                self.x.unwrap_or(CANVAS_SIZE / 2.0),
                self.y.unwrap_or(CANVAS_SIZE / 2.0),
            )
            .with_fill(self.fill.unwrap_or(TEMPLATE_FILL));
        element.stroke = self.stroke.map(str::to_string);
        element.stroke_width = Some(self.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH));
        element
    }
}

/// A named starting point for a sticker design.
#[derive(Debug, Clone, Copy)]
pub struct DefaultTemplate {
    /// Stable template id, sent along with saved designs.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Emoji shown next to the name.
    pub emoji: &'static str,
    /// Partial element specs, back to front.
    pub elements: &'static [TemplateElement],
}

impl DefaultTemplate {
    /// Build the template's elements with fresh ids.
    #[must_use]
    pub fn materialize(&self) -> Vec<Element> {
        self.elements.iter().map(TemplateElement::materialize).collect()
    }
}

/// The built-in template set.
pub const DEFAULT_TEMPLATES: &[DefaultTemplate] = &[
    DefaultTemplate {
        id: "emergency-basic",
        name: "Emergency Basic",
        emoji: "🆘",
        elements: &[
            TemplateElement::frame("#ffffff", "#ef4444", 8.0),
            TemplateElement::label(80.0, "🆘 EMERGENCY", 32.0, "#ef4444").bold(),
            TemplateElement::label(320.0, "SCAN FOR HELP", 24.0, "#000000"),
        ],
    },
    DefaultTemplate {
        id: "vehicle-info",
        name: "Vehicle Info",
        emoji: "🚗",
        elements: &[
            TemplateElement::frame("#1e293b", "#06b6d4", 4.0),
            TemplateElement::label(60.0, "🚗", 48.0, "#ffffff"),
            TemplateElement::label(120.0, "VEHICLE INFO", 28.0, "#06b6d4").bold(),
            TemplateElement::label(320.0, "Scan QR Code", 20.0, "#ffffff"),
        ],
    },
    DefaultTemplate {
        id: "bike-safety",
        name: "Bike Safety",
        emoji: "🏍️",
        elements: &[
            TemplateElement {
                x: Some(200.0),
                y: Some(200.0),
                radius: Some(180.0),
                fill: Some("#000000"),
                stroke: Some("#22c55e"),
                stroke_width: Some(6.0),
                ..TemplateElement::base(TemplateShape::Circle)
            },
            TemplateElement::label(80.0, "🏍️", 56.0, "#ffffff"),
            TemplateElement::label(160.0, "RIDER SAFETY", 24.0, "#22c55e").bold(),
            TemplateElement::label(300.0, "স্কেন কৰক", 22.0, "#ffffff"),
        ],
    },
    DefaultTemplate {
        id: "family-contact",
        name: "Family Contact",
        emoji: "👨‍👩‍👧",
        elements: &[
            TemplateElement::frame("#fef3c7", "#f59e0b", 4.0),
            TemplateElement::label(70.0, "👨‍👩‍👧‍👦", 48.0, "#000000"),
            TemplateElement::label(130.0, "FAMILY CONTACT", 24.0, "#92400e").bold(),
            TemplateElement::label(320.0, "জৰুৰীকালীন যোগাযোগ", 18.0, "#78350f"),
        ],
    },
];

/// Find a built-in template by id.
#[must_use]
pub fn find_template(id: &str) -> Option<&'static DefaultTemplate> {
    DEFAULT_TEMPLATES.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emergency_basic_contents() {
        let template = find_template("emergency-basic").expect("template exists");
        let elements = template.materialize();
        assert_eq!(elements.len(), 3);

        let frame = &elements[0];
        assert_eq!(
            frame.kind,
            ElementKind::Rectangle {
                width: 360.0,
                height: 360.0,
                border_style: None
            }
        );
        assert_eq!(frame.fill, "#ffffff");
        assert_eq!(frame.stroke.as_deref(), Some("#ef4444"));
        assert_eq!(frame.stroke_width, Some(8.0));

        let texts: Vec<_> = elements[1..]
            .iter()
            .filter_map(|e| match &e.kind {
                ElementKind::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, ["🆘 EMERGENCY", "SCAN FOR HELP"]);
    }

    #[test]
    fn test_text_defaults_applied() {
        let template = find_template("vehicle-info").expect("template exists");
        let elements = template.materialize();
        match &elements[2].kind {
            ElementKind::Text {
                font_family,
                font_style,
                ..
            } => {
                assert_eq!(font_family, "Arial, sans-serif");
                assert_eq!(font_style.as_deref(), Some("bold"));
            }
            other => panic!("expected text, got {other:?}"),
        }
        assert_eq!(elements[2].stroke_width, Some(2.0));
        assert!(elements[2].stroke.is_none());
    }

    #[test]
    fn test_materialize_assigns_fresh_ids() {
        let template = find_template("bike-safety").expect("template exists");
        let first = template.materialize();
        let second = template.materialize();
        for (a, b) in first.iter().zip(&second) {
            assert_ne!(a.id, b.id);
            assert!(a.same_attributes(b));
        }
    }

    #[test]
    fn test_template_ids_are_unique() {
        let mut ids: Vec<_> = DEFAULT_TEMPLATES.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), DEFAULT_TEMPLATES.len());
        assert!(find_template("missing").is_none());
    }
}

//! The live scene: ordered elements plus the current selection.

use serde::{Deserialize, Serialize};

use crate::{CanvasError, CanvasResult, Element, ElementId};

/// Elements in paint order (back to front) and the selected element.
///
/// Z-order is the sequence index; there is no separate depth field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Elements, back to front.
    pub elements: Vec<Element>,
    /// Selected element id; always refers to a present element when set.
    #[serde(default, rename = "selectedId")]
    pub selected: Option<ElementId>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from elements with no selection.
    #[must_use]
    pub fn from_elements(elements: Vec<Element>) -> Self {
        Self {
            elements,
            selected: None,
        }
    }

    /// Get an element by ID.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Get a mutable reference to an element by ID.
    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| &e.id == id)
    }

    /// Paint-order index of an element.
    #[must_use]
    pub fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| &e.id == id)
    }

    /// Whether an element with this id is present.
    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// The selected element, if any.
    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Find the topmost element at the given canvas coordinates.
    #[must_use]
    pub fn element_at(&self, x: f32, y: f32) -> Option<&ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.contains_point(x, y))
            .map(|e| &e.id)
    }

    /// Get the number of elements in the scene.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Check if the scene is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Serialize the scene to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CanvasResult<String> {
        serde_json::to_string(self).map_err(CanvasError::Serialization)
    }

    /// Deserialize a scene from JSON.
    ///
    /// A selection that points at no element is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let mut scene: Self = serde_json::from_str(json).map_err(CanvasError::Serialization)?;
        if let Some(id) = &scene.selected {
            if !scene.contains(id) {
                scene.selected = None;
            }
        }
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ShapeKind;
    use crate::factory::{create_shape, create_text};

    #[test]
    fn test_scene_lookup() {
        let a = create_shape(ShapeKind::Rect, "#fff", "#000");
        let b = create_text("Hi", "#000", 24.0, "Arial");
        let (a_id, b_id) = (a.id.clone(), b.id.clone());
        let scene = Scene::from_elements(vec![a, b]);

        assert_eq!(scene.element_count(), 2);
        assert_eq!(scene.index_of(&a_id), Some(0));
        assert_eq!(scene.index_of(&b_id), Some(1));
        assert!(scene.get(&ElementId::from("missing")).is_none());
        assert!(scene.selected_element().is_none());
    }

    #[test]
    fn test_element_at_prefers_topmost() {
        let back = create_shape(ShapeKind::Rect, "#fff", "#000");
        let front = create_shape(ShapeKind::Circle, "#fff", "#000");
        let front_id = front.id.clone();
        let scene = Scene::from_elements(vec![back, front]);

        assert_eq!(scene.element_at(200.0, 200.0), Some(&front_id));
        assert_eq!(scene.element_at(5.0, 5.0), None);
    }

    #[test]
    fn test_scene_json_roundtrip() {
        let element = create_shape(ShapeKind::Star, "#eab308", "#000");
        let id = element.id.clone();
        let mut scene = Scene::from_elements(vec![element]);
        scene.selected = Some(id.clone());

        let json = scene.to_json().expect("serialize");
        assert!(json.contains("selectedId"));
        let back = Scene::from_json(&json).expect("deserialize");
        assert_eq!(back, scene);
        assert_eq!(back.selected_element().map(|e| &e.id), Some(&id));
    }

    #[test]
    fn test_from_json_drops_dangling_selection() {
        let json = r#"{"elements":[],"selectedId":"el_0_gone"}"#;
        let scene = Scene::from_json(json).expect("deserialize");
        assert!(scene.selected.is_none());
        assert!(Scene::from_json("not json").is_err());
    }
}

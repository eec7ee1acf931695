//! WebAssembly bindings for sticker-core.
//!
//! This module provides JavaScript-callable functions when compiled to WASM.
//! Elements, patches and documents cross the boundary as JSON strings in the
//! same camelCase format the storage service uses.

use wasm_bindgen::prelude::*;

use crate::editor::{LayerDirection, SceneEditor};
use crate::element::{ElementId, ElementPatch, FrameStyle, ShapeKind};
use crate::factory::{create_border, create_icon, create_shape, create_text};
use crate::interaction::{InteractionAdapter, KeyEvent, KeyModifiers, NodeGeometry};
use crate::{CanvasResult, StickerDocument};

/// Initialize the sticker editor WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Editor instance for WASM.
#[wasm_bindgen]
pub struct WasmStickerEditor {
    editor: SceneEditor,
    input: InteractionAdapter,
}

#[wasm_bindgen]
impl WasmStickerEditor {
    /// Create a new editor with an empty scene.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            editor: SceneEditor::new(),
            input: InteractionAdapter::new(),
        }
    }

    /// Get the live scene (elements and selection) as JSON.
    #[wasm_bindgen(js_name = getSceneJson)]
    #[must_use]
    pub fn get_scene_json(&self) -> String {
        json_or_empty(self.editor.scene().to_json(), "scene")
    }

    /// Get the transport-safe document as JSON.
    #[wasm_bindgen(js_name = getDocumentJson)]
    #[must_use]
    pub fn get_document_json(&self) -> String {
        json_or_empty(self.editor.to_document().to_json(), "document")
    }

    /// Load a saved document serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the JSON is not a valid document.
    #[wasm_bindgen(js_name = loadDocument)]
    pub fn load_document(&mut self, json: &str) -> Result<(), String> {
        let document = StickerDocument::from_json(json).map_err(|e| e.to_string())?;
        self.editor.load_document(&document);
        Ok(())
    }

    /// Load a built-in template.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown template id.
    #[wasm_bindgen(js_name = loadTemplate)]
    pub fn load_template(&mut self, template_id: &str) -> Result<(), String> {
        self.editor
            .load_template_by_id(template_id)
            .map_err(|e| e.to_string())
    }

    /// Add a shape and return its id.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown shape name.
    #[wasm_bindgen(js_name = addShape)]
    pub fn add_shape(&mut self, kind: &str, fill: &str, stroke: &str) -> Result<String, String> {
        let kind: ShapeKind = kind.parse().map_err(|e: crate::CanvasError| e.to_string())?;
        Ok(self
            .editor
            .add_element(create_shape(kind, fill, stroke))
            .to_string())
    }

    /// Add a text run and return its id.
    #[wasm_bindgen(js_name = addText)]
    pub fn add_text(&mut self, text: &str, fill: &str, font_size: f32, font_family: &str) -> String {
        self.editor
            .add_element(create_text(text, fill, font_size, font_family))
            .to_string()
    }

    /// Add an icon glyph and return its id.
    #[wasm_bindgen(js_name = addIcon)]
    pub fn add_icon(&mut self, icon: &str, fill: &str) -> String {
        self.editor.add_element(create_icon(icon, fill)).to_string()
    }

    /// Add a frame behind all content and return its id.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown border style.
    #[wasm_bindgen(js_name = addBorder)]
    pub fn add_border(&mut self, style: &str, stroke: &str) -> Result<String, String> {
        let style: FrameStyle = style.parse().map_err(|e: crate::CanvasError| e.to_string())?;
        Ok(self
            .editor
            .add_element_at_back(create_border(style, stroke))
            .to_string())
    }

    /// Merge a JSON patch into an element.
    ///
    /// # Errors
    ///
    /// Returns an error string if the patch is not valid JSON.
    #[wasm_bindgen(js_name = updateElement)]
    pub fn update_element(&mut self, id: &str, patch_json: &str) -> Result<bool, String> {
        let patch: ElementPatch = serde_json::from_str(patch_json).map_err(|e| e.to_string())?;
        Ok(self.editor.update_element(&ElementId::from(id), &patch))
    }

    /// Delete an element.
    #[wasm_bindgen(js_name = deleteElement)]
    pub fn delete_element(&mut self, id: &str) -> bool {
        self.editor.delete_element(&ElementId::from(id))
    }

    /// Duplicate an element, returning the copy's id.
    #[wasm_bindgen(js_name = duplicateElement)]
    pub fn duplicate_element(&mut self, id: &str) -> Option<String> {
        self.editor
            .duplicate_element(&ElementId::from(id))
            .map(|id| id.to_string())
    }

    /// Move an element one step `up` or `down` in paint order.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown direction.
    #[wasm_bindgen(js_name = moveLayer)]
    pub fn move_layer(&mut self, id: &str, direction: &str) -> Result<bool, String> {
        let direction: LayerDirection = direction.parse()?;
        Ok(self.editor.move_layer(&ElementId::from(id), direction))
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.editor.clear();
    }

    /// Select an element, or clear the selection with `undefined`.
    pub fn select(&mut self, id: Option<String>) -> bool {
        let id = id.map(ElementId::from_string);
        self.editor.select(id.as_ref())
    }

    /// Selected element id.
    #[wasm_bindgen(js_name = selectedId)]
    #[must_use]
    pub fn selected_id(&self) -> Option<String> {
        self.editor.selected().map(ToString::to_string)
    }

    /// Step back in history.
    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    /// Step forward in history.
    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    /// Whether undo is available.
    #[wasm_bindgen(js_name = canUndo)]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    /// Whether redo is available.
    #[wasm_bindgen(js_name = canRedo)]
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    /// Whether there are unsaved changes.
    #[wasm_bindgen(js_name = isDirty)]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.editor.is_dirty()
    }

    /// Record a successful save.
    #[wasm_bindgen(js_name = markSaved)]
    pub fn mark_saved(&mut self) {
        self.editor.mark_saved();
    }

    /// Commit the end of a drag.
    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&mut self, id: &str, x: f32, y: f32) -> bool {
        self.input
            .drag_end(&mut self.editor, &ElementId::from(id), x, y)
    }

    /// Start a resize/rotate gesture.
    #[wasm_bindgen(js_name = beginTransform)]
    pub fn begin_transform(&mut self, id: &str) -> bool {
        self.input.begin_transform(&self.editor, &ElementId::from(id))
    }

    /// Offer intermediate geometry; returns the geometry to display as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the geometry is not valid JSON.
    #[wasm_bindgen(js_name = proposeTransform)]
    pub fn propose_transform(&mut self, geometry_json: &str) -> Result<Option<String>, String> {
        let proposed: NodeGeometry =
            serde_json::from_str(geometry_json).map_err(|e| e.to_string())?;
        self.input
            .propose_transform(&self.editor, proposed)
            .map(|g| serde_json::to_string(&g).map_err(|e| e.to_string()))
            .transpose()
    }

    /// Finish a resize/rotate gesture.
    #[wasm_bindgen(js_name = endTransform)]
    pub fn end_transform(&mut self) -> bool {
        self.input.end_transform(&mut self.editor)
    }

    /// Click at canvas coordinates; returns the selected id.
    #[wasm_bindgen(js_name = clickAt)]
    pub fn click_at(&mut self, x: f32, y: f32) -> Option<String> {
        self.input
            .click_at(&mut self.editor, x, y)
            .map(|id| id.to_string())
    }

    /// Handle a key press; returns whether the host should prevent the default.
    #[wasm_bindgen(js_name = handleKey)]
    #[allow(clippy::fn_params_excessive_bools)]
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        meta: bool,
        shift: bool,
        text_focused: bool,
    ) -> bool {
        let event = KeyEvent::new(
            key,
            KeyModifiers {
                shift,
                ctrl,
                alt: false,
                meta,
            },
        );
        self.input
            .handle_key(&mut self.editor, &event, &text_focused)
            .prevent_default
    }
}

/// Unwrap serialized JSON, logging and returning an empty string on failure.
fn json_or_empty(result: CanvasResult<String>, what: &str) -> String {
    result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, what, "Serialization failed");
        String::new()
    })
}

impl Default for WasmStickerEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_failure_yields_empty_string() {
        let failed = Err(crate::CanvasError::ResourceDecode("boom".to_string()));
        assert_eq!(json_or_empty(failed, "scene"), "");
        assert_eq!(json_or_empty(Ok("{}".to_string()), "scene"), "{}");
    }

    #[test]
    fn wasm_editor_new_is_empty() {
        let editor = WasmStickerEditor::new();
        assert!(!editor.can_undo());
        assert!(!editor.is_dirty());
        assert!(editor.selected_id().is_none());
    }

    #[test]
    fn get_scene_json_returns_valid_json() {
        let editor = WasmStickerEditor::default();
        let parsed: Result<serde_json::Value, _> = serde_json::from_str(&editor.get_scene_json());
        assert!(parsed.is_ok(), "Scene JSON should be valid");
    }

    #[test]
    fn add_shape_rejects_unknown_kind() {
        let mut editor = WasmStickerEditor::new();
        assert!(editor.add_shape("hexagon", "#fff", "#000").is_err());
        let id = editor.add_shape("star", "#fff", "#000").expect("star");
        assert_eq!(editor.selected_id(), Some(id));
    }

    #[test]
    fn update_element_accepts_camel_case_patch() {
        let mut editor = WasmStickerEditor::new();
        let id = editor.add_text("Hi", "#000", 24.0, "Arial");
        let changed = editor
            .update_element(&id, r#"{"fontSize": 32, "scaleX": 2}"#)
            .expect("valid patch");
        assert!(changed);
        assert!(editor.get_scene_json().contains("\"fontSize\":32"));
        assert!(editor.update_element(&id, "not json").is_err());
    }

    #[test]
    fn border_goes_to_the_back() {
        let mut editor = WasmStickerEditor::new();
        editor.add_icon("sos", "#ef4444");
        let border = editor.add_border("double", "#000").expect("border");
        let json = editor.get_document_json();
        let document: serde_json::Value = serde_json::from_str(&json).expect("json");
        assert_eq!(document["elements"][0]["id"], border.as_str());
        assert!(editor.add_border("wavy", "#000").is_err());
    }

    #[test]
    fn document_roundtrip_through_json() {
        let mut source = WasmStickerEditor::new();
        source.load_template("emergency-basic").expect("template");
        let json = source.get_document_json();

        let mut target = WasmStickerEditor::new();
        target.load_document(&json).expect("document");
        assert!(!target.is_dirty());
        assert!(target.load_document("nope").is_err());
        assert!(target.load_template("missing").is_err());
    }

    #[test]
    fn keyboard_undo_prevents_default() {
        let mut editor = WasmStickerEditor::new();
        editor.add_icon("car", "#000");
        assert!(editor.handle_key("z", true, false, false, false));
        assert!(!editor.can_undo());
        assert!(!editor.handle_key("q", false, false, false, false));
    }

    #[test]
    fn move_layer_rejects_unknown_direction() {
        let mut editor = WasmStickerEditor::new();
        let id = editor.add_icon("car", "#000");
        assert!(editor.move_layer(&id, "left").is_err());
        assert_eq!(editor.move_layer(&id, "up"), Ok(false));
    }
}

//! The scene editor: the only code path that mutates the live scene.
//!
//! Every structural change produces a new element list and exactly one
//! history push. Selection changes alone are not recorded, and operations
//! that name an element which is not in the scene do nothing at all (no
//! mutation, no history entry).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::DUPLICATE_OFFSET;
use crate::document::StickerDocument;
use crate::element::{Element, ElementId, ElementPatch, ImageSource, RasterHandle};
use crate::factory::create_image;
use crate::history::{HistoryLog, HistorySnapshot};
use crate::scene::Scene;
use crate::template::find_template;
use crate::{CanvasError, CanvasResult};

/// Direction for [`SceneEditor::move_layer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerDirection {
    /// Toward the end of the sequence (front).
    Up,
    /// Toward the start of the sequence (back).
    Down,
}

impl FromStr for LayerDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(format!("unknown layer direction: {other}")),
        }
    }
}

/// Generation token handed out when an image upload starts.
///
/// Only the most recent ticket may complete; earlier ones are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadTicket(u64);

impl UploadTicket {
    /// Generation number of this ticket.
    #[must_use]
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// A successfully decoded upload, ready to become an image element.
#[derive(Debug, Clone)]
pub struct DecodedUpload {
    /// Decoded pixels.
    pub raster: RasterHandle,
    /// Durable descriptor of the uploaded data.
    pub source: ImageSource,
}

/// Owns the live scene and its history.
#[derive(Debug, Clone)]
pub struct SceneEditor {
    scene: Scene,
    history: HistoryLog,
    dirty: bool,
    template_id: Option<String>,
    upload_generation: u64,
    pending_upload: Option<UploadTicket>,
}

impl SceneEditor {
    /// Create an editor with an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::with_history(HistoryLog::new())
    }

    /// Create an editor whose history keeps at most `capacity` snapshots.
    #[must_use]
    pub fn with_history_capacity(capacity: usize) -> Self {
        Self::with_history(HistoryLog::with_capacity(capacity))
    }

    fn with_history(history: HistoryLog) -> Self {
        Self {
            scene: Scene::new(),
            history,
            dirty: false,
            template_id: None,
            upload_generation: 0,
            pending_upload: None,
        }
    }

    /// The live scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Elements in paint order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.scene.elements
    }

    /// Selected element id.
    #[must_use]
    pub fn selected(&self) -> Option<&ElementId> {
        self.scene.selected.as_ref()
    }

    /// The undo/redo log.
    #[must_use]
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Whether the scene changed since the last save or document load.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record that the current scene has been saved.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Id of the template the design started from, if any.
    #[must_use]
    pub fn template_id(&self) -> Option<&str> {
        self.template_id.as_deref()
    }

    fn commit(&mut self) {
        self.history
            .push(self.scene.elements.clone(), self.scene.selected.clone());
        self.dirty = true;
    }

    /// Append an element on top and select it.
    pub fn add_element(&mut self, element: Element) -> ElementId {
        let id = element.id.clone();
        tracing::debug!(id = %id, kind = element.kind.name(), "Adding element");
        self.scene.elements.push(element);
        self.scene.selected = Some(id.clone());
        self.commit();
        id
    }

    /// Insert an element behind everything else and select it.
    pub fn add_element_at_back(&mut self, element: Element) -> ElementId {
        let id = element.id.clone();
        tracing::debug!(id = %id, kind = element.kind.name(), "Adding element at back");
        self.scene.elements.insert(0, element);
        self.scene.selected = Some(id.clone());
        self.commit();
        id
    }

    /// Merge a partial attribute set into an element.
    ///
    /// Returns `false` without recording history if the id is unknown.
    pub fn update_element(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        let Some(element) = self.scene.get_mut(id) else {
            tracing::debug!(id = %id, "Update ignored, element not found");
            return false;
        };
        element.apply_patch(patch);
        self.commit();
        true
    }

    /// Remove an element, clearing the selection if it pointed at it.
    pub fn delete_element(&mut self, id: &ElementId) -> bool {
        let Some(index) = self.scene.index_of(id) else {
            tracing::debug!(id = %id, "Delete ignored, element not found");
            return false;
        };
        self.scene.elements.remove(index);
        if self.scene.selected.as_ref() == Some(id) {
            self.scene.selected = None;
        }
        tracing::debug!(id = %id, "Deleted element");
        self.commit();
        true
    }

    /// Remove the selected element, if any.
    pub fn delete_selected(&mut self) -> bool {
        match self.scene.selected.clone() {
            Some(id) => self.delete_element(&id),
            None => false,
        }
    }

    /// Copy an element with a new id, offset it, bring it to front and select it.
    pub fn duplicate_element(&mut self, id: &ElementId) -> Option<ElementId> {
        let Some(source) = self.scene.get(id) else {
            tracing::debug!(id = %id, "Duplicate ignored, element not found");
            return None;
        };
        let mut copy = source.clone().with_id(ElementId::new());
        copy.x += DUPLICATE_OFFSET;
        copy.y += DUPLICATE_OFFSET;
        let new_id = copy.id.clone();
        tracing::debug!(source = %id, copy = %new_id, "Duplicated element");
        self.scene.elements.push(copy);
        self.scene.selected = Some(new_id.clone());
        self.commit();
        Some(new_id)
    }

    /// Swap an element with its neighbor in paint order.
    ///
    /// Returns `false` without recording history at either end of the
    /// sequence or for an unknown id.
    pub fn move_layer(&mut self, id: &ElementId, direction: LayerDirection) -> bool {
        let Some(index) = self.scene.index_of(id) else {
            tracing::debug!(id = %id, "Layer move ignored, element not found");
            return false;
        };
        let target = match direction {
            LayerDirection::Up if index + 1 < self.scene.elements.len() => index + 1,
            LayerDirection::Down if index > 0 => index - 1,
            _ => {
                tracing::debug!(id = %id, ?direction, "Layer move ignored at boundary");
                return false;
            }
        };
        self.scene.elements.swap(index, target);
        self.commit();
        true
    }

    /// Replace the scene with copies of `elements` under fresh ids.
    pub fn load_template(&mut self, elements: Vec<Element>) {
        self.scene.elements = elements
            .into_iter()
            .map(|e| e.with_id(ElementId::new()))
            .collect();
        self.scene.selected = None;
        tracing::debug!(count = self.scene.elements.len(), "Loaded elements");
        self.commit();
    }

    /// Replace the scene with one of the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::TemplateNotFound`] for an unknown id; the scene
    /// is left untouched.
    pub fn load_template_by_id(&mut self, template_id: &str) -> CanvasResult<()> {
        let template = find_template(template_id)
            .ok_or_else(|| CanvasError::TemplateNotFound(template_id.to_string()))?;
        tracing::info!(template = template.id, "Loading template");
        self.load_template(template.materialize());
        self.template_id = Some(template.id.to_string());
        Ok(())
    }

    /// Load a previously saved document and treat it as clean.
    ///
    /// Image elements come back without decoded pixels; callers attach
    /// rasters with [`SceneEditor::attach_raster`] once decoded.
    pub fn load_document(&mut self, document: &StickerDocument) {
        self.load_template(document.elements.clone());
        self.template_id.clone_from(&document.template);
        self.dirty = false;
    }

    /// Bind decoded pixels to an image element without recording history.
    ///
    /// Binding a raster does not change any durable attribute. The handle is
    /// shared with every history snapshot holding the element, so undo and
    /// redo keep the pixels.
    pub fn attach_raster(&mut self, id: &ElementId, raster: RasterHandle) -> bool {
        let attached = self
            .scene
            .get_mut(id)
            .is_some_and(|element| element.attach_raster(raster.clone()));
        if attached {
            let copies = self.history.attach_raster(id, &raster);
            tracing::debug!(id = %id, copies, "Attached raster");
        }
        attached
    }

    /// Remove all elements.
    pub fn clear(&mut self) {
        self.scene.elements.clear();
        self.scene.selected = None;
        self.template_id = None;
        tracing::debug!("Cleared scene");
        self.commit();
    }

    /// Change the selection without recording history.
    ///
    /// Selecting an id that is not in the scene is ignored and returns `false`.
    pub fn select(&mut self, id: Option<&ElementId>) -> bool {
        match id {
            None => {
                self.scene.selected = None;
                true
            }
            Some(id) if self.scene.contains(id) => {
                self.scene.selected = Some(id.clone());
                true
            }
            Some(id) => {
                tracing::debug!(id = %id, "Selection ignored, element not found");
                false
            }
        }
    }

    fn restore(&mut self, snapshot: HistorySnapshot) {
        self.scene.elements = snapshot.elements;
        self.scene.selected = snapshot.selected;
        self.dirty = true;
    }

    /// Step back one snapshot.
    pub fn undo(&mut self) -> bool {
        match self.history.undo().cloned() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot.
    pub fn redo(&mut self) -> bool {
        match self.history.redo().cloned() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Start an image upload, superseding any upload still in flight.
    pub fn begin_image_upload(&mut self) -> UploadTicket {
        self.upload_generation += 1;
        let ticket = UploadTicket(self.upload_generation);
        self.pending_upload = Some(ticket);
        ticket
    }

    /// Finish an image upload.
    ///
    /// A stale ticket is ignored and yields `Ok(None)`. For the current
    /// ticket a decoded image is added as a new element.
    ///
    /// # Errors
    ///
    /// Returns the decode error for the current ticket; the scene is left
    /// unchanged.
    pub fn complete_image_upload(
        &mut self,
        ticket: UploadTicket,
        result: CanvasResult<DecodedUpload>,
    ) -> CanvasResult<Option<ElementId>> {
        if self.pending_upload != Some(ticket) {
            tracing::debug!(generation = ticket.0, "Ignoring stale image upload");
            return Ok(None);
        }
        self.pending_upload = None;
        match result {
            Ok(upload) => Ok(Some(
                self.add_element(create_image(upload.raster, upload.source)),
            )),
            Err(err) => {
                tracing::warn!(error = %err, "Image upload failed");
                Err(err)
            }
        }
    }

    /// Transport-safe copy of the scene.
    #[must_use]
    pub fn to_document(&self) -> StickerDocument {
        StickerDocument::from_scene(&self.scene, self.template_id.clone())
    }
}

impl Default for SceneEditor {
    fn default() -> Self {
        Self::new()
    }
}

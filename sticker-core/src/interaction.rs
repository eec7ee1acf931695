//! Maps pointer, keyboard and transform-handle input to editor calls.
//!
//! The adapter never reads or writes the scene directly; every change goes
//! through [`SceneEditor`]. The only state it keeps is the geometry of a
//! transform gesture in progress.

use serde::{Deserialize, Serialize};

use crate::constants::MIN_TRANSFORM_SIZE;
use crate::editor::SceneEditor;
use crate::element::{ElementId, ElementPatch};

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct KeyModifiers {
    /// Shift key pressed.
    pub shift: bool,
    /// Control key pressed.
    pub ctrl: bool,
    /// Alt/Option key pressed.
    pub alt: bool,
    /// Meta/Command key pressed.
    pub meta: bool,
}

impl KeyModifiers {
    /// Whether the platform shortcut modifier (Ctrl or Cmd) is held.
    #[must_use]
    pub fn platform(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Key name as reported by the browser, e.g. `z` or `Delete`.
    pub key: String,
    /// Active modifier keys.
    #[serde(default)]
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// Create a key event.
    #[must_use]
    pub fn new(key: impl Into<String>, modifiers: KeyModifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }
}

/// Whether a text-entry field currently owns keyboard input.
///
/// Delete/Backspace only remove elements when this reports `false`.
pub trait TextFocus {
    /// `true` while the user is typing into a text field.
    fn is_text_entry_focused(&self) -> bool;
}

impl TextFocus for bool {
    fn is_text_entry_focused(&self) -> bool {
        *self
    }
}

impl<F: Fn() -> bool> TextFocus for F {
    fn is_text_entry_focused(&self) -> bool {
        self()
    }
}

/// Editor command bound to a keyboard shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShortcutAction {
    /// Step back in history.
    Undo,
    /// Step forward in history.
    Redo,
    /// Remove the selected element.
    DeleteSelected,
}

/// Result of offering a key press to the adapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutOutcome {
    /// Command the key press matched, if any.
    pub action: Option<ShortcutAction>,
    /// Whether the host should suppress its default handling of the key.
    pub prevent_default: bool,
}

impl ShortcutOutcome {
    fn matched(action: ShortcutAction) -> Self {
        Self {
            action: Some(action),
            prevent_default: true,
        }
    }
}

/// Position, rotation and scale of a node under a transform handle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeGeometry {
    /// X position.
    pub x: f32,
    /// Y position.
    pub y: f32,
    /// Rotation in degrees.
    pub rotation: f32,
    /// Horizontal scale.
    pub scale_x: f32,
    /// Vertical scale.
    pub scale_y: f32,
}

impl From<NodeGeometry> for ElementPatch {
    fn from(g: NodeGeometry) -> Self {
        Self::transform(g.x, g.y, g.rotation, g.scale_x, g.scale_y)
    }
}

#[derive(Debug, Clone)]
struct TransformSession {
    id: ElementId,
    accepted: NodeGeometry,
}

/// Translates host input into [`SceneEditor`] operations.
#[derive(Debug, Default)]
pub struct InteractionAdapter {
    transform: Option<TransformSession>,
}

impl InteractionAdapter {
    /// Create an adapter with no gesture in progress.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit the final position of a dragged element.
    pub fn drag_end(&mut self, editor: &mut SceneEditor, id: &ElementId, x: f32, y: f32) -> bool {
        editor.update_element(id, &ElementPatch::position(x, y))
    }

    /// Start a resize/rotate gesture on an element.
    ///
    /// Returns `false` if the element is not in the scene.
    pub fn begin_transform(&mut self, editor: &SceneEditor, id: &ElementId) -> bool {
        let Some(element) = editor.scene().get(id) else {
            return false;
        };
        self.transform = Some(TransformSession {
            id: id.clone(),
            accepted: NodeGeometry {
                x: element.x,
                y: element.y,
                rotation: element.rotation,
                scale_x: element.scale_x,
                scale_y: element.scale_y,
            },
        });
        true
    }

    /// Offer an intermediate geometry during a transform gesture.
    ///
    /// Geometry that would shrink the element's box below the minimum size is
    /// replaced by the last accepted geometry. Returns the geometry the host
    /// should display, or `None` when no gesture is active.
    pub fn propose_transform(
        &mut self,
        editor: &SceneEditor,
        proposed: NodeGeometry,
    ) -> Option<NodeGeometry> {
        let session = self.transform.as_mut()?;
        let Some(element) = editor.scene().get(&session.id) else {
            self.transform = None;
            return None;
        };
        let mut candidate = element.clone();
        candidate.apply_patch(&proposed.into());
        let bounds = candidate.bounds();
        if bounds.width < MIN_TRANSFORM_SIZE || bounds.height < MIN_TRANSFORM_SIZE {
            tracing::trace!(
                width = bounds.width,
                height = bounds.height,
                "Transform below minimum size, keeping previous box"
            );
        } else {
            session.accepted = proposed;
        }
        Some(session.accepted)
    }

    /// Finish a transform gesture, committing the last accepted geometry.
    pub fn end_transform(&mut self, editor: &mut SceneEditor) -> bool {
        match self.transform.take() {
            Some(session) => editor.update_element(&session.id, &session.accepted.into()),
            None => false,
        }
    }

    /// Whether a transform gesture is in progress.
    #[must_use]
    pub fn is_transforming(&self) -> bool {
        self.transform.is_some()
    }

    /// Handle a click; `None` means the empty canvas was hit.
    pub fn click(&mut self, editor: &mut SceneEditor, target: Option<&ElementId>) -> bool {
        editor.select(target)
    }

    /// Handle a click at canvas coordinates, selecting the topmost element there.
    pub fn click_at(&mut self, editor: &mut SceneEditor, x: f32, y: f32) -> Option<ElementId> {
        let hit = editor.scene().element_at(x, y).cloned();
        editor.select(hit.as_ref());
        hit
    }

    /// Run the editor command bound to a key press, if any.
    ///
    /// Only matched combinations ask the host to suppress default handling.
    pub fn handle_key(
        &mut self,
        editor: &mut SceneEditor,
        event: &KeyEvent,
        focus: &impl TextFocus,
    ) -> ShortcutOutcome {
        let key = event.key.to_ascii_lowercase();
        let mods = event.modifiers;

        if mods.platform() && key == "z" && !mods.shift {
            editor.undo();
            return ShortcutOutcome::matched(ShortcutAction::Undo);
        }
        if mods.platform() && (key == "y" || (key == "z" && mods.shift)) {
            editor.redo();
            return ShortcutOutcome::matched(ShortcutAction::Redo);
        }
        if (key == "delete" || key == "backspace")
            && editor.selected().is_some()
            && !focus.is_text_entry_focused()
        {
            editor.delete_selected();
            return ShortcutOutcome::matched(ShortcutAction::DeleteSelected);
        }
        ShortcutOutcome::default()
    }
}

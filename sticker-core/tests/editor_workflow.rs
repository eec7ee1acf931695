//! Editor Workflow Integration Tests
//!
//! Exercises the editor the way the browser front end drives it:
//! - Template loading and document round trips
//! - Layering, duplication and deletion rules
//! - Keyboard and pointer input through the interaction adapter

use sticker_core::factory::{create_border, create_icon, create_shape, create_text};
use sticker_core::{
    ElementKind, FrameStyle, InteractionAdapter, KeyEvent, KeyModifiers, LayerDirection,
    SceneEditor, ShapeKind, StickerDocument, DEFAULT_TEMPLATES,
};

// ============================================================================
// Template Round Trips
// ============================================================================

#[test]
fn test_every_template_survives_serialize_and_reload() {
    for template in DEFAULT_TEMPLATES {
        let direct = template.materialize();

        let mut editor = SceneEditor::new();
        editor
            .load_template_by_id(template.id)
            .expect("built-in template");
        let json = editor.to_document().to_json().expect("serialize");

        let document = StickerDocument::from_json(&json).expect("deserialize");
        let mut reloaded = SceneEditor::new();
        reloaded.load_document(&document);

        assert_eq!(reloaded.elements().len(), direct.len(), "{}", template.id);
        for (loaded, expected) in reloaded.elements().iter().zip(&direct) {
            assert!(
                loaded.same_attributes(expected),
                "{}: {loaded:?} != {expected:?}",
                template.id
            );
        }
        assert_eq!(reloaded.template_id(), Some(template.id));
    }
}

#[test]
fn test_emergency_basic_layout() {
    let mut editor = SceneEditor::new();
    editor
        .load_template_by_id("emergency-basic")
        .expect("built-in template");
    let elements = editor.elements();
    assert_eq!(elements.len(), 3);

    assert!(matches!(
        elements[0].kind,
        ElementKind::Rectangle { width, height, .. } if (width - 360.0).abs() < f32::EPSILON
            && (height - 360.0).abs() < f32::EPSILON
    ));
    assert_eq!(elements[0].fill, "#ffffff");
    assert_eq!(elements[0].stroke.as_deref(), Some("#ef4444"));
    assert_eq!(elements[0].stroke_width, Some(8.0));

    let texts: Vec<&str> = elements
        .iter()
        .filter_map(|e| match &e.kind {
            ElementKind::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, ["🆘 EMERGENCY", "SCAN FOR HELP"]);
}

// ============================================================================
// Layering and Selection
// ============================================================================

#[test]
fn test_frontmost_move_up_is_noop() {
    let mut editor = SceneEditor::new();
    editor.add_element(create_shape(ShapeKind::Circle, "#fff", "#000"));
    let front = editor.add_element(create_text("TOP", "#000", 24.0, "Arial"));
    let before: Vec<_> = editor.elements().iter().map(|e| e.id.clone()).collect();
    let history = editor.history().len();

    assert!(!editor.move_layer(&front, LayerDirection::Up));

    let after: Vec<_> = editor.elements().iter().map(|e| e.id.clone()).collect();
    assert_eq!(before, after);
    assert_eq!(editor.history().len(), history);
}

#[test]
fn test_border_stays_behind_existing_content() {
    let mut editor = SceneEditor::new();
    let icon = editor.add_element(create_icon("phone", "#000"));
    let border = editor.add_element_at_back(create_border(FrameStyle::Rounded, "#06b6d4"));
    assert_eq!(editor.scene().index_of(&border), Some(0));
    assert_eq!(editor.scene().index_of(&icon), Some(1));

    // Hit-testing the center finds the icon drawn over the frame.
    let hit = editor.scene().element_at(200.0, 210.0).cloned();
    assert_eq!(hit, Some(icon));
}

#[test]
fn test_delete_rules_for_selection() {
    let mut editor = SceneEditor::new();
    let a = editor.add_element(create_shape(ShapeKind::Rect, "#fff", "#000"));
    let b = editor.add_element(create_shape(ShapeKind::Star, "#fff", "#000"));

    // b is selected; deleting a leaves it selected.
    assert!(editor.delete_element(&a));
    assert_eq!(editor.selected(), Some(&b));

    assert!(editor.delete_element(&b));
    assert!(editor.selected().is_none());
}

#[test]
fn test_duplicate_matches_source_attributes() {
    let mut editor = SceneEditor::new();
    let source = editor.add_element(create_shape(ShapeKind::Triangle, "#22c55e", "#000"));
    let copy = editor.duplicate_element(&source).expect("source exists");

    let original = editor.scene().get(&source).expect("source").clone();
    let mut duplicate = editor.scene().get(&copy).expect("copy").clone();
    assert_ne!(original.id, duplicate.id);
    assert!((duplicate.x - (original.x + 20.0)).abs() < f32::EPSILON);
    assert!((duplicate.y - (original.y + 20.0)).abs() < f32::EPSILON);

    duplicate.x = original.x;
    duplicate.y = original.y;
    assert!(duplicate.same_attributes(&original));
}

// ============================================================================
// Input Adapter Workflows
// ============================================================================

#[test]
fn test_drag_then_undo_via_keyboard() {
    let mut editor = SceneEditor::new();
    let mut input = InteractionAdapter::new();
    let id = editor.add_element(create_shape(ShapeKind::Rect, "#3b82f6", "#000000"));

    assert!(input.drag_end(&mut editor, &id, 50.0, 60.0));
    let undo = KeyEvent::new(
        "z",
        KeyModifiers {
            meta: true,
            ..KeyModifiers::default()
        },
    );
    let outcome = input.handle_key(&mut editor, &undo, &false);
    assert!(outcome.prevent_default);

    let element = editor.scene().get(&id).expect("still present");
    assert!((element.x - 200.0).abs() < f32::EPSILON);
    assert!((element.y - 200.0).abs() < f32::EPSILON);
    assert!(editor.can_redo());
}

#[test]
fn test_typing_backspace_in_text_field_keeps_element() {
    let mut editor = SceneEditor::new();
    let mut input = InteractionAdapter::new();
    editor.add_element(create_text("SCAN ME", "#000", 24.0, "Arial"));

    let backspace = KeyEvent::new("Backspace", KeyModifiers::default());
    let typing = || true;
    let outcome = input.handle_key(&mut editor, &backspace, &typing);
    assert!(!outcome.prevent_default);
    assert_eq!(editor.elements().len(), 1);
}

#[test]
fn test_clear_then_undo_restores_template() {
    let mut editor = SceneEditor::new();
    editor
        .load_template_by_id("bike-safety")
        .expect("built-in template");
    let before = editor.to_document();

    editor.clear();
    assert!(editor.elements().is_empty());
    assert!(editor.undo());
    assert_eq!(editor.to_document().elements, before.elements);
}

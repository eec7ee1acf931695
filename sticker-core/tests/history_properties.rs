//! Property tests for the bounded history log and the editor built on it.

use proptest::prelude::*;
use sticker_core::constants::MAX_HISTORY;
use sticker_core::factory::create_shape;
use sticker_core::{HistoryLog, SceneEditor, ShapeKind};

fn shape_kind() -> impl Strategy<Value = ShapeKind> {
    prop_oneof![
        Just(ShapeKind::Rect),
        Just(ShapeKind::Circle),
        Just(ShapeKind::Star),
        Just(ShapeKind::Triangle),
        Just(ShapeKind::Arrow),
    ]
}

proptest! {
    #[test]
    fn undo_n_times_returns_to_empty(kinds in prop::collection::vec(shape_kind(), 0..MAX_HISTORY)) {
        let mut editor = SceneEditor::new();
        for kind in &kinds {
            editor.add_element(create_shape(*kind, "#fff", "#000"));
        }
        for _ in 0..kinds.len() {
            prop_assert!(editor.undo());
        }
        prop_assert!(editor.elements().is_empty());
        prop_assert!(editor.selected().is_none());
        prop_assert!(!editor.can_undo());
    }

    #[test]
    fn overflow_keeps_latest_reachable(pushes in (MAX_HISTORY + 1)..(MAX_HISTORY * 3)) {
        let mut log = HistoryLog::new();
        for n in 0..pushes {
            let elements = (0..n % 4)
                .map(|_| create_shape(ShapeKind::Circle, "#fff", "#000"))
                .collect();
            log.push(elements, None);
        }
        prop_assert!(log.len() <= MAX_HISTORY);
        prop_assert!(!log.can_redo());
        prop_assert_eq!(log.cursor(), log.len() - 1);
        prop_assert_eq!(log.current().elements.len(), (pushes - 1) % 4);
    }

    #[test]
    fn push_after_undo_drops_redo(extra in 1usize..10, undos in 1usize..10) {
        let mut log = HistoryLog::new();
        for _ in 0..(extra + undos) {
            log.push(Vec::new(), None);
        }
        for _ in 0..undos {
            prop_assert!(log.undo().is_some());
        }
        prop_assert!(log.can_redo());
        log.push(Vec::new(), None);
        prop_assert!(!log.can_redo());
        prop_assert!(log.redo().is_none());
    }
}

use crate::app::placement::{DragSource, DropTarget, Half};
use crate::app::{DesignerCommand, DesignerIntent, DesignerState};

use super::map_intent_to_commands;

#[test]
fn save_requested_maps_to_save_file_without_path() {
    let state = DesignerState::new();

    let commands = map_intent_to_commands(&state, DesignerIntent::SaveRequested);

    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], DesignerCommand::SaveFile { path: None }));
}

#[test]
fn file_selected_cancels_drag_before_loading() {
    let state = DesignerState::new();

    let commands = map_intent_to_commands(
        &state,
        DesignerIntent::FileSelected {
            path: "form.json".into(),
        },
    );

    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], DesignerCommand::CancelDrag));
    assert!(matches!(commands[1], DesignerCommand::LoadFile { ref path } if path == "form.json"));
}

#[test]
fn drag_over_element_maps_to_hover_target() {
    let state = DesignerState::new();

    let commands = map_intent_to_commands(
        &state,
        DesignerIntent::DraggedOverElement {
            element_id: "a".into(),
            half: Half::Bottom,
        },
    );

    assert_eq!(commands.len(), 1);
    assert!(matches!(
        &commands[0],
        DesignerCommand::HoverTarget {
            target: DropTarget::Element { element_id, half: Half::Bottom }
        } if element_id == "a"
    ));
}

#[test]
fn drop_without_drag_maps_to_nothing() {
    let mut state = DesignerState::new();
    assert!(map_intent_to_commands(&state, DesignerIntent::DropRequested).is_empty());

    state.drag.drag_start(DragSource::Palette {
        field_type: "TextField".into(),
    });
    let commands = map_intent_to_commands(&state, DesignerIntent::DropRequested);
    assert!(matches!(commands[..], [DesignerCommand::CommitDrop]));
}

#[test]
fn canvas_click_clears_only_existing_selection() {
    let mut state = DesignerState::new();
    assert!(map_intent_to_commands(&state, DesignerIntent::CanvasClicked).is_empty());

    state.selection.selected_element_id = Some("a".into());
    let commands = map_intent_to_commands(&state, DesignerIntent::CanvasClicked);
    assert!(matches!(commands[..], [DesignerCommand::ClearSelection]));

    let commands = map_intent_to_commands(&state, DesignerIntent::RemoveSelectedRequested);
    assert!(matches!(
        &commands[..],
        [DesignerCommand::RemoveElement { element_id }] if element_id == "a"
    ));
}

use form_designer::fields::card::{BlockKind, CardBlock, CardEdit, CardField};
use form_designer::ports::MemoryFormStore;
use form_designer::{
    DesignerCommand, DesignerController, DesignerIntent, DesignerOptions, DesignerState,
    ElementInstance, GlobalSettingsPatch, Half,
};
use serde_json::json;

fn drop_from_palette(
    controller: &mut DesignerController,
    state: &mut DesignerState,
    field_type: &str,
    over: Option<(&str, Half)>,
) {
    controller
        .handle_intent(
            state,
            DesignerIntent::PaletteDragStarted {
                field_type: field_type.into(),
            },
        )
        .expect("PaletteDragStarted sollte ohne Fehler durchlaufen");
    let hover = match over {
        Some((element_id, half)) => DesignerIntent::DraggedOverElement {
            element_id: element_id.into(),
            half,
        },
        None => DesignerIntent::DraggedOverCanvas,
    };
    controller
        .handle_intent(state, hover)
        .expect("Hover sollte ohne Fehler durchlaufen");
    controller
        .handle_intent(state, DesignerIntent::DropRequested)
        .expect("DropRequested sollte ohne Fehler durchlaufen");
}

fn drag_element(
    controller: &mut DesignerController,
    state: &mut DesignerState,
    element_id: &str,
    target_id: &str,
    half: Half,
) {
    for intent in [
        DesignerIntent::ElementDragStarted {
            element_id: element_id.into(),
        },
        DesignerIntent::DraggedOverElement {
            element_id: target_id.into(),
            half,
        },
        DesignerIntent::DropRequested,
    ] {
        controller
            .handle_intent(state, intent)
            .expect("Verschieben sollte ohne Fehler durchlaufen");
    }
}

fn state_with(ids: &[&str]) -> DesignerState {
    let mut state = DesignerState::new();
    for id in ids {
        state
            .canvas_mut()
            .append(ElementInstance::new(*id, "TextField"))
            .expect("IDs sollten eindeutig sein");
    }
    state
}

#[test]
fn test_palette_drop_on_empty_canvas_appends_and_selects() {
    let mut controller = DesignerController::default();
    let mut state = DesignerState::new();

    drop_from_palette(&mut controller, &mut state, "TextField", None);

    assert_eq!(state.element_count(), 1);
    let id = state.canvas.elements[0].id.clone();
    assert!(state.selection.is_selected(&id));
    assert!(state.drag.is_idle());
    assert_eq!(state.canvas.elements[0].attr_str("label"), "Text field");

    let last = state
        .command_log
        .entries()
        .last()
        .expect("Es sollte ein Command geloggt sein");
    match last {
        DesignerCommand::CommitDrop => {}
        other => panic!("Unerwarteter letzter Command: {other:?}"),
    }
}

#[test]
fn test_palette_drop_on_element_halves_inserts_before_and_after() {
    let mut controller = DesignerController::default();
    let mut state = state_with(&["a", "b"]);

    drop_from_palette(&mut controller, &mut state, "DateField", Some(("b", Half::Top)));
    drop_from_palette(&mut controller, &mut state, "CheckboxField", Some(("b", Half::Bottom)));

    let types: Vec<&str> = state
        .canvas
        .elements
        .iter()
        .map(|e| e.field_type.as_str())
        .collect();
    assert_eq!(
        types,
        vec!["TextField", "DateField", "TextField", "CheckboxField"]
    );
    assert!(state.canvas.has_unique_ids());
}

#[test]
fn test_unknown_palette_type_leaves_canvas_untouched() {
    let mut controller = DesignerController::default();
    let mut state = state_with(&["a"]);

    drop_from_palette(&mut controller, &mut state, "NoSuchField", None);

    assert_eq!(state.canvas.ids(), vec!["a"]);
    assert!(!state.can_undo());
    assert!(state.drag.is_idle());
}

#[test]
fn test_move_element_recomputes_index_after_removal() {
    let mut controller = DesignerController::default();
    let mut state = state_with(&["a", "b", "c", "d"]);

    drag_element(&mut controller, &mut state, "a", "c", Half::Bottom);
    assert_eq!(state.canvas.ids(), vec!["b", "c", "a", "d"]);

    drag_element(&mut controller, &mut state, "d", "b", Half::Top);
    assert_eq!(state.canvas.ids(), vec!["d", "b", "c", "a"]);
}

#[test]
fn test_move_onto_own_position_is_noop_without_undo_step() {
    let mut controller = DesignerController::default();
    let mut state = state_with(&["a", "b", "c"]);

    drag_element(&mut controller, &mut state, "b", "c", Half::Top);
    drag_element(&mut controller, &mut state, "b", "c", Half::Bottom);
    drag_element(&mut controller, &mut state, "b", "b", Half::Bottom);

    assert_eq!(state.canvas.ids(), vec!["a", "b", "c"]);
    assert!(!state.can_undo());
}

#[test]
fn test_canvas_element_dropped_on_canvas_area_is_noop() {
    let mut controller = DesignerController::default();
    let mut state = state_with(&["a", "b"]);

    for intent in [
        DesignerIntent::ElementDragStarted {
            element_id: "a".into(),
        },
        DesignerIntent::DraggedOverCanvas,
        DesignerIntent::DropRequested,
    ] {
        controller
            .handle_intent(&mut state, intent)
            .expect("Drop auf freie Fläche sollte ohne Fehler durchlaufen");
    }

    assert_eq!(state.canvas.ids(), vec!["a", "b"]);
}

#[test]
fn test_drag_left_then_drop_cancels_without_mutation() {
    let mut controller = DesignerController::default();
    let mut state = state_with(&["a"]);

    for intent in [
        DesignerIntent::PaletteDragStarted {
            field_type: "TextField".into(),
        },
        DesignerIntent::DraggedOverElement {
            element_id: "a".into(),
            half: Half::Top,
        },
        DesignerIntent::DragLeft,
        DesignerIntent::DropRequested,
    ] {
        controller
            .handle_intent(&mut state, intent)
            .expect("Drag-Sequenz sollte ohne Fehler durchlaufen");
    }

    assert_eq!(state.element_count(), 1);
    assert!(state.drag.is_idle());
}

#[test]
fn test_drop_without_drag_is_ignored() {
    let mut controller = DesignerController::default();
    let mut state = state_with(&["a"]);

    controller
        .handle_intent(&mut state, DesignerIntent::DropRequested)
        .expect("DropRequested ohne Drag sollte robust sein");

    assert!(state.command_log.is_empty());
    assert_eq!(state.element_count(), 1);
}

#[test]
fn test_remove_selected_clears_selection_and_undo_restores() {
    let mut controller = DesignerController::default();
    let mut state = state_with(&["a", "b"]);

    controller
        .handle_intent(
            &mut state,
            DesignerIntent::ElementClicked {
                element_id: "b".into(),
            },
        )
        .expect("ElementClicked sollte ohne Fehler durchlaufen");
    controller
        .handle_intent(&mut state, DesignerIntent::RemoveSelectedRequested)
        .expect("RemoveSelectedRequested sollte ohne Fehler durchlaufen");

    assert_eq!(state.canvas.ids(), vec!["a"]);
    assert!(state.selection.selected_element_id.is_none());

    controller
        .handle_intent(&mut state, DesignerIntent::UndoRequested)
        .expect("Undo sollte ohne Fehler durchlaufen");
    assert_eq!(state.canvas.ids(), vec!["a", "b"]);
    assert!(state.selection.is_selected("b"));

    controller
        .handle_intent(&mut state, DesignerIntent::RedoRequested)
        .expect("Redo sollte ohne Fehler durchlaufen");
    assert_eq!(state.canvas.ids(), vec!["a"]);
}

#[test]
fn test_remove_unknown_element_is_contained() {
    let mut controller = DesignerController::default();
    let mut state = state_with(&["a"]);

    controller
        .handle_intent(
            &mut state,
            DesignerIntent::RemoveElementRequested {
                element_id: "weg".into(),
            },
        )
        .expect("Entfernen eines unbekannten Elements sollte keinen Fehler liefern");

    assert_eq!(state.canvas.ids(), vec!["a"]);
}

#[test]
fn test_duplicate_inserts_copy_after_source() {
    let mut controller = DesignerController::default();
    let mut state = DesignerState::new();
    state
        .canvas_mut()
        .append(
            ElementInstance::new("a", "TextField")
                .with_attr("label", "Name")
                .with_attr("customId", "name"),
        )
        .expect("Element sollte eingefügt werden");
    state
        .canvas_mut()
        .append(ElementInstance::new("b", "TextField"))
        .expect("Element sollte eingefügt werden");

    controller
        .handle_intent(
            &mut state,
            DesignerIntent::DuplicateElementRequested {
                element_id: "a".into(),
            },
        )
        .expect("Duplizieren sollte ohne Fehler durchlaufen");

    assert_eq!(state.element_count(), 3);
    let copy = &state.canvas.elements[1];
    assert_ne!(copy.id, "a");
    assert_eq!(copy.attr_str("label"), "Name");
    assert_eq!(copy.attr_str("customId"), "");
    assert!(state.selection.is_selected(&copy.id));
    assert!(state.canvas.has_unique_ids());
}

#[test]
fn test_properties_submitted_with_invalid_choice_reports_errors() {
    let mut controller = DesignerController::default();
    let mut state = DesignerState::new();
    drop_from_palette(&mut controller, &mut state, "TextField", None);
    let id = state.canvas.elements[0].id.clone();

    let mut attributes = state.canvas.elements[0].attributes.clone();
    attributes.insert("inputType".into(), json!("telefon"));
    controller
        .handle_intent(
            &mut state,
            DesignerIntent::PropertiesSubmitted {
                element_id: id.clone(),
                attributes,
            },
        )
        .expect("Ungültige Eigenschaften sollten keinen Fehler liefern");
    assert!(!state.property_errors.is_empty());
    assert_eq!(state.canvas.elements[0].attr_str("inputType"), "text");

    let mut attributes = state.canvas.elements[0].attributes.clone();
    attributes.insert("inputType".into(), json!("email"));
    controller
        .handle_intent(
            &mut state,
            DesignerIntent::PropertiesSubmitted {
                element_id: id,
                attributes,
            },
        )
        .expect("Gültige Eigenschaften sollten übernommen werden");
    assert!(state.property_errors.is_empty());
    assert_eq!(state.canvas.elements[0].attr_str("inputType"), "email");
}

#[test]
fn test_global_settings_and_card_blocks_are_undoable() {
    let mut controller = DesignerController::default();
    let mut state = DesignerState::new();
    drop_from_palette(&mut controller, &mut state, "CardField", None);
    let card_id = state.canvas.elements[0].id.clone();

    controller
        .handle_intent(
            &mut state,
            DesignerIntent::GlobalSettingsChanged {
                patch: GlobalSettingsPatch {
                    background_color: Some("#101010".into()),
                    ..GlobalSettingsPatch::default()
                },
            },
        )
        .expect("GlobalSettingsChanged sollte ohne Fehler durchlaufen");
    controller
        .handle_intent(
            &mut state,
            DesignerIntent::CardBlocksEdited {
                element_id: card_id.clone(),
                edit: CardEdit::Add(CardBlock::new("h", BlockKind::Heading)),
            },
        )
        .expect("CardBlocksEdited sollte ohne Fehler durchlaufen");

    assert_eq!(state.canvas.global_settings.background_color, "#101010");
    assert_eq!(CardField::blocks(&state.canvas.elements[0]).len(), 1);

    controller
        .handle_intent(&mut state, DesignerIntent::UndoRequested)
        .expect("Undo sollte ohne Fehler durchlaufen");
    assert!(CardField::blocks(&state.canvas.elements[0]).is_empty());
    controller
        .handle_intent(&mut state, DesignerIntent::UndoRequested)
        .expect("Undo sollte ohne Fehler durchlaufen");
    assert_eq!(state.canvas.global_settings.background_color, "#ffffff");
}

#[test]
fn test_save_requested_without_path_fails_and_logs_command() {
    let mut controller = DesignerController::default();
    let mut state = state_with(&["a"]);

    let result = controller.handle_intent(&mut state, DesignerIntent::SaveRequested);
    assert!(result.is_err());

    let last = state
        .command_log
        .entries()
        .last()
        .expect("Es sollte ein Command geloggt sein");
    match last {
        DesignerCommand::SaveFile { path } => assert!(path.is_none()),
        other => panic!("Unerwarteter letzter Command: {other:?}"),
    }
}

#[test]
fn test_save_and_reload_file_roundtrip() {
    let mut controller = DesignerController::default();
    let mut state = state_with(&["a", "b"]);
    let path = std::env::temp_dir().join(format!("form-flow-{}.json", uuid::Uuid::new_v4()));
    let path_str = path.to_string_lossy().into_owned();

    controller
        .handle_intent(
            &mut state,
            DesignerIntent::SaveFilePathSelected {
                path: path_str.clone(),
            },
        )
        .expect("Speichern sollte funktionieren");
    controller
        .handle_intent(&mut state, DesignerIntent::NewFormRequested)
        .expect("Neues Formular sollte funktionieren");
    assert_eq!(state.element_count(), 0);

    controller
        .handle_intent(&mut state, DesignerIntent::FileSelected { path: path_str })
        .expect("Laden sollte funktionieren");
    assert_eq!(state.canvas.ids(), vec!["a", "b"]);
    assert!(!state.can_undo());

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_store_roundtrip_via_controller() {
    let controller = DesignerController::default();
    let mut store = MemoryFormStore::new();
    let mut state = state_with(&["x", "y"]);

    controller
        .save_to_store(&mut state, &mut store, "form-1")
        .expect("Speichern im Store sollte funktionieren");

    let mut reloaded = DesignerState::new();
    controller
        .load_from_store(&mut reloaded, &store, "form-1")
        .expect("Laden aus dem Store sollte funktionieren");
    assert_eq!(reloaded.canvas.ids(), vec!["x", "y"]);
}

#[test]
fn test_options_changed_applies_history_depth() {
    let mut controller = DesignerController::default();
    let mut state = state_with(&["a", "b", "c"]);
    let options = DesignerOptions {
        history_depth: 1,
        select_on_drop: false,
        ..DesignerOptions::default()
    };

    controller
        .handle_intent(
            &mut state,
            DesignerIntent::OptionsChanged {
                options: Box::new(options),
            },
        )
        .expect("OptionsChanged sollte ohne Fehler durchlaufen");
    drop_from_palette(&mut controller, &mut state, "TextField", None);
    drop_from_palette(&mut controller, &mut state, "TextField", None);

    assert!(state.selection.selected_element_id.is_none());
    controller
        .handle_intent(&mut state, DesignerIntent::UndoRequested)
        .expect("Undo sollte ohne Fehler durchlaufen");
    assert_eq!(state.element_count(), 4);
    assert!(!state.can_undo());
}

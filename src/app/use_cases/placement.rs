//! Use-Cases für strukturelle Canvas-Änderungen.
//!
//! Jede übernommene Änderung nimmt vorher einen Undo-Snapshot auf.
//! Schlägt die Auflösung fehl, bleibt der Canvas unverändert.

use crate::app::placement::{move_element, resolve_placement, PlacementOp};
use crate::app::DesignerState;
use crate::core::ElementInstance;
use crate::error::PlacementError;
use crate::fields::FieldRegistry;

/// Erzeugt eine neue, eindeutige Element-ID.
pub fn new_element_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn construct(registry: &FieldRegistry, field_type: &str) -> Result<ElementInstance, PlacementError> {
    registry
        .lookup(field_type)
        .map(|ft| ft.construct(&new_element_id()))
        .ok_or_else(|| PlacementError::UnknownFieldType(field_type.to_string()))
}

/// Beendet die laufende Drag-Geste und übernimmt die Platzierung.
///
/// Liefert die ID des neu angelegten bzw. verschobenen Elements, `None` bei No-Op.
pub fn commit_drop(
    state: &mut DesignerState,
    registry: &FieldRegistry,
) -> Result<Option<String>, PlacementError> {
    let Some((source, target)) = state.drag.drop()? else {
        log::debug!("Drop ohne Ziel verworfen");
        return Ok(None);
    };
    let op = resolve_placement(&state.canvas, registry, &source, &target)?;
    apply_placement(state, registry, op)
}

/// Wendet eine aufgelöste Platzierungs-Operation an.
pub fn apply_placement(
    state: &mut DesignerState,
    registry: &FieldRegistry,
    op: PlacementOp,
) -> Result<Option<String>, PlacementError> {
    match op {
        PlacementOp::NoOp => {
            log::debug!("Platzierung: keine Änderung");
            Ok(None)
        }
        PlacementOp::Append { field_type } => {
            let element = construct(registry, &field_type)?;
            let len = state.canvas.len();
            insert_new(state, len, element).map(Some)
        }
        PlacementOp::InsertAt { field_type, index } => {
            let element = construct(registry, &field_type)?;
            insert_new(state, index, element).map(Some)
        }
        PlacementOp::Move {
            element_id,
            target_id,
            half,
        } => {
            if !state.canvas.contains(&element_id) {
                return Err(PlacementError::ElementNotFound(element_id));
            }
            if !state.canvas.contains(&target_id) {
                return Err(PlacementError::ElementNotFound(target_id));
            }
            state.record_undo_snapshot();
            let index = move_element(state.canvas_mut(), &element_id, &target_id, half)?;
            log::info!("Element {} nach Index {} verschoben", element_id, index);
            Ok(Some(element_id))
        }
    }
}

fn insert_new(
    state: &mut DesignerState,
    index: usize,
    element: ElementInstance,
) -> Result<String, PlacementError> {
    if state.canvas.contains(&element.id) {
        return Err(PlacementError::DuplicateId(element.id));
    }
    let id = element.id.clone();
    let field_type = element.field_type.clone();
    state.record_undo_snapshot();
    let index = state.canvas_mut().insert_at(index, element)?;
    if state.options.select_on_drop {
        state.selection.selected_element_id = Some(id.clone());
    }
    log::info!("{} an Index {} eingefügt ({})", field_type, index, id);
    Ok(id)
}

/// Entfernt ein Element; ist es selektiert, wird die Selektion aufgehoben.
pub fn remove_element(
    state: &mut DesignerState,
    element_id: &str,
) -> Result<ElementInstance, PlacementError> {
    if !state.canvas.contains(element_id) {
        return Err(PlacementError::ElementNotFound(element_id.to_string()));
    }
    state.record_undo_snapshot();
    let removed = state.canvas_mut().remove_by_id(element_id)?;
    if state.selection.is_selected(element_id) {
        state.selection.selected_element_id = None;
    }
    log::info!("Element {} ({}) entfernt", element_id, removed.field_type);
    Ok(removed)
}

/// Fügt eine Kopie mit neuer ID direkt hinter dem Element ein.
///
/// Ein gesetzter `customId` wird nicht übernommen, damit Aliase eindeutig bleiben.
pub fn duplicate_element(
    state: &mut DesignerState,
    element_id: &str,
) -> Result<String, PlacementError> {
    let index = state
        .canvas
        .index_of(element_id)
        .ok_or_else(|| PlacementError::ElementNotFound(element_id.to_string()))?;
    let mut copy = state.canvas.elements[index].clone();
    copy.id = new_element_id();
    if !copy.attr_str("customId").is_empty() {
        copy.attributes
            .insert("customId".to_string(), serde_json::Value::from(""));
    }
    let id = copy.id.clone();
    state.record_undo_snapshot();
    state.canvas_mut().insert_at(index + 1, copy)?;
    state.selection.selected_element_id = Some(id.clone());
    log::info!("Element {} dupliziert als {}", element_id, id);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::placement::{DragSource, DropTarget, Half};

    fn state_with(ids: &[&str]) -> DesignerState {
        let mut state = DesignerState::new();
        for id in ids {
            state
                .canvas_mut()
                .append(ElementInstance::new(*id, "TextField"))
                .unwrap();
        }
        state
    }

    #[test]
    fn palette_drop_selects_new_element() {
        let registry = FieldRegistry::with_builtins();
        let mut state = state_with(&["a", "b"]);
        state.drag.drag_start(DragSource::Palette {
            field_type: "NumberField".into(),
        });
        state.drag.drag_over(DropTarget::Element {
            element_id: "b".into(),
            half: Half::Top,
        });

        let id = commit_drop(&mut state, &registry).unwrap().unwrap();
        assert_eq!(state.canvas.index_of(&id), Some(1));
        assert_eq!(state.canvas.elements[1].field_type, "NumberField");
        assert!(state.selection.is_selected(&id));
        assert!(state.can_undo());
        assert!(state.drag.is_idle());
    }

    #[test]
    fn failed_drop_leaves_canvas_and_history_untouched() {
        let registry = FieldRegistry::with_builtins();
        let mut state = state_with(&["a"]);
        state.drag.drag_start(DragSource::Canvas {
            element_id: "a".into(),
        });
        state.drag.drag_over(DropTarget::Element {
            element_id: "weg".into(),
            half: Half::Bottom,
        });
        assert!(commit_drop(&mut state, &registry).is_err());
        assert_eq!(state.canvas.ids(), vec!["a"]);
        assert!(!state.can_undo());
        assert!(state.drag.is_idle());
    }

    #[test]
    fn duplicate_id_insert_records_no_undo_step() {
        let mut state = state_with(&["a"]);
        let err = insert_new(&mut state, 0, ElementInstance::new("a", "NumberField")).unwrap_err();
        assert!(matches!(err, PlacementError::DuplicateId(ref id) if id == "a"));
        assert_eq!(state.canvas.ids(), vec!["a"]);
        assert!(!state.can_undo());
        assert!(state.selection.selected_element_id.is_none());
    }

    #[test]
    fn removing_selected_element_clears_selection() {
        let mut state = state_with(&["a", "b"]);
        state.selection.selected_element_id = Some("a".into());
        remove_element(&mut state, "a").unwrap();
        assert_eq!(state.canvas.ids(), vec!["b"]);
        assert!(state.selection.selected_element_id.is_none());
        assert!(remove_element(&mut state, "a").is_err());
    }

    #[test]
    fn duplicate_inserts_after_source_without_alias() {
        let mut state = DesignerState::new();
        state
            .canvas_mut()
            .append(ElementInstance::new("a", "TextField").with_attr("customId", "mail"))
            .unwrap();
        state
            .canvas_mut()
            .append(ElementInstance::new("b", "TextField"))
            .unwrap();

        let id = duplicate_element(&mut state, "a").unwrap();
        assert_eq!(state.canvas.ids(), vec!["a", id.as_str(), "b"]);
        assert_eq!(state.canvas.elements[1].attr_str("customId"), "");
        assert!(state.canvas.has_unique_ids());
    }
}

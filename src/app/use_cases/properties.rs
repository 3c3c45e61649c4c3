//! Use-Cases für Attribut- und Einstellungsänderungen.

use crate::app::DesignerState;
use crate::core::{Attributes, ElementInstance, GlobalSettingsPatch};
use crate::error::PlacementError;
use crate::fields::card::{apply_card_edit, CardEdit, CardField};
use crate::fields::FieldRegistry;

/// Ersetzt die Attribute eines Elements, wenn sie das Property-Schema erfüllen.
///
/// Liefert `Ok(false)`, wenn die Prüfung fehlschlägt; die Meldungen stehen dann
/// in `state.property_errors` und der Canvas bleibt unverändert.
pub fn update_attributes(
    state: &mut DesignerState,
    registry: &FieldRegistry,
    element_id: &str,
    attributes: Attributes,
) -> Result<bool, PlacementError> {
    let element = state
        .canvas
        .get(element_id)
        .ok_or_else(|| PlacementError::ElementNotFound(element_id.to_string()))?;
    let field_type = registry
        .lookup(&element.field_type)
        .ok_or_else(|| PlacementError::UnknownFieldType(element.field_type.clone()))?;

    let problems = field_type.validate_properties(&attributes);
    if !problems.is_empty() {
        log::warn!(
            "Eigenschaften von {} abgelehnt: {}",
            element_id,
            problems.join("; ")
        );
        state.property_errors = problems;
        return Ok(false);
    }
    state.property_errors.clear();
    if element.attributes == attributes {
        log::debug!("Eigenschaften von {} unverändert", element_id);
        return Ok(true);
    }

    let updated = ElementInstance {
        id: element.id.clone(),
        field_type: element.field_type.clone(),
        attributes,
    };
    state.record_undo_snapshot();
    state.canvas_mut().replace_by_id(element_id, updated)?;
    log::info!("Eigenschaften von {} gespeichert", element_id);
    Ok(true)
}

/// Übernimmt ein Teil-Update der globalen Einstellungen.
pub fn update_global_settings(state: &mut DesignerState, patch: GlobalSettingsPatch) {
    let mut updated = state.canvas.global_settings.clone();
    updated.apply(patch.clone());
    if updated == state.canvas.global_settings {
        log::debug!("Globale Einstellungen unverändert");
        return;
    }
    state.record_undo_snapshot();
    state.canvas_mut().update_global_settings(patch);
    log::info!("Globale Einstellungen aktualisiert");
}

/// Bearbeitet die Blöcke eines Karten-Elements.
pub fn edit_card_blocks(
    state: &mut DesignerState,
    element_id: &str,
    edit: CardEdit,
) -> Result<(), PlacementError> {
    let element = state
        .canvas
        .get(element_id)
        .ok_or_else(|| PlacementError::ElementNotFound(element_id.to_string()))?;
    if element.field_type != "CardField" {
        return Err(PlacementError::UnknownFieldType(element.field_type.clone()));
    }
    let mut blocks = CardField::blocks(element);
    apply_card_edit(&mut blocks, edit)?;

    let mut updated = element.clone();
    CardField::set_blocks(&mut updated, &blocks);
    state.record_undo_snapshot();
    state.canvas_mut().replace_by_id(element_id, updated)?;
    log::info!("Karte {}: {} Block/Blöcke", element_id, blocks.len());
    Ok(())
}

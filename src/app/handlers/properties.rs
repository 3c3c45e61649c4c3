//! Handler für Eigenschaften, globale Einstellungen und Kartenblöcke.

use crate::app::use_cases;
use crate::app::DesignerState;
use crate::core::{Attributes, GlobalSettingsPatch};
use crate::fields::card::CardEdit;
use crate::fields::FieldRegistry;

/// Übernimmt geprüfte Attribute eines Elements.
pub fn update_attributes(
    state: &mut DesignerState,
    registry: &FieldRegistry,
    element_id: &str,
    attributes: Attributes,
) {
    if let Err(e) =
        use_cases::properties::update_attributes(state, registry, element_id, attributes)
    {
        log::warn!("Eigenschaften verworfen: {}", e);
    }
}

/// Übernimmt ein Teil-Update der globalen Einstellungen.
pub fn update_global_settings(state: &mut DesignerState, patch: GlobalSettingsPatch) {
    use_cases::properties::update_global_settings(state, patch);
}

/// Bearbeitet die Blöcke einer Karte.
pub fn edit_card_blocks(state: &mut DesignerState, element_id: &str, edit: CardEdit) {
    if let Err(e) = use_cases::properties::edit_card_blocks(state, element_id, edit) {
        log::warn!("Kartenänderung verworfen: {}", e);
    }
}

//! Designer Controller für zentrale Event-Verarbeitung.

use super::{DesignerCommand, DesignerIntent, DesignerState};
use crate::fields::FieldRegistry;
use crate::ports::FormStore;
use std::sync::Arc;

/// Orchestriert Host-Events und Use-Cases auf den DesignerState.
pub struct DesignerController {
    registry: Arc<FieldRegistry>,
}

impl Default for DesignerController {
    fn default() -> Self {
        Self::new(Arc::new(FieldRegistry::with_builtins()))
    }
}

impl DesignerController {
    /// Erstellt einen Controller über der gegebenen Registry.
    pub fn new(registry: Arc<FieldRegistry>) -> Self {
        Self { registry }
    }

    /// Registry der bekannten Feldtypen.
    pub fn registry(&self) -> &Arc<FieldRegistry> {
        &self.registry
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(
        &mut self,
        state: &mut DesignerState,
        intent: DesignerIntent,
    ) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(
        &self,
        state: &DesignerState,
        intent: DesignerIntent,
    ) -> Vec<DesignerCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem DesignerState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut DesignerState,
        command: DesignerCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Drag & Drop ===
            DesignerCommand::BeginDrag { source } => handlers::placement::begin_drag(state, source),
            DesignerCommand::HoverTarget { target } => handlers::placement::hover(state, target),
            DesignerCommand::LeaveTarget => handlers::placement::leave(state),
            DesignerCommand::CommitDrop => handlers::placement::commit_drop(state, &self.registry),
            DesignerCommand::CancelDrag => handlers::placement::cancel(state),

            // === Selektion & Struktur ===
            DesignerCommand::SelectElement { element_id } => {
                handlers::selection::select(state, element_id)
            }
            DesignerCommand::ClearSelection => handlers::selection::clear(state),
            DesignerCommand::RemoveElement { element_id } => {
                handlers::placement::remove(state, &element_id)
            }
            DesignerCommand::DuplicateElement { element_id } => {
                handlers::placement::duplicate(state, &element_id)
            }

            // === Eigenschaften ===
            DesignerCommand::UpdateElementAttributes {
                element_id,
                attributes,
            } => handlers::properties::update_attributes(
                state,
                &self.registry,
                &element_id,
                attributes,
            ),
            DesignerCommand::UpdateGlobalSettings { patch } => {
                handlers::properties::update_global_settings(state, patch)
            }
            DesignerCommand::EditCardBlocks { element_id, edit } => {
                handlers::properties::edit_card_blocks(state, &element_id, edit)
            }

            // === History ===
            DesignerCommand::Undo => handlers::history::undo(state),
            DesignerCommand::Redo => handlers::history::redo(state),

            // === Datei-I/O & Optionen ===
            DesignerCommand::NewForm => handlers::persistence::new_form(state),
            DesignerCommand::LoadFile { path } => {
                handlers::persistence::load(state, &self.registry, path)?
            }
            DesignerCommand::SaveFile { path } => handlers::persistence::save(state, path)?,
            DesignerCommand::ApplyOptions { options } => {
                handlers::persistence::apply_options(state, *options)
            }
        }

        Ok(())
    }

    /// Speichert das Formular über den Persistenz-Kollaborateur.
    pub fn save_to_store(
        &self,
        state: &mut DesignerState,
        store: &mut dyn FormStore,
        form_id: &str,
    ) -> anyhow::Result<()> {
        super::use_cases::persistence::save_to_store(state, store, form_id)
    }

    /// Lädt ein Formular über den Persistenz-Kollaborateur.
    pub fn load_from_store(
        &self,
        state: &mut DesignerState,
        store: &dyn FormStore,
        form_id: &str,
    ) -> anyhow::Result<()> {
        super::use_cases::persistence::load_from_store(state, &self.registry, store, form_id)
    }
}

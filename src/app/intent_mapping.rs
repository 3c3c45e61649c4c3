//! Mapping von Designer-Intents auf mutierende Commands.

use super::placement::{DragSource, DropTarget};
use super::{DesignerCommand, DesignerIntent, DesignerState};

/// Übersetzt einen `DesignerIntent` in eine Sequenz ausführbarer `DesignerCommand`s.
pub fn map_intent_to_commands(state: &DesignerState, intent: DesignerIntent) -> Vec<DesignerCommand> {
    match intent {
        DesignerIntent::PaletteDragStarted { field_type } => vec![DesignerCommand::BeginDrag {
            source: DragSource::Palette { field_type },
        }],
        DesignerIntent::ElementDragStarted { element_id } => vec![DesignerCommand::BeginDrag {
            source: DragSource::Canvas { element_id },
        }],
        DesignerIntent::DraggedOverCanvas => vec![DesignerCommand::HoverTarget {
            target: DropTarget::CanvasArea,
        }],
        DesignerIntent::DraggedOverElement { element_id, half } => {
            vec![DesignerCommand::HoverTarget {
                target: DropTarget::Element { element_id, half },
            }]
        }
        DesignerIntent::DragLeft => vec![DesignerCommand::LeaveTarget],
        DesignerIntent::DropRequested => {
            if state.drag.is_idle() {
                vec![]
            } else {
                vec![DesignerCommand::CommitDrop]
            }
        }
        DesignerIntent::DragCancelled => vec![DesignerCommand::CancelDrag],

        DesignerIntent::ElementClicked { element_id } => {
            vec![DesignerCommand::SelectElement { element_id }]
        }
        DesignerIntent::CanvasClicked => {
            if state.selection.selected_element_id.is_some() {
                vec![DesignerCommand::ClearSelection]
            } else {
                vec![]
            }
        }
        DesignerIntent::RemoveElementRequested { element_id } => {
            vec![DesignerCommand::RemoveElement { element_id }]
        }
        DesignerIntent::RemoveSelectedRequested => state
            .selection
            .selected_element_id
            .clone()
            .map(|element_id| vec![DesignerCommand::RemoveElement { element_id }])
            .unwrap_or_default(),
        DesignerIntent::DuplicateElementRequested { element_id } => {
            vec![DesignerCommand::DuplicateElement { element_id }]
        }

        DesignerIntent::PropertiesSubmitted {
            element_id,
            attributes,
        } => vec![DesignerCommand::UpdateElementAttributes {
            element_id,
            attributes,
        }],
        DesignerIntent::GlobalSettingsChanged { patch } => {
            vec![DesignerCommand::UpdateGlobalSettings { patch }]
        }
        DesignerIntent::CardBlocksEdited { element_id, edit } => {
            vec![DesignerCommand::EditCardBlocks { element_id, edit }]
        }

        DesignerIntent::UndoRequested => vec![DesignerCommand::Undo],
        DesignerIntent::RedoRequested => vec![DesignerCommand::Redo],

        DesignerIntent::NewFormRequested => vec![DesignerCommand::CancelDrag, DesignerCommand::NewForm],
        DesignerIntent::FileSelected { path } => {
            vec![DesignerCommand::CancelDrag, DesignerCommand::LoadFile { path }]
        }
        DesignerIntent::SaveRequested => vec![DesignerCommand::SaveFile { path: None }],
        DesignerIntent::SaveFilePathSelected { path } => {
            vec![DesignerCommand::SaveFile { path: Some(path) }]
        }
        DesignerIntent::OptionsChanged { options } => {
            vec![DesignerCommand::ApplyOptions { options }]
        }
    }
}

#[cfg(test)]
mod tests;

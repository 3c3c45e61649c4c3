use crate::app::placement::Half;
use crate::core::{Attributes, GlobalSettingsPatch};
use crate::fields::card::CardEdit;
use crate::shared::DesignerOptions;

/// Designer-Intents: Eingaben aus Host/UI ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum DesignerIntent {
    /// Palette-Eintrag wird gezogen
    PaletteDragStarted { field_type: String },
    /// Canvas-Element wird gezogen
    ElementDragStarted { element_id: String },
    /// Zeiger über der freien Canvas-Fläche
    DraggedOverCanvas,
    /// Zeiger über einer Element-Hälfte
    DraggedOverElement { element_id: String, half: Half },
    /// Zeiger hat das Ziel verlassen
    DragLeft,
    /// Maustaste losgelassen
    DropRequested,
    /// Drag abgebrochen (Escape, außerhalb losgelassen)
    DragCancelled,

    /// Element angeklickt
    ElementClicked { element_id: String },
    /// Freie Fläche angeklickt
    CanvasClicked,
    /// Löschen-Button eines Elements
    RemoveElementRequested { element_id: String },
    /// Selektiertes Element löschen (Entf-Taste)
    RemoveSelectedRequested,
    /// Element duplizieren
    DuplicateElementRequested { element_id: String },

    /// Property-Editor bestätigt
    PropertiesSubmitted {
        element_id: String,
        attributes: Attributes,
    },
    /// Globale Einstellungen geändert
    GlobalSettingsChanged { patch: GlobalSettingsPatch },
    /// Blöcke einer Karte bearbeitet
    CardBlocksEdited { element_id: String, edit: CardEdit },

    /// Letzte Aktion rückgängig machen
    UndoRequested,
    /// Rückgängig gemachte Aktion wiederholen
    RedoRequested,

    /// Neues, leeres Formular
    NewFormRequested,
    /// Formular-Datei wurde ausgewählt (Laden)
    FileSelected { path: String },
    /// Unter aktuellem Pfad speichern
    SaveRequested,
    /// Speicherpfad wurde ausgewählt
    SaveFilePathSelected { path: String },
    /// Optionen wurden geändert
    OptionsChanged { options: Box<DesignerOptions> },
}

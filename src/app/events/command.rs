use crate::app::placement::{DragSource, DropTarget};
use crate::core::{Attributes, GlobalSettingsPatch};
use crate::fields::card::CardEdit;
use crate::shared::DesignerOptions;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum DesignerCommand {
    /// Drag-Geste beginnen
    BeginDrag { source: DragSource },
    /// Drag über Ziel
    HoverTarget { target: DropTarget },
    /// Ziel verlassen
    LeaveTarget,
    /// Drop auflösen und übernehmen
    CommitDrop,
    /// Drag verwerfen
    CancelDrag,

    /// Element selektieren
    SelectElement { element_id: String },
    /// Selektion aufheben
    ClearSelection,
    /// Element entfernen
    RemoveElement { element_id: String },
    /// Kopie direkt hinter dem Element einfügen
    DuplicateElement { element_id: String },

    /// Attribute eines Elements ersetzen (nach Schema-Prüfung)
    UpdateElementAttributes {
        element_id: String,
        attributes: Attributes,
    },
    /// Globale Einstellungen teilweise aktualisieren
    UpdateGlobalSettings { patch: GlobalSettingsPatch },
    /// Kartenblöcke bearbeiten
    EditCardBlocks { element_id: String, edit: CardEdit },

    /// Undo
    Undo,
    /// Redo
    Redo,

    /// Leeres Formular beginnen
    NewForm,
    /// Formular aus Datei laden
    LoadFile { path: String },
    /// Formular speichern (`None` = aktueller Pfad)
    SaveFile { path: Option<String> },
    /// Optionen übernehmen
    ApplyOptions { options: Box<DesignerOptions> },
}

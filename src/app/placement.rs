//! Drag-and-Drop-Zustandsmaschine des Canvas.
//!
//! `Idle → Dragging → Hovering ⇄ Dragging → (drop | cancel) → Idle`.
//! Die Auflösung eines Drops in eine Platzierungs-Operation ist rein
//! (`resolve_placement`); die Mutation erfolgt im Use-Case.

use crate::core::CanvasState;
use crate::error::PlacementError;
use crate::fields::FieldRegistry;

/// Obere oder untere Hälfte eines Canvas-Elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    /// Vor dem Element einfügen
    Top,
    /// Nach dem Element einfügen
    Bottom,
}

impl Half {
    /// Versatz zum Index des Ziel-Elements.
    pub fn offset(self) -> usize {
        match self {
            Half::Top => 0,
            Half::Bottom => 1,
        }
    }
}

/// Herkunft eines Drags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// Neues Element aus der Palette
    Palette { field_type: String },
    /// Vorhandenes Canvas-Element
    Canvas { element_id: String },
}

/// Ablageziel unter dem Zeiger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Freie Canvas-Fläche
    CanvasArea,
    /// Hälfte eines vorhandenen Elements
    Element { element_id: String, half: Half },
}

/// Zustand der Drag-Geste.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    /// Kein Drag aktiv
    #[default]
    Idle,
    /// Drag ohne gültiges Ziel
    Dragging { source: DragSource },
    /// Drag über einem Ziel
    Hovering {
        source: DragSource,
        target: DropTarget,
    },
}

impl DragState {
    /// Startet einen Drag. Ein laufender Drag wird ersetzt.
    pub fn drag_start(&mut self, source: DragSource) {
        *self = DragState::Dragging { source };
    }

    /// Zeiger über einem Ziel. Ohne aktiven Drag wirkungslos.
    pub fn drag_over(&mut self, target: DropTarget) {
        if let Some(source) = self.source().cloned() {
            *self = DragState::Hovering { source, target };
        }
    }

    /// Zeiger hat das Ziel verlassen.
    pub fn drag_leave(&mut self) {
        if let DragState::Hovering { source, .. } = self {
            *self = DragState::Dragging {
                source: source.clone(),
            };
        }
    }

    /// Bricht den Drag ohne Mutation ab.
    pub fn cancel(&mut self) {
        *self = DragState::Idle;
    }

    /// Beendet den Drag und liefert Quelle und Ziel.
    ///
    /// Ein Drop ohne Ziel entspricht einem Abbruch (`Ok(None)`).
    pub fn drop(&mut self) -> Result<Option<(DragSource, DropTarget)>, PlacementError> {
        match std::mem::take(self) {
            DragState::Idle => Err(PlacementError::NotDragging),
            DragState::Dragging { .. } => Ok(None),
            DragState::Hovering { source, target } => Ok(Some((source, target))),
        }
    }

    /// Aktuelle Drag-Quelle.
    pub fn source(&self) -> Option<&DragSource> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { source } | DragState::Hovering { source, .. } => Some(source),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }
}

/// Ergebnis der Drop-Auflösung.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOp {
    /// Neues Element am Ende anhängen
    Append { field_type: String },
    /// Neues Element an Index einfügen
    InsertAt { field_type: String, index: usize },
    /// Vorhandenes Element verschieben (Zielindex wird nach dem Entfernen neu bestimmt)
    Move {
        element_id: String,
        target_id: String,
        half: Half,
    },
    /// Keine Änderung
    NoOp,
}

/// Löst einen Drop in eine Operation auf, ohne den Canvas zu verändern.
///
/// Unterschieden wird allein nach der Quelle (Palette oder Canvas).
pub fn resolve_placement(
    canvas: &CanvasState,
    registry: &FieldRegistry,
    source: &DragSource,
    target: &DropTarget,
) -> Result<PlacementOp, PlacementError> {
    match source {
        DragSource::Palette { field_type } => {
            if !registry.contains(field_type) {
                return Err(PlacementError::UnknownFieldType(field_type.clone()));
            }
            match target {
                DropTarget::CanvasArea => Ok(PlacementOp::Append {
                    field_type: field_type.clone(),
                }),
                DropTarget::Element { element_id, half } => {
                    let index = canvas
                        .index_of(element_id)
                        .ok_or_else(|| PlacementError::ElementNotFound(element_id.clone()))?;
                    Ok(PlacementOp::InsertAt {
                        field_type: field_type.clone(),
                        index: index + half.offset(),
                    })
                }
            }
        }
        DragSource::Canvas { element_id } => {
            let DropTarget::Element {
                element_id: target_id,
                half,
            } = target
            else {
                return Ok(PlacementOp::NoOp);
            };
            let from = canvas
                .index_of(element_id)
                .ok_or_else(|| PlacementError::ElementNotFound(element_id.clone()))?;
            let over = canvas
                .index_of(target_id)
                .ok_or_else(|| PlacementError::ElementNotFound(target_id.clone()))?;
            if element_id == target_id {
                return Ok(PlacementOp::NoOp);
            }
            // Zielindex nach dem Entfernen der Quelle
            let over_after_removal = if over > from { over - 1 } else { over };
            let lands_in_place = over_after_removal + half.offset() == from;
            // Untere Hälfte des direkten Nachfolgers gilt als "bleibt stehen"
            let onto_next_bottom = over == from + 1 && *half == Half::Bottom;
            if lands_in_place || onto_next_bottom {
                return Ok(PlacementOp::NoOp);
            }
            Ok(PlacementOp::Move {
                element_id: element_id.clone(),
                target_id: target_id.clone(),
                half: *half,
            })
        }
    }
}

/// Verschiebt ein Element per Entfernen und Neu-Einfügen.
///
/// Der Zielindex wird nach dem Entfernen neu ermittelt. Schlägt ein Schritt
/// fehl, bleibt der Canvas unverändert.
pub fn move_element(
    canvas: &mut CanvasState,
    element_id: &str,
    target_id: &str,
    half: Half,
) -> Result<usize, PlacementError> {
    if !canvas.contains(target_id) || element_id == target_id {
        return Err(PlacementError::ElementNotFound(target_id.to_string()));
    }
    let original_index = canvas
        .index_of(element_id)
        .ok_or_else(|| PlacementError::ElementNotFound(element_id.to_string()))?;
    let element = canvas.remove_by_id(element_id)?;
    let Some(over) = canvas.index_of(target_id) else {
        // Ausgangszustand wiederherstellen
        canvas.insert_at(original_index, element)?;
        return Err(PlacementError::ElementNotFound(target_id.to_string()));
    };
    canvas.insert_at(over + half.offset(), element)
}

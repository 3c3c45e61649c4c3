//! Snapshot-basierter Undo/Redo-Verlauf des Designers.

use super::{DesignerState, SelectionState};
use crate::core::CanvasState;
use std::collections::VecDeque;
use std::sync::Arc;

/// Zustand eines Bearbeitungsschritts: Canvas und Selektion.
///
/// Der Canvas wird per Arc geteilt; kopiert wird erst, wenn ein Use-Case
/// über `DesignerState::canvas_mut()` schreibt.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub canvas: Arc<CanvasState>,
    pub selection: SelectionState,
}

impl Snapshot {
    /// Hält den aktuellen Stand fest (O(1)).
    pub fn from_state(state: &DesignerState) -> Self {
        Self {
            canvas: Arc::clone(&state.canvas),
            selection: state.selection.clone(),
        }
    }

    /// Setzt Canvas und Selektion auf den festgehaltenen Stand.
    pub fn apply_to(self, state: &mut DesignerState) {
        state.canvas = self.canvas;
        state.selection = self.selection;
    }
}

/// Begrenzte Undo- und Redo-Stapel.
///
/// Bei voller Tiefe fällt jeweils der älteste Schritt heraus.
#[derive(Debug, Default)]
pub struct EditHistory {
    undo: VecDeque<Snapshot>,
    redo: VecDeque<Snapshot>,
    max_depth: usize,
}

fn push_bounded(stack: &mut VecDeque<Snapshot>, snap: Snapshot, max_depth: usize) {
    if max_depth == 0 {
        return;
    }
    while stack.len() >= max_depth {
        stack.pop_front();
    }
    stack.push_back(snap);
}

impl EditHistory {
    pub fn new_with_capacity(max_depth: usize) -> Self {
        Self {
            undo: VecDeque::with_capacity(max_depth),
            redo: VecDeque::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Legt den Stand vor einer Mutation ab. Ein neuer Schritt verwirft Redo.
    pub fn record_snapshot(&mut self, snap: Snapshot) {
        if self.max_depth == 0 {
            return;
        }
        push_bounded(&mut self.undo, snap, self.max_depth);
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Anzahl abgelegter Undo-Schritte.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Verwirft alle Schritte (z.B. nach dem Laden eines Formulars).
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// Ändert die maximale Tiefe; überzählige älteste Schritte werden verworfen.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
        for stack in [&mut self.undo, &mut self.redo] {
            let excess = stack.len().saturating_sub(max_depth);
            stack.drain(..excess);
        }
    }

    /// Nimmt den letzten Undo-Schritt; `current` wandert auf den Redo-Stapel.
    pub fn pop_undo_with_current(&mut self, current: Snapshot) -> Option<Snapshot> {
        let prev = self.undo.pop_back()?;
        push_bounded(&mut self.redo, current, self.max_depth);
        Some(prev)
    }

    /// Nimmt den letzten Redo-Schritt; `current` wandert auf den Undo-Stapel.
    pub fn pop_redo_with_current(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo.pop_back()?;
        push_bounded(&mut self.undo, current, self.max_depth);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ElementInstance;

    fn snap(ids: &[&str]) -> Snapshot {
        let mut canvas = CanvasState::default();
        for id in ids {
            canvas
                .append(ElementInstance::new(*id, "TextField"))
                .expect("IDs sollten eindeutig sein");
        }
        Snapshot {
            canvas: Arc::new(canvas),
            selection: SelectionState::default(),
        }
    }

    #[test]
    fn undo_then_redo_walks_both_stacks() {
        let mut history = EditHistory::new_with_capacity(10);
        assert!(!history.can_undo() && !history.can_redo());
        history.record_snapshot(snap(&["a"]));

        let back = history
            .pop_undo_with_current(snap(&["a", "b"]))
            .expect("Undo-Schritt sollte vorhanden sein");
        assert_eq!(back.canvas.ids(), vec!["a"]);
        assert!(history.can_redo());

        let forward = history
            .pop_redo_with_current(back)
            .expect("Redo-Schritt sollte vorhanden sein");
        assert_eq!(forward.canvas.ids(), vec!["a", "b"]);
        assert_eq!(history.undo_len(), 1);
        assert!(!history.can_redo());
    }

    #[test]
    fn recording_after_undo_discards_redo() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record_snapshot(snap(&[]));
        history.pop_undo_with_current(snap(&["x"]));
        history.record_snapshot(snap(&["y"]));
        assert!(!history.can_redo());
    }

    #[test]
    fn depth_limits_and_shrinking() {
        let mut history = EditHistory::new_with_capacity(3);
        for n in ["a", "b", "c", "d", "e"] {
            history.record_snapshot(snap(&[n]));
        }
        assert_eq!(history.undo_len(), 3);

        history.set_max_depth(2);
        let top = history
            .pop_undo_with_current(snap(&[]))
            .expect("Undo-Schritt sollte vorhanden sein");
        assert_eq!(top.canvas.ids(), vec!["e"]);
        let oldest = history
            .pop_undo_with_current(snap(&[]))
            .expect("Undo-Schritt sollte vorhanden sein");
        assert_eq!(oldest.canvas.ids(), vec!["d"]);
        assert!(!history.can_undo());
    }

    #[test]
    fn zero_depth_disables_history() {
        let mut history = EditHistory::new_with_capacity(0);
        history.record_snapshot(snap(&["a"]));
        assert!(!history.can_undo());
    }

    #[test]
    fn snapshot_shares_canvas_until_written() {
        let mut state = DesignerState::new();
        state
            .canvas_mut()
            .append(ElementInstance::new("a", "TextField"))
            .expect("Element sollte eingefügt werden");
        state.selection.selected_element_id = Some("a".into());
        let saved = Snapshot::from_state(&state);
        assert!(Arc::ptr_eq(&saved.canvas, &state.canvas));

        state
            .canvas_mut()
            .remove_by_id("a")
            .expect("Element sollte existieren");
        state.selection.selected_element_id = None;
        assert!(!Arc::ptr_eq(&saved.canvas, &state.canvas));

        saved.apply_to(&mut state);
        assert_eq!(state.canvas.ids(), vec!["a"]);
        assert!(state.selection.is_selected("a"));
    }
}

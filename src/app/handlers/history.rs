//! Handler für Undo/Redo.

use crate::app::history::Snapshot;
use crate::app::DesignerState;

#[derive(Debug, Clone, Copy)]
enum Direction {
    Back,
    Forward,
}

fn step(state: &mut DesignerState, direction: Direction) {
    let current = Snapshot::from_state(state);
    let target = match direction {
        Direction::Back => state.history.pop_undo_with_current(current),
        Direction::Forward => state.history.pop_redo_with_current(current),
    };
    let Some(target) = target else {
        log::debug!("{:?}: kein Verlaufsschritt vorhanden", direction);
        return;
    };
    target.apply_to(state);
    // Eine offene Drag-Geste bezieht sich auf den alten Canvas.
    state.drag.cancel();
    log::info!(
        "{} ausgeführt ({} Elemente)",
        match direction {
            Direction::Back => "Undo",
            Direction::Forward => "Redo",
        },
        state.canvas.len()
    );
}

pub fn undo(state: &mut DesignerState) {
    step(state, Direction::Back);
}

pub fn redo(state: &mut DesignerState) {
    step(state, Direction::Forward);
}

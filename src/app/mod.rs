//! Application-Layer: Controller, State, Events und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
pub mod history;
mod intent_mapping;
pub mod placement;
/// Designer State
///
/// Dieses Modul verwaltet den Zustand einer Bearbeitungssitzung (Canvas, Selektion, Drag).
pub mod state;
pub mod use_cases;

pub use command_log::CommandLog;
pub use controller::DesignerController;
pub use events::{DesignerCommand, DesignerIntent};
pub use placement::{DragSource, DragState, DropTarget, Half, PlacementOp};
pub use state::{DesignerState, SelectionState};

//! Form Designer Library.
//! Formular-Engine (Canvas, Feldtypen, Laufzeit-Bus, Submission) als Library
//! exportiert für Hosts, Tests und Wiederverwendung.

pub mod app;
pub mod bus;
pub mod core;
pub mod envelope;
pub mod error;
pub mod fields;
pub mod ports;
pub mod shared;
pub mod submit;

pub use app::{
    DesignerCommand, DesignerController, DesignerIntent, DesignerState, DragSource, DropTarget,
    Half, SelectionState,
};
pub use bus::{FieldBus, FormRuntime, RuntimeEvent};
pub use core::{Attributes, CanvasState, ElementInstance, GlobalSettings, GlobalSettingsPatch};
pub use envelope::{parse_envelope, parse_values, write_envelope, write_values};
pub use error::{EnvelopeError, EvaluationError, PlacementError, PortError, SubmitError};
pub use fields::{FieldRegistry, FieldType};
pub use shared::DesignerOptions;
pub use submit::{validate_all, SubmissionCoordinator, SubmissionPhase};

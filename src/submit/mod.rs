//! Validierung aller Felder und Submission-Zustandsmaschine.

pub mod coordinator;
pub mod validation;

pub use coordinator::{SubmissionCoordinator, SubmissionPhase};
pub use validation::{failed_ids, is_submittable, validate_all};

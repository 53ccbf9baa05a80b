/// Patient records
pub mod model;

/// Sorted patient list view-state
pub mod roster;

/// Input DTOs
pub mod inputs;

pub use inputs::{InvitePatientInput, InvitedPatient};
pub use model::{PatientDetail, PatientId, PatientSummary};
pub use roster::PatientRoster;

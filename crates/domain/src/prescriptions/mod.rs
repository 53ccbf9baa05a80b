/// Prescriptions and medicines
pub mod model;

/// Input DTOs
pub mod inputs;

pub use inputs::NewPrescriptionInput;
pub use model::{Medicine, PrescribedAt, Prescription, SlotKey};

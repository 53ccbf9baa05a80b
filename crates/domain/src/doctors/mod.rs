/// Doctor profile and partial update
pub mod profile;

/// Input DTOs
pub mod inputs;

pub use inputs::SignupInput;
pub use profile::{DoctorProfile, ProfileUpdate};

//! Doctor App Domain Models

/// Patients and the dashboard roster
pub mod patients;

/// Prescriptions
pub mod prescriptions;

/// Doctor accounts
pub mod doctors;

/// Domain errors
pub mod errors;

/// Locale-aware ordering
pub mod collation;

mod lenient;

pub use errors::{Error, ErrorKind};

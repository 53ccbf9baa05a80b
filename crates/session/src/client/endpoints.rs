//! Endpoint templates of the remote service, as path segments under the base URL.

pub fn signup() -> [&'static str; 3] {
    ["doctor", "auth", "signup"]
}

pub fn doctor(doctor_id: &str) -> [&str; 2] {
    ["doctor", doctor_id]
}

pub fn doctor_patients(doctor_id: &str) -> [&str; 3] {
    ["doctor", doctor_id, "patients"]
}

pub fn create_patient(doctor_id: &str) -> [&str; 3] {
    ["doctor", doctor_id, "create-patient"]
}

pub fn remove_patient<'a>(doctor_id: &'a str, patient_id: &'a str) -> [&'a str; 4] {
    ["doctor", doctor_id, "remove-patient", patient_id]
}

pub fn patient(patient_id: &str) -> [&str; 2] {
    ["patient", patient_id]
}

/// Listing, and deletion with a `time` query parameter.
pub fn patient_prescriptions(patient_id: &str) -> [&str; 3] {
    ["prescription", "patient", patient_id]
}

pub fn prescribe<'a>(doctor_id: &'a str, patient_id: &'a str) -> [&'a str; 5] {
    ["prescription", "doctor", doctor_id, "prescribe", patient_id]
}

pub const PRESCRIBED_AT_QUERY: &str = "time";

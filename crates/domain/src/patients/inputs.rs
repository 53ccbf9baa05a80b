use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

use super::PatientId;

/// Body of `POST /doctor/{doctorId}/create-patient`.
#[derive(Clone, Debug, Serialize, Deserialize, new)]
pub struct InvitePatientInput {
    pub name: String,
    pub email: String,
}

impl InvitePatientInput {
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(Error::validation("Patient name and email are required"));
        }
        Ok(())
    }
}

/// What the service echoes back after an invite was sent.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct InvitedPatient {
    #[serde(default)]
    pub id: Option<PatientId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

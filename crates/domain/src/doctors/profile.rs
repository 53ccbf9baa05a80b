use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct DoctorProfile {
    /// Same value as the session token's subject.
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
}

/// Body of `PUT /doctor/{doctorId}`.
///
/// Absent optional fields are left out of the payload rather than sent empty, since the
/// service replaces whatever it receives.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq, new)]
pub struct ProfileUpdate {
    pub name: String,
    #[new(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[new(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

impl ProfileUpdate {
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = Some(specialization.into());
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("Name is required"));
        }
        Ok(())
    }
}

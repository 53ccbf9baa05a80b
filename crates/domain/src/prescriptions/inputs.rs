use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

use super::Medicine;

/// Body of `POST /prescription/doctor/{doctorId}/prescribe/{patientId}`.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq, new)]
pub struct NewPrescriptionInput {
    pub medicines: Vec<Medicine>,
    #[new(default)]
    pub warning: i64,
    #[new(default)]
    pub danger: i64,
}

impl NewPrescriptionInput {
    pub fn single(medicine: Medicine) -> Self {
        Self::new(vec![medicine])
    }

    pub fn with_flags(mut self, warning: i64, danger: i64) -> Self {
        self.warning = warning;
        self.danger = danger;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.medicines.is_empty() {
            return Err(Error::validation("A prescription needs at least one medicine"));
        }
        for (index, medicine) in self.medicines.iter().enumerate() {
            let missing = medicine.missing_fields();
            if !missing.is_empty() {
                return Err(Error::validation(format!(
                    "Medicine {} is missing: {}",
                    index + 1,
                    missing.join(", ")
                )));
            }
        }
        Ok(())
    }
}

use std::fmt;

use derive_new::new;
use serde::Serialize;

use crate::errors::Error;

/// Body of `POST /doctor/auth/signup`.
#[derive(Clone, Serialize, new)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    pub password: String,
}

impl SignupInput {
    pub fn validate(&self) -> Result<(), Error> {
        let fields = [&self.name, &self.email, &self.phone, &self.specialization, &self.password];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(Error::validation("Please fill all fields"));
        }
        Ok(())
    }
}

impl fmt::Debug for SignupInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("specialization", &self.specialization)
            .field("password", &"<redacted>")
            .finish()
    }
}

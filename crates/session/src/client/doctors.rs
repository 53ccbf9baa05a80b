use domain::doctors::{DoctorProfile, ProfileUpdate, SignupInput};
use domain::Error;
use reqwest::Method;

use super::{endpoints, ApiClient};
use crate::token::{self, Claims};

impl ApiClient {
    /// Registers a doctor account. The service answers with a message on failure, shown as is.
    ///
    /// No token is stored; the issued token is handed to [`ApiClient::sign_in`] separately.
    pub async fn sign_up(&self, input: &SignupInput) -> Result<(), Error> {
        const OP: &str = "sign_up";
        input.validate()?;

        let url = self.url(&endpoints::signup());
        let request = self.request(Method::POST, url).json(input);
        self.send_reporting_message(OP, request, Some("Signup failed")).await?;

        tracing::info!("doctor signed up");
        Ok(())
    }

    /// Stores an issued session token after checking it carries a subject.
    pub async fn sign_in(&self, token: &str) -> Result<Claims, Error> {
        let claims = token::decode(token).map_err(|_| Error::InvalidSession)?;
        if claims.subject.is_none() {
            return Err(Error::InvalidSession);
        }

        self.store.set(token).await.map_err(|err| {
            tracing::warn!("failed to store session token: {}", err);
            Error::Storage
        })?;

        tracing::info!("signed in");
        Ok(claims)
    }

    pub async fn log_out(&self) -> Result<(), Error> {
        self.store.clear().await.map_err(|err| {
            tracing::warn!("failed to clear session token: {}", err);
            Error::Storage
        })?;

        tracing::info!("signed out");
        Ok(())
    }

    /// Profile as embedded in the session token. No request is made, so the values are
    /// those at issuance.
    pub async fn current_profile(&self) -> Result<DoctorProfile, Error> {
        let identity = self.identity().await?;
        let claims = &identity.claims;

        Ok(DoctorProfile {
            id: identity.doctor_id.clone(),
            name: claims.display_name().to_string(),
            email: claims.email.clone(),
            phone: claims.extra_str("phone").map(str::to_string),
            specialization: claims.extra_str("specialization").map(str::to_string),
        })
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), Error> {
        const OP: &str = "update_profile";
        update.validate()?;
        let identity = self.identity().await?;

        let url = self.url(&endpoints::doctor(&identity.doctor_id));
        self.send(OP, self.authorized(Method::PUT, url, &identity).json(update)).await?;

        tracing::info!("profile updated");
        Ok(())
    }
}

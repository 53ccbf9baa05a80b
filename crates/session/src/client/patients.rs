use domain::patients::{
    InvitePatientInput, InvitedPatient, PatientDetail, PatientId, PatientRoster, PatientSummary,
};
use domain::Error;
use reqwest::Method;

use super::{endpoints, ApiClient};

impl ApiClient {
    /// The signed-in doctor's patients, sorted by name.
    pub async fn list_patients(&self) -> Result<PatientRoster, Error> {
        const OP: &str = "list_patients";
        let identity = self.identity().await?;

        let url = self.url(&endpoints::doctor_patients(&identity.doctor_id));
        let response = self.send(OP, self.authorized(Method::GET, url, &identity)).await?;
        let patients: Vec<PatientSummary> = Self::read_json(OP, response).await?;

        tracing::debug!(count = patients.len(), "patients listed");
        Ok(PatientRoster::from_unsorted(patients))
    }

    /// Creates a patient under the signed-in doctor. The service sends the invite email.
    pub async fn invite_patient(&self, input: &InvitePatientInput) -> Result<InvitedPatient, Error> {
        const OP: &str = "invite_patient";
        input.validate()?;
        let identity = self.identity().await?;

        let url = self.url(&endpoints::create_patient(&identity.doctor_id));
        let request = self.authorized(Method::POST, url, &identity).json(input);
        let response = self.send_reporting_message(OP, request, None).await?;

        let invited: InvitedPatient = Self::read_json(OP, response).await?;
        tracing::info!("patient invited");
        Ok(invited)
    }

    pub async fn remove_patient(&self, patient_id: &PatientId) -> Result<(), Error> {
        const OP: &str = "remove_patient";
        let identity = self.identity().await?;

        let url = self.url(&endpoints::remove_patient(&identity.doctor_id, patient_id.as_str()));
        self.send(OP, self.authorized(Method::DELETE, url, &identity)).await?;

        tracing::info!(patient = %patient_id, "patient removed");
        Ok(())
    }

    /// Removes a patient on the service and returns `roster` without them.
    ///
    /// On any failure `roster` is left as it was and the error is returned.
    pub async fn remove_patient_from(
        &self,
        roster: &PatientRoster,
        patient_id: &PatientId,
    ) -> Result<PatientRoster, Error> {
        self.remove_patient(patient_id).await?;
        Ok(roster.without(patient_id))
    }

    /// Patient record. The route is public, so no session is needed.
    pub async fn patient_detail(&self, patient_id: &PatientId) -> Result<PatientDetail, Error> {
        const OP: &str = "patient_detail";

        let url = self.url(&endpoints::patient(patient_id.as_str()));
        let response = self.send(OP, self.request(Method::GET, url)).await?;
        Self::read_json(OP, response).await
    }
}

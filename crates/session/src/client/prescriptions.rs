use domain::patients::PatientId;
use domain::prescriptions::{NewPrescriptionInput, Prescription, SlotKey};
use domain::Error;
use reqwest::Method;
use serde_json::Value;

use super::{endpoints, ApiClient, Identity, ScreenScope};

impl ApiClient {
    /// A patient's prescriptions, in service order. Public route.
    ///
    /// The service answers with something other than an array when a patient has no
    /// prescriptions yet; that reads as an empty list.
    pub async fn list_prescriptions(&self, patient_id: &PatientId) -> Result<Vec<Prescription>, Error> {
        const OP: &str = "list_prescriptions";

        let url = self.url(&endpoints::patient_prescriptions(patient_id.as_str()));
        let response = self.send(OP, self.request(Method::GET, url)).await?;

        match Self::read_json::<Value>(OP, response).await? {
            body @ Value::Array(_) => serde_json::from_value(body).map_err(|err| {
                tracing::warn!(operation = OP, "unexpected prescription entry: {}", err);
                Error::MalformedResponse { operation: OP }
            }),
            _ => Ok(Vec::new()),
        }
    }

    pub async fn create_prescription(
        &self,
        patient_id: &PatientId,
        input: &NewPrescriptionInput,
    ) -> Result<(), Error> {
        input.validate()?;
        let identity = self.identity().await?;
        self.post_prescription(&identity, patient_id, input).await
    }

    /// Deletes the prescription issued to a patient at `slot.prescribed_at`. Public route.
    pub async fn delete_prescription(&self, slot: &SlotKey) -> Result<(), Error> {
        const OP: &str = "delete_prescription";

        let mut url = self.url(&endpoints::patient_prescriptions(slot.patient_id.as_str()));
        url.query_pairs_mut()
            .append_pair(endpoints::PRESCRIBED_AT_QUERY, slot.prescribed_at.as_str());
        self.send(OP, self.request(Method::DELETE, url)).await?;

        tracing::info!(%slot, "prescription deleted");
        Ok(())
    }

    /// Edits a prescription by deleting it and issuing `input` in its place.
    ///
    /// The service has no update route, so between the two calls the slot is empty. Input and
    /// session are checked before anything is deleted, and `scope` is only honoured up to
    /// that point. Once the delete is sent the edit runs to completion on its own task, even
    /// if the screen goes away. If the delete succeeds but every create attempt fails, the old
    /// prescription is gone and `PartialFailure` is returned carrying the last create error.
    pub async fn replace_prescription(
        &self,
        scope: &ScreenScope,
        slot: &SlotKey,
        input: &NewPrescriptionInput,
    ) -> Result<(), Error> {
        const OP: &str = "replace_prescription";
        input.validate()?;
        let identity = scope.run(OP, self.identity()).await?;
        if scope.is_cancelled() {
            return Err(Error::Cancelled { operation: OP });
        }

        let task = tokio::spawn({
            let client = self.clone();
            let slot = slot.clone();
            let input = input.clone();
            async move { client.delete_and_recreate(&identity, &slot, &input).await }
        });

        task.await.unwrap_or_else(|err| {
            tracing::error!(%slot, "prescription edit aborted: {}", err);
            Err(Error::PartialFailure {
                slot: slot.clone(),
                source: Box::new(Error::RequestFailed {
                    operation: "create_prescription",
                    status: None,
                }),
            })
        })
    }

    async fn delete_and_recreate(
        &self,
        identity: &Identity,
        slot: &SlotKey,
        input: &NewPrescriptionInput,
    ) -> Result<(), Error> {
        self.delete_prescription(slot).await?;

        let attempts = self.config().replace_create_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.post_prescription(identity, &slot.patient_id, input).await {
                Ok(()) => return Ok(()),
                Err(err) if attempt < attempts => {
                    tracing::warn!(%slot, attempt, "recreating prescription failed, retrying: {}", err);
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!(%slot, attempt, "prescription deleted but not recreated: {}", err);
                    return Err(Error::PartialFailure { slot: slot.clone(), source: Box::new(err) });
                }
            }
        }
    }

    async fn post_prescription(
        &self,
        identity: &Identity,
        patient_id: &PatientId,
        input: &NewPrescriptionInput,
    ) -> Result<(), Error> {
        const OP: &str = "create_prescription";

        let url = self.url(&endpoints::prescribe(&identity.doctor_id, patient_id.as_str()));
        let request = self.authorized(Method::POST, url, identity).json(input);
        self.send_reporting_message(OP, request, None).await?;

        tracing::info!(patient = %patient_id, medicines = input.medicines.len(), "prescription created");
        Ok(())
    }
}

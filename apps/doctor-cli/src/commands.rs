use chrono::Local;
use domain::doctors::{ProfileUpdate, SignupInput};
use domain::patients::{InvitePatientInput, PatientId};
use domain::prescriptions::{NewPrescriptionInput, PrescribedAt, SlotKey};
use domain::Error;
use serde::Serialize;
use session::{ApiClient, ScreenScope};

use crate::cli::{Command, PrescriptionArgs};

pub async fn run(client: &ApiClient, scope: &ScreenScope, command: Command) -> Result<(), Error> {
    match command {
        Command::Signup { name, email, phone, specialization, password } => {
            let input = SignupInput::new(name, email, phone, specialization, password);
            scope.run("sign_up", client.sign_up(&input)).await?;
            println!("Signup successful. Sign in with the token you were issued.");
        }
        Command::SignIn { token } => {
            let claims = scope.run("sign_in", client.sign_in(&token)).await?;
            println!("Signed in as {}", claims.display_name());
        }
        Command::Logout => {
            scope.run("log_out", client.log_out()).await?;
            println!("Signed out");
        }
        Command::Whoami => {
            let profile = scope.run("current_profile", client.current_profile()).await?;
            print_json(&profile);
        }
        Command::UpdateProfile { name, phone, specialization } => {
            let update = ProfileUpdate { name, phone, specialization };
            scope.run("update_profile", client.update_profile(&update)).await?;
            println!("Profile updated");
        }
        Command::Patients => {
            let roster = scope.run("list_patients", client.list_patients()).await?;
            if roster.is_empty() {
                println!("No patients yet");
            }
            for patient in &roster {
                println!("{}\t{}", patient.id, patient.name);
            }
        }
        Command::Invite { name, email } => {
            let input = InvitePatientInput::new(name, email);
            let invited = scope.run("invite_patient", client.invite_patient(&input)).await?;
            let email = invited.email.unwrap_or(input.email);
            println!("Invite sent to {email}");
        }
        Command::RemovePatient { patient_id } => {
            let id = PatientId::from(patient_id);
            scope.run("remove_patient", client.remove_patient(&id)).await?;
            println!("Patient {id} removed");
        }
        Command::Patient { patient_id } => {
            let id = PatientId::from(patient_id);
            let detail = scope.run("patient_detail", client.patient_detail(&id)).await?;
            println!("{}", detail.display_name());
            match detail.age_on(Local::now().date_naive()) {
                Some(age) => println!("Age: {age}"),
                None => println!("Age: unknown"),
            }
        }
        Command::Prescriptions { patient_id } => {
            let id = PatientId::from(patient_id);
            let prescriptions =
                scope.run("list_prescriptions", client.list_prescriptions(&id)).await?;
            print_json(&prescriptions);
        }
        Command::Prescribe { patient_id, prescription } => {
            let id = PatientId::from(patient_id);
            let input = prescription.into_input();
            scope.run("create_prescription", client.create_prescription(&id, &input)).await?;
            println!("Prescription added");
        }
        Command::DeletePrescription { patient_id, time } => {
            let slot = SlotKey::new(patient_id.into(), PrescribedAt::from(time));
            scope.run("delete_prescription", client.delete_prescription(&slot)).await?;
            println!("Prescription deleted");
        }
        Command::EditPrescription { patient_id, time, prescription } => {
            let slot = SlotKey::new(patient_id.into(), PrescribedAt::from(time));
            let input = prescription.into_input();
            client.replace_prescription(scope, &slot, &input).await?;
            println!("Prescription updated");
        }
    }
    Ok(())
}

impl PrescriptionArgs {
    fn into_input(self) -> NewPrescriptionInput {
        NewPrescriptionInput::new(self.medicines).with_flags(self.warning, self.danger)
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => tracing::error!("could not render output: {}", err),
    }
}

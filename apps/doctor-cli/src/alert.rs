use domain::{Error, ErrorKind};

/// The one-line notice shown when an operation fails.
pub fn message(err: &Error) -> String {
    match err {
        Error::RequestFailed { operation, .. } => failed(operation).to_string(),
        Error::RequestFailedWithMessage { message, .. } | Error::Validation { message } => {
            message.clone()
        }
        Error::PartialFailure { .. } => format!("{err}. Please enter it again."),
        _ => canned(err.kind()).to_string(),
    }
}

fn canned(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Unauthenticated => "You are not signed in. Run `doctor-cli sign-in <token>` first.",
        ErrorKind::InvalidSession => "Your session is no longer valid. Please sign in again.",
        ErrorKind::TimedOut => "The server took too long to respond. Try again.",
        ErrorKind::Cancelled => "Cancelled.",
        ErrorKind::MalformedResponse => "The server sent a response this app does not understand.",
        ErrorKind::Storage => "Could not save the session on this device.",
        _ => "Something went wrong.",
    }
}

fn failed(operation: &str) -> &'static str {
    match operation {
        "list_patients" => "Failed to fetch patients",
        "invite_patient" => "Failed to create patient",
        "remove_patient" => "Failed to remove patient",
        "patient_detail" => "Failed to load patient",
        "list_prescriptions" => "Failed to fetch prescriptions",
        "create_prescription" => "Failed to add prescription",
        "delete_prescription" => "Failed to delete prescription",
        "update_profile" => "Failed to update profile",
        "sign_up" => "Signup failed",
        _ => "Request failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_failures_name_the_action() {
        let err = Error::RequestFailed { operation: "remove_patient", status: Some(500) };
        assert_eq!(message(&err), "Failed to remove patient");
    }

    #[test]
    fn validation_shows_the_bare_message() {
        assert_eq!(message(&Error::validation("Please fill all fields")), "Please fill all fields");
    }

    #[test]
    fn service_messages_pass_through() {
        let err = Error::RequestFailedWithMessage {
            operation: "sign_up",
            status: 409,
            message: "Email already registered".into(),
        };
        assert_eq!(message(&err), "Email already registered");
    }
}

use clap::{Parser, Subcommand};
use domain::prescriptions::Medicine;

#[derive(Debug, Parser)]
#[command(version, about = "Doctor's patient and prescription console")]
pub struct Cli {
    /// Overrides HEIMDALL_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a doctor account
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        specialization: String,
        #[arg(long)]
        password: String,
    },
    /// Store a session token issued by the service
    SignIn { token: String },
    /// Forget the stored session token
    Logout,
    /// Show the signed-in doctor
    Whoami,
    /// Change the signed-in doctor's name, phone or specialization
    UpdateProfile {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        specialization: Option<String>,
    },
    /// List patients, sorted by name
    Patients,
    /// Create a patient and send them an invite email
    Invite {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Remove a patient from the roster
    RemovePatient { patient_id: String },
    /// Show one patient with their age
    Patient { patient_id: String },
    /// List a patient's prescriptions
    Prescriptions { patient_id: String },
    /// Add a prescription for a patient
    Prescribe {
        patient_id: String,
        #[command(flatten)]
        prescription: PrescriptionArgs,
    },
    /// Delete the prescription issued at `--time`
    DeletePrescription {
        patient_id: String,
        /// `prescribedAt` exactly as listed
        #[arg(long)]
        time: String,
    },
    /// Replace a prescription with a new one
    EditPrescription {
        patient_id: String,
        #[arg(long)]
        time: String,
        #[command(flatten)]
        prescription: PrescriptionArgs,
    },
}

#[derive(Debug, clap::Args)]
pub struct PrescriptionArgs {
    /// name:quantity:units:frequency[:instructions], repeatable
    #[arg(long = "medicine", required = true, value_parser = parse_medicine)]
    pub medicines: Vec<Medicine>,

    #[arg(long, default_value_t = 0)]
    pub warning: i64,

    #[arg(long, default_value_t = 0)]
    pub danger: i64,
}

fn parse_medicine(raw: &str) -> Result<Medicine, String> {
    let mut parts = raw.splitn(5, ':').map(str::trim);
    let mut next = |field: &str| {
        parts
            .next()
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .ok_or_else(|| format!("medicine is missing its {field}"))
    };

    let name = next("name")?;
    let quantity = next("quantity")?;
    let units = next("units")?;
    let frequency = next("frequency")?;
    let instructions = next("instructions").ok();

    Ok(Medicine { name, quantity, units, frequency, instructions })
}

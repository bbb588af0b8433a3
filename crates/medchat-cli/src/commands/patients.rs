use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use medchat_application::AppContext;
use medchat_core::patient::{Patient, PatientDraft};

#[derive(Subcommand)]
pub enum PatientAction {
    /// List all patients
    List,
    /// Show one patient
    Show { id: String },
    /// Create a patient
    Create(PatientFields),
    /// Replace a patient's fields
    Update {
        id: String,
        #[command(flatten)]
        fields: PatientFields,
    },
    /// Delete a patient
    Delete { id: String },
}

#[derive(Args)]
pub struct PatientFields {
    first_name: String,
    last_name: String,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    dob: Option<NaiveDate>,
    #[arg(long)]
    gender: Option<String>,
    /// Medical record number
    #[arg(long)]
    mrn: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl From<PatientFields> for PatientDraft {
    fn from(f: PatientFields) -> Self {
        Self {
            first_name: f.first_name,
            last_name: f.last_name,
            date_of_birth: f.dob,
            gender: f.gender,
            medical_record_number: f.mrn,
            phone: f.phone,
            email: f.email,
            notes: f.notes,
        }
    }
}

pub async fn run(ctx: &AppContext, action: PatientAction) -> Result<()> {
    match action {
        PatientAction::List => {
            ctx.patients.list().await?;
            let patients = ctx.patients.patients().await;
            if patients.is_empty() {
                println!("No patients yet");
            }
            for patient in &patients {
                println!("{}", summary(patient));
            }
        }
        PatientAction::Show { id } => print_details(&ctx.patients.get(&id).await?),
        PatientAction::Create(fields) => {
            let created = ctx.patients.create(&fields.into()).await?;
            println!("✅ Created patient {}", summary(&created));
        }
        PatientAction::Update { id, fields } => {
            let updated = ctx.patients.update(&id, &fields.into()).await?;
            println!("✅ Updated patient {}", summary(&updated));
        }
        PatientAction::Delete { id } => {
            ctx.patients.delete(&id).await?;
            println!("🗑️  Deleted patient {}", id);
        }
    }
    Ok(())
}

fn summary(patient: &Patient) -> String {
    match patient.date_of_birth {
        Some(dob) => format!("{}  {} (born {})", patient.id, patient.full_name(), dob),
        None => format!("{}  {}", patient.id, patient.full_name()),
    }
}

fn print_details(patient: &Patient) {
    println!("{}", summary(patient));
    let fields = [
        ("gender", &patient.gender),
        ("mrn", &patient.medical_record_number),
        ("phone", &patient.phone),
        ("email", &patient.email),
        ("notes", &patient.notes),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("  {label}: {value}");
        }
    }
}

use anyhow::Result;
use clap::{Args, Subcommand};
use medchat_application::AppContext;
use medchat_core::case::{Case, CaseDraft, CaseStatus};

#[derive(Subcommand)]
pub enum CaseAction {
    /// List the cases of a patient
    List { patient_id: String },
    /// Show one case
    Show { id: String },
    /// Open a new case for a patient
    Create(CaseFields),
    /// Replace a case's fields
    Update {
        id: String,
        #[command(flatten)]
        fields: CaseFields,
    },
    /// Delete a case
    Delete { id: String },
}

#[derive(Args)]
pub struct CaseFields {
    patient_id: String,
    title: String,
    #[arg(long)]
    description: Option<String>,
    /// open, in_progress or closed
    #[arg(long)]
    status: Option<CaseStatus>,
    #[arg(long)]
    diagnosis: Option<String>,
}

impl From<CaseFields> for CaseDraft {
    fn from(f: CaseFields) -> Self {
        Self {
            patient_id: f.patient_id,
            title: f.title,
            description: f.description,
            status: f.status,
            diagnosis: f.diagnosis,
        }
    }
}

pub async fn run(ctx: &AppContext, action: CaseAction) -> Result<()> {
    match action {
        CaseAction::List { patient_id } => {
            let cases = ctx.cases.list_for_patient(&patient_id).await?;
            if cases.is_empty() {
                println!("No cases for patient {}", patient_id);
            }
            for case in &cases {
                println!("{}", summary(case));
            }
        }
        CaseAction::Show { id } => {
            let case = ctx.cases.get(&id).await?;
            println!("{}", summary(&case));
            println!("  patient: {}", case.patient_id);
            if let Some(description) = &case.description {
                println!("  description: {}", description);
            }
            if let Some(diagnosis) = &case.diagnosis {
                println!("  diagnosis: {}", diagnosis);
            }
        }
        CaseAction::Create(fields) => {
            let created = ctx.cases.create(&fields.into()).await?;
            println!("✅ Created case {}", summary(&created));
        }
        CaseAction::Update { id, fields } => {
            let updated = ctx.cases.update(&id, &fields.into()).await?;
            println!("✅ Updated case {}", summary(&updated));
        }
        CaseAction::Delete { id } => {
            ctx.cases.delete(&id).await?;
            println!("🗑️  Deleted case {}", id);
        }
    }
    Ok(())
}

fn summary(case: &Case) -> String {
    format!("{}  [{}] {}", case.id, case.status.as_str(), case.title)
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use medchat_application::{AppContext, NotificationLevel};
use medchat_infrastructure::ConfigService;
use medchat_infrastructure::config_service::{ENV_API_URL, ENV_DATA_DIR};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{auth, cases, messages, patients, sessions, settings};

#[derive(Parser)]
#[command(name = "medchat")]
#[command(about = "MedChat - patients, cases and AI consultations from the terminal", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides config and MEDCHAT_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory for store snapshots, overrides config and MEDCHAT_DATA_DIR
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session tokens
    Login { email: String, password: String },
    /// Create an account and sign in
    Register {
        email: String,
        password: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Sign out and forget cached consultations
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Exchange the refresh token for a new access token
    Refresh,
    /// Re-authenticate with the stored refresh token
    Relogin,
    /// Manage patients
    Patient {
        #[command(subcommand)]
        action: patients::PatientAction,
    },
    /// Manage cases
    Case {
        #[command(subcommand)]
        action: cases::CaseAction,
    },
    /// Manage chat sessions
    Session {
        #[command(subcommand)]
        action: sessions::SessionAction,
    },
    /// Read and send chat messages
    Message {
        #[command(subcommand)]
        action: messages::MessageAction,
    },
    /// Generation settings used when sending messages
    Settings {
        #[command(subcommand)]
        action: settings::SettingsAction,
    },
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let service = match &cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    };
    let api_url = cli.api_url.clone();
    let data_dir = cli
        .data_dir
        .as_ref()
        .map(|d| d.to_string_lossy().into_owned());
    let config = service.load_with(|key| {
        let flag = match key {
            ENV_API_URL => api_url.clone(),
            ENV_DATA_DIR => data_dir.clone(),
            _ => None,
        };
        flag.or_else(|| std::env::var(key).ok())
    })?;

    init_tracing(&config.log_level);

    let ctx = AppContext::new(config)?;
    ctx.bootstrap().await?;
    let mut toasts = ctx.notifier.subscribe();

    match cli.command {
        Commands::Login { email, password } => auth::login(&ctx, &email, &password).await?,
        Commands::Register {
            email,
            password,
            name,
        } => auth::register(&ctx, &email, &password, name.as_deref()).await?,
        Commands::Logout => auth::logout(&ctx).await,
        Commands::Whoami => auth::whoami(&ctx).await?,
        Commands::Refresh => auth::refresh(&ctx).await?,
        Commands::Relogin => auth::relogin(&ctx).await?,
        Commands::Patient { action } => patients::run(&ctx, action).await?,
        Commands::Case { action } => cases::run(&ctx, action).await?,
        Commands::Session { action } => sessions::run(&ctx, action).await?,
        Commands::Message { action } => messages::run(&ctx, action).await?,
        Commands::Settings { action } => settings::run(&ctx, action).await?,
    }

    while let Ok(toast) = toasts.try_recv() {
        if toast.level == NotificationLevel::Info {
            println!("💬 {}", toast);
        }
    }

    Ok(())
}

use crate::auth_store::AuthStore;
use crate::case_store::CaseStore;
use crate::chat::ChatStore;
use crate::notification::Notifier;
use crate::patient_store::PatientStore;
use crate::settings_store::SettingsStore;
use medchat_core::Result;
use medchat_core::auth::{AuthApi, TokenHandle};
use medchat_core::case::CaseApi;
use medchat_core::patient::PatientApi;
use medchat_core::session::ChatApi;
use medchat_core::state::SnapshotRepository;
use medchat_infrastructure::paths::MedChatPaths;
use medchat_infrastructure::{
    AppConfig, FileSnapshotRepository, HttpClient, RestAuthApi, RestCaseApi, RestChatApi,
    RestPatientApi,
};
use std::sync::Arc;

/// Backend contracts the stores talk to.
pub struct Backends {
    pub auth: Arc<dyn AuthApi>,
    pub patients: Arc<dyn PatientApi>,
    pub cases: Arc<dyn CaseApi>,
    pub chat: Arc<dyn ChatApi>,
}

impl Backends {
    /// REST implementations sharing one HTTP client.
    pub fn rest(http: HttpClient) -> Self {
        Self {
            auth: Arc::new(RestAuthApi::new(http.clone())),
            patients: Arc::new(RestPatientApi::new(http.clone())),
            cases: Arc::new(RestCaseApi::new(http.clone())),
            chat: Arc::new(RestChatApi::new(http)),
        }
    }
}

/// Owns every store of one running client.
///
/// Build it once at startup and pass it by reference; nothing in the
/// client is reachable through globals.
pub struct AppContext {
    pub config: AppConfig,
    pub token: TokenHandle,
    pub notifier: Notifier,
    pub auth: Arc<AuthStore>,
    pub patients: Arc<PatientStore>,
    pub cases: Arc<CaseStore>,
    pub chat: Arc<ChatStore>,
    pub settings: Arc<SettingsStore>,
}

impl AppContext {
    /// Wires REST backends and file snapshots from the configuration.
    pub fn new(config: AppConfig) -> Result<Self> {
        let token = TokenHandle::new();
        let http = HttpClient::new(&config.api_base_url, &config.user_agent, token.clone())?;
        let snapshot_dir = MedChatPaths::snapshot_dir(&config.resolved_data_dir()?);
        tracing::debug!("Snapshots stored in {}", snapshot_dir.display());
        let snapshots: Arc<dyn SnapshotRepository> =
            Arc::new(FileSnapshotRepository::new(snapshot_dir));
        Ok(Self::with_parts(
            config,
            token,
            Backends::rest(http),
            snapshots,
        ))
    }

    pub fn with_parts(
        config: AppConfig,
        token: TokenHandle,
        backends: Backends,
        snapshots: Arc<dyn SnapshotRepository>,
    ) -> Self {
        let notifier = Notifier::default();
        let settings = Arc::new(SettingsStore::new(snapshots.clone()));
        Self {
            auth: Arc::new(AuthStore::new(
                backends.auth,
                token.clone(),
                snapshots.clone(),
                notifier.clone(),
            )),
            patients: Arc::new(PatientStore::new(backends.patients, notifier.clone())),
            cases: Arc::new(CaseStore::new(backends.cases, notifier.clone())),
            chat: Arc::new(ChatStore::new(
                backends.chat,
                settings.clone(),
                snapshots,
                notifier.clone(),
            )),
            settings,
            config,
            token,
            notifier,
        }
    }

    /// Restores persisted snapshots and refreshes the signed-in user.
    ///
    /// A snapshot that cannot be read is logged and skipped so a corrupt
    /// file never prevents startup.
    pub async fn bootstrap(&self) -> Result<()> {
        if let Err(e) = self.auth.restore().await {
            tracing::warn!("Ignoring unreadable auth snapshot: {}", e);
        }
        if let Err(e) = self.settings.restore().await {
            tracing::warn!("Ignoring unreadable settings snapshot: {}", e);
        }
        if let Err(e) = self.chat.restore().await {
            tracing::warn!("Ignoring unreadable chat snapshot: {}", e);
        }
        if self.auth.is_authenticated().await {
            self.auth.fetch_me().await;
        }
        tracing::info!("Client ready against {}", self.config.api_base_url);
        Ok(())
    }

    /// Signs out and forgets every cached consultation.
    pub async fn logout(&self) {
        self.auth.logout().await;
        self.chat.clear().await;
    }
}

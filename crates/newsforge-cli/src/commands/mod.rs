use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use newsforge_application::{NewsService, PublishingService, SynthesisDispatcher};
use newsforge_core::config::Settings;
use newsforge_core::settings::SettingsService;
use newsforge_core::synthesis::{ArticleSimulator, ContentTemplates};
use newsforge_infrastructure::SettingsServiceImpl;
use newsforge_interaction::{
    BackendClient, BackendHttp, ChatGptAdapter, ClaudeAdapter, GeminiSearchClient,
};

pub mod article;
pub mod breaking;
pub mod news;
pub mod preference;
pub mod utils;

/// Services shared by every subcommand.
pub struct AppContext {
    pub settings_service: SettingsServiceImpl,
    pub dispatcher: SynthesisDispatcher,
    pub chatgpt: ChatGptAdapter,
    pub claude: ClaudeAdapter,
    pub backend: BackendClient,
    pub news: NewsService,
    pub publishing: PublishingService,
}

impl AppContext {
    pub fn open_default(templates: Option<&Path>) -> Result<Self> {
        let settings_service =
            SettingsServiceImpl::open_default().context("Failed to locate configuration")?;
        let http = BackendHttp::new();
        let simulator = Arc::new(match templates {
            Some(path) => ArticleSimulator::new(Arc::new(load_templates(path)?)),
            None => ArticleSimulator::default(),
        });
        let backend = BackendClient::new(http.clone());

        Ok(Self {
            settings_service,
            dispatcher: SynthesisDispatcher::with_backend_adapters(http.clone(), simulator.clone()),
            chatgpt: ChatGptAdapter::new(http.clone(), simulator.clone()),
            claude: ClaudeAdapter::new(http.clone(), simulator.clone()),
            news: NewsService::new(
                Arc::new(GeminiSearchClient::new(http, simulator)),
                Arc::new(backend.clone()),
            ),
            backend,
            publishing: PublishingService::new(),
        })
    }

    /// Prints the first-run hint once per preference store.
    pub fn show_onboarding_once(&self) {
        let preferences = self.settings_service.preferences();
        match preferences.has_seen_onboarding() {
            Ok(true) => {}
            Ok(false) => {
                eprintln!("👋 Welcome to NEWSFORGE. Without API keys every AI call runs on the local simulator.");
                eprintln!("   Set OPENAI_API_KEY, ANTHROPIC_API_KEY, MISTRAL_API_KEY or GEMINI_API_KEY to use a backend.");
                if let Err(err) = preferences.mark_onboarding_seen() {
                    tracing::warn!("Failed to record onboarding: {}", err);
                }
            }
            Err(err) => tracing::warn!("Failed to read onboarding state: {}", err),
        }
    }

    pub async fn settings(&self) -> Result<Settings> {
        self.settings_service
            .load_settings()
            .await
            .context("Failed to load settings")
    }
}

fn load_templates(path: &Path) -> Result<ContentTemplates> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    ContentTemplates::from_json(&json)
        .with_context(|| format!("Failed to load templates from {}", path.display()))
}

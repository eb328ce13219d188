use crate::application::clinic::ClinicService;
use crate::application::coordinator::Coordinator;
use crate::domain::error::SignAidError;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::client::HttpTranslationClient;
use crate::infrastructure::network::http::create_client;
use crate::infrastructure::storage::ClinicStore;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ClinicStore>,
    pub config: Arc<RwLock<Config>>,
    pub http_client: Client,
}

impl AppState {
    pub fn new(store: Arc<dyn ClinicStore>, config: Config) -> Result<Self, SignAidError> {
        let http_client = create_client(&config)?;

        Ok(Self {
            store,
            config: Arc::new(RwLock::new(config)),
            http_client,
        })
    }

    pub fn clinic(&self) -> ClinicService<dyn ClinicStore> {
        ClinicService::new(Arc::clone(&self.store))
    }

    /// Fresh coordinator talking to the configured backend
    pub async fn coordinator(&self) -> Result<Coordinator, SignAidError> {
        let config = self.config.read().await;
        let client = HttpTranslationClient::new(self.http_client.clone(), &config.backend.base_url)?;
        Ok(Coordinator::with_timeout(
            Arc::new(client),
            config.backend.timeout(),
        ))
    }
}

// HTTP client utilities
use crate::domain::error::SignAidError;
use crate::infrastructure::config::Config;
use reqwest::{Client, Proxy};

/// Create the shared HTTP client from config
///
/// The per-request deadline is owned by the coordinator, so only the connect
/// phase is bounded here.
pub fn create_client(config: &Config) -> Result<Client, SignAidError> {
    let mut builder = Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .connect_timeout(config.backend.connect_timeout())
        .user_agent(concat!("signaid/", env!("CARGO_PKG_VERSION")));

    if let Some(proxy) = config.http_proxy.as_deref().filter(|p| !p.is_empty()) {
        let proxy = Proxy::all(proxy)
            .map_err(|e| SignAidError::Config(format!("Invalid http_proxy '{}': {}", proxy, e)))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| SignAidError::Config(format!("Failed to build HTTP client: {}", e)))
}

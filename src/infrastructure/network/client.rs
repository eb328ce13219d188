use crate::domain::error::SignAidError;
use crate::domain::model::TranslationRequest;
use crate::domain::traits::TranslationService;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};

// Translation backend response: one of translation / hamnosys / error
#[derive(Deserialize, Debug, Default)]
pub struct BackendReply {
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub hamnosys: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl BackendReply {
    /// Normalize into the payload or a service error.
    ///
    /// A recognized success field wins regardless of the HTTP status; an
    /// empty success field counts as absent.
    pub fn into_outcome(self) -> Result<String, SignAidError> {
        if let Some(translation) = self.translation.filter(|t| !t.is_empty()) {
            return Ok(translation);
        }
        if let Some(hamnosys) = self.hamnosys.filter(|h| !h.is_empty()) {
            return Ok(hamnosys);
        }

        Err(SignAidError::Service(
            self.error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "Unknown error".to_string()),
        ))
    }
}

/// reqwest-backed client for the `/translate` and `/hamnosys` endpoints
#[derive(Clone)]
pub struct HttpTranslationClient {
    client: Client,
    base_url: Url,
}

impl HttpTranslationClient {
    pub fn new(client: Client, base_url: &str) -> Result<Self, SignAidError> {
        // Url::join 需要以 / 结尾，否则最后一段路径会被替换
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }

        let base_url = Url::parse(&normalized).map_err(|e| {
            SignAidError::Config(format!("Invalid backend base_url '{}': {}", base_url, e))
        })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, SignAidError> {
        self.base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| SignAidError::Config(format!("Invalid endpoint '{}': {}", endpoint, e)))
    }

    /// Convenience wrapper for a validated request
    pub async fn request(&self, request: &TranslationRequest) -> Result<String, SignAidError> {
        self.call(request.kind.endpoint(), request.body()).await
    }

    async fn post_json(
        &self,
        url: Url,
        body: &serde_json::Value,
    ) -> Result<(StatusCode, BackendReply), SignAidError> {
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();
        let reply = response.json::<BackendReply>().await?;
        Ok((status, reply))
    }
}

#[async_trait]
impl TranslationService for HttpTranslationClient {
    async fn call(&self, endpoint: &str, body: serde_json::Value) -> Result<String, SignAidError> {
        let url = self
            .endpoint_url(endpoint)
            .map_err(|e| SignAidError::Transport(e.to_string()))?;
        debug!("POST {}", url);

        let (status, reply) = match self.post_json(url, &body).await {
            Ok(res) => res,
            Err(e) => {
                warn!("Translation request to {} failed: {}", endpoint, e);
                return Err(match e {
                    SignAidError::Transport(_) => e,
                    other => SignAidError::Transport(other.to_string()),
                });
            }
        };

        let outcome = reply.into_outcome();
        match &outcome {
            Ok(payload) => debug!("{} -> {} ({} chars)", endpoint, status, payload.len()),
            Err(e) => warn!("{} -> {}: {}", endpoint, status, e),
        }
        outcome
    }
}

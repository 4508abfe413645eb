use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::heuristics::Language;
use crate::models::{RemoteClassificationRequest, RemoteClassificationResponse};

use super::{
    build_classification_prompt, fallback_response, system_prompt, validate_reply, RemoteError,
};

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const API_VERSION: &str = "2023-06-01";

/// Configuration for the remote zone classifier
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// API key (from ANTHROPIC_API_KEY); without one every call falls back
    pub api_key: Option<String>,
    /// Messages endpoint
    pub api_url: String,
    /// Model to use
    pub model: String,
    /// Temperature (0-1, lower = more deterministic)
    pub temperature: f64,
    /// Maximum tokens in response
    pub max_tokens: u32,
    /// Per-request timeout
    pub timeout: Duration,
    /// Extra attempts after a failed call
    pub max_retries: u32,
    /// Language of the system instruction and fallback texts
    pub language: Language,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.1,
            max_tokens: 1024,
            timeout: Duration::from_secs(30),
            max_retries: 1,
            language: Language::English,
        }
    }
}

impl RemoteConfig {
    /// Create config from environment variables.
    ///
    /// A missing API key is not an error; only malformed values are.
    pub fn from_env() -> Result<Self> {
        let mut config = Self {
            api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            ..Self::default()
        };

        if let Ok(url) = std::env::var("SWIMZONES_API_URL") {
            config.api_url = url;
        }
        if let Ok(model) = std::env::var("SWIMZONES_MODEL") {
            config.model = model;
        }
        if let Ok(secs) = std::env::var("SWIMZONES_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .with_context(|| format!("Invalid SWIMZONES_TIMEOUT_SECS: {:?}", secs))?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Ok(language) = std::env::var("SWIMZONES_LANGUAGE") {
            config.language = language.parse().map_err(anyhow::Error::msg)?;
        }

        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

/// Remote zone classifier backed by a hosted language model.
///
/// Calls are idempotent: a retry re-issues exactly the same request.
pub struct RemoteClassifier {
    client: Client,
    config: RemoteConfig,
}

impl RemoteClassifier {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Classify a session, degrading to the fixed fallback response on any failure
    pub async fn classify(
        &self,
        request: &RemoteClassificationRequest,
    ) -> RemoteClassificationResponse {
        match self.try_classify(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Remote classification unavailable, using fallback: {}", e);
                fallback_response(self.config.language)
            }
        }
    }

    /// Classify a session, reporting why the remote result could not be used
    pub async fn try_classify(
        &self,
        request: &RemoteClassificationRequest,
    ) -> Result<RemoteClassificationResponse, RemoteError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(RemoteError::MissingCredential)?;

        let system = system_prompt(self.config.language);
        let user = build_classification_prompt(request);

        let mut last_error = RemoteError::Transport("no attempt made".to_string());

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                info!("Remote classification: retry {} of {}", attempt, self.config.max_retries);
            }

            let result = match self.send_message(api_key, system, &user).await {
                Ok(reply) => validate_reply(&reply),
                Err(e) => Err(e),
            };

            match result {
                Ok(response) => {
                    debug!(
                        "Remote classification accepted: confidence={}, total={}m",
                        response.confidence,
                        response.volumes.total()
                    );
                    return Ok(response);
                }
                Err(e) => {
                    warn!("Remote classification attempt {} failed: {}", attempt + 1, e);
                    let retryable = e.is_retryable();
                    last_error = e;
                    if !retryable {
                        break;
                    }
                }
            }
        }

        Err(last_error)
    }

    /// Send a message and return the text of the first text block
    async fn send_message(
        &self,
        api_key: &str,
        system: &str,
        user: &str,
    ) -> Result<String, RemoteError> {
        let request = MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: Some(self.config.temperature),
            system: Some(system.to_string()),
            messages: vec![Message {
                role: "user".to_string(),
                content: user.to_string(),
            }],
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .timeout(self.config.timeout)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let response: MessagesResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::Malformed(format!("unexpected response body: {}", e)))?;

        response
            .content
            .into_iter()
            .find(|c| c.content_type == "text")
            .map(|c| c.text)
            .ok_or_else(|| RemoteError::Malformed("no text content in response".to_string()))
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

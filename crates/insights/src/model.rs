//! Model-backed insight generation.
//!
//! The primary path sends the analyst prompt to an OpenAI-compatible chat
//! endpoint and decodes the reply. The HTTP plumbing lives behind
//! [`ModelClient`] so this crate stays free of transport concerns and tests
//! can swap in canned clients.

use crate::parse::parse_insight_response;
use crate::prompt::{build_prompt, SYSTEM_PROMPT};
use cvpulse_core::config::ModelConfig;
use cvpulse_core::generator::{GeneratorError, InsightGenerator};
use cvpulse_core::types::{AnalyticsContext, Insight};
use std::sync::Arc;
use tracing::{debug, warn};

/// One chat completion request as handed to the transport.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f64,
    pub system: String,
    pub prompt: String,
}

/// Transport to the model provider. Implementations own endpoint, auth
/// header, and retry policy; this crate only builds requests and interprets
/// replies.
pub trait ModelClient: Send + Sync {
    /// Send one completion request and return the raw reply text.
    fn complete(&self, request: &CompletionRequest) -> anyhow::Result<String>;

    /// Provider name used in log fields.
    fn provider_name(&self) -> &str;
}

/// Primary insight generator backed by a chat model.
pub struct ModelInsightGenerator {
    client: Arc<dyn ModelClient>,
    config: ModelConfig,
}

impl ModelInsightGenerator {
    pub fn new(client: Arc<dyn ModelClient>, config: ModelConfig) -> Self {
        if config.api_key.is_empty() {
            warn!("model API key not configured, insight requests will use the rule-based fallback");
        }
        Self { client, config }
    }
}

impl InsightGenerator for ModelInsightGenerator {
    fn generate(&self, context: &AnalyticsContext) -> Result<Vec<Insight>, GeneratorError> {
        if self.config.api_key.is_empty() {
            return Err(GeneratorError::MissingApiKey);
        }

        let request = CompletionRequest {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            system: SYSTEM_PROMPT.to_string(),
            prompt: build_prompt(context),
        };

        debug!(
            provider = self.client.provider_name(),
            model = %request.model,
            "Requesting model insights"
        );

        let reply = self
            .client
            .complete(&request)
            .map_err(|err| classify_transport_error(&err))?;

        let insights = parse_insight_response(&reply)?;
        debug!(count = insights.len(), "Parsed model insights");
        Ok(insights)
    }

    fn generator_name(&self) -> &str {
        "model"
    }
}

/// Map a transport failure onto the generator error taxonomy, following the
/// provider's HTTP status conventions when they leak into the message.
fn classify_transport_error(err: &anyhow::Error) -> GeneratorError {
    let message = err.to_string();
    if message.contains("401") || message.contains("API key") {
        GeneratorError::InvalidApiKey(message)
    } else if message.contains("429") || message.contains("quota") {
        GeneratorError::RateLimited(message)
    } else if message.contains("402") {
        GeneratorError::Billing(message)
    } else {
        GeneratorError::Transport(message)
    }
}

use crate::types::{AnalyticsContext, Insight};
use thiserror::Error;

/// A source of dashboard insights.
///
/// The model-backed path and the rule-based fallback both implement this,
/// so the layer assembling the report never needs to know which one ran.
pub trait InsightGenerator: Send + Sync {
    /// Produce an ordered list of insights for one analytics context.
    fn generate(&self, context: &AnalyticsContext) -> Result<Vec<Insight>, GeneratorError>;

    /// Short generator name used in log fields and metric labels.
    fn generator_name(&self) -> &str;
}

/// Failure taxonomy for insight generation. The rule-based path never
/// returns one of these; the model-backed path maps provider failures onto
/// them so callers can log the reason before falling back.
#[derive(Debug, Clone, Error)]
pub enum GeneratorError {
    #[error("model API key not configured")]
    MissingApiKey,

    #[error("model API key rejected: {0}")]
    InvalidApiKey(String),

    #[error("model provider rate limit reached: {0}")]
    RateLimited(String),

    #[error("model provider billing issue: {0}")]
    Billing(String),

    #[error("unparseable model response: {0}")]
    InvalidResponse(String),

    #[error("model returned no insights")]
    EmptyResponse,

    #[error("model transport failure: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GeneratorError::MissingApiKey.to_string(),
            "model API key not configured"
        );
        assert_eq!(
            GeneratorError::RateLimited("429".to_string()).to_string(),
            "model provider rate limit reached: 429"
        );
        assert_eq!(
            GeneratorError::EmptyResponse.to_string(),
            "model returned no insights"
        );
    }
}

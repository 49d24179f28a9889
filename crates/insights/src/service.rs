//! Report assembly: primary/fallback orchestration.

use crate::rules::InsightRulesEngine;
use cvpulse_core::generator::InsightGenerator;
use cvpulse_core::types::{AnalyticsContext, InsightReport};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Produces the dashboard insight report. Asks the model-backed generator
/// first and falls back to the deterministic rules engine when that path is
/// missing or fails, so report generation itself never errors.
pub struct InsightService {
    primary: Option<Arc<dyn InsightGenerator>>,
    fallback: InsightRulesEngine,
}

impl InsightService {
    /// Service with a model-backed primary generator.
    pub fn new(primary: Arc<dyn InsightGenerator>) -> Self {
        Self {
            primary: Some(primary),
            fallback: InsightRulesEngine::new(),
        }
    }

    /// Service without a primary path; every report comes from the rules
    /// engine. Used when no model provider is configured.
    pub fn fallback_only() -> Self {
        Self {
            primary: None,
            fallback: InsightRulesEngine::new(),
        }
    }

    /// Build the insight report for one analytics context.
    pub fn generate_report(&self, context: &AnalyticsContext) -> InsightReport {
        if let Some(primary) = &self.primary {
            match primary.generate(context) {
                Ok(insights) => {
                    info!(
                        generator = primary.generator_name(),
                        count = insights.len(),
                        "Generated model-backed insights"
                    );
                    metrics::counter!("insights.model").increment(1);
                    return InsightReport {
                        insights,
                        metrics: context.metrics.rounded(),
                        ai_powered: true,
                    };
                }
                Err(err) => {
                    warn!(
                        generator = primary.generator_name(),
                        error = %err,
                        "Model insight generation failed, using rule-based fallback"
                    );
                    metrics::counter!("insights.errors").increment(1);
                }
            }
        } else {
            debug!("No model generator configured, using rule-based fallback");
        }

        let insights = self.fallback.evaluate(&context.metrics);
        metrics::counter!("insights.fallback").increment(1);
        InsightReport {
            insights,
            metrics: context.metrics.rounded(),
            ai_powered: false,
        }
    }
}

pub mod config;
pub mod generator;
pub mod types;

pub use config::{AppConfig, ModelConfig};
pub use generator::{GeneratorError, InsightGenerator};
pub use types::{
    AnalyticsAggregates, AnalyticsContext, Insight, InsightCategory, InsightImpact, InsightReport,
    InsightType, MetricsSnapshot,
};

use serde::{Deserialize, Serialize};

/// Severity of a single insight card.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    Success,
    Warning,
    Critical,
    Info,
}

/// Business area an insight belongs to, serialized with the display names
/// the dashboard groups cards under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InsightCategory {
    Revenue,
    #[serde(rename = "User Success")]
    UserSuccess,
    #[serde(rename = "User Satisfaction")]
    UserSatisfaction,
    Engagement,
    Growth,
    /// Only produced by the model-backed generator.
    Product,
    Prediction,
}

/// Business impact badge shown next to each insight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InsightImpact {
    High,
    Medium,
    Low,
    Positive,
}

/// One structured statement about platform health, derived from a single
/// KPI by the rules engine or returned by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightType,
    pub category: InsightCategory,
    pub title: String,
    pub description: String,
    pub impact: InsightImpact,
    pub actionable: bool,
    pub recommendation: String,
}

/// The five KPI scalars one insight evaluation runs over.
///
/// Counts are non-negative by construction. Rates and scores are expected
/// in their dashboard ranges (percentage 0-100, score 0-100, rating 1-5);
/// out-of-range values still evaluate, they just land in an edge band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub total_users: u64,
    pub conversion_rate: f64,
    #[serde(rename = "avgCVScore")]
    pub avg_cv_score: f64,
    pub avg_feedback_rating: f64,
    pub recent_analyses: u64,
}

impl MetricsSnapshot {
    /// Analyses per user over the trailing 30-day window. Defined as 0 for
    /// an empty user base.
    pub fn engagement_per_user(&self) -> f64 {
        if self.total_users == 0 {
            0.0
        } else {
            self.recent_analyses as f64 / self.total_users as f64
        }
    }

    /// Copy with the rate and score fields rounded to one decimal, the form
    /// the dashboard echoes back alongside the insight cards.
    pub fn rounded(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_users: self.total_users,
            conversion_rate: round_tenth(self.conversion_rate),
            avg_cv_score: round_tenth(self.avg_cv_score),
            avg_feedback_rating: round_tenth(self.avg_feedback_rating),
            recent_analyses: self.recent_analyses,
        }
    }

    /// Snapshot of a platform doing well on every KPI, for testing / demo.
    pub fn healthy_demo() -> Self {
        Self {
            total_users: 800,
            conversion_rate: 6.5,
            avg_cv_score: 82.0,
            avg_feedback_rating: 4.7,
            recent_analyses: 1500,
        }
    }

    /// Snapshot of a platform struggling on every KPI, for testing / demo.
    pub fn struggling_demo() -> Self {
        Self {
            total_users: 120,
            conversion_rate: 1.2,
            avg_cv_score: 58.0,
            avg_feedback_rating: 3.1,
            recent_analyses: 40,
        }
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One country's share of the user base, sorted by count upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountrySlice {
    pub country: String,
    pub count: u64,
}

/// One career stage's share of the user base.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CareerStageSlice {
    pub stage: String,
    pub count: u64,
}

/// Raw results of the dashboard counting queries, before any rates are
/// derived.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsAggregates {
    pub total_users: u64,
    pub paid_users: u64,
    #[serde(rename = "avgCVScore")]
    pub avg_cv_score: f64,
    pub avg_feedback_rating: f64,
    pub recent_analyses: u64,
    pub country_distribution: Vec<CountrySlice>,
    pub career_stage_breakdown: Vec<CareerStageSlice>,
}

/// Everything a generator gets to look at for one evaluation: the KPI
/// snapshot plus the distribution extras the model path folds into its
/// prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsContext {
    pub metrics: MetricsSnapshot,
    pub paid_users: u64,
    pub top_country: String,
    pub dominant_career_stage: String,
    pub country_distribution: Vec<CountrySlice>,
    pub career_stage_breakdown: Vec<CareerStageSlice>,
}

impl AnalyticsContext {
    /// Derive the evaluation context from raw aggregates.
    ///
    /// Conversion rate is paid users over total users as a percentage, 0
    /// for an empty user base. Top country and dominant career stage fall
    /// back to "N/A" when the corresponding distribution came back empty.
    pub fn from_aggregates(aggregates: AnalyticsAggregates) -> Self {
        let conversion_rate = if aggregates.total_users == 0 {
            0.0
        } else {
            aggregates.paid_users as f64 / aggregates.total_users as f64 * 100.0
        };

        let metrics = MetricsSnapshot {
            total_users: aggregates.total_users,
            conversion_rate,
            avg_cv_score: aggregates.avg_cv_score,
            avg_feedback_rating: aggregates.avg_feedback_rating,
            recent_analyses: aggregates.recent_analyses,
        };

        let top_country = aggregates
            .country_distribution
            .first()
            .map(|slice| slice.country.clone())
            .unwrap_or_else(|| "N/A".to_string());
        let dominant_career_stage = aggregates
            .career_stage_breakdown
            .first()
            .map(|slice| slice.stage.clone())
            .unwrap_or_else(|| "N/A".to_string());

        Self {
            metrics,
            paid_users: aggregates.paid_users,
            top_country,
            dominant_career_stage,
            country_distribution: aggregates.country_distribution,
            career_stage_breakdown: aggregates.career_stage_breakdown,
        }
    }
}

/// Payload the dashboard insight panel renders. `metrics` is the rounded
/// echo of the evaluated snapshot; `ai_powered` is false whenever the
/// rule-based fallback produced the insights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    pub insights: Vec<Insight>,
    pub metrics: MetricsSnapshot,
    pub ai_powered: bool,
}

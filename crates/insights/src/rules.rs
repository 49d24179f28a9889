//! Rule-based fallback insight engine.
//!
//! When the model provider is unavailable the dashboard still needs its
//! insight panel, so this engine derives one insight per KPI from a fixed,
//! ordered band table plus a constant market-outlook entry. Evaluation is
//! pure: no clock, no randomness, no I/O, no state.

use cvpulse_core::generator::{GeneratorError, InsightGenerator};
use cvpulse_core::types::{
    AnalyticsContext, Insight, InsightCategory, InsightImpact, InsightType, MetricsSnapshot,
};

/// Hard ceiling on the number of insights returned. The table currently
/// yields six (five banded rules plus the market outlook), so the cap only
/// matters if rules are added later.
pub const MAX_INSIGHTS: usize = 7;

/// Lower cut of one band. Bands are listed highest first and every rule
/// ends in `Rest`, so a non-finite metric (which fails every numeric
/// comparison) deterministically lands in the lowest band.
#[derive(Debug, Clone, Copy)]
enum Cut {
    /// Matches values greater than or equal to the bound.
    AtLeast(f64),
    /// Matches values strictly greater than the bound.
    Above(f64),
    /// Matches everything, including NaN.
    Rest,
}

impl Cut {
    fn matches(self, value: f64) -> bool {
        match self {
            Cut::AtLeast(bound) => value >= bound,
            Cut::Above(bound) => value > bound,
            Cut::Rest => true,
        }
    }
}

/// One band of a rule: the cut that selects it and the card template it
/// renders. Only descriptions interpolate metric values; titles and
/// recommendations are fixed copy.
struct Band {
    cut: Cut,
    kind: InsightType,
    impact: InsightImpact,
    actionable: bool,
    title: &'static str,
    description: fn(&MetricsSnapshot, f64) -> String,
    recommendation: &'static str,
}

/// One KPI rule: which scalar it bands over and the ordered band list.
struct Rule {
    category: InsightCategory,
    metric: fn(&MetricsSnapshot) -> f64,
    bands: &'static [Band],
}

impl Rule {
    fn evaluate(&self, snapshot: &MetricsSnapshot) -> Option<Insight> {
        let value = (self.metric)(snapshot);
        let band = self
            .bands
            .iter()
            .find(|band| band.cut.matches(value))
            .or_else(|| self.bands.last())?;
        Some(Insight {
            kind: band.kind,
            category: self.category,
            title: band.title.to_string(),
            description: (band.description)(snapshot, value),
            impact: band.impact,
            actionable: band.actionable,
            recommendation: band.recommendation.to_string(),
        })
    }
}

// ─── Revenue: conversion rate (%) ───────────────────────────────────────

static REVENUE_BANDS: [Band; 3] = [
    Band {
        cut: Cut::AtLeast(5.0),
        kind: InsightType::Success,
        impact: InsightImpact::Positive,
        actionable: false,
        title: "Strong Conversion Performance",
        description: |_, value| {
            format!("{value:.1}% conversion rate exceeds industry standards. Excellent monetization.")
        },
        recommendation:
            "Document winning strategies and scale successful conversion tactics across all touchpoints.",
    },
    Band {
        cut: Cut::AtLeast(2.0),
        kind: InsightType::Warning,
        impact: InsightImpact::High,
        actionable: true,
        title: "Conversion Rate Below Industry Average",
        description: |_, value| {
            format!("{value:.1}% conversion. Industry average is 2-5%. Room for improvement.")
        },
        recommendation:
            "A/B test pricing models, add social proof, and implement exit-intent upgrade prompts.",
    },
    Band {
        cut: Cut::Rest,
        kind: InsightType::Critical,
        impact: InsightImpact::High,
        actionable: true,
        title: "Critical: Very Low Conversion Rate",
        description: |_, value| {
            format!("Only {value:.1}% conversion. Immediate action needed to improve monetization.")
        },
        recommendation:
            "Launch targeted free trial campaign and add pricing page optimization with clear value props.",
    },
];

// ─── User Success: average CV score (/100) ──────────────────────────────

// The two success bands stay separate: severity and impact match but the
// copy differs.
static CV_SCORE_BANDS: [Band; 4] = [
    Band {
        cut: Cut::AtLeast(80.0),
        kind: InsightType::Success,
        impact: InsightImpact::Positive,
        actionable: false,
        title: "Exceptional CV Quality",
        description: |_, value| {
            format!("Outstanding average score of {value:.1}/100. Users creating top-tier resumes.")
        },
        recommendation:
            "Feature success stories in marketing and create case studies from high-performing users.",
    },
    Band {
        cut: Cut::AtLeast(75.0),
        kind: InsightType::Success,
        impact: InsightImpact::Positive,
        actionable: false,
        title: "Strong CV Quality",
        description: |_, value| {
            format!("Good average score of {value:.1}/100. Users creating quality resumes.")
        },
        recommendation:
            "Continue current approach while testing incremental improvements to push scores higher.",
    },
    Band {
        cut: Cut::AtLeast(65.0),
        kind: InsightType::Warning,
        impact: InsightImpact::Medium,
        actionable: true,
        title: "CV Scores Need Improvement",
        description: |_, value| {
            format!("Average score {value:.1}/100. Users need better guidance and tools.")
        },
        recommendation:
            "Implement AI-powered recommendations and industry-specific best practices library.",
    },
    Band {
        cut: Cut::Rest,
        kind: InsightType::Critical,
        impact: InsightImpact::High,
        actionable: true,
        title: "Low CV Quality Scores",
        description: |_, value| {
            format!("Average score {value:.1}/100. Users struggling to create quality resumes.")
        },
        recommendation:
            "Add real-time suggestions, professional templates, and guided CV builder to improve outcomes.",
    },
];

// ─── User Satisfaction: average feedback rating (/5) ────────────────────

static SATISFACTION_BANDS: [Band; 4] = [
    Band {
        cut: Cut::AtLeast(4.5),
        kind: InsightType::Success,
        impact: InsightImpact::Positive,
        actionable: false,
        title: "Excellent User Satisfaction",
        description: |_, value| {
            format!("Outstanding {value:.1}/5 rating. Users love your product.")
        },
        recommendation:
            "Activate referral program and request App Store/reviews from satisfied users.",
    },
    Band {
        cut: Cut::AtLeast(4.0),
        kind: InsightType::Success,
        impact: InsightImpact::Positive,
        // Still actionable: good ratings are the window to push for 4.5+.
        actionable: true,
        title: "Strong User Satisfaction",
        description: |_, value| {
            format!("Solid {value:.1}/5 rating shows good product-market fit.")
        },
        recommendation:
            "Collect testimonials from happy users and address common friction points to reach 4.5+.",
    },
    Band {
        cut: Cut::AtLeast(3.5),
        kind: InsightType::Warning,
        impact: InsightImpact::Medium,
        actionable: true,
        title: "Moderate Satisfaction Levels",
        description: |_, value| {
            format!("{value:.1}/5 rating indicates room for improvement in user experience.")
        },
        recommendation:
            "Conduct user interviews to identify pain points and prioritize UX improvements.",
    },
    Band {
        cut: Cut::Rest,
        kind: InsightType::Critical,
        impact: InsightImpact::High,
        actionable: true,
        title: "Low User Satisfaction",
        description: |_, value| {
            format!("{value:.1}/5 rating. Urgent attention needed to improve user experience.")
        },
        recommendation:
            "Immediately review negative feedback, fix critical issues, and reach out to dissatisfied users.",
    },
];

// ─── Engagement: analyses per user over 30 days ─────────────────────────

static ENGAGEMENT_BANDS: [Band; 3] = [
    Band {
        cut: Cut::Above(1.5),
        kind: InsightType::Success,
        impact: InsightImpact::Positive,
        actionable: false,
        title: "High User Engagement",
        description: |snapshot, value| {
            format!(
                "{} analyses ({value:.1} per user) shows strong product adoption.",
                snapshot.recent_analyses
            )
        },
        recommendation:
            "Maintain momentum with regular feature updates and engagement campaigns.",
    },
    Band {
        cut: Cut::Above(0.5),
        kind: InsightType::Info,
        impact: InsightImpact::Medium,
        actionable: true,
        title: "Moderate Activity Levels",
        description: |snapshot, _| {
            format!(
                "{} analyses in last 30 days. Average engagement detected.",
                snapshot.recent_analyses
            )
        },
        recommendation:
            "Launch re-engagement email campaign and add weekly usage reminders to boost activity.",
    },
    Band {
        cut: Cut::Rest,
        kind: InsightType::Warning,
        impact: InsightImpact::Medium,
        actionable: true,
        title: "Low User Activity",
        description: |snapshot, _| {
            format!(
                "Only {} analyses recently. Users not fully utilizing the platform.",
                snapshot.recent_analyses
            )
        },
        recommendation:
            "Create onboarding sequence, send activation emails, and add in-app usage prompts.",
    },
];

// ─── Growth: total registered users ─────────────────────────────────────

static GROWTH_BANDS: [Band; 3] = [
    Band {
        cut: Cut::Above(1000.0),
        kind: InsightType::Info,
        impact: InsightImpact::Medium,
        actionable: true,
        title: "Scaling Infrastructure Required",
        description: |snapshot, _| {
            format!(
                "With {} users, prepare for next growth phase.",
                format_count(snapshot.total_users)
            )
        },
        recommendation:
            "Review server capacity, optimize database queries, and plan for 2-3x user growth.",
    },
    Band {
        cut: Cut::Above(500.0),
        kind: InsightType::Success,
        impact: InsightImpact::Positive,
        actionable: true,
        title: "Strong Growth Trajectory",
        description: |snapshot, _| {
            format!(
                "{} users achieved. Approaching key milestone of 1,000 users.",
                snapshot.total_users
            )
        },
        recommendation:
            "Accelerate marketing efforts and prepare infrastructure for scaling to 1,000+ users.",
    },
    Band {
        cut: Cut::Rest,
        kind: InsightType::Info,
        impact: InsightImpact::Medium,
        actionable: true,
        title: "Early Growth Phase",
        description: |snapshot, _| {
            format!(
                "{} users. Focus on product-market fit and user acquisition.",
                snapshot.total_users
            )
        },
        recommendation:
            "Invest in content marketing, SEO, and user testimonials to drive organic growth.",
    },
];

/// The five KPI rules in the category order the dashboard renders.
static RULES: [Rule; 5] = [
    Rule {
        category: InsightCategory::Revenue,
        metric: |snapshot| snapshot.conversion_rate,
        bands: &REVENUE_BANDS,
    },
    Rule {
        category: InsightCategory::UserSuccess,
        metric: |snapshot| snapshot.avg_cv_score,
        bands: &CV_SCORE_BANDS,
    },
    Rule {
        category: InsightCategory::UserSatisfaction,
        metric: |snapshot| snapshot.avg_feedback_rating,
        bands: &SATISFACTION_BANDS,
    },
    Rule {
        category: InsightCategory::Engagement,
        metric: |snapshot| snapshot.engagement_per_user(),
        bands: &ENGAGEMENT_BANDS,
    },
    Rule {
        category: InsightCategory::Growth,
        metric: |snapshot| snapshot.total_users as f64,
        bands: &GROWTH_BANDS,
    },
];

/// Constant closing insight about the resume-tooling market. Independent
/// of the snapshot, identical on every call.
fn market_outlook() -> Insight {
    Insight {
        kind: InsightType::Info,
        category: InsightCategory::Prediction,
        title: "AI-Powered Resume Market Growing".to_string(),
        description: "AI resume tools market projected to grow 25% annually. Position for expansion."
            .to_string(),
        impact: InsightImpact::Medium,
        actionable: true,
        recommendation:
            "Expand AI features, add ATS optimization, and develop mobile app to capture market share."
                .to_string(),
    }
}

/// Format a count with thousands separators ("1234567" -> "1,234,567").
fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Deterministic rule-table insight engine, used whenever the model-backed
/// generator fails or is not configured.
pub struct InsightRulesEngine;

impl InsightRulesEngine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the rule table against one KPI snapshot.
    ///
    /// Returns one insight per rule in fixed category order (Revenue, User
    /// Success, User Satisfaction, Engagement, Growth) with the market
    /// outlook appended last, capped at [`MAX_INSIGHTS`]. Total over all
    /// inputs: a NaN metric selects the lowest band of its rule.
    pub fn evaluate(&self, snapshot: &MetricsSnapshot) -> Vec<Insight> {
        let mut insights: Vec<Insight> = RULES
            .iter()
            .filter_map(|rule| rule.evaluate(snapshot))
            .collect();
        insights.push(market_outlook());
        insights.truncate(MAX_INSIGHTS);
        insights
    }
}

impl Default for InsightRulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightGenerator for InsightRulesEngine {
    fn generate(&self, context: &AnalyticsContext) -> Result<Vec<Insight>, GeneratorError> {
        Ok(self.evaluate(&context.metrics))
    }

    fn generator_name(&self) -> &str {
        "rule-based"
    }
}

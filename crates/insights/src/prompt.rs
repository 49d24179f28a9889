//! Analyst prompt construction for the model-backed generator.

use cvpulse_core::types::AnalyticsContext;

/// System role content sent with every completion request.
pub const SYSTEM_PROMPT: &str = "You are an expert SaaS analytics consultant. \
    Provide insights in valid JSON array format only, with no markdown formatting or code blocks.";

/// Countries listed in the prompt's distribution block. Long tails add
/// tokens without adding signal.
const MAX_PROMPT_COUNTRIES: usize = 5;

/// Render the analyst prompt for one analytics context: the KPI block, the
/// audience distributions, and the response-format instructions the parser
/// relies on.
pub fn build_prompt(context: &AnalyticsContext) -> String {
    let metrics = &context.metrics;
    let mut prompt = format!(
        "You are an expert data analyst specializing in SaaS analytics and business intelligence. \
         Analyze the following dashboard metrics from CV Pulse, a CV/resume analysis platform, \
         and provide 5-7 actionable insights.\n\n\
         **Platform Metrics:**\n\
         - Total Users: {}\n\
         - Paid Users: {} ({:.1}% conversion rate)\n\
         - Average CV Score: {:.1}/100\n\
         - Average User Satisfaction: {:.1}/5 stars\n\
         - Recent Analyses (30 days): {}\n\
         - Top Country: {}\n\
         - Dominant Career Stage: {}\n",
        metrics.total_users,
        context.paid_users,
        metrics.conversion_rate,
        metrics.avg_cv_score,
        metrics.avg_feedback_rating,
        metrics.recent_analyses,
        context.top_country,
        context.dominant_career_stage,
    );

    if !context.country_distribution.is_empty() {
        prompt.push_str("\n**Country Distribution:**\n");
        for slice in context.country_distribution.iter().take(MAX_PROMPT_COUNTRIES) {
            prompt.push_str(&format!("- {}: {} users\n", slice.country, slice.count));
        }
    }

    if !context.career_stage_breakdown.is_empty() {
        prompt.push_str("\n**Career Stage Breakdown:**\n");
        for slice in &context.career_stage_breakdown {
            prompt.push_str(&format!("- {}: {} users\n", slice.stage, slice.count));
        }
    }

    prompt.push_str(
        "\n**Instructions:**\n\
         Provide insights as a JSON array. Each insight must have:\n\
         - \"type\": one of \"success\", \"warning\", \"critical\", \"info\"\n\
         - \"category\": one of \"Revenue\", \"User Success\", \"User Satisfaction\", \
         \"Engagement\", \"Growth\", \"Product\", \"Prediction\"\n\
         - \"title\": short headline (max 60 characters)\n\
         - \"description\": 1-2 sentences with specific numbers from the metrics\n\
         - \"impact\": one of \"high\", \"medium\", \"low\", \"positive\"\n\
         - \"actionable\": boolean\n\
         - \"recommendation\": one concrete next step\n\n\
         Guidelines:\n\
         - Reference the actual metric values in every description\n\
         - Cover revenue, user success, and engagement at minimum\n\
         - Order insights from most to least urgent\n\
         - Return ONLY a valid JSON array of insights, no markdown formatting\n\n\
         Return format: [insight1, insight2, ...]\n",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvpulse_core::types::{
        AnalyticsAggregates, CareerStageSlice, CountrySlice, MetricsSnapshot,
    };

    fn context_with_countries(countries: Vec<CountrySlice>) -> AnalyticsContext {
        AnalyticsContext::from_aggregates(AnalyticsAggregates {
            total_users: 800,
            paid_users: 52,
            avg_cv_score: 82.0,
            avg_feedback_rating: 4.7,
            recent_analyses: 1500,
            country_distribution: countries,
            career_stage_breakdown: vec![CareerStageSlice {
                stage: "Senior".to_string(),
                count: 300,
            }],
        })
    }

    #[test]
    fn test_prompt_includes_metrics() {
        let context = AnalyticsContext {
            metrics: MetricsSnapshot::healthy_demo(),
            paid_users: 52,
            top_country: "India".to_string(),
            dominant_career_stage: "Mid-Level".to_string(),
            country_distribution: vec![],
            career_stage_breakdown: vec![],
        };
        let prompt = build_prompt(&context);

        assert!(prompt.contains("- Total Users: 800"));
        assert!(prompt.contains("- Paid Users: 52 (6.5% conversion rate)"));
        assert!(prompt.contains("- Average CV Score: 82.0/100"));
        assert!(prompt.contains("- Average User Satisfaction: 4.7/5 stars"));
        assert!(prompt.contains("- Recent Analyses (30 days): 1500"));
        assert!(prompt.contains("- Top Country: India"));
        assert!(prompt.contains("- Dominant Career Stage: Mid-Level"));
        // No distribution data, no distribution blocks.
        assert!(!prompt.contains("**Country Distribution:**"));
        assert!(!prompt.contains("**Career Stage Breakdown:**"));
    }

    #[test]
    fn test_prompt_truncates_country_list() {
        let countries: Vec<CountrySlice> = (0..8u64)
            .map(|index| CountrySlice {
                country: format!("Country{index}"),
                count: 100 - index,
            })
            .collect();
        let prompt = build_prompt(&context_with_countries(countries));

        assert!(prompt.contains("- Country0: 100 users"));
        assert!(prompt.contains("- Country4: 96 users"));
        assert!(!prompt.contains("Country5"));
        assert!(prompt.contains("- Senior: 300 users"));
    }

    #[test]
    fn test_prompt_spells_out_response_contract() {
        let prompt = build_prompt(&context_with_countries(vec![]));

        assert!(prompt.contains("\"type\": one of \"success\", \"warning\", \"critical\", \"info\""));
        assert!(prompt.contains("\"User Satisfaction\""));
        assert!(prompt.contains("Return ONLY a valid JSON array"));
        assert!(SYSTEM_PROMPT.contains("valid JSON array"));
    }
}

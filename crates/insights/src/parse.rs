//! Model reply parsing.
//!
//! The model is instructed to return a bare JSON array, but replies still
//! arrive fenced in markdown or wrapped in an object. Parsing accepts those
//! envelopes while staying strict about the record shape: any element
//! missing a required field rejects the whole reply.

use cvpulse_core::generator::GeneratorError;
use cvpulse_core::types::Insight;
use serde_json::Value;

/// Decode a raw model reply into insight records.
///
/// Accepted envelopes, in order: a bare array, an object with an `insights`
/// array, an object whose first array-valued field holds the insights. An
/// empty list is an error so the caller falls back instead of rendering a
/// blank panel.
pub fn parse_insight_response(raw: &str) -> Result<Vec<Insight>, GeneratorError> {
    let cleaned = strip_code_fences(raw);

    let value: Value = serde_json::from_str(cleaned)
        .map_err(|err| GeneratorError::InvalidResponse(err.to_string()))?;

    let items = extract_insight_array(value).ok_or_else(|| {
        GeneratorError::InvalidResponse("no insight array in model reply".to_string())
    })?;

    let insights: Vec<Insight> = serde_json::from_value(Value::Array(items))
        .map_err(|err| GeneratorError::InvalidResponse(err.to_string()))?;

    if insights.is_empty() {
        return Err(GeneratorError::EmptyResponse);
    }
    Ok(insights)
}

/// Strip a surrounding markdown code fence (``` or ```json) if present.
fn strip_code_fences(text: &str) -> &str {
    let mut trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix("```json") {
        trimmed = rest;
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        trimmed = rest;
    }
    if let Some(rest) = trimmed.trim_end().strip_suffix("```") {
        trimmed = rest;
    }
    trimmed.trim()
}

fn extract_insight_array(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => {
            if let Some(Value::Array(items)) = map.remove("insights") {
                return Some(items);
            }
            map.into_iter().find_map(|(_, nested)| match nested {
                Value::Array(items) => Some(items),
                _ => None,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvpulse_core::types::{InsightCategory, InsightImpact, InsightType};

    const ONE_INSIGHT: &str = r#"[{
        "type": "warning",
        "category": "Revenue",
        "title": "Conversion Dip",
        "description": "Conversion fell to 1.8% this month.",
        "impact": "high",
        "actionable": true,
        "recommendation": "Revisit the pricing page."
    }]"#;

    #[test]
    fn test_parses_bare_array() {
        let insights = parse_insight_response(ONE_INSIGHT).unwrap();
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightType::Warning);
        assert_eq!(insights[0].category, InsightCategory::Revenue);
        assert_eq!(insights[0].impact, InsightImpact::High);
        assert!(insights[0].actionable);
    }

    #[test]
    fn test_parses_json_fenced_reply() {
        let fenced = format!("```json\n{ONE_INSIGHT}\n```");
        let insights = parse_insight_response(&fenced).unwrap();
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].title, "Conversion Dip");
    }

    #[test]
    fn test_parses_plain_fenced_reply() {
        let fenced = format!("```\n{ONE_INSIGHT}\n```");
        assert_eq!(parse_insight_response(&fenced).unwrap().len(), 1);
    }

    #[test]
    fn test_parses_insights_object_wrapper() {
        let wrapped = format!(r#"{{"insights": {ONE_INSIGHT}}}"#);
        assert_eq!(parse_insight_response(&wrapped).unwrap().len(), 1);
    }

    #[test]
    fn test_parses_first_array_field_fallback() {
        let wrapped = format!(r#"{{"results": {ONE_INSIGHT}}}"#);
        assert_eq!(parse_insight_response(&wrapped).unwrap().len(), 1);
    }

    #[test]
    fn test_parses_category_with_space() {
        let reply = r#"[{
            "type": "success",
            "category": "User Success",
            "title": "Scores Up",
            "description": "Average score reached 81.2/100.",
            "impact": "positive",
            "actionable": false,
            "recommendation": "Showcase top resumes."
        }]"#;
        let insights = parse_insight_response(reply).unwrap();
        assert_eq!(insights[0].category, InsightCategory::UserSuccess);
    }

    #[test]
    fn test_ignores_unknown_extra_fields() {
        let reply = r#"[{
            "type": "info",
            "category": "Growth",
            "title": "t",
            "description": "d",
            "impact": "medium",
            "actionable": true,
            "recommendation": "r",
            "confidence": 0.92
        }]"#;
        assert_eq!(parse_insight_response(reply).unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_missing_fields() {
        let reply = r#"[{"type": "info", "title": "no category"}]"#;
        assert!(matches!(
            parse_insight_response(reply),
            Err(GeneratorError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_rejects_non_json_reply() {
        assert!(matches!(
            parse_insight_response("Here are your insights!"),
            Err(GeneratorError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_rejects_object_without_array() {
        assert!(matches!(
            parse_insight_response(r#"{"note": "no data"}"#),
            Err(GeneratorError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_empty_array_is_an_error() {
        assert!(matches!(
            parse_insight_response("[]"),
            Err(GeneratorError::EmptyResponse)
        ));
        assert!(matches!(
            parse_insight_response(r#"{"insights": []}"#),
            Err(GeneratorError::EmptyResponse)
        ));
    }
}

//! Turning model replies into structured analysis / deck JSON.

use serde_json::{json, Value};

/// Parse the analyst reply.
///
/// Tries the whole text as JSON, then a fenced or embedded object, then
/// falls back to a fixed analysis that carries the raw reply.
pub fn parse_analysis(text: &str) -> Value {
    match parse_json_object(text) {
        Some(value) => value,
        None => {
            tracing::warn!("Analysis reply was not valid JSON, using fallback");
            fallback_analysis(text)
        }
    }
}

/// Parse a pitch-deck reply into `{"slides": [...]}`; anything else is an empty deck.
pub fn parse_pitch_deck(text: &str) -> Value {
    let parsed = serde_json::from_str::<Value>(text.trim())
        .ok()
        .or_else(|| serde_json::from_str::<Value>(&extract_json(text)).ok());

    match parsed {
        Some(Value::Array(slides)) => json!({ "slides": slides }),
        Some(Value::Object(obj)) if obj.get("slides").map_or(false, Value::is_array) => {
            Value::Object(obj)
        }
        _ => {
            tracing::warn!("Pitch deck reply was not valid JSON");
            json!({ "slides": [] })
        }
    }
}

/// Score from an analysis object, accepting numbers or numeric strings.
pub fn commercial_score(analysis: &Value) -> Option<f64> {
    match analysis.get("commercial_score")? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// String items of an array field; missing or malformed fields give `[]`.
pub fn string_list(analysis: &Value, key: &str) -> Vec<String> {
    analysis
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn parse_json_object(text: &str) -> Option<Value> {
    [text.trim().to_string(), extract_json(text)]
        .iter()
        .filter_map(|candidate| serde_json::from_str::<Value>(candidate).ok())
        .find(Value::is_object)
}

fn fallback_analysis(raw_text: &str) -> Value {
    json!({
        "executive_summary": "Analysis completed. See full text for details.",
        "commercial_score": 7.0,
        "commercial_justification": "Strong commercial potential based on genre and concept.",
        "strengths": ["Unique premise", "Strong characters", "Market appeal"],
        "improvements": ["Further development needed"],
        "comparables": [],
        "target_audience": "General audience",
        "budget_range": "Mid-budget",
        "themes": [],
        "raw_text": raw_text,
    })
}

/// Pull a JSON payload out of a reply wrapped in markdown fences or prose
fn extract_json(response: &str) -> String {
    let trimmed = response.trim();

    if let Some(start) = trimmed.find("```") {
        let after_fence = start + 3;
        // Skip a language tag such as "json"
        let body_start = trimmed[after_fence..]
            .find('\n')
            .map(|i| after_fence + i + 1)
            .unwrap_or(after_fence);
        if let Some(end) = trimmed[body_start..].find("```") {
            return trimmed[body_start..body_start + end].trim().to_string();
        }
    }

    let object = trimmed.find('{').zip(trimmed.rfind('}'));
    let array = trimmed.find('[').zip(trimmed.rfind(']'));
    let span = match (object, array) {
        (Some(o), Some(a)) => Some(if a.0 < o.0 { a } else { o }),
        (o, a) => o.or(a),
    };

    match span {
        Some((start, end)) if end > start => trimmed[start..=end].to_string(),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json_analysis() {
        let reply = r#"{"executive_summary": "Tight thriller", "commercial_score": 8.5, "strengths": ["Pace"]}"#;
        let analysis = parse_analysis(reply);
        assert_eq!(analysis["executive_summary"], "Tight thriller");
        assert_eq!(commercial_score(&analysis), Some(8.5));
        assert_eq!(string_list(&analysis, "strengths"), vec!["Pace"]);
    }

    #[test]
    fn test_fenced_json_analysis() {
        let reply = "Here is my assessment:\n```json\n{\"commercial_score\": 6, \"improvements\": [\"Act two\"]}\n```\nThanks!";
        let analysis = parse_analysis(reply);
        assert_eq!(commercial_score(&analysis), Some(6.0));
        assert_eq!(string_list(&analysis, "improvements"), vec!["Act two"]);
        assert!(analysis.get("raw_text").is_none());
    }

    #[test]
    fn test_embedded_json_analysis() {
        let reply = "Sure. {\"commercial_score\": \"9\"} Let me know.";
        assert_eq!(commercial_score(&parse_analysis(reply)), Some(9.0));
    }

    #[test]
    fn test_prose_falls_back() {
        let reply = "This script is quite good but needs work.";
        let analysis = parse_analysis(reply);
        assert_eq!(commercial_score(&analysis), Some(7.0));
        assert_eq!(
            string_list(&analysis, "strengths"),
            vec!["Unique premise", "Strong characters", "Market appeal"]
        );
        assert_eq!(analysis["budget_range"], "Mid-budget");
        assert_eq!(analysis["raw_text"], reply);
    }

    #[test]
    fn test_non_object_json_falls_back() {
        let analysis = parse_analysis("[1, 2, 3]");
        assert_eq!(analysis["raw_text"], "[1, 2, 3]");
    }

    #[test]
    fn test_pitch_deck_shapes() {
        let array = parse_pitch_deck(r#"[{"slide_number": 1, "title": "Hook"}]"#);
        assert_eq!(array["slides"][0]["title"], "Hook");

        let object = parse_pitch_deck("```json\n{\"slides\": [{\"slide_number\": 1}]}\n```");
        assert_eq!(object["slides"].as_array().map(Vec::len), Some(1));

        assert_eq!(parse_pitch_deck("no deck today"), json!({"slides": []}));
        assert_eq!(parse_pitch_deck(r#"{"title": "x"}"#), json!({"slides": []}));
    }

    #[test]
    fn test_string_list_ignores_non_strings() {
        let value = json!({"themes": ["grief", 3, null, "hope"]});
        assert_eq!(string_list(&value, "themes"), vec!["grief", "hope"]);
        assert!(string_list(&value, "missing").is_empty());
    }
}

//! Parsing and normalization of model output.
//!
//! Models are asked for strict JSON but do not always comply. Content is
//! parsed directly first; failing that, the span from the first `{` to the
//! last `}` is tried. The resulting object is then normalized into a
//! `PlanResponse` that always satisfies the schema invariants, whatever was
//! missing from the model's answer. Normalizing an already normalized plan
//! is a no-op.

use serde_json::{Map, Value};

use super::{MoreLink, PlanParams, PlanResponse, PlanStep};

const FALLBACK_APPLICATION: &str = "Use this plan as a template and tweak timings.";

/// Extract and parse the outermost `{...}` block embedded in `text`.
///
/// Matches greedily from the first `{` to the last `}`, so prose before and
/// after the object is ignored. The object need not end the content:
/// trailing remarks or a closing code fence after the `}` are tolerated,
/// where an end-anchored match would reject them. Returns `None` if there
/// is no such span or it is not valid JSON.
pub fn extract_json_object(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

/// Parse model content into a JSON object, recovering an embedded object
/// when the content carries extra prose.
pub fn parse_model_content(content: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(map)) => Some(map),
        _ => match extract_json_object(content)? {
            Value::Object(map) => Some(map),
            _ => None,
        },
    }
}

/// Fill defaults so the plan satisfies the response invariants.
pub fn normalize_plan(raw: Map<String, Value>, params: &PlanParams) -> PlanResponse {
    let title = text_field(raw.get("title"))
        .unwrap_or_else(|| format!("{} — {}", params.subject_topic, params.grade_age));

    let description = text_field(raw.get("description")).unwrap_or_default();

    let steps = raw
        .get("steps")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(step_from_value).collect::<Vec<_>>())
        .filter(|steps| !steps.is_empty())
        .unwrap_or_else(fallback_steps);

    let application =
        text_field(raw.get("application")).unwrap_or_else(|| FALLBACK_APPLICATION.to_string());

    let more = raw
        .get("more")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(link_from_value).collect())
        .unwrap_or_default();

    PlanResponse {
        title,
        description,
        steps,
        application,
        more,
    }
}

fn fallback_steps() -> Vec<PlanStep> {
    vec![PlanStep::new(
        "Introduce topic and objectives",
        "5 min",
        "Whiteboard",
    )]
}

/// Non-empty textual value. Models sometimes answer with bare numbers
/// (`"time": 10`), which are kept as their JSON text.
fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn step_from_value(value: &Value) -> Option<PlanStep> {
    let obj = value.as_object()?;
    Some(PlanStep {
        text: text_field(obj.get("text")).unwrap_or_default(),
        time: text_field(obj.get("time")).unwrap_or_default(),
        materials: text_field(obj.get("materials")).unwrap_or_default(),
    })
}

fn link_from_value(value: &Value) -> Option<MoreLink> {
    let obj = value.as_object()?;
    Some(MoreLink {
        label: text_field(obj.get("label")).unwrap_or_default(),
        url: text_field(obj.get("url")).unwrap_or_default(),
        download: obj.get("download").and_then(Value::as_bool).unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanRequest;
    use serde_json::json;

    fn params() -> PlanParams {
        PlanRequest {
            subject_topic: Some("Photosynthesis".to_string()),
            grade_age: Some("Grade 7".to_string()),
            objectives: Some(vec!["explain light reactions".to_string()]),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    fn assert_invariants(plan: &PlanResponse) {
        assert!(!plan.title.is_empty());
        assert!(!plan.application.is_empty());
        assert!(!plan.steps.is_empty());
    }

    #[test]
    fn test_extract_after_leading_prose() {
        let text = "Sure! Here is your plan:\n{\"title\": \"Leaves\", \"steps\": []}";
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["title"], "Leaves");
    }

    #[test]
    fn test_extract_tolerates_trailing_prose() {
        let map = parse_model_content("{\"title\": \"x\"}\nHope this helps!").unwrap();
        assert_eq!(map["title"], "x");
    }

    #[test]
    fn test_extract_is_greedy_across_nested_objects() {
        let text = "plan: {\"a\": {\"b\": 1}, \"c\": {\"d\": 2}} -- end";
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["c"]["d"], 2);
    }

    #[test]
    fn test_extract_rejects_text_without_object() {
        assert!(extract_json_object("no json here").is_none());
        assert!(extract_json_object("} backwards {").is_none());
        assert!(extract_json_object("{ not: valid }").is_none());
    }

    #[test]
    fn test_parse_direct_json() {
        let map = parse_model_content(r#"{"title": "Direct"}"#).unwrap();
        assert_eq!(map["title"], "Direct");
    }

    #[test]
    fn test_parse_recovers_embedded_object() {
        let map = parse_model_content("```json\n{\"title\": \"Fenced\"}\n```").unwrap();
        assert_eq!(map["title"], "Fenced");
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert!(parse_model_content("I cannot help with that.").is_none());
        assert!(parse_model_content("null").is_none());
        assert!(parse_model_content("[1, 2, 3]").is_none());
        assert!(parse_model_content("").is_none());
    }

    #[test]
    fn test_empty_object_gets_all_defaults() {
        let plan = normalize_plan(Map::new(), &params());

        assert_eq!(plan.title, "Photosynthesis — Grade 7");
        assert_eq!(plan.description, "");
        assert_eq!(plan.steps, fallback_steps());
        assert_eq!(plan.application, FALLBACK_APPLICATION);
        assert!(plan.more.is_empty());
        assert_invariants(&plan);
    }

    #[test]
    fn test_complete_plan_is_preserved() {
        let raw = json!({
            "title": "Light and Life",
            "description": "How plants make food",
            "steps": [
                {"text": "Demo with leaf", "time": "10 min", "materials": "Leaves"},
                {"text": "Lab", "time": "25 min", "materials": "Iodine"}
            ],
            "application": "Garden journal",
            "more": [{"label": "Worksheet", "url": "https://example.com/w.pdf", "download": true}]
        });

        let plan = normalize_plan(object(raw), &params());

        assert_eq!(plan.title, "Light and Life");
        assert_eq!(plan.description, "How plants make food");
        assert_eq!(plan.steps.len(), 2);
        assert_eq!(plan.steps[1].materials, "Iodine");
        assert_eq!(plan.application, "Garden journal");
        assert_eq!(plan.more.len(), 1);
        assert!(plan.more[0].download);
    }

    #[test]
    fn test_wrong_typed_fields_are_defaulted() {
        let raw = json!({
            "title": "",
            "steps": "do the thing",
            "application": null,
            "more": "none"
        });

        let plan = normalize_plan(object(raw), &params());

        assert_eq!(plan.title, "Photosynthesis — Grade 7");
        assert_eq!(plan.steps, fallback_steps());
        assert_eq!(plan.application, FALLBACK_APPLICATION);
        assert!(plan.more.is_empty());
    }

    #[test]
    fn test_lenient_step_fields() {
        let raw = json!({
            "steps": [
                {"text": "Warm-up", "time": 5},
                "not a step",
                {"text": "Discussion", "time": "15 min", "materials": "Cards"}
            ]
        });

        let plan = normalize_plan(object(raw), &params());

        assert_eq!(plan.steps.len(), 2);
        assert_eq!(plan.steps[0], PlanStep::new("Warm-up", "5", ""));
    }

    #[test]
    fn test_steps_without_objects_fall_back() {
        let raw = json!({ "steps": [1, 2, 3] });
        let plan = normalize_plan(object(raw), &params());
        assert_eq!(plan.steps, fallback_steps());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let inputs = [
            json!({}),
            json!({"title": "T", "steps": []}),
            json!({"more": [{"label": "x"}], "description": "d"}),
            json!({"steps": [{"text": "a", "time": 3, "materials": "m"}], "application": "go"}),
        ];

        for input in inputs {
            let once = normalize_plan(object(input), &params());
            let again = normalize_plan(object(serde_json::to_value(&once).unwrap()), &params());
            assert_eq!(once, again);
            assert_invariants(&again);
        }
    }
}

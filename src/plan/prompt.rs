//! Prompt construction for the upstream completion API.

use super::PlanParams;

/// System instruction pinning the model to the response schema.
pub const SYSTEM_PROMPT: &str = r#"You are an expert instructional designer.
Return ONLY valid JSON with this exact schema:
{
  "title": string,
  "description": string,
  "steps": [{"text": string, "time": string, "materials": string}],
  "application": string,
  "more": [{"label": string, "url": string, "download": boolean}]
}"#;

/// Render the user message: an instruction followed by the parameters as
/// pretty-printed JSON.
pub fn user_message(params: &PlanParams) -> Result<String, serde_json::Error> {
    Ok(format!(
        "Create a tailored, classroom-ready plan for:\n{}",
        serde_json::to_string_pretty(params)?
    ))
}

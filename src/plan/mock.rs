//! Deterministic sample plans for running without an upstream API key.

use super::{PlanParams, PlanResponse, PlanStep};

const MOCK_APPLICATION: &str =
    "Use as a template; adjust time and difficulty for your class profile.";

/// Build a five-step plan from the request parameters alone.
pub fn build_mock_plan(params: &PlanParams) -> PlanResponse {
    let method = &params.method;

    PlanResponse {
        title: format!(
            "{} — {} ({})",
            method, params.subject_topic, params.grade_age
        ),
        description: format!(
            "A quick, structured {} plan tailored for {} on \"{}\".",
            method, params.grade_age, params.subject_topic
        ),
        steps: vec![
            PlanStep::new("Hook & objective sharing", "5 min", "Slides or board"),
            PlanStep::new(
                format!(
                    "Mini-lesson aligned to objectives ({})",
                    params.objectives.join("; ")
                ),
                "10 min",
                "Examples",
            ),
            PlanStep::new(
                format!("{}: students work in pairs/groups", method),
                "20 min",
                "Worksheet/devices",
            ),
            PlanStep::new("Share-out & feedback", "7 min", "Timer"),
            PlanStep::new("Exit ticket & next steps", "3 min", "Paper or form"),
        ],
        application: MOCK_APPLICATION.to_string(),
        more: Vec::new(),
    }
}

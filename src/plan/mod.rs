//! Lesson plan domain types.
//!
//! A generate request arrives as a `GenerateBody` envelope wrapping a loosely
//! filled `PlanRequest`. Validation turns it into `PlanParams`, the complete
//! and defaulted parameter set that both the mock generator and the upstream
//! prompt consume. Whatever the source, a `PlanResponse` always satisfies the
//! schema invariants: non-empty steps and populated title and application.

pub mod generate;
pub mod mock;
pub mod normalize;
pub mod prompt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub use generate::GenerationMode;

/// Method name used when the request does not name one
pub const DEFAULT_METHOD: &str = "Teaching Method";

/// Tone used when the request does not specify one
pub const DEFAULT_TONE: &str = "Friendly";

/// Request envelope: `{ "inputs": { ... } }`
#[derive(Debug, Default, Deserialize)]
pub struct GenerateBody {
    pub inputs: Option<PlanRequest>,
}

impl GenerateBody {
    /// Parse a raw request body. An empty or malformed body is treated the
    /// same as one with missing fields.
    pub fn from_slice(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| {
            tracing::debug!(error = %e, "Rejecting unparseable request body");
            AppError::MissingFields
        })
    }

    /// Validate the envelope and produce the defaulted parameter set.
    pub fn into_params(self) -> Result<PlanParams, AppError> {
        self.inputs.ok_or(AppError::MissingFields)?.validate()
    }
}

/// Lesson plan parameters as submitted by the client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub subject_topic: Option<String>,
    pub grade_age: Option<String>,
    pub objectives: Option<Vec<String>>,
    pub method: Option<String>,
    pub prior_knowledge: Option<String>,
    pub class_profile: Option<String>,
    pub tech_access: Option<String>,
    pub time_available: Option<String>,
    pub tone: Option<String>,
}

impl PlanRequest {
    /// Check required fields and fill defaults.
    ///
    /// `subjectTopic` and `gradeAge` must be non-empty and `objectives` must
    /// be present as an array (an empty array is accepted).
    pub fn validate(self) -> Result<PlanParams, AppError> {
        let subject_topic = non_empty(self.subject_topic).ok_or(AppError::MissingFields)?;
        let grade_age = non_empty(self.grade_age).ok_or(AppError::MissingFields)?;
        let objectives = self.objectives.ok_or(AppError::MissingFields)?;

        let method = non_empty(self.method)
            .unwrap_or_else(|| DEFAULT_METHOD.to_string())
            .trim()
            .to_string();

        Ok(PlanParams {
            method,
            grade_age,
            subject_topic,
            objectives,
            prior_knowledge: self.prior_knowledge.unwrap_or_default(),
            class_profile: self.class_profile.unwrap_or_default(),
            tech_access: self.tech_access.unwrap_or_default(),
            time_available: self.time_available.unwrap_or_default(),
            tone: non_empty(self.tone).unwrap_or_else(|| DEFAULT_TONE.to_string()),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Validated, defaulted plan parameters.
///
/// Field order matters: this is serialized verbatim into the upstream prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanParams {
    pub method: String,
    pub grade_age: String,
    pub subject_topic: String,
    pub objectives: Vec<String>,
    pub prior_knowledge: String,
    pub class_profile: String,
    pub tech_access: String,
    pub time_available: String,
    pub tone: String,
}

/// A generated lesson plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub title: String,
    pub description: String,
    pub steps: Vec<PlanStep>,
    pub application: String,
    pub more: Vec<MoreLink>,
}

/// One timed activity in a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStep {
    pub text: String,
    pub time: String,
    pub materials: String,
}

impl PlanStep {
    pub fn new(text: impl Into<String>, time: impl Into<String>, materials: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            time: time.into(),
            materials: materials.into(),
        }
    }
}

/// Supplementary resource link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoreLink {
    pub label: String,
    pub url: String,
    pub download: bool,
}

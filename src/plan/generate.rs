//! Plan generation: mock or live.

use std::sync::Arc;

use super::mock::build_mock_plan;
use super::normalize::{normalize_plan, parse_model_content};
use super::prompt::{user_message, SYSTEM_PROMPT};
use super::{PlanParams, PlanResponse};
use crate::error::AppError;
use crate::upstream::{CompletionClient, CompletionRequest};

/// Content assumed when the model returns no message.
const EMPTY_CONTENT: &str = "{}";

/// How plans are produced. Chosen once at startup and injected into the
/// handler state.
#[derive(Clone)]
pub enum GenerationMode {
    /// No credential configured: deterministic local plans.
    Mock,
    /// Ask the completion API.
    Live(Arc<dyn CompletionClient>),
}

impl GenerationMode {
    pub fn is_mock(&self) -> bool {
        matches!(self, GenerationMode::Mock)
    }

    /// Produce a plan for validated parameters.
    pub async fn generate(&self, params: &PlanParams) -> Result<PlanResponse, AppError> {
        match self {
            GenerationMode::Mock => Ok(build_mock_plan(params)),
            GenerationMode::Live(client) => generate_live(client.as_ref(), params).await,
        }
    }
}

impl std::fmt::Debug for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationMode::Mock => f.write_str("Mock"),
            GenerationMode::Live(client) => f.debug_tuple("Live").field(&client.model()).finish(),
        }
    }
}

async fn generate_live(
    client: &dyn CompletionClient,
    params: &PlanParams,
) -> Result<PlanResponse, AppError> {
    let request = CompletionRequest {
        system: SYSTEM_PROMPT.to_string(),
        user: user_message(params).map_err(|e| AppError::Internal(e.to_string()))?,
    };

    let content = client
        .complete(&request)
        .await?
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| EMPTY_CONTENT.to_string());

    let raw = parse_model_content(&content).ok_or_else(|| {
        tracing::warn!(content_len = content.len(), "Model content is not a JSON object");
        AppError::InvalidModelOutput
    })?;

    Ok(normalize_plan(raw, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanRequest;
    use crate::upstream::UpstreamError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns canned content and records the last request.
    struct StubClient {
        reply: Result<Option<String>, u16>,
        seen: Mutex<Option<CompletionRequest>>,
    }

    impl StubClient {
        fn replying(content: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(content.map(str::to_string)),
                seen: Mutex::new(None),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(status),
                seen: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl CompletionClient for StubClient {
        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<Option<String>, UpstreamError> {
            *self.seen.lock().unwrap() = Some(request.clone());
            match &self.reply {
                Ok(content) => Ok(content.clone()),
                Err(status) => Err(UpstreamError::Http {
                    status: *status,
                    body: "stub failure".to_string(),
                }),
            }
        }

        fn model(&self) -> &str {
            "stub"
        }
    }

    fn params() -> PlanParams {
        PlanRequest {
            subject_topic: Some("Fractions".to_string()),
            grade_age: Some("5th grade".to_string()),
            objectives: Some(vec!["understand numerators".to_string()]),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn test_mock_mode() {
        let plan = GenerationMode::Mock.generate(&params()).await.unwrap();
        assert_eq!(plan.title, "Teaching Method — Fractions (5th grade)");
        assert_eq!(plan.steps.len(), 5);
    }

    #[tokio::test]
    async fn test_live_sends_prompts() {
        let stub = StubClient::replying(Some(r#"{"title": "Pizza Fractions"}"#));
        let mode = GenerationMode::Live(stub.clone());

        let plan = mode.generate(&params()).await.unwrap();
        assert_eq!(plan.title, "Pizza Fractions");
        assert_eq!(plan.steps.len(), 1);

        let seen = stub.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.system, SYSTEM_PROMPT);
        assert!(seen.user.contains("\"subjectTopic\": \"Fractions\""));
    }

    #[tokio::test]
    async fn test_live_missing_content_defaults() {
        for content in [None, Some("")] {
            let mode = GenerationMode::Live(StubClient::replying(content));
            let plan = mode.generate(&params()).await.unwrap();
            assert_eq!(plan.title, "Fractions — 5th grade");
            assert_eq!(plan.steps[0].text, "Introduce topic and objectives");
        }
    }

    #[tokio::test]
    async fn test_live_recovers_from_prose() {
        let mode = GenerationMode::Live(StubClient::replying(Some(
            "Here you go!\n{\"title\": \"Slices\", \"more\": []}",
        )));
        let plan = mode.generate(&params()).await.unwrap();
        assert_eq!(plan.title, "Slices");
    }

    #[tokio::test]
    async fn test_live_unparseable_content() {
        let mode = GenerationMode::Live(StubClient::replying(Some("I'd rather not.")));
        let err = mode.generate(&params()).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidModelOutput));
    }

    #[tokio::test]
    async fn test_live_upstream_failure() {
        let mode = GenerationMode::Live(StubClient::failing(503));
        let err = mode.generate(&params()).await.unwrap_err();
        assert_eq!(err.to_string(), "OpenAI API error: 503 stub failure");
    }

    #[test]
    fn test_debug_shows_model_only() {
        let mode = GenerationMode::Live(StubClient::replying(None));
        assert_eq!(format!("{:?}", mode), "Live(\"stub\")");
        assert!(GenerationMode::Mock.is_mock());
    }
}

//! Evaluator: prompt, one model call, parse, validate.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::llm_client::{extract_json_payload, TextGenerator};
use crate::screening::models::{ScreeningRequest, ScreeningResult};
use crate::screening::prompts::render_screening_prompt;
use crate::screening::validation::validate_screening_output;
use crate::screening::ScreeningError;

/// Runs a single screening. Holds no per-request state, so one instance is
/// shared by every handler.
#[derive(Clone)]
pub struct Evaluator {
    generator: Arc<dyn TextGenerator>,
}

impl Evaluator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Screens `resume_text` against `job_description`.
    ///
    /// Invalid input fails before the model is called. A failed call or
    /// non-JSON output is `Upstream`; JSON of the wrong shape is `InvalidOutput`.
    pub async fn evaluate(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<ScreeningResult, ScreeningError> {
        ScreeningRequest {
            resume_text: resume_text.to_string(),
            job_description: job_description.to_string(),
        }
        .validate()?;

        let prompt = render_screening_prompt(resume_text, job_description);
        debug!(prompt_chars = prompt.len(), "Calling screening model");

        let raw = self.generator.generate(&prompt).await.map_err(|e| {
            error!("Screening model call failed: {e}");
            ScreeningError::Upstream(format!("model call failed: {e}"))
        })?;

        let payload = extract_json_payload(&raw);
        let value: serde_json::Value = serde_json::from_str(payload).map_err(|e| {
            warn!("Screening model returned non-JSON output: {e}");
            ScreeningError::Upstream(format!("malformed model output: {e}"))
        })?;

        validate_screening_output(&value).map_err(ScreeningError::InvalidOutput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::StubGenerator;
    use crate::screening::models::Recommendation;

    const RESUME: &str = "5 years Python, AWS";
    const JD: &str = "Senior backend engineer, AWS required";

    fn evaluator_with(stub: &Arc<StubGenerator>) -> Evaluator {
        Evaluator::new(stub.clone())
    }

    #[tokio::test]
    async fn test_valid_output_returned() {
        let stub = Arc::new(StubGenerator::replying(
            r#"{"score":85,"strengths":["AWS experience"],"weaknesses":[],"recommendation":"Hire"}"#,
        ));
        let result = evaluator_with(&stub).evaluate(RESUME, JD).await.unwrap();
        assert_eq!(result.score, 85);
        assert_eq!(result.recommendation, Recommendation::Hire);
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_prompt_carries_both_inputs() {
        let stub = Arc::new(StubGenerator::replying(
            r#"{"score":10,"strengths":[],"weaknesses":["No AWS"],"recommendation":"No Hire"}"#,
        ));
        evaluator_with(&stub).evaluate(RESUME, JD).await.unwrap();
        let prompt = stub.last_prompt().unwrap();
        assert!(prompt.contains(RESUME));
        assert!(prompt.contains(JD));
    }

    #[tokio::test]
    async fn test_fenced_output_accepted() {
        let stub = Arc::new(StubGenerator::replying(
            "```json\n{\"score\":40,\"strengths\":[],\"weaknesses\":[],\"recommendation\":\"Maybe\"}\n```",
        ));
        let result = evaluator_with(&stub).evaluate(RESUME, JD).await.unwrap();
        assert_eq!(result.recommendation, Recommendation::Maybe);
    }

    #[tokio::test]
    async fn test_empty_input_never_calls_model() {
        let stub = Arc::new(StubGenerator::replying("{}"));
        let err = evaluator_with(&stub).evaluate("", JD).await.unwrap_err();
        assert!(matches!(err, ScreeningError::InvalidRequest(_)));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_non_json_output_is_upstream() {
        let stub = Arc::new(StubGenerator::replying("I think this candidate is great!"));
        let err = evaluator_with(&stub).evaluate(RESUME, JD).await.unwrap_err();
        match err {
            ScreeningError::Upstream(msg) => assert!(msg.contains("malformed model output")),
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_model_failure_is_upstream() {
        let stub = Arc::new(StubGenerator::failing());
        let err = evaluator_with(&stub).evaluate(RESUME, JD).await.unwrap_err();
        assert!(matches!(err, ScreeningError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_invalid_output() {
        let stub = Arc::new(StubGenerator::replying(
            r#"{"score":150,"strengths":[],"weaknesses":[],"recommendation":"Hire"}"#,
        ));
        let err = evaluator_with(&stub).evaluate(RESUME, JD).await.unwrap_err();
        assert!(matches!(err, ScreeningError::InvalidOutput(_)));
    }
}

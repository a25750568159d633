//! Axum route handlers for the Screening API.

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    Json,
};
use tracing::{debug, info};

use crate::documents::{detect_kind, extract_text, DocumentError};
use crate::errors::AppError;
use crate::screening::models::{ScreeningRequest, ScreeningResult};
use crate::state::AppState;

/// Largest accepted multipart body for document uploads.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// POST /screen-resume
///
/// Screens pasted resume text against a job description. Body errors (bad
/// JSON, wrong field types) are reported as validation failures.
pub async fn handle_screen_resume(
    State(state): State<AppState>,
    payload: Result<Json<ScreeningRequest>, JsonRejection>,
) -> Result<Json<ScreeningResult>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    screen(&state, request).await
}

/// POST /screen-resume/upload
///
/// Multipart variant: `resume` is a PDF or text file, `job_description` a text
/// field. The extracted text goes through the same pipeline as pasted text.
pub async fn handle_screen_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScreeningResult>, AppError> {
    let mut resume: Option<(Option<String>, bytes::Bytes)> = None;
    let mut job_description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("resume") => {
                let filename = field.file_name().map(str::to_owned);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.body_text()))?;
                resume = Some((filename, data));
            }
            Some("job_description") => {
                job_description = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.body_text()))?;
            }
            other => debug!(field = ?other, "Ignoring unexpected multipart field"),
        }
    }

    let (filename, data) =
        resume.ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;

    let kind = detect_kind(filename.as_deref(), &data).ok_or_else(|| {
        DocumentError::UnknownType(filename.clone().unwrap_or_else(|| "upload".to_string()))
    })?;
    info!(?kind, bytes = data.len(), "Extracting uploaded resume");

    let resume_text = tokio::task::spawn_blocking(move || extract_text(kind, &data))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    screen(
        &state,
        ScreeningRequest {
            resume_text,
            job_description,
        },
    )
    .await
}

async fn screen(
    state: &AppState,
    request: ScreeningRequest,
) -> Result<Json<ScreeningResult>, AppError> {
    request.validate()?;

    let result = state
        .evaluator
        .evaluate(&request.resume_text, &request.job_description)
        .await?;

    info!(
        score = result.score,
        recommendation = %result.recommendation,
        "Resume screened"
    );

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::llm_client::testing::StubGenerator;
    use crate::routes::build_router;
    use crate::state::AppState;

    const HIRE_STUB: &str =
        r#"{"score":85,"strengths":["AWS experience"],"weaknesses":[],"recommendation":"Hire"}"#;

    fn app(stub: &Arc<StubGenerator>) -> Router {
        build_router(AppState::new(stub.clone()))
    }

    fn screen_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/screen-resume")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    const VALID_BODY: &str = r#"{"resume_text":"5 years Python, AWS","job_description":"Senior backend engineer, AWS required"}"#;

    #[tokio::test]
    async fn test_end_to_end_reflects_stub_verbatim() {
        let stub = Arc::new(StubGenerator::replying(HIRE_STUB));
        let (status, body) = send(app(&stub), screen_request(VALID_BODY)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(String::from_utf8(body).unwrap(), HIRE_STUB);
    }

    #[tokio::test]
    async fn test_repeated_calls_are_byte_identical() {
        let stub = Arc::new(StubGenerator::replying(HIRE_STUB));
        let (_, first) = send(app(&stub), screen_request(VALID_BODY)).await;
        let (_, second) = send(app(&stub), screen_request(VALID_BODY)).await;
        assert_eq!(first, second);
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn test_missing_field_rejected_without_model_call() {
        let stub = Arc::new(StubGenerator::replying(HIRE_STUB));
        let (status, body) = send(
            app(&stub),
            screen_request(r#"{"resume_text":"5 years Python, AWS"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("job_description"));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_string_rejected_without_model_call() {
        let stub = Arc::new(StubGenerator::replying(HIRE_STUB));
        let (status, _) = send(
            app(&stub),
            screen_request(r#"{"resume_text":"","job_description":"Backend engineer"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_wrong_field_type_is_validation_error() {
        let stub = Arc::new(StubGenerator::replying(HIRE_STUB));
        let (status, _) = send(
            app(&stub),
            screen_request(r#"{"resume_text":42,"job_description":"Backend engineer"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_non_json_model_output_is_upstream_failure() {
        let stub = Arc::new(StubGenerator::replying("Sorry, I cannot help with that."));
        let (status, body) = send(app(&stub), screen_request(VALID_BODY)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "UPSTREAM_ERROR");
    }

    #[tokio::test]
    async fn test_model_failure_is_upstream_failure() {
        let stub = Arc::new(StubGenerator::failing());
        let (status, body) = send(app(&stub), screen_request(VALID_BODY)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert!(!json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("overloaded"));
    }

    #[tokio::test]
    async fn test_invalid_scores_are_validation_failures() {
        for score in ["150", "-1", r#""high""#] {
            let reply = format!(
                r#"{{"score":{score},"strengths":[],"weaknesses":[],"recommendation":"Hire"}}"#
            );
            let stub = Arc::new(StubGenerator::replying(&reply));
            let (status, _) = send(app(&stub), screen_request(VALID_BODY)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "score {score}");
        }
    }

    #[tokio::test]
    async fn test_unknown_recommendation_is_validation_failure() {
        let stub = Arc::new(StubGenerator::replying(
            r#"{"score":60,"strengths":[],"weaknesses":[],"recommendation":"Maybe Later"}"#,
        ));
        let (status, body) = send(app(&stub), screen_request(VALID_BODY)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert!(!json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Senior backend engineer"));
    }

    #[tokio::test]
    async fn test_model_echoing_resume_into_recommendation_not_returned() {
        let stub = Arc::new(StubGenerator::replying(
            r#"{"score":60,"strengths":[],"weaknesses":[],"recommendation":"5 years Python, AWS"}"#,
        ));
        let (status, body) = send(app(&stub), screen_request(VALID_BODY)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let body = String::from_utf8(body).unwrap();
        assert!(!body.contains("5 years Python"));
    }

    fn multipart_request(parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let parts: Vec<(&str, Option<&str>, &[u8])> = parts
            .iter()
            .map(|(name, filename, content)| (*name, *filename, content.as_bytes()))
            .collect();
        multipart_request_bytes(&parts)
    }

    fn multipart_request_bytes(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let boundary = "screener-test-boundary";
        let mut body: Vec<u8> = Vec::new();
        for (name, filename, content) in parts {
            body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            let disposition = match filename {
                Some(filename) => format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                ),
                None => format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"),
            };
            body.extend_from_slice(disposition.as_bytes());
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/screen-resume/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_text_resume_screened() {
        let stub = Arc::new(StubGenerator::replying(HIRE_STUB));
        let request = multipart_request(&[
            ("resume", Some("resume.txt"), "Jane Doe\n\n5 years   Python, AWS"),
            ("job_description", None, "Senior backend engineer, AWS required"),
        ]);
        let (status, body) = send(app(&stub), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(String::from_utf8(body).unwrap(), HIRE_STUB);
        assert!(stub
            .last_prompt()
            .unwrap()
            .contains("Jane Doe\n\n5 years Python, AWS"));
    }

    #[tokio::test]
    async fn test_upload_without_resume_rejected() {
        let stub = Arc::new(StubGenerator::replying(HIRE_STUB));
        let request = multipart_request(&[("job_description", None, "Backend engineer")]);
        let (status, body) = send(app(&stub), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["message"], "resume file is required");
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_upload_docx_resume_screened() {
        let stub = Arc::new(StubGenerator::replying(HIRE_STUB));
        let docx = crate::documents::docx::build_docx(
            "<w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>\
             <w:tbl><w:tr><w:tc><w:p><w:r><w:t>Python</w:t></w:r></w:p></w:tc>\
             <w:tc><w:p><w:r><w:t>5 years</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
        );
        let request = multipart_request_bytes(&[
            ("resume", Some("resume.docx"), docx.as_slice()),
            ("job_description", None, "Senior backend engineer".as_bytes()),
        ]);
        let (status, body) = send(app(&stub), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(String::from_utf8(body).unwrap(), HIRE_STUB);
        assert!(stub
            .last_prompt()
            .unwrap()
            .contains("Jane Doe\n\nPython | 5 years"));
    }

    #[tokio::test]
    async fn test_upload_corrupt_docx_rejected() {
        let stub = Arc::new(StubGenerator::replying(HIRE_STUB));
        let request = multipart_request(&[
            ("resume", Some("resume.docx"), "PK not really a zip"),
            ("job_description", None, "Backend engineer"),
        ]);
        let (status, body) = send(app(&stub), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to parse DOCX"));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_upload_without_job_description_rejected() {
        let stub = Arc::new(StubGenerator::replying(HIRE_STUB));
        let request = multipart_request(&[("resume", Some("resume.txt"), "Jane Doe, Rust")]);
        let (status, _) = send(app(&stub), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(stub.calls(), 0);
    }
}

//! Schema validation for raw model output.
//!
//! The model is told the shape, but nothing guarantees it. Every field is
//! checked by hand so the caller gets all violations at once instead of the
//! first serde error.

use serde_json::{Map, Value};
use tracing::warn;

use crate::screening::models::{Recommendation, ScreeningResult};

const SCORE_MAX: u64 = 100;
/// Longest slice of a rejected recommendation written to the log.
const LOGGED_VALUE_CHARS: usize = 80;

/// Validates parsed model output against the `ScreeningResult` shape.
///
/// Returns the joined list of violations on failure. Unknown extra fields are
/// ignored and do not appear in the result.
pub fn validate_screening_output(value: &Value) -> Result<ScreeningResult, String> {
    let Some(object) = value.as_object() else {
        return Err(format!(
            "model output must be a JSON object, got {}",
            json_type(value)
        ));
    };

    let mut violations = Vec::new();

    let score = match object.get("score") {
        None => {
            violations.push("score is missing".to_string());
            None
        }
        Some(v) if v.is_i64() || v.is_u64() => match v.as_u64() {
            Some(n) if n <= SCORE_MAX => Some(n as u8),
            _ => {
                violations.push(format!("score must be between 0 and {SCORE_MAX}, got {v}"));
                None
            }
        },
        Some(v) => {
            violations.push(format!("score must be an integer, got {v}"));
            None
        }
    };

    let strengths = string_list(object, "strengths", &mut violations);
    let weaknesses = string_list(object, "weaknesses", &mut violations);

    let recommendation = match object.get("recommendation") {
        None => {
            violations.push("recommendation is missing".to_string());
            None
        }
        Some(Value::String(s)) => match s.parse::<Recommendation>() {
            Ok(r) => Some(r),
            Err(()) => {
                let allowed: Vec<String> = Recommendation::ALL
                    .iter()
                    .map(|r| format!("\"{r}\""))
                    .collect();
                // The rejected value is model text and may quote the resume;
                // it goes to the log, never into the error body.
                let logged: String = s.chars().take(LOGGED_VALUE_CHARS).collect();
                warn!(recommendation = %logged, "Model returned an unknown recommendation");
                violations.push(format!(
                    "recommendation must be one of {}",
                    allowed.join(", ")
                ));
                None
            }
        },
        Some(other) => {
            violations.push(format!(
                "recommendation must be a string, got {}",
                json_type(other)
            ));
            None
        }
    };

    match (score, strengths, weaknesses, recommendation) {
        (Some(score), Some(strengths), Some(weaknesses), Some(recommendation))
            if violations.is_empty() =>
        {
            Ok(ScreeningResult {
                score,
                strengths,
                weaknesses,
                recommendation,
            })
        }
        _ => Err(violations.join("; ")),
    }
}

fn string_list(
    object: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<String>,
) -> Option<Vec<String>> {
    match object.get(field) {
        None => {
            violations.push(format!("{field} is missing"));
            None
        }
        Some(Value::Array(items)) => {
            let strings: Option<Vec<String>> = items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect();
            if strings.is_none() {
                violations.push(format!("{field} must contain only strings"));
            }
            strings
        }
        Some(other) => {
            violations.push(format!(
                "{field} must be an array of strings, got {}",
                json_type(other)
            ));
            None
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

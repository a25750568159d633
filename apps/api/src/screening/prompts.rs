// All LLM prompt constants for the screening module.
// Reuses the JSON-only fragment from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// Reviewer persona placed at the top of every screening prompt.
pub const SCREENER_DIRECTIVE: &str = "You are a professional technical recruiter \
    screening candidates for an open role. \
    You evaluate resumes objectively and strictly against the job description. \
    Return output ONLY in valid JSON format.";

/// Output contract. Must stay in sync with `ScreeningResult` and `Recommendation`.
pub const OUTPUT_SHAPE: &str = r#"Format exactly like this:

{
  "score": integer between 0 and 100,
  "strengths": [list of strings],
  "weaknesses": [list of strings],
  "recommendation": "Hire" or "No Hire" or "Maybe"
}"#;

/// Renders the screening prompt. Inputs are interpolated verbatim.
pub fn render_screening_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        "{SCREENER_DIRECTIVE}\n\n\
         Compare the resume with the job description.\n\n\
         Job Description:\n{job_description}\n\n\
         Resume:\n{resume_text}\n\n\
         {JSON_ONLY_INSTRUCTION}\n\n\
         {OUTPUT_SHAPE}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_interpolates_inputs_verbatim() {
        let prompt = render_screening_prompt(
            "Led {team} of 5 \"engineers\"",
            "Senior backend engineer, AWS required",
        );
        assert!(prompt.contains("Led {team} of 5 \"engineers\""));
        assert!(prompt.contains("Job Description:\nSenior backend engineer, AWS required"));
    }

    #[test]
    fn test_job_description_precedes_resume() {
        let prompt = render_screening_prompt("RESUME-MARKER", "JD-MARKER");
        let jd_at = prompt.find("JD-MARKER").unwrap();
        let resume_at = prompt.find("RESUME-MARKER").unwrap();
        assert!(jd_at < resume_at);
    }

    #[test]
    fn test_prompt_lists_every_recommendation() {
        let prompt = render_screening_prompt("r", "j");
        for recommendation in crate::screening::models::Recommendation::ALL {
            assert!(prompt.contains(&format!("\"{recommendation}\"")));
        }
        assert!(prompt.contains("Return ONLY valid JSON"));
    }
}

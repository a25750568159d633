// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it;
// this file holds the pieces every prompt reuses.

/// Directive that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "IMPORTANT:\n\
    - Return ONLY valid JSON.\n\
    - Do NOT include any text outside the JSON object.\n\
    - Do NOT use markdown code fences.\n\
    - Do NOT include explanations or apologies.";

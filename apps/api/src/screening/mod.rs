// Resume screening: prompt rendering, the single model call, and schema validation
// of what comes back. All LLM calls go through the `TextGenerator` seam.

pub mod evaluator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod validation;

use thiserror::Error;

pub use evaluator::Evaluator;

/// Failure modes of a screening run. Mapped to HTTP statuses in `errors.rs`.
#[derive(Debug, Error)]
pub enum ScreeningError {
    /// Caller input failed validation. The model was not called.
    #[error("{0}")]
    InvalidRequest(String),

    /// The model output parsed as JSON but violates the result schema.
    #[error("{0}")]
    InvalidOutput(String),

    /// The model call failed, or its output was not JSON.
    #[error("{0}")]
    Upstream(String),
}

use std::sync::Arc;

use crate::llm_client::TextGenerator;
use crate::screening::Evaluator;
use crate::skills::{ExperienceDetector, SkillExtractor};

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; nothing in here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    pub evaluator: Evaluator,
    /// Compiled skill-matching patterns, shared read-only.
    pub skills: Arc<SkillExtractor>,
    /// Work history analysis, sharing the skill patterns above.
    pub experience: Arc<ExperienceDetector>,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        let skills = Arc::new(SkillExtractor::new());
        Self {
            evaluator: Evaluator::new(generator),
            experience: Arc::new(ExperienceDetector::new(skills.clone())),
            skills,
        }
    }
}

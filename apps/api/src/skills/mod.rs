// Deterministic resume analysis: alias normalisation, categories,
// context-graded experience levels and work history. No LLM calls in this
// module.

pub mod database;
pub mod experience;
pub mod extractor;
pub mod handlers;

pub use experience::ExperienceDetector;
pub use extractor::SkillExtractor;

//! Contextual skill extractor.
//!
//! Finds known skills sentence by sentence and grades how deeply each one is
//! claimed from the wording around it. Pure Rust, no LLM call.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::skills::database::SkillDatabase;

// A period only ends a sentence when whitespace or the end of text follows,
// so `.NET` and `Node.js` survive the split.
static SENTENCE_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+(?:\s+|$)|\n+").unwrap());
static YEARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\+?\s*years?").unwrap());

// `{skill}` is replaced by the escaped, lower-case skill before compiling.
const EXPERT_PATTERNS: &[&str] = &[
    r"(?:expert|advanced|senior|lead|architect)\s+(?:in|with|level)?\s*{skill}",
    r"{skill}\s+(?:expert|architect|lead)",
    r"(?:deep|extensive|strong)\s+(?:experience|expertise|knowledge)\s+(?:in|with)\s+{skill}",
    r"(?:\d+\+?\s*years?|[5-9]\d*\s*years?)\s+(?:of\s+)?(?:experience\s+)?(?:in|with)\s+{skill}",
];

const PROFICIENT_PATTERNS: &[&str] = &[
    r"(?:proficient|experienced|skilled)\s+(?:in|with)\s+{skill}",
    r"{skill}\s+(?:developer|engineer|specialist)",
    r"(?:worked|working)\s+(?:extensively\s+)?(?:with|on)\s+{skill}",
    r"(?:[2-4]\s*years?)\s+(?:of\s+)?(?:experience\s+)?(?:in|with)\s+{skill}",
    r"(?:built|developed|created|implemented)\s+.*{skill}",
];

const USED_PATTERNS: &[&str] = &[
    r"(?:used|using|worked\s+with)\s+{skill}",
    r"{skill}\s+(?:for|in)\s+",
    r"(?:experience|knowledge)\s+(?:in|with|of)\s+{skill}",
    r"(?:familiar|comfortable)\s+(?:with)\s+{skill}",
];

/// How deeply a skill is claimed, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Expert,
    Proficient,
    Used,
    Mentioned,
}

impl ExperienceLevel {
    /// Years assumed when the sentence names none.
    fn default_years(self) -> f32 {
        match self {
            ExperienceLevel::Expert => 5.0,
            ExperienceLevel::Proficient => 3.0,
            ExperienceLevel::Used => 1.0,
            ExperienceLevel::Mentioned => 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSkill {
    /// The text as it matched (lower-cased).
    pub name: String,
    pub normalized_name: String,
    pub category: String,
    pub experience_level: ExperienceLevel,
    /// Sentence the skill was found in.
    pub context: String,
    pub years: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelBreakdown {
    pub expert: Vec<String>,
    pub proficient: Vec<String>,
    pub used: Vec<String>,
    pub mentioned: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillSummary {
    pub total_skills: usize,
    pub by_category: BTreeMap<String, Vec<String>>,
    pub by_level: LevelBreakdown,
    pub core_skills: Vec<String>,
    pub tools: Vec<String>,
}

/// Compiled level patterns for one term, strongest tier first.
type LevelPatterns = Vec<(ExperienceLevel, Vec<Regex>)>;

pub struct SkillExtractor {
    db: SkillDatabase,
    /// Every search term, longest first.
    terms: Vec<String>,
    /// Alternation of `terms` in the same order so `react native` wins over
    /// `react`.
    mention_pattern: Regex,
    /// Level patterns compiled on first use of each term.
    level_patterns: RwLock<HashMap<String, Arc<LevelPatterns>>>,
}

impl SkillExtractor {
    pub fn new() -> Self {
        let db = SkillDatabase::new();
        let mut terms: Vec<String> = db.search_terms().into_iter().collect();
        terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let alternation = terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let mention_pattern = Regex::new(&format!("(?:{alternation})"))
            .expect("escaped skill terms form a valid regex");

        Self {
            db,
            terms,
            mention_pattern,
            level_patterns: RwLock::new(HashMap::new()),
        }
    }

    /// Extracts every known skill from `text`, first occurrence wins.
    pub fn extract_skills(&self, text: &str) -> Vec<ExtractedSkill> {
        let mut skills = Vec::new();
        let mut seen = HashSet::new();

        for sentence in SENTENCE_SPLIT.split(text) {
            let sentence = sentence.trim();
            if sentence.is_empty() {
                continue;
            }
            let sentence_lower = sentence.to_lowercase();

            for (start, end) in self.mentions(&sentence_lower) {
                let matched = &sentence_lower[start..end];
                let normalized = self.db.normalize(matched);
                if !seen.insert(normalized.to_lowercase()) {
                    continue;
                }

                let (experience_level, years) =
                    self.detect_experience_level(&sentence_lower, matched);
                let category = self.db.category(&normalized).unwrap_or("other").to_string();

                skills.push(ExtractedSkill {
                    name: matched.to_string(),
                    normalized_name: normalized,
                    category,
                    experience_level,
                    context: sentence.to_string(),
                    years,
                });
            }
        }

        skills
    }

    /// Canonical name for an alias or known skill.
    pub fn normalize(&self, skill: &str) -> String {
        self.db.normalize(skill)
    }

    /// Canonical names of the known skills in `text`, in order of first
    /// appearance, without level grading.
    pub fn skill_names(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let mut seen = HashSet::new();
        self.mentions(&lower)
            .into_iter()
            .map(|(start, end)| self.db.normalize(&lower[start..end]))
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }

    /// Word-bounded term spans in a lower-cased sentence, left to right.
    ///
    /// The alternation picks the longest term at a position. When that term
    /// runs into a longer word (`react.jsx`), shorter terms starting at the
    /// same position are tried before moving on.
    fn mentions(&self, sentence_lower: &str) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut pos = 0;

        while let Some(m) = self.mention_pattern.find_at(sentence_lower, pos) {
            let start = m.start();
            let end = if is_word_bounded(sentence_lower, start, m.end()) {
                Some(m.end())
            } else {
                let candidate = m.as_str();
                self.terms
                    .iter()
                    .filter(|term| {
                        term.len() < candidate.len() && candidate.starts_with(term.as_str())
                    })
                    .map(|term| start + term.len())
                    .find(|&end| is_word_bounded(sentence_lower, start, end))
            };

            match end {
                Some(end) => {
                    spans.push((start, end));
                    pos = end;
                }
                None => {
                    let step = sentence_lower[start..].chars().next().map_or(1, char::len_utf8);
                    pos = start + step;
                }
            }
            if pos >= sentence_lower.len() {
                break;
            }
        }

        spans
    }

    /// Grades the claim strength of `skill` within a lower-cased sentence.
    fn detect_experience_level(
        &self,
        sentence_lower: &str,
        skill: &str,
    ) -> (ExperienceLevel, f32) {
        let tiers = self.patterns_for(skill);
        for (level, patterns) in tiers.iter() {
            if patterns.iter().any(|re| re.is_match(sentence_lower)) {
                let years = extract_years(sentence_lower).unwrap_or(level.default_years());
                return (*level, years);
            }
        }

        (ExperienceLevel::Mentioned, ExperienceLevel::Mentioned.default_years())
    }

    fn patterns_for(&self, skill: &str) -> Arc<LevelPatterns> {
        if let Some(cached) = self
            .level_patterns
            .read()
            .ok()
            .and_then(|cache| cache.get(skill).cloned())
        {
            return cached;
        }

        let compiled = Arc::new(compile_level_patterns(skill));
        if let Ok(mut cache) = self.level_patterns.write() {
            cache.insert(skill.to_string(), compiled.clone());
        }
        compiled
    }

    /// Groups extracted skills by category and level, and splits out core
    /// skills and tools.
    pub fn summarize(&self, skills: &[ExtractedSkill]) -> SkillSummary {
        let mut summary = SkillSummary {
            total_skills: skills.len(),
            ..SkillSummary::default()
        };

        for skill in skills {
            let name = skill.normalized_name.clone();
            summary
                .by_category
                .entry(skill.category.clone())
                .or_default()
                .push(name.clone());

            let bucket = match skill.experience_level {
                ExperienceLevel::Expert => &mut summary.by_level.expert,
                ExperienceLevel::Proficient => &mut summary.by_level.proficient,
                ExperienceLevel::Used => &mut summary.by_level.used,
                ExperienceLevel::Mentioned => &mut summary.by_level.mentioned,
            };
            bucket.push(name.clone());

            if self.db.is_core_skill(&name) {
                summary.core_skills.push(name);
            } else if self.db.is_tool(&name) {
                summary.tools.push(name);
            }
        }

        summary
    }
}

impl Default for SkillExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// A mention only counts when it is not part of a longer word, so `ts` does
/// not fire inside `tests`. Terms may start or end with punctuation (`c++`,
/// `.net`), which rules out plain `\b`.
pub(crate) fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let before_ok = text[..start].chars().next_back().map_or(true, |c| !is_word(c));
    let after_ok = text[end..].chars().next().map_or(true, |c| !is_word(c));
    before_ok && after_ok
}

/// Whether `term` occurs in `text` as a whole word. Both must be lower-case.
pub(crate) fn contains_term(text: &str, term: &str) -> bool {
    !term.is_empty()
        && text
            .match_indices(term)
            .any(|(start, m)| is_word_bounded(text, start, start + m.len()))
}

fn compile_level_patterns(skill: &str) -> LevelPatterns {
    let escaped = regex::escape(skill);
    [
        (ExperienceLevel::Expert, EXPERT_PATTERNS),
        (ExperienceLevel::Proficient, PROFICIENT_PATTERNS),
        (ExperienceLevel::Used, USED_PATTERNS),
    ]
    .into_iter()
    .map(|(level, patterns)| {
        let compiled = patterns
            .iter()
            .map(|pattern| {
                Regex::new(&pattern.replace("{skill}", &escaped))
                    .expect("level patterns with an escaped skill are valid regexes")
            })
            .collect();
        (level, compiled)
    })
    .collect()
}

fn extract_years(sentence: &str) -> Option<f32> {
    YEARS
        .captures(sentence)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f32>().ok())
        .filter(|years| *years > 0.0)
}

//! Work history analysis.
//!
//! Finds the experience and project sections of a resume, splits them into
//! entries, reads titles, companies and date ranges, and derives totals,
//! relevant months, career gaps, trajectory and a seniority estimate.
//! Heuristic and deterministic. No LLM call.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::skills::database::title_case;
use crate::skills::extractor::{contains_term, SkillExtractor};

const MONTHS: &str = "jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec";

static EXPERIENCE_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(?:(?:work[ \t]+)?experience|professional[ \t]+experience|(?:employment|career|work)[ \t]+history)[ \t]*(?::|$)",
    )
    .unwrap()
});

static PROJECT_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(?:(?:(?:personal|side|notable)[ \t]+)?projects?|portfolio)[ \t]*(?::|$)",
    )
    .unwrap()
});

// Any other section header ends the current section.
static SECTION_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(?:education|skills|certif|awards|reference|contact|(?:(?:(?:work|professional)[ \t]+)?experience|(?:employment|career|work)[ \t]+history|(?:(?:personal|side|notable)[ \t]+)?projects?|portfolio)[ \t]*(?::|$))",
    )
    .unwrap()
});

static ENTRY_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

static TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:senior|junior|lead|principal|staff|associate)[ \t]+)?(?:(?:software|backend|frontend|full[ \t-]?stack|web|mobile|devops|data|ml|ai)[ \t]+)?(?:engineer|developer|programmer|architect|analyst|scientist|manager|director)\b",
    )
    .unwrap()
});

static COMPANY_AT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\b[Aa]t|@)[ \t]+([A-Z][A-Za-z0-9&.]*(?:[ \t]+[A-Z0-9&][A-Za-z0-9&.]*)*)")
        .unwrap()
});

static COMPANY_DASH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*([A-Z][A-Za-z0-9&.]*(?:[ \t]+[A-Z0-9&][A-Za-z0-9&.]*)*)[ \t]*[-|–][ \t]*(?i:senior|junior|lead|principal|staff|software)",
    )
    .unwrap()
});

/// `[Mon ]YYYY - [Mon ]YYYY` or `[Mon ]YYYY - present`.
/// Groups: 1 start month, 2 start year, 3 end month, 4 end year, 5 open end.
static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?:\b({MONTHS})[a-z]*\.?[ \t]*)?((?:19|20)\d{{2}})[ \t]*(?:-|–|—|to)[ \t]*(?:(?:\b({MONTHS})[a-z]*\.?[ \t]*)?((?:19|20)\d{{2}})\b|(present|current|now)\b)"
    ))
    .unwrap()
});

static MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b({MONTHS})[a-z]*\.?[ \t]*((?:19|20)\d{{2}})\b")).unwrap()
});

static INTERNSHIP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:intern|internship|trainee|apprentice)\b").unwrap());

static FREELANCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:freelance|freelancer|consultant|contractor|self-employed|independent)\b",
    )
    .unwrap()
});

/// Entries shorter than this are headings or noise.
const MIN_ENTRY_CHARS: usize = 20;
const MAX_NAME_CHARS: usize = 100;
/// Assumed tenure when an entry carries no readable dates.
const DEFAULT_DURATION_MONTHS: u32 = 12;
/// Credit for each project that uses a required skill.
const PROJECT_CREDIT_MONTHS: u32 = 6;
/// A gap counts only when it is longer than this.
const GAP_THRESHOLD_MONTHS: u32 = 6;
/// A year with no month starts mid-year and ends in December.
const ASSUMED_START_MONTH: u32 = 6;
const ASSUMED_END_MONTH: u32 = 12;

const PROFESSIONAL_MARKERS: &[&str] = &["client", "company", "production", "deployed", "users"];
const SENIOR_KEYWORDS: &[&str] = &[
    "senior",
    "lead",
    "principal",
    "staff",
    "manager",
    "director",
    "architect",
];
const EXECUTIVE_KEYWORDS: &[&str] = &["director", "vp", "vice president", "cto", "ceo"];
const LEAD_KEYWORDS: &[&str] = &["lead", "principal", "staff", "manager"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trajectory {
    Ascending,
    Descending,
    LateralSenior,
    Mixed,
    InsufficientData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    Entry,
    Mid,
    Senior,
    Lead,
    Executive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DateSpan {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkExperience {
    pub title: String,
    pub company: String,
    pub duration_months: u32,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_current: bool,
    pub is_internship: bool,
    pub is_freelance: bool,
    pub description: String,
    #[serde(skip)]
    span: Option<DateSpan>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    /// Client, company or production work rather than personal or academic.
    pub is_professional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CareerGap {
    /// Company of the role before the gap.
    pub after: String,
    /// Company of the role after the gap.
    pub before: String,
    pub months: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperienceAnalysis {
    pub total_experience_months: u32,
    pub relevant_experience_months: u32,
    pub work_experiences: Vec<WorkExperience>,
    pub projects: Vec<Project>,
    pub has_career_gaps: bool,
    pub gap_explanation: Option<String>,
    pub career_gaps: Vec<CareerGap>,
    pub experience_trajectory: Trajectory,
    pub seniority_estimate: Seniority,
}

/// Parsed date range of one entry, with display labels.
struct ParsedDates {
    span: DateSpan,
    start_label: String,
    end_label: String,
    open_ended: bool,
}

pub struct ExperienceDetector {
    skills: Arc<SkillExtractor>,
}

impl ExperienceDetector {
    pub fn new(skills: Arc<SkillExtractor>) -> Self {
        Self { skills }
    }

    /// Analyses the work history in `text`. `required_skills` (usually from a
    /// job description) decides which months count as relevant; when empty,
    /// every month does.
    pub fn analyze(&self, text: &str, required_skills: &[String]) -> ExperienceAnalysis {
        self.analyze_as_of(text, required_skills, Utc::now().date_naive())
    }

    /// Same as [`analyze`](Self::analyze) with an explicit date for open-ended
    /// ranges such as `2021 - present`.
    pub fn analyze_as_of(
        &self,
        text: &str,
        required_skills: &[String],
        today: NaiveDate,
    ) -> ExperienceAnalysis {
        let work_experiences = extract_work_experiences(text, today);
        let projects = self.extract_projects(text);

        let total_experience_months: u32 =
            work_experiences.iter().map(|e| e.duration_months).sum();
        let relevant_experience_months =
            self.relevant_months(&work_experiences, &projects, required_skills);

        let career_gaps = detect_career_gaps(&work_experiences);
        let gap_explanation = (!career_gaps.is_empty()).then(|| {
            career_gaps
                .iter()
                .map(|gap| {
                    format!(
                        "{}-month gap between {} and {}",
                        gap.months, gap.after, gap.before
                    )
                })
                .collect::<Vec<_>>()
                .join("; ")
        });

        let recent_first = most_recent_first(&work_experiences);
        let experience_trajectory = analyze_trajectory(&recent_first);
        let seniority_estimate = estimate_seniority(&recent_first, total_experience_months);

        ExperienceAnalysis {
            total_experience_months,
            relevant_experience_months,
            has_career_gaps: !career_gaps.is_empty(),
            gap_explanation,
            career_gaps,
            experience_trajectory,
            seniority_estimate,
            work_experiences,
            projects,
        }
    }

    fn extract_projects(&self, text: &str) -> Vec<Project> {
        let Some(section) = find_section(text, &PROJECT_HEADER) else {
            return Vec::new();
        };

        split_entries(section)
            .into_iter()
            .map(|entry| {
                let mut lines = entry.lines();
                let name: String = lines
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .chars()
                    .take(MAX_NAME_CHARS)
                    .collect();
                let description = lines.collect::<Vec<_>>().join("\n").trim().to_string();
                let lower = entry.to_lowercase();

                Project {
                    name,
                    description,
                    technologies: self.skills.skill_names(entry),
                    is_professional: PROFESSIONAL_MARKERS.iter().any(|m| lower.contains(m)),
                }
            })
            .collect()
    }

    /// Months of experience whose entries mention a required skill, plus a
    /// fixed credit per relevant project.
    fn relevant_months(
        &self,
        experiences: &[WorkExperience],
        projects: &[Project],
        required_skills: &[String],
    ) -> u32 {
        let raw: Vec<String> = required_skills
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        if raw.is_empty() {
            return experiences.iter().map(|e| e.duration_months).sum();
        }
        let canonical: HashSet<String> = raw
            .iter()
            .map(|s| self.skills.normalize(s).to_lowercase())
            .collect();

        let mentions_required = |text: &str| {
            let lower = text.to_lowercase();
            raw.iter().any(|term| contains_term(&lower, term))
                || self
                    .skills
                    .skill_names(text)
                    .iter()
                    .any(|name| canonical.contains(&name.to_lowercase()))
        };

        let work: u32 = experiences
            .iter()
            .filter(|e| mentions_required(&e.description))
            .map(|e| e.duration_months)
            .sum();
        let relevant_projects = projects
            .iter()
            .filter(|p| mentions_required(&format!("{}\n{}", p.name, p.description)))
            .count() as u32;

        work + relevant_projects * PROJECT_CREDIT_MONTHS
    }
}

fn extract_work_experiences(text: &str, today: NaiveDate) -> Vec<WorkExperience> {
    match find_section(text, &EXPERIENCE_HEADER) {
        Some(section) => split_entries(section)
            .into_iter()
            .map(|entry| parse_experience_entry(entry, today))
            .collect(),
        // Without a header the whole text is scanned, so only entries that
        // look like roles are kept.
        None => split_entries(text)
            .into_iter()
            .map(|entry| parse_experience_entry(entry, today))
            .filter(|exp| exp.span.is_some() || TITLE.is_match(&exp.description))
            .collect(),
    }
}

/// Body of the first section whose header line matches `header`, up to the
/// next known section header.
fn find_section<'a>(text: &'a str, header: &Regex) -> Option<&'a str> {
    let start = header.find(text)?.end();
    let rest = &text[start..];
    let end = SECTION_END.find(rest).map_or(rest.len(), |m| m.start());
    Some(&rest[..end])
}

fn split_entries(section: &str) -> Vec<&str> {
    ENTRY_SPLIT
        .split(section)
        .map(str::trim)
        .filter(|entry| entry.chars().count() > MIN_ENTRY_CHARS)
        .collect()
}

fn parse_experience_entry(entry: &str, today: NaiveDate) -> WorkExperience {
    let first_line = entry.lines().next().unwrap_or_default();
    let title = extract_title(first_line).unwrap_or_else(|| "Unknown Position".to_string());
    let company = extract_company(entry).unwrap_or_else(|| "Unknown Company".to_string());
    let dates = extract_dates(entry, today);

    let (duration_months, start_date, end_date, is_current, span) = match dates {
        Some(d) => (
            months_between(d.span.start, d.span.end).max(1) as u32,
            Some(d.start_label),
            Some(d.end_label),
            d.open_ended,
            Some(d.span),
        ),
        None => (DEFAULT_DURATION_MONTHS, None, None, false, None),
    };

    WorkExperience {
        title,
        company,
        duration_months,
        start_date,
        end_date,
        is_current,
        is_internship: INTERNSHIP.is_match(entry),
        is_freelance: FREELANCE.is_match(entry),
        description: entry.to_string(),
        span,
    }
}

fn extract_title(line: &str) -> Option<String> {
    if let Some(m) = TITLE.find(line) {
        return Some(title_case(m.as_str()));
    }
    let line = line.trim();
    (!line.is_empty() && line.chars().count() < MAX_NAME_CHARS).then(|| line.to_string())
}

fn extract_company(entry: &str) -> Option<String> {
    [&*COMPANY_AT, &*COMPANY_DASH]
        .iter()
        .find_map(|re| re.captures(entry))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Reads the first date range of an entry. Falls back to the first two
/// month-year mentions when they are not joined by a separator.
fn extract_dates(entry: &str, today: NaiveDate) -> Option<ParsedDates> {
    if let Some(caps) = DATE_RANGE.captures(entry) {
        let start_month = caps.get(1).and_then(|m| month_number(m.as_str()));
        let start_year: i32 = caps.get(2)?.as_str().parse().ok()?;
        let start = first_of_month(start_year, start_month.unwrap_or(ASSUMED_START_MONTH))?;

        let (end, end_label, open_ended) = match (caps.get(4), caps.get(5)) {
            (Some(year), _) => {
                let end_month = caps.get(3).and_then(|m| month_number(m.as_str()));
                let end_year: i32 = year.as_str().parse().ok()?;
                let end = first_of_month(end_year, end_month.unwrap_or(ASSUMED_END_MONTH))?;
                (end, date_label(end_month, end_year), false)
            }
            (None, Some(open)) => (
                first_of_month(today.year(), today.month())?,
                open.as_str().to_lowercase(),
                true,
            ),
            (None, None) => return None,
        };

        return Some(ParsedDates {
            span: DateSpan { start, end },
            start_label: date_label(start_month, start_year),
            end_label,
            open_ended,
        });
    }

    let mut mentions = MONTH_YEAR.captures_iter(entry).filter_map(|caps| {
        let month = month_number(caps.get(1)?.as_str())?;
        let year: i32 = caps.get(2)?.as_str().parse().ok()?;
        Some((month, year))
    });
    let (start_month, start_year) = mentions.next()?;
    let (end_month, end_year) = mentions.next()?;

    Some(ParsedDates {
        span: DateSpan {
            start: first_of_month(start_year, start_month)?,
            end: first_of_month(end_year, end_month)?,
        },
        start_label: date_label(Some(start_month), start_year),
        end_label: date_label(Some(end_month), end_year),
        open_ended: false,
    })
}

fn month_number(name: &str) -> Option<u32> {
    let prefix = name.get(..3)?.to_ascii_lowercase();
    MONTHS
        .split('|')
        .position(|m| m == prefix)
        .map(|index| index as u32 + 1)
}

fn date_label(month: Option<u32>, year: i32) -> String {
    match month {
        Some(month) => {
            let name = MONTHS.split('|').nth(month as usize - 1).unwrap_or_default();
            format!("{} {year}", title_case(name))
        }
        None => year.to_string(),
    }
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32
}

/// Gaps longer than the threshold between consecutive dated roles, in
/// chronological order. Overlapping roles close no gap.
fn detect_career_gaps(experiences: &[WorkExperience]) -> Vec<CareerGap> {
    let mut dated: Vec<(&WorkExperience, DateSpan)> = experiences
        .iter()
        .filter_map(|e| e.span.map(|span| (e, span)))
        .collect();
    dated.sort_by_key(|(_, span)| span.start);

    let mut gaps = Vec::new();
    let mut latest: Option<(&WorkExperience, NaiveDate)> = None;

    for (exp, span) in dated {
        if let Some((previous, previous_end)) = latest {
            let months = months_between(previous_end, span.start);
            if months > GAP_THRESHOLD_MONTHS as i32 {
                gaps.push(CareerGap {
                    after: previous.company.clone(),
                    before: exp.company.clone(),
                    months: months as u32,
                });
            }
        }
        if latest.map_or(true, |(_, end)| span.end > end) {
            latest = Some((exp, span.end));
        }
    }

    gaps
}

/// Dated roles sorted newest first. When any role lacks dates, document
/// order is kept, since resumes list the current role first.
fn most_recent_first(experiences: &[WorkExperience]) -> Vec<&WorkExperience> {
    let mut ordered: Vec<&WorkExperience> = experiences.iter().collect();
    if ordered.iter().all(|e| e.span.is_some()) {
        ordered.sort_by_key(|e| std::cmp::Reverse(e.span.map(|span| span.start)));
    }
    ordered
}

fn analyze_trajectory(recent_first: &[&WorkExperience]) -> Trajectory {
    if recent_first.len() < 2 {
        return Trajectory::InsufficientData;
    }

    let is_senior = |exp: &WorkExperience| {
        let title = exp.title.to_lowercase();
        SENIOR_KEYWORDS.iter().any(|kw| contains_term(&title, kw))
    };
    let latest = is_senior(recent_first[0]);
    let earliest = is_senior(recent_first[recent_first.len() - 1]);

    if recent_first.iter().all(|&exp| is_senior(exp)) {
        Trajectory::LateralSenior
    } else if latest && !earliest {
        Trajectory::Ascending
    } else if earliest && !latest {
        Trajectory::Descending
    } else {
        Trajectory::Mixed
    }
}

/// Title keywords of the two most recent roles first, then total years.
fn estimate_seniority(recent_first: &[&WorkExperience], total_months: u32) -> Seniority {
    for exp in recent_first.iter().take(2) {
        let title = exp.title.to_lowercase();
        let has_any = |keywords: &[&str]| keywords.iter().any(|kw| contains_term(&title, kw));
        if has_any(EXECUTIVE_KEYWORDS) {
            return Seniority::Executive;
        }
        if has_any(LEAD_KEYWORDS) {
            return Seniority::Lead;
        }
        if contains_term(&title, "senior") {
            return Seniority::Senior;
        }
    }

    match total_months / 12 {
        years if years >= 8 => Seniority::Senior,
        years if years >= 3 => Seniority::Mid,
        _ => Seniority::Entry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn detector() -> ExperienceDetector {
        ExperienceDetector::new(Arc::new(SkillExtractor::new()))
    }

    const RESUME: &str = "Jane Doe\n\
        Backend engineer based in Berlin\n\
        \n\
        Experience\n\
        Senior Software Engineer at Globex\n\
        2019 - 2023\n\
        Ran payment services on k8s\n\
        \n\
        Software Engineer at Initech\n\
        2016 - 2019\n\
        Built Django apps for internal tools\n\
        \n\
        Projects\n\
        Cluster autoscaler\n\
        Open-source Kubernetes operator deployed in production by three teams\n\
        \n\
        Education\n\
        BSc Computer Science, 2016\n";

    #[test]
    fn test_find_section_stops_at_next_header() {
        let section = find_section(RESUME, &EXPERIENCE_HEADER).unwrap();
        assert!(section.contains("Globex"));
        assert!(section.contains("Initech"));
        assert!(!section.contains("Cluster autoscaler"));
        assert!(!section.contains("BSc"));
    }

    #[test]
    fn test_find_section_header_variants() {
        let text = "Professional Experience:\nData Analyst at Acme, 2018 - 2020\nSkills\nSQL";
        let section = find_section(text, &EXPERIENCE_HEADER).unwrap();
        assert_eq!(section.trim(), "Data Analyst at Acme, 2018 - 2020");
        // a sentence mentioning experience is not a header
        assert!(find_section("Ten years of experience in Go", &EXPERIENCE_HEADER).is_none());
    }

    #[test]
    fn test_year_range_assumes_mid_year_start() {
        let dates = extract_dates("Engineer, 2018 - 2020", today()).unwrap();
        assert_eq!(months_between(dates.span.start, dates.span.end), 30);
        assert_eq!(dates.start_label, "2018");
        assert_eq!(dates.end_label, "2020");
        assert!(!dates.open_ended);
    }

    #[test]
    fn test_month_year_range() {
        let dates = extract_dates("January 2019 – Mar. 2021", today()).unwrap();
        assert_eq!(months_between(dates.span.start, dates.span.end), 26);
        assert_eq!(dates.start_label, "Jan 2019");
        assert_eq!(dates.end_label, "Mar 2021");
    }

    #[test]
    fn test_open_ended_range_runs_to_today() {
        let dates = extract_dates("Sep 2022 to Present", today()).unwrap();
        assert!(dates.open_ended);
        assert_eq!(dates.end_label, "present");
        assert_eq!(months_between(dates.span.start, dates.span.end), 21);
    }

    #[test]
    fn test_unjoined_month_years() {
        let dates = extract_dates("Started Feb 2017, left Aug 2018", today()).unwrap();
        assert_eq!(months_between(dates.span.start, dates.span.end), 18);
    }

    #[test]
    fn test_entry_without_dates_defaults_to_a_year() {
        let exp = parse_experience_entry("Freelance Web Developer for local shops", today());
        assert_eq!(exp.duration_months, DEFAULT_DURATION_MONTHS);
        assert_eq!(exp.start_date, None);
        assert!(!exp.is_current);
        assert!(exp.is_freelance);
        assert_eq!(exp.title, "Web Developer");
    }

    #[test]
    fn test_entry_title_company_and_flags() {
        let exp = parse_experience_entry(
            "Data Science Intern at Acme Labs\nJun 2021 - Aug 2021\nInternational team",
            today(),
        );
        assert_eq!(exp.company, "Acme Labs");
        assert_eq!(exp.duration_months, 2);
        assert!(exp.is_internship);

        let exp = parse_experience_entry(
            "Globex - Senior Backend Engineer\n2020 - now\nInternal tooling",
            today(),
        );
        assert_eq!(exp.company, "Globex");
        assert_eq!(exp.title, "Senior Backend Engineer");
        assert!(exp.is_current);
        assert!(!exp.is_internship);
    }

    #[test]
    fn test_full_analysis() {
        let analysis = detector().analyze_as_of(RESUME, &[], today());
        assert_eq!(analysis.work_experiences.len(), 2);
        assert_eq!(analysis.work_experiences[0].company, "Globex");
        assert_eq!(analysis.total_experience_months, 54 + 42);
        assert_eq!(analysis.relevant_experience_months, 96);
        assert!(!analysis.has_career_gaps);
        assert_eq!(analysis.experience_trajectory, Trajectory::Ascending);
        assert_eq!(analysis.seniority_estimate, Seniority::Senior);

        assert_eq!(analysis.projects.len(), 1);
        let project = &analysis.projects[0];
        assert_eq!(project.name, "Cluster autoscaler");
        assert!(project.technologies.contains(&"Kubernetes".to_string()));
        assert!(project.is_professional);
    }

    #[test]
    fn test_relevant_months_follow_required_skills() {
        let required = vec!["Kubernetes".to_string()];
        let analysis = detector().analyze_as_of(RESUME, &required, today());
        // Globex mentions k8s, the project uses Kubernetes, Initech neither
        assert_eq!(analysis.relevant_experience_months, 54 + PROJECT_CREDIT_MONTHS);

        let required = vec!["Django".to_string()];
        let analysis = detector().analyze_as_of(RESUME, &required, today());
        assert_eq!(analysis.relevant_experience_months, 42);
    }

    #[test]
    fn test_career_gap_detected() {
        let text = "Work History\n\
            Backend Developer at Globex\n2019 - 2021\nGo services\n\
            \n\
            Backend Developer at Initech\n2014 - 2016\nJava services\n";
        let analysis = detector().analyze_as_of(text, &[], today());
        assert!(analysis.has_career_gaps);
        assert_eq!(
            analysis.career_gaps,
            vec![CareerGap {
                after: "Initech".to_string(),
                before: "Globex".to_string(),
                months: 30,
            }]
        );
        assert_eq!(
            analysis.gap_explanation.as_deref(),
            Some("30-month gap between Initech and Globex")
        );
    }

    #[test]
    fn test_back_to_back_years_are_not_a_gap() {
        let text = "Experience\n\
            Engineer at Globex\n2018 - 2020\nRust\n\
            \n\
            Engineer at Initech\n2021 - 2023\nRust\n";
        let analysis = detector().analyze_as_of(text, &[], today());
        assert!(!analysis.has_career_gaps);
        assert_eq!(analysis.gap_explanation, None);
    }

    #[test]
    fn test_trajectory_and_seniority_without_dates() {
        let text = "Experience\n\
            Software Engineer at Globex, building APIs\n\
            \n\
            Engineering Manager at Initech, leading six people\n";
        let analysis = detector().analyze_as_of(text, &[], today());
        // undated entries keep document order, newest first
        assert_eq!(analysis.experience_trajectory, Trajectory::Descending);
        assert_eq!(analysis.seniority_estimate, Seniority::Lead);
    }

    #[test]
    fn test_single_role_has_insufficient_trajectory() {
        let text = "Experience\nData Analyst at Acme\n2019 - 2021\nDashboards\n";
        let analysis = detector().analyze_as_of(text, &[], today());
        assert_eq!(analysis.experience_trajectory, Trajectory::InsufficientData);
        assert_eq!(analysis.seniority_estimate, Seniority::Entry);
    }

    #[test]
    fn test_seniority_falls_back_to_years() {
        let text = "Experience\nSoftware Engineer at Acme\n2010 - 2019\nBackend work\n";
        let analysis = detector().analyze_as_of(text, &[], today());
        assert_eq!(analysis.seniority_estimate, Seniority::Senior);
    }

    #[test]
    fn test_no_header_keeps_only_role_like_entries() {
        let text = "Jane Doe, jane@example.com, Berlin\n\
            \n\
            Platform Engineer at Globex\n2020 - 2022\n";
        let analysis = detector().analyze_as_of(text, &[], today());
        assert_eq!(analysis.work_experiences.len(), 1);
        assert_eq!(analysis.work_experiences[0].company, "Globex");
        assert!(analysis.projects.is_empty());
    }
}

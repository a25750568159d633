use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::screening::ScreeningError;

/// Incoming screening payload. Missing fields deserialize as empty strings so
/// `validate` can report them by name instead of a generic serde message.
#[derive(Debug, Clone, Deserialize)]
pub struct ScreeningRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
}

impl ScreeningRequest {
    /// Both fields must contain something other than whitespace.
    pub fn validate(&self) -> Result<(), ScreeningError> {
        let missing: Vec<&str> = [
            ("resume_text", &self.resume_text),
            ("job_description", &self.job_description),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ScreeningError::InvalidRequest(format!(
                "{} must be a non-empty string",
                missing.join(" and ")
            )))
        }
    }
}

/// Hiring recommendation. The set is closed; anything else from the model is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Hire,
    #[serde(rename = "No Hire")]
    NoHire,
    Maybe,
}

impl Recommendation {
    pub const ALL: [Recommendation; 3] = [
        Recommendation::Hire,
        Recommendation::NoHire,
        Recommendation::Maybe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Hire => "Hire",
            Recommendation::NoHire => "No Hire",
            Recommendation::Maybe => "Maybe",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recommendation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Recommendation::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or(())
    }
}

/// Validated screening outcome. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    /// 0 to 100
    pub score: u8,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendation: Recommendation,
}

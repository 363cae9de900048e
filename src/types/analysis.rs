// src/types/analysis.rs
//! Server-produced scoring records, consumed read-only

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::{lenient, Applicant, Validate};

/// Backend classification of an applicant against the job description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum FitVerdict {
    Fit,
    NotFit,
}

impl fmt::Display for FitVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitVerdict::Fit => write!(f, "Fit"),
            FitVerdict::NotFit => write!(f, "Not Fit"),
        }
    }
}

impl FromStr for FitVerdict {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        match compact.as_str() {
            "fit" => Ok(FitVerdict::Fit),
            "notfit" => Ok(FitVerdict::NotFit),
            _ => anyhow::bail!("Unknown fit verdict: {:?}", s),
        }
    }
}

impl Serialize for FitVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FitVerdict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAnalysis {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient::f64")]
    pub hard_match_score: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub relevance_score: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub final_weighted_score: f64,
    pub fit_verdict: FitVerdict,
    #[serde(default)]
    pub missing_elements: Vec<String>,
    #[serde(default, alias = "personalized_feedback")]
    pub feedback: String,
    #[serde(default)]
    pub summary_for_recruiter: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ScoredAnalysis {
    /// Parses `created_at` as RFC 3339, RFC 2822 or `YYYY-MM-DD HH:MM:SS` (UTC)
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }
}

fn check_score(field: &str, value: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&value) {
        anyhow::bail!("{} out of range [0, 100]: {}", field, value);
    }
    Ok(())
}

impl Validate for ScoredAnalysis {
    fn validate(&self) -> Result<()> {
        check_score("hard_match_score", self.hard_match_score)?;
        check_score("relevance_score", self.relevance_score)?;
        check_score("final_weighted_score", self.final_weighted_score)?;
        Ok(())
    }
}

/// An applicant with its nested analysis history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedApplicant {
    #[serde(flatten)]
    pub applicant: Applicant,
    #[serde(default, alias = "analysis", alias = "analysis_history")]
    pub analyses: Vec<ScoredAnalysis>,
}

impl Validate for AnalyzedApplicant {
    fn validate(&self) -> Result<()> {
        self.applicant.validate()?;
        self.analyses
            .validate()
            .map_err(|e| e.context(format!("Invalid analysis for '{}'", self.applicant.name)))
    }
}

/// One row of the parse/score pass result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseOutcome {
    #[serde(alias = "id")]
    pub student_id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub final_weighted_score: Option<f64>,
    #[serde(default)]
    pub fit_verdict: Option<FitVerdict>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Validate for ParseOutcome {
    fn validate(&self) -> Result<()> {
        if let Some(score) = self.final_weighted_score {
            check_score("final_weighted_score", score)
                .map_err(|e| e.context(format!("Invalid parse outcome for '{}'", self.name)))?;
        }
        Ok(())
    }
}

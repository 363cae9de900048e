// src/types/criteria.rs
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{EligibilityError, ValidationError};
use crate::utils::{file_name_of, get_file_extension};

/// Criteria as the recruiter typed them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaForm {
    pub max_passing_year: String,
    pub min_tenth_marks: String,
    pub min_twelfth_marks: String,
    /// Either a CGPA (<= 10) or a percentage; see `eligibility::normalize_criteria_degree`
    pub min_degree_marks: String,
}

impl Default for CriteriaForm {
    fn default() -> Self {
        Self {
            max_passing_year: "2024".to_string(),
            min_tenth_marks: "75".to_string(),
            min_twelfth_marks: "75".to_string(),
            min_degree_marks: "8".to_string(),
        }
    }
}

impl CriteriaForm {
    /// Multipart text fields in submission order
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("maxPassingYear", self.max_passing_year.trim().to_string()),
            ("minTenthMarks", self.min_tenth_marks.trim().to_string()),
            ("minTwelfthMarks", self.min_twelfth_marks.trim().to_string()),
            ("minDegreeMarks", self.min_degree_marks.trim().to_string()),
        ]
    }
}

/// Numeric criteria, ready for the eligibility filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Criteria {
    pub max_passing_year: i32,
    pub min_tenth_marks: f64,
    pub min_twelfth_marks: f64,
    pub min_degree_marks: f64,
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, EligibilityError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EligibilityError::MissingCriterion { field });
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(EligibilityError::InvalidCriterion {
            field,
            value: raw.to_string(),
        }),
    }
}

fn parse_year(field: &'static str, raw: &str) -> Result<i32, EligibilityError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EligibilityError::MissingCriterion { field });
    }

    trimmed
        .parse::<i32>()
        .map_err(|_| EligibilityError::InvalidCriterion {
            field,
            value: raw.to_string(),
        })
}

impl Criteria {
    /// Parse every criterion; the first unparseable one fails the whole set
    pub fn parse(form: &CriteriaForm) -> Result<Self, EligibilityError> {
        Ok(Self {
            max_passing_year: parse_year("maxPassingYear", &form.max_passing_year)?,
            min_tenth_marks: parse_number("minTenthMarks", &form.min_tenth_marks)?,
            min_twelfth_marks: parse_number("minTwelfthMarks", &form.min_twelfth_marks)?,
            min_degree_marks: parse_number("minDegreeMarks", &form.min_degree_marks)?,
        })
    }
}

/// Criteria plus the job description, checked before upload
#[derive(Debug, Clone)]
pub struct CriteriaSubmission {
    pub form: CriteriaForm,
    pub criteria: Criteria,
    pub job_description: PathBuf,
    pub file_name: String,
}

impl CriteriaSubmission {
    pub fn new(form: CriteriaForm, job_description: Option<&Path>) -> Result<Self, ValidationError> {
        let path = job_description.ok_or(ValidationError::MissingJobDescription)?;
        let file_name = file_name_of(path).map_err(|_| ValidationError::MissingJobDescription)?;

        if get_file_extension(&file_name).as_deref() != Some("pdf") {
            return Err(ValidationError::InvalidJobDescriptionType(file_name));
        }

        let criteria = Criteria::parse(&form)?;

        Ok(Self {
            form,
            criteria,
            job_description: path.to_path_buf(),
            file_name,
        })
    }
}

// src/errors.rs
use thiserror::Error;

/// A recruiter criterion that cannot be turned into a number.
/// Evaluation stops instead of comparing against a garbage threshold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EligibilityError {
    #[error("Criterion {field} is empty")]
    MissingCriterion { field: &'static str },
    #[error("Criterion {field} is not a valid number: {value:?}")]
    InvalidCriterion { field: &'static str, value: String },
}

/// Client-side form validation failures, worded as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill all mandatory fields and upload your resume.")]
    MissingFields(Vec<&'static str>),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please enter a valid 10-digit phone number.")]
    InvalidPhone,
    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Invalid file type. Please upload a PDF or DOCX file.")]
    InvalidResumeType(String),
    #[error("CGPA scale must be 10, 4 or 5, got {0:?}")]
    InvalidCgpaScale(String),
    #[error("Please upload a Job Description PDF before setting criteria.")]
    MissingJobDescription,
    #[error("Invalid file type. Please upload a PDF file.")]
    InvalidJobDescriptionType(String),
    #[error(transparent)]
    Criteria(#[from] EligibilityError),
}

impl ValidationError {
    /// Form fields the user has to revisit
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            ValidationError::MissingFields(fields) => fields.clone(),
            ValidationError::InvalidEmail => vec!["email"],
            ValidationError::InvalidPhone => vec!["phone"],
            ValidationError::InvalidNumber { field, .. } => vec![*field],
            ValidationError::InvalidResumeType(_) => vec!["resume"],
            ValidationError::InvalidCgpaScale(_) => vec!["cgpaOutOf"],
            ValidationError::MissingJobDescription | ValidationError::InvalidJobDescriptionType(_) => {
                vec!["jobDescription"]
            }
            ValidationError::Criteria(EligibilityError::MissingCriterion { field })
            | ValidationError::Criteria(EligibilityError::InvalidCriterion { field, .. }) => vec![*field],
        }
    }
}

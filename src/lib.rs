use anyhow::{Context, Result};
use std::path::Path;

pub mod cli;
pub mod core;
pub mod display;
pub mod eligibility;
pub mod errors;
pub mod intake;
pub mod results;
pub mod types;
pub mod utils;

pub use eligibility::{filter_eligible, meets_criteria, meets_criteria_text};
pub use errors::{EligibilityError, ValidationError};
pub use types::{Applicant, Criteria, CriteriaForm};

use types::Validate;

/// Load applicants from a JSON array on disk, with the same checks applied to backend responses
pub async fn load_applicants_file(path: &Path) -> Result<Vec<Applicant>> {
    let content = utils::read_file_content(path).await?;

    let applicants: Vec<Applicant> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse applicants from {}", path.display()))?;
    applicants
        .validate()
        .with_context(|| format!("Invalid applicants in {}", path.display()))?;

    Ok(applicants)
}

/// Convenience function for screening with criteria still in text form
pub fn screen<'a>(applicants: &'a [Applicant], form: &CriteriaForm) -> Result<Vec<&'a Applicant>, EligibilityError> {
    let criteria = Criteria::parse(form)?;
    Ok(filter_eligible(applicants, &criteria))
}

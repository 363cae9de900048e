// src/eligibility.rs
//! Candidate eligibility filter.
//!
//! An applicant meets the criteria when all four predicates hold:
//! passing year at most the cutoff, tenth and twelfth marks at least the
//! minimums, and degree marks at least the minimum once both sides are
//! brought to a 0-100 scale.
//!
//! Degree marks normalization is a heuristic. Applicant CGPA is multiplied
//! by 10 whatever `cgpa_out_of` says, and a criteria threshold `<= 10` is
//! read as a CGPA. A recruiter who means "9 percent" therefore gets a 90
//! percent cutoff. This is a known gap awaiting a product decision.

use tracing::debug;

use crate::errors::EligibilityError;
use crate::types::{Applicant, Criteria, CriteriaForm, DegreeMarks, MarksType};

/// Thresholds at or below this are read as CGPA
pub const CGPA_THRESHOLD_CEILING: f64 = 10.0;

const CGPA_TO_PERCENT: f64 = 10.0;

pub fn normalize_applicant_degree(marks: &DegreeMarks) -> f64 {
    match marks.marks_type {
        MarksType::Cgpa => marks.value * CGPA_TO_PERCENT,
        MarksType::Percentage => marks.value,
    }
}

pub fn normalize_criteria_degree(min_degree_marks: f64) -> f64 {
    if min_degree_marks <= CGPA_THRESHOLD_CEILING {
        min_degree_marks * CGPA_TO_PERCENT
    } else {
        min_degree_marks
    }
}

/// Outcome of each predicate for one applicant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EligibilityReport {
    pub passing_year_ok: bool,
    pub tenth_marks_ok: bool,
    pub twelfth_marks_ok: bool,
    pub degree_marks_ok: bool,
    pub normalized_degree: f64,
    pub normalized_threshold: f64,
}

impl EligibilityReport {
    pub fn is_eligible(&self) -> bool {
        self.passing_year_ok && self.tenth_marks_ok && self.twelfth_marks_ok && self.degree_marks_ok
    }

    /// Names of the predicates that excluded the applicant
    pub fn failures(&self) -> Vec<&'static str> {
        let checks = [
            ("passing year", self.passing_year_ok),
            ("10th marks", self.tenth_marks_ok),
            ("12th marks", self.twelfth_marks_ok),
            ("degree marks", self.degree_marks_ok),
        ];
        checks
            .iter()
            .filter(|(_, ok)| !ok)
            .map(|(name, _)| *name)
            .collect()
    }
}

pub fn evaluate(applicant: &Applicant, criteria: &Criteria) -> EligibilityReport {
    let normalized_degree = normalize_applicant_degree(&applicant.degree_marks());
    let normalized_threshold = normalize_criteria_degree(criteria.min_degree_marks);

    let report = EligibilityReport {
        passing_year_ok: applicant.passing_year <= criteria.max_passing_year,
        tenth_marks_ok: applicant.tenth_marks >= criteria.min_tenth_marks,
        twelfth_marks_ok: applicant.twelfth_marks >= criteria.min_twelfth_marks,
        degree_marks_ok: normalized_degree >= normalized_threshold,
        normalized_degree,
        normalized_threshold,
    };

    debug!(
        applicant = %applicant.name,
        eligible = report.is_eligible(),
        normalized_degree,
        normalized_threshold,
        "Evaluated eligibility"
    );

    report
}

pub fn meets_criteria(applicant: &Applicant, criteria: &Criteria) -> bool {
    evaluate(applicant, criteria).is_eligible()
}

/// Evaluate against criteria still in text form
pub fn meets_criteria_text(applicant: &Applicant, form: &CriteriaForm) -> Result<bool, EligibilityError> {
    let criteria = Criteria::parse(form)?;
    Ok(meets_criteria(applicant, &criteria))
}

/// Applicants meeting the criteria, in input order
pub fn filter_eligible<'a>(applicants: &'a [Applicant], criteria: &Criteria) -> Vec<&'a Applicant> {
    applicants
        .iter()
        .filter(|applicant| meets_criteria(applicant, criteria))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::applicant::fixtures::applicant;

    fn default_criteria() -> Criteria {
        Criteria {
            max_passing_year: 2024,
            min_tenth_marks: 75.0,
            min_twelfth_marks: 75.0,
            min_degree_marks: 8.0,
        }
    }

    fn marks(value: f64, marks_type: MarksType) -> DegreeMarks {
        DegreeMarks {
            value,
            marks_type,
            cgpa_out_of: None,
        }
    }

    #[test]
    fn test_percentage_normalization_is_identity() {
        for step in 0..=200 {
            let value = step as f64 * 0.5;
            assert_eq!(normalize_applicant_degree(&marks(value, MarksType::Percentage)), value);
        }
    }

    #[test]
    fn test_cgpa_normalization_scales_by_ten() {
        for step in 0..=100 {
            let value = step as f64 * 0.1;
            assert_eq!(
                normalize_applicant_degree(&marks(value, MarksType::Cgpa)),
                value * 10.0
            );
        }
    }

    #[test]
    fn test_cgpa_ignores_scale() {
        let four_point = DegreeMarks {
            value: 3.6,
            marks_type: MarksType::Cgpa,
            cgpa_out_of: Some(4.0),
        };
        assert_eq!(normalize_applicant_degree(&four_point), 36.0);
    }

    #[test]
    fn test_criteria_normalization() {
        assert_eq!(normalize_criteria_degree(8.0), 80.0);
        assert_eq!(normalize_criteria_degree(10.0), 100.0);
        assert_eq!(normalize_criteria_degree(10.5), 10.5);
        assert_eq!(normalize_criteria_degree(80.0), 80.0);
    }

    #[test]
    fn test_cgpa_threshold_against_percentage_applicant() {
        let chloe = applicant("Chloe", 2024, 98.0, 96.0, 85.0, MarksType::Percentage);
        let report = evaluate(&chloe, &default_criteria());
        assert_eq!(report.normalized_threshold, 80.0);
        assert_eq!(report.normalized_degree, 85.0);
        assert!(report.is_eligible());
    }

    #[test]
    fn test_eligible_cgpa_applicant() {
        let aisha = applicant("Aisha", 2024, 95.0, 92.0, 8.8, MarksType::Cgpa);
        assert!(meets_criteria(&aisha, &default_criteria()));
    }

    #[test]
    fn test_passing_year_after_cutoff_excluded() {
        let late = applicant("David", 2025, 95.0, 92.0, 8.8, MarksType::Cgpa);
        let report = evaluate(&late, &default_criteria());
        assert!(!report.is_eligible());
        assert_eq!(report.failures(), vec!["passing year"]);
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let exact = applicant("Exact", 2024, 75.0, 75.0, 8.0, MarksType::Cgpa);
        assert!(meets_criteria(&exact, &default_criteria()));
    }

    #[test]
    fn test_each_predicate_can_exclude() {
        let criteria = default_criteria();

        let low_tenth = applicant("A", 2024, 74.9, 90.0, 9.0, MarksType::Cgpa);
        assert_eq!(evaluate(&low_tenth, &criteria).failures(), vec!["10th marks"]);

        let low_twelfth = applicant("B", 2024, 90.0, 70.0, 9.0, MarksType::Cgpa);
        assert_eq!(evaluate(&low_twelfth, &criteria).failures(), vec!["12th marks"]);

        let low_degree = applicant("C", 2024, 90.0, 90.0, 7.5, MarksType::Cgpa);
        assert_eq!(evaluate(&low_degree, &criteria).failures(), vec!["degree marks"]);
    }

    #[test]
    fn test_low_percentage_against_cgpa_threshold() {
        // 9 percent is a genuinely low score; the threshold 8 is read as CGPA 80
        let low = applicant("Low", 2024, 90.0, 90.0, 9.0, MarksType::Percentage);
        let report = evaluate(&low, &default_criteria());
        assert_eq!(report.normalized_threshold, 80.0);
        assert!(!report.is_eligible());
    }

    #[test]
    fn test_percentage_threshold_of_nine_is_misread_as_cgpa() {
        // A recruiter meaning "at least 9 percent" gets a 90 percent cutoff.
        // Expected under that intent: eligible. Actual: excluded.
        let criteria = Criteria {
            min_degree_marks: 9.0,
            ..default_criteria()
        };
        let applicant = applicant("Mid", 2024, 90.0, 90.0, 50.0, MarksType::Percentage);
        let report = evaluate(&applicant, &criteria);
        assert_eq!(report.normalized_threshold, 90.0);
        assert!(!report.is_eligible());
    }

    #[test]
    fn test_text_criteria_errors_instead_of_excluding() {
        let aisha = applicant("Aisha", 2024, 95.0, 92.0, 8.8, MarksType::Cgpa);

        assert_eq!(meets_criteria_text(&aisha, &CriteriaForm::default()), Ok(true));

        let broken = CriteriaForm {
            min_degree_marks: "eight".to_string(),
            ..CriteriaForm::default()
        };
        assert!(matches!(
            meets_criteria_text(&aisha, &broken),
            Err(EligibilityError::InvalidCriterion { field: "minDegreeMarks", .. })
        ));
    }

    #[test]
    fn test_filter_eligible_over_sample_pool() {
        let pool = vec![
            applicant("Aisha Sharma", 2024, 95.0, 92.0, 8.8, MarksType::Cgpa),
            applicant("Ben Carter", 2023, 88.0, 85.0, 7.5, MarksType::Cgpa),
            applicant("Chloe Davis", 2024, 98.0, 96.0, 92.0, MarksType::Percentage),
            applicant("David Evans", 2025, 85.0, 80.0, 81.0, MarksType::Percentage),
            applicant("Fatima Khan", 2024, 91.0, 94.0, 9.2, MarksType::Cgpa),
            applicant("Gaurav Mehta", 2023, 78.0, 75.0, 78.0, MarksType::Percentage),
        ];

        let names: Vec<&str> = filter_eligible(&pool, &default_criteria())
            .into_iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["Aisha Sharma", "Chloe Davis", "Fatima Khan"]);
    }
}

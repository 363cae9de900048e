// src/display.rs
//! Plain-text views printed by the CLI

use crate::eligibility::EligibilityReport;
use crate::results::{RankedResult, VerdictSummary};
use crate::types::{Applicant, MarksType, ParseOutcome, ScoredAnalysis};

/// `8.8/10 CGPA` or `81%`
pub fn format_degree_marks(applicant: &Applicant) -> String {
    match applicant.marks_type {
        MarksType::Cgpa => format!(
            "{}/{} CGPA",
            applicant.degree_marks,
            applicant.cgpa_out_of.unwrap_or(10.0)
        ),
        MarksType::Percentage => format!("{}%", applicant.degree_marks),
    }
}

pub fn applicant_card(applicant: &Applicant) -> String {
    let mut lines = vec![
        applicant.label(),
        format!("  {} in {}", applicant.degree, applicant.specialization),
        format!("  Passing Year: {}", applicant.passing_year),
        format!(
            "  10th: {}%  12th: {}%  Degree: {}",
            applicant.tenth_marks,
            applicant.twelfth_marks,
            format_degree_marks(applicant)
        ),
    ];

    if let Some(email) = &applicant.email {
        lines.push(format!("  Email: {}", email));
    }
    if let Some(resume) = &applicant.resume_path {
        lines.push(format!("  Resume: {}", resume));
    }
    lines.push(format!(
        "  Status: {}{}",
        applicant.status,
        applicant
            .applied_on
            .as_deref()
            .map(|on| format!(" (applied {})", on))
            .unwrap_or_default()
    ));

    lines.join("\n")
}

pub fn applications_table(applicants: &[&Applicant]) -> String {
    let mut out = vec![
        format!(
            "{:<6} {:<24} {:<10} {:<24} {:<6} {:<7} {:<7} {:<12}",
            "ID", "Name", "Degree", "Specialization", "Year", "10th", "12th", "Degree marks"
        ),
        "-".repeat(102),
    ];

    for applicant in applicants {
        out.push(format!(
            "{:<6} {:<24} {:<10} {:<24} {:<6} {:<7} {:<7} {:<12}",
            applicant.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            applicant.name,
            applicant.degree,
            applicant.specialization,
            applicant.passing_year,
            format!("{}%", applicant.tenth_marks),
            format!("{}%", applicant.twelfth_marks),
            format_degree_marks(applicant)
        ));
    }

    out.join("\n")
}

pub fn parse_outcomes_table(outcomes: &[ParseOutcome]) -> String {
    let mut out = vec![
        format!("{:<6} {:<24} {:>8}  {:<8}", "ID", "Name", "Score", "Verdict"),
        "-".repeat(50),
    ];

    for outcome in outcomes {
        let score = outcome
            .final_weighted_score
            .map(|s| format!("{:.2}", s))
            .unwrap_or_else(|| "-".to_string());
        let verdict = match (&outcome.fit_verdict, &outcome.error) {
            (_, Some(error)) => format!("error: {}", error),
            (Some(verdict), None) => verdict.to_string(),
            (None, None) => "-".to_string(),
        };
        out.push(format!(
            "{:<6} {:<24} {:>8}  {:<8}",
            outcome.student_id, outcome.name, score, verdict
        ));
    }

    out.join("\n")
}

pub fn results_table(rows: &[RankedResult<'_>]) -> String {
    let mut out = vec![
        format!(
            "{:<5} {:<24} {:>8} {:>8} {:>10}  {:<8}",
            "Rank", "Name", "Final", "Hard", "Relevance", "Verdict"
        ),
        "-".repeat(70),
    ];

    for row in rows {
        out.push(format!(
            "{:<5} {:<24} {:>8.2} {:>8.2} {:>10.2}  {:<8}",
            row.rank,
            row.applicant.name,
            row.analysis.final_weighted_score,
            row.analysis.hard_match_score,
            row.analysis.relevance_score,
            row.analysis.fit_verdict.to_string()
        ));
    }

    out.join("\n")
}

/// Expanded view of one analysis
pub fn analysis_details(analysis: &ScoredAnalysis) -> String {
    let mut lines = Vec::new();

    if let Some(id) = analysis.id {
        lines.push(format!("  Analysis #{}", id));
    }
    if let Some(created_at) = &analysis.created_at {
        lines.push(format!("  Analyzed: {}", created_at));
    }
    if analysis.missing_elements.is_empty() {
        lines.push("  Missing: none".to_string());
    } else {
        lines.push(format!("  Missing: {}", analysis.missing_elements.join(", ")));
    }
    if !analysis.feedback.trim().is_empty() {
        lines.push(format!("  Feedback: {}", analysis.feedback.trim()));
    }
    if let Some(summary) = &analysis.summary_for_recruiter {
        lines.push(format!("  Summary: {}", summary.trim()));
    }

    lines.join("\n")
}

pub fn verdict_summary(summary: &VerdictSummary) -> String {
    format!(
        "Fit: {}  Not Fit: {}  Not analyzed: {}",
        summary.fit, summary.not_fit, summary.unscored
    )
}

pub fn eligibility_line(applicant: &Applicant, report: &EligibilityReport) -> String {
    if report.is_eligible() {
        format!(
            "✅ {} (degree {:.1} >= {:.1})",
            applicant.label(),
            report.normalized_degree,
            report.normalized_threshold
        )
    } else {
        format!(
            "❌ {} - fails {}",
            applicant.label(),
            report.failures().join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::evaluate;
    use crate::types::applicant::fixtures::applicant;
    use crate::types::{Criteria, FitVerdict};

    #[test]
    fn test_format_degree_marks() {
        let cgpa = applicant("Aisha", 2024, 95.0, 92.0, 8.8, MarksType::Cgpa);
        assert_eq!(format_degree_marks(&cgpa), "8.8/10 CGPA");

        let percentage = applicant("David", 2025, 85.0, 80.0, 81.0, MarksType::Percentage);
        assert_eq!(format_degree_marks(&percentage), "81%");
    }

    #[test]
    fn test_applicant_card() {
        let mut aisha = applicant("Aisha Sharma", 2024, 95.0, 92.0, 8.8, MarksType::Cgpa);
        aisha.id = Some(1);
        aisha.resume_path = Some("uploads/aisha.pdf".to_string());

        let card = applicant_card(&aisha);
        assert!(card.starts_with("#1 Aisha Sharma"));
        assert!(card.contains("B.Tech in Computer Science"));
        assert!(card.contains("10th: 95%  12th: 92%  Degree: 8.8/10 CGPA"));
        assert!(card.contains("Resume: uploads/aisha.pdf"));
        assert!(card.ends_with("Status: Pending"));
    }

    #[test]
    fn test_parse_outcomes_table() {
        let outcomes = vec![
            ParseOutcome {
                student_id: 1,
                name: "Aisha".to_string(),
                final_weighted_score: Some(82.456),
                fit_verdict: Some(FitVerdict::Fit),
                error: None,
            },
            ParseOutcome {
                student_id: 2,
                name: "Ben".to_string(),
                final_weighted_score: None,
                fit_verdict: None,
                error: Some("Could not read file".to_string()),
            },
        ];

        let table = parse_outcomes_table(&outcomes);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("82.46"));
        assert!(lines[2].contains("Fit"));
        assert!(lines[3].contains("error: Could not read file"));
    }

    #[test]
    fn test_analysis_details() {
        let analysis = ScoredAnalysis {
            id: Some(9),
            hard_match_score: 60.0,
            relevance_score: 75.0,
            final_weighted_score: 69.0,
            fit_verdict: FitVerdict::NotFit,
            missing_elements: vec![],
            feedback: " Learn SQL. ".to_string(),
            summary_for_recruiter: None,
            created_at: None,
        };

        assert_eq!(
            analysis_details(&analysis),
            "  Analysis #9\n  Missing: none\n  Feedback: Learn SQL."
        );
    }

    #[test]
    fn test_eligibility_line() {
        let criteria = Criteria {
            max_passing_year: 2024,
            min_tenth_marks: 75.0,
            min_twelfth_marks: 75.0,
            min_degree_marks: 8.0,
        };

        let aisha = applicant("Aisha", 2024, 95.0, 92.0, 8.8, MarksType::Cgpa);
        let line = eligibility_line(&aisha, &evaluate(&aisha, &criteria));
        assert_eq!(line, "✅ Aisha (degree 88.0 >= 80.0)");

        let david = applicant("David", 2025, 70.0, 80.0, 81.0, MarksType::Percentage);
        let line = eligibility_line(&david, &evaluate(&david, &criteria));
        assert_eq!(line, "❌ David - fails passing year, 10th marks");
    }
}

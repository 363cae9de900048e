// src/results.rs
//! Searching, ranking and exporting what the backend returned

use anyhow::{Context, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::io::Write;

use crate::types::{Applicant, AnalyzedApplicant, FitVerdict, ScoredAnalysis};
use crate::utils::normalize_search_term;

/// Case-insensitive substring match on the applicant name
pub fn search_by_name<'a>(applicants: &'a [Applicant], term: &str) -> Vec<&'a Applicant> {
    let term = normalize_search_term(term);
    applicants
        .iter()
        .filter(|applicant| term.is_empty() || applicant.name.to_lowercase().contains(&term))
        .collect()
}

/// Newest analysis by `created_at`; falls back to the last entry when any
/// timestamp is missing or unreadable
pub fn latest_analysis(analyzed: &AnalyzedApplicant) -> Option<&ScoredAnalysis> {
    let timestamps: Option<Vec<_>> = analyzed
        .analyses
        .iter()
        .map(|analysis| analysis.created_at_utc())
        .collect();

    match timestamps {
        Some(times) if !times.is_empty() => times
            .iter()
            .enumerate()
            .max_by_key(|(index, time)| (**time, *index))
            .map(|(index, _)| &analyzed.analyses[index]),
        _ => analyzed.analyses.last(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortKey {
    #[default]
    Final,
    Hard,
    Relevance,
    Name,
}

/// Filters and ordering for the results view
#[derive(Debug, Clone, Default)]
pub struct ResultQuery {
    pub sort: SortKey,
    /// Flip the natural order (scores high to low, names A to Z)
    pub reverse: bool,
    pub verdict: Option<FitVerdict>,
    pub min_score: Option<f64>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedResult<'a> {
    pub rank: usize,
    pub applicant: &'a Applicant,
    pub analysis: &'a ScoredAnalysis,
}

impl ResultQuery {
    fn score(&self, analysis: &ScoredAnalysis) -> f64 {
        match self.sort {
            SortKey::Hard => analysis.hard_match_score,
            SortKey::Relevance => analysis.relevance_score,
            SortKey::Final | SortKey::Name => analysis.final_weighted_score,
        }
    }

    fn compare(&self, a: &RankedResult<'_>, b: &RankedResult<'_>) -> Ordering {
        let by_name = a
            .applicant
            .name
            .to_lowercase()
            .cmp(&b.applicant.name.to_lowercase());

        let natural = match self.sort {
            SortKey::Name => by_name,
            _ => self
                .score(b.analysis)
                .total_cmp(&self.score(a.analysis))
                .then(by_name),
        };

        if self.reverse {
            natural.reverse()
        } else {
            natural
        }
    }

    /// Latest analysis per applicant, filtered, sorted and ranked from 1.
    /// Applicants never analyzed are left out.
    pub fn apply<'a>(&self, analyzed: &'a [AnalyzedApplicant]) -> Vec<RankedResult<'a>> {
        let term = self.search.as_deref().map(normalize_search_term);

        let mut rows: Vec<RankedResult<'a>> = analyzed
            .iter()
            .filter_map(|entry| {
                latest_analysis(entry).map(|analysis| RankedResult {
                    rank: 0,
                    applicant: &entry.applicant,
                    analysis,
                })
            })
            .filter(|row| self.verdict.map_or(true, |v| row.analysis.fit_verdict == v))
            .filter(|row| {
                self.min_score
                    .map_or(true, |min| row.analysis.final_weighted_score >= min)
            })
            .filter(|row| match &term {
                Some(term) => row.applicant.name.to_lowercase().contains(term.as_str()),
                None => true,
            })
            .collect();

        rows.sort_by(|a, b| self.compare(a, b));
        for (index, row) in rows.iter_mut().enumerate() {
            row.rank = index + 1;
        }
        rows
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerdictSummary {
    pub fit: usize,
    pub not_fit: usize,
    pub unscored: usize,
}

pub fn summarize(analyzed: &[AnalyzedApplicant]) -> VerdictSummary {
    analyzed
        .iter()
        .fold(VerdictSummary::default(), |mut summary, entry| {
            match latest_analysis(entry).map(|a| a.fit_verdict) {
                Some(FitVerdict::Fit) => summary.fit += 1,
                Some(FitVerdict::NotFit) => summary.not_fit += 1,
                None => summary.unscored += 1,
            }
            summary
        })
}

#[derive(Serialize)]
struct CsvRow<'a> {
    rank: usize,
    name: &'a str,
    email: &'a str,
    final_weighted_score: f64,
    hard_match_score: f64,
    relevance_score: f64,
    fit_verdict: String,
    missing_elements: String,
}

/// Write ranked results as CSV with a header row
pub fn export_csv<W: Write>(rows: &[RankedResult<'_>], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for row in rows {
        csv_writer
            .serialize(CsvRow {
                rank: row.rank,
                name: &row.applicant.name,
                email: row.applicant.email.as_deref().unwrap_or(""),
                final_weighted_score: row.analysis.final_weighted_score,
                hard_match_score: row.analysis.hard_match_score,
                relevance_score: row.analysis.relevance_score,
                fit_verdict: row.analysis.fit_verdict.to_string(),
                missing_elements: row.analysis.missing_elements.join("; "),
            })
            .with_context(|| format!("Failed to write CSV row for {}", row.applicant.name))?;
    }

    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

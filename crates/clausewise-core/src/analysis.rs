//! Document-level risk aggregation.
//!
//! Folds a finalized, classified clause list into a single [`RiskAnalysis`]
//! report: weighted risk score, completeness against the essential-clause
//! table, missing-clause list, high-risk clause summaries, and ranked
//! recommendations. Clause records are read-only here.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clause::{Category, Clause, RiskLevel};
use crate::patterns::RiskPatternEngine;
use crate::text::preview;

/// Length of the text preview attached to high-risk clause summaries.
const HIGH_RISK_PREVIEW_LEN: usize = 200;

/// Maximum recommendations emitted per analysis.
const MAX_RECOMMENDATIONS: usize = 10;

/// One entry of the essential-clause table.
struct EssentialClause {
    category: Category,
    required: bool,
    risk_level: RiskLevel,
    description: &'static str,
}

/// The essential-clause table, in declaration order. Only `required` entries
/// feed the completeness score and missing-clause list; the rest document
/// recommended-but-optional categories.
const ESSENTIAL_CLAUSES: &[EssentialClause] = &[
    EssentialClause {
        category: Category::Liability,
        required: true,
        risk_level: RiskLevel::High,
        description: "Defines responsibility for damages and losses",
    },
    EssentialClause {
        category: Category::Termination,
        required: true,
        risk_level: RiskLevel::Medium,
        description: "Specifies how and when the agreement can end",
    },
    EssentialClause {
        category: Category::Confidentiality,
        required: true,
        risk_level: RiskLevel::Medium,
        description: "Protects sensitive information",
    },
    EssentialClause {
        category: Category::Payment,
        required: true,
        risk_level: RiskLevel::Medium,
        description: "Details payment terms and conditions",
    },
    EssentialClause {
        category: Category::DisputeResolution,
        required: true,
        risk_level: RiskLevel::Medium,
        description: "Outlines how disputes will be resolved",
    },
    EssentialClause {
        category: Category::GoverningLaw,
        required: true,
        risk_level: RiskLevel::Low,
        description: "Specifies which jurisdiction's laws apply",
    },
    EssentialClause {
        category: Category::IntellectualProperty,
        required: false,
        risk_level: RiskLevel::Medium,
        description: "Defines ownership and use of IP",
    },
    EssentialClause {
        category: Category::ForceMajeure,
        required: false,
        risk_level: RiskLevel::Low,
        description: "Addresses unforeseeable circumstances",
    },
];

/// Clause counts per risk tier. The counts always sum to the total clause
/// count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskBreakdown {
    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }

    fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::High => self.high += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::Low => self.low += 1,
        }
    }
}

/// A required category absent from the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingClause {
    pub category: Category,
    pub risk_level: RiskLevel,
    pub description: String,
}

/// Summary of one clause whose risk tier is high.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighRiskClause {
    pub id: u32,
    pub category: Category,
    pub text_preview: String,
    pub risks: Vec<String>,
    pub concerns: Vec<String>,
}

/// Document-level risk and completeness report. Built once per analysis run
/// and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub overall_risk_score: f64,
    pub completeness_score: f64,
    pub risk_breakdown: RiskBreakdown,
    pub missing_clauses: Vec<MissingClause>,
    pub high_risk_clauses: Vec<HighRiskClause>,
    /// Raw matched patterns across all clauses. Duplicates are kept on
    /// purpose; frequency signals severity. Deduplication is a presentation
    /// choice.
    pub concerning_terms: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Aggregates classified clauses into a [`RiskAnalysis`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskEngine {
    patterns: RiskPatternEngine,
}

impl RiskEngine {
    pub fn new() -> Self {
        Self {
            patterns: RiskPatternEngine::new(),
        }
    }

    /// Fold a classified clause list into the document report.
    ///
    /// An empty clause list yields zero scores; completeness is still
    /// computed against the required categories (yielding 0%).
    pub fn analyze(&self, clauses: &[Clause]) -> RiskAnalysis {
        let mut breakdown = RiskBreakdown::default();
        let mut categories_found: HashSet<Category> = HashSet::new();
        let mut high_risk_clauses = Vec::new();
        let mut concerning_terms = Vec::new();
        let mut total_weight: u32 = 0;

        for clause in clauses {
            categories_found.insert(clause.category);
            breakdown.record(clause.risk_level);
            total_weight += clause.risk_level.weight();

            let scan = self.patterns.scan(&clause.text);
            if clause.risk_level == RiskLevel::High {
                high_risk_clauses.push(HighRiskClause {
                    id: clause.id,
                    category: clause.category,
                    text_preview: preview(&clause.text, HIGH_RISK_PREVIEW_LEN),
                    risks: scan.identified_risks,
                    concerns: clause.concerns.clone(),
                });
            }
            concerning_terms.extend(scan.concerning_terms);
        }

        let missing_clauses: Vec<MissingClause> = ESSENTIAL_CLAUSES
            .iter()
            .filter(|e| e.required && !categories_found.contains(&e.category))
            .map(|e| MissingClause {
                category: e.category,
                risk_level: e.risk_level,
                description: e.description.to_string(),
            })
            .collect();

        let overall_risk_score = if clauses.is_empty() {
            0.0
        } else {
            let max_possible = clauses.len() as f64 * RiskLevel::High.weight() as f64;
            (total_weight as f64 / max_possible * 100.0).min(100.0)
        };

        let required_total = ESSENTIAL_CLAUSES.iter().filter(|e| e.required).count();
        let required_found = ESSENTIAL_CLAUSES
            .iter()
            .filter(|e| e.required && categories_found.contains(&e.category))
            .count();
        let completeness_score = required_found as f64 / required_total as f64 * 100.0;

        let recommendations = build_recommendations(
            &missing_clauses,
            high_risk_clauses.len(),
            overall_risk_score,
            completeness_score,
            &categories_found,
        );

        info!(
            clauses = clauses.len(),
            risk_score = overall_risk_score,
            completeness = completeness_score,
            missing = missing_clauses.len(),
            "risk analysis complete"
        );

        RiskAnalysis {
            overall_risk_score,
            completeness_score,
            risk_breakdown: breakdown,
            missing_clauses,
            high_risk_clauses,
            concerning_terms,
            recommendations,
        }
    }
}

/// Build the ranked recommendation list in fixed priority order, capped at
/// [`MAX_RECOMMENDATIONS`].
fn build_recommendations(
    missing: &[MissingClause],
    high_risk_count: usize,
    risk_score: f64,
    completeness_score: f64,
    categories_found: &HashSet<Category>,
) -> Vec<String> {
    let mut recs = Vec::new();

    // Missing required clauses first; low-risk absences produce no line.
    for m in missing {
        match m.risk_level {
            RiskLevel::High => recs.push(format!(
                "CRITICAL: Add a {} clause to {}",
                m.category,
                m.description.to_lowercase()
            )),
            RiskLevel::Medium => recs.push(format!(
                "IMPORTANT: Consider adding a {} clause to {}",
                m.category,
                m.description.to_lowercase()
            )),
            RiskLevel::Low => {}
        }
    }

    if high_risk_count > 0 {
        recs.push(format!(
            "REVIEW: {high_risk_count} high-risk clauses require immediate legal review"
        ));
    }

    // Exactly one overall-risk verdict.
    if risk_score > 70.0 {
        recs.push(
            "HIGH RISK: This document contains significant legal risks. \
             Professional legal review is strongly recommended"
                .to_string(),
        );
    } else if risk_score > 40.0 {
        recs.push(
            "MEDIUM RISK: This document has moderate risks. Consider legal consultation"
                .to_string(),
        );
    } else {
        recs.push("LOW RISK: This document appears to have acceptable risk levels".to_string());
    }

    if completeness_score < 60.0 {
        recs.push("INCOMPLETE: This document is missing several essential clauses".to_string());
    } else if completeness_score < 80.0 {
        recs.push("REVIEW: Consider adding missing clauses for better protection".to_string());
    }

    if !categories_found.contains(&Category::Liability) {
        recs.push("Add liability limitations to protect against excessive damages".to_string());
    }
    if !categories_found.contains(&Category::Termination) {
        recs.push("Include clear termination procedures and notice requirements".to_string());
    }
    if !categories_found.contains(&Category::DisputeResolution) {
        recs.push(
            "Add dispute resolution mechanisms (arbitration, mediation, or court jurisdiction)"
                .to_string(),
        );
    }

    recs.truncate(MAX_RECOMMENDATIONS);
    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classified(id: u32, text: &str, category: Category, risk_level: RiskLevel) -> Clause {
        let mut clause = Clause::new(id, text.to_string(), text);
        clause.category = category;
        clause.risk_level = risk_level;
        clause
    }

    #[test]
    fn empty_clause_list_yields_zero_scores() {
        let report = RiskEngine::new().analyze(&[]);
        assert_eq!(report.overall_risk_score, 0.0);
        assert_eq!(report.completeness_score, 0.0);
        assert_eq!(report.risk_breakdown.total(), 0);
        // Completeness is still computed: all six required categories missing.
        assert_eq!(report.missing_clauses.len(), 6);
    }

    #[test]
    fn mixed_risk_scenario_scores() {
        let clauses = vec![
            classified(1, "liability text", Category::Liability, RiskLevel::High),
            classified(2, "termination text", Category::Termination, RiskLevel::Medium),
            classified(3, "general text", Category::General, RiskLevel::Low),
        ];
        let report = RiskEngine::new().analyze(&clauses);

        assert_eq!(
            report.risk_breakdown,
            RiskBreakdown {
                high: 1,
                medium: 1,
                low: 1
            }
        );
        // (3 + 2 + 1) / (3 * 3) * 100
        assert!((report.overall_risk_score - 200.0 / 3.0).abs() < 1e-9);
        // Liability and Termination present out of six required.
        assert!((report.completeness_score - 100.0 / 3.0).abs() < 1e-9);

        let missing: Vec<Category> =
            report.missing_clauses.iter().map(|m| m.category).collect();
        assert_eq!(
            missing,
            vec![
                Category::Confidentiality,
                Category::Payment,
                Category::DisputeResolution,
                Category::GoverningLaw,
            ]
        );
    }

    #[test]
    fn breakdown_counts_sum_to_clause_count() {
        let clauses: Vec<Clause> = (1..=7)
            .map(|i| {
                let level = match i % 3 {
                    0 => RiskLevel::High,
                    1 => RiskLevel::Medium,
                    _ => RiskLevel::Low,
                };
                classified(i, "text", Category::General, level)
            })
            .collect();
        let report = RiskEngine::new().analyze(&clauses);
        assert_eq!(report.risk_breakdown.total(), 7);
    }

    #[test]
    fn risk_score_is_monotone_in_clause_risk() {
        let engine = RiskEngine::new();
        let score_for = |level: RiskLevel| {
            let clauses = vec![
                classified(1, "a", Category::General, level),
                classified(2, "b", Category::General, RiskLevel::Low),
            ];
            engine.analyze(&clauses).overall_risk_score
        };
        let low = score_for(RiskLevel::Low);
        let medium = score_for(RiskLevel::Medium);
        let high = score_for(RiskLevel::High);
        assert!(low < medium && medium < high);
        for score in [low, medium, high] {
            assert!((0.0..=100.0).contains(&score));
        }
    }

    #[test]
    fn completeness_hits_100_when_all_required_present() {
        let required = [
            Category::Liability,
            Category::Termination,
            Category::Confidentiality,
            Category::Payment,
            Category::DisputeResolution,
            Category::GoverningLaw,
        ];
        let clauses: Vec<Clause> = required
            .iter()
            .enumerate()
            .map(|(i, &cat)| classified(i as u32 + 1, "text", cat, RiskLevel::Low))
            .collect();
        let report = RiskEngine::new().analyze(&clauses);
        assert_eq!(report.completeness_score, 100.0);
        assert!(report.missing_clauses.is_empty());
    }

    #[test]
    fn missing_clauses_never_contain_present_categories() {
        let clauses = vec![classified(1, "t", Category::Payment, RiskLevel::Medium)];
        let report = RiskEngine::new().analyze(&clauses);
        assert!(
            report
                .missing_clauses
                .iter()
                .all(|m| m.category != Category::Payment)
        );
    }

    #[test]
    fn high_risk_clause_summaries_include_pattern_scan() {
        let text = format!(
            "The supplier accepts unlimited liability and may be terminated without notice. {}",
            "padding ".repeat(40)
        );
        let clauses = vec![classified(1, &text, Category::Liability, RiskLevel::High)];
        let report = RiskEngine::new().analyze(&clauses);

        assert_eq!(report.high_risk_clauses.len(), 1);
        let summary = &report.high_risk_clauses[0];
        assert_eq!(summary.id, 1);
        assert!(summary.text_preview.ends_with("..."));
        assert!(summary.text_preview.chars().count() <= 203);
        assert!(
            summary
                .risks
                .contains(&"Contains high-risk term: unlimited liability".to_string())
        );
        assert!(
            report
                .concerning_terms
                .contains(&"without notice".to_string())
        );
    }

    #[test]
    fn concerning_terms_keep_duplicates() {
        let clauses = vec![
            classified(
                1,
                "unlimited liability applies here",
                Category::Liability,
                RiskLevel::High,
            ),
            classified(
                2,
                "and unlimited liability applies there",
                Category::Liability,
                RiskLevel::High,
            ),
        ];
        let report = RiskEngine::new().analyze(&clauses);
        let hits = report
            .concerning_terms
            .iter()
            .filter(|t| *t == "unlimited liability")
            .count();
        assert_eq!(hits, 2);
    }

    #[test]
    fn recommendations_follow_priority_order_and_cap_at_ten() {
        // Three high-risk General clauses: everything is missing, score is
        // 100, completeness is 0. That produces 11 candidate lines; the
        // dispute-resolution nudge is cut by the cap.
        let clauses: Vec<Clause> = (1..=3)
            .map(|i| classified(i, "text", Category::General, RiskLevel::High))
            .collect();
        let report = RiskEngine::new().analyze(&clauses);

        assert_eq!(report.recommendations.len(), 10);
        assert!(report.recommendations[0].starts_with("CRITICAL: Add a Liability clause"));
        assert!(report.recommendations[1].starts_with("IMPORTANT: Consider adding a Termination"));
        assert!(report.recommendations[5].starts_with("REVIEW: 3 high-risk clauses"));
        assert!(report.recommendations[6].starts_with("HIGH RISK"));
        assert!(report.recommendations[7].starts_with("INCOMPLETE"));
        assert!(report.recommendations[9].starts_with("Include clear termination"));
    }

    #[test]
    fn low_risk_document_gets_low_risk_verdict() {
        let clauses = vec![classified(1, "t", Category::GoverningLaw, RiskLevel::Low)];
        let report = RiskEngine::new().analyze(&clauses);
        assert!(
            report
                .recommendations
                .iter()
                .any(|r| r.starts_with("LOW RISK"))
        );
        // Governing Law is a low-risk requirement: its absence elsewhere
        // produces no CRITICAL/IMPORTANT line, and presence here none either.
        assert!(
            !report
                .recommendations
                .iter()
                .any(|r| r.contains("Governing Law clause"))
        );
    }
}

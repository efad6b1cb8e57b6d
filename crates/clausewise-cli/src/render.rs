//! Terminal report rendering.
//!
//! Prints an analysis as a grouped, human-readable card. Display is the one
//! place concerning terms get deduplicated; the stored report keeps the raw
//! list.

use clausewise_ai::DocumentAnalysis;
use clausewise_core::{RiskAnalysis, RiskLevel};

const MAX_LIST_ITEMS: usize = 10;

fn risk_marker(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => "[HIGH]",
        RiskLevel::Medium => "[MED] ",
        RiskLevel::Low => "[LOW] ",
    }
}

/// Collapse duplicates into (term, count) pairs, first-seen order.
fn dedup_with_counts(terms: &[String]) -> Vec<(&str, usize)> {
    let mut out: Vec<(&str, usize)> = Vec::new();
    for term in terms {
        match out.iter_mut().find(|(t, _)| *t == term.as_str()) {
            Some((_, count)) => *count += 1,
            None => out.push((term.as_str(), 1)),
        }
    }
    out
}

/// Print a full analysis as a vertical card grouped by section.
pub fn print_report(title: &str, analysis: &DocumentAnalysis) {
    println!("=== ClauseWise Analysis: {} ===", title);
    println!();

    print_summary(analysis);
    print_missing(&analysis.risk);
    print_high_risk(&analysis.risk);
    print_concerning_terms(&analysis.risk);
    print_recommendations(&analysis.risk);
    print_clauses(analysis);
}

fn print_summary(analysis: &DocumentAnalysis) {
    let risk = &analysis.risk;
    println!("Summary");
    println!("  {:<26} {}", "total_clauses", analysis.clauses.len());
    println!(
        "  {:<26} {:.1}%",
        "overall_risk_score", risk.overall_risk_score
    );
    println!(
        "  {:<26} {:.1}%",
        "completeness_score", risk.completeness_score
    );
    println!(
        "  {:<26} high {} / medium {} / low {}",
        "risk_breakdown",
        risk.risk_breakdown.high,
        risk.risk_breakdown.medium,
        risk.risk_breakdown.low
    );
    println!();
}

fn print_missing(risk: &RiskAnalysis) {
    if risk.missing_clauses.is_empty() {
        return;
    }
    println!("Missing Essential Clauses ({})", risk.missing_clauses.len());
    for missing in &risk.missing_clauses {
        println!(
            "  {} {:<22} {}",
            risk_marker(missing.risk_level),
            missing.category.to_string(),
            missing.description
        );
    }
    println!();
}

fn print_high_risk(risk: &RiskAnalysis) {
    if risk.high_risk_clauses.is_empty() {
        return;
    }
    println!("High-Risk Clauses ({})", risk.high_risk_clauses.len());
    for clause in &risk.high_risk_clauses {
        println!("  Clause {}: {}", clause.id, clause.category);
        println!("    {}", clause.text_preview);
        let show = clause.risks.len().min(MAX_LIST_ITEMS);
        for r in &clause.risks[..show] {
            println!("    - {}", r);
        }
        if clause.risks.len() > MAX_LIST_ITEMS {
            println!("    ... and {} more", clause.risks.len() - MAX_LIST_ITEMS);
        }
    }
    println!();
}

fn print_concerning_terms(risk: &RiskAnalysis) {
    let deduped = dedup_with_counts(&risk.concerning_terms);
    if deduped.is_empty() {
        return;
    }
    println!("Concerning Terms ({})", deduped.len());
    for (term, count) in deduped {
        if count > 1 {
            println!("  {:<26} x{}", term, count);
        } else {
            println!("  {}", term);
        }
    }
    println!();
}

fn print_recommendations(risk: &RiskAnalysis) {
    if risk.recommendations.is_empty() {
        return;
    }
    println!("Recommendations");
    for (i, rec) in risk.recommendations.iter().enumerate() {
        println!("  {}. {}", i + 1, rec);
    }
    println!();
}

fn print_clauses(analysis: &DocumentAnalysis) {
    if analysis.clauses.is_empty() {
        return;
    }
    println!("Clauses");
    for clause in &analysis.clauses {
        println!(
            "  {} Clause {}: {}",
            risk_marker(clause.risk_level),
            clause.id,
            clause.category
        );
        if !clause.simplified_text.is_empty() {
            println!("         {}", clause.simplified_text);
        }
        if !clause.key_terms.is_empty() {
            println!("         key terms: {}", clause.key_terms.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_counts_and_keeps_first_seen_order() {
        let terms = vec![
            "without notice".to_string(),
            "irrevocable".to_string(),
            "without notice".to_string(),
        ];
        let deduped = dedup_with_counts(&terms);
        assert_eq!(deduped, vec![("without notice", 2), ("irrevocable", 1)]);
    }

    #[test]
    fn risk_markers_are_fixed_width() {
        for level in [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low] {
            assert_eq!(risk_marker(level).len(), 6);
        }
    }
}

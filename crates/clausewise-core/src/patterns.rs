//! Curated risk-term pattern scanning.
//!
//! An independent signal layer: every clause is scanned against all three
//! pattern tiers regardless of its already-assigned category or risk tier.

use once_cell::sync::Lazy;
use regex::Regex;

/// Terms that almost always warrant legal review.
const HIGH_RISK_TERMS: &[&str] = &[
    r"unlimited liability",
    r"no limitation of liability",
    r"gross negligence",
    r"willful misconduct",
    r"liquidated damages",
    r"punitive damages",
    r"consequential damages",
    r"personal guarantee",
    r"joint and several",
    r"automatic renewal",
    r"perpetual license",
    r"irrevocable",
];

const MEDIUM_RISK_TERMS: &[&str] = &[
    r"material breach",
    r"immediate termination",
    r"sole discretion",
    r"as is basis",
    r"no warranty",
    r"time is of the essence",
    r"force majeure",
    r"change in control",
    r"non-compete",
    r"exclusive rights",
];

const CONCERNING_PHRASES: &[&str] = &[
    r"in perpetuity",
    r"without notice",
    r"at any time",
    r"sole and absolute discretion",
    r"waive all rights",
    r"release all claims",
    r"hold harmless from all",
    r"indemnify against all",
];

struct Tier {
    label: &'static str,
    raw: &'static [&'static str],
    compiled: Vec<Regex>,
}

impl Tier {
    fn new(label: &'static str, raw: &'static [&'static str]) -> Self {
        let compiled = raw
            .iter()
            .map(|p| Regex::new(&format!("(?i){p}")).expect("risk pattern"))
            .collect();
        Self {
            label,
            raw,
            compiled,
        }
    }
}

static TIERS: Lazy<[Tier; 3]> = Lazy::new(|| {
    [
        Tier::new("Contains high-risk term", HIGH_RISK_TERMS),
        Tier::new("Contains medium-risk term", MEDIUM_RISK_TERMS),
        Tier::new("Contains concerning phrase", CONCERNING_PHRASES),
    ]
});

/// Pattern matches found in a single clause.
#[derive(Debug, Clone, Default)]
pub struct ClauseRiskScan {
    /// Labelled descriptions, one per matched pattern.
    pub identified_risks: Vec<String>,
    /// The raw matched patterns, in tier order.
    pub concerning_terms: Vec<String>,
}

/// Scans clause text against the curated risk-term tiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskPatternEngine;

impl RiskPatternEngine {
    pub fn new() -> Self {
        Self
    }

    /// Scan one clause's text. Matching is case-insensitive substring/regex;
    /// each matched pattern contributes exactly one labelled risk and one
    /// concerning term.
    pub fn scan(&self, clause_text: &str) -> ClauseRiskScan {
        let mut scan = ClauseRiskScan::default();
        for tier in TIERS.iter() {
            for (pattern, re) in tier.raw.iter().zip(&tier.compiled) {
                if re.is_match(clause_text) {
                    scan.identified_risks.push(format!("{}: {}", tier.label, pattern));
                    scan.concerning_terms.push((*pattern).to_string());
                }
            }
        }
        scan
    }
}

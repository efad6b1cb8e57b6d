//! Deterministic keyword classification.
//!
//! Always available and total: any text, including empty or garbage input,
//! produces a fully-populated classification. Used directly when no model
//! backend is configured and as the per-clause fallback when one fails.

use async_trait::async_trait;
use clausewise_core::{Category, RiskLevel};

use crate::classifier::{Classification, ClassifyError, ClauseClassifier};

/// Fixed disclaimer attached to every keyword-classified clause.
pub const FALLBACK_CONCERN: &str = "Automated analysis - manual review recommended";

/// Keyword groups in strict priority order: the first group with any
/// matching substring decides both category and risk tier. Higher-liability
/// categories come first so a clause mentioning both liability and payment
/// terms is conservatively classified as the higher-risk category.
const KEYWORD_GROUPS: &[(&[&str], Category, RiskLevel)] = &[
    (
        &["liable", "liability", "damages", "responsible"],
        Category::Liability,
        RiskLevel::High,
    ),
    (
        &["indemnify", "indemnification", "hold harmless"],
        Category::Indemnity,
        RiskLevel::High,
    ),
    (
        &["confidential", "proprietary", "non-disclosure"],
        Category::Confidentiality,
        RiskLevel::Medium,
    ),
    (
        &["terminate", "termination", "end", "expire"],
        Category::Termination,
        RiskLevel::Medium,
    ),
    (
        &["payment", "pay", "fee", "cost", "price"],
        Category::Payment,
        RiskLevel::Medium,
    ),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify clause text by keyword groups. Infallible.
    pub fn classify_text(&self, clause_text: &str) -> Classification {
        let lower = clause_text.to_lowercase();

        let (category, risk_level) = KEYWORD_GROUPS
            .iter()
            .find(|(terms, _, _)| terms.iter().any(|t| lower.contains(t)))
            .map(|&(_, category, risk)| (category, risk))
            .unwrap_or((Category::General, RiskLevel::Low));

        Classification {
            category,
            simplified_text: format!(
                "This is a {} clause. Please review the original text for specific details.",
                category.as_str().to_lowercase()
            ),
            risk_level,
            key_terms: Vec::new(),
            concerns: vec![FALLBACK_CONCERN.to_string()],
        }
    }
}

#[async_trait]
impl ClauseClassifier for KeywordClassifier {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn classify(&self, clause_text: &str) -> Result<Classification, ClassifyError> {
        Ok(self.classify_text(clause_text))
    }
}

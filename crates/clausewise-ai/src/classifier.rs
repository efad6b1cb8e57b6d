//! The classification contract shared by every backend.

use async_trait::async_trait;
use clausewise_core::{Category, Clause, RiskLevel};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// At most this many key terms survive sanitisation.
pub const MAX_KEY_TERMS: usize = 10;

/// At most this many concerns survive sanitisation.
pub const MAX_CONCERNS: usize = 5;

/// Substituted when a backend response carries no usable summary.
pub const DEFAULT_SIMPLIFIED: &str = "Unable to simplify this clause.";

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Backend { status: u16, body: String },
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("backend response had no content")]
    EmptyResponse,
}

/// Classification output for one clause. Every backend produces this exact
/// shape; the pipeline applies it to the clause record unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub simplified_text: String,
    pub risk_level: RiskLevel,
    pub key_terms: Vec<String>,
    pub concerns: Vec<String>,
}

impl Classification {
    /// Write this result onto an existing clause record.
    pub fn apply(self, clause: &mut Clause) {
        clause.category = self.category;
        clause.simplified_text = self.simplified_text;
        clause.risk_level = self.risk_level;
        clause.key_terms = self.key_terms;
        clause.concerns = self.concerns;
    }
}

/// A clause classification backend.
///
/// Implementations classify each clause in isolation; an error from one
/// clause never affects another. The pipeline handles fallback, so backends
/// are free to fail loudly.
#[async_trait]
pub trait ClauseClassifier: Send + Sync {
    /// Backend name, for logs.
    fn name(&self) -> &str;

    /// Classify a single clause's text.
    async fn classify(&self, clause_text: &str) -> Result<Classification, ClassifyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_overwrites_classification_fields() {
        let mut clause = Clause::new(1, "some clause text", "some clause text");
        Classification {
            category: Category::Payment,
            simplified_text: "Payment is due monthly.".into(),
            risk_level: RiskLevel::Medium,
            key_terms: vec!["fee".into()],
            concerns: vec!["late fees".into()],
        }
        .apply(&mut clause);

        assert_eq!(clause.category, Category::Payment);
        assert_eq!(clause.risk_level, RiskLevel::Medium);
        assert_eq!(clause.simplified_text, "Payment is due monthly.");
        assert_eq!(clause.key_terms, vec!["fee"]);
        assert_eq!(clause.concerns, vec!["late fees"]);
        // Segmentation fields are untouched.
        assert_eq!(clause.id, 1);
        assert_eq!(clause.text, "some clause text");
    }
}

//! The document analysis pipeline.
//!
//! Ties the stages together in one direction: raw text → segmenter → ordered
//! clause list → classifier (annotates) → risk aggregation. Classification
//! runs concurrently across clauses with a per-call timeout; results are
//! reassembled in clause-id order before aggregation, and every failure
//! degrades to the keyword fallback for that clause only.

use std::time::Duration;

use clausewise_core::{Clause, RiskAnalysis, RiskEngine, Segmenter};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::classifier::{Classification, ClauseClassifier};
use crate::keyword::KeywordClassifier;

/// Tuning knobs for the classification stage.
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    /// Clauses classified in flight at once.
    pub concurrency: usize,
    /// Budget for one backend call; timeouts fall back per clause.
    pub timeout: Duration,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            concurrency: 4,
            timeout: Duration::from_secs(30),
        }
    }
}

/// The finalized output of one analysis run: the classified clause list and
/// the aggregated document report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub clauses: Vec<Clause>,
    pub risk: RiskAnalysis,
}

/// Whole-document analyzer.
///
/// The backend is a capability: present-and-working, present-and-failing, or
/// absent all yield a fully classified clause list.
pub struct Analyzer {
    segmenter: Segmenter,
    backend: Option<Box<dyn ClauseClassifier>>,
    fallback: KeywordClassifier,
    risk_engine: RiskEngine,
    options: AnalyzerOptions,
}

impl Analyzer {
    /// Analyzer with no model backend: keyword classification only.
    pub fn new() -> Self {
        Self {
            segmenter: Segmenter::new(),
            backend: None,
            fallback: KeywordClassifier::new(),
            risk_engine: RiskEngine::new(),
            options: AnalyzerOptions::default(),
        }
    }

    pub fn with_backend(mut self, backend: Box<dyn ClauseClassifier>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_segmenter(mut self, segmenter: Segmenter) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn with_options(mut self, options: AnalyzerOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the full pipeline over one document's plain text.
    ///
    /// Never fails: segmentation degeneracy and classification errors all
    /// resolve to valid, fully-populated results.
    pub async fn analyze(&self, text: &str) -> DocumentAnalysis {
        let mut clauses = self.segmenter.segment(text);
        info!(clauses = clauses.len(), "document segmented");

        // buffered() preserves input order, so results land back on their
        // clauses without any reordering step.
        let results: Vec<Classification> =
            futures::stream::iter(clauses.iter().map(|clause| self.classify_clause(clause)))
                .buffered(self.options.concurrency.max(1))
                .collect()
                .await;

        for (clause, classification) in clauses.iter_mut().zip(results) {
            classification.apply(clause);
        }

        let risk = self.risk_engine.analyze(&clauses);
        DocumentAnalysis { clauses, risk }
    }

    async fn classify_clause(&self, clause: &Clause) -> Classification {
        if let Some(backend) = &self.backend {
            match tokio::time::timeout(self.options.timeout, backend.classify(&clause.text)).await
            {
                Ok(Ok(classification)) => return classification,
                Ok(Err(err)) => warn!(
                    clause = clause.id,
                    backend = backend.name(),
                    error = %err,
                    "classification failed; using keyword fallback"
                ),
                Err(_) => warn!(
                    clause = clause.id,
                    backend = backend.name(),
                    timeout_ms = self.options.timeout.as_millis() as u64,
                    "classification timed out; using keyword fallback"
                ),
            }
        }
        self.fallback.classify_text(&clause.text)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

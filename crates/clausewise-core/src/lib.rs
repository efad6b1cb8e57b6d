pub mod analysis;
pub mod clause;
pub mod patterns;
pub mod segment;
pub mod text;

pub use analysis::{HighRiskClause, MissingClause, RiskAnalysis, RiskBreakdown, RiskEngine};
pub use clause::{Category, Clause, RiskLevel};
pub use patterns::{ClauseRiskScan, RiskPatternEngine};
pub use segment::Segmenter;
pub use text::{looks_like_legal_document, normalize, preview};

//! Clause classification: a pluggable backend interface with model-backed and
//! keyword implementations, plus the batch document-analysis pipeline.

pub mod classifier;
pub mod keyword;
pub mod model;
pub mod pipeline;

pub use classifier::{Classification, ClassifyError, ClauseClassifier};
pub use keyword::KeywordClassifier;
pub use model::{ModelClassifier, ModelConfig};
pub use pipeline::{Analyzer, AnalyzerOptions, DocumentAnalysis};

//! Clause data model shared across segmentation, classification, and scoring.

use serde::{Deserialize, Serialize};

use crate::text::preview;

/// Maximum length of a clause's `start_sentence` preview.
pub const START_SENTENCE_LEN: usize = 100;

/// Legal category assigned to a clause.
///
/// Fixed 10-value taxonomy. [`Category::General`] is the default until a
/// classifier says otherwise, and the lenient parse falls back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Liability,
    Indemnity,
    Confidentiality,
    Termination,
    Payment,
    #[serde(rename = "Intellectual Property")]
    IntellectualProperty,
    #[serde(rename = "Dispute Resolution")]
    DisputeResolution,
    #[serde(rename = "Force Majeure")]
    ForceMajeure,
    #[serde(rename = "Governing Law")]
    GoverningLaw,
    General,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Liability,
        Category::Indemnity,
        Category::Confidentiality,
        Category::Termination,
        Category::Payment,
        Category::IntellectualProperty,
        Category::DisputeResolution,
        Category::ForceMajeure,
        Category::GoverningLaw,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Liability => "Liability",
            Self::Indemnity => "Indemnity",
            Self::Confidentiality => "Confidentiality",
            Self::Termination => "Termination",
            Self::Payment => "Payment",
            Self::IntellectualProperty => "Intellectual Property",
            Self::DisputeResolution => "Dispute Resolution",
            Self::ForceMajeure => "Force Majeure",
            Self::GoverningLaw => "Governing Law",
            Self::General => "General",
        }
    }

    /// Lenient, case-insensitive parse. Unknown labels become `General`
    /// rather than failing, so a sloppy backend response never aborts a
    /// clause.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .unwrap_or(Self::General)
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::General
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal risk tier: `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Weight used by the document-level risk score: low=1, medium=2, high=3.
    pub fn weight(&self) -> u32 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Lenient, case-insensitive parse defaulting to `Low`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            _ => Self::Low,
        }
    }
}

impl Default for RiskLevel {
    fn default() -> Self {
        Self::Low
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One segmented unit of a legal document.
///
/// The segmenter creates clauses and assigns ids; classification only fills
/// in the remaining fields, it never creates or removes clauses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clause {
    /// 1-based, contiguous, in segmentation order.
    pub id: u32,
    /// Full original clause text, trimmed.
    pub text: String,
    /// Short preview of the clause's opening text. Informational only.
    pub start_sentence: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub simplified_text: String,
    #[serde(default)]
    pub key_terms: Vec<String>,
    #[serde(default)]
    pub concerns: Vec<String>,
}

impl Clause {
    /// A freshly-segmented clause with classification fields at their
    /// defaults.
    pub fn new(id: u32, text: impl Into<String>, start_sentence: &str) -> Self {
        Self {
            id,
            text: text.into(),
            start_sentence: preview(start_sentence, START_SENTENCE_LEN),
            category: Category::General,
            risk_level: RiskLevel::Low,
            simplified_text: String::new(),
            key_terms: Vec::new(),
            concerns: Vec::new(),
        }
    }
}

//! Model-backed classification over an OpenAI-compatible chat endpoint.
//!
//! The backend is an opaque plugin: it receives one clause's text with a
//! fixed instruction and must return JSON with keys `category`,
//! `simplified_text`, `risk_level`, `key_terms`, `concerns`. Anything it
//! omits or garbles is repaired by sanitisation; anything worse is an error
//! the pipeline converts into a keyword-fallback classification.

use clausewise_core::{Category, RiskLevel};

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::{
    Classification, ClassifyError, ClauseClassifier, DEFAULT_SIMPLIFIED, MAX_CONCERNS,
    MAX_KEY_TERMS,
};

const SYSTEM_PROMPT: &str = "You are a legal expert specializing in contract analysis. \
     Provide accurate, concise analysis in the requested JSON format.";

const MAX_TOKENS: u32 = 500;

/// Connection settings for the model backend, passed at construction.
/// No ambient state: the API key lives here and nowhere else.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Base URL like `https://api.openai.com` (no trailing slash needed).
    pub base_url: String,
    pub api_key: String,
    /// Model identifier sent with every request.
    pub model: String,
}

/// OpenAI-compatible chat-completions classifier.
pub struct ModelClassifier {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl ModelClassifier {
    pub fn new(config: ModelConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .unwrap_or_else(|_| HeaderValue::from_static("")),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model,
        }
    }

    fn instruction(clause_text: &str) -> String {
        format!(
            "Analyze the following legal clause and provide:\n\
             1. Category classification (choose from: Liability, Indemnity, \
             Confidentiality, Termination, Payment, Intellectual Property, \
             Dispute Resolution, Force Majeure, Governing Law, General)\n\
             2. Plain English summary (2-3 sentences max)\n\
             3. Risk level (low, medium, high)\n\
             4. Key terms mentioned\n\
             5. Potential concerns or red flags\n\n\
             Legal clause to analyze:\n{clause_text}\n\n\
             Respond in JSON format with keys: category, simplified_text, \
             risk_level, key_terms (array), concerns (array)"
        )
    }
}

#[async_trait]
impl ClauseClassifier for ModelClassifier {
    fn name(&self) -> &str {
        "model"
    }

    async fn classify(&self, clause_text: &str) -> Result<Classification, ClassifyError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: Self::instruction(clause_text),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            max_tokens: MAX_TOKENS,
        };

        let resp = self.client.post(&url).json(&request).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClassifyError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = resp.json().await?;
        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or(ClassifyError::EmptyResponse)?;

        debug!(model = %self.model, bytes = content.len(), "classification response received");
        let raw: RawClassification = serde_json::from_str(content)?;
        Ok(raw.sanitize())
    }
}

// ── Wire types ──

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

/// The backend's structured answer before sanitisation. Every field is
/// optional; named defaults substitute for anything absent.
#[derive(Debug, Default, Deserialize)]
struct RawClassification {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    simplified_text: Option<String>,
    #[serde(default)]
    risk_level: Option<String>,
    #[serde(default)]
    key_terms: Option<Vec<String>>,
    #[serde(default)]
    concerns: Option<Vec<String>>,
}

impl RawClassification {
    fn sanitize(self) -> Classification {
        let mut key_terms = self.key_terms.unwrap_or_default();
        key_terms.truncate(MAX_KEY_TERMS);
        let mut concerns = self.concerns.unwrap_or_default();
        concerns.truncate(MAX_CONCERNS);

        Classification {
            category: self.category.as_deref().map(Category::parse).unwrap_or_default(),
            simplified_text: self
                .simplified_text
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SIMPLIFIED.to_string()),
            risk_level: self
                .risk_level
                .as_deref()
                .map(RiskLevel::parse)
                .unwrap_or_default(),
            key_terms,
            concerns,
        }
    }
}

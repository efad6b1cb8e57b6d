use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no stored analysis for document id: {0}")]
    NotFound(String),

    #[error("invalid document id: {0:?}")]
    InvalidId(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

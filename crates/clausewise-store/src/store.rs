//! File-backed analysis store: one JSON blob per document id.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clausewise_ai::DocumentAnalysis;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StoreError;

/// One stored analysis run. Created only from a finalized
/// [`DocumentAnalysis`]; partial batches never reach the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub document_id: String,
    /// Where the text came from (filename or "-" for stdin). Informational.
    pub source_name: String,
    pub analyzed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub analysis: DocumentAnalysis,
}

impl AnalysisRecord {
    pub fn new(
        document_id: impl Into<String>,
        source_name: impl Into<String>,
        analysis: DocumentAnalysis,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            source_name: source_name.into(),
            analyzed_at: Utc::now(),
            analysis,
        }
    }
}

/// Directory of `{document_id}.json` blobs.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a finalized record, overwriting any previous analysis of the
    /// same document id.
    pub fn save(&self, record: &AnalysisRecord) -> Result<(), StoreError> {
        let path = self.blob_path(&record.document_id)?;
        let json = serde_json::to_vec_pretty(record)?;
        fs::write(&path, json)?;
        info!(
            document_id = %record.document_id,
            path = %path.display(),
            clauses = record.analysis.clauses.len(),
            "analysis saved"
        );
        Ok(())
    }

    pub fn load(&self, document_id: &str) -> Result<AnalysisRecord, StoreError> {
        let path = self.blob_path(document_id)?;
        if !path.exists() {
            return Err(StoreError::NotFound(document_id.to_string()));
        }
        let bytes = fs::read(&path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Document ids present in the store, sorted.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    pub fn delete(&self, document_id: &str) -> Result<(), StoreError> {
        let path = self.blob_path(document_id)?;
        if !path.exists() {
            return Err(StoreError::NotFound(document_id.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    /// Blob path for a document id. Ids are restricted to a filename-safe
    /// alphabet so an id can never escape the store directory.
    fn blob_path(&self, document_id: &str) -> Result<PathBuf, StoreError> {
        let valid = !document_id.is_empty()
            && document_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !document_id.starts_with('.');
        if !valid {
            return Err(StoreError::InvalidId(document_id.to_string()));
        }
        Ok(self.dir.join(format!("{document_id}.json")))
    }
}

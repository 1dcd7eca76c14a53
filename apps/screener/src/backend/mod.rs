//! Backend seam: every call the client makes to the screening service.
//!
//! The orchestrator holds a `Box<dyn Backend>`. `HttpBackend` talks to the
//! real service; tests swap in an in-memory fake.

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::ClientError;
use crate::models::{AnalysisResult, JdEntry, Summary};

pub mod http;

pub use http::HttpBackend;

/// A résumé chosen for one analysis request. Not kept after the request.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a résumé from disk, keeping only its file name.
    pub async fn load(path: &Path) -> Result<Self, ClientError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ClientError::Validation(format!("'{}' is not a file path", path.display()))
            })?
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(file_name, bytes))
    }

    /// Content type sent with the multipart part.
    pub fn mime_type(&self) -> &'static str {
        let extension = Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("pdf") => "application/pdf",
            Some("txt") => "text/plain",
            Some("doc") => "application/msword",
            Some("docx") => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            _ => "application/octet-stream",
        }
    }
}

/// The screening service as seen by the client.
#[async_trait]
pub trait Backend: Send + Sync {
    /// GET /jds
    async fn list_jds(&self) -> Result<Vec<JdEntry>, ClientError>;

    /// DELETE /jds/{name}
    async fn delete_jd(&self, name: &str) -> Result<(), ClientError>;

    /// POST /upload-jd
    async fn upload_jd(&self, name: &str, text: &str) -> Result<(), ClientError>;

    /// POST /analyze
    async fn analyze(
        &self,
        resumes: &[ResumeFile],
        jd_name: &str,
    ) -> Result<Vec<AnalysisResult>, ClientError>;

    /// POST /summarize
    async fn summarize(
        &self,
        jd_name: &str,
        resume_names: &[String],
    ) -> Result<Vec<Summary>, ClientError>;

    /// GET /export-scores. The bytes are opaque and never inspected.
    async fn export_scores(&self) -> Result<Bytes, ClientError>;

    /// GET /scores/{jd_name}
    async fn score_history(&self, jd_name: &str) -> Result<Vec<AnalysisResult>, ClientError>;
}

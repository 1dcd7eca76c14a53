use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{Backend, ResumeFile};
use crate::config::Config;
use crate::errors::ClientError;
use crate::models::{AnalysisResult, JdEntry, Summary};

/// Error body shape of the screening service: `{"detail": ...}`.
/// `detail` is a string for handled errors and a list for request validation failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<Value>,
}

/// reqwest-backed client for the screening service.
/// No retries: every call is attempted exactly once.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(config.api_url.clone(), config.request_timeout)
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_jds(&self) -> Result<Vec<JdEntry>, ClientError> {
        let url = self.endpoint(&["jds"])?;
        debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        decode_json(response).await
    }

    async fn delete_jd(&self, name: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&["jds", name])?;
        debug!("DELETE {url}");
        let response = self.client.delete(url).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn upload_jd(&self, name: &str, text: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&["upload-jd"])?;
        let form = Form::new()
            .text("jd_text", text.to_string())
            .text("jd_name", name.to_string());

        debug!("POST {url} (jd_name={name}, {} chars)", text.len());
        let response = self.client.post(url).multipart(form).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn analyze(
        &self,
        resumes: &[ResumeFile],
        jd_name: &str,
    ) -> Result<Vec<AnalysisResult>, ClientError> {
        let url = self.endpoint(&["analyze"])?;
        let mut form = Form::new();
        for resume in resumes {
            let part = Part::bytes(resume.bytes.to_vec())
                .file_name(resume.file_name.clone())
                .mime_str(resume.mime_type())?;
            form = form.part("resumes", part);
        }
        form = form.text("jd_name", jd_name.to_string());

        debug!("POST {url} ({} resumes, jd_name={jd_name})", resumes.len());
        let response = self.client.post(url).multipart(form).send().await?;
        decode_json(response).await
    }

    async fn summarize(
        &self,
        jd_name: &str,
        resume_names: &[String],
    ) -> Result<Vec<Summary>, ClientError> {
        let url = self.endpoint(&["summarize"])?;
        let mut form = Form::new().text("jd_name", jd_name.to_string());
        for name in resume_names {
            form = form.text("resume_names", name.clone());
        }

        debug!("POST {url} ({} resumes, jd_name={jd_name})", resume_names.len());
        let response = self.client.post(url).multipart(form).send().await?;
        decode_json(response).await
    }

    async fn export_scores(&self) -> Result<Bytes, ClientError> {
        let url = self.endpoint(&["export-scores"])?;
        debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        let bytes = ensure_success(response).await?.bytes().await?;
        debug!("export returned {} bytes", bytes.len());
        Ok(bytes)
    }

    async fn score_history(&self, jd_name: &str) -> Result<Vec<AnalysisResult>, ClientError> {
        let url = self.endpoint(&["scores", jd_name])?;
        debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        decode_json(response).await
    }
}

/// Passes 2xx responses through; turns anything else into `ClientError::Api`.
async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = parse_error_detail(&body);
    warn!("Backend returned {}: {}", status, detail.as_deref().unwrap_or(&body));
    Err(ClientError::Api {
        status: status.as_u16(),
        detail,
    })
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = ensure_success(response).await?.bytes().await?;
    serde_json::from_slice(&body).map_err(ClientError::Parse)
}

fn parse_error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        Value::Null => None,
        Value::String(detail) => Some(detail),
        other => Some(other.to_string()),
    }
}

//! In-memory stand-ins for the backend and the UI, shared by unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{TimeZone, Utc};

use crate::backend::{Backend, ResumeFile};
use crate::errors::ClientError;
use crate::models::{AnalysisResult, JdEntry, Summary};
use crate::session::Selection;
use crate::ui::{table, Ui};

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub route: String,
    pub args: Vec<String>,
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

pub fn routes(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().iter().map(|c| c.route.clone()).collect()
}

pub fn analysis_result(name: &str, score: f64) -> AnalysisResult {
    AnalysisResult {
        resume_name: name.to_string(),
        email: Some(format!("{}@example.com", name.trim_end_matches(".pdf"))),
        score,
        timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
    }
}

pub fn resume(name: &str) -> ResumeFile {
    ResumeFile::new(name, format!("%PDF resume of {name}").into_bytes())
}

/// Scripted backend. Operations succeed unless registered with `failing`.
pub struct FakeBackend {
    calls: CallLog,
    jds: Mutex<Vec<JdEntry>>,
    failures: HashMap<&'static str, (u16, Option<String>)>,
    analysis: Vec<AnalysisResult>,
    summaries: Vec<Summary>,
    export: Bytes,
    history: Vec<AnalysisResult>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            jds: Mutex::new(Vec::new()),
            failures: HashMap::new(),
            analysis: Vec::new(),
            summaries: Vec::new(),
            export: Bytes::new(),
            history: Vec::new(),
        }
    }

    pub fn calls(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    pub fn with_jds(self, names: &[&str]) -> Self {
        *self.jds.lock().unwrap() = names.iter().map(|n| JdEntry::named(*n)).collect();
        self
    }

    pub fn with_analysis(mut self, results: Vec<AnalysisResult>) -> Self {
        self.analysis = results;
        self
    }

    pub fn with_summaries(mut self, summaries: Vec<Summary>) -> Self {
        self.summaries = summaries;
        self
    }

    pub fn with_export(mut self, bytes: &'static [u8]) -> Self {
        self.export = Bytes::from_static(bytes);
        self
    }

    pub fn with_history(mut self, results: Vec<AnalysisResult>) -> Self {
        self.history = results;
        self
    }

    /// Makes `op` (the `Backend` method name) answer with a non-2xx status.
    pub fn failing(mut self, op: &'static str, status: u16, detail: Option<&str>) -> Self {
        self.failures
            .insert(op, (status, detail.map(str::to_string)));
        self
    }

    fn record(&self, op: &'static str, route: String, args: Vec<String>) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(Call { route, args });
        match self.failures.get(op) {
            Some((status, detail)) => Err(ClientError::Api {
                status: *status,
                detail: detail.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn list_jds(&self) -> Result<Vec<JdEntry>, ClientError> {
        self.record("list_jds", "GET /jds".to_string(), vec![])?;
        Ok(self.jds.lock().unwrap().clone())
    }

    async fn delete_jd(&self, name: &str) -> Result<(), ClientError> {
        self.record("delete_jd", format!("DELETE /jds/{name}"), vec![])?;
        self.jds.lock().unwrap().retain(|jd| jd.name != name);
        Ok(())
    }

    async fn upload_jd(&self, name: &str, text: &str) -> Result<(), ClientError> {
        self.record(
            "upload_jd",
            "POST /upload-jd".to_string(),
            vec![name.to_string(), text.to_string()],
        )?;
        self.jds.lock().unwrap().push(JdEntry::named(name));
        Ok(())
    }

    async fn analyze(
        &self,
        resumes: &[ResumeFile],
        jd_name: &str,
    ) -> Result<Vec<AnalysisResult>, ClientError> {
        let mut args = vec![jd_name.to_string()];
        args.extend(resumes.iter().map(|r| r.file_name.clone()));
        self.record("analyze", "POST /analyze".to_string(), args)?;
        Ok(self.analysis.clone())
    }

    async fn summarize(
        &self,
        jd_name: &str,
        resume_names: &[String],
    ) -> Result<Vec<Summary>, ClientError> {
        let mut args = vec![jd_name.to_string()];
        args.extend(resume_names.iter().cloned());
        self.record("summarize", "POST /summarize".to_string(), args)?;
        Ok(self.summaries.clone())
    }

    async fn export_scores(&self) -> Result<Bytes, ClientError> {
        self.record("export_scores", "GET /export-scores".to_string(), vec![])?;
        Ok(self.export.clone())
    }

    async fn score_history(&self, jd_name: &str) -> Result<Vec<AnalysisResult>, ClientError> {
        self.record("score_history", format!("GET /scores/{jd_name}"), vec![])?;
        Ok(self.history.clone())
    }
}

/// Records everything the orchestrator asks the UI to do.
#[derive(Default)]
pub struct RecordingUi {
    pub answer_yes: bool,
    pub notices: Mutex<Vec<String>>,
    pub questions: Mutex<Vec<String>>,
    pub loading_shows: Mutex<usize>,
    pub loading_hides: Mutex<usize>,
    pub result_rows: Mutex<Option<Vec<Vec<String>>>>,
    pub selections: Mutex<Vec<Vec<String>>>,
    pub summaries: Mutex<Option<Vec<Summary>>>,
    pub history: Mutex<Option<Vec<String>>>,
    pub jd_lists: Mutex<Vec<Vec<String>>>,
    pub downloads: Mutex<Vec<PathBuf>>,
}

impl RecordingUi {
    pub fn confirming() -> Self {
        Self {
            answer_yes: true,
            ..Default::default()
        }
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    /// `(shown, hidden)` counts of the loading indicator.
    pub fn loading_counts(&self) -> (usize, usize) {
        (
            *self.loading_shows.lock().unwrap(),
            *self.loading_hides.lock().unwrap(),
        )
    }
}

#[async_trait]
impl Ui for RecordingUi {
    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }

    async fn confirm(&self, message: &str) -> bool {
        self.questions.lock().unwrap().push(message.to_string());
        self.answer_yes
    }

    fn show_loading(&self, _label: &str) {
        *self.loading_shows.lock().unwrap() += 1;
    }

    fn hide_loading(&self) {
        *self.loading_hides.lock().unwrap() += 1;
    }

    fn render_jds(&self, jds: &[JdEntry], _chosen: Option<&str>) {
        self.jd_lists
            .lock()
            .unwrap()
            .push(jds.iter().map(|jd| jd.name.clone()).collect());
    }

    fn render_selected_files(&self, _files: &[ResumeFile]) {}

    fn render_jd_draft(&self, _name: &str, _text: &str) {}

    fn render_results(&self, results: &[AnalysisResult], selection: &Selection) {
        *self.result_rows.lock().unwrap() = Some(table::result_rows(results, selection));
    }

    fn render_selection(&self, selection: &Selection) {
        self.selections
            .lock()
            .unwrap()
            .push(selection.names().to_vec());
    }

    fn render_summaries(&self, summaries: &[Summary]) {
        *self.summaries.lock().unwrap() = Some(summaries.to_vec());
    }

    fn render_history(&self, _jd_name: &str, results: &[AnalysisResult]) {
        *self.history.lock().unwrap() =
            Some(results.iter().map(|r| r.resume_name.clone()).collect());
    }

    fn render_download(&self, path: &Path) {
        self.downloads.lock().unwrap().push(path.to_path_buf());
    }
}

use std::sync::Arc;

use tracing::{error, info, warn};

use super::events::{update, AnalyzePlan, Command, Event, JdSource};
use super::state::SessionState;
use crate::backend::Backend;
use crate::downloads::{DownloadDir, EXPORT_FILE_NAME};
use crate::models::analysis::rank_by_score;
use crate::ui::{Loading, Ui};

/// Owns the session and runs the side effects the reducer asks for.
///
/// Every network failure ends here: it is logged, turned into one notice,
/// and never retried.
pub struct Orchestrator {
    state: SessionState,
    backend: Box<dyn Backend>,
    ui: Arc<dyn Ui>,
    downloads: DownloadDir,
}

impl Orchestrator {
    pub fn new(backend: Box<dyn Backend>, ui: Arc<dyn Ui>, downloads: DownloadDir) -> Self {
        Self {
            state: SessionState::default(),
            backend,
            ui,
            downloads,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Initial page load: fills the JD selector.
    pub async fn start(&mut self) {
        self.refresh_jds().await;
    }

    pub async fn dispatch(&mut self, event: Event) {
        if let Some(command) = update(&mut self.state, event) {
            self.run(command).await;
        }
    }

    /// Re-renders the current results table.
    pub fn show_results(&self) {
        self.ui
            .render_results(&self.state.results, &self.state.selection);
    }

    async fn run(&mut self, command: Command) {
        match command {
            Command::Notify(message) => self.ui.notify(&message),
            Command::ShowSelectedFiles => self.ui.render_selected_files(&self.state.resumes),
            Command::ShowJdDraft => self
                .ui
                .render_jd_draft(&self.state.jd_name, &self.state.jd_text),
            Command::ShowSelection => self.ui.render_selection(&self.state.selection),
            Command::RefreshJds => {
                self.refresh_jds().await;
            }
            Command::DeleteJd { name } => self.delete_jd(&name).await,
            Command::Analyze(plan) => self.analyze(plan).await,
            Command::Summarize {
                jd_name,
                resume_names,
            } => self.summarize(&jd_name, &resume_names).await,
            Command::Export => self.export().await,
            Command::ScoreHistory { jd_name } => self.score_history(&jd_name).await,
        }
    }

    /// Non-fatal: on failure the selector keeps its current options.
    async fn refresh_jds(&mut self) -> bool {
        match self.backend.list_jds().await {
            Ok(jds) => {
                info!("Loaded {} saved job descriptions", jds.len());
                self.state.replace_jds(jds);
                self.ui
                    .render_jds(&self.state.jds, self.state.chosen_jd.as_deref());
                true
            }
            Err(e) => {
                error!("Error loading JDs: {e}");
                false
            }
        }
    }

    async fn delete_jd(&mut self, name: &str) {
        let question = format!("Are you sure you want to delete \"{name}\"?");
        if !self.ui.confirm(&question).await {
            info!("Deletion of \"{name}\" cancelled");
            return;
        }

        let _loading = Loading::show(&self.ui, "Deleting job description...");
        match self.backend.delete_jd(name).await {
            Ok(()) => {
                info!("Deleted job description \"{name}\"");
                if !self.refresh_jds().await {
                    // Keep the selector honest even if the reload failed.
                    let remaining = self
                        .state
                        .jds
                        .iter()
                        .filter(|jd| jd.name != name)
                        .cloned()
                        .collect();
                    self.state.replace_jds(remaining);
                }
                self.ui.notify("Job description deleted successfully");
            }
            Err(e) => {
                error!("Error deleting JD \"{name}\": {e}");
                self.ui.notify("Error deleting job description");
            }
        }
    }

    /// Two-step flow: save the draft JD if needed, then analyse against it.
    ///
    /// A JD saved in step one is kept when step two fails. It becomes the
    /// chosen saved JD, so the next attempt goes straight to `/analyze`
    /// instead of re-uploading a name the backend already holds.
    async fn analyze(&mut self, plan: AnalyzePlan) {
        let _loading = Loading::show(&self.ui, "Analyzing resumes...");

        let jd_name = match plan.jd {
            JdSource::Saved(name) => name,
            JdSource::New { name, text } => {
                if let Err(e) = self.backend.upload_jd(&name, &text).await {
                    error!("Error saving JD \"{name}\": {e}");
                    self.ui.notify(&format!(
                        "Error saving job description: {}",
                        e.detail_or("Failed to save job description")
                    ));
                    return;
                }
                info!("Saved job description \"{name}\"");
                self.state.remember_saved_jd(&name);
                self.ui
                    .render_jds(&self.state.jds, self.state.chosen_jd.as_deref());
                name
            }
        };

        match self.backend.analyze(&plan.resumes, &jd_name).await {
            Ok(results) => {
                info!(
                    "Analyzed {} resumes against \"{jd_name}\"",
                    results.len()
                );
                self.state.replace_results(results);
                self.show_results();
            }
            Err(e) => {
                error!("Error analyzing resumes against \"{jd_name}\": {e}");
                self.ui.notify(&format!(
                    "Error analyzing resumes: {}",
                    e.detail_or("Failed to analyze resumes")
                ));
            }
        }
    }

    async fn summarize(&mut self, jd_name: &str, resume_names: &[String]) {
        let _loading = Loading::show(&self.ui, "Generating summaries...");
        match self.backend.summarize(jd_name, resume_names).await {
            Ok(summaries) => {
                if summaries.len() < resume_names.len() {
                    warn!(
                        "Backend summarized {} of {} selected resumes",
                        summaries.len(),
                        resume_names.len()
                    );
                }
                self.state.summaries = summaries;
                self.ui.render_summaries(&self.state.summaries);
            }
            Err(e) => {
                error!("Error generating summaries: {e}");
                self.ui.notify("Error generating summaries");
            }
        }
    }

    async fn export(&mut self) {
        let _loading = Loading::show(&self.ui, "Exporting scores...");
        let bytes = match self.backend.export_scores().await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Error exporting scores: {e}");
                self.ui.notify("Error exporting scores");
                return;
            }
        };

        match self.downloads.save(EXPORT_FILE_NAME, &bytes).await {
            Ok(path) => self.ui.render_download(&path),
            Err(e) => {
                error!("Error writing {EXPORT_FILE_NAME}: {e}");
                self.ui.notify("Error exporting scores");
            }
        }
    }

    async fn score_history(&mut self, jd_name: &str) {
        let _loading = Loading::show(&self.ui, "Loading score history...");
        match self.backend.score_history(jd_name).await {
            Ok(mut results) => {
                rank_by_score(&mut results);
                self.ui.render_history(jd_name, &results);
            }
            Err(e) => {
                error!("Error loading scores for \"{jd_name}\": {e}");
                self.ui.notify("Error loading score history");
            }
        }
    }
}

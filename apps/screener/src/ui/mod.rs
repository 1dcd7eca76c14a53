//! Rendering seam. The orchestrator only talks to `dyn Ui`.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::backend::ResumeFile;
use crate::models::{AnalysisResult, JdEntry, Summary};
use crate::session::Selection;

pub mod table;
pub mod terminal;

pub use terminal::TerminalUi;

#[async_trait]
pub trait Ui: Send + Sync {
    /// Blocking notice to the user (the page's `alert`).
    fn notify(&self, message: &str);

    /// Yes/no question; anything but an explicit yes is a no.
    async fn confirm(&self, message: &str) -> bool;

    fn show_loading(&self, label: &str);
    fn hide_loading(&self);

    fn render_jds(&self, jds: &[JdEntry], chosen: Option<&str>);
    fn render_selected_files(&self, files: &[ResumeFile]);
    fn render_jd_draft(&self, name: &str, text: &str);
    fn render_results(&self, results: &[AnalysisResult], selection: &Selection);
    fn render_selection(&self, selection: &Selection);
    fn render_summaries(&self, summaries: &[Summary]);
    fn render_history(&self, jd_name: &str, results: &[AnalysisResult]);
    fn render_download(&self, path: &Path);
}

/// Shows the loading indicator until dropped, so every exit path hides it.
#[must_use = "the indicator is hidden as soon as the guard is dropped"]
pub struct Loading {
    ui: Arc<dyn Ui>,
}

impl Loading {
    pub fn show(ui: &Arc<dyn Ui>, label: &str) -> Self {
        ui.show_loading(label);
        Self { ui: Arc::clone(ui) }
    }
}

impl Drop for Loading {
    fn drop(&mut self) {
        self.ui.hide_loading();
    }
}

use crate::backend::ResumeFile;
use crate::models::{AnalysisResult, JdEntry, Summary};

/// Résumé names ticked in the results table.
///
/// Names are unique and keep the order they were ticked in, which is the
/// order they are sent to `/summarize`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    names: Vec<String>,
}

impl Selection {
    /// Returns `true` if the name was not already selected.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    /// Returns `true` if the name was selected.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}

/// Everything the page holds between user actions.
///
/// Owned by the orchestrator; nothing here is persisted.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Options of the saved-JD selector, in backend order.
    pub jds: Vec<JdEntry>,
    /// The saved JD currently chosen in the selector.
    pub chosen_jd: Option<String>,
    /// `chosen_jd` was picked by a successful save rather than by the user.
    /// Editing the draft drops such a choice.
    pub chosen_by_save: bool,
    /// Draft for a new JD, used when no saved JD is chosen.
    pub jd_text: String,
    pub jd_name: String,
    pub resumes: Vec<ResumeFile>,
    pub results: Vec<AnalysisResult>,
    pub selection: Selection,
    pub summaries: Vec<Summary>,
}

impl SessionState {
    pub fn has_jd(&self, name: &str) -> bool {
        self.jds.iter().any(|jd| jd.name == name)
    }

    pub fn has_result(&self, resume_name: &str) -> bool {
        self.results.iter().any(|r| r.resume_name == resume_name)
    }

    /// Replaces the selector options. A chosen JD that disappeared is un-chosen.
    pub fn replace_jds(&mut self, jds: Vec<JdEntry>) {
        self.jds = jds;
        if let Some(chosen) = &self.chosen_jd {
            if !self.has_jd(chosen) {
                self.choose_jd(None);
            }
        }
    }

    /// A choice made in the selector. It outlives later draft edits.
    pub fn choose_jd(&mut self, name: Option<String>) {
        self.chosen_jd = name;
        self.chosen_by_save = false;
    }

    /// Records a JD the backend just accepted, without another round trip.
    /// It stays chosen until the draft changes, so a retry skips the upload.
    pub fn remember_saved_jd(&mut self, name: &str) {
        if !self.has_jd(name) {
            self.jds.push(JdEntry::named(name));
        }
        self.chosen_jd = Some(name.to_string());
        self.chosen_by_save = true;
    }

    /// Called on every draft edit. Returns `true` if a saved-by-upload choice was dropped.
    pub fn draft_changed(&mut self) -> bool {
        if !self.chosen_by_save {
            return false;
        }
        self.choose_jd(None);
        true
    }

    /// Replaces the results table. Ticks belong to the old table, so they go too.
    pub fn replace_results(&mut self, results: Vec<AnalysisResult>) {
        self.results = results;
        self.selection.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn result(name: &str) -> AnalysisResult {
        AnalysisResult {
            resume_name: name.to_string(),
            email: Some(format!("{name}@example.com")),
            score: 50.0,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_selection_enforces_uniqueness_and_keeps_order() {
        let mut selection = Selection::default();
        assert!(selection.insert("b.pdf"));
        assert!(selection.insert("a.pdf"));
        assert!(!selection.insert("b.pdf"));
        assert_eq!(selection.names(), ["b.pdf".to_string(), "a.pdf".to_string()]);
    }

    #[test]
    fn test_selection_remove_reports_membership() {
        let mut selection = Selection::default();
        selection.insert("a.pdf");
        assert!(selection.remove("a.pdf"));
        assert!(!selection.remove("a.pdf"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_replace_jds_drops_vanished_choice() {
        let mut state = SessionState {
            chosen_jd: Some("old".to_string()),
            ..Default::default()
        };
        state.replace_jds(vec![JdEntry::named("new")]);
        assert!(state.chosen_jd.is_none());

        state.chosen_jd = Some("new".to_string());
        state.replace_jds(vec![JdEntry::named("new"), JdEntry::named("other")]);
        assert_eq!(state.chosen_jd.as_deref(), Some("new"));
    }

    #[test]
    fn test_remember_saved_jd_chooses_it_once() {
        let mut state = SessionState::default();
        state.remember_saved_jd("py-job");
        state.remember_saved_jd("py-job");
        assert_eq!(state.jds.len(), 1);
        assert_eq!(state.chosen_jd.as_deref(), Some("py-job"));
    }

    #[test]
    fn test_draft_edit_drops_only_a_choice_made_by_saving() {
        let mut state = SessionState::default();
        state.remember_saved_jd("py-job");
        assert!(state.draft_changed());
        assert!(state.chosen_jd.is_none());
        assert!(state.has_jd("py-job"));

        state.choose_jd(Some("py-job".to_string()));
        assert!(!state.draft_changed());
        assert_eq!(state.chosen_jd.as_deref(), Some("py-job"));
    }

    #[test]
    fn test_replace_results_clears_selection() {
        let mut state = SessionState::default();
        state.replace_results(vec![result("a.pdf")]);
        state.selection.insert("a.pdf");

        state.replace_results(vec![result("a.pdf"), result("b.pdf")]);
        assert!(state.selection.is_empty());
        assert_eq!(state.results.len(), 2);
    }
}

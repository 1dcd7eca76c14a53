//! User events and the pure reducer that turns them into commands.
//!
//! `update` never performs I/O. It validates input against the current
//! state, mutates that state, and names the side effect the orchestrator
//! should run next. Validation failures become `Command::Notify`, so a bad
//! click never reaches the network.

use tracing::debug;

use super::state::SessionState;
use crate::backend::ResumeFile;

pub const MSG_NO_RESUMES: &str = "Please select at least one resume";
pub const MSG_NO_JD_FOR_ANALYZE: &str =
    "Please either select a saved JD or provide both JD text and name";
pub const MSG_NO_SELECTION: &str = "Please select at least one resume to summarize";
pub const MSG_NO_JD_CHOSEN: &str = "Please select a job description";

/// Points at a row of the results table, by 1-based position or résumé name.
#[derive(Debug, Clone, PartialEq)]
pub enum RowRef {
    Position(usize),
    Name(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Files picked in the résumé chooser; replaces the previous pick.
    ResumesChosen(Vec<ResumeFile>),
    /// A `.txt` JD file was read.
    JdFileLoaded { file_name: String, text: String },
    JdTextEntered(String),
    JdNameEntered(String),
    /// `None` resets the selector to its placeholder.
    SavedJdChosen(Option<String>),
    ResultToggled { row: RowRef, checked: bool },
    RefreshRequested,
    AnalyzeClicked,
    DeleteClicked,
    SummarizeClicked,
    ExportClicked,
    HistoryClicked,
}

/// Where the analysis gets its JD from.
#[derive(Debug, Clone, PartialEq)]
pub enum JdSource {
    Saved(String),
    /// Saved first via `/upload-jd`, then analysed against.
    New { name: String, text: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzePlan {
    pub resumes: Vec<ResumeFile>,
    pub jd: JdSource,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Notify(String),
    ShowSelectedFiles,
    ShowJdDraft,
    ShowSelection,
    RefreshJds,
    DeleteJd { name: String },
    Analyze(AnalyzePlan),
    Summarize { jd_name: String, resume_names: Vec<String> },
    Export,
    ScoreHistory { jd_name: String },
}

pub fn update(state: &mut SessionState, event: Event) -> Option<Command> {
    debug!("event: {}", event_name(&event));
    match event {
        Event::ResumesChosen(files) => {
            state.resumes = files;
            Some(Command::ShowSelectedFiles)
        }
        Event::JdFileLoaded { file_name, text } => {
            state.jd_text = text;
            state.jd_name = jd_name_from_file(&file_name);
            state.draft_changed();
            Some(Command::ShowJdDraft)
        }
        Event::JdTextEntered(text) => {
            state.jd_text = text;
            state.draft_changed().then_some(Command::ShowJdDraft)
        }
        Event::JdNameEntered(name) => {
            state.jd_name = name.trim().to_string();
            state.draft_changed().then_some(Command::ShowJdDraft)
        }
        Event::SavedJdChosen(None) => {
            state.choose_jd(None);
            None
        }
        Event::SavedJdChosen(Some(name)) => {
            if !state.has_jd(&name) {
                return Some(Command::Notify(format!(
                    "No saved job description named \"{name}\""
                )));
            }
            state.choose_jd(Some(name));
            None
        }
        Event::ResultToggled { row, checked } => toggle(state, row, checked),
        Event::RefreshRequested => Some(Command::RefreshJds),
        Event::AnalyzeClicked => Some(plan_analysis(state)),
        Event::DeleteClicked => Some(match &state.chosen_jd {
            Some(name) => Command::DeleteJd { name: name.clone() },
            None => Command::Notify(MSG_NO_JD_CHOSEN.to_string()),
        }),
        Event::SummarizeClicked => {
            if state.selection.is_empty() {
                return Some(Command::Notify(MSG_NO_SELECTION.to_string()));
            }
            let Some(jd_name) = state.chosen_jd.clone() else {
                return Some(Command::Notify(MSG_NO_JD_CHOSEN.to_string()));
            };
            Some(Command::Summarize {
                jd_name,
                resume_names: state.selection.names().to_vec(),
            })
        }
        Event::ExportClicked => Some(Command::Export),
        Event::HistoryClicked => Some(match &state.chosen_jd {
            Some(name) => Command::ScoreHistory {
                jd_name: name.clone(),
            },
            None => Command::Notify(MSG_NO_JD_CHOSEN.to_string()),
        }),
    }
}

/// A chosen saved JD wins over the draft; otherwise the draft must be complete.
fn plan_analysis(state: &SessionState) -> Command {
    if state.resumes.is_empty() {
        return Command::Notify(MSG_NO_RESUMES.to_string());
    }

    let jd = match &state.chosen_jd {
        Some(name) => JdSource::Saved(name.clone()),
        None if !state.jd_text.trim().is_empty() && !state.jd_name.is_empty() => JdSource::New {
            name: state.jd_name.clone(),
            text: state.jd_text.clone(),
        },
        None => return Command::Notify(MSG_NO_JD_FOR_ANALYZE.to_string()),
    };

    Command::Analyze(AnalyzePlan {
        resumes: state.resumes.clone(),
        jd,
    })
}

fn toggle(state: &mut SessionState, row: RowRef, checked: bool) -> Option<Command> {
    let resume_name = match row {
        RowRef::Position(position) => match position
            .checked_sub(1)
            .and_then(|idx| state.results.get(idx))
        {
            Some(result) => result.resume_name.clone(),
            None => {
                return Some(Command::Notify(format!(
                    "No row {position} in the results table"
                )))
            }
        },
        RowRef::Name(name) if state.has_result(&name) => name,
        RowRef::Name(name) => {
            return Some(Command::Notify(format!(
                "No analysis result for \"{name}\""
            )))
        }
    };

    if checked {
        state.selection.insert(&resume_name);
    } else {
        state.selection.remove(&resume_name);
    }
    Some(Command::ShowSelection)
}

/// `backend-dev.txt` → `backend-dev`; other names are kept as they are.
fn jd_name_from_file(file_name: &str) -> String {
    file_name
        .strip_suffix(".txt")
        .unwrap_or(file_name)
        .to_string()
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::ResumesChosen(_) => "resumes_chosen",
        Event::JdFileLoaded { .. } => "jd_file_loaded",
        Event::JdTextEntered(_) => "jd_text_entered",
        Event::JdNameEntered(_) => "jd_name_entered",
        Event::SavedJdChosen(_) => "saved_jd_chosen",
        Event::ResultToggled { .. } => "result_toggled",
        Event::RefreshRequested => "refresh_requested",
        Event::AnalyzeClicked => "analyze_clicked",
        Event::DeleteClicked => "delete_clicked",
        Event::SummarizeClicked => "summarize_clicked",
        Event::ExportClicked => "export_clicked",
        Event::HistoryClicked => "history_clicked",
    }
}

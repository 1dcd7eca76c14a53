//! Interactive console: binds typed commands to session events.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, error};

use crate::backend::ResumeFile;
use crate::errors::ClientError;
use crate::session::{Event, Orchestrator};
use crate::ui::{TerminalUi, Ui};

pub mod parse;

use parse::{parse_line, Action};

const PROMPT: &str = "screener> ";

/// Reads commands until `quit` or end of input.
/// Each command runs to completion before the next line is read.
pub async fn run(orchestrator: &mut Orchestrator, ui: &TerminalUi) -> Result<()> {
    ui.print("Type 'help' for commands.");

    while let Some(line) = ui.read_line(PROMPT).await? {
        let action = match parse_line(&line) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(message) => {
                ui.notify(&message);
                continue;
            }
        };

        match action {
            Action::Quit => break,
            Action::Help(text) => ui.print(&text),
            Action::ShowResults => orchestrator.show_results(),
            Action::Dispatch(event) => orchestrator.dispatch(event).await,
            Action::LoadResumes(paths) => match load_resumes(&paths).await {
                Ok(files) => orchestrator.dispatch(Event::ResumesChosen(files)).await,
                Err(e) => {
                    error!("Error reading resume files: {e}");
                    ui.notify(&format!("Could not read resume files: {e}"));
                }
            },
            Action::LoadJdFile(path) => match load_jd_file(&path).await {
                Ok(event) => orchestrator.dispatch(event).await,
                Err(e) => {
                    error!("Error reading JD file {}: {e}", path.display());
                    ui.notify(&format!("Could not read {}: {e}", path.display()));
                }
            },
        }
    }

    debug!("console closed");
    Ok(())
}

/// All files or none: a half-read pick would silently drop résumés.
async fn load_resumes(paths: &[PathBuf]) -> Result<Vec<ResumeFile>, ClientError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(ResumeFile::load(path).await?);
    }
    Ok(files)
}

async fn load_jd_file(path: &Path) -> Result<Event, ClientError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            ClientError::Validation(format!("'{}' is not a file path", path.display()))
        })?
        .to_string();
    let text = tokio::fs::read_to_string(path).await?;
    Ok(Event::JdFileLoaded { file_name, text })
}

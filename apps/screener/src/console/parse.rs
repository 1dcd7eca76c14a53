use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use crate::session::{Event, RowRef};

/// One console line, parsed without a binary name.
#[derive(Debug, Parser)]
#[command(
    name = "screener",
    no_binary_name = true,
    disable_version_flag = true,
    about = "Score resumes against job descriptions"
)]
pub struct ConsoleLine {
    #[command(subcommand)]
    pub command: ConsoleCommand,
}

#[derive(Clone, Debug, PartialEq, Subcommand)]
pub enum ConsoleCommand {
    /// Reload saved job descriptions.
    #[command(alias = "refresh")]
    Jds,
    /// Choose a saved JD (no name clears the choice).
    Use { name: Vec<String> },
    /// Delete the chosen saved JD.
    Delete,
    /// Choose resume files for the next analysis.
    Resumes {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Load JD text and name from a .txt file.
    JdFile { path: PathBuf },
    /// Set the text of a new JD.
    JdText {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Set the name of a new JD.
    JdName { name: Vec<String> },
    /// Score the chosen resumes.
    Analyze,
    /// Show the results table again.
    Show,
    /// Tick a row of the results table, by position or resume name.
    Select {
        #[arg(required = true)]
        row: Vec<String>,
    },
    /// Untick a row of the results table.
    #[command(alias = "unselect")]
    Deselect {
        #[arg(required = true)]
        row: Vec<String>,
    },
    /// Summarize the ticked resumes against the chosen JD.
    Summarize,
    /// Stored scores for the chosen JD, best first.
    History,
    /// Download all scores as resume_scores.csv.
    Export,
    /// Leave.
    #[command(alias = "exit")]
    Quit,
}

/// What one console line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Dispatch(Event),
    LoadResumes(Vec<PathBuf>),
    LoadJdFile(PathBuf),
    ShowResults,
    /// Rendered help text.
    Help(String),
    Quit,
}

impl From<ConsoleCommand> for Action {
    fn from(command: ConsoleCommand) -> Self {
        match command {
            ConsoleCommand::Jds => Action::Dispatch(Event::RefreshRequested),
            ConsoleCommand::Use { name } => Action::Dispatch(Event::SavedJdChosen(
                (!name.is_empty()).then(|| name.join(" ")),
            )),
            ConsoleCommand::Delete => Action::Dispatch(Event::DeleteClicked),
            ConsoleCommand::Resumes { paths } => Action::LoadResumes(paths),
            ConsoleCommand::JdFile { path } => Action::LoadJdFile(path),
            ConsoleCommand::JdText { text } => {
                Action::Dispatch(Event::JdTextEntered(text.join(" ")))
            }
            ConsoleCommand::JdName { name } => {
                Action::Dispatch(Event::JdNameEntered(name.join(" ")))
            }
            ConsoleCommand::Analyze => Action::Dispatch(Event::AnalyzeClicked),
            ConsoleCommand::Show => Action::ShowResults,
            ConsoleCommand::Select { row } => toggled(&row, true),
            ConsoleCommand::Deselect { row } => toggled(&row, false),
            ConsoleCommand::Summarize => Action::Dispatch(Event::SummarizeClicked),
            ConsoleCommand::History => Action::Dispatch(Event::HistoryClicked),
            ConsoleCommand::Export => Action::Dispatch(Event::ExportClicked),
            ConsoleCommand::Quit => Action::Quit,
        }
    }
}

/// Parses one console line with shell-style quoting. Blank lines yield `Ok(None)`.
///
/// `Err` carries a rendered message ready to show the user.
pub fn parse_line(line: &str) -> Result<Option<Action>, String> {
    let mut words = shlex::split(line).ok_or_else(|| "Unbalanced quotes".to_string())?;
    let Some(command) = words.first_mut() else {
        return Ok(None);
    };
    command.make_ascii_lowercase();

    match ConsoleLine::try_parse_from(words) {
        Ok(parsed) => Ok(Some(parsed.command.into())),
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            Ok(Some(Action::Help(e.render().to_string().trim_end().to_string())))
        }
        Err(e) => Err(e.render().to_string().trim_end().to_string()),
    }
}

fn toggled(row: &[String], checked: bool) -> Action {
    let target = row.join(" ");
    let row = match target.parse::<usize>() {
        Ok(position) => RowRef::Position(position),
        Err(_) => RowRef::Name(target),
    };
    Action::Dispatch(Event::ResultToggled { row, checked })
}

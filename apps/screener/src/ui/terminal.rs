use std::io::{IsTerminal, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use super::table::{self, HISTORY_HEADERS, RESULT_HEADERS};
use super::Ui;
use crate::backend::ResumeFile;
use crate::models::{AnalysisResult, JdEntry, Summary};
use crate::session::Selection;

/// Plain stdout rendering with an indicatif spinner as the loading indicator.
///
/// Owns stdin so that confirmations and the console prompt read from the
/// same buffered stream.
pub struct TerminalUi {
    input: tokio::sync::Mutex<Lines<BufReader<Stdin>>>,
    spinner: Mutex<Option<ProgressBar>>,
    animate: bool,
    term_width: Option<usize>,
}

impl TerminalUi {
    pub fn new() -> Self {
        let term_width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|width| *width >= 40);

        Self {
            input: tokio::sync::Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
            spinner: Mutex::new(None),
            animate: std::io::stderr().is_terminal(),
            term_width,
        }
    }

    /// Prints `prompt` and waits for one line. `None` at end of input.
    pub async fn read_line(&self, prompt: &str) -> std::io::Result<Option<String>> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut input = self.input.lock().await;
        input.next_line().await
    }

    pub fn print(&self, text: &str) {
        println!("{text}");
    }
}

impl Default for TerminalUi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Ui for TerminalUi {
    fn notify(&self, message: &str) {
        println!("! {message}");
    }

    async fn confirm(&self, message: &str) -> bool {
        match self.read_line(&format!("{message} [y/N] ")).await {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("Could not read confirmation: {e}");
                false
            }
        }
    }

    fn show_loading(&self, label: &str) {
        let Ok(mut spinner) = self.spinner.lock() else {
            return;
        };
        if let Some(previous) = spinner.take() {
            previous.finish_and_clear();
        }
        if !self.animate {
            eprintln!("{label}");
            return;
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(label.to_string());
        *spinner = Some(bar);
    }

    fn hide_loading(&self) {
        if let Ok(mut spinner) = self.spinner.lock() {
            if let Some(bar) = spinner.take() {
                bar.finish_and_clear();
            }
        }
    }

    fn render_jds(&self, jds: &[JdEntry], chosen: Option<&str>) {
        if jds.is_empty() {
            println!("No saved job descriptions.");
            return;
        }
        println!("Saved job descriptions:");
        for jd in jds {
            let marker = if Some(jd.name.as_str()) == chosen { "*" } else { " " };
            match &jd.timestamp {
                Some(ts) => println!(" {marker} {}  ({})", jd.name, table::format_timestamp(ts)),
                None => println!(" {marker} {}", jd.name),
            }
        }
    }

    fn render_selected_files(&self, files: &[ResumeFile]) {
        println!("Selected {} resume file(s):", files.len());
        for file in files {
            println!("  {}", file.file_name);
        }
    }

    fn render_jd_draft(&self, name: &str, text: &str) {
        println!("JD name: {name}");
        println!("JD text: {} characters", text.chars().count());
    }

    fn render_results(&self, results: &[AnalysisResult], selection: &Selection) {
        if results.is_empty() {
            println!("No analysis results.");
            return;
        }
        let rows = table::result_rows(results, selection);
        println!("{}", table::render_table(&RESULT_HEADERS, &rows, self.term_width));
    }

    fn render_selection(&self, selection: &Selection) {
        if selection.is_empty() {
            println!("No resumes selected.");
        } else {
            println!(
                "Selected for summary ({}): {}",
                selection.len(),
                selection.names().join(", ")
            );
        }
    }

    fn render_summaries(&self, summaries: &[Summary]) {
        if summaries.is_empty() {
            println!("No summaries returned.");
            return;
        }
        let rule = "=".repeat(self.term_width.unwrap_or(60).min(80));
        for summary in summaries {
            println!("{rule}");
            println!("{}", summary.resume_name);
            println!("{rule}");
            println!("{}\n", summary.summary.trim_end());
        }
    }

    fn render_history(&self, jd_name: &str, results: &[AnalysisResult]) {
        if results.is_empty() {
            println!("No stored scores for \"{jd_name}\".");
            return;
        }
        println!("Top resumes for \"{jd_name}\":");
        let rows = table::history_rows(results);
        println!("{}", table::render_table(&HISTORY_HEADERS, &rows, self.term_width));
    }

    fn render_download(&self, path: &Path) {
        println!("Downloaded {}", path.display());
    }
}

use chrono::{DateTime, Local, Utc};

use crate::models::AnalysisResult;
use crate::session::Selection;

pub const RESULT_HEADERS: [&str; 6] = ["#", "Select", "Resume", "Email", "Score", "Analyzed At"];
pub const HISTORY_HEADERS: [&str; 5] = ["Rank", "Resume", "Email", "Score", "Analyzed At"];

const MIN_COLUMN_WIDTH: usize = 3;

/// Two decimals, as scores are always shown.
pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// One row per result, checkbox column reflecting the selection.
pub fn result_rows(results: &[AnalysisResult], selection: &Selection) -> Vec<Vec<String>> {
    results
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            let checkbox = if selection.contains(&result.resume_name) {
                "[x]"
            } else {
                "[ ]"
            };
            vec![
                (idx + 1).to_string(),
                checkbox.to_string(),
                result.resume_name.clone(),
                result.email.clone().unwrap_or_else(|| "-".to_string()),
                format_score(result.score),
                format_timestamp(&result.timestamp),
            ]
        })
        .collect()
}

/// Ranked rows; `results` is expected to be ordered already.
pub fn history_rows(results: &[AnalysisResult]) -> Vec<Vec<String>> {
    results
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            vec![
                (idx + 1).to_string(),
                result.resume_name.clone(),
                result.email.clone().unwrap_or_else(|| "-".to_string()),
                format_score(result.score),
                format_timestamp(&result.timestamp),
            ]
        })
        .collect()
}

/// Render an aligned table. Numeric cells are right-aligned; when
/// `max_width` is set, the widest columns are narrowed first.
pub fn render_table(headers: &[&str], rows: &[Vec<String>], max_width: Option<usize>) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
        })
        .collect();

    fit_widths(&mut widths, max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| format_cell(&truncate(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line.trim_end().to_string());
    lines.push(divider.trim_end().to_string());
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map(String::as_str).unwrap_or("-");
                let text = truncate(value, *width);
                let numeric = looks_numeric(&text);
                format_cell(&text, *width, numeric)
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn fit_widths(widths: &mut [usize], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * 2;

    while widths.iter().sum::<usize>() + separators > max_width {
        let Some((idx, _)) = widths
            .iter()
            .enumerate()
            .filter(|(_, w)| **w > MIN_COLUMN_WIDTH)
            .max_by_key(|(_, w)| **w)
        else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let kept: String = text.chars().take(width - 3).collect();
    format!("{kept}...")
}

fn format_cell(text: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{text:>width$}")
    } else {
        format!("{text:<width$}")
    }
}

fn looks_numeric(text: &str) -> bool {
    !text.is_empty() && text.parse::<f64>().is_ok()
}
